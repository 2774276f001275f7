mod tree;

pub use tree::config::{GameConfig, GameConfigError, ITEM_PLACEHOLDER, SeedConfig};
pub use tree::decision_tree::{DecisionTree, LoadStatus, Phase};
pub use tree::dump::TreeDump;
pub use tree::error::{GameError, TreeError};
pub use tree::events::{GameEvent, GameOutcome};
pub use tree::ids::NodeId;
pub use tree::node::Node;
pub use tree::record::NodeRecord;
pub use tree::store::KnowledgeStore;
