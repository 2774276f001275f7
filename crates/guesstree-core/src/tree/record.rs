use serde::{Deserialize, Serialize};

use crate::tree::{arena::Arena, config::SeedConfig, error::TreeError, ids::NodeId, node::Node};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Nested, serializable form of the knowledge base.
/// Every node carries its text and, for questions, both branches. Missing branches mean a guess.
///
/// The aliases accept legacy knowledge bases written by the desktop edition of the game
/// (`Data`, `YesBranch`, `NoBranch`); its extra `Children` and `IsQuestion` properties are ignored.
pub struct NodeRecord {
    #[serde(alias = "Data")]
    pub text: String,
    #[serde(default, alias = "YesBranch", skip_serializing_if = "Option::is_none")]
    pub yes: Option<Box<NodeRecord>>,
    #[serde(default, alias = "NoBranch", skip_serializing_if = "Option::is_none")]
    pub no: Option<Box<NodeRecord>>,
}

impl NodeRecord {
    /// Create a guess record
    pub fn leaf(text: impl Into<String>) -> Self {
        NodeRecord {
            text: text.into(),
            yes: None,
            no: None,
        }
    }

    /// Create a question record with both branches
    pub fn question(text: impl Into<String>, yes: NodeRecord, no: NodeRecord) -> Self {
        NodeRecord {
            text: text.into(),
            yes: Some(Box::new(yes)),
            no: Some(Box::new(no)),
        }
    }

    /// The two-level tree used when no knowledge base exists yet.
    pub fn seed(seed: &SeedConfig) -> Self {
        NodeRecord::question(
            seed.question.clone(),
            NodeRecord::leaf(seed.yes_item.clone()),
            NodeRecord::leaf(seed.no_item.clone()),
        )
    }

    /// Mirrors `Node::is_question`
    pub fn is_question(&self) -> bool {
        self.yes.is_some() && self.no.is_some()
    }

    /// Count every record reachable from this one, itself included.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(record) = stack.pop() {
            count += 1;
            stack.extend(record.yes.as_deref());
            stack.extend(record.no.as_deref());
        }
        count
    }

    /// Number of levels from this record down to its deepest guess. A lone guess has depth 1.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((record, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(record.yes.as_deref().map(|yes| (yes, level + 1)));
            stack.extend(record.no.as_deref().map(|no| (no, level + 1)));
        }
        deepest
    }

    /// Validate the shape and lay the tree out in an arena. The root lands at index 0.
    pub(crate) fn to_arena(&self) -> Result<Arena<Node>, TreeError> {
        let mut arena = Arena::new();
        let root = arena.allocate(Node::leaf(String::new()));
        let mut pending: Vec<(&NodeRecord, NodeId)> = vec![(self, root)];

        while let Some((record, node_id)) = pending.pop() {
            if record.text.trim().is_empty() {
                return Err(TreeError::EmptyText);
            }

            let node = match (record.yes.as_deref(), record.no.as_deref()) {
                (None, None) => Node::leaf(record.text.clone()),
                (Some(yes), Some(no)) => {
                    let yes_id = arena.allocate(Node::leaf(String::new()));
                    let no_id = arena.allocate(Node::leaf(String::new()));
                    // no first so the yes branch is laid out first
                    pending.push((no, no_id));
                    pending.push((yes, yes_id));
                    Node::question(record.text.clone(), yes_id, no_id)
                }
                _ => {
                    return Err(TreeError::DegenerateNode {
                        text: record.text.clone(),
                    });
                }
            };

            *arena
                .get_mut(node_id)
                .ok_or(TreeError::MissingNode { node_id })? = node;
        }

        Ok(arena)
    }

    /// Rebuild the nested form of the subtree rooted at `root`.
    pub(crate) fn from_arena(arena: &Arena<Node>, root: NodeId) -> Result<Self, TreeError> {
        let node = |node_id: NodeId| arena.get(node_id).ok_or(TreeError::MissingNode { node_id });

        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(node_id) = stack.pop() {
            order.push(node_id);
            stack.extend(node(node_id)?.children());
        }

        // Reverse pre-order visits children before their parent.
        let mut built: Vec<Option<NodeRecord>> = (0..arena.len()).map(|_| None).collect();
        for node_id in order.into_iter().rev() {
            let current = node(node_id)?;
            let mut take = |child: Option<NodeId>| {
                child
                    .and_then(|id| built.get_mut(id.index()).and_then(Option::take))
                    .map(Box::new)
            };
            let record = NodeRecord {
                text: current.text().to_string(),
                yes: take(current.yes()),
                no: take(current.no()),
            };
            built[node_id.index()] = Some(record);
        }

        built
            .get_mut(root.index())
            .and_then(Option::take)
            .ok_or(TreeError::MissingNode { node_id: root })
    }
}
