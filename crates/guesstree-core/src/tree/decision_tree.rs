use tracing::{debug, info, warn};

use crate::tree::{
    arena::Arena,
    config::{GameConfig, SeedConfig},
    dump::TreeDump,
    error::{GameError, TreeError},
    events::{GameEvent, GameOutcome},
    ids::NodeId,
    node::Node,
    record::NodeRecord,
    store::KnowledgeStore,
};

/// Where the game currently stands. The cursor only exists while a game is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No game started, or the last one finished by learning.
    Idle,
    /// Waiting for a yes/no answer about the node under the cursor.
    Asking(NodeId),
    /// The guess at this leaf was rejected; waiting for `learn`.
    Learning(NodeId),
    /// The guess was confirmed.
    Guessed,
}

/// How the knowledge base was obtained when the tree was opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Loaded from the store.
    Restored,
    /// Nothing was stored; the seed tree is in use.
    Seeded,
    /// The stored data could not be used; the seed tree is in use.
    Recovered { reason: String },
}

#[derive(Debug)]
/// Owns the knowledge base and runs the question game over it.
/// The root is always at index 0 of the arena, and nodes are only ever added.
pub struct DecisionTree<S> {
    arena: Arena<Node>,
    phase: Phase,
    config: GameConfig,
    store: S,
    load_status: LoadStatus,
}

impl<S: KnowledgeStore> DecisionTree<S> {
    /// Open the knowledge base held by `store` with the default texts.
    pub fn new(store: S) -> Self {
        Self::open(store, GameConfig::default())
    }

    /// Open the knowledge base held by `store`.
    /// Missing, unreadable or malformed data falls back to the seed tree from `config`.
    pub fn open(store: S, config: GameConfig) -> Self {
        let loaded = match store.load() {
            Ok(Some(record)) => record.to_arena().map(Some).map_err(|err| err.to_string()),
            Ok(None) => Ok(None),
            Err(err) => Err(err.to_string()),
        };

        let (arena, load_status) = match loaded {
            Ok(Some(arena)) => {
                debug!(nodes = arena.len(), "restored knowledge base");
                (arena, LoadStatus::Restored)
            }
            Ok(None) => {
                debug!("no stored knowledge base, using seed tree");
                (seed_arena(&config.seed), LoadStatus::Seeded)
            }
            Err(reason) => {
                warn!(%reason, "failed to load knowledge base, using seed tree");
                (seed_arena(&config.seed), LoadStatus::Recovered { reason })
            }
        };

        DecisionTree {
            arena,
            phase: Phase::Idle,
            config,
            store,
            load_status,
        }
    }

    /// Begin a new game at the root and return its first question.
    /// Starting over is allowed at any point; an unanswered give-up is dropped.
    pub fn start_game(&mut self) -> Result<GameEvent, GameError> {
        let root = self.root_id();
        let event = self.prompt_for(root)?;
        if let Phase::Learning(_) = self.phase {
            debug!("new game started while waiting for new knowledge");
        }
        self.phase = Phase::Asking(root);
        debug!("game started");
        Ok(event)
    }

    /// Feed the player's answer about the node under the cursor.
    ///
    /// On a question the cursor moves to the matching branch and the next prompt is returned.
    /// On a guess, "yes" ends the game as won and "no" gives up, after which only `learn`
    /// (or a new game) is accepted.
    pub fn submit_answer(&mut self, is_yes: bool) -> Result<GameEvent, GameError> {
        let cursor = match self.phase {
            Phase::Asking(cursor) => cursor,
            Phase::Idle => return Err(GameError::NoActiveGame),
            Phase::Guessed => return Err(GameError::GameFinished),
            Phase::Learning(_) => return Err(GameError::LearningPending),
        };

        if let Some(next) = self.node(cursor)?.branch(is_yes) {
            let event = self.prompt_for(next)?;
            self.phase = Phase::Asking(next);
            debug!(is_yes, node = next.index(), "moved to next node");
            return Ok(event);
        }

        if is_yes {
            self.phase = Phase::Guessed;
            debug!(node = cursor.index(), "guess confirmed");
            Ok(GameEvent::GameOver {
                outcome: GameOutcome::Guessed,
                message: self.config.win_message.clone(),
            })
        } else {
            self.phase = Phase::Learning(cursor);
            debug!(node = cursor.index(), "guess rejected");
            Ok(GameEvent::GameOver {
                outcome: GameOutcome::GaveUp,
                message: self.config.give_up_message.clone(),
            })
        }
    }

    /// Teach the tree the item the player was thinking of.
    ///
    /// The rejected guess becomes a question with text `question`. Answering it with
    /// `new_item_answer_is_yes` leads to `new_item`, the other answer to the old guess.
    /// The tree is saved afterwards. If saving fails the change is kept in memory and a
    /// `GameError::Persistence` is returned.
    pub fn learn(
        &mut self,
        new_item: &str,
        question: &str,
        new_item_answer_is_yes: bool,
    ) -> Result<(), GameError> {
        let Phase::Learning(cursor) = self.phase else {
            return Err(GameError::NotAwaitingLearning);
        };

        let new_item = new_item.trim();
        if new_item.is_empty() {
            return Err(GameError::EmptyInput { field: "new item" });
        }
        let question = question.trim();
        if question.is_empty() {
            return Err(GameError::EmptyInput { field: "question" });
        }

        let old_item = self.node(cursor)?.text().to_string();
        let new_leaf = self.arena.allocate(Node::leaf(new_item));
        let old_leaf = self.arena.allocate(Node::leaf(old_item.as_str()));
        let (yes, no) = if new_item_answer_is_yes {
            (new_leaf, old_leaf)
        } else {
            (old_leaf, new_leaf)
        };
        self.node_mut(cursor)?.split(question.to_string(), yes, no);
        self.phase = Phase::Idle;

        info!(
            new_item,
            old_item = old_item.as_str(),
            question,
            new_item_answer_is_yes,
            "learned new item"
        );

        self.save()
    }

    /// Write the whole tree to the store.
    pub fn save(&self) -> Result<(), GameError> {
        let record = self.snapshot()?;
        self.store
            .save(&record)
            .map_err(|err| GameError::Persistence(Box::new(err)))?;
        debug!(nodes = self.arena.len(), "saved knowledge base");
        Ok(())
    }
}

impl<S> DecisionTree<S> {
    /// Return the root node id.
    pub fn root_id(&self) -> NodeId {
        NodeId::from(0)
    }

    /// Return a node by id.
    pub fn node(&self, node_id: NodeId) -> Result<&Node, TreeError> {
        self.arena
            .get(node_id)
            .ok_or(TreeError::MissingNode { node_id })
    }

    fn node_mut(&mut self, node_id: NodeId) -> Result<&mut Node, TreeError> {
        self.arena
            .get_mut(node_id)
            .ok_or(TreeError::MissingNode { node_id })
    }

    /// Return how many nodes the knowledge base holds.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Return how many items the game can guess.
    pub fn item_count(&self) -> usize {
        self.arena.iter().filter(|node| node.is_leaf()).count()
    }

    /// Return the current game phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Node under evaluation, if a game is in progress.
    pub fn cursor(&self) -> Option<NodeId> {
        match self.phase {
            Phase::Asking(node_id) | Phase::Learning(node_id) => Some(node_id),
            Phase::Idle | Phase::Guessed => None,
        }
    }

    /// Return how the knowledge base was obtained when the tree was opened.
    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    /// Return the texts and seed tree in use.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Return the store the knowledge base is saved to.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Copy the tree into its nested, serializable form.
    pub fn snapshot(&self) -> Result<NodeRecord, TreeError> {
        NodeRecord::from_arena(&self.arena, self.root_id())
    }

    /// Walk the tree lazily, one line per node. See `TreeDump` for the line format.
    pub fn dump_tree(&self) -> TreeDump<'_> {
        TreeDump::new(&self.arena, self.root_id())
    }

    /// Collect the dump into a knowledge-base notification.
    pub fn show_knowledge_base(&self) -> GameEvent {
        GameEvent::KnowledgeBase(self.dump_tree().collect())
    }

    fn prompt_for(&self, node_id: NodeId) -> Result<GameEvent, TreeError> {
        let node = self.node(node_id)?;
        let text = if node.is_question() {
            node.text().to_string()
        } else {
            self.config.format_guess(node.text())
        };
        Ok(GameEvent::Question(text))
    }
}

/// Lay the two-level seed tree out with the question at the root slot.
fn seed_arena(seed: &SeedConfig) -> Arena<Node> {
    let mut arena = Arena::new();
    arena.allocate(Node::question(
        seed.question.as_str(),
        NodeId::from(1),
        NodeId::from(2),
    ));
    arena.allocate(Node::leaf(seed.yes_item.as_str()));
    arena.allocate(Node::leaf(seed.no_item.as_str()));
    arena
}
