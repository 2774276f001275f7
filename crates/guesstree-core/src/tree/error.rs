use std::{error::Error, fmt};

use crate::tree::ids::NodeId;

/// Error type for building and addressing the knowledge base tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Attempted to access a node id that does not exist in the arena.
    MissingNode { node_id: NodeId },
    /// A stored node has exactly one branch, so it is neither a question nor a guess.
    DegenerateNode { text: String },
    /// A stored node has no text.
    EmptyText,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::MissingNode { node_id } => {
                write!(f, "missing node with id {}", node_id.index())
            }
            TreeError::DegenerateNode { text } => {
                write!(f, "node '{text}' has exactly one branch")
            }
            TreeError::EmptyText => write!(f, "node text must not be empty"),
        }
    }
}

impl Error for TreeError {}

/// Error type for the game state machine.
#[derive(Debug)]
pub enum GameError {
    /// An answer arrived while no game is running.
    NoActiveGame,
    /// An answer arrived after the item was guessed.
    GameFinished,
    /// An answer arrived while new knowledge is expected.
    LearningPending,
    /// `learn` was called although the last guess was not rejected.
    NotAwaitingLearning,
    /// `learn` received a blank item or question.
    EmptyInput { field: &'static str },
    /// The tree itself is inconsistent.
    Tree(TreeError),
    /// The knowledge base could not be written. The in-memory tree is still valid.
    Persistence(Box<dyn Error + Send + Sync>),
}

impl GameError {
    /// Usage errors come from calls made out of sequence and never change state.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            GameError::NoActiveGame
                | GameError::GameFinished
                | GameError::LearningPending
                | GameError::NotAwaitingLearning
                | GameError::EmptyInput { .. }
        )
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::NoActiveGame => write!(f, "no game in progress; start a game first"),
            GameError::GameFinished => write!(f, "the game is over; start a new game"),
            GameError::LearningPending => {
                write!(f, "waiting for the new item; answers are not accepted")
            }
            GameError::NotAwaitingLearning => {
                write!(f, "nothing to learn; the last guess was not rejected")
            }
            GameError::EmptyInput { field } => write!(f, "{field} must not be empty"),
            GameError::Tree(err) => write!(f, "knowledge base error: {err}"),
            GameError::Persistence(err) => write!(f, "failed to save knowledge base: {err}"),
        }
    }
}

impl Error for GameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GameError::Tree(err) => Some(err),
            GameError::Persistence(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<TreeError> for GameError {
    fn from(value: TreeError) -> Self {
        GameError::Tree(value)
    }
}
