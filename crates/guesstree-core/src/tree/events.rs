/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// The player confirmed the guess.
    Guessed,
    /// The player rejected the guess; new knowledge is expected.
    GaveUp,
}

/// Notification returned by each state machine call for the presentation layer to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The next question or guess to put to the player.
    Question(String),
    /// The game ended.
    GameOver { outcome: GameOutcome, message: String },
    /// Textual dump of the knowledge base, one line per node.
    KnowledgeBase(Vec<String>),
}

impl GameEvent {
    /// Text payload of a `Question` or `GameOver` event.
    pub fn message(&self) -> Option<&str> {
        match self {
            GameEvent::Question(text) => Some(text.as_str()),
            GameEvent::GameOver { message, .. } => Some(message.as_str()),
            GameEvent::KnowledgeBase(_) => None,
        }
    }
}
