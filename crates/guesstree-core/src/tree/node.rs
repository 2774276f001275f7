use crate::tree::ids::NodeId;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One entry of the knowledge base.
/// Holds a yes/no question when both branches are present, otherwise the name of a guess.
pub struct Node {
    text: String,
    yes: Option<NodeId>,
    no: Option<NodeId>,
}

impl Node {
    /// Create a leaf holding an item to guess
    pub fn leaf(text: impl Into<String>) -> Self {
        Node {
            text: text.into(),
            yes: None,
            no: None,
        }
    }

    /// Create a question node with both branches attached
    pub fn question(text: impl Into<String>, yes: NodeId, no: NodeId) -> Self {
        Node {
            text: text.into(),
            yes: Some(yes),
            no: Some(no),
        }
    }

    /// Question text for internal nodes, item name for leaves
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Branch followed on a "yes" answer
    pub fn yes(&self) -> Option<NodeId> {
        self.yes
    }

    /// Branch followed on a "no" answer
    pub fn no(&self) -> Option<NodeId> {
        self.no
    }

    /// A node asks a question only when both branches exist
    pub fn is_question(&self) -> bool {
        self.yes.is_some() && self.no.is_some()
    }

    /// Check whether the node is a guess with no branches
    pub fn is_leaf(&self) -> bool {
        self.yes.is_none() && self.no.is_none()
    }

    /// Branch selected by an answer. `None` on a leaf.
    pub fn branch(&self, is_yes: bool) -> Option<NodeId> {
        if !self.is_question() {
            return None;
        }
        if is_yes { self.yes } else { self.no }
    }

    /// Present children in yes-then-no order.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.yes.iter().chain(self.no.iter()).copied()
    }

    /// Turn this node into a question in place.
    pub(crate) fn split(&mut self, question: String, yes: NodeId, no: NodeId) {
        self.text = question;
        self.yes = Some(yes);
        self.no = Some(no);
    }
}
