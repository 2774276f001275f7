use crate::tree::{arena::Arena, ids::NodeId, node::Node};

const BRANCH: &str = "|-";
const LAST_BRANCH: &str = "\\-";
const PIPE_INDENT: &str = "| ";
const BLANK_INDENT: &str = "  ";

/// Lazy depth-first, pre-order rendering of the knowledge base.
///
/// Yields one line per node, `<indent><marker><text>`, where the marker is `\-` for the
/// last child of its parent and `|-` otherwise. The root is drawn as `|-`, so every line
/// below it starts with `| `.
/// The walk keeps its own stack and never touches the tree, so a fresh dump can be taken
/// at any time.
#[derive(Debug, Clone)]
pub struct TreeDump<'a> {
    nodes: &'a Arena<Node>,
    stack: Vec<(NodeId, String, bool)>,
}

impl<'a> TreeDump<'a> {
    pub(crate) fn new(nodes: &'a Arena<Node>, root: NodeId) -> Self {
        TreeDump {
            nodes,
            stack: vec![(root, String::new(), false)],
        }
    }
}

impl Iterator for TreeDump<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let (node_id, indent, is_last) = self.stack.pop()?;
        let node = self.nodes.get(node_id)?;

        let (marker, child_indent) = if is_last {
            (LAST_BRANCH, BLANK_INDENT)
        } else {
            (BRANCH, PIPE_INDENT)
        };
        let line = format!("{indent}{marker}{}", node.text());

        // pushed in reverse so the yes branch is rendered first
        let child_indent = format!("{indent}{child_indent}");
        for (position, child) in node.children().rev().enumerate() {
            self.stack.push((child, child_indent.clone(), position == 0));
        }

        Some(line)
    }
}
