//! Forest assembly from flat, path-ordered node lists.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use arbor_entity::node::model::Node;
use arbor_entity::node::tree::TreeNode;

/// Build a forest from a flat list of nodes ordered by path.
///
/// A parent→children index is built once from the list; subtrees are then
/// assembled with an explicit stack, so the traversal is bounded by the list
/// length regardless of tree depth. With `root_id` set, the matching node
/// becomes the single top-level entry; otherwise every node whose parent is
/// absent from the list is top-level.
pub fn assemble_forest(nodes: &[Node], root_id: Option<Uuid>) -> Vec<TreeNode> {
    let present: HashSet<Uuid> = nodes.iter().map(|n| n.id).collect();

    let mut children: HashMap<Uuid, Vec<&Node>> = HashMap::new();
    let mut tops: Vec<&Node> = Vec::new();

    for node in nodes {
        let is_top = match root_id {
            Some(rid) => node.id == rid,
            None => node.parent_id.is_none_or(|pid| !present.contains(&pid)),
        };
        if is_top {
            tops.push(node);
        } else if let Some(parent_id) = node.parent_id {
            children.entry(parent_id).or_default().push(node);
        }
    }

    tops.into_iter()
        .map(|top| build_subtree(top, &children))
        .collect()
}

struct Frame<'a> {
    node: TreeNode,
    kids: std::slice::Iter<'a, &'a Node>,
}

impl<'a> Frame<'a> {
    fn new(node: &Node, children: &'a HashMap<Uuid, Vec<&'a Node>>) -> Self {
        Self {
            node: TreeNode::leaf(node),
            kids: children.get(&node.id).map(Vec::as_slice).unwrap_or(&[]).iter(),
        }
    }
}

/// Depth-first assembly with an explicit frame stack.
fn build_subtree(root: &Node, children: &HashMap<Uuid, Vec<&Node>>) -> TreeNode {
    let mut stack = vec![Frame::new(root, children)];

    loop {
        let next_child = stack.last_mut().and_then(|frame| frame.kids.next().copied());
        if let Some(child) = next_child {
            stack.push(Frame::new(child, children));
            continue;
        }

        match stack.pop() {
            Some(done) => match stack.last_mut() {
                Some(parent) => parent.node.children.push(done.node),
                None => return done.node,
            },
            // The stack starts non-empty and every pop either returns or
            // folds into a remaining frame.
            None => return TreeNode::leaf(root),
        }
    }
}
