//! Tree reconstruction from the flat block list.
//!
//! Nodes live in an arena owned by [`DocumentTree`]; children are stored as
//! [`NodeId`] lists, so there are no back-pointers and no reference cycles.
//! Every block is moved into at most one node.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::block::Block;
use crate::diagnostic::Diagnostic;

/// Maximum nesting depth below the root.
pub const MAX_DEPTH: usize = 128;

/// Index of a node in a [`DocumentTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Block together with its resolved children.
#[derive(Debug)]
pub struct Node {
    block: Block,
    children: Vec<NodeId>,
}

impl Node {
    /// The wrapped block.
    #[must_use]
    pub fn block(&self) -> &Block {
        &self.block
    }

    /// Child node ids in document order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Rooted tree of blocks.
#[derive(Debug)]
pub struct DocumentTree {
    nodes: Vec<Node>,
}

impl DocumentTree {
    /// Root node id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Look up a node.
    ///
    /// Ids are only handed out by the tree itself, so lookups cannot miss.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no nodes (never true for a built tree).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, block: Block) -> NodeId {
        self.nodes.push(Node {
            block,
            children: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }
}

/// Result of [`build_tree`].
#[derive(Debug)]
pub struct BuildOutcome {
    /// The tree, or `None` when there were no blocks.
    pub tree: Option<DocumentTree>,
    /// Anomalies found while linking.
    pub diagnostics: Vec<Diagnostic>,
}

/// Rebuild the block tree.
///
/// The first block is the root. Children are attached by following each
/// block's `children` ids; dangling ids, blocks listed under two parents and
/// duplicate ids are skipped and reported. Blocks never reached from the root
/// are reported as unreachable.
pub fn build_tree(blocks: Vec<Block>) -> BuildOutcome {
    let mut diagnostics = Vec::new();
    let mut slots: Vec<Option<Block>> = blocks.into_iter().map(Some).collect();

    let mut index: HashMap<String, usize> = HashMap::with_capacity(slots.len());
    for (position, slot) in slots.iter_mut().enumerate() {
        let Some(block) = slot else { continue };
        match index.entry(block.id.clone()) {
            Entry::Occupied(_) => {
                diagnostics.push(Diagnostic::DuplicateId {
                    id: block.id.clone(),
                });
                *slot = None;
            }
            Entry::Vacant(entry) => {
                entry.insert(position);
            }
        }
    }

    let Some(root_block) = slots.first_mut().and_then(Option::take) else {
        return BuildOutcome {
            tree: None,
            diagnostics,
        };
    };

    let mut tree = DocumentTree { nodes: Vec::new() };
    let root = tree.push(root_block);
    let mut stack = vec![(root, 0_usize)];

    while let Some((parent, depth)) = stack.pop() {
        let parent_block = &tree.node(parent).block;
        let parent_id = parent_block.id.clone();
        let child_ids = parent_block.children.clone();

        for child_id in child_ids {
            let Some(&position) = index.get(&child_id) else {
                diagnostics.push(Diagnostic::DanglingReference {
                    parent: parent_id.clone(),
                    child: child_id,
                });
                continue;
            };
            let Some(block) = slots[position].take() else {
                diagnostics.push(Diagnostic::SharedChild {
                    parent: parent_id.clone(),
                    child: child_id,
                });
                continue;
            };

            if depth + 1 > MAX_DEPTH {
                diagnostics.push(Diagnostic::DepthLimit {
                    id: block.id.clone(),
                    limit: MAX_DEPTH,
                });
                discard_subtree(&block, &index, &mut slots);
                continue;
            }

            let child = tree.push(block);
            tree.nodes[parent.0].children.push(child);
            stack.push((child, depth + 1));
        }
    }

    diagnostics.extend(
        slots
            .into_iter()
            .flatten()
            .map(|block| Diagnostic::Unreachable { id: block.id }),
    );

    BuildOutcome {
        tree: Some(tree),
        diagnostics,
    }
}

/// Drop every block below `block` so a cut subtree is not also reported as
/// unreachable.
fn discard_subtree(block: &Block, index: &HashMap<String, usize>, slots: &mut [Option<Block>]) {
    let mut pending = block.children.clone();
    while let Some(id) = pending.pop() {
        if let Some(&position) = index.get(&id)
            && let Some(descendant) = slots[position].take()
        {
            pending.extend(descendant.children);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{BlockKind, TextBody};

    fn text(id: &str) -> Block {
        Block::new(id, BlockKind::Text(TextBody::plain(id)))
    }

    fn page(children: &[&str]) -> Block {
        Block::new("root", BlockKind::Page(TextBody::plain("Title")))
            .with_children(children.iter().copied())
    }

    fn child_ids(tree: &DocumentTree, id: NodeId) -> Vec<String> {
        tree.node(id)
            .children()
            .iter()
            .map(|&child| tree.node(child).block().id.clone())
            .collect()
    }

    #[test]
    fn test_empty_input_has_no_tree() {
        let outcome = build_tree(Vec::new());
        assert!(outcome.tree.is_none());
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_preserves_child_order() {
        let blocks = vec![page(&["c", "a", "b"]), text("a"), text("b"), text("c")];
        let outcome = build_tree(blocks);
        let tree = outcome.tree.unwrap();

        assert_eq!(child_ids(&tree, tree.root()), vec!["c", "a", "b"]);
        assert_eq!(tree.len(), 4);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_nested_children() {
        let blocks = vec![
            page(&["list"]),
            text("list").with_children(["item1", "item2"]),
            text("item1"),
            text("item2"),
        ];
        let tree = build_tree(blocks).tree.unwrap();
        let list = tree.node(tree.root()).children()[0];

        assert_eq!(child_ids(&tree, list), vec!["item1", "item2"]);
    }

    #[test]
    fn test_dangling_reference_is_skipped() {
        let blocks = vec![page(&["a", "missing"]), text("a")];
        let outcome = build_tree(blocks);
        let tree = outcome.tree.unwrap();

        assert_eq!(child_ids(&tree, tree.root()), vec!["a"]);
        assert_eq!(
            outcome.diagnostics,
            vec![Diagnostic::DanglingReference {
                parent: "root".to_owned(),
                child: "missing".to_owned(),
            }]
        );
    }

    #[test]
    fn test_shared_child_attached_once() {
        let blocks = vec![
            page(&["x", "y"]),
            text("x").with_children(["shared"]),
            text("y").with_children(["shared"]),
            text("shared"),
        ];
        let outcome = build_tree(blocks);
        let tree = outcome.tree.unwrap();

        assert_eq!(tree.len(), 4);
        assert_eq!(outcome.diagnostics.len(), 1);
        assert!(matches!(
            outcome.diagnostics[0],
            Diagnostic::SharedChild { .. }
        ));
    }

    #[test]
    fn test_cycle_back_to_root_terminates() {
        let blocks = vec![page(&["a"]), text("a").with_children(["root"])];
        let outcome = build_tree(blocks);

        assert_eq!(outcome.tree.unwrap().len(), 2);
        assert_eq!(
            outcome.diagnostics,
            vec![Diagnostic::SharedChild {
                parent: "a".to_owned(),
                child: "root".to_owned(),
            }]
        );
    }

    #[test]
    fn test_duplicate_id_keeps_first() {
        let blocks = vec![
            page(&["a"]),
            text("a"),
            Block::new("a", BlockKind::Divider),
        ];
        let outcome = build_tree(blocks);
        let tree = outcome.tree.unwrap();
        let child = tree.node(tree.root()).children()[0];

        assert!(matches!(tree.node(child).block().kind, BlockKind::Text(_)));
        assert_eq!(
            outcome.diagnostics,
            vec![Diagnostic::DuplicateId { id: "a".to_owned() }]
        );
    }

    #[test]
    fn test_unreachable_blocks_reported() {
        let blocks = vec![page(&[]), text("orphan")];
        let outcome = build_tree(blocks);

        assert_eq!(outcome.tree.unwrap().len(), 1);
        assert_eq!(
            outcome.diagnostics,
            vec![Diagnostic::Unreachable {
                id: "orphan".to_owned()
            }]
        );
    }

    #[test]
    fn test_depth_limit_cuts_subtree() {
        let mut blocks = vec![page(&["n0"])];
        for depth in 0..=MAX_DEPTH + 1 {
            blocks.push(text(&format!("n{depth}")).with_children([format!("n{}", depth + 1)]));
        }
        let outcome = build_tree(blocks);

        assert_eq!(outcome.tree.unwrap().len(), MAX_DEPTH + 1);
        assert_eq!(
            outcome.diagnostics,
            vec![Diagnostic::DepthLimit {
                id: format!("n{MAX_DEPTH}"),
                limit: MAX_DEPTH,
            }]
        );
    }
}
