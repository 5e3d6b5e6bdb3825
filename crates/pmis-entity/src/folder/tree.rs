//! Folder tree container with a flat id index.

use std::collections::HashMap;

use serde::Serialize;

use super::node::{FolderKey, FolderNode};

/// A complete derived folder tree.
///
/// Alongside the nested nodes it keeps flat indexes of child positions so
/// breadcrumb rendering does not repeat a depth-first search per crumb.
/// Structural lookups go through [`FolderKey`]. Composite ids can collide
/// (project `north` phase `Design` and project `north-Design` both render as
/// `north-Design`), so the id index keeps the first node in depth-first
/// order, the one [`FolderNode::find`] would return.
#[derive(Debug, Clone, Serialize)]
pub struct FolderTree {
    /// The root node.
    pub root: FolderNode,
    /// Folder key → positions of the child vectors to follow from the root.
    #[serde(skip)]
    by_key: HashMap<FolderKey, Vec<usize>>,
    /// Composite id → positions of the first node carrying that id.
    #[serde(skip)]
    by_id: HashMap<String, Vec<usize>>,
}

impl FolderTree {
    /// Wrap a fully built root node and index it.
    pub fn new(root: FolderNode) -> Self {
        let mut by_key = HashMap::new();
        let mut by_id = HashMap::new();
        index_node(&root, &mut Vec::new(), &mut by_key, &mut by_id);
        Self {
            root,
            by_key,
            by_id,
        }
    }

    /// Total number of documents under the root.
    pub fn total_documents(&self) -> u64 {
        self.root.document_count
    }

    /// Number of folder nodes, root included.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Whether the tree only holds the root.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Look up a node by its composite id.
    pub fn get(&self, id: &str) -> Option<&FolderNode> {
        self.follow(self.by_id.get(id)?)
    }

    /// Look up a node by its structured key.
    pub fn get_key(&self, key: &FolderKey) -> Option<&FolderNode> {
        self.follow(self.by_key.get(key)?)
    }

    /// Whether a node with `id` exists.
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Nodes from the root down to `key`, skipping levels missing from the tree.
    pub fn lineage(&self, key: &FolderKey) -> Vec<&FolderNode> {
        key.lineage()
            .iter()
            .filter_map(|k| self.get_key(k))
            .collect()
    }

    /// Visit every node depth-first, parents before children.
    pub fn walk(&self) -> Vec<&FolderNode> {
        let mut out = Vec::with_capacity(self.by_key.len());
        collect(&self.root, &mut out);
        out
    }

    fn follow(&self, positions: &[usize]) -> Option<&FolderNode> {
        let mut node = &self.root;
        for &pos in positions {
            node = node.children.get(pos)?;
        }
        Some(node)
    }
}

fn index_node(
    node: &FolderNode,
    trail: &mut Vec<usize>,
    by_key: &mut HashMap<FolderKey, Vec<usize>>,
    by_id: &mut HashMap<String, Vec<usize>>,
) {
    by_key.insert(node.key.clone(), trail.clone());
    by_id.entry(node.id.clone()).or_insert_with(|| trail.clone());
    for (pos, child) in node.children.iter().enumerate() {
        trail.push(pos);
        index_node(child, trail, by_key, by_id);
        trail.pop();
    }
}

fn collect<'a>(node: &'a FolderNode, out: &mut Vec<&'a FolderNode>) {
    out.push(node);
    for child in &node.children {
        collect(child, out);
    }
}
