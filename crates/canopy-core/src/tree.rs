//! Index-based arena for rooted, ordered trees.
//!
//! A [`Tree`] stores its nodes in a flat vector in depth-first, left-to-right
//! pre-order. [`NodeId`]s are indices into that vector, so:
//!
//! - the root is always `NodeId(0)`,
//! - a parent's index is smaller than each of its children's,
//! - iterating by index visits leaves in traversal order.
//!
//! Layout passes rely on this ordering to walk the tree iteratively in either
//! direction, so arbitrarily deep or unbalanced trees never recurse.
//!
//! Trees are built either incrementally with [`TreeBuilder`] or from raw index
//! links with [`Tree::from_links`], which rejects cycles, shared children and
//! disconnected nodes.

use serde::Serialize;

use crate::error::ModelError;

/// Index of a node inside a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the position of this node in the tree's pre-order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The payload carried by every node: all fields are optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeData {
    name: Option<String>,
    branch_length: Option<f64>,
    support: Option<f64>,
}

impl NodeData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_branch_length(mut self, length: f64) -> Self {
        self.branch_length = Some(length);
        self
    }

    pub fn with_support(mut self, support: f64) -> Self {
        self.support = Some(support);
        self
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn set_branch_length(&mut self, length: Option<f64>) {
        self.branch_length = length;
    }

    pub fn set_support(&mut self, support: Option<f64>) {
        self.support = support;
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn branch_length(&self) -> Option<f64> {
        self.branch_length
    }

    pub fn support(&self) -> Option<f64> {
        self.support
    }
}

/// A node stored in the arena, with its links resolved to [`NodeId`]s.
#[derive(Debug, Clone)]
pub struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    depth: usize,
}

impl Node {
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    pub fn name(&self) -> Option<&str> {
        self.data.name()
    }

    pub fn branch_length(&self) -> Option<f64> {
        self.data.branch_length()
    }

    pub fn support(&self) -> Option<f64> {
        self.data.support()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Number of edges between this node and the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A rooted, ordered tree stored in pre-order.
///
/// A tree always has at least one node (the root). It is immutable once
/// built.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Builds a tree from per-node payloads and child index lists.
    ///
    /// `children[i]` lists the children of node `i` in drawing order; missing
    /// trailing entries mean "no children". The result is re-indexed into
    /// pre-order starting at `root`.
    ///
    /// # Errors
    ///
    /// - [`ModelError::UnknownNode`] when a child index (or the root) is out of range.
    /// - [`ModelError::MultipleParents`] when a node is listed as a child twice.
    /// - [`ModelError::CyclicTree`] when the links contain a cycle.
    /// - [`ModelError::UnreachableNode`] when a node is not connected to the root.
    /// - [`ModelError::InvalidBranchLength`] for negative or non-finite lengths.
    pub fn from_links(
        data: Vec<NodeData>,
        mut children: Vec<Vec<usize>>,
        root: usize,
    ) -> Result<Self, ModelError> {
        let count = data.len();
        if root >= count {
            return Err(ModelError::UnknownNode {
                node: "root".to_string(),
                child: root,
            });
        }
        // Link lists past the last payload belong to nodes that do not exist
        if children.len() > count {
            return Err(ModelError::UnknownNode {
                node: format!("#{count}"),
                child: count,
            });
        }
        children.resize(count, Vec::new());

        for (index, node) in data.iter().enumerate() {
            if let Some(length) = node.branch_length() {
                if !length.is_finite() || length < 0.0 {
                    return Err(ModelError::InvalidBranchLength {
                        node: describe(index, node),
                        value: length,
                    });
                }
            }
        }

        let mut parents: Vec<Option<usize>> = vec![None; count];
        for (parent, kids) in children.iter().enumerate() {
            for &child in kids {
                if child >= count {
                    return Err(ModelError::UnknownNode {
                        node: describe(parent, &data[parent]),
                        child,
                    });
                }
                if child == root || child == parent {
                    return Err(ModelError::CyclicTree {
                        node: describe(child, &data[child]),
                    });
                }
                if parents[child].is_some() {
                    return Err(ModelError::MultipleParents {
                        node: describe(child, &data[child]),
                    });
                }
                parents[child] = Some(parent);
            }
        }

        // Pre-order walk with an explicit stack; children pushed in reverse
        // so the first child is visited first.
        let mut order = Vec::with_capacity(count);
        let mut new_index: Vec<Option<usize>> = vec![None; count];
        let mut stack = vec![root];
        while let Some(old) = stack.pop() {
            new_index[old] = Some(order.len());
            order.push(old);
            stack.extend(children[old].iter().rev().copied());
        }

        if order.len() != count {
            let stray = (0..count)
                .find(|&i| new_index[i].is_none())
                .unwrap_or_default();
            return Err(classify_stray(stray, &parents, &data));
        }

        let mut slots: Vec<Option<NodeData>> = data.into_iter().map(Some).collect();
        let mut nodes: Vec<Node> = Vec::with_capacity(count);
        for &old in &order {
            let parent = parents[old].and_then(|p| new_index[p]).map(NodeId);
            let depth = parent.map_or(0, |p| nodes[p.0].depth + 1);
            let kids = children[old]
                .iter()
                .filter_map(|&c| new_index[c])
                .map(NodeId)
                .collect();
            nodes.push(Node {
                data: slots[old].take().unwrap_or_default(),
                parent,
                children: kids,
                depth,
            });
        }

        Ok(Self { nodes })
    }

    /// Returns the root node id (always index 0).
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Total number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always has a root, so this is never true for a built tree.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the id does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Returns the node at a pre-order index, if it exists.
    pub fn get(&self, index: usize) -> Option<(NodeId, &Node)> {
        self.nodes.get(index).map(|node| (NodeId(index), node))
    }

    /// Iterates all nodes in pre-order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (NodeId, &Node)> + ExactSizeIterator {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).children()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent()
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.node(id).is_leaf()
    }

    /// Iterates leaves in traversal (left-to-right) order.
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(id, _)| id)
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// The largest node depth (0 for a single-node tree).
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(Node::depth).max().unwrap_or(0)
    }
}

/// Incremental tree construction.
///
/// Children can be attached to any existing node in any order; [`build`](Self::build)
/// re-indexes the result into pre-order while keeping each node's child order.
///
/// # Examples
///
/// ```
/// use canopy_core::tree::{NodeData, TreeBuilder};
///
/// let mut builder = TreeBuilder::new(NodeData::new());
/// let root = builder.root();
/// let inner = builder.add_child(root, NodeData::new().with_support(90.0));
/// builder.add_child(inner, NodeData::new().with_name("A").with_branch_length(0.1));
/// builder.add_child(inner, NodeData::new().with_name("B").with_branch_length(0.2));
/// builder.add_child(root, NodeData::new().with_name("C").with_branch_length(0.5));
///
/// let tree = builder.build().unwrap();
/// assert_eq!(tree.len(), 5);
/// assert_eq!(tree.leaf_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    data: Vec<NodeData>,
    children: Vec<Vec<usize>>,
}

impl TreeBuilder {
    /// Starts a tree with the given root payload.
    pub fn new(root: NodeData) -> Self {
        Self {
            data: vec![root],
            children: vec![Vec::new()],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Appends a child under `parent` and returns its id.
    ///
    /// The returned id is only meaningful for this builder; the built tree
    /// assigns pre-order ids.
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not issued by this builder.
    pub fn add_child(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        assert!(
            parent.0 < self.data.len(),
            "Adding child: parent node #{} does not exist",
            parent.0
        );
        let id = self.data.len();
        self.data.push(data);
        self.children.push(Vec::new());
        self.children[parent.0].push(id);
        NodeId(id)
    }

    /// Mutable access to a node payload added earlier.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this builder.
    pub fn data_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.data[id.0]
    }

    /// Number of nodes added so far, including the root.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Finishes the tree.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidBranchLength`] for negative or non-finite
    /// branch lengths. Structural errors cannot occur through the builder.
    pub fn build(self) -> Result<Tree, ModelError> {
        Tree::from_links(self.data, self.children, 0)
    }
}

/// Human-readable reference to a node for error messages.
fn describe(index: usize, data: &NodeData) -> String {
    match data.name() {
        Some(name) if !name.is_empty() => format!("`{name}` (#{index})"),
        _ => format!("#{index}"),
    }
}

/// Decides why `stray` was not reached from the root.
///
/// Every node has at most one parent here, so following parent links either
/// ends at a parentless node (disconnected) or loops (cycle).
fn classify_stray(stray: usize, parents: &[Option<usize>], data: &[NodeData]) -> ModelError {
    let mut seen = vec![false; parents.len()];
    let mut current = stray;
    loop {
        if seen[current] {
            return ModelError::CyclicTree {
                node: describe(current, &data[current]),
            };
        }
        seen[current] = true;
        match parents[current] {
            Some(parent) => current = parent,
            None => {
                return ModelError::UnreachableNode {
                    node: describe(stray, &data[stray]),
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn named(name: &str) -> NodeData {
        NodeData::new().with_name(name)
    }

    #[test]
    fn test_single_node_tree() {
        let tree = TreeBuilder::new(named("root")).build().unwrap();
        assert_eq!(tree.len(), 1);
        assert!(tree.is_leaf(tree.root()));
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.max_depth(), 0);
    }

    #[test]
    fn test_builder_reindexes_to_preorder() {
        let mut builder = TreeBuilder::new(named("root"));
        let root = builder.root();
        let a = builder.add_child(root, named("a"));
        builder.add_child(root, named("b"));
        builder.add_child(a, named("a1"));
        builder.add_child(a, named("a2"));

        let tree = builder.build().unwrap();
        let names: Vec<_> = tree.iter().map(|(_, n)| n.name().unwrap()).collect();
        assert_eq!(names, vec!["root", "a", "a1", "a2", "b"]);

        let leaves: Vec<_> = tree
            .leaves()
            .map(|id| tree.node(id).name().unwrap())
            .collect();
        assert_eq!(leaves, vec!["a1", "a2", "b"]);
        assert_eq!(tree.max_depth(), 2);
    }

    #[test]
    fn test_parent_links_and_depth() {
        let data = vec![named("r"), named("x"), named("y")];
        let tree = Tree::from_links(data, vec![vec![1], vec![2]], 0).unwrap();
        let (y, node) = tree.get(2).unwrap();
        assert_eq!(node.depth(), 2);
        assert_eq!(tree.parent(y).map(NodeId::index), Some(1));
        assert_eq!(tree.children(tree.root()).len(), 1);
    }

    #[test]
    fn test_root_not_first_in_links() {
        let data = vec![named("leaf"), named("root")];
        let tree = Tree::from_links(data, vec![vec![], vec![0]], 1).unwrap();
        assert_eq!(tree.node(tree.root()).name(), Some("root"));
    }

    #[test]
    fn test_unknown_child_rejected() {
        let err = Tree::from_links(vec![named("r")], vec![vec![3]], 0).unwrap_err();
        assert!(matches!(err, ModelError::UnknownNode { child: 3, .. }));
    }

    #[test]
    fn test_extra_link_lists_report_first_missing_node() {
        let links = vec![vec![1], vec![], vec![], vec![]];
        let err = Tree::from_links(vec![named("r"), named("a")], links, 0).unwrap_err();
        assert_eq!(
            err,
            ModelError::UnknownNode {
                node: "#2".to_string(),
                child: 2
            }
        );
    }

    #[test]
    fn test_unknown_root_rejected() {
        let err = Tree::from_links(vec![named("r")], vec![], 2).unwrap_err();
        assert!(matches!(err, ModelError::UnknownNode { .. }));
    }

    #[test]
    fn test_link_to_root_is_cycle() {
        let data = vec![named("r"), named("x")];
        let err = Tree::from_links(data, vec![vec![1], vec![0]], 0).unwrap_err();
        assert!(matches!(err, ModelError::CyclicTree { .. }));
        assert!(err.to_string().contains("`r`"));
    }

    #[test]
    fn test_detached_cycle_detected() {
        // 1 -> 2 -> 1, neither reachable from the root
        let data = vec![named("r"), named("p"), named("q")];
        let err = Tree::from_links(data, vec![vec![], vec![2], vec![1]], 0).unwrap_err();
        assert!(matches!(err, ModelError::CyclicTree { .. }));
    }

    #[test]
    fn test_shared_child_rejected() {
        let data = vec![named("r"), named("x"), named("y")];
        let err = Tree::from_links(data, vec![vec![1, 2], vec![2]], 0).unwrap_err();
        assert_eq!(
            err,
            ModelError::MultipleParents {
                node: "`y` (#2)".to_string()
            }
        );
    }

    #[test]
    fn test_unreachable_node_rejected() {
        let data = vec![named("r"), named("x"), named("island")];
        let err = Tree::from_links(data, vec![vec![1]], 0).unwrap_err();
        assert_eq!(
            err,
            ModelError::UnreachableNode {
                node: "`island` (#2)".to_string()
            }
        );
    }

    #[test]
    fn test_negative_branch_length_rejected() {
        let mut builder = TreeBuilder::new(NodeData::new());
        let root = builder.root();
        builder.add_child(root, NodeData::new().with_branch_length(-0.5));
        let err = builder.build().unwrap_err();
        assert!(matches!(err, ModelError::InvalidBranchLength { value, .. } if value == -0.5));
    }

    #[test]
    fn test_nan_branch_length_rejected() {
        let mut builder = TreeBuilder::new(NodeData::new());
        let root = builder.root();
        builder.add_child(root, NodeData::new().with_branch_length(f64::NAN));
        assert!(builder.build().is_err());
    }

    #[test]
    fn test_deep_caterpillar_builds_iteratively() {
        let mut builder = TreeBuilder::new(NodeData::new());
        let mut spine = builder.root();
        for i in 0..200_000 {
            builder.add_child(spine, named(&format!("leaf{i}")));
            spine = builder.add_child(spine, NodeData::new());
        }
        let tree = builder.build().unwrap();
        assert_eq!(tree.len(), 400_001);
        assert_eq!(tree.max_depth(), 200_000);
    }

    proptest! {
        #[test]
        fn prop_random_parent_arrays_build_preorder(parents in proptest::collection::vec(any::<prop::sample::Index>(), 0..64)) {
            let mut builder = TreeBuilder::new(NodeData::new());
            let mut ids = vec![builder.root()];
            for index in &parents {
                let parent = ids[index.index(ids.len())];
                ids.push(builder.add_child(parent, NodeData::new()));
            }
            let tree = builder.build().unwrap();

            prop_assert_eq!(tree.len(), parents.len() + 1);
            for (id, node) in tree.iter() {
                if let Some(parent) = node.parent() {
                    prop_assert!(parent < id);
                    prop_assert_eq!(node.depth(), tree.node(parent).depth() + 1);
                    prop_assert!(tree.children(parent).contains(&id));
                }
            }
        }
    }
}
