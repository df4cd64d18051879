//! Component nodes and the disjoint-set forest
//!
//! One node per pixel, modeled as a tree: a node whose parent index is
//! its own index is a root. Nodes live in a dense arena indexed by the
//! scan-line index `y * width + x`; attributes live in a parallel arena
//! addressed through per-node handles, so that after path compression
//! several nodes may share one attribute instance. Only the root's
//! attribute is ever read or merged after a union, which makes the
//! sharing safe.

use crate::attributes::Attribute;

/// Per-pixel node of the disjoint-set forest.
#[derive(Debug, Clone, Copy)]
struct Node {
    /// Parent index; equal to the own index on roots.
    parent: u32,
    /// Handle into the attribute arena.
    attr: u32,
    /// Subtree cardinality. Meaningful on roots only.
    size: u32,
    /// Latching activity flag, cleared at most once.
    active: bool,
}

/// Dense disjoint-set forest over the pixels of one image.
///
/// The arena is owned by a single filter invocation; indices are
/// scan-line indices into the image buffer.
pub struct ComponentArena<A: Attribute> {
    nodes: Vec<Node>,
    attrs: Vec<A>,
}

impl<A: Attribute> ComponentArena<A> {
    /// Seed one singleton component per pixel.
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize) * (height as usize);
        let mut nodes = Vec::with_capacity(len);
        let mut attrs = Vec::with_capacity(len);
        for idx in 0..len as u32 {
            let x = idx % width;
            let y = idx / width;
            nodes.push(Node {
                parent: idx,
                attr: idx,
                size: 1,
                active: true,
            });
            attrs.push(A::seed(x, y));
        }
        ComponentArena { nodes, attrs }
    }

    /// Number of nodes in the arena.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Parent index of a node.
    #[inline]
    pub fn parent(&self, n: u32) -> u32 {
        self.nodes[n as usize].parent
    }

    /// Subtree size recorded at a node. Meaningful on roots only.
    #[inline]
    pub fn size(&self, n: u32) -> u32 {
        self.nodes[n as usize].size
    }

    /// Copy of the attribute a node currently points at.
    #[inline]
    pub fn attribute(&self, n: u32) -> A {
        self.attrs[self.nodes[n as usize].attr as usize]
    }

    /// Find the root of a node's set, compressing the path to it.
    ///
    /// Every node traversed on the way has its parent rewritten to the
    /// root and its attribute handle replaced by the root's handle,
    /// releasing the redundant per-node aggregates.
    pub fn find_root(&mut self, n: u32) -> u32 {
        let mut root = n;
        while self.nodes[root as usize].parent != root {
            root = self.nodes[root as usize].parent;
        }

        let root_attr = self.nodes[root as usize].attr;
        let mut current = n;
        while current != root {
            let next = self.nodes[current as usize].parent;
            self.nodes[current as usize].parent = root;
            self.nodes[current as usize].attr = root_attr;
            current = next;
        }

        root
    }

    /// Attach the root `child` under `parent`, merging their attributes.
    ///
    /// Merges exactly once per union and accounts the subtree size on
    /// the new root. `child` must be a root.
    pub fn set_parent(&mut self, child: u32, parent: u32) {
        debug_assert_eq!(self.nodes[child as usize].parent, child);
        debug_assert_ne!(child, parent);

        let child_attr = self.attrs[self.nodes[child as usize].attr as usize];
        let parent_attr = self.nodes[parent as usize].attr;
        self.attrs[parent_attr as usize].merge(child_attr);

        self.nodes[parent as usize].size += self.nodes[child as usize].size;
        self.nodes[child as usize].parent = parent;
    }

    /// Latching activity predicate.
    ///
    /// While the node is still active, recompute activity as
    /// `attribute.value() < lambda`; once a node has gone inactive it
    /// stays inactive, even if the component grows afterwards.
    pub fn is_active(&mut self, n: u32, lambda: u32) -> bool {
        let node = &self.nodes[n as usize];
        if node.active {
            let value = self.attrs[node.attr as usize].value();
            self.nodes[n as usize].active = value < lambda;
        }
        self.nodes[n as usize].active
    }

    /// Force a node inactive.
    ///
    /// Used on a pixel that has met a sealed brighter component: it
    /// will adopt its parent's gray value in the resolve pass.
    #[inline]
    pub fn deactivate(&mut self, n: u32) {
        self.nodes[n as usize].active = false;
    }
}
