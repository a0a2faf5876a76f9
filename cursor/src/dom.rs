//! Element lookups the cursor needs from its host document.
//!
//! The engine never registers per-element listeners. The host forwards
//! document-level over/out/click events and the engine resolves the element
//! that matters at event time through [`Dom`]: the nearest tagged ancestor,
//! containment, live bounding boxes, and the enclosing link's path. Elements
//! tagged after mount are therefore eligible without any registration.
//!
//! [`MemoryDom`] is a small arena-backed tree for headless hosts and tests.

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

use crate::geom::Rect;

/// Read-only view of a document tree.
pub trait Dom {
    /// Handle to a node. Compared by identity.
    type Node: Clone + PartialEq;

    /// The nearest inclusive ancestor of `node` carrying the cursor tag.
    fn tagged_ancestor(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    /// Current bounding box, or `None` if the node is no longer laid out.
    fn bounding_rect(&self, node: &Self::Node) -> Option<Rect>;

    /// Path of the nearest enclosing in-app link, if any.
    ///
    /// Links to another origin, `target=_blank` links and non-navigating
    /// hrefs (`#…`, `mailto:`) report `None`.
    fn link_path(&self, node: &Self::Node) -> Option<String>;
}

/// Index of a node inside a [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct MemoryNode {
    parent: Option<NodeId>,
    tagged: bool,
    rect: Option<Rect>,
    href: Option<String>,
    attached: bool,
}

/// Arena-backed document used where no browser is available.
#[derive(Debug, Clone)]
pub struct MemoryDom {
    nodes: Vec<MemoryNode>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// A document containing only its root (the body).
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![MemoryNode { parent: None, tagged: false, rect: None, href: None, attached: true }],
        }
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append an untagged child under `parent`.
    pub fn append(&mut self, parent: NodeId) -> NodeId {
        self.nodes.push(MemoryNode { parent: Some(parent), tagged: false, rect: None, href: None, attached: true });
        NodeId(self.nodes.len() - 1)
    }

    /// Append a tagged child with the given bounds.
    pub fn append_tagged(&mut self, parent: NodeId, rect: Rect) -> NodeId {
        let id = self.append(parent);
        self.set_tagged(id, true);
        self.set_rect(id, rect);
        id
    }

    /// Append a link child pointing at `href`.
    pub fn append_link(&mut self, parent: NodeId, href: &str) -> NodeId {
        let id = self.append(parent);
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.href = Some(href.to_owned());
        }
        id
    }

    pub fn set_tagged(&mut self, id: NodeId, tagged: bool) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.tagged = tagged;
        }
    }

    pub fn set_rect(&mut self, id: NodeId, rect: Rect) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.rect = Some(rect);
        }
    }

    /// Detach a node (and, implicitly, its subtree) from layout.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.attached = false;
        }
    }

    fn node(&self, id: NodeId) -> Option<&MemoryNode> {
        self.nodes.get(id.0)
    }

    fn is_attached(&self, id: NodeId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            match self.node(c) {
                Some(n) if n.attached => cur = n.parent,
                _ => return false,
            }
        }
        true
    }

    fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut cur = Some(id);
        std::iter::from_fn(move || {
            let c = cur?;
            cur = self.node(c).and_then(|n| n.parent);
            Some(c)
        })
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn tagged_ancestor(&self, node: &NodeId) -> Option<NodeId> {
        self.ancestors(*node)
            .find(|id| self.node(*id).is_some_and(|n| n.tagged))
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        self.ancestors(*node).any(|id| id == *ancestor)
    }

    fn bounding_rect(&self, node: &NodeId) -> Option<Rect> {
        if !self.is_attached(*node) {
            return None;
        }
        self.node(*node).and_then(|n| n.rect)
    }

    fn link_path(&self, node: &NodeId) -> Option<String> {
        let href = self
            .ancestors(*node)
            .find_map(|id| self.node(id).and_then(|n| n.href.clone()))?;
        internal_path(&href)
    }
}

/// Reduce an href to the in-app path it navigates to.
///
/// Accepts root-relative hrefs (`/about?x=1#top` → `/about`). Anything that
/// leaves the app or does not navigate yields `None`.
#[must_use]
pub fn internal_path(href: &str) -> Option<String> {
    let href = href.trim();
    if !href.starts_with('/') || href.starts_with("//") {
        return None;
    }
    let end = href.find(['?', '#']).unwrap_or(href.len());
    Some(normalize_path(&href[..end]))
}

/// Drop a trailing slash so `/blog/` and `/blog` compare equal.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/".to_owned() } else { trimmed.to_owned() }
}
