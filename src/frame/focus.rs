//! Keyboard focus order.

use crate::view::{ViewId, ViewTree};

/// Tab order of the views that can take focus.
///
/// Built from the tree on demand: every attached view that wants focus and is
/// visible (itself and all of its ancestors), in depth-first order. Stepping
/// wraps around at both ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusChain {
    views: Vec<ViewId>,
}

impl FocusChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the chain from `tree`.
    pub fn build(tree: &ViewTree) -> Self {
        let mut views = Vec::new();
        collect(tree, tree.root(), &mut views);
        Self { views }
    }

    pub fn views(&self) -> &[ViewId] {
        &self.views
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.views.contains(&id)
    }

    /// The view after `current`. With no current view (or one outside the
    /// chain) this is the first view.
    pub fn next(&self, current: Option<ViewId>) -> Option<ViewId> {
        if self.views.is_empty() {
            return None;
        }
        let next = match current.and_then(|c| self.position(c)) {
            Some(idx) => (idx + 1) % self.views.len(),
            None => 0,
        };
        self.views.get(next).copied()
    }

    /// The view before `current`. With no current view (or one outside the
    /// chain) this is the last view.
    pub fn previous(&self, current: Option<ViewId>) -> Option<ViewId> {
        if self.views.is_empty() {
            return None;
        }
        let prev = match current.and_then(|c| self.position(c)) {
            Some(0) | None => self.views.len() - 1,
            Some(idx) => idx - 1,
        };
        self.views.get(prev).copied()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    fn position(&self, id: ViewId) -> Option<usize> {
        self.views.iter().position(|&v| v == id)
    }
}

// Invisible subtrees are skipped whole.
fn collect(tree: &ViewTree, id: ViewId, out: &mut Vec<ViewId>) {
    let Some(node) = tree.get(id) else {
        return;
    };
    if !node.visible {
        return;
    }
    if node.wants_focus {
        out.push(id);
    }
    for &child in tree.children(id) {
        collect(tree, child, out);
    }
}
