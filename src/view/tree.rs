//! Tree operations: insert, attach, detach, reorder, walk, hit-test, draw.

use std::ops::BitOr;

use slotmap::{SecondaryMap, SlotMap};

use crate::draw::DrawContext;
use crate::error::ViewError;
use crate::geometry::{Point, Rect};

use super::content::DrawInfo;
use super::node::{ViewId, ViewNode};

/// Empty slice constant for returning when a view has no children.
const EMPTY_CHILDREN: &[ViewId] = &[];

// ---------------------------------------------------------------------------
// GetViewOptions
// ---------------------------------------------------------------------------

/// Options for [`ViewTree::view_at`] and [`ViewTree::views_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GetViewOptions(pub u8);

impl GetViewOptions {
    /// Direct children only, visible ones only.
    pub const NONE: GetViewOptions = GetViewOptions(0);
    /// Descend into containers.
    pub const DEEP: GetViewOptions = GetViewOptions(1);
    /// Skip views that have mouse input disabled.
    pub const MOUSE_ENABLED: GetViewOptions = GetViewOptions(2);
    /// Report containers as well as leaves when descending.
    pub const INCLUDE_CONTAINERS: GetViewOptions = GetViewOptions(4);
    /// Consider invisible views too.
    pub const INCLUDE_INVISIBLE: GetViewOptions = GetViewOptions(8);

    pub fn contains(self, other: GetViewOptions) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl BitOr for GetViewOptions {
    type Output = GetViewOptions;
    fn bitor(self, rhs: Self) -> Self::Output {
        GetViewOptions(self.0 | rhs.0)
    }
}

// ---------------------------------------------------------------------------
// ViewTree
// ---------------------------------------------------------------------------

/// Every view, backed by a slotmap arena.
///
/// The arena owns all views. Containers own the order of their children;
/// children point back at their container through a plain id. A view that is
/// not reachable from the root is detached: it keeps its subtree and can be
/// attached again.
pub struct ViewTree {
    nodes: SlotMap<ViewId, ViewNode>,
    children: SecondaryMap<ViewId, Vec<ViewId>>,
    parent: SecondaryMap<ViewId, ViewId>,
    root: ViewId,
}

impl ViewTree {
    /// Create a tree whose root is `root`. The root is always a container.
    pub fn new(mut root: ViewNode) -> Self {
        root.is_container = true;
        let mut nodes = SlotMap::with_key();
        let root_id = nodes.insert(root);
        let mut children = SecondaryMap::new();
        children.insert(root_id, Vec::new());
        Self {
            nodes,
            children,
            parent: SecondaryMap::new(),
            root: root_id,
        }
    }

    pub fn root(&self) -> ViewId {
        self.root
    }

    /// Insert a detached view.
    pub fn insert(&mut self, mut node: ViewNode) -> ViewId {
        if let Some(control) = node.control.as_mut() {
            control.track_edit_phases();
        }
        let id = self.nodes.insert(node);
        self.children.insert(id, Vec::new());
        id
    }

    pub fn get(&self, id: ViewId) -> Option<&ViewNode> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: ViewId) -> Option<&mut ViewNode> {
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of views, attached or not, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: the root cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: ViewId) -> Result<&ViewNode, ViewError> {
        self.nodes.get(id).ok_or(ViewError::UnknownView(id))
    }

    // ── Relationships ────────────────────────────────────────────────

    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.parent.get(id).copied()
    }

    /// Children back-to-front. Empty for leaves and unknown ids.
    pub fn children(&self, id: ViewId) -> &[ViewId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Parent, grandparent, ... up to the topmost ancestor.
    pub fn ancestors(&self, id: ViewId) -> Vec<ViewId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Whether `ancestor` is `id` or one of its ancestors.
    pub fn is_self_or_ancestor(&self, ancestor: ViewId, id: ViewId) -> bool {
        id == ancestor || self.ancestors(id).contains(&ancestor)
    }

    /// Whether `id` is reachable from the root.
    pub fn is_attached(&self, id: ViewId) -> bool {
        self.contains(id) && self.is_self_or_ancestor(self.root, id)
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: ViewId) -> Vec<ViewId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    // ── Attach / detach ──────────────────────────────────────────────

    /// Append `view` as the frontmost child of `container`.
    ///
    /// A view attached elsewhere is detached from its old container first.
    pub fn add_view(&mut self, container: ViewId, view: ViewId) -> Result<(), ViewError> {
        self.attach(container, view, None)
    }

    /// Insert `view` directly behind `before` in `container`'s child list.
    pub fn add_view_before(
        &mut self,
        container: ViewId,
        view: ViewId,
        before: ViewId,
    ) -> Result<(), ViewError> {
        self.attach(container, view, Some(before))
    }

    /// Check that `view` could be attached to `container` (behind `before`)
    /// without changing anything.
    pub fn check_attach(
        &self,
        container: ViewId,
        view: ViewId,
        before: Option<ViewId>,
    ) -> Result<(), ViewError> {
        if !self.node(container)?.is_container {
            return Err(ViewError::NotAContainer(container));
        }
        self.node(view)?;
        if view == self.root {
            return Err(ViewError::RootView);
        }
        if self.is_self_or_ancestor(view, container) {
            return Err(ViewError::WouldCreateCycle { container, view });
        }
        if let Some(before) = before {
            if before == view || self.parent(before) != Some(container) {
                return Err(ViewError::NotAChild { container, view: before });
            }
        }
        Ok(())
    }

    fn attach(
        &mut self,
        container: ViewId,
        view: ViewId,
        before: Option<ViewId>,
    ) -> Result<(), ViewError> {
        self.check_attach(container, view, before)?;
        self.detach(view);
        let Some(siblings) = self.children.get_mut(container) else {
            return Err(ViewError::NotAContainer(container));
        };
        let index = before
            .and_then(|b| siblings.iter().position(|&c| c == b))
            .unwrap_or(siblings.len());
        siblings.insert(index, view);
        self.parent.insert(view, container);
        tracing::debug!(?container, ?view, index, "view attached");
        Ok(())
    }

    /// Detach `view` from whatever container holds it. Returns the old parent.
    pub(crate) fn detach(&mut self, view: ViewId) -> Option<ViewId> {
        let old = self.parent.remove(view)?;
        if let Some(siblings) = self.children.get_mut(old) {
            siblings.retain(|&c| c != view);
        }
        tracing::debug!(container = ?old, ?view, "view detached");
        Some(old)
    }

    /// Detach `view` from `container`. The view stays in the arena.
    pub fn remove_view(&mut self, container: ViewId, view: ViewId) -> Result<(), ViewError> {
        self.node(container)?;
        self.node(view)?;
        if self.parent(view) != Some(container) {
            return Err(ViewError::NotAChild { container, view });
        }
        self.detach(view);
        Ok(())
    }

    /// Detach every child of `container`, returning them back-to-front.
    pub fn remove_all(&mut self, container: ViewId) -> Result<Vec<ViewId>, ViewError> {
        if !self.node(container)?.is_container {
            return Err(ViewError::NotAContainer(container));
        }
        let kids = self.children.get_mut(container).map(std::mem::take).unwrap_or_default();
        for &kid in &kids {
            self.parent.remove(kid);
        }
        Ok(kids)
    }

    /// Drop `view` and its whole subtree from the arena. Returns how many
    /// views were dropped.
    pub fn destroy(&mut self, view: ViewId) -> Result<usize, ViewError> {
        if view == self.root {
            return Err(ViewError::RootView);
        }
        self.node(view)?;
        self.detach(view);
        let doomed = self.walk_depth_first(view);
        for &id in &doomed {
            self.children.remove(id);
            self.parent.remove(id);
            self.nodes.remove(id);
        }
        tracing::debug!(?view, count = doomed.len(), "view subtree destroyed");
        Ok(doomed.len())
    }

    /// Move `view` to position `index` (0 = backmost) in its container.
    /// Indices past the end move it to the front. Returns the final index.
    pub fn change_z_order(
        &mut self,
        container: ViewId,
        view: ViewId,
        index: usize,
    ) -> Result<usize, ViewError> {
        self.node(container)?;
        if self.parent(view) != Some(container) {
            return Err(ViewError::NotAChild { container, view });
        }
        let Some(siblings) = self.children.get_mut(container) else {
            return Err(ViewError::NotAContainer(container));
        };
        siblings.retain(|&c| c != view);
        let index = index.min(siblings.len());
        siblings.insert(index, view);
        Ok(index)
    }

    // ── Coordinates ──────────────────────────────────────────────────

    /// Map `local` from `id`'s coordinates to frame coordinates, bounded by
    /// the view and every ancestor.
    ///
    /// `None` if the view is detached, invisible (itself or an ancestor), or
    /// the result is empty.
    pub fn to_frame_rect(&self, id: ViewId, local: Rect) -> Option<Rect> {
        let mut rect = local.normalize();
        let mut current = id;
        loop {
            let node = self.nodes.get(current)?;
            if !node.visible {
                return None;
            }
            rect = rect.intersect(node.local_bounds()).translate(node.size.origin());
            if current == self.root {
                break;
            }
            current = self.parent(current)?;
        }
        (!rect.is_empty()).then_some(rect)
    }

    /// The view's bounds in frame coordinates, clipped by its ancestors.
    pub fn frame_bounds(&self, id: ViewId) -> Option<Rect> {
        let local = self.nodes.get(id)?.local_bounds();
        self.to_frame_rect(id, local)
    }

    /// Offset from frame coordinates to `id`'s local coordinates, ignoring
    /// visibility. `None` if detached.
    pub fn frame_origin(&self, id: ViewId) -> Option<Point> {
        let mut origin = Point::ZERO;
        let mut current = id;
        loop {
            origin = origin + self.nodes.get(current)?.size.origin();
            if current == self.root {
                return Some(origin);
            }
            current = self.parent(current)?;
        }
    }

    /// Convert a frame point into `id`'s local coordinates.
    pub fn frame_to_local(&self, id: ViewId, at: Point) -> Option<Point> {
        self.frame_origin(id).map(|origin| at - origin)
    }

    // ── Lookup ───────────────────────────────────────────────────────

    fn candidate(&self, id: ViewId, at: Point, options: GetViewOptions) -> Option<&ViewNode> {
        let node = self.nodes.get(id)?;
        if !node.visible && !options.contains(GetViewOptions::INCLUDE_INVISIBLE) {
            return None;
        }
        if !node.mouse_enabled && options.contains(GetViewOptions::MOUSE_ENABLED) {
            return None;
        }
        node.hit_test(at).then_some(node)
    }

    /// Frontmost child of `container` at `at` (container-local coordinates).
    ///
    /// With `DEEP`, the frontmost matching container answers for the point:
    /// the result is the frontmost view inside it, or the container itself
    /// when `INCLUDE_CONTAINERS` is set, or `None`. Siblings behind it are
    /// never consulted.
    pub fn view_at(&self, container: ViewId, at: Point, options: GetViewOptions) -> Option<ViewId> {
        for &child in self.children(container).iter().rev() {
            let Some(node) = self.candidate(child, at, options) else {
                continue;
            };
            if node.is_container && options.contains(GetViewOptions::DEEP) {
                let local = at - node.size.origin();
                return self
                    .view_at(child, local, options)
                    .or_else(|| options.contains(GetViewOptions::INCLUDE_CONTAINERS).then_some(child));
            }
            return Some(child);
        }
        None
    }

    /// Every matching view at `at`, front-to-back.
    pub fn views_at(&self, container: ViewId, at: Point, options: GetViewOptions) -> Vec<ViewId> {
        let mut out = Vec::new();
        self.collect_views_at(container, at, options, &mut out);
        out
    }

    fn collect_views_at(
        &self,
        container: ViewId,
        at: Point,
        options: GetViewOptions,
        out: &mut Vec<ViewId>,
    ) {
        for &child in self.children(container).iter().rev() {
            let Some(node) = self.candidate(child, at, options) else {
                continue;
            };
            if node.is_container && options.contains(GetViewOptions::DEEP) {
                let local = at - node.size.origin();
                self.collect_views_at(child, local, options, out);
                if options.contains(GetViewOptions::INCLUDE_CONTAINERS) {
                    out.push(child);
                }
            } else {
                out.push(child);
            }
        }
    }

    // ── Drawing ──────────────────────────────────────────────────────

    /// Draw `id` and its subtree. `ctx` must already be translated to the
    /// view's origin; `update` is in the view's local coordinates.
    pub fn draw(&self, ctx: &mut dyn DrawContext, id: ViewId, update: Rect) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let bounds = node.local_bounds();
        let update = update.intersect(bounds);
        if update.is_empty() {
            return;
        }
        tracing::trace!(view = ?id, ?update, "draw");

        let depth = ctx.state_depth();
        ctx.save_state();
        ctx.set_clip_rect(update);
        let info = DrawInfo {
            bounds,
            update_rect: update,
            control: node.control.as_ref(),
        };
        node.content.draw(ctx, &info);
        if ctx.state_depth() != depth + 1 {
            tracing::warn!(
                view = ?id,
                class = %node.class_name,
                expected = depth + 1,
                actual = ctx.state_depth(),
                "content left the draw state unbalanced; repairing"
            );
            while ctx.state_depth() > depth + 1 {
                ctx.restore_state();
            }
            while ctx.state_depth() < depth + 1 {
                ctx.save_state();
            }
        }
        ctx.restore_state();

        for &child in self.children(id) {
            let Some(c) = self.nodes.get(child) else {
                continue;
            };
            if !c.visible || c.alpha <= 0.0 {
                continue;
            }
            let child_update = update.intersect(c.size);
            if child_update.is_empty() {
                continue;
            }
            let origin = c.size.origin();
            ctx.save_state();
            ctx.set_clip_rect(child_update);
            ctx.translate(origin);
            let alpha = ctx.global_alpha() * c.alpha;
            ctx.set_global_alpha(alpha);
            self.draw(ctx, child, child_update.translate(-origin));
            ctx.restore_state();
        }
    }
}
