//! `ViewMut`: mutable access to one view that keeps invalidation correct.

use crate::control::Control;
use crate::geometry::{Point, Rect};
use crate::render::DirtyRegion;

use super::node::{ViewId, ViewNode};
use super::tree::ViewTree;

/// A view borrowed mutably from its frame.
///
/// Changes that affect what is on screen (size, visibility, alpha, control
/// value) invalidate the old and new areas in the frame's dirty region. The
/// view's ancestors are fixed for the lifetime of the borrow, so their
/// contribution to frame coordinates is computed once up front.
pub struct ViewMut<'a> {
    id: ViewId,
    node: &'a mut ViewNode,
    /// Parent's frame origin and frame-space clip; `None` when the view is not
    /// on screen through its parent.
    parent_frame: Option<(Point, Rect)>,
    dirty: &'a mut DirtyRegion,
}

impl<'a> ViewMut<'a> {
    /// Borrow `id` from `tree`. `None` if the view does not exist.
    pub(crate) fn new(id: ViewId, tree: &'a mut ViewTree, dirty: &'a mut DirtyRegion) -> Option<Self> {
        let parent_frame = if id == tree.root() {
            tree.get(id).map(|root| (Point::ZERO, root.size))
        } else {
            tree.parent(id).and_then(|p| {
                let origin = tree.frame_origin(p)?;
                let clip = tree.frame_bounds(p)?;
                Some((origin, clip))
            })
        };
        let node = tree.get_mut(id)?;
        Some(Self { id, node, parent_frame, dirty })
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn node(&self) -> &ViewNode {
        self.node
    }

    /// Frame rect in the parent's coordinates.
    pub fn size(&self) -> Rect {
        self.node.size
    }

    pub fn alpha(&self) -> f32 {
        self.node.alpha
    }

    pub fn is_visible(&self) -> bool {
        self.node.visible
    }

    // ── Invalidation ─────────────────────────────────────────────────

    /// Mark `rect` (local coordinates) for redraw.
    pub fn invalid_rect(&mut self, rect: Rect) {
        if !self.node.visible {
            return;
        }
        let Some((origin, clip)) = self.parent_frame else {
            return;
        };
        let in_parent = rect
            .normalize()
            .intersect(self.node.local_bounds())
            .translate(self.node.size.origin());
        let in_frame = in_parent.translate(origin).intersect(clip);
        if !in_frame.is_empty() {
            self.dirty.add(in_frame);
        }
    }

    /// Mark the whole view for redraw.
    pub fn invalid(&mut self) {
        let bounds = self.node.local_bounds();
        self.invalid_rect(bounds);
    }

    /// Ask for a redraw on the next frame draw instead of right away.
    pub fn set_dirty(&mut self, dirty: bool) {
        self.node.dirty = dirty;
    }

    // ── Geometry and appearance ──────────────────────────────────────

    /// Move or resize the view. Both the old and the new area are redrawn.
    pub fn set_view_size(&mut self, size: Rect) {
        let size = size.normalize();
        if size == self.node.size {
            return;
        }
        self.invalid();
        self.node.size = size;
        self.invalid();
    }

    pub fn set_visible(&mut self, visible: bool) {
        if visible == self.node.visible {
            return;
        }
        if visible {
            self.node.visible = true;
            self.invalid();
        } else {
            self.invalid();
            self.node.visible = false;
        }
    }

    /// Set the opacity, clamped to `[0, 1]`.
    pub fn set_alpha(&mut self, alpha: f32) {
        let alpha = alpha.max(0.0).min(1.0);
        if alpha == self.node.alpha {
            return;
        }
        self.node.alpha = alpha;
        self.invalid();
    }

    pub fn set_mouse_enabled(&mut self, enabled: bool) {
        self.node.mouse_enabled = enabled;
    }

    /// Let unhandled mouse input reach the views behind this one.
    pub fn set_transparent(&mut self, transparent: bool) {
        self.node.transparent = transparent;
    }

    pub fn set_mouseable_area(&mut self, area: Option<Rect>) {
        self.node.mouseable_area = area.map(Rect::normalize);
    }

    // ── Control ──────────────────────────────────────────────────────

    pub fn control(&self) -> Option<&Control> {
        self.node.control.as_ref()
    }

    /// Direct access to the control. Value changes made here are picked up
    /// through the control's dirty flag on the next frame draw.
    pub fn control_mut(&mut self) -> Option<&mut Control> {
        self.node.control.as_mut()
    }

    /// Set the control value (user range). Redraws if it changed.
    pub fn set_control_value(&mut self, value: f32) -> bool {
        let changed = self
            .node
            .control
            .as_mut()
            .is_some_and(|c| c.set_value(value));
        if changed {
            self.invalid();
        }
        changed
    }

    /// Set the normalized control value. Redraws if it changed.
    pub fn set_control_value_normalized(&mut self, value: f32) -> bool {
        let changed = self
            .node
            .control
            .as_mut()
            .is_some_and(|c| c.set_value_normalized(value));
        if changed {
            self.invalid();
        }
        changed
    }
}
