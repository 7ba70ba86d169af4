//! The frame: the root of a view hierarchy, bound to one host window.
//!
//! [`Frame`] owns everything a window needs: the [`ViewTree`], the
//! [`Animator`], the pending [`DirtyRegion`], keyboard focus, mouse capture and
//! mouse-over tracking, the [`EventBus`] and the [`FrameConfig`]. Hosts feed it
//! input and timer ticks and ask it to draw into a [`DrawContext`].
//!
//! All coordinates passed to the frame are frame coordinates.

pub mod focus;

pub use focus::FocusChain;

use std::sync::Arc;

use crate::animation::{
    AnimationState, AnimationTarget, Animator, Finished, Linear, MonotonicClock, TickSource,
    TimingFunction, ViewSizeAnimation,
};
use crate::config::{self, FrameConfig};
use crate::control::{Control, EditPhase, SharedListener};
use crate::draw::{DrawContext, DrawStyle, PathDrawMode};
use crate::error::ViewError;
use crate::event::{
    AnimationFinished, ButtonState, EditBegan, EditEnded, EventBus, FocusChanged, FrameEvent, Key,
    KeyEvent, Modifiers, MouseEntered, MouseExited, MouseInput, MouseResult, Subscription,
    ViewAdded, ViewRemoved, ZOrderChanged,
};
use crate::geometry::{Point, Rect};
use crate::layout::{RowColumnLayout, RESIZE_ANIMATION};
use crate::render::DirtyRegion;
use crate::view::{GetViewOptions, ViewId, ViewMut, ViewNode, ViewTree};

/// Follow-up mouse events delivered to the captured view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    Moved,
    Up,
}

const MOUSE_TARGETS: GetViewOptions = GetViewOptions(
    GetViewOptions::DEEP.0 | GetViewOptions::MOUSE_ENABLED.0 | GetViewOptions::INCLUDE_CONTAINERS.0,
);

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// Root container of a view hierarchy.
pub struct Frame {
    tree: ViewTree,
    animator: Animator,
    dirty: DirtyRegion,
    focus: Option<ViewId>,
    capture: Option<ViewId>,
    mouse_over: Option<ViewId>,
    bus: EventBus,
    config: Arc<FrameConfig>,
    clock: Box<dyn TickSource>,
}

impl Frame {
    /// A frame of the given size using the process-wide default config.
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_config(width, height, config::global())
    }

    /// A frame of the given size with its own config.
    pub fn with_config(width: f64, height: f64, config: impl Into<Arc<FrameConfig>>) -> Self {
        let config = config.into();
        let bounds = Rect::from_size(width.max(0.0), height.max(0.0));
        let root = ViewNode::container(bounds).with_class_name("Frame");
        Self {
            tree: ViewTree::new(root),
            animator: Animator::new(),
            dirty: DirtyRegion::new(bounds, config.dirty_region_limit),
            focus: None,
            capture: None,
            mouse_over: None,
            bus: EventBus::new(),
            config,
            clock: Box::new(MonotonicClock::new()),
        }
    }

    /// Replace the animation time source (builder).
    pub fn with_clock(mut self, clock: impl TickSource + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Current time on the frame clock, in milliseconds.
    pub fn now(&self) -> u64 {
        self.clock.now_ms()
    }

    // ── Tree access ──────────────────────────────────────────────────

    pub fn root(&self) -> ViewId {
        self.tree.root()
    }

    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    /// Frame bounds (the root view's rect).
    pub fn size(&self) -> Rect {
        self.tree.get(self.tree.root()).map_or(Rect::EMPTY, |root| root.size)
    }

    /// Put a new, detached view into the frame's arena.
    pub fn create_view(&mut self, node: ViewNode) -> ViewId {
        self.tree.insert(node)
    }

    pub fn view(&self, id: ViewId) -> Option<&ViewNode> {
        self.tree.get(id)
    }

    /// Borrow a view for changes that keep invalidation correct.
    pub fn view_mut(&mut self, id: ViewId) -> Option<ViewMut<'_>> {
        ViewMut::new(id, &mut self.tree, &mut self.dirty)
    }

    pub fn focus_view(&self) -> Option<ViewId> {
        self.focus
    }

    pub fn mouse_over_view(&self) -> Option<ViewId> {
        self.mouse_over
    }

    /// View receiving follow-up mouse events, if a gesture is in progress.
    pub fn captured_view(&self) -> Option<ViewId> {
        self.capture
    }

    pub fn dirty_region(&self) -> &DirtyRegion {
        &self.dirty
    }

    // ── Container operations ─────────────────────────────────────────

    /// Append `view` as the frontmost child of `container`.
    pub fn add_view(&mut self, container: ViewId, view: ViewId) -> Result<(), ViewError> {
        self.attach(container, view, None)
    }

    /// Insert `view` directly behind `before`.
    pub fn add_view_before(
        &mut self,
        container: ViewId,
        view: ViewId,
        before: ViewId,
    ) -> Result<(), ViewError> {
        self.attach(container, view, Some(before))
    }

    fn attach(
        &mut self,
        container: ViewId,
        view: ViewId,
        before: Option<ViewId>,
    ) -> Result<(), ViewError> {
        if let Err(err) = self.tree.check_attach(container, view, before) {
            tracing::warn!(?container, ?view, %err, "add_view rejected");
            return Err(err);
        }
        let old_parent = self.tree.parent(view);
        if self.tree.is_attached(view) && !self.tree.is_attached(container) {
            self.release_subtree(view);
        }
        self.invalid(view);
        match before {
            Some(before) => self.tree.add_view_before(container, view, before)?,
            None => self.tree.add_view(container, view)?,
        }
        if let Some(old) = old_parent {
            self.bus.emit(&ViewRemoved { container: old, view });
            if old != container {
                self.relayout(old);
            }
        }
        self.bus.emit(&ViewAdded { container, view });
        self.relayout(container);
        self.invalid(view);
        Ok(())
    }

    /// Detach `view` from `container`. The view and its subtree stay in the
    /// arena and can be added again; their animations are canceled.
    pub fn remove_view(&mut self, container: ViewId, view: ViewId) -> Result<(), ViewError> {
        if self.tree.contains(view) && self.tree.parent(view) == Some(container) {
            self.invalid(view);
            self.release_subtree(view);
        }
        if let Err(err) = self.tree.remove_view(container, view) {
            tracing::warn!(?container, ?view, %err, "remove_view rejected");
            return Err(err);
        }
        self.bus.emit(&ViewRemoved { container, view });
        self.relayout(container);
        Ok(())
    }

    /// Detach every child of `container`, back-to-front.
    pub fn remove_all(&mut self, container: ViewId) -> Result<Vec<ViewId>, ViewError> {
        if self.tree.get(container).is_some_and(ViewNode::is_container) {
            for child in self.tree.children(container).to_vec() {
                self.invalid(child);
                self.release_subtree(child);
            }
        }
        let removed = self.tree.remove_all(container).inspect_err(|err| {
            tracing::warn!(?container, %err, "remove_all rejected");
        })?;
        for &view in &removed {
            self.bus.emit(&ViewRemoved { container, view });
        }
        Ok(removed)
    }

    /// Drop `view` and its subtree. Returns how many views were dropped.
    pub fn destroy_view(&mut self, view: ViewId) -> Result<usize, ViewError> {
        if view == self.tree.root() {
            tracing::warn!(?view, "cannot destroy the root view");
            return Err(ViewError::RootView);
        }
        if !self.tree.contains(view) {
            tracing::warn!(?view, "destroy of unknown view");
            return Err(ViewError::UnknownView(view));
        }
        let parent = self.tree.parent(view);
        self.invalid(view);
        self.release_subtree(view);
        let count = self.tree.destroy(view)?;
        if let Some(container) = parent {
            self.bus.emit(&ViewRemoved { container, view });
            self.relayout(container);
        }
        Ok(count)
    }

    /// Move `view` to `index` in its container's z-order (0 = backmost).
    pub fn change_view_z_order(
        &mut self,
        container: ViewId,
        view: ViewId,
        index: usize,
    ) -> Result<usize, ViewError> {
        let index = self
            .tree
            .change_z_order(container, view, index)
            .inspect_err(|err| tracing::warn!(?container, ?view, %err, "z-order change rejected"))?;
        self.invalid(view);
        self.bus.emit(&ZOrderChanged { container, view, index });
        self.relayout(container);
        Ok(index)
    }

    /// Forget focus, capture and mouse-over inside `view`'s subtree and
    /// cancel the subtree's animations.
    fn release_subtree(&mut self, view: ViewId) {
        let subtree = self.tree.walk_depth_first(view);
        if self.capture.is_some_and(|c| subtree.contains(&c)) {
            self.on_mouse_cancel();
        }
        if self.focus.is_some_and(|f| subtree.contains(&f)) {
            self.set_focus_view(None);
        }
        if let Some(over) = self.mouse_over.filter(|o| subtree.contains(o)) {
            self.mouse_over = None;
            self.bus.emit(&MouseExited { view: over });
        }
        for id in subtree {
            let finished = self.animator.remove_all(id, &mut self.tree, &mut self.dirty);
            self.report_finished(finished);
        }
    }

    // ── Invalidation and drawing ─────────────────────────────────────

    /// Mark `rect` (in `view`'s local coordinates) for redraw.
    pub fn invalid_rect(&mut self, view: ViewId, rect: Rect) {
        if let Some(mut v) = self.view_mut(view) {
            v.invalid_rect(rect);
        }
    }

    /// Mark the whole of `view` for redraw.
    pub fn invalid(&mut self, view: ViewId) {
        if let Some(mut v) = self.view_mut(view) {
            v.invalid();
        }
    }

    /// Whether anything is waiting to be drawn.
    pub fn needs_redraw(&self) -> bool {
        self.dirty.is_dirty()
            || self.tree.walk_depth_first(self.tree.root()).into_iter().any(|id| {
                self.tree
                    .get(id)
                    .is_some_and(|n| n.dirty || n.control().is_some_and(Control::is_dirty))
            })
    }

    /// Turn pending view and control dirty flags into invalid rects.
    fn collect_dirty_views(&mut self) {
        for id in self.tree.walk_depth_first(self.tree.root()) {
            self.flush_edit_events(id);
            let Some(node) = self.tree.get_mut(id) else {
                continue;
            };
            let control_dirty = node.control.as_mut().is_some_and(Control::take_dirty);
            let view_dirty = std::mem::take(&mut node.dirty);
            if view_dirty || control_dirty {
                self.invalid(id);
            }
        }
    }

    /// Paint every pending dirty rect. Returns how many rects were painted.
    pub fn draw(&mut self, ctx: &mut dyn DrawContext) -> usize {
        self.collect_dirty_views();
        let rects = self.dirty.take();
        if rects.is_empty() {
            return 0;
        }
        let root = self.tree.root();
        let Some((origin, alpha, visible)) =
            self.tree.get(root).map(|r| (r.size.origin(), r.alpha, r.visible))
        else {
            return 0;
        };
        tracing::trace!(rects = rects.len(), "frame draw");

        for &rect in &rects {
            ctx.save_state();
            ctx.set_clip_rect(rect);
            if visible {
                ctx.translate(origin);
                let global = ctx.global_alpha() * alpha;
                ctx.set_global_alpha(global);
                self.tree.draw(ctx, root, rect.translate(-origin));
            }
            ctx.restore_state();
        }
        self.draw_focus_ring(ctx, &rects);
        rects.len()
    }

    fn focus_ring_rect(&self) -> Option<Rect> {
        if !self.config.focus_drawing {
            return None;
        }
        let bounds = self.tree.frame_bounds(self.focus?)?;
        let half = self.config.focus_width / 2.0;
        Some(bounds.extend(half, half))
    }

    fn draw_focus_ring(&self, ctx: &mut dyn DrawContext, rects: &[Rect]) {
        let Some(ring) = self.focus_ring_rect() else {
            return;
        };
        let area = ring.extend(self.config.focus_width, self.config.focus_width);
        for &rect in rects.iter().filter(|r| r.overlaps(area)) {
            ctx.save_state();
            ctx.set_clip_rect(rect);
            ctx.set_frame_color(self.config.focus_color);
            ctx.set_line_width(self.config.focus_width);
            match ctx.create_path() {
                Some(mut path) => {
                    path.add_rect(ring);
                    ctx.draw_path(&path, PathDrawMode::Stroked);
                }
                None => ctx.draw_rect(ring, DrawStyle::Stroked),
            }
            ctx.restore_state();
        }
    }

    fn invalid_focus_ring(&mut self) {
        if let Some(ring) = self.focus_ring_rect() {
            let width = self.config.focus_width;
            self.dirty.add(ring.extend(width, width));
        }
    }

    /// Resize the frame. Everything is redrawn.
    pub fn set_size(&mut self, width: f64, height: f64) {
        let root = self.tree.root();
        let Some(node) = self.tree.get_mut(root) else {
            return;
        };
        let origin = node.size.origin();
        node.size = Rect::from_xywh(origin.x, origin.y, width.max(0.0), height.max(0.0));
        let bounds = node.size;
        tracing::debug!(?bounds, "frame resized");
        self.dirty.set_bounds(bounds);
        self.dirty.add_all();
        self.relayout(root);
    }

    // ── Lookup ───────────────────────────────────────────────────────

    /// Frontmost view at `at` matching `options`.
    pub fn view_at(&self, at: Point, options: GetViewOptions) -> Option<ViewId> {
        let root = self.tree.root();
        let local = self.tree.frame_to_local(root, at)?;
        self.tree.view_at(root, local, options)
    }

    /// Every view at `at` matching `options`, front-to-back.
    pub fn views_at(&self, at: Point, options: GetViewOptions) -> Vec<ViewId> {
        let root = self.tree.root();
        match self.tree.frame_to_local(root, at) {
            Some(local) => self.tree.views_at(root, local, options),
            None => Vec::new(),
        }
    }

    /// Frontmost mouse-enabled view at `at`.
    pub fn hit_test(&self, at: Point) -> Option<ViewId> {
        self.view_at(at, MOUSE_TARGETS)
    }

    // ── Mouse ────────────────────────────────────────────────────────

    /// Route a mouse-down front to back through the views under `at`. That
    /// view captures the follow-up move and up events unless it answered
    /// [`MouseResult::HandledNoFollowUp`].
    ///
    /// An unhandled click only reaches the views behind a transparent view.
    pub fn on_mouse_down(&mut self, at: Point, buttons: ButtonState) -> MouseResult {
        if self.capture.is_some() {
            self.on_mouse_cancel();
        }
        let handled = self.route_mouse(at, |frame, view| {
            let result = frame.deliver_mouse_down(view, at, buttons);
            result.is_handled().then_some(result)
        });
        let Some((view, result)) = handled else {
            return MouseResult::NotHandled;
        };
        tracing::trace!(?view, ?result, "mouse down handled");
        if result == MouseResult::Handled {
            self.capture = Some(view);
        }
        if self.tree.get(view).is_some_and(|n| n.wants_focus) {
            self.set_focus_view(Some(view));
        }
        result
    }

    fn deliver_mouse_down(&mut self, view: ViewId, at: Point, buttons: ButtonState) -> MouseResult {
        let Some(local) = self.tree.frame_to_local(view, at) else {
            return MouseResult::NotHandled;
        };
        let reset_modifier = self.config.default_value_modifier;
        let wants_reset = buttons.is_left()
            && !reset_modifier.is_empty()
            && buttons.modifiers.contains(reset_modifier);
        let Some(node) = self.tree.get_mut(view) else {
            return MouseResult::NotHandled;
        };
        let bounds = node.local_bounds();
        let result = match (node.control.as_mut(), node.interaction.as_mut()) {
            (Some(control), Some(_)) if wants_reset => {
                control.begin_edit();
                control.reset_to_default();
                control.end_edit();
                MouseResult::HandledNoFollowUp
            }
            (Some(control), Some(interaction)) => interaction.mouse_down(control, bounds, local, buttons),
            _ => MouseResult::NotHandled,
        };
        self.after_control_input(view);
        result
    }

    fn deliver_gesture(
        &mut self,
        view: ViewId,
        gesture: Gesture,
        at: Point,
        buttons: ButtonState,
    ) -> MouseResult {
        let Some(local) = self.tree.frame_to_local(view, at) else {
            return MouseResult::NotHandled;
        };
        let Some(node) = self.tree.get_mut(view) else {
            return MouseResult::NotHandled;
        };
        let bounds = node.local_bounds();
        let result = match (node.control.as_mut(), node.interaction.as_mut()) {
            (Some(control), Some(interaction)) => match gesture {
                Gesture::Moved => interaction.mouse_moved(control, bounds, local, buttons),
                Gesture::Up => interaction.mouse_up(control, bounds, local, buttons),
            },
            _ => MouseResult::NotHandled,
        };
        self.after_control_input(view);
        result
    }

    /// Mouse moved. Goes to the captured view during a gesture; otherwise
    /// updates mouse-over tracking.
    pub fn on_mouse_moved(&mut self, at: Point, buttons: ButtonState) -> MouseResult {
        if let Some(view) = self.capture {
            let result = self.deliver_gesture(view, Gesture::Moved, at, buttons);
            if result == MouseResult::HandledNoFollowUp {
                self.capture = None;
            }
            return result;
        }
        self.update_mouse_over(at);
        MouseResult::NotHandled
    }

    /// Mouse released. Ends the current gesture.
    pub fn on_mouse_up(&mut self, at: Point, buttons: ButtonState) -> MouseResult {
        let result = match self.capture.take() {
            Some(view) => self.deliver_gesture(view, Gesture::Up, at, buttons),
            None => MouseResult::NotHandled,
        };
        self.update_mouse_over(at);
        result
    }

    /// The host took the mouse away mid-gesture.
    pub fn on_mouse_cancel(&mut self) -> MouseResult {
        let Some(view) = self.capture.take() else {
            return MouseResult::NotHandled;
        };
        tracing::debug!(?view, "mouse gesture canceled");
        let result = match self.tree.get_mut(view) {
            Some(node) => match (node.control.as_mut(), node.interaction.as_mut()) {
                (Some(control), Some(interaction)) => interaction.mouse_cancel(control),
                _ => MouseResult::NotHandled,
            },
            None => MouseResult::NotHandled,
        };
        self.after_control_input(view);
        result
    }

    /// The mouse left the frame.
    pub fn on_mouse_exited(&mut self) {
        if let Some(view) = self.mouse_over.take() {
            self.bus.emit(&MouseExited { view });
        }
    }

    /// Wheel turned over `at`. Routed like a mouse-down. Returns whether a
    /// view consumed it.
    pub fn on_mouse_wheel(&mut self, at: Point, distance: f32, modifiers: Modifiers) -> bool {
        let consumed = self.route_mouse(at, |frame, view| {
            let consumed = match frame.tree.get_mut(view) {
                Some(node) => match (node.control.as_mut(), node.interaction.as_mut()) {
                    (Some(control), Some(interaction)) => interaction.wheel(control, distance, modifiers),
                    _ => false,
                },
                None => false,
            };
            frame.after_control_input(view);
            consumed.then_some(())
        });
        consumed.is_some()
    }

    /// Offer `at` to the views under it, front to back, until `deliver`
    /// answers. A view that declines ends the search inside its container
    /// unless it is transparent; the container then declines in turn.
    fn route_mouse<R>(
        &mut self,
        at: Point,
        mut deliver: impl FnMut(&mut Self, ViewId) -> Option<R>,
    ) -> Option<(ViewId, R)> {
        let root = self.tree.root();
        let mut declined_in: Option<ViewId> = None;
        for view in self.views_at(at, MOUSE_TARGETS) {
            if let Some(container) = declined_in {
                if view != container {
                    continue;
                }
                declined_in = None;
            }
            if let Some(answer) = deliver(self, view) {
                return Some((view, answer));
            }
            if self.is_transparent(view) {
                continue;
            }
            match self.tree.parent(view) {
                Some(parent) if parent != root => declined_in = Some(parent),
                _ => return None,
            }
        }
        None
    }

    fn is_transparent(&self, view: ViewId) -> bool {
        self.tree.get(view).is_some_and(|n| n.transparent)
    }

    /// Dispatch one host mouse event.
    pub fn handle_input(&mut self, input: MouseInput) -> MouseResult {
        match input {
            MouseInput::Down(at, buttons) => self.on_mouse_down(at, buttons),
            MouseInput::Up(at, buttons) => self.on_mouse_up(at, buttons),
            MouseInput::Moved(at, buttons) => self.on_mouse_moved(at, buttons),
            MouseInput::Wheel(at, distance, modifiers) => {
                if self.on_mouse_wheel(at, distance, modifiers) {
                    MouseResult::Handled
                } else {
                    MouseResult::NotHandled
                }
            }
        }
    }

    fn update_mouse_over(&mut self, at: Point) {
        let over = self.hit_test(at);
        if over == self.mouse_over {
            return;
        }
        if let Some(view) = self.mouse_over.take() {
            self.bus.emit(&MouseExited { view });
        }
        if let Some(view) = over {
            self.bus.emit(&MouseEntered { view });
        }
        self.mouse_over = over;
    }

    /// Publish edit sessions and redraw after a control saw input.
    fn after_control_input(&mut self, view: ViewId) {
        self.flush_edit_events(view);
        let changed = self
            .tree
            .get_mut(view)
            .and_then(|n| n.control.as_mut())
            .is_some_and(Control::take_dirty);
        if changed {
            self.invalid(view);
        }
    }

    fn flush_edit_events(&mut self, view: ViewId) {
        let Some(control) = self.tree.get_mut(view).and_then(|n| n.control.as_mut()) else {
            return;
        };
        let tag = control.tag();
        for phase in control.take_edit_phases() {
            match phase {
                EditPhase::Began => self.bus.emit(&EditBegan { view, tag }),
                EditPhase::Ended => self.bus.emit(&EditEnded { view, tag }),
            }
        }
    }

    // ── Keyboard and focus ───────────────────────────────────────────

    /// Deliver a key to the focus view, then to its ancestors until one
    /// consumes it. Unconsumed Tab / BackTab move the focus.
    pub fn on_key_down(&mut self, key: KeyEvent) -> bool {
        let mut target = self.focus;
        while let Some(view) = target {
            let consumed = match self.tree.get_mut(view) {
                Some(node) => match (node.control.as_mut(), node.interaction.as_mut()) {
                    (Some(control), Some(interaction)) => interaction.key_down(control, key),
                    _ => false,
                },
                None => false,
            };
            self.after_control_input(view);
            if consumed {
                return true;
            }
            target = self.tree.parent(view);
        }
        match key.code {
            Key::Tab if !key.modifiers.contains(Modifiers::SHIFT) => self.focus_next().is_some(),
            Key::Tab | Key::BackTab => self.focus_previous().is_some(),
            _ => false,
        }
    }

    /// Move keyboard focus. `None` clears it. Views that are not attached are
    /// refused. Returns whether the focus changed.
    pub fn set_focus_view(&mut self, view: Option<ViewId>) -> bool {
        if view == self.focus {
            return false;
        }
        if let Some(id) = view {
            if !self.tree.is_attached(id) {
                tracing::warn!(view = ?id, "cannot focus a view outside the frame");
                return false;
            }
        }
        self.invalid_focus_ring();
        let old = std::mem::replace(&mut self.focus, view);
        self.invalid_focus_ring();
        tracing::debug!(?old, new = ?view, "focus changed");
        self.bus.emit(&FocusChanged { old, new: view });
        true
    }

    /// Focus the next view in the focus chain, wrapping at the end.
    pub fn focus_next(&mut self) -> Option<ViewId> {
        let next = FocusChain::build(&self.tree).next(self.focus)?;
        self.set_focus_view(Some(next));
        Some(next)
    }

    /// Focus the previous view in the focus chain, wrapping at the start.
    pub fn focus_previous(&mut self) -> Option<ViewId> {
        let previous = FocusChain::build(&self.tree).previous(self.focus)?;
        self.set_focus_view(Some(previous));
        Some(previous)
    }

    pub fn focus_chain(&self) -> FocusChain {
        FocusChain::build(&self.tree)
    }

    // ── Controls ─────────────────────────────────────────────────────

    fn control_mut(&mut self, view: ViewId) -> Result<&mut Control, ViewError> {
        let node = self.tree.get_mut(view).ok_or(ViewError::UnknownView(view))?;
        node.control.as_mut().ok_or(ViewError::NoControl(view))
    }

    /// Set a control's value (user range). Returns whether it changed.
    pub fn set_control_value(&mut self, view: ViewId, value: f32) -> Result<bool, ViewError> {
        let changed = self.control_mut(view)?.set_value(value);
        self.after_control_input(view);
        Ok(changed)
    }

    /// Set a control's normalized value. Returns whether it changed.
    pub fn set_control_value_normalized(&mut self, view: ViewId, value: f32) -> Result<bool, ViewError> {
        let changed = self.control_mut(view)?.set_value_normalized(value);
        self.after_control_input(view);
        Ok(changed)
    }

    /// Open an edit session on a control.
    pub fn begin_edit(&mut self, view: ViewId) -> Result<(), ViewError> {
        self.control_mut(view)?.begin_edit();
        self.flush_edit_events(view);
        Ok(())
    }

    /// Close an edit session on a control.
    pub fn end_edit(&mut self, view: ViewId) -> Result<(), ViewError> {
        self.control_mut(view)?.end_edit();
        self.flush_edit_events(view);
        Ok(())
    }

    pub fn register_control_listener(
        &mut self,
        view: ViewId,
        listener: &SharedListener,
    ) -> Result<(), ViewError> {
        self.control_mut(view)?.add_listener(listener);
        Ok(())
    }

    pub fn unregister_control_listener(
        &mut self,
        view: ViewId,
        listener: &SharedListener,
    ) -> Result<bool, ViewError> {
        Ok(self.control_mut(view)?.remove_listener(listener))
    }

    // ── Animations ───────────────────────────────────────────────────

    /// Start an animation on `view`. An animation of the same name on the
    /// same view is canceled first.
    pub fn add_animation(
        &mut self,
        view: ViewId,
        name: impl Into<String>,
        timing: impl TimingFunction + 'static,
        target: impl AnimationTarget + 'static,
    ) -> Result<(), ViewError> {
        if !self.tree.contains(view) {
            tracing::warn!(?view, "animation for unknown view");
            return Err(ViewError::UnknownView(view));
        }
        let replaced = self
            .animator
            .add(view, name, timing, target, &mut self.tree, &mut self.dirty);
        self.report_finished(replaced);
        Ok(())
    }

    /// Cancel one animation. Returns whether it was running.
    pub fn remove_animation(&mut self, view: ViewId, name: &str) -> bool {
        let removed = self.animator.remove(view, name, &mut self.tree, &mut self.dirty);
        let found = removed.is_some();
        self.report_finished(removed);
        found
    }

    /// Cancel every animation of `view`. Returns how many were canceled.
    pub fn remove_all_animations(&mut self, view: ViewId) -> usize {
        let removed = self.animator.remove_all(view, &mut self.tree, &mut self.dirty);
        let count = removed.len();
        self.report_finished(removed);
        count
    }

    /// Advance animations to the current clock time.
    pub fn on_timer(&mut self) -> Vec<Finished> {
        let now = self.clock.now_ms();
        let finished = self.animator.on_timer(now, &mut self.tree, &mut self.dirty);
        for f in &finished {
            self.emit_finished(f);
        }
        finished
    }

    pub fn has_animations(&self) -> bool {
        !self.animator.is_empty()
    }

    pub fn animation_state(&self, view: ViewId, name: &str) -> Option<AnimationState> {
        self.animator.state(view, name)
    }

    fn report_finished(&mut self, finished: impl IntoIterator<Item = Finished>) {
        for f in finished {
            self.emit_finished(&f);
        }
    }

    fn emit_finished(&mut self, f: &Finished) {
        self.bus.emit(&AnimationFinished {
            view: f.view,
            name: f.name.clone(),
            canceled: f.canceled,
        });
    }

    // ── Events ───────────────────────────────────────────────────────

    pub fn subscribe<E: FrameEvent>(&mut self, handler: impl FnMut(&E) + 'static) -> Subscription {
        self.bus.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.bus.unsubscribe(subscription)
    }

    // ── Layout ───────────────────────────────────────────────────────

    /// Give `container` a row/column layout (or remove it) and apply it.
    pub fn set_layout(
        &mut self,
        container: ViewId,
        layout: Option<RowColumnLayout>,
    ) -> Result<(), ViewError> {
        let node = self.tree.get_mut(container).ok_or(ViewError::UnknownView(container))?;
        if !node.is_container() {
            return Err(ViewError::NotAContainer(container));
        }
        node.layout = layout;
        self.layout_container(container)
    }

    /// Place `container`'s children according to its layout. Containers
    /// without a layout are left alone.
    pub fn layout_container(&mut self, container: ViewId) -> Result<(), ViewError> {
        let node = self.tree.get(container).ok_or(ViewError::UnknownView(container))?;
        let Some(layout) = node.layout().cloned() else {
            return Ok(());
        };
        let bounds = node.size;
        let children: Vec<(ViewId, Rect)> = self
            .tree
            .children(container)
            .iter()
            .filter_map(|&c| self.tree.get(c).map(|n| (c, n.size)))
            .collect();
        let frames = layout.compute(bounds, &children)?;

        let animate = layout.animate_resize.filter(|_| self.tree.is_attached(container));
        for ((child, current), (_, frame)) in children.into_iter().zip(frames) {
            if current == frame {
                continue;
            }
            match animate {
                Some(ms) => {
                    self.add_animation(child, RESIZE_ANIMATION, Linear::new(ms), ViewSizeAnimation::new(frame))?;
                }
                None => {
                    if let Some(mut view) = self.view_mut(child) {
                        view.set_view_size(frame);
                        view.set_mouseable_area(None);
                    }
                }
            }
        }
        Ok(())
    }

    fn relayout(&mut self, container: ViewId) {
        if let Err(err) = self.layout_container(container) {
            tracing::warn!(?container, %err, "layout failed");
        }
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("size", &self.size())
            .field("views", &self.tree.len())
            .field("animations", &self.animator.len())
            .field("focus", &self.focus)
            .field("capture", &self.capture)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::animation::{AlphaValueAnimation, ManualClock};
    use crate::color::Color;
    use crate::control::{Slider, Toggle};
    use crate::layout::Margin;
    use crate::testing::{DrawCommand, RecordingContext};
    use crate::view::SolidFill;

    fn frame() -> (Frame, ManualClock) {
        let clock = ManualClock::new();
        let frame = Frame::with_config(200.0, 100.0, FrameConfig::default()).with_clock(clock.clone());
        (frame, clock)
    }

    fn slider(rect: Rect, tag: i32) -> ViewNode {
        ViewNode::new(rect).with_control(Control::new(tag), Slider::horizontal())
    }

    fn record<E: FrameEvent + Clone>(frame: &mut Frame) -> Rc<RefCell<Vec<E>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        frame.subscribe::<E>(move |e| sink.borrow_mut().push(e.clone()));
        log
    }

    // ── Container operations ─────────────────────────────────────────

    #[test]
    fn add_view_emits_and_invalidates() {
        let (mut frame, _) = frame();
        let added = record::<ViewAdded>(&mut frame);
        let v = frame.create_view(ViewNode::new(Rect::from_xywh(10.0, 10.0, 20.0, 20.0)));
        frame.add_view(frame.root(), v).unwrap();

        assert_eq!(*added.borrow(), vec![ViewAdded { container: frame.root(), view: v }]);
        assert_eq!(frame.dirty_region().rects(), &[Rect::from_xywh(10.0, 10.0, 20.0, 20.0)]);
    }

    #[test]
    fn removing_a_stranger_changes_nothing() {
        let (mut frame, _) = frame();
        let removed = record::<ViewRemoved>(&mut frame);
        let root = frame.root();
        let panel = frame.create_view(ViewNode::container(Rect::from_size(50.0, 50.0)));
        let v = frame.create_view(ViewNode::new(Rect::from_size(10.0, 10.0)));
        frame.add_view(root, panel).unwrap();
        frame.add_view(root, v).unwrap();

        assert!(matches!(frame.remove_view(panel, v), Err(ViewError::NotAChild { .. })));
        assert_eq!(frame.tree().parent(v), Some(root));
        assert!(removed.borrow().is_empty());
    }

    #[test]
    fn rejected_add_keeps_animations_and_focus() {
        let (mut frame, _) = frame();
        let finished = record::<AnimationFinished>(&mut frame);
        let root = frame.root();
        let detached = frame.create_view(ViewNode::container(Rect::from_size(50.0, 50.0)));
        let stranger = frame.create_view(ViewNode::new(Rect::from_size(10.0, 10.0)));
        let v = frame.create_view(slider(Rect::from_size(10.0, 10.0), 1));
        frame.add_view(root, v).unwrap();
        frame.set_focus_view(Some(v));
        frame.add_animation(v, "fade", Linear::new(100), AlphaValueAnimation::new(0.0)).unwrap();

        let err = frame.add_view_before(detached, v, stranger).unwrap_err();
        assert!(matches!(err, ViewError::NotAChild { .. }));
        assert_eq!(frame.tree().parent(v), Some(root));
        assert_eq!(frame.focus_view(), Some(v));
        assert!(frame.has_animations());
        assert!(finished.borrow().is_empty());
    }

    #[test]
    fn destroy_cancels_subtree_animations_and_focus() {
        let (mut frame, _) = frame();
        let finished = record::<AnimationFinished>(&mut frame);
        let root = frame.root();
        let panel = frame.create_view(ViewNode::container(Rect::from_size(50.0, 50.0)));
        let v = frame.create_view(slider(Rect::from_size(10.0, 10.0), 1));
        frame.add_view(root, panel).unwrap();
        frame.add_view(panel, v).unwrap();
        frame.set_focus_view(Some(v));
        frame.add_animation(v, "fade", Linear::new(100), AlphaValueAnimation::new(0.0)).unwrap();

        assert_eq!(frame.destroy_view(panel).unwrap(), 2);
        assert_eq!(frame.focus_view(), None);
        assert!(!frame.has_animations());
        assert_eq!(
            *finished.borrow(),
            vec![AnimationFinished { view: v, name: "fade".into(), canceled: true }]
        );
        assert!(matches!(frame.destroy_view(root), Err(ViewError::RootView)));
    }

    #[test]
    fn z_order_change_is_reported() {
        let (mut frame, _) = frame();
        let log = record::<ZOrderChanged>(&mut frame);
        let root = frame.root();
        let a = frame.create_view(ViewNode::new(Rect::from_size(10.0, 10.0)));
        let b = frame.create_view(ViewNode::new(Rect::from_size(10.0, 10.0)));
        frame.add_view(root, a).unwrap();
        frame.add_view(root, b).unwrap();
        assert_eq!(frame.change_view_z_order(root, a, 9).unwrap(), 1);
        assert_eq!(frame.tree().children(root), &[b, a]);
        assert_eq!(*log.borrow(), vec![ZOrderChanged { container: root, view: a, index: 1 }]);
    }

    // ── Drawing ──────────────────────────────────────────────────────

    #[test]
    fn draw_paints_dirty_rects_and_clears() {
        let (mut frame, _) = frame();
        let v = frame.create_view(
            ViewNode::new(Rect::from_xywh(10.0, 10.0, 20.0, 20.0)).with_content(SolidFill::new(Color::RED)),
        );
        frame.add_view(frame.root(), v).unwrap();

        let mut ctx = RecordingContext::new(200.0, 100.0);
        assert_eq!(frame.draw(&mut ctx), 1);
        assert_eq!(
            ctx.commands(),
            &[DrawCommand::Rect {
                rect: Rect::from_xywh(10.0, 10.0, 20.0, 20.0),
                style: DrawStyle::Filled,
                color: Color::RED,
            }]
        );
        assert!(!frame.needs_redraw());
        assert_eq!(frame.draw(&mut ctx), 0);
        assert_eq!(ctx.state_depth(), 0);
    }

    #[test]
    fn dirty_flag_is_picked_up_by_draw() {
        let (mut frame, _) = frame();
        let v = frame.create_view(ViewNode::new(Rect::from_xywh(0.0, 0.0, 5.0, 5.0)));
        frame.add_view(frame.root(), v).unwrap();
        let mut ctx = RecordingContext::new(200.0, 100.0);
        frame.draw(&mut ctx);

        frame.view_mut(v).unwrap().set_dirty(true);
        assert!(frame.needs_redraw());
        assert_eq!(frame.draw(&mut ctx), 1);
        assert!(!frame.view(v).unwrap().dirty);
    }

    #[test]
    fn focus_ring_uses_a_path() {
        let config = FrameConfig::default().with_focus_drawing(Color::BLUE, 2.0);
        let mut frame = Frame::with_config(100.0, 100.0, config);
        let v = frame.create_view(slider(Rect::from_xywh(10.0, 10.0, 20.0, 20.0), 1));
        frame.add_view(frame.root(), v).unwrap();
        frame.set_focus_view(Some(v));

        let mut ctx = RecordingContext::new(100.0, 100.0);
        frame.draw(&mut ctx);
        let ring = ctx.commands().iter().find_map(|c| match c {
            DrawCommand::Path { bounds, mode, color } => Some((*bounds, *mode, *color)),
            _ => None,
        });
        assert_eq!(ring, Some((Rect::new(9.0, 9.0, 31.0, 31.0), PathDrawMode::Stroked, Color::BLUE)));

        let mut plain = RecordingContext::new(100.0, 100.0).without_paths();
        frame.invalid(v);
        frame.draw(&mut plain);
        assert!(plain
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::Rect { style: DrawStyle::Stroked, color: Color::BLUE, .. })));
    }

    #[test]
    fn resize_invalidates_everything() {
        let (mut frame, _) = frame();
        frame.set_size(300.0, 150.0);
        assert_eq!(frame.size(), Rect::from_size(300.0, 150.0));
        assert_eq!(frame.dirty_region().bounding_rect(), Rect::from_size(300.0, 150.0));
    }

    // ── Mouse ────────────────────────────────────────────────────────

    #[test]
    fn slider_gesture_is_captured_and_reported() {
        let (mut frame, _) = frame();
        let began = record::<EditBegan>(&mut frame);
        let ended = record::<EditEnded>(&mut frame);
        let v = frame.create_view(slider(Rect::from_xywh(100.0, 0.0, 100.0, 20.0), 7));
        frame.add_view(frame.root(), v).unwrap();

        let r = frame.on_mouse_down(Point::new(125.0, 5.0), ButtonState::left());
        assert_eq!(r, MouseResult::Handled);
        assert_eq!(frame.captured_view(), Some(v));
        assert_eq!(frame.focus_view(), Some(v));

        // Outside the view, still routed to the captured slider.
        frame.on_mouse_moved(Point::new(300.0, 50.0), ButtonState::left());
        assert_eq!(frame.view(v).unwrap().control().map(Control::value_normalized), Some(1.0));

        frame.on_mouse_up(Point::new(300.0, 50.0), ButtonState::left());
        assert_eq!(frame.captured_view(), None);
        assert_eq!(*began.borrow(), vec![EditBegan { view: v, tag: 7 }]);
        assert_eq!(*ended.borrow(), vec![EditEnded { view: v, tag: 7 }]);
    }

    #[test]
    fn transparent_view_passes_clicks_to_views_behind() {
        let (mut frame, _) = frame();
        let behind = frame.create_view(slider(Rect::from_size(100.0, 100.0), 1));
        let cover = frame.create_view(ViewNode::new(Rect::from_size(100.0, 100.0)).transparent(true));
        frame.add_view(frame.root(), behind).unwrap();
        frame.add_view(frame.root(), cover).unwrap();

        assert_eq!(frame.hit_test(Point::new(50.0, 50.0)), Some(cover));
        let r = frame.on_mouse_down(Point::new(50.0, 50.0), ButtonState::left());
        assert_eq!(r, MouseResult::Handled);
        assert_eq!(frame.captured_view(), Some(behind));
    }

    #[test]
    fn opaque_view_blocks_clicks_and_wheel() {
        let (mut frame, _) = frame();
        let behind = frame.create_view(slider(Rect::from_size(100.0, 100.0), 1));
        let cover = frame.create_view(ViewNode::new(Rect::from_size(100.0, 100.0)));
        frame.add_view(frame.root(), behind).unwrap();
        frame.add_view(frame.root(), cover).unwrap();

        let r = frame.on_mouse_down(Point::new(80.0, 50.0), ButtonState::left());
        assert_eq!(r, MouseResult::NotHandled);
        assert_eq!(frame.captured_view(), None);
        assert!(!frame.on_mouse_wheel(Point::new(80.0, 50.0), 1.0, Modifiers::NONE));
        assert_eq!(frame.view(behind).unwrap().control().map(Control::value_normalized), Some(0.0));
    }

    #[test]
    fn front_container_is_the_hit_target() {
        let (mut frame, _) = frame();
        let behind = frame.create_view(slider(Rect::from_size(100.0, 100.0), 1));
        let front = frame.create_view(ViewNode::container(Rect::from_size(100.0, 100.0)));
        frame.add_view(frame.root(), behind).unwrap();
        frame.add_view(frame.root(), front).unwrap();

        assert_eq!(frame.hit_test(Point::new(50.0, 50.0)), Some(front));
        let r = frame.on_mouse_down(Point::new(50.0, 50.0), ButtonState::left());
        assert_eq!(r, MouseResult::NotHandled);
        assert_eq!(frame.view(behind).unwrap().control().map(Control::value_normalized), Some(0.0));
    }

    #[test]
    fn transparent_container_decides_for_its_children() {
        let (mut frame, _) = frame();
        let behind = frame.create_view(slider(Rect::from_size(100.0, 100.0), 1));
        let panel = frame.create_view(ViewNode::container(Rect::from_size(100.0, 100.0)).transparent(true));
        let label = frame.create_view(ViewNode::new(Rect::from_size(100.0, 50.0)));
        let other = frame.create_view(ViewNode::new(Rect::from_size(100.0, 50.0)));
        frame.add_view(frame.root(), behind).unwrap();
        frame.add_view(frame.root(), panel).unwrap();
        frame.add_view(panel, other).unwrap();
        frame.add_view(panel, label).unwrap();

        // The label declines for the panel, the panel lets the click through.
        let r = frame.on_mouse_down(Point::new(50.0, 10.0), ButtonState::left());
        assert_eq!(r, MouseResult::Handled);
        assert_eq!(frame.captured_view(), Some(behind));
    }

    #[test]
    fn default_value_modifier_resets_without_follow_up() {
        let (mut frame, _) = frame();
        let began = record::<EditBegan>(&mut frame);
        let v = frame.create_view(slider(Rect::from_size(100.0, 20.0), 3));
        frame.add_view(frame.root(), v).unwrap();
        frame.set_control_value(v, 0.9).unwrap();

        let r = frame.on_mouse_down(Point::new(10.0, 5.0), ButtonState::left_with(Modifiers::CONTROL));
        assert_eq!(r, MouseResult::HandledNoFollowUp);
        assert_eq!(frame.captured_view(), None);
        assert_eq!(frame.view(v).unwrap().control().map(Control::value), Some(0.5));
        assert_eq!(began.borrow().len(), 1);
    }

    #[test]
    fn cancel_ends_the_edit_session() {
        let (mut frame, _) = frame();
        let ended = record::<EditEnded>(&mut frame);
        let v = frame.create_view(ViewNode::new(Rect::from_size(20.0, 20.0)).with_control(Control::new(2), Toggle::new()));
        frame.add_view(frame.root(), v).unwrap();

        frame.on_mouse_down(Point::new(5.0, 5.0), ButtonState::left());
        assert!(frame.view(v).unwrap().control().is_some_and(Control::is_editing));
        frame.on_mouse_cancel();
        assert!(!frame.view(v).unwrap().control().is_some_and(Control::is_editing));
        assert_eq!(ended.borrow().len(), 1);
    }

    #[test]
    fn mouse_over_enter_and_exit() {
        let (mut frame, _) = frame();
        let entered = record::<MouseEntered>(&mut frame);
        let exited = record::<MouseExited>(&mut frame);
        let v = frame.create_view(ViewNode::new(Rect::from_xywh(10.0, 10.0, 10.0, 10.0)));
        frame.add_view(frame.root(), v).unwrap();

        frame.on_mouse_moved(Point::new(15.0, 15.0), ButtonState::default());
        frame.on_mouse_moved(Point::new(16.0, 16.0), ButtonState::default());
        assert_eq!(frame.mouse_over_view(), Some(v));
        frame.on_mouse_moved(Point::new(50.0, 50.0), ButtonState::default());

        assert_eq!(*entered.borrow(), vec![MouseEntered { view: v }]);
        assert_eq!(*exited.borrow(), vec![MouseExited { view: v }]);
        assert_eq!(frame.mouse_over_view(), None);
    }

    #[test]
    fn wheel_steps_the_control_under_the_mouse() {
        let (mut frame, _) = frame();
        let v = frame.create_view(slider(Rect::from_size(100.0, 20.0), 1));
        frame.add_view(frame.root(), v).unwrap();
        assert!(frame.on_mouse_wheel(Point::new(5.0, 5.0), 1.0, Modifiers::NONE));
        let value = frame.view(v).unwrap().control().map(Control::value_normalized).unwrap();
        assert!((value - 0.1).abs() < 1e-6);
        assert!(!frame.on_mouse_wheel(Point::new(150.0, 50.0), 1.0, Modifiers::NONE));
    }

    // ── Keyboard and focus ───────────────────────────────────────────

    #[test]
    fn tab_traverses_and_wraps() {
        let (mut frame, _) = frame();
        let changes = record::<FocusChanged>(&mut frame);
        let a = frame.create_view(slider(Rect::from_size(10.0, 10.0), 1));
        let b = frame.create_view(slider(Rect::from_xywh(20.0, 0.0, 10.0, 10.0), 2));
        frame.add_view(frame.root(), a).unwrap();
        frame.add_view(frame.root(), b).unwrap();

        assert!(frame.on_key_down(Key::Tab.into()));
        assert!(frame.on_key_down(Key::Tab.into()));
        assert!(frame.on_key_down(Key::Tab.into()));
        assert_eq!(frame.focus_view(), Some(a));
        assert!(frame.on_key_down(Key::BackTab.into()));
        assert_eq!(frame.focus_view(), Some(b));
        assert_eq!(changes.borrow()[0], FocusChanged { old: None, new: Some(a) });
        assert_eq!(changes.borrow().len(), 4);
    }

    #[test]
    fn keys_go_to_the_focus_view() {
        let (mut frame, _) = frame();
        let v = frame.create_view(slider(Rect::from_size(10.0, 10.0), 1));
        frame.add_view(frame.root(), v).unwrap();
        assert!(!frame.on_key_down(Key::Right.into()));
        frame.set_focus_view(Some(v));
        assert!(frame.on_key_down(Key::End.into()));
        assert_eq!(frame.view(v).unwrap().control().map(Control::value_normalized), Some(1.0));
    }

    #[test]
    fn detached_views_cannot_take_focus() {
        let (mut frame, _) = frame();
        let v = frame.create_view(slider(Rect::from_size(10.0, 10.0), 1));
        assert!(!frame.set_focus_view(Some(v)));
        assert_eq!(frame.focus_view(), None);
    }

    // ── Controls ─────────────────────────────────────────────────────

    #[test]
    fn control_operations_need_a_control() {
        let (mut frame, _) = frame();
        let v = frame.create_view(ViewNode::new(Rect::from_size(10.0, 10.0)));
        assert!(matches!(frame.set_control_value(v, 1.0), Err(ViewError::NoControl(_))));
        assert!(matches!(frame.begin_edit(v), Err(ViewError::NoControl(_))));
    }

    #[test]
    fn explicit_edit_sessions_emit_events() {
        let (mut frame, _) = frame();
        let began = record::<EditBegan>(&mut frame);
        let ended = record::<EditEnded>(&mut frame);
        let v = frame.create_view(slider(Rect::from_size(10.0, 10.0), 4));
        frame.add_view(frame.root(), v).unwrap();
        frame.begin_edit(v).unwrap();
        frame.begin_edit(v).unwrap();
        frame.end_edit(v).unwrap();
        frame.end_edit(v).unwrap();
        frame.end_edit(v).unwrap();
        assert_eq!(began.borrow().len(), 1);
        assert_eq!(ended.borrow().len(), 1);
    }

    // ── Animations ───────────────────────────────────────────────────

    #[test]
    fn timer_runs_animations_on_the_frame_clock() {
        let (mut frame, clock) = frame();
        let finished = record::<AnimationFinished>(&mut frame);
        let v = frame.create_view(ViewNode::new(Rect::from_size(10.0, 10.0)));
        frame.add_view(frame.root(), v).unwrap();
        frame.add_animation(v, "fade", Linear::new(100), AlphaValueAnimation::new(0.0)).unwrap();

        clock.set(1000);
        frame.on_timer();
        assert_eq!(frame.animation_state(v, "fade"), Some(AnimationState::Running));
        clock.advance(50);
        frame.on_timer();
        assert_eq!(frame.view(v).unwrap().alpha, 0.5);
        clock.advance(50);
        let done = frame.on_timer();

        assert_eq!(done.len(), 1);
        assert_eq!(frame.view(v).unwrap().alpha, 0.0);
        assert!(!finished.borrow()[0].canceled);
        assert!(!frame.has_animations());
    }

    #[test]
    fn remove_animation_reports_once() {
        let (mut frame, _) = frame();
        let finished = record::<AnimationFinished>(&mut frame);
        let v = frame.create_view(ViewNode::new(Rect::from_size(10.0, 10.0)));
        frame.add_view(frame.root(), v).unwrap();
        frame.add_animation(v, "a", Linear::new(100), AlphaValueAnimation::new(0.0)).unwrap();
        frame.add_animation(v, "b", Linear::new(100), AlphaValueAnimation::new(0.0)).unwrap();

        assert!(frame.remove_animation(v, "a"));
        assert!(!frame.remove_animation(v, "a"));
        assert_eq!(frame.remove_all_animations(v), 1);
        assert_eq!(finished.borrow().len(), 2);
        assert!(finished.borrow().iter().all(|f| f.canceled));
    }

    // ── Layout ───────────────────────────────────────────────────────

    #[test]
    fn layout_follows_child_changes() {
        let (mut frame, _) = frame();
        let root = frame.root();
        let column = frame.create_view(
            ViewNode::container(Rect::from_size(100.0, 100.0))
                .with_layout(RowColumnLayout::rows().with_spacing(4.0).with_margin(Margin::uniform(2.0))),
        );
        frame.add_view(root, column).unwrap();
        let a = frame.create_view(ViewNode::new(Rect::from_size(20.0, 10.0)));
        let b = frame.create_view(ViewNode::new(Rect::from_size(20.0, 10.0)));
        frame.add_view(column, a).unwrap();
        frame.add_view(column, b).unwrap();

        assert_eq!(frame.view(b).unwrap().size, Rect::from_xywh(2.0, 16.0, 20.0, 10.0));
        frame.remove_view(column, a).unwrap();
        assert_eq!(frame.view(b).unwrap().size, Rect::from_xywh(2.0, 2.0, 20.0, 10.0));
    }

    #[test]
    fn animated_layout_moves_children_over_time() {
        let (mut frame, clock) = frame();
        let root = frame.root();
        let row = frame.create_view(ViewNode::container(Rect::from_size(100.0, 20.0)));
        frame.add_view(root, row).unwrap();
        let a = frame.create_view(ViewNode::new(Rect::from_size(10.0, 10.0)));
        let b = frame.create_view(ViewNode::new(Rect::from_size(10.0, 10.0)));
        frame.add_view(row, a).unwrap();
        frame.add_view(row, b).unwrap();

        frame
            .set_layout(row, Some(RowColumnLayout::columns().with_spacing(10.0).with_resize_animation(100)))
            .unwrap();
        assert_eq!(frame.view(b).unwrap().size, Rect::from_size(10.0, 10.0));
        assert_eq!(frame.animation_state(b, RESIZE_ANIMATION), Some(AnimationState::Scheduled));

        frame.on_timer();
        clock.advance(100);
        frame.on_timer();
        assert_eq!(frame.view(b).unwrap().size, Rect::from_xywh(20.0, 0.0, 10.0, 10.0));
        assert!(!frame.has_animations());
    }

    #[test]
    fn layout_on_a_leaf_is_rejected() {
        let (mut frame, _) = frame();
        let v = frame.create_view(ViewNode::new(Rect::from_size(10.0, 10.0)));
        assert!(matches!(
            frame.set_layout(v, Some(RowColumnLayout::rows())),
            Err(ViewError::NotAContainer(_))
        ));
    }
}
