//! Animation targets: what an animation does to its view on every tick.

use crate::geometry::Rect;
use crate::view::ViewMut;

/// Receives the lifecycle of one animation.
///
/// `animation_start` runs on the first tick, before the first
/// `animation_tick`. `animation_finished` runs exactly once: after the final
/// tick, or when the animation is canceled.
pub trait AnimationTarget {
    fn animation_start(&mut self, _view: &mut ViewMut<'_>, _name: &str) {}

    fn animation_tick(&mut self, view: &mut ViewMut<'_>, name: &str, pos: f32);

    fn animation_finished(&mut self, _view: &mut ViewMut<'_>, _name: &str, _canceled: bool) {}
}

fn lerp(from: f32, to: f32, pos: f32) -> f32 {
    from + (to - from) * pos
}

// ---------------------------------------------------------------------------
// AlphaValueAnimation
// ---------------------------------------------------------------------------

/// Fades the view's alpha from its value at start to `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlphaValueAnimation {
    end: f32,
    start: f32,
    force_end_value_on_finish: bool,
}

impl AlphaValueAnimation {
    pub fn new(end: f32) -> Self {
        Self { end, start: 1.0, force_end_value_on_finish: false }
    }

    /// Jump to the end value even when canceled (builder).
    pub fn force_end_value_on_finish(mut self) -> Self {
        self.force_end_value_on_finish = true;
        self
    }
}

impl AnimationTarget for AlphaValueAnimation {
    fn animation_start(&mut self, view: &mut ViewMut<'_>, _name: &str) {
        self.start = view.alpha();
    }

    fn animation_tick(&mut self, view: &mut ViewMut<'_>, _name: &str, pos: f32) {
        view.set_alpha(lerp(self.start, self.end, pos));
    }

    fn animation_finished(&mut self, view: &mut ViewMut<'_>, _name: &str, _canceled: bool) {
        if self.force_end_value_on_finish {
            view.set_alpha(self.end);
        }
    }
}

// ---------------------------------------------------------------------------
// ViewSizeAnimation
// ---------------------------------------------------------------------------

/// Moves and resizes the view from its rect at start to `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSizeAnimation {
    end: Rect,
    start: Rect,
    force_end_value_on_finish: bool,
}

impl ViewSizeAnimation {
    pub fn new(end: Rect) -> Self {
        Self { end: end.normalize(), start: Rect::EMPTY, force_end_value_on_finish: false }
    }

    /// Jump to the end rect even when canceled (builder).
    pub fn force_end_value_on_finish(mut self) -> Self {
        self.force_end_value_on_finish = true;
        self
    }

    pub fn end(&self) -> Rect {
        self.end
    }
}

impl AnimationTarget for ViewSizeAnimation {
    fn animation_start(&mut self, view: &mut ViewMut<'_>, _name: &str) {
        self.start = view.size();
    }

    fn animation_tick(&mut self, view: &mut ViewMut<'_>, _name: &str, pos: f32) {
        let rect = self.start.lerp(self.end, f64::from(pos));
        view.set_view_size(rect);
    }

    fn animation_finished(&mut self, view: &mut ViewMut<'_>, _name: &str, _canceled: bool) {
        if self.force_end_value_on_finish {
            view.set_view_size(self.end);
        }
    }
}

// ---------------------------------------------------------------------------
// ControlValueAnimation
// ---------------------------------------------------------------------------

/// Moves the control value (user range) from its value at start to `end`.
///
/// Views without a control are left alone. Listeners see every step.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlValueAnimation {
    end: f32,
    start: f32,
    force_end_value_on_finish: bool,
}

impl ControlValueAnimation {
    pub fn new(end: f32) -> Self {
        Self { end, start: 0.0, force_end_value_on_finish: false }
    }

    /// Jump to the end value even when canceled (builder).
    pub fn force_end_value_on_finish(mut self) -> Self {
        self.force_end_value_on_finish = true;
        self
    }
}

impl AnimationTarget for ControlValueAnimation {
    fn animation_start(&mut self, view: &mut ViewMut<'_>, _name: &str) {
        if let Some(control) = view.control() {
            self.start = control.value();
        }
    }

    fn animation_tick(&mut self, view: &mut ViewMut<'_>, _name: &str, pos: f32) {
        view.set_control_value(lerp(self.start, self.end, pos));
    }

    fn animation_finished(&mut self, view: &mut ViewMut<'_>, _name: &str, _canceled: bool) {
        if self.force_end_value_on_finish {
            view.set_control_value(self.end);
        }
    }
}

// ---------------------------------------------------------------------------
// CallbackTarget
// ---------------------------------------------------------------------------

type TickFn = Box<dyn FnMut(&mut ViewMut<'_>, f32)>;
type FinishFn = Box<dyn FnMut(&mut ViewMut<'_>, bool)>;

/// Closure-driven target.
pub struct CallbackTarget {
    tick: TickFn,
    finished: Option<FinishFn>,
}

impl CallbackTarget {
    pub fn new(tick: impl FnMut(&mut ViewMut<'_>, f32) + 'static) -> Self {
        Self { tick: Box::new(tick), finished: None }
    }

    /// Run `finished` with the canceled flag when the animation ends (builder).
    pub fn on_finished(mut self, finished: impl FnMut(&mut ViewMut<'_>, bool) + 'static) -> Self {
        self.finished = Some(Box::new(finished));
        self
    }
}

impl AnimationTarget for CallbackTarget {
    fn animation_tick(&mut self, view: &mut ViewMut<'_>, _name: &str, pos: f32) {
        (self.tick)(view, pos);
    }

    fn animation_finished(&mut self, view: &mut ViewMut<'_>, _name: &str, canceled: bool) {
        if let Some(finished) = self.finished.as_mut() {
            finished(view, canceled);
        }
    }
}

impl std::fmt::Debug for CallbackTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackTarget")
            .field("has_finished", &self.finished.is_some())
            .finish()
    }
}
