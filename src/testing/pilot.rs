//! Pilot: programmatic interaction with a headless frame.
//!
//! The `Pilot` owns a [`Frame`] running on a [`ManualClock`] and provides
//! methods to simulate user input (clicks, drags, keys, wheel), advance
//! animation time, and render to a recorded command list.

use crate::animation::{ManualClock, TickSource};
use crate::config::FrameConfig;
use crate::event::{ButtonState, Key, KeyEvent, Modifiers, MouseResult};
use crate::frame::Frame;
use crate::geometry::Point;

use super::recording::{DrawCommand, RecordingContext};
use super::snapshot::commands_to_string;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless frame driver for tests.
///
/// # Examples
///
/// ```ignore
/// use viewkit::testing::Pilot;
/// use viewkit::geometry::Point;
///
/// let mut pilot = Pilot::new(200.0, 100.0);
/// pilot.click(Point::new(10.0, 10.0));
/// pilot.advance(16);
/// let commands = pilot.render();
/// ```
pub struct Pilot {
    frame: Frame,
    clock: ManualClock,
}

impl Pilot {
    /// A frame of the given size with the default config.
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_config(width, height, FrameConfig::default())
    }

    pub fn with_config(width: f64, height: f64, config: FrameConfig) -> Self {
        let clock = ManualClock::new();
        let frame = Frame::with_config(width, height, config).with_clock(clock.clone());
        Self { frame, clock }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    /// Current time on the pilot's clock.
    pub fn now(&self) -> u64 {
        self.frame.now()
    }

    // ── Mouse ────────────────────────────────────────────────────────

    /// Left click (down then up) at `at`. Returns the mouse-down result.
    pub fn click(&mut self, at: Point) -> MouseResult {
        self.click_with(at, Modifiers::NONE)
    }

    /// Left click with modifiers held.
    pub fn click_with(&mut self, at: Point, modifiers: Modifiers) -> MouseResult {
        let buttons = ButtonState::left_with(modifiers);
        let result = self.frame.on_mouse_down(at, buttons);
        self.frame.on_mouse_up(at, buttons);
        result
    }

    /// Press at `from`, move through `steps` evenly spaced points to `to`,
    /// release at `to`.
    pub fn drag(&mut self, from: Point, to: Point, steps: u32) -> MouseResult {
        let buttons = ButtonState::left();
        let result = self.frame.on_mouse_down(from, buttons);
        let steps = steps.max(1);
        for i in 1..=steps {
            let at = from.lerp(to, f64::from(i) / f64::from(steps));
            self.frame.on_mouse_moved(at, buttons);
        }
        self.frame.on_mouse_up(to, buttons);
        result
    }

    /// Move the mouse without buttons held.
    pub fn hover(&mut self, at: Point) -> MouseResult {
        self.frame.on_mouse_moved(at, ButtonState::default())
    }

    pub fn scroll(&mut self, at: Point, distance: f32) -> bool {
        self.frame.on_mouse_wheel(at, distance, Modifiers::NONE)
    }

    // ── Keyboard ─────────────────────────────────────────────────────

    /// Press a key with no modifiers.
    pub fn press_key(&mut self, key: Key) -> bool {
        self.frame.on_key_down(KeyEvent::from(key))
    }

    pub fn press_key_with(&mut self, key: Key, modifiers: Modifiers) -> bool {
        self.frame.on_key_down(KeyEvent::new(key, modifiers))
    }

    // ── Time ─────────────────────────────────────────────────────────

    /// Tick animations at the current time, then advance the clock in
    /// `tick_interval_ms` steps until `ms` have passed, ticking after each.
    pub fn advance(&mut self, ms: u64) {
        let step = self.frame.config().tick_interval_ms.max(1);
        self.frame.on_timer();
        let mut remaining = ms;
        while remaining > 0 {
            let dt = remaining.min(step);
            self.clock.advance(dt);
            self.frame.on_timer();
            remaining -= dt;
        }
    }

    /// Advance until no animations remain, or `limit_ms` has passed. Returns
    /// the elapsed time.
    pub fn settle(&mut self, limit_ms: u64) -> u64 {
        let start = self.clock.now_ms();
        let step = self.frame.config().tick_interval_ms.max(1);
        self.frame.on_timer();
        while self.frame.has_animations() && self.clock.now_ms() - start < limit_ms {
            self.clock.advance(step);
            self.frame.on_timer();
        }
        self.clock.now_ms() - start
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Draw everything pending into a fresh recording context.
    pub fn render(&mut self) -> Vec<DrawCommand> {
        let bounds = self.frame.size();
        let mut ctx = RecordingContext::new(bounds.right, bounds.bottom);
        self.frame.draw(&mut ctx);
        ctx.take_commands()
    }

    /// Redraw the whole frame and return it as snapshot text.
    pub fn render_all_to_string(&mut self) -> String {
        let root = self.frame.root();
        self.frame.invalid(root);
        commands_to_string(&self.render())
    }
}

impl std::fmt::Debug for Pilot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pilot")
            .field("frame", &self.frame)
            .field("now", &self.now())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AlphaValueAnimation, Linear};
    use crate::color::Color;
    use crate::control::{Control, Slider, Toggle};
    use crate::geometry::Rect;
    use crate::view::{SolidFill, ViewNode};

    #[test]
    fn click_toggles() {
        let mut pilot = Pilot::new(100.0, 100.0);
        let frame = pilot.frame_mut();
        let v = frame.create_view(ViewNode::new(Rect::from_size(20.0, 20.0)).with_control(Control::new(1), Toggle::new()));
        frame.add_view(frame.root(), v).unwrap();

        assert_eq!(pilot.click(Point::new(5.0, 5.0)), MouseResult::Handled);
        assert_eq!(pilot.frame().view(v).unwrap().control().map(Control::value), Some(1.0));
        pilot.click(Point::new(5.0, 5.0));
        assert_eq!(pilot.frame().view(v).unwrap().control().map(Control::value), Some(0.0));
    }

    #[test]
    fn drag_moves_slider() {
        let mut pilot = Pilot::new(100.0, 100.0);
        let frame = pilot.frame_mut();
        let v = frame.create_view(ViewNode::new(Rect::from_size(100.0, 10.0)).with_control(Control::new(1), Slider::horizontal()));
        frame.add_view(frame.root(), v).unwrap();

        pilot.drag(Point::new(10.0, 5.0), Point::new(60.0, 5.0), 5);
        assert_eq!(pilot.frame().view(v).unwrap().control().map(Control::value), Some(0.6));
        assert_eq!(pilot.frame().captured_view(), None);
    }

    #[test]
    fn advance_steps_by_tick_interval() {
        let mut pilot = Pilot::new(100.0, 100.0);
        let frame = pilot.frame_mut();
        let v = frame.create_view(ViewNode::new(Rect::from_size(10.0, 10.0)));
        frame.add_view(frame.root(), v).unwrap();
        frame.add_animation(v, "fade", Linear::new(64), AlphaValueAnimation::new(0.0)).unwrap();

        pilot.advance(32);
        assert_eq!(pilot.now(), 32);
        assert_eq!(pilot.frame().view(v).unwrap().alpha, 0.5);
        assert_eq!(pilot.settle(1000), 32);
        assert!(!pilot.frame().has_animations());
    }

    #[test]
    fn render_draws_pending_rects_once() {
        let mut pilot = Pilot::new(50.0, 50.0);
        let frame = pilot.frame_mut();
        let v = frame.create_view(ViewNode::new(Rect::from_xywh(5.0, 5.0, 10.0, 10.0)).with_content(SolidFill::new(Color::GREEN)));
        frame.add_view(frame.root(), v).unwrap();

        assert_eq!(pilot.render().len(), 1);
        assert!(pilot.render().is_empty());
        insta::assert_snapshot!(pilot.render_all_to_string(), @"rect filled #00FF00FF 5,5 10x10");
    }
}
