//! Interaction strategies: how input turns into control value changes.
//!
//! A view that carries a [`Control`] may also carry an [`Interaction`]. The
//! frame forwards routed input to it together with the control and the view's
//! local bounds; the strategy changes the value and brackets drags with edit
//! sessions.

use crate::event::{ButtonState, Key, KeyEvent, Modifiers, MouseResult};
use crate::geometry::{Point, Rect};

use super::Control;

/// Slider axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Translates input routed to a view into changes of its control.
///
/// Points are in the view's local coordinates; `bounds` is the view's local
/// rect (origin at zero).
pub trait Interaction {
    fn mouse_down(
        &mut self,
        control: &mut Control,
        bounds: Rect,
        at: Point,
        buttons: ButtonState,
    ) -> MouseResult;

    fn mouse_moved(
        &mut self,
        _control: &mut Control,
        _bounds: Rect,
        _at: Point,
        _buttons: ButtonState,
    ) -> MouseResult {
        MouseResult::NotHandled
    }

    fn mouse_up(
        &mut self,
        _control: &mut Control,
        _bounds: Rect,
        _at: Point,
        _buttons: ButtonState,
    ) -> MouseResult {
        MouseResult::NotHandled
    }

    /// The platform took the mouse away mid-gesture.
    fn mouse_cancel(&mut self, _control: &mut Control) -> MouseResult {
        MouseResult::NotHandled
    }

    /// Returns whether the wheel event was consumed.
    fn wheel(&mut self, _control: &mut Control, _distance: f32, _modifiers: Modifiers) -> bool {
        false
    }

    /// Returns whether the key was consumed.
    fn key_down(&mut self, _control: &mut Control, _key: KeyEvent) -> bool {
        false
    }
}

// ---------------------------------------------------------------------------
// Slider
// ---------------------------------------------------------------------------

/// Maps the pointer position along one axis to the normalized value.
///
/// Vertical sliders have their maximum at the top. Arrow keys and the wheel
/// step by the control's wheel increment; holding Shift divides the step by ten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slider {
    pub orientation: Orientation,
}

impl Slider {
    pub fn horizontal() -> Self {
        Self { orientation: Orientation::Horizontal }
    }

    pub fn vertical() -> Self {
        Self { orientation: Orientation::Vertical }
    }

    fn value_at(&self, bounds: Rect, at: Point) -> f32 {
        let t = match self.orientation {
            Orientation::Horizontal if bounds.width() > 0.0 => (at.x - bounds.left) / bounds.width(),
            Orientation::Vertical if bounds.height() > 0.0 => 1.0 - (at.y - bounds.top) / bounds.height(),
            _ => 0.0,
        };
        t as f32
    }

    fn step(control: &mut Control, direction: f32, modifiers: Modifiers) -> bool {
        let mut inc = control.wheel_inc() * direction;
        if modifiers.contains(Modifiers::SHIFT) {
            inc /= 10.0;
        }
        control.begin_edit();
        control.set_value_normalized(control.value_normalized() + inc);
        control.end_edit();
        true
    }
}

impl Interaction for Slider {
    fn mouse_down(
        &mut self,
        control: &mut Control,
        bounds: Rect,
        at: Point,
        buttons: ButtonState,
    ) -> MouseResult {
        if !buttons.is_left() {
            return MouseResult::NotHandled;
        }
        control.begin_edit();
        control.set_value_normalized(self.value_at(bounds, at));
        MouseResult::Handled
    }

    fn mouse_moved(
        &mut self,
        control: &mut Control,
        bounds: Rect,
        at: Point,
        buttons: ButtonState,
    ) -> MouseResult {
        if !buttons.is_left() || !control.is_editing() {
            return MouseResult::NotHandled;
        }
        control.set_value_normalized(self.value_at(bounds, at));
        MouseResult::Handled
    }

    fn mouse_up(
        &mut self,
        control: &mut Control,
        _bounds: Rect,
        _at: Point,
        _buttons: ButtonState,
    ) -> MouseResult {
        if control.end_edit() {
            MouseResult::Handled
        } else {
            MouseResult::NotHandled
        }
    }

    fn mouse_cancel(&mut self, control: &mut Control) -> MouseResult {
        if control.end_edit() {
            MouseResult::Handled
        } else {
            MouseResult::NotHandled
        }
    }

    fn wheel(&mut self, control: &mut Control, distance: f32, modifiers: Modifiers) -> bool {
        if distance == 0.0 {
            return false;
        }
        Self::step(control, distance.signum(), modifiers)
    }

    fn key_down(&mut self, control: &mut Control, key: KeyEvent) -> bool {
        let direction = match (self.orientation, key.code) {
            (Orientation::Horizontal, Key::Right) | (Orientation::Vertical, Key::Up) => 1.0,
            (Orientation::Horizontal, Key::Left) | (Orientation::Vertical, Key::Down) => -1.0,
            (_, Key::Home) => {
                control.begin_edit();
                control.set_value_normalized(0.0);
                control.end_edit();
                return true;
            }
            (_, Key::End) => {
                control.begin_edit();
                control.set_value_normalized(1.0);
                control.end_edit();
                return true;
            }
            _ => return false,
        };
        Self::step(control, direction, key.modifiers)
    }
}

// ---------------------------------------------------------------------------
// Toggle
// ---------------------------------------------------------------------------

/// Two-state button: flips between min and max.
///
/// The new value is committed on mouse-up inside the view; releasing outside
/// leaves the value alone. Enter and Space toggle too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Toggle {
    pressed: bool,
}

impl Toggle {
    pub fn new() -> Self {
        Self::default()
    }

    fn flip(control: &mut Control) {
        let next = if control.value_normalized() < 0.5 { 1.0 } else { 0.0 };
        control.set_value_normalized(next);
    }
}

impl Interaction for Toggle {
    fn mouse_down(
        &mut self,
        control: &mut Control,
        _bounds: Rect,
        _at: Point,
        buttons: ButtonState,
    ) -> MouseResult {
        if !buttons.is_left() {
            return MouseResult::NotHandled;
        }
        self.pressed = true;
        control.begin_edit();
        MouseResult::Handled
    }

    fn mouse_moved(
        &mut self,
        _control: &mut Control,
        _bounds: Rect,
        _at: Point,
        _buttons: ButtonState,
    ) -> MouseResult {
        if self.pressed {
            MouseResult::Handled
        } else {
            MouseResult::NotHandled
        }
    }

    fn mouse_up(
        &mut self,
        control: &mut Control,
        bounds: Rect,
        at: Point,
        _buttons: ButtonState,
    ) -> MouseResult {
        if !std::mem::take(&mut self.pressed) {
            return MouseResult::NotHandled;
        }
        if bounds.point_inside(at) {
            Self::flip(control);
        }
        control.end_edit();
        MouseResult::Handled
    }

    fn mouse_cancel(&mut self, control: &mut Control) -> MouseResult {
        if std::mem::take(&mut self.pressed) {
            control.end_edit();
            return MouseResult::Handled;
        }
        MouseResult::NotHandled
    }

    fn key_down(&mut self, control: &mut Control, key: KeyEvent) -> bool {
        if !matches!(key.code, Key::Enter | Key::Char(' ')) {
            return false;
        }
        control.begin_edit();
        Self::flip(control);
        control.end_edit();
        true
    }
}
