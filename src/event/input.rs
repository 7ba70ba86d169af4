//! Raw input types delivered by the host platform.
//!
//! Defines [`Modifiers`], [`MouseButtons`], [`ButtonState`], [`Key`] and
//! [`KeyEvent`]. Terminal hosts can feed crossterm events in through the `From`
//! impls and [`mouse_input_from_crossterm`]; the rest of the crate never touches
//! crossterm directly.

use std::ops::{BitAnd, BitOr};

use crate::geometry::Point;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key, independent of any platform's virtual key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CONTROL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);
    /// Command on macOS, the Windows key elsewhere.
    pub const COMMAND: Modifiers = Modifiers(8);

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether no modifier bits are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitAnd for Modifiers {
    type Output = Modifiers;
    fn bitand(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// Mouse buttons
// ---------------------------------------------------------------------------

/// Mouse button bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MouseButtons(pub u8);

impl MouseButtons {
    pub const NONE: MouseButtons = MouseButtons(0);
    pub const LEFT: MouseButtons = MouseButtons(1);
    pub const RIGHT: MouseButtons = MouseButtons(2);
    pub const MIDDLE: MouseButtons = MouseButtons(4);

    pub fn contains(self, other: MouseButtons) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for MouseButtons {
    type Output = MouseButtons;
    fn bitor(self, rhs: Self) -> Self::Output {
        MouseButtons(self.0 | rhs.0)
    }
}

/// Buttons and modifiers held during a mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ButtonState {
    pub buttons: MouseButtons,
    pub modifiers: Modifiers,
    /// 1 for a single click, 2 for a double click.
    pub click_count: u8,
}

impl ButtonState {
    pub fn new(buttons: MouseButtons, modifiers: Modifiers) -> Self {
        Self { buttons, modifiers, click_count: 1 }
    }

    /// A plain left click.
    pub fn left() -> Self {
        Self::new(MouseButtons::LEFT, Modifiers::NONE)
    }

    /// A left click with modifiers.
    pub fn left_with(modifiers: Modifiers) -> Self {
        Self::new(MouseButtons::LEFT, modifiers)
    }

    pub fn is_left(&self) -> bool {
        self.buttons.contains(MouseButtons::LEFT)
    }

    pub fn is_double_click(&self) -> bool {
        self.click_count >= 2
    }
}

// ---------------------------------------------------------------------------
// KeyEvent
// ---------------------------------------------------------------------------

/// A keyboard event with key and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }
}

impl From<Key> for KeyEvent {
    fn from(code: Key) -> Self {
        KeyEvent::new(code, Modifiers::NONE)
    }
}

// ---------------------------------------------------------------------------
// Mouse input from a host
// ---------------------------------------------------------------------------

/// Kind of a host mouse event, before routing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MouseInput {
    Down(Point, ButtonState),
    Up(Point, ButtonState),
    Moved(Point, ButtonState),
    Wheel(Point, f32, Modifiers),
}

// ---------------------------------------------------------------------------
// From<crossterm> conversions
// ---------------------------------------------------------------------------

/// Convert crossterm key modifiers to our `Modifiers`.
fn convert_modifiers(m: crossterm::event::KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if m.contains(crossterm::event::KeyModifiers::SHIFT) {
        out = out | Modifiers::SHIFT;
    }
    if m.contains(crossterm::event::KeyModifiers::CONTROL) {
        out = out | Modifiers::CONTROL;
    }
    if m.contains(crossterm::event::KeyModifiers::ALT) {
        out = out | Modifiers::ALT;
    }
    if m.contains(crossterm::event::KeyModifiers::SUPER) {
        out = out | Modifiers::COMMAND;
    }
    out
}

impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(ct: crossterm::event::KeyEvent) -> Self {
        let code = match ct.code {
            crossterm::event::KeyCode::Char(c) => Key::Char(c),
            crossterm::event::KeyCode::Enter => Key::Enter,
            crossterm::event::KeyCode::Esc => Key::Escape,
            crossterm::event::KeyCode::Tab => Key::Tab,
            crossterm::event::KeyCode::BackTab => Key::BackTab,
            crossterm::event::KeyCode::Backspace => Key::Backspace,
            crossterm::event::KeyCode::Delete => Key::Delete,
            crossterm::event::KeyCode::Left => Key::Left,
            crossterm::event::KeyCode::Right => Key::Right,
            crossterm::event::KeyCode::Up => Key::Up,
            crossterm::event::KeyCode::Down => Key::Down,
            crossterm::event::KeyCode::Home => Key::Home,
            crossterm::event::KeyCode::End => Key::End,
            crossterm::event::KeyCode::PageUp => Key::PageUp,
            crossterm::event::KeyCode::PageDown => Key::PageDown,
            crossterm::event::KeyCode::F(n) => Key::F(n),
            // Keys the core has no use for collapse to Escape.
            _ => Key::Escape,
        };
        KeyEvent { code, modifiers: convert_modifiers(ct.modifiers) }
    }
}

fn convert_mouse_button(b: crossterm::event::MouseButton) -> MouseButtons {
    match b {
        crossterm::event::MouseButton::Left => MouseButtons::LEFT,
        crossterm::event::MouseButton::Right => MouseButtons::RIGHT,
        crossterm::event::MouseButton::Middle => MouseButtons::MIDDLE,
    }
}

/// Convert a crossterm mouse event, using terminal cells as frame coordinates.
///
/// Drags become `Moved` with the dragged button held. Horizontal scrolling is
/// not mapped and yields `None`.
pub fn mouse_input_from_crossterm(me: crossterm::event::MouseEvent) -> Option<MouseInput> {
    use crossterm::event::MouseEventKind;

    let at = Point::new(f64::from(me.column), f64::from(me.row));
    let modifiers = convert_modifiers(me.modifiers);
    let input = match me.kind {
        MouseEventKind::Down(b) => MouseInput::Down(at, ButtonState::new(convert_mouse_button(b), modifiers)),
        MouseEventKind::Up(b) => MouseInput::Up(at, ButtonState::new(convert_mouse_button(b), modifiers)),
        MouseEventKind::Drag(b) => MouseInput::Moved(at, ButtonState::new(convert_mouse_button(b), modifiers)),
        MouseEventKind::Moved => MouseInput::Moved(at, ButtonState::new(MouseButtons::NONE, modifiers)),
        MouseEventKind::ScrollUp => MouseInput::Wheel(at, 1.0, modifiers),
        MouseEventKind::ScrollDown => MouseInput::Wheel(at, -1.0, modifiers),
        _ => return None,
    };
    Some(input)
}

// ===========================================================================
// Tests
// ===========================================================================
