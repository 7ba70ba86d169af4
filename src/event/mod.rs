//! Event system: raw input types, typed frame events, the observer bus.

pub mod handler;
pub mod input;
pub mod message;

pub use handler::{EventBus, Subscription};
pub use input::{
    mouse_input_from_crossterm, ButtonState, Key, KeyEvent, Modifiers, MouseButtons, MouseInput,
};
pub use message::{
    AnimationFinished, EditBegan, EditEnded, FocusChanged, FrameEvent, MouseEntered,
    MouseExited, ViewAdded, ViewRemoved, ZOrderChanged,
};

/// Outcome of delivering a mouse event to a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseResult {
    NotHandled,
    Handled,
    /// Handled, but the view does not want the following move/up events.
    HandledNoFollowUp,
}

impl MouseResult {
    pub fn is_handled(self) -> bool {
        !matches!(self, MouseResult::NotHandled)
    }
}
