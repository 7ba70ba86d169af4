//! Typed frame events.
//!
//! Each notification the frame broadcasts is its own struct implementing
//! [`FrameEvent`]. Subscribers register for one concrete type on the
//! [`EventBus`](super::EventBus) and receive exactly that type.

use std::any::Any;

use crate::view::ViewId;

/// Marker trait for events delivered through the bus.
pub trait FrameEvent: Any {
    /// Human-readable name for logging.
    fn event_name(&self) -> &'static str;
}

macro_rules! frame_event {
    ($ty:ident) => {
        impl FrameEvent for $ty {
            fn event_name(&self) -> &'static str {
                stringify!($ty)
            }
        }
    };
}

/// A view was attached to a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewAdded {
    pub container: ViewId,
    pub view: ViewId,
}
frame_event!(ViewAdded);

/// A view was detached from a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRemoved {
    pub container: ViewId,
    pub view: ViewId,
}
frame_event!(ViewRemoved);

/// A child's position in its container's z-order changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZOrderChanged {
    pub container: ViewId,
    pub view: ViewId,
    pub index: usize,
}
frame_event!(ZOrderChanged);

/// Keyboard focus moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusChanged {
    pub old: Option<ViewId>,
    pub new: Option<ViewId>,
}
frame_event!(FocusChanged);

/// The mouse moved over a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEntered {
    pub view: ViewId,
}
frame_event!(MouseEntered);

/// The mouse left a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseExited {
    pub view: ViewId,
}
frame_event!(MouseExited);

/// A control entered its outermost edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditBegan {
    pub view: ViewId,
    pub tag: i32,
}
frame_event!(EditBegan);

/// A control left its outermost edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditEnded {
    pub view: ViewId,
    pub tag: i32,
}
frame_event!(EditEnded);

/// An animation completed or was canceled and has been removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationFinished {
    pub view: ViewId,
    pub name: String,
    pub canceled: bool,
}
frame_event!(AnimationFinished);

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn event_names() {
        let mut sm: SlotMap<ViewId, ()> = SlotMap::with_key();
        let id = sm.insert(());
        assert_eq!(MouseEntered { view: id }.event_name(), "MouseEntered");
        assert_eq!(FocusChanged { old: None, new: Some(id) }.event_name(), "FocusChanged");
        let finished = AnimationFinished { view: id, name: "fade".into(), canceled: true };
        assert_eq!(finished.event_name(), "AnimationFinished");
    }
}
