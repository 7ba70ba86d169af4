//! Animation engine: timing functions, targets, the animator and its clock.
//!
//! An animation pairs a [`TimingFunction`] (elapsed time to position) with an
//! [`AnimationTarget`] (position to view change). The frame's [`Animator`]
//! keys animations by view and name and advances all of them on one clock.

pub mod animator;
pub mod clock;
pub mod target;
pub mod timing;

pub use animator::{AnimationState, Animator, Finished};
pub use clock::{run_until_idle, AnimationTimer, ManualClock, MonotonicClock, TickSource};
pub use target::{
    AlphaValueAnimation, AnimationTarget, CallbackTarget, ControlValueAnimation, ViewSizeAnimation,
};
pub use timing::{CubicBezier, Interpolation, Linear, Power, Repeat, TimingFunction};
