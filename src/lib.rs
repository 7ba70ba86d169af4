//! # viewkit
//!
//! A headless view core for embedding user interfaces in host applications.
//!
//! viewkit keeps a retained tree of rectangular views in a slotmap arena, routes
//! mouse and keyboard input to them, tracks which parts of the frame need
//! repainting, and animates view properties on a frame clock. Painting goes
//! through the [`draw::DrawContext`] trait, so platform backends live outside
//! the crate.
//!
//! ## Core Systems
//!
//! - **[`geometry`]**: Point and Rect primitives
//! - **[`color`]**: RGBA color with exact HSV/HSL conversion
//! - **[`draw`]**: Drawing-context trait, draw state, graphics paths
//! - **[`view`]**: View nodes, drawable content, the arena-backed view tree
//! - **[`control`]**: Control values, edit sessions, listeners, slider/toggle interaction
//! - **[`animation`]**: Timing functions, animation targets, animator, tick clock
//! - **[`event`]**: Input types and typed frame events
//! - **[`render`]**: Dirty-region bookkeeping
//! - **[`layout`]**: Taffy-powered row/column container layout
//! - **[`frame`]**: The root container tying everything together
//! - **[`uidesc`]**: Class-name view factory for UI descriptions
//! - **[`testing`]**: Headless pilot and recording draw context

// Foundation
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;

// Drawing
pub mod draw;
pub mod render;

// View system
pub mod control;
pub mod layout;
pub mod view;

// Events and animation
pub mod animation;
pub mod event;

// Frame
pub mod frame;
pub mod uidesc;

// Headless tooling
pub mod testing;

pub use color::Color;
pub use config::FrameConfig;
pub use error::{FactoryError, ViewError};
pub use frame::Frame;
pub use geometry::{Point, Rect};
pub use view::{ViewId, ViewNode};
