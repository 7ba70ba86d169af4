//! Views: the arena-backed view tree, node data and drawable content.

pub mod content;
pub mod handle;
pub mod node;
pub mod tree;

pub use content::{BitmapStrip, DrawInfo, Drawable, EllipseFill, Empty, SolidFill, ValueBar};
pub use handle::ViewMut;
pub use node::{ViewId, ViewNode};
pub use tree::{GetViewOptions, ViewTree};
