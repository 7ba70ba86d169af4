//! Drawing-context abstraction: the capability set every platform backend provides.
//!
//! Views draw in their own local coordinates. The context keeps a translation
//! offset, a clip rect (in device coordinates) and the current colors in a
//! [`DrawState`]; containers push a state, translate to the child's origin and
//! pop it again after the child has drawn.

pub mod path;

pub use path::{GraphicsPath, PathElement};

use crate::color::Color;
use crate::geometry::{Point, Rect};

// ---------------------------------------------------------------------------
// Styles
// ---------------------------------------------------------------------------

/// How a closed shape is painted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DrawStyle {
    /// Outline with the frame color.
    Stroked,
    /// Fill with the fill color.
    #[default]
    Filled,
    /// Fill, then outline.
    FilledAndStroked,
}

/// Fill rule used by [`DrawContext::draw_path`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PathDrawMode {
    #[default]
    Filled,
    FilledEvenOdd,
    Stroked,
}

// ---------------------------------------------------------------------------
// Bitmap
// ---------------------------------------------------------------------------

/// Handle to a platform bitmap.
///
/// Decoding is the platform's job; the core only needs a name to hand back to
/// the backend and the pixel size for layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    pub name: String,
    pub width: f64,
    pub height: f64,
}

impl Bitmap {
    pub fn new(name: impl Into<String>, width: f64, height: f64) -> Self {
        Self { name: name.into(), width, height }
    }

    /// The bitmap's bounds at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }
}

// ---------------------------------------------------------------------------
// DrawState
// ---------------------------------------------------------------------------

/// The mutable graphics state saved and restored by a context.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawState {
    /// Translation from local to device coordinates.
    pub offset: Point,
    /// Clip rect in device coordinates.
    pub clip: Rect,
    pub fill_color: Color,
    pub frame_color: Color,
    pub line_width: f64,
    /// Multiplier applied to every color's alpha.
    pub global_alpha: f32,
}

impl DrawState {
    /// Initial state for a surface of the given size.
    pub fn new(surface: Rect) -> Self {
        Self {
            offset: Point::ZERO,
            clip: surface,
            fill_color: Color::WHITE,
            frame_color: Color::BLACK,
            line_width: 1.0,
            global_alpha: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// DrawContext
// ---------------------------------------------------------------------------

/// A drawing surface.
///
/// All shape coordinates are local: implementations translate them by
/// `state().offset` and clip to `state().clip`. Every `save_state` must be
/// matched by a `restore_state` before a view's draw returns.
pub trait DrawContext {
    /// Current graphics state.
    fn state(&self) -> &DrawState;

    /// Mutable access to the current graphics state.
    fn state_mut(&mut self) -> &mut DrawState;

    /// Push a copy of the current state.
    fn save_state(&mut self);

    /// Pop the most recently saved state. Unbalanced calls are ignored.
    fn restore_state(&mut self);

    /// Number of saved states currently on the stack.
    fn state_depth(&self) -> usize;

    fn draw_rect(&mut self, rect: Rect, style: DrawStyle);

    fn draw_ellipse(&mut self, rect: Rect, style: DrawStyle);

    fn draw_line(&mut self, from: Point, to: Point);

    /// Draw the part of `bitmap` starting at `offset` into `dest`.
    fn draw_bitmap(&mut self, bitmap: &Bitmap, dest: Rect, offset: Point, alpha: f32);

    /// Create an empty path, or `None` if the backend cannot build paths.
    fn create_path(&mut self) -> Option<GraphicsPath>;

    fn draw_path(&mut self, path: &GraphicsPath, mode: PathDrawMode);

    // ── Provided state helpers ───────────────────────────────────────

    fn set_fill_color(&mut self, color: Color) {
        self.state_mut().fill_color = color;
    }

    fn set_frame_color(&mut self, color: Color) {
        self.state_mut().frame_color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.state_mut().line_width = width;
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.state_mut().global_alpha = alpha.max(0.0).min(1.0);
    }

    fn global_alpha(&self) -> f32 {
        self.state().global_alpha
    }

    /// Move the local origin by `by`.
    fn translate(&mut self, by: Point) {
        let state = self.state_mut();
        state.offset = state.offset + by;
    }

    /// The clip rect in local coordinates.
    fn clip_rect(&self) -> Rect {
        let state = self.state();
        state.clip.translate(-state.offset)
    }

    /// Restrict clipping to `rect` (local coordinates). The clip only ever
    /// shrinks; call `restore_state` to widen it again.
    fn set_clip_rect(&mut self, rect: Rect) {
        let state = self.state_mut();
        let device = rect.translate(state.offset);
        state.clip = state.clip.intersect(device);
    }

    /// Convert a local rect to device coordinates.
    fn to_device(&self, rect: Rect) -> Rect {
        rect.translate(self.state().offset)
    }
}
