//! Drawable content strategies.
//!
//! A view does not paint itself through a class hierarchy; it holds a boxed
//! [`Drawable`] chosen at construction. The content receives a context already
//! translated to the view's origin and clipped to the update rect.

use crate::color::Color;
use crate::control::{Control, Orientation};
use crate::draw::{Bitmap, DrawContext, DrawStyle};
use crate::geometry::{Point, Rect};

/// Per-draw information handed to content.
#[derive(Debug, Clone, Copy)]
pub struct DrawInfo<'a> {
    /// The view's local bounds (origin at zero).
    pub bounds: Rect,
    /// The part of `bounds` that needs repainting.
    pub update_rect: Rect,
    /// The view's control, if it has one.
    pub control: Option<&'a Control>,
}

impl DrawInfo<'_> {
    /// Normalized control value, or 0 for views without a control.
    pub fn value_normalized(&self) -> f32 {
        self.control.map_or(0.0, Control::value_normalized)
    }
}

/// What a view paints, and optionally which of its points count as hits.
pub trait Drawable {
    /// Paint into `ctx` in local coordinates. Any `save_state` must be matched
    /// by a `restore_state` before returning.
    fn draw(&self, ctx: &mut dyn DrawContext, info: &DrawInfo<'_>);

    /// Whether the local point `at` hits the content. Defaults to the bounds.
    fn hit_test(&self, at: Point, bounds: Rect) -> bool {
        bounds.point_inside(at)
    }
}

/// Paints nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty;

impl Drawable for Empty {
    fn draw(&self, _ctx: &mut dyn DrawContext, _info: &DrawInfo<'_>) {}
}

/// Fills (and optionally strokes) the whole view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidFill {
    pub color: Color,
    pub frame_color: Option<Color>,
}

impl SolidFill {
    pub fn new(color: Color) -> Self {
        Self { color, frame_color: None }
    }

    /// Outline the view as well (builder).
    pub fn with_frame(mut self, color: Color) -> Self {
        self.frame_color = Some(color);
        self
    }
}

impl Drawable for SolidFill {
    fn draw(&self, ctx: &mut dyn DrawContext, info: &DrawInfo<'_>) {
        ctx.set_fill_color(self.color);
        match self.frame_color {
            Some(frame) => {
                ctx.set_frame_color(frame);
                ctx.draw_rect(info.bounds, DrawStyle::FilledAndStroked);
            }
            None => ctx.draw_rect(info.bounds, DrawStyle::Filled),
        }
    }
}

/// A filled ellipse inscribed in the view. Only points inside the ellipse hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseFill {
    pub color: Color,
}

impl EllipseFill {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Drawable for EllipseFill {
    fn draw(&self, ctx: &mut dyn DrawContext, info: &DrawInfo<'_>) {
        ctx.set_fill_color(self.color);
        ctx.draw_ellipse(info.bounds, DrawStyle::Filled);
    }

    fn hit_test(&self, at: Point, bounds: Rect) -> bool {
        let rx = bounds.width() / 2.0;
        let ry = bounds.height() / 2.0;
        if rx <= 0.0 || ry <= 0.0 {
            return false;
        }
        let c = bounds.center();
        let dx = (at.x - c.x) / rx;
        let dy = (at.y - c.y) / ry;
        dx * dx + dy * dy <= 1.0
    }
}

/// Background plus a bar proportional to the control value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueBar {
    pub orientation: Orientation,
    pub background: Color,
    pub foreground: Color,
}

impl ValueBar {
    pub fn new(orientation: Orientation, background: Color, foreground: Color) -> Self {
        Self { orientation, background, foreground }
    }

    /// The filled part of `bounds` for a normalized value.
    pub fn bar_rect(&self, bounds: Rect, value: f32) -> Rect {
        let v = f64::from(value.max(0.0).min(1.0));
        match self.orientation {
            Orientation::Horizontal => {
                Rect::new(bounds.left, bounds.top, bounds.left + bounds.width() * v, bounds.bottom)
            }
            Orientation::Vertical => {
                Rect::new(bounds.left, bounds.bottom - bounds.height() * v, bounds.right, bounds.bottom)
            }
        }
    }
}

impl Drawable for ValueBar {
    fn draw(&self, ctx: &mut dyn DrawContext, info: &DrawInfo<'_>) {
        ctx.set_fill_color(self.background);
        ctx.draw_rect(info.bounds, DrawStyle::Filled);
        let bar = self.bar_rect(info.bounds, info.value_normalized());
        if !bar.is_empty() {
            ctx.set_fill_color(self.foreground);
            ctx.draw_rect(bar, DrawStyle::Filled);
        }
    }
}

/// A film-strip bitmap: one sub-image per value step, stacked vertically or
/// horizontally. The control value selects which frame is shown.
#[derive(Debug, Clone, PartialEq)]
pub struct BitmapStrip {
    pub bitmap: Bitmap,
    pub frames: u32,
    pub vertical: bool,
}

impl BitmapStrip {
    pub fn new(bitmap: Bitmap, frames: u32) -> Self {
        Self { bitmap, frames: frames.max(1), vertical: true }
    }

    /// Frames laid out left to right instead of top to bottom (builder).
    pub fn horizontal(mut self) -> Self {
        self.vertical = false;
        self
    }

    /// Frame index for a normalized value.
    pub fn frame_index(&self, value: f32) -> u32 {
        let last = self.frames.saturating_sub(1);
        let index = (value.max(0.0).min(1.0) * last as f32).round() as u32;
        index.min(last)
    }

    /// Offset into the bitmap of the frame for `value`.
    pub fn frame_offset(&self, value: f32) -> Point {
        let index = f64::from(self.frame_index(value));
        let frames = f64::from(self.frames);
        if self.vertical {
            Point::new(0.0, index * self.bitmap.height / frames)
        } else {
            Point::new(index * self.bitmap.width / frames, 0.0)
        }
    }
}

impl Drawable for BitmapStrip {
    fn draw(&self, ctx: &mut dyn DrawContext, info: &DrawInfo<'_>) {
        let offset = self.frame_offset(info.value_normalized());
        ctx.draw_bitmap(&self.bitmap, info.bounds, offset, 1.0);
    }
}
