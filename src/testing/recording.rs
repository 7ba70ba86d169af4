//! A headless [`DrawContext`] that records what was drawn.

use crate::color::Color;
use crate::draw::{Bitmap, DrawContext, DrawState, DrawStyle, GraphicsPath, PathDrawMode};
use crate::geometry::{Point, Rect};

/// One recorded drawing call, in device coordinates.
///
/// Colors already carry the global alpha in effect when they were drawn.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// `color` is the fill color, or the frame color for [`DrawStyle::Stroked`].
    Rect { rect: Rect, style: DrawStyle, color: Color },
    Ellipse { rect: Rect, style: DrawStyle, color: Color },
    Line { from: Point, to: Point, color: Color, width: f64 },
    Bitmap { name: String, dest: Rect, offset: Point, alpha: f32 },
    /// `bounds` is the path's bounding box.
    Path { bounds: Rect, mode: PathDrawMode, color: Color },
}

/// Records drawing calls instead of rasterizing them.
///
/// Calls whose device area lies entirely outside the current clip are
/// dropped, the way a real backend would paint nothing for them.
#[derive(Debug, Clone)]
pub struct RecordingContext {
    state: DrawState,
    stack: Vec<DrawState>,
    commands: Vec<DrawCommand>,
    paths: bool,
}

impl RecordingContext {
    /// A context for a `width` x `height` surface.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            state: DrawState::new(Rect::from_size(width, height)),
            stack: Vec::new(),
            commands: Vec::new(),
            paths: true,
        }
    }

    /// Pretend the backend cannot build paths (builder).
    pub fn without_paths(mut self) -> Self {
        self.paths = false;
        self
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the list empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    fn visible(&self, device: Rect) -> bool {
        self.state.clip.overlaps(device)
    }

    fn with_alpha(&self, color: Color) -> Color {
        let alpha = (f32::from(color.alpha) * self.state.global_alpha).round();
        color.with_alpha(alpha.max(0.0).min(255.0) as u8)
    }

    fn style_color(&self, style: DrawStyle) -> Color {
        match style {
            DrawStyle::Stroked => self.with_alpha(self.state.frame_color),
            DrawStyle::Filled | DrawStyle::FilledAndStroked => self.with_alpha(self.state.fill_color),
        }
    }
}

impl DrawContext for RecordingContext {
    fn state(&self) -> &DrawState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut DrawState {
        &mut self.state
    }

    fn save_state(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore_state(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn state_depth(&self) -> usize {
        self.stack.len()
    }

    fn draw_rect(&mut self, rect: Rect, style: DrawStyle) {
        let rect = self.to_device(rect.normalize());
        if self.visible(rect) {
            let color = self.style_color(style);
            self.commands.push(DrawCommand::Rect { rect, style, color });
        }
    }

    fn draw_ellipse(&mut self, rect: Rect, style: DrawStyle) {
        let rect = self.to_device(rect.normalize());
        if self.visible(rect) {
            let color = self.style_color(style);
            self.commands.push(DrawCommand::Ellipse { rect, style, color });
        }
    }

    fn draw_line(&mut self, from: Point, to: Point) {
        let offset = self.state.offset;
        let (from, to) = (from + offset, to + offset);
        let half = self.state.line_width.max(1.0) / 2.0;
        let area = Rect::new(from.x, from.y, to.x, to.y).normalize().extend(half, half);
        if self.visible(area) {
            let color = self.with_alpha(self.state.frame_color);
            let width = self.state.line_width;
            self.commands.push(DrawCommand::Line { from, to, color, width });
        }
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, dest: Rect, offset: Point, alpha: f32) {
        let dest = self.to_device(dest.normalize());
        if self.visible(dest) {
            self.commands.push(DrawCommand::Bitmap {
                name: bitmap.name.clone(),
                dest,
                offset,
                alpha: alpha * self.state.global_alpha,
            });
        }
    }

    fn create_path(&mut self) -> Option<GraphicsPath> {
        self.paths.then(GraphicsPath::new)
    }

    fn draw_path(&mut self, path: &GraphicsPath, mode: PathDrawMode) {
        let half = match mode {
            PathDrawMode::Stroked => self.state.line_width / 2.0,
            PathDrawMode::Filled | PathDrawMode::FilledEvenOdd => 0.0,
        };
        let bounds = self.to_device(path.bounding_box());
        if path.is_empty() || !self.visible(bounds.extend(half, half)) {
            return;
        }
        let color = match mode {
            PathDrawMode::Stroked => self.with_alpha(self.state.frame_color),
            PathDrawMode::Filled | PathDrawMode::FilledEvenOdd => self.with_alpha(self.state.fill_color),
        };
        self.commands.push(DrawCommand::Path { bounds, mode, color });
    }
}
