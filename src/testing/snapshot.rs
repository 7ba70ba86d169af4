//! Snapshot rendering helpers.
//!
//! Turn recorded draw commands into stable plain text, one command per line,
//! for snapshot assertions.

use crate::draw::{DrawStyle, PathDrawMode};
use crate::geometry::Rect;

use super::recording::DrawCommand;

fn rect_text(r: Rect) -> String {
    format!("{},{} {}x{}", r.left, r.top, r.width(), r.height())
}

fn style_text(style: DrawStyle) -> &'static str {
    match style {
        DrawStyle::Stroked => "stroked",
        DrawStyle::Filled => "filled",
        DrawStyle::FilledAndStroked => "filled+stroked",
    }
}

fn mode_text(mode: PathDrawMode) -> &'static str {
    match mode {
        PathDrawMode::Filled => "filled",
        PathDrawMode::FilledEvenOdd => "even-odd",
        PathDrawMode::Stroked => "stroked",
    }
}

fn command_text(command: &DrawCommand) -> String {
    match command {
        DrawCommand::Rect { rect, style, color } => {
            format!("rect {} {} {}", style_text(*style), color, rect_text(*rect))
        }
        DrawCommand::Ellipse { rect, style, color } => {
            format!("ellipse {} {} {}", style_text(*style), color, rect_text(*rect))
        }
        DrawCommand::Line { from, to, color, width } => {
            format!("line {} {},{} -> {},{} w{}", color, from.x, from.y, to.x, to.y, width)
        }
        DrawCommand::Bitmap { name, dest, offset, alpha } => format!(
            "bitmap {} {} from {},{} a{}",
            name,
            rect_text(*dest),
            offset.x,
            offset.y,
            alpha
        ),
        DrawCommand::Path { bounds, mode, color } => {
            format!("path {} {} {}", mode_text(*mode), color, rect_text(*bounds))
        }
    }
}

/// One line per command. The final line has no trailing newline.
///
/// ```ignore
/// rect filled #FF0000FF 10,10 20x20
/// path stroked #0000FFFF 9,9 22x22
/// ```
pub fn commands_to_string(commands: &[DrawCommand]) -> String {
    commands.iter().map(command_text).collect::<Vec<_>>().join("\n")
}
