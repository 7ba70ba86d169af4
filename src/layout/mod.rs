//! Row/column layout for containers.
//!
//! A container carrying a [`RowColumnLayout`] stacks its children one after the
//! other, in child order, with a fixed spacing and an inner margin. Positions
//! are computed by taffy's flexbox: children keep their main-axis size (no
//! shrinking or growing) and are placed on the cross axis according to
//! [`Alignment`].

use taffy::geometry::{Rect as Edges, Size};
use taffy::prelude::{
    AlignItems, AvailableSpace, Dimension, Display, FlexDirection, FromLength, LengthPercentage,
    Style, TaffyAuto, TaffyTree,
};

use crate::error::ViewError;
use crate::geometry::Rect;
use crate::view::ViewId;

/// Which way children are stacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutDirection {
    /// One child per row, top to bottom.
    #[default]
    Rows,
    /// One child per column, left to right.
    Columns,
}

/// Cross-axis placement of children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    #[default]
    TopLeft,
    Center,
    BottomRight,
    /// Fill the container's inner cross size.
    Stretch,
}

impl Alignment {
    fn to_taffy(self) -> AlignItems {
        match self {
            Alignment::TopLeft => AlignItems::FlexStart,
            Alignment::Center => AlignItems::Center,
            Alignment::BottomRight => AlignItems::FlexEnd,
            Alignment::Stretch => AlignItems::Stretch,
        }
    }
}

/// Inner margin between the container edge and its children.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margin {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Margin {
    pub const ZERO: Margin = Margin { left: 0.0, top: 0.0, right: 0.0, bottom: 0.0 };

    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }

    /// The same margin on every side.
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    fn to_taffy(self) -> Edges<LengthPercentage> {
        Edges {
            left: LengthPercentage::from_length(self.left as f32),
            right: LengthPercentage::from_length(self.right as f32),
            top: LengthPercentage::from_length(self.top as f32),
            bottom: LengthPercentage::from_length(self.bottom as f32),
        }
    }
}

// ---------------------------------------------------------------------------
// RowColumnLayout
// ---------------------------------------------------------------------------

/// Layout settings of a row/column container.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowColumnLayout {
    pub direction: LayoutDirection,
    /// Gap between neighbouring children.
    pub spacing: f64,
    pub margin: Margin,
    pub alignment: Alignment,
    /// When set, children move to their new frames through a linear size
    /// animation of this many milliseconds.
    pub animate_resize: Option<u32>,
}

/// Name of the animation used for animated layout changes.
pub const RESIZE_ANIMATION: &str = "row-column-resize";

impl RowColumnLayout {
    /// Children stacked top to bottom.
    pub fn rows() -> Self {
        Self::default()
    }

    /// Children stacked left to right.
    pub fn columns() -> Self {
        Self { direction: LayoutDirection::Columns, ..Self::default() }
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing.max(0.0);
        self
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Animate children to their new frames over `ms` milliseconds (builder).
    /// Zero turns animation off.
    pub fn with_resize_animation(mut self, ms: u32) -> Self {
        self.animate_resize = (ms > 0).then_some(ms);
        self
    }

    fn container_style(&self, width: f64, height: f64) -> Style {
        let gap = LengthPercentage::from_length(self.spacing as f32);
        Style {
            display: Display::Flex,
            flex_direction: match self.direction {
                LayoutDirection::Rows => FlexDirection::Column,
                LayoutDirection::Columns => FlexDirection::Row,
            },
            size: Size {
                width: Dimension::from_length(width as f32),
                height: Dimension::from_length(height as f32),
            },
            padding: self.margin.to_taffy(),
            gap: Size { width: gap, height: gap },
            align_items: Some(self.alignment.to_taffy()),
            ..Style::default()
        }
    }

    fn child_style(&self, rect: Rect) -> Style {
        let width = Dimension::from_length(rect.width() as f32);
        let height = Dimension::from_length(rect.height() as f32);
        let stretch = self.alignment == Alignment::Stretch;
        let size = match self.direction {
            LayoutDirection::Rows if stretch => Size { width: Dimension::AUTO, height },
            LayoutDirection::Columns if stretch => Size { width, height: Dimension::AUTO },
            _ => Size { width, height },
        };
        Style {
            size,
            flex_shrink: 0.0,
            flex_grow: 0.0,
            ..Style::default()
        }
    }

    /// Compute new frames for `children` (frame rects in the container's local
    /// space) inside a container of the given size.
    ///
    /// Frames are returned in child order.
    pub fn compute(
        &self,
        container: Rect,
        children: &[(ViewId, Rect)],
    ) -> Result<Vec<(ViewId, Rect)>, ViewError> {
        let mut taffy: TaffyTree<()> = TaffyTree::new();
        taffy.disable_rounding();

        let leaves = children
            .iter()
            .map(|&(_, rect)| taffy.new_leaf(self.child_style(rect)))
            .collect::<Result<Vec<_>, _>>()?;
        let root = taffy.new_with_children(
            self.container_style(container.width(), container.height()),
            &leaves,
        )?;
        taffy.compute_layout(
            root,
            Size {
                width: AvailableSpace::Definite(container.width() as f32),
                height: AvailableSpace::Definite(container.height() as f32),
            },
        )?;

        let mut frames = Vec::with_capacity(children.len());
        for (&(id, _), &leaf) in children.iter().zip(&leaves) {
            let layout = taffy.layout(leaf)?;
            frames.push((
                id,
                Rect::from_xywh(
                    f64::from(layout.location.x),
                    f64::from(layout.location.y),
                    f64::from(layout.size.width),
                    f64::from(layout.size.height),
                ),
            ));
        }
        tracing::trace!(children = frames.len(), direction = ?self.direction, "row/column layout");
        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use slotmap::SlotMap;

    use super::*;

    fn ids(n: usize) -> Vec<ViewId> {
        let mut map: SlotMap<ViewId, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    fn rects(frames: &[(ViewId, Rect)]) -> Vec<Rect> {
        frames.iter().map(|&(_, r)| r).collect()
    }

    #[test]
    fn rows_stack_top_to_bottom_with_spacing_and_margin() {
        let ids = ids(2);
        let layout = RowColumnLayout::rows()
            .with_spacing(5.0)
            .with_margin(Margin::uniform(10.0));
        let frames = layout
            .compute(
                Rect::from_size(100.0, 200.0),
                &[(ids[0], Rect::from_size(30.0, 20.0)), (ids[1], Rect::from_size(40.0, 10.0))],
            )
            .unwrap();
        assert_eq!(
            rects(&frames),
            vec![
                Rect::from_xywh(10.0, 10.0, 30.0, 20.0),
                Rect::from_xywh(10.0, 35.0, 40.0, 10.0),
            ]
        );
        assert_eq!(frames[1].0, ids[1]);
    }

    #[test]
    fn columns_stack_left_to_right() {
        let ids = ids(3);
        let frames = RowColumnLayout::columns()
            .with_spacing(2.0)
            .compute(
                Rect::from_xywh(50.0, 50.0, 100.0, 20.0),
                &[
                    (ids[0], Rect::from_size(10.0, 10.0)),
                    (ids[1], Rect::from_xywh(70.0, 5.0, 20.0, 10.0)),
                    (ids[2], Rect::from_size(5.0, 10.0)),
                ],
            )
            .unwrap();
        assert_eq!(
            rects(&frames),
            vec![
                Rect::from_xywh(0.0, 0.0, 10.0, 10.0),
                Rect::from_xywh(12.0, 0.0, 20.0, 10.0),
                Rect::from_xywh(34.0, 0.0, 5.0, 10.0),
            ]
        );
    }

    #[test]
    fn children_do_not_shrink() {
        let ids = ids(2);
        let frames = RowColumnLayout::columns()
            .compute(
                Rect::from_size(50.0, 10.0),
                &[(ids[0], Rect::from_size(40.0, 10.0)), (ids[1], Rect::from_size(40.0, 10.0))],
            )
            .unwrap();
        assert_eq!(frames[1].1, Rect::from_xywh(40.0, 0.0, 40.0, 10.0));
    }

    #[test]
    fn cross_axis_alignment() {
        let ids = ids(1);
        let child = [(ids[0], Rect::from_size(20.0, 10.0))];
        let container = Rect::from_size(100.0, 50.0);

        let center = RowColumnLayout::rows().with_alignment(Alignment::Center);
        assert_eq!(center.compute(container, &child).unwrap()[0].1, Rect::from_xywh(40.0, 0.0, 20.0, 10.0));

        let end = RowColumnLayout::rows().with_alignment(Alignment::BottomRight);
        assert_eq!(end.compute(container, &child).unwrap()[0].1, Rect::from_xywh(80.0, 0.0, 20.0, 10.0));

        let stretch = RowColumnLayout::rows()
            .with_alignment(Alignment::Stretch)
            .with_margin(Margin::new(5.0, 0.0, 5.0, 0.0));
        assert_eq!(stretch.compute(container, &child).unwrap()[0].1, Rect::from_xywh(5.0, 0.0, 90.0, 10.0));
    }

    #[test]
    fn zero_resize_animation_is_off() {
        assert_eq!(RowColumnLayout::rows().with_resize_animation(0).animate_resize, None);
        assert_eq!(RowColumnLayout::rows().with_resize_animation(200).animate_resize, Some(200));
    }

    #[test]
    fn no_children() {
        let frames = RowColumnLayout::rows().compute(Rect::from_size(10.0, 10.0), &[]).unwrap();
        assert!(frames.is_empty());
    }
}
