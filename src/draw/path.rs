//! Backend-neutral graphics path.

use crate::geometry::{Point, Rect};

/// One path segment or closed shape.
#[derive(Clone, Debug, PartialEq)]
pub enum PathElement {
    MoveTo(Point),
    LineTo(Point),
    Rect(Rect),
    Ellipse(Rect),
    Close,
}

/// A sequence of path elements in local coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphicsPath {
    elements: Vec<PathElement>,
}

impl GraphicsPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.elements.push(PathElement::MoveTo(p));
        self
    }

    pub fn line_to(&mut self, p: Point) -> &mut Self {
        self.elements.push(PathElement::LineTo(p));
        self
    }

    pub fn add_rect(&mut self, r: Rect) -> &mut Self {
        self.elements.push(PathElement::Rect(r));
        self
    }

    pub fn add_ellipse(&mut self, r: Rect) -> &mut Self {
        self.elements.push(PathElement::Ellipse(r));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.elements.push(PathElement::Close);
        self
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Smallest rect enclosing every element, or [`Rect::EMPTY`] for an empty path.
    pub fn bounding_box(&self) -> Rect {
        let mut bounds: Option<Rect> = None;
        for element in &self.elements {
            let r = match *element {
                PathElement::MoveTo(p) | PathElement::LineTo(p) => Rect::new(p.x, p.y, p.x, p.y),
                PathElement::Rect(r) | PathElement::Ellipse(r) => r,
                PathElement::Close => continue,
            };
            bounds = Some(match bounds {
                // Points have zero area, so grow edges directly instead of `union`.
                Some(b) => Rect::new(
                    b.left.min(r.left),
                    b.top.min(r.top),
                    b.right.max(r.right),
                    b.bottom.max(r.bottom),
                ),
                None => r,
            });
        }
        bounds.unwrap_or(Rect::EMPTY)
    }

    /// Copy of this path translated by `by`.
    pub fn translated(&self, by: Point) -> GraphicsPath {
        let elements = self
            .elements
            .iter()
            .map(|e| match *e {
                PathElement::MoveTo(p) => PathElement::MoveTo(p + by),
                PathElement::LineTo(p) => PathElement::LineTo(p + by),
                PathElement::Rect(r) => PathElement::Rect(r.translate(by)),
                PathElement::Ellipse(r) => PathElement::Ellipse(r.translate(by)),
                PathElement::Close => PathElement::Close,
            })
            .collect();
        GraphicsPath { elements }
    }
}
