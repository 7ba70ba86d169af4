//! View node types: ViewId, ViewNode.

use slotmap::new_key_type;

use crate::control::{Control, Interaction};
use crate::geometry::{Point, Rect};
use crate::layout::RowColumnLayout;

use super::content::{Drawable, Empty};

new_key_type! {
    /// Unique identifier for a view in the tree. Copy, lightweight (u64).
    pub struct ViewId;
}

/// Data associated with a single view.
///
/// A view is a rectangle in its parent's coordinate space. What it paints is
/// decided by its [`Drawable`] content; whether it carries a value is decided
/// by the optional [`Control`], and how input changes that value by the
/// optional [`Interaction`].
pub struct ViewNode {
    /// Frame rect in the parent's local coordinates.
    pub size: Rect,
    /// Hit area in the parent's coordinates; `None` means the frame rect.
    pub mouseable_area: Option<Rect>,
    pub visible: bool,
    pub mouse_enabled: bool,
    /// Pending redraw, picked up by the next frame draw.
    pub dirty: bool,
    /// Opacity multiplier applied to the view and its subtree.
    pub alpha: f32,
    /// Whether the view takes part in keyboard focus traversal.
    pub wants_focus: bool,
    /// Unhandled mouse input passes through to the views behind.
    pub transparent: bool,
    pub(crate) is_container: bool,
    /// Class name, as used by the view factory.
    pub class_name: String,
    pub(crate) content: Box<dyn Drawable>,
    pub(crate) control: Option<Control>,
    pub(crate) interaction: Option<Box<dyn Interaction>>,
    pub(crate) layout: Option<RowColumnLayout>,
}

impl ViewNode {
    /// A plain view with no content.
    pub fn new(size: Rect) -> Self {
        let size = if size.is_normalized() {
            size
        } else {
            tracing::warn!(?size, "view created with an inverted rect; normalizing");
            size.normalize()
        };
        Self {
            size,
            mouseable_area: None,
            visible: true,
            mouse_enabled: true,
            dirty: false,
            alpha: 1.0,
            wants_focus: false,
            transparent: false,
            is_container: false,
            class_name: "View".to_string(),
            content: Box::new(Empty),
            control: None,
            interaction: None,
            layout: None,
        }
    }

    /// A view that can hold children.
    pub fn container(size: Rect) -> Self {
        let mut node = Self::new(size);
        node.is_container = true;
        node.class_name = "ViewContainer".to_string();
        node
    }

    /// Set the content strategy (builder).
    pub fn with_content(mut self, content: impl Drawable + 'static) -> Self {
        self.content = Box::new(content);
        self
    }

    /// Attach a control and the interaction that drives it (builder).
    ///
    /// Controls want keyboard focus by default.
    pub fn with_control(mut self, control: Control, interaction: impl Interaction + 'static) -> Self {
        self.control = Some(control);
        self.interaction = Some(Box::new(interaction));
        self.wants_focus = true;
        self.class_name = "Control".to_string();
        self
    }

    /// Attach a control without any input handling (builder).
    pub fn with_passive_control(mut self, control: Control) -> Self {
        self.control = Some(control);
        self
    }

    /// Set the class name (builder).
    pub fn with_class_name(mut self, name: impl Into<String>) -> Self {
        self.class_name = name.into();
        self
    }

    /// Restrict the hit area (builder). Parent coordinates, like `size`.
    pub fn with_mouseable_area(mut self, area: Rect) -> Self {
        self.mouseable_area = Some(area.normalize());
        self
    }

    /// Set the opacity (builder).
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.max(0.0).min(1.0);
        self
    }

    /// Set whether the view takes focus (builder).
    pub fn focusable(mut self, wants_focus: bool) -> Self {
        self.wants_focus = wants_focus;
        self
    }

    /// Set the initial visibility (builder).
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Let unhandled clicks and wheel turns reach the views behind (builder).
    pub fn transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    /// Set whether the view receives mouse input (builder).
    pub fn mouse_enabled(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }

    /// Give a container a row/column layout (builder).
    pub fn with_layout(mut self, layout: RowColumnLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn is_container(&self) -> bool {
        self.is_container
    }

    pub fn control(&self) -> Option<&Control> {
        self.control.as_ref()
    }

    pub fn control_mut(&mut self) -> Option<&mut Control> {
        self.control.as_mut()
    }

    pub fn layout(&self) -> Option<&RowColumnLayout> {
        self.layout.as_ref()
    }

    /// The view's rect at the origin.
    pub fn local_bounds(&self) -> Rect {
        self.size.local_bounds()
    }

    /// Hit area in the parent's coordinates.
    pub fn hit_area(&self) -> Rect {
        self.mouseable_area.unwrap_or(self.size)
    }

    /// Whether `at` (parent coordinates) hits this view.
    ///
    /// The point must lie in the hit area; the content then gets the final
    /// say in local coordinates.
    pub fn hit_test(&self, at: Point) -> bool {
        if !self.hit_area().point_inside(at) {
            return false;
        }
        let local = at - self.size.origin();
        self.content.hit_test(local, self.local_bounds())
    }
}

impl std::fmt::Debug for ViewNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewNode")
            .field("class_name", &self.class_name)
            .field("size", &self.size)
            .field("visible", &self.visible)
            .field("alpha", &self.alpha)
            .field("is_container", &self.is_container)
            .field("control", &self.control)
            .finish()
    }
}
