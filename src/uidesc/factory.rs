//! Class-name registry of view creators.

use std::collections::HashMap;

use crate::error::FactoryError;
use crate::view::ViewNode;

use super::AttributeBag;

/// Builds a view from its attributes, or `None` when it cannot.
pub type ViewCreator = Box<dyn Fn(&AttributeBag) -> Option<ViewNode>>;

/// Maps class names to view creators.
///
/// # Examples
///
/// ```ignore
/// let mut factory = ViewFactory::new();
/// factory.register("Panel", |_| Some(ViewNode::container(Rect::from_size(100.0, 100.0))));
/// let panel = factory.create("Panel", &AttributeBag::new())?;
/// ```
#[derive(Default)]
pub struct ViewFactory {
    creators: HashMap<String, ViewCreator>,
}

impl ViewFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `creator` for `class`, replacing any previous one. Returns
    /// true when a creator was replaced.
    pub fn register(
        &mut self,
        class: impl Into<String>,
        creator: impl Fn(&AttributeBag) -> Option<ViewNode> + 'static,
    ) -> bool {
        let class = class.into();
        tracing::debug!(class = %class, "view creator registered");
        self.creators.insert(class, Box::new(creator)).is_some()
    }

    pub fn unregister(&mut self, class: &str) -> bool {
        self.creators.remove(class).is_some()
    }

    pub fn is_registered(&self, class: &str) -> bool {
        self.creators.contains_key(class)
    }

    /// Registered class names, sorted.
    pub fn classes(&self) -> Vec<&str> {
        let mut classes: Vec<&str> = self.creators.keys().map(String::as_str).collect();
        classes.sort_unstable();
        classes
    }

    /// Construct a view of `class`. The view's class name is set to `class`.
    pub fn create(&self, class: &str, attributes: &AttributeBag) -> Result<ViewNode, FactoryError> {
        let Some(creator) = self.creators.get(class) else {
            tracing::warn!(class, "no creator for view class");
            return Err(FactoryError::UnknownClass(class.to_string()));
        };
        let Some(mut node) = creator(attributes) else {
            tracing::warn!(class, attributes = attributes.len(), "view creator failed");
            return Err(FactoryError::CreatorFailed(class.to_string()));
        };
        node.class_name = class.to_string();
        Ok(node)
    }
}

impl std::fmt::Debug for ViewFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewFactory").field("classes", &self.classes()).finish()
    }
}
