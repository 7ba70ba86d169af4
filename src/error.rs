//! Error types for view tree and factory misuse.
//!
//! Nothing in the crate panics on misuse: operations that cannot proceed return
//! one of these errors and leave the tree unchanged.

use crate::view::ViewId;

/// Errors from view tree operations.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("view {0:?} does not exist")]
    UnknownView(ViewId),
    #[error("view {0:?} is not a container")]
    NotAContainer(ViewId),
    #[error("view {view:?} is not a child of {container:?}")]
    NotAChild { container: ViewId, view: ViewId },
    #[error("adding {view:?} to {container:?} would create a cycle")]
    WouldCreateCycle { container: ViewId, view: ViewId },
    #[error("view {0:?} has no control")]
    NoControl(ViewId),
    #[error("the root view cannot be detached or destroyed")]
    RootView,
    #[error("layout failed: {0}")]
    Layout(#[from] taffy::TaffyError),
}

/// Errors from [`ViewFactory::create`](crate::uidesc::ViewFactory::create).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FactoryError {
    #[error("no creator registered for class {0:?}")]
    UnknownClass(String),
    #[error("creator for class {0:?} rejected the attributes")]
    CreatorFailed(String),
}
