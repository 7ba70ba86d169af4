//! Redraw bookkeeping: the dirty region accumulated between frame draws.

pub mod dirty;

pub use dirty::DirtyRegion;
