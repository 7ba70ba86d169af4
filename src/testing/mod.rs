//! Headless testing framework: Pilot, recording context, snapshot helpers.
//!
//! Use the [`Pilot`] to programmatically drive a [`Frame`](crate::frame::Frame)
//! without a real window. Draw into a [`RecordingContext`] to see what was
//! painted, and [`commands_to_string`] to turn that into plain text for
//! snapshot-style assertions.

pub mod pilot;
pub mod recording;
pub mod snapshot;

pub use pilot::Pilot;
pub use recording::{DrawCommand, RecordingContext};
pub use snapshot::commands_to_string;
