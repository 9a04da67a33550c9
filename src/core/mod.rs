//! Core engine modules - timeline state machine, events, errors
//!
//! These modules form the keyframe engine, independent of any host UI.

pub mod error;
pub mod events;
pub mod timeline;

// Re-exports for convenience
pub use error::TimelineError;
pub use events::{TimelineEvent, TimelineEventSender};
pub use timeline::{KeyFrame, Timeline};
