//! KEYFRAMER - keyframe timeline library for interactive 3D posing
//!
//! Re-exports all modules for use by binary targets.

// Core engine (timeline, events, errors)
pub mod core;

// App modules
pub mod cli;
pub mod entities;

// Re-export commonly used types from core
pub use core::error::TimelineError;
pub use core::events::{TimelineEvent, TimelineEventSender};
pub use core::timeline::{KeyFrame, Timeline};

// Re-export entities
pub use entities::{Rbt, RigNode, RigPose, RigScene, Scene};
