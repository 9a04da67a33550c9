//! Entities module - collaborator types around the timeline core
//!
//! The timeline treats these as boundaries: `RigPose` is the opaque
//! keyframe payload, `Scene` is the render surface, `Rbt` the per-node
//! transform math both are built on.

pub mod pose;
pub mod rbt;
pub mod scene;

pub use pose::RigPose;
pub use rbt::Rbt;
pub use scene::{RigNode, RigScene, Scene};
