//! Render boundary between the timeline and the live scene.
//!
//! The timeline never touches scene internals; it captures poses from
//! and pushes poses to whatever implements `Scene`. `RigScene` is the
//! headless implementation used by the CLI and tests.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::pose::RigPose;
use super::rbt::Rbt;

/// What the timeline needs from the live scene: snapshot the current
/// pose, and display a pose.
pub trait Scene<F> {
    fn capture_pose(&self) -> F;
    fn render_pose(&mut self, pose: &F);
}

/// One posable node of a `RigScene`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigNode {
    pub name: String,
    pub rbt: Rbt,
}

/// Flat set of posable nodes; the minimal scene a keyframe script can
/// drive without a renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RigScene {
    pub nodes: Vec<RigNode>,
}

impl RigScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node at the identity transform.
    pub fn add_node(&mut self, name: impl Into<String>) -> &mut Self {
        self.nodes.push(RigNode {
            name: name.into(),
            rbt: Rbt::IDENTITY,
        });
        self
    }

    /// Set a node's transform by name. Returns false if no such node.
    pub fn set_node(&mut self, name: &str, t: Vec3, r: Quat) -> bool {
        match self.nodes.iter_mut().find(|n| n.name == name) {
            Some(node) => {
                node.rbt = Rbt::new(t, r);
                true
            }
            None => false,
        }
    }

    pub fn node(&self, name: &str) -> Option<&Rbt> {
        self.nodes.iter().find(|n| n.name == name).map(|n| &n.rbt)
    }
}

impl Scene<RigPose> for RigScene {
    fn capture_pose(&self) -> RigPose {
        RigPose::new(self.nodes.iter().map(|n| n.rbt).collect())
    }

    /// Push a pose into the nodes, in node order. Extra pose entries
    /// are ignored; missing ones leave trailing nodes untouched.
    fn render_pose(&mut self, pose: &RigPose) {
        if pose.nodes.len() != self.nodes.len() {
            log::warn!(
                "pose has {} transforms for {} scene nodes",
                pose.nodes.len(),
                self.nodes.len()
            );
        }
        for (node, rbt) in self.nodes.iter_mut().zip(pose.nodes.iter()) {
            node.rbt = *rbt;
        }
    }
}
