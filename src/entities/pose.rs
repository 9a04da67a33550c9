//! `RigPose`: the concrete keyframe type.
//!
//! A pose is the ordered list of per-node rigid-body transforms
//! captured from a scene. Poses persist as one JSON line each, so a
//! script file is plain JSON-lines in temporal order.

use serde::{Deserialize, Serialize};

use super::rbt::Rbt;
use crate::core::timeline::KeyFrame;

/// One saved pose of every posable node, in scene node order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RigPose {
    pub nodes: Vec<Rbt>,
}

impl RigPose {
    pub fn new(nodes: Vec<Rbt>) -> Self {
        Self { nodes }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl KeyFrame for RigPose {
    /// Node-wise Catmull-Rom blend over the four control poses.
    ///
    /// The four poses are expected to share a node layout; if counts
    /// disagree (mixed-rig script), the common prefix is blended.
    fn blend(prev: &Self, first: &Self, second: &Self, after: &Self, alpha: f32) -> Self {
        let n = first
            .nodes
            .len()
            .min(second.nodes.len())
            .min(prev.nodes.len())
            .min(after.nodes.len());
        if n < first.nodes.len() {
            log::warn!(
                "blending poses with mismatched node counts ({}/{}/{}/{}), truncating to {}",
                prev.nodes.len(),
                first.nodes.len(),
                second.nodes.len(),
                after.nodes.len(),
                n
            );
        }

        let nodes = (0..n)
            .map(|i| {
                Rbt::spline(
                    &prev.nodes[i],
                    &first.nodes[i],
                    &second.nodes[i],
                    &after.nodes[i],
                    alpha,
                )
            })
            .collect();
        Self { nodes }
    }

    fn encode(&self) -> String {
        // serde_json never fails on this shape (no maps with non-string
        // keys, no non-finite rejection at struct level)
        serde_json::to_string(self).unwrap_or_else(|e| {
            log::error!("pose encode failed: {e}");
            String::from("{\"nodes\":[]}")
        })
    }

    fn decode(line: &str) -> Result<Self, String> {
        serde_json::from_str(line).map_err(|e| e.to_string())
    }
}
