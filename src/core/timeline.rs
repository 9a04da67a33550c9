//! Keyframe timeline: ordered pose sequence plus a cursor state machine.
//!
//! The cursor is a single owned index into a contiguous `Vec`; `None`
//! means the timeline is empty. The guarded operations
//! (`advance_current_frame`, `regress_current_frame`,
//! `delete_current_frame`) self-check and no-op at the boundaries; the
//! raw primitives (`advance`, `regress`, `interpolate`) are checked and
//! fail with `TimelineError::Precondition` instead.
//!
//! Persistence is line-oriented: one encoded keyframe per line, in
//! temporal order. A missing script file loads as an empty timeline
//! (soft-fail); a malformed line is a hard `Decode` error.

use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use super::error::TimelineError;
use super::events::{TimelineEvent, TimelineEventSender};
use crate::entities::scene::Scene;

/// Capabilities the timeline needs from a keyframe: 4-point spline
/// blending and a single-line text codec.
pub trait KeyFrame: Clone {
    /// Blend between `first` and `second`; `prev`/`after` shape the
    /// spline tangents. `alpha` = 0 favors `first`, 1 favors `second`.
    fn blend(prev: &Self, first: &Self, second: &Self, after: &Self, alpha: f32) -> Self;

    /// Encode to exactly one line of text, no embedded newline.
    fn encode(&self) -> String;

    /// Decode a line produced by `encode`. The error is a reason
    /// string; the load boundary attaches the line number.
    fn decode(line: &str) -> Result<Self, String>;
}

/// Ordered keyframe sequence with a movable cursor.
#[derive(Debug, Clone)]
pub struct Timeline<F: KeyFrame> {
    frames: Vec<F>,
    /// `None` iff `frames` is empty (checked invariant).
    cursor: Option<usize>,
    events: TimelineEventSender,
}

impl<F: KeyFrame> Default for Timeline<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: KeyFrame> Timeline<F> {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            cursor: None,
            events: TimelineEventSender::dummy(),
        }
    }

    /// Construct from an already-decoded sequence, cursor at frame 0.
    pub fn from_frames(frames: Vec<F>) -> Self {
        let cursor = if frames.is_empty() { None } else { Some(0) };
        Self {
            frames,
            cursor,
            events: TimelineEventSender::dummy(),
        }
    }

    /// Attach an event sender (dummy by default).
    pub fn set_event_sender(&mut self, sender: TimelineEventSender) {
        self.events = sender;
    }

    // === State queries ===

    /// Number of stored keyframes.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// True iff the cursor references a frame.
    pub fn is_defined(&self) -> bool {
        self.cursor.is_some()
    }

    /// Current cursor index, if any.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The frame under the cursor, if any.
    pub fn current_frame(&self) -> Option<&F> {
        self.cursor.map(|i| &self.frames[i])
    }

    /// True iff interpolation has enough trailing context: two frames
    /// after the current one (the segment target plus the outgoing
    /// tangent key).
    pub fn can_animate(&self) -> bool {
        matches!(self.cursor, Some(i) if i + 2 < self.frames.len())
    }

    // === Cursor movement ===

    /// Move the cursor and emit `CursorMoved`.
    fn set_cursor(&mut self, new: Option<usize>) {
        let old = self.cursor;
        if old != new {
            self.cursor = new;
            self.events.emit(TimelineEvent::CursorMoved { old, new });
        }
    }

    /// Step the cursor to the next frame. Fails at the last frame or
    /// when empty; `advance_current_frame` is the no-op-guarded variant.
    pub fn advance(&mut self) -> Result<(), TimelineError> {
        match self.cursor {
            Some(i) if i + 1 < self.frames.len() => {
                self.set_cursor(Some(i + 1));
                debug!("advancing to frame {}", i + 1);
                Ok(())
            }
            c => Err(TimelineError::precondition("advance", c, self.frames.len())),
        }
    }

    /// Step the cursor to the previous frame. Fails at frame 0 or when
    /// empty; `regress_current_frame` is the no-op-guarded variant.
    pub fn regress(&mut self) -> Result<(), TimelineError> {
        match self.cursor {
            Some(i) if i > 0 => {
                self.set_cursor(Some(i - 1));
                debug!("regressing to frame {}", i - 1);
                Ok(())
            }
            c => Err(TimelineError::precondition("regress", c, self.frames.len())),
        }
    }

    /// Reset the cursor to frame 0 unconditionally; render it if the
    /// timeline is non-empty.
    pub fn go_to_beginning(&mut self, scene: &mut impl Scene<F>) {
        if self.frames.is_empty() {
            self.set_cursor(None);
        } else {
            self.set_cursor(Some(0));
            scene.render_pose(&self.frames[0]);
        }
    }

    // === Mutation ===

    /// Push the cursor's frame to the scene. No-op when empty.
    pub fn show_current_frame(&self, scene: &mut impl Scene<F>) {
        if let Some(i) = self.cursor {
            scene.render_pose(&self.frames[i]);
        }
    }

    /// Overwrite the current frame with `captured` and render it.
    /// Replacing into an empty timeline creates the first frame.
    pub fn replace_current_frame(&mut self, captured: F, scene: &mut impl Scene<F>) {
        match self.cursor {
            Some(i) => {
                self.frames[i] = captured;
                self.events.emit(TimelineEvent::FrameReplaced { index: i });
                debug!("replaced frame {}", i);
                scene.render_pose(&self.frames[i]);
            }
            None => self.insert_after_current(captured, scene),
        }
    }

    /// Advance and render; no-op at the last frame or when empty.
    pub fn advance_current_frame(&mut self, scene: &mut impl Scene<F>) {
        if let Some(i) = self.cursor
            && i + 1 < self.frames.len()
        {
            self.set_cursor(Some(i + 1));
            debug!("advancing to frame {}", i + 1);
            scene.render_pose(&self.frames[i + 1]);
        }
    }

    /// Regress and render; no-op at frame 0 or when empty.
    pub fn regress_current_frame(&mut self, scene: &mut impl Scene<F>) {
        if let Some(i) = self.cursor
            && i > 0
        {
            self.set_cursor(Some(i - 1));
            debug!("regressing to frame {}", i - 1);
            scene.render_pose(&self.frames[i - 1]);
        }
    }

    /// Delete the frame under the cursor, then land on the frame before
    /// it, or on the new first frame when the deleted one was first.
    /// Deleting the sole frame empties the timeline. Renders the new
    /// current frame if any remain; no-op when empty.
    pub fn delete_current_frame(&mut self, scene: &mut impl Scene<F>) {
        let Some(i) = self.cursor else { return };

        // Fallback decided before removal: next frame when deleting the
        // first (it slides into index 0), previous frame otherwise
        let fallback = if i == 0 { 0 } else { i - 1 };

        self.frames.remove(i);
        self.events.emit(TimelineEvent::FrameDeleted { index: i });
        debug!("deleted frame {}, {} remain", i, self.frames.len());

        if self.frames.is_empty() {
            self.set_cursor(None);
            return;
        }
        self.set_cursor(Some(fallback));
        scene.render_pose(&self.frames[fallback]);
    }

    /// Insert `captured` immediately after the cursor and move the
    /// cursor onto it (sole frame when empty). Renders it.
    pub fn insert_after_current(&mut self, captured: F, scene: &mut impl Scene<F>) {
        let at = match self.cursor {
            Some(i) => i + 1,
            None => 0,
        };
        self.frames.insert(at, captured);
        self.events.emit(TimelineEvent::FrameInserted { index: at });
        self.set_cursor(Some(at));
        debug!("adding new frame ({})", at);
        scene.render_pose(&self.frames[at]);
    }

    // === Interpolation ===

    /// Render a blended pose between the current frame and the next,
    /// using the four surrounding control frames. The cursor does not
    /// move and the sequence is not mutated.
    ///
    /// Fails with `Precondition` unless `can_animate()`. At cursor 0
    /// the leading tangent key is endpoint-clamped to frame 0. `alpha`
    /// is clamped to `[0, 1]`.
    pub fn interpolate(&self, alpha: f32, scene: &mut impl Scene<F>) -> Result<(), TimelineError> {
        let i = match self.cursor {
            Some(i) if i + 2 < self.frames.len() => i,
            c => {
                return Err(TimelineError::precondition(
                    "interpolate",
                    c,
                    self.frames.len(),
                ));
            }
        };
        let alpha = alpha.clamp(0.0, 1.0);

        let prev = &self.frames[i.saturating_sub(1)];
        let blended = F::blend(
            prev,
            &self.frames[i],
            &self.frames[i + 1],
            &self.frames[i + 2],
            alpha,
        );
        scene.render_pose(&blended);
        Ok(())
    }

    // === Persistence ===

    /// Load a script: one keyframe per line, cursor at frame 0.
    ///
    /// An absent or unreadable file yields an empty timeline with a
    /// logged notice, not an error. A malformed line is fatal.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TimelineError> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!("no script file at {}: {e}", path.display());
                return Ok(Self::new());
            }
        };

        let mut frames = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let frame = F::decode(line).map_err(|reason| TimelineError::Decode {
                line: idx + 1,
                reason,
            })?;
            frames.push(frame);
        }

        info!("loaded {} keyframes from {}", frames.len(), path.display());
        Ok(Self::from_frames(frames))
    }

    /// Write every keyframe, one line each, in temporal order with a
    /// trailing newline. The cursor is untouched.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TimelineError> {
        let path = path.as_ref();
        let mut out = String::new();
        for frame in &self.frames {
            out.push_str(&frame.encode());
            out.push('\n');
        }
        fs::write(path, out)?;
        info!("saved {} keyframes to {}", self.frames.len(), path.display());
        Ok(())
    }
}
