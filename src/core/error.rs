//! Error taxonomy for timeline operations and script IO.
//!
//! Navigation/interpolation bound violations surface as `Precondition`
//! instead of being left to caller discipline. A missing script file is
//! NOT an error (load yields an empty timeline); a malformed line is.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimelineError {
    /// Operation called in a cursor state that cannot satisfy it
    /// (advance past the last frame, interpolate without enough
    /// trailing context, ...).
    #[error("{op}: cursor precondition violated (cursor={cursor:?}, frames={count})")]
    Precondition {
        op: &'static str,
        cursor: Option<usize>,
        count: usize,
    },

    /// A persisted script line failed to decode. `line` is 1-based.
    #[error("bad keyframe at line {line}: {reason}")]
    Decode { line: usize, reason: String },

    /// Script file write failure (reads soft-fail to empty instead).
    #[error("script io error: {0}")]
    Io(#[from] std::io::Error),
}

impl TimelineError {
    pub(crate) fn precondition(op: &'static str, cursor: Option<usize>, count: usize) -> Self {
        Self::Precondition { op, cursor, count }
    }
}
