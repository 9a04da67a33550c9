//! Event channel for timeline state changes.
//!
//! Events are emitted when the cursor moves or the keyframe sequence is
//! edited, and handled by the hosting application to trigger side
//! effects (UI refresh, autosave, scrub widgets).

use crossbeam_channel::Sender;

/// Events emitted by `Timeline` on successful state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineEvent {
    /// Cursor position changed. `old` is `None` when the timeline was
    /// empty before the change (and `new` when it became empty).
    CursorMoved {
        old: Option<usize>,
        new: Option<usize>,
    },

    /// A keyframe was inserted at `index`.
    FrameInserted { index: usize },

    /// The keyframe at `index` was removed.
    FrameDeleted { index: usize },

    /// The keyframe at `index` was overwritten in place.
    FrameReplaced { index: usize },
}

/// Event sender handle held by a `Timeline`.
///
/// Cloneable; silent when no receiver is attached.
#[derive(Clone, Debug, Default)]
pub struct TimelineEventSender {
    sender: Option<Sender<TimelineEvent>>,
}

impl TimelineEventSender {
    /// Create event sender (connected to channel)
    pub fn new(sender: Sender<TimelineEvent>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// Create dummy sender (for tests or when events not needed)
    pub fn dummy() -> Self {
        Self { sender: None }
    }

    /// Emit event (silent if no receiver)
    pub fn emit(&self, event: TimelineEvent) {
        if let Some(ref tx) = self.sender {
            let _ = tx.send(event); // Ignore send errors (receiver might be dropped)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_emit_reaches_receiver() {
        let (tx, rx) = unbounded();
        let sender = TimelineEventSender::new(tx);

        sender.emit(TimelineEvent::FrameInserted { index: 0 });

        assert_eq!(rx.try_recv(), Ok(TimelineEvent::FrameInserted { index: 0 }));
    }

    #[test]
    fn test_dummy_is_silent() {
        // Must not panic or block
        TimelineEventSender::dummy().emit(TimelineEvent::CursorMoved {
            old: None,
            new: Some(0),
        });
    }

    #[test]
    fn test_dropped_receiver_ignored() {
        let (tx, rx) = unbounded();
        let sender = TimelineEventSender::new(tx);
        drop(rx);

        // Send error is swallowed
        sender.emit(TimelineEvent::FrameDeleted { index: 3 });
    }
}
