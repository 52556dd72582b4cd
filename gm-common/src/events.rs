//! Event types for the measurement event system
//!
//! Every state change of a measurement attempt is broadcast as a
//! [`MeasureEvent`] so that presentation layers and tests can observe the
//! pipeline without coupling to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Measurement attempt state
///
/// Progression: CAPTURING → DETECTING → CONFIRMING → SUBMITTING → COMPLETED | FAILED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttemptState {
    /// Camera/AR capture produced a value and photo
    Capturing,
    /// Object detection request in flight
    Detecting,
    /// Waiting on the user to accept or override the label
    Confirming,
    /// Multipart submission in flight
    Submitting,
    /// Backend accepted the measurement
    Completed,
    /// Cancelled by the user or rejected by the backend
    Failed,
}

impl AttemptState {
    /// Check if state is terminal (no further transitions)
    pub fn is_terminal(self) -> bool {
        matches!(self, AttemptState::Completed | AttemptState::Failed)
    }

    /// Legal successor states
    pub fn can_transition_to(self, next: AttemptState) -> bool {
        use AttemptState::*;
        matches!(
            (self, next),
            (Capturing, Detecting)
                | (Detecting, Confirming)
                | (Confirming, Submitting)
                | (Confirming, Failed)
                | (Submitting, Completed)
                | (Submitting, Failed)
        )
    }
}

impl std::fmt::Display for AttemptState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AttemptState::Capturing => "CAPTURING",
            AttemptState::Detecting => "DETECTING",
            AttemptState::Confirming => "CONFIRMING",
            AttemptState::Submitting => "SUBMITTING",
            AttemptState::Completed => "COMPLETED",
            AttemptState::Failed => "FAILED",
        };
        f.write_str(s)
    }
}

/// Measurement pipeline events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MeasureEvent {
    /// Attempt moved between states
    AttemptStateChanged {
        attempt_id: Uuid,
        old_state: AttemptState,
        new_state: AttemptState,
        timestamp: DateTime<Utc>,
    },

    /// Detector failed and the default label was substituted
    DetectionFallback {
        attempt_id: Uuid,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// Confirmation dialog shown to the user
    ConfirmationRequested {
        attempt_id: Uuid,
        suggested_label: String,
        confidence: f64,
        timestamp: DateTime<Utc>,
    },

    /// Backend accepted the measurement
    SubmissionCompleted {
        attempt_id: Uuid,
        measurement_id: String,
        timestamp: DateTime<Utc>,
    },

    /// Submission rejected or failed in transport
    SubmissionFailed {
        attempt_id: Uuid,
        message: String,
        timestamp: DateTime<Utc>,
    },
}

impl MeasureEvent {
    /// Attempt the event belongs to
    pub fn attempt_id(&self) -> Uuid {
        match self {
            MeasureEvent::AttemptStateChanged { attempt_id, .. }
            | MeasureEvent::DetectionFallback { attempt_id, .. }
            | MeasureEvent::ConfirmationRequested { attempt_id, .. }
            | MeasureEvent::SubmissionCompleted { attempt_id, .. }
            | MeasureEvent::SubmissionFailed { attempt_id, .. } => *attempt_id,
        }
    }
}

/// Broadcast bus for [`MeasureEvent`]s
///
/// Cloning shares the underlying channel.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<MeasureEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of events to buffer before dropping old events
    ///
    /// # Examples
    ///
    /// ```
    /// use gm_common::events::EventBus;
    ///
    /// let event_bus = EventBus::new(100);
    /// assert_eq!(event_bus.capacity(), 100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<MeasureEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Err` if no subscribers are listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: MeasureEvent,
    ) -> Result<usize, broadcast::error::SendError<MeasureEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: MeasureEvent) {
        let _ = self.tx.send(event);
    }

    /// Get the current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Get the configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
