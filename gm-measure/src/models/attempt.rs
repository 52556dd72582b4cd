//! Measurement attempt state machine
//!
//! An attempt progresses through:
//! CAPTURING → DETECTING → CONFIRMING → SUBMITTING → COMPLETED | FAILED
//!
//! CONFIRMING may also go straight to FAILED when the user cancels.
//! COMPLETED and FAILED are terminal; a retry is a new attempt.

use crate::error::PipelineError;
use crate::models::QuestionRouteArgs;
use chrono::{DateTime, Utc};
use gm_common::AttemptState;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// State transition record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    pub attempt_id: Uuid,
    pub old_state: AttemptState,
    pub new_state: AttemptState,
    pub transitioned_at: DateTime<Utc>,
}

/// Why an attempt ended in FAILED
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FailureReason {
    /// User dismissed the confirmation dialog (not an error)
    Cancelled,
    /// Backend rejected the measurement or the request failed
    Submission(String),
}

/// Per-attempt state (in-memory only, discarded after the attempt ends)
#[derive(Debug, Clone, Serialize)]
pub struct AttemptSession {
    pub attempt_id: Uuid,
    pub state: AttemptState,
    pub transitions: Vec<StateTransition>,
    pub failure: Option<FailureReason>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl AttemptSession {
    /// Fresh session in CAPTURING
    pub fn new(attempt_id: Uuid) -> Self {
        Self {
            attempt_id,
            state: AttemptState::Capturing,
            transitions: Vec::new(),
            failure: None,
            started_at: Utc::now(),
            ended_at: None,
        }
    }

    /// Move to `new_state`, rejecting transitions the state machine does not allow
    pub fn transition_to(&mut self, new_state: AttemptState) -> Result<StateTransition, PipelineError> {
        if !self.state.can_transition_to(new_state) {
            return Err(PipelineError::IllegalTransition {
                from: self.state,
                to: new_state,
            });
        }

        let transition = StateTransition {
            attempt_id: self.attempt_id,
            old_state: self.state,
            new_state,
            transitioned_at: Utc::now(),
        };
        self.state = new_state;
        self.transitions.push(transition.clone());

        if new_state.is_terminal() {
            self.ended_at = Some(transition.transitioned_at);
        }

        Ok(transition)
    }

    /// Move to FAILED and remember why
    pub fn fail(&mut self, reason: FailureReason) -> Result<StateTransition, PipelineError> {
        let transition = self.transition_to(AttemptState::Failed)?;
        self.failure = Some(reason);
        Ok(transition)
    }

    /// States visited so far, starting with CAPTURING
    pub fn state_history(&self) -> Vec<AttemptState> {
        std::iter::once(AttemptState::Capturing)
            .chain(self.transitions.iter().map(|t| t.new_state))
            .collect()
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}

/// How an attempt ended
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    /// Backend accepted; these arguments were handed to the questions route
    Completed(QuestionRouteArgs),
    /// User cancelled at confirmation; nothing was submitted
    Cancelled,
    /// Submission failed; `message` is what the user was shown
    Failed { message: String },
}

/// Final session plus outcome, returned by the pipeline
#[derive(Debug, Clone)]
pub struct AttemptReport {
    pub session: AttemptSession,
    pub outcome: AttemptOutcome,
}
