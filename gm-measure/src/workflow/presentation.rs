//! Presentation collaborators
//!
//! The pipeline never renders anything. The dialog, snack bar and router are
//! supplied by the caller through these traits, and [`ViewLiveness`] tells
//! the pipeline whether the screen that started an attempt still exists.

use crate::models::{ConfirmationOutcome, ConfirmationRequest, QuestionRouteArgs};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Modal confirmation of the detected object label
#[async_trait]
pub trait ConfirmationPrompt: Send + Sync {
    /// Resolves once the user accepts or dismisses the dialog
    async fn confirm(&self, request: ConfirmationRequest) -> ConfirmationOutcome;
}

/// User-visible error messages
pub trait Notifier: Send + Sync {
    fn show_error(&self, message: &str);
}

/// Route transitions out of the measurement screen
pub trait Navigator: Send + Sync {
    fn to_questions(&self, args: QuestionRouteArgs);
}

/// Shared "view is still mounted" flag
#[derive(Debug, Clone)]
pub struct ViewLiveness(Arc<AtomicBool>);

impl ViewLiveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Called by the view on teardown
    pub fn mark_disposed(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for ViewLiveness {
    fn default() -> Self {
        Self::new()
    }
}

/// Bundle of presentation collaborators for one screen
#[derive(Clone)]
pub struct Presentation {
    pub prompt: Arc<dyn ConfirmationPrompt>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
    pub liveness: ViewLiveness,
}
