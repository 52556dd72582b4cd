//! Test doubles for the detector and presentation collaborators

use async_trait::async_trait;
use gm_measure::{
    ConfirmationOutcome, ConfirmationPrompt, ConfirmationRequest, DetectionError, DetectionResult,
    Navigator, Notifier, ObjectDetector, Presentation, QuestionRouteArgs, ViewLiveness,
};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Detector with a fixed answer
pub struct StubDetector {
    answer: Result<DetectionResult, String>,
    calls: AtomicUsize,
}

impl StubDetector {
    pub fn found(label: &str, confidence: f64) -> Arc<Self> {
        Arc::new(Self {
            answer: Ok(DetectionResult::new(label, confidence)),
            calls: AtomicUsize::new(0),
        })
    }

    /// Every call fails with a network error
    pub fn unreachable(message: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectDetector for StubDetector {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn detect(&self, _photo: &Path) -> Result<DetectionResult, DetectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer
            .clone()
            .map_err(DetectionError::NetworkError)
    }
}

/// What the scripted user does at the dialog
#[derive(Debug, Clone)]
pub enum UserChoice {
    AcceptSuggestion,
    Override(String),
    Cancel,
}

/// Confirmation dialog that answers from a script and records what it was shown
pub struct ScriptedPrompt {
    choice: UserChoice,
    shown: Mutex<Vec<ConfirmationRequest>>,
}

impl ScriptedPrompt {
    pub fn new(choice: UserChoice) -> Arc<Self> {
        Arc::new(Self {
            choice,
            shown: Mutex::new(Vec::new()),
        })
    }

    pub fn shown(&self) -> Vec<ConfirmationRequest> {
        self.shown.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConfirmationPrompt for ScriptedPrompt {
    async fn confirm(&self, request: ConfirmationRequest) -> ConfirmationOutcome {
        let outcome = match &self.choice {
            UserChoice::AcceptSuggestion => ConfirmationOutcome::accepted(request.suggested_label.clone()),
            UserChoice::Override(label) => ConfirmationOutcome::accepted(label.clone()),
            UserChoice::Cancel => ConfirmationOutcome::Cancelled,
        };
        self.shown.lock().unwrap().push(request);
        outcome
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn show_error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<QuestionRouteArgs>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<QuestionRouteArgs> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn to_questions(&self, args: QuestionRouteArgs) {
        self.routes.lock().unwrap().push(args);
    }
}

/// Presentation doubles plus handles to inspect them afterwards
pub struct TestView {
    pub prompt: Arc<ScriptedPrompt>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<RecordingNavigator>,
    pub liveness: ViewLiveness,
}

impl TestView {
    pub fn new(choice: UserChoice) -> Self {
        Self {
            prompt: ScriptedPrompt::new(choice),
            notifier: Arc::new(RecordingNotifier::default()),
            navigator: Arc::new(RecordingNavigator::default()),
            liveness: ViewLiveness::new(),
        }
    }

    pub fn presentation(&self) -> Presentation {
        Presentation {
            prompt: self.prompt.clone(),
            notifier: self.notifier.clone(),
            navigator: self.navigator.clone(),
            liveness: self.liveness.clone(),
        }
    }
}
