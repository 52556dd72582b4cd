//! # Ganithamithura Common Library
//!
//! Shared code for the Ganithamithura measurement crates including:
//! - Error types
//! - Attempt state and event types (MeasureEvent, EventBus)
//! - Configuration loading and backend endpoint resolution
//! - Tracing initialization
//! - Timestamp and session id helpers

pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod time;

pub use error::{Error, Result};
pub use events::{AttemptState, EventBus, MeasureEvent};
