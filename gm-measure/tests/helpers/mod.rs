//! Test Helper Utilities
//!
//! Shared utilities for testing gm-measure

#![allow(dead_code)]

pub mod doubles;
pub mod fake_backend;

pub use doubles::{RecordingNavigator, RecordingNotifier, ScriptedPrompt, StubDetector, TestView, UserChoice};
pub use fake_backend::{FakeBackend, RecordedUpload};

use std::path::PathBuf;
use tempfile::TempDir;

/// Write a small fake JPEG into a temp dir and return its path
pub fn photo_fixture(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    // JPEG SOI/EOI markers around a few bytes of payload
    std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0xFF, 0xD9]).unwrap();
    path
}

/// Port that was bound then released, so nothing is listening on it
pub fn unused_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}
