//! Tracing initialization tests
//!
//! Kept in its own test binary: the global subscriber can only be set once
//! per process.

use gm_common::config::LoggingConfig;
use gm_common::logging::init_tracing;

#[test]
fn test_init_tracing_to_file_then_reject_second_init() {
    std::env::remove_var("RUST_LOG");
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("gm.log");

    let config = LoggingConfig {
        level: "debug".to_string(),
        file: Some(log_path.clone()),
    };

    init_tracing(&config).unwrap();
    tracing::info!("tracing initialized for test");
    assert!(log_path.exists());

    let second = init_tracing(&LoggingConfig::default());
    assert!(matches!(second, Err(gm_common::Error::Config(_))));
}
