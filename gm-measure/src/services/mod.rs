//! Backend HTTP clients
//!
//! - [`HttpObjectDetector`]: `POST /api/detect-object`
//! - [`MeasurementClient`]: `POST /api/measurements`

pub mod detection_client;
pub mod measurement_client;

pub use detection_client::{HttpObjectDetector, ObjectDetector, DETECT_OBJECT_PATH};
pub use measurement_client::{MeasurementClient, MEASUREMENTS_PATH};

use reqwest::multipart::Part;
use std::io;
use std::path::Path;

const USER_AGENT: &str = concat!("Ganithamithura/", env!("CARGO_PKG_VERSION"));

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("heic") => "image/heic",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Read a photo into a multipart file part
pub(crate) async fn photo_part(path: &Path) -> io::Result<Part> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo.jpg".to_string());

    Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime_for(path))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

/// Join a base URL and an absolute path without doubling the slash
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
