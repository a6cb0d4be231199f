//! Error types

use thiserror::Error;

/// Errors raised around rendering
///
/// Scanning and tokenizing never fail; these only come from choosing an
/// output, decoding service payloads and serializing results.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Unknown output format: {0} (expected html, text, json or blocks)")]
    UnknownFormat(String),

    #[error("Unknown table style: {0} (expected ascii, modern, markdown or rounded)")]
    UnknownTableStyle(String),

    #[error("Invalid answer payload")]
    Payload(#[source] serde_json::Error),

    #[error("Failed to serialize output")]
    Serialize(#[source] serde_json::Error),
}

/// Render result type
pub type RenderResult<T> = Result<T, RenderError>;
