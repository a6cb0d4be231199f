//! Answer service payload
//!
//! The chat endpoint answers with the generated text and the citations it
//! was grounded on. Only `answer` is rendered; citations are carried through
//! unchanged for callers that display them.

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

/// Response body of the answer-generation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerPayload {
    pub answer: String,
    #[serde(default)]
    pub citations: Vec<Citation>,
}

/// A source passage supporting an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub page_start: i64,
    pub page_end: i64,
    pub snippet: String,
}

impl AnswerPayload {
    /// Decode a payload from JSON
    pub fn from_json(json: &str) -> RenderResult<Self> {
        serde_json::from_str(json).map_err(RenderError::Payload)
    }
}
