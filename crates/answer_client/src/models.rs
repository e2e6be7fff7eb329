use serde::{Deserialize, Serialize};

/// Response body of the answering service.
///
/// Only `answer` is required; the service also echoes the question and
/// reports how long each stage took.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerPayload {
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<AnswerTiming>,
}

/// Server-side timing breakdown, in seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AnswerTiming {
    pub preprocess: f64,
    pub generation: f64,
    pub total: f64,
}
