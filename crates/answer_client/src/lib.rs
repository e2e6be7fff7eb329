//! answer_client - Remote answering collaborator
//!
//! One GET request per question, answered with a JSON payload carrying an
//! `answer` field. Failures are returned as [`AnswerError`]; there is no retry.

pub mod client;
pub mod error;
pub mod models;

pub use client::{AnswerClient, HttpAnswerClient};
pub use error::{AnswerError, Result};
pub use models::{AnswerPayload, AnswerTiming};
