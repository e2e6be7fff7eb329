//! chat_core - Core types for the chat widget
//!
//! This crate provides the foundational types shared by the widget crates:
//! - `message` - Message, Sender and the append-only Timeline
//! - `copy` - fixed user-facing strings
//! - `config` - WidgetConfig and its timing table

pub mod config;
pub mod copy;
pub mod message;

// Re-export commonly used types
pub use config::{ConfigError, Timings, WidgetConfig};
pub use message::{Message, Sender, Timeline};
