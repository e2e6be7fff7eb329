//! Message module - conversation entries and their ordered log
//!
//! Messages are immutable once created; the timeline only ever grows.

mod content;
mod timeline;

pub use content::{Message, Sender};
pub use timeline::Timeline;
