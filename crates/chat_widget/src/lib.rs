//! chat_widget - Interaction state controller for the chat widget
//!
//! Wires focus, typing, submission and reply events into the gaze state
//! machine and the timer registry, and keeps the conversation timeline.
//!
//! - `timer` - single-slot cancellable delayed actions
//! - `controller` - the event-driven interaction controller
//! - `runtime` - a task owning the controller, fed through a handle
//! - `snapshot` - read-only view consumed by rendering

pub mod controller;
pub mod error;
pub mod runtime;
pub mod snapshot;
pub mod timer;

pub use controller::{ControllerEvent, InteractionController, SubmitOutcome};
pub use error::WidgetError;
pub use runtime::{ChatWidget, WidgetCommand, WidgetHandle};
pub use snapshot::WidgetSnapshot;
pub use timer::{TimerFired, TimerKind, TimerRegistry};
