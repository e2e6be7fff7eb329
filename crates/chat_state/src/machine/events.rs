//! Gaze events - Defines events that trigger gaze transitions

use serde::{Deserialize, Serialize};

/// Defines the events that can trigger state transitions in the gaze FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GazeEvent {
    // ========== User Events ==========
    /// The input box gained focus.
    FocusGained,

    /// The input box lost focus.
    FocusLost,

    /// The input text changed; `non_empty` reflects the trimmed value.
    TextChanged { non_empty: bool },

    /// A non-empty message was submitted.
    Submitted,

    // ========== Reply Events ==========
    /// A reply (answer, shortcut reply or error notice) was appended.
    ResponseReceived,

    // ========== Timer Events ==========
    /// The user-typing indicator timed out.
    TypingStopped { focused: bool },

    /// The thinking cycle ticked.
    CycleTick,

    /// A one-shot sequence step elapsed (wake-up blink or post-reply settle).
    StepElapsed { focused: bool },

    /// The idle timer expired.
    IdleElapsed,
}

impl GazeEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FocusGained => "focus_gained",
            Self::FocusLost => "focus_lost",
            Self::TextChanged { .. } => "text_changed",
            Self::Submitted => "submitted",
            Self::ResponseReceived => "response_received",
            Self::TypingStopped { .. } => "typing_stopped",
            Self::CycleTick => "cycle_tick",
            Self::StepElapsed { .. } => "step_elapsed",
            Self::IdleElapsed => "idle_elapsed",
        }
    }
}
