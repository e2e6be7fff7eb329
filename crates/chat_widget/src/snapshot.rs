use chat_core::Message;
use chat_state::GazeState;
use serde::Serialize;

/// Everything the rendering side needs to draw the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetSnapshot {
    /// Timeline in display order.
    pub messages: Vec<Message>,
    /// Show the "user is typing" bubble.
    pub user_typing: bool,
    /// Show the "waiting for reply" bubble.
    pub bot_waiting: bool,
    pub focused: bool,
    pub gaze: GazeState,
}

impl WidgetSnapshot {
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}
