//! Widget runtime - a single task owning the interaction controller
//!
//! UI commands arrive through a [`WidgetHandle`]; timer fires and replies
//! arrive on the controller's own channel. Both are processed one at a time
//! on the same task, and a fresh [`WidgetSnapshot`] is published through a
//! `watch` channel whenever something visible changed.

use std::sync::Arc;

use answer_client::AnswerClient;
use chat_core::WidgetConfig;
use chat_state::GazeState;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::controller::{ControllerEvent, InteractionController};
use crate::error::WidgetError;
use crate::snapshot::WidgetSnapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetCommand {
    Focus,
    Blur,
    TextChanged(String),
    Submit(String),
    Shutdown,
}

pub struct ChatWidget;

impl ChatWidget {
    /// Start a widget session on the current tokio runtime.
    pub fn spawn(config: WidgetConfig, client: Arc<dyn AnswerClient>) -> WidgetHandle {
        let (controller, events) = InteractionController::new(config, client);
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (snapshots_tx, snapshots_rx) = watch::channel(controller.snapshot());

        let task = tokio::spawn(run(controller, commands_rx, events, snapshots_tx));

        WidgetHandle {
            commands: commands_tx,
            snapshots: snapshots_rx,
            task,
        }
    }
}

async fn run(
    mut controller: InteractionController,
    mut commands: mpsc::UnboundedReceiver<WidgetCommand>,
    mut events: mpsc::UnboundedReceiver<ControllerEvent>,
    snapshots: watch::Sender<WidgetSnapshot>,
) {
    let mut published = VisibleState::of(&controller);
    loop {
        tokio::select! {
            // User actions win over timer fires that are ready in the same turn.
            biased;

            command = commands.recv() => match command {
                Some(command) => {
                    if !apply_command(&mut controller, command) {
                        break;
                    }
                }
                None => break,
            },
            Some(event) = events.recv() => controller.handle_event(event),
        }

        let current = VisibleState::of(&controller);
        if current != published {
            published = current;
            snapshots.send_replace(controller.snapshot());
        }
    }

    controller.shutdown();
    log::debug!("chat widget stopped");
}

/// The parts of a snapshot that can change between events.
///
/// Messages are append-only, so their count stands in for the whole list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct VisibleState {
    messages: usize,
    user_typing: bool,
    bot_waiting: bool,
    focused: bool,
    gaze: GazeState,
}

impl VisibleState {
    fn of(controller: &InteractionController) -> Self {
        Self {
            messages: controller.timeline().len(),
            user_typing: controller.is_user_typing(),
            bot_waiting: controller.is_bot_waiting(),
            focused: controller.is_focused(),
            gaze: controller.gaze(),
        }
    }
}

/// Apply one command; returns false once the session should stop.
fn apply_command(controller: &mut InteractionController, command: WidgetCommand) -> bool {
    match command {
        WidgetCommand::Focus => controller.on_focus(),
        WidgetCommand::Blur => controller.on_blur(),
        WidgetCommand::TextChanged(value) => controller.on_text_changed(&value),
        WidgetCommand::Submit(text) => {
            let outcome = controller.on_submit(&text);
            log::debug!("submit handled: {:?}", outcome);
        }
        WidgetCommand::Shutdown => return false,
    }
    true
}

/// Handle to a running widget session.
pub struct WidgetHandle {
    commands: mpsc::UnboundedSender<WidgetCommand>,
    snapshots: watch::Receiver<WidgetSnapshot>,
    task: JoinHandle<()>,
}

impl WidgetHandle {
    pub fn send(&self, command: WidgetCommand) -> Result<(), WidgetError> {
        self.commands.send(command).map_err(|_| WidgetError::Closed)
    }

    pub fn focus(&self) -> Result<(), WidgetError> {
        self.send(WidgetCommand::Focus)
    }

    pub fn blur(&self) -> Result<(), WidgetError> {
        self.send(WidgetCommand::Blur)
    }

    pub fn text_changed(&self, value: impl Into<String>) -> Result<(), WidgetError> {
        self.send(WidgetCommand::TextChanged(value.into()))
    }

    pub fn submit(&self, text: impl Into<String>) -> Result<(), WidgetError> {
        self.send(WidgetCommand::Submit(text.into()))
    }

    /// The latest published state.
    pub fn snapshot(&self) -> WidgetSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver notified on every visible change.
    pub fn subscribe(&self) -> watch::Receiver<WidgetSnapshot> {
        self.snapshots.clone()
    }

    /// Stop the session and wait until its timers are cancelled.
    pub async fn shutdown(self) {
        let _ = self.commands.send(WidgetCommand::Shutdown);
        if let Err(e) = self.task.await {
            log::warn!("chat widget task ended abnormally: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct EchoClient;

    #[async_trait]
    impl AnswerClient for EchoClient {
        async fn ask(&self, question: &str) -> answer_client::Result<String> {
            Ok(question.to_string())
        }
    }

    fn controller() -> InteractionController {
        let (controller, _events) =
            InteractionController::new(WidgetConfig::default(), Arc::new(EchoClient));
        controller
    }

    #[tokio::test(start_paused = true)]
    async fn test_visible_state_ignores_no_op_events() {
        let mut controller = controller();
        let before = VisibleState::of(&controller);

        controller.on_blur();
        controller.on_text_changed("");
        assert_eq!(VisibleState::of(&controller), before);

        controller.on_text_changed("hi");
        let typing = VisibleState::of(&controller);
        assert_ne!(typing, before);
        assert!(typing.user_typing);
        assert_eq!(typing.gaze, GazeState::Typing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_visible_state_tracks_appends() {
        let mut controller = controller();
        let before = VisibleState::of(&controller);

        controller.on_submit("hello");
        let after = VisibleState::of(&controller);
        assert_eq!(after.messages, before.messages + 1);
        assert!(after.bot_waiting);
    }

    #[tokio::test(start_paused = true)]
    async fn test_apply_command_stops_only_on_shutdown() {
        let mut controller = controller();

        assert!(apply_command(&mut controller, WidgetCommand::Focus));
        assert!(apply_command(
            &mut controller,
            WidgetCommand::TextChanged("draft".into())
        ));
        assert!(!apply_command(&mut controller, WidgetCommand::Shutdown));
    }
}
