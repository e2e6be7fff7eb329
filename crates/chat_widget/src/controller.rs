//! Interaction controller - the orchestrator of the widget
//!
//! Turns user actions (focus, blur, text changes, submissions), timer fires
//! and reply arrivals into gaze transitions, flag updates and timeline
//! appends. All mutation happens through `&mut self`, one event at a time;
//! timers and replies come back as [`ControllerEvent`]s on the channel
//! returned by [`InteractionController::new`].

use std::sync::Arc;

use answer_client::{AnswerClient, AnswerError};
use chat_core::copy::{ERROR_REPLY, INFO_REPLY, WELCOME_MESSAGE};
use chat_core::{Message, Timeline, WidgetConfig};
use chat_state::{GazeEvent, GazeMachine, GazePhase, GazeState, GazeTransition};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::snapshot::WidgetSnapshot;
use crate::timer::{TimerFired, TimerKind, TimerRegistry};

/// Events delivered back to the controller from timers and reply tasks.
#[derive(Debug)]
pub enum ControllerEvent {
    Timer(TimerFired),
    Answer {
        request_id: u64,
        outcome: Result<String, AnswerError>,
    },
}

impl From<TimerFired> for ControllerEvent {
    fn from(fired: TimerFired) -> Self {
        ControllerEvent::Timer(fired)
    }
}

/// What `on_submit` did with the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Empty after trimming; nothing happened.
    Empty,
    /// A reply is already pending; nothing happened.
    Busy,
    /// Shortcut keyword answered locally.
    Shortcut,
    /// Question sent to the answering service.
    Remote,
}

pub struct InteractionController {
    config: WidgetConfig,
    client: Arc<dyn AnswerClient>,
    timeline: Timeline,
    gaze: GazeMachine,
    focused: bool,
    user_typing: bool,
    bot_waiting: bool,
    pending_request: Option<u64>,
    next_request_id: u64,
    timers: TimerRegistry<ControllerEvent>,
    events_tx: UnboundedSender<ControllerEvent>,
}

impl InteractionController {
    /// Start a session: seed the welcome message and arm the idle timer.
    ///
    /// The returned receiver yields the timer fires and replies that must be
    /// fed back through [`handle_event`](Self::handle_event).
    pub fn new(
        config: WidgetConfig,
        client: Arc<dyn AnswerClient>,
    ) -> (Self, UnboundedReceiver<ControllerEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let mut controller = Self {
            gaze: GazeMachine::with_wake_blinks(config.timings.wake_blinks),
            config,
            client,
            timeline: Timeline::seeded(WELCOME_MESSAGE),
            focused: false,
            user_typing: false,
            bot_waiting: false,
            pending_request: None,
            next_request_id: 1,
            timers: TimerRegistry::new(events_tx.clone()),
            events_tx,
        };
        controller.arm_idle();
        (controller, events_rx)
    }

    // ========== User Actions ==========

    pub fn on_focus(&mut self) {
        self.focused = true;
        self.timers.cancel(TimerKind::Idle);
        self.transition(GazeEvent::FocusGained);
    }

    pub fn on_blur(&mut self) {
        self.focused = false;
        self.transition(GazeEvent::FocusLost);
        self.arm_idle();
    }

    pub fn on_text_changed(&mut self, value: &str) {
        self.timers.cancel(TimerKind::Idle);
        self.timers.cancel(TimerKind::TypingStop);

        let non_empty = !value.trim().is_empty();
        self.user_typing = non_empty;
        self.transition(GazeEvent::TextChanged { non_empty });

        if non_empty {
            self.timers
                .schedule(TimerKind::TypingStop, self.config.timings.typing_stop());
        } else {
            self.arm_idle();
        }
    }

    /// Append the user's message and start answering it.
    ///
    /// Never fails: a failed remote call later shows up as an error reply.
    pub fn on_submit(&mut self, text: &str) -> SubmitOutcome {
        let question = text.trim();
        if question.is_empty() {
            return SubmitOutcome::Empty;
        }
        if self.bot_waiting {
            log::debug!("submit ignored while request {:?} is pending", self.pending_request);
            return SubmitOutcome::Busy;
        }

        self.timers.cancel(TimerKind::Idle);
        self.timers.cancel(TimerKind::TypingStop);
        self.user_typing = false;
        self.timeline.append(Message::user(question));

        self.bot_waiting = true;
        self.transition(GazeEvent::Submitted);

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.pending_request = Some(request_id);

        if question == self.config.shortcut_keyword {
            self.timers.schedule(
                TimerKind::ShortcutReply,
                self.config.timings.shortcut_delay(),
            );
            SubmitOutcome::Shortcut
        } else {
            self.spawn_remote_answer(request_id, question.to_string());
            SubmitOutcome::Remote
        }
    }

    // ========== Timer and Reply Events ==========

    pub fn handle_event(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::Timer(fired) => self.on_timer(fired),
            ControllerEvent::Answer {
                request_id,
                outcome,
            } => self.on_answer(request_id, outcome),
        }
    }

    fn on_timer(&mut self, fired: TimerFired) {
        if !self.timers.accept(fired) {
            log::debug!("stale {:?} timer fire ignored", fired.kind);
            return;
        }

        match fired.kind {
            TimerKind::Idle => {
                self.transition(GazeEvent::IdleElapsed);
            }
            TimerKind::TypingStop => {
                self.user_typing = false;
                self.transition(GazeEvent::TypingStopped {
                    focused: self.focused,
                });
                self.arm_idle();
            }
            TimerKind::GazeTick => {
                self.transition(GazeEvent::CycleTick);
            }
            TimerKind::ShortcutReply => match self.pending_request {
                Some(request_id) => self.on_answer(request_id, Ok(INFO_REPLY.to_string())),
                None => log::debug!("shortcut reply fired with no pending request"),
            },
            TimerKind::GazeStep => {
                let settling = self.gaze.phase() == GazePhase::Responding;
                self.transition(GazeEvent::StepElapsed {
                    focused: self.focused,
                });
                if settling {
                    self.arm_idle();
                }
            }
        }
    }

    fn on_answer(&mut self, request_id: u64, outcome: Result<String, AnswerError>) {
        if self.pending_request != Some(request_id) {
            log::debug!("discarding reply to request {}", request_id);
            return;
        }
        self.pending_request = None;
        self.bot_waiting = false;

        let reply = match outcome {
            Ok(answer) => Message::bot(answer),
            Err(e) => {
                log::warn!("answer request {} failed: {}", request_id, e);
                Message::bot(ERROR_REPLY)
            }
        };
        self.timeline.append(reply);
        self.transition(GazeEvent::ResponseReceived);
    }

    // ========== Internals ==========

    /// Apply a gaze event and keep the gaze timers in line with the new phase.
    fn transition(&mut self, event: GazeEvent) -> GazeTransition {
        let transition = self.gaze.handle_event(event);
        if !transition.changed {
            return transition;
        }

        let timings = &self.config.timings;
        match transition.to {
            GazePhase::Waking { .. } => {
                self.timers.schedule(TimerKind::GazeStep, timings.blink());
            }
            GazePhase::Responding => {
                self.timers.schedule(TimerKind::GazeStep, timings.settle());
            }
            GazePhase::Cycling(_) if !transition.from.is_cycling() => {
                self.timers
                    .schedule_repeating(TimerKind::GazeTick, timings.gaze_cycle());
            }
            _ => {}
        }

        if !transition.to.is_cycling() {
            self.timers.cancel(TimerKind::GazeTick);
        }
        if !transition.to.is_transient() {
            self.timers.cancel(TimerKind::GazeStep);
        }

        transition
    }

    /// Arm the idle timer unless a reply is pending.
    fn arm_idle(&mut self) {
        if self.bot_waiting {
            return;
        }
        self.timers
            .schedule(TimerKind::Idle, self.config.timings.idle());
    }

    fn spawn_remote_answer(&self, request_id: u64, question: String) {
        let tx = self.events_tx.clone();
        let client = Arc::clone(&self.client);
        tokio::spawn(async move {
            let outcome = client.ask(&question).await;
            if tx
                .send(ControllerEvent::Answer {
                    request_id,
                    outcome,
                })
                .is_err()
            {
                log::debug!("reply to request {} arrived after teardown", request_id);
            }
        });
    }

    /// Cancel every timer and forget the pending request. Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        self.timers.cancel_all();
        self.pending_request = None;
    }

    // ========== Observable State ==========

    pub fn snapshot(&self) -> WidgetSnapshot {
        WidgetSnapshot {
            messages: self.timeline.messages().to_vec(),
            user_typing: self.user_typing,
            bot_waiting: self.bot_waiting,
            focused: self.focused,
            gaze: self.gaze.gaze(),
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn gaze(&self) -> GazeState {
        self.gaze.gaze()
    }

    pub fn gaze_phase(&self) -> GazePhase {
        self.gaze.phase()
    }

    pub fn gaze_history(&self) -> &[GazeTransition] {
        self.gaze.history()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_user_typing(&self) -> bool {
        self.user_typing
    }

    pub fn is_bot_waiting(&self) -> bool {
        self.bot_waiting
    }

    pub fn is_timer_armed(&self, kind: TimerKind) -> bool {
        self.timers.is_armed(kind)
    }
}
