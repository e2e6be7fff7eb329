//! Gaze transitions - FSM transition logic
//!
//! Implements the state machine that maps gaze events to the next phase.
//! Transitions are total: an event that does not apply leaves the phase as is.

use super::events::GazeEvent;
use super::gaze::GazeState;
use super::states::{CyclePhase, GazePhase};

/// Represents a gaze transition result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GazeTransition {
    /// The phase before the transition.
    pub from: GazePhase,
    /// The phase after the transition.
    pub to: GazePhase,
    /// The event that triggered the transition.
    pub event: GazeEvent,
    /// Whether the phase actually changed.
    pub changed: bool,
}

/// State machine for the avatar gaze.
#[derive(Debug, Clone)]
pub struct GazeMachine {
    /// Current phase.
    current: GazePhase,
    /// Number of half-blinks in the wake-up sequence.
    wake_steps: u8,
    /// Transition history (limited).
    history: Vec<GazeTransition>,
    /// Max history entries to keep.
    max_history: usize,
}

impl Default for GazeMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl GazeMachine {
    /// Create a gaze machine in the Default phase with a two-blink wake-up.
    pub fn new() -> Self {
        Self::with_wake_blinks(2)
    }

    /// Create a gaze machine whose wake-up sequence plays `blinks` blinks.
    pub fn with_wake_blinks(blinks: u8) -> Self {
        Self {
            current: GazePhase::Default,
            wake_steps: blinks.saturating_mul(2),
            history: Vec::new(),
            max_history: 50,
        }
    }

    /// Get the current phase.
    pub fn phase(&self) -> GazePhase {
        self.current
    }

    /// Get the gaze to draw.
    pub fn gaze(&self) -> GazeState {
        self.current.gaze_state()
    }

    /// Get the transition history.
    pub fn history(&self) -> &[GazeTransition] {
        &self.history
    }

    /// Handle an event and transition to the next phase.
    pub fn handle_event(&mut self, event: GazeEvent) -> GazeTransition {
        let from = self.current;
        let to = self.compute_next_phase(from, event);
        let changed = from != to;

        self.current = to;

        if changed {
            log::debug!("gaze {:?} -> {:?} on {}", from, to, event.name());
        }

        let transition = GazeTransition {
            from,
            to,
            event,
            changed,
        };

        self.history.push(transition.clone());
        if self.history.len() > self.max_history {
            self.history.remove(0);
        }

        transition
    }

    fn compute_next_phase(&self, phase: GazePhase, event: GazeEvent) -> GazePhase {
        use GazeEvent::*;
        use GazePhase::*;

        match (phase, event) {
            // ========== Pending Reply ==========
            // The thinking cycle owns the eyes until the reply lands.
            (Cycling(cycle), CycleTick) => Cycling(cycle.next()),
            (Cycling(_), ResponseReceived) => Responding,
            (Cycling(_), _) => phase,

            (_, Submitted) => Cycling(CyclePhase::A),

            // ========== Focus ==========
            (Sleeping, FocusGained) if self.wake_steps > 0 => Waking { step: 0 },
            (_, FocusGained) => Typing,
            // Also aborts a wake-up sequence in progress.
            (_, FocusLost) => Default,

            // ========== Typing ==========
            (_, TextChanged { non_empty: true }) => Typing,
            (_, TextChanged { non_empty: false }) => Default,
            (Typing, TypingStopped { focused: false }) => Default,

            // ========== Timed Sequences ==========
            (Waking { step }, StepElapsed { .. }) if step + 1 < self.wake_steps => {
                Waking { step: step + 1 }
            }
            (Waking { .. }, StepElapsed { .. }) => Typing,
            (Responding, StepElapsed { focused: true }) => Typing,
            (Responding, StepElapsed { focused: false }) => Default,

            // ========== Idle ==========
            (Waking { .. }, IdleElapsed) => phase,
            (_, IdleElapsed) => Sleeping,

            // ========== Default: No transition ==========
            _ => phase,
        }
    }

    /// Check if a transition would change the phase without executing it.
    pub fn can_transition(&self, event: GazeEvent) -> bool {
        self.compute_next_phase(self.current, event) != self.current
    }

    /// Reset to the Default phase.
    pub fn reset(&mut self) {
        self.current = GazePhase::Default;
    }
}
