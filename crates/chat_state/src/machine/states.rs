//! Gaze phases - Defines all machine states of the avatar
//!
//! A phase carries whatever a visible gaze alone cannot express: the
//! position inside the wake-up blink sequence and the half of the thinking
//! cycle currently shown.

use serde::{Deserialize, Serialize};

use super::gaze::GazeState;

/// Which half of the thinking cycle is shown.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CyclePhase {
    A,
    B,
}

impl CyclePhase {
    pub fn next(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// Machine states of the avatar gaze. Exactly one is active at a time.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GazePhase {
    /// Looking straight ahead.
    #[default]
    Default,

    /// Looking at the input box.
    Typing,

    /// Eyes closed after prolonged inactivity.
    Sleeping,

    /// Playing the wake-up blink sequence.
    ///
    /// Even steps show closed eyes, odd steps open eyes.
    Waking { step: u8 },

    /// Alternating between two gazes while a reply is pending.
    Cycling(CyclePhase),

    /// Looking at the freshly appended reply.
    Responding,
}

impl GazePhase {
    /// The gaze the rendering side should draw for this phase.
    pub fn gaze_state(&self) -> GazeState {
        match self {
            Self::Default => GazeState::Default,
            Self::Typing => GazeState::Typing,
            Self::Sleeping => GazeState::Sleeping,
            Self::Waking { step } if step % 2 == 0 => GazeState::Sleeping,
            Self::Waking { .. } => GazeState::Default,
            Self::Cycling(CyclePhase::A) => GazeState::CycleA,
            Self::Cycling(CyclePhase::B) => GazeState::CycleB,
            Self::Responding => GazeState::Responding,
        }
    }

    pub fn is_waking(&self) -> bool {
        matches!(self, Self::Waking { .. })
    }

    pub fn is_cycling(&self) -> bool {
        matches!(self, Self::Cycling(_))
    }

    /// Check if this phase is a timed sequence step that a user action may cut short.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Waking { .. } | Self::Responding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_phase() {
        assert_eq!(GazePhase::default(), GazePhase::Default);
    }

    #[test]
    fn test_waking_alternates_closed_and_open() {
        let shown: Vec<GazeState> = (0..4)
            .map(|step| GazePhase::Waking { step }.gaze_state())
            .collect();
        assert_eq!(
            shown,
            vec![
                GazeState::Sleeping,
                GazeState::Default,
                GazeState::Sleeping,
                GazeState::Default
            ]
        );
    }

    #[test]
    fn test_cycle_phase_alternates() {
        assert_eq!(CyclePhase::A.next(), CyclePhase::B);
        assert_eq!(CyclePhase::B.next(), CyclePhase::A);
        assert_eq!(
            GazePhase::Cycling(CyclePhase::B).gaze_state(),
            GazeState::CycleB
        );
    }

    #[test]
    fn test_transient_phases() {
        assert!(GazePhase::Waking { step: 1 }.is_transient());
        assert!(GazePhase::Responding.is_transient());
        assert!(!GazePhase::Cycling(CyclePhase::A).is_transient());
        assert!(!GazePhase::Sleeping.is_transient());
    }
}
