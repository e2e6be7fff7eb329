//! Visible gaze and the pupil pose used to draw it.

use serde::{Deserialize, Serialize};

/// The gaze shown by the avatar.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GazeState {
    #[default]
    Default,
    Typing,
    Responding,
    Sleeping,
    CycleA,
    CycleB,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PupilShape {
    /// Open eye, drawn as a dot.
    Round,
    /// Closed eye, drawn as a dash.
    Slit,
}

/// Pupil offset inside the eye, in abstract units (x grows right, y grows down).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pupil {
    pub dx: i8,
    pub dy: i8,
    pub shape: PupilShape,
}

impl GazeState {
    pub fn pupil(&self) -> Pupil {
        let (dx, dy) = match self {
            Self::Typing => (6, 2),
            Self::Responding => (-6, 2),
            Self::CycleA => (-5, -3),
            Self::CycleB => (5, -3),
            Self::Default | Self::Sleeping => (0, 0),
        };
        let shape = if *self == Self::Sleeping {
            PupilShape::Slit
        } else {
            PupilShape::Round
        };
        Pupil { dx, dy, shape }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Typing => "typing",
            Self::Responding => "responding",
            Self::Sleeping => "sleeping",
            Self::CycleA => "cycle-a",
            Self::CycleB => "cycle-b",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sleeping_is_the_only_closed_eye() {
        for gaze in [
            GazeState::Default,
            GazeState::Typing,
            GazeState::Responding,
            GazeState::CycleA,
            GazeState::CycleB,
        ] {
            assert_eq!(gaze.pupil().shape, PupilShape::Round, "{gaze:?}");
        }
        assert_eq!(GazeState::Sleeping.pupil().shape, PupilShape::Slit);
    }

    #[test]
    fn typing_and_responding_look_down_on_opposite_sides() {
        let typing = GazeState::Typing.pupil();
        let responding = GazeState::Responding.pupil();
        assert!(typing.dx > 0 && typing.dy > 0);
        assert!(responding.dx < 0 && responding.dy > 0);
    }

    #[test]
    fn serializes_kebab_case() {
        let json = serde_json::to_string(&GazeState::CycleA).unwrap();
        assert_eq!(json, "\"cycle-a\"");
        assert_eq!(GazeState::CycleA.as_str(), "cycle-a");
    }
}
