//! State machine module
//!
//! Contains the FSM implementation for the avatar gaze.

mod events;
mod gaze;
mod states;
mod transitions;

pub use events::GazeEvent;
pub use gaze::{GazeState, Pupil, PupilShape};
pub use states::{CyclePhase, GazePhase};
pub use transitions::{GazeMachine, GazeTransition};
