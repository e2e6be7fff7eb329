//! chat_state - Gaze state machine for the chat widget avatar
//!
//! This crate decides which gaze the two-eye avatar shows in response to
//! focus, typing, submission, reply and timer events.

pub mod machine;

// Re-export commonly used types
pub use machine::{
    CyclePhase, GazeEvent, GazeMachine, GazePhase, GazeState, GazeTransition, Pupil, PupilShape,
};
