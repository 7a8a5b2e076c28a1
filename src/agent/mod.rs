//! Agent module - the agent shell around the planner
//!
//! Contains the navigation instructions, loop state and the orchestrator.

pub mod loop_state;
pub mod orchestrator;
pub mod prompt;

pub use loop_state::{AgentLoopState, Observation};
pub use orchestrator::Agent;
