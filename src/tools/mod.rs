//! Tools module - the tool surface exposed to the model
//!
//! Wraps the HTTP tool layer in function definitions and dispatches calls.

pub mod registry;

pub use registry::{ToolRegistry, DELETE_REQUEST, GET_REQUEST, POST_REQUEST, PUT_REQUEST};
