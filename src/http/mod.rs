//! HTTP tool layer - the four verb operations the agent can invoke
//!
//! Every call logs its verb and URL at INFO on the `hateoas_agent::http` target
//! before dispatch.

pub mod client;
pub mod response;

pub use client::HttpTools;
pub use response::{HttpResponse, ResponseBody};
