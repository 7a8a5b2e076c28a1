//! hateoas-agent - a hypermedia-driven REST API agent
//!
//! The agent fulfils requests against a HATEOAS-style API by following the
//! `_links` and `_templates` advertised in JSON responses. A language model
//! (the planner) decides which of four HTTP tools to call; this crate
//! supplies the tools, the navigation instructions and the reasoning loop.
//!
//! # Architecture
//!
//! - **Core**: Shared types, configuration, and error handling
//! - **HTTP**: The GET/POST/PUT/DELETE tool layer and its normalized results
//! - **Tools**: Tool definitions advertised to the planner and call dispatch
//! - **LLM**: Planner abstraction with Ollama and OpenAI implementations
//! - **Agent**: Instructions and the single-turn reasoning loop
//!
//! # Usage
//!
//! ```rust,no_run
//! use hateoas_agent::{Agent, Config};
//!
//! #[tokio::main]
//! async fn main() -> hateoas_agent::Result<()> {
//!     let agent = Agent::with_config(Config::load()?)?;
//!     agent.initialize().await?;
//!
//!     let answer = agent.run(Some("Create an item titled 'a'")).await?;
//!     println!("{}", answer);
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod core;
pub mod http;
pub mod llm;
pub mod tools;

// Re-export commonly used items
pub use agent::Agent;
pub use core::{Config, HateoasError, Result};
pub use http::{HttpResponse, HttpTools, ResponseBody};
