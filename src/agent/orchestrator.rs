//! Agent orchestrator
//!
//! Binds the navigation instructions and the HTTP tools to a planner and runs
//! one request/response cycle (Thought → Action → Observation, repeated until
//! the planner answers in plain text).

use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::agent::loop_state::AgentLoopState;
use crate::agent::prompt;
use crate::core::{Config, HateoasError, Result};
use crate::http::HttpTools;
use crate::llm::{create_provider, GenerateOptions, LLMProvider};
use crate::tools::ToolRegistry;

/// Agent that drives a planner over the HTTP tools
pub struct Agent {
    /// Configuration
    config: Config,
    /// Planner backend
    llm: Arc<dyn LLMProvider>,
    /// The four HTTP tools
    tools: ToolRegistry,
    /// Instruction text sent as the system message
    instructions: String,
}

impl Agent {
    /// Create an agent using the provider selected in configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let llm = create_provider(&config)?;
        Self::with_provider(config, llm)
    }

    /// Create an agent over an explicit planner
    pub fn with_provider(config: Config, llm: Arc<dyn LLMProvider>) -> Result<Self> {
        let http = HttpTools::from_config(&config.http)?;

        let instructions = match config.agent.system_prompt {
            Some(ref custom) => custom.clone(),
            None => prompt::instructions(&config.agent.entry_point),
        };

        Ok(Self {
            config,
            llm,
            tools: ToolRegistry::new(http),
            instructions,
        })
    }

    /// Check that the configured model is installed on the planner
    ///
    /// A model the planner lists as absent is an error. A planner that cannot
    /// list its models is only warned about; the first chat call will surface
    /// any real connection problem.
    pub async fn initialize(&self) -> Result<()> {
        let model = self.config.model();

        match self.llm.is_model_available(model).await {
            Ok(true) => debug!(provider = self.llm.name(), model, "planner ready"),
            Ok(false) => return Err(HateoasError::ModelNotFound(model.to_string())),
            Err(e) => warn!(
                provider = self.llm.name(),
                model,
                error = %e,
                "could not list planner models, skipping model check"
            ),
        }

        Ok(())
    }

    /// Run one turn for the prompt and return the planner's final answer
    ///
    /// Without a prompt the configured default prompt is used.
    pub async fn run(&self, prompt: Option<&str>) -> Result<String> {
        let state = self.run_detailed(prompt).await?;
        state
            .final_answer
            .ok_or(HateoasError::MaxTurnsExceeded(state.max_turns))
    }

    /// Run one turn and return the complete loop state
    ///
    /// Fails with [`HateoasError::MaxTurnsExceeded`] if the planner never
    /// produces a final answer.
    pub async fn run_detailed(&self, prompt: Option<&str>) -> Result<AgentLoopState> {
        let prompt = prompt.unwrap_or(&self.config.agent.default_prompt);
        let span = info_span!(
            "hateoas_agent",
            provider = self.llm.name(),
            model = self.config.model()
        );

        self.reasoning_loop(prompt).instrument(span).await
    }

    async fn reasoning_loop(&self, prompt: &str) -> Result<AgentLoopState> {
        let mut state =
            AgentLoopState::new(self.config.agent.max_turns, &self.instructions, prompt);
        let options = GenerateOptions {
            temperature: self.config.agent.temperature,
        };

        while state.should_continue() {
            let turn = state.turn + 1;
            debug!(turn, max_turns = state.max_turns, "calling planner");

            let response = self
                .llm
                .chat_with_tools(
                    self.config.model(),
                    &state.messages,
                    self.tools.definitions(),
                    Some(options.clone()),
                )
                .await?;
            state.record_usage(&response);

            // No tool calls = final answer
            if response.tool_calls.is_empty() {
                state.finish(response.content);
                break;
            }

            debug!(turn, calls = response.tool_calls.len(), "executing tools");
            let calls = response.tool_calls;
            state.add_tool_request(response.content, calls.clone());

            // Sequential: later calls may depend on state changed by earlier ones
            for call in &calls {
                let result = self.tools.execute(call).await?;
                if !result.success {
                    warn!(tool = %call.name, error = %result.output, "tool call rejected");
                }
                state.add_tool_result(call, result);
            }

            state.next_turn();
        }

        if state.final_answer.is_none() {
            return Err(HateoasError::MaxTurnsExceeded(state.max_turns));
        }

        info!(
            turns = state.turn + 1,
            tool_calls = state.observations.len(),
            model = state.model.as_deref().unwrap_or(self.config.model()),
            prompt_tokens = state.usage.prompt_tokens,
            completion_tokens = state.usage.completion_tokens,
            total_tokens = state.usage.total_tokens,
            "agent run complete"
        );
        Ok(state)
    }

    /// Instruction text sent to the planner
    pub fn instructions(&self) -> &str {
        &self.instructions
    }
}
