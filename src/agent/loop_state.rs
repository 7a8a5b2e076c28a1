//! Agent loop state management
//!
//! Tracks the transcript of one run and the observations from tool executions.

use serde::{Deserialize, Serialize};

use crate::core::{Message, ToolCall, ToolResult};
use crate::llm::{LLMResponse, TokenUsage};

/// State of the agent reasoning loop
#[derive(Debug, Clone)]
pub struct AgentLoopState {
    /// Current turn number (0-indexed)
    pub turn: usize,
    /// Maximum allowed turns
    pub max_turns: usize,
    /// Transcript sent to the planner on every turn
    pub messages: Vec<Message>,
    /// Observations collected from tool executions
    pub observations: Vec<Observation>,
    /// Final answer if the agent has completed reasoning
    pub final_answer: Option<String>,
    /// Token usage summed over every planner response that reported it
    pub usage: TokenUsage,
    /// Model name reported by the most recent planner response
    pub model: Option<String>,
}

impl AgentLoopState {
    /// Create a new loop state seeded with instructions and the user prompt
    pub fn new(max_turns: usize, instructions: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            turn: 0,
            max_turns,
            messages: vec![Message::system(instructions), Message::user(prompt)],
            observations: Vec::new(),
            final_answer: None,
            usage: TokenUsage::default(),
            model: None,
        }
    }

    /// Check if the loop should continue
    pub fn should_continue(&self) -> bool {
        self.turn < self.max_turns && self.final_answer.is_none()
    }

    /// Record the assistant turn that requested tool calls
    pub fn add_tool_request(&mut self, content: impl Into<String>, calls: Vec<ToolCall>) {
        self.messages.push(Message::assistant_with_tools(content, calls));
    }

    /// Record a tool result, both for the planner and as an observation
    pub fn add_tool_result(&mut self, call: &ToolCall, result: ToolResult) {
        self.messages.push(Message::tool(call, result.output.clone()));
        self.observations.push(Observation::from(result));
    }

    /// Finish the loop with the planner's final text
    pub fn finish(&mut self, answer: impl Into<String>) {
        let answer = answer.into();
        self.messages.push(Message::assistant(answer.clone()));
        self.final_answer = Some(answer);
    }

    /// Fold a planner response's usage and model name into the run totals
    pub fn record_usage(&mut self, response: &LLMResponse) {
        if let Some(ref usage) = response.usage {
            self.usage.accumulate(usage);
        }
        if !response.model.is_empty() {
            self.model = Some(response.model.clone());
        }
    }

    /// Increment the turn counter
    pub fn next_turn(&mut self) {
        self.turn += 1;
    }

    /// Names of the tools called so far, in call order
    pub fn tools_called(&self) -> Vec<&str> {
        self.observations.iter().map(|o| o.tool_name.as_str()).collect()
    }
}

/// An observation from a tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    /// Name of the tool that produced this observation
    pub tool_name: String,
    /// Whether the tool execution was successful
    pub success: bool,
    /// Output handed back to the planner
    pub output: String,
    /// Optional structured data from the tool
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl From<ToolResult> for Observation {
    fn from(result: ToolResult) -> Self {
        Self {
            tool_name: result.tool_name,
            success: result.success,
            output: result.output,
            data: result.data,
        }
    }
}
