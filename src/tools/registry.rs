//! Tool registry - advertises the HTTP tools and dispatches tool calls
//!
//! Bad arguments from the model come back as failed [`ToolResult`]s so the
//! model can correct itself. Errors from the HTTP layer itself are returned
//! as `Err` and end the run.

use serde_json::{json, Value};
use tracing::warn;

use crate::core::{Result, ToolCall, ToolDefinition, ToolResult};
use crate::http::{HttpResponse, HttpTools};

pub const GET_REQUEST: &str = "get_request";
pub const POST_REQUEST: &str = "post_request";
pub const PUT_REQUEST: &str = "put_request";
pub const DELETE_REQUEST: &str = "delete_request";

/// Registry of the four HTTP verb tools
pub struct ToolRegistry {
    /// Tool definitions in advertised order
    definitions: Vec<ToolDefinition>,
    http: HttpTools,
}

impl ToolRegistry {
    /// Create a registry over the given HTTP tools
    pub fn new(http: HttpTools) -> Self {
        let mut registry = Self {
            definitions: Vec::with_capacity(4),
            http,
        };
        registry.register_http_tools();
        registry
    }

    fn register_http_tools(&mut self) {
        self.register(ToolDefinition::function(
            GET_REQUEST,
            "Call a URL and return the status code and JSON response.",
            url_only_schema(),
        ));
        self.register(ToolDefinition::function(
            POST_REQUEST,
            "Call a URL with a payload and return the status code and JSON response.",
            url_and_body_schema(),
        ));
        self.register(ToolDefinition::function(
            PUT_REQUEST,
            "Call a URL with a payload and return the status code and JSON response.",
            url_and_body_schema(),
        ));
        self.register(ToolDefinition::function(
            DELETE_REQUEST,
            "Call a URL and return the status code and JSON response (if any).",
            url_only_schema(),
        ));
    }

    /// Register a tool definition, replacing one with the same name
    pub fn register(&mut self, definition: ToolDefinition) {
        self.definitions.retain(|d| d.name() != definition.name());
        self.definitions.push(definition);
    }

    /// Get all tool definitions
    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    /// Look up a definition by name
    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.definitions.iter().find(|d| d.name() == name)
    }

    /// Execute a tool call
    pub async fn execute(&self, tool_call: &ToolCall) -> Result<ToolResult> {
        let name = tool_call.name.as_str();

        let Some(url) = tool_call.get_string("url") else {
            if self.get(name).is_none() {
                return Ok(unknown_tool(name));
            }
            warn!(tool = name, "tool call without a url argument");
            return Ok(ToolResult::failure(
                name,
                format!("{} requires a string 'url' argument", name),
            ));
        };

        let response = match name {
            GET_REQUEST => self.http.get_request(&url).await?,
            DELETE_REQUEST => self.http.delete_request(&url).await?,
            POST_REQUEST | PUT_REQUEST => {
                let Some(body) = tool_call.get_object("body") else {
                    warn!(tool = name, "tool call without an object body");
                    return Ok(ToolResult::failure(
                        name,
                        format!("{} requires an object 'body' argument", name),
                    ));
                };
                if name == POST_REQUEST {
                    self.http.post_request(&url, body).await?
                } else {
                    self.http.put_request(&url, body).await?
                }
            }
            _ => return Ok(unknown_tool(name)),
        };

        to_tool_result(name, &response)
    }
}

fn unknown_tool(name: &str) -> ToolResult {
    ToolResult::failure(name, format!("Unknown tool: {}", name))
}

fn to_tool_result(name: &str, response: &HttpResponse) -> Result<ToolResult> {
    let data = serde_json::to_value(response)?;
    Ok(ToolResult::success_with_data(
        name,
        response.to_json_string()?,
        data,
    ))
}

fn url_only_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "url": {
                "type": "string",
                "description": "Absolute URL taken from a _links entry"
            }
        },
        "required": ["url"]
    })
}

fn url_and_body_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "url": {
                "type": "string",
                "description": "Absolute URL taken from a _links entry"
            },
            "body": {
                "type": "object",
                "description": "JSON request body built from the fields in _templates"
            }
        },
        "required": ["url", "body"]
    })
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new(HttpTools::new())
    }
}
