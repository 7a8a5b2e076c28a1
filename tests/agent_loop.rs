//! Agent reasoning loop tests
//!
//! Drives the agent with scripted planners against an in-process API, so no
//! language model is involved.

mod common;

use serde_json::json;
use std::sync::Arc;

use common::{spawn_api, LoopingPlanner, ScriptedPlanner};
use hateoas_agent::core::{Config, ToolCall};
use hateoas_agent::llm::{LLMResponse, TokenUsage};
use hateoas_agent::{Agent, HateoasError};

fn config_for(base_url: &str) -> Config {
    let mut config = Config::default();
    config.agent.entry_point = format!("{}/", base_url);
    config.agent.max_turns = 5;
    config.ollama.model = "scripted".to_string();
    config
}

#[tokio::test]
async fn follows_links_and_creates_item() {
    let api = spawn_api().await;
    let planner = Arc::new(ScriptedPlanner::new(vec![
        LLMResponse::tools(vec![ToolCall::new(
            "get_request",
            json!({"url": api.url("/")}),
        )]),
        LLMResponse::tools(vec![ToolCall::new(
            "get_request",
            json!({"url": api.url("/items")}),
        )]),
        LLMResponse::tools(vec![ToolCall::new(
            "post_request",
            json!({"url": api.url("/items"), "body": {"title": "a"}}),
        )]),
        LLMResponse::text("Created item 1 titled 'a'."),
    ]));

    let agent = Agent::with_provider(config_for(&api.base_url), planner.clone()).unwrap();
    let state = agent
        .run_detailed(Some("Create an item titled 'a'"))
        .await
        .unwrap();

    assert_eq!(
        state.final_answer.as_deref(),
        Some("Created item 1 titled 'a'.")
    );
    assert_eq!(
        state.tools_called(),
        vec!["get_request", "get_request", "post_request"]
    );
    assert_eq!(api.item_titles(), vec!["a"]);

    // Every tool result is fed back before the next planner call
    let transcripts = planner.transcripts();
    assert_eq!(transcripts.len(), 4);
    let last = transcripts.last().unwrap();
    let tool_msg = last.iter().rev().find(|m| m.role == "tool").unwrap();
    assert_eq!(tool_msg.tool_name.as_deref(), Some("post_request"));
    let fed_back: serde_json::Value = serde_json::from_str(&tool_msg.content).unwrap();
    assert_eq!(
        fed_back,
        json!({"status_code": 201, "body": {"id": 1, "title": "a"}})
    );
}

#[tokio::test]
async fn instructions_and_prompt_open_the_transcript() {
    let api = spawn_api().await;
    let planner = Arc::new(ScriptedPlanner::new(vec![LLMResponse::text("nothing to do")]));

    let agent = Agent::with_provider(config_for(&api.base_url), planner.clone()).unwrap();
    let answer = agent.run(Some("hello")).await.unwrap();
    assert_eq!(answer, "nothing to do");

    let first = &planner.transcripts()[0];
    assert_eq!(first[0].role, "system");
    assert!(first[0]
        .content
        .contains(&format!("Start from the known entry point: `{}/`", api.base_url)));
    assert_eq!(first[1].role, "user");
    assert_eq!(first[1].content, "hello");
}

#[tokio::test]
async fn missing_prompt_uses_configured_default() {
    let api = spawn_api().await;
    let planner = Arc::new(ScriptedPlanner::new(vec![LLMResponse::text("ok")]));

    let mut config = config_for(&api.base_url);
    config.agent.default_prompt = "List all items".to_string();
    config.agent.system_prompt = Some("Custom rules".to_string());

    let agent = Agent::with_provider(config, planner.clone()).unwrap();
    assert_eq!(agent.instructions(), "Custom rules");
    agent.run(None).await.unwrap();

    let first = &planner.transcripts()[0];
    assert_eq!(first[0].content, "Custom rules");
    assert_eq!(first[1].content, "List all items");
}

#[tokio::test]
async fn bad_tool_arguments_are_reported_to_the_planner() {
    let api = spawn_api().await;
    let planner = Arc::new(ScriptedPlanner::new(vec![
        LLMResponse::tools(vec![ToolCall::new(
            "post_request",
            json!({"url": api.url("/items")}),
        )]),
        LLMResponse::text("gave up"),
    ]));

    let agent = Agent::with_provider(config_for(&api.base_url), planner.clone()).unwrap();
    let state = agent.run_detailed(Some("create")).await.unwrap();

    assert!(!state.observations[0].success);
    assert!(api.item_titles().is_empty());
    let tool_msg = planner.transcripts()[1]
        .iter()
        .find(|m| m.role == "tool")
        .cloned()
        .unwrap();
    assert!(tool_msg.content.contains("'body'"));
}

#[tokio::test]
async fn non_json_get_aborts_the_run() {
    let api = spawn_api().await;
    let planner = Arc::new(ScriptedPlanner::new(vec![
        LLMResponse::tools(vec![ToolCall::new(
            "get_request",
            json!({"url": api.url("/plain")}),
        )]),
        LLMResponse::text("unreachable"),
    ]));

    let agent = Agent::with_provider(config_for(&api.base_url), planner.clone()).unwrap();
    let err = agent.run(Some("read plain")).await.unwrap_err();

    assert!(matches!(err, HateoasError::Json(_)));
    assert_eq!(planner.transcripts().len(), 1);
}

#[tokio::test]
async fn stops_after_max_turns() {
    let api = spawn_api().await;
    let planner = Arc::new(LoopingPlanner {
        call: ToolCall::new("get_request", json!({"url": api.url("/")})),
    });

    let mut config = config_for(&api.base_url);
    config.agent.max_turns = 3;

    let agent = Agent::with_provider(config, planner).unwrap();
    let err = agent.run(Some("loop forever")).await.unwrap_err();

    assert!(matches!(err, HateoasError::MaxTurnsExceeded(3)));
}

#[tokio::test]
async fn initialize_checks_model() {
    let api = spawn_api().await;
    let planner = Arc::new(ScriptedPlanner::new(Vec::new()));

    let agent = Agent::with_provider(config_for(&api.base_url), planner.clone()).unwrap();
    agent.initialize().await.unwrap();

    let mut config = config_for(&api.base_url);
    config.ollama.model = "qwen3:8b".to_string();
    let agent = Agent::with_provider(config, planner).unwrap();
    let err = agent.initialize().await.unwrap_err();
    assert!(matches!(err, HateoasError::ModelNotFound(ref m) if m == "qwen3:8b"));
}

#[tokio::test]
async fn initialize_requires_exact_model_tag() {
    let api = spawn_api().await;
    let planner = Arc::new(ScriptedPlanner::new(Vec::new()).with_models(&["qwen3:32b"]));

    let mut config = config_for(&api.base_url);
    config.ollama.model = "qwen3:8b".to_string();
    let agent = Agent::with_provider(config, planner).unwrap();

    let err = agent.initialize().await.unwrap_err();
    assert!(matches!(err, HateoasError::ModelNotFound(ref m) if m == "qwen3:8b"));
}

#[tokio::test]
async fn initialize_tolerates_planner_without_model_listing() {
    let api = spawn_api().await;
    let planner = Arc::new(
        ScriptedPlanner::new(vec![LLMResponse::text("still works")]).without_model_listing(),
    );

    let agent = Agent::with_provider(config_for(&api.base_url), planner).unwrap();
    agent.initialize().await.unwrap();
    assert_eq!(agent.run(Some("hi")).await.unwrap(), "still works");
}

#[tokio::test]
async fn temperature_and_usage_flow_through_the_loop() {
    let api = spawn_api().await;
    let mut first = LLMResponse::tools(vec![ToolCall::new(
        "get_request",
        json!({"url": api.url("/")}),
    )]);
    first.usage = Some(TokenUsage::new(40, 8));
    first.model = "scripted".to_string();
    let mut last = LLMResponse::text("done");
    last.usage = Some(TokenUsage::new(60, 4));
    let planner = Arc::new(ScriptedPlanner::new(vec![first, last]));

    let mut config = config_for(&api.base_url);
    config.agent.temperature = Some(0.2);
    let agent = Agent::with_provider(config, planner.clone()).unwrap();
    let state = agent.run_detailed(Some("look around")).await.unwrap();

    assert_eq!(planner.temperatures(), vec![Some(0.2), Some(0.2)]);
    assert_eq!(state.usage, TokenUsage::new(100, 12));
    assert_eq!(state.model.as_deref(), Some("scripted"));
}
