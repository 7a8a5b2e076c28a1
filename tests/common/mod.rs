//! Shared test fixtures: an in-process HATEOAS API and scripted planners.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use hateoas_agent::core::{HateoasError, Message, Result, ToolDefinition};
use hateoas_agent::llm::{GenerateOptions, LLMProvider, LLMResponse};

#[derive(Default)]
struct ApiState {
    items: Mutex<BTreeMap<u64, Value>>,
    next_id: Mutex<u64>,
}

/// A running test API; shuts down on drop
pub struct TestApi {
    pub base_url: String,
    state: Arc<ApiState>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestApi {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn item_titles(&self) -> Vec<String> {
        self.state
            .items
            .lock()
            .unwrap()
            .values()
            .filter_map(|item| item["title"].as_str().map(str::to_string))
            .collect()
    }
}

impl Drop for TestApi {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn spawn_api() -> TestApi {
    let state = Arc::new(ApiState::default());
    let app = Router::new()
        .route("/", get(root))
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/ids", get(item_ids))
        .route(
            "/plain",
            get(plain_text)
                .post(plain_text)
                .put(plain_text)
                .delete(plain_text),
        )
        .route("/scalar", get(scalar).delete(scalar))
        .route("/echo-null", get(json_null))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local_addr");
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    TestApi {
        base_url: format!("http://{addr}"),
        state,
        shutdown: Some(shutdown_tx),
    }
}

async fn root() -> Json<Value> {
    Json(json!({
        "_links": {
            "self": {"href": "/"},
            "items": {"href": "/items"}
        }
    }))
}

async fn list_items(State(state): State<Arc<ApiState>>) -> Json<Value> {
    let items: Vec<Value> = state.items.lock().unwrap().values().cloned().collect();
    Json(json!({
        "_embedded": {"items": items},
        "_links": {
            "self": {"href": "/items"},
            "create": {"href": "/items", "method": "POST"}
        },
        "_templates": {
            "default": {
                "method": "POST",
                "properties": [
                    {"name": "title", "type": "text", "required": true}
                ]
            }
        }
    }))
}

async fn create_item(
    State(state): State<Arc<ApiState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let id = {
        let mut next = state.next_id.lock().unwrap();
        *next += 1;
        *next
    };
    let item = json!({"id": id, "title": body["title"]});
    state.items.lock().unwrap().insert(id, item.clone());
    (StatusCode::CREATED, Json(item))
}

async fn get_item(State(state): State<Arc<ApiState>>, Path(id): Path<u64>) -> Response {
    match state.items.lock().unwrap().get(&id) {
        Some(item) => Json(item.clone()).into_response(),
        None => not_found(),
    }
}

async fn update_item(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    let mut items = state.items.lock().unwrap();
    match items.get_mut(&id) {
        Some(item) => {
            item["title"] = body["title"].clone();
            Json(item.clone()).into_response()
        }
        None => not_found(),
    }
}

async fn delete_item(State(state): State<Arc<ApiState>>, Path(id): Path<u64>) -> Response {
    match state.items.lock().unwrap().remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}

async fn item_ids(State(state): State<Arc<ApiState>>) -> Json<Value> {
    let ids: Vec<u64> = state.items.lock().unwrap().keys().copied().collect();
    Json(json!(ids))
}

async fn plain_text() -> &'static str {
    "this is not json"
}

async fn scalar() -> Json<Value> {
    Json(json!("ok"))
}

async fn json_null() -> Json<Value> {
    Json(Value::Null)
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"error": "not found"}))).into_response()
}

/// Planner that replays a fixed list of responses and records what it saw
pub struct ScriptedPlanner {
    steps: Mutex<VecDeque<LLMResponse>>,
    seen: Mutex<Vec<Vec<Message>>>,
    temperatures: Mutex<Vec<Option<f32>>>,
    /// Installed models; `None` makes model listing fail
    models: Option<Vec<String>>,
}

impl ScriptedPlanner {
    pub fn new(steps: Vec<LLMResponse>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            seen: Mutex::new(Vec::new()),
            temperatures: Mutex::new(Vec::new()),
            models: Some(vec!["scripted".to_string()]),
        }
    }

    pub fn with_models(mut self, models: &[&str]) -> Self {
        self.models = Some(models.iter().map(|m| m.to_string()).collect());
        self
    }

    pub fn without_model_listing(mut self) -> Self {
        self.models = None;
        self
    }

    /// Transcripts received, one per planner call
    pub fn transcripts(&self) -> Vec<Vec<Message>> {
        self.seen.lock().unwrap().clone()
    }

    /// Sampling temperature requested on each planner call
    pub fn temperatures(&self) -> Vec<Option<f32>> {
        self.temperatures.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMProvider for ScriptedPlanner {
    async fn chat_with_tools(
        &self,
        _model: &str,
        messages: &[Message],
        _tools: &[ToolDefinition],
        options: Option<GenerateOptions>,
    ) -> Result<LLMResponse> {
        self.seen.lock().unwrap().push(messages.to_vec());
        self.temperatures
            .lock()
            .unwrap()
            .push(options.and_then(|o| o.temperature));
        Ok(self
            .steps
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| LLMResponse::text("script exhausted")))
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        self.models
            .clone()
            .ok_or_else(|| HateoasError::provider("model listing not supported"))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Planner that never stops calling tools
pub struct LoopingPlanner {
    pub call: hateoas_agent::core::ToolCall,
}

#[async_trait]
impl LLMProvider for LoopingPlanner {
    async fn chat_with_tools(
        &self,
        _model: &str,
        _messages: &[Message],
        _tools: &[ToolDefinition],
        _options: Option<GenerateOptions>,
    ) -> Result<LLMResponse> {
        Ok(LLMResponse::tools(vec![self.call.clone()]))
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        Ok(vec!["looping".to_string()])
    }

    fn name(&self) -> &str {
        "looping"
    }
}
