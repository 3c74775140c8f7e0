//! JSON endpoints over the tool façade.
//!
//! - `GET  /api/tools`         lists the registered tools
//! - `POST /api/tools/{name}`  runs one tool through the guarded boundary

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use ops_agent::{invoke_guarded, RequestLogger, ToolDeps, ToolRegistry};
use ops_db::DbPool;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

#[derive(Clone)]
pub struct ApiState {
    db_pool: DbPool,
    registry: Arc<ToolRegistry>,
}

impl ApiState {
    pub fn new(db_pool: DbPool) -> Self {
        Self { db_pool, registry: Arc::new(ToolRegistry::with_default_tools()) }
    }
}

#[derive(Debug, Deserialize)]
pub struct InvokeRequest {
    #[serde(default)]
    pub arguments: Value,
}

#[derive(Debug, Serialize)]
pub struct InvokeResponse {
    pub request_id: String,
    pub tool: String,
    pub status: String,
    pub output: String,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub argument: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

pub fn router(db_pool: DbPool) -> Router {
    Router::new()
        .route("/api/tools", get(list_tools))
        .route("/api/tools/{name}", post(invoke_tool))
        .with_state(ApiState::new(db_pool))
}

async fn list_tools(State(state): State<ApiState>) -> Json<Vec<ToolDescriptor>> {
    let tools = state
        .registry
        .names()
        .filter_map(|name| state.registry.get(name))
        .map(|tool| ToolDescriptor {
            name: tool.name(),
            description: tool.description(),
            argument: tool.argument(),
        })
        .collect();
    Json(tools)
}

async fn invoke_tool(
    Path(name): Path<String>,
    State(state): State<ApiState>,
    Json(body): Json<InvokeRequest>,
) -> Result<Json<InvokeResponse>, (StatusCode, Json<ApiError>)> {
    if state.registry.get(&name).is_none() {
        warn!(event_name = "api.tool.unknown", tool = %name, "unknown tool requested");
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiError { error: format!("tool `{name}` not found") }),
        ));
    }

    let logger = RequestLogger::for_new_request();
    let deps = ToolDeps::sql(state.db_pool.clone(), logger);
    let status = state.registry.status_message(&name, &body.arguments);
    info!(
        event_name = "api.tool.invoked",
        correlation_id = %deps.request_id(),
        tool = %name,
        status = %status,
        "tool invocation started"
    );

    let output = invoke_guarded(&state.registry, &deps, &name, body.arguments).await;

    Ok(Json(InvokeResponse { request_id: deps.request_id().to_string(), tool: name, status, output }))
}
