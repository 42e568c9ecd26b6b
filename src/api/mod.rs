//! HTTP API exposing the agent.
//!
//! Thin request/response marshaling around [`Agent::run`]. A single agent
//! instance backs the server; runs are serialized through a mutex because
//! the agent's session (current directory) is shared mutable state.

pub mod types;

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use uuid::Uuid;

use crate::agent::Agent;
use crate::config::Config;
use crate::llm::GeminiClient;
use crate::tools::ToolRegistry;

use types::{CommandRequest, CommandResponse, HealthResponse};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    agent: Arc<Mutex<Agent>>,
}

/// Build the router and serve the API until shutdown.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let llm = Arc::new(GeminiClient::new(&config));
    let tools = ToolRegistry::builtin()?;
    let agent = Agent::new(llm, tools, &config);

    let state = AppState {
        agent: Arc::new(Mutex::new(agent)),
    };

    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/agent", post(execute_command))
        .route("/", get(root))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Execute a natural-language command and return the agent's answer.
///
/// Structural failures are logged and answered with a generic apology so the
/// caller always gets a well-formed response body.
async fn execute_command(
    State(state): State<AppState>,
    Json(request): Json<CommandRequest>,
) -> Json<CommandResponse> {
    let run_id = Uuid::new_v4();
    let command = request.msg.trim().to_string();
    info!(%run_id, "Received command");

    let mut agent = state.agent.lock().await;
    match agent.run(&command).await {
        Ok(result) => {
            info!(%run_id, "Command completed");
            Json(CommandResponse { msg: result })
        }
        Err(e) => {
            error!(%run_id, error = %e, "Command failed");
            Json(CommandResponse {
                msg: "Couldn't process the request, rephrase it and try again!".to_string(),
            })
        }
    }
}

async fn root() -> Json<CommandResponse> {
    Json(CommandResponse {
        msg: "Welcome to the LLM Command Execution API!".to_string(),
    })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
