//! MCP gateway HTTP server: health, SSE transport, and message intake.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::{Stream, StreamExt};
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use uuid::Uuid;

use abagenta_core::ToolRegistry;

use crate::rpc::{self, JsonRpcRequest};
use crate::session::SessionRegistry;

/// Shared state for all gateway routes.
#[derive(Clone)]
pub struct GatewayState {
    pub registry: Arc<ToolRegistry>,
    pub sessions: Arc<SessionRegistry>,
    pub test_mode: bool,
    pub debug: bool,
}

pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/sse", get(sse_handler))
        .route("/message", post(message_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the Axum HTTP server for the MCP gateway.
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = build_router(state);
    info!("aB-Agenta MCP server listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health_handler(State(state): State<GatewayState>) -> impl IntoResponse {
    Json(json!({ "status": "ok", "testMode": state.test_mode }))
}

/// GET /sse — open an MCP session. The first event names the message
/// endpoint for this session; JSON-RPC responses follow on the same stream.
async fn sse_handler(
    State(state): State<GatewayState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (id, rx) = state.sessions.open().await;
    info!(session = %id, "New SSE connection established");

    let endpoint = Event::default()
        .event("endpoint")
        .data(format!("/message?sessionId={id}"));
    let stream = tokio_stream::once(Ok(endpoint)).chain(
        ReceiverStream::new(rx)
            .map(|message| Ok(Event::default().event("message").data(message))),
    );

    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[derive(Debug, Deserialize)]
struct MessageParams {
    #[serde(rename = "sessionId")]
    session_id: Option<Uuid>,
}

/// POST /message?sessionId= — handle one JSON-RPC request. With a session,
/// the response travels over that session's SSE stream and the POST returns
/// 202; without one, the response is returned inline so plain HTTP clients
/// can still talk JSON-RPC.
async fn message_handler(
    State(state): State<GatewayState>,
    Query(params): Query<MessageParams>,
    body: String,
) -> axum::response::Response {
    let request: JsonRpcRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(err) => {
            error!(error = %err, "Unparseable JSON-RPC message");
            let reply = rpc::error_response(None, rpc::PARSE_ERROR, "Parse error");
            return (StatusCode::BAD_REQUEST, Json(reply)).into_response();
        }
    };

    let reply = rpc::handle(&state, request).await;

    match (params.session_id, reply) {
        (Some(session), Some(reply)) => {
            if state.sessions.push(session, reply.to_string()).await {
                StatusCode::ACCEPTED.into_response()
            } else {
                (StatusCode::NOT_FOUND, "Unknown or closed session").into_response()
            }
        }
        (None, Some(reply)) => Json(reply).into_response(),
        (_, None) => StatusCode::ACCEPTED.into_response(),
    }
}
