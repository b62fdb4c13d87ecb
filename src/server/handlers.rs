use super::types::{ChatRequest, ChatResponse, ErrorResponse};
use crate::{Error, config::Config, llm::CompletionClient};
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: Arc<dyn CompletionClient>,
}

/// Relay endpoint: credential check, input validation, one upstream call,
/// normalized response. The body is taken raw so every rejection produces the
/// same JSON error contract instead of an extractor-shaped reply.
pub async fn chat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    // Short-circuits before any parsing or network activity.
    let Some(api_key) = state.config.llm.api_key.clone() else {
        error!("Rejecting chat request: OPENAI_API_KEY is not configured");
        return Err(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "OpenAI API key not configured",
        ));
    };

    let message = match serde_json::from_slice::<ChatRequest>(&body) {
        Ok(request) if !request.message.is_empty() => request.message,
        _ => {
            warn!("Rejecting chat request with missing or invalid message");
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "Message is required",
            ));
        }
    };

    // Message content is never logged, only its size.
    info!("Relaying chat message ({} bytes)", message.len());

    match state.client.complete(&api_key, &message).await {
        Ok(text) => {
            info!("Relayed completion ({} bytes)", text.len());
            Ok(Json(ChatResponse { response: text }))
        }
        Err(Error::Upstream(reason)) => {
            error!("Upstream completion failed: {}", reason);
            Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, reason))
        }
        Err(e) => {
            error!("Unexpected error while relaying chat message: {}", e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
            ))
        }
    }
}

/// Bare OPTIONS requests that are not browser preflights (those are answered
/// by the CORS layer) still get an empty 200.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> (StatusCode, Json<ErrorResponse>) {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

/// Outermost fault boundary: a panic anywhere in the request path becomes a
/// generic 500 with the detail kept server-side.
pub fn panic_response(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Request handling panicked: {}", detail);

    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
}

fn error_response(
    status: StatusCode,
    message: impl Into<String>,
) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}
