pub mod handlers;
mod types;

pub use types::{ChatRequest, ChatResponse, ErrorResponse};

use crate::{Result, config::Config, llm::OpenAiClient};
use axum::{
    Router,
    http::{Method, header},
    routing::post,
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Builds the relay router. The panic boundary sits inside the CORS layer:
/// converted panic responses must still carry the cross-origin headers.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            "/chat",
            post(handlers::chat)
                .options(handlers::preflight)
                .fallback(handlers::method_not_allowed),
        )
        .layer(CatchPanicLayer::custom(handlers::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    let client = OpenAiClient::new(config.llm.clone());
    let state = AppState {
        config: Arc::new(config),
        client: Arc::new(client),
    };

    let app = router(state);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
