//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the catalog, tool execution, the SVG download
//! endpoints and the clock websocket. Every route shares `AppState`.

pub mod clock;
pub mod tools;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let body_limit = DefaultBodyLimit::max(state.config.max_body_bytes);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/categories", get(tools::list_categories))
        .route("/api/tools", get(tools::list_tools))
        .route("/api/tools/qr_code/svg", get(tools::qr_svg))
        .route("/api/tools/barcode/svg", get(tools::barcode_svg))
        .route("/api/tools/{id}", get(tools::describe_tool).post(tools::run_tool))
        .route("/api/clock/ws", get(clock::handle_clock_ws))
        .layer(body_limit)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
