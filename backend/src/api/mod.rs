mod health;
mod token;

use std::sync::Arc;

use axum::{
    http::{header, Method},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::models::AppState;

pub use health::router as health_router;
pub use token::router as token_router;

/// Builds the full application: API routes, static files and middleware.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT]);

    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .nest("/api/token", token_router())
        .nest("/health", health_router())
        .fallback_service(static_files)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
}
