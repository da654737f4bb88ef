// Router setup
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::serve_dashboard;
use axum::Router;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

/// Every path answers with the dashboard page.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .fallback(serve_dashboard)
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
