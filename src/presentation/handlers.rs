// HTTP request handlers
use crate::presentation::app_state::AppState;
use axum::{extract::State, response::Html};
use axum::body::Bytes;
use std::sync::Arc;

/// The dashboard page, identical for every request
pub async fn serve_dashboard(State(state): State<Arc<AppState>>) -> Html<Bytes> {
    Html(state.page.clone())
}
