// Application state for HTTP handlers
use axum::body::Bytes;

/// The rendered page, built once before the listener starts.
#[derive(Clone)]
pub struct AppState {
    pub page: Bytes,
}

impl AppState {
    pub fn new(page: String) -> Self {
        Self {
            page: Bytes::from(page),
        }
    }
}
