// ============================
// authgate-lib/src/router.rs
// ============================
//! HTTP route table.
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{self, auth, profile};
use crate::middleware::require_bearer;
use crate::AppState;

/// Create the application router
///
/// Public: `POST /register`, `POST /login`, `POST /refresh`, `GET /health`.
/// Protected by [`require_bearer`]: `GET /api/profile`.
pub fn create_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/api/profile", get(profile::profile))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_bearer,
        ));

    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/health", get(handlers::health))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
