// ============================
// authgate-lib/src/handlers/profile.rs
// ============================
//! Handlers behind the bearer middleware.
use authgate_common::ProfileResponse;
use axum::{Extension, Json};

use crate::middleware::AuthenticatedUser;

/// GET /api/profile
pub async fn profile(Extension(user): Extension<AuthenticatedUser>) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        user: user.username,
    })
}
