//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Behavior
///
/// The visit is recorded synchronously in the same atomic store operation
/// that resolves the code, then a `302 Found` with a `Location` header and
/// an empty body is returned. Exactly one increment happens per request; an
/// unknown code yields 404 with no record created.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let target = state.link_service.resolve_and_record_visit(&code).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, target)]))
}
