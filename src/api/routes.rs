//! API route configuration.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, list_links_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// CRUD routes for link management.
///
/// # Endpoints
///
/// - `GET    /links`        - List links, newest first
/// - `POST   /links`        - Create a link (custom or generated code)
/// - `GET    /links/{code}` - Fetch a single link
/// - `DELETE /links/{code}` - Permanently delete a link
///
/// Unsupported methods on these paths get a 405 with an `Allow` header from
/// the method router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{code}",
            get(get_link_handler).delete(delete_link_handler),
        )
}
