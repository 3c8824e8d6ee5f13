use std::sync::Arc;

use crate::application::services::LinkService;
use crate::infrastructure::persistence::PgLinkRepository;

/// Shared application state injected into all handlers.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<PgLinkRepository>>,
}

impl AppState {
    pub fn new(link_service: Arc<LinkService<PgLinkRepository>>) -> Self {
        Self { link_service }
    }
}
