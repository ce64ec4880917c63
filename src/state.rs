use std::sync::Arc;

use crate::database::DocumentStore;
use crate::services::token_service::TokenKeys;

/// Shared by every request through `web::Data<AppState>`
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub tokens: TokenKeys,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, tokens: TokenKeys) -> Self {
        Self { store, tokens }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}
