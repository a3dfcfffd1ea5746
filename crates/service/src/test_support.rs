#![cfg(test)]
use std::sync::Arc;

use crate::services::Services;
use crate::storage::{memory::MemoryBackend, DocumentStore};

pub const ADMIN: &str = "admin-token";
pub const BOT: &str = "bot-secret";
pub const BOT_HEADER: &str = "Bearer bot-secret";
pub const SALT: &str = "test-salt";

pub fn auth_config() -> configs::AuthConfig {
    configs::AuthConfig {
        admin_token: Some(ADMIN.to_string()),
        bot_secret: Some(BOT.to_string()),
        blog_salt: SALT.to_string(),
    }
}

/// Services over a fresh in-memory backend, with both secrets configured.
pub fn services() -> (Services, Arc<MemoryBackend>) {
    services_with(auth_config())
}

pub fn services_with(auth: configs::AuthConfig) -> (Services, Arc<MemoryBackend>) {
    let backend = MemoryBackend::new();
    let store = DocumentStore::new(backend.clone());
    (Services::new(store, &auth), backend)
}
