//! Singleton blog configuration (admin password hash).

use chrono::Utc;
use models::blog::{BlogConfig, BlogConfigUpdate};
use tracing::{info, warn};

use crate::auth::PasswordHasher;
use crate::storage::{DocumentStore, StorageError};

const COLLECTION: &str = "config";
const ID: &str = "blog";

/// Reads and writes the blog config document, provisioning a default on
/// first access.
///
/// Two concurrent first reads may both provision; both write the same hash,
/// so the last write wins harmlessly.
#[derive(Clone)]
pub struct ConfigStore {
    store: DocumentStore,
    hasher: PasswordHasher,
}

impl ConfigStore {
    pub fn new(store: DocumentStore, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    fn default_config(&self) -> BlogConfig {
        BlogConfig { password: self.hasher.default_hash(), last_updated: Utc::now() }
    }

    /// The stored config. A missing document is provisioned and persisted;
    /// a document that exists but cannot be read is an error, never the
    /// default.
    pub async fn get(&self) -> Result<BlogConfig, StorageError> {
        if let Some(cfg) = self.store.load_one::<BlogConfig>(COLLECTION, ID).await? {
            return Ok(cfg);
        }
        let cfg = self.default_config();
        match self.store.save(COLLECTION, &cfg).await {
            Ok(()) => info!(collection = COLLECTION, "default blog config provisioned"),
            Err(e) => warn!(collection = COLLECTION, error = %e, "could not persist default blog config"),
        }
        Ok(cfg)
    }

    /// Merge `update` into the stored config and persist it; `lastUpdated`
    /// is always refreshed. `update.password` is expected to be a hash.
    pub async fn set(&self, update: BlogConfigUpdate) -> Result<BlogConfig, StorageError> {
        let mut cfg = match self.store.load_one::<BlogConfig>(COLLECTION, ID).await? {
            Some(cfg) => cfg,
            None => self.default_config(),
        };
        if let Some(password) = update.password {
            cfg.password = password;
        }
        cfg.last_updated = Utc::now();
        self.store.save(COLLECTION, &cfg).await?;
        info!(collection = COLLECTION, "blog config updated");
        Ok(cfg)
    }
}
