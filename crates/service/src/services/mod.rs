//! One service per portal resource, each composing the [`AuthGate`] with the
//! shared [`DocumentStore`].

pub mod blog;
pub mod events;
pub mod mappings;
pub mod stats;
pub mod teams;
pub mod token;

use crate::auth::{AuthGate, PasswordHasher};
use crate::config_store::ConfigStore;
use crate::storage::DocumentStore;

pub use blog::{BlogService, NewBlogPost};
pub use events::{EventService, EventsListing};
pub use mappings::{MappingService, MappingsListing};
pub use stats::{StatsListing, StatsService};
pub use teams::{TeamService, TeamsListing};
pub use token::TokenService;

/// Every resource service wired to the same store and secrets.
#[derive(Clone)]
pub struct Services {
    pub blog: BlogService,
    pub events: EventService,
    pub teams: TeamService,
    pub mappings: MappingService,
    pub stats: StatsService,
    pub token: TokenService,
}

impl Services {
    pub fn new(store: DocumentStore, auth: &configs::AuthConfig) -> Self {
        let gate = AuthGate::from_config(auth);
        let config = ConfigStore::new(store.clone(), PasswordHasher::new(auth.blog_salt.clone()));
        Self {
            blog: BlogService::new(store.clone(), config.clone(), gate.clone()),
            events: EventService::new(store.clone(), gate.clone()),
            teams: TeamService::new(store.clone(), gate.clone()),
            mappings: MappingService::new(store.clone(), gate.clone()),
            stats: StatsService::new(store, gate.clone()),
            token: TokenService::new(config, gate),
        }
    }
}

/// Decode a bot-supplied JSON payload, reporting shape errors as validation
/// failures.
pub(crate) fn decode<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<T, crate::errors::ServiceError> {
    serde_json::from_value(value).map_err(|e| crate::errors::ServiceError::validation(format!("Invalid payload: {e}")))
}
