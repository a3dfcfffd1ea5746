use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use models::blog::{default_excerpt, BlogConfigUpdate, BlogPost};
use serde_json::Value;
use tracing::{info, instrument};

use crate::auth::AuthGate;
use crate::config_store::ConfigStore;
use crate::errors::ServiceError;
use crate::storage::DocumentStore;

const COLLECTION: &str = "blogs";

/// Fields accepted when creating a post.
#[derive(Clone, Debug, Default)]
pub struct NewBlogPost {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    /// Kept only if it is an array.
    pub files: Option<Value>,
}

/// Millisecond ids that never repeat within the process, even when two
/// posts are created in the same millisecond.
#[derive(Clone, Default)]
struct IdClock {
    last: Arc<AtomicI64>,
}

impl IdClock {
    fn next(&self, now_ms: i64) -> i64 {
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now_ms.max(prev + 1);
            match self.last.compare_exchange_weak(prev, candidate, Ordering::AcqRel, Ordering::Relaxed) {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Clone)]
pub struct BlogService {
    store: DocumentStore,
    config: ConfigStore,
    gate: AuthGate,
    ids: IdClock,
}

impl BlogService {
    pub fn new(store: DocumentStore, config: ConfigStore, gate: AuthGate) -> Self {
        Self { store, config, gate, ids: IdClock::default() }
    }

    /// All posts, newest first.
    pub async fn list(&self) -> Vec<BlogPost> {
        let mut posts: Vec<BlogPost> = self.store.load_all(COLLECTION).await;
        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        posts
    }

    /// Checks a password against the stored hash.
    #[instrument(skip_all, fields(action = "login"))]
    pub async fn login(&self, password: Option<&str>) -> Result<(), ServiceError> {
        let password = password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ServiceError::validation("Password is required"))?;
        let cfg = self.config.get().await?;
        if self.config.hasher().verify(password, &cfg.password) {
            info!("login accepted");
            Ok(())
        } else {
            Err(ServiceError::Unauthorized("Invalid password".into()))
        }
    }

    #[instrument(skip_all, fields(action = "create_blog"))]
    pub async fn create(&self, auth_token: Option<&str>, input: NewBlogPost) -> Result<BlogPost, ServiceError> {
        self.gate.authorize_admin(auth_token)?;

        let (title, content) = match (non_blank(input.title.as_deref()), non_blank(input.content.as_deref())) {
            (Some(t), Some(c)) => (t, c),
            _ => return Err(ServiceError::validation("Title and content are required")),
        };

        let excerpt = match non_blank(input.excerpt.as_deref()) {
            Some(e) => e.trim().to_string(),
            None => default_excerpt(content),
        };
        let files = match input.files {
            Some(Value::Array(files)) => files,
            _ => Vec::new(),
        };

        let now = Utc::now();
        let post = BlogPost {
            id: self.ids.next(now.timestamp_millis()).to_string(),
            title: title.trim().to_string(),
            content: content.trim().to_string(),
            excerpt,
            date: now,
            files,
        };
        self.store.save(COLLECTION, &post).await?;
        info!(id = %post.id, "blog created");
        Ok(post)
    }

    #[instrument(skip_all, fields(action = "delete_blog"))]
    pub async fn delete(&self, auth_token: Option<&str>, blog_id: Option<&str>) -> Result<(), ServiceError> {
        self.gate.authorize_admin(auth_token)?;
        let id = non_blank(blog_id).ok_or_else(|| ServiceError::validation("Blog ID is required"))?;
        if !crate::storage::is_valid_segment(id) {
            // cannot name a stored post
            return Err(ServiceError::not_found("Blog"));
        }
        if self.store.delete(COLLECTION, id).await? {
            info!(%id, "blog deleted");
            Ok(())
        } else {
            Err(ServiceError::not_found("Blog"))
        }
    }

    /// Replace the admin password after proving knowledge of the current one.
    #[instrument(skip_all, fields(action = "change_password"))]
    pub async fn change_password(
        &self,
        auth_token: Option<&str>,
        old_password: Option<&str>,
        new_password: Option<&str>,
    ) -> Result<(), ServiceError> {
        self.gate.authorize_admin(auth_token)?;
        let (old, new) = match (old_password.filter(|p| !p.is_empty()), new_password.filter(|p| !p.is_empty())) {
            (Some(o), Some(n)) => (o, n),
            _ => return Err(ServiceError::validation("Old and new passwords are required")),
        };

        let hasher = self.config.hasher();
        let current = self.config.get().await?;
        if !hasher.verify(old, &current.password) {
            return Err(ServiceError::Unauthorized("Current password is incorrect".into()));
        }
        self.config.set(BlogConfigUpdate { password: Some(hasher.hash(new)) }).await?;
        info!("admin password changed");
        Ok(())
    }
}
