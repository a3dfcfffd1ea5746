use tracing::{info, instrument};

use crate::auth::AuthGate;
use crate::config_store::ConfigStore;
use crate::errors::ServiceError;

pub const TOKEN_NOT_CONFIGURED: &str = "Token not configured. Please set ADMIN_TOKEN.";

/// Hands the admin token to a caller who knows the admin password.
#[derive(Clone)]
pub struct TokenService {
    config: ConfigStore,
    gate: AuthGate,
}

impl TokenService {
    pub fn new(config: ConfigStore, gate: AuthGate) -> Self {
        Self { config, gate }
    }

    #[instrument(skip_all, fields(action = "get_token"))]
    pub async fn issue(&self, password: Option<&str>) -> Result<String, ServiceError> {
        let token = self
            .gate
            .admin_token()
            .ok_or_else(|| ServiceError::NotConfigured(TOKEN_NOT_CONFIGURED.into()))?
            .to_string();
        let password = password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ServiceError::validation("Password is required"))?;
        let cfg = self.config.get().await?;
        if !self.config.hasher().verify(password, &cfg.password) {
            return Err(ServiceError::Forbidden("Forbidden".into()));
        }
        info!("admin token issued");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::BlobBackend;
    use crate::test_support::{auth_config, services, services_with, ADMIN};

    #[tokio::test]
    async fn issues_token_only_for_correct_password() -> anyhow::Result<()> {
        let (svc, _) = services();
        assert_eq!(svc.token.issue(Some("admin123")).await?, ADMIN);
        assert!(matches!(svc.token.issue(Some("guess")).await, Err(ServiceError::Forbidden(_))));
        assert!(matches!(svc.token.issue(None).await, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn unconfigured_token_is_reported_first() {
        let (svc, _) = services_with(configs::AuthConfig { admin_token: None, ..auth_config() });
        assert!(matches!(svc.token.issue(Some("admin123")).await, Err(ServiceError::NotConfigured(_))));
    }

    #[tokio::test]
    async fn unreadable_config_issues_no_token() -> anyhow::Result<()> {
        let (svc, backend) = services();
        backend.put("config/blog.json", br#"{"password":"#.to_vec()).await?;
        assert!(matches!(svc.token.issue(Some("admin123")).await, Err(ServiceError::Storage(_))));
        Ok(())
    }
}
