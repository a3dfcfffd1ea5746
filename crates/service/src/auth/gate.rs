use tracing::warn;

use super::errors::GateError;

pub const ADMIN_NOT_CONFIGURED: &str = "Admin token not configured.";
pub const BOT_NOT_CONFIGURED: &str = "Bot secret not configured.";

/// Compares caller-supplied credentials with the secrets loaded at startup.
///
/// Comparison is plain string equality.
#[derive(Clone, Default)]
pub struct AuthGate {
    admin_token: Option<String>,
    bot_secret: Option<String>,
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("admin_token", &self.admin_token.as_ref().map(|_| "<redacted>"))
            .field("bot_secret", &self.bot_secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl AuthGate {
    pub fn new(admin_token: Option<String>, bot_secret: Option<String>) -> Self {
        Self { admin_token, bot_secret }
    }

    pub fn from_config(cfg: &configs::AuthConfig) -> Self {
        Self::new(cfg.admin_token.clone(), cfg.bot_secret.clone())
    }

    /// The configured admin token, handed out by the token endpoint.
    pub fn admin_token(&self) -> Option<&str> {
        self.admin_token.as_deref()
    }

    /// Passes iff an admin token is configured and `supplied` equals it.
    pub fn authorize_admin(&self, supplied: Option<&str>) -> Result<(), GateError> {
        let expected = self.admin_token.as_deref().ok_or(GateError::NotConfigured(ADMIN_NOT_CONFIGURED))?;
        if supplied == Some(expected) {
            Ok(())
        } else {
            warn!(gate = "admin", "authorization rejected");
            Err(GateError::Unauthorized)
        }
    }

    /// Passes iff a bot secret is configured and the raw `Authorization`
    /// header value is exactly `Bearer <secret>`.
    pub fn authorize_bot(&self, header: Option<&str>) -> Result<(), GateError> {
        let secret = self.bot_secret.as_deref().ok_or(GateError::NotConfigured(BOT_NOT_CONFIGURED))?;
        let passes = header
            .and_then(|h| h.strip_prefix("Bearer "))
            .is_some_and(|token| token == secret);
        if passes {
            Ok(())
        } else {
            warn!(gate = "bot", "authorization rejected");
            Err(GateError::Unauthorized)
        }
    }
}
