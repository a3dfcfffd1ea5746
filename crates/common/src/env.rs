//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::info;

/// Ensure the local data directory exists before a file backend writes into it.
pub async fn ensure_data_dir(data_dir: &str) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    info!(%data_dir, "data directory ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_nested_data_dir() -> anyhow::Result<()> {
        let root = std::env::temp_dir().join(format!("portal_env_{}", uuid::Uuid::new_v4()));
        let nested = root.join("a/b");
        ensure_data_dir(nested.to_str().unwrap()).await?;
        assert!(tokio::fs::metadata(&nested).await?.is_dir());
        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }
}
