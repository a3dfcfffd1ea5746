//! Startup wiring: turn the storage section of [`configs::AppConfig`] into a
//! live backend.

use std::sync::Arc;

use anyhow::Context;
use configs::{BackendKind, StorageConfig};
use migration::MigratorTrait;
use tracing::info;

use crate::storage::{fs::FsBackend, http_blob::HttpBlobBackend, memory::MemoryBackend, seaorm::SeaOrmBackend, BlobBackend};

/// Build the backend selected by configuration. The database backend is
/// migrated before it is returned.
pub async fn build_backend(cfg: &StorageConfig) -> anyhow::Result<Arc<dyn BlobBackend>> {
    let backend: Arc<dyn BlobBackend> = match cfg.backend {
        BackendKind::Memory => MemoryBackend::new(),
        BackendKind::File => FsBackend::new(&cfg.data_dir)
            .await
            .with_context(|| format!("preparing data dir {}", cfg.data_dir))?,
        BackendKind::Blob => HttpBlobBackend::new(&cfg.blob.base_url, &cfg.blob.token),
        BackendKind::Database => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            migration::Migrator::up(&db, None).await.context("running migrations")?;
            SeaOrmBackend::new(db)
        }
    };
    info!(backend = backend.name(), "storage backend ready");
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn builds_memory_and_file_backends() -> anyhow::Result<()> {
        let mut cfg = StorageConfig { backend: BackendKind::Memory, ..Default::default() };
        assert_eq!(build_backend(&cfg).await?.name(), "memory");

        let dir = std::env::temp_dir().join(format!("portal-runtime-{}", uuid::Uuid::new_v4()));
        cfg.backend = BackendKind::File;
        cfg.data_dir = dir.to_string_lossy().into_owned();
        let backend = build_backend(&cfg).await?;
        assert_eq!(backend.name(), "file");
        assert!(dir.is_dir());
        let _ = std::fs::remove_dir_all(&dir);
        Ok(())
    }
}
