use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::errors::ModelError;

/// Open a pooled connection for the `documents` table.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> Result<DatabaseConnection, ModelError> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opts).await.map_err(|e| ModelError::Db(e.to_string()))?;
    info!(backend = ?db.get_database_backend(), "database connected");
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document;
    use migration::MigratorTrait;
    use sea_orm::{ActiveModelTrait, EntityTrait, Set};

    #[tokio::test]
    async fn sqlite_documents_table_round_trips() -> anyhow::Result<()> {
        let path = std::env::temp_dir().join(format!("portal-models-{}.db", uuid::Uuid::new_v4()));
        let cfg = DatabaseConfig { url: format!("sqlite://{}?mode=rwc", path.display()), ..Default::default() };
        let db = connect_with_config(&cfg).await?;
        migration::Migrator::up(&db, None).await?;

        document::ActiveModel {
            key: Set("teams.json".into()),
            body: Set("{}".into()),
            updated_at: Set(chrono::Utc::now().into()),
        }
        .insert(&db)
        .await?;

        let found = document::Entity::find_by_id("teams.json".to_string()).one(&db).await?;
        assert_eq!(found.map(|m| m.body), Some("{}".to_string()));

        drop(db);
        let _ = std::fs::remove_file(&path);
        Ok(())
    }
}
