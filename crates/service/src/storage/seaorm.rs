use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use models::document;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::{validate_key, BlobBackend, StorageError};

fn db_err(e: sea_orm::DbErr) -> StorageError {
    StorageError::Db(e.to_string())
}

/// Relational backend over the `documents` table.
pub struct SeaOrmBackend {
    pub db: DatabaseConnection,
}

impl SeaOrmBackend {
    pub fn new(db: DatabaseConnection) -> Arc<Self> {
        Arc::new(Self { db })
    }
}

#[async_trait]
impl BlobBackend for SeaOrmBackend {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        validate_key(key)?;
        let row = document::Entity::find_by_id(key.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(row.map(|r| r.body.into_bytes()))
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        validate_key(key)?;
        let body = String::from_utf8(bytes)
            .map_err(|e| StorageError::Db(format!("document {key} is not UTF-8: {e}")))?;
        let am = document::ActiveModel {
            key: Set(key.to_string()),
            body: Set(body),
            updated_at: Set(Utc::now().into()),
        };
        document::Entity::insert(am)
            .on_conflict(
                OnConflict::column(document::Column::Key)
                    .update_columns([document::Column::Body, document::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        validate_key(key)?;
        let res = document::Entity::delete_by_id(key.to_string())
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(res.rows_affected > 0)
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let keys: Vec<String> = document::Entity::find()
            .select_only()
            .column(document::Column::Key)
            .filter(document::Column::Key.starts_with(prefix))
            .order_by_asc(document::Column::Key)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err)?;
        // LIKE treats `_` as a wildcard
        Ok(keys.into_iter().filter(|k| k.starts_with(prefix)).collect())
    }
}
