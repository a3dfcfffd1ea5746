//! `documents` table: one row per stored JSON document, keyed by its storage key.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    /// Storage key, e.g. `blogs/1718000000000.json` or `teams.json`.
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Raw JSON text of the document.
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
