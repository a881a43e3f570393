use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "website")]
pub struct Model {
    /// 10-character URL-safe public id; also the storage prefix segment.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Opaque id of the uploading user.
    pub owner_id: String,

    pub name: String,

    /// Canonical public path, `/sites/{id}`.
    pub url: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
