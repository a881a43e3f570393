use std::collections::BTreeMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tokio::sync::RwLock;

use crate::entity::website;

/// Durable storage of website records.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Insert a new record. Fails if the id is already taken.
    async fn insert(&self, record: website::Model) -> Result<website::Model, DbErr>;

    async fn find(&self, id: &str) -> Result<Option<website::Model>, DbErr>;

    /// Records owned by `owner_id`, newest first.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<website::Model>, DbErr>;

    /// Delete the record matching both `id` and `owner_id`; returns rows affected.
    async fn delete(&self, id: &str, owner_id: &str) -> Result<u64, DbErr>;
}

/// PostgreSQL-backed metadata store.
#[derive(Clone)]
pub struct SeaOrmMetadataStore {
    db: DatabaseConnection,
}

impl SeaOrmMetadataStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MetadataStore for SeaOrmMetadataStore {
    async fn insert(&self, record: website::Model) -> Result<website::Model, DbErr> {
        let model = website::ActiveModel {
            id: Set(record.id),
            owner_id: Set(record.owner_id),
            name: Set(record.name),
            url: Set(record.url),
            created_at: Set(record.created_at),
        };
        model.insert(&self.db).await
    }

    async fn find(&self, id: &str) -> Result<Option<website::Model>, DbErr> {
        website::Entity::find_by_id(id.to_owned()).one(&self.db).await
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<website::Model>, DbErr> {
        website::Entity::find()
            .filter(website::Column::OwnerId.eq(owner_id))
            .order_by_desc(website::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    async fn delete(&self, id: &str, owner_id: &str) -> Result<u64, DbErr> {
        let result = website::Entity::delete_many()
            .filter(website::Column::Id.eq(id))
            .filter(website::Column::OwnerId.eq(owner_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}

/// In-process metadata store for tests and local development.
#[derive(Default)]
pub struct InMemoryMetadataStore {
    rows: RwLock<BTreeMap<String, website::Model>>,
}

impl InMemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl MetadataStore for InMemoryMetadataStore {
    async fn insert(&self, record: website::Model) -> Result<website::Model, DbErr> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&record.id) {
            return Err(DbErr::Custom(format!(
                "duplicate key: website '{}' already exists",
                record.id
            )));
        }
        rows.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn find(&self, id: &str) -> Result<Option<website::Model>, DbErr> {
        Ok(self.rows.read().await.get(id).cloned())
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<website::Model>, DbErr> {
        let mut owned: Vec<website::Model> = self
            .rows
            .read()
            .await
            .values()
            .filter(|row| row.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn delete(&self, id: &str, owner_id: &str) -> Result<u64, DbErr> {
        let mut rows = self.rows.write().await;
        match rows.get(id) {
            Some(row) if row.owner_id == owner_id => {
                rows.remove(id);
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}
