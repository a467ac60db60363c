use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use thiserror::Error;
use uuid::Uuid;

use crate::models::alt_location::AlternativeLocation;
use crate::models::control::TodayControl;
use crate::models::questionnaire::QuestionnaireResponse;
use crate::models::user::User;

pub mod memory;
pub mod postgres;
pub mod queries;

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub type DbPool = Pool<Postgres>;

pub async fn init_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Creates the tables on startup when they are missing.
pub async fn ensure_schema(pool: &DbPool) -> Result<()> {
    sqlx::query(queries::CREATE_USERS_TABLE).execute(pool).await?;
    sqlx::query(queries::CREATE_TODAY_CONTROL_TABLE)
        .execute(pool)
        .await?;
    sqlx::query(queries::CREATE_ALTERNATIVE_LOCATIONS_TABLE)
        .execute(pool)
        .await?;
    sqlx::query(queries::CREATE_QUESTIONNAIRE_TABLE)
        .execute(pool)
        .await?;
    Ok(())
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with the same key already exists. Inserts into keyed tables
    /// (today's control mark, questionnaire answer) surface storage-level
    /// unique violations as this variant.
    #[error("record already exists")]
    Duplicate,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Record contract the rest of the crate works against.
///
/// Every call is a single atomic operation and returns an explicit absence
/// (`Option`/`bool`) rather than partial results. `clear_*` calls are the only
/// bulk mutations.
#[async_trait]
pub trait Store: Send + Sync {
    async fn get_user(&self, telegram_id: i64) -> Result<Option<User>, StoreError>;
    /// All users in registration order.
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;
    async fn create_user(
        &self,
        telegram_id: i64,
        surname: &str,
        home_latitude: f64,
        home_longitude: f64,
    ) -> Result<(), StoreError>;
    /// Deletes a user together with their control mark, alternative
    /// locations and questionnaire answer. Returns whether the user existed.
    async fn delete_user(&self, telegram_id: i64) -> Result<bool, StoreError>;

    async fn get_today_control(&self, telegram_id: i64)
        -> Result<Option<TodayControl>, StoreError>;
    async fn create_today_control(
        &self,
        telegram_id: i64,
        latitude: f64,
        longitude: f64,
    ) -> Result<(), StoreError>;
    async fn list_today_controls(&self) -> Result<Vec<TodayControl>, StoreError>;
    async fn clear_today_controls(&self) -> Result<(), StoreError>;

    /// One user's alternative locations in insertion order.
    async fn list_alternative_locations(
        &self,
        telegram_id: i64,
    ) -> Result<Vec<AlternativeLocation>, StoreError>;
    async fn create_alternative_location(
        &self,
        telegram_id: i64,
        latitude: f64,
        longitude: f64,
        comment: Option<&str>,
    ) -> Result<Uuid, StoreError>;
    async fn delete_alternative_location(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn get_questionnaire(
        &self,
        telegram_id: i64,
    ) -> Result<Option<QuestionnaireResponse>, StoreError>;
    async fn create_questionnaire(
        &self,
        telegram_id: i64,
        surname: &str,
        will_feed: bool,
    ) -> Result<(), StoreError>;
    async fn list_questionnaires(&self) -> Result<Vec<QuestionnaireResponse>, StoreError>;
    async fn clear_questionnaires(&self) -> Result<(), StoreError>;
}
