use async_trait::async_trait;
use uuid::Uuid;

use crate::models::alt_location::AlternativeLocation;
use crate::models::control::TodayControl;
use crate::models::questionnaire::QuestionnaireResponse;
use crate::models::user::User;

use super::{queries, DbPool, Store, StoreError};

/// Postgres-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_insert_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => StoreError::Duplicate,
        other => StoreError::Database(other),
    }
}

#[async_trait]
impl Store for PgStore {
    async fn get_user(&self, telegram_id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(queries::SELECT_USER_BY_TELEGRAM_ID)
            .bind(telegram_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(queries::SELECT_ALL_USERS)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn create_user(
        &self,
        telegram_id: i64,
        surname: &str,
        home_latitude: f64,
        home_longitude: f64,
    ) -> Result<(), StoreError> {
        sqlx::query(queries::INSERT_USER)
            .bind(telegram_id)
            .bind(surname)
            .bind(home_latitude)
            .bind(home_longitude)
            .execute(&self.pool)
            .await
            .map_err(map_insert_error)?;
        Ok(())
    }

    async fn delete_user(&self, telegram_id: i64) -> Result<bool, StoreError> {
        // Related rows go away through ON DELETE CASCADE.
        let result = sqlx::query(queries::DELETE_USER)
            .bind(telegram_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_today_control(
        &self,
        telegram_id: i64,
    ) -> Result<Option<TodayControl>, StoreError> {
        let control = sqlx::query_as::<_, TodayControl>(queries::SELECT_TODAY_CONTROL)
            .bind(telegram_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(control)
    }

    async fn create_today_control(
        &self,
        telegram_id: i64,
        latitude: f64,
        longitude: f64,
    ) -> Result<(), StoreError> {
        sqlx::query(queries::INSERT_TODAY_CONTROL)
            .bind(telegram_id)
            .bind(latitude)
            .bind(longitude)
            .execute(&self.pool)
            .await
            .map_err(map_insert_error)?;
        Ok(())
    }

    async fn list_today_controls(&self) -> Result<Vec<TodayControl>, StoreError> {
        let controls = sqlx::query_as::<_, TodayControl>(queries::SELECT_ALL_TODAY_CONTROLS)
            .fetch_all(&self.pool)
            .await?;
        Ok(controls)
    }

    async fn clear_today_controls(&self) -> Result<(), StoreError> {
        sqlx::query(queries::DELETE_ALL_TODAY_CONTROLS)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_alternative_locations(
        &self,
        telegram_id: i64,
    ) -> Result<Vec<AlternativeLocation>, StoreError> {
        let locations =
            sqlx::query_as::<_, AlternativeLocation>(queries::SELECT_ALTERNATIVE_LOCATIONS)
                .bind(telegram_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(locations)
    }

    async fn create_alternative_location(
        &self,
        telegram_id: i64,
        latitude: f64,
        longitude: f64,
        comment: Option<&str>,
    ) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        sqlx::query(queries::INSERT_ALTERNATIVE_LOCATION)
            .bind(id)
            .bind(telegram_id)
            .bind(latitude)
            .bind(longitude)
            .bind(comment)
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn delete_alternative_location(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query(queries::DELETE_ALTERNATIVE_LOCATION)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_questionnaire(
        &self,
        telegram_id: i64,
    ) -> Result<Option<QuestionnaireResponse>, StoreError> {
        let response = sqlx::query_as::<_, QuestionnaireResponse>(queries::SELECT_QUESTIONNAIRE)
            .bind(telegram_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(response)
    }

    async fn create_questionnaire(
        &self,
        telegram_id: i64,
        surname: &str,
        will_feed: bool,
    ) -> Result<(), StoreError> {
        sqlx::query(queries::INSERT_QUESTIONNAIRE)
            .bind(telegram_id)
            .bind(surname)
            .bind(will_feed)
            .execute(&self.pool)
            .await
            .map_err(map_insert_error)?;
        Ok(())
    }

    async fn list_questionnaires(&self) -> Result<Vec<QuestionnaireResponse>, StoreError> {
        let responses = sqlx::query_as::<_, QuestionnaireResponse>(queries::SELECT_ALL_QUESTIONNAIRES)
            .fetch_all(&self.pool)
            .await?;
        Ok(responses)
    }

    async fn clear_questionnaires(&self) -> Result<(), StoreError> {
        sqlx::query(queries::DELETE_ALL_QUESTIONNAIRES)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
