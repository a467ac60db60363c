use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::alt_location::AlternativeLocation;
use crate::models::control::TodayControl;
use crate::models::questionnaire::QuestionnaireResponse;
use crate::models::user::User;

use super::{Store, StoreError};

/// In-memory store with the same contract as the Postgres one, including the
/// duplicate-key behavior of the keyed tables. Used by the test suite and for
/// running the service without a database.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    controls: Vec<TodayControl>,
    alternatives: Vec<AlternativeLocation>,
    questionnaires: Vec<QuestionnaireResponse>,
    next_user_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_user(&self, telegram_id: i64) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .users
            .iter()
            .find(|u| u.telegram_id == telegram_id)
            .cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.inner.lock().unwrap().users.clone())
    }

    async fn create_user(
        &self,
        telegram_id: i64,
        surname: &str,
        home_latitude: f64,
        home_longitude: f64,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.users.iter().any(|u| u.telegram_id == telegram_id) {
            return Err(StoreError::Duplicate);
        }
        inner.next_user_id += 1;
        let id = inner.next_user_id;
        inner.users.push(User {
            id,
            telegram_id,
            surname: surname.to_string(),
            home_latitude,
            home_longitude,
        });
        Ok(())
    }

    async fn delete_user(&self, telegram_id: i64) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.users.len();
        inner.users.retain(|u| u.telegram_id != telegram_id);
        if inner.users.len() == before {
            return Ok(false);
        }
        inner.controls.retain(|c| c.telegram_id != telegram_id);
        inner.alternatives.retain(|a| a.telegram_id != telegram_id);
        inner.questionnaires.retain(|q| q.telegram_id != telegram_id);
        Ok(true)
    }

    async fn get_today_control(
        &self,
        telegram_id: i64,
    ) -> Result<Option<TodayControl>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .controls
            .iter()
            .find(|c| c.telegram_id == telegram_id)
            .cloned())
    }

    async fn create_today_control(
        &self,
        telegram_id: i64,
        latitude: f64,
        longitude: f64,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.controls.iter().any(|c| c.telegram_id == telegram_id) {
            return Err(StoreError::Duplicate);
        }
        inner.controls.push(TodayControl {
            telegram_id,
            latitude,
            longitude,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn list_today_controls(&self) -> Result<Vec<TodayControl>, StoreError> {
        Ok(self.inner.lock().unwrap().controls.clone())
    }

    async fn clear_today_controls(&self) -> Result<(), StoreError> {
        self.inner.lock().unwrap().controls.clear();
        Ok(())
    }

    async fn list_alternative_locations(
        &self,
        telegram_id: i64,
    ) -> Result<Vec<AlternativeLocation>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .alternatives
            .iter()
            .filter(|a| a.telegram_id == telegram_id)
            .cloned()
            .collect())
    }

    async fn create_alternative_location(
        &self,
        telegram_id: i64,
        latitude: f64,
        longitude: f64,
        comment: Option<&str>,
    ) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        self.inner.lock().unwrap().alternatives.push(AlternativeLocation {
            id,
            telegram_id,
            latitude,
            longitude,
            comment: comment.map(str::to_string),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn delete_alternative_location(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.alternatives.len();
        inner.alternatives.retain(|a| a.id != id);
        Ok(inner.alternatives.len() != before)
    }

    async fn get_questionnaire(
        &self,
        telegram_id: i64,
    ) -> Result<Option<QuestionnaireResponse>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .questionnaires
            .iter()
            .find(|q| q.telegram_id == telegram_id)
            .cloned())
    }

    async fn create_questionnaire(
        &self,
        telegram_id: i64,
        surname: &str,
        will_feed: bool,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner
            .questionnaires
            .iter()
            .any(|q| q.telegram_id == telegram_id)
        {
            return Err(StoreError::Duplicate);
        }
        inner.questionnaires.push(QuestionnaireResponse {
            telegram_id,
            surname: surname.to_string(),
            will_feed,
        });
        Ok(())
    }

    async fn list_questionnaires(&self) -> Result<Vec<QuestionnaireResponse>, StoreError> {
        Ok(self.inner.lock().unwrap().questionnaires.clone())
    }

    async fn clear_questionnaires(&self) -> Result<(), StoreError> {
        self.inner.lock().unwrap().questionnaires.clear();
        Ok(())
    }
}
