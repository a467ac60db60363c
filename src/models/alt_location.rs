use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Admin-curated secondary address that counts as a known whereabouts for
/// reporting. A user may have several; they are matched in insertion order.
#[derive(Debug, Clone, FromRow)]
pub struct AlternativeLocation {
    pub id: Uuid,
    pub telegram_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}
