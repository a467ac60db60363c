use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Today's location mark for one user. The table holds only the current day
/// and is bulk-cleared after the evening report, so the user id alone is the
/// primary key.
#[derive(Debug, Clone, FromRow)]
pub struct TodayControl {
    pub telegram_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}
