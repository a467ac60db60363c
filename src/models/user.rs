use sqlx::FromRow;

/// Registered user with the home coordinate captured at registration.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub telegram_id: i64,
    pub surname: String,
    pub home_latitude: f64,
    pub home_longitude: f64,
}
