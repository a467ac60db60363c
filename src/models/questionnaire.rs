use sqlx::FromRow;

/// One user's answer to the food questionnaire. Written once per campaign;
/// the whole table is cleared when a new campaign starts.
#[derive(Debug, Clone, FromRow)]
pub struct QuestionnaireResponse {
    pub telegram_id: i64,
    pub surname: String,
    pub will_feed: bool,
}
