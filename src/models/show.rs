use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Show {
    pub shows_id: i64,
    pub title: String,
    // Дата хранится строкой YYYY-MM-DD; читается через lenient-парсер
    pub date: String,
    pub venue: String,
}
