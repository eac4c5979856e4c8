use chrono::NaiveDate;
use thiserror::Error;

/// Ошибки движка бронирования.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("store access failed: {0}")]
    Store(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Окно генерации вырождено: start позже допустимой верхней границы.
    #[error("degenerate generation window: start {start} is after {end}")]
    DegenerateWindow { start: NaiveDate, end: NaiveDate },

    /// Бронирования нельзя генерировать без клиентов и спектаклей.
    #[error("no {table} rows found, generate them first")]
    MissingRows { table: &'static str },
}

pub type EngineResult<T> = Result<T, EngineError>;
