use chrono::NaiveDate;
use serde::Deserialize;
use std::env;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub generator: GeneratorConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub rust_log: String,
}

// Настройки базы данных
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
}

// Настройки генератора данных: объёмы и окно дат
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    pub customers: u32,
    pub shows: u32,
    pub bookings: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            app: AppConfig {
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "theatre_booking=info".to_string()),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite:system.db?mode=rwc".to_string()),
                pool_size: env::var("DB_POOL_SIZE")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .expect("DB_POOL_SIZE must be a valid number"),
            },
            generator: GeneratorConfig {
                customers: env::var("GEN_CUSTOMERS")
                    .unwrap_or_else(|_| "100".to_string())
                    .parse()
                    .expect("GEN_CUSTOMERS must be a valid number"),
                shows: env::var("GEN_SHOWS")
                    .unwrap_or_else(|_| "20".to_string())
                    .parse()
                    .expect("GEN_SHOWS must be a valid number"),
                bookings: env::var("GEN_BOOKINGS")
                    .unwrap_or_else(|_| "200".to_string())
                    .parse()
                    .expect("GEN_BOOKINGS must be a valid number"),
                start_date: window_date("GEN_START_DATE", NaiveDate::from_ymd_opt(2023, 1, 1)),
                end_date: window_date("GEN_END_DATE", NaiveDate::from_ymd_opt(2023, 12, 31)),
            },
        }
    }
}

// Даты окна принимаются в формате DD/MM/YYYY; при ошибке формата
// берётся значение по умолчанию, как делал исходный генератор.
fn window_date(var: &str, default: Option<NaiveDate>) -> NaiveDate {
    let default = default.expect("default window date must be valid");
    match env::var(var) {
        Ok(raw) => NaiveDate::parse_from_str(&raw, "%d/%m/%Y").unwrap_or(default),
        Err(_) => default,
    }
}
