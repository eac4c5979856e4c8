pub mod config;
pub mod database;
pub mod dates;
pub mod error;
pub mod models;
pub mod pricing;
pub mod report;
pub mod search;
pub mod services;

use std::sync::Arc;

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub db: database::Database,
    pub config: config::Config,
}

impl AppState {
    pub async fn new(config: config::Config) -> Result<Arc<Self>, error::EngineError> {
        let db = database::Database::new(&config.database.url, config.database.pool_size).await?;

        db.run_migrations().await?;

        Ok(Arc::new(Self { db, config }))
    }

    pub fn search(&self) -> search::SearchClient {
        search::SearchClient::new(self.db.pool.clone())
    }

    pub fn reports(&self) -> report::ReportService {
        report::ReportService::new(self.db.pool.clone())
    }

    pub fn generator(&self) -> services::generator::GeneratorService {
        services::generator::GeneratorService::new(self.db.clone(), self.config.generator.clone())
    }
}
