use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use theatre_booking::{config::Config, database::Database, services::generator::GeneratorService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("UK Theatre Booking System - sample data generator");
    info!("Pricing rules: Adults £10, Children/Seniors £5, VIPs free");

    // Connect to the database
    let db = Database::new(&config.database.url, config.database.pool_size)
        .await
        .context("Failed to connect to database")?;
    info!("Database connected");

    // Run migrations
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;

    // Seed the four tables inside per-batch transactions
    let generator = GeneratorService::new(db.clone(), config.generator.clone());
    let summary = generator.generate_all().await?;

    info!("Database summary:");
    info!("- Customers: {}", summary.customers);
    info!("- Shows: {}", summary.shows);
    info!("- Bookings: {}", summary.bookings);
    info!("- Seats: {}", summary.seats);

    info!("Data generation complete");
    Ok(())
}
