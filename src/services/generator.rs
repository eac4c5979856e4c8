//! generator.rs
//!
//! Генератор согласованных тестовых данных: клиенты, спектакли,
//! бронирования и места. Все межсущностные инварианты выдерживаются
//! на этапе построения: дата бронирования не позже даты спектакля,
//! места бронирования образуют непрерывный блок в одном ряду, цены
//! выводятся из категории клиента.
//!
//! Каждая партия пишется в одной транзакции: частично засеянных
//! перекрёстных ссылок после сбоя не остаётся.

use chrono::{Duration, NaiveDate};
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use sqlx::{Sqlite, Transaction};
use tracing::{info, warn};

use crate::config::GeneratorConfig;
use crate::database::Database;
use crate::error::{EngineError, EngineResult};
use crate::models::{CustomerCategory, SeatStatus};
use crate::pricing;

const VENUES: [&str; 9] = [
    "Royal Albert Hall",
    "O2 Arena",
    "Wembley Stadium",
    "Barbican Centre",
    "Royal Opera House",
    "SSE Arena",
    "Theatre Royal",
    "London Palladium",
    "Shakespeare's Globe",
];

const SHOW_PREFIXES: [&str; 6] = ["The", "A Night of", "Royal", "Classic", "Modern", "Live"];
const SHOW_NOUNS: [&str; 7] = [
    "Concert",
    "Ballet",
    "Opera",
    "Play",
    "Musical",
    "Symphony",
    "Performance",
];

// Ряд "I" пропущен намеренно: в зале его нет.
const SEAT_ROWS: [&str; 10] = ["A", "B", "C", "D", "E", "F", "G", "H", "J", "K"];
const SEATS_PER_ROW: u32 = 20;

/// Итоговые счётчики по таблицам после генерации.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationSummary {
    pub customers: i64,
    pub shows: i64,
    pub bookings: i64,
    pub seats: i64,
}

pub struct GeneratorService {
    db: Database,
    config: GeneratorConfig,
}

impl GeneratorService {
    pub fn new(db: Database, config: GeneratorConfig) -> Self {
        Self { db, config }
    }

    /// Полный прогон: клиенты, спектакли, бронирования с местами,
    /// затем сводка счётчиков из хранилища.
    pub async fn generate_all(&self) -> EngineResult<GenerationSummary> {
        self.validate_window()?;

        self.generate_customers(self.config.customers).await?;
        self.generate_shows(self.config.shows).await?;
        self.generate_bookings(self.config.bookings).await?;

        self.summary().await
    }

    // Окно проверяется до первой записи: вырожденное окно - отказ с
    // внятной ошибкой, а не диапазоны отрицательной длины.
    fn validate_window(&self) -> EngineResult<()> {
        if self.config.start_date > self.config.end_date {
            return Err(EngineError::DegenerateWindow {
                start: self.config.start_date,
                end: self.config.end_date,
            });
        }
        Ok(())
    }

    /// Генерация клиентов; если таблица уже заполнена, партия
    /// пропускается и возвращается 0.
    pub async fn generate_customers(&self, count: u32) -> EngineResult<u32> {
        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.db.pool)
            .await?;
        if existing > 0 {
            info!("Found {} existing customers in database, skipping", existing);
            return Ok(0);
        }

        info!("Generating {} sample customers...", count);
        let mut rng = StdRng::from_entropy();
        let mut tx = self.db.pool.begin().await?;

        for _ in 0..count {
            let name: String = Name().fake_with_rng(&mut rng);
            let phone: String = PhoneNumber().fake_with_rng(&mut rng);
            let category = CustomerCategory::ALL[rng.gen_range(0..CustomerCategory::ALL.len())];

            sqlx::query("INSERT INTO customers (name, phone, type) VALUES (?, ?, ?)")
                .bind(&name)
                .bind(&phone)
                .bind(category.as_str())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        info!("Generated {} sample customers", count);
        Ok(count)
    }

    /// Генерация спектаклей в окне дат; непустая таблица пропускается.
    pub async fn generate_shows(&self, count: u32) -> EngineResult<u32> {
        self.validate_window()?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows")
            .fetch_one(&self.db.pool)
            .await?;
        if existing > 0 {
            info!("Found {} existing shows in database, skipping", existing);
            return Ok(0);
        }

        info!("Generating {} sample shows...", count);
        let mut rng = StdRng::from_entropy();
        let mut tx = self.db.pool.begin().await?;

        for _ in 0..count {
            let prefix = SHOW_PREFIXES[rng.gen_range(0..SHOW_PREFIXES.len())];
            let noun = SHOW_NOUNS[rng.gen_range(0..SHOW_NOUNS.len())];
            let artist: String = Name().fake_with_rng(&mut rng);
            let title = format!("{} {} with {}", prefix, noun, artist);

            let date = random_date(&mut rng, self.config.start_date, self.config.end_date);
            let venue = VENUES[rng.gen_range(0..VENUES.len())];

            sqlx::query("INSERT INTO shows (title, date, venue) VALUES (?, ?, ?)")
                .bind(&title)
                .bind(date.format("%Y-%m-%d").to_string())
                .bind(venue)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        info!("Generated {} sample shows", count);
        Ok(count)
    }

    /// Генерация бронирований с местами одной партией. Требует уже
    /// существующих клиентов и спектаклей.
    pub async fn generate_bookings(&self, count: u32) -> EngineResult<u32> {
        self.validate_window()?;
        if count == 0 {
            return Ok(0);
        }

        let customers: Vec<(i64, String)> =
            sqlx::query_as("SELECT customers_id, type FROM customers")
                .fetch_all(&self.db.pool)
                .await?;
        if customers.is_empty() {
            return Err(EngineError::MissingRows { table: "customers" });
        }

        let shows: Vec<(i64, String)> = sqlx::query_as("SELECT shows_id, date FROM shows")
            .fetch_all(&self.db.pool)
            .await?;
        if shows.is_empty() {
            return Err(EngineError::MissingRows { table: "shows" });
        }

        info!("Generating {} bookings...", count);
        let mut rng = StdRng::from_entropy();
        let mut tx = self.db.pool.begin().await?;
        let mut created = 0u32;
        let mut seat_total = 0u32;

        for _ in 0..count {
            let (customer_id, category) = &customers[rng.gen_range(0..customers.len())];
            let (show_id, show_date_raw) = &shows[rng.gen_range(0..shows.len())];

            // Дата спектакля перечитывается из хранилища и может быть в
            // любой из принимаемых кодировок.
            let show_date = match crate::dates::parse_lenient_date(show_date_raw) {
                Some(date) => date,
                None => {
                    warn!(
                        "show {} has unreadable date {:?}, skipping booking",
                        show_id, show_date_raw
                    );
                    continue;
                }
            };

            // Бронируют между началом окна и датой спектакля; окно,
            // начинающееся после спектакля, вырождено.
            if self.config.start_date > show_date {
                return Err(EngineError::DegenerateWindow {
                    start: self.config.start_date,
                    end: show_date,
                });
            }
            let upper = self.config.end_date.min(show_date);
            let booking_date = random_date(&mut rng, self.config.start_date, upper);

            let total_price = pricing::price_for(category);

            let booking_id: i64 = sqlx::query_scalar(
                "INSERT INTO bookings (customer_id, show_id, booking_date, total_price) \
                 VALUES (?, ?, ?, ?) RETURNING bookings_id",
            )
            .bind(customer_id)
            .bind(show_id)
            .bind(booking_date.format("%Y-%m-%d").to_string())
            .bind(total_price)
            .fetch_one(&mut *tx)
            .await?;

            seat_total += generate_seats(&mut tx, booking_id, category, &mut rng).await?;

            created += 1;
            if created % 100 == 0 {
                info!("Generated {} bookings...", created);
            }
        }

        tx.commit().await?;
        info!("Generated {} bookings with {} seats", created, seat_total);
        Ok(created)
    }

    /// Счётчики строк по всем четырём таблицам.
    pub async fn summary(&self) -> EngineResult<GenerationSummary> {
        let customers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.db.pool)
            .await?;
        let shows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows")
            .fetch_one(&self.db.pool)
            .await?;
        let bookings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.db.pool)
            .await?;
        let seats: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM seats")
            .fetch_one(&self.db.pool)
            .await?;

        Ok(GenerationSummary {
            customers,
            shows,
            bookings,
            seats,
        })
    }
}

/// Непрерывный блок из 1-4 мест в одном случайном ряду, в той же
/// транзакции, что и бронирование. Пересечения блоков разных
/// бронирований одного спектакля не проверяются: для синтетических
/// данных это осознанное послабление.
async fn generate_seats(
    tx: &mut Transaction<'_, Sqlite>,
    booking_id: i64,
    category: &str,
    rng: &mut StdRng,
) -> EngineResult<u32> {
    let num_seats = rng.gen_range(1..=4u32);
    let row_index = rng.gen_range(0..SEAT_ROWS.len());
    let row = SEAT_ROWS[row_index];
    let start_seat = rng.gen_range(1..=SEATS_PER_ROW - num_seats + 1);

    for seat_num in start_seat..start_seat + num_seats {
        let seat_number = format!("{}{}", row, seat_num);
        let price = pricing::seat_price(category, row_index);

        sqlx::query("INSERT INTO seats (booking_id, seat_number, price, status) VALUES (?, ?, ?, ?)")
            .bind(booking_id)
            .bind(&seat_number)
            .bind(price)
            .bind(SeatStatus::Booked.as_str())
            .execute(&mut **tx)
            .await?;
    }

    Ok(num_seats)
}

/// Равномерная дата в замкнутом диапазоне [start, end].
fn random_date(rng: &mut StdRng, start: NaiveDate, end: NaiveDate) -> NaiveDate {
    let span = (end - start).num_days();
    start + Duration::days(rng.gen_range(0..=span))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_date_stays_in_window() {
        let mut rng = StdRng::seed_from_u64(42);
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        for _ in 0..500 {
            let date = random_date(&mut rng, start, end);
            assert!(date >= start && date <= end);
        }
    }

    #[test]
    fn random_date_handles_single_day_window() {
        let mut rng = StdRng::seed_from_u64(7);
        let day = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        assert_eq!(random_date(&mut rng, day, day), day);
    }
}
