//! report.rs
//!
//! Сборка текстового отчёта по одному бронированию.
//!
//! Отчёт собирается из соединения booking+customer+show и списка мест.
//! Отсутствующее бронирование — нормальный исход (`Ok(None)`), частичный
//! отчёт никогда не выводится. Даты проходят через lenient-форматтер и
//! отображаются как DD/MM/YYYY.

use serde::Serialize;
use sqlx::{FromRow, Pool, Sqlite};

use crate::dates;
use crate::error::EngineResult;
use crate::pricing;

#[derive(Clone)]
pub struct ReportService {
    pool: Pool<Sqlite>,
}

// Строка соединения для отчёта
#[derive(Debug, FromRow)]
struct ReportRow {
    bookings_id: i64,
    booking_date: String,
    total_price: f64,
    customers_id: i64,
    customer_name: String,
    category: String,
    show_title: String,
    venue: String,
    show_date: String,
}

/// Структурированный отчёт; `render` выдаёт фиксированный текстовый вид.
#[derive(Debug, Clone, Serialize)]
pub struct BookingReport {
    pub booking_id: i64,
    pub booking_date: String,
    pub customer_id: i64,
    pub customer_name: String,
    pub price_explanation: String,
    pub show_title: String,
    pub venue: String,
    pub show_date: String,
    pub seats: String,
    pub seat_count: usize,
    pub total_price: f64,
}

impl ReportService {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Собирает отчёт по бронированию; `Ok(None)` если записи нет.
    pub async fn booking_report(&self, booking_id: i64) -> EngineResult<Option<BookingReport>> {
        let row: Option<ReportRow> = sqlx::query_as(
            "SELECT b.bookings_id, b.booking_date, b.total_price, \
             c.customers_id, c.name AS customer_name, c.type AS category, \
             s.title AS show_title, s.venue, s.date AS show_date \
             FROM bookings b \
             JOIN customers c ON c.customers_id = b.customer_id \
             JOIN shows s ON s.shows_id = b.show_id \
             WHERE b.bookings_id = ?",
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        // Места по возрастанию номера; у бронирования может не быть мест,
        // тогда список остаётся пустой строкой.
        let seat_numbers: Vec<String> = sqlx::query_scalar(
            "SELECT seat_number FROM seats WHERE booking_id = ? ORDER BY seat_number ASC",
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(BookingReport {
            booking_id: row.bookings_id,
            booking_date: dates::format_display_date(&row.booking_date),
            customer_id: row.customers_id,
            customer_name: row.customer_name,
            price_explanation: pricing::price_explanation(&row.category),
            show_title: row.show_title,
            venue: row.venue,
            show_date: dates::format_display_date(&row.show_date),
            seat_count: seat_numbers.len(),
            seats: seat_numbers.join(", "),
            total_price: row.total_price,
        }))
    }
}

impl BookingReport {
    /// Фиксированная последовательность секций отчёта.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("==================================================\n");
        out.push_str("                 BOOKING REPORT\n");
        out.push_str("==================================================\n");
        out.push_str(&format!("Booking ID: {}\n", self.booking_id));
        out.push_str(&format!("Booking Date: {}\n", self.booking_date));
        out.push('\n');
        out.push_str(&format!(
            "Customer: {} (ID {})\n",
            self.customer_name, self.customer_id
        ));
        out.push_str(&format!("Ticket Type: {}\n", self.price_explanation));
        out.push('\n');
        out.push_str(&format!("Show: {}\n", self.show_title));
        out.push_str(&format!("Venue: {}\n", self.venue));
        out.push_str(&format!("Show Date: {}\n", self.show_date));
        out.push('\n');
        out.push_str(&format!("Seats: {}\n", self.seats));
        out.push_str(&format!("Seat Count: {}\n", self.seat_count));
        out.push('\n');
        out.push_str(&format!("Total Price: £{:.2}\n", self.total_price));
        out.push_str("==================================================\n");
        out
    }
}
