use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Booking {
    pub bookings_id: i64,
    pub customer_id: i64,
    pub show_id: i64,
    pub booking_date: String,
    pub total_price: f64,
}
