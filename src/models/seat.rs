use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Seat {
    pub seats_id: i64,
    pub booking_id: i64,
    pub seat_number: String,
    pub price: f64,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatStatus {
    Booked,
    Available,
    Blocked,
}

impl SeatStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatStatus::Booked => "Booked",
            SeatStatus::Available => "Available",
            SeatStatus::Blocked => "Blocked",
        }
    }
}
