pub mod booking;
pub mod customer;
pub mod seat;
pub mod show;

pub use booking::Booking;
pub use customer::{Customer, CustomerCategory};
pub use seat::{Seat, SeatStatus};
pub use show::Show;
