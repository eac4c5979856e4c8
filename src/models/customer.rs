use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Customer {
    pub customers_id: i64,
    pub name: String,
    pub phone: String,
    // Категория хранится текстом; незнакомые метки тарифицируются
    // по стандартной ставке, см. pricing.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub category: String,
}

/// Ценовая категория клиента. Фиксируется при создании и не меняется.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerCategory {
    Child,
    Adult,
    Senior,
    Vip,
}

impl CustomerCategory {
    pub const ALL: [CustomerCategory; 4] = [
        CustomerCategory::Adult,
        CustomerCategory::Child,
        CustomerCategory::Senior,
        CustomerCategory::Vip,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerCategory::Child => "Child",
            CustomerCategory::Adult => "Adult",
            CustomerCategory::Senior => "Senior",
            CustomerCategory::Vip => "VIP",
        }
    }
}
