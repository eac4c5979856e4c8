//! pricing.rs
//!
//! Ценовая политика: категория клиента -> цена билета.
//! Используется и при создании бронирования, и при пояснении цены в отчёте.

/// Базовая цена билета по метке категории. Тотальная функция:
/// незнакомая метка тарифицируется как Adult.
pub fn price_for(category: &str) -> f64 {
    match category {
        "VIP" => 0.00,
        "Child" | "Senior" => 5.00,
        _ => 10.00,
    }
}

/// Цена места: базовая цена категории плюс надбавка за ряд
/// (0.5 за каждый ряд дальше "A").
pub fn seat_price(category: &str, row_index: usize) -> f64 {
    price_for(category) + row_index as f64 * 0.5
}

/// Текстовое пояснение цены для отчёта.
pub fn price_explanation(category: &str) -> String {
    match category {
        "VIP" => "VIP (Free admission)".to_string(),
        "Child" | "Senior" => format!("{} (discounted rate)", category),
        other => format!("{} (standard rate)", other),
    }
}
