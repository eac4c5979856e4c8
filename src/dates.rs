//! dates.rs
//!
//! Нормализация дат. В хранилище даты встречаются в разнородных кодировках
//! (ISO-8601 с "Z" и без, YYYY-MM-DD, YYYY-MM-DD HH:MM:SS), поэтому все
//! чтения идут через один lenient-парсер вместо разбора на каждом месте
//! вызова. Форматирование для отчётов никогда не падает: при неразборчивом
//! значении берётся подстрока до первого пробела как есть.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Разбирает дату из строки в любой из принимаемых кодировок.
///
/// Порядок разрешения:
/// 1. есть разделитель "T" -> ISO-8601, "Z" заменяется на "+00:00";
/// 2. "YYYY-MM-DD HH:MM:SS";
/// 3. голая календарная дата "YYYY-MM-DD" (полночь).
pub fn parse_lenient(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();

    if trimmed.contains('T') {
        let with_offset = if let Some(stripped) = trimmed.strip_suffix('Z') {
            format!("{}+00:00", stripped)
        } else {
            trimmed.to_string()
        };
        if let Ok(dt) = DateTime::parse_from_rfc3339(&with_offset) {
            return Some(dt.naive_utc());
        }
        // ISO-метка без зоны
        return NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S").ok();
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_hms_opt(0, 0, 0).unwrap())
}

/// Календарная часть разобранного значения.
pub fn parse_lenient_date(raw: &str) -> Option<NaiveDate> {
    parse_lenient(raw).map(|dt| dt.date())
}

/// Типизированный путь: уже структурированная дата форматируется напрямую.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Приводит строковое значение даты к виду DD/MM/YYYY для отчёта.
/// Никогда не падает: при любой ошибке разбора возвращает подстроку
/// до первого пробела без изменений.
pub fn format_display_date(raw: &str) -> String {
    match parse_lenient(raw) {
        Some(dt) => format_date(dt.date()),
        None => raw.split_whitespace().next().unwrap_or("").to_string(),
    }
}
