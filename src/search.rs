//! search.rs
//!
//! Поиск по бронированиям: разреженный набор критериев транслируется в один
//! параметризованный запрос к соединению bookings/customers/shows.
//!
//! Критерии накапливаются как типизированные предикаты и компилируются в
//! фиксированном порядке приоритета (id-фильтры, имя, дата, категория,
//! спектакль), поэтому одинаковые входы всегда дают побайтно одинаковый
//! текст запроса и одинаковый порядок параметров.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{Pool, Sqlite};

use crate::models::{Booking, Customer, Seat, Show};

/// Клиент для поиска
#[derive(Clone)]
pub struct SearchClient {
    pool: Pool<Sqlite>,
}

/// Критерии поиска бронирований; каждое поле независимо опционально.
/// Пустые и пробельные строки не добавляют предикат.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchFilter {
    pub booking_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub booking_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub show_id: Option<i64>,
}

/// Типизированные предикаты запроса.
#[derive(Debug, Clone, PartialEq)]
enum Predicate {
    ById(i64),
    ByCustomer(i64),
    ByNameFragment(String),
    ByDate(NaiveDate),
    ByCategory(String),
    ByShow(i64),
}

/// Строка результата поиска: соединённая запись плюс число мест.
/// Значения отдаются сырыми (даты — как хранятся); форматирование
/// остаётся за презентационным слоем.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct BookingSearchRow {
    pub bookings_id: i64,
    pub customer_id: i64,
    pub customer_name: String,
    pub category: String,
    pub show_id: i64,
    pub show_title: String,
    pub venue: String,
    pub show_date: String,
    pub booking_date: String,
    pub total_price: f64,
    pub seat_count: i64,
}

const BASE_QUERY: &str = "\
SELECT b.bookings_id, b.customer_id, c.name AS customer_name, c.type AS category, \
b.show_id, s.title AS show_title, s.venue, s.date AS show_date, \
b.booking_date, b.total_price, \
(SELECT COUNT(*) FROM seats st WHERE st.booking_id = b.bookings_id) AS seat_count \
FROM bookings b \
JOIN customers c ON c.customers_id = b.customer_id \
JOIN shows s ON s.shows_id = b.show_id \
WHERE 1=1";

const ORDER_CLAUSE: &str = " ORDER BY b.booking_date DESC, b.bookings_id DESC";

impl SearchFilter {
    /// Собирает предикаты в фиксированном порядке приоритета.
    fn predicates(&self) -> Vec<Predicate> {
        let mut preds = Vec::new();
        if let Some(id) = self.booking_id {
            preds.push(Predicate::ById(id));
        }
        if let Some(id) = self.customer_id {
            preds.push(Predicate::ByCustomer(id));
        }
        if let Some(fragment) = name_fragment(self.first_name.as_deref(), self.last_name.as_deref()) {
            preds.push(Predicate::ByNameFragment(fragment));
        }
        if let Some(date) = self.booking_date {
            preds.push(Predicate::ByDate(date));
        }
        if let Some(category) = non_empty(self.category.as_deref()) {
            preds.push(Predicate::ByCategory(category));
        }
        if let Some(id) = self.show_id {
            preds.push(Predicate::ByShow(id));
        }
        preds
    }
}

/// Фрагмент имени: конкатенация переданных частей (имя и/или фамилия).
fn name_fragment(first: Option<&str>, last: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

impl Predicate {
    fn clause(&self) -> &'static str {
        match self {
            Predicate::ById(_) => " AND b.bookings_id = ?",
            Predicate::ByCustomer(_) => " AND b.customer_id = ?",
            Predicate::ByNameFragment(_) => " AND LOWER(c.name) LIKE ?",
            Predicate::ByDate(_) => " AND date(b.booking_date) = ?",
            Predicate::ByCategory(_) => " AND c.type = ?",
            Predicate::ByShow(_) => " AND b.show_id = ?",
        }
    }
}

/// Компилирует предикаты в текст запроса. Отсутствующие критерии не
/// оставляют следа в тексте.
fn compile(predicates: &[Predicate]) -> String {
    let mut sql = String::from(BASE_QUERY);
    for predicate in predicates {
        sql.push_str(predicate.clause());
    }
    sql.push_str(ORDER_CLAUSE);
    sql
}

impl SearchClient {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Поиск бронирований по критериям. Пустой результат — нормальный
    /// исход, не ошибка.
    pub async fn search_bookings(
        &self,
        filter: &SearchFilter,
    ) -> Result<Vec<BookingSearchRow>, sqlx::Error> {
        let predicates = filter.predicates();
        let sql = compile(&predicates);

        let mut query = sqlx::query_as::<_, BookingSearchRow>(&sql);
        for predicate in &predicates {
            query = match predicate {
                Predicate::ById(id)
                | Predicate::ByCustomer(id)
                | Predicate::ByShow(id) => query.bind(*id),
                Predicate::ByNameFragment(fragment) => {
                    query.bind(format!("%{}%", fragment.to_lowercase()))
                }
                Predicate::ByDate(date) => query.bind(date.format("%Y-%m-%d").to_string()),
                Predicate::ByCategory(category) => query.bind(category.clone()),
            };
        }

        query.fetch_all(&self.pool).await
    }

    /// Афиша для выбора спектакля: все спектакли по возрастанию даты.
    pub async fn list_shows(&self) -> Result<Vec<Show>, sqlx::Error> {
        sqlx::query_as("SELECT shows_id, title, date, venue FROM shows ORDER BY date ASC")
            .fetch_all(&self.pool)
            .await
    }

    /// Сырая запись бронирования по идентификатору.
    pub async fn booking(&self, booking_id: i64) -> Result<Option<Booking>, sqlx::Error> {
        sqlx::query_as(
            "SELECT bookings_id, customer_id, show_id, booking_date, total_price \
             FROM bookings WHERE bookings_id = ?",
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Поиск клиентов: категория и/или фрагмент имени, опционально в
    /// привязке к спектаклю. Явной сортировки нет — порядок вставки.
    pub async fn search_customers(
        &self,
        category: Option<&str>,
        first_name: Option<&str>,
        last_name: Option<&str>,
        show_id: Option<i64>,
    ) -> Result<Vec<Customer>, sqlx::Error> {
        let mut sql =
            String::from("SELECT customers_id, name, phone, type FROM customers WHERE 1=1");
        let fragment = name_fragment(first_name, last_name);
        let category = non_empty(category);

        if fragment.is_some() {
            sql.push_str(" AND LOWER(name) LIKE ?");
        }
        if category.is_some() {
            sql.push_str(" AND type = ?");
        }
        if show_id.is_some() {
            sql.push_str(
                " AND customers_id IN (SELECT customer_id FROM bookings WHERE show_id = ?)",
            );
        }

        let mut query = sqlx::query_as::<_, Customer>(&sql);
        if let Some(fragment) = fragment {
            query = query.bind(format!("%{}%", fragment.to_lowercase()));
        }
        if let Some(category) = category {
            query = query.bind(category);
        }
        if let Some(show_id) = show_id {
            query = query.bind(show_id);
        }

        query.fetch_all(&self.pool).await
    }

    /// Места спектакля с фильтрами менеджера мест: фрагмент имени
    /// клиента и/или номер бронирования.
    pub async fn seats_for_show(
        &self,
        show_id: i64,
        first_name: Option<&str>,
        last_name: Option<&str>,
        booking_id: Option<i64>,
    ) -> Result<Vec<Seat>, sqlx::Error> {
        let mut sql = String::from(
            "SELECT st.seats_id, st.booking_id, st.seat_number, st.price, st.status \
             FROM seats st \
             JOIN bookings b ON b.bookings_id = st.booking_id \
             JOIN customers c ON c.customers_id = b.customer_id \
             WHERE b.show_id = ?",
        );
        let fragment = name_fragment(first_name, last_name);

        if fragment.is_some() {
            sql.push_str(" AND LOWER(c.name) LIKE ?");
        }
        if booking_id.is_some() {
            sql.push_str(" AND st.booking_id = ?");
        }
        sql.push_str(" ORDER BY st.seat_number ASC");

        let mut query = sqlx::query_as::<_, Seat>(&sql).bind(show_id);
        if let Some(fragment) = fragment {
            query = query.bind(format!("%{}%", fragment.to_lowercase()));
        }
        if let Some(booking_id) = booking_id {
            query = query.bind(booking_id);
        }

        query.fetch_all(&self.pool).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_filter() -> SearchFilter {
        SearchFilter {
            booking_id: Some(7),
            customer_id: Some(3),
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            booking_date: NaiveDate::from_ymd_opt(2023, 5, 20),
            category: Some("VIP".to_string()),
            show_id: Some(11),
        }
    }

    #[test]
    fn empty_filter_compiles_to_base_query_only() {
        let sql = compile(&SearchFilter::default().predicates());
        assert_eq!(sql, format!("{}{}", BASE_QUERY, ORDER_CLAUSE));
        assert_eq!(sql.matches(" AND ").count(), 0);
    }

    #[test]
    fn predicates_follow_fixed_priority_order() {
        let preds = full_filter().predicates();
        let clauses: Vec<&str> = preds.iter().map(Predicate::clause).collect();
        assert_eq!(
            clauses,
            vec![
                " AND b.bookings_id = ?",
                " AND b.customer_id = ?",
                " AND LOWER(c.name) LIKE ?",
                " AND date(b.booking_date) = ?",
                " AND c.type = ?",
                " AND b.show_id = ?",
            ]
        );
    }

    #[test]
    fn identical_filters_compile_identically() {
        let first = compile(&full_filter().predicates());
        let second = compile(&full_filter().predicates());
        assert_eq!(first, second);
        assert_eq!(full_filter().predicates(), full_filter().predicates());
    }

    #[test]
    fn blank_text_criteria_contribute_no_clause() {
        let filter = SearchFilter {
            first_name: Some("   ".to_string()),
            last_name: Some(String::new()),
            category: Some("  ".to_string()),
            ..SearchFilter::default()
        };
        assert!(filter.predicates().is_empty());
    }

    #[test]
    fn name_fragment_joins_supplied_parts() {
        assert_eq!(
            name_fragment(Some("Jane"), Some("Doe")),
            Some("Jane Doe".to_string())
        );
        assert_eq!(name_fragment(None, Some("Doe")), Some("Doe".to_string()));
        assert_eq!(name_fragment(Some(" Jane "), None), Some("Jane".to_string()));
        assert_eq!(name_fragment(None, None), None);
    }
}
