//! Database query helpers for fetching filtered transactions.

use rusqlite::{Connection, params_from_iter, types::Value};

use crate::{Error, month::MonthFilter};

use super::core::{Transaction, map_transaction_row};

/// Defines which transactions to fetch with [get_transactions].
#[derive(Debug, Default)]
pub struct TransactionFilter {
    /// Include transactions matching this month selector.
    pub month: Option<MonthFilter>,
    /// Include transactions whose product title, description, or price
    /// rendered as text contains this string, ignoring case.
    pub search: Option<String>,
    /// Return up to the first N transactions after `offset`.
    pub limit: Option<u64>,
    /// Skip the first N matching transactions.
    pub offset: u64,
}

/// Query for transactions in the database.
///
/// Results are returned in insertion order.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn get_transactions(
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let mut query_string_parts = vec![
        "SELECT id, date_of_sale, product_title, description, price, category \
         FROM transaction_record"
            .to_string(),
    ];
    let mut where_clause_parts = vec![];
    let mut query_parameters: Vec<Value> = vec![];

    match &filter.month {
        Some(MonthFilter::Calendar(month)) => {
            where_clause_parts.push(format!(
                "CAST(strftime('%m', date_of_sale) AS INTEGER) = ?{}",
                query_parameters.len() + 1
            ));
            query_parameters.push(Value::Integer(u8::from(*month) as i64));
        }
        Some(MonthFilter::Pattern(pattern)) => {
            // LIKE is case-insensitive for ASCII, matching the original
            // free-text behavior.
            where_clause_parts.push(format!("date_of_sale LIKE ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(format!("%{pattern}%")));
        }
        None => {}
    }

    if let Some(search) = &filter.search {
        let first = query_parameters.len() + 1;
        where_clause_parts.push(format!(
            "(product_title LIKE ?{first} OR description LIKE ?{} OR CAST(price AS TEXT) LIKE ?{})",
            first + 1,
            first + 2,
        ));
        let like_pattern = format!("%{search}%");
        query_parameters.push(Value::Text(like_pattern.clone()));
        query_parameters.push(Value::Text(like_pattern.clone()));
        query_parameters.push(Value::Text(like_pattern));
    }

    if !where_clause_parts.is_empty() {
        query_string_parts.push(String::from("WHERE ") + &where_clause_parts.join(" AND "));
    }

    // Order by ID to keep paging stable.
    query_string_parts.push("ORDER BY id ASC".to_string());

    if let Some(limit) = filter.limit {
        // SQLite integer literals are i64, clamp so huge paging values
        // produce an empty page instead of a parse error.
        query_string_parts.push(format!(
            "LIMIT {} OFFSET {}",
            limit.min(i64::MAX as u64),
            filter.offset.min(i64::MAX as u64)
        ));
    }

    let query_string = query_string_parts.join(" ");
    let params = params_from_iter(query_parameters.iter());

    connection
        .prepare(&query_string)?
        .query_map(params, map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
        .collect()
}
