//! The per-category breakdown endpoint.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    month::MonthFilter,
    transaction::{Transaction, TransactionFilter, get_transactions},
};

/// The category label for transactions without a category.
const UNCATEGORISED_LABEL: &str = "Uncategorised";

/// The state needed to calculate the category breakdown.
#[derive(Debug, Clone)]
pub struct PieChartState {
    /// The database connection for reading transactions.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for PieChartState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for the per-category counts of one month.
///
/// Returns a mapping from category to the number of matching transactions.
/// Transactions without a category are grouped under "Uncategorised".
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_pie_chart_endpoint(
    State(state): State<PieChartState>,
    Path(month): Path<String>,
) -> Result<Json<HashMap<String, u64>>, Error> {
    let filter = TransactionFilter {
        month: Some(MonthFilter::parse(&month)),
        ..Default::default()
    };

    let connection = state.db_connection.lock().unwrap();
    let transactions = get_transactions(&filter, &connection)?;

    Ok(Json(count_by_category(&transactions)))
}

/// Group the matched transactions by category.
pub(crate) fn count_by_category(transactions: &[Transaction]) -> HashMap<String, u64> {
    let mut counts = HashMap::new();

    for transaction in transactions {
        let category = transaction
            .category
            .clone()
            .unwrap_or_else(|| UNCATEGORISED_LABEL.to_owned());

        *counts.entry(category).or_insert(0) += 1;
    }

    counts
}
