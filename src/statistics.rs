//! The monthly sales statistics endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    month::MonthFilter,
    transaction::{Transaction, TransactionFilter, get_transactions},
};

/// Sales statistics for the transactions matching one month.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// The sum of the sale prices of the matched transactions.
    pub total_amount: f64,
    /// The number of matched transactions.
    pub total_sold_items: u64,
    /// The number of matched transactions with a price of exactly zero.
    pub total_not_sold_items: u64,
}

/// The state needed to calculate statistics.
#[derive(Debug, Clone)]
pub struct StatisticsState {
    /// The database connection for reading transactions.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for StatisticsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for the sales statistics of one month.
///
/// Months with no matching transactions produce an all-zero result rather
/// than an empty body.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_statistics_endpoint(
    State(state): State<StatisticsState>,
    Path(month): Path<String>,
) -> Result<Json<Statistics>, Error> {
    let filter = TransactionFilter {
        month: Some(MonthFilter::parse(&month)),
        ..Default::default()
    };

    let connection = state.db_connection.lock().unwrap();
    let transactions = get_transactions(&filter, &connection)?;

    Ok(Json(calculate_statistics(&transactions)))
}

/// Fold the matched transactions into their monthly statistics.
pub(crate) fn calculate_statistics(transactions: &[Transaction]) -> Statistics {
    let mut statistics = Statistics {
        total_amount: 0.0,
        total_sold_items: 0,
        total_not_sold_items: 0,
    };

    for transaction in transactions {
        statistics.total_amount += transaction.price;
        statistics.total_sold_items += 1;

        if transaction.price == 0.0 {
            statistics.total_not_sold_items += 1;
        }
    }

    statistics
}
