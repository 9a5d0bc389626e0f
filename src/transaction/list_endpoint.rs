//! The route handler for listing and searching transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{AppState, Error, pagination::PaginationConfig};

use super::{Transaction, TransactionFilter, get_transactions};

/// The state needed to list transactions.
#[derive(Debug, Clone)]
pub struct ListTransactionsState {
    /// The database connection for reading transactions.
    db_connection: Arc<Mutex<Connection>>,
    /// The config that controls paging defaults.
    pagination_config: PaginationConfig,
}

impl FromRef<AppState> for ListTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query parameters accepted by the transactions list endpoint.
///
/// Missing or zero paging values are coerced to the configured defaults
/// rather than rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// The 1-based page number to return.
    #[serde(default)]
    pub page: Option<u64>,
    /// The maximum number of transactions to return.
    #[serde(default)]
    pub per_page: Option<u64>,
    /// Text to match against product title, description, or price.
    #[serde(default)]
    pub search: Option<String>,
}

/// A route handler for listing transactions, optionally filtered by a search
/// string, one page at a time.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_transactions_endpoint(
    State(state): State<ListTransactionsState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let page = state.pagination_config.resolve_page(params.page);
    let per_page = state.pagination_config.resolve_page_size(params.per_page);
    let search = params.search.filter(|search| !search.is_empty());

    let filter = TransactionFilter {
        search,
        limit: Some(per_page),
        offset: page.saturating_sub(1).saturating_mul(per_page),
        ..Default::default()
    };

    let connection = state.db_connection.lock().unwrap();
    let transactions = get_transactions(&filter, &connection)?;

    Ok(Json(transactions))
}
