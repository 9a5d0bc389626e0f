//! The combined-data endpoint.
//!
//! Merges the list, statistics, bar-chart, and pie-chart results for one
//! month into a single payload. The sub-results come from the same query and
//! aggregation functions the standalone endpoints use, called in-process, so
//! they are identical to calling those endpoints separately.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{
    AppState, Error,
    bar_chart::count_by_price_bucket,
    month::MonthFilter,
    pagination::PaginationConfig,
    pie_chart::count_by_category,
    statistics::{Statistics, calculate_statistics},
    transaction::{Transaction, TransactionFilter, get_transactions},
};

/// The merged payload for one month.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedData {
    /// The first page of transactions found by searching for the month text.
    pub transactions: Vec<Transaction>,
    /// The month's sales statistics.
    pub statistics: Statistics,
    /// The month's price-range histogram.
    pub bar_chart: HashMap<String, u64>,
    /// The month's per-category counts.
    pub pie_chart: HashMap<String, u64>,
}

/// The state needed to build the combined payload.
#[derive(Debug, Clone)]
pub struct CombinedDataState {
    /// The database connection for reading transactions.
    db_connection: Arc<Mutex<Connection>>,
    /// The config that controls paging defaults for the transactions list.
    pagination_config: PaginationConfig,
}

impl FromRef<AppState> for CombinedDataState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// A route handler that merges the outputs of the list, statistics,
/// bar-chart, and pie-chart queries for one month.
///
/// The transactions list uses the month text as the search string with
/// default paging, mirroring a list request of `?search={month}`. Any
/// sub-query failure fails the whole call.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_combined_data_endpoint(
    State(state): State<CombinedDataState>,
    Path(month): Path<String>,
) -> Result<Json<CombinedData>, Error> {
    let list_filter = TransactionFilter {
        search: Some(month.clone()),
        limit: Some(state.pagination_config.default_page_size),
        ..Default::default()
    };
    let month_filter = TransactionFilter {
        month: Some(MonthFilter::parse(&month)),
        ..Default::default()
    };

    let connection = state.db_connection.lock().unwrap();
    let transactions = get_transactions(&list_filter, &connection)?;
    let matched = get_transactions(&month_filter, &connection)?;

    Ok(Json(CombinedData {
        transactions,
        statistics: calculate_statistics(&matched),
        bar_chart: count_by_price_bucket(&matched),
        pie_chart: count_by_category(&matched),
    }))
}

#[cfg(test)]
mod tests {
    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::Value;
    use time::Month;

    use crate::{
        AppState,
        bar_chart::get_bar_chart_endpoint,
        endpoints,
        pagination::PaginationConfig,
        pie_chart::get_pie_chart_endpoint,
        statistics::get_statistics_endpoint,
        transaction::{get_transactions_endpoint, insert_many, test_utils::sale},
    };

    use super::get_combined_data_endpoint;

    fn get_test_server() -> TestServer {
        let conn = Connection::open_in_memory().unwrap();
        let state = AppState::new(conn, PaginationConfig::default()).unwrap();

        {
            let connection = state.db_connection.lock().unwrap();
            let mut records = vec![
                sale("March Special", 0.0, Month::March),
                sale("Spring Jacket", 50.0, Month::March),
                sale("Garden Set", 150.0, Month::March),
                sale("Winter Coat", 500.0, Month::December),
            ];
            records[1].category = Some("clothing".to_owned());

            insert_many(&records, &connection).unwrap();
        }

        let app = Router::new()
            .route(endpoints::TRANSACTIONS, get(get_transactions_endpoint))
            .route(endpoints::STATISTICS, get(get_statistics_endpoint))
            .route(endpoints::BAR_CHART, get(get_bar_chart_endpoint))
            .route(endpoints::PIE_CHART, get(get_pie_chart_endpoint))
            .route(endpoints::COMBINED_DATA, get(get_combined_data_endpoint))
            .with_state(state);

        TestServer::new(app)
    }

    #[tokio::test]
    async fn merges_the_standalone_endpoint_results() {
        let server = get_test_server();

        let combined: Value = server.get("/combined-data/March").await.json();
        let transactions: Value = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("search", "March")
            .await
            .json();
        let statistics: Value = server.get("/statistics/March").await.json();
        let bar_chart: Value = server.get("/bar-chart/March").await.json();
        let pie_chart: Value = server.get("/pie-chart/March").await.json();

        assert_eq!(combined["transactions"], transactions);
        assert_eq!(combined["statistics"], statistics);
        assert_eq!(combined["barChart"], bar_chart);
        assert_eq!(combined["pieChart"], pie_chart);
    }

    #[tokio::test]
    async fn aggregates_cover_the_whole_month() {
        let server = get_test_server();

        let combined: Value = server.get("/combined-data/March").await.json();

        assert_eq!(combined["statistics"]["totalAmount"], 200.0);
        assert_eq!(combined["statistics"]["totalSoldItems"], 3);
        assert_eq!(combined["statistics"]["totalNotSoldItems"], 1);
        assert_eq!(combined["barChart"]["0-100"], 2);
        assert_eq!(combined["barChart"]["101-200"], 1);
    }
}
