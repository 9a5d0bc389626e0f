//! The price-range histogram endpoint.

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

/// The upper bounds (inclusive) and labels of the fixed price buckets.
///
/// Every price falls in exactly one bucket; anything above the last bound
/// lands in [BUCKET_ABOVE_LABEL].
const PRICE_BUCKETS: [(f64, &str); 9] = [
    (100.0, "0-100"),
    (200.0, "101-200"),
    (300.0, "201-300"),
    (400.0, "301-400"),
    (500.0, "401-500"),
    (600.0, "501-600"),
    (700.0, "601-700"),
    (800.0, "701-800"),
    (900.0, "801-900"),
];

/// The label for prices above the last bucket bound.
const BUCKET_ABOVE_LABEL: &str = "901-above";

/// The state needed to calculate the price histogram.
#[derive(Debug, Clone)]
pub struct BarChartState {
    /// The database connection for reading transactions.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BarChartState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for the price-range histogram of one month.
///
/// Returns a mapping from bucket label to count. Buckets with no matching
/// transactions are omitted.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_bar_chart_endpoint(
    State(state): State<BarChartState>,
    Path(month): Path<String>,
) -> Result<Json<HashMap<String, u64>>, Error> {
    let filter = TransactionFilter {
        month: Some(MonthFilter::parse(&month)),
        ..Default::default()
    };

    let connection = state.db_connection.lock().unwrap();
    let transactions = get_transactions(&filter, &connection)?;

    Ok(Json(count_by_price_bucket(&transactions)))
}

/// Group the matched transactions into the fixed price buckets.
pub(crate) fn count_by_price_bucket(transactions: &[Transaction]) -> HashMap<String, u64> {
    let mut counts = HashMap::new();

    for transaction in transactions {
        *counts
            .entry(bucket_label(transaction.price).to_owned())
            .or_insert(0) += 1;
    }

    counts
}

fn bucket_label(price: f64) -> &'static str {
    for (upper_bound, label) in PRICE_BUCKETS {
        if price <= upper_bound {
            return label;
        }
    }

    BUCKET_ABOVE_LABEL
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use time::Month;

    use crate::{
        AppState, endpoints,
        pagination::PaginationConfig,
        transaction::{insert_many, test_utils::sale},
    };

    use super::{bucket_label, get_bar_chart_endpoint};

    #[test]
    fn every_price_falls_in_exactly_one_bucket() {
        assert_eq!(bucket_label(0.0), "0-100");
        assert_eq!(bucket_label(100.0), "0-100");
        assert_eq!(bucket_label(100.5), "101-200");
        assert_eq!(bucket_label(200.0), "101-200");
        assert_eq!(bucket_label(900.0), "801-900");
        assert_eq!(bucket_label(901.0), "901-above");
        assert_eq!(bucket_label(15000.0), "901-above");
    }

    fn get_test_server() -> TestServer {
        let conn = Connection::open_in_memory().unwrap();
        let state = AppState::new(conn, PaginationConfig::default()).unwrap();

        {
            let connection = state.db_connection.lock().unwrap();
            insert_many(
                &[
                    sale("Unsold Gadget", 0.0, Month::March),
                    sale("Cheap Gadget", 50.0, Month::March),
                    sale("Pricey Gadget", 150.0, Month::March),
                    sale("July Gadget", 999.0, Month::July),
                ],
                &connection,
            )
            .unwrap();
        }

        let app = Router::new()
            .route(endpoints::BAR_CHART, get(get_bar_chart_endpoint))
            .with_state(state);

        TestServer::new(app)
    }

    #[tokio::test]
    async fn buckets_matched_records_and_omits_empty_buckets() {
        let server = get_test_server();

        let response = server.get("/bar-chart/March").await;

        response.assert_status_ok();
        let chart: HashMap<String, u64> = response.json();
        let want =
            HashMap::from([("0-100".to_owned(), 2), ("101-200".to_owned(), 1)]);
        assert_eq!(chart, want);
    }

    #[tokio::test]
    async fn bucket_counts_sum_to_matched_record_count() {
        let server = get_test_server();

        let chart: HashMap<String, u64> = server.get("/bar-chart/March").await.json();

        assert_eq!(chart.values().sum::<u64>(), 3);
    }

    #[tokio::test]
    async fn prices_above_the_ladder_land_in_the_open_bucket() {
        let server = get_test_server();

        let chart: HashMap<String, u64> = server.get("/bar-chart/July").await.json();

        assert_eq!(chart, HashMap::from([("901-above".to_owned(), 1)]));
    }
}
