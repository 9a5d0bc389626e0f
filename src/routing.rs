//! Application router configuration.

use axum::{Json, Router, http::StatusCode, middleware, response::IntoResponse, routing::get};
use serde_json::json;

use crate::{
    AppState, bar_chart::get_bar_chart_endpoint, combined::get_combined_data_endpoint, endpoints,
    logging::logging_middleware, pie_chart::get_pie_chart_endpoint,
    statistics::get_statistics_endpoint, transaction::get_transactions_endpoint,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::TRANSACTIONS, get(get_transactions_endpoint))
        .route(endpoints::STATISTICS, get(get_statistics_endpoint))
        .route(endpoints::BAR_CHART, get(get_bar_chart_endpoint))
        .route(endpoints::PIE_CHART, get(get_pie_chart_endpoint))
        .route(endpoints::COMBINED_DATA, get(get_combined_data_endpoint))
        .fallback(get_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

async fn get_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not Found" })))
}
