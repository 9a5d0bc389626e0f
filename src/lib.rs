//! Salestat is a small REST service for analysing e-commerce sales data.
//!
//! On start-up it seeds a SQLite database with product transactions fetched
//! from a remote JSON feed, then serves read-only JSON endpoints for listing
//! and searching transactions, monthly sales statistics, and chart-ready
//! aggregations (price-range histogram and per-category counts).

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod bar_chart;
mod combined;
mod db;
mod endpoints;
mod logging;
mod month;
mod pagination;
mod pie_chart;
mod routing;
mod seed;
mod statistics;
mod transaction;

pub use app_state::AppState;
pub use logging::logging_middleware;
pub use pagination::PaginationConfig;
pub use routing::build_router;
pub use seed::{DEFAULT_SEED_URL, seed_database};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// A sale date could not be formatted as RFC 3339 text for storage.
    #[error("could not format date-time string: {0}")]
    InvalidDateFormat(String),

    /// The seed data could not be fetched from the remote feed.
    ///
    /// The inner string is the underlying HTTP client error. Seeding is
    /// best-effort, so callers should log this error and carry on serving.
    #[error("could not fetch seed data: {0}")]
    SeedFetch(String),
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", error);
        Error::SqlError(error)
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::SeedFetch(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // The client gets no detail beyond "internal error", the cause is
        // only logged on the server.
        tracing::error!("request failed: {}", self);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal Server Error" })),
        )
            .into_response()
    }
}
