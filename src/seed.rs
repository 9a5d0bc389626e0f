//! The start-up task that seeds the database from a remote JSON feed.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    transaction::{NewTransaction, count_transactions, insert_many},
};

/// The JSON feed the database is seeded from when no other URL is given.
pub const DEFAULT_SEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// Fetch the transaction feed from `url` and bulk-insert it into the
/// database.
///
/// Seeding is skipped when the database already contains transactions, so
/// restarts do not duplicate the seed data. Callers should treat errors as
/// non-fatal: the server can serve an empty store.
///
/// # Errors
/// Returns an [Error::SeedFetch] if the feed cannot be fetched or parsed, or
/// an [Error::SqlError] if the insert fails.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn seed_database(url: &str, db_connection: &Arc<Mutex<Connection>>) -> Result<(), Error> {
    {
        let connection = db_connection.lock().unwrap();

        if count_transactions(&connection)? > 0 {
            tracing::info!("Database already contains transactions, skipping seed.");
            return Ok(());
        }
    }

    let records = fetch_seed_records(url).await?;

    let connection = db_connection.lock().unwrap();
    let inserted = insert_many(&records, &connection)?;
    tracing::info!("Seeded the database with {inserted} transactions from {url}");

    Ok(())
}

async fn fetch_seed_records(url: &str) -> Result<Vec<NewTransaction>, Error> {
    let response = reqwest::get(url).await?.error_for_status()?;
    let records = response.json().await?;

    Ok(records)
}
