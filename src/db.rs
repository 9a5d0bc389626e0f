/*! This module defines and implements the schema for the application's database. */

use rusqlite::Connection;

use crate::Error;

/// An alias for the integer type used for database row IDs.
pub type DatabaseId = i64;

/// Create the tables for the application's domain models.
///
/// Safe to call on an already initialized database.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transaction_record (
            id INTEGER PRIMARY KEY,
            date_of_sale TEXT NOT NULL,
            product_title TEXT NOT NULL,
            description TEXT,
            price REAL NOT NULL,
            category TEXT
        )",
        (),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn initialize_creates_transaction_table() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM transaction_record", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).unwrap();
        initialize(&conn).unwrap();
    }
}
