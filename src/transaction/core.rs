//! Defines the core data model and database operations for transactions.

use rusqlite::{Connection, Row, types::Type};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{Error, db::DatabaseId};

/// A product sale record.
///
/// Field names serialize in camelCase to match the shape of the seed feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: DatabaseId,
    /// When the sale happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// The title of the product that was sold.
    pub product_title: String,
    /// A text description of the product.
    pub description: Option<String>,
    /// The sale price. A price of zero means the item was not sold.
    pub price: f64,
    /// The product category, used for the category breakdown.
    pub category: Option<String>,
}

/// A transaction as it appears in the seed feed, before it has been given a
/// database ID.
///
/// Unknown fields in the feed (e.g. image URLs) are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    /// When the sale happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// The title of the product that was sold.
    pub product_title: String,
    /// A text description of the product.
    #[serde(default)]
    pub description: Option<String>,
    /// The sale price. A price of zero means the item was not sold.
    pub price: f64,
    /// The product category.
    #[serde(default)]
    pub category: Option<String>,
}

/// Insert many transactions into the database as a single SQL transaction.
///
/// Returns the number of records inserted.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an unexpected SQL error.
pub fn insert_many(records: &[NewTransaction], connection: &Connection) -> Result<usize, Error> {
    let tx = connection.unchecked_transaction()?;

    {
        let mut statement = tx.prepare(
            "INSERT INTO transaction_record (date_of_sale, product_title, description, price, category)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;

        for record in records {
            let date_text = record
                .date_of_sale
                .format(&Rfc3339)
                .map_err(|error| Error::InvalidDateFormat(error.to_string()))?;

            statement.execute((
                date_text,
                &record.product_title,
                &record.description,
                record.price,
                &record.category,
            ))?;
        }
    }

    tx.commit()?;
    Ok(records.len())
}

/// Count the transactions in the database.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u64, Error> {
    // SQLite integers are i64, so read that and widen.
    let count: i64 =
        connection.query_row("SELECT COUNT(*) FROM transaction_record", [], |row| {
            row.get(0)
        })?;

    Ok(count as u64)
}

/// Map a `SELECT id, date_of_sale, product_title, description, price,
/// category` row to a [Transaction].
pub(crate) fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let date_text: String = row.get(1)?;
    let date_of_sale = OffsetDateTime::parse(&date_text, &Rfc3339)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, error.into()))?;

    Ok(Transaction {
        id: row.get(0)?,
        date_of_sale,
        product_title: row.get(2)?,
        description: row.get(3)?,
        price: row.get(4)?,
        category: row.get(5)?,
    })
}


#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::Month;

    use crate::db::initialize;

    use super::{NewTransaction, count_transactions, insert_many, test_utils::sale};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn insert_many_inserts_all_records() {
        let conn = get_test_connection();
        let records = vec![
            sale("Laptop", 320.0, Month::March),
            sale("Headphones", 45.5, Month::March),
            sale("Monitor", 0.0, Month::June),
        ];

        let inserted = insert_many(&records, &conn).unwrap();

        assert_eq!(inserted, 3);
        assert_eq!(count_transactions(&conn).unwrap(), 3);
    }

    #[test]
    fn count_is_zero_for_empty_table() {
        let conn = get_test_connection();

        assert_eq!(count_transactions(&conn).unwrap(), 0);
    }

    #[test]
    fn deserializes_feed_records_with_unknown_fields() {
        let json = r#"{
            "id": 1,
            "title": "ignored",
            "productTitle": "Fjallraven Backpack",
            "price": 329.85,
            "description": "Fits 15 inch laptops",
            "category": "men's clothing",
            "image": "https://example.com/backpack.jpg",
            "sold": false,
            "dateOfSale": "2021-11-27T20:29:54+05:30"
        }"#;

        let record: NewTransaction = serde_json::from_str(json).unwrap();

        assert_eq!(record.product_title, "Fjallraven Backpack");
        assert_eq!(record.price, 329.85);
        assert_eq!(record.category.as_deref(), Some("men's clothing"));
    }

    #[test]
    fn deserializes_feed_records_with_missing_optional_fields() {
        let json = r#"{
            "productTitle": "Mystery Box",
            "price": 0,
            "dateOfSale": "2022-03-02T06:30:00Z"
        }"#;

        let record: NewTransaction = serde_json::from_str(json).unwrap();

        assert_eq!(record.description, None);
        assert_eq!(record.category, None);
        assert_eq!(record.price, 0.0);
    }
}
