//! Transaction records: the data model, bulk insertion, filtered queries and
//! the list/search endpoint.

mod core;
mod list_endpoint;
mod query;

pub use core::{NewTransaction, Transaction, count_transactions, insert_many};
pub use list_endpoint::get_transactions_endpoint;
pub use query::{TransactionFilter, get_transactions};

#[cfg(test)]
pub(crate) use core::test_utils;
