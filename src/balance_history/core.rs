//! Code for creating the balance history table and mapping its rows.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::database_id::DatabaseId;

/// A record of a credit card's balance observed at a specific instant.
///
/// Records are append-only. Duplicate and out-of-order timestamps are stored
/// as given.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceHistory {
    /// The record's ID in the application database.
    pub id: DatabaseId,
    /// When the balance was observed.
    pub date: OffsetDateTime,
    /// The observed balance in dollars.
    pub balance: f64,
    /// The ID of the credit card the balance belongs to.
    pub credit_card_id: DatabaseId,
}

/// Create the balance history table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_balance_history_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS balance_history (
                id INTEGER PRIMARY KEY,
                date TEXT NOT NULL,
                balance REAL NOT NULL,
                credit_card_id INTEGER NOT NULL REFERENCES credit_card (id)
                )",
        (),
    )?;

    Ok(())
}

/// Convert a row from the balance history table into a [BalanceHistory].
pub fn map_row_to_balance_history(row: &Row) -> Result<BalanceHistory, rusqlite::Error> {
    Ok(BalanceHistory {
        id: row.get(0)?,
        date: row.get(1)?,
        balance: row.get(2)?,
        credit_card_id: row.get(3)?,
    })
}

#[cfg(test)]
mod create_balance_history_table_tests {
    use rusqlite::Connection;

    use super::create_balance_history_table;

    #[test]
    fn sql_is_valid() {
        let connection =
            Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");

        assert_eq!(Ok(()), create_balance_history_table(&connection));
    }
}
