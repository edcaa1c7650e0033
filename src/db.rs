//! Database schema initialization.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{
    Error, balance_history::create_balance_history_table, card::create_credit_card_table,
    user::create_user_table,
};

/// Initialize the database schema by creating the tables for the domain models.
///
/// Foreign key enforcement is per-connection in SQLite, so it is switched on
/// here before any table is touched.
///
/// # Errors
///
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    // The pragma must be set outside of a transaction, otherwise it is a no-op.
    connection.pragma_update(None, "foreign_keys", true)?;

    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_credit_card_table(&transaction)?;
    create_balance_history_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn creates_all_tables() {
        let connection =
            Connection::open_in_memory().expect("Could not create in-memory SQLite database");

        initialize(&connection).expect("Could not initialize database");

        let table_count: i64 = connection
            .query_row(
                "SELECT COUNT(name) FROM sqlite_master
                WHERE type = 'table' AND name IN ('user', 'credit_card', 'balance_history')",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert_eq!(table_count, 3, "want 3 tables, got {table_count}");
    }

    #[test]
    fn is_idempotent() {
        let connection =
            Connection::open_in_memory().expect("Could not create in-memory SQLite database");

        initialize(&connection).expect("Could not initialize database");

        assert_eq!(Ok(()), initialize(&connection));
    }
}
