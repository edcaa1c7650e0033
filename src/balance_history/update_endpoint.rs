//! Defines the endpoint for recording a batch of balance snapshots.

use axum::{Json, extract::State};
use rusqlite::{Connection, Transaction, TransactionBehavior, params};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{AppState, Error, card::get_card_by_number};

/// A single balance observation in an update batch.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBalancePayload {
    /// The number of the card the balance belongs to.
    pub credit_card_number: String,
    /// When the balance was observed, as an RFC 3339 timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub transaction_time: OffsetDateTime,
    /// The observed balance in dollars.
    pub current_balance: f64,
}

/// A route handler for recording a batch of balance snapshots, responds with
/// a confirmation message.
///
/// Entries are processed in input order. The batch is atomic: the first
/// unknown card number aborts the request and none of the batch's entries
/// are persisted.
pub async fn update_balance_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<Vec<UpdateBalancePayload>>,
) -> Result<String, Error> {
    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("Could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    record_balances(&payload, &connection)?;
    tracing::info!("recorded {} balance snapshot(s)", payload.len());

    Ok("Balance updated successfully.".to_string())
}

fn record_balances(
    payloads: &[UpdateBalancePayload],
    connection: &Connection,
) -> Result<(), Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Deferred)?;

    for payload in payloads {
        let card = get_card_by_number(&payload.credit_card_number, &transaction)?;

        transaction.execute(
            "INSERT INTO balance_history (date, balance, credit_card_id) VALUES (?1, ?2, ?3)",
            params![payload.transaction_time, payload.current_balance, card.id],
        )?;
    }

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod record_balances_tests {
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{Error, card::create_card, initialize_db, user::create_user};

    use super::{UpdateBalancePayload, record_balances};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize_db(&conn).unwrap();
        conn
    }

    fn snapshot(card_number: &str, balance: f64) -> UpdateBalancePayload {
        UpdateBalancePayload {
            credit_card_number: card_number.to_string(),
            transaction_time: datetime!(2024 - 01 - 01 12:00 UTC),
            current_balance: balance,
        }
    }

    #[track_caller]
    fn count_records(connection: &Connection) -> i64 {
        connection
            .query_row("SELECT COUNT(id) FROM balance_history", [], |row| {
                row.get(0)
            })
            .expect("could not count balance history rows")
    }

    #[test]
    fn records_every_entry_in_order() {
        let connection = get_test_connection();
        let user = create_user("Jane Doe", "jane@doe.test", &connection).unwrap();
        create_card(user.id, "Kiwibank", "4111", &connection).unwrap();

        record_balances(
            &[snapshot("4111", 100.0), snapshot("4111", 250.0)],
            &connection,
        )
        .unwrap();

        assert_eq!(count_records(&connection), 2);
    }

    #[test]
    fn accepts_duplicate_timestamps() {
        let connection = get_test_connection();
        let user = create_user("Jane Doe", "jane@doe.test", &connection).unwrap();
        create_card(user.id, "Kiwibank", "4111", &connection).unwrap();

        record_balances(
            &[snapshot("4111", 100.0), snapshot("4111", 100.0)],
            &connection,
        )
        .unwrap();

        assert_eq!(count_records(&connection), 2);
    }

    #[test]
    fn unknown_card_rolls_back_the_whole_batch() {
        let connection = get_test_connection();
        let user = create_user("Jane Doe", "jane@doe.test", &connection).unwrap();
        create_card(user.id, "Kiwibank", "4111", &connection).unwrap();

        let result = record_balances(
            &[
                snapshot("4111", 100.0),
                snapshot("4111", 250.0),
                snapshot("9999", 300.0),
                snapshot("4111", 180.0),
            ],
            &connection,
        );

        assert_eq!(result, Err(Error::CardNotFound("9999".to_string())));
        assert_eq!(
            count_records(&connection),
            0,
            "a failed batch should persist nothing"
        );
    }

    #[test]
    fn empty_batch_succeeds() {
        let connection = get_test_connection();

        assert_eq!(record_balances(&[], &connection), Ok(()));
        assert_eq!(count_records(&connection), 0);
    }
}
