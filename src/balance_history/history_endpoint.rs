//! Defines the endpoint for retrieving a card's balance history, newest
//! first.

use axum::{
    Json,
    extract::{Query, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::UtcOffset;

use crate::{
    AppState, Error,
    balance_history::{BalanceHistory, map_row_to_balance_history},
    card::get_card_by_number,
};

/// A view of one balance record.
///
/// The stored timestamp is truncated to its UTC calendar day; sub-day
/// precision is not exposed to clients.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct BalanceHistoryView {
    /// The UTC calendar day the balance was observed on, as YYYY-MM-DD.
    pub date: String,
    /// The observed balance, rendered as a string.
    pub balance: String,
}

/// The query parameters for retrieving a card's balance history.
#[derive(Debug, Deserialize)]
pub struct BalanceHistoryParams {
    /// The number of the card to retrieve history for.
    pub number: String,
}

/// A route handler for retrieving a card's balance history sorted most
/// recent first.
pub async fn balance_history_endpoint(
    State(state): State<AppState>,
    Query(params): Query<BalanceHistoryParams>,
) -> Result<Json<Vec<BalanceHistoryView>>, Error> {
    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("Could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    let history = get_balance_history(&params.number, &connection)?;

    let views = history
        .into_iter()
        .map(|record| BalanceHistoryView {
            date: record.date.to_offset(UtcOffset::UTC).date().to_string(),
            balance: record.balance.to_string(),
        })
        .collect();

    Ok(Json(views))
}

/// Get every balance record for the card with `card_number`, sorted by date
/// descending (most recent first).
///
/// The sort is a total order over the full timestamp even though the value
/// exposed to clients is truncated to day granularity.
fn get_balance_history(
    card_number: &str,
    connection: &Connection,
) -> Result<Vec<BalanceHistory>, Error> {
    let card = get_card_by_number(card_number, connection)?;

    let mut history = connection
        .prepare(
            "SELECT id, date, balance, credit_card_id FROM balance_history
                WHERE credit_card_id = :credit_card_id",
        )?
        .query_map(&[(":credit_card_id", &card.id)], map_row_to_balance_history)?
        .map(|maybe_record| maybe_record.map_err(|error| error.into()))
        .collect::<Result<Vec<_>, Error>>()?;

    history.sort_by(|left, right| right.date.cmp(&left.date));

    Ok(history)
}

#[cfg(test)]
mod get_balance_history_tests {
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{Error, card::create_card, initialize_db, user::create_user};

    use super::get_balance_history;

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize_db(&conn).unwrap();
        conn
    }

    fn insert_record(
        card_id: i64,
        date: time::OffsetDateTime,
        balance: f64,
        connection: &Connection,
    ) {
        connection
            .execute(
                "INSERT INTO balance_history (date, balance, credit_card_id) VALUES (?1, ?2, ?3)",
                (date, balance, card_id),
            )
            .expect("could not insert balance history row");
    }

    #[test]
    fn fails_with_unknown_card_number() {
        let connection = get_test_connection();

        assert_eq!(
            get_balance_history("4111", &connection),
            Err(Error::CardNotFound("4111".to_string()))
        );
    }

    #[test]
    fn returns_empty_history_for_card_without_records() {
        let connection = get_test_connection();
        let user = create_user("Jane Doe", "jane@doe.test", &connection).unwrap();
        create_card(user.id, "Kiwibank", "4111", &connection).unwrap();

        let history = get_balance_history("4111", &connection).unwrap();

        assert!(history.is_empty(), "want empty history, got {history:?}");
    }

    #[test]
    fn sorts_records_newest_first() {
        let connection = get_test_connection();
        let user = create_user("Jane Doe", "jane@doe.test", &connection).unwrap();
        let card = create_card(user.id, "Kiwibank", "4111", &connection).unwrap();

        insert_record(card.id, datetime!(2024 - 01 - 01 0:00 UTC), 100.0, &connection);
        insert_record(card.id, datetime!(2024 - 03 - 15 0:00 UTC), 250.0, &connection);
        insert_record(card.id, datetime!(2024 - 02 - 01 0:00 UTC), 180.0, &connection);

        let history = get_balance_history("4111", &connection).unwrap();

        let balances: Vec<f64> = history.iter().map(|record| record.balance).collect();
        assert_eq!(balances, vec![250.0, 180.0, 100.0]);
    }

    #[test]
    fn sorts_same_day_records_by_full_timestamp() {
        let connection = get_test_connection();
        let user = create_user("Jane Doe", "jane@doe.test", &connection).unwrap();
        let card = create_card(user.id, "Kiwibank", "4111", &connection).unwrap();

        insert_record(card.id, datetime!(2024 - 01 - 01 8:00 UTC), 100.0, &connection);
        insert_record(card.id, datetime!(2024 - 01 - 01 18:00 UTC), 250.0, &connection);

        let history = get_balance_history("4111", &connection).unwrap();

        let balances: Vec<f64> = history.iter().map(|record| record.balance).collect();
        assert_eq!(balances, vec![250.0, 100.0]);
    }

    #[test]
    fn excludes_other_cards_records() {
        let connection = get_test_connection();
        let user = create_user("Jane Doe", "jane@doe.test", &connection).unwrap();
        let card = create_card(user.id, "Kiwibank", "4111", &connection).unwrap();
        let other_card = create_card(user.id, "ANZ", "5222", &connection).unwrap();

        insert_record(card.id, datetime!(2024 - 01 - 01 0:00 UTC), 100.0, &connection);
        insert_record(other_card.id, datetime!(2024 - 01 - 02 0:00 UTC), 999.0, &connection);

        let history = get_balance_history("4111", &connection).unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].credit_card_id, card.id);
    }
}
