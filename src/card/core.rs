//! Code for creating the credit card table and for storing and fetching
//! credit cards.

use rusqlite::{Connection, Row, Transaction, TransactionBehavior, params};

use crate::{
    Error,
    database_id::DatabaseId,
    user::{UserID, user_exists},
};

/// A credit card attached to a registered user.
///
/// The owner is fixed at creation time, there is no reassignment.
#[derive(Debug, Clone, PartialEq)]
pub struct CreditCard {
    /// The card's ID in the application database.
    pub id: DatabaseId,
    /// The bank that issued the card.
    pub issuance_bank: String,
    /// The card number, used as the lookup key for balance updates.
    pub number: String,
    /// The ID of the user that owns the card.
    pub user_id: UserID,
}

/// Create the credit card table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_credit_card_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS credit_card (
                id INTEGER PRIMARY KEY,
                issuance_bank TEXT NOT NULL,
                number TEXT NOT NULL,
                user_id INTEGER NOT NULL REFERENCES user (id)
                )",
        (),
    )?;

    Ok(())
}

/// Convert a row from the credit card table into a [CreditCard].
pub fn map_row_to_credit_card(row: &Row) -> Result<CreditCard, rusqlite::Error> {
    Ok(CreditCard {
        id: row.get(0)?,
        issuance_bank: row.get(1)?,
        number: row.get(2)?,
        user_id: UserID::new(row.get(3)?),
    })
}

/// Attach a new credit card to the user with an ID equal to `user_id`.
///
/// The existence check and the insert share one transaction so that a
/// concurrent deletion of the user cannot leave an orphaned card.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user, in which case no card is
///   created.
/// - there was an error trying to access the store.
pub fn create_card(
    user_id: UserID,
    issuance_bank: &str,
    number: &str,
    connection: &Connection,
) -> Result<CreditCard, Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Deferred)?;

    if !user_exists(user_id, &transaction)? {
        return Err(Error::UserNotFound(user_id));
    }

    transaction.execute(
        "INSERT INTO credit_card (issuance_bank, number, user_id) VALUES (?1, ?2, ?3)",
        params![issuance_bank, number, user_id.as_i64()],
    )?;
    let id = transaction.last_insert_rowid();

    transaction.commit()?;

    Ok(CreditCard {
        id,
        issuance_bank: issuance_bank.to_owned(),
        number: number.to_owned(),
        user_id,
    })
}

/// Get every credit card owned by the user with an ID equal to `user_id`, in
/// store iteration order.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user.
/// - there was an error trying to access the store.
pub fn get_cards_for_user(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<CreditCard>, Error> {
    if !user_exists(user_id, connection)? {
        return Err(Error::UserNotFound(user_id));
    }

    connection
        .prepare(
            "SELECT id, issuance_bank, number, user_id FROM credit_card WHERE user_id = :user_id",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_row_to_credit_card)?
        .map(|maybe_card| maybe_card.map_err(|error| error.into()))
        .collect()
}

/// Get the credit card whose number equals `number`.
///
/// Card numbers are not required to be unique. When several cards share a
/// number the first-created card (the one with the lowest ID) wins.
///
/// # Errors
///
/// This function will return an error if:
/// - no card has the given number.
/// - there was an error trying to access the store.
pub fn get_card_by_number(number: &str, connection: &Connection) -> Result<CreditCard, Error> {
    connection
        .prepare(
            "SELECT id, issuance_bank, number, user_id FROM credit_card
                WHERE number = :number ORDER BY id ASC LIMIT 1",
        )?
        .query_row(&[(":number", &number)], map_row_to_credit_card)
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::CardNotFound(number.to_owned()),
            error => error.into(),
        })
}
