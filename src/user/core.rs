//! Code for creating the user table and for storing and fetching users.

use std::fmt::Display;

use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A user of the application.
///
/// Users are created with a name and email, never updated, and deleted along
/// with their credit cards and balance history.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The user's display name.
    pub name: String,
    /// The user's email address.
    pub email: String,
}

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Create and insert a new user into the database.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn create_user(name: &str, email: &str, connection: &Connection) -> Result<User, Error> {
    connection.execute(
        "INSERT INTO user (name, email) VALUES (?1, ?2)",
        (name, email),
    )?;

    let id = UserID::new(connection.last_insert_rowid());

    Ok(User {
        id,
        name: name.to_owned(),
        email: email.to_owned(),
    })
}

/// Get the user from the database with an ID equal to `user_id`.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user.
/// - there was an error trying to access the store.
pub fn get_user_by_id(user_id: UserID, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare("SELECT id, name, email FROM user WHERE id = :id")?
        .query_row(&[(":id", &user_id.as_i64())], |row| {
            Ok(User {
                id: UserID::new(row.get(0)?),
                name: row.get(1)?,
                email: row.get(2)?,
            })
        })
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::UserNotFound(user_id),
            error => error.into(),
        })
}

/// Check whether a user with an ID equal to `user_id` is registered.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn user_exists(user_id: UserID, connection: &Connection) -> Result<bool, Error> {
    connection
        .query_row(
            "SELECT EXISTS (SELECT 1 FROM user WHERE id = ?1)",
            params![user_id.as_i64()],
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Delete the user with an ID equal to `user_id`, along with all of its
/// credit cards and their balance history.
///
/// The cascade runs inside a single transaction: either every owned row is
/// removed or, if any step fails, none are.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user, in which case nothing is
///   deleted.
/// - there was an error trying to access the store.
pub fn delete_user(user_id: UserID, connection: &mut Connection) -> Result<(), Error> {
    let transaction = connection.transaction()?;

    get_user_by_id(user_id, &transaction)?;

    transaction.execute(
        "DELETE FROM balance_history WHERE credit_card_id IN
            (SELECT id FROM credit_card WHERE user_id = ?1)",
        params![user_id.as_i64()],
    )?;
    transaction.execute(
        "DELETE FROM credit_card WHERE user_id = ?1",
        params![user_id.as_i64()],
    )?;
    transaction.execute("DELETE FROM user WHERE id = ?1", params![user_id.as_i64()])?;

    transaction.commit()?;

    Ok(())
}
