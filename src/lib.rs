//! Cardbook is a bookkeeping backend for tracking credit cards and their
//! balance history.
//!
//! This library provides a JSON REST API for registering users, attaching
//! credit cards to a user, and recording/retrieving time-series balance
//! snapshots per card.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod balance_history;
mod card;
mod database_id;
mod db;
mod endpoints;
mod logging;
mod routing;
mod user;

pub use app_state::AppState;
pub use balance_history::BalanceHistory;
pub use card::CreditCard;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use user::{User, UserID};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user ID in the request does not refer to a registered user.
    ///
    /// The client should check that the ID is correct and that the user has
    /// been created.
    #[error("user with ID {0} does not exist")]
    UserNotFound(UserID),

    /// The card number in the request does not match any stored credit card.
    ///
    /// Balance updates report this error for the first unknown card number in
    /// the batch, in which case none of the batch's entries are persisted.
    #[error("invalid card number {0}")]
    CardNotFound(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::UserNotFound(user_id) => (
                StatusCode::BAD_REQUEST,
                format!("User with ID {user_id} does not exist."),
            )
                .into_response(),
            Error::CardNotFound(number) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid card number {number}."),
            )
                .into_response(),
            Error::NotFound => StatusCode::NOT_FOUND.into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred, check the server logs for more details.",
                )
                    .into_response()
            }
        }
    }
}
