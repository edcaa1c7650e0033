//! Defines the endpoint for deleting a user and everything it owns.

use axum::extract::{Query, State};
use serde::Deserialize;

use crate::{
    AppState, Error,
    user::{UserID, delete_user},
};

/// The query parameters for deleting a user.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserParams {
    /// The ID of the user to delete.
    pub user_id: UserID,
}

/// A route handler for deleting a user along with its credit cards and their
/// balance history, responds with a confirmation message.
pub async fn delete_user_endpoint(
    State(state): State<AppState>,
    Query(params): Query<DeleteUserParams>,
) -> Result<String, Error> {
    let mut connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("Could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    delete_user(params.user_id, &mut connection)?;
    tracing::info!("deleted user {}", params.user_id);

    Ok("User deleted successfully.".to_string())
}
