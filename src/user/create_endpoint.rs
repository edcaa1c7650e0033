//! Defines the endpoint for registering a new user.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    user::{UserID, create_user},
};

/// The payload for creating a new user.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserPayload {
    /// The display name for the new user.
    pub name: String,
    /// The email address for the new user.
    pub email: String,
}

/// A route handler for creating a new user, responds with the new user's ID.
pub async fn create_user_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<Json<UserID>, Error> {
    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("Could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    let user = create_user(&payload.name, &payload.email, &connection)?;
    tracing::info!("created user {} with ID {}", user.name, user.id);

    Ok(Json(user.id))
}
