//! Defines the endpoint for attaching a credit card to a user.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, card::create_card, database_id::DatabaseId, user::UserID};

/// The payload for attaching a credit card to a user.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCreditCardPayload {
    /// The ID of the user the card belongs to.
    pub user_id: UserID,
    /// The bank that issued the card.
    pub card_issuance_bank: String,
    /// The card number.
    pub card_number: String,
}

/// A route handler for attaching a credit card to a user, responds with the
/// new card's ID.
pub async fn add_credit_card_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<AddCreditCardPayload>,
) -> Result<Json<DatabaseId>, Error> {
    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("Could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    let card = create_card(
        payload.user_id,
        &payload.card_issuance_bank,
        &payload.card_number,
        &connection,
    )?;
    tracing::info!("attached card {} to user {}", card.id, card.user_id);

    Ok(Json(card.id))
}
