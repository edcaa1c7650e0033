//! Defines the endpoint for looking up which user owns a credit card.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{AppState, Error, card::get_card_by_number, user::UserID};

/// The query parameters for looking up a card's owner.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardOwnerParams {
    /// The number of the card to look up.
    pub credit_card_number: String,
}

/// A route handler for looking up the ID of the user that owns a credit card.
pub async fn get_card_owner_endpoint(
    State(state): State<AppState>,
    Query(params): Query<CardOwnerParams>,
) -> Result<Json<UserID>, Error> {
    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("Could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    let card = get_card_by_number(&params.credit_card_number, &connection)?;

    Ok(Json(card.user_id))
}
