//! Defines the endpoint for listing the credit cards that belong to a user.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, card::get_cards_for_user, user::UserID};

/// A view of a credit card that hides the internal ID and owner reference.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardView {
    /// The bank that issued the card.
    pub issuance_bank: String,
    /// The card number.
    pub number: String,
}

/// The query parameters for listing a user's credit cards.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCardsParams {
    /// The ID of the user to list cards for.
    pub user_id: UserID,
}

/// A route handler for listing all credit cards owned by a user.
pub async fn list_credit_cards_endpoint(
    State(state): State<AppState>,
    Query(params): Query<ListCardsParams>,
) -> Result<Json<Vec<CreditCardView>>, Error> {
    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("Could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    let cards = get_cards_for_user(params.user_id, &connection)?;

    let views = cards
        .into_iter()
        .map(|card| CreditCardView {
            issuance_bank: card.issuance_bank,
            number: card.number,
        })
        .collect();

    Ok(Json(views))
}

#[cfg(test)]
mod tests {
    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{AppState, card::create_card, endpoints, user::create_user};

    use super::{CreditCardView, list_credit_cards_endpoint};

    fn get_test_server_and_state() -> (TestServer, AppState) {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let state = AppState::new(connection).expect("Could not create app state");

        let app = Router::new()
            .route(endpoints::CREDIT_CARD_ALL, get(list_credit_cards_endpoint))
            .with_state(state.clone());

        let server = TestServer::new(app).expect("Could not create test server.");

        (server, state)
    }

    #[tokio::test]
    async fn list_cards_returns_views_without_ids() {
        let (server, state) = get_test_server_and_state();

        let user_id = {
            let connection = state.db_connection.lock().unwrap();
            let user = create_user("Jane Doe", "jane@doe.test", &connection).unwrap();
            create_card(user.id, "Kiwibank", "1111", &connection).unwrap();
            create_card(user.id, "ANZ", "2222", &connection).unwrap();

            user.id
        };

        let response = server
            .get(endpoints::CREDIT_CARD_ALL)
            .add_query_param("userId", user_id.as_i64())
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Vec<CreditCardView>>(),
            vec![
                CreditCardView {
                    issuance_bank: "Kiwibank".to_string(),
                    number: "1111".to_string(),
                },
                CreditCardView {
                    issuance_bank: "ANZ".to_string(),
                    number: "2222".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn list_cards_fails_with_non_existent_user() {
        let (server, _) = get_test_server_and_state();

        let response = server
            .get(endpoints::CREDIT_CARD_ALL)
            .add_query_param("userId", 42)
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn list_cards_is_idempotent() {
        let (server, state) = get_test_server_and_state();

        let user_id = {
            let connection = state.db_connection.lock().unwrap();
            let user = create_user("Jane Doe", "jane@doe.test", &connection).unwrap();
            create_card(user.id, "Kiwibank", "1111", &connection).unwrap();

            user.id
        };

        let first: Vec<CreditCardView> = server
            .get(endpoints::CREDIT_CARD_ALL)
            .add_query_param("userId", user_id.as_i64())
            .await
            .json();
        let second: Vec<CreditCardView> = server
            .get(endpoints::CREDIT_CARD_ALL)
            .add_query_param("userId", user_id.as_i64())
            .await
            .json();

        assert_eq!(first, second);
    }
}
