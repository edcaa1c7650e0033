//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    middleware,
    routing::{get, post, put},
};

use crate::{
    AppState,
    balance_history::{balance_history_endpoint, update_balance_endpoint},
    card::{add_credit_card_endpoint, get_card_owner_endpoint, list_credit_cards_endpoint},
    endpoints,
    logging::logging_middleware,
    user::{create_user_endpoint, delete_user_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::USER,
            put(create_user_endpoint).delete(delete_user_endpoint),
        )
        .route(endpoints::CREDIT_CARD, post(add_credit_card_endpoint))
        .route(endpoints::CREDIT_CARD_ALL, get(list_credit_cards_endpoint))
        .route(endpoints::CREDIT_CARD_USER_ID, get(get_card_owner_endpoint))
        .route(endpoints::UPDATE_BALANCE, post(update_balance_endpoint))
        .route(endpoints::BALANCE_HISTORY, get(balance_history_endpoint))
        .layer(middleware::from_fn(logging_middleware))
        .fallback(get_not_found)
        .with_state(state)
}

async fn get_not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
