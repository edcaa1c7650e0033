//! The API endpoint URIs.

/// The route for creating (PUT) and deleting (DELETE) users.
pub const USER: &str = "/user";
/// The route for adding a credit card to a user.
pub const CREDIT_CARD: &str = "/credit-card";
/// The route for listing all credit cards belonging to a user.
pub const CREDIT_CARD_ALL: &str = "/credit-card:all";
/// The route for looking up the user that owns a credit card.
pub const CREDIT_CARD_USER_ID: &str = "/credit-card:user-id";
/// The route for recording a batch of balance snapshots.
pub const UPDATE_BALANCE: &str = "/credit-card:update-balance";
/// The route for retrieving a card's balance history, newest first.
pub const BALANCE_HISTORY: &str = "/credit-card:balance-history";
