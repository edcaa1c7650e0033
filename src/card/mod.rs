//! Credit cards belong to exactly one user and carry the balance history
//! records for that card. Cards are created via the attach endpoint and are
//! only ever removed when their owner is deleted.

mod core;
mod create_endpoint;
mod list_endpoint;
mod owner_endpoint;

pub use core::{
    CreditCard, create_card, create_credit_card_table, get_card_by_number, get_cards_for_user,
    map_row_to_credit_card,
};
pub use create_endpoint::{AddCreditCardPayload, add_credit_card_endpoint};
pub use list_endpoint::{CreditCardView, list_credit_cards_endpoint};
pub use owner_endpoint::get_card_owner_endpoint;
