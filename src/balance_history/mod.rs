//! Balance history records are append-only snapshots of a credit card's
//! balance at a point in time. Snapshots arrive in batches keyed by card
//! number and are read back per card, newest first.

mod core;
mod history_endpoint;
mod update_endpoint;

pub use core::{BalanceHistory, create_balance_history_table, map_row_to_balance_history};
pub use history_endpoint::{BalanceHistoryView, balance_history_endpoint};
pub use update_endpoint::{UpdateBalancePayload, update_balance_endpoint};
