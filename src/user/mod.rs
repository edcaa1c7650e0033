//! Users are the root of the ownership tree: each user owns zero or more
//! credit cards, and deleting a user removes everything it owns.

mod core;
mod create_endpoint;
mod delete_endpoint;

pub use core::{
    User, UserID, create_user, create_user_table, delete_user, get_user_by_id, user_exists,
};
pub use create_endpoint::{CreateUserPayload, create_user_endpoint};
pub use delete_endpoint::{DeleteUserParams, delete_user_endpoint};
