//! Account models returned by the session endpoints.

mod user;

pub use user::{Role, User};
