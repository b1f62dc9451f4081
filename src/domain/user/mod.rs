//! User account domain module.
//!
//! A flat list of user records plus a single "current user" session slot,
//! used to greet and personalize. See [`UserRecord`] for the stored shape.

mod account;
mod errors;

pub use account::{
    ProfileDetails, ProfileEdit, ProfileForm, SignUpForm, UserRecord, DEFAULT_GREETING_NAME,
    MIN_PASSWORD_LENGTH,
};
pub use errors::AccountError;
