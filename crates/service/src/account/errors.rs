use thiserror::Error;

use crate::errors::StoreError;
use super::token::TokenError;

/// Business errors for account workflows.
///
/// Display strings are the exact messages the transport layer surfaces;
/// tests pin them.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("There is a user with that email already")]
    DuplicateEmail,
    #[error("Could not create account")]
    CreateFailed,
    #[error("User not found")]
    UserNotFound,
    #[error("Wrong password")]
    WrongPassword,
    #[error("Email already in use")]
    EmailInUse,
    #[error("Could not update profile")]
    UpdateFailed,
    // Login alone lets collaborator failures through untouched; every other
    // method converts them to its fixed message above.
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Token(#[from] TokenError),
}
