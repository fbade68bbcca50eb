use argon2::{password_hash::PasswordVerifier, Argon2, PasswordHash};
use serde::{Deserialize, Serialize};

pub use models::user::Role;

/// Domain account (business view); the password hash is never exposed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i32,
    pub email: String,
    pub role: Role,
}

/// Lookup view that additionally carries the stored password hash, for the
/// login flow only. Verification is a capability of the loaded record.
#[derive(Debug, Clone)]
pub struct AccountAuth {
    pub account: Account,
    pub password_hash: String,
}

impl AccountAuth {
    /// Check a candidate password against the stored argon2 hash.
    pub fn check_password(&self, candidate: &str) -> bool {
        match PasswordHash::new(&self.password_hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

/// A constructed-but-unsaved account. The password stays plain until the
/// store's save hashes it on the way to persistence.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Partial profile edit; either field may change independently.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileChanges {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful login result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
}
