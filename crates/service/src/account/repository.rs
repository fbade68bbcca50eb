use async_trait::async_trait;

use crate::errors::StoreError;
use super::domain::{Account, AccountAuth, NewAccount, ProfileChanges, Role};

/// Persistence collaborator for accounts.
///
/// `create` is an in-memory construct only; `save` persists it and hashes
/// the plain password as a side effect.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;
    /// Lookup that also selects the otherwise-hidden password hash.
    async fn find_auth_by_email(&self, email: &str) -> Result<Option<AccountAuth>, StoreError>;
    /// Fails with `StoreError::NotFound` when the id is absent.
    async fn find_by_id(&self, id: i32) -> Result<Account, StoreError>;
    fn create(&self, email: &str, password: &str, role: Role) -> NewAccount;
    async fn save(&self, account: NewAccount) -> Result<Account, StoreError>;
    /// Load-merge-save of the full record; a new password is hashed on the
    /// way in.
    async fn update_profile(&self, id: i32, changes: ProfileChanges) -> Result<Account, StoreError>;
}

/// Simple in-memory mock store for tests and doc examples.
pub mod mock {
    use super::*;
    use argon2::{password_hash::{PasswordHasher, SaltString}, Argon2};
    use rand::rngs::OsRng;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct StoredUser {
        email: String,
        password_hash: String,
        role: Role,
    }

    #[derive(Default)]
    pub struct MockUserStore {
        users: Mutex<HashMap<i32, StoredUser>>,
        next_id: AtomicUsize,
        pub create_calls: AtomicUsize,
        pub save_calls: AtomicUsize,
        pub update_calls: AtomicUsize,
        fail: AtomicBool,
    }

    impl MockUserStore {
        /// Make every subsequent async operation fail like a dead backend.
        pub fn fail_next_ops(&self) {
            self.fail.store(true, Ordering::SeqCst);
        }

        pub fn stored_email(&self, id: i32) -> Option<String> {
            self.users.lock().unwrap().get(&id).map(|u| u.email.clone())
        }

        pub fn stored_hash(&self, id: i32) -> Option<String> {
            self.users.lock().unwrap().get(&id).map(|u| u.password_hash.clone())
        }

        fn guard(&self) -> Result<(), StoreError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(StoreError::Backend("backend unavailable".into()));
            }
            Ok(())
        }

        fn hash(plain: &str) -> String {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(plain.as_bytes(), &salt)
                .expect("argon2 hash")
                .to_string()
        }
    }

    #[async_trait]
    impl UserStore for MockUserStore {
        async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
            self.guard()?;
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|(_, u)| u.email == email).map(|(id, u)| Account {
                id: *id,
                email: u.email.clone(),
                role: u.role,
            }))
        }

        async fn find_auth_by_email(&self, email: &str) -> Result<Option<AccountAuth>, StoreError> {
            self.guard()?;
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|(_, u)| u.email == email).map(|(id, u)| AccountAuth {
                account: Account { id: *id, email: u.email.clone(), role: u.role },
                password_hash: u.password_hash.clone(),
            }))
        }

        async fn find_by_id(&self, id: i32) -> Result<Account, StoreError> {
            self.guard()?;
            let users = self.users.lock().unwrap();
            users
                .get(&id)
                .map(|u| Account { id, email: u.email.clone(), role: u.role })
                .ok_or_else(|| StoreError::not_found("user"))
        }

        fn create(&self, email: &str, password: &str, role: Role) -> NewAccount {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            NewAccount { email: email.to_string(), password: password.to_string(), role }
        }

        async fn save(&self, account: NewAccount) -> Result<Account, StoreError> {
            self.save_calls.fetch_add(1, Ordering::SeqCst);
            self.guard()?;
            let id = (self.next_id.fetch_add(1, Ordering::SeqCst) + 1) as i32;
            let mut users = self.users.lock().unwrap();
            users.insert(id, StoredUser {
                email: account.email.clone(),
                password_hash: Self::hash(&account.password),
                role: account.role,
            });
            Ok(Account { id, email: account.email, role: account.role })
        }

        async fn update_profile(&self, id: i32, changes: ProfileChanges) -> Result<Account, StoreError> {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            self.guard()?;
            let mut users = self.users.lock().unwrap();
            let user = users.get_mut(&id).ok_or_else(|| StoreError::not_found("user"))?;
            if let Some(email) = changes.email {
                user.email = email;
            }
            if let Some(password) = changes.password {
                user.password_hash = Self::hash(&password);
            }
            Ok(Account { id, email: user.email.clone(), role: user.role })
        }
    }
}
