use argon2::{password_hash::{PasswordHasher, SaltString}, Argon2};
use chrono::Utc;
use rand::rngs::OsRng;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::errors::StoreError;
use crate::account::domain::{Account, AccountAuth, NewAccount, ProfileChanges, Role};
use crate::account::repository::UserStore;

/// SeaORM-backed user store. Password hashing happens here, on save and on
/// profile updates, never in the service layer.
pub struct SeaOrmUserStore {
    pub db: DatabaseConnection,
}

fn account_view(m: &models::user::Model) -> Account {
    Account { id: m.id, email: m.email.clone(), role: m.role }
}

fn hash_password(plain: &str) -> Result<String, StoreError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| StoreError::Backend(e.to_string()))?
        .to_string())
}

#[async_trait::async_trait]
impl UserStore for SeaOrmUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let found = models::user::find_by_email(&self.db, email).await?;
        Ok(found.as_ref().map(account_view))
    }

    async fn find_auth_by_email(&self, email: &str) -> Result<Option<AccountAuth>, StoreError> {
        let found = models::user::find_by_email(&self.db, email).await?;
        Ok(found.map(|u| AccountAuth {
            account: account_view(&u),
            password_hash: u.password_hash,
        }))
    }

    async fn find_by_id(&self, id: i32) -> Result<Account, StoreError> {
        let found = models::user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .ok_or_else(|| StoreError::not_found("user"))?;
        Ok(account_view(&found))
    }

    fn create(&self, email: &str, password: &str, role: Role) -> NewAccount {
        NewAccount { email: email.to_string(), password: password.to_string(), role }
    }

    async fn save(&self, account: NewAccount) -> Result<Account, StoreError> {
        let hash = hash_password(&account.password)?;
        let created = models::user::create(&self.db, &account.email, &hash, account.role).await?;
        Ok(account_view(&created))
    }

    async fn update_profile(&self, id: i32, changes: ProfileChanges) -> Result<Account, StoreError> {
        let found = models::user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .ok_or_else(|| StoreError::not_found("user"))?;
        let mut am: models::user::ActiveModel = found.into();
        if let Some(email) = changes.email {
            am.email = Set(email);
        }
        if let Some(password) = changes.password {
            am.password_hash = Set(hash_password(&password)?);
        }
        am.updated_at = Set(Utc::now().into());
        let updated = am
            .update(&self.db)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(account_view(&updated))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use uuid::Uuid;

    use super::*;
    use crate::account::AccountService;
    use crate::account::domain::ProfileChanges;
    use crate::account::token::JwtTokenIssuer;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn account_flow_against_database() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let store = Arc::new(SeaOrmUserStore { db });
        let issuer = Arc::new(JwtTokenIssuer::new("it-secret", 1));
        let svc = AccountService::new(store.clone(), issuer);

        let email = format!("it_{}@example.com", Uuid::new_v4());
        svc.create_account(&email, "Passw0rd!", Role::Host).await?;

        // duplicate registration is rejected without touching save
        let dup = svc.create_account(&email, "Other1234", Role::Client).await;
        assert_eq!(dup.unwrap_err().to_string(), "There is a user with that email already");

        let session = svc.login(&email, "Passw0rd!").await?;
        assert!(!session.token.is_empty());
        assert!(svc.login(&email, "wrong").await.is_err());

        let account = store.find_auth_by_email(&email).await?.unwrap().account;
        let fresh = format!("it_{}@example.com", Uuid::new_v4());
        svc.edit_profile(account.id, ProfileChanges { email: Some(fresh.clone()), password: None }).await?;
        let reread = svc.find_by_id(account.id).await?;
        assert_eq!(reread.email, fresh);

        models::user::Entity::delete_by_id(account.id).exec(&store.db).await?;
        Ok(())
    }
}
