use crate::{
    abstract_trait::{DynKeyValueStore, UserRepositoryTrait},
    errors::RepositoryError,
    model::UserAccount,
};
use async_trait::async_trait;
use tracing::{error, info};

/// Accounts stored one per key, `user:<lowercased email>`.
pub struct UserRepository {
    store: DynKeyValueStore,
}

impl UserRepository {
    pub fn new(store: DynKeyValueStore) -> Self {
        Self { store }
    }

    fn key(email: &str) -> String {
        format!("user:{}", email.trim().to_lowercase())
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, RepositoryError> {
        let Some(raw) = self.store.get(&Self::key(email)).await? else {
            return Ok(None);
        };

        let account = serde_json::from_str(&raw).map_err(|err| {
            error!("❌ Failed to decode account record for {email}: {err}");
            RepositoryError::from(err)
        })?;
        Ok(Some(account))
    }

    async fn create_user(&self, account: &UserAccount) -> Result<(), RepositoryError> {
        let key = Self::key(&account.email);
        if self.store.get(&key).await?.is_some() {
            return Err(RepositoryError::Conflict(format!(
                "account {} already exists",
                account.email
            )));
        }

        let json = serde_json::to_string(account)?;
        self.store.set(&key, &json).await?;

        info!("✅ Created account {} ({})", account.uid, account.email);
        Ok(())
    }
}
