use crate::{
    errors::RepositoryError,
    model::{UserAccount, UserSession},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynUserRepository = Arc<dyn UserRepositoryTrait + Send + Sync>;
pub type DynSessionRepository = Arc<dyn SessionRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait UserRepositoryTrait {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, RepositoryError>;
    async fn create_user(&self, account: &UserAccount) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait SessionRepositoryTrait {
    async fn current(&self) -> Result<Option<UserSession>, RepositoryError>;
    async fn save(&self, session: &UserSession) -> Result<(), RepositoryError>;
    async fn clear(&self) -> Result<(), RepositoryError>;
}
