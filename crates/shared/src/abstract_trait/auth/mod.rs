use crate::{
    domain::requests::{LoginRequest, RegisterRequest},
    errors::ServiceError,
    model::UserSession,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynAuthService = Arc<dyn AuthServiceTrait + Send + Sync>;

#[async_trait]
pub trait AuthServiceTrait {
    async fn sign_up(&self, req: &RegisterRequest) -> Result<UserSession, ServiceError>;
    async fn sign_in(&self, req: &LoginRequest) -> Result<UserSession, ServiceError>;
    async fn current_session(&self) -> Result<Option<UserSession>, ServiceError>;
    async fn sign_out(&self) -> Result<(), ServiceError>;
}
