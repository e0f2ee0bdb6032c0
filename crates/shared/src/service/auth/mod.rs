use crate::{
    abstract_trait::{AuthServiceTrait, DynHashing, DynSessionRepository, DynUserRepository},
    domain::requests::{FormErrors, LoginRequest, RegisterRequest},
    errors::{RepositoryError, ServiceError},
    model::{UserAccount, UserSession},
    utils::{Method, Metrics, Status},
};
use async_trait::async_trait;
use chrono::Utc;
use tokio::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

pub const EMAIL_TAKEN: &str = "Konto z tym adresem email już istnieje";

pub struct AuthService {
    users: DynUserRepository,
    sessions: DynSessionRepository,
    hash: DynHashing,
    metrics: Metrics,
}

pub struct AuthServiceDeps {
    pub users: DynUserRepository,
    pub sessions: DynSessionRepository,
    pub hash: DynHashing,
    pub metrics: Metrics,
}

impl AuthService {
    pub fn new(deps: AuthServiceDeps) -> Self {
        let AuthServiceDeps {
            users,
            sessions,
            hash,
            metrics,
        } = deps;

        Self {
            users,
            sessions,
            hash,
            metrics,
        }
    }

    fn complete(&self, method: Method, started: Instant, ok: bool) {
        let status = if ok { Status::Success } else { Status::Error };
        self.metrics
            .record(method, status, started.elapsed().as_secs_f64());
    }

    async fn register(&self, req: &RegisterRequest) -> Result<UserSession, ServiceError> {
        let errors = req.field_errors();
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }

        let account = UserAccount {
            uid: Uuid::new_v4().to_string(),
            email: req.email.clone(),
            password_hash: self.hash.hash_password(&req.password).await?,
            created_at: Utc::now(),
        };

        match self.users.create_user(&account).await {
            Ok(()) => {}
            Err(RepositoryError::Conflict(reason)) => {
                warn!("Sign-up rejected: {reason}");
                let mut errors = FormErrors::new();
                errors.insert("email".to_string(), EMAIL_TAKEN.to_string());
                return Err(ServiceError::Validation(errors));
            }
            Err(err) => return Err(err.into()),
        }

        let session = UserSession::from(&account);
        self.sessions.save(&session).await?;
        Ok(session)
    }

    async fn login(&self, req: &LoginRequest) -> Result<UserSession, ServiceError> {
        let errors = req.field_errors();
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }

        let Some(account) = self.users.find_by_email(&req.email).await? else {
            return Err(ServiceError::InvalidCredentials);
        };

        self.hash
            .compare_password(&account.password_hash, &req.password)
            .await?;

        let session = UserSession::from(&account);
        self.sessions.save(&session).await?;
        Ok(session)
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn sign_up(&self, req: &RegisterRequest) -> Result<UserSession, ServiceError> {
        let started = Instant::now();
        info!("📝 Registering account for {}", req.email);

        match self.register(req).await {
            Ok(session) => {
                self.complete(Method::Post, started, true);
                info!("✅ Account registered: {} ({})", session.email, session.uid);
                Ok(session)
            }
            Err(err) => {
                self.complete(Method::Post, started, false);
                error!("❌ Registration failed for {}: {err}", req.email);
                Err(err)
            }
        }
    }

    async fn sign_in(&self, req: &LoginRequest) -> Result<UserSession, ServiceError> {
        let started = Instant::now();
        info!("🔐 Signing in {}", req.email.trim());

        match self.login(req).await {
            Ok(session) => {
                self.complete(Method::Post, started, true);
                info!("✅ Signed in: {} ({})", session.email, session.uid);
                Ok(session)
            }
            Err(err) => {
                self.complete(Method::Post, started, false);
                error!("❌ Sign-in failed for {}: {err}", req.email.trim());
                Err(err)
            }
        }
    }

    async fn current_session(&self) -> Result<Option<UserSession>, ServiceError> {
        let started = Instant::now();
        let result = self.sessions.current().await;
        self.complete(Method::Get, started, result.is_ok());
        Ok(result?)
    }

    async fn sign_out(&self) -> Result<(), ServiceError> {
        let started = Instant::now();

        if let Err(err) = self.sessions.clear().await {
            self.complete(Method::Delete, started, false);
            error!("❌ Sign-out failed: {err}");
            return Err(err.into());
        }

        self.complete(Method::Delete, started, true);
        info!("👋 Signed out");
        Ok(())
    }
}
