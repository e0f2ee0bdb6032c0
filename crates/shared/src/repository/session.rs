use crate::{
    abstract_trait::{DynKeyValueStore, SessionRepositoryTrait},
    errors::RepositoryError,
    model::UserSession,
};
use async_trait::async_trait;
use tracing::{debug, warn};

pub const SESSION_KEY: &str = "isLoggedIn";

pub struct SessionRepository {
    store: DynKeyValueStore,
}

impl SessionRepository {
    pub fn new(store: DynKeyValueStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SessionRepositoryTrait for SessionRepository {
    async fn current(&self) -> Result<Option<UserSession>, RepositoryError> {
        let Some(raw) = self.store.get(SESSION_KEY).await? else {
            debug!("No persisted session");
            return Ok(None);
        };

        match serde_json::from_str::<UserSession>(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                // a stale or foreign value means nobody is signed in
                warn!("Discarding undecodable session: {err}");
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &UserSession) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(session)?;
        self.store.set(SESSION_KEY, &json).await?;
        debug!("Session saved for {}", session.uid);
        Ok(())
    }

    async fn clear(&self) -> Result<(), RepositoryError> {
        self.store.remove(SESSION_KEY).await?;
        debug!("Session cleared");
        Ok(())
    }
}
