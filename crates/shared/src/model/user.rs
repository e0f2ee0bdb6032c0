use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub uid: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Signed-in user, persisted so a restart keeps the user logged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub uid: String,
    pub email: String,
}

impl From<&UserAccount> for UserSession {
    fn from(account: &UserAccount) -> Self {
        Self {
            uid: account.uid.clone(),
            email: account.email.clone(),
        }
    }
}
