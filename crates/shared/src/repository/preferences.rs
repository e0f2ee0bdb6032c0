use crate::{abstract_trait::DynKeyValueStore, errors::RepositoryError};
use tracing::{error, warn};

pub const THEME_KEY: &str = "theme";

/// Dark-mode flag stored as a JSON boolean.
#[derive(Clone)]
pub struct ThemeRepository {
    store: DynKeyValueStore,
}

impl ThemeRepository {
    pub fn new(store: DynKeyValueStore) -> Self {
        Self { store }
    }

    /// Missing or undecodable values read as light mode.
    pub async fn load_dark_mode(&self) -> Result<bool, RepositoryError> {
        let Some(raw) = self.store.get(THEME_KEY).await? else {
            return Ok(false);
        };

        match serde_json::from_str::<bool>(&raw) {
            Ok(dark) => Ok(dark),
            Err(err) => {
                warn!("Ignoring undecodable theme value {raw:?}: {err}");
                Ok(false)
            }
        }
    }

    pub async fn save_dark_mode(&self, dark: bool) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(&dark)?;
        self.store.set(THEME_KEY, &json).await.map_err(|err| {
            error!("❌ Failed to save theme setting: {err}");
            err
        })
    }
}
