use anyhow::{Context, Result, anyhow};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    File,
    Redis,
    Remote,
}

impl StoreBackend {
    fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "file" | "local" => Ok(StoreBackend::File),
            "redis" => Ok(StoreBackend::Redis),
            "remote" | "postgres" => Ok(StoreBackend::Remote),
            other => Err(anyhow!(
                "STORE_BACKEND must be 'file', 'redis' or 'remote', got '{}'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub is_dev: bool,
    pub enable_file: bool,
    pub log_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend: StoreBackend,
    pub local_store_path: PathBuf,
    pub redis_url: Option<String>,
    pub redis_prefix: String,
    pub database_url: Option<String>,
    pub db_max_conn: u32,
    pub bcrypt_cost: u32,
    pub log: LogConfig,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source; `init` uses the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str| {
            lookup(key)
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false)
        };

        let backend = match lookup("STORE_BACKEND") {
            Some(raw) => StoreBackend::parse(&raw)?,
            None => StoreBackend::File,
        };

        let local_store_path = lookup("LOCAL_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data/store.json"));

        let redis_url = lookup("REDIS_URL");
        if backend == StoreBackend::Redis && redis_url.is_none() {
            return Err(anyhow!("Missing environment variable: REDIS_URL"));
        }

        let database_url = lookup("DATABASE_URL");
        if backend == StoreBackend::Remote && database_url.is_none() {
            return Err(anyhow!("Missing environment variable: DATABASE_URL"));
        }

        let db_max_conn = lookup("DB_MAX_CONN")
            .map(|v| v.parse::<u32>())
            .transpose()
            .context("DB_MAX_CONN must be a valid u32 integer")?
            .unwrap_or(5);

        let bcrypt_cost = lookup("BCRYPT_COST")
            .map(|v| v.parse::<u32>())
            .transpose()
            .context("BCRYPT_COST must be a valid u32 integer")?
            .unwrap_or(bcrypt::DEFAULT_COST);

        let is_dev = flag("DEV_MODE");
        let log_dir = lookup("LOG_DIR").map(PathBuf::from).unwrap_or_else(|| {
            if is_dev {
                PathBuf::from("./logs")
            } else {
                PathBuf::from("/var/log/app")
            }
        });

        Ok(Self {
            backend,
            local_store_path,
            redis_url,
            redis_prefix: lookup("REDIS_PREFIX").unwrap_or_else(|| "shopping".to_string()),
            database_url,
            db_max_conn,
            bcrypt_cost,
            log: LogConfig {
                is_dev,
                enable_file: flag("ENABLE_FILE_LOG"),
                log_dir,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_local_file_store() {
        let config = config(&[]).unwrap();
        assert_eq!(config.backend, StoreBackend::File);
        assert_eq!(config.local_store_path, PathBuf::from("./data/store.json"));
        assert_eq!(config.db_max_conn, 5);
        assert!(!config.log.is_dev);
    }

    #[test]
    fn remote_backend_requires_database_url() {
        assert!(config(&[("STORE_BACKEND", "remote")]).is_err());

        let config = config(&[
            ("STORE_BACKEND", "remote"),
            ("DATABASE_URL", "postgres://localhost/shopping"),
        ])
        .unwrap();
        assert_eq!(config.backend, StoreBackend::Remote);
    }

    #[test]
    fn rejects_unknown_backend() {
        assert!(config(&[("STORE_BACKEND", "sqlite")]).is_err());
    }
}
