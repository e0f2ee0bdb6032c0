use crate::{
    abstract_trait::{
        DynAuthService, DynHashing, DynKeyValueStore, DynProductStore, DynSessionRepository,
        DynUserRepository,
    },
    config::ConnectionPool,
    model::UserSession,
    repository::{
        LocalProductRepository, RemoteProductRepository, SessionRepository, ThemeRepository,
        UserRepository,
    },
    service::{AuthService, AuthServiceDeps, ProductListService, ProductListServiceDeps},
    utils::Metrics,
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;
use tracing::info;

/// Where product lists live. Preferences, accounts and the session always
/// stay in the key-value store.
#[derive(Clone)]
pub enum ProductBackend {
    Local,
    Remote(ConnectionPool),
}

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_service: DynAuthService,
    store: DynKeyValueStore,
    backend: ProductBackend,
    product_metrics: Metrics,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let backend = match self.backend {
            ProductBackend::Local => "local",
            ProductBackend::Remote(_) => "remote",
        };
        f.debug_struct("DependenciesInject")
            .field("auth_service", &"<AuthService>")
            .field("store", &"<dyn KeyValueStore>")
            .field("backend", &backend)
            .finish()
    }
}

pub struct DependenciesInjectDeps {
    pub store: DynKeyValueStore,
    pub backend: ProductBackend,
    pub hash: DynHashing,
    pub registry: Arc<Mutex<Registry>>,
}

impl DependenciesInject {
    pub async fn new(deps: DependenciesInjectDeps) -> Self {
        let DependenciesInjectDeps {
            store,
            backend,
            hash,
            registry,
        } = deps;

        let auth_metrics = Metrics::new();
        let product_metrics = Metrics::new();
        {
            let mut registry = registry.lock().await;
            auth_metrics.register(&mut registry, "auth_service", "AuthService");
            product_metrics.register(&mut registry, "product_list", "ProductListService");
        }

        let users = Arc::new(UserRepository::new(store.clone())) as DynUserRepository;
        let sessions = Arc::new(SessionRepository::new(store.clone())) as DynSessionRepository;

        let auth_service = Arc::new(AuthService::new(AuthServiceDeps {
            users,
            sessions,
            hash,
            metrics: auth_metrics,
        })) as DynAuthService;

        Self {
            auth_service,
            store,
            backend,
            product_metrics,
        }
    }

    /// Product list for the signed-in user. Remote lists are scoped by the
    /// user's uid; the local list is shared by everyone on this device.
    pub fn product_list(&self, session: &UserSession) -> ProductListService {
        let (store, owner_id) = match &self.backend {
            ProductBackend::Local => (
                Arc::new(LocalProductRepository::new(self.store.clone())) as DynProductStore,
                None,
            ),
            ProductBackend::Remote(pool) => (
                Arc::new(RemoteProductRepository::new(pool.clone(), session.uid.clone()))
                    as DynProductStore,
                Some(session.uid.clone()),
            ),
        };

        info!(
            "🛒 Opening {} product list for {}",
            store.backend(),
            session.email
        );

        ProductListService::new(ProductListServiceDeps {
            store,
            theme: ThemeRepository::new(self.store.clone()),
            owner_id,
            metrics: self.product_metrics.clone(),
        })
    }
}
