//! The product list behind the home, details, add and edit screens.
//!
//! [`ProductListService`] owns the in-memory collection and the screen
//! state. Every mutation is mirrored to the configured [`DynProductStore`]
//! right away; when that write fails the in-memory change is undone and a
//! notice is raised, so the list on screen always matches storage.

use crate::{
    abstract_trait::{DynProductStore, ProductChange},
    domain::{
        requests::ProductForm,
        view::{ListSection, LoadState, Notice, Overlay, ViewState},
    },
    errors::{RepositoryError, ServiceError},
    model::{Product, ProductId},
    repository::ThemeRepository,
    utils::{Method, Metrics, Status, generate_random_string},
};
use chrono::Utc;
use tokio::time::Instant;
use tracing::{error, info, warn};

pub const LOAD_FAILED: &str = "Nie udało się wczytać listy produktów. Spróbuj ponownie.";
pub const SAVE_FAILED: &str = "Nie udało się zapisać zmian. Spróbuj ponownie.";
pub const ADD_FAILED: &str = "Nie udało się dodać produktu";
pub const TOGGLE_FAILED: &str = "Nie można zmienić statusu produktu. Spróbuj ponownie.";
pub const DELETE_FAILED: &str = "Nie udało się usunąć produktu. Spróbuj ponownie.";
pub const NOT_FOUND: &str = "Nie znaleziono produktu";
pub const THEME_FAILED: &str = "Nie udało się zapisać ustawień motywu";
pub const NOT_LOADED: &str = "Lista produktów nie została wczytana. Odśwież listę i spróbuj ponownie.";

const ID_SUFFIX_LEN: usize = 4;

pub struct ProductListServiceDeps {
    pub store: DynProductStore,
    pub theme: ThemeRepository,
    pub owner_id: Option<String>,
    pub metrics: Metrics,
}

pub struct ProductListService {
    store: DynProductStore,
    theme: ThemeRepository,
    owner_id: Option<String>,
    metrics: Metrics,
    products: Vec<Product>,
    view: ViewState,
}

impl ProductListService {
    pub fn new(deps: ProductListServiceDeps) -> Self {
        let ProductListServiceDeps {
            store,
            theme,
            owner_id,
            metrics,
        } = deps;

        Self {
            store,
            theme,
            owner_id,
            metrics,
            products: Vec::new(),
            view: ViewState::default(),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Entries visible under the active tab and filter.
    pub fn section(&self) -> ListSection<'_> {
        self.view.section(&self.products)
    }

    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    fn position(&self, id: &ProductId) -> Result<usize, ServiceError> {
        self.products
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    fn finish(&self, method: Method, started: Instant, ok: bool) {
        let status = if ok { Status::Success } else { Status::Error };
        self.metrics
            .record(method, status, started.elapsed().as_secs_f64());
    }

    fn fail(&mut self, message: &str, err: RepositoryError) -> ServiceError {
        let message = match err {
            RepositoryError::NotFound => NOT_FOUND,
            _ => message,
        };
        self.view.raise(Notice::error(message));
        ServiceError::Repo(err)
    }

    /// Writes are refused until a load has succeeded, since the local store
    /// persists the whole in-memory list and would overwrite what it missed.
    fn ensure_loaded(&mut self, method: Method, started: Instant) -> Result<(), ServiceError> {
        if self.view.load == LoadState::Ready {
            return Ok(());
        }

        warn!("Refusing to modify products while the list is {:?}", self.view.load);
        self.finish(method, started, false);
        self.view.raise(Notice::error(NOT_LOADED));
        Err(ServiceError::NotLoaded)
    }

    fn not_found(&mut self, err: ServiceError) -> ServiceError {
        self.view.raise(Notice::error(NOT_FOUND));
        err
    }

    /// Replace the collection with what storage holds. On failure the list
    /// is left empty and the load state carries a retryable message.
    pub async fn load(&mut self) -> Result<usize, ServiceError> {
        let started = Instant::now();
        self.view.load = LoadState::Loading;

        match self.store.fetch_all().await {
            Ok(products) => {
                self.products = products;
                self.view.load = LoadState::Ready;
                self.finish(Method::Get, started, true);
                info!(
                    "✅ Loaded {} products from {} storage",
                    self.products.len(),
                    self.store.backend()
                );
                Ok(self.products.len())
            }
            Err(err) => {
                error!("❌ Failed to load products: {err}");
                self.products.clear();
                self.view.load = LoadState::Failed(LOAD_FAILED.to_string());
                self.finish(Method::Get, started, false);
                Err(ServiceError::Repo(err))
            }
        }
    }

    /// Re-read storage and update a single entry, as the details screen does
    /// when it regains focus. Returns `None` if storage no longer has it.
    pub async fn refresh_product(
        &mut self,
        id: &ProductId,
    ) -> Result<Option<&Product>, ServiceError> {
        let started = Instant::now();

        let stored = match self.store.fetch_all().await {
            Ok(products) => products.into_iter().find(|p| &p.id == id),
            Err(err) => {
                error!("❌ Failed to refresh product {id}: {err}");
                self.finish(Method::Get, started, false);
                return Err(ServiceError::Repo(err));
            }
        };
        self.finish(Method::Get, started, true);

        let Some(fresh) = stored else {
            warn!("Product {id} is no longer in storage");
            return Ok(None);
        };

        match self.products.iter().position(|p| &p.id == id) {
            Some(index) => {
                self.products[index] = fresh;
                Ok(self.products.get(index))
            }
            None => Ok(None),
        }
    }

    fn next_id(&self) -> Result<ProductId, ServiceError> {
        loop {
            let suffix = generate_random_string(ID_SUFFIX_LEN)
                .map_err(|e| ServiceError::Internal(format!("id generation failed: {e}")))?;
            let id = ProductId::generate(Utc::now(), &suffix);
            if self.find(&id).is_none() {
                return Ok(id);
            }
        }
    }

    /// Validate, prepend and persist a new product.
    pub async fn add(&mut self, form: ProductForm) -> Result<&Product, ServiceError> {
        let started = Instant::now();
        info!("🏗️ Creating new product: {}", form.name.trim());
        self.ensure_loaded(Method::Post, started)?;

        let draft = match form.into_draft() {
            Ok(draft) => draft,
            Err(errors) => {
                warn!("Rejected product form: {errors:?}");
                self.finish(Method::Post, started, false);
                return Err(ServiceError::Validation(errors));
            }
        };

        let product = Product {
            id: self.next_id()?,
            name: draft.name,
            price: draft.price,
            store: draft.store,
            description: draft.description,
            purchased: false,
            owner_id: self.owner_id.clone(),
            created_at: Some(Utc::now()),
        };

        self.products.insert(0, product);
        let result = self
            .store
            .persist(&self.products, ProductChange::Created(&self.products[0]))
            .await;

        if let Err(err) = result {
            let removed = self.products.remove(0);
            error!("❌ Failed to create product {}: {err}", removed.name);
            self.finish(Method::Post, started, false);
            return Err(self.fail(ADD_FAILED, err));
        }

        self.finish(Method::Post, started, true);
        info!("✅ Product created: {} (ID: {})", self.products[0].name, self.products[0].id);
        Ok(&self.products[0])
    }

    /// Validate and overwrite name, price, store and description. The id,
    /// purchase flag, owner and creation time are kept.
    pub async fn edit(
        &mut self,
        id: &ProductId,
        form: ProductForm,
    ) -> Result<&Product, ServiceError> {
        let started = Instant::now();
        info!("✏️ Updating product ID={id}");
        self.ensure_loaded(Method::Put, started)?;

        let draft = match form.into_draft() {
            Ok(draft) => draft,
            Err(errors) => {
                warn!("Rejected product form for {id}: {errors:?}");
                self.finish(Method::Put, started, false);
                return Err(ServiceError::Validation(errors));
            }
        };

        let index = match self.position(id) {
            Ok(index) => index,
            Err(err) => {
                self.finish(Method::Put, started, false);
                return Err(self.not_found(err));
            }
        };

        let updated = Product {
            name: draft.name,
            price: draft.price,
            store: draft.store,
            description: draft.description,
            ..self.products[index].clone()
        };
        let previous = std::mem::replace(&mut self.products[index], updated);

        let result = self
            .store
            .persist(&self.products, ProductChange::Updated(&self.products[index]))
            .await;

        if let Err(err) = result {
            error!("❌ Failed to update product {id}: {err}");
            self.products[index] = previous;
            self.finish(Method::Put, started, false);
            return Err(self.fail(SAVE_FAILED, err));
        }

        self.finish(Method::Put, started, true);
        info!("🔄 Product updated: {}", self.products[index].name);
        Ok(&self.products[index])
    }

    /// Flip the purchased flag. Returns the new value.
    pub async fn toggle(&mut self, id: &ProductId) -> Result<bool, ServiceError> {
        let started = Instant::now();
        self.ensure_loaded(Method::Put, started)?;

        let index = match self.position(id) {
            Ok(index) => index,
            Err(err) => {
                self.finish(Method::Put, started, false);
                return Err(self.not_found(err));
            }
        };

        let purchased = !self.products[index].purchased;
        self.products[index].purchased = purchased;

        let result = self
            .store
            .persist(&self.products, ProductChange::Updated(&self.products[index]))
            .await;

        if let Err(err) = result {
            error!("❌ Failed to toggle product {id}: {err}");
            self.products[index].purchased = !purchased;
            self.finish(Method::Put, started, false);
            return Err(self.fail(TOGGLE_FAILED, err));
        }

        self.finish(Method::Put, started, true);
        info!("☑️ Product {id} purchased={purchased}");
        Ok(purchased)
    }

    /// Remove a product. A failed write puts it back at its old position.
    pub async fn delete(&mut self, id: &ProductId) -> Result<Product, ServiceError> {
        let started = Instant::now();
        info!("🗑️ Deleting product ID={id}");
        self.ensure_loaded(Method::Delete, started)?;

        let index = match self.position(id) {
            Ok(index) => index,
            Err(err) => {
                self.finish(Method::Delete, started, false);
                return Err(self.not_found(err));
            }
        };

        let removed = self.products.remove(index);
        let result = self
            .store
            .persist(&self.products, ProductChange::Deleted(&removed.id))
            .await;

        if let Err(err) = result {
            error!("❌ Failed to delete product {id}: {err}");
            self.products.insert(index, removed);
            self.finish(Method::Delete, started, false);
            return Err(self.fail(DELETE_FAILED, err));
        }

        if matches!(&self.view.overlay, Overlay::ConfirmDelete(pending) if pending == id) {
            self.view.close_overlay();
        }

        self.finish(Method::Delete, started, true);
        info!("✅ Product deleted: {} (ID: {})", removed.name, removed.id);
        Ok(removed)
    }

    /// Read the stored theme into the view state.
    pub async fn load_theme(&mut self) -> bool {
        match self.theme.load_dark_mode().await {
            Ok(dark) => self.view.dark_mode = dark,
            Err(err) => error!("❌ Failed to load theme: {err}"),
        }
        self.view.dark_mode
    }

    /// Flip dark mode and persist it; the flag is restored if saving fails.
    pub async fn toggle_theme(&mut self) -> Result<bool, ServiceError> {
        let started = Instant::now();
        let next = !self.view.dark_mode;
        self.view.dark_mode = next;

        if let Err(err) = self.theme.save_dark_mode(next).await {
            self.view.dark_mode = !next;
            self.finish(Method::Put, started, false);
            self.view.raise(Notice::error(THEME_FAILED));
            return Err(ServiceError::Repo(err));
        }

        self.finish(Method::Put, started, true);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::{DynKeyValueStore, KeyValueStoreTrait, ProductStoreTrait},
        domain::view::Tab,
        model::{DEFAULT_DESCRIPTION, Price},
        repository::LocalProductRepository,
        storage::MemoryStore,
    };
    use async_trait::async_trait;
    use std::sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    };

    /// Memory store whose writes can be switched off.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_writes: AtomicBool,
        fail_reads: AtomicBool,
    }

    #[async_trait]
    impl KeyValueStoreTrait for FlakyStore {
        async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(RepositoryError::Custom("read refused".into()));
            }
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(RepositoryError::Custom("disk full".into()));
            }
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<(), RepositoryError> {
            self.inner.remove(key).await
        }
    }

    async fn service() -> (ProductListService, Arc<FlakyStore>) {
        let kv = Arc::new(FlakyStore::default());
        let dyn_kv = kv.clone() as DynKeyValueStore;
        let mut service = ProductListService::new(ProductListServiceDeps {
            store: Arc::new(LocalProductRepository::new(dyn_kv.clone())),
            theme: ThemeRepository::new(dyn_kv),
            owner_id: None,
            metrics: Metrics::new(),
        });
        service.load().await.unwrap();
        (service, kv)
    }

    /// Remote table that lost every row behind the client's back.
    struct MissingRows(Vec<Product>);

    #[async_trait]
    impl ProductStoreTrait for MissingRows {
        async fn fetch_all(&self) -> Result<Vec<Product>, RepositoryError> {
            Ok(self.0.clone())
        }

        async fn persist(
            &self,
            _snapshot: &[Product],
            _change: ProductChange<'_>,
        ) -> Result<(), RepositoryError> {
            Err(RepositoryError::NotFound)
        }

        fn backend(&self) -> &'static str {
            "remote"
        }
    }

    async fn stale_remote() -> ProductListService {
        let bread = Product {
            id: ProductId::new("1700000000000abc"),
            name: "Bread".into(),
            price: Price::Amount(4.0),
            store: "Biedronka".into(),
            description: DEFAULT_DESCRIPTION.into(),
            purchased: false,
            owner_id: Some("uid-1".into()),
            created_at: None,
        };
        let mut service = ProductListService::new(ProductListServiceDeps {
            store: Arc::new(MissingRows(vec![bread])),
            theme: ThemeRepository::new(Arc::new(MemoryStore::default()) as DynKeyValueStore),
            owner_id: Some("uid-1".into()),
            metrics: Metrics::new(),
        });
        service.load().await.unwrap();
        service
    }

    fn milk() -> ProductForm {
        ProductForm::new("Milk", "3.5", "Lidl", "")
    }

    #[tokio::test]
    async fn add_prepends_exactly_one_entry() {
        let (mut service, _) = service().await;
        service.add(milk()).await.unwrap();
        let second = service
            .add(ProductForm::new("Bread", "4", "Biedronka", ""))
            .await
            .unwrap()
            .id
            .clone();

        assert_eq!(service.products().len(), 2);
        assert_eq!(service.products()[0].id, second);
        assert_ne!(service.products()[0].id, service.products()[1].id);
    }

    #[tokio::test]
    async fn invalid_form_changes_nothing() {
        let (mut service, _) = service().await;
        let err = service
            .add(ProductForm::new("", "-1", "Lidl", ""))
            .await
            .unwrap_err();

        let fields = err.field_errors().unwrap();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("price"));
        assert!(service.products().is_empty());
        assert!(service.view().notice.is_none());
    }

    #[tokio::test]
    async fn failed_add_is_rolled_back() {
        let (mut service, kv) = service().await;
        kv.fail_writes.store(true, Ordering::SeqCst);

        assert!(service.add(milk()).await.is_err());
        assert!(service.products().is_empty());
        assert_eq!(
            service.view().notice.as_ref().map(|n| n.message.as_str()),
            Some(ADD_FAILED)
        );
    }

    #[tokio::test]
    async fn failed_toggle_restores_flag() {
        let (mut service, kv) = service().await;
        let id = service.add(milk()).await.unwrap().id.clone();

        kv.fail_writes.store(true, Ordering::SeqCst);
        assert!(service.toggle(&id).await.is_err());
        assert!(!service.find(&id).unwrap().purchased);
        assert_eq!(
            service.view().notice.as_ref().map(|n| n.message.as_str()),
            Some(TOGGLE_FAILED)
        );
    }

    #[tokio::test]
    async fn failed_delete_puts_product_back_in_place() {
        let (mut service, kv) = service().await;
        let first = service.add(milk()).await.unwrap().id.clone();
        let second = service
            .add(ProductForm::new("Bread", "4", "Biedronka", ""))
            .await
            .unwrap()
            .id
            .clone();

        kv.fail_writes.store(true, Ordering::SeqCst);
        assert!(service.delete(&first).await.is_err());

        let ids: Vec<_> = service.products().iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[tokio::test]
    async fn failed_edit_keeps_previous_fields() {
        let (mut service, kv) = service().await;
        let id = service.add(milk()).await.unwrap().id.clone();

        kv.fail_writes.store(true, Ordering::SeqCst);
        let result = service
            .edit(&id, ProductForm::new("Milk", "3.5", "Biedronka", ""))
            .await;

        assert!(result.is_err());
        assert_eq!(service.find(&id).unwrap().store, "Lidl");
    }

    #[tokio::test]
    async fn edit_keeps_identity_and_status() {
        let (mut service, _) = service().await;
        let id = service.add(milk()).await.unwrap().id.clone();
        service.toggle(&id).await.unwrap();
        let created_at = service.find(&id).unwrap().created_at;

        let edited = service
            .edit(&id, ProductForm::new("Milk 2%", "abc", "Lidl", "karton"))
            .await
            .unwrap();

        assert_eq!(edited.id, id);
        assert!(edited.purchased);
        assert_eq!(edited.created_at, created_at);
        assert_eq!(edited.price, Price::Unspecified);
        assert_eq!(edited.description, "karton");
    }

    #[tokio::test]
    async fn unknown_id_is_reported() {
        let (mut service, _) = service().await;
        let missing = ProductId::new("nope");

        assert!(matches!(
            service.toggle(&missing).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(&missing).await,
            Err(ServiceError::NotFound(_))
        ));
        assert_eq!(
            service.view().notice.as_ref().map(|n| n.message.as_str()),
            Some(NOT_FOUND)
        );
    }

    #[tokio::test]
    async fn read_failure_leaves_empty_list_and_retry_state() {
        let (mut service, kv) = service().await;
        service.add(milk()).await.unwrap();

        kv.fail_reads.store(true, Ordering::SeqCst);
        assert!(service.load().await.is_err());
        assert!(service.products().is_empty());
        assert_eq!(service.view().load, LoadState::Failed(LOAD_FAILED.to_string()));

        kv.fail_reads.store(false, Ordering::SeqCst);
        assert_eq!(service.load().await.unwrap(), 1);
        assert_eq!(service.view().load, LoadState::Ready);
    }

    #[tokio::test]
    async fn writes_are_refused_after_a_failed_load() {
        let (mut service, kv) = service().await;
        service.add(milk()).await.unwrap();
        service
            .add(ProductForm::new("Bread", "4", "Biedronka", ""))
            .await
            .unwrap();

        kv.fail_reads.store(true, Ordering::SeqCst);
        assert!(service.load().await.is_err());
        kv.fail_reads.store(false, Ordering::SeqCst);

        let eggs = ProductForm::new("Eggs", "9", "Lidl", "");
        assert!(matches!(
            service.add(eggs).await,
            Err(ServiceError::NotLoaded)
        ));
        assert_eq!(
            service.view().notice.as_ref().map(|n| n.message.as_str()),
            Some(NOT_LOADED)
        );

        assert_eq!(service.load().await.unwrap(), 2);
        let id = service.products()[0].id.clone();
        service.toggle(&id).await.unwrap();
    }

    #[tokio::test]
    async fn rows_missing_remotely_roll_back_with_not_found() {
        let mut service = stale_remote().await;
        let id = service.products()[0].id.clone();

        let err = service
            .edit(&id, ProductForm::new("Rye bread", "5", "Lidl", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Repo(RepositoryError::NotFound)));
        assert_eq!(service.products()[0].name, "Bread");
        assert_eq!(
            service.view().notice.as_ref().map(|n| n.message.as_str()),
            Some(NOT_FOUND)
        );

        service.view_mut().dismiss_notice();
        let err = service.delete(&id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Repo(RepositoryError::NotFound)));
        assert_eq!(service.products().len(), 1);
        assert_eq!(service.products()[0].id, id);
        assert_eq!(
            service.view().notice.as_ref().map(|n| n.message.as_str()),
            Some(NOT_FOUND)
        );
    }

    #[tokio::test]
    async fn delete_closes_matching_confirmation() {
        let (mut service, _) = service().await;
        let id = service.add(milk()).await.unwrap().id.clone();

        service.view_mut().confirm_delete(id.clone());
        service.delete(&id).await.unwrap();
        assert_eq!(service.view().overlay, Overlay::None);
    }

    #[tokio::test]
    async fn section_follows_tab_after_toggle() {
        let (mut service, _) = service().await;
        let id = service.add(milk()).await.unwrap().id.clone();
        service.toggle(&id).await.unwrap();

        assert!(service.section().items.is_empty());
        service.view_mut().select_tab(Tab::Purchased);
        assert_eq!(service.section().items.len(), 1);
    }

    #[tokio::test]
    async fn refresh_picks_up_external_changes() {
        let (mut service, kv) = service().await;
        let id = service.add(milk()).await.unwrap().id.clone();

        let mut stored = service.products().to_vec();
        stored[0].purchased = true;
        kv.inner
            .set(
                crate::repository::PRODUCTS_KEY,
                &serde_json::to_string(&stored).unwrap(),
            )
            .await
            .unwrap();

        let refreshed = service.refresh_product(&id).await.unwrap().unwrap();
        assert!(refreshed.purchased);
    }

    #[tokio::test]
    async fn theme_toggle_persists_and_rolls_back() {
        let (mut service, kv) = service().await;
        assert!(!service.load_theme().await);

        assert!(service.toggle_theme().await.unwrap());
        assert_eq!(
            kv.inner.get(crate::repository::THEME_KEY).await.unwrap().as_deref(),
            Some("true")
        );

        kv.fail_writes.store(true, Ordering::SeqCst);
        assert!(service.toggle_theme().await.is_err());
        assert!(service.view().dark_mode);
    }

    #[tokio::test]
    async fn operations_are_counted() {
        let (mut service, _) = service().await;
        service.add(milk()).await.unwrap();
        let _ = service.add(ProductForm::default()).await;

        assert_eq!(service.metrics.count(Method::Post, Status::Success), 1);
        assert_eq!(service.metrics.count(Method::Post, Status::Error), 1);
    }
}
