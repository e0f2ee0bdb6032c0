mod auth;
mod hashing;
mod product;
mod storage;
mod user;

pub use self::auth::{AuthServiceTrait, DynAuthService};
pub use self::hashing::{DynHashing, HashingTrait};
pub use self::product::{DynProductStore, ProductChange, ProductStoreTrait};
pub use self::storage::{DynKeyValueStore, KeyValueStoreTrait};
pub use self::user::{
    DynSessionRepository, DynUserRepository, SessionRepositoryTrait, UserRepositoryTrait,
};
