mod local;
mod remote;

pub use self::local::{LocalProductRepository, PRODUCTS_KEY};
pub use self::remote::{ProductRow, RemoteProductRepository};
