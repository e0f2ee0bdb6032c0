mod price;
mod product;
mod user;

pub use self::price::{Price, PriceError};
pub use self::product::{DEFAULT_DESCRIPTION, Product, ProductId, description_or_default};
pub use self::user::{UserAccount, UserSession};
