mod preferences;
mod product;
mod session;
mod user;

pub use self::preferences::{THEME_KEY, ThemeRepository};
pub use self::product::{
    LocalProductRepository, PRODUCTS_KEY, ProductRow, RemoteProductRepository,
};
pub use self::session::{SESSION_KEY, SessionRepository};
pub use self::user::UserRepository;
