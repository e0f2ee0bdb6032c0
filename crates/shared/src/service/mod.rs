mod auth;
mod product;

pub use self::auth::{AuthService, AuthServiceDeps, EMAIL_TAKEN};
pub use self::product::{
    ADD_FAILED, DELETE_FAILED, LOAD_FAILED, NOT_FOUND, NOT_LOADED, ProductListService,
    ProductListServiceDeps, SAVE_FAILED, THEME_FAILED, TOGGLE_FAILED,
};
