pub mod requests;
pub mod view;
