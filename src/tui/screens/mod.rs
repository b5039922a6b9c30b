//! Screen and dialog modules for the catalog TUI

pub mod admin;
pub mod catalog;
pub mod help;
pub mod login;
pub mod subscribe;

pub use admin::AdminDialog;
pub use catalog::{CatalogScreen, Focus};
pub use login::LoginDialog;
pub use subscribe::SubscribeDialog;
