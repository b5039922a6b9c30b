//! vidcat: client for a paginated video catalog
//!
//! A session store, HTTP clients for the auth and catalog services, and a
//! view-state controller, with a terminal front-end on top.

pub mod api;
pub mod config;
pub mod controller;
pub mod errors;
pub mod i18n;
pub mod models;
pub mod pagination;
pub mod session;
pub mod tui;

pub use errors::{ClientError, Result};
