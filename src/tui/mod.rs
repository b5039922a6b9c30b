//! Terminal user interface for browsing the catalog
//!
//! Screens turn key presses into controller events; effects run as
//! background tasks whose completions flow back into the app loop.

pub mod app;
pub mod components;
pub mod events;
pub mod handlers;
pub mod screens;
pub mod traits;
pub mod ui;

pub use app::App;
pub use traits::{Screen, ScreenAction};
