//! View state controller
//!
//! A pure transition function (`state`) plus a driver (`runtime`) that
//! executes the effects it asks for against the clients and the session store.

pub mod events;
pub mod state;
pub mod runtime;

pub use events::{AuthMode, Dialog, Effect, Event, Notice, NoticeKind, RequestId};
pub use state::{Dialogs, ResponseOrdering, ViewState};
pub use runtime::{Controller, Navigator, Services, SystemNavigator};
