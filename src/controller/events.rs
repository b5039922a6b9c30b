//! Inputs to and outputs from the view state machine

use crate::models::{CatalogEntry, CatalogPage, ListQuery, NewEntry, Session, User};

/// Identifies one listing request so late answers can be recognised.
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialog {
    #[default]
    Login,
    Subscribe,
    Admin,
}

/// Whether the login dialog signs in or creates an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// Short message surfaced to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }
}

/// Everything that can happen to the view: user intents and completions of earlier effects.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Started,
    SessionRestored(Option<Session>),

    SearchSubmitted(String),
    TagSelected(String),
    FilterCleared,
    PageRequested(u32),
    PageLoaded { request_id: RequestId, page: CatalogPage },
    PageFailed { request_id: RequestId, message: String },

    DialogOpened(Dialog),
    DialogClosed(Dialog),
    AuthModeToggled,

    LoginSubmitted { username: String, password: String },
    LoginSucceeded { user: User, token: String },
    LoginRejected(String),
    LoggedOut,

    EntryActivated(CatalogEntry),

    AddEntrySubmitted(NewEntry),
    EntryAdded { id: Option<i64> },
    AddEntryRejected(String),
    DeleteRequested(i64),
    EntryDeleted(i64),
    DeleteRejected(String),

    Notified(Notice),
    NoticeDismissed,
}

/// Side effects requested by a transition. The state machine never performs them itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadSession,
    SaveSession { user: User, token: String },
    ClearSession,
    FetchPage { request_id: RequestId, query: ListQuery },
    Authenticate { mode: AuthMode, username: String, password: String },
    CreateEntry { entry: NewEntry, is_admin: bool },
    DeleteEntry { id: i64, is_admin: bool },
    Navigate(String),
}
