//! The view state machine
//!
//! `ViewState::apply` is the whole of the client's behaviour: it takes one
//! [`Event`], updates the state in place and returns the [`Effect`]s the
//! caller must run. Completions of those effects come back as further events.
//! Nothing here touches the network or storage.

use std::collections::BTreeSet;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, error, info};

use super::events::{AuthMode, Dialog, Effect, Event, Notice, RequestId};
use crate::models::{CatalogPage, Filter, ListQuery, User};
use crate::pagination::Pager;

/// How a listing response that arrives after a newer request was issued is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseOrdering {
    /// Responses to superseded requests are dropped.
    #[default]
    LatestIssued,
    /// Whatever arrives last is shown, even if it answers an older request.
    LastArrived,
}

#[derive(Debug, Error)]
#[error("unknown response ordering '{0}' (expected 'latest-issued' or 'last-arrived')")]
pub struct ParseOrderingError(String);

impl FromStr for ResponseOrdering {
    type Err = ParseOrderingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "latest-issued" | "latest_issued" | "latest" => Ok(ResponseOrdering::LatestIssued),
            "last-arrived" | "last_arrived" | "arrival" => Ok(ResponseOrdering::LastArrived),
            other => Err(ParseOrderingError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dialogs {
    pub login: bool,
    pub subscribe: bool,
    pub admin: bool,
}

impl Dialogs {
    fn flag(&mut self, dialog: Dialog) -> &mut bool {
        match dialog {
            Dialog::Login => &mut self.login,
            Dialog::Subscribe => &mut self.subscribe,
            Dialog::Admin => &mut self.admin,
        }
    }

    pub fn is_open(&self, dialog: Dialog) -> bool {
        match dialog {
            Dialog::Login => self.login,
            Dialog::Subscribe => self.subscribe,
            Dialog::Admin => self.admin,
        }
    }

    /// The dialog drawn on top, if any.
    pub fn topmost(&self) -> Option<Dialog> {
        [Dialog::Admin, Dialog::Login, Dialog::Subscribe]
            .into_iter()
            .find(|d| self.is_open(*d))
    }
}

#[derive(Debug, Clone)]
pub struct ViewState {
    pub current_user: Option<User>,
    pub results: CatalogPage,
    pub current_page: u32,
    pub filter: Filter,
    pub dialogs: Dialogs,
    pub auth_mode: AuthMode,
    pub notice: Option<Notice>,
    pub ordering: ResponseOrdering,
    next_request: RequestId,
    latest_issued: Option<RequestId>,
    in_flight: BTreeSet<RequestId>,
    busy: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(ResponseOrdering::default())
    }
}

impl ViewState {
    pub fn new(ordering: ResponseOrdering) -> Self {
        Self {
            current_user: None,
            results: CatalogPage::empty(),
            current_page: 1,
            filter: Filter::None,
            dialogs: Dialogs::default(),
            auth_mode: AuthMode::Login,
            notice: None,
            ordering,
            next_request: 1,
            latest_issued: None,
            in_flight: BTreeSet::new(),
            busy: false,
        }
    }

    pub fn pager(&self) -> Pager {
        Pager::new(self.current_page, self.results.total_pages)
    }

    pub fn total_pages(&self) -> u32 {
        self.results.total_pages.max(1)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current_user.as_ref().is_some_and(|u| u.is_admin)
    }

    /// A listing request is outstanding.
    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// A login or admin mutation is outstanding; forms stay disabled meanwhile.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn latest_request(&self) -> Option<RequestId> {
        self.latest_issued
    }

    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Started => {
                info!("Starting catalog view");
                vec![Effect::LoadSession, self.fetch(1)]
            }
            Event::SessionRestored(session) => {
                if let Some(session) = session {
                    info!("Restored session for {}", session.user.username);
                    self.current_user = Some(session.user);
                }
                Vec::new()
            }

            Event::SearchSubmitted(text) => {
                self.filter = if text.trim().is_empty() {
                    Filter::None
                } else {
                    Filter::Search(text)
                };
                vec![self.fetch(1)]
            }
            Event::TagSelected(tag) => {
                self.filter = Filter::Tag(tag);
                vec![self.fetch(1)]
            }
            Event::FilterCleared => {
                self.filter = Filter::None;
                vec![self.fetch(1)]
            }
            Event::PageRequested(page) => {
                if !self.pager().contains(page) {
                    debug!("Ignoring page {} outside 1..={}", page, self.total_pages());
                    return Vec::new();
                }
                vec![self.fetch(page)]
            }
            Event::PageLoaded { request_id, page } => {
                if self.settle(request_id) {
                    self.results = page.normalized();
                    self.current_page = self.current_page.clamp(1, self.total_pages());
                }
                Vec::new()
            }
            Event::PageFailed { request_id, message } => {
                if self.settle(request_id) {
                    error!("Failed to load catalog page: {}", message);
                }
                Vec::new()
            }

            Event::DialogOpened(Dialog::Admin) if !self.is_admin() => {
                debug!("Admin dialog requested without admin rights");
                Vec::new()
            }
            Event::DialogOpened(dialog) => {
                if dialog == Dialog::Login {
                    self.auth_mode = AuthMode::Login;
                }
                *self.dialogs.flag(dialog) = true;
                Vec::new()
            }
            Event::DialogClosed(dialog) => {
                *self.dialogs.flag(dialog) = false;
                Vec::new()
            }
            Event::AuthModeToggled => {
                self.auth_mode = match self.auth_mode {
                    AuthMode::Login => AuthMode::Register,
                    AuthMode::Register => AuthMode::Login,
                };
                Vec::new()
            }

            Event::LoginSubmitted { username, password } => {
                if username.is_empty() || password.is_empty() {
                    self.notice = Some(Notice::error("Please fill in all fields"));
                    return Vec::new();
                }
                self.busy = true;
                vec![Effect::Authenticate {
                    mode: self.auth_mode,
                    username,
                    password,
                }]
            }
            Event::LoginSucceeded { user, token } => {
                self.busy = false;
                info!("Logged in as {}", user.username);
                self.current_user = Some(user.clone());
                self.dialogs.login = false;
                self.notice = Some(Notice::success(match self.auth_mode {
                    AuthMode::Login => "Logged in successfully",
                    AuthMode::Register => "Registered successfully",
                }));
                vec![Effect::SaveSession { user, token }]
            }
            Event::LoginRejected(reason) => {
                self.busy = false;
                self.notice = Some(Notice::error(reason));
                Vec::new()
            }
            Event::LoggedOut => {
                if let Some(user) = self.current_user.take() {
                    info!("Logged out {}", user.username);
                }
                self.dialogs.admin = false;
                self.notice = Some(Notice::info("Logged out"));
                vec![Effect::ClearSession]
            }

            Event::EntryActivated(entry) => {
                if self.is_authenticated() {
                    vec![Effect::Navigate(entry.external_url)]
                } else {
                    self.dialogs.subscribe = true;
                    Vec::new()
                }
            }

            Event::AddEntrySubmitted(entry) => {
                if entry.missing_field().is_some() {
                    self.notice = Some(Notice::error("Please fill in all required fields"));
                    return Vec::new();
                }
                self.busy = true;
                vec![Effect::CreateEntry {
                    entry,
                    is_admin: self.is_admin(),
                }]
            }
            Event::EntryAdded { id } => {
                self.busy = false;
                debug!("Entry added with id {:?}", id);
                self.dialogs.admin = false;
                self.notice = Some(Notice::success("Video added successfully"));
                vec![self.refresh()]
            }
            Event::AddEntryRejected(reason) => {
                self.busy = false;
                self.notice = Some(Notice::error(reason));
                Vec::new()
            }
            Event::DeleteRequested(id) => {
                if !self.is_admin() {
                    self.notice = Some(Notice::error("Admin access required"));
                    return Vec::new();
                }
                self.busy = true;
                vec![Effect::DeleteEntry { id, is_admin: true }]
            }
            Event::EntryDeleted(id) => {
                self.busy = false;
                debug!("Entry {} deleted", id);
                self.notice = Some(Notice::success("Video deleted"));
                vec![self.refresh()]
            }
            Event::DeleteRejected(reason) => {
                self.busy = false;
                self.notice = Some(Notice::error(reason));
                Vec::new()
            }

            Event::Notified(notice) => {
                self.notice = Some(notice);
                Vec::new()
            }
            Event::NoticeDismissed => {
                self.notice = None;
                Vec::new()
            }
        }
    }

    /// Issue a listing for `page` under the current filter.
    fn fetch(&mut self, page: u32) -> Effect {
        let request_id = self.next_request;
        self.next_request += 1;
        self.latest_issued = Some(request_id);
        self.in_flight.insert(request_id);
        self.current_page = page;
        Effect::FetchPage {
            request_id,
            query: ListQuery::new(page, self.filter.clone()),
        }
    }

    fn refresh(&mut self) -> Effect {
        self.fetch(self.current_page)
    }

    /// Retire a finished request and say whether its outcome should be applied.
    fn settle(&mut self, request_id: RequestId) -> bool {
        self.in_flight.remove(&request_id);
        match self.ordering {
            ResponseOrdering::LastArrived => true,
            ResponseOrdering::LatestIssued => {
                let current = self.latest_issued == Some(request_id);
                if !current {
                    debug!(
                        "Discarding stale response {} (latest is {:?})",
                        request_id, self.latest_issued
                    );
                }
                current
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::events::NoticeKind;
    use crate::models::{CatalogEntry, NewEntry, Session};

    fn entry(id: i64) -> CatalogEntry {
        CatalogEntry {
            id,
            title: format!("Video {}", id),
            tags: vec!["cats".to_string()],
            external_url: format!("https://videos.example/{}", id),
            image1_url: "1.jpg".to_string(),
            image2_url: "2.jpg".to_string(),
            image3_url: "3.jpg".to_string(),
            created_at: String::new(),
            position: id,
        }
    }

    fn page(number: u32, total_pages: u32, ids: &[i64]) -> CatalogPage {
        CatalogPage {
            entries: ids.iter().copied().map(entry).collect(),
            total: ids.len() as u64,
            page: number,
            per_page: 12,
            total_pages,
        }
    }

    fn user(is_admin: bool) -> User {
        User { id: 1, username: "alice".to_string(), is_admin }
    }

    fn request_id(effect: &Effect) -> RequestId {
        match effect {
            Effect::FetchPage { request_id, .. } => *request_id,
            other => panic!("expected a fetch, got {:?}", other),
        }
    }

    /// Start the view and answer the initial listing with `total_pages` pages.
    fn loaded(total_pages: u32) -> ViewState {
        let mut state = ViewState::default();
        let effects = state.apply(Event::Started);
        let id = request_id(&effects[1]);
        state.apply(Event::PageLoaded { request_id: id, page: page(1, total_pages, &[1, 2]) });
        state
    }

    #[test]
    fn test_start_loads_session_and_first_page() {
        let mut state = ViewState::default();
        let effects = state.apply(Event::Started);
        assert_eq!(effects[0], Effect::LoadSession);
        assert_eq!(
            effects[1],
            Effect::FetchPage { request_id: 1, query: ListQuery::first_page() }
        );
        assert!(state.is_loading());

        state.apply(Event::SessionRestored(Some(Session {
            user: user(false),
            token: "tok".to_string(),
        })));
        assert!(state.is_authenticated());
    }

    #[test]
    fn test_tag_and_search_are_mutually_exclusive() {
        let mut state = loaded(5);

        state.apply(Event::SearchSubmitted("sunset".to_string()));
        assert_eq!(state.filter, Filter::Search("sunset".to_string()));

        let effects = state.apply(Event::TagSelected("cats".to_string()));
        assert_eq!(state.filter, Filter::Tag("cats".to_string()));
        assert_eq!(state.filter.search_text(), None);
        match &effects[0] {
            Effect::FetchPage { query, .. } => {
                assert_eq!(query.filter.tag(), Some("cats"));
                assert_eq!(query.filter.search_text(), None);
            }
            other => panic!("unexpected effect {:?}", other),
        }

        state.apply(Event::SearchSubmitted("dogs".to_string()));
        assert_eq!(state.filter.tag(), None);
        assert_eq!(state.filter.search_text(), Some("dogs"));
    }

    #[test]
    fn test_every_filter_change_resets_to_first_page() {
        for event in [
            Event::SearchSubmitted("sunset".to_string()),
            Event::TagSelected("cats".to_string()),
            Event::FilterCleared,
        ] {
            let mut state = loaded(5);
            let effects = state.apply(Event::PageRequested(4));
            let id = request_id(&effects[0]);
            state.apply(Event::PageLoaded { request_id: id, page: page(4, 5, &[9]) });
            assert_eq!(state.current_page, 4);

            let effects = state.apply(event);
            assert_eq!(state.current_page, 1);
            match &effects[0] {
                Effect::FetchPage { query, .. } => assert_eq!(query.page, 1),
                other => panic!("unexpected effect {:?}", other),
            }
        }
    }

    #[test]
    fn test_page_changes_outside_range_are_ignored() {
        let mut state = loaded(3);
        assert!(state.apply(Event::PageRequested(0)).is_empty());
        assert!(state.apply(Event::PageRequested(4)).is_empty());
        assert_eq!(state.current_page, 1);

        let effects = state.apply(Event::PageRequested(3));
        assert_eq!(
            effects,
            vec![Effect::FetchPage { request_id: 2, query: ListQuery::new(3, Filter::None) }]
        );
    }

    #[test]
    fn test_search_with_no_matches_shows_single_empty_page() {
        let mut state = loaded(4);
        let effects = state.apply(Event::SearchSubmitted("cats".to_string()));
        let id = request_id(&effects[0]);
        state.apply(Event::PageLoaded { request_id: id, page: page(1, 0, &[]) });

        assert!(state.results.entries.is_empty());
        assert_eq!(state.results.total_pages, 1);
        let pager = state.pager();
        assert!(!pager.is_visible());
        assert!(!pager.can_go_previous());
        assert!(!pager.can_go_next());
    }

    #[test]
    fn test_entry_activation_is_gated_on_login() {
        let mut state = loaded(1);
        let effects = state.apply(Event::EntryActivated(entry(3)));
        assert!(effects.is_empty());
        assert!(state.dialogs.subscribe);

        state.apply(Event::DialogClosed(Dialog::Subscribe));
        state.apply(Event::LoginSucceeded { user: user(false), token: "tok".to_string() });
        let effects = state.apply(Event::EntryActivated(entry(3)));
        assert_eq!(effects, vec![Effect::Navigate("https://videos.example/3".to_string())]);
        assert!(!state.dialogs.subscribe);
    }

    #[test]
    fn test_login_success_saves_session_and_closes_dialog() {
        let mut state = loaded(1);
        state.apply(Event::DialogOpened(Dialog::Login));
        let effects = state.apply(Event::LoginSubmitted {
            username: "alice".to_string(),
            password: "secret".to_string(),
        });
        assert!(matches!(effects[0], Effect::Authenticate { mode: AuthMode::Login, .. }));
        assert!(state.is_busy());

        let effects = state.apply(Event::LoginSucceeded { user: user(false), token: "tok".to_string() });
        assert_eq!(effects, vec![Effect::SaveSession { user: user(false), token: "tok".to_string() }]);
        assert!(!state.dialogs.login);
        assert!(!state.is_busy());

        let effects = state.apply(Event::LoggedOut);
        assert_eq!(effects, vec![Effect::ClearSession]);
        assert!(state.current_user.is_none());
        assert_eq!(state.notice, Some(Notice::info("Logged out")));
    }

    #[test]
    fn test_password_of_spaces_is_submitted_as_typed() {
        let mut state = loaded(1);
        let effects = state.apply(Event::LoginSubmitted {
            username: "alice".to_string(),
            password: "   ".to_string(),
        });
        assert_eq!(
            effects,
            vec![Effect::Authenticate {
                mode: AuthMode::Login,
                username: "alice".to_string(),
                password: "   ".to_string(),
            }]
        );

        let effects = state.apply(Event::LoginSubmitted {
            username: "alice".to_string(),
            password: String::new(),
        });
        assert!(effects.is_empty());
        assert_eq!(state.notice, Some(Notice::error("Please fill in all fields")));
    }

    #[test]
    fn test_login_dialog_reopens_in_login_mode() {
        let mut state = loaded(1);
        state.apply(Event::DialogOpened(Dialog::Login));
        state.apply(Event::AuthModeToggled);
        assert_eq!(state.auth_mode, AuthMode::Register);
        state.apply(Event::LoginSucceeded { user: user(false), token: "tok".to_string() });
        state.apply(Event::LoggedOut);

        state.apply(Event::DialogOpened(Dialog::Login));
        assert_eq!(state.auth_mode, AuthMode::Login);
    }

    #[test]
    fn test_search_text_is_sent_as_typed() {
        let mut state = loaded(1);
        let effects = state.apply(Event::SearchSubmitted(" red fox ".to_string()));
        assert_eq!(state.filter, Filter::Search(" red fox ".to_string()));
        assert_eq!(
            effects,
            vec![Effect::FetchPage { request_id: 2, query: ListQuery::new(1, Filter::Search(" red fox ".to_string())) }]
        );

        state.apply(Event::SearchSubmitted("   ".to_string()));
        assert_eq!(state.filter, Filter::None);
    }

    #[test]
    fn test_rejected_login_keeps_dialog_open_with_reason() {
        let mut state = loaded(1);
        state.apply(Event::DialogOpened(Dialog::Login));
        state.apply(Event::LoginRejected("Invalid credentials".to_string()));
        assert!(state.dialogs.login);
        assert_eq!(state.notice, Some(Notice::error("Invalid credentials")));
        assert!(state.current_user.is_none());
    }

    #[test]
    fn test_add_entry_missing_image_issues_no_effects() {
        let mut state = loaded(1);
        state.apply(Event::LoginSucceeded { user: user(true), token: "tok".to_string() });
        state.apply(Event::DialogOpened(Dialog::Admin));

        let effects = state.apply(Event::AddEntrySubmitted(NewEntry {
            title: "New".to_string(),
            tags: vec![],
            external_url: "https://videos.example/new".to_string(),
            image1_url: "1.jpg".to_string(),
            image2_url: "2.jpg".to_string(),
            image3_url: String::new(),
        }));

        assert!(effects.is_empty());
        assert!(state.dialogs.admin);
        assert_eq!(state.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Error));
    }

    #[test]
    fn test_entry_added_closes_dialog_and_refreshes_current_view() {
        let mut state = loaded(3);
        state.apply(Event::LoginSucceeded { user: user(true), token: "tok".to_string() });
        state.apply(Event::TagSelected("cats".to_string()));
        state.apply(Event::DialogOpened(Dialog::Admin));
        assert!(state.dialogs.admin);

        let effects = state.apply(Event::EntryAdded { id: Some(10) });
        assert!(!state.dialogs.admin);
        match &effects[0] {
            Effect::FetchPage { query, .. } => {
                assert_eq!(query.page, 1);
                assert_eq!(query.filter, Filter::Tag("cats".to_string()));
            }
            other => panic!("unexpected effect {:?}", other),
        }
    }

    #[test]
    fn test_admin_dialog_requires_admin() {
        let mut state = loaded(1);
        state.apply(Event::DialogOpened(Dialog::Admin));
        assert!(!state.dialogs.admin);

        state.apply(Event::LoginSucceeded { user: user(false), token: "tok".to_string() });
        state.apply(Event::DialogOpened(Dialog::Admin));
        assert!(!state.dialogs.admin);
        assert!(state.apply(Event::DeleteRequested(1)).is_empty());
    }

    #[test]
    fn test_failed_listing_keeps_previous_results() {
        let mut state = loaded(2);
        let before = state.results.clone();
        let effects = state.apply(Event::PageRequested(2));
        let id = request_id(&effects[0]);
        state.apply(Event::PageFailed { request_id: id, message: "boom".to_string() });
        assert_eq!(state.results, before);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_late_response_wins_when_ordered_by_arrival() {
        let mut state = ViewState::new(ResponseOrdering::LastArrived);
        let start = state.apply(Event::Started);
        let first = request_id(&start[1]);
        state.apply(Event::PageLoaded { request_id: first, page: page(1, 2, &[1]) });

        let page_one = request_id(&state.apply(Event::PageRequested(1))[0]);
        let page_two = request_id(&state.apply(Event::PageRequested(2))[0]);

        state.apply(Event::PageLoaded { request_id: page_two, page: page(2, 2, &[2]) });
        state.apply(Event::PageLoaded { request_id: page_one, page: page(1, 2, &[1]) });

        // The slower page-1 answer clobbers page 2 even though page 2 was asked for last.
        assert_eq!(state.results.entries[0].id, 1);
        assert_eq!(state.current_page, 2);
    }

    #[test]
    fn test_late_response_is_discarded_when_ordered_by_issue() {
        let mut state = ViewState::new(ResponseOrdering::LatestIssued);
        let start = state.apply(Event::Started);
        let first = request_id(&start[1]);
        state.apply(Event::PageLoaded { request_id: first, page: page(1, 2, &[1]) });

        let page_one = request_id(&state.apply(Event::PageRequested(1))[0]);
        let page_two = request_id(&state.apply(Event::PageRequested(2))[0]);

        state.apply(Event::PageLoaded { request_id: page_two, page: page(2, 2, &[2]) });
        state.apply(Event::PageLoaded { request_id: page_one, page: page(1, 2, &[1]) });

        assert_eq!(state.results.entries[0].id, 2);
        assert_eq!(state.current_page, 2);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_response_ordering_parses_from_text() {
        assert_eq!("last-arrived".parse::<ResponseOrdering>().unwrap(), ResponseOrdering::LastArrived);
        assert_eq!("LATEST-ISSUED".parse::<ResponseOrdering>().unwrap(), ResponseOrdering::LatestIssued);
        assert!("random".parse::<ResponseOrdering>().is_err());
    }
}
