//! Runs effects produced by the view state machine

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::events::{AuthMode, Effect, Event, Notice};
use super::state::{ResponseOrdering, ViewState};
use crate::api::{AuthApi, CatalogApi};
use crate::errors::{ClientError, Result};
use crate::models::AuthOutcome;
use crate::session::SessionStore;

/// Opens an entry's external link outside the application.
pub trait Navigator: Send + Sync {
    fn open(&self, url: &str) -> Result<()>;
}

/// Hands URLs to the platform's default opener.
pub struct SystemNavigator;

impl Navigator for SystemNavigator {
    fn open(&self, url: &str) -> Result<()> {
        let mut command = if cfg!(target_os = "macos") {
            std::process::Command::new("open")
        } else if cfg!(target_os = "windows") {
            let mut c = std::process::Command::new("cmd");
            c.args(["/C", "start", ""]);
            c
        } else {
            std::process::Command::new("xdg-open")
        };
        command
            .arg(url)
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()?;
        Ok(())
    }
}

/// Collaborators an effect may touch. Cheap to clone into spawned tasks.
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<dyn AuthApi>,
    pub catalog: Arc<dyn CatalogApi>,
    pub session: Arc<SessionStore>,
    pub navigator: Arc<dyn Navigator>,
}

impl Services {
    /// Run one effect and translate its outcome into the event that reports it.
    pub async fn perform(&self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::LoadSession => Some(Event::SessionRestored(self.session.load().await)),
            Effect::SaveSession { user, token } => {
                self.session
                    .save(&user, &token)
                    .await
                    .err()
                    .map(|e| storage_failure("save", e))
            }
            Effect::ClearSession => self
                .session
                .clear()
                .await
                .err()
                .map(|e| storage_failure("clear", e)),
            Effect::FetchPage { request_id, query } => {
                debug!("Fetching page {} (request {})", query.page, request_id);
                Some(match self.catalog.list(&query).await {
                    Ok(page) => Event::PageLoaded { request_id, page },
                    Err(e) => Event::PageFailed {
                        request_id,
                        message: e.to_string(),
                    },
                })
            }
            Effect::Authenticate { mode, username, password } => {
                let outcome = match mode {
                    AuthMode::Login => self.auth.login(&username, &password).await,
                    AuthMode::Register => self.auth.register(&username, &password).await,
                };
                Some(match outcome {
                    Ok(AuthOutcome::Success { user, token }) => Event::LoginSucceeded { user, token },
                    Ok(AuthOutcome::Failure(reason)) => Event::LoginRejected(reason),
                    Err(e) => {
                        warn!("Authentication request failed: {}", e);
                        Event::LoginRejected(e.notice())
                    }
                })
            }
            Effect::CreateEntry { entry, is_admin } => {
                Some(match self.catalog.create(&entry, is_admin).await {
                    Ok(result) if result.success => Event::EntryAdded { id: result.id },
                    Ok(result) => Event::AddEntryRejected(
                        result.error.unwrap_or_else(|| "Failed to add video".to_string()),
                    ),
                    Err(e) => Event::AddEntryRejected(e.notice()),
                })
            }
            Effect::DeleteEntry { id, is_admin } => {
                Some(match self.catalog.delete(id, is_admin).await {
                    Ok(result) if result.success => Event::EntryDeleted(id),
                    Ok(result) => Event::DeleteRejected(
                        result.error.unwrap_or_else(|| "Failed to delete video".to_string()),
                    ),
                    Err(e) => Event::DeleteRejected(e.notice()),
                })
            }
            Effect::Navigate(url) => {
                info!("Opening {}", url);
                self.navigator
                    .open(&url)
                    .err()
                    .map(|e| Event::Notified(Notice::error(format!("Could not open link: {}", e))))
            }
        }
    }
}

fn storage_failure(action: &str, e: ClientError) -> Event {
    warn!("Failed to {} session: {}", action, e);
    Event::Notified(Notice::error(format!("Could not {} session: {}", action, e)))
}

/// Owns the view state and drives effects to completion one at a time.
pub struct Controller {
    pub state: ViewState,
    services: Services,
}

impl Controller {
    pub fn new(services: Services, ordering: ResponseOrdering) -> Self {
        Self {
            state: ViewState::new(ordering),
            services,
        }
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Apply an event without running its effects; the caller schedules them.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        self.state.apply(event)
    }

    /// Apply an event and await every effect it causes, including follow-ups.
    pub async fn dispatch(&mut self, event: Event) {
        let mut pending = VecDeque::from([event]);
        while let Some(event) = pending.pop_front() {
            for effect in self.state.apply(event) {
                if let Some(next) = self.services.perform(effect).await {
                    pending.push_back(next);
                }
            }
        }
    }
}
