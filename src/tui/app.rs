//! Main TUI application state and loop

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self as term, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

use super::components::StatusDisplay;
use super::events::EffectRunner;
use super::handlers::CommonKeyHandler;
use super::screens::{help, AdminDialog, CatalogScreen, LoginDialog, SubscribeDialog};
use super::traits::{RenderContext, Screen, ScreenAction};
use crate::controller::{Controller, Dialog, Event, ResponseOrdering, Services};
use crate::i18n::Locale;

const TICK_RATE: Duration = Duration::from_millis(100);
const NOTICE_TIMEOUT: Duration = Duration::from_secs(4);

pub struct App {
    pub controller: Controller,
    pub locale: Locale,

    pub catalog: CatalogScreen,
    pub login: LoginDialog,
    pub subscribe: SubscribeDialog,
    pub admin: AdminDialog,
    pub status: StatusDisplay,

    pub should_quit: bool,
    pub show_help_popup: bool,

    runner: EffectRunner,
    completions: UnboundedReceiver<Event>,
}

impl App {
    pub fn new(services: Services, ordering: ResponseOrdering, locale: Locale) -> Self {
        let (runner, completions) = EffectRunner::channel(services.clone());
        Self {
            controller: Controller::new(services, ordering),
            locale,

            catalog: CatalogScreen::new(),
            login: LoginDialog::new(),
            subscribe: SubscribeDialog,
            admin: AdminDialog::new(),
            status: StatusDisplay::new().with_auto_clear(NOTICE_TIMEOUT),

            should_quit: false,
            show_help_popup: false,

            runner,
            completions,
        }
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.apply(Event::Started);

        loop {
            terminal.draw(|f| self.draw(f))?;

            while let Ok(event) = self.completions.try_recv() {
                self.apply(event);
            }

            if term::poll(TICK_RATE)? {
                if let term::Event::Key(key) = term::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }

            self.on_tick(Instant::now());

            if self.should_quit {
                info!("Quit requested");
                break;
            }
        }

        Ok(())
    }

    /// Feed an event to the controller, schedule its effects and refresh widgets.
    pub fn apply(&mut self, event: Event) {
        let effects = self.controller.handle(event.clone());
        self.after(&event);
        self.runner.spawn(effects);
    }

    fn after(&mut self, event: &Event) {
        let state = &self.controller.state;
        match event {
            Event::PageLoaded { .. } if self.catalog.table.entries != state.results.entries => {
                self.catalog.show_page(state);
            }
            Event::LoginSucceeded { .. } => self.login.clear(),
            Event::EntryAdded { .. } => self.admin.clear(),
            Event::DialogOpened(Dialog::Login) if state.dialogs.login => self.login.on_enter(),
            _ => {}
        }
        self.status.sync(state.notice.as_ref());
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.catalog.carousel.tick(now);
        if self.status.should_auto_clear() {
            self.apply(Event::NoticeDismissed);
        }
    }

    /// Handle keyboard input events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.show_help_popup {
            match key.code {
                KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') => self.show_help_popup = false,
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        let state = &self.controller.state;
        let action = match state.dialogs.topmost() {
            Some(Dialog::Login) => self.login.handle_key_event(key, state),
            Some(Dialog::Subscribe) => self.subscribe.handle_key_event(key, state),
            Some(Dialog::Admin) => self.admin.handle_key_event(key, state),
            None if self.catalog.is_editing() => self.catalog.handle_key_event(key, state),
            None => match CommonKeyHandler::handle_global_keys(key) {
                Some(action) => action,
                None => self.catalog.handle_key_event(key, state),
            },
        };
        self.perform(action);
    }

    fn perform(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::Dispatch(event) => {
                debug!("Dispatching {:?}", event);
                self.apply(event);
            }
            ScreenAction::Quit => self.should_quit = true,
            ScreenAction::ToggleHelp => self.show_help_popup = !self.show_help_popup,
            ScreenAction::CycleLocale => {
                self.locale = self.locale.cycle();
                info!("Language switched to {}", self.locale.code());
            }
            ScreenAction::Handled | ScreenAction::None => {}
        }
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        let ctx = RenderContext {
            state: &self.controller.state,
            locale: self.locale,
        };

        self.catalog.draw(f, chunks[0], &ctx);
        match ctx.state.dialogs.topmost() {
            Some(Dialog::Login) => self.login.draw(f, size, &ctx),
            Some(Dialog::Subscribe) => self.subscribe.draw(f, size, &ctx),
            Some(Dialog::Admin) => self.admin.draw(f, size, &ctx),
            None => {}
        }

        self.status
            .render(f, chunks[1], "?: Help | L: Language | q: Quit");

        if self.show_help_popup {
            help::draw_help_popup(f, size, ctx.state);
        }
    }
}
