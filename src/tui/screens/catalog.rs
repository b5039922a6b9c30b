//! Main catalog screen: header, search, filter bar, entry list, preview, pager

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::controller::{Dialog, Event, ViewState};
use crate::i18n::{t, Label};
use crate::models::Filter;
use crate::tui::{
    components::{EntryTable, EntryTableConfig, ImageCarousel, PagerBar},
    handlers::CommonKeyHandler,
    traits::{RenderContext, Screen, ScreenAction},
    ui::{InputField, Styles},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Browse,
    Search,
}

pub struct CatalogScreen {
    pub focus: Focus,
    pub search_input: InputField,
    pub table: EntryTable,
    pub carousel: ImageCarousel,
}

impl Default for CatalogScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogScreen {
    pub fn new() -> Self {
        Self {
            focus: Focus::Browse,
            search_input: InputField::new("Search"),
            table: EntryTable::new(EntryTableConfig::default()),
            carousel: ImageCarousel::new(),
        }
    }

    /// True while keystrokes go to the search box rather than shortcuts.
    pub fn is_editing(&self) -> bool {
        self.focus == Focus::Search
    }

    /// Replace the list with a freshly loaded page.
    pub fn show_page(&mut self, state: &ViewState) {
        self.table.set_entries(state.results.entries.clone());
        self.sync_carousel();
    }

    pub fn sync_carousel(&mut self) {
        self.carousel.select(self.table.get_selected_entry().map(|e| e.id));
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.search_input.set_focus(focus == Focus::Search);
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Enter => {
                self.set_focus(Focus::Browse);
                ScreenAction::Dispatch(Event::SearchSubmitted(self.search_input.value.clone()))
            }
            KeyCode::Esc | KeyCode::Tab => {
                self.set_focus(Focus::Browse);
                ScreenAction::Handled
            }
            KeyCode::Char(c) => {
                self.search_input.insert_char(c);
                ScreenAction::Handled
            }
            KeyCode::Backspace => {
                self.search_input.delete_char();
                ScreenAction::Handled
            }
            KeyCode::Delete => {
                self.search_input.delete_char_forward();
                ScreenAction::Handled
            }
            KeyCode::Left => {
                self.search_input.move_cursor_left();
                ScreenAction::Handled
            }
            KeyCode::Right => {
                self.search_input.move_cursor_right();
                ScreenAction::Handled
            }
            KeyCode::Home => {
                self.search_input.move_cursor_to_start();
                ScreenAction::Handled
            }
            KeyCode::End => {
                self.search_input.move_cursor_to_end();
                ScreenAction::Handled
            }
            _ => ScreenAction::None,
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent, state: &ViewState) -> ScreenAction {
        if let Some(action) = CommonKeyHandler::handle_navigation_keys(&mut self.table, key) {
            self.sync_carousel();
            return action;
        }
        if let Some(action) = CommonKeyHandler::handle_pagination_keys(&state.pager(), key) {
            return action;
        }

        match key.code {
            KeyCode::Char('/') | KeyCode::Tab => {
                self.set_focus(Focus::Search);
                ScreenAction::Handled
            }
            KeyCode::Enter => match self.table.get_selected_entry() {
                Some(entry) => ScreenAction::Dispatch(Event::EntryActivated(entry.clone())),
                None => ScreenAction::Handled,
            },
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                match self.table.get_selected_entry().and_then(|e| e.tags.get(index)) {
                    Some(tag) => ScreenAction::Dispatch(Event::TagSelected(tag.clone())),
                    None => ScreenAction::Handled,
                }
            }
            KeyCode::Char('x') if state.filter.tag().is_some() => {
                ScreenAction::Dispatch(Event::FilterCleared)
            }
            KeyCode::Char('l') if !state.is_authenticated() => {
                ScreenAction::Dispatch(Event::DialogOpened(Dialog::Login))
            }
            KeyCode::Char('s') if !state.is_authenticated() => {
                ScreenAction::Dispatch(Event::DialogOpened(Dialog::Subscribe))
            }
            KeyCode::Char('o') if state.is_authenticated() => ScreenAction::Dispatch(Event::LoggedOut),
            KeyCode::Char('a') if state.is_admin() => {
                ScreenAction::Dispatch(Event::DialogOpened(Dialog::Admin))
            }
            KeyCode::Char('D') if state.is_admin() => match self.table.get_selected_entry() {
                Some(entry) => ScreenAction::Dispatch(Event::DeleteRequested(entry.id)),
                None => ScreenAction::Handled,
            },
            _ => ScreenAction::None,
        }
    }

    fn draw_header(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let locale = ctx.locale;
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(12),
                Constraint::Min(20),
                Constraint::Length(40),
            ])
            .split(area);

        f.render_widget(
            Paragraph::new(Line::from(Span::styled(t(locale, Label::SiteName), Styles::title()))),
            Rect { y: chunks[0].y + 1, height: 1, ..chunks[0] },
        );

        let mut search = self.search_input.clone();
        search.placeholder = t(locale, Label::Search).to_string();
        search.render_with_title(f, chunks[1], "/");

        let mut account = vec![
            Span::styled(format!("[{}] ", locale.native_name()), Styles::info()),
        ];
        match &ctx.state.current_user {
            Some(user) => {
                account.push(Span::raw(format!("{} ", user.username)));
                account.push(Span::styled(format!("o:{}", t(locale, Label::Logout)), Styles::inactive()));
            }
            None => {
                account.push(Span::styled(format!("l:{} ", t(locale, Label::Login)), Styles::inactive()));
                account.push(Span::styled(format!("s:{}", t(locale, Label::Subscribe)), Styles::warning()));
            }
        }
        f.render_widget(
            Paragraph::new(Line::from(account)),
            Rect { y: chunks[2].y + 1, height: 1, ..chunks[2] },
        );
    }

    fn draw_filter_bar(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let locale = ctx.locale;
        let mut spans = Vec::new();
        match &ctx.state.filter {
            Filter::Tag(tag) => {
                spans.push(Span::raw(format!("{}: ", t(locale, Label::Tags))));
                spans.push(Span::styled(tag.clone(), Styles::title()));
                spans.push(Span::styled("  [x]", Styles::inactive()));
            }
            Filter::Search(text) => {
                spans.push(Span::styled(format!("\"{}\"", text), Styles::info()));
            }
            Filter::None => {}
        }
        if ctx.state.is_loading() {
            spans.push(Span::styled("  ⟳", Styles::warning()));
        }
        if ctx.state.is_admin() {
            spans.push(Span::styled(format!("   a:+ {}", t(locale, Label::AddVideo)), Styles::success()));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl Screen for CatalogScreen {
    fn draw(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(area);

        self.draw_header(f, chunks[0], ctx);
        self.draw_filter_bar(f, chunks[1], ctx);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(chunks[2]);

        self.table.config.empty_text = t(ctx.locale, Label::NoResults).to_string();
        self.table.render(f, body[0], self.focus == Focus::Browse);
        self.carousel.render(f, body[1], self.table.get_selected_entry());

        let pager = ctx.state.pager();
        PagerBar::new(&pager, t(ctx.locale, Label::Previous), t(ctx.locale, Label::Next)).render(f, chunks[3]);
    }

    fn handle_key_event(&mut self, key: KeyEvent, state: &ViewState) -> ScreenAction {
        match self.focus {
            Focus::Search => self.handle_search_key(key),
            Focus::Browse => self.handle_browse_key(key, state),
        }
    }
}
