//! Login dialog, switchable between signing in and registering

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::controller::{AuthMode, Dialog, Event, ViewState};
use crate::i18n::{t, Label};
use crate::tui::{
    components::{Form, FormField, FormFieldType},
    handlers::CommonKeyHandler,
    traits::{RenderContext, Screen, ScreenAction},
    ui::{centered_rect, Styles},
};

const USERNAME: usize = 0;
const PASSWORD: usize = 1;

pub struct LoginDialog {
    pub form: Form,
}

impl Default for LoginDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginDialog {
    pub fn new() -> Self {
        Self {
            form: Form::new(vec![
                FormField::new("Username", FormFieldType::Text).required(),
                FormField::new("Password", FormFieldType::Password).required(),
            ]),
        }
    }

    pub fn clear(&mut self) {
        self.form.clear();
    }
}

impl Screen for LoginDialog {
    fn draw(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let locale = ctx.locale;
        let popup = centered_rect(50, 50, area);
        f.render_widget(Clear, popup);

        let (title, submit, toggle) = match ctx.state.auth_mode {
            AuthMode::Login => (Label::LoginTitle, Label::LoginButton, Label::RegisterButton),
            AuthMode::Register => (Label::RegisterTitle, Label::RegisterButton, Label::Back),
        };

        let block = Block::default()
            .title(t(locale, title))
            .borders(Borders::ALL)
            .border_style(Styles::active_border());
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        self.form.fields[USERNAME].set_label(t(locale, Label::Username));
        self.form.fields[PASSWORD].set_label(t(locale, Label::Password));
        self.form.fields[USERNAME].render(f, rows[0]);
        self.form.fields[PASSWORD].render(f, rows[1]);

        let footer = if ctx.state.is_busy() {
            Line::from(Span::styled("...", Styles::warning()))
        } else {
            Line::from(vec![
                Span::styled(format!("Enter: {}", t(locale, submit)), Styles::success()),
                Span::raw("   "),
                Span::styled(format!("Ctrl+T: {}", t(locale, toggle)), Styles::info()),
                Span::raw("   "),
                Span::styled(format!("Esc: {}", t(locale, Label::Cancel)), Styles::inactive()),
            ])
        };
        f.render_widget(Paragraph::new(footer), rows[2]);
    }

    fn handle_key_event(&mut self, key: KeyEvent, state: &ViewState) -> ScreenAction {
        match key.code {
            KeyCode::Esc => return ScreenAction::Dispatch(Event::DialogClosed(Dialog::Login)),
            KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return ScreenAction::Dispatch(Event::AuthModeToggled)
            }
            KeyCode::Enter if state.is_busy() => return ScreenAction::Handled,
            KeyCode::Enter => {
                return ScreenAction::Dispatch(Event::LoginSubmitted {
                    username: self.form.value(USERNAME).to_string(),
                    password: self.form.value(PASSWORD).to_string(),
                })
            }
            _ => {}
        }
        CommonKeyHandler::handle_form_keys(&mut self.form, key).unwrap_or(ScreenAction::Handled)
    }

    fn on_enter(&mut self) {
        self.form.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ResponseOrdering;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_enter_submits_both_fields() {
        let state = ViewState::new(ResponseOrdering::LatestIssued);
        let mut dialog = LoginDialog::new();
        for c in "alice".chars() {
            dialog.handle_key_event(key(KeyCode::Char(c)), &state);
        }
        dialog.handle_key_event(key(KeyCode::Tab), &state);
        for c in "pw".chars() {
            dialog.handle_key_event(key(KeyCode::Char(c)), &state);
        }
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Enter), &state),
            ScreenAction::Dispatch(Event::LoginSubmitted {
                username: "alice".to_string(),
                password: "pw".to_string(),
            })
        );
    }

    #[test]
    fn test_typing_q_does_not_quit() {
        let state = ViewState::new(ResponseOrdering::LatestIssued);
        let mut dialog = LoginDialog::new();
        assert_eq!(dialog.handle_key_event(key(KeyCode::Char('q')), &state), ScreenAction::Handled);
        assert_eq!(dialog.form.value(USERNAME), "q");
        assert_eq!(
            dialog.handle_key_event(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL), &state),
            ScreenAction::Dispatch(Event::AuthModeToggled)
        );
    }
}
