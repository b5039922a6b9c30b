//! Subscription prompt shown when a guest opens an entry

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::controller::{Dialog, Event, ViewState};
use crate::i18n::{t, Label};
use crate::tui::{
    traits::{RenderContext, Screen, ScreenAction},
    ui::{centered_rect, Styles},
};

#[derive(Default)]
pub struct SubscribeDialog;

impl Screen for SubscribeDialog {
    fn draw(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let locale = ctx.locale;
        let popup = centered_rect(50, 30, area);
        f.render_widget(Clear, popup);

        let lines = vec![
            Line::from(""),
            Line::from(t(locale, Label::SubscribeMessage)),
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("[Enter] {}", t(locale, Label::Subscribe)), Styles::success()),
                Span::raw("   "),
                Span::styled(format!("[Esc] {}", t(locale, Label::Back)), Styles::inactive()),
            ]),
        ];

        let block = Block::default()
            .title(t(locale, Label::SubscribeRequired))
            .borders(Borders::ALL)
            .border_style(Styles::warning());

        f.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            popup,
        );
    }

    /// Both choices only dismiss the prompt.
    fn handle_key_event(&mut self, key: KeyEvent, _state: &ViewState) -> ScreenAction {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('b') => {
                ScreenAction::Dispatch(Event::DialogClosed(Dialog::Subscribe))
            }
            _ => ScreenAction::Handled,
        }
    }
}
