//! Admin dialog for adding a catalog entry

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::controller::{Dialog, Event, Notice, ViewState};
use crate::i18n::{t, Label};
use crate::models::{parse_tags, NewEntry};
use crate::tui::{
    components::{Form, FormField, FormFieldType},
    handlers::CommonKeyHandler,
    traits::{FormHandler, RenderContext, Screen, ScreenAction},
    ui::{centered_rect, Styles},
};

const LABELS: [Label; 6] = [
    Label::VideoTitle,
    Label::Tags,
    Label::ExternalUrl,
    Label::Image1,
    Label::Image2,
    Label::Image3,
];

pub struct AdminDialog {
    pub form: Form,
}

impl Default for AdminDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminDialog {
    pub fn new() -> Self {
        Self {
            form: Form::new(vec![
                FormField::new("Title", FormFieldType::Text).required(),
                FormField::new("Tags", FormFieldType::Text).with_placeholder("tag1, tag2"),
                FormField::new("External URL", FormFieldType::Url).required(),
                FormField::new("Image 1 URL", FormFieldType::Url).required(),
                FormField::new("Image 2 URL", FormFieldType::Url).required(),
                FormField::new("Image 3 URL", FormFieldType::Url).required(),
            ]),
        }
    }

    pub fn clear(&mut self) {
        self.form.clear();
    }

    pub fn entry(&self) -> NewEntry {
        NewEntry {
            title: self.form.value(0).trim().to_string(),
            tags: parse_tags(self.form.value(1)),
            external_url: self.form.value(2).trim().to_string(),
            image1_url: self.form.value(3).trim().to_string(),
            image2_url: self.form.value(4).trim().to_string(),
            image3_url: self.form.value(5).trim().to_string(),
        }
    }
}

impl Screen for AdminDialog {
    fn draw(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let locale = ctx.locale;
        let popup = centered_rect(70, 85, area);
        f.render_widget(Clear, popup);

        let block = Block::default()
            .title(t(locale, Label::AdminPanel))
            .borders(Borders::ALL)
            .border_style(Styles::active_border());
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        let mut constraints = vec![Constraint::Length(3); LABELS.len()];
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(0));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, label) in LABELS.iter().enumerate() {
            self.form.fields[i].set_label(t(locale, *label));
            self.form.fields[i].render(f, rows[i]);
        }

        let footer = if ctx.state.is_busy() {
            Line::from(Span::styled("...", Styles::warning()))
        } else {
            Line::from(vec![
                Span::styled(format!("Enter: {}", t(locale, Label::Save)), Styles::success()),
                Span::raw("   "),
                Span::styled(format!("Esc: {}", t(locale, Label::Cancel)), Styles::inactive()),
            ])
        };
        f.render_widget(Paragraph::new(footer), rows[LABELS.len()]);
    }

    fn handle_key_event(&mut self, key: KeyEvent, state: &ViewState) -> ScreenAction {
        match key.code {
            KeyCode::Esc => ScreenAction::Dispatch(Event::DialogClosed(Dialog::Admin)),
            KeyCode::Enter if state.is_busy() => ScreenAction::Handled,
            KeyCode::Enter => {
                if !self.form.validate_all() {
                    let message = self.form.validate().err().unwrap_or_default();
                    return ScreenAction::Dispatch(Event::Notified(Notice::error(message)));
                }
                ScreenAction::Dispatch(Event::AddEntrySubmitted(self.entry()))
            }
            _ => CommonKeyHandler::handle_form_keys(&mut self.form, key).unwrap_or(ScreenAction::Handled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ResponseOrdering;
    use crossterm::event::KeyModifiers;

    fn fill(dialog: &mut AdminDialog, values: [&str; 6]) {
        for (i, value) in values.iter().enumerate() {
            dialog.form.fields[i].input.set_value(value);
        }
    }

    #[test]
    fn test_submit_builds_entry_with_parsed_tags() {
        let state = ViewState::new(ResponseOrdering::LatestIssued);
        let mut dialog = AdminDialog::new();
        fill(
            &mut dialog,
            [
                " Cat video ",
                "cats, , funny ",
                "https://videos.example/cat",
                "https://img.example/1.jpg",
                "https://img.example/2.jpg",
                "https://img.example/3.jpg",
            ],
        );

        let action = dialog.handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), &state);
        let ScreenAction::Dispatch(Event::AddEntrySubmitted(entry)) = action else {
            panic!("expected submission, got {:?}", action);
        };
        assert_eq!(entry.title, "Cat video");
        assert_eq!(entry.tags, vec!["cats".to_string(), "funny".to_string()]);
    }

    #[test]
    fn test_missing_image_is_reported_locally() {
        let state = ViewState::new(ResponseOrdering::LatestIssued);
        let mut dialog = AdminDialog::new();
        fill(
            &mut dialog,
            [
                "Cat video",
                "",
                "https://videos.example/cat",
                "https://img.example/1.jpg",
                "https://img.example/2.jpg",
                "",
            ],
        );

        let action = dialog.handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), &state);
        assert_eq!(
            action,
            ScreenAction::Dispatch(Event::Notified(Notice::error("Image 3 URL: Required")))
        );
    }
}
