//! Keyboard reference popup

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::controller::ViewState;
use crate::tui::ui::{centered_rect, Styles};

fn section(title: &'static str, keys: &[(&'static str, &'static str)]) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(title, Styles::info()))];
    lines.extend(keys.iter().map(|(key, action)| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", key), Styles::title()),
            Span::raw(*action),
        ])
    }));
    lines.push(Line::from(""));
    lines
}

/// Shortcut lines; account and admin keys only appear when they apply.
pub fn help_lines(state: &ViewState) -> Vec<Line<'static>> {
    let mut lines = section(
        "Browsing",
        &[
            ("↑/↓ j/k", "Select video"),
            ("Home/End", "First/last video on page"),
            ("Enter", "Open video"),
            ("1-9", "Filter by the selected video's tag"),
            ("x", "Clear tag filter"),
            ("←/→ PgUp/Dn", "Previous/next page"),
            ("[ / ]", "First/last page"),
            ("/ or Tab", "Search (Enter submits, Esc cancels)"),
        ],
    );

    lines.extend(if state.is_authenticated() {
        section("Account", &[("o", "Logout")])
    } else {
        section("Account", &[("l", "Login (Ctrl+T switches to register)"), ("s", "Subscribe")])
    });

    if state.is_admin() {
        lines.extend(section("Admin", &[("a", "Add video"), ("D", "Delete selected video")]));
    }

    lines.extend(section(
        "Global",
        &[("L", "Switch language"), ("? / F1", "Toggle this help"), ("q / Ctrl+C", "Quit")],
    ));
    lines
}

pub fn draw_help_popup(f: &mut Frame, area: Rect, state: &ViewState) {
    let popup_area = centered_rect(60, 80, area);
    f.render_widget(Clear, popup_area);

    let popup = Paragraph::new(help_lines(state)).block(
        Block::default()
            .title("Help - Keyboard Shortcuts")
            .borders(Borders::ALL)
            .border_style(Styles::active_border()),
    );
    f.render_widget(popup, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ResponseOrdering;
    use crate::models::User;

    fn mentions(lines: &[Line], needle: &str) -> bool {
        lines
            .iter()
            .any(|l| l.spans.iter().any(|s| s.content.contains(needle)))
    }

    #[test]
    fn test_admin_keys_only_for_admins() {
        let mut state = ViewState::new(ResponseOrdering::LatestIssued);
        assert!(!mentions(&help_lines(&state), "Delete selected video"));
        assert!(mentions(&help_lines(&state), "Subscribe"));

        state.current_user = Some(User {
            id: 1,
            username: "root".to_string(),
            is_admin: true,
        });
        let lines = help_lines(&state);
        assert!(mentions(&lines, "Delete selected video"));
        assert!(!mentions(&lines, "Subscribe"));
    }
}
