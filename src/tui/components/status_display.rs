//! Status bar showing the current notice and key hints

use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::controller::{Notice, NoticeKind};
use crate::tui::ui::Styles;

/// Status display component
///
/// Mirrors the controller's notice and remembers when it first appeared so
/// the app can dismiss it after a timeout.
pub struct StatusDisplay {
    current: Option<(Notice, Instant)>,
    pub auto_clear_timeout: Option<Duration>,
}

impl Default for StatusDisplay {
    fn default() -> Self {
        Self {
            current: None,
            auto_clear_timeout: None,
        }
    }
}

impl StatusDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auto_clear(mut self, timeout: Duration) -> Self {
        self.auto_clear_timeout = Some(timeout);
        self
    }

    /// Track the controller's notice; the timer restarts only when it changes.
    pub fn sync(&mut self, notice: Option<&Notice>) {
        match (notice, &self.current) {
            (None, _) => self.current = None,
            (Some(n), Some((shown, _))) if n == shown => {}
            (Some(n), _) => self.current = Some((n.clone(), Instant::now())),
        }
    }

    pub fn get_current(&self) -> Option<&Notice> {
        self.current.as_ref().map(|(n, _)| n)
    }

    /// Check if we should auto-clear the current message
    pub fn should_auto_clear(&self) -> bool {
        match (self.auto_clear_timeout, &self.current) {
            (Some(timeout), Some((_, shown_at))) => shown_at.elapsed() > timeout,
            _ => false,
        }
    }

    fn style(kind: NoticeKind) -> Style {
        match kind {
            NoticeKind::Info => Styles::info(),
            NoticeKind::Success => Styles::success(),
            NoticeKind::Error => Styles::error(),
        }
    }

    /// Render the notice, or `hints` when there is none.
    pub fn render(&self, f: &mut Frame, area: Rect, hints: &str) {
        let (content, style) = match self.get_current() {
            Some(notice) => {
                let prefix = match notice.kind {
                    NoticeKind::Info => "ℹ",
                    NoticeKind::Success => "✓",
                    NoticeKind::Error => "✗",
                };
                (format!("{} {}", prefix, notice.message), Self::style(notice.kind))
            }
            None => (hints.to_string(), Styles::inactive()),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::inactive_border());

        f.render_widget(Paragraph::new(content).style(style).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_keeps_timer_for_same_notice() {
        let mut status = StatusDisplay::new().with_auto_clear(Duration::from_millis(0));
        let notice = Notice::error("Network error");
        status.sync(Some(&notice));
        std::thread::sleep(Duration::from_millis(2));
        status.sync(Some(&notice));
        assert!(status.should_auto_clear());

        status.sync(None);
        assert!(status.get_current().is_none());
        assert!(!status.should_auto_clear());
    }

    #[test]
    fn test_no_timeout_never_clears() {
        let mut status = StatusDisplay::new();
        status.sync(Some(&Notice::success("Logged in successfully")));
        assert!(!status.should_auto_clear());
    }
}
