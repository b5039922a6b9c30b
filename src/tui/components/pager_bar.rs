//! Pager bar: previous/next controls around the numbered page window

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::pagination::{PageItem, Pager};
use crate::tui::ui::Styles;

pub struct PagerBar<'a> {
    pub pager: &'a Pager,
    pub previous_label: &'a str,
    pub next_label: &'a str,
}

impl<'a> PagerBar<'a> {
    pub fn new(pager: &'a Pager, previous_label: &'a str, next_label: &'a str) -> Self {
        Self {
            pager,
            previous_label,
            next_label,
        }
    }

    pub fn line(&self) -> Line<'static> {
        let enabled = |on: bool| if on { Styles::default() } else { Styles::inactive() };

        let mut spans = vec![
            Span::styled(format!("◀ {}", self.previous_label), enabled(self.pager.can_go_previous())),
            Span::raw("  "),
        ];
        for item in self.pager.items() {
            match item {
                PageItem::Page { number, current: true } => {
                    spans.push(Span::styled(format!("[{}]", number), Styles::selected()))
                }
                PageItem::Page { number, current: false } => spans.push(Span::raw(format!(" {} ", number))),
                PageItem::Ellipsis => spans.push(Span::styled(" … ", Styles::inactive())),
            }
        }
        spans.push(Span::raw("  "));
        spans.push(Span::styled(format!("{} ▶", self.next_label), enabled(self.pager.can_go_next())));
        Line::from(spans)
    }

    /// Draws nothing for a single page.
    pub fn render(&self, f: &mut Frame, area: Rect) {
        if !self.pager.is_visible() {
            return;
        }
        f.render_widget(Paragraph::new(self.line()).alignment(Alignment::Center), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_line_marks_current_page_and_gaps() {
        let pager = Pager::new(6, 12);
        let line = PagerBar::new(&pager, "Previous", "Next").line();
        assert_eq!(text(&line), "◀ Previous   1  …  5 [6] 7  …  12   Next ▶");
    }
}
