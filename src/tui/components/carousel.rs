//! Preview that cycles through an entry's three images while it is selected

use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::models::CatalogEntry;
use crate::tui::ui::Styles;

pub const FRAME_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct ImageCarousel {
    entry_id: Option<i64>,
    frame: usize,
    last_advance: Instant,
}

impl Default for ImageCarousel {
    fn default() -> Self {
        Self {
            entry_id: None,
            frame: 0,
            last_advance: Instant::now(),
        }
    }
}

impl ImageCarousel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Follow the selection. A different entry starts again from its first image.
    pub fn select(&mut self, entry_id: Option<i64>) {
        if self.entry_id != entry_id {
            self.entry_id = entry_id;
            self.frame = 0;
            self.last_advance = Instant::now();
        }
    }

    /// Advance one frame per elapsed interval; idle without a selection.
    pub fn tick(&mut self, now: Instant) {
        if self.entry_id.is_none() {
            return;
        }
        if now.duration_since(self.last_advance) >= FRAME_INTERVAL {
            self.frame = (self.frame + 1) % 3;
            self.last_advance = now;
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, entry: Option<&CatalogEntry>) {
        let block = Block::default()
            .title("Preview")
            .borders(Borders::ALL)
            .border_style(Styles::inactive_border());

        let Some(entry) = entry else {
            f.render_widget(Paragraph::new("").block(block), area);
            return;
        };

        let images = entry.images();
        let dots: String = (0..images.len())
            .map(|i| if i == self.frame { '●' } else { '○' })
            .collect();

        let mut lines = vec![
            Line::from(Span::styled(entry.title.clone(), Styles::title())),
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("Image {}/3 ", self.frame + 1), Styles::info()),
                Span::raw(dots),
            ]),
            Line::from(images[self.frame].to_string()),
            Line::from(""),
        ];
        if !entry.tags.is_empty() {
            lines.push(Line::from(
                entry
                    .tags
                    .iter()
                    .enumerate()
                    .flat_map(|(i, tag)| {
                        [
                            Span::styled(format!(" {}:{} ", i + 1, tag), Styles::tag()),
                            Span::raw(" "),
                        ]
                    })
                    .collect::<Vec<_>>(),
            ));
        }
        if !entry.created_at.is_empty() {
            lines.push(Line::from(Span::styled(entry.created_at.clone(), Styles::inactive())));
        }

        f.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
            area,
        );
    }
}
