//! Entry table component for displaying one catalog page

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::models::CatalogEntry;
use crate::tui::{
    traits::Navigable,
    ui::{truncate_to_width, Styles},
};

/// Configuration for entry table display
#[derive(Debug, Clone)]
pub struct EntryTableConfig {
    pub title: String,
    pub empty_text: String,
    pub max_title_len: usize,
    pub max_tags: usize,
}

impl Default for EntryTableConfig {
    fn default() -> Self {
        Self {
            title: "Videos".to_string(),
            empty_text: "No videos found".to_string(),
            max_title_len: 48,
            max_tags: 4,
        }
    }
}

/// Selectable list of the entries on the current page
pub struct EntryTable {
    pub entries: Vec<CatalogEntry>,
    pub state: ListState,
    pub config: EntryTableConfig,
}

impl EntryTable {
    pub fn new(config: EntryTableConfig) -> Self {
        Self {
            entries: Vec::new(),
            state: ListState::default(),
            config,
        }
    }

    /// Set new entries and reset selection
    pub fn set_entries(&mut self, entries: Vec<CatalogEntry>) {
        self.entries = entries;
        self.state.select(if self.entries.is_empty() { None } else { Some(0) });
    }

    pub fn get_selected_entry(&self) -> Option<&CatalogEntry> {
        self.state.selected().and_then(|i| self.entries.get(i))
    }

    fn entry_line(&self, entry: &CatalogEntry) -> Line<'static> {
        let title = truncate_to_width(&entry.title, self.config.max_title_len);
        let pad = self.config.max_title_len.saturating_sub(title.width());
        let mut spans = vec![
            Span::styled(format!("#{:<5}", entry.id), Styles::inactive()),
            Span::raw(format!("{}{}", title, " ".repeat(pad))),
        ];
        for tag in entry.tags.iter().take(self.config.max_tags) {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!(" {} ", tag), Styles::tag()));
        }
        if entry.tags.len() > self.config.max_tags {
            spans.push(Span::styled(
                format!(" +{}", entry.tags.len() - self.config.max_tags),
                Styles::inactive(),
            ));
        }
        Line::from(spans)
    }

    /// Render the entry table
    pub fn render(&mut self, f: &mut Frame, area: Rect, focused: bool) {
        let block = Block::default()
            .title(self.config.title.clone())
            .borders(Borders::ALL)
            .border_style(if focused {
                Styles::active_border()
            } else {
                Styles::inactive_border()
            });

        if self.entries.is_empty() {
            let items = vec![ListItem::new(Line::from(Span::styled(
                self.config.empty_text.clone(),
                Styles::inactive(),
            )))];
            f.render_widget(List::new(items).block(block), area);
            return;
        }

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| ListItem::new(self.entry_line(entry)))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Styles::selected())
            .highlight_symbol("▶ ");

        f.render_stateful_widget(list, area, &mut self.state);
    }
}

impl Navigable for EntryTable {
    fn navigate_up(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let selected = self.state.selected().unwrap_or(0);
        self.state.select(Some(if selected == 0 {
            self.entries.len() - 1
        } else {
            selected - 1
        }));
    }

    fn navigate_down(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let selected = self.state.selected().unwrap_or(0);
        self.state.select(Some((selected + 1) % self.entries.len()));
    }

    fn get_selected_index(&self) -> Option<usize> {
        self.state.selected()
    }

    fn set_selected_index(&mut self, index: Option<usize>) {
        self.state.select(index.filter(|&i| i < self.entries.len()));
    }

    fn get_item_count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64) -> CatalogEntry {
        CatalogEntry {
            id,
            title: format!("Video {}", id),
            tags: vec!["cats".to_string()],
            external_url: format!("https://videos.example/{}", id),
            image1_url: String::new(),
            image2_url: String::new(),
            image3_url: String::new(),
            created_at: String::new(),
            position: id,
        }
    }

    #[test]
    fn test_selection_wraps_and_resets() {
        let mut table = EntryTable::new(EntryTableConfig::default());
        table.navigate_down();
        assert_eq!(table.get_selected_index(), None);

        table.set_entries(vec![entry(1), entry(2), entry(3)]);
        assert_eq!(table.get_selected_entry().map(|e| e.id), Some(1));
        table.navigate_up();
        assert_eq!(table.get_selected_entry().map(|e| e.id), Some(3));
        table.navigate_down();
        assert_eq!(table.get_selected_index(), Some(0));

        table.navigate_to_last();
        table.set_entries(vec![entry(9)]);
        assert_eq!(table.get_selected_entry().map(|e| e.id), Some(9));
    }
}
