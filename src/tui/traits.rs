//! Core traits for the catalog TUI
//!
//! Screens and dialogs translate key presses into [`ScreenAction`]s; the app
//! forwards any controller event they carry and owns everything else.

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::controller::{Event, ViewState};
use crate::i18n::Locale;

/// Actions that can be returned from screen event handling
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenAction {
    /// Forward an intent to the view controller
    Dispatch(Event),
    /// Quit the application
    Quit,
    /// Toggle the help popup
    ToggleHelp,
    /// Switch the interface language
    CycleLocale,
    /// Key was consumed, nothing else to do
    Handled,
    /// Key was not consumed
    None,
}

/// Read-only context every screen draws from
pub struct RenderContext<'a> {
    pub state: &'a ViewState,
    pub locale: Locale,
}

/// Core trait for all TUI screens and dialogs
pub trait Screen {
    /// Draw the screen content
    fn draw(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext);

    /// Handle keyboard input and return an action
    fn handle_key_event(&mut self, key: KeyEvent, state: &ViewState) -> ScreenAction;

    /// Called when the screen becomes active
    fn on_enter(&mut self) {}
}

/// Trait for screens with navigable lists
pub trait Navigable {
    /// Move selection up
    fn navigate_up(&mut self);

    /// Move selection down
    fn navigate_down(&mut self);

    /// Get currently selected index
    fn get_selected_index(&self) -> Option<usize>;

    /// Set selected index
    fn set_selected_index(&mut self, index: Option<usize>);

    /// Get total number of items
    fn get_item_count(&self) -> usize;

    /// Navigate to first item
    fn navigate_to_first(&mut self) {
        if self.get_item_count() > 0 {
            self.set_selected_index(Some(0));
        }
    }

    /// Navigate to last item
    fn navigate_to_last(&mut self) {
        let count = self.get_item_count();
        if count > 0 {
            self.set_selected_index(Some(count - 1));
        }
    }
}

/// Trait for form handling
pub trait FormHandler {
    /// Get current field index
    fn get_current_field(&self) -> usize;

    /// Set current field
    fn set_current_field(&mut self, field: usize);

    /// Get total number of fields
    fn get_field_count(&self) -> usize;

    /// Move to next field
    fn next_field(&mut self) {
        let current = self.get_current_field();
        let total = self.get_field_count();
        if total > 0 {
            self.set_current_field((current + 1) % total);
        }
    }

    /// Move to previous field
    fn previous_field(&mut self) {
        let current = self.get_current_field();
        let total = self.get_field_count();
        if total > 0 {
            self.set_current_field(if current == 0 { total - 1 } else { current - 1 });
        }
    }

    /// Handle character input for current field
    fn handle_char_input(&mut self, c: char);

    /// Handle backspace for current field
    fn handle_backspace(&mut self);

    /// Handle delete for current field
    fn handle_delete(&mut self);

    fn handle_cursor_left(&mut self);

    fn handle_cursor_right(&mut self);

    /// First validation error, if any
    fn validate(&self) -> Result<(), String>;
}
