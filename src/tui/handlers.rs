//! Common key handlers shared by screens and dialogs

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::traits::{FormHandler, Navigable, ScreenAction};
use crate::controller::Event;
use crate::pagination::Pager;

/// Common keyboard event handling utilities
pub struct CommonKeyHandler;

impl CommonKeyHandler {
    /// Handle navigation keys for list-based screens
    pub fn handle_navigation_keys<T: Navigable>(navigable: &mut T, key: KeyEvent) -> Option<ScreenAction> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                navigable.navigate_up();
                Some(ScreenAction::Handled)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                navigable.navigate_down();
                Some(ScreenAction::Handled)
            }
            KeyCode::Home => {
                navigable.navigate_to_first();
                Some(ScreenAction::Handled)
            }
            KeyCode::End => {
                navigable.navigate_to_last();
                Some(ScreenAction::Handled)
            }
            _ => None,
        }
    }

    /// Handle pagination keys; moves past either end are never produced
    pub fn handle_pagination_keys(pager: &Pager, key: KeyEvent) -> Option<ScreenAction> {
        let target = match key.code {
            KeyCode::Left | KeyCode::PageUp => pager.previous(),
            KeyCode::Right | KeyCode::PageDown => pager.next(),
            KeyCode::Char('[') => (pager.current != 1).then_some(1),
            KeyCode::Char(']') => (pager.current != pager.total).then_some(pager.total),
            _ => return None,
        };
        Some(match target {
            Some(page) => ScreenAction::Dispatch(Event::PageRequested(page)),
            None => ScreenAction::Handled,
        })
    }

    /// Handle form navigation and input
    pub fn handle_form_keys<T: FormHandler>(form: &mut T, key: KeyEvent) -> Option<ScreenAction> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                form.next_field();
                Some(ScreenAction::Handled)
            }
            KeyCode::BackTab | KeyCode::Up => {
                form.previous_field();
                Some(ScreenAction::Handled)
            }
            KeyCode::Left => {
                form.handle_cursor_left();
                Some(ScreenAction::Handled)
            }
            KeyCode::Right => {
                form.handle_cursor_right();
                Some(ScreenAction::Handled)
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                form.handle_char_input(c);
                Some(ScreenAction::Handled)
            }
            KeyCode::Backspace => {
                form.handle_backspace();
                Some(ScreenAction::Handled)
            }
            KeyCode::Delete => {
                form.handle_delete();
                Some(ScreenAction::Handled)
            }
            _ => None,
        }
    }

    /// Handle global application keys
    pub fn handle_global_keys(key: KeyEvent) -> Option<ScreenAction> {
        match key.code {
            KeyCode::Char('q') => Some(ScreenAction::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(ScreenAction::Quit),
            KeyCode::F(1) | KeyCode::Char('?') => Some(ScreenAction::ToggleHelp),
            KeyCode::Char('L') => Some(ScreenAction::CycleLocale),
            _ => None,
        }
    }
}
