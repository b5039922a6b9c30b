//! Reusable UI components for the catalog TUI

pub mod carousel;
pub mod entry_table;
pub mod form_field;
pub mod pager_bar;
pub mod status_display;

pub use carousel::ImageCarousel;
pub use entry_table::{EntryTable, EntryTableConfig};
pub use form_field::{Form, FormField, FormFieldType};
pub use pager_bar::PagerBar;
pub use status_display::StatusDisplay;
