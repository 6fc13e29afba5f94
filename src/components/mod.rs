pub mod result_panel;
pub mod search_field;
pub mod search_screen;

use ratatui::style::Color;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use result_panel::{result_lines, ResultPanel, ResultPanelProps};
pub use search_field::{SearchField, SearchFieldProps};
pub use search_screen::{SearchScreen, SearchScreenProps};

pub(crate) const BG_BASE: Color = Color::Rgb(12, 18, 28);
pub(crate) const BG_PANEL: Color = Color::Rgb(20, 32, 46);
pub(crate) const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
pub(crate) const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
pub(crate) const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
pub(crate) const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
pub(crate) const ERROR_RED: Color = Color::Rgb(255, 68, 68);
