//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::sprite::SpriteData;

/// Animation timing for the loading spinner.
pub const LOADING_TICK_MS: u64 = 90;
pub const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// Text typed by the user; no trimming or validation happens here
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SearchInput {
    text: String,
}

impl SearchInput {
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// One catalog entry, reduced to what the screen shows
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Record {
    pub id: u32,
    pub name: String,
    pub sprite_url: Option<String>,
    /// Type names in API order
    pub types: Vec<String>,
    /// Tenths of a meter
    pub height: u32,
    /// Tenths of a kilogram
    pub weight: u32,
}

impl Record {
    pub fn display_name(&self) -> String {
        self.name.to_uppercase()
    }

    pub fn display_id(&self) -> String {
        format!("#{}", self.id)
    }

    pub fn type_line(&self) -> String {
        format!("Type: {}", self.types.join(", "))
    }

    pub fn height_line(&self) -> String {
        format!("Height: {}m", tenths(self.height))
    }

    pub fn weight_line(&self) -> String {
        format!("Weight: {}kg", tenths(self.weight))
    }
}

/// Render a tenths value as a decimal without trailing zeros (60 -> "6", 4 -> "0.4").
pub fn tenths(value: u32) -> String {
    let (whole, frac) = (value / 10, value % 10);
    if frac == 0 {
        whole.to_string()
    } else {
        format!("{whole}.{frac}")
    }
}

/// Search lifecycle: Idle -> Loading -> Success/Failure
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Success(Record),
    Failure(SearchError),
}

impl FetchState {
    pub fn is_idle(&self) -> bool {
        matches!(self, FetchState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchState::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, FetchState::Failure(_))
    }

    pub fn record(&self) -> Option<&Record> {
        match self {
            FetchState::Success(record) => Some(record),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&SearchError> {
        match self {
            FetchState::Failure(error) => Some(error),
            _ => None,
        }
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    #[debug(section = "Search", label = "Input", debug_fmt)]
    pub input: SearchInput,

    #[debug(section = "Search", label = "Fetch", debug_fmt)]
    pub fetch: FetchState,

    /// Sequence number of the newest search or clear
    #[debug(section = "Search", label = "Latest request")]
    pub latest_request: u64,

    /// Input border is highlighted until the next edit or clear
    #[debug(section = "Search", label = "Input flagged")]
    pub input_flagged: bool,

    #[debug(section = "Config", label = "Options", debug_fmt)]
    pub config: SearchConfig,

    // --- Sprite (skipped) ---
    #[debug(skip)]
    pub sprite: Option<SpriteData>,

    #[debug(skip)]
    pub sprite_loading: bool,

    // --- Animation internals (skipped) ---
    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            input: SearchInput::default(),
            fetch: FetchState::Idle,
            latest_request: 0,
            input_flagged: false,
            config,
            sprite: None,
            sprite_loading: false,
            tick_count: 0,
        }
    }

    /// Allocate the sequence number for a new request
    pub fn next_request(&mut self) -> u64 {
        self.latest_request += 1;
        self.latest_request
    }

    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.tick_count as usize % SPINNER_FRAMES.len()]
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bulbasaur() -> Record {
        Record {
            id: 1,
            name: "bulbasaur".into(),
            sprite_url: None,
            types: vec!["grass".into(), "poison".into()],
            height: 7,
            weight: 69,
        }
    }

    #[test]
    fn test_tenths() {
        assert_eq!(tenths(0), "0");
        assert_eq!(tenths(4), "0.4");
        assert_eq!(tenths(7), "0.7");
        assert_eq!(tenths(60), "6");
        assert_eq!(tenths(905), "90.5");
    }

    #[test]
    fn test_record_lines() {
        let record = bulbasaur();
        assert_eq!(record.display_name(), "BULBASAUR");
        assert_eq!(record.display_id(), "#1");
        assert_eq!(record.type_line(), "Type: grass, poison");
        assert_eq!(record.height_line(), "Height: 0.7m");
        assert_eq!(record.weight_line(), "Weight: 6.9kg");
    }

    #[test]
    fn test_search_input_keeps_text_verbatim() {
        let mut input = SearchInput::default();
        input.set_text("  Pikachu ");
        assert_eq!(input.as_str(), "  Pikachu ");
        input.clear();
        assert!(input.is_empty());
    }

    #[test]
    fn test_fetch_state_accessors() {
        let state = FetchState::Success(bulbasaur());
        assert!(state.is_success());
        assert_eq!(state.record().map(|r| r.id), Some(1));
        assert!(state.error().is_none());

        let state = FetchState::Failure(SearchError::Validation);
        assert!(state.is_failure());
        assert!(state.record().is_none());
        assert!(FetchState::default().is_idle());
    }

    #[test]
    fn test_next_request_is_monotonic() {
        let mut state = AppState::default();
        assert_eq!(state.next_request(), 1);
        assert_eq!(state.next_request(), 2);
        assert_eq!(state.latest_request, 2);
    }
}
