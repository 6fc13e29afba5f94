//! Actions: user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::sprite::SpriteData;
use crate::state::Record;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Startup: runs the configured initial query, if any
    Init,

    // ===== Input category =====
    /// Input text edited
    InputChange(String),

    // ===== Search category =====
    /// Run a search for the given raw input
    SearchSubmit(String),

    /// Reset input and result
    SearchClear,

    // ===== Pokemon category =====
    /// Result: catalog returned a record for request `request`
    PokemonDidLoad { request: u64, record: Record },

    /// Result: request `request` failed
    PokemonDidError { request: u64, error: SearchError },

    // ===== Sprite category =====
    SpriteDidLoad { id: u32, sprite: SpriteData },

    SpriteDidError { id: u32, error: String },

    /// Force a re-render (cursor movement)
    Render,

    /// Spinner animation
    Tick,

    Quit,
}
