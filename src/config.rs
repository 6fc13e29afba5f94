//! Runtime options resolved from the command line

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";

/// Which completion wins when searches overlap
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseOrdering {
    /// Only the newest search (or clear) may commit; older completions are dropped
    #[default]
    LatestIssued,
    /// Every completion commits in arrival order
    LastResolved,
}

impl ResponseOrdering {
    pub fn accepts(&self, request: u64, latest: u64) -> bool {
        match self {
            ResponseOrdering::LatestIssued => request == latest,
            ResponseOrdering::LastResolved => true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SearchConfig {
    pub api_base: String,
    pub initial_query: Option<String>,
    pub ordering: ResponseOrdering,
    pub show_sprites: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            initial_query: None,
            ordering: ResponseOrdering::default(),
            show_sprites: true,
        }
    }
}
