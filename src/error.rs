//! Search failures, kept tagged until they reach the screen

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Why a search ended without a record.
///
/// The UI only ever shows the `Display` text, but the variant is kept in
/// state so tests (and the debug overlay) can tell the cases apart.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum SearchError {
    /// Input was empty or whitespace only; no request was made
    #[error("Please enter a name or ID")]
    Validation,
    /// The catalog has no entry for the identifier
    #[error("Pokemon not found")]
    NotFound(String),
    /// Network failure or a non-404 error status
    #[error("Request failed: {0}")]
    Transport(String),
    /// Body did not match the expected schema
    #[error("Unexpected response: {0}")]
    Parse(String),
}

impl SearchError {
    pub fn transport(err: reqwest::Error) -> Self {
        SearchError::Transport(err.to_string())
    }

    pub fn parse(err: serde_json::Error) -> Self {
        SearchError::Parse(err.to_string())
    }

    /// Message shown to the user
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Message without the detail, for one-line slots
    pub fn headline(&self) -> &'static str {
        match self {
            SearchError::Validation => "Please enter a name or ID",
            SearchError::NotFound(_) => "Pokemon not found",
            SearchError::Transport(_) => "Request failed",
            SearchError::Parse(_) => "Unexpected response",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_presentable() {
        assert_eq!(SearchError::Validation.message(), "Please enter a name or ID");
        assert_eq!(
            SearchError::NotFound("missingno".into()).message(),
            "Pokemon not found"
        );
        assert_eq!(
            SearchError::Transport("connection refused".into()).message(),
            "Request failed: connection refused"
        );
        assert!(SearchError::Parse("eof".into()).message().contains("eof"));
    }

    #[test]
    fn test_headline_drops_detail() {
        assert_eq!(
            SearchError::Transport("error sending request".into()).headline(),
            "Request failed"
        );
        assert_eq!(SearchError::Parse("eof".into()).headline(), "Unexpected response");
        assert_eq!(
            SearchError::NotFound("x".into()).headline(),
            SearchError::NotFound("x".into()).message()
        );
    }
}
