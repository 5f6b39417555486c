//! Board engine configuration injected at session construction.

use crate::board::domain::{CompletionHeuristic, CoverColor, LabelCatalog};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid configuration JSON.
    #[error("invalid board configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables shared by every board a session loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Keywords marking a list as "done"; matched case-insensitively.
    pub completion_keywords: Vec<String>,
    /// Refuse to delete the last list of a board.
    pub require_one_list: bool,
    /// Labels available to cards.
    pub labels: LabelCatalog,
    /// Colors allowed for card covers; empty allows any color.
    pub cover_palette: Vec<CoverColor>,
    /// Avatar color assigned to new members.
    pub default_member_color: String,
    /// Author name recorded on activity entries.
    pub current_user: String,
}

impl BoardConfig {
    /// Parses configuration from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed documents or invalid
    /// values, such as a malformed palette color.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(document)?)
    }

    /// Builds the "done" list heuristic from the configured keywords.
    #[must_use]
    pub fn completion_heuristic(&self) -> CompletionHeuristic {
        CompletionHeuristic::new(&self.completion_keywords)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        let cover_palette = [
            "#7bc86c", "#f5d3ce", "#ffaf3f", "#ef7564", "#cd8de5", "#5ba4cf", "#29cce5",
            "#6deca9", "#ff8ed4", "#172b4d",
        ]
        .into_iter()
        .filter_map(|color| CoverColor::new(color).ok())
        .collect();
        Self {
            completion_keywords: vec![
                "done".to_owned(),
                "complete".to_owned(),
                "finished".to_owned(),
                "bitti".to_owned(),
            ],
            require_one_list: true,
            labels: LabelCatalog::default(),
            cover_palette,
            default_member_color: "#579dff".to_owned(),
            current_user: "You".to_owned(),
        }
    }
}
