use serde::{Deserialize, Serialize};

use crate::autocomplete::Freq;

/// A term and its frequency, as accepted and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermFreq {
    pub term: String,
    pub frequency: Freq,
}

/// Index statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub terms: usize,
    pub nodes: usize,
    pub top_k: usize,
}

/// Suggestion query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub scores: bool,
}

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub autocomplete: AutocompleteConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub admin_username: String,
    #[serde(default)]
    pub admin_password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AutocompleteConfig {
    /// Suggestions kept per prefix. 0 means the default.
    #[serde(default)]
    pub top_k: usize,
    #[serde(default)]
    pub normalize: bool,
    /// CSV vocabulary files loaded on startup.
    #[serde(default)]
    pub files: Vec<String>,
}
