use serde::{Deserialize, Serialize};

pub const MSG_KEYWORD_REQUIRED: &str = "The search \"keyword\" is mandatory.";
pub const MSG_NOT_FOUND: &str = "No products found for the provided keyword.";
pub const MSG_SCRAPE_FAILED: &str = "Failed to scrape the site.";

/// Raw query pairs, so a repeated `keyword` does not fail deserialization.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct ScrapeParams {
    pub pairs: Vec<(String, String)>,
}

impl ScrapeParams {
    /// First `keyword` value, if any.
    pub fn keyword(&self) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(name, _)| name == "keyword")
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}
