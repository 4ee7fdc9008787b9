use serde::{Deserialize, Serialize};

/// Render-ready card for one movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayCard {
    pub poster_url: String,
    pub title: String,
    /// Release year, or "N/A"
    pub year: String,
    /// One-decimal rating, or "N/A"
    pub rating_text: String,
    /// Overview truncated to the configured budget
    pub overview_text: String,
    /// Untruncated overview (hover text)
    pub overview_full: String,
    pub provider_badges: ProviderBadges,
}

/// Streaming badges section of a card.
///
/// Never an empty container: no providers renders the placeholder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProviderBadges {
    Logos { badges: Vec<ProviderBadge> },
    Unavailable { label: String },
}

impl ProviderBadges {
    pub fn len(&self) -> usize {
        match self {
            ProviderBadges::Logos { badges } => badges.len(),
            ProviderBadges::Unavailable { .. } => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderBadge {
    /// Omitted when the provider has no logo; the name is rendered instead
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// Accessible name (alt text)
    pub name: String,
    /// Hover text, e.g. "Available on Netflix"
    pub tooltip: String,
}
