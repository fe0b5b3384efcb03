//! Domain types shared by the search contexts.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::traits::Embeddable;

/// A wiki page as delivered by the REST client, before flattening.
///
/// `body` is the raw storage-format HTML.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawPage {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// A searchable document.
///
/// - `id`: explicit identity; when absent the item is identified by its
///   position within the corpus
/// - `text`: flattened body text, markup removed
/// - `url`: optional link shown alongside results
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: Option<String>,
    pub title: String,
    pub text: String,
    pub url: Option<String>,
}

impl Item {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: None, title: title.into(), text: text.into(), url: None }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self { self.id = Some(id.into()); self }

    pub fn with_url(mut self, url: impl Into<String>) -> Self { self.url = Some(url.into()); self }

    /// Explicit id if supplied, otherwise the corpus position.
    pub fn key(&self, position: usize) -> String {
        self.id.clone().unwrap_or_else(|| position.to_string())
    }
}

impl Embeddable for Item {
    fn embedding_text(&self) -> Cow<'_, str> { Cow::Owned(format!("{} {}", self.title, self.text)) }
}

/// The fixed set of non-functional requirement categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NfrCategory {
    Performance,
    Security,
    Reliability,
    Usability,
    Maintainability,
    Scalability,
    Compatibility,
    Compliance,
}

impl NfrCategory {
    pub const ALL: [NfrCategory; 8] = [
        NfrCategory::Performance,
        NfrCategory::Security,
        NfrCategory::Reliability,
        NfrCategory::Usability,
        NfrCategory::Maintainability,
        NfrCategory::Scalability,
        NfrCategory::Compatibility,
        NfrCategory::Compliance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NfrCategory::Performance => "performance",
            NfrCategory::Security => "security",
            NfrCategory::Reliability => "reliability",
            NfrCategory::Usability => "usability",
            NfrCategory::Maintainability => "maintainability",
            NfrCategory::Scalability => "scalability",
            NfrCategory::Compatibility => "compatibility",
            NfrCategory::Compliance => "compliance",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            NfrCategory::Performance => "Requirements related to response time, throughput, and resource utilization.",
            NfrCategory::Security => "Requirements related to authentication, authorization, data protection, etc.",
            NfrCategory::Reliability => "Requirements related to availability, fault tolerance, and recoverability.",
            NfrCategory::Usability => "Requirements related to user experience, accessibility, and ease of use.",
            NfrCategory::Maintainability => "Requirements related to code quality, documentation, and ease of maintenance.",
            NfrCategory::Scalability => "Requirements related to handling growth in users, data, or transactions.",
            NfrCategory::Compatibility => "Requirements related to interoperability with other systems or platforms.",
            NfrCategory::Compliance => "Requirements related to regulatory, legal, or industry standards.",
        }
    }
}

impl fmt::Display for NfrCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for NfrCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        NfrCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| format!("unknown NFR category '{}'", s))
    }
}

impl Embeddable for NfrCategory {
    fn embedding_text(&self) -> Cow<'_, str> { Cow::Owned(format!("{}: {}", self.as_str(), self.description())) }
}
