//! Domain DTOs for the cats API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! `id` and `group` are optional on the wire: a cat that has not been
//! persisted has no `id`, and search results may omit `group`.

use serde::{Deserialize, Serialize};

/// A single cat as returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cat {
    /// Assigned by the server. `None` means the cat was never persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl Cat {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// Request payload for creating a new cat. Carries no `id`; the server
/// assigns one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCat {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewCat {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
        }
    }
}

/// Search filters. An empty or missing field applies no filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub name: Option<String>,
    pub group: Option<String>,
}

impl SearchQuery {
    pub fn new(name: &str, group: &str) -> Self {
        Self {
            name: non_empty(name),
            group: non_empty(group),
        }
    }

    /// Query-string pairs for the filters that are actually set.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(name) = self.name.as_deref().filter(|v| !v.is_empty()) {
            pairs.push(("name".to_string(), name.to_string()));
        }
        if let Some(group) = self.group.as_deref().filter(|v| !v.is_empty()) {
            pairs.push(("group".to_string(), group.to_string()));
        }
        pairs
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
