//! Search DTOs
//!
//! `IndexedProduct` is the slice of a catalog product the index cares about;
//! `Suggestion` is what autocomplete callers get back.

use serde::{Deserialize, Serialize};

/// Product fields the autocomplete index is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedProduct {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub image_url: String,
}

impl IndexedProduct {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        product_type: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            product_type: product_type.into(),
            image_url: image_url.into(),
        }
    }
}

/// A shaped autocomplete result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    /// `"<name> - <category> <type>"`
    pub title: String,
    pub name: String,
    pub category: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub image_url: String,
}

impl Suggestion {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        product_type: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let category = category.into();
        let product_type = product_type.into();
        Self {
            id: id.into(),
            title: format!("{} - {} {}", name, category, product_type),
            name,
            category,
            product_type,
            image_url: image_url.into(),
        }
    }
}

/// Where a set of suggestions came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionSource {
    /// Prefix range scan over the sorted index
    Index,
    /// Substring match against the catalog (degraded path)
    Catalog,
}

/// Suggestions plus their source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub suggestions: Vec<Suggestion>,
    pub source: SuggestionSource,
}

impl SearchOutcome {
    pub fn empty() -> Self {
        Self {
            suggestions: Vec::new(),
            source: SuggestionSource::Index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_title() {
        let s = Suggestion::new("p1", "red bike", "sports", "cycle", "");
        assert_eq!(s.title, "red bike - sports cycle");
    }

    #[test]
    fn test_suggestion_serializes_type_field() {
        let s = Suggestion::new("p1", "red bike", "sports", "cycle", "https://img/1.png");
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["type"], "cycle");
        assert_eq!(json["image_url"], "https://img/1.png");
    }
}
