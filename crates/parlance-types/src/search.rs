//! Search hit and category types.
//!
//! A `SearchHit` is one result from the external search provider. Every hit
//! is assigned exactly one `Category` by the classifier in `parlance-core`;
//! categories carry the fixed display labels the web client renders.

use serde::{Deserialize, Serialize};

use std::fmt;

/// One result returned by the search provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    /// Snippet text; the provider may omit it.
    pub text: Option<String>,
}

/// The closed set of classification labels for search hits.
///
/// Assignment is a pure function of a hit's title and url, evaluated in this
/// declaration order -- first match wins, `Other` is the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    TechDocs,
    News,
    Tutorials,
    Qa,
    Official,
    Other,
}

impl Category {
    /// Display label rendered by the downstream client.
    pub fn label(&self) -> &'static str {
        match self {
            Category::TechDocs => "技术文档",
            Category::News => "新闻资讯",
            Category::Tutorials => "教程指南",
            Category::Qa => "问答社区",
            Category::Official => "官方网站",
            Category::Other => "其他资源",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Search hits grouped under one category.
///
/// Hits keep their original relative order within the group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedGroup {
    pub category: Category,
    pub hits: Vec<SearchHit>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_distinct() {
        let all = [
            Category::TechDocs,
            Category::News,
            Category::Tutorials,
            Category::Qa,
            Category::Official,
            Category::Other,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.label(), b.label());
            }
        }
    }

    #[test]
    fn test_hit_deserialize_without_text() {
        let hit: SearchHit =
            serde_json::from_str(r#"{"title":"Rust","url":"https://rust-lang.org"}"#).unwrap();
        assert_eq!(hit.title, "Rust");
        assert!(hit.text.is_none());
    }
}
