use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::domain::{Category, Coordinate};

/// Ordering applied to a filtered result set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SortStrategy {
    /// Query position in the name, with a bonus for open resources
    #[default]
    Relevance,
    Name,
    /// Open resources first
    Open,
    /// Closest to the origin first; no-op without an origin
    Distance,
}

impl SortStrategy {
    /// Parse a sort key, falling back to relevance for anything unrecognized
    pub fn parse_lenient(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "name" => SortStrategy::Name,
            "open" | "open-first" | "open_first" => SortStrategy::Open,
            "distance" => SortStrategy::Distance,
            _ => SortStrategy::Relevance,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortStrategy::Relevance => "relevance",
            SortStrategy::Name => "name",
            SortStrategy::Open => "open",
            SortStrategy::Distance => "distance",
        }
    }
}

impl From<String> for SortStrategy {
    fn from(key: String) -> Self {
        SortStrategy::parse_lenient(&key)
    }
}

impl From<&str> for SortStrategy {
    fn from(key: &str) -> Self {
        SortStrategy::parse_lenient(key)
    }
}

impl fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The complete set of criteria for one query
///
/// Built once per query through [`QueryContextBuilder`] and only read
/// afterwards. The query text is trimmed and lowercased when the context
/// is built so predicates never re-normalize it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryContext {
    query: String,
    category: Option<Category>,
    amenities: BTreeSet<String>,
    open_only: bool,
    sort: SortStrategy,
    origin: Option<Coordinate>,
}

impl QueryContext {
    pub fn builder() -> QueryContextBuilder {
        QueryContextBuilder::default()
    }

    /// Normalized (trimmed, lowercased) query text; may be empty
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn amenities(&self) -> &BTreeSet<String> {
        &self.amenities
    }

    pub fn open_only(&self) -> bool {
        self.open_only
    }

    pub fn sort(&self) -> SortStrategy {
        self.sort
    }

    pub fn origin(&self) -> Option<Coordinate> {
        self.origin
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryContextBuilder {
    query: String,
    category: Option<Category>,
    amenities: BTreeSet<String>,
    open_only: bool,
    sort: SortStrategy,
    origin: Option<Coordinate>,
}

impl QueryContextBuilder {
    pub fn query(mut self, text: impl AsRef<str>) -> Self {
        self.query = text.as_ref().to_string();
        self
    }

    pub fn category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn amenities<I, S>(mut self, amenities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.amenities = amenities.into_iter().map(Into::into).collect();
        self
    }

    pub fn open_only(mut self, open_only: bool) -> Self {
        self.open_only = open_only;
        self
    }

    pub fn sort(mut self, sort: SortStrategy) -> Self {
        self.sort = sort;
        self
    }

    pub fn origin(mut self, origin: Option<Coordinate>) -> Self {
        self.origin = origin;
        self
    }

    pub fn build(self) -> QueryContext {
        QueryContext {
            query: self.query.trim().to_lowercase(),
            category: self.category,
            amenities: self.amenities,
            open_only: self.open_only,
            sort: self.sort,
            origin: self.origin,
        }
    }
}
