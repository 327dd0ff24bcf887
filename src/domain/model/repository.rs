use chrono::{DateTime, Utc};

/// A repository as the explorer shows it.
#[derive(Debug, Clone, PartialEq)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub language: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    /// Parsed creation time, absent when the server value was missing or unparsable.
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Server strings, kept so unparsable dates can still be displayed.
    pub created_at_raw: Option<String>,
    pub updated_at_raw: Option<String>,
    pub owner: Owner,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub id: u64,
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
}

/// One page of search results.
///
/// `total_count` is what the server reports and can exceed `items.len()`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResult {
    pub total_count: u64,
    pub items: Vec<Repository>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
