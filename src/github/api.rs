//! GitHub REST wire types. Field names follow the API's snake_case.

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub language: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub owner: Owner,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Owner {
    pub id: u64,
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
}

/// Envelope returned by `/search/repositories`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SearchResponse {
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<Repository>,
}
