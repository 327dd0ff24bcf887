//! Plain-text rendering of repositories and pipeline state.

use chrono::{DateTime, Utc};

use crate::domain::{Repository, RepositoryError};
use crate::pipeline::PipelineState;

const DISPLAY_DATE_FORMAT: &str = "%b %-d, %Y";

/// Parsed date when available, otherwise the server string, otherwise "unknown".
pub fn format_date(parsed: Option<&DateTime<Utc>>, raw: Option<&str>) -> String {
    match (parsed, raw) {
        (Some(date), _) => date.format(DISPLAY_DATE_FORMAT).to_string(),
        (None, Some(raw)) if !raw.trim().is_empty() => raw.to_string(),
        _ => "unknown".to_string(),
    }
}

/// One list row: `  1. owner/name  ★ 100  Rust`, then the description if any.
pub fn format_row(index: usize, repo: &Repository) -> String {
    let mut row = format!("{:>3}. {}  ★ {}", index, repo.full_name, repo.stargazers_count);
    if let Some(language) = &repo.language {
        row.push_str(&format!("  {}", language));
    }
    if let Some(description) = repo.description.as_deref().filter(|d| !d.is_empty()) {
        row.push_str(&format!("\n     {}", description));
    }
    row
}

pub fn format_list(repos: &[Repository]) -> String {
    if repos.is_empty() {
        return "No repositories.".to_string();
    }
    repos
        .iter()
        .enumerate()
        .map(|(i, repo)| format_row(i + 1, repo))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_detail(repo: &Repository) -> String {
    let mut lines = vec![
        format!("Name: {}", repo.name),
        format!("Full name: {}", repo.full_name),
    ];
    if let Some(description) = &repo.description {
        lines.push(format!("Description: {}", description));
    }
    lines.push(format!(
        "Language: {}",
        repo.language.as_deref().unwrap_or("unknown")
    ));
    lines.push(format!("Stars: {}", repo.stargazers_count));
    lines.push(format!("Forks: {}", repo.forks_count));
    lines.push(format!(
        "Created: {}",
        format_date(repo.created_at.as_ref(), repo.created_at_raw.as_deref())
    ));
    lines.push(format!(
        "Updated: {}",
        format_date(repo.updated_at.as_ref(), repo.updated_at_raw.as_deref())
    ));
    lines.push(format!("Owner: {} ({})", repo.owner.login, repo.owner.html_url));
    lines.push(format!("Avatar: {}", repo.owner.avatar_url));
    lines.push(format!("URL: {}", repo.html_url));
    lines.join("\n")
}

pub fn format_details(repos: &[Repository]) -> String {
    if repos.is_empty() {
        return "No repositories.".to_string();
    }
    repos
        .iter()
        .map(format_detail)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Description, reason and suggestion, one per line.
pub fn format_error(error: &RepositoryError) -> String {
    format!(
        "{}\nReason: {}\nSuggestion: {}",
        error.description(),
        error.failure_reason(),
        error.recovery_suggestion()
    )
}

/// What an interactive session should print when state moves from `previous` to `next`.
pub fn format_update(previous: &PipelineState, next: &PipelineState) -> Option<String> {
    let mut parts = Vec::new();

    if next.is_loading && !previous.is_loading {
        parts.push("Loading...".to_string());
    }
    if next.items != previous.items {
        parts.push(format_list(&next.items));
    }
    if let Some(error) = &next.last_error {
        if previous.last_error.as_ref() != Some(error) {
            parts.push(format!("Error: {}", format_error(error)));
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}
