use anyhow::{Result, anyhow};
use log::debug;

use crate::repository::{RepositorySource, require_results};

use super::render;

/// One-shot search. Empty input and empty results are both reported as errors.
#[tracing::instrument(skip(source))]
pub async fn search<S: RepositorySource + ?Sized>(
    source: &S,
    query: &str,
    page: u32,
    per_page: u32,
    detail: bool,
) -> Result<()> {
    let output = render_search(source, query, page, per_page, detail).await?;
    println!("{}", output);
    Ok(())
}

async fn render_search<S: RepositorySource + ?Sized>(
    source: &S,
    query: &str,
    page: u32,
    per_page: u32,
    detail: bool,
) -> Result<String> {
    let result = source
        .search_repositories(query, page, per_page)
        .await
        .and_then(require_results)
        .map_err(|e| anyhow!(render::format_error(&e)))?;

    debug!(
        "Search for {:?} matched {} repositories",
        query, result.total_count
    );

    let body = if detail {
        render::format_details(&result.items)
    } else {
        render::format_list(&result.items)
    };

    Ok(format!(
        "Showing {} of {} repositories matching {:?}\n{}",
        result.items.len(),
        result.total_count,
        query.trim(),
        body
    ))
}
