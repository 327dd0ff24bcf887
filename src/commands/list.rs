use anyhow::{Result, anyhow};
use log::debug;

use crate::repository::RepositorySource;

use super::render;

/// Print the default organization's repositories, most recently updated first.
#[tracing::instrument(skip(source))]
pub async fn list<S: RepositorySource + ?Sized>(
    source: &S,
    page: u32,
    per_page: u32,
    detail: bool,
) -> Result<()> {
    let output = render_listing(source, page, per_page, detail).await?;
    println!("{}", output);
    Ok(())
}

async fn render_listing<S: RepositorySource + ?Sized>(
    source: &S,
    page: u32,
    per_page: u32,
    detail: bool,
) -> Result<String> {
    let repos = source
        .organization_repositories(page, per_page)
        .await
        .map_err(|e| anyhow!(render::format_error(&e)))?;

    debug!("Listing returned {} repositories", repos.len());

    Ok(if detail {
        render::format_details(&repos)
    } else {
        render::format_list(&repos)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RepositoryError;
    use crate::repository::MockRepositorySource;
    use crate::test_utils::sample_repository;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_list_renders_rows_in_server_order() {
        let mut source = MockRepositorySource::new();
        source
            .expect_organization_repositories()
            .with(eq(1u32), eq(20u32))
            .times(1)
            .returning(|_, _| {
                Ok(vec![
                    sample_repository(2, "newest"),
                    sample_repository(1, "older"),
                ])
            });

        let output = render_listing(&source, 1, 20, false).await.unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert!(lines[0].contains("google/newest"));
        assert!(lines[2].contains("google/older"));
    }

    #[tokio::test]
    async fn test_list_detail_mode() {
        let mut source = MockRepositorySource::new();
        source
            .expect_organization_repositories()
            .returning(|_, _| Ok(vec![sample_repository(1, "alpha")]));

        let output = render_listing(&source, 1, 20, true).await.unwrap();
        assert!(output.contains("Full name: google/alpha"));
    }

    #[tokio::test]
    async fn test_list_error_has_user_message() {
        let mut source = MockRepositorySource::new();
        source
            .expect_organization_repositories()
            .returning(|_, _| Err(RepositoryError::NetworkUnavailable));

        let err = list(&source, 1, 20, false).await.unwrap_err();
        assert!(err.to_string().contains("Unable to connect to the internet"));
        assert!(err.to_string().contains("Suggestion: Check your internet connection"));
    }
}
