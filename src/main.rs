use anyhow::Result;
use clap::Parser;
use repo_explorer::{commands, config::Config};
use tokio::io::BufReader;

/// repo-explorer - browse and search GitHub repositories
///
/// Without a search, the configured organization's repositories are shown,
/// most recently updated first. Searches are sorted by stars.
///
/// Examples:
///   repo-explorer list            # Latest repositories of the default organization
///   repo-explorer search tokio    # Most-starred repositories matching "tokio"
///   repo-explorer browse          # Interactive search-as-you-type session
#[derive(Parser, Debug)]
#[command(author, version = env!("REPO_EXPLORER_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(
        long = "api-url",
        env = "REPO_EXPLORER_API_URL",
        value_name = "URL",
        global = true
    )]
    pub api_url: Option<String>,

    /// Organization listed before any search (defaults to google)
    #[arg(long = "org", env = "REPO_EXPLORER_ORG", value_name = "ORG", global = true)]
    pub organization: Option<String>,

    /// Results per page, 1-100 (defaults to 20)
    #[arg(long = "per-page", value_name = "N", global = true)]
    pub per_page: Option<u32>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List the organization's repositories
    List(ListArgs),

    /// Search all repositories on GitHub
    Search(SearchArgs),

    /// Search interactively, one query per line
    Browse,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Page to fetch
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Show full details for every repository
    #[arg(long)]
    pub detail: bool,
}

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// Search terms
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Page to fetch
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Show full details for every repository
    #[arg(long)]
    pub detail: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let config = Config::new(cli.api_url, cli.organization, cli.per_page)?;

    match cli.command {
        Commands::List(args) => {
            let source = commands::services::build_repository_source(&config)?;
            commands::list(&source, args.page, config.per_page, args.detail).await?
        }
        Commands::Search(args) => {
            let source = commands::services::build_repository_source(&config)?;
            commands::search(&source, &args.query, args.page, config.per_page, args.detail)
                .await?
        }
        Commands::Browse => {
            let pipeline = commands::services::build_pipeline(&config)?;
            let input = BufReader::new(tokio::io::stdin());
            commands::browse(pipeline, input, config.per_page).await?
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_list_parsing() {
        let cli = Cli::try_parse_from(["repo-explorer", "list"]).unwrap();
        match cli.command {
            Commands::List(args) => {
                assert_eq!(args.page, 1);
                assert!(!args.detail);
            }
            _ => panic!("Expected List command"),
        }
        assert_eq!(cli.per_page, None);
    }

    #[test]
    fn test_cli_search_parsing() {
        let cli = Cli::try_parse_from([
            "repo-explorer",
            "search",
            "tokio runtime",
            "--page",
            "2",
            "--detail",
        ])
        .unwrap();
        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.query, "tokio runtime");
                assert_eq!(args.page, 2);
                assert!(args.detail);
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_cli_global_options() {
        let cli = Cli::try_parse_from([
            "repo-explorer",
            "--api-url",
            "http://localhost:1234",
            "--org",
            "rust-lang",
            "browse",
            "--per-page",
            "50",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Browse));
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:1234"));
        assert_eq!(cli.organization.as_deref(), Some("rust-lang"));
        assert_eq!(cli.per_page, Some(50));
    }

    #[test]
    fn test_cli_search_requires_query() {
        assert!(Cli::try_parse_from(["repo-explorer", "search"]).is_err());
    }

    #[test]
    fn test_cli_no_subcommand_fails() {
        assert!(Cli::try_parse_from(["repo-explorer"]).is_err());
    }
}
