use assert_cmd::Command;
use assert_cmd::cargo;
use mockito::{Matcher, Server};

fn repo_json(id: u64, owner: &str, name: &str, stars: u64) -> String {
    format!(
        r#"{{
            "id": {id},
            "name": "{name}",
            "full_name": "{owner}/{name}",
            "description": "{name} description",
            "html_url": "https://github.com/{owner}/{name}",
            "language": "Rust",
            "stargazers_count": {stars},
            "forks_count": 3,
            "created_at": "2023-01-01T00:00:00Z",
            "updated_at": "2024-06-15T12:30:00Z",
            "owner": {{
                "id": 1,
                "login": "{owner}",
                "avatar_url": "https://avatars.githubusercontent.com/u/1",
                "html_url": "https://github.com/{owner}"
            }}
        }}"#
    )
}

fn repo_explorer(server: &Server) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("repo-explorer"));
    cmd.env_remove("REPO_EXPLORER_ORG")
        .env("REPO_EXPLORER_API_URL", server.url());
    cmd
}

#[test]
fn test_list_default_organization() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/orgs/google/repos")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("sort".into(), "updated".into()),
            Matcher::UrlEncoded("direction".into(), "desc".into()),
            Matcher::UrlEncoded("page".into(), "1".into()),
            Matcher::UrlEncoded("per_page".into(), "20".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            "[{}, {}]",
            repo_json(2, "google", "newest", 10),
            repo_json(1, "google", "older", 5)
        ))
        .create();

    repo_explorer(&server)
        .arg("list")
        .assert()
        .success()
        .stdout(predicates::str::contains("google/newest"))
        .stdout(predicates::str::contains("google/older"));

    mock.assert();
}

#[test]
fn test_list_other_organization_with_detail() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/orgs/rust-lang/repos")
        .match_query(Matcher::UrlEncoded("per_page".into(), "5".into()))
        .with_status(200)
        .with_body(format!("[{}]", repo_json(7, "rust-lang", "cargo", 12000)))
        .create();

    repo_explorer(&server)
        .args(["--org", "rust-lang", "--per-page", "5", "list", "--detail"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Full name: rust-lang/cargo"))
        .stdout(predicates::str::contains("Jun 15, 2024"));

    mock.assert();
}

#[test]
fn test_search_end_to_end() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/search/repositories")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "test".into()),
            Matcher::UrlEncoded("sort".into(), "stars".into()),
            Matcher::UrlEncoded("order".into(), "desc".into()),
        ]))
        .with_status(200)
        .with_body(format!(
            r#"{{"total_count": 4213, "incomplete_results": false, "items": [{}]}}"#,
            repo_json(1, "google", "test-repo-1", 100)
        ))
        .create();

    repo_explorer(&server)
        .args(["search", "test"])
        .assert()
        .success()
        .stdout(predicates::str::contains(
            "Showing 1 of 4213 repositories matching \"test\"",
        ))
        .stdout(predicates::str::contains("google/test-repo-1"));

    mock.assert();
}

#[test]
fn test_search_rate_limited() {
    let mut server = Server::new();
    server
        .mock("GET", "/search/repositories")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body(r#"{"message": "API rate limit exceeded"}"#)
        .create();

    repo_explorer(&server)
        .args(["search", "test"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Too many requests"))
        .stderr(predicates::str::contains("Suggestion:"));
}

#[test]
fn test_search_blank_query_never_reaches_server() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/search/repositories")
        .match_query(Matcher::Any)
        .expect(0)
        .create();

    repo_explorer(&server)
        .args(["search", "   "])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Please enter a valid search term."));

    mock.assert();
}

#[test]
fn test_search_no_results() {
    let mut server = Server::new();
    server
        .mock("GET", "/search/repositories")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"total_count": 0, "items": []}"#)
        .create();

    repo_explorer(&server)
        .args(["search", "zzzz-nothing"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("No repositories found"));
}

#[test]
fn test_invalid_per_page_is_rejected() {
    let server = Server::new();

    repo_explorer(&server)
        .args(["--per-page", "0", "list"])
        .assert()
        .failure();
}

#[test]
fn test_browse_quits_on_command() {
    let mut server = Server::new();
    server
        .mock("GET", "/orgs/google/repos")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create();

    repo_explorer(&server)
        .arg("browse")
        .write_stdin(":quit\n")
        .assert()
        .success()
        .stdout(predicates::str::contains(":quit to exit"));
}

#[test]
fn test_browse_piped_query_runs_search_before_exit() {
    let mut server = Server::new();
    server
        .mock("GET", "/orgs/google/repos")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create();
    let search = server
        .mock("GET", "/search/repositories")
        .match_query(Matcher::UrlEncoded("q".into(), "rust".into()))
        .with_status(200)
        .with_body(format!(
            r#"{{"total_count": 1, "items": [{}]}}"#,
            repo_json(3, "rust-lang", "rust", 90000)
        ))
        .create();

    repo_explorer(&server)
        .arg("browse")
        .write_stdin("rust\n")
        .assert()
        .success()
        .stdout(predicates::str::contains("rust-lang/rust"));

    search.assert();
}
