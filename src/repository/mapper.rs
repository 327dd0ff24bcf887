//! Wire records to domain records.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::domain::{Owner, Repository, SearchResult};
use crate::github::api;

/// `yyyy-MM-dd'T'HH:mm:ss'Z'`, tried when RFC 3339 parsing fails.
const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub fn map_repository(repo: api::Repository) -> Repository {
    Repository {
        id: repo.id,
        name: repo.name,
        full_name: repo.full_name,
        description: repo.description,
        html_url: repo.html_url,
        language: repo.language,
        stargazers_count: repo.stargazers_count,
        forks_count: repo.forks_count,
        created_at: repo.created_at.as_deref().and_then(parse_date),
        updated_at: repo.updated_at.as_deref().and_then(parse_date),
        created_at_raw: repo.created_at,
        updated_at_raw: repo.updated_at,
        owner: map_owner(repo.owner),
    }
}

pub fn map_owner(owner: api::Owner) -> Owner {
    Owner {
        id: owner.id,
        login: owner.login,
        avatar_url: owner.avatar_url,
        html_url: owner.html_url,
    }
}

pub fn map_search_response(response: api::SearchResponse) -> SearchResult {
    SearchResult {
        total_count: response.total_count,
        items: response.items.into_iter().map(map_repository).collect(),
    }
}

/// Parses a GitHub timestamp. Returns `None` instead of failing.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw.trim(), FALLBACK_DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};

    fn wire_repository(created_at: Option<&str>) -> api::Repository {
        api::Repository {
            id: 42,
            name: "leveldb".into(),
            full_name: "google/leveldb".into(),
            description: Some("A fast key-value store".into()),
            html_url: "https://github.com/google/leveldb".into(),
            language: Some("C++".into()),
            stargazers_count: 35000,
            forks_count: 7600,
            created_at: created_at.map(String::from),
            updated_at: Some("2024-06-01T12:30:45.123Z".into()),
            owner: api::Owner {
                id: 1342004,
                login: "google".into(),
                avatar_url: "https://avatars.githubusercontent.com/u/1342004".into(),
                html_url: "https://github.com/google".into(),
            },
        }
    }

    #[test]
    fn test_parse_plain_utc_date() {
        let date = parse_date("2023-01-01T00:00:00Z").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let date = parse_date("2024-06-01T12:30:45.123Z").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.second(), 45);
        assert_eq!(date.timestamp_subsec_millis(), 123);
    }

    #[test]
    fn test_parse_offset_is_normalized_to_utc() {
        let date = parse_date("2023-01-01T02:00:00+02:00").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_fallback_pattern_tolerates_padding() {
        let date = parse_date(" 2023-01-01T00:00:00Z ").unwrap();
        assert_eq!(date.day(), 1);
    }

    #[test]
    fn test_parse_malformed_date_is_none() {
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2023-13-45T00:00:00Z"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_map_repository_renames_every_field() {
        let repo = map_repository(wire_repository(Some("2023-01-01T00:00:00Z")));

        assert_eq!(repo.id, 42);
        assert_eq!(repo.name, "leveldb");
        assert_eq!(repo.full_name, "google/leveldb");
        assert_eq!(repo.description.as_deref(), Some("A fast key-value store"));
        assert_eq!(repo.html_url, "https://github.com/google/leveldb");
        assert_eq!(repo.language.as_deref(), Some("C++"));
        assert_eq!(repo.stargazers_count, 35000);
        assert_eq!(repo.forks_count, 7600);
        assert!(repo.created_at.is_some());
        assert!(repo.updated_at.is_some());
        assert_eq!(repo.owner.login, "google");
        assert_eq!(repo.owner.id, 1342004);
    }

    #[test]
    fn test_map_repository_keeps_raw_unparsable_date() {
        let repo = map_repository(wire_repository(Some("not a date")));

        assert_eq!(repo.created_at, None);
        assert_eq!(repo.created_at_raw.as_deref(), Some("not a date"));
    }

    #[test]
    fn test_map_repository_missing_date() {
        let repo = map_repository(wire_repository(None));

        assert_eq!(repo.created_at, None);
        assert_eq!(repo.created_at_raw, None);
    }

    #[test]
    fn test_map_search_response_preserves_order_and_total() {
        let mut second = wire_repository(None);
        second.id = 43;
        second.name = "snappy".into();

        let result = map_search_response(api::SearchResponse {
            total_count: 1200,
            incomplete_results: false,
            items: vec![wire_repository(None), second],
        });

        assert_eq!(result.total_count, 1200);
        let names: Vec<_> = result.items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["leveldb", "snappy"]);
    }
}
