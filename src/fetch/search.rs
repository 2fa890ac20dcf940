//! Repository search fetcher.

use std::sync::Arc;

use crate::config::{SEARCH_PATH, SEARCH_QUALIFIER};
use crate::error_handling::{describe_reqwest_error, FailureReason};

use super::classify::classify_response;
use super::{FetchOutcome, ItemFetcher};

/// Builds the `q` parameter for one term.
///
/// Terms containing whitespace are quoted, otherwise the search treats the
/// second word as a free-text keyword (`language:Visual Basic` would match
/// any Visual-language repository mentioning "Basic").
pub fn search_query(term: &str) -> String {
    if term.chars().any(char::is_whitespace) {
        format!("{}:\"{}\"", SEARCH_QUALIFIER, term)
    } else {
        format!("{}:{}", SEARCH_QUALIFIER, term)
    }
}

/// Counts repositories per term via `GET /search/repositories`.
///
/// Only `total_count` and `incomplete_results` are read from the body.
pub struct SearchFetcher {
    client: Arc<reqwest::Client>,
    url: String,
}

impl SearchFetcher {
    pub fn new(client: Arc<reqwest::Client>, api_base: &str) -> Self {
        Self {
            client,
            url: format!("{}{}", api_base.trim_end_matches('/'), SEARCH_PATH),
        }
    }
}

impl ItemFetcher for SearchFetcher {
    async fn fetch(&self, item: &str) -> FetchOutcome {
        let query = search_query(item);
        let response = match self
            .client
            .get(&self.url)
            .query(&[("q", query.as_str())])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                log::debug!("Search for {} failed: {} ({})", item, describe_reqwest_error(&e), e);
                return FetchOutcome::failure(FailureReason::Other);
            }
        };

        let status = response.status();
        let headers = response.headers().clone();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                log::debug!(
                    "Reading search body for {} failed: {}",
                    item,
                    describe_reqwest_error(&e)
                );
                return FetchOutcome::failure(FailureReason::Other);
            }
        };

        let outcome = classify_response(status, &headers, &body);
        log::debug!("Search for {} ({}) -> {:?}", item, status, outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher_for(server: &MockServer) -> SearchFetcher {
        SearchFetcher::new(Arc::new(reqwest::Client::new()), &server.uri())
    }

    #[test]
    fn test_search_query_plain_term() {
        assert_eq!(search_query("Rust"), "language:Rust");
        assert_eq!(search_query("C++"), "language:C++");
    }

    #[test]
    fn test_search_query_quotes_whitespace() {
        assert_eq!(search_query("Visual Basic"), "language:\"Visual Basic\"");
    }

    #[tokio::test]
    async fn test_fetch_sends_language_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .and(query_param("q", "language:Rust"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_count": 80,
                "incomplete_results": false,
                "items": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = fetcher_for(&server).fetch("Rust").await;
        assert_eq!(outcome, FetchOutcome::success(80));
    }

    #[tokio::test]
    async fn test_fetch_encodes_special_characters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .and(query_param("q", "language:C#"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total_count": 3})))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = fetcher_for(&server).fetch("C#").await;
        assert_eq!(outcome, FetchOutcome::success(3));
    }

    #[tokio::test]
    async fn test_fetch_client_default_headers_are_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .and(header("authorization", "token t0k3n"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total_count": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let client = crate::initialization::init_client(&crate::Config::default(), "t0k3n").unwrap();
        let fetcher = SearchFetcher::new(client, &server.uri());
        assert_eq!(fetcher.fetch("Go").await, FetchOutcome::success(1));
    }

    #[tokio::test]
    async fn test_fetch_rate_limited_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .respond_with(
                ResponseTemplate::new(403)
                    .insert_header("X-RateLimit-Remaining", "0")
                    .insert_header("X-RateLimit-Reset", "1700000000"),
            )
            .mount(&server)
            .await;

        let outcome = fetcher_for(&server).fetch("Go").await;
        assert_eq!(outcome, FetchOutcome::failure(FailureReason::RateLimited));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_is_other() {
        let fetcher = SearchFetcher::new(Arc::new(reqwest::Client::new()), "http://127.0.0.1:1");
        let outcome = fetcher.fetch("Go").await;
        assert_eq!(outcome, FetchOutcome::failure(FailureReason::Other));
    }
}
