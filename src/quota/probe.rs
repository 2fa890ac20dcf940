//! Quota probe against the search API's rate-limit endpoint.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;

use crate::config::RATE_LIMIT_PATH;
use crate::error_handling::TransportError;
use crate::fetch::is_rate_limited;

use super::{QuotaProbe, QuotaStatus};

/// Longest body excerpt kept in a `TransportError::Status`.
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
struct RateLimitDocument {
    resources: RateLimitResources,
}

#[derive(Debug, Deserialize)]
struct RateLimitResources {
    search: RateLimitBucket,
}

#[derive(Debug, Deserialize)]
struct RateLimitBucket {
    remaining: u64,
    reset: i64,
}

/// Reads the search bucket of `GET /rate_limit`.
///
/// Querying this endpoint does not itself count against the search quota.
pub struct GithubQuotaProbe {
    client: Arc<reqwest::Client>,
    url: String,
}

impl GithubQuotaProbe {
    pub fn new(client: Arc<reqwest::Client>, api_base: &str) -> Self {
        Self {
            client,
            url: format!("{}{}", api_base.trim_end_matches('/'), RATE_LIMIT_PATH),
        }
    }
}

impl QuotaProbe for GithubQuotaProbe {
    async fn probe(&self) -> Result<QuotaStatus, TransportError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();

        if is_rate_limited(status, response.headers()) {
            let quota = QuotaStatus::rate_limited(response.headers(), Utc::now());
            log::debug!(
                "Quota probe rate limited ({}), waiting for {}",
                status,
                quota.resets_at
            );
            return Ok(quota);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let body = response.text().await?;
        let document: RateLimitDocument =
            serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))?;
        let bucket = document.resources.search;

        QuotaStatus::from_epoch(bucket.remaining, bucket.reset).ok_or_else(|| {
            TransportError::Decode(format!("reset timestamp out of range: {}", bucket.reset))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn probe_for(server: &MockServer) -> GithubQuotaProbe {
        GithubQuotaProbe::new(Arc::new(reqwest::Client::new()), &server.uri())
    }

    #[tokio::test]
    async fn test_probe_reads_search_bucket() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rate_limit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resources": {
                    "core": {"remaining": 4999, "reset": 1700000500},
                    "search": {"remaining": 27, "reset": 1700000060}
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let status = probe_for(&server).probe().await.unwrap();
        assert_eq!(status.remaining, 27);
        assert_eq!(status.resets_at.timestamp(), 1_700_000_060);
    }

    #[tokio::test]
    async fn test_probe_rate_limited_uses_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rate_limit"))
            .respond_with(
                ResponseTemplate::new(403)
                    .insert_header("X-RateLimit-Remaining", "0")
                    .insert_header("X-RateLimit-Reset", "1700000100")
                    .set_body_string("{\"message\":\"API rate limit exceeded\"}"),
            )
            .mount(&server)
            .await;

        let status = probe_for(&server).probe().await.unwrap();
        assert!(status.is_exhausted());
        assert_eq!(status.resets_at.timestamp(), 1_700_000_100);
    }

    #[tokio::test]
    async fn test_probe_secondary_limit_without_quota_headers_waits() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rate_limit"))
            .respond_with(
                ResponseTemplate::new(429)
                    .insert_header("Retry-After", "60")
                    .set_body_string(
                        "{\"message\":\"You have exceeded a secondary rate limit\"}",
                    ),
            )
            .mount(&server)
            .await;

        let before = Utc::now();
        let status = probe_for(&server).probe().await.unwrap();
        assert!(status.is_exhausted());
        assert!(status.resets_at >= before + chrono::TimeDelta::seconds(60));
    }

    #[tokio::test]
    async fn test_probe_429_without_any_headers_is_exhausted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rate_limit"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let before = Utc::now();
        let status = probe_for(&server).probe().await.unwrap();
        assert!(status.is_exhausted());
        assert!(status.resets_at >= before);
    }

    #[tokio::test]
    async fn test_probe_forbidden_with_quota_left_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rate_limit"))
            .respond_with(
                ResponseTemplate::new(403)
                    .insert_header("X-RateLimit-Remaining", "59")
                    .insert_header("X-RateLimit-Reset", "1700000100")
                    .set_body_string("{\"message\":\"Bad credentials\"}"),
            )
            .mount(&server)
            .await;

        let err = probe_for(&server).probe().await.unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 403, .. }));
    }

    #[tokio::test]
    async fn test_probe_server_error_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rate_limit"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let err = probe_for(&server).probe().await.unwrap_err();
        match err {
            TransportError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "unavailable");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_probe_unparseable_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rate_limit"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let err = probe_for(&server).probe().await.unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[tokio::test]
    async fn test_probe_unreachable_is_request_error() {
        // Port 1 is reserved and closed on any sane test host
        let probe = GithubQuotaProbe::new(Arc::new(reqwest::Client::new()), "http://127.0.0.1:1");
        let err = probe.probe().await.unwrap_err();
        assert!(matches!(err, TransportError::Request(_)));
    }
}
