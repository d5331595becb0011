//! HTTP client for the Practicum homework-status endpoint.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::error::{ApiError, Result};

/// Request timeout. Matches the slowest responses the API is known to
/// produce under load; anything beyond this is treated as an outage.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Path of the homework-status listing, relative to the base URL.
const STATUSES_PATH: &str = "homework_statuses/";

/// Error body the API sends alongside non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

/// Client for the Practicum homework review API.
///
/// Holds one pooled HTTP client for the process lifetime; its connections
/// are released when the value is dropped. Cloning is cheap and shares the
/// pool.
#[derive(Debug, Clone)]
pub struct PracticumClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

impl PracticumClient {
    /// Creates a client for the given API base URL and OAuth token.
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, token, REQUEST_TIMEOUT)
    }

    /// Creates a client with a custom request timeout.
    pub fn with_timeout(
        base_url: &str,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        // Url::join treats the last segment as a file unless the base ends
        // with a slash.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let parsed = Url::parse(&normalized).map_err(|e| ApiError::BaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: parsed,
            token: token.into(),
        })
    }

    /// Fetches homework statuses changed since `from_date` (Unix seconds).
    ///
    /// Returns the decoded body as raw JSON; shape validation is the
    /// caller's concern. Fails on transport errors, timeouts, non-success
    /// statuses and unreadable bodies. When the API explains a failure
    /// with a `{code, message}` body, both end up in
    /// [`ApiError::Status`]; otherwise the raw body text is kept.
    pub async fn homework_statuses(&self, from_date: u64) -> Result<Value> {
        let url = self
            .base_url
            .join(STATUSES_PATH)
            .map_err(|e| ApiError::BaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;

        trace!(%url, from_date, "requesting homework statuses");

        let response = self
            .http
            .get(url)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ApiError::Timeout
                } else {
                    ApiError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<ErrorBody>(&text) {
                Ok(body) => ApiError::Status {
                    http_status: status.as_u16(),
                    code: Some(body.code),
                    message: body.message,
                },
                Err(_) => ApiError::Status {
                    http_status: status.as_u16(),
                    code: None,
                    message: text,
                },
            });
        }

        let body = response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout
            } else {
                ApiError::Decode(e.to_string())
            }
        })?;

        debug!(from_date, "homework statuses fetched");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serves one connection with a canned HTTP response and hands the
    /// request bytes back through the channel.
    async fn serve_once(response: String) -> (SocketAddr, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let _ = tx.send(String::from_utf8_lossy(&request).into_owned());
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        (addr, rx)
    }

    fn http_response(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status_line}\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\r\n{body}",
            body.len()
        )
    }

    #[tokio::test]
    async fn test_success_returns_raw_body() {
        let body = r#"{"homeworks": [], "current_date": 1714000000}"#;
        let (addr, _rx) = serve_once(http_response("200 OK", body)).await;

        let client = PracticumClient::new(&format!("http://{addr}"), "token").unwrap();
        let value = client.homework_statuses(0).await.unwrap();

        assert_eq!(value["current_date"], 1_714_000_000u64);
        assert!(value["homeworks"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_request_carries_auth_header_and_from_date() {
        let body = r#"{"homeworks": [], "current_date": 1}"#;
        let (addr, rx) = serve_once(http_response("200 OK", body)).await;

        let client = PracticumClient::new(&format!("http://{addr}"), "secret").unwrap();
        client.homework_statuses(42).await.unwrap();

        let request = rx.await.unwrap();
        assert!(
            request.starts_with("GET /homework_statuses/?from_date=42 HTTP/1.1"),
            "unexpected request line: {request}"
        );
        assert!(
            request.to_lowercase().contains("authorization: oauth secret"),
            "missing auth header: {request}"
        );
    }

    #[tokio::test]
    async fn test_error_body_is_decoded() {
        let body = r#"{"code": "not_authenticated", "message": "credentials rejected"}"#;
        let (addr, _rx) = serve_once(http_response("403 Forbidden", body)).await;

        let client = PracticumClient::new(&format!("http://{addr}"), "bad-token").unwrap();
        let err = client.homework_statuses(0).await.unwrap_err();

        match err {
            ApiError::Status {
                http_status,
                code,
                message,
            } => {
                assert_eq!(http_status, 403);
                assert_eq!(code.as_deref(), Some("not_authenticated"));
                assert_eq!(message, "credentials rejected");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_body_falls_back_to_raw_text() {
        let (addr, _rx) = serve_once(http_response("500 Internal Server Error", "boom")).await;

        let client = PracticumClient::new(&format!("http://{addr}"), "token").unwrap();
        let err = client.homework_statuses(0).await.unwrap_err();

        match err {
            ApiError::Status {
                http_status,
                code,
                message,
            } => {
                assert_eq!(http_status, 500);
                assert_eq!(code, None);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_timeout_maps_to_service_unavailable() {
        // Accept the connection but never answer.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let client = PracticumClient::with_timeout(
            &format!("http://{addr}"),
            "token",
            Duration::from_millis(100),
        )
        .unwrap();
        let err = client.homework_statuses(0).await.unwrap_err();

        assert!(matches!(err, ApiError::Timeout), "got {err:?}");
        assert_eq!(err.http_status(), Some(504));
        assert!(err.to_string().contains("service unavailable"));
    }

    #[tokio::test]
    async fn test_unreadable_success_body() {
        let (addr, _rx) = serve_once(http_response("200 OK", "<html>login page</html>")).await;

        let client = PracticumClient::new(&format!("http://{addr}"), "token").unwrap();
        let err = client.homework_statuses(0).await.unwrap_err();

        assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_connect_failure_is_transport() {
        // Bind and drop to get a port with nothing listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = PracticumClient::new(&format!("http://{addr}"), "token").unwrap();
        let err = client.homework_statuses(0).await.unwrap_err();

        assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
        assert_eq!(err.http_status(), None);
    }

    #[test]
    fn test_rejects_unparseable_base_url() {
        let err = PracticumClient::new("not a url", "token").unwrap_err();
        match err {
            ApiError::BaseUrl { url, .. } => assert_eq!(url, "not a url"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_base_url_slash_is_optional() {
        for base in ["http://example.com/api/v1", "http://example.com/api/v1/"] {
            let client = PracticumClient::new(base, "token").unwrap();
            let joined = client.base_url.join(STATUSES_PATH).unwrap();
            assert_eq!(joined.as_str(), "http://example.com/api/v1/homework_statuses/");
        }
    }
}
