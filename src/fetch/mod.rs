//! HTTP plumbing shared by the service clients.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use reqwest::{Method, Request};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::ClientError;

/// Builds a request accepting JSON, with `body` serialized as JSON if given.
pub fn json_request<B: Serialize + ?Sized>(
    method: Method,
    url: &str,
    body: Option<&B>,
) -> Result<Request, ClientError> {
    let url: reqwest::Url = url
        .parse()
        .map_err(|_| ClientError::InvalidUrl(url.to_string()))?;
    let mut req = Request::new(method, url);
    req.headers_mut()
        .insert(ACCEPT, HeaderValue::from_static("application/json"));

    if let Some(body) = body {
        req.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        *req.body_mut() = Some(serde_json::to_vec(body)?.into());
    }

    Ok(req)
}

/// Sends `req` and decodes a JSON success body.
///
/// A non-success status becomes [`ClientError::Service`] carrying the
/// service's own message, or `fallback_message` when it sent none.
pub async fn execute_json<C: HttpClient, T: DeserializeOwned>(
    client: &C,
    req: Request,
    fallback_message: &str,
) -> Result<T, ClientError> {
    let method = req.method().clone();
    let url = req.url().to_string();

    let resp = client.execute(req).await?;
    let status = resp.status();
    let body = resp.bytes().await?;
    debug!(%method, %url, status = status.as_u16(), bytes = body.len(), "Response received");

    if !status.is_success() {
        let message = error_message(&body, fallback_message);
        warn!(%method, %url, status = status.as_u16(), %message, "Service returned an error");
        return Err(ClientError::Service {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_slice(&body)?)
}

/// Pulls a human-readable message out of an error body: the `detail` field
/// when the body is JSON, else the raw text, else `fallback`.
pub fn error_message(body: &[u8], fallback: &str) -> String {
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(body) {
        match json.get("detail") {
            Some(serde_json::Value::String(detail)) => return detail.clone(),
            Some(detail) if !detail.is_null() => return detail.to_string(),
            _ => {}
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        fallback.to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_uses_detail() {
        let body = br#"{"detail": "Need at least 2 valid locations"}"#;
        assert_eq!(error_message(body, "fallback"), "Need at least 2 valid locations");
    }

    #[test]
    fn test_error_message_structured_detail() {
        let body = br#"{"detail": [{"msg": "field required"}]}"#;
        assert_eq!(error_message(body, "fallback"), r#"[{"msg":"field required"}]"#);
    }

    #[test]
    fn test_error_message_plain_text_and_empty() {
        assert_eq!(error_message(b"Bad Gateway", "fallback"), "Bad Gateway");
        assert_eq!(error_message(b"  ", "fallback"), "fallback");
        assert_eq!(error_message(br#"{"error": "x"}"#, "fallback"), r#"{"error": "x"}"#);
    }

    #[test]
    fn test_json_request_sets_body_and_headers() {
        let req = json_request(
            Method::POST,
            "http://localhost:8000/api/x",
            Some(&serde_json::json!({"a": 1})),
        )
        .unwrap();
        assert_eq!(req.method(), Method::POST);
        assert_eq!(req.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(req.body().and_then(|b| b.as_bytes()), Some(&br#"{"a":1}"#[..]));
    }

    #[test]
    fn test_json_request_rejects_bad_url() {
        let err = json_request::<()>(Method::GET, "not a url", None).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }
}
