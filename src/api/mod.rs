//! Typed HTTP surface over the Finance Express API.
//!
//! Every response uses one envelope: `{state: "successful"|"error", code?,
//! message?, kwargs?, ...payload}`. Envelope handling lives in free
//! functions over `serde_json::Value` so it is testable without a network.

use crate::config::Config;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::RwLock;
use thiserror::Error;
use tracing::debug;

pub mod accounts;
pub mod files;
pub mod messages;
pub mod orders;
pub mod reference;
pub mod requests;
pub mod requisite_data;
pub mod requisites;
pub mod sessions;
pub mod transfers;
pub mod wallets;

/// Structured failure from the API envelope. `code` is opaque; the UI
/// resolves it to text via `gtv("error_<code>")` formatted with `kwargs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub code: i64,
    pub message: String,
    pub kwargs: serde_json::Map<String, Value>,
}

impl ApiFailure {
    pub fn text_key(&self) -> String {
        format!("error_{}", self.code)
    }
}

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("api error {}: {}", .0.code, .0.message)]
    Envelope(ApiFailure),
    #[error("unauthorized")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    #[error("http error {status}")]
    Http { status: u16 },
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Strip and check the response envelope, returning the payload object.
pub fn parse_envelope(v: Value) -> Result<Value, ApiError> {
    let state = v
        .get("state")
        .and_then(|s| s.as_str())
        .ok_or_else(|| ApiError::Parse("missing state field".to_string()))?;
    match state {
        "successful" => Ok(v),
        "error" => {
            let code = v.get("code").and_then(|c| c.as_i64()).unwrap_or(0);
            let message = v
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or_default()
                .to_string();
            let kwargs = v
                .get("kwargs")
                .and_then(|k| k.as_object())
                .cloned()
                .unwrap_or_default();
            Err(ApiError::Envelope(ApiFailure {
                code,
                message,
                kwargs,
            }))
        }
        other => Err(ApiError::Parse(format!("unknown state: {}", other))),
    }
}

/// One page of a list/search response. `page` arguments are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pages: i64,
}

/// Pull `{items, pages}` out of an envelope payload.
pub fn parse_page<T: DeserializeOwned>(payload: &Value) -> Result<Page<T>, ApiError> {
    let items = payload
        .get("items")
        .and_then(|i| i.as_array())
        .ok_or_else(|| ApiError::Parse("missing items field".to_string()))?;
    let pages = payload.get("pages").and_then(|p| p.as_i64()).unwrap_or(1);
    let items = items
        .iter()
        .map(|v| serde_json::from_value(v.clone()).map_err(|e| ApiError::Parse(e.to_string())))
        .collect::<Result<Vec<T>, _>>()?;
    Ok(Page { items, pages })
}

/// Deserialize one named object out of an envelope payload.
pub fn parse_field<T: DeserializeOwned>(payload: &Value, field: &str) -> Result<T, ApiError> {
    let v = payload
        .get(field)
        .ok_or_else(|| ApiError::Parse(format!("missing {} field", field)))?;
    serde_json::from_value(v.clone()).map_err(|e| ApiError::Parse(e.to_string()))
}

/// The one HTTP client shared by every resource module.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: RwLock::new(None),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_url())
    }

    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut t) = self.token.write() {
            *t = token;
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(&self, req: reqwest::RequestBuilder) -> Result<Value, ApiError> {
        let req = match self.token() {
            Some(token) => req.header("Token", token),
            None => req,
        };
        let response = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        if status.as_u16() == 401 {
            return Err(ApiError::Unauthorized);
        }
        if status.as_u16() == 404 {
            return Err(ApiError::NotFound);
        }
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }
        let body = response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        parse_envelope(body)
    }

    pub(crate) async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, ApiError> {
        debug!("GET {} {:?}", path, query);
        self.execute(self.http.get(self.url(path)).query(query)).await
    }

    pub(crate) async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        debug!("POST {}", path);
        self.execute(self.http.post(self.url(path)).json(&body)).await
    }

    pub(crate) async fn put(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        debug!("PUT {}", path);
        self.execute(self.http.put(self.url(path)).json(&body)).await
    }

    pub(crate) async fn delete(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        debug!("DELETE {}", path);
        self.execute(self.http.delete(self.url(path)).json(&body)).await
    }

    /// Raw bytes fetch, used only by `files.images.get`.
    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }
        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| ApiError::Network(e.to_string()))
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("has_token", &self.token().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_envelope_successful() {
        let v = json!({"state": "successful", "wallet": {"id": 7}});
        let payload = parse_envelope(v).unwrap();
        assert_eq!(payload["wallet"]["id"], 7);
    }

    #[test]
    fn test_parse_envelope_error() {
        let v = json!({
            "state": "error",
            "code": 1021,
            "message": "username taken",
            "kwargs": {"username": "bob"}
        });
        match parse_envelope(v) {
            Err(ApiError::Envelope(f)) => {
                assert_eq!(f.code, 1021);
                assert_eq!(f.message, "username taken");
                assert_eq!(f.kwargs["username"], "bob");
                assert_eq!(f.text_key(), "error_1021");
            }
            other => panic!("expected envelope error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_envelope_malformed() {
        assert!(matches!(
            parse_envelope(json!({"ok": true})),
            Err(ApiError::Parse(_))
        ));
        assert!(matches!(
            parse_envelope(json!({"state": "weird"})),
            Err(ApiError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_page() {
        let payload = json!({"state": "successful", "items": [1, 2, 3], "pages": 4});
        let page: Page<i64> = parse_page(&payload).unwrap();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.pages, 4);
    }

    #[test]
    fn test_parse_page_defaults_pages() {
        let payload = json!({"items": []});
        let page: Page<i64> = parse_page(&payload).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.pages, 1);
    }

    #[test]
    fn test_parse_field() {
        let payload = json!({"token": "abc"});
        let token: String = parse_field(&payload, "token").unwrap();
        assert_eq!(token, "abc");
        assert!(matches!(
            parse_field::<String>(&payload, "missing"),
            Err(ApiError::Parse(_))
        ));
    }

    #[test]
    fn test_token_roundtrip() {
        let client = ApiClient::new("http://localhost");
        assert_eq!(client.token(), None);
        client.set_token(Some("t1".to_string()));
        assert_eq!(client.token(), Some("t1".to_string()));
        client.set_token(None);
        assert_eq!(client.token(), None);
    }
}
