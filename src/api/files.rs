//! File upload keys and image retrieval.
//!
//! Binary uploads never pass through the main API. The client creates a
//! key, the user uploads out-of-band to the returned url, and a per-key
//! websocket (see [`transport::files`](crate::transport::files)) reports
//! the uploaded set.

use super::{parse_field, ApiClient, ApiError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A freshly created upload slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileKey {
    pub key: String,
    /// Opaque browser-usable multipart upload url.
    pub url: String,
}

/// One uploaded file as the server enumerates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFile {
    pub filename: String,
    pub extension: String,
    /// Opaque encoded content; core state keeps the key, not these bytes.
    #[serde(default)]
    pub value: String,
    pub open_url: Option<String>,
    pub download_url: Option<String>,
}

/// Parse a `{key, files: [...]}` object, shared with the file websocket.
pub fn parse_file_batch(v: &Value) -> Result<(String, Vec<RemoteFile>), ApiError> {
    let key = v
        .get("key")
        .and_then(|k| k.as_str())
        .ok_or_else(|| ApiError::Parse("missing key field".to_string()))?
        .to_string();
    let files = v
        .get("files")
        .and_then(|f| f.as_array())
        .map(|arr| {
            arr.iter()
                .map(|f| {
                    serde_json::from_value(f.clone()).map_err(|e| ApiError::Parse(e.to_string()))
                })
                .collect::<Result<Vec<RemoteFile>, _>>()
        })
        .transpose()?
        .unwrap_or_default();
    Ok((key, files))
}

impl ApiClient {
    /// `POST /files/keys`: create an upload slot.
    pub async fn file_key_create(&self) -> Result<FileKey, ApiError> {
        let payload = self.post("/files/keys", json!({})).await?;
        let key = parse_field(&payload, "key")?;
        let url = parse_field(&payload, "url")?;
        Ok(FileKey { key, url })
    }

    /// `GET /files/keys`: files currently uploaded under a key.
    pub async fn file_key_get(&self, key: &str) -> Result<Vec<RemoteFile>, ApiError> {
        let payload = self.get("/files/keys", &[("key", key.to_string())]).await?;
        let (_, files) = parse_file_batch(&payload)?;
        Ok(files)
    }

    /// `GET /files/images/<id>`: raw image bytes.
    pub async fn image_get(&self, id_str: &str) -> Result<Vec<u8>, ApiError> {
        self.get_bytes(&format!("/files/images/{}", id_str)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_batch() {
        let v = json!({
            "key": "K1",
            "files": [
                {"filename": "receipt", "extension": "png", "open_url": null, "download_url": null}
            ]
        });
        let (key, files) = parse_file_batch(&v).unwrap();
        assert_eq!(key, "K1");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].filename, "receipt");
        assert_eq!(files[0].value, "");
    }

    #[test]
    fn test_parse_file_batch_empty_files() {
        let v = json!({"key": "K1"});
        let (key, files) = parse_file_batch(&v).unwrap();
        assert_eq!(key, "K1");
        assert!(files.is_empty());
    }

    #[test]
    fn test_parse_file_batch_missing_key() {
        assert!(parse_file_batch(&json!({"files": []})).is_err());
    }
}
