//! Session creation.

use super::{parse_field, ApiClient, ApiError};
use serde_json::json;

impl ApiClient {
    /// `POST /sessions`: exchange credentials for a session token.
    ///
    /// The caller decides whether to store the token; this call does not
    /// mutate the client's own token.
    pub async fn session_create(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let payload = self
            .post(
                "/sessions",
                json!({"username": username, "password": password}),
            )
            .await?;
        parse_field(&payload, "token")
    }
}
