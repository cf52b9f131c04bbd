//! Wallet resource.

use super::{parse_field, ApiClient, ApiError};
use crate::domain::Wallet;
use serde_json::json;

impl ApiClient {
    pub async fn wallet_create(&self, name: &str) -> Result<Wallet, ApiError> {
        let payload = self.post("/wallets", json!({"name": name})).await?;
        parse_field(&payload, "wallet")
    }

    pub async fn wallet_get(&self, id: i64) -> Result<Wallet, ApiError> {
        let payload = self.get("/wallets", &[("id", id.to_string())]).await?;
        parse_field(&payload, "wallet")
    }

    pub async fn wallet_list(&self) -> Result<Vec<Wallet>, ApiError> {
        let payload = self.get("/wallets/list", &[]).await?;
        parse_field(&payload, "wallets")
    }

    /// Rename and/or rebind the commission pack.
    pub async fn wallet_update(
        &self,
        id: i64,
        name: Option<&str>,
        commission_pack_id: Option<i64>,
    ) -> Result<(), ApiError> {
        let mut body = serde_json::Map::new();
        body.insert("id".to_string(), json!(id));
        if let Some(name) = name {
            body.insert("name".to_string(), json!(name));
        }
        if let Some(pack) = commission_pack_id {
            body.insert("commission_pack_id".to_string(), json!(pack));
        }
        self.put("/wallets", serde_json::Value::Object(body)).await?;
        Ok(())
    }
}
