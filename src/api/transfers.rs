//! Transfer resource.

use super::{parse_field, parse_page, ApiClient, ApiError, Page};
use crate::domain::decimal::{parse_scaled, DEFAULT_DECIMAL};
use crate::domain::{DecimalError, Transfer};
use crate::error::AppError;
use serde_json::json;

impl ApiClient {
    /// `POST /transfers`: move value between wallets.
    pub async fn transfer_create(
        &self,
        wallet_from_id: i64,
        wallet_to_id: i64,
        value: i64,
    ) -> Result<i64, ApiError> {
        let payload = self
            .post(
                "/transfers",
                json!({
                    "wallet_from_id": wallet_from_id,
                    "wallet_to_id": wallet_to_id,
                    "value": value,
                }),
            )
            .await?;
        parse_field(&payload, "id")
    }

    /// Parse a user-entered amount and send it. Rejects locally, before any
    /// network call, when the amount has more than two decimal places or is
    /// not positive.
    pub async fn transfer_send(
        &self,
        wallet_from_id: i64,
        wallet_to_id: i64,
        value: &str,
    ) -> Result<i64, AppError> {
        let scaled = parse_scaled(value, DEFAULT_DECIMAL)?;
        if scaled <= 0 {
            return Err(DecimalError::NotPositive.into());
        }
        Ok(self
            .transfer_create(wallet_from_id, wallet_to_id, scaled)
            .await?)
    }

    pub async fn transfer_get(&self, id: i64) -> Result<Transfer, ApiError> {
        let payload = self.get("/transfers", &[("id", id.to_string())]).await?;
        parse_field(&payload, "transfer")
    }

    pub async fn transfer_search(
        &self,
        wallet_id: i64,
        is_sender: bool,
        is_receiver: bool,
        page: i64,
    ) -> Result<Page<Transfer>, ApiError> {
        let payload = self
            .get(
                "/transfers/search",
                &[
                    ("wallet_id", wallet_id.to_string()),
                    ("is_sender", is_sender.to_string()),
                    ("is_receiver", is_receiver.to_string()),
                    ("page", page.to_string()),
                ],
            )
            .await?;
        parse_page(&payload)
    }
}
