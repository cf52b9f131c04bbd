//! Order resource.

use super::{parse_field, parse_page, ApiClient, ApiError, Page};
use crate::domain::{FieldValue, Order};
use crate::engine::fields::fields_payload;
use serde_json::{json, Value};
use std::collections::HashMap;

impl ApiClient {
    pub async fn order_get(&self, id: i64) -> Result<Order, ApiError> {
        let payload = self.get("/orders", &[("id", id.to_string())]).await?;
        parse_field(&payload, "order")
    }

    pub async fn order_list_by_request(
        &self,
        request_id: i64,
        page: i64,
    ) -> Result<Page<Order>, ApiError> {
        let payload = self
            .get(
                "/orders/list/by_request",
                &[
                    ("request_id", request_id.to_string()),
                    ("page", page.to_string()),
                ],
            )
            .await?;
        parse_page(&payload)
    }

    pub async fn order_list_by_requisite(
        &self,
        requisite_id: i64,
        page: i64,
    ) -> Result<Page<Order>, ApiError> {
        let payload = self
            .get(
                "/orders/list/by_requisite",
                &[
                    ("requisite_id", requisite_id.to_string()),
                    ("page", page.to_string()),
                ],
            )
            .await?;
        parse_page(&payload)
    }

    /// Orders needing attention across the whole account.
    pub async fn order_list_main(&self, page: i64) -> Result<Page<Order>, ApiError> {
        let payload = self
            .get("/orders/list/main", &[("page", page.to_string())])
            .await?;
        parse_page(&payload)
    }

    /// `POST /orders/updates/confirmation`: submit collected input fields.
    ///
    /// Callers validate via [`collect_fields`](crate::engine::fields::collect_fields)
    /// first; image values are upload-batch keys.
    pub async fn order_update_confirmation(
        &self,
        id: i64,
        input_fields: &HashMap<String, FieldValue>,
    ) -> Result<(), ApiError> {
        self.post(
            "/orders/updates/confirmation",
            json!({
                "id": id,
                "input_fields": Value::Object(fields_payload(input_fields)),
            }),
        )
        .await?;
        Ok(())
    }

    /// `POST /orders/updates/completed`: accepted server-side only while
    /// the order is in `confirmation`.
    pub async fn order_update_completed(&self, id: i64) -> Result<(), ApiError> {
        self.post("/orders/updates/completed", json!({"id": id}))
            .await?;
        Ok(())
    }

    /// Mark the order's chat as read.
    pub async fn order_chat_read(&self, id: i64) -> Result<(), ApiError> {
        self.post("/orders/updates/chat_read", json!({"id": id}))
            .await?;
        Ok(())
    }
}
