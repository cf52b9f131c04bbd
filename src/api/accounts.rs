//! Account resource: profile, contacts, client texts, notifications, roles.

use super::{parse_field, parse_page, ApiClient, ApiError, Page};
use crate::domain::Account;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A saved contact of the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub contact_id: i64,
    pub value: String,
}

/// A per-client text override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientText {
    pub id: i64,
    pub key: String,
    pub value: String,
}

/// Flat notification flags as the server stores them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NotificationFlags {
    pub is_active: bool,
    pub is_system: bool,
    pub is_system_email: bool,
    pub is_system_telegram: bool,
    pub is_system_push: bool,
    pub is_request: bool,
    pub is_request_email: bool,
    pub is_request_telegram: bool,
    pub is_request_push: bool,
    pub is_requisite: bool,
    pub is_requisite_email: bool,
    pub is_requisite_telegram: bool,
    pub is_requisite_push: bool,
    pub is_order: bool,
    pub is_order_email: bool,
    pub is_order_telegram: bool,
    pub is_order_push: bool,
    pub is_chat: bool,
    pub is_chat_email: bool,
    pub is_chat_telegram: bool,
    pub is_chat_push: bool,
}

impl ApiClient {
    /// `GET /accounts`: the authenticated account.
    pub async fn account_get(&self) -> Result<Account, ApiError> {
        let payload = self.get("/accounts", &[]).await?;
        parse_field(&payload, "account")
    }

    /// `POST /accounts`: register.
    #[allow(clippy::too_many_arguments)]
    pub async fn account_create(
        &self,
        username: &str,
        password: &str,
        firstname: &str,
        lastname: &str,
        country: &str,
        language: &str,
        timezone: &str,
    ) -> Result<(), ApiError> {
        self.post(
            "/accounts",
            json!({
                "username": username,
                "password": password,
                "firstname": firstname,
                "lastname": lastname,
                "country": country,
                "language": language,
                "timezone": timezone,
            }),
        )
        .await?;
        Ok(())
    }

    /// `PUT /accounts`: update profile fields.
    pub async fn account_update(&self, fields: Value) -> Result<(), ApiError> {
        self.put("/accounts", fields).await?;
        Ok(())
    }

    pub async fn account_check_username(&self, username: &str) -> Result<(), ApiError> {
        self.get("/accounts/check/username", &[("username", username.to_string())])
            .await?;
        Ok(())
    }

    pub async fn account_check_password(&self, password: &str) -> Result<(), ApiError> {
        self.post("/accounts/check/password", json!({"password": password}))
            .await?;
        Ok(())
    }

    pub async fn account_change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        self.post(
            "/accounts/change/password",
            json!({
                "current_password": current_password,
                "new_password": new_password,
            }),
        )
        .await?;
        Ok(())
    }

    pub async fn contact_create(&self, contact_id: i64, value: &str) -> Result<i64, ApiError> {
        let payload = self
            .post(
                "/accounts/contacts",
                json!({"contact_id": contact_id, "value": value}),
            )
            .await?;
        parse_field(&payload, "id")
    }

    pub async fn contact_update(&self, id: i64, value: &str) -> Result<(), ApiError> {
        self.put("/accounts/contacts", json!({"id": id, "value": value}))
            .await?;
        Ok(())
    }

    pub async fn contact_delete(&self, id: i64) -> Result<(), ApiError> {
        self.delete("/accounts/contacts", json!({"id": id})).await?;
        Ok(())
    }

    pub async fn contact_list(&self) -> Result<Page<Contact>, ApiError> {
        let payload = self.get("/accounts/contacts/list", &[]).await?;
        parse_page(&payload)
    }

    pub async fn client_text_create(&self, key: &str, value: &str) -> Result<i64, ApiError> {
        let payload = self
            .post(
                "/accounts/clients_texts",
                json!({"key": key, "value": value}),
            )
            .await?;
        parse_field(&payload, "id")
    }

    pub async fn client_text_update(&self, id: i64, value: &str) -> Result<(), ApiError> {
        self.put("/accounts/clients_texts", json!({"id": id, "value": value}))
            .await?;
        Ok(())
    }

    pub async fn client_text_delete(&self, id: i64) -> Result<(), ApiError> {
        self.delete("/accounts/clients_texts", json!({"id": id}))
            .await?;
        Ok(())
    }

    pub async fn client_text_list(&self) -> Result<Page<ClientText>, ApiError> {
        let payload = self.get("/accounts/clients_texts/list", &[]).await?;
        parse_page(&payload)
    }

    /// `GET /accounts/notifications`: current flags.
    pub async fn notification_get(&self) -> Result<NotificationFlags, ApiError> {
        let payload = self.get("/accounts/notifications", &[]).await?;
        parse_field(&payload, "notification")
    }

    /// `POST /accounts/notifications/updates/settings`: one batched write
    /// of every flag, sent only on explicit confirm.
    pub async fn notification_update_settings(
        &self,
        flags: &NotificationFlags,
    ) -> Result<(), ApiError> {
        let body = serde_json::to_value(flags)
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        self.post("/accounts/notifications/updates/settings", body)
            .await?;
        Ok(())
    }

    /// `POST /accounts/notifications/updates/code`: telegram binding url.
    pub async fn notification_update_code(&self) -> Result<String, ApiError> {
        let payload = self
            .post("/accounts/notifications/updates/code", json!({}))
            .await?;
        parse_field(&payload, "url")
    }

    pub async fn role_create(&self, account_id: i64, role_id: i64) -> Result<(), ApiError> {
        self.post(
            "/accounts/roles",
            json!({"account_id": account_id, "role_id": role_id}),
        )
        .await?;
        Ok(())
    }

    pub async fn role_get(&self, account_id: i64) -> Result<Vec<String>, ApiError> {
        let payload = self
            .get("/accounts/roles", &[("account_id", account_id.to_string())])
            .await?;
        parse_field(&payload, "roles")
    }

    pub async fn role_delete(&self, account_id: i64, role_id: i64) -> Result<(), ApiError> {
        self.delete(
            "/accounts/roles",
            json!({"account_id": account_id, "role_id": role_id}),
        )
        .await?;
        Ok(())
    }
}
