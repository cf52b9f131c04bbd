//! Requisite data resource: the user's named payment destinations.

use super::{parse_field, ApiClient, ApiError};
use crate::domain::RequisiteData;
use serde_json::{json, Value};
use std::collections::HashMap;

impl ApiClient {
    pub async fn requisite_data_create(
        &self,
        name: &str,
        method_id: i64,
        fields: &HashMap<String, Value>,
    ) -> Result<i64, ApiError> {
        let payload = self
            .post(
                "/requisites_datas",
                json!({
                    "name": name,
                    "method_id": method_id,
                    "fields": fields,
                }),
            )
            .await?;
        parse_field(&payload, "id")
    }

    pub async fn requisite_data_get(&self, id: i64) -> Result<RequisiteData, ApiError> {
        let payload = self
            .get("/requisites_datas", &[("id", id.to_string())])
            .await?;
        parse_field(&payload, "requisite_data")
    }

    pub async fn requisite_data_list(&self) -> Result<Vec<RequisiteData>, ApiError> {
        let payload = self.get("/requisites_datas/list", &[]).await?;
        parse_field(&payload, "requisites_datas")
    }

    pub async fn requisite_data_update(
        &self,
        id: i64,
        name: &str,
        fields: &HashMap<String, Value>,
    ) -> Result<(), ApiError> {
        self.put(
            "/requisites_datas",
            json!({"id": id, "name": name, "fields": fields}),
        )
        .await?;
        Ok(())
    }

    pub async fn requisite_data_delete(&self, id: i64) -> Result<(), ApiError> {
        self.delete("/requisites_datas", json!({"id": id})).await?;
        Ok(())
    }
}
