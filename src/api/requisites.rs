//! Requisite resource.

use super::{parse_field, parse_page, ApiClient, ApiError, Page};
use crate::domain::{
    NewRequisite, Requisite, RequisiteStateFilter, RequisiteTypeFilter,
};
use crate::error::AppError;
use serde_json::json;

impl ApiClient {
    /// `POST /requisites`: validates the tuple locally first; an invalid
    /// requisite never leaves the client.
    pub async fn requisite_create(&self, new: &NewRequisite) -> Result<i64, AppError> {
        new.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let mut body = json!({
            "type": new.type_,
            "wallet_id": new.wallet_id,
            "currency": new.currency_id,
            "total_currency_value": new.total_currency_value,
            "currency_value_min": new.currency_value_min,
            "currency_value_max": new.currency_value_max,
        });
        if let Some(m) = new.input_method_id {
            body["input_method_id"] = json!(m);
        }
        if let Some(r) = new.output_requisite_data_id {
            body["output_requisite_data_id"] = json!(r);
        }
        if let Some(rate) = new.rate {
            body["rate"] = json!(rate);
        } else {
            body["is_flex"] = json!(true);
        }
        let payload = self.post("/requisites", body).await?;
        Ok(parse_field(&payload, "id")?)
    }

    pub async fn requisite_get(&self, id: i64) -> Result<Requisite, ApiError> {
        let payload = self.get("/requisites", &[("id", id.to_string())]).await?;
        parse_field(&payload, "requisite")
    }

    pub async fn requisite_search(
        &self,
        type_: RequisiteTypeFilter,
        state: RequisiteStateFilter,
        page: i64,
    ) -> Result<Page<Requisite>, ApiError> {
        let mut query: Vec<(&str, String)> = vec![("page", page.to_string())];
        if let Some(t) = type_.as_wire() {
            query.push(("type", t.to_string()));
        }
        if let Some(s) = state.as_wire() {
            query.push(("state", s.to_string()));
        }
        let payload = self.get("/requisites/search", &query).await?;
        parse_page(&payload)
    }
}
