//! Request resource.

use super::{parse_field, parse_page, ApiClient, ApiError, Page};
use crate::domain::{Request, RequestType};
use serde_json::json;

/// Which amount drives the sizing of a new request.
///
/// Each request shape accepts two of these; the server recomputes all other
/// monetary fields from the chosen driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestDriver {
    InputCurrencyValue(i64),
    InputValue(i64),
    OutputValue(i64),
    OutputCurrencyValue(i64),
}

impl RequestDriver {
    fn wire_name(&self) -> &'static str {
        match self {
            RequestDriver::InputCurrencyValue(_) => "input_currency_value",
            RequestDriver::InputValue(_) => "input_value",
            RequestDriver::OutputValue(_) => "output_value",
            RequestDriver::OutputCurrencyValue(_) => "output_currency_value",
        }
    }

    fn amount(&self) -> i64 {
        match self {
            RequestDriver::InputCurrencyValue(v)
            | RequestDriver::InputValue(v)
            | RequestDriver::OutputValue(v)
            | RequestDriver::OutputCurrencyValue(v) => *v,
        }
    }
}

/// Filters for request search; all optional.
#[derive(Debug, Clone, Default)]
pub struct RequestSearch {
    pub is_completed: bool,
    pub is_canceled: bool,
    pub is_partner: bool,
    pub page: Option<i64>,
}

impl ApiClient {
    /// `POST /requests`: submit sizing; the server creates the request in
    /// `loading` and advances it from there.
    #[allow(clippy::too_many_arguments)]
    pub async fn request_create(
        &self,
        wallet_id: i64,
        type_: RequestType,
        input_method_id: Option<i64>,
        output_requisite_data_id: Option<i64>,
        rate_fixed: bool,
        driver: RequestDriver,
    ) -> Result<i64, ApiError> {
        let mut body = json!({
            "wallet_id": wallet_id,
            "type": type_,
            "rate_fixed": rate_fixed,
        });
        body[driver.wire_name()] = json!(driver.amount());
        if let Some(m) = input_method_id {
            body["input_method_id"] = json!(m);
        }
        if let Some(r) = output_requisite_data_id {
            body["output_requisite_data_id"] = json!(r);
        }
        let payload = self.post("/requests", body).await?;
        parse_field(&payload, "id")
    }

    pub async fn request_get(&self, id: i64) -> Result<Request, ApiError> {
        let payload = self.get("/requests", &[("id", id.to_string())]).await?;
        parse_field(&payload, "request")
    }

    pub async fn request_search(&self, search: &RequestSearch) -> Result<Page<Request>, ApiError> {
        let payload = self
            .get(
                "/requests/search",
                &[
                    ("is_completed", search.is_completed.to_string()),
                    ("is_canceled", search.is_canceled.to_string()),
                    ("is_partner", search.is_partner.to_string()),
                    ("page", search.page.unwrap_or(1).to_string()),
                ],
            )
            .await?;
        parse_page(&payload)
    }

    pub async fn request_update_name(&self, id: i64, name: &str) -> Result<(), ApiError> {
        self.put("/requests/updates/name", json!({"id": id, "name": name}))
            .await?;
        Ok(())
    }

    /// The single client-driven lifecycle action: confirm a request sitting
    /// in `confirmation`; success advances it to `input_reservation`.
    pub async fn request_update_confirmation(&self, id: i64) -> Result<(), ApiError> {
        self.post("/requests/updates/confirmation", json!({"id": id}))
            .await?;
        Ok(())
    }
}
