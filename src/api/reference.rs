//! Read-only reference data: currencies, methods, countries, languages,
//! timezones, commission packs and the localized text pack. Admin mutation
//! of these lives elsewhere; the client only lists.

use super::{parse_field, ApiClient, ApiError};
use crate::domain::{CommissionPack, Country, Currency, Language, Method, Timezone};
use std::collections::HashMap;

impl ApiClient {
    pub async fn currency_get(&self, id_str: &str) -> Result<Currency, ApiError> {
        let payload = self
            .get("/currencies", &[("id_str", id_str.to_string())])
            .await?;
        parse_field(&payload, "currency")
    }

    pub async fn currency_list(&self) -> Result<Vec<Currency>, ApiError> {
        let payload = self.get("/currencies/list", &[]).await?;
        parse_field(&payload, "currencies")
    }

    pub async fn method_get(&self, id: i64) -> Result<Method, ApiError> {
        let payload = self.get("/methods", &[("id", id.to_string())]).await?;
        parse_field(&payload, "method")
    }

    pub async fn method_list(&self) -> Result<Vec<Method>, ApiError> {
        let payload = self.get("/methods/list", &[]).await?;
        parse_field(&payload, "methods")
    }

    pub async fn commission_pack_list(&self) -> Result<Vec<CommissionPack>, ApiError> {
        let payload = self.get("/commissions_packs/list", &[]).await?;
        parse_field(&payload, "commissions_packs")
    }

    pub async fn country_list(&self) -> Result<Vec<Country>, ApiError> {
        let payload = self.get("/countries/list", &[]).await?;
        parse_field(&payload, "countries")
    }

    pub async fn language_list(&self) -> Result<Vec<Language>, ApiError> {
        let payload = self.get("/languages/list", &[]).await?;
        parse_field(&payload, "languages")
    }

    pub async fn timezone_list(&self) -> Result<Vec<Timezone>, ApiError> {
        let payload = self.get("/timezones/list", &[]).await?;
        parse_field(&payload, "timezones")
    }

    /// Full localized text pack for one language.
    pub async fn text_pack_get(&self, language: &str) -> Result<HashMap<String, String>, ApiError> {
        let payload = self
            .get("/texts/packs", &[("language", language.to_string())])
            .await?;
        parse_field(&payload, "texts")
    }
}
