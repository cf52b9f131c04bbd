//! Requisite entity: capacity a user posts to service other users' requests.

use crate::domain::currency::{FieldKind, Method};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Direction of a requisite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequisiteType {
    Input,
    Output,
}

/// Lifecycle state of a requisite. Transitions are server-driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequisiteState {
    Enable,
    Stop,
    Disable,
}

/// A user-defined named payment destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequisiteData {
    pub id: i64,
    pub name: String,
    pub method: Method,
    pub fields: HashMap<String, serde_json::Value>,
}

impl RequisiteData {
    /// Every non-optional schema field of the method must be present.
    pub fn is_complete(&self) -> bool {
        self.method
            .schema_fields
            .iter()
            .filter(|f| !f.optional)
            .all(|f| self.fields.contains_key(&f.key))
    }

    /// Schema fields never carry images; values are str or int only.
    pub fn values_conform(&self) -> bool {
        self.method.schema_fields.iter().all(|spec| {
            match self.fields.get(&spec.key) {
                None => spec.optional,
                Some(v) => match spec.kind {
                    FieldKind::Int => v.is_i64(),
                    FieldKind::Str => v.is_string(),
                    FieldKind::Image => false,
                },
            }
        })
    }
}

/// A requisite snapshot as reported by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requisite {
    pub id: i64,
    #[serde(rename = "type")]
    pub type_: RequisiteType,
    pub state: RequisiteState,
    pub wallet_id: i64,
    pub input_method: Option<Method>,
    pub output_requisite_data_id: Option<i64>,
    pub currency_value: i64,
    pub total_currency_value: i64,
    pub currency_value_min: i64,
    pub currency_value_max: i64,
    pub value: i64,
    pub total_value: i64,
    pub value_min: i64,
    pub value_max: i64,
    pub rate: i64,
    pub is_flex: bool,
}

impl Requisite {
    /// Remaining capacity never exceeds the posted total.
    pub fn is_consistent(&self) -> bool {
        self.currency_value <= self.total_currency_value
            && self.currency_value_min <= self.currency_value_max
    }
}

/// Client-side view of a requisite about to be created.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRequisite {
    pub type_: RequisiteType,
    pub wallet_id: i64,
    pub input_method_id: Option<i64>,
    pub output_requisite_data_id: Option<i64>,
    pub currency_id: String,
    pub total_currency_value: i64,
    pub currency_value_min: i64,
    pub currency_value_max: i64,
    /// None means the rate floats with the market.
    pub rate: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequisiteValidationError {
    #[error("input requisite requires an input method")]
    MissingInputMethod,
    #[error("output requisite requires requisite data")]
    MissingRequisiteData,
    #[error("minimum exceeds maximum")]
    MinAboveMax,
    #[error("total capacity must be positive")]
    EmptyCapacity,
}

impl NewRequisite {
    /// Invariants checked before the create call leaves the client.
    pub fn validate(&self) -> Result<(), RequisiteValidationError> {
        match self.type_ {
            RequisiteType::Input if self.input_method_id.is_none() => {
                return Err(RequisiteValidationError::MissingInputMethod)
            }
            RequisiteType::Output if self.output_requisite_data_id.is_none() => {
                return Err(RequisiteValidationError::MissingRequisiteData)
            }
            _ => {}
        }
        if self.currency_value_min > self.currency_value_max {
            return Err(RequisiteValidationError::MinAboveMax);
        }
        if self.total_currency_value <= 0 {
            return Err(RequisiteValidationError::EmptyCapacity);
        }
        Ok(())
    }
}

/// Type filter for requisite search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequisiteTypeFilter {
    Input,
    Output,
    #[default]
    All,
}

impl RequisiteTypeFilter {
    pub fn matches(&self, t: RequisiteType) -> bool {
        match self {
            RequisiteTypeFilter::Input => t == RequisiteType::Input,
            RequisiteTypeFilter::Output => t == RequisiteType::Output,
            RequisiteTypeFilter::All => true,
        }
    }

    pub fn as_wire(&self) -> Option<&'static str> {
        match self {
            RequisiteTypeFilter::Input => Some("input"),
            RequisiteTypeFilter::Output => Some("output"),
            RequisiteTypeFilter::All => None,
        }
    }
}

/// State filter for requisite search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequisiteStateFilter {
    Enable,
    Stop,
    Disable,
    #[default]
    All,
}

impl RequisiteStateFilter {
    pub fn matches(&self, s: RequisiteState) -> bool {
        match self {
            RequisiteStateFilter::Enable => s == RequisiteState::Enable,
            RequisiteStateFilter::Stop => s == RequisiteState::Stop,
            RequisiteStateFilter::Disable => s == RequisiteState::Disable,
            RequisiteStateFilter::All => true,
        }
    }

    pub fn as_wire(&self) -> Option<&'static str> {
        match self {
            RequisiteStateFilter::Enable => Some("enable"),
            RequisiteStateFilter::Stop => Some("stop"),
            RequisiteStateFilter::Disable => Some("disable"),
            RequisiteStateFilter::All => None,
        }
    }
}
