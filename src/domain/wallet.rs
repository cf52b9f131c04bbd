//! Wallet and transfer types.

use crate::domain::decimal::{format_value, DEFAULT_DECIMAL};
use serde::{Deserialize, Serialize};

/// An account-owned wallet. All values are scaled by [`DEFAULT_DECIMAL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: i64,
    pub name: String,
    pub value: i64,
    pub value_banned: i64,
    pub value_can_minus: i64,
    pub commission_pack_id: i64,
}

impl Wallet {
    /// Value the owner can actually spend right now.
    pub fn available(&self) -> i64 {
        self.value - self.value_banned + self.value_can_minus
    }

    /// `value - value_banned >= -value_can_minus` must hold server-side;
    /// a violation here means the cached snapshot is stale.
    pub fn is_consistent(&self) -> bool {
        self.value - self.value_banned >= -self.value_can_minus
    }

    pub fn display_value(&self) -> String {
        format_value(self.value, DEFAULT_DECIMAL)
    }
}

/// Direction of a transfer with respect to the viewing account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferOperation {
    Send,
    Receive,
}

/// Internal account-to-account value move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: i64,
    #[serde(rename = "type")]
    pub type_: String,
    pub operation: TransferOperation,
    pub wallet_from: i64,
    pub wallet_to: i64,
    pub account_from: i64,
    pub account_to: i64,
    pub value: i64,
    pub date: chrono::DateTime<chrono::Utc>,
}
