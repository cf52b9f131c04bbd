//! Order entity: the matched unit between a request and a requisite.
//!
//! An order is jointly owned by its request and its requisite; the viewer's
//! role (payer or receiver) follows from which side of the pair belongs to
//! the viewing account.

use crate::domain::currency::{Currency, FieldSpec, Method};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Orientation of an order with respect to the viewing account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Input,
    Output,
}

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderState {
    Waiting,
    Payment,
    Confirmation,
    Completed,
    Canceled,
}

impl OrderState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderState::Completed | OrderState::Canceled)
    }

    fn ordinal(&self) -> u8 {
        match self {
            OrderState::Waiting => 0,
            OrderState::Payment => 1,
            OrderState::Confirmation => 2,
            OrderState::Completed => 3,
            OrderState::Canceled => 4,
        }
    }

    /// Forward moves plus cancellation from any non-terminal state.
    pub fn can_transition(&self, to: OrderState) -> bool {
        if self.is_terminal() {
            return false;
        }
        if to == OrderState::Canceled {
            return true;
        }
        to.ordinal() >= self.ordinal()
    }
}

/// Which side of the order the viewing account sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderRole {
    /// The order hangs off the viewer's request: they pay.
    Payer,
    /// The order hangs off the viewer's requisite: they get paid.
    Receiver,
}

/// The one action a participant may take in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// Open the chat and attach payment evidence.
    Chat,
    /// Submit collected input fields via `updates.confirmation`.
    SubmitFields,
    /// Trigger `updates.completed`.
    Complete,
}

/// An order snapshot as reported by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    #[serde(rename = "type")]
    pub type_: OrderType,
    pub state: OrderState,
    pub request_id: i64,
    pub requisite_id: i64,
    pub currency: Currency,
    pub currency_value: i64,
    pub value: i64,
    pub rate: i64,
    pub input_method: Option<Method>,
    pub requisite_scheme_fields: Vec<FieldSpec>,
    pub requisite_fields: HashMap<String, serde_json::Value>,
    pub input_scheme_fields: Vec<FieldSpec>,
    pub input_fields: HashMap<String, serde_json::Value>,
    /// Side-channel update request id, when one is pending.
    pub order_request_id: Option<i64>,
    pub chat_is_read: bool,
    pub date: chrono::DateTime<chrono::Utc>,
}

impl Order {
    /// The action available to the given role, if any.
    pub fn action_for(&self, role: OrderRole) -> Option<OrderAction> {
        match (self.state, role) {
            (OrderState::Payment, OrderRole::Payer) => Some(OrderAction::Chat),
            (OrderState::Payment, OrderRole::Receiver) => Some(OrderAction::SubmitFields),
            (OrderState::Confirmation, _) => Some(OrderAction::Complete),
            _ => None,
        }
    }

    /// `updates.completed` is only accepted while in `Confirmation`; while
    /// `updates.confirmation` is still pending the client refuses locally.
    pub fn can_complete(&self) -> bool {
        self.state == OrderState::Confirmation
    }

    pub fn has_unread_chat(&self) -> bool {
        !self.chat_is_read && !self.state.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(state: OrderState) -> Order {
        Order {
            id: 1,
            type_: OrderType::Input,
            state,
            request_id: 10,
            requisite_id: 20,
            currency: Currency::new("usd", 2, 2, 1),
            currency_value: 100_00,
            value: 100_00,
            rate: 1_00,
            input_method: None,
            requisite_scheme_fields: vec![],
            requisite_fields: HashMap::new(),
            input_scheme_fields: vec![],
            input_fields: HashMap::new(),
            order_request_id: None,
            chat_is_read: true,
            date: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_transitions() {
        assert!(OrderState::Waiting.can_transition(OrderState::Payment));
        assert!(OrderState::Payment.can_transition(OrderState::Confirmation));
        assert!(OrderState::Confirmation.can_transition(OrderState::Completed));
        assert!(OrderState::Waiting.can_transition(OrderState::Canceled));
        assert!(!OrderState::Completed.can_transition(OrderState::Canceled));
        assert!(!OrderState::Confirmation.can_transition(OrderState::Payment));
    }

    #[test]
    fn test_payer_actions() {
        assert_eq!(
            order(OrderState::Payment).action_for(OrderRole::Payer),
            Some(OrderAction::Chat)
        );
        assert_eq!(
            order(OrderState::Confirmation).action_for(OrderRole::Payer),
            Some(OrderAction::Complete)
        );
        assert_eq!(order(OrderState::Waiting).action_for(OrderRole::Payer), None);
    }

    #[test]
    fn test_receiver_actions() {
        assert_eq!(
            order(OrderState::Payment).action_for(OrderRole::Receiver),
            Some(OrderAction::SubmitFields)
        );
        assert_eq!(
            order(OrderState::Confirmation).action_for(OrderRole::Receiver),
            Some(OrderAction::Complete)
        );
    }

    #[test]
    fn test_complete_gate() {
        assert!(!order(OrderState::Payment).can_complete());
        assert!(order(OrderState::Confirmation).can_complete());
        assert!(!order(OrderState::Completed).can_complete());
    }

    #[test]
    fn test_unread_badge() {
        let mut o = order(OrderState::Payment);
        o.chat_is_read = false;
        assert!(o.has_unread_chat());
        o.state = OrderState::Completed;
        assert!(!o.has_unread_chat());
    }
}
