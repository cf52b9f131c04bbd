//! Request entity and lifecycle.
//!
//! A request is a user's exchange intent. The server owns every transition;
//! the client only validates that an observed move is legal and offers the
//! single `confirmation -> input_reservation` action.

use crate::domain::currency::Method;
use serde::{Deserialize, Serialize};

/// Shape of an exchange request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    /// Payer pays in the input currency, receives wallet units.
    Input,
    /// Payer spends wallet units, requisite owner is paid in the output currency.
    Output,
    /// Cross-currency: input currency to output currency.
    All,
}

/// Lifecycle state of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    Loading,
    Confirmation,
    InputReservation,
    Input,
    OutputReservation,
    Output,
    Completed,
    Canceled,
}

impl RequestState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestState::Completed | RequestState::Canceled)
    }

    /// Position in the forward chain; terminal states sit at the end.
    fn ordinal(&self) -> u8 {
        match self {
            RequestState::Loading => 0,
            RequestState::Confirmation => 1,
            RequestState::InputReservation => 2,
            RequestState::Input => 3,
            RequestState::OutputReservation => 4,
            RequestState::Output => 5,
            RequestState::Completed => 6,
            RequestState::Canceled => 7,
        }
    }

    /// Whether the server may legally move a request from `self` to `to`.
    ///
    /// Forward moves along the chain are allowed (the input/output-only
    /// shapes skip the opposite side's states, which reads as a multi-step
    /// forward move). `Canceled` is reachable from any non-terminal state.
    /// Same-state is accepted so a server retry never looks illegal.
    pub fn can_transition(&self, to: RequestState) -> bool {
        if self.is_terminal() {
            return false;
        }
        if to == RequestState::Canceled {
            return true;
        }
        to.ordinal() >= self.ordinal() && to != RequestState::Canceled
    }

    /// Text pack key for the state's info banner.
    pub fn text_key(&self) -> String {
        format!("request_{}_info", self.wire_name())
    }

    pub fn wire_name(&self) -> &'static str {
        match self {
            RequestState::Loading => "loading",
            RequestState::Confirmation => "confirmation",
            RequestState::InputReservation => "input_reservation",
            RequestState::Input => "input",
            RequestState::OutputReservation => "output_reservation",
            RequestState::Output => "output",
            RequestState::Completed => "completed",
            RequestState::Canceled => "canceled",
        }
    }

    /// States the given request shape never rests in. The server reports
    /// them only transiently; the client treats them as pass-through.
    pub fn is_transient_for(&self, type_: RequestType) -> bool {
        match type_ {
            RequestType::Input => matches!(
                self,
                RequestState::OutputReservation | RequestState::Output
            ),
            RequestType::Output => {
                matches!(self, RequestState::InputReservation | RequestState::Input)
            }
            RequestType::All => false,
        }
    }
}

/// A user's exchange request as reported by the server.
///
/// Optional monetary fields left out of a snapshot mean "server will fill";
/// the client never computes a local override for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub id: i64,
    pub name: Option<String>,
    pub wallet_id: i64,
    #[serde(rename = "type")]
    pub type_: RequestType,
    pub state: RequestState,
    pub rate_fixed: bool,
    pub rate_decimal: u32,
    pub input_method: Option<Method>,
    pub output_method: Option<Method>,
    pub output_requisite_data_id: Option<i64>,
    pub input_currency_value: Option<i64>,
    pub input_value: Option<i64>,
    pub output_value: Option<i64>,
    pub output_currency_value: Option<i64>,
    pub rate: Option<i64>,
    pub commission: Option<i64>,
    pub difference: i64,
    pub difference_rate: i64,
    pub date: chrono::DateTime<chrono::Utc>,
}

impl Request {
    /// The single client-driven action: confirm while in `Confirmation`.
    pub fn can_confirm(&self) -> bool {
        self.state == RequestState::Confirmation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_chain() {
        assert!(RequestState::Loading.can_transition(RequestState::Confirmation));
        assert!(RequestState::Confirmation.can_transition(RequestState::InputReservation));
        assert!(RequestState::Output.can_transition(RequestState::Completed));
        // Input-shape requests skip the output states entirely.
        assert!(RequestState::Input.can_transition(RequestState::Completed));
        // No going backwards.
        assert!(!RequestState::Input.can_transition(RequestState::Confirmation));
    }

    #[test]
    fn test_canceled_from_any_non_terminal() {
        for s in [
            RequestState::Loading,
            RequestState::Confirmation,
            RequestState::InputReservation,
            RequestState::Input,
            RequestState::OutputReservation,
            RequestState::Output,
        ] {
            assert!(s.can_transition(RequestState::Canceled));
        }
    }

    #[test]
    fn test_terminal_states_are_final() {
        assert!(!RequestState::Completed.can_transition(RequestState::Canceled));
        assert!(!RequestState::Canceled.can_transition(RequestState::Loading));
    }

    #[test]
    fn test_same_state_retry_is_legal() {
        assert!(RequestState::InputReservation.can_transition(RequestState::InputReservation));
    }

    #[test]
    fn test_transient_states() {
        assert!(RequestState::Output.is_transient_for(RequestType::Input));
        assert!(RequestState::Input.is_transient_for(RequestType::Output));
        assert!(!RequestState::Input.is_transient_for(RequestType::All));
    }

    #[test]
    fn test_text_key() {
        assert_eq!(
            RequestState::InputReservation.text_key(),
            "request_input_reservation_info"
        );
    }

    #[test]
    fn test_state_wire_format() {
        assert_eq!(
            serde_json::to_string(&RequestState::InputReservation).unwrap(),
            "\"input_reservation\""
        );
        let s: RequestState = serde_json::from_str("\"output_reservation\"").unwrap();
        assert_eq!(s, RequestState::OutputReservation);
    }
}
