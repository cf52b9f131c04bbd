use fexps_client::domain::order::OrderAction;
use fexps_client::engine::fields::{collect_fields, fields_payload, FieldError, FieldInput};
use fexps_client::{
    Currency, FieldKind, FieldSpec, FieldValue, Order, OrderRole, OrderState, OrderType,
    RequestState, RequestType,
};
use std::collections::HashMap;

fn order(state: OrderState, type_: OrderType) -> Order {
    Order {
        id: 42,
        type_,
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
        input_scheme_fields: vec![
            FieldSpec::new("amount", FieldKind::Int, false),
            FieldSpec::new("receipt", FieldKind::Image, true),
        ],
        input_fields: HashMap::new(),
        order_request_id: None,
        chat_is_read: true,
        date: chrono::Utc::now(),
    }
}

#[test]
fn test_order_lifecycle_forward_only() {
    let chain = [
        OrderState::Waiting,
        OrderState::Payment,
        OrderState::Confirmation,
        OrderState::Completed,
    ];
    for pair in chain.windows(2) {
        assert!(pair[0].can_transition(pair[1]), "{:?} -> {:?}", pair[0], pair[1]);
        assert!(!pair[1].can_transition(pair[0]), "{:?} <- {:?}", pair[0], pair[1]);
    }
    for s in [OrderState::Waiting, OrderState::Payment, OrderState::Confirmation] {
        assert!(s.can_transition(OrderState::Canceled));
    }
    assert!(!OrderState::Completed.can_transition(OrderState::Canceled));
    assert!(!OrderState::Canceled.can_transition(OrderState::Waiting));
}

#[test]
fn test_field_submission_with_image_key() {
    // Receiver in payment: enters amount=100, attaches a file under K1.
    let o = order(OrderState::Payment, OrderType::Input);
    assert_eq!(
        o.action_for(OrderRole::Receiver),
        Some(OrderAction::SubmitFields)
    );

    let mut inputs = HashMap::new();
    inputs.insert("amount".to_string(), FieldInput::Text("100".to_string()));
    inputs.insert("receipt".to_string(), FieldInput::FileKey("K1".to_string()));

    let fields = collect_fields(&o.input_scheme_fields, &inputs).unwrap();
    assert_eq!(fields.get("amount"), Some(&FieldValue::Int(100)));
    assert_eq!(
        fields.get("receipt"),
        Some(&FieldValue::FileKey("K1".to_string()))
    );

    // The wire payload carries the coerced integer and the opaque key.
    let payload = fields_payload(&fields);
    assert_eq!(payload.get("amount"), Some(&serde_json::json!(100)));
    assert_eq!(payload.get("receipt"), Some(&serde_json::json!("K1")));
}

#[test]
fn test_completed_only_from_confirmation() {
    // updates.completed must be rejected client-side while confirmation is
    // still pending.
    assert!(!order(OrderState::Payment, OrderType::Input).can_complete());
    assert!(!order(OrderState::Waiting, OrderType::Input).can_complete());
    assert!(order(OrderState::Confirmation, OrderType::Input).can_complete());
    assert!(!order(OrderState::Completed, OrderType::Input).can_complete());
}

#[test]
fn test_payer_and_receiver_actions_differ_in_payment() {
    let o = order(OrderState::Payment, OrderType::Output);
    assert_eq!(o.action_for(OrderRole::Payer), Some(OrderAction::Chat));
    assert_eq!(
        o.action_for(OrderRole::Receiver),
        Some(OrderAction::SubmitFields)
    );

    let confirming = order(OrderState::Confirmation, OrderType::Output);
    assert_eq!(
        confirming.action_for(OrderRole::Payer),
        Some(OrderAction::Complete)
    );
    assert_eq!(
        confirming.action_for(OrderRole::Receiver),
        Some(OrderAction::Complete)
    );
}

#[test]
fn test_terminal_orders_offer_no_action() {
    for state in [OrderState::Completed, OrderState::Canceled] {
        let o = order(state, OrderType::Input);
        assert_eq!(o.action_for(OrderRole::Payer), None);
        assert_eq!(o.action_for(OrderRole::Receiver), None);
    }
}

#[test]
fn test_invalid_field_inputs_stay_local() {
    let o = order(OrderState::Payment, OrderType::Input);

    let mut bad_int = HashMap::new();
    bad_int.insert("amount".to_string(), FieldInput::Text("ten".to_string()));
    assert_eq!(
        collect_fields(&o.input_scheme_fields, &bad_int),
        Err(FieldError::NotAnInteger("amount".to_string()))
    );

    let empty = HashMap::new();
    assert_eq!(
        collect_fields(&o.input_scheme_fields, &empty),
        Err(FieldError::Missing("amount".to_string()))
    );
}

#[test]
fn test_request_lifecycle_by_shape() {
    // The full chain for cross-currency requests.
    let chain = [
        RequestState::Loading,
        RequestState::Confirmation,
        RequestState::InputReservation,
        RequestState::Input,
        RequestState::OutputReservation,
        RequestState::Output,
        RequestState::Completed,
    ];
    for pair in chain.windows(2) {
        assert!(pair[0].can_transition(pair[1]));
    }

    // Input-shape requests treat the output states as transient.
    assert!(RequestState::OutputReservation.is_transient_for(RequestType::Input));
    assert!(RequestState::Output.is_transient_for(RequestType::Input));
    assert!(!RequestState::Input.is_transient_for(RequestType::Input));

    // Output-shape requests skip the input side.
    assert!(RequestState::InputReservation.is_transient_for(RequestType::Output));
    assert!(RequestState::Input.is_transient_for(RequestType::Output));
}

#[test]
fn test_request_state_text_keys() {
    for (state, key) in [
        (RequestState::Loading, "request_loading_info"),
        (RequestState::Confirmation, "request_confirmation_info"),
        (RequestState::Completed, "request_completed_info"),
        (RequestState::Canceled, "request_canceled_info"),
    ] {
        assert_eq!(state.text_key(), key);
    }
}
