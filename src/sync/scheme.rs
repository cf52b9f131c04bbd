//! Projection schemes: entity -> canonical tuple, used only for equality.
//!
//! Diffing compares the tuples element-wise; structural equality, never
//! object identity. The tuple is stored alongside the cached entity so a
//! comparison costs nothing beyond the fetch.

use crate::domain::{Order, Request, Requisite, Wallet};
use serde_json::{json, Value};

pub type ProjectionKey = Vec<Value>;

/// Fields of interest for the balance card.
pub fn wallet_scheme(w: &Wallet) -> ProjectionKey {
    vec![
        json!(w.id),
        json!(w.name),
        json!(w.value),
        json!(w.value_banned),
        json!(w.value_can_minus),
        json!(w.commission_pack_id),
    ]
}

/// Fields of interest for a request row and detail header.
pub fn request_scheme(r: &Request) -> ProjectionKey {
    vec![
        json!(r.id),
        json!(r.name),
        json!(r.wallet_id),
        json!(r.type_),
        json!(r.state),
        json!(r.rate_decimal),
        json!(r.rate_fixed),
        json!(r.rate),
        json!(r.commission),
        json!(r.input_currency_value),
        json!(r.input_value),
        json!(r.output_value),
        json!(r.output_currency_value),
        json!(r.difference),
        json!(r.difference_rate),
    ]
}

/// Fields of interest for a requisite row.
pub fn requisite_scheme(r: &Requisite) -> ProjectionKey {
    vec![
        json!(r.id),
        json!(r.type_),
        json!(r.state),
        json!(r.currency_value),
        json!(r.total_currency_value),
        json!(r.currency_value_min),
        json!(r.currency_value_max),
        json!(r.value),
        json!(r.rate),
    ]
}

/// Fields of interest for an order row and detail.
pub fn order_scheme(o: &Order) -> ProjectionKey {
    vec![
        json!(o.id),
        json!(o.type_),
        json!(o.state),
        json!(o.currency_value),
        json!(o.value),
        json!(o.rate),
        json!(o.order_request_id),
        json!(o.chat_is_read),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet() -> Wallet {
        Wallet {
            id: 7,
            name: "Default".to_string(),
            value: 1000,
            value_banned: 0,
            value_can_minus: 0,
            commission_pack_id: 1,
        }
    }

    #[test]
    fn test_identical_wallets_project_equal() {
        assert_eq!(wallet_scheme(&wallet()), wallet_scheme(&wallet()));
    }

    #[test]
    fn test_value_change_projects_different() {
        let a = wallet();
        let mut b = wallet();
        b.value = 1200;
        assert_ne!(wallet_scheme(&a), wallet_scheme(&b));
    }
}
