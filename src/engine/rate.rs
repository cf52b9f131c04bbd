//! Rate calculator: previews for the six request-shape variants.
//!
//! All previews are computed locally for display; the server recomputes the
//! authoritative amounts when the request is created. Conversion convention:
//! `currency_value = value * rate`, with rates read at the currency's
//! `rate_decimal` precision and wallet values at [`DEFAULT_DECIMAL`].
//!
//! Snapping: driving by an output amount means the client must supply at
//! least enough input, so the input currency result snaps up to `div`;
//! driving by an input amount means the client gets at most the shown
//! output, so the output currency result snaps down.

use crate::domain::commission::CommissionPack;
use crate::domain::currency::Currency;
use crate::domain::decimal::{snap_down, snap_up, to_float, to_int, RoundMode, DEFAULT_DECIMAL};
use crate::engine::commission::{input_commission, output_commission};

/// Inputs shared by every preview variant.
#[derive(Debug, Clone)]
pub struct RateContext {
    pub commission_pack: CommissionPack,
    pub input_currency: Option<Currency>,
    pub output_currency: Option<Currency>,
    /// Scaled by the input currency's `rate_decimal`.
    pub input_rate: i64,
    /// Scaled by the output currency's `rate_decimal`.
    pub output_rate: i64,
}

/// A computed preview. Currency-side fields are `None` for the shapes that
/// do not touch that currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatePreview {
    pub input_currency_value: Option<i64>,
    pub input_value: i64,
    pub commission: i64,
    pub output_value: i64,
    pub output_currency_value: Option<i64>,
}

impl RatePreview {
    /// The counter-amount in display units, as the UI shows it.
    pub fn display_output(&self, ctx: &RateContext) -> f64 {
        match (self.output_currency_value, &ctx.output_currency) {
            (Some(ocv), Some(cur)) => to_float(ocv, cur.decimal),
            _ => to_float(self.output_value, DEFAULT_DECIMAL),
        }
    }

    pub fn display_input(&self, ctx: &RateContext) -> f64 {
        match (self.input_currency_value, &ctx.input_currency) {
            (Some(icv), Some(cur)) => to_float(icv, cur.decimal),
            _ => to_float(self.input_value, DEFAULT_DECIMAL),
        }
    }
}

impl RateContext {
    fn input_rate_f(&self, cur: &Currency) -> f64 {
        to_float(self.input_rate, cur.rate_decimal)
    }

    fn output_rate_f(&self, cur: &Currency) -> f64 {
        to_float(self.output_rate, cur.rate_decimal)
    }

    /// Input currency amount -> wallet-side input value.
    fn input_value_from_currency(&self, icv: i64, cur: &Currency) -> i64 {
        let icv_f = to_float(icv, cur.decimal);
        to_int(
            icv_f / self.input_rate_f(cur),
            DEFAULT_DECIMAL,
            RoundMode::NearestHalfUp,
        )
    }

    /// Wallet-side input value -> input currency amount, snapped up.
    fn currency_from_input_value(&self, iv: i64, cur: &Currency) -> i64 {
        let raw = to_float(iv, DEFAULT_DECIMAL) * self.input_rate_f(cur);
        snap_up(to_int(raw, cur.decimal, RoundMode::Ceil), cur.div)
    }

    /// Wallet-side output value -> output currency amount, snapped down.
    fn currency_from_output_value(&self, ov: i64, cur: &Currency) -> i64 {
        let raw = to_float(ov, DEFAULT_DECIMAL) * self.output_rate_f(cur);
        snap_down(to_int(raw, cur.decimal, RoundMode::Floor), cur.div)
    }

    /// Output currency amount -> wallet-side output value.
    fn output_value_from_currency(&self, ocv: i64, cur: &Currency) -> i64 {
        let ocv_f = to_float(ocv, cur.decimal);
        to_int(
            ocv_f / self.output_rate_f(cur),
            DEFAULT_DECIMAL,
            RoundMode::NearestHalfUp,
        )
    }
}

/// `type = input`, driven by the input currency amount the payer pays.
pub fn input_by_currency_value(ctx: &RateContext, icv: i64) -> Option<RatePreview> {
    let cur = ctx.input_currency.as_ref()?;
    let input_value = ctx.input_value_from_currency(icv, cur);
    let commission = input_commission(&ctx.commission_pack, input_value).ok()?;
    Some(RatePreview {
        input_currency_value: Some(icv),
        input_value,
        commission,
        output_value: input_value - commission,
        output_currency_value: None,
    })
}

/// `type = input`, driven by the wallet amount the user wants to receive.
pub fn input_by_value(ctx: &RateContext, value: i64) -> Option<RatePreview> {
    let cur = ctx.input_currency.as_ref()?;
    let commission = output_commission(&ctx.commission_pack, value).ok()?;
    let input_value = value + commission;
    Some(RatePreview {
        input_currency_value: Some(ctx.currency_from_input_value(input_value, cur)),
        input_value,
        commission,
        output_value: value,
        output_currency_value: None,
    })
}

/// `type = output`, driven by the wallet amount the user spends.
pub fn output_by_value(ctx: &RateContext, value: i64) -> Option<RatePreview> {
    let cur = ctx.output_currency.as_ref()?;
    let commission = input_commission(&ctx.commission_pack, value).ok()?;
    let output_value = value - commission;
    Some(RatePreview {
        input_currency_value: None,
        input_value: value,
        commission,
        output_value,
        output_currency_value: Some(ctx.currency_from_output_value(output_value, cur)),
    })
}

/// `type = output`, driven by the currency amount the receiver must get.
pub fn output_by_currency_value(ctx: &RateContext, ocv: i64) -> Option<RatePreview> {
    let cur = ctx.output_currency.as_ref()?;
    let output_value = ctx.output_value_from_currency(ocv, cur);
    let commission = output_commission(&ctx.commission_pack, output_value).ok()?;
    Some(RatePreview {
        input_currency_value: None,
        input_value: output_value + commission,
        commission,
        output_value,
        output_currency_value: Some(ocv),
    })
}

/// `type = all`, driven by the input currency amount.
pub fn all_by_input_currency_value(ctx: &RateContext, icv: i64) -> Option<RatePreview> {
    let in_cur = ctx.input_currency.as_ref()?;
    let out_cur = ctx.output_currency.as_ref()?;
    let input_value = ctx.input_value_from_currency(icv, in_cur);
    let commission = input_commission(&ctx.commission_pack, input_value).ok()?;
    let output_value = input_value - commission;
    Some(RatePreview {
        input_currency_value: Some(icv),
        input_value,
        commission,
        output_value,
        output_currency_value: Some(ctx.currency_from_output_value(output_value, out_cur)),
    })
}

/// `type = all`, driven by the output currency amount.
pub fn all_by_output_currency_value(ctx: &RateContext, ocv: i64) -> Option<RatePreview> {
    let in_cur = ctx.input_currency.as_ref()?;
    let out_cur = ctx.output_currency.as_ref()?;
    let output_value = ctx.output_value_from_currency(ocv, out_cur);
    let commission = output_commission(&ctx.commission_pack, output_value).ok()?;
    let input_value = output_value + commission;
    Some(RatePreview {
        input_currency_value: Some(ctx.currency_from_input_value(input_value, in_cur)),
        input_value,
        commission,
        output_value,
        output_currency_value: Some(ocv),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commission::CommissionTier;

    fn ctx() -> RateContext {
        RateContext {
            commission_pack: CommissionPack::new(
                1,
                vec![CommissionTier::new(0, 1000_00, 100, 50)],
            ),
            input_currency: Some(Currency::new("usd", 2, 2, 1)),
            output_currency: Some(Currency::new("eur", 2, 2, 100)),
            input_rate: 1_00,
            output_rate: 50,
        }
    }

    #[test]
    fn test_cross_currency_worked_example() {
        // 100.00 usd in at 1% + 0.50, out at rate 0.50 with div 1.00.
        let preview = all_by_input_currency_value(&ctx(), 100_00).unwrap();
        assert_eq!(preview.input_value, 100_00);
        assert_eq!(preview.commission, 150);
        assert_eq!(preview.output_value, 9850);
        assert_eq!(preview.output_currency_value, Some(4900));
        assert_eq!(preview.display_output(&ctx()), 49.0);
    }

    #[test]
    fn test_commission_failure_yields_none() {
        let mut c = ctx();
        c.commission_pack = CommissionPack::new(1, vec![CommissionTier::new(500_00, 0, 100, 0)]);
        assert!(all_by_input_currency_value(&c, 100_00).is_none());
        assert!(input_by_currency_value(&c, 100_00).is_none());
    }

    #[test]
    fn test_input_variants() {
        let c = ctx();
        let by_cv = input_by_currency_value(&c, 100_00).unwrap();
        assert_eq!(by_cv.input_value, 100_00);
        assert_eq!(by_cv.output_value, 9850);
        assert_eq!(by_cv.output_currency_value, None);

        let by_v = input_by_value(&c, 9900).unwrap();
        // 1% inverse of 99.00 plus the 0.50 fixed part.
        assert_eq!(by_v.commission, 150);
        assert_eq!(by_v.input_value, 1_0050);
        assert_eq!(by_v.input_currency_value, Some(1_0050));
    }

    #[test]
    fn test_output_variants() {
        let c = ctx();
        let by_v = output_by_value(&c, 100_00).unwrap();
        assert_eq!(by_v.commission, 150);
        assert_eq!(by_v.output_value, 9850);
        // 98.50 * 0.5 = 49.25, floored to the 1.00 div.
        assert_eq!(by_v.output_currency_value, Some(4900));

        let by_cv = output_by_currency_value(&c, 4900).unwrap();
        // 49.00 / 0.5 = 98.00 wallet units out.
        assert_eq!(by_cv.output_value, 9800);
        assert_eq!(by_cv.input_value, 9800 + by_cv.commission);
    }

    #[test]
    fn test_roundtrip_within_rounding() {
        // Percent-only tier and div=1 keeps the inverse exact.
        let c = RateContext {
            commission_pack: CommissionPack::new(1, vec![CommissionTier::new(0, 0, 100, 0)]),
            input_currency: Some(Currency::new("usd", 2, 2, 1)),
            output_currency: Some(Currency::new("eur", 2, 2, 1)),
            input_rate: 1_00,
            output_rate: 50,
        };
        let forward = all_by_input_currency_value(&c, 100_00).unwrap();
        let back =
            all_by_output_currency_value(&c, forward.output_currency_value.unwrap()).unwrap();
        let div = c.input_currency.as_ref().unwrap().div;
        assert!((back.input_currency_value.unwrap() - 100_00).abs() <= div.max(1));
    }

    #[test]
    fn test_output_driven_snaps_input_up() {
        let mut c = ctx();
        c.input_currency = Some(Currency::new("usd", 2, 2, 100));
        let preview = all_by_output_currency_value(&c, 4900).unwrap();
        let icv = preview.input_currency_value.unwrap();
        assert_eq!(icv % 100, 0);
        // Snapping up: the shown input is never less than the exact need.
        let exact = to_float(preview.input_value, DEFAULT_DECIMAL)
            * to_float(c.input_rate, 2);
        assert!(to_float(icv, 2) >= exact - 1e-9);
    }
}
