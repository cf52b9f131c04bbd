//! Commission engine: tier selection and the two commission modes.

use crate::domain::commission::{CommissionPack, CommissionTier};
use crate::domain::decimal::{to_float, to_int, RoundMode, DEFAULT_DECIMAL};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommissionError {
    #[error("no commission tier covers the given value")]
    NoApplicableTier,
    #[error("commission tier percent is 100% or more")]
    InvalidTier,
}

fn select_tier(pack: &CommissionPack, v: i64) -> Result<&CommissionTier, CommissionError> {
    let tier = pack.tier_for(v).ok_or(CommissionError::NoApplicableTier)?;
    // percent >= 100% would zero-divide the output mode and invert signs.
    if to_float(tier.percent, DEFAULT_DECIMAL) >= 100.0 {
        return Err(CommissionError::InvalidTier);
    }
    Ok(tier)
}

/// Commission charged on the input side, before conversion.
///
/// `v` is the wallet-side input value in scaled units. Commission always
/// rounds up.
pub fn input_commission(pack: &CommissionPack, v: i64) -> Result<i64, CommissionError> {
    let tier = select_tier(pack, v)?;
    let percent = to_float(tier.percent, DEFAULT_DECIMAL);
    let raw = v as f64 * percent / 100.0 + tier.value as f64;
    Ok(to_int(raw, 0, RoundMode::Ceil))
}

/// Commission derived so the receiver gets exactly `w` out.
///
/// Returns `c` such that `input = w + c` and applying the tier percentage to
/// `input` pays out `w`: `c = ceil(value + w·100/(100−p) − w)`.
pub fn output_commission(pack: &CommissionPack, w: i64) -> Result<i64, CommissionError> {
    let tier = select_tier(pack, w)?;
    let percent = to_float(tier.percent, DEFAULT_DECIMAL);
    let raw = tier.value as f64 + w as f64 * (100.0 / (100.0 - percent)) - w as f64;
    Ok(to_int(raw, 0, RoundMode::Ceil))
}
