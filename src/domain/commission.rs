//! Commission pack types: the tiered fee schedule attached to a wallet.

use serde::{Deserialize, Serialize};

/// One tier of a commission pack.
///
/// `percent` is scaled by [`DEFAULT_DECIMAL`](crate::domain::decimal::DEFAULT_DECIMAL)
/// (so `100` means 1%). `value_to == 0` marks an open-ended upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionTier {
    pub value_from: i64,
    pub value_to: i64,
    pub percent: i64,
    pub value: i64,
}

impl CommissionTier {
    pub fn new(value_from: i64, value_to: i64, percent: i64, value: i64) -> Self {
        CommissionTier {
            value_from,
            value_to,
            percent,
            value,
        }
    }

    /// Half-open range test; open-ended when `value_to == 0`.
    pub fn contains(&self, v: i64) -> bool {
        v >= self.value_from && (self.value_to == 0 || v < self.value_to)
    }
}

/// Ordered set of tiers covering a contiguous range from zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionPack {
    pub id: i64,
    pub name_text_key: String,
    pub tiers: Vec<CommissionTier>,
}

impl CommissionPack {
    pub fn new(id: i64, tiers: Vec<CommissionTier>) -> Self {
        CommissionPack {
            id,
            name_text_key: format!("commission_pack_{}_name", id),
            tiers,
        }
    }

    /// Find the tier whose range contains `v`.
    pub fn tier_for(&self, v: i64) -> Option<&CommissionTier> {
        self.tiers.iter().find(|t| t.contains(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_contains_half_open() {
        let t = CommissionTier::new(100, 200, 50, 0);
        assert!(!t.contains(99));
        assert!(t.contains(100));
        assert!(t.contains(199));
        assert!(!t.contains(200));
    }

    #[test]
    fn test_open_ended_tier() {
        let t = CommissionTier::new(100, 0, 50, 0);
        assert!(t.contains(100));
        assert!(t.contains(i64::MAX));
        assert!(!t.contains(99));
    }

    #[test]
    fn test_tier_selection_gap() {
        let pack = CommissionPack::new(
            1,
            vec![
                CommissionTier::new(0, 100, 10, 0),
                CommissionTier::new(200, 0, 20, 0),
            ],
        );
        assert!(pack.tier_for(50).is_some());
        // 100..200 is a gap.
        assert!(pack.tier_for(150).is_none());
        assert!(pack.tier_for(200).is_some());
    }
}
