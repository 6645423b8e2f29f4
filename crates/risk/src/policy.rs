use crate::error::RiskError;
use core_types::{BacklogRisk, DealerRecord};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The thresholds behind every risk classification in the system.
///
/// A dealer is at risk when its backlog risk is already High, or when a
/// thin margin coincides with a slow collection period. The same policy
/// also derives backlog-risk badges for financial table rows from the raw
/// backlog amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskPolicy {
    /// Margins below this percentage count toward the at-risk predicate.
    margin_floor_pct: Decimal,
    /// DSO above this many days counts toward the at-risk predicate.
    dso_ceiling_days: u32,
    /// Backlog (USD millions) above this is badged High.
    backlog_high_threshold: Decimal,
    /// Backlog (USD millions) above this (and at most the High threshold)
    /// is badged Medium.
    backlog_medium_threshold: Decimal,
}

impl Default for RiskPolicy {
    /// The canonical thresholds: margin floor 12%, DSO ceiling 45 days,
    /// backlog badges at 40 and 30 USD millions.
    fn default() -> Self {
        Self {
            margin_floor_pct: dec!(12),
            dso_ceiling_days: 45,
            backlog_high_threshold: dec!(40),
            backlog_medium_threshold: dec!(30),
        }
    }
}

impl RiskPolicy {
    /// Creates a policy with custom thresholds.
    pub fn new(
        margin_floor_pct: Decimal,
        dso_ceiling_days: u32,
        backlog_high_threshold: Decimal,
        backlog_medium_threshold: Decimal,
    ) -> Result<Self, RiskError> {
        // Validate that the thresholds are logical.
        if margin_floor_pct <= Decimal::ZERO {
            return Err(RiskError::InvalidParameters(
                "margin_floor_pct must be greater than 0".to_string(),
            ));
        }
        if dso_ceiling_days == 0 {
            return Err(RiskError::InvalidParameters(
                "dso_ceiling_days must be greater than 0".to_string(),
            ));
        }
        if backlog_medium_threshold <= Decimal::ZERO
            || backlog_high_threshold <= backlog_medium_threshold
        {
            return Err(RiskError::InvalidParameters(
                "backlog thresholds must satisfy high > medium > 0".to_string(),
            ));
        }
        Ok(Self {
            margin_floor_pct,
            dso_ceiling_days,
            backlog_high_threshold,
            backlog_medium_threshold,
        })
    }

    /// The canonical at-risk predicate.
    ///
    /// True when the dealer's backlog risk is High, or when its margin is
    /// below the floor while its DSO exceeds the ceiling. A High backlog
    /// risk alone is sufficient; margin and DSO cannot clear it.
    pub fn is_at_risk(&self, dealer: &DealerRecord) -> bool {
        dealer.backlog_risk == BacklogRisk::High
            || (dealer.margin_pct < self.margin_floor_pct
                && dealer.dso_days > self.dso_ceiling_days)
    }

    /// Filters the at-risk dealers and orders them by urgency: High
    /// backlog risk first, then ascending margin (thinnest margin first).
    ///
    /// The sort is stable, so dealers with equal keys keep their input
    /// order.
    pub fn rank_at_risk(&self, dealers: &[DealerRecord]) -> Vec<DealerRecord> {
        let mut flagged: Vec<DealerRecord> = dealers
            .iter()
            .filter(|d| self.is_at_risk(d))
            .cloned()
            .collect();
        flagged.sort_by(|a, b| {
            let a_high = a.backlog_risk == BacklogRisk::High;
            let b_high = b.backlog_risk == BacklogRisk::High;
            b_high
                .cmp(&a_high)
                .then_with(|| a.margin_pct.cmp(&b.margin_pct))
        });
        flagged
    }

    /// Derives a backlog-risk badge from a raw backlog amount (USD
    /// millions).
    pub fn backlog_risk_for(&self, backlog: Decimal) -> BacklogRisk {
        if backlog > self.backlog_high_threshold {
            BacklogRisk::High
        } else if backlog > self.backlog_medium_threshold {
            BacklogRisk::Medium
        } else {
            BacklogRisk::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{Brand, MarginTrendPoint, Quarter, Region, Tier};

    fn dealer(id: &str, margin_pct: Decimal, backlog_risk: BacklogRisk, dso_days: u32) -> DealerRecord {
        DealerRecord {
            id: id.to_string(),
            name: id.to_string(),
            brand: Brand::Tmh,
            region: Region::NorthAmerica,
            tier: Tier::Core,
            revenue_usd: dec!(100),
            margin_pct,
            backlog_usd: dec!(30),
            backlog_risk,
            dso_days,
            margin_trend: Quarter::ALL
                .iter()
                .map(|&quarter| MarginTrendPoint {
                    quarter,
                    margin_pct,
                })
                .collect(),
        }
    }

    #[test]
    fn high_backlog_risk_is_always_at_risk() {
        let policy = RiskPolicy::default();
        // Healthy margin and DSO must not clear a High backlog risk.
        let d = dealer("D1", dec!(25.0), BacklogRisk::High, 10);
        assert!(policy.is_at_risk(&d));
    }

    #[test]
    fn thin_margin_alone_is_not_at_risk() {
        let policy = RiskPolicy::default();
        assert!(!policy.is_at_risk(&dealer("D1", dec!(8.0), BacklogRisk::Low, 40)));
        assert!(!policy.is_at_risk(&dealer("D2", dec!(15.0), BacklogRisk::Low, 60)));
        assert!(policy.is_at_risk(&dealer("D3", dec!(8.0), BacklogRisk::Low, 60)));
    }

    #[test]
    fn boundary_values_do_not_trip_the_predicate() {
        let policy = RiskPolicy::default();
        // Exactly at the floor/ceiling is still healthy; the predicate is
        // strict on both sides.
        assert!(!policy.is_at_risk(&dealer("D1", dec!(12.0), BacklogRisk::Low, 62)));
        assert!(!policy.is_at_risk(&dealer("D2", dec!(8.0), BacklogRisk::Low, 45)));
    }

    #[test]
    fn ranking_puts_high_backlog_risk_before_margin_cases() {
        let policy = RiskPolicy::default();
        let dealers = vec![
            dealer("margin-case", dec!(9.0), BacklogRisk::Low, 60),
            dealer("healthy", dec!(18.0), BacklogRisk::Low, 30),
            dealer("backlog-a", dec!(14.0), BacklogRisk::High, 30),
            dealer("backlog-b", dec!(10.0), BacklogRisk::High, 55),
        ];
        let ranked = policy.rank_at_risk(&dealers);
        let ids: Vec<&str> = ranked.iter().map(|d| d.id.as_str()).collect();
        // High backlog risk first, thinnest margin first within the
        // partition, margin-only cases after every High.
        assert_eq!(ids, vec!["backlog-b", "backlog-a", "margin-case"]);
    }

    #[test]
    fn ranking_is_stable_for_equal_keys() {
        let policy = RiskPolicy::default();
        let dealers = vec![
            dealer("first", dec!(9.0), BacklogRisk::High, 60),
            dealer("second", dec!(9.0), BacklogRisk::High, 60),
        ];
        let ranked = policy.rank_at_risk(&dealers);
        let ids: Vec<&str> = ranked.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn backlog_badges_follow_the_thresholds() {
        let policy = RiskPolicy::default();
        assert_eq!(policy.backlog_risk_for(dec!(68.4)), BacklogRisk::High);
        assert_eq!(policy.backlog_risk_for(dec!(40.0)), BacklogRisk::Medium);
        assert_eq!(policy.backlog_risk_for(dec!(35.4)), BacklogRisk::Medium);
        assert_eq!(policy.backlog_risk_for(dec!(30.0)), BacklogRisk::Low);
        assert_eq!(policy.backlog_risk_for(dec!(19.7)), BacklogRisk::Low);
    }

    #[test]
    fn invalid_thresholds_are_rejected() {
        assert!(RiskPolicy::new(dec!(0), 45, dec!(40), dec!(30)).is_err());
        assert!(RiskPolicy::new(dec!(12), 0, dec!(40), dec!(30)).is_err());
        assert!(RiskPolicy::new(dec!(12), 45, dec!(30), dec!(40)).is_err());
        assert!(RiskPolicy::new(dec!(12), 45, dec!(40), dec!(30)).is_ok());
    }
}
