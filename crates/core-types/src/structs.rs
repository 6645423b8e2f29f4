use crate::enums::{BacklogRisk, Brand, Month, Quarter, Region, Tier, Unit};
use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One row of the detailed financial model: a dealer/brand/region
/// combination with its revenue and margin profile.
///
/// Monetary amounts (`revenue`, `backlog`) are in USD millions; margins are
/// percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub brand: Brand,
    pub dealer_name: String,
    pub region: Region,
    pub revenue: Decimal,
    pub gross_margin_pct: Decimal,
    pub operating_margin_pct: Decimal,
    pub backlog: Decimal,
}

impl FinancialRecord {
    /// Checks the record invariants: monetary amounts must be non-negative.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.revenue < Decimal::ZERO {
            return Err(CoreError::InvalidRecord(
                self.dealer_name.clone(),
                "revenue must be non-negative".to_string(),
            ));
        }
        if self.backlog < Decimal::ZERO {
            return Err(CoreError::InvalidRecord(
                self.dealer_name.clone(),
                "backlog must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// A single quarter's margin observation in a dealer's trend history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginTrendPoint {
    pub quarter: Quarter,
    pub margin_pct: Decimal,
}

/// A dealer with its performance metrics and quarterly margin history.
///
/// `revenue_usd` and `backlog_usd` are in USD millions. The `margin_trend`
/// holds exactly one point per quarter, Q1 through Q4 in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealerRecord {
    pub id: String,
    pub name: String,
    pub brand: Brand,
    pub region: Region,
    pub tier: Tier,
    pub revenue_usd: Decimal,
    pub margin_pct: Decimal,
    pub backlog_usd: Decimal,
    pub backlog_risk: BacklogRisk,
    pub dso_days: u32,
    pub margin_trend: Vec<MarginTrendPoint>,
}

impl DealerRecord {
    /// Looks up this dealer's margin for the given quarter.
    ///
    /// Returns `None` when the trend history has no entry for the quarter.
    /// Callers must not coerce the missing case to zero: zero is a valid
    /// margin and has to stay distinguishable from "no data".
    pub fn margin_for(&self, quarter: Quarter) -> Option<Decimal> {
        self.margin_trend
            .iter()
            .find(|p| p.quarter == quarter)
            .map(|p| p.margin_pct)
    }

    /// Checks the record invariants: non-negative amounts and a complete,
    /// chronologically ordered quarterly trend.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.revenue_usd < Decimal::ZERO || self.backlog_usd < Decimal::ZERO {
            return Err(CoreError::InvalidRecord(
                self.id.clone(),
                "revenue and backlog must be non-negative".to_string(),
            ));
        }
        let quarters: Vec<Quarter> = self.margin_trend.iter().map(|p| p.quarter).collect();
        if quarters != Quarter::ALL {
            return Err(CoreError::InvalidRecord(
                self.id.clone(),
                "margin trend must cover Q1 through Q4 exactly once, in order".to_string(),
            ));
        }
        Ok(())
    }
}

/// A KPI value paired with its change versus the prior year and the unit it
/// is displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiMetric {
    pub value: Decimal,
    pub change: Decimal,
    pub unit: Unit,
}

impl KpiMetric {
    pub fn new(value: Decimal, change: Decimal, unit: Unit) -> Self {
        Self { value, change, unit }
    }

    /// A zeroed metric, used when no reference data exists for a fiscal year.
    pub fn zero(unit: Unit) -> Self {
        Self {
            value: Decimal::ZERO,
            change: Decimal::ZERO,
            unit,
        }
    }
}

/// Company-level KPI reference values for one fiscal year.
///
/// These are precomputed baselines, not derived from the record sets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiBaseline {
    pub total_revenue: KpiMetric,
    pub operating_margin: KpiMetric,
    pub backlog: KpiMetric,
    pub days_sales_outstanding: KpiMetric,
}

/// One month's blended operating margin observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyMargin {
    pub month: Month,
    pub margin_pct: Decimal,
}

/// Static working-capital view row: open backlog and collection period for
/// one brand. Backlog in USD millions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrandWorkingCapital {
    pub brand: Brand,
    pub backlog_usd: Decimal,
    pub dso_days: u32,
}

/// Key into one fiscal year's revenue sub-tables: the unfiltered view, a
/// single brand's self-entry, or a regional breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RevenueScope {
    All,
    Brand(Brand),
    Region(Region),
}

/// Nested revenue lookup: fiscal year -> scope -> brand -> revenue in USD
/// billions.
///
/// The table is deliberately permissive: lookups for absent years or scopes
/// return `None` and callers default missing brand values to zero.
#[derive(Debug, Clone, Default)]
pub struct BrandRevenueTable {
    years: HashMap<i32, HashMap<RevenueScope, BTreeMap<Brand, Decimal>>>,
}

impl BrandRevenueTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one scope's brand->revenue mapping for a fiscal year.
    pub fn insert<I>(&mut self, year: i32, scope: RevenueScope, revenues: I)
    where
        I: IntoIterator<Item = (Brand, Decimal)>,
    {
        self.years
            .entry(year)
            .or_default()
            .insert(scope, revenues.into_iter().collect());
    }

    /// Looks up the brand->revenue mapping for a year and scope.
    pub fn scope(&self, year: i32, scope: RevenueScope) -> Option<&BTreeMap<Brand, Decimal>> {
        self.years.get(&year).and_then(|scopes| scopes.get(&scope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn trend() -> Vec<MarginTrendPoint> {
        Quarter::ALL
            .iter()
            .map(|&quarter| MarginTrendPoint {
                quarter,
                margin_pct: dec!(15.0),
            })
            .collect()
    }

    fn dealer() -> DealerRecord {
        DealerRecord {
            id: "D9001".to_string(),
            name: "Test Dealer".to_string(),
            brand: Brand::Tmh,
            region: Region::NorthAmerica,
            tier: Tier::Core,
            revenue_usd: dec!(100.0),
            margin_pct: dec!(15.0),
            backlog_usd: dec!(40.0),
            backlog_risk: BacklogRisk::Low,
            dso_days: 40,
            margin_trend: trend(),
        }
    }

    #[test]
    fn margin_for_missing_quarter_is_none() {
        let mut d = dealer();
        d.margin_trend.retain(|p| p.quarter != Quarter::Q3);
        assert_eq!(d.margin_for(Quarter::Q3), None);
        assert_eq!(d.margin_for(Quarter::Q1), Some(dec!(15.0)));
    }

    #[test]
    fn validate_rejects_incomplete_trend() {
        let mut d = dealer();
        d.margin_trend.pop();
        assert!(d.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_order_trend() {
        let mut d = dealer();
        d.margin_trend.swap(0, 3);
        assert!(d.validate().is_err());
    }

    #[test]
    fn validate_rejects_negative_revenue() {
        let mut d = dealer();
        d.revenue_usd = dec!(-1);
        assert!(d.validate().is_err());
    }

    #[test]
    fn revenue_table_lookup_misses_return_none() {
        let mut table = BrandRevenueTable::new();
        table.insert(2024, RevenueScope::All, [(Brand::Tmh, dec!(3.5))]);
        assert!(table.scope(2024, RevenueScope::All).is_some());
        assert!(table.scope(2023, RevenueScope::All).is_none());
        assert!(table.scope(2024, RevenueScope::Region(Region::Emea)).is_none());
    }
}
