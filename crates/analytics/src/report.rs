use core_types::{BacklogRisk, Brand, KpiMetric, Quarter, Region};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Aggregated KPIs over a filtered dealer set.
///
/// `insufficient_data` is set when the filtered set was empty; the numeric
/// fields are then zero rather than NaN, and a presentation layer should
/// say "no data" instead of rendering the zeros as facts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DealerKpiSummary {
    /// Sum of dealer revenue, converted to USD billions.
    pub total_revenue_bn: Decimal,
    /// Mean dealer margin percentage.
    pub avg_margin_pct: Decimal,
    /// Dealers flagged by the canonical at-risk predicate.
    pub at_risk_count: usize,
    /// Mean days sales outstanding.
    pub avg_dso_days: Decimal,
    pub insufficient_data: bool,
}

/// Aggregated financial KPIs with their change versus the prior year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialKpiSummary {
    pub total_revenue: KpiMetric,
    pub operating_margin: KpiMetric,
    pub backlog: KpiMetric,
    pub days_sales_outstanding: KpiMetric,
    pub insufficient_data: bool,
}

/// Backlog and collection-period rollup for one region.
///
/// Values are rounded to whole numbers for display; backlog in USD
/// millions, DSO in days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRollup {
    pub region: Region,
    pub total_backlog_usd: i64,
    pub avg_dso_days: i64,
}

/// One dealer's margin in a trend row. `None` means the dealer has no
/// observation for that quarter; it is distinct from a zero margin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealerMarginPoint {
    pub dealer: String,
    pub margin_pct: Option<Decimal>,
}

/// One quarter's row in the margin-trend chart series: a named point per
/// tracked dealer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRow {
    pub quarter: Quarter,
    pub points: Vec<DealerMarginPoint>,
}

/// Inclusive Y-axis bounds for a chart, padded away from the data range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisDomain {
    pub lower: Decimal,
    pub upper: Decimal,
}

impl AxisDomain {
    /// The fallback domain when there are no values to bound.
    pub const DEFAULT: AxisDomain = AxisDomain {
        lower: Decimal::ZERO,
        upper: dec!(20),
    };
}

/// Revenue for one brand, in USD billions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrandRevenue {
    pub brand: Brand,
    pub revenue_bn: Decimal,
}

/// Revenue for one brand together with its share of the total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrandShare {
    pub brand: Brand,
    pub revenue_bn: Decimal,
    pub share_pct: Decimal,
}

/// Blended operating margin for one quarter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuarterlyMargin {
    pub quarter: Quarter,
    pub margin_pct: Decimal,
}

/// One row of the top-dealers preview, ranked by revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedFinancialRow {
    pub rank: usize,
    pub dealer_name: String,
    pub brand: Brand,
    pub revenue: Decimal,
    pub operating_margin_pct: Decimal,
}

/// One row of the financial detail table, with the backlog-risk badge
/// derived from the backlog amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialTableRow {
    pub dealer_name: String,
    pub brand: Brand,
    pub region: Region,
    pub revenue: Decimal,
    pub gross_margin_pct: Decimal,
    pub operating_margin_pct: Decimal,
    pub backlog: Decimal,
    pub backlog_risk: BacklogRisk,
}
