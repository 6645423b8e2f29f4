use crate::report::{
    AxisDomain, BrandRevenue, BrandShare, DealerKpiSummary, DealerMarginPoint,
    FinancialKpiSummary, FinancialTableRow, QuarterlyMargin, RankedFinancialRow, RegionRollup,
    TrendRow,
};
use core_types::{
    Brand, BrandRevenueTable, DealerRecord, FilterCriteria, FilterDimensions, FinancialRecord,
    KpiBaseline, KpiMetric, MonthlyMargin, Quarter, Region, RevenueScope, Selection, Unit,
};
use risk::RiskPolicy;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Monetary aggregates are reported in billions; the records carry
/// millions.
const MILLIONS_PER_BILLION: Decimal = dec!(1000);

/// Y-axis padding as a fraction of the data range.
const AXIS_PADDING_RATIO: Decimal = dec!(0.15);

// Filtered views have no prior-year record set to compare against, so
// their change-vs-prior-year figures fall back to indicative deltas keyed
// off the aggregate level. Unfiltered views use the per-year baselines.
const FILTERED_REVENUE_GAIN: Decimal = dec!(2.5);
const FILTERED_REVENUE_DECLINE: Decimal = dec!(-1.2);
const FILTERED_MARGIN_GAIN: Decimal = dec!(0.8);
const FILTERED_MARGIN_DECLINE: Decimal = dec!(-0.3);
const STRONG_MARGIN_PCT: Decimal = dec!(14);

/// A stateless calculator deriving dashboard views from the flat record
/// sets.
///
/// The engine carries only the risk policy its classifications run under;
/// it holds no query state and never mutates its inputs.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    risk: RiskPolicy,
}

impl AnalyticsEngine {
    /// An engine using the canonical risk thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine classifying under a custom risk policy.
    pub fn with_policy(risk: RiskPolicy) -> Self {
        Self { risk }
    }

    // --- Filter application ---

    /// Retains the records that pass every non-wildcard criterion
    /// dimension. Dimensions the record type does not carry are ignored.
    ///
    /// Order-preserving and pure; an empty result is a normal outcome, not
    /// an error.
    pub fn apply_filters<T>(&self, records: &[T], criteria: &FilterCriteria) -> Vec<T>
    where
        T: FilterDimensions + Clone,
    {
        let filtered: Vec<T> = records
            .iter()
            .filter(|record| criteria.matches(*record))
            .cloned()
            .collect();
        tracing::debug!(
            total = records.len(),
            retained = filtered.len(),
            year = criteria.year,
            "applied filter criteria"
        );
        filtered
    }

    // --- KPI aggregation ---

    /// Aggregates dealer KPIs over an already-filtered dealer set.
    ///
    /// An empty set yields zeroed values with `insufficient_data` set; the
    /// mean calculations never divide by zero.
    pub fn dealer_kpis(&self, dealers: &[DealerRecord]) -> DealerKpiSummary {
        if dealers.is_empty() {
            return DealerKpiSummary {
                total_revenue_bn: Decimal::ZERO,
                avg_margin_pct: Decimal::ZERO,
                at_risk_count: 0,
                avg_dso_days: Decimal::ZERO,
                insufficient_data: true,
            };
        }

        let count = Decimal::from(dealers.len());
        let total_revenue: Decimal = dealers.iter().map(|d| d.revenue_usd).sum();
        let margin_sum: Decimal = dealers.iter().map(|d| d.margin_pct).sum();
        let dso_sum: Decimal = dealers.iter().map(|d| Decimal::from(d.dso_days)).sum();
        let at_risk_count = dealers.iter().filter(|d| self.risk.is_at_risk(d)).count();

        DealerKpiSummary {
            total_revenue_bn: total_revenue / MILLIONS_PER_BILLION,
            avg_margin_pct: margin_sum / count,
            at_risk_count,
            avg_dso_days: dso_sum / count,
            insufficient_data: false,
        }
    }

    /// Aggregates financial KPIs over an already-filtered record set,
    /// attaching change-vs-prior-year figures.
    ///
    /// When brand and region are both wildcards the baseline deltas for the
    /// criteria year apply verbatim; filtered views use indicative deltas.
    /// DSO has no record-level source and is reported from the baseline. A
    /// missing baseline (unknown year) degrades to zeroed change figures.
    pub fn financial_kpis(
        &self,
        records: &[FinancialRecord],
        criteria: &FilterCriteria,
        baseline: Option<&KpiBaseline>,
    ) -> FinancialKpiSummary {
        let total_revenue: Decimal =
            records.iter().map(|r| r.revenue).sum::<Decimal>() / MILLIONS_PER_BILLION;
        let operating_margin = if records.is_empty() {
            Decimal::ZERO
        } else {
            records
                .iter()
                .map(|r| r.operating_margin_pct)
                .sum::<Decimal>()
                / Decimal::from(records.len())
        };
        let backlog: Decimal =
            records.iter().map(|r| r.backlog).sum::<Decimal>() / MILLIONS_PER_BILLION;

        let unfiltered = criteria.brand.is_all() && criteria.region.is_all();
        let (revenue_change, margin_change, backlog_change, dso) = match baseline {
            Some(base) if unfiltered => (
                base.total_revenue.change,
                base.operating_margin.change,
                base.backlog.change,
                base.days_sales_outstanding,
            ),
            Some(base) => {
                let revenue_change = if total_revenue > Decimal::ZERO {
                    FILTERED_REVENUE_GAIN
                } else {
                    FILTERED_REVENUE_DECLINE
                };
                let margin_change = if operating_margin > STRONG_MARGIN_PCT {
                    FILTERED_MARGIN_GAIN
                } else {
                    FILTERED_MARGIN_DECLINE
                };
                (
                    revenue_change,
                    margin_change,
                    base.backlog.change,
                    base.days_sales_outstanding,
                )
            }
            None => {
                tracing::warn!(
                    year = criteria.year,
                    "no KPI baseline for fiscal year; reporting zeroed changes"
                );
                (
                    Decimal::ZERO,
                    Decimal::ZERO,
                    Decimal::ZERO,
                    KpiMetric::zero(Unit::Days),
                )
            }
        };

        FinancialKpiSummary {
            total_revenue: KpiMetric::new(total_revenue, revenue_change, Unit::Billions),
            operating_margin: KpiMetric::new(operating_margin, margin_change, Unit::Percent),
            backlog: KpiMetric::new(backlog, backlog_change, Unit::Billions),
            days_sales_outstanding: dso,
            insufficient_data: records.is_empty(),
        }
    }

    // --- Ranking ---

    /// The at-risk dealers in urgency order; see `RiskPolicy::rank_at_risk`.
    pub fn rank_at_risk(&self, dealers: &[DealerRecord]) -> Vec<DealerRecord> {
        self.risk.rank_at_risk(dealers)
    }

    /// The top `n` dealers by revenue, descending. The sort is stable, so
    /// revenue ties keep their input order.
    pub fn top_n_by_revenue(&self, dealers: &[DealerRecord], n: usize) -> Vec<DealerRecord> {
        let mut sorted = dealers.to_vec();
        sorted.sort_by(|a, b| b.revenue_usd.cmp(&a.revenue_usd));
        sorted.truncate(n);
        sorted
    }

    /// Ranked preview rows from the financial detail records: top `n` by
    /// revenue, descending, stable for ties.
    pub fn top_financial_rows(
        &self,
        records: &[FinancialRecord],
        n: usize,
    ) -> Vec<RankedFinancialRow> {
        let mut sorted = records.to_vec();
        sorted.sort_by(|a, b| b.revenue.cmp(&a.revenue));
        sorted
            .into_iter()
            .take(n)
            .enumerate()
            .map(|(index, record)| RankedFinancialRow {
                rank: index + 1,
                dealer_name: record.dealer_name,
                brand: record.brand,
                revenue: record.revenue,
                operating_margin_pct: record.operating_margin_pct,
            })
            .collect()
    }

    // --- Regional and trend rollups ---

    /// Groups dealers by region, in first-seen order, reporting each
    /// group's total backlog and mean DSO rounded to whole numbers
    /// (half-up).
    pub fn rollup_by_region(&self, dealers: &[DealerRecord]) -> Vec<RegionRollup> {
        struct Group {
            region: Region,
            backlog: Decimal,
            dso_sum: u64,
            count: u64,
        }

        let mut groups: Vec<Group> = Vec::new();
        for dealer in dealers {
            match groups.iter_mut().find(|g| g.region == dealer.region) {
                Some(group) => {
                    group.backlog += dealer.backlog_usd;
                    group.dso_sum += u64::from(dealer.dso_days);
                    group.count += 1;
                }
                None => groups.push(Group {
                    region: dealer.region,
                    backlog: dealer.backlog_usd,
                    dso_sum: u64::from(dealer.dso_days),
                    count: 1,
                }),
            }
        }

        groups
            .into_iter()
            .map(|group| RegionRollup {
                region: group.region,
                total_backlog_usd: round_half_up(group.backlog),
                avg_dso_days: round_half_up(
                    Decimal::from(group.dso_sum) / Decimal::from(group.count),
                ),
            })
            .collect()
    }

    /// Builds the margin-trend chart series for the given dealers: one row
    /// per quarter, Q1 through Q4, with a named point per dealer.
    ///
    /// A dealer missing an observation for a quarter contributes `None`,
    /// never zero, so charts can show a gap instead of a dip.
    pub fn margin_trend_series(&self, dealers: &[DealerRecord]) -> Vec<TrendRow> {
        Quarter::ALL
            .iter()
            .map(|&quarter| TrendRow {
                quarter,
                points: dealers
                    .iter()
                    .map(|dealer| DealerMarginPoint {
                        dealer: dealer.name.clone(),
                        margin_pct: dealer.margin_for(quarter),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Computes padded Y-axis bounds over the named dealers' values in a
    /// trend series.
    ///
    /// No values at all yields the default domain. The padding is 15% of
    /// the range, or 1 when every value is identical; the lower bound
    /// never goes below zero.
    pub fn axis_domain(&self, rows: &[TrendRow], dealer_names: &[&str]) -> AxisDomain {
        let values: Vec<Decimal> = rows
            .iter()
            .flat_map(|row| row.points.iter())
            .filter(|point| dealer_names.contains(&point.dealer.as_str()))
            .filter_map(|point| point.margin_pct)
            .collect();

        let (Some(min), Some(max)) = (
            values.iter().copied().min(),
            values.iter().copied().max(),
        ) else {
            return AxisDomain::DEFAULT;
        };

        let padding = if max == min {
            Decimal::ONE
        } else {
            (max - min) * AXIS_PADDING_RATIO
        };
        AxisDomain {
            lower: (min - padding).floor().max(Decimal::ZERO),
            upper: (max + padding).ceil(),
        }
    }

    // --- Revenue lookups ---

    /// Resolves the revenue-by-brand view for a year under the given brand
    /// and region selections.
    ///
    /// Resolution order: a regional sub-table when a region is selected
    /// and one exists (narrowed to a single brand if one is selected),
    /// else the selected brand's self entry, else the year's unfiltered
    /// mapping. Missing brand values resolve to zero; an unknown year
    /// resolves to the empty view.
    pub fn revenue_by_brand(
        &self,
        table: &BrandRevenueTable,
        year: i32,
        brand: Selection<Brand>,
        region: Selection<Region>,
    ) -> Vec<BrandRevenue> {
        if let Selection::Only(region) = region {
            if let Some(scope) = table.scope(year, RevenueScope::Region(region)) {
                return match brand {
                    Selection::All => scope
                        .iter()
                        .map(|(&brand, &revenue_bn)| BrandRevenue { brand, revenue_bn })
                        .collect(),
                    Selection::Only(brand) => vec![BrandRevenue {
                        brand,
                        revenue_bn: scope.get(&brand).copied().unwrap_or(Decimal::ZERO),
                    }],
                };
            }
            // No regional sub-table: fall through to the brand resolution.
        }

        if let Selection::Only(brand) = brand {
            let revenue_bn = table
                .scope(year, RevenueScope::Brand(brand))
                .and_then(|scope| scope.get(&brand))
                .copied()
                .unwrap_or(Decimal::ZERO);
            return vec![BrandRevenue { brand, revenue_bn }];
        }

        match table.scope(year, RevenueScope::All) {
            Some(scope) => scope
                .iter()
                .map(|(&brand, &revenue_bn)| BrandRevenue { brand, revenue_bn })
                .collect(),
            None => {
                tracing::debug!(year, "no revenue reference data for fiscal year");
                Vec::new()
            }
        }
    }

    /// The year's unfiltered revenue mapping with each brand's share of
    /// the total, for donut/mix charts. Shares are zero when the total is.
    pub fn revenue_mix(&self, table: &BrandRevenueTable, year: i32) -> Vec<BrandShare> {
        let Some(scope) = table.scope(year, RevenueScope::All) else {
            return Vec::new();
        };
        let total: Decimal = scope.values().copied().sum();
        scope
            .iter()
            .map(|(&brand, &revenue_bn)| BrandShare {
                brand,
                revenue_bn,
                share_pct: if total.is_zero() {
                    Decimal::ZERO
                } else {
                    revenue_bn / total * dec!(100)
                },
            })
            .collect()
    }

    /// Collapses a year's monthly margin observations into quarterly
    /// points, each quarter reporting its latest month's margin. Quarters
    /// with no observations are omitted.
    pub fn quarterly_margin_trend(&self, monthly: &[MonthlyMargin]) -> Vec<QuarterlyMargin> {
        Quarter::ALL
            .iter()
            .filter_map(|&quarter| {
                monthly
                    .iter()
                    .filter(|m| m.month.quarter() == quarter)
                    .last()
                    .map(|m| QuarterlyMargin {
                        quarter,
                        margin_pct: m.margin_pct,
                    })
            })
            .collect()
    }

    // --- Table projections ---

    /// Projects financial records into detail-table rows, badging each by
    /// its backlog amount.
    pub fn financial_table_rows(&self, records: &[FinancialRecord]) -> Vec<FinancialTableRow> {
        records
            .iter()
            .map(|record| FinancialTableRow {
                dealer_name: record.dealer_name.clone(),
                brand: record.brand,
                region: record.region,
                revenue: record.revenue,
                gross_margin_pct: record.gross_margin_pct,
                operating_margin_pct: record.operating_margin_pct,
                backlog: record.backlog,
                backlog_risk: self.risk.backlog_risk_for(record.backlog),
            })
            .collect()
    }
}

/// Rounds to the nearest whole number, halves away from zero.
fn round_half_up(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}
