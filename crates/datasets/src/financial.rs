//! The unified financial model: detailed metrics, KPI baselines, revenue
//! lookup tables, and margin trends per fiscal year.

use core_types::{
    Brand, BrandRevenueTable, BrandWorkingCapital, FinancialRecord, KpiBaseline, KpiMetric, Month,
    MonthlyMargin, Region, RevenueScope, Unit,
};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

/// The fiscal years the reference tables cover, oldest first.
pub const FISCAL_YEARS: [i32; 2] = [2023, 2024];

fn metric(value: Decimal, change: Decimal, unit: Unit) -> KpiMetric {
    KpiMetric::new(value, change, unit)
}

fn record(
    brand: Brand,
    dealer_name: &str,
    region: Region,
    revenue: Decimal,
    gross_margin_pct: Decimal,
    operating_margin_pct: Decimal,
    backlog: Decimal,
) -> FinancialRecord {
    FinancialRecord {
        brand,
        dealer_name: dealer_name.to_string(),
        region,
        revenue,
        gross_margin_pct,
        operating_margin_pct,
        backlog,
    }
}

/// Company-level KPI baselines keyed by fiscal year. Changes are versus the
/// prior fiscal year.
static KPI_BASELINES: Lazy<HashMap<i32, KpiBaseline>> = Lazy::new(|| {
    HashMap::from([
        (
            2023,
            KpiBaseline {
                total_revenue: metric(dec!(6.8), dec!(4.2), Unit::Billions),
                operating_margin: metric(dec!(13.6), dec!(0.8), Unit::Percent),
                backlog: metric(dec!(1.4), dec!(2.1), Unit::Billions),
                days_sales_outstanding: metric(dec!(50), dec!(2), Unit::Days),
            },
        ),
        (
            2024,
            KpiBaseline {
                total_revenue: metric(dec!(7.2), dec!(5.4), Unit::Billions),
                operating_margin: metric(dec!(14.8), dec!(1.2), Unit::Percent),
                backlog: metric(dec!(1.3), dec!(-3.1), Unit::Billions),
                days_sales_outstanding: metric(dec!(46), dec!(-4), Unit::Days),
            },
        ),
    ])
});

/// Revenue by brand in USD billions, per fiscal year, with regional
/// sub-tables and per-brand self entries.
static BRAND_REVENUE: Lazy<BrandRevenueTable> = Lazy::new(|| {
    use Brand::{Raymond, Thd, Tmh};

    let mut table = BrandRevenueTable::new();

    table.insert(
        2023,
        RevenueScope::All,
        [(Tmh, dec!(3.2)), (Raymond, dec!(2.1)), (Thd, dec!(1.5))],
    );
    table.insert(2023, RevenueScope::Brand(Tmh), [(Tmh, dec!(3.2))]);
    table.insert(2023, RevenueScope::Brand(Raymond), [(Raymond, dec!(2.1))]);
    table.insert(2023, RevenueScope::Brand(Thd), [(Thd, dec!(1.5))]);
    table.insert(
        2023,
        RevenueScope::Region(Region::NorthAmerica),
        [(Tmh, dec!(1.8)), (Raymond, dec!(1.2)), (Thd, dec!(0.9))],
    );
    table.insert(
        2023,
        RevenueScope::Region(Region::Emea),
        [(Tmh, dec!(0.9)), (Raymond, dec!(0.6)), (Thd, dec!(0.4))],
    );
    table.insert(
        2023,
        RevenueScope::Region(Region::Apac),
        [(Tmh, dec!(0.5)), (Raymond, dec!(0.3)), (Thd, dec!(0.2))],
    );

    table.insert(
        2024,
        RevenueScope::All,
        [(Tmh, dec!(3.5)), (Raymond, dec!(2.3)), (Thd, dec!(1.4))],
    );
    table.insert(2024, RevenueScope::Brand(Tmh), [(Tmh, dec!(3.5))]);
    table.insert(2024, RevenueScope::Brand(Raymond), [(Raymond, dec!(2.3))]);
    table.insert(2024, RevenueScope::Brand(Thd), [(Thd, dec!(1.4))]);
    table.insert(
        2024,
        RevenueScope::Region(Region::NorthAmerica),
        [(Tmh, dec!(2.0)), (Raymond, dec!(1.3)), (Thd, dec!(1.0))],
    );
    table.insert(
        2024,
        RevenueScope::Region(Region::Emea),
        [(Tmh, dec!(1.0)), (Raymond, dec!(0.7)), (Thd, dec!(0.3))],
    );
    table.insert(
        2024,
        RevenueScope::Region(Region::Apac),
        [(Tmh, dec!(0.5)), (Raymond, dec!(0.3)), (Thd, dec!(0.1))],
    );

    table
});

/// Blended operating margin by month, per fiscal year.
static MARGIN_TREND: Lazy<HashMap<i32, Vec<MonthlyMargin>>> = Lazy::new(|| {
    let monthly = |margins: [Decimal; 12]| -> Vec<MonthlyMargin> {
        Month::ALL
            .iter()
            .zip(margins)
            .map(|(&month, margin_pct)| MonthlyMargin { month, margin_pct })
            .collect()
    };

    HashMap::from([
        (
            2023,
            monthly([
                dec!(12.8),
                dec!(13.1),
                dec!(13.5),
                dec!(13.2),
                dec!(13.8),
                dec!(14.0),
                dec!(13.6),
                dec!(13.9),
                dec!(13.7),
                dec!(13.5),
                dec!(13.4),
                dec!(13.6),
            ]),
        ),
        (
            2024,
            monthly([
                dec!(14.2),
                dec!(14.5),
                dec!(14.8),
                dec!(15.1),
                dec!(14.9),
                dec!(15.0),
                dec!(14.7),
                dec!(14.8),
                dec!(14.6),
                dec!(14.5),
                dec!(14.7),
                dec!(14.8),
            ]),
        ),
    ])
});

/// Detailed financial metrics by dealer and region. Revenue and backlog in
/// USD millions.
static DETAILED_METRICS: Lazy<Vec<FinancialRecord>> = Lazy::new(|| {
    use Brand::{Raymond, Thd, Tmh};
    use Region::{Apac, Emea, NorthAmerica};

    vec![
        record(Tmh, "Lift Systems Inc.", NorthAmerica, dec!(245.8), dec!(28.5), dec!(16.2), dec!(42.3)),
        record(Raymond, "Warehouse Solutions LLC", NorthAmerica, dec!(189.4), dec!(32.1), dec!(18.5), dec!(38.7)),
        record(Thd, "Heavy Equipment Co.", NorthAmerica, dec!(156.2), dec!(24.8), dec!(14.3), dec!(29.5)),
        record(Tmh, "European Material Handling", Emea, dec!(198.7), dec!(27.2), dec!(15.8), dec!(35.4)),
        record(Raymond, "EMEA Distribution Partners", Emea, dec!(167.3), dec!(30.5), dec!(17.2), dec!(31.2)),
        record(Thd, "Heavy Duty Europe", Emea, dec!(124.6), dec!(23.4), dec!(13.1), dec!(22.8)),
        record(Tmh, "Asia Pacific Materials", Apac, dec!(178.9), dec!(26.8), dec!(15.4), dec!(33.1)),
        record(Raymond, "APAC Warehouse Systems", Apac, dec!(145.2), dec!(29.7), dec!(16.8), dec!(28.4)),
        record(Thd, "Heavy Equipment Asia", Apac, dec!(112.5), dec!(22.9), dec!(12.6), dec!(19.7)),
        record(Tmh, "North American Lift Corp", NorthAmerica, dec!(223.1), dec!(27.9), dec!(15.9), dec!(39.8)),
        record(Raymond, "Material Handling Solutions", NorthAmerica, dec!(201.6), dec!(31.4), dec!(19.1), dec!(41.2)),
        record(Thd, "Industrial Equipment Group", NorthAmerica, dec!(168.9), dec!(25.2), dec!(14.7), dec!(32.1)),
    ]
});

/// Static working-capital view by brand: open backlog (USD millions) and
/// collection period.
static WORKING_CAPITAL: Lazy<Vec<BrandWorkingCapital>> = Lazy::new(|| {
    vec![
        BrandWorkingCapital {
            brand: Brand::Tmh,
            backlog_usd: dec!(1300),
            dso_days: 44,
        },
        BrandWorkingCapital {
            brand: Brand::Raymond,
            backlog_usd: dec!(900),
            dso_days: 49,
        },
        BrandWorkingCapital {
            brand: Brand::Thd,
            backlog_usd: dec!(600),
            dso_days: 38,
        },
    ]
});

/// The fiscal years with reference data, oldest first.
pub fn fiscal_years() -> &'static [i32] {
    &FISCAL_YEARS
}

/// The detailed financial metrics, in canonical order.
pub fn financial_records() -> &'static [FinancialRecord] {
    &DETAILED_METRICS
}

/// The precomputed company-level KPI baseline for a fiscal year, if known.
pub fn kpi_baseline(year: i32) -> Option<&'static KpiBaseline> {
    KPI_BASELINES.get(&year)
}

/// The nested revenue-by-brand lookup table.
pub fn revenue_table() -> &'static BrandRevenueTable {
    &BRAND_REVENUE
}

/// The monthly operating-margin trend for a fiscal year, if known.
pub fn margin_trend(year: i32) -> Option<&'static [MonthlyMargin]> {
    MARGIN_TREND.get(&year).map(Vec::as_slice)
}

/// The static working-capital rows, in brand display order.
pub fn working_capital_by_brand() -> &'static [BrandWorkingCapital] {
    &WORKING_CAPITAL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_financial_record_is_valid() {
        for record in financial_records() {
            record.validate().expect("financial dataset must satisfy record invariants");
        }
    }

    #[test]
    fn every_fiscal_year_has_full_reference_coverage() {
        for &year in fiscal_years() {
            assert!(kpi_baseline(year).is_some(), "missing baseline for {year}");
            assert!(revenue_table().scope(year, RevenueScope::All).is_some());
            let trend = margin_trend(year).expect("missing margin trend");
            assert_eq!(trend.len(), 12);
            let months: Vec<Month> = trend.iter().map(|m| m.month).collect();
            assert_eq!(months, Month::ALL);
        }
    }

    #[test]
    fn unknown_year_has_no_reference_data() {
        assert!(kpi_baseline(2030).is_none());
        assert!(margin_trend(2030).is_none());
        assert!(revenue_table().scope(2030, RevenueScope::All).is_none());
    }

    #[test]
    fn regional_revenue_sums_to_the_brand_totals() {
        // The regional sub-tables are a decomposition of the unfiltered view.
        for &year in fiscal_years() {
            let all = revenue_table().scope(year, RevenueScope::All).unwrap();
            for &brand in &Brand::ALL {
                let regional_sum: Decimal = [Region::NorthAmerica, Region::Emea, Region::Apac]
                    .iter()
                    .filter_map(|&r| revenue_table().scope(year, RevenueScope::Region(r)))
                    .filter_map(|scope| scope.get(&brand))
                    .sum();
                assert_eq!(regional_sum, all[&brand], "{brand} {year}");
            }
        }
    }
}
