//! The dealer network records consumed by the dealer analytics views.
//!
//! The collection is shaped for expressive charts: a spread of
//! revenue/margin quadrants, distinct margin trajectories, and regional
//! variation, including a cluster of troubled dealers for the at-risk views.

use core_types::{BacklogRisk, Brand, DealerRecord, MarginTrendPoint, Quarter, Region, Tier};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[allow(clippy::too_many_arguments)]
fn dealer(
    id: &str,
    name: &str,
    brand: Brand,
    region: Region,
    tier: Tier,
    revenue_usd: Decimal,
    margin_pct: Decimal,
    backlog_usd: Decimal,
    backlog_risk: BacklogRisk,
    dso_days: u32,
    quarterly_margins: [Decimal; 4],
) -> DealerRecord {
    let margin_trend = Quarter::ALL
        .iter()
        .zip(quarterly_margins)
        .map(|(&quarter, margin_pct)| MarginTrendPoint { quarter, margin_pct })
        .collect();
    DealerRecord {
        id: id.to_string(),
        name: name.to_string(),
        brand,
        region,
        tier,
        revenue_usd,
        margin_pct,
        backlog_usd,
        backlog_risk,
        dso_days,
        margin_trend,
    }
}

static DEALER_RECORDS: Lazy<Vec<DealerRecord>> = Lazy::new(|| {
    use BacklogRisk::{High, Low, Medium};
    use Brand::{Raymond, Thd, Tmh};
    use Region::{Apac, Emea, NorthAmerica};
    use Tier::{Core, Emerging, Strategic};

    vec![
        dealer(
            "D1001", "Lift Systems Inc.", Tmh, NorthAmerica, Strategic,
            dec!(258.4), dec!(17.8), dec!(42.3), Low, 38,
            [dec!(16.2), dec!(16.8), dec!(17.3), dec!(17.8)],
        ),
        dealer(
            "D2001", "Material Handling Solutions", Raymond, NorthAmerica, Strategic,
            dec!(245.6), dec!(19.2), dec!(31.2), Low, 35,
            [dec!(18.5), dec!(18.8), dec!(19.0), dec!(19.2)],
        ),
        dealer(
            "D1002", "North American Lift Corp", Tmh, NorthAmerica, Strategic,
            dec!(232.7), dec!(16.4), dec!(48.5), Low, 41,
            [dec!(15.8), dec!(16.0), dec!(16.2), dec!(16.4)],
        ),
        dealer(
            "D1003", "European Material Handling", Tmh, Emea, Core,
            dec!(198.7), dec!(14.5), dec!(52.8), Medium, 48,
            [dec!(15.2), dec!(14.9), dec!(14.7), dec!(14.5)],
        ),
        dealer(
            "D2002", "Warehouse Solutions LLC", Raymond, NorthAmerica, Core,
            dec!(189.4), dec!(18.1), dec!(35.2), Low, 39,
            [dec!(17.5), dec!(17.8), dec!(18.0), dec!(18.1)],
        ),
        dealer(
            "D3001", "Heavy Duty Equipment Co", Thd, NorthAmerica, Core,
            dec!(175.3), dec!(11.2), dec!(68.4), High, 54,
            [dec!(12.8), dec!(12.2), dec!(11.6), dec!(11.2)],
        ),
        dealer(
            "D2003", "European Warehouse Systems", Raymond, Emea, Core,
            dec!(148.5), dec!(18.3), dec!(28.9), Low, 42,
            [dec!(17.8), dec!(18.0), dec!(18.2), dec!(18.3)],
        ),
        dealer(
            "D1004", "Pacific Lift Systems", Tmh, Apac, Core,
            dec!(142.8), dec!(13.8), dec!(38.6), Medium, 44,
            [dec!(13.5), dec!(13.6), dec!(13.7), dec!(13.8)],
        ),
        dealer(
            "D3002", "Industrial Equipment Group", Thd, Emea, Emerging,
            dec!(135.7), dec!(9.8), dec!(72.2), High, 58,
            [dec!(11.2), dec!(10.5), dec!(10.1), dec!(9.8)],
        ),
        dealer(
            "D1005", "Midwest Material Handling", Tmh, NorthAmerica, Core,
            dec!(128.9), dec!(12.1), dec!(55.7), High, 51,
            [dec!(13.5), dec!(13.0), dec!(12.5), dec!(12.1)],
        ),
        dealer(
            "D2004", "Asia Pacific Material Handling", Raymond, Apac, Emerging,
            dec!(122.4), dec!(17.2), dec!(24.8), Low, 36,
            [dec!(16.5), dec!(16.8), dec!(17.0), dec!(17.2)],
        ),
        dealer(
            "D3003", "Heavy Machinery Distributors", Thd, NorthAmerica, Emerging,
            dec!(98.6), dec!(8.5), dec!(78.3), High, 62,
            [dec!(10.2), dec!(9.5), dec!(9.0), dec!(8.5)],
        ),
        dealer(
            "D1006", "Atlantic Lift Solutions", Tmh, NorthAmerica, Core,
            dec!(95.2), dec!(11.8), dec!(48.5), Medium, 47,
            [dec!(12.2), dec!(12.0), dec!(11.9), dec!(11.8)],
        ),
        dealer(
            "D2005", "Nordic Warehouse Equipment", Raymond, Emea, Core,
            dec!(89.3), dec!(16.8), dec!(22.1), Low, 40,
            [dec!(16.5), dec!(16.6), dec!(16.7), dec!(16.8)],
        ),
        dealer(
            "D3004", "Pacific Heavy Equipment", Thd, Apac, Emerging,
            dec!(76.4), dec!(8.2), dec!(65.1), High, 64,
            [dec!(9.8), dec!(9.2), dec!(8.7), dec!(8.2)],
        ),
        dealer(
            "D1007", "Gulf Coast Material Handling", Tmh, NorthAmerica, Emerging,
            dec!(72.1), dec!(10.5), dec!(45.8), Medium, 49,
            [dec!(11.2), dec!(10.9), dec!(10.7), dec!(10.5)],
        ),
        dealer(
            "D2006", "Mediterranean Lift Systems", Raymond, Emea, Emerging,
            dec!(68.5), dec!(15.2), dec!(20.4), Low, 37,
            [dec!(14.8), dec!(15.0), dec!(15.1), dec!(15.2)],
        ),
        dealer(
            "D3005", "Continental Heavy Duty", Thd, NorthAmerica, Emerging,
            dec!(58.2), dec!(8.1), dec!(72.7), High, 68,
            [dec!(9.5), dec!(9.0), dec!(8.5), dec!(8.1)],
        ),
        dealer(
            "D1008", "Great Lakes Material Handling", Tmh, NorthAmerica, Core,
            dec!(165.8), dec!(15.6), dec!(41.2), Low, 40,
            [dec!(14.8), dec!(15.1), dec!(15.4), dec!(15.6)],
        ),
        dealer(
            "D2007", "Scandinavian Warehouse Solutions", Raymond, Emea, Core,
            dec!(112.3), dec!(17.9), dec!(26.5), Low, 38,
            [dec!(17.2), dec!(17.5), dec!(17.7), dec!(17.9)],
        ),
        dealer(
            "D3006", "Southeast Heavy Equipment", Thd, NorthAmerica, Emerging,
            dec!(82.4), dec!(9.5), dec!(58.9), High, 59,
            [dec!(10.8), dec!(10.2), dec!(9.8), dec!(9.5)],
        ),
    ]
});

/// The full dealer network, in canonical order.
pub fn dealer_records() -> &'static [DealerRecord] {
    &DEALER_RECORDS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_dealer_record_is_valid() {
        for record in dealer_records() {
            record.validate().expect("dealer dataset must satisfy record invariants");
        }
    }

    #[test]
    fn dealer_ids_are_unique() {
        let ids: HashSet<&str> = dealer_records().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids.len(), dealer_records().len());
    }

    #[test]
    fn network_covers_every_brand_and_region() {
        let records = dealer_records();
        for brand in Brand::ALL {
            assert!(records.iter().any(|d| d.brand == brand));
        }
        for region in [Region::NorthAmerica, Region::Emea, Region::Apac] {
            assert!(records.iter().any(|d| d.region == region));
        }
    }
}
