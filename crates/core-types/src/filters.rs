use crate::enums::{Brand, Region, Tier};
use crate::error::CoreError;
use crate::structs::{DealerRecord, FinancialRecord};
use serde::{Deserialize, Serialize};

/// A single filter dimension: either the wildcard ("All") or one concrete
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T: PartialEq + Copy> Selection<T> {
    /// Returns true when the candidate passes this dimension. The wildcard
    /// passes everything.
    pub fn matches(&self, candidate: T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(value) => *value == candidate,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Selection::Only(v),
            None => Selection::All,
        }
    }
}

/// Exposes the filterable dimensions of a record type.
///
/// Record types without a tier (the financial detail rows) report `None`,
/// and the tier criterion is ignored for them.
pub trait FilterDimensions {
    fn brand(&self) -> Brand;
    fn region(&self) -> Region;
    fn tier(&self) -> Option<Tier> {
        None
    }
}

impl FilterDimensions for DealerRecord {
    fn brand(&self) -> Brand {
        self.brand
    }

    fn region(&self) -> Region {
        self.region
    }

    fn tier(&self) -> Option<Tier> {
        Some(self.tier)
    }
}

impl FilterDimensions for FinancialRecord {
    fn brand(&self) -> Brand {
        self.brand
    }

    fn region(&self) -> Region {
        self.region
    }
}

/// The set of user-selected filters a query runs under.
///
/// Criteria are ephemeral: the presentation layer constructs a fresh value
/// per query, the engine never stores one. The year selects reference
/// tables (baselines, revenue lookups); the record sets carry no year
/// dimension, so it does not participate in record matching.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub year: i32,
    pub brand: Selection<Brand>,
    pub region: Selection<Region>,
    pub tier: Selection<Tier>,
}

impl FilterCriteria {
    /// Criteria for a fiscal year with every other dimension on the
    /// wildcard.
    pub fn for_year(year: i32) -> Self {
        Self {
            year,
            brand: Selection::All,
            region: Selection::All,
            tier: Selection::All,
        }
    }

    /// True when a record passes every non-wildcard dimension. Dimensions
    /// the record type does not carry are ignored.
    pub fn matches<T: FilterDimensions>(&self, record: &T) -> bool {
        if !self.brand.matches(record.brand()) {
            return false;
        }
        if !self.region.matches(record.region()) {
            return false;
        }
        match record.tier() {
            Some(tier) => self.tier.matches(tier),
            None => true,
        }
    }

    /// Flags a criteria year that is absent from the reference data.
    ///
    /// An unknown year is not fatal (queries degrade to empty results); this
    /// exists so the boundary can warn the caller.
    pub fn validate_year(&self, known_years: &[i32]) -> Result<(), CoreError> {
        if known_years.contains(&self.year) {
            Ok(())
        } else {
            Err(CoreError::InvalidInput(
                "fiscal year".to_string(),
                format!("{} is not present in the reference data", self.year),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{BacklogRisk, Quarter};
    use crate::structs::MarginTrendPoint;
    use rust_decimal_macros::dec;

    fn dealer(brand: Brand, region: Region, tier: Tier) -> DealerRecord {
        DealerRecord {
            id: "D9000".to_string(),
            name: "Fixture".to_string(),
            brand,
            region,
            tier,
            revenue_usd: dec!(100),
            margin_pct: dec!(15),
            backlog_usd: dec!(30),
            backlog_risk: BacklogRisk::Low,
            dso_days: 40,
            margin_trend: Quarter::ALL
                .iter()
                .map(|&quarter| MarginTrendPoint {
                    quarter,
                    margin_pct: dec!(15),
                })
                .collect(),
        }
    }

    fn financial(brand: Brand, region: Region) -> FinancialRecord {
        FinancialRecord {
            brand,
            dealer_name: "Fixture".to_string(),
            region,
            revenue: dec!(100),
            gross_margin_pct: dec!(25),
            operating_margin_pct: dec!(15),
            backlog: dec!(30),
        }
    }

    #[test]
    fn wildcards_match_everything() {
        let criteria = FilterCriteria::for_year(2024);
        assert!(criteria.matches(&dealer(Brand::Thd, Region::Apac, Tier::Emerging)));
        assert!(criteria.matches(&financial(Brand::Raymond, Region::Emea)));
    }

    #[test]
    fn concrete_dimensions_must_all_match() {
        let criteria = FilterCriteria {
            brand: Selection::Only(Brand::Tmh),
            region: Selection::Only(Region::Emea),
            ..FilterCriteria::for_year(2024)
        };
        assert!(criteria.matches(&dealer(Brand::Tmh, Region::Emea, Tier::Core)));
        assert!(!criteria.matches(&dealer(Brand::Tmh, Region::Apac, Tier::Core)));
        assert!(!criteria.matches(&dealer(Brand::Thd, Region::Emea, Tier::Core)));
    }

    #[test]
    fn tier_criterion_is_ignored_for_financial_records() {
        let criteria = FilterCriteria {
            tier: Selection::Only(Tier::Strategic),
            ..FilterCriteria::for_year(2024)
        };
        assert!(criteria.matches(&financial(Brand::Tmh, Region::NorthAmerica)));
        assert!(!criteria.matches(&dealer(Brand::Tmh, Region::NorthAmerica, Tier::Core)));
    }

    #[test]
    fn selection_from_option() {
        assert_eq!(Selection::<Brand>::from(None), Selection::All);
        assert_eq!(Selection::from(Some(Brand::Thd)), Selection::Only(Brand::Thd));
    }

    #[test]
    fn unknown_year_is_flagged_but_not_fatal() {
        let criteria = FilterCriteria::for_year(2030);
        assert!(criteria.validate_year(&[2023, 2024]).is_err());
        assert!(FilterCriteria::for_year(2024).validate_year(&[2023, 2024]).is_ok());
    }
}
