use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three dealer network brands.
///
/// Variant order doubles as the canonical display order for charts and
/// tables (TMH, Raymond, THD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Brand {
    #[serde(rename = "TMH")]
    Tmh,
    Raymond,
    #[serde(rename = "THD")]
    Thd,
}

impl Brand {
    /// All brands in canonical display order.
    pub const ALL: [Brand; 3] = [Brand::Tmh, Brand::Raymond, Brand::Thd];
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Brand::Tmh => "TMH",
            Brand::Raymond => "Raymond",
            Brand::Thd => "THD",
        };
        write!(f, "{}", s)
    }
}

/// Sales region a dealer or financial record is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Region {
    #[serde(rename = "North America")]
    NorthAmerica,
    #[serde(rename = "EMEA")]
    Emea,
    #[serde(rename = "APAC")]
    Apac,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Region::NorthAmerica => "North America",
            Region::Emea => "EMEA",
            Region::Apac => "APAC",
        };
        write!(f, "{}", s)
    }
}

/// Dealer classification by strategic importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Tier {
    Strategic,
    Core,
    Emerging,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tier::Strategic => "Strategic",
            Tier::Core => "Core",
            Tier::Emerging => "Emerging",
        };
        write!(f, "{}", s)
    }
}

/// Qualitative risk level attached to a dealer's order backlog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BacklogRisk {
    Low,
    Medium,
    High,
}

impl fmt::Display for BacklogRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BacklogRisk::Low => "Low",
            BacklogRisk::Medium => "Medium",
            BacklogRisk::High => "High",
        };
        write!(f, "{}", s)
    }
}

/// Fiscal quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    /// The four quarters in chronological order.
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        };
        write!(f, "{}", s)
    }
}

/// Calendar month within a fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// The twelve months in chronological order.
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// Returns the fiscal quarter this month falls in.
    pub fn quarter(&self) -> Quarter {
        match self {
            Month::Jan | Month::Feb | Month::Mar => Quarter::Q1,
            Month::Apr | Month::May | Month::Jun => Quarter::Q2,
            Month::Jul | Month::Aug | Month::Sep => Quarter::Q3,
            Month::Oct | Month::Nov | Month::Dec => Quarter::Q4,
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Display unit attached to a KPI metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "B")]
    Billions,
    #[serde(rename = "%")]
    Percent,
    #[serde(rename = "days")]
    Days,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Unit::Billions => "B",
            Unit::Percent => "%",
            Unit::Days => "days",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brand_display_order_matches_variant_order() {
        let mut sorted = vec![Brand::Thd, Brand::Tmh, Brand::Raymond];
        sorted.sort();
        assert_eq!(sorted, vec![Brand::Tmh, Brand::Raymond, Brand::Thd]);
    }

    #[test]
    fn month_maps_to_its_quarter() {
        assert_eq!(Month::Jan.quarter(), Quarter::Q1);
        assert_eq!(Month::Jun.quarter(), Quarter::Q2);
        assert_eq!(Month::Sep.quarter(), Quarter::Q3);
        assert_eq!(Month::Dec.quarter(), Quarter::Q4);
    }

    #[test]
    fn region_serializes_with_spaces() {
        let json = serde_json::to_string(&Region::NorthAmerica).unwrap();
        assert_eq!(json, "\"North America\"");
    }
}
