pub mod enums;
pub mod error;
pub mod filters;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{BacklogRisk, Brand, Month, Quarter, Region, Tier, Unit};
pub use error::CoreError;
pub use filters::{FilterCriteria, FilterDimensions, Selection};
pub use structs::{
    BrandRevenueTable, BrandWorkingCapital, DealerRecord, FinancialRecord, KpiBaseline, KpiMetric,
    MarginTrendPoint, MonthlyMargin, RevenueScope,
};
