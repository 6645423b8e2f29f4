//! # Reference Datasets
//!
//! The static record collections and lookup tables every query runs over.
//! Everything here is loaded exactly once, on first access, and never
//! mutated afterwards; the statics are `Sync`, so reads are safe from any
//! caller.
//!
//! ## Architectural Principles
//!
//! - **Data only:** this crate holds no query logic. The analytics crate
//!   derives every view from these collections.
//! - **Typed at the boundary:** the datasets are expressed directly in the
//!   `core-types` enums and structs, so malformed brands, regions, or risk
//!   levels cannot be represented.

pub mod dealers;
pub mod financial;

pub use dealers::dealer_records;
pub use financial::{
    financial_records, fiscal_years, kpi_baseline, margin_trend, revenue_table,
    working_capital_by_brand,
};
