//! # Analytics Query Engine
//!
//! This crate derives every dashboard view from the flat record sets: KPI
//! rollups, grouped aggregates, rankings, and chart-ready projections.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** a pure logic crate. It has no knowledge of where
//!   the records come from or how the views are rendered.
//! - **Stateless Calculation:** the `AnalyticsEngine` holds no query state.
//!   Callers pass fresh `FilterCriteria` on every invocation and receive
//!   new view-model values; source records are never mutated.
//! - **Degrade, don't fail:** empty result sets and unknown fiscal years
//!   produce zeroed summaries flagged `insufficient_data`, never errors
//!   or NaN.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: the struct that contains the query logic.
//! - The report structs (`DealerKpiSummary`, `FinancialKpiSummary`,
//!   `RegionRollup`, `TrendRow`, ...) that carry results to a
//!   presentation layer.

pub mod engine;
pub mod report;

pub use engine::AnalyticsEngine;
pub use report::{
    AxisDomain, BrandRevenue, BrandShare, DealerKpiSummary, DealerMarginPoint,
    FinancialKpiSummary, FinancialTableRow, QuarterlyMargin, RankedFinancialRow, RegionRollup,
    TrendRow,
};
