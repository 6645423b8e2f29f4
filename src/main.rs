use analytics::AnalyticsEngine;
use anyhow::Result;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use core_types::{Brand, FilterCriteria, KpiMetric, Region, Tier, Unit};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

/// The main entry point for the dealerscope analytics CLI.
fn main() {
    // Diagnostics go to stderr so the rendered tables stay clean on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Financial(args) => {
            if let Err(e) = handle_financial(args) {
                eprintln!("Error rendering financial dashboard: {}", e);
            }
        }
        Commands::Dealers(args) => {
            if let Err(e) = handle_dealers(args) {
                eprintln!("Error rendering dealer analytics: {}", e);
            }
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Terminal views over the unified dealer-network financial model.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the financial intelligence dashboard for a fiscal year.
    Financial(FilterArgs),

    /// Render the dealer analytics dashboard for a fiscal year.
    Dealers(FilterArgs),
}

#[derive(Parser)]
struct FilterArgs {
    /// The fiscal year to query. Defaults to the latest year with
    /// reference data.
    #[arg(long)]
    year: Option<i32>,

    /// Restrict the view to one brand.
    #[arg(long, value_enum)]
    brand: Option<Brand>,

    /// Restrict the view to one region.
    #[arg(long, value_enum)]
    region: Option<Region>,

    /// Restrict the view to one dealer tier (dealer views only).
    #[arg(long, value_enum)]
    tier: Option<Tier>,

    /// Emit the view models as JSON instead of rendered tables.
    #[arg(long)]
    json: bool,
}

impl FilterArgs {
    fn criteria(&self) -> FilterCriteria {
        let year = self.year.unwrap_or_else(|| {
            datasets::fiscal_years().iter().copied().max().unwrap_or(2024)
        });
        FilterCriteria {
            year,
            brand: self.brand.into(),
            region: self.region.into(),
            tier: self.tier.into(),
        }
    }
}

// ==============================================================================
// Command Handlers
// ==============================================================================

/// Renders the financial dashboard: KPI tiles, revenue views, margin trend,
/// and the detail table.
fn handle_financial(args: FilterArgs) -> Result<()> {
    let criteria = args.criteria();
    warn_on_unknown_year(&criteria);

    let engine = AnalyticsEngine::new();
    let records = engine.apply_filters(datasets::financial_records(), &criteria);
    let kpis = engine.financial_kpis(&records, &criteria, datasets::kpi_baseline(criteria.year));
    let revenue = engine.revenue_by_brand(
        datasets::revenue_table(),
        criteria.year,
        criteria.brand,
        criteria.region,
    );
    let mix = engine.revenue_mix(datasets::revenue_table(), criteria.year);
    let quarterly = datasets::margin_trend(criteria.year)
        .map(|monthly| engine.quarterly_margin_trend(monthly))
        .unwrap_or_default();
    let detail = engine.financial_table_rows(&records);
    let top = engine.top_financial_rows(&records, 5);

    if args.json {
        let payload = serde_json::json!({
            "criteria": criteria,
            "kpis": kpis,
            "revenue_by_brand": revenue,
            "revenue_mix": mix,
            "quarterly_margin_trend": quarterly,
            "detail": detail,
            "top_dealers": top,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("Financial Intelligence Dashboard (FY{})", criteria.year);
    println!();

    if kpis.insufficient_data {
        println!("No financial records match the selected filters.");
        println!();
    }

    let mut kpi_table = new_table(vec!["KPI", "Value", "vs prior year"]);
    kpi_table.add_row(vec![
        "Total Revenue (YTD)".to_string(),
        format_metric_value(&kpis.total_revenue),
        format_metric_change(&kpis.total_revenue),
    ]);
    kpi_table.add_row(vec![
        "Operating Margin (YTD)".to_string(),
        format_metric_value(&kpis.operating_margin),
        format_metric_change(&kpis.operating_margin),
    ]);
    kpi_table.add_row(vec![
        "Backlog".to_string(),
        format_metric_value(&kpis.backlog),
        format_metric_change(&kpis.backlog),
    ]);
    kpi_table.add_row(vec![
        "Days Sales Outstanding".to_string(),
        format_metric_value(&kpis.days_sales_outstanding),
        format_metric_change(&kpis.days_sales_outstanding),
    ]);
    println!("{kpi_table}");
    println!();

    println!("Revenue by Brand (USD billions)");
    let mut revenue_table = new_table(vec!["Brand", "Revenue"]);
    for row in &revenue {
        revenue_table.add_row(vec![row.brand.to_string(), format!("${:.1}B", row.revenue_bn)]);
    }
    println!("{revenue_table}");
    println!();

    println!("Revenue Mix");
    let mut mix_table = new_table(vec!["Brand", "Revenue", "Share"]);
    for row in &mix {
        mix_table.add_row(vec![
            row.brand.to_string(),
            format!("${:.1}B", row.revenue_bn),
            format!("{:.1}%", row.share_pct),
        ]);
    }
    println!("{mix_table}");
    println!();

    println!("Operating Margin Trend");
    let mut trend_table = new_table(vec!["Quarter", "Margin"]);
    for point in &quarterly {
        trend_table.add_row(vec![point.quarter.to_string(), format!("{:.1}%", point.margin_pct)]);
    }
    println!("{trend_table}");
    println!();

    println!("Working Capital by Brand");
    let mut wc_table = new_table(vec!["Brand", "Backlog ($M)", "DSO (days)"]);
    for row in datasets::working_capital_by_brand() {
        wc_table.add_row(vec![
            row.brand.to_string(),
            format!("{:.0}", row.backlog_usd),
            row.dso_days.to_string(),
        ]);
    }
    println!("{wc_table}");
    println!();

    println!("Detailed Metrics");
    let mut detail_table = new_table(vec![
        "Dealer", "Brand", "Region", "Revenue ($M)", "Gross Margin", "Op. Margin", "Backlog ($M)", "Backlog Risk",
    ]);
    for row in &detail {
        detail_table.add_row(vec![
            row.dealer_name.clone(),
            row.brand.to_string(),
            row.region.to_string(),
            format!("{:.1}", row.revenue),
            format!("{:.1}%", row.gross_margin_pct),
            format!("{:.1}%", row.operating_margin_pct),
            format!("{:.1}", row.backlog),
            row.backlog_risk.to_string(),
        ]);
    }
    println!("{detail_table}");
    println!();

    println!("Top Dealers by Revenue");
    let mut top_table = new_table(vec!["Rank", "Dealer", "Brand", "Revenue ($M)", "Op. Margin"]);
    for row in &top {
        top_table.add_row(vec![
            row.rank.to_string(),
            row.dealer_name.clone(),
            row.brand.to_string(),
            format!("{:.1}", row.revenue),
            format!("{:.1}%", row.operating_margin_pct),
        ]);
    }
    println!("{top_table}");

    Ok(())
}

/// Renders the dealer analytics dashboard: KPI tiles, regional rollup, the
/// at-risk list, and the top dealers' margin trend.
fn handle_dealers(args: FilterArgs) -> Result<()> {
    let criteria = args.criteria();
    warn_on_unknown_year(&criteria);

    let engine = AnalyticsEngine::new();
    let dealers = engine.apply_filters(datasets::dealer_records(), &criteria);
    let kpis = engine.dealer_kpis(&dealers);
    let rollup = engine.rollup_by_region(&dealers);
    let at_risk = engine.rank_at_risk(&dealers);
    let top = engine.top_n_by_revenue(&dealers, 3);
    let series = engine.margin_trend_series(&top);
    let names: Vec<&str> = top.iter().map(|d| d.name.as_str()).collect();
    let domain = engine.axis_domain(&series, &names);

    if args.json {
        let payload = serde_json::json!({
            "criteria": criteria,
            "kpis": kpis,
            "backlog_dso_by_region": rollup,
            "at_risk_dealers": at_risk,
            "top_dealers": top,
            "margin_trend": series,
            "margin_axis_domain": domain,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("Dealer Analytics Dashboard (FY{})", criteria.year);
    println!();

    if kpis.insufficient_data {
        println!("No dealers match the selected filters.");
        println!();
    }

    let mut kpi_table = new_table(vec!["KPI", "Value"]);
    kpi_table.add_row(vec![
        "Total Revenue".to_string(),
        format!("${:.2}B", kpis.total_revenue_bn),
    ]);
    kpi_table.add_row(vec![
        "Avg Margin".to_string(),
        format!("{:.1}%", kpis.avg_margin_pct),
    ]);
    kpi_table.add_row(vec!["At-Risk Dealers".to_string(), kpis.at_risk_count.to_string()]);
    kpi_table.add_row(vec![
        "Avg DSO".to_string(),
        format!("{:.0} days", kpis.avg_dso_days),
    ]);
    println!("{kpi_table}");
    println!();

    println!("Backlog and DSO by Region");
    let mut rollup_table = new_table(vec!["Region", "Backlog ($M)", "Avg DSO (days)"]);
    for row in &rollup {
        rollup_table.add_row(vec![
            row.region.to_string(),
            row.total_backlog_usd.to_string(),
            row.avg_dso_days.to_string(),
        ]);
    }
    println!("{rollup_table}");
    println!();

    println!("At-Risk Dealers");
    let mut risk_table = new_table(vec![
        "Dealer", "Brand", "Region", "Tier", "Margin", "Backlog Risk", "DSO (days)",
    ]);
    for dealer in &at_risk {
        risk_table.add_row(vec![
            dealer.name.clone(),
            dealer.brand.to_string(),
            dealer.region.to_string(),
            dealer.tier.to_string(),
            format!("{:.1}%", dealer.margin_pct),
            dealer.backlog_risk.to_string(),
            dealer.dso_days.to_string(),
        ]);
    }
    println!("{risk_table}");
    println!();

    println!("Margin Trend, Top Dealers by Revenue");
    let mut headers = vec!["Quarter".to_string()];
    headers.extend(names.iter().map(|n| n.to_string()));
    let mut trend_table = new_table_owned(headers);
    for row in &series {
        let mut cells = vec![row.quarter.to_string()];
        cells.extend(row.points.iter().map(|point| match point.margin_pct {
            Some(margin) => format!("{:.1}%", margin),
            None => "-".to_string(),
        }));
        trend_table.add_row(cells);
    }
    println!("{trend_table}");
    println!(
        "Suggested Y axis: {} to {}",
        domain.lower, domain.upper
    );

    Ok(())
}

// ==============================================================================
// Rendering Helpers
// ==============================================================================

fn new_table(headers: Vec<&str>) -> Table {
    new_table_owned(headers.into_iter().map(str::to_string).collect())
}

fn new_table_owned(headers: Vec<String>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

fn format_metric_value(metric: &KpiMetric) -> String {
    match metric.unit {
        Unit::Billions => format!("${:.1}B", metric.value),
        Unit::Percent => format!("{:.1}%", metric.value),
        Unit::Days => format!("{:.0} days", metric.value),
    }
}

fn format_metric_change(metric: &KpiMetric) -> String {
    if metric.change >= Decimal::ZERO {
        format!("+{}", metric.change)
    } else {
        metric.change.to_string()
    }
}

fn warn_on_unknown_year(criteria: &FilterCriteria) {
    if let Err(e) = criteria.validate_year(datasets::fiscal_years()) {
        tracing::warn!("{e}");
    }
}
