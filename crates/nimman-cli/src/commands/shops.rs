//! Shop listing and report commands

use std::fmt::Write as _;

use anyhow::{Context, Result};
use nimman_core::{Dataset, DataRange, InsightEngine, Severity, ShopInsights, ShopReport};

use super::truncate;

/// Width of a full (5.0) aspect bar
const BAR_WIDTH: f64 = 20.0;

pub fn cmd_shops(dataset: &Dataset, engine: &InsightEngine, json: bool) -> Result<()> {
    let rows = dataset
        .shops()
        .iter()
        .map(|shop| {
            engine
                .analyze(shop)
                .with_context(|| format!("Failed to analyze {}", shop.name))
        })
        .collect::<Result<Vec<_>>>()?;

    if json {
        let summaries: Vec<serde_json::Value> = dataset
            .shops()
            .iter()
            .zip(&rows)
            .map(|(shop, insights)| {
                serde_json::json!({
                    "name": shop.name,
                    "display_name": shop.display_name(),
                    "rating": shop.rating,
                    "review_count": shop.review_count,
                    "price_level": shop.price_level,
                    "value_tier": insights.value_tier,
                    "weakest_aspect": insights.weakest_aspect,
                    "recommendation": insights.recommendation.category,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if dataset.is_empty() {
        println!("No shops found in {}", dataset.origin());
        return Ok(());
    }

    print!("{}", render_shop_table(dataset, &rows));
    Ok(())
}

/// Text table of shops with their headline insights
pub fn render_shop_table(dataset: &Dataset, rows: &[ShopInsights]) -> String {
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "🍜 Shops ({})", dataset.origin());
    let _ = writeln!(
        out,
        "   ─────────────────────────────────────────────────────────────────────────────"
    );
    let _ = writeln!(
        out,
        "   {:<28} {:>6} {:>5} {:<11} {:<17} {}",
        "Shop", "Rating", "Price", "Value", "Weakest", "Trend"
    );

    for (shop, insights) in dataset.shops().iter().zip(rows) {
        let weakest = format!(
            "{} {:.1}",
            insights.weakest_aspect.aspect, insights.weakest_aspect.score
        );
        let _ = writeln!(
            out,
            "   {:<28} {:>6.1} {:>5} {:<11} {:<17} {} {:+}%",
            truncate(&shop.name, 28),
            shop.rating,
            shop.price_level.symbol(),
            insights.value_tier.label(),
            weakest,
            insights.sentiment.direction.arrow(),
            insights.sentiment.trend_pct,
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "   Run 'nimman show <SHOP>' for the full report.");
    out
}

pub fn cmd_show(
    dataset: &Dataset,
    engine: &InsightEngine,
    query: &str,
    range: DataRange,
    json: bool,
) -> Result<()> {
    let shop = dataset.resolve(query)?;
    let report = ShopReport::build(engine, shop, range)
        .with_context(|| format!("Failed to build report for {}", shop.name))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Alert => "🚨",
        Severity::Warning => "⚠️ ",
        Severity::Info => "✅",
    }
}

/// Text rendering of a shop report
pub fn render_report(report: &ShopReport) -> String {
    let insights = &report.insights;
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "🍜 {}", report.shop);
    let _ = writeln!(out, "   ─────────────────────────────────────────────");
    let _ = writeln!(
        out,
        "   Rating: {:.1} ★   Reviews: {}   Price: {}",
        report.rating,
        report.review_count,
        report.price_level.symbol()
    );
    let _ = writeln!(
        out,
        "   Sentiment: {:.1}   {} {:+}% vs. previous period",
        report.sentiment_score,
        insights.sentiment.direction.arrow(),
        insights.sentiment.trend_pct
    );
    let _ = writeln!(out, "   Range: {}", report.data_range.label());

    let _ = writeln!(out);
    let _ = writeln!(out, "📊 Aspects");
    for entry in &report.aspects {
        let bar = "█".repeat((entry.score / 5.0 * BAR_WIDTH).round() as usize);
        let marker = if entry.aspect == insights.weakest_aspect.aspect {
            "  ← weakest"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "   {:<11} {:.1} {}{}",
            entry.aspect.as_str(),
            entry.score,
            bar,
            marker
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "💰 Value: {} {} ({})",
        severity_icon(insights.value_severity),
        insights.value_tier.label(),
        insights.value_tier
    );

    let rec = &insights.recommendation;
    let _ = writeln!(out);
    let _ = writeln!(out, "{} {}", severity_icon(rec.severity), rec.title);
    let _ = writeln!(out, "   {}", rec.message);
    for action in &rec.actions {
        let _ = writeln!(out, "   • {}", action);
    }

    if !report.complaints.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "🗣️  Customer voice");
        for complaint in &report.complaints {
            let _ = writeln!(out, "   {}. {}", complaint.index, complaint.text);
        }
    }

    let _ = writeln!(out);
    out
}
