//! Report rendering shared by the tool definitions.
//!
//! Rows are rendered one block each, in the order the query returned them.

use std::fmt::Display;

use crate::domains::ads::codec::{format_count, format_fractional, format_money, format_percent};
use crate::domains::ads::row::PlatformRow;

const RULE_WIDTH: usize = 50;

/// `{heading}:` followed by the blocks, separated by blank lines.
pub fn report(heading: impl Display, blocks: &[String]) -> String {
    format!("{}:\n\n{}", heading, blocks.join("\n\n"))
}

/// `Impressions: 1,234 | Clicks: 56 | CTR: 4.54%` from a row's metrics.
pub fn traffic_line(row: &PlatformRow) -> String {
    format!(
        "Impressions: {} | Clicks: {} | CTR: {}",
        format_count(row.int("metrics.impressions")),
        format_count(row.int("metrics.clicks")),
        format_percent(row.float("metrics.ctr")),
    )
}

/// `Cost: $12.34 | Conversions: 2.0`.
pub fn cost_conversions_line(row: &PlatformRow) -> String {
    format!(
        "Cost: {} | Conversions: {}",
        format_money(row.int("metrics.cost_micros")),
        format_fractional(row.float("metrics.conversions")),
    )
}

/// `Cost: $12.34 | Avg CPC: $0.22 | Conversions: 2.0`.
pub fn cost_cpc_conversions_line(row: &PlatformRow) -> String {
    format!(
        "Cost: {} | Avg CPC: {} | Conversions: {}",
        format_money(row.int("metrics.cost_micros")),
        format_money(row.int("metrics.average_cpc")),
        format_fractional(row.float("metrics.conversions")),
    )
}

/// Running totals over a campaign performance report.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PerformanceTotals {
    pub cost_micros: i64,
    pub clicks: i64,
    pub impressions: i64,
    pub conversions: f64,
}

impl PerformanceTotals {
    pub fn add(&mut self, row: &PlatformRow) {
        self.cost_micros += row.int("metrics.cost_micros");
        self.clicks += row.int("metrics.clicks");
        self.impressions += row.int("metrics.impressions");
        self.conversions += row.float("metrics.conversions");
    }

    /// Clicks over impressions; zero without impressions.
    pub fn ctr(&self) -> f64 {
        if self.impressions == 0 {
            0.0
        } else {
            self.clicks as f64 / self.impressions as f64
        }
    }

    /// Summary block prepended to the report.
    pub fn summary(&self, title: impl Display) -> String {
        format!(
            "=== {} ===\n\
             Total Spend: {} | Clicks: {} | Impressions: {} | CTR: {} | Conversions: {}\n\
             {}",
            title,
            format_money(self.cost_micros),
            format_count(self.clicks),
            format_count(self.impressions),
            format_percent(self.ctr()),
            format_fractional(self.conversions),
            "=".repeat(RULE_WIDTH),
        )
    }
}
