//! Performance reports.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common;
use crate::domains::ads::AdsContext;
use crate::domains::ads::codec::{MICROS_PER_UNIT, format_fractional, format_money};
use crate::domains::ads::query::{Comparison, DateRange, Direction, Literal, Predicate, Query};
use crate::domains::ads::row::PlatformRow;
use crate::domains::ads::types::{CustomerId, EntityId, EntityStatus};
use crate::domains::tools::descriptor::{ParamKind, ParamSpec, ToolDescriptor};
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::format::{
    PerformanceTotals, cost_conversions_line, cost_cpc_conversions_line, report, traffic_line,
};
use crate::domains::tools::handlers::impl_tool_handler;

/// Row cap of the search terms report.
pub const SEARCH_TERMS_LIMIT: u32 = 50;

/// Row cap of the geographic report.
pub const GEO_LIMIT: u32 = 20;

// ============================================================================
// get_campaign_performance
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetCampaignPerformanceParams {
    #[schemars(description = "Google Ads customer ID (dashes are optional)")]
    pub customer_id: CustomerId,

    #[schemars(
        description = "LAST_7_DAYS, LAST_30_DAYS, THIS_MONTH, LAST_MONTH, or YYYY-MM-DD,YYYY-MM-DD"
    )]
    #[serde(default)]
    pub date_range: DateRange,

    #[schemars(description = "Report on this campaign only")]
    pub campaign_id: Option<EntityId>,
}

pub struct GetCampaignPerformanceTool {
    ads: AdsContext,
}

impl GetCampaignPerformanceTool {
    pub const NAME: &'static str = "get_campaign_performance";
    pub const DESCRIPTION: &'static str = "Campaign performance with a totals summary: spend, clicks, impressions, CTR, \
         conversions, CPA and ROAS. Highest spend first.";

    const FIELDS: &'static [&'static str] = &[
        "campaign.id",
        "campaign.name",
        "campaign.status",
        "metrics.impressions",
        "metrics.clicks",
        "metrics.ctr",
        "metrics.average_cpc",
        "metrics.cost_micros",
        "metrics.conversions",
        "metrics.conversions_value",
        "metrics.cost_per_conversion",
    ];

    pub fn new(ads: AdsContext) -> Self {
        Self { ads }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new::<GetCampaignPerformanceParams>(Self::NAME, Self::DESCRIPTION)
            .param(common::customer_id())
            .param(common::date_range())
            .param(common::campaign_id())
    }

    pub fn query(params: &GetCampaignPerformanceParams) -> Query {
        Query::select(Self::FIELDS)
            .from("campaign")
            .filter(Predicate::status_not("campaign.status", EntityStatus::Removed))
            .filter_opt(params.campaign_id.map(|id| Predicate::id_eq("campaign.id", id)))
            .date_range(&params.date_range)
            .order_by("metrics.cost_micros", Direction::Desc)
    }

    fn render_row(row: &PlatformRow) -> String {
        let cost_micros = row.int("metrics.cost_micros");
        let conversions = row.float("metrics.conversions");
        let cpa_micros = if conversions > 0.0 {
            row.float("metrics.cost_per_conversion").round() as i64
        } else {
            0
        };
        let roas = if cost_micros > 0 {
            row.float("metrics.conversions_value") / (cost_micros as f64 / MICROS_PER_UNIT as f64)
        } else {
            0.0
        };

        format!(
            "{} ({})\n  {}\n  Cost: {} | Avg CPC: {}\n  Conversions: {} | CPA: {} | ROAS: {:.2}x",
            row.text_or("campaign.name", ""),
            row.enum_name("campaign.status"),
            traffic_line(row),
            format_money(cost_micros),
            format_money(row.int("metrics.average_cpc")),
            format_fractional(conversions),
            format_money(cpa_micros),
            roas,
        )
    }

    #[instrument(skip_all, fields(customer = %params.customer_id))]
    pub async fn execute(&self, params: GetCampaignPerformanceParams) -> ToolResult<String> {
        info!(
            "Campaign performance for {} (campaign: {:?})",
            params.date_range, params.campaign_id
        );

        let rows = self
            .ads
            .search
            .search(&params.customer_id, &Self::query(&params))
            .await?;
        if rows.is_empty() {
            return match params.campaign_id {
                Some(id) => Err(ToolError::not_found(format!(
                    "No performance data found for campaign {} in {}.",
                    id, params.date_range
                ))),
                None => Ok(format!("No campaign data found for {}.", params.date_range)),
            };
        }

        let mut totals = PerformanceTotals::default();
        let blocks: Vec<String> = rows
            .iter()
            .map(|row| {
                totals.add(row);
                Self::render_row(row)
            })
            .collect();

        Ok(format!(
            "{}\n\n{}",
            totals.summary(format!("Performance Report ({})", params.date_range)),
            blocks.join("\n\n")
        ))
    }
}

impl_tool_handler!(GetCampaignPerformanceTool, GetCampaignPerformanceParams);

// ============================================================================
// get_ad_group_performance
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetAdGroupPerformanceParams {
    #[schemars(description = "Google Ads customer ID (dashes are optional)")]
    pub customer_id: CustomerId,

    #[schemars(description = "Campaign ID")]
    pub campaign_id: EntityId,

    #[schemars(
        description = "LAST_7_DAYS, LAST_30_DAYS, THIS_MONTH, LAST_MONTH, or YYYY-MM-DD,YYYY-MM-DD"
    )]
    #[serde(default)]
    pub date_range: DateRange,
}

pub struct GetAdGroupPerformanceTool {
    ads: AdsContext,
}

impl GetAdGroupPerformanceTool {
    pub const NAME: &'static str = "get_ad_group_performance";
    pub const DESCRIPTION: &'static str =
        "Ad group performance within a campaign, highest spend first.";

    const FIELDS: &'static [&'static str] = &[
        "ad_group.id",
        "ad_group.name",
        "ad_group.status",
        "metrics.impressions",
        "metrics.clicks",
        "metrics.ctr",
        "metrics.average_cpc",
        "metrics.cost_micros",
        "metrics.conversions",
    ];

    pub fn new(ads: AdsContext) -> Self {
        Self { ads }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new::<GetAdGroupPerformanceParams>(Self::NAME, Self::DESCRIPTION)
            .param(common::customer_id())
            .param(common::campaign_id())
            .param(common::date_range())
    }

    pub fn query(params: &GetAdGroupPerformanceParams) -> Query {
        Query::select(Self::FIELDS)
            .from("ad_group")
            .filter(Predicate::id_eq("campaign.id", params.campaign_id))
            .filter(Predicate::status_not("ad_group.status", EntityStatus::Removed))
            .date_range(&params.date_range)
            .order_by("metrics.cost_micros", Direction::Desc)
    }

    fn render_row(row: &PlatformRow) -> String {
        format!(
            "{} (ID: {}, {})\n  {}\n  {}",
            row.text_or("ad_group.name", ""),
            row.text_or("ad_group.id", "?"),
            row.enum_name("ad_group.status"),
            traffic_line(row),
            cost_cpc_conversions_line(row),
        )
    }

    #[instrument(skip_all, fields(customer = %params.customer_id, campaign = %params.campaign_id))]
    pub async fn execute(&self, params: GetAdGroupPerformanceParams) -> ToolResult<String> {
        info!("Ad group performance for {}", params.date_range);

        let rows = self
            .ads
            .search
            .search(&params.customer_id, &Self::query(&params))
            .await?;
        if rows.is_empty() {
            return Err(ToolError::not_found(format!(
                "No ad groups found for campaign {}.",
                params.campaign_id
            )));
        }

        let blocks: Vec<String> = rows.iter().map(Self::render_row).collect();
        Ok(report(
            format!(
                "Ad Groups for Campaign {} ({})",
                params.campaign_id, params.date_range
            ),
            &blocks,
        ))
    }
}

impl_tool_handler!(GetAdGroupPerformanceTool, GetAdGroupPerformanceParams);

// ============================================================================
// get_search_terms_report
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetSearchTermsReportParams {
    #[schemars(description = "Google Ads customer ID (dashes are optional)")]
    pub customer_id: CustomerId,

    #[schemars(description = "Campaign ID")]
    pub campaign_id: EntityId,

    #[schemars(
        description = "LAST_7_DAYS, LAST_30_DAYS, THIS_MONTH, LAST_MONTH, or YYYY-MM-DD,YYYY-MM-DD"
    )]
    #[serde(default)]
    pub date_range: DateRange,

    #[schemars(description = "Only include terms with at least this many impressions (default: 10)")]
    #[serde(default = "common::default_min_impressions")]
    pub min_impressions: i64,
}

pub struct GetSearchTermsReportTool {
    ads: AdsContext,
}

impl GetSearchTermsReportTool {
    pub const NAME: &'static str = "get_search_terms_report";
    pub const DESCRIPTION: &'static str = "What people actually searched before seeing the campaign's ads, most impressions \
         first (top 50). Useful for finding negative keywords.";

    const FIELDS: &'static [&'static str] = &[
        "search_term_view.search_term",
        "metrics.impressions",
        "metrics.clicks",
        "metrics.ctr",
        "metrics.cost_micros",
        "metrics.conversions",
    ];

    pub fn new(ads: AdsContext) -> Self {
        Self { ads }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new::<GetSearchTermsReportParams>(Self::NAME, Self::DESCRIPTION)
            .param(common::customer_id())
            .param(common::campaign_id())
            .param(common::date_range())
            .param(
                ParamSpec::new("min_impressions", ParamKind::Integer)
                    .with_default(common::default_min_impressions()),
            )
    }

    pub fn query(params: &GetSearchTermsReportParams) -> ToolResult<Query> {
        if params.min_impressions < 0 {
            return Err(ToolError::invalid_arguments(format!(
                "min_impressions must not be negative, got {}",
                params.min_impressions
            )));
        }

        Ok(Query::select(Self::FIELDS)
            .from("search_term_view")
            .filter(Predicate::id_eq("campaign.id", params.campaign_id))
            .date_range(&params.date_range)
            .filter(Predicate::new(
                "metrics.impressions",
                Comparison::Gte,
                Literal::Int(params.min_impressions),
            ))
            .order_by("metrics.impressions", Direction::Desc)
            .limit(SEARCH_TERMS_LIMIT))
    }

    fn render_row(row: &PlatformRow) -> String {
        format!(
            "\"{}\"\n  {}\n  {}",
            row.text_or("search_term_view.search_term", ""),
            traffic_line(row),
            cost_conversions_line(row),
        )
    }

    #[instrument(skip_all, fields(customer = %params.customer_id, campaign = %params.campaign_id))]
    pub async fn execute(&self, params: GetSearchTermsReportParams) -> ToolResult<String> {
        let query = Self::query(&params)?;
        info!("Search terms for {}", params.date_range);

        let rows = self.ads.search.search(&params.customer_id, &query).await?;
        if rows.is_empty() {
            return Err(ToolError::not_found(format!(
                "No search terms found for campaign {}.",
                params.campaign_id
            )));
        }

        let blocks: Vec<String> = rows.iter().map(Self::render_row).collect();
        Ok(report(format!("Search Terms Report ({})", params.date_range), &blocks))
    }
}

impl_tool_handler!(GetSearchTermsReportTool, GetSearchTermsReportParams);

// ============================================================================
// get_geo_performance
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetGeoPerformanceParams {
    #[schemars(description = "Google Ads customer ID (dashes are optional)")]
    pub customer_id: CustomerId,

    #[schemars(description = "Campaign ID")]
    pub campaign_id: EntityId,

    #[schemars(
        description = "LAST_7_DAYS, LAST_30_DAYS, THIS_MONTH, LAST_MONTH, or YYYY-MM-DD,YYYY-MM-DD"
    )]
    #[serde(default)]
    pub date_range: DateRange,
}

pub struct GetGeoPerformanceTool {
    ads: AdsContext,
}

impl GetGeoPerformanceTool {
    pub const NAME: &'static str = "get_geo_performance";
    pub const DESCRIPTION: &'static str =
        "Performance of a campaign by geographic location, most impressions first (top 20).";

    const FIELDS: &'static [&'static str] = &[
        "geographic_view.country_criterion_id",
        "geographic_view.location_type",
        "metrics.impressions",
        "metrics.clicks",
        "metrics.ctr",
        "metrics.cost_micros",
        "metrics.conversions",
    ];

    pub fn new(ads: AdsContext) -> Self {
        Self { ads }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new::<GetGeoPerformanceParams>(Self::NAME, Self::DESCRIPTION)
            .param(common::customer_id())
            .param(common::campaign_id())
            .param(common::date_range())
    }

    pub fn query(params: &GetGeoPerformanceParams) -> Query {
        Query::select(Self::FIELDS)
            .from("geographic_view")
            .filter(Predicate::id_eq("campaign.id", params.campaign_id))
            .date_range(&params.date_range)
            .order_by("metrics.impressions", Direction::Desc)
            .limit(GEO_LIMIT)
    }

    fn render_row(row: &PlatformRow) -> String {
        format!(
            "Location ID: {} ({})\n  {}\n  {}",
            row.text_or("geographic_view.country_criterion_id", "?"),
            row.enum_name("geographic_view.location_type"),
            traffic_line(row),
            cost_conversions_line(row),
        )
    }

    #[instrument(skip_all, fields(customer = %params.customer_id, campaign = %params.campaign_id))]
    pub async fn execute(&self, params: GetGeoPerformanceParams) -> ToolResult<String> {
        info!("Geographic performance for {}", params.date_range);

        let rows = self
            .ads
            .search
            .search(&params.customer_id, &Self::query(&params))
            .await?;
        if rows.is_empty() {
            return Err(ToolError::not_found(format!(
                "No geo data found for campaign {}.",
                params.campaign_id
            )));
        }

        let blocks: Vec<String> = rows.iter().map(Self::render_row).collect();
        Ok(report(format!("Geographic Performance ({})", params.date_range), &blocks))
    }
}

impl_tool_handler!(GetGeoPerformanceTool, GetGeoPerformanceParams);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::ads::testing::RecordingPlatform;
    use crate::domains::tools::definitions::test_support::{args, registry};
    use serde_json::json;

    fn campaign_row(name: &str, cost_micros: &str, clicks: &str, impressions: &str) -> PlatformRow {
        PlatformRow::new()
            .with("campaign.name", name)
            .with("campaign.status", "ENABLED")
            .with("metrics.cost_micros", cost_micros)
            .with("metrics.clicks", clicks)
            .with("metrics.impressions", impressions)
    }

    #[tokio::test]
    async fn test_campaign_performance_literal_range() {
        let platform = RecordingPlatform::new();
        let registry = registry(platform.context());

        registry
            .invoke(
                "get_campaign_performance",
                args(json!({ "customer_id": "1", "date_range": "2024-01-01,2024-01-31" })),
            )
            .await
            .unwrap();
        registry
            .invoke(
                "get_campaign_performance",
                args(json!({ "customer_id": "1", "date_range": "last-30-days" })),
            )
            .await
            .unwrap();

        let gaql = platform.gaql();
        assert!(gaql[0].contains(
            "WHERE campaign.status != 'REMOVED' \
             AND segments.date >= '2024-01-01' AND segments.date <= '2024-01-31' \
             ORDER BY metrics.cost_micros DESC"
        ));
        assert!(!gaql[0].contains("DURING"));
        assert!(gaql[1].contains("AND segments.date DURING LAST_30_DAYS"));
        assert_ne!(gaql[0], gaql[1]);
    }

    #[tokio::test]
    async fn test_campaign_performance_summary() {
        let platform = RecordingPlatform::new();
        platform.push_rows(vec![
            campaign_row("Parkas", "30000000", "60", "2000")
                .with("metrics.conversions", 3.0)
                .with("metrics.conversions_value", 90.0)
                .with("metrics.cost_per_conversion", 10_000_000.0)
                .with("metrics.ctr", 0.03),
            campaign_row("Boots", "10000000", "40", "8000"),
        ]);

        let text = registry(platform.context())
            .invoke("get_campaign_performance", args(json!({ "customer_id": "1" })))
            .await
            .unwrap();

        let (summary, body) = text.split_once("\n\n").unwrap();
        assert_eq!(
            summary,
            format!(
                "=== Performance Report (LAST_30_DAYS) ===\n\
                 Total Spend: $40.00 | Clicks: 100 | Impressions: 10,000 | CTR: 1.00% | Conversions: 3.0\n{}",
                "=".repeat(50)
            )
        );

        let blocks: Vec<&str> = body.split("\n\n").collect();
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[0],
            "Parkas (ENABLED)\n  \
             Impressions: 2,000 | Clicks: 60 | CTR: 3.00%\n  \
             Cost: $30.00 | Avg CPC: $0.00\n  \
             Conversions: 3.0 | CPA: $10.00 | ROAS: 3.00x"
        );
        assert!(blocks[1].starts_with("Boots (ENABLED)"));
        assert!(blocks[1].ends_with("CPA: $0.00 | ROAS: 0.00x"));
    }

    #[tokio::test]
    async fn test_campaign_performance_empty() {
        let platform = RecordingPlatform::new();
        let registry = registry(platform.context());

        let text = registry
            .invoke("get_campaign_performance", args(json!({ "customer_id": "1" })))
            .await
            .unwrap();
        assert_eq!(text, "No campaign data found for LAST_30_DAYS.");

        let err = registry
            .invoke(
                "get_campaign_performance",
                args(json!({ "customer_id": "1", "campaign_id": "42" })),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
        assert!(platform.gaql()[1].contains("AND campaign.id = 42"));
    }

    #[tokio::test]
    async fn test_campaign_performance_platform_error_is_not_not_found() {
        let platform = RecordingPlatform::new();
        platform.push_search_result(Err(ToolError::Platform(vec![
            "Invalid date range.".to_string(),
            "Customer not enabled.".to_string(),
        ])));

        let err = registry(platform.context())
            .invoke(
                "get_campaign_performance",
                args(json!({ "customer_id": "1", "campaign_id": "42" })),
            )
            .await
            .unwrap_err();
        assert_eq!(
            err.render(),
            "Google Ads API Error:\nError: Invalid date range.\nError: Customer not enabled."
        );
    }

    #[tokio::test]
    async fn test_ad_group_performance_query() {
        let platform = RecordingPlatform::new();
        platform.push_rows(vec![
            PlatformRow::new()
                .with("ad_group.id", "8")
                .with("ad_group.name", "Parkas")
                .with("ad_group.status", "ENABLED"),
        ]);

        let text = registry(platform.context())
            .invoke(
                "get_ad_group_performance",
                args(json!({ "customer_id": "1", "campaign_id": "5", "date_range": "THIS_MONTH" })),
            )
            .await
            .unwrap();

        assert!(platform.gaql()[0].ends_with(
            "FROM ad_group WHERE campaign.id = 5 AND ad_group.status != 'REMOVED' \
             AND segments.date DURING THIS_MONTH ORDER BY metrics.cost_micros DESC"
        ));
        assert!(text.starts_with("Ad Groups for Campaign 5 (THIS_MONTH):\n\nParkas (ID: 8, ENABLED)"));
    }

    #[tokio::test]
    async fn test_search_terms_threshold_and_cap() {
        let platform = RecordingPlatform::new();
        platform.push_rows(vec![
            PlatformRow::new()
                .with("search_term_view.search_term", "womens rain parka")
                .with("metrics.impressions", "150")
                .with("metrics.clicks", "9"),
        ]);

        let text = registry(platform.context())
            .invoke(
                "get_search_terms_report",
                args(json!({ "customer_id": "1", "campaign_id": "5" })),
            )
            .await
            .unwrap();

        assert!(platform.gaql()[0].ends_with(
            "FROM search_term_view WHERE campaign.id = 5 AND segments.date DURING LAST_30_DAYS \
             AND metrics.impressions >= 10 ORDER BY metrics.impressions DESC LIMIT 50"
        ));
        assert!(text.starts_with("Search Terms Report (LAST_30_DAYS):\n\n\"womens rain parka\"\n"));
    }

    #[tokio::test]
    async fn test_search_terms_rejects_negative_threshold() {
        let platform = RecordingPlatform::new();
        let err = registry(platform.context())
            .invoke(
                "get_search_terms_report",
                args(json!({ "customer_id": "1", "campaign_id": "5", "min_impressions": -1 })),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
        assert!(platform.gaql().is_empty());
    }

    #[tokio::test]
    async fn test_geo_performance() {
        let platform = RecordingPlatform::new();
        platform.push_rows(vec![
            PlatformRow::new()
                .with("geographic_view.country_criterion_id", "2124")
                .with("geographic_view.location_type", "LOCATION_OF_PRESENCE")
                .with("metrics.impressions", "500")
                .with("metrics.cost_micros", "2500000"),
        ]);

        let text = registry(platform.context())
            .invoke(
                "get_geo_performance",
                args(json!({ "customer_id": "1", "campaign_id": "5", "date_range": "last_month" })),
            )
            .await
            .unwrap();

        assert!(platform.gaql()[0].ends_with(
            "FROM geographic_view WHERE campaign.id = 5 AND segments.date DURING LAST_MONTH \
             ORDER BY metrics.impressions DESC LIMIT 20"
        ));
        assert_eq!(
            text,
            "Geographic Performance (LAST_MONTH):\n\n\
             Location ID: 2124 (LOCATION_OF_PRESENCE)\n  \
             Impressions: 500 | Clicks: 0 | CTR: 0.00%\n  \
             Cost: $2.50 | Conversions: 0.0"
        );
    }
}
