//! Keyword tools: listing, batched additions and performance.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common;
use crate::domains::ads::AdsContext;
use crate::domains::ads::codec::{dollars_to_micros, format_money, split_list};
use crate::domains::ads::mutation::{
    AdGroupCriterion, CampaignCriterion, KeywordInfo, MutateRequest, Operation, ResourcePath,
};
use crate::domains::ads::query::{Comparison, DateRange, Direction, Literal, Predicate, Query};
use crate::domains::ads::row::PlatformRow;
use crate::domains::ads::types::{CustomerId, EntityId, EntityStatus, MatchType};
use crate::domains::tools::descriptor::{ParamKind, ParamSpec, ToolDescriptor};
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::format::{cost_cpc_conversions_line, report, traffic_line};
use crate::domains::tools::handlers::impl_tool_handler;

/// Row cap of the keyword performance report.
pub const KEYWORD_REPORT_LIMIT: u32 = 50;

// ============================================================================
// list_keywords
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListKeywordsParams {
    #[schemars(description = "Google Ads customer ID (dashes are optional)")]
    pub customer_id: CustomerId,

    #[schemars(description = "Ad group ID")]
    pub ad_group_id: EntityId,

    #[schemars(description = "Only return keywords with this status")]
    pub status_filter: Option<EntityStatus>,
}

pub struct ListKeywordsTool {
    ads: AdsContext,
}

impl ListKeywordsTool {
    pub const NAME: &'static str = "list_keywords";
    pub const DESCRIPTION: &'static str =
        "List the keywords of an ad group with match type, status and effective CPC bid.";

    const FIELDS: &'static [&'static str] = &[
        "ad_group_criterion.criterion_id",
        "ad_group_criterion.keyword.text",
        "ad_group_criterion.keyword.match_type",
        "ad_group_criterion.status",
        "ad_group_criterion.effective_cpc_bid_micros",
    ];

    pub fn new(ads: AdsContext) -> Self {
        Self { ads }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new::<ListKeywordsParams>(Self::NAME, Self::DESCRIPTION)
            .param(common::customer_id())
            .param(common::ad_group_id())
            .param(common::status_filter())
    }

    pub fn query(params: &ListKeywordsParams) -> Query {
        Query::select(Self::FIELDS)
            .from("ad_group_criterion")
            .filter(Predicate::id_eq("ad_group.id", params.ad_group_id))
            .filter(Predicate::new(
                "ad_group_criterion.type",
                Comparison::Eq,
                Literal::Enum("KEYWORD"),
            ))
            .filter_opt(
                params
                    .status_filter
                    .map(|s| Predicate::status_eq("ad_group_criterion.status", s)),
            )
    }

    fn render_row(row: &PlatformRow) -> String {
        format!(
            "[{}] {}\n  ID: {} | Status: {} | CPC Bid: {}",
            row.enum_name("ad_group_criterion.keyword.match_type"),
            row.text_or("ad_group_criterion.keyword.text", ""),
            row.text_or("ad_group_criterion.criterion_id", "?"),
            row.enum_name("ad_group_criterion.status"),
            format_money(row.int("ad_group_criterion.effective_cpc_bid_micros")),
        )
    }

    #[instrument(skip_all, fields(customer = %params.customer_id, ad_group = %params.ad_group_id))]
    pub async fn execute(&self, params: ListKeywordsParams) -> ToolResult<String> {
        info!("Listing keywords");

        let rows = self
            .ads
            .search
            .search(&params.customer_id, &Self::query(&params))
            .await?;
        if rows.is_empty() {
            return Err(ToolError::not_found(format!(
                "No keywords found in ad group {}.",
                params.ad_group_id
            )));
        }

        let blocks: Vec<String> = rows.iter().map(Self::render_row).collect();
        Ok(report(format!("Keywords in Ad Group {}", params.ad_group_id), &blocks))
    }
}

impl_tool_handler!(ListKeywordsTool, ListKeywordsParams);

// ============================================================================
// add_keywords
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddKeywordsParams {
    #[schemars(description = "Google Ads customer ID (dashes are optional)")]
    pub customer_id: CustomerId,

    #[schemars(description = "Ad group ID")]
    pub ad_group_id: EntityId,

    #[schemars(description = "Comma-separated keywords, e.g. \"rain jacket, waterproof parka\"")]
    pub keywords: String,

    #[schemars(description = "Match type for every keyword (default: PHRASE)")]
    #[serde(default = "common::default_match_type")]
    pub match_type: MatchType,

    #[schemars(description = "Max CPC bid; the ad group default applies when omitted")]
    pub cpc_bid_dollars: Option<f64>,
}

pub struct AddKeywordsTool {
    ads: AdsContext,
}

impl AddKeywordsTool {
    pub const NAME: &'static str = "add_keywords";
    pub const DESCRIPTION: &'static str =
        "Add comma-separated keywords to an ad group in a single all-or-nothing batch.";

    pub fn new(ads: AdsContext) -> Self {
        Self { ads }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new::<AddKeywordsParams>(Self::NAME, Self::DESCRIPTION)
            .param(common::customer_id())
            .param(common::ad_group_id())
            .param(common::text("keywords"))
            .param(
                ParamSpec::new("match_type", ParamKind::MatchType)
                    .with_default(common::default_match_type().as_str()),
            )
            .param(common::number("cpc_bid_dollars"))
    }

    #[instrument(skip_all, fields(customer = %params.customer_id, ad_group = %params.ad_group_id))]
    pub async fn execute(&self, params: AddKeywordsParams) -> ToolResult<String> {
        let keywords = split_list(&params.keywords, ',')?;
        let cpc_bid_micros = params.cpc_bid_dollars.map(dollars_to_micros).transpose()?;
        let ad_group = ResourcePath::ad_group(&params.customer_id, params.ad_group_id);

        let operations = keywords
            .iter()
            .map(|text| {
                Operation::create(AdGroupCriterion {
                    ad_group: Some(ad_group.clone()),
                    status: Some(EntityStatus::Enabled),
                    keyword: Some(KeywordInfo {
                        text: text.clone(),
                        match_type: params.match_type,
                    }),
                    cpc_bid_micros,
                })
            })
            .collect();

        info!("Adding {} keyword(s) as {}", keywords.len(), params.match_type);
        let added = self
            .ads
            .mutate
            .mutate(&params.customer_id, MutateRequest::AdGroupCriteria(operations))
            .await?
            .len();

        let lines: Vec<String> = keywords
            .iter()
            .map(|k| format!("  [{}] {}", params.match_type, k))
            .collect();
        Ok(format!(
            "Added {} keyword(s) to ad group {}:\n{}",
            added,
            params.ad_group_id,
            lines.join("\n")
        ))
    }
}

impl_tool_handler!(AddKeywordsTool, AddKeywordsParams);

// ============================================================================
// add_negative_keywords
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddNegativeKeywordsParams {
    #[schemars(description = "Google Ads customer ID (dashes are optional)")]
    pub customer_id: CustomerId,

    #[schemars(description = "Campaign ID")]
    pub campaign_id: EntityId,

    #[schemars(description = "Comma-separated negative keywords")]
    pub keywords: String,
}

pub struct AddNegativeKeywordsTool {
    ads: AdsContext,
}

impl AddNegativeKeywordsTool {
    pub const NAME: &'static str = "add_negative_keywords";
    pub const DESCRIPTION: &'static str =
        "Add comma-separated broad-match negative keywords to a campaign to prevent wasted spend.";

    pub fn new(ads: AdsContext) -> Self {
        Self { ads }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new::<AddNegativeKeywordsParams>(Self::NAME, Self::DESCRIPTION)
            .param(common::customer_id())
            .param(common::campaign_id())
            .param(common::text("keywords"))
    }

    #[instrument(skip_all, fields(customer = %params.customer_id, campaign = %params.campaign_id))]
    pub async fn execute(&self, params: AddNegativeKeywordsParams) -> ToolResult<String> {
        let keywords = split_list(&params.keywords, ',')?;
        let campaign = ResourcePath::campaign(&params.customer_id, params.campaign_id);

        let operations = keywords
            .iter()
            .map(|text| {
                Operation::create(CampaignCriterion {
                    campaign: Some(campaign.clone()),
                    negative: Some(true),
                    keyword: Some(KeywordInfo {
                        text: text.clone(),
                        match_type: MatchType::Broad,
                    }),
                })
            })
            .collect();

        info!("Adding {} negative keyword(s)", keywords.len());
        let added = self
            .ads
            .mutate
            .mutate(&params.customer_id, MutateRequest::CampaignCriteria(operations))
            .await?
            .len();

        let lines: Vec<String> = keywords.iter().map(|k| format!("  - {k}")).collect();
        Ok(format!(
            "Added {} negative keyword(s) to campaign {}:\n{}",
            added,
            params.campaign_id,
            lines.join("\n")
        ))
    }
}

impl_tool_handler!(AddNegativeKeywordsTool, AddNegativeKeywordsParams);

// ============================================================================
// get_keyword_performance
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetKeywordPerformanceParams {
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

pub struct GetKeywordPerformanceTool {
    ads: AdsContext,
}

impl GetKeywordPerformanceTool {
    pub const NAME: &'static str = "get_keyword_performance";
    pub const DESCRIPTION: &'static str =
        "Keyword-level performance of a campaign, highest cost first (top 50).";

    const FIELDS: &'static [&'static str] = &[
        "ad_group_criterion.keyword.text",
        "ad_group_criterion.keyword.match_type",
        "ad_group.name",
        "metrics.impressions",
        "metrics.clicks",
        "metrics.ctr",
        "metrics.average_cpc",
        "metrics.cost_micros",
        "metrics.conversions",
        "ad_group_criterion.quality_info.quality_score",
    ];

    pub fn new(ads: AdsContext) -> Self {
        Self { ads }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new::<GetKeywordPerformanceParams>(Self::NAME, Self::DESCRIPTION)
            .param(common::customer_id())
            .param(common::campaign_id())
            .param(common::date_range())
    }

    pub fn query(params: &GetKeywordPerformanceParams) -> Query {
        Query::select(Self::FIELDS)
            .from("keyword_view")
            .filter(Predicate::id_eq("campaign.id", params.campaign_id))
            .date_range(&params.date_range)
            .order_by("metrics.cost_micros", Direction::Desc)
            .limit(KEYWORD_REPORT_LIMIT)
    }

    fn render_row(row: &PlatformRow) -> String {
        let quality = match row.int("ad_group_criterion.quality_info.quality_score") {
            0 => "N/A".to_string(),
            score => score.to_string(),
        };
        format!(
            "[{}] {} (Ad Group: {})\n  {}\n  {}\n  Quality Score: {}",
            row.enum_name("ad_group_criterion.keyword.match_type"),
            row.text_or("ad_group_criterion.keyword.text", ""),
            row.text_or("ad_group.name", ""),
            traffic_line(row),
            cost_cpc_conversions_line(row),
            quality,
        )
    }

    #[instrument(skip_all, fields(customer = %params.customer_id, campaign = %params.campaign_id))]
    pub async fn execute(&self, params: GetKeywordPerformanceParams) -> ToolResult<String> {
        info!("Keyword performance for {}", params.date_range);

        let rows = self
            .ads
            .search
            .search(&params.customer_id, &Self::query(&params))
            .await?;
        if rows.is_empty() {
            return Err(ToolError::not_found(format!(
                "No keyword data found for campaign {}.",
                params.campaign_id
            )));
        }

        let blocks: Vec<String> = rows.iter().map(Self::render_row).collect();
        Ok(report(format!("Keyword Performance ({})", params.date_range), &blocks))
    }
}

impl_tool_handler!(GetKeywordPerformanceTool, GetKeywordPerformanceParams);
