//! Ad group and ad tools.

use reqwest::Url;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::{self, first_resource, required_text};
use crate::domains::ads::AdsContext;
use crate::domains::ads::codec::{dollars_to_micros, format_money, split_list};
use crate::domains::ads::mutation::{
    Ad, AdGroup, AdGroupAd, AdTextAsset, MutateRequest, Operation, ResourcePath,
    ResponsiveSearchAd,
};
use crate::domains::ads::query::{Direction, Predicate, Query};
use crate::domains::ads::row::PlatformRow;
use crate::domains::ads::types::{AdGroupType, CustomerId, EntityId, EntityStatus};
use crate::domains::tools::descriptor::{ParamKind, ParamSpec, ToolDescriptor};
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::format::{report, traffic_line};
use crate::domains::tools::handlers::impl_tool_handler;

// ============================================================================
// create_ad_group
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateAdGroupParams {
    #[schemars(description = "Google Ads customer ID (dashes are optional)")]
    pub customer_id: CustomerId,

    #[schemars(description = "Campaign ID")]
    pub campaign_id: EntityId,

    #[schemars(description = "Ad group name")]
    pub name: String,

    #[schemars(description = "Default max CPC bid (default: 2.00)")]
    #[serde(default = "common::default_cpc_bid_dollars")]
    pub cpc_bid_dollars: f64,
}

pub struct CreateAdGroupTool {
    ads: AdsContext,
}

impl CreateAdGroupTool {
    pub const NAME: &'static str = "create_ad_group";
    pub const DESCRIPTION: &'static str =
        "Create an enabled standard search ad group inside a campaign.";

    pub fn new(ads: AdsContext) -> Self {
        Self { ads }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new::<CreateAdGroupParams>(Self::NAME, Self::DESCRIPTION)
            .param(common::customer_id())
            .param(common::campaign_id())
            .param(common::text("name"))
            .param(common::number("cpc_bid_dollars").with_default(common::default_cpc_bid_dollars()))
    }

    #[instrument(skip_all, fields(customer = %params.customer_id, campaign = %params.campaign_id))]
    pub async fn execute(&self, params: CreateAdGroupParams) -> ToolResult<String> {
        let name = required_text("name", &params.name)?;
        let bid_micros = dollars_to_micros(params.cpc_bid_dollars)?;

        info!("Creating ad group '{}'", name);
        let ad_group = AdGroup {
            name: Some(name.clone()),
            campaign: Some(ResourcePath::campaign(&params.customer_id, params.campaign_id)),
            status: Some(EntityStatus::Enabled),
            ad_group_type: Some(AdGroupType::SearchStandard),
            cpc_bid_micros: Some(bid_micros),
        };
        let path = first_resource(
            self.ads
                .mutate
                .mutate(
                    &params.customer_id,
                    MutateRequest::AdGroups(vec![Operation::create(ad_group)]),
                )
                .await?,
        )?;

        Ok(format!(
            "Ad group created successfully!\n  Name: {}\n  Resource: {}\n  CPC Bid: {}\n  Status: ENABLED",
            name,
            path,
            format_money(bid_micros)
        ))
    }
}

impl_tool_handler!(CreateAdGroupTool, CreateAdGroupParams);

// ============================================================================
// update_ad_group
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateAdGroupParams {
    #[schemars(description = "Google Ads customer ID (dashes are optional)")]
    pub customer_id: CustomerId,

    #[schemars(description = "Ad group ID")]
    pub ad_group_id: EntityId,

    #[schemars(description = "New ad group name")]
    pub name: Option<String>,

    #[schemars(description = "New status")]
    pub status: Option<EntityStatus>,

    #[schemars(description = "New default max CPC bid")]
    pub cpc_bid_dollars: Option<f64>,
}

pub struct UpdateAdGroupTool {
    ads: AdsContext,
}

impl UpdateAdGroupTool {
    pub const NAME: &'static str = "update_ad_group";
    pub const DESCRIPTION: &'static str =
        "Change an ad group's name, status or default CPC bid. Only the fields given are changed.";

    pub fn new(ads: AdsContext) -> Self {
        Self { ads }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new::<UpdateAdGroupParams>(Self::NAME, Self::DESCRIPTION)
            .param(common::customer_id())
            .param(common::ad_group_id())
            .param(common::text("name"))
            .param(ParamSpec::new("status", ParamKind::Status))
            .param(common::number("cpc_bid_dollars"))
    }

    #[instrument(skip_all, fields(customer = %params.customer_id, ad_group = %params.ad_group_id))]
    pub async fn execute(&self, params: UpdateAdGroupParams) -> ToolResult<String> {
        let changes = AdGroup {
            name: params
                .name
                .as_deref()
                .map(|n| required_text("name", n))
                .transpose()?,
            status: params.status,
            cpc_bid_micros: params.cpc_bid_dollars.map(dollars_to_micros).transpose()?,
            ..Default::default()
        };
        let operation = Operation::update(
            ResourcePath::ad_group(&params.customer_id, params.ad_group_id),
            changes,
        )?;
        let changed = match &operation {
            Operation::Update { mask, .. } => mask.field_names().join(", "),
            Operation::Create(_) => String::new(),
        };
        info!("Updating ad group fields: {}", changed);

        self.ads
            .mutate
            .mutate(&params.customer_id, MutateRequest::AdGroups(vec![operation]))
            .await?;

        Ok(format!("Ad group {} updated ({}).", params.ad_group_id, changed))
    }
}

impl_tool_handler!(UpdateAdGroupTool, UpdateAdGroupParams);

// ============================================================================
// create_responsive_search_ad
// ============================================================================

const HEADLINE_COUNT: (usize, usize) = (3, 15);
const HEADLINE_MAX_CHARS: usize = 30;
const DESCRIPTION_COUNT: (usize, usize) = (2, 4);
const DESCRIPTION_MAX_CHARS: usize = 90;
const PATH_MAX_CHARS: usize = 15;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateResponsiveSearchAdParams {
    #[schemars(description = "Google Ads customer ID (dashes are optional)")]
    pub customer_id: CustomerId,

    #[schemars(description = "Ad group ID")]
    pub ad_group_id: EntityId,

    /// 3-15 headlines, max 30 chars each.
    #[schemars(
        description = "Pipe-separated headlines, e.g. \"Premium Rain Parkas|Vancouver-Made|Recycled Materials\""
    )]
    pub headlines: String,

    /// 2-4 descriptions, max 90 chars each.
    #[schemars(description = "Pipe-separated descriptions")]
    pub descriptions: String,

    #[schemars(description = "Landing page URL; defaults to the configured landing page")]
    pub final_url: Option<String>,

    #[schemars(description = "Display URL path 1 (max 15 chars)")]
    pub path1: Option<String>,

    #[schemars(description = "Display URL path 2 (max 15 chars, requires path1)")]
    pub path2: Option<String>,
}

pub struct CreateResponsiveSearchAdTool {
    ads: AdsContext,
}

/// Split pipe-separated assets and check their count and length.
fn text_assets(
    field: &str,
    input: &str,
    (min, max): (usize, usize),
    max_chars: usize,
) -> ToolResult<Vec<String>> {
    let items = split_list(input, '|')?;
    if items.len() < min || items.len() > max {
        return Err(ToolError::invalid_arguments(format!(
            "{field}: expected {min} to {max} items, got {}",
            items.len()
        )));
    }
    if let Some(long) = items.iter().find(|t| t.chars().count() > max_chars) {
        return Err(ToolError::invalid_arguments(format!(
            "{field}: '{long}' is longer than {max_chars} characters"
        )));
    }
    Ok(items)
}

fn display_path(field: &str, value: Option<&str>) -> ToolResult<Option<String>> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if value.chars().count() > PATH_MAX_CHARS {
        return Err(ToolError::invalid_arguments(format!(
            "{field}: '{value}' is longer than {PATH_MAX_CHARS} characters"
        )));
    }
    Ok(Some(value.to_string()))
}

fn landing_page(url: &str) -> ToolResult<String> {
    let parsed = Url::parse(url.trim())
        .map_err(|e| ToolError::invalid_arguments(format!("final_url: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(url.trim().to_string()),
        other => Err(ToolError::invalid_arguments(format!(
            "final_url: unsupported scheme '{other}'"
        ))),
    }
}

impl CreateResponsiveSearchAdTool {
    pub const NAME: &'static str = "create_responsive_search_ad";
    pub const DESCRIPTION: &'static str = "Create a responsive search ad. Headlines are pipe-separated (3-15, max 30 chars each); \
         descriptions are pipe-separated (2-4, max 90 chars each).";

    pub fn new(ads: AdsContext) -> Self {
        Self { ads }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new::<CreateResponsiveSearchAdParams>(Self::NAME, Self::DESCRIPTION)
            .param(common::customer_id())
            .param(common::ad_group_id())
            .param(common::text("headlines"))
            .param(common::text("descriptions"))
            .param(common::text("final_url"))
            .param(common::text("path1"))
            .param(common::text("path2"))
    }

    /// Validate the creative and build the ad, applying the default landing page.
    pub fn build_ad(&self, params: &CreateResponsiveSearchAdParams) -> ToolResult<Ad> {
        let headlines = text_assets(
            "headlines",
            &params.headlines,
            HEADLINE_COUNT,
            HEADLINE_MAX_CHARS,
        )?;
        let descriptions = text_assets(
            "descriptions",
            &params.descriptions,
            DESCRIPTION_COUNT,
            DESCRIPTION_MAX_CHARS,
        )?;
        let path1 = display_path("path1", params.path1.as_deref())?;
        let path2 = display_path("path2", params.path2.as_deref())?;
        if path2.is_some() && path1.is_none() {
            return Err(ToolError::invalid_arguments("path2 requires path1"));
        }

        let final_url = params
            .final_url
            .as_deref()
            .or(self.ads.defaults.final_url.as_deref())
            .ok_or_else(|| {
                ToolError::invalid_arguments(
                    "final_url is required when no default landing page is configured",
                )
            })?;
        let final_url = landing_page(final_url)?;

        let assets = |items: Vec<String>| {
            items
                .into_iter()
                .map(|text| AdTextAsset { text })
                .collect::<Vec<_>>()
        };

        Ok(Ad {
            final_urls: vec![final_url],
            responsive_search_ad: ResponsiveSearchAd {
                headlines: assets(headlines),
                descriptions: assets(descriptions),
                path1,
                path2,
            },
        })
    }

    #[instrument(skip_all, fields(customer = %params.customer_id, ad_group = %params.ad_group_id))]
    pub async fn execute(&self, params: CreateResponsiveSearchAdParams) -> ToolResult<String> {
        let ad = self.build_ad(&params)?;
        let summary = Self::creative_summary(&ad);
        info!(
            "Creating responsive search ad with {} headlines and {} descriptions",
            ad.responsive_search_ad.headlines.len(),
            ad.responsive_search_ad.descriptions.len()
        );

        let ad_group_ad = AdGroupAd {
            ad_group: Some(ResourcePath::ad_group(&params.customer_id, params.ad_group_id)),
            status: Some(EntityStatus::Enabled),
            ad: Some(ad),
        };
        let path = first_resource(
            self.ads
                .mutate
                .mutate(
                    &params.customer_id,
                    MutateRequest::AdGroupAds(vec![Operation::create(ad_group_ad)]),
                )
                .await?,
        )?;

        Ok(format!(
            "Responsive search ad created!\n  Resource: {path}\n{summary}"
        ))
    }

    fn creative_summary(ad: &Ad) -> String {
        let bullets = |assets: &[AdTextAsset]| {
            assets
                .iter()
                .map(|a| format!("    - {}", a.text))
                .collect::<Vec<_>>()
                .join("\n")
        };
        let rsa = &ad.responsive_search_ad;
        format!(
            "  Headlines ({}):\n{}\n  Descriptions ({}):\n{}\n  URL: {}",
            rsa.headlines.len(),
            bullets(&rsa.headlines),
            rsa.descriptions.len(),
            bullets(&rsa.descriptions),
            ad.final_urls.join(", ")
        )
    }
}

impl_tool_handler!(CreateResponsiveSearchAdTool, CreateResponsiveSearchAdParams);

// ============================================================================
// list_ads
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListAdsParams {
    #[schemars(description = "Google Ads customer ID (dashes are optional)")]
    pub customer_id: CustomerId,

    #[schemars(description = "Campaign ID")]
    pub campaign_id: EntityId,

    #[schemars(description = "Only return ads with this status")]
    pub status_filter: Option<EntityStatus>,
}

pub struct ListAdsTool {
    ads: AdsContext,
}

impl ListAdsTool {
    pub const NAME: &'static str = "list_ads";
    pub const DESCRIPTION: &'static str =
        "List the ads of a campaign with their status, headlines and traffic, most impressions first.";

    const FIELDS: &'static [&'static str] = &[
        "ad_group_ad.ad.id",
        "ad_group_ad.ad.type",
        "ad_group_ad.ad.final_urls",
        "ad_group_ad.ad.responsive_search_ad.headlines",
        "ad_group_ad.ad.responsive_search_ad.descriptions",
        "ad_group_ad.status",
        "ad_group.name",
        "metrics.impressions",
        "metrics.clicks",
        "metrics.ctr",
        "metrics.cost_micros",
    ];

    pub fn new(ads: AdsContext) -> Self {
        Self { ads }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new::<ListAdsParams>(Self::NAME, Self::DESCRIPTION)
            .param(common::customer_id())
            .param(common::campaign_id())
            .param(common::status_filter())
    }

    pub fn query(params: &ListAdsParams) -> Query {
        Query::select(Self::FIELDS)
            .from("ad_group_ad")
            .filter(Predicate::id_eq("campaign.id", params.campaign_id))
            .filter_opt(
                params
                    .status_filter
                    .map(|s| Predicate::status_eq("ad_group_ad.status", s)),
            )
            .order_by("metrics.impressions", Direction::Desc)
    }

    fn render_row(row: &PlatformRow) -> String {
        let headlines = row.texts("ad_group_ad.ad.responsive_search_ad.headlines");
        let preview = if headlines.is_empty() {
            "N/A".to_string()
        } else {
            headlines.iter().take(3).cloned().collect::<Vec<_>>().join(" | ")
        };

        format!(
            "Ad ID: {} ({})\n  Ad Group: {}\n  Type: {}\n  Headlines: {}\n  {} | Cost: {}",
            row.text_or("ad_group_ad.ad.id", "?"),
            row.enum_name("ad_group_ad.status"),
            row.text_or("ad_group.name", ""),
            row.enum_name("ad_group_ad.ad.type"),
            preview,
            traffic_line(row),
            format_money(row.int("metrics.cost_micros")),
        )
    }

    #[instrument(skip_all, fields(customer = %params.customer_id, campaign = %params.campaign_id))]
    pub async fn execute(&self, params: ListAdsParams) -> ToolResult<String> {
        info!("Listing ads");

        let rows = self
            .ads
            .search
            .search(&params.customer_id, &Self::query(&params))
            .await?;
        if rows.is_empty() {
            return Err(ToolError::not_found(format!(
                "No ads found for campaign {}.",
                params.campaign_id
            )));
        }

        let blocks: Vec<String> = rows.iter().map(Self::render_row).collect();
        Ok(report(format!("Ads in Campaign {}", params.campaign_id), &blocks))
    }
}

impl_tool_handler!(ListAdsTool, ListAdsParams);

// ============================================================================
// update_ad_status
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateAdStatusParams {
    #[schemars(description = "Google Ads customer ID (dashes are optional)")]
    pub customer_id: CustomerId,

    #[schemars(description = "Ad group ID")]
    pub ad_group_id: EntityId,

    #[schemars(description = "Ad ID")]
    pub ad_id: EntityId,

    #[schemars(description = "New status")]
    pub new_status: EntityStatus,
}

pub struct UpdateAdStatusTool {
    ads: AdsContext,
}

impl UpdateAdStatusTool {
    pub const NAME: &'static str = "update_ad_status";
    pub const DESCRIPTION: &'static str = "Enable, pause or remove an ad.";

    pub fn new(ads: AdsContext) -> Self {
        Self { ads }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new::<UpdateAdStatusParams>(Self::NAME, Self::DESCRIPTION)
            .param(common::customer_id())
            .param(common::ad_group_id())
            .param(ParamSpec::new("ad_id", ParamKind::EntityId))
            .param(common::new_status())
    }

    #[instrument(skip_all, fields(customer = %params.customer_id, ad = %params.ad_id))]
    pub async fn execute(&self, params: UpdateAdStatusParams) -> ToolResult<String> {
        info!("Setting ad status to {}", params.new_status);

        let operation = Operation::update(
            ResourcePath::ad_group_ad(&params.customer_id, params.ad_group_id, params.ad_id),
            AdGroupAd {
                status: Some(params.new_status),
                ..Default::default()
            },
        )?;
        self.ads
            .mutate
            .mutate(&params.customer_id, MutateRequest::AdGroupAds(vec![operation]))
            .await?;

        Ok(format!("Ad {} status updated to {}.", params.ad_id, params.new_status))
    }
}

impl_tool_handler!(UpdateAdStatusTool, UpdateAdStatusParams);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::ads::AdsDefaults;
    use crate::domains::ads::testing::RecordingPlatform;
    use crate::domains::tools::definitions::test_support::{args, registry};
    use serde_json::json;

    const HEADLINES: &str = "Premium Rain Parkas | Vancouver-Made|Recycled Materials";
    const DESCRIPTIONS: &str = "Built for West Coast rain.|Free shipping over $100.";

    #[tokio::test]
    async fn test_create_ad_group_default_bid() {
        let platform = RecordingPlatform::new();
        let text = registry(platform.context())
            .invoke(
                "create_ad_group",
                args(json!({ "customer_id": "1", "campaign_id": "5", "name": "Parkas" })),
            )
            .await
            .unwrap();
        assert!(text.contains("CPC Bid: $2.00"));

        let MutateRequest::AdGroups(ops) = &platform.mutations()[0].1 else {
            panic!("expected an ad group mutation");
        };
        let ad_group = ops[0].entity();
        assert_eq!(ad_group.cpc_bid_micros, Some(2_000_000));
        assert_eq!(ad_group.ad_group_type, Some(AdGroupType::SearchStandard));
        assert_eq!(ad_group.status, Some(EntityStatus::Enabled));
        assert_eq!(
            ad_group.campaign.as_ref().map(|p| p.as_str()),
            Some("customers/1/campaigns/5")
        );
    }

    #[tokio::test]
    async fn test_update_ad_group_mask() {
        let platform = RecordingPlatform::new();
        let text = registry(platform.context())
            .invoke(
                "update_ad_group",
                args(json!({ "customer_id": "1", "ad_group_id": "8", "cpc_bid_dollars": 1.25 })),
            )
            .await
            .unwrap();
        assert_eq!(text, "Ad group 8 updated (cpc_bid_micros).");
    }

    #[tokio::test]
    async fn test_create_responsive_search_ad_uses_default_landing_page() {
        let platform = RecordingPlatform::new();
        let ctx = platform.context_with(AdsDefaults {
            final_url: Some("https://example.com/shop".to_string()),
        });

        let text = registry(ctx)
            .invoke(
                "create_responsive_search_ad",
                args(json!({
                    "customer_id": "1",
                    "ad_group_id": "8",
                    "headlines": HEADLINES,
                    "descriptions": DESCRIPTIONS,
                    "path1": "parkas"
                })),
            )
            .await
            .unwrap();

        let MutateRequest::AdGroupAds(ops) = &platform.mutations()[0].1 else {
            panic!("expected an ad group ad mutation");
        };
        let ad = ops[0].entity().ad.as_ref().unwrap();
        assert_eq!(ad.final_urls, vec!["https://example.com/shop"]);
        assert_eq!(ad.responsive_search_ad.headlines[1].text, "Vancouver-Made");
        assert_eq!(ad.responsive_search_ad.path1.as_deref(), Some("parkas"));

        assert!(text.starts_with(
            "Responsive search ad created!\n  Resource: customers/1/adGroupAds/1\n  Headlines (3):"
        ));
        assert!(text.ends_with("URL: https://example.com/shop"));
    }

    #[tokio::test]
    async fn test_create_responsive_search_ad_with_stock_config() {
        let platform = RecordingPlatform::new();
        let config = crate::core::Config::default();
        let ctx = platform.context_with(AdsDefaults::from_config(&config.ads));

        let text = registry(ctx)
            .invoke(
                "create_responsive_search_ad",
                args(json!({
                    "customer_id": "1",
                    "ad_group_id": "8",
                    "headlines": HEADLINES,
                    "descriptions": DESCRIPTIONS
                })),
            )
            .await
            .unwrap();

        let MutateRequest::AdGroupAds(ops) = &platform.mutations()[0].1 else {
            panic!("expected an ad group ad mutation");
        };
        let ad = ops[0].entity().ad.as_ref().unwrap();
        assert_eq!(ad.final_urls, vec![crate::core::config::DEFAULT_FINAL_URL]);
        assert!(text.ends_with(&format!("URL: {}", crate::core::config::DEFAULT_FINAL_URL)));
    }

    #[tokio::test]
    async fn test_create_responsive_search_ad_validation() {
        let platform = RecordingPlatform::new();
        let registry = registry(platform.context());
        let long = "x".repeat(31);

        for bad in [
            // no landing page anywhere
            json!({ "headlines": HEADLINES, "descriptions": DESCRIPTIONS }),
            json!({ "headlines": "One|Two", "descriptions": DESCRIPTIONS, "final_url": "https://a.com" }),
            json!({ "headlines": format!("{long}|b|c"), "descriptions": DESCRIPTIONS, "final_url": "https://a.com" }),
            json!({ "headlines": HEADLINES, "descriptions": "Only one", "final_url": "https://a.com" }),
            json!({ "headlines": HEADLINES, "descriptions": DESCRIPTIONS, "final_url": "ftp://a.com" }),
            json!({ "headlines": HEADLINES, "descriptions": DESCRIPTIONS, "final_url": "https://a.com", "path2": "x" }),
            json!({ "headlines": HEADLINES, "descriptions": DESCRIPTIONS, "final_url": "https://a.com", "path1": "a-very-long-path-name" }),
        ] {
            let mut arguments = args(bad);
            arguments.insert("customer_id".into(), json!("1"));
            arguments.insert("ad_group_id".into(), json!("8"));
            let err = registry
                .invoke("create_responsive_search_ad", arguments)
                .await
                .unwrap_err();
            assert!(matches!(err, ToolError::InvalidArguments(_)), "{err}");
        }
        assert!(platform.mutations().is_empty());
    }

    #[tokio::test]
    async fn test_list_ads() {
        let platform = RecordingPlatform::new();
        platform.push_rows(vec![
            PlatformRow::new()
                .with("ad_group_ad.ad.id", "900")
                .with("ad_group_ad.status", "ENABLED")
                .with("ad_group.name", "Parkas")
                .with("ad_group_ad.ad.type", "RESPONSIVE_SEARCH_AD")
                .with(
                    "ad_group_ad.ad.responsive_search_ad.headlines",
                    json!([{ "text": "A" }, { "text": "B" }, { "text": "C" }, { "text": "D" }]),
                )
                .with("metrics.impressions", "12345")
                .with("metrics.clicks", "321")
                .with("metrics.ctr", 0.026)
                .with("metrics.cost_micros", "45670000"),
        ]);

        let text = registry(platform.context())
            .invoke(
                "list_ads",
                args(json!({ "customer_id": "1", "campaign_id": "5", "status_filter": "Enabled" })),
            )
            .await
            .unwrap();

        assert!(platform.gaql()[0].ends_with(
            "FROM ad_group_ad WHERE campaign.id = 5 AND ad_group_ad.status = 'ENABLED' \
             ORDER BY metrics.impressions DESC"
        ));
        assert_eq!(
            text,
            "Ads in Campaign 5:\n\n\
             Ad ID: 900 (ENABLED)\n  Ad Group: Parkas\n  Type: RESPONSIVE_SEARCH_AD\n  \
             Headlines: A | B | C\n  \
             Impressions: 12,345 | Clicks: 321 | CTR: 2.60% | Cost: $45.67"
        );
    }

    #[tokio::test]
    async fn test_list_ads_empty_is_not_found() {
        let platform = RecordingPlatform::new();
        let err = registry(platform.context())
            .invoke("list_ads", args(json!({ "customer_id": "1", "campaign_id": "5" })))
            .await
            .unwrap_err();
        assert_eq!(err, ToolError::NotFound("No ads found for campaign 5.".to_string()));
    }

    #[tokio::test]
    async fn test_update_ad_status_path() {
        let platform = RecordingPlatform::new();
        let text = registry(platform.context())
            .invoke(
                "update_ad_status",
                args(json!({ "customer_id": "1", "ad_group_id": "8", "ad_id": "900", "new_status": "paused" })),
            )
            .await
            .unwrap();
        assert_eq!(text, "Ad 900 status updated to PAUSED.");

        let MutateRequest::AdGroupAds(ops) = &platform.mutations()[0].1 else {
            panic!("expected an ad group ad mutation");
        };
        let Operation::Update { resource, mask, .. } = &ops[0] else {
            panic!("expected an update");
        };
        assert_eq!(resource.as_str(), "customers/1/adGroupAds/8~900");
        assert_eq!(mask.paths(), ["status"]);
    }
}
