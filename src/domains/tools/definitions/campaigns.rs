//! Campaign tools: listing, lookup, creation and updates.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::{self, first_resource, required_text};
use crate::domains::ads::AdsContext;
use crate::domains::ads::codec::{
    dollars_to_micros, ensure_ordered, format_count, format_fractional, format_money,
    format_percent,
};
use crate::domains::ads::mutation::{
    Campaign, CampaignBudget, MutateRequest, Operation, ResourcePath, TargetSpend,
};
use crate::domains::ads::query::{Direction, Predicate, Query};
use crate::domains::ads::row::PlatformRow;
use crate::domains::ads::types::{
    BudgetDeliveryMethod, ChannelType, CustomerId, EntityId, EntityStatus,
};
use crate::domains::tools::descriptor::{ParamKind, ParamSpec, ToolDescriptor};
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::format::report;
use crate::domains::tools::handlers::impl_tool_handler;

fn date_text(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn check_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> ToolResult<()> {
    if let (Some(start), Some(end)) = (start, end) {
        ensure_ordered(start, end)?;
    }
    Ok(())
}

fn campaign_not_found(campaign_id: EntityId) -> ToolError {
    ToolError::not_found(format!("Campaign {campaign_id} not found."))
}

// ============================================================================
// list_campaigns
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListCampaignsParams {
    #[schemars(description = "Google Ads customer ID (dashes are optional)")]
    pub customer_id: CustomerId,

    #[schemars(description = "Only return campaigns with this status")]
    pub status_filter: Option<EntityStatus>,
}

pub struct ListCampaignsTool {
    ads: AdsContext,
}

impl ListCampaignsTool {
    pub const NAME: &'static str = "list_campaigns";
    pub const DESCRIPTION: &'static str =
        "List all campaigns in the account with their status, channel, daily budget and dates.";

    const FIELDS: &'static [&'static str] = &[
        "campaign.id",
        "campaign.name",
        "campaign.status",
        "campaign.advertising_channel_type",
        "campaign_budget.amount_micros",
        "campaign.start_date",
        "campaign.end_date",
    ];

    pub fn new(ads: AdsContext) -> Self {
        Self { ads }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new::<ListCampaignsParams>(Self::NAME, Self::DESCRIPTION)
            .param(common::customer_id())
            .param(common::status_filter())
    }

    pub fn query(params: &ListCampaignsParams) -> Query {
        Query::select(Self::FIELDS)
            .from("campaign")
            .filter_opt(
                params
                    .status_filter
                    .map(|s| Predicate::status_eq("campaign.status", s)),
            )
            .order_by("campaign.name", Direction::Asc)
    }

    fn render_row(row: &PlatformRow) -> String {
        format!(
            "ID: {}\n  Name: {}\n  Status: {}\n  Channel: {}\n  Daily Budget: {}\n  Start: {}\n  End: {}",
            row.text_or("campaign.id", "?"),
            row.text_or("campaign.name", ""),
            row.enum_name("campaign.status"),
            row.enum_name("campaign.advertising_channel_type"),
            format_money(row.int("campaign_budget.amount_micros")),
            row.text_or("campaign.start_date", "Not set"),
            row.text_or("campaign.end_date", "Not set"),
        )
    }

    #[instrument(skip_all, fields(customer = %params.customer_id))]
    pub async fn execute(&self, params: ListCampaignsParams) -> ToolResult<String> {
        info!("Listing campaigns (status filter: {:?})", params.status_filter);

        let rows = self
            .ads
            .search
            .search(&params.customer_id, &Self::query(&params))
            .await?;
        if rows.is_empty() {
            return Ok("No campaigns found.".to_string());
        }

        let blocks: Vec<String> = rows.iter().map(Self::render_row).collect();
        Ok(report(format!("Found {} campaign(s)", blocks.len()), &blocks))
    }
}

impl_tool_handler!(ListCampaignsTool, ListCampaignsParams);

// ============================================================================
// get_campaign
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetCampaignParams {
    #[schemars(description = "Google Ads customer ID (dashes are optional)")]
    pub customer_id: CustomerId,

    #[schemars(description = "Campaign ID")]
    pub campaign_id: EntityId,
}

pub struct GetCampaignTool {
    ads: AdsContext,
}

impl GetCampaignTool {
    pub const NAME: &'static str = "get_campaign";
    pub const DESCRIPTION: &'static str =
        "Get settings and lifetime performance of a single campaign.";

    const FIELDS: &'static [&'static str] = &[
        "campaign.id",
        "campaign.name",
        "campaign.status",
        "campaign.advertising_channel_type",
        "campaign.bidding_strategy_type",
        "campaign_budget.amount_micros",
        "campaign.start_date",
        "campaign.end_date",
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
        ToolDescriptor::new::<GetCampaignParams>(Self::NAME, Self::DESCRIPTION)
            .param(common::customer_id())
            .param(common::campaign_id())
    }

    pub fn query(params: &GetCampaignParams) -> Query {
        Query::select(Self::FIELDS)
            .from("campaign")
            .filter(Predicate::id_eq("campaign.id", params.campaign_id))
    }

    fn render_row(row: &PlatformRow) -> String {
        format!(
            "Campaign: {} (ID: {})\n\
             Status: {}\n\
             Channel: {}\n\
             Bidding: {}\n\
             Daily Budget: {}\n\
             Start: {} | End: {}\n\
             \n\
             Performance:\n  \
             Impressions: {}\n  \
             Clicks: {}\n  \
             CTR: {}\n  \
             Avg CPC: {}\n  \
             Cost: {}\n  \
             Conversions: {}",
            row.text_or("campaign.name", ""),
            row.text_or("campaign.id", "?"),
            row.enum_name("campaign.status"),
            row.enum_name("campaign.advertising_channel_type"),
            row.enum_name("campaign.bidding_strategy_type"),
            format_money(row.int("campaign_budget.amount_micros")),
            row.text_or("campaign.start_date", "Not set"),
            row.text_or("campaign.end_date", "Not set"),
            format_count(row.int("metrics.impressions")),
            format_count(row.int("metrics.clicks")),
            format_percent(row.float("metrics.ctr")),
            format_money(row.int("metrics.average_cpc")),
            format_money(row.int("metrics.cost_micros")),
            format_fractional(row.float("metrics.conversions")),
        )
    }

    #[instrument(skip_all, fields(customer = %params.customer_id, campaign = %params.campaign_id))]
    pub async fn execute(&self, params: GetCampaignParams) -> ToolResult<String> {
        info!("Fetching campaign");

        let rows = self
            .ads
            .search
            .search(&params.customer_id, &Self::query(&params))
            .await?;
        rows.first()
            .map(Self::render_row)
            .ok_or_else(|| campaign_not_found(params.campaign_id))
    }
}

impl_tool_handler!(GetCampaignTool, GetCampaignParams);

// ============================================================================
// create_campaign
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateCampaignParams {
    #[schemars(description = "Google Ads customer ID (dashes are optional)")]
    pub customer_id: CustomerId,

    #[schemars(description = "Campaign name")]
    pub name: String,

    #[schemars(description = "Daily budget in account currency")]
    pub daily_budget_dollars: f64,

    #[schemars(description = "Advertising channel (default: SEARCH)")]
    #[serde(default = "common::default_channel_type")]
    pub channel_type: ChannelType,

    #[schemars(description = "Start date (YYYY-MM-DD)")]
    pub start_date: Option<NaiveDate>,

    #[schemars(description = "End date (YYYY-MM-DD)")]
    pub end_date: Option<NaiveDate>,
}

pub struct CreateCampaignTool {
    ads: AdsContext,
}

impl CreateCampaignTool {
    pub const NAME: &'static str = "create_campaign";
    pub const DESCRIPTION: &'static str = "Create a campaign with its own daily budget and Maximize Clicks bidding. \
         New campaigns always start PAUSED; enable them with update_campaign_status when ready.";

    pub fn new(ads: AdsContext) -> Self {
        Self { ads }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new::<CreateCampaignParams>(Self::NAME, Self::DESCRIPTION)
            .param(common::customer_id())
            .param(common::text("name"))
            .param(common::number("daily_budget_dollars"))
            .param(
                ParamSpec::new("channel_type", ParamKind::ChannelType)
                    .with_default(common::default_channel_type().as_str()),
            )
            .param(common::date("start_date"))
            .param(common::date("end_date"))
    }

    #[instrument(skip_all, fields(customer = %params.customer_id, name = %params.name))]
    pub async fn execute(&self, params: CreateCampaignParams) -> ToolResult<String> {
        let name = required_text("name", &params.name)?;
        let budget_micros = dollars_to_micros(params.daily_budget_dollars)?;
        check_dates(params.start_date, params.end_date)?;
        let customer = &params.customer_id;

        info!("Creating campaign budget ({})", format_money(budget_micros));
        let budget = CampaignBudget {
            name: Some(format!("{name} Budget")),
            amount_micros: Some(budget_micros),
            delivery_method: Some(BudgetDeliveryMethod::Standard),
        };
        let budget_path = first_resource(
            self.ads
                .mutate
                .mutate(customer, MutateRequest::CampaignBudgets(vec![Operation::create(budget)]))
                .await?,
        )?;

        info!("Creating campaign on budget {}", budget_path);
        let campaign = Campaign {
            name: Some(name.clone()),
            campaign_budget: Some(budget_path),
            status: Some(EntityStatus::Paused),
            advertising_channel_type: Some(params.channel_type),
            target_spend: Some(TargetSpend {
                target_spend_micros: 0,
            }),
            start_date: params.start_date.map(date_text),
            end_date: params.end_date.map(date_text),
        };
        let campaign_path = first_resource(
            self.ads
                .mutate
                .mutate(customer, MutateRequest::Campaigns(vec![Operation::create(campaign)]))
                .await?,
        )?;

        Ok(format!(
            "Campaign created successfully!\n  \
             Name: {}\n  \
             Resource: {}\n  \
             Channel: {}\n  \
             Daily Budget: {}\n  \
             Status: PAUSED (enable when ready)\n  \
             Start: {}\n  \
             End: {}",
            name,
            campaign_path,
            params.channel_type,
            format_money(budget_micros),
            params.start_date.map_or("Not set".to_string(), date_text),
            params.end_date.map_or("Not set".to_string(), date_text),
        ))
    }
}

impl_tool_handler!(CreateCampaignTool, CreateCampaignParams);

// ============================================================================
// update_campaign_status
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateCampaignStatusParams {
    #[schemars(description = "Google Ads customer ID (dashes are optional)")]
    pub customer_id: CustomerId,

    #[schemars(description = "Campaign ID")]
    pub campaign_id: EntityId,

    #[schemars(description = "New status")]
    pub new_status: EntityStatus,
}

pub struct UpdateCampaignStatusTool {
    ads: AdsContext,
}

impl UpdateCampaignStatusTool {
    pub const NAME: &'static str = "update_campaign_status";
    pub const DESCRIPTION: &'static str = "Enable, pause or remove a campaign.";

    pub fn new(ads: AdsContext) -> Self {
        Self { ads }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new::<UpdateCampaignStatusParams>(Self::NAME, Self::DESCRIPTION)
            .param(common::customer_id())
            .param(common::campaign_id())
            .param(common::new_status())
    }

    #[instrument(skip_all, fields(customer = %params.customer_id, campaign = %params.campaign_id))]
    pub async fn execute(&self, params: UpdateCampaignStatusParams) -> ToolResult<String> {
        info!("Setting campaign status to {}", params.new_status);

        let operation = Operation::update(
            ResourcePath::campaign(&params.customer_id, params.campaign_id),
            Campaign {
                status: Some(params.new_status),
                ..Default::default()
            },
        )?;
        self.ads
            .mutate
            .mutate(&params.customer_id, MutateRequest::Campaigns(vec![operation]))
            .await?;

        Ok(format!(
            "Campaign {} status updated to {}.",
            params.campaign_id, params.new_status
        ))
    }
}

impl_tool_handler!(UpdateCampaignStatusTool, UpdateCampaignStatusParams);

// ============================================================================
// update_campaign
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateCampaignParams {
    #[schemars(description = "Google Ads customer ID (dashes are optional)")]
    pub customer_id: CustomerId,

    #[schemars(description = "Campaign ID")]
    pub campaign_id: EntityId,

    #[schemars(description = "New campaign name")]
    pub name: Option<String>,

    #[schemars(description = "New status")]
    pub status: Option<EntityStatus>,

    #[schemars(description = "New start date (YYYY-MM-DD)")]
    pub start_date: Option<NaiveDate>,

    #[schemars(description = "New end date (YYYY-MM-DD)")]
    pub end_date: Option<NaiveDate>,
}

pub struct UpdateCampaignTool {
    ads: AdsContext,
}

impl UpdateCampaignTool {
    pub const NAME: &'static str = "update_campaign";
    pub const DESCRIPTION: &'static str = "Change a campaign's name, status or dates. Only the fields given are changed.";

    pub fn new(ads: AdsContext) -> Self {
        Self { ads }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new::<UpdateCampaignParams>(Self::NAME, Self::DESCRIPTION)
            .param(common::customer_id())
            .param(common::campaign_id())
            .param(common::text("name"))
            .param(ParamSpec::new("status", ParamKind::Status))
            .param(common::date("start_date"))
            .param(common::date("end_date"))
    }

    /// The update entity holding only the fields the caller supplied.
    pub fn changes(params: &UpdateCampaignParams) -> ToolResult<Campaign> {
        check_dates(params.start_date, params.end_date)?;
        Ok(Campaign {
            name: params
                .name
                .as_deref()
                .map(|n| required_text("name", n))
                .transpose()?,
            status: params.status,
            start_date: params.start_date.map(date_text),
            end_date: params.end_date.map(date_text),
            ..Default::default()
        })
    }

    #[instrument(skip_all, fields(customer = %params.customer_id, campaign = %params.campaign_id))]
    pub async fn execute(&self, params: UpdateCampaignParams) -> ToolResult<String> {
        let operation = Operation::update(
            ResourcePath::campaign(&params.customer_id, params.campaign_id),
            Self::changes(&params)?,
        )?;
        let changed = match &operation {
            Operation::Update { mask, .. } => mask.field_names().join(", "),
            Operation::Create(_) => String::new(),
        };
        info!("Updating campaign fields: {}", changed);

        self.ads
            .mutate
            .mutate(&params.customer_id, MutateRequest::Campaigns(vec![operation]))
            .await?;

        Ok(format!("Campaign {} updated ({}).", params.campaign_id, changed))
    }
}

impl_tool_handler!(UpdateCampaignTool, UpdateCampaignParams);

// ============================================================================
// update_campaign_budget
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateCampaignBudgetParams {
    #[schemars(description = "Google Ads customer ID (dashes are optional)")]
    pub customer_id: CustomerId,

    #[schemars(description = "Campaign ID")]
    pub campaign_id: EntityId,

    #[schemars(description = "New daily budget in account currency")]
    pub new_daily_budget_dollars: f64,
}

pub struct UpdateCampaignBudgetTool {
    ads: AdsContext,
}

impl UpdateCampaignBudgetTool {
    pub const NAME: &'static str = "update_campaign_budget";
    pub const DESCRIPTION: &'static str = "Change the daily budget of a campaign.";

    const FIELDS: &'static [&'static str] = &["campaign.campaign_budget"];

    pub fn new(ads: AdsContext) -> Self {
        Self { ads }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new::<UpdateCampaignBudgetParams>(Self::NAME, Self::DESCRIPTION)
            .param(common::customer_id())
            .param(common::campaign_id())
            .param(common::number("new_daily_budget_dollars"))
    }

    pub fn query(params: &UpdateCampaignBudgetParams) -> Query {
        Query::select(Self::FIELDS)
            .from("campaign")
            .filter(Predicate::id_eq("campaign.id", params.campaign_id))
    }

    #[instrument(skip_all, fields(customer = %params.customer_id, campaign = %params.campaign_id))]
    pub async fn execute(&self, params: UpdateCampaignBudgetParams) -> ToolResult<String> {
        let amount_micros = dollars_to_micros(params.new_daily_budget_dollars)?;

        let rows = self
            .ads
            .search
            .search(&params.customer_id, &Self::query(&params))
            .await?;
        let budget_path = rows
            .first()
            .and_then(|row| row.text("campaign.campaign_budget"))
            .filter(|path| !path.is_empty())
            .map(ResourcePath::from_platform)
            .ok_or_else(|| campaign_not_found(params.campaign_id))?;

        info!("Updating budget {} to {}", budget_path, format_money(amount_micros));
        let operation = Operation::update(
            budget_path,
            CampaignBudget {
                amount_micros: Some(amount_micros),
                ..Default::default()
            },
        )?;
        self.ads
            .mutate
            .mutate(&params.customer_id, MutateRequest::CampaignBudgets(vec![operation]))
            .await?;

        Ok(format!(
            "Campaign {} daily budget updated to {}.",
            params.campaign_id,
            format_money(amount_micros)
        ))
    }
}

impl_tool_handler!(UpdateCampaignBudgetTool, UpdateCampaignBudgetParams);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::ads::testing::RecordingPlatform;
    use crate::domains::tools::definitions::test_support::{args, registry};
    use serde_json::json;

    #[tokio::test]
    async fn test_list_campaigns_query_and_rendering() {
        let platform = RecordingPlatform::new();
        platform.push_rows(vec![
            PlatformRow::new()
                .with("campaign.id", "11")
                .with("campaign.name", "Rain Parkas")
                .with("campaign.status", "PAUSED")
                .with("campaign.advertising_channel_type", "SEARCH")
                .with("campaign_budget.amount_micros", "50000000")
                .with("campaign.start_date", "2024-06-01"),
        ]);

        let text = registry(platform.context())
            .invoke(
                "list_campaigns",
                args(json!({ "customer_id": "123-456-7890", "status_filter": "paused" })),
            )
            .await
            .unwrap();

        assert_eq!(
            platform.gaql(),
            vec![
                "SELECT campaign.id, campaign.name, campaign.status, \
                 campaign.advertising_channel_type, campaign_budget.amount_micros, \
                 campaign.start_date, campaign.end_date FROM campaign \
                 WHERE campaign.status = 'PAUSED' ORDER BY campaign.name"
            ]
        );
        assert_eq!(platform.queries()[0].0.as_str(), "1234567890");
        assert_eq!(
            text,
            "Found 1 campaign(s):\n\n\
             ID: 11\n  Name: Rain Parkas\n  Status: PAUSED\n  Channel: SEARCH\n  \
             Daily Budget: $50.00\n  Start: 2024-06-01\n  End: Not set"
        );
    }

    #[tokio::test]
    async fn test_list_campaigns_empty_account() {
        let platform = RecordingPlatform::new();
        let text = registry(platform.context())
            .invoke("list_campaigns", args(json!({ "customer_id": "1" })))
            .await
            .unwrap();
        assert_eq!(text, "No campaigns found.");
        assert!(!platform.gaql()[0].contains("WHERE"));
    }

    #[tokio::test]
    async fn test_get_campaign_not_found() {
        let platform = RecordingPlatform::new();
        let err = registry(platform.context())
            .invoke("get_campaign", args(json!({ "customer_id": "1", "campaign_id": "42" })))
            .await
            .unwrap_err();
        assert_eq!(err, ToolError::NotFound("Campaign 42 not found.".to_string()));
        assert!(platform.gaql()[0].ends_with("FROM campaign WHERE campaign.id = 42"));
    }

    #[tokio::test]
    async fn test_create_campaign_is_always_paused() {
        let platform = RecordingPlatform::new();
        let text = registry(platform.context())
            .invoke(
                "create_campaign",
                args(json!({
                    "customer_id": "1234567890",
                    "name": "Spring Sale",
                    "daily_budget_dollars": 50.00,
                    "channel_type": "search",
                    "status": "ENABLED"
                })),
            )
            .await
            .unwrap();

        let mutations = platform.mutations();
        assert_eq!(mutations.len(), 2);

        let MutateRequest::CampaignBudgets(budgets) = &mutations[0].1 else {
            panic!("expected a budget mutation first");
        };
        assert_eq!(
            budgets[0],
            Operation::create(CampaignBudget {
                name: Some("Spring Sale Budget".to_string()),
                amount_micros: Some(50_000_000),
                delivery_method: Some(BudgetDeliveryMethod::Standard),
            })
        );

        let MutateRequest::Campaigns(campaigns) = &mutations[1].1 else {
            panic!("expected a campaign mutation second");
        };
        let campaign = campaigns[0].entity();
        assert_eq!(campaign.status, Some(EntityStatus::Paused));
        assert_eq!(campaign.advertising_channel_type, Some(ChannelType::Search));
        assert_eq!(
            campaign.campaign_budget.as_ref().map(|p| p.as_str()),
            Some("customers/1234567890/campaignBudgets/1")
        );
        assert_eq!(
            campaign.target_spend,
            Some(TargetSpend {
                target_spend_micros: 0
            })
        );

        assert!(text.contains("Daily Budget: $50.00"));
        assert!(text.contains("Status: PAUSED"));
        assert!(text.contains("Resource: customers/1234567890/campaigns/1"));
    }

    #[tokio::test]
    async fn test_create_campaign_rejects_bad_input_before_any_call() {
        let platform = RecordingPlatform::new();
        let registry = registry(platform.context());

        for bad in [
            json!({ "customer_id": "1", "name": "A", "daily_budget_dollars": 10, "channel_type": "video" }),
            json!({ "customer_id": "1", "name": "A", "daily_budget_dollars": -1 }),
            json!({ "customer_id": "1", "name": "  ", "daily_budget_dollars": 10 }),
            json!({
                "customer_id": "1", "name": "A", "daily_budget_dollars": 10,
                "start_date": "2024-07-01", "end_date": "2024-06-01"
            }),
        ] {
            let err = registry.invoke("create_campaign", args(bad)).await.unwrap_err();
            assert!(matches!(err, ToolError::InvalidArguments(_)));
        }
        assert!(platform.mutations().is_empty());
    }

    #[tokio::test]
    async fn test_update_campaign_status_mask() {
        let platform = RecordingPlatform::new();
        let text = registry(platform.context())
            .invoke(
                "update_campaign_status",
                args(json!({ "customer_id": "1", "campaign_id": 7, "new_status": "enabled" })),
            )
            .await
            .unwrap();
        assert_eq!(text, "Campaign 7 status updated to ENABLED.");

        let MutateRequest::Campaigns(ops) = &platform.mutations()[0].1 else {
            panic!("expected a campaign mutation");
        };
        let Operation::Update { resource, mask, .. } = &ops[0] else {
            panic!("expected an update");
        };
        assert_eq!(resource.as_str(), "customers/1/campaigns/7");
        assert_eq!(mask.paths(), ["status"]);
    }

    #[tokio::test]
    async fn test_update_campaign_masks_only_supplied_fields() {
        let platform = RecordingPlatform::new();
        registry(platform.context())
            .invoke(
                "update_campaign",
                args(json!({
                    "customer_id": "1",
                    "campaign_id": "7",
                    "name": "Summer",
                    "end_date": "2024-08-31"
                })),
            )
            .await
            .unwrap();

        let MutateRequest::Campaigns(ops) = &platform.mutations()[0].1 else {
            panic!("expected a campaign mutation");
        };
        let Operation::Update { mask, entity, .. } = &ops[0] else {
            panic!("expected an update");
        };
        let mut paths = mask.field_names();
        paths.sort();
        assert_eq!(paths, ["end_date", "name"]);
        assert_eq!(entity.end_date.as_deref(), Some("2024-08-31"));
    }

    #[tokio::test]
    async fn test_update_campaign_without_changes() {
        let platform = RecordingPlatform::new();
        let err = registry(platform.context())
            .invoke("update_campaign", args(json!({ "customer_id": "1", "campaign_id": "7" })))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
        assert!(platform.mutations().is_empty());
    }

    #[tokio::test]
    async fn test_update_campaign_budget_looks_up_budget() {
        let platform = RecordingPlatform::new();
        platform.push_rows(vec![
            PlatformRow::new().with("campaign.campaign_budget", "customers/1/campaignBudgets/99"),
        ]);

        let text = registry(platform.context())
            .invoke(
                "update_campaign_budget",
                args(json!({ "customer_id": "1", "campaign_id": "7", "new_daily_budget_dollars": 75.5 })),
            )
            .await
            .unwrap();
        assert_eq!(text, "Campaign 7 daily budget updated to $75.50.");
        assert_eq!(
            platform.gaql(),
            vec!["SELECT campaign.campaign_budget FROM campaign WHERE campaign.id = 7"]
        );

        let MutateRequest::CampaignBudgets(ops) = &platform.mutations()[0].1 else {
            panic!("expected a budget mutation");
        };
        let Operation::Update { resource, mask, entity } = &ops[0] else {
            panic!("expected an update");
        };
        assert_eq!(resource.as_str(), "customers/1/campaignBudgets/99");
        assert_eq!(mask.to_string(), "amountMicros");
        assert_eq!(entity.amount_micros, Some(75_500_000));
    }

    #[tokio::test]
    async fn test_update_campaign_budget_unknown_campaign() {
        let platform = RecordingPlatform::new();
        let err = registry(platform.context())
            .invoke(
                "update_campaign_budget",
                args(json!({ "customer_id": "1", "campaign_id": "7", "new_daily_budget_dollars": 10 })),
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(platform.mutations().is_empty());
    }

    #[tokio::test]
    async fn test_platform_failure_is_surfaced() {
        let platform = RecordingPlatform::new();
        platform.push_mutate_result(Err(ToolError::Platform(vec![
            "Budget amount is too low.".to_string(),
            "Campaign name already exists.".to_string(),
        ])));

        let err = registry(platform.context())
            .invoke(
                "create_campaign",
                args(json!({ "customer_id": "1", "name": "Dup", "daily_budget_dollars": 0.01 })),
            )
            .await
            .unwrap_err();
        assert_eq!(
            err.render(),
            "Google Ads API Error:\nError: Budget amount is too low.\nError: Campaign name already exists."
        );
        assert_eq!(platform.mutations().len(), 1);
    }
}
