//! Tool definitions module.
//!
//! One file per tool family. Each tool exposes `NAME`, `DESCRIPTION`,
//! `descriptor()` and an async `execute(params)`; [`register_all`] wires them
//! into the registry once at startup.

pub mod ads;
pub mod campaigns;
mod common;
pub mod keywords;
pub mod reporting;

use std::sync::Arc;

use crate::domains::ads::AdsContext;

use super::registry::ToolRegistryBuilder;

pub use ads::{
    CreateAdGroupTool, CreateResponsiveSearchAdTool, ListAdsTool, UpdateAdGroupTool,
    UpdateAdStatusTool,
};
pub use campaigns::{
    CreateCampaignTool, GetCampaignTool, ListCampaignsTool, UpdateCampaignBudgetTool,
    UpdateCampaignStatusTool, UpdateCampaignTool,
};
pub use keywords::{
    AddKeywordsTool, AddNegativeKeywordsTool, GetKeywordPerformanceTool, ListKeywordsTool,
};
pub use reporting::{
    GetAdGroupPerformanceTool, GetCampaignPerformanceTool, GetGeoPerformanceTool,
    GetSearchTermsReportTool,
};

/// Register every tool, in listing order, against one platform context.
pub fn register_all(builder: ToolRegistryBuilder, ads: AdsContext) -> ToolRegistryBuilder {
    builder
        // Campaigns
        .register(ListCampaignsTool::descriptor(), Arc::new(ListCampaignsTool::new(ads.clone())))
        .register(GetCampaignTool::descriptor(), Arc::new(GetCampaignTool::new(ads.clone())))
        .register(CreateCampaignTool::descriptor(), Arc::new(CreateCampaignTool::new(ads.clone())))
        .register(
            UpdateCampaignStatusTool::descriptor(),
            Arc::new(UpdateCampaignStatusTool::new(ads.clone())),
        )
        .register(UpdateCampaignTool::descriptor(), Arc::new(UpdateCampaignTool::new(ads.clone())))
        .register(
            UpdateCampaignBudgetTool::descriptor(),
            Arc::new(UpdateCampaignBudgetTool::new(ads.clone())),
        )
        // Ad groups and ads
        .register(CreateAdGroupTool::descriptor(), Arc::new(CreateAdGroupTool::new(ads.clone())))
        .register(UpdateAdGroupTool::descriptor(), Arc::new(UpdateAdGroupTool::new(ads.clone())))
        .register(
            CreateResponsiveSearchAdTool::descriptor(),
            Arc::new(CreateResponsiveSearchAdTool::new(ads.clone())),
        )
        .register(ListAdsTool::descriptor(), Arc::new(ListAdsTool::new(ads.clone())))
        .register(UpdateAdStatusTool::descriptor(), Arc::new(UpdateAdStatusTool::new(ads.clone())))
        // Keywords
        .register(ListKeywordsTool::descriptor(), Arc::new(ListKeywordsTool::new(ads.clone())))
        .register(AddKeywordsTool::descriptor(), Arc::new(AddKeywordsTool::new(ads.clone())))
        .register(
            AddNegativeKeywordsTool::descriptor(),
            Arc::new(AddNegativeKeywordsTool::new(ads.clone())),
        )
        .register(
            GetKeywordPerformanceTool::descriptor(),
            Arc::new(GetKeywordPerformanceTool::new(ads.clone())),
        )
        // Reporting
        .register(
            GetCampaignPerformanceTool::descriptor(),
            Arc::new(GetCampaignPerformanceTool::new(ads.clone())),
        )
        .register(
            GetAdGroupPerformanceTool::descriptor(),
            Arc::new(GetAdGroupPerformanceTool::new(ads.clone())),
        )
        .register(
            GetSearchTermsReportTool::descriptor(),
            Arc::new(GetSearchTermsReportTool::new(ads.clone())),
        )
        .register(GetGeoPerformanceTool::descriptor(), Arc::new(GetGeoPerformanceTool::new(ads)))
}
