//! Mutation builder - create/update operations, field masks and resource paths.
//!
//! Update masks are never written by hand: [`Operation::update`] derives the
//! mask from the fields that are actually set on the update entity. Entities
//! serialize in the REST wire casing (`amountMicros`), so masks do too.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::row::to_snake_case;
use super::types::{
    AdGroupType, BudgetDeliveryMethod, ChannelType, CustomerId, EntityId, EntityStatus, MatchType,
};
use crate::domains::tools::{ToolError, ToolResult};

// ============================================================================
// Resource paths
// ============================================================================

/// Opaque reference to one entity inside an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ResourcePath(String);

impl ResourcePath {
    /// Wrap a path returned by the platform.
    pub fn from_platform(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn campaign(customer: &CustomerId, campaign: EntityId) -> Self {
        Self(format!("customers/{customer}/campaigns/{campaign}"))
    }

    pub fn ad_group(customer: &CustomerId, ad_group: EntityId) -> Self {
        Self(format!("customers/{customer}/adGroups/{ad_group}"))
    }

    pub fn ad_group_ad(customer: &CustomerId, ad_group: EntityId, ad: EntityId) -> Self {
        Self(format!("customers/{customer}/adGroupAds/{ad_group}~{ad}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Field masks
// ============================================================================

/// The attribute paths an update may change, e.g. `status`, `keyword.text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMask {
    paths: Vec<String>,
}

impl FieldMask {
    /// Collect the paths of every populated field of `entity`.
    ///
    /// Fails with `InvalidArguments` when nothing is set.
    pub fn from_entity<T: Serialize>(entity: &T) -> ToolResult<Self> {
        let value = serde_json::to_value(entity)
            .map_err(|e| ToolError::invalid_arguments(format!("unserializable update: {e}")))?;

        let mut paths = Vec::new();
        collect_paths(&value, "", &mut paths);

        if paths.is_empty() {
            return Err(ToolError::invalid_arguments(
                "update has no fields to change",
            ));
        }
        Ok(Self { paths })
    }

    /// Wire paths, e.g. `keyword.matchType`.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Paths in GAQL field casing, e.g. `keyword.match_type`.
    pub fn field_names(&self) -> Vec<String> {
        self.paths
            .iter()
            .map(|path| path.split('.').map(to_snake_case).collect::<Vec<_>>().join("."))
            .collect()
    }
}

impl fmt::Display for FieldMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.paths.join(","))
    }
}

fn collect_paths(value: &Value, prefix: &str, paths: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                collect_paths(child, &path, paths);
            }
        }
        Value::Null => {}
        _ if !prefix.is_empty() => paths.push(prefix.to_string()),
        _ => {}
    }
}

// ============================================================================
// Operations
// ============================================================================

/// A single create or update of one entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation<T> {
    Create(T),
    Update {
        resource: ResourcePath,
        entity: T,
        mask: FieldMask,
    },
}

impl<T: Serialize> Operation<T> {
    pub fn create(entity: T) -> Self {
        Self::Create(entity)
    }

    /// Build an update whose mask lists exactly the fields set on `entity`.
    pub fn update(resource: ResourcePath, entity: T) -> ToolResult<Self> {
        let mask = FieldMask::from_entity(&entity)?;
        Ok(Self::Update {
            resource,
            entity,
            mask,
        })
    }

    pub fn entity(&self) -> &T {
        match self {
            Self::Create(entity) => entity,
            Self::Update { entity, .. } => entity,
        }
    }
}

/// A batch of operations against one service, applied all-or-nothing by the
/// platform.
#[derive(Debug, Clone, PartialEq)]
pub enum MutateRequest {
    CampaignBudgets(Vec<Operation<CampaignBudget>>),
    Campaigns(Vec<Operation<Campaign>>),
    AdGroups(Vec<Operation<AdGroup>>),
    AdGroupAds(Vec<Operation<AdGroupAd>>),
    AdGroupCriteria(Vec<Operation<AdGroupCriterion>>),
    CampaignCriteria(Vec<Operation<CampaignCriterion>>),
}

impl MutateRequest {
    /// REST collection name of the target service.
    pub fn service(&self) -> &'static str {
        match self {
            Self::CampaignBudgets(_) => "campaignBudgets",
            Self::Campaigns(_) => "campaigns",
            Self::AdGroups(_) => "adGroups",
            Self::AdGroupAds(_) => "adGroupAds",
            Self::AdGroupCriteria(_) => "adGroupCriteria",
            Self::CampaignCriteria(_) => "campaignCriteria",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::CampaignBudgets(ops) => ops.len(),
            Self::Campaigns(ops) => ops.len(),
            Self::AdGroups(ops) => ops.len(),
            Self::AdGroupAds(ops) => ops.len(),
            Self::AdGroupCriteria(ops) => ops.len(),
            Self::CampaignCriteria(ops) => ops.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// Entities
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignBudget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_micros: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_method: Option<BudgetDeliveryMethod>,
}

/// Maximize Clicks bidding.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSpend {
    pub target_spend_micros: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_budget: Option<ResourcePath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advertising_channel_type: Option<ChannelType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_spend: Option<TargetSpend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<ResourcePath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ad_group_type: Option<AdGroupType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpc_bid_micros: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdTextAsset {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsiveSearchAd {
    pub headlines: Vec<AdTextAsset>,
    pub descriptions: Vec<AdTextAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path2: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ad {
    pub final_urls: Vec<String>,
    pub responsive_search_ad: ResponsiveSearchAd,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdGroupAd {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_group: Option<ResourcePath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad: Option<Ad>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordInfo {
    pub text: String,
    pub match_type: MatchType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdGroupCriterion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_group: Option<ResourcePath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<KeywordInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpc_bid_micros: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignCriterion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<ResourcePath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<KeywordInfo>,
}
