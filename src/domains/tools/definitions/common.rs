//! Parameters and helpers shared by several tools.

use crate::domains::ads::mutation::ResourcePath;
use crate::domains::ads::query::DateRange;
use crate::domains::ads::types::{ChannelType, MatchType};
use crate::domains::tools::descriptor::{ParamKind, ParamSpec};
use crate::domains::tools::error::{ToolError, ToolResult};

pub fn customer_id() -> ParamSpec {
    ParamSpec::new("customer_id", ParamKind::CustomerId)
}

pub fn campaign_id() -> ParamSpec {
    ParamSpec::new("campaign_id", ParamKind::EntityId)
}

pub fn ad_group_id() -> ParamSpec {
    ParamSpec::new("ad_group_id", ParamKind::EntityId)
}

pub fn status_filter() -> ParamSpec {
    ParamSpec::new("status_filter", ParamKind::Status)
}

pub fn new_status() -> ParamSpec {
    ParamSpec::new("new_status", ParamKind::Status)
}

pub fn date_range() -> ParamSpec {
    ParamSpec::new("date_range", ParamKind::DateRange).with_default(DateRange::default().to_string())
}

pub fn text(name: &'static str) -> ParamSpec {
    ParamSpec::new(name, ParamKind::String)
}

pub fn number(name: &'static str) -> ParamSpec {
    ParamSpec::new(name, ParamKind::Number)
}

pub fn date(name: &'static str) -> ParamSpec {
    ParamSpec::new(name, ParamKind::Date)
}

/// Default max CPC bid of a new ad group, in dollars.
pub fn default_cpc_bid_dollars() -> f64 {
    2.0
}

pub fn default_match_type() -> MatchType {
    MatchType::Phrase
}

pub fn default_channel_type() -> ChannelType {
    ChannelType::Search
}

/// Search terms below this many impressions are left out of the report.
pub fn default_min_impressions() -> i64 {
    10
}

/// Trimmed text that must not be empty.
pub fn required_text(field: &str, value: &str) -> ToolResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ToolError::invalid_arguments(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Resource path of the single entity a mutation created or updated.
pub fn first_resource(paths: Vec<ResourcePath>) -> ToolResult<ResourcePath> {
    paths
        .into_iter()
        .next()
        .ok_or_else(|| ToolError::platform("mutation returned no results"))
}
