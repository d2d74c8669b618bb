//! Typed service interfaces to the Google Ads platform.
//!
//! Tools receive these as trait objects at construction time. The REST
//! implementation lives in [`super::rest`]; tests use
//! [`super::testing::RecordingPlatform`].

use std::sync::Arc;

use async_trait::async_trait;

use super::mutation::{MutateRequest, ResourcePath};
use super::query::Query;
use super::row::PlatformRow;
use super::types::CustomerId;
use crate::core::config::AdsConfig;
use crate::domains::tools::{ToolError, ToolResult};

/// Read access: runs a GAQL query and returns a single page of rows.
#[async_trait]
pub trait SearchService: Send + Sync {
    async fn search(&self, customer: &CustomerId, query: &Query) -> ToolResult<Vec<PlatformRow>>;
}

/// Write access: applies one batch of operations and returns the resource
/// paths of the affected entities, in operation order.
#[async_trait]
pub trait MutateService: Send + Sync {
    async fn mutate(
        &self,
        customer: &CustomerId,
        request: MutateRequest,
    ) -> ToolResult<Vec<ResourcePath>>;
}

/// Defaults applied when a caller omits optional creation fields.
#[derive(Debug, Clone, Default)]
pub struct AdsDefaults {
    /// Landing page used when `final_url` is not given.
    pub final_url: Option<String>,
}

impl AdsDefaults {
    pub fn from_config(config: &AdsConfig) -> Self {
        Self {
            final_url: config.default_final_url.clone(),
        }
    }
}

/// Everything a tool handler needs to talk to the platform.
#[derive(Clone)]
pub struct AdsContext {
    pub search: Arc<dyn SearchService>,
    pub mutate: Arc<dyn MutateService>,
    pub defaults: AdsDefaults,
}

impl AdsContext {
    pub fn new(
        search: Arc<dyn SearchService>,
        mutate: Arc<dyn MutateService>,
        defaults: AdsDefaults,
    ) -> Self {
        Self {
            search,
            mutate,
            defaults,
        }
    }

    /// A context whose every platform call fails with `ConfigurationMissing`.
    pub fn unconfigured(reason: impl Into<String>, defaults: AdsDefaults) -> Self {
        let platform = Arc::new(UnconfiguredPlatform {
            reason: reason.into(),
        });
        Self::new(platform.clone(), platform, defaults)
    }
}

/// Stand-in used when no credential bundle could be loaded.
#[derive(Debug)]
pub struct UnconfiguredPlatform {
    reason: String,
}

#[async_trait]
impl SearchService for UnconfiguredPlatform {
    async fn search(&self, _customer: &CustomerId, _query: &Query) -> ToolResult<Vec<PlatformRow>> {
        Err(ToolError::configuration_missing(self.reason.clone()))
    }
}

#[async_trait]
impl MutateService for UnconfiguredPlatform {
    async fn mutate(
        &self,
        _customer: &CustomerId,
        _request: MutateRequest,
    ) -> ToolResult<Vec<ResourcePath>> {
        Err(ToolError::configuration_missing(self.reason.clone()))
    }
}
