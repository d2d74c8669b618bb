//! Google Ads domain module.
//!
//! Everything needed to translate a tool call into a platform request and
//! back, independent of MCP:
//!
//! - `query` - GAQL query builder and date ranges
//! - `mutation` - create/update operations, field masks, resource paths
//! - `codec` - micros, percentages, delimited lists
//! - `types` - customer/entity ids and closed enumerations
//! - `row` - rows returned by searches
//! - `client` - typed search/mutate service interfaces
//! - `rest` - REST implementation of those interfaces

pub mod client;
pub mod codec;
pub mod mutation;
pub mod query;
pub mod rest;
pub mod row;
pub mod types;

#[cfg(test)]
pub mod testing;

pub use client::{AdsContext, AdsDefaults, MutateService, SearchService};
pub use mutation::{FieldMask, MutateRequest, Operation, ResourcePath};
pub use query::{DateRange, Direction, Predicate, Query};
pub use rest::RestAdsClient;
pub use row::PlatformRow;
pub use types::{ChannelType, CustomerId, EntityId, EntityStatus, MatchType};
