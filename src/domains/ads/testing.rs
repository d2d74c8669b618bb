//! In-memory platform double that records every request.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::client::{AdsContext, AdsDefaults, MutateService, SearchService};
use super::mutation::{MutateRequest, ResourcePath};
use super::query::Query;
use super::row::PlatformRow;
use super::types::CustomerId;
use crate::domains::tools::ToolResult;

/// Returns queued responses in order; once the queue is empty, searches return
/// no rows and mutations succeed with generated resource paths.
#[derive(Default)]
pub struct RecordingPlatform {
    search_responses: Mutex<VecDeque<ToolResult<Vec<PlatformRow>>>>,
    mutate_responses: Mutex<VecDeque<ToolResult<Vec<ResourcePath>>>>,
    queries: Mutex<Vec<(CustomerId, Query)>>,
    mutations: Mutex<Vec<(CustomerId, MutateRequest)>>,
}

impl RecordingPlatform {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_rows(&self, rows: Vec<PlatformRow>) {
        self.search_responses.lock().unwrap().push_back(Ok(rows));
    }

    pub fn push_search_result(&self, result: ToolResult<Vec<PlatformRow>>) {
        self.search_responses.lock().unwrap().push_back(result);
    }

    pub fn push_mutate_result(&self, result: ToolResult<Vec<ResourcePath>>) {
        self.mutate_responses.lock().unwrap().push_back(result);
    }

    pub fn queries(&self) -> Vec<(CustomerId, Query)> {
        self.queries.lock().unwrap().clone()
    }

    /// Rendered GAQL of every query, in call order.
    pub fn gaql(&self) -> Vec<String> {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .map(|(_, q)| q.render())
            .collect()
    }

    pub fn mutations(&self) -> Vec<(CustomerId, MutateRequest)> {
        self.mutations.lock().unwrap().clone()
    }

    pub fn context(self: &Arc<Self>) -> AdsContext {
        self.context_with(AdsDefaults::default())
    }

    pub fn context_with(self: &Arc<Self>, defaults: AdsDefaults) -> AdsContext {
        AdsContext::new(self.clone(), self.clone(), defaults)
    }
}

#[async_trait]
impl SearchService for RecordingPlatform {
    async fn search(&self, customer: &CustomerId, query: &Query) -> ToolResult<Vec<PlatformRow>> {
        self.queries
            .lock()
            .unwrap()
            .push((customer.clone(), query.clone()));
        self.search_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[async_trait]
impl MutateService for RecordingPlatform {
    async fn mutate(
        &self,
        customer: &CustomerId,
        request: MutateRequest,
    ) -> ToolResult<Vec<ResourcePath>> {
        let generated: Vec<ResourcePath> = (1..=request.len())
            .map(|n| {
                ResourcePath::from_platform(format!(
                    "customers/{}/{}/{}",
                    customer,
                    request.service(),
                    n
                ))
            })
            .collect();
        self.mutations
            .lock()
            .unwrap()
            .push((customer.clone(), request));
        self.mutate_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(generated))
    }
}
