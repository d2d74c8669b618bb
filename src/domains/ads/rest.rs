//! Google Ads REST implementation of the platform services.
//!
//! An OAuth access token is minted from the refresh token for each platform
//! call. Nothing is cached between calls.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, instrument, warn};

use super::client::{MutateService, SearchService};
use super::mutation::{MutateRequest, Operation, ResourcePath};
use super::query::Query;
use super::row::PlatformRow;
use super::types::CustomerId;
use crate::core::config::AdsConfig;
use crate::core::credentials::Credentials;
use crate::domains::tools::{ToolError, ToolResult};

/// OAuth2 token endpoint.
pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// HTTP client for `googleads.googleapis.com`.
pub struct RestAdsClient {
    http: reqwest::Client,
    credentials: Credentials,
    endpoint: String,
    api_version: String,
}

impl RestAdsClient {
    pub fn new(credentials: Credentials, config: &AdsConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
        }
    }

    fn customer_url(&self, customer: &CustomerId, method: &str) -> String {
        format!(
            "{}/{}/customers/{}/{}",
            self.endpoint, self.api_version, customer, method
        )
    }

    async fn access_token(&self) -> ToolResult<String> {
        let form = serde_urlencoded::to_string([
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.expose_secret().as_str()),
            ("refresh_token", self.credentials.refresh_token.expose_secret().as_str()),
            ("grant_type", "refresh_token"),
        ])
        .map_err(|e| ToolError::platform(format!("Failed to encode token request: {e}")))?;

        let response = self
            .http
            .post(TOKEN_URL)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(form)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            let reason = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| {
                    v.get("error_description")
                        .or_else(|| v.get("error"))
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or_else(|| body.trim().to_string());
            warn!("OAuth token exchange failed with {}", status);
            return Err(ToolError::platform(format!(
                "OAuth token exchange failed ({}): {}",
                status.as_u16(),
                reason
            )));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| ToolError::platform(format!("Unreadable token response: {e}")))?;
        Ok(token.access_token)
    }

    async fn post(&self, customer: &CustomerId, method: &str, body: Value) -> ToolResult<Value> {
        let token = self.access_token().await?;
        let url = self.customer_url(customer, method);
        debug!("POST {}", url);

        let mut request = self
            .http
            .post(&url)
            .bearer_auth(token)
            .header("developer-token", self.credentials.developer_token.expose_secret().as_str())
            .json(&body);
        if let Some(login) = &self.credentials.login_customer_id {
            request = request.header("login-customer-id", login);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(ToolError::Platform(failure_messages(status.as_u16(), &text)));
        }
        serde_json::from_str(&text)
            .map_err(|e| ToolError::platform(format!("Unreadable platform response: {e}")))
    }
}

#[async_trait]
impl SearchService for RestAdsClient {
    #[instrument(skip_all, fields(customer = %customer, resource = query.resource()))]
    async fn search(&self, customer: &CustomerId, query: &Query) -> ToolResult<Vec<PlatformRow>> {
        let gaql = query.render();
        debug!("GAQL: {}", gaql);

        let response = self
            .post(customer, "googleAds:search", json!({ "query": gaql }))
            .await?;

        let rows = response
            .get("results")
            .and_then(Value::as_array)
            .map(|results| results.iter().map(PlatformRow::from_json).collect())
            .unwrap_or_default();
        Ok(rows)
    }
}

#[async_trait]
impl MutateService for RestAdsClient {
    #[instrument(skip_all, fields(customer = %customer, service = request.service(), operations = request.len()))]
    async fn mutate(
        &self,
        customer: &CustomerId,
        request: MutateRequest,
    ) -> ToolResult<Vec<ResourcePath>> {
        let method = format!("{}:mutate", request.service());
        let body = json!({ "operations": operations_json(&request)? });

        let response = self.post(customer, &method, body).await?;

        let paths = response
            .get("results")
            .and_then(Value::as_array)
            .map(|results| {
                results
                    .iter()
                    .filter_map(|r| r.get("resourceName").and_then(Value::as_str))
                    .map(ResourcePath::from_platform)
                    .collect()
            })
            .unwrap_or_default();
        Ok(paths)
    }
}

fn transport_error(err: reqwest::Error) -> ToolError {
    warn!("Google Ads request failed: {}", err);
    ToolError::platform(format!("Request to Google Ads failed: {err}"))
}

/// Extract failure messages from an error body, in order.
///
/// Prefers the `GoogleAdsFailure` details; falls back to the top-level status
/// message, then to the raw body.
pub fn failure_messages(status: u16, body: &str) -> Vec<String> {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let error = parsed.as_ref().and_then(|v| v.get("error"));

    let detailed: Vec<String> = error
        .and_then(|e| e.get("details"))
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|detail| detail.get("errors").and_then(Value::as_array))
        .flatten()
        .filter_map(|e| e.get("message").and_then(Value::as_str))
        .map(str::to_string)
        .collect();
    if !detailed.is_empty() {
        return detailed;
    }

    if let Some(message) = error.and_then(|e| e.get("message")).and_then(Value::as_str) {
        return vec![message.to_string()];
    }

    let body = body.trim();
    if body.is_empty() {
        vec![format!("HTTP {status}")]
    } else {
        vec![format!("HTTP {status}: {body}")]
    }
}

fn operations_json(request: &MutateRequest) -> ToolResult<Vec<Value>> {
    match request {
        MutateRequest::CampaignBudgets(ops) => ops.iter().map(operation_json).collect(),
        MutateRequest::Campaigns(ops) => ops.iter().map(operation_json).collect(),
        MutateRequest::AdGroups(ops) => ops.iter().map(operation_json).collect(),
        MutateRequest::AdGroupAds(ops) => ops.iter().map(operation_json).collect(),
        MutateRequest::AdGroupCriteria(ops) => ops.iter().map(operation_json).collect(),
        MutateRequest::CampaignCriteria(ops) => ops.iter().map(operation_json).collect(),
    }
}

/// Wire form of one operation: `{"create": ..}` or
/// `{"update": {.., "resourceName": ..}, "updateMask": "a,b.c"}`.
pub fn operation_json<T: Serialize>(operation: &Operation<T>) -> ToolResult<Value> {
    let to_value = |entity: &T| {
        serde_json::to_value(entity)
            .map_err(|e| ToolError::invalid_arguments(format!("unserializable entity: {e}")))
    };

    match operation {
        Operation::Create(entity) => Ok(json!({ "create": to_value(entity)? })),
        Operation::Update {
            resource,
            entity,
            mask,
        } => {
            let mut update = to_value(entity)?;
            if let Value::Object(map) = &mut update {
                map.insert("resourceName".to_string(), json!(resource.as_str()));
            }
            Ok(json!({ "update": update, "updateMask": mask.to_string() }))
        }
    }
}
