//! HTTP client for the identity `ListCompartments` endpoint.

use crate::error::ApiError;
use crate::identity::signer::RequestSigner;
use crate::identity::source::{CompartmentPage, CompartmentSource};
use crate::types::CompartmentRecord;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, DATE, HOST};
use reqwest::{Client, Url};
use serde::Deserialize;

const API_VERSION_PATH: &str = "20160918/compartments";
const NEXT_PAGE_HEADER: &str = "opc-next-page";
const REQUEST_ID_HEADER: &str = "opc-request-id";

/// Which compartments the listing may return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccessLevel {
    /// Every compartment in the subtree, regardless of the caller's permissions
    #[default]
    Any,
    /// Only compartments the caller can see
    Accessible,
}

impl AccessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Any => "ANY",
            AccessLevel::Accessible => "ACCESSIBLE",
        }
    }
}

/// Query options applied to every page request
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub access_level: AccessLevel,
    /// Page size hint; `None` leaves it to the service
    pub limit: Option<u32>,
}

/// Compartment summary as returned by the service
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompartmentSummary {
    id: String,
    name: String,
    compartment_id: String,
    #[serde(default)]
    lifecycle_state: Option<String>,
}

/// Default identity endpoint for a region in the commercial realm.
pub fn default_endpoint(region: &str) -> String {
    format!("https://identity.{}.oraclecloud.com", region)
}

/// Signed client for listing a tenancy's compartments.
pub struct IdentityClient {
    http: Client,
    endpoint: String,
    tenancy_id: String,
    signer: RequestSigner,
    options: ListOptions,
}

impl IdentityClient {
    pub fn new(
        endpoint: impl Into<String>,
        tenancy_id: impl Into<String>,
        signer: RequestSigner,
        options: ListOptions,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;
        Ok(Self::with_client(http, endpoint, tenancy_id, signer, options))
    }

    /// Create a client around a preconfigured reqwest client.
    pub fn with_client(
        http: Client,
        endpoint: impl Into<String>,
        tenancy_id: impl Into<String>,
        signer: RequestSigner,
        options: ListOptions,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            tenancy_id: tenancy_id.into(),
            signer,
            options,
        }
    }

    fn page_url(&self, page: Option<&str>) -> Result<Url, ApiError> {
        let mut params: Vec<(&str, String)> = vec![
            ("compartmentId", self.tenancy_id.clone()),
            ("compartmentIdInSubtree", "true".to_string()),
            ("accessLevel", self.options.access_level.as_str().to_string()),
        ];
        if let Some(limit) = self.options.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(page) = page.filter(|p| !p.is_empty()) {
            params.push(("page", page.to_string()));
        }
        let base = format!("{}/{}", self.endpoint, API_VERSION_PATH);
        Url::parse_with_params(&base, &params)
            .map_err(|e| ApiError::ConfigError(format!("Invalid identity endpoint {}: {}", base, e)))
    }
}

#[async_trait]
impl CompartmentSource for IdentityClient {
    fn tenancy_id(&self) -> &str {
        &self.tenancy_id
    }

    async fn list_page(&self, page: Option<&str>) -> Result<CompartmentPage, ApiError> {
        let url = self.page_url(page)?;
        let signed = self.signer.sign("GET", &url, chrono::Utc::now())?;

        let response = self
            .http
            .get(url)
            .header(DATE, signed.date)
            .header(HOST, signed.host)
            .header(AUTHORIZATION, signed.authorization)
            .send()
            .await?;

        let status = response.status();
        let (request_id, next_page) = {
            let headers = response.headers();
            let header_value = |name: &str| {
                headers
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            };
            (
                header_value(REQUEST_ID_HEADER),
                header_value(NEXT_PAGE_HEADER).filter(|p| !p.is_empty()),
            )
        };

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                request_id = request_id.as_deref().unwrap_or("-"),
                "ListCompartments failed"
            );
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let summaries: Vec<CompartmentSummary> = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        tracing::debug!(
            request_id = request_id.as_deref().unwrap_or("-"),
            items = summaries.len(),
            "ListCompartments page"
        );

        let items = summaries
            .into_iter()
            .map(|summary| {
                if let Some(state) = summary.lifecycle_state.as_deref() {
                    if state != "ACTIVE" {
                        tracing::debug!(id = %summary.id, state, "Listing non-active compartment");
                    }
                }
                CompartmentRecord::new(summary.id, summary.name, summary.compartment_id)
            })
            .collect();

        Ok(CompartmentPage { items, next_page })
    }
}
