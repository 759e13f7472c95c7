use crate::config::ApiConfig;
use crate::constants;
use crate::domain::LookupDomain;
use crate::error::LookupError;
use crate::models::lookup::{LookupPayload, LookupRow};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Where lookup rows come from. The services only depend on this trait.
#[async_trait::async_trait]
pub trait LookupSource: Send + Sync {
    /// Reads every row of `domain` from the backend. No retry.
    async fn fetch_rows(&self, domain: LookupDomain) -> Result<Vec<LookupRow>, LookupError>;
}

/// Build the HTTP client used for lookup calls.
pub fn build_http_client(timeout_seconds: u64) -> Result<Client, LookupError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(constants::api::USER_AGENT)
        .build()
        .map_err(|e| LookupError::ClientSetup(e.to_string()))
}

#[derive(Clone)]
pub struct PortalClient {
    client: Client,
    time_slots_url: Url,
    plan_types_url: Url,
    token: Option<String>,
}

impl PortalClient {
    pub fn new(client: Client, config: &ApiConfig) -> Result<Self, LookupError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| LookupError::InvalidUrl(format!("{}: {e}", config.base_url)))?;

        let join = |path: &str| {
            base.join(path)
                .map_err(|e| LookupError::InvalidUrl(format!("{path}: {e}")))
        };

        Ok(Self {
            client,
            time_slots_url: join(&config.time_slots_path)?,
            plan_types_url: join(&config.plan_types_path)?,
            token: config.token.clone(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, LookupError> {
        let client = build_http_client(config.request_timeout_seconds)?;
        Self::new(client, config)
    }

    #[must_use]
    pub const fn endpoint(&self, domain: LookupDomain) -> &Url {
        match domain {
            LookupDomain::TimeSlots => &self.time_slots_url,
            LookupDomain::PlanTypes => &self.plan_types_url,
        }
    }
}

#[async_trait::async_trait]
impl LookupSource for PortalClient {
    async fn fetch_rows(&self, domain: LookupDomain) -> Result<Vec<LookupRow>, LookupError> {
        let url = self.endpoint(domain).clone();
        debug!(domain = %domain, url = %url, "Fetching lookup rows");

        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| LookupError::transport(domain, e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Status {
                domain,
                status,
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LookupError::transport(domain, e))?;

        let payload: LookupPayload =
            serde_json::from_slice(&bytes).map_err(|e| LookupError::decode(domain, e))?;
        let rows = payload.into_rows();

        debug!(domain = %domain, count = rows.len(), "Fetched lookup rows");
        Ok(rows)
    }
}
