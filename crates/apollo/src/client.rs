//! HTTP client for the Apollo.io API.
//!
//! Same shape as the Avainode client -- validate, rate-limit, send with
//! bounded 429 retry, classify by status -- with one addition: a semaphore
//! capping concurrent Apollo requests at [`MAX_INFLIGHT_REQUESTS`]. The
//! permit is held across the whole attempt loop, so retries of one logical
//! call never multiply the in-flight count.

use std::future::Future;
use std::sync::Arc;

use reqwest::header::RETRY_AFTER;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Semaphore;

use jetvision_cache::ResponseCache;
use jetvision_core::error::CoreError;
use jetvision_core::rate_limit::{RateCategory, RateLimiter};
use jetvision_core::retry::{parse_retry_after, RetryPolicy};
use jetvision_core::validation::validate_required_text;

use crate::error::ApolloError;
use crate::types::{
    ApolloHealth, BulkEnrichParams, BulkMatchResponse, Contact, CreateContactParams,
    CreateDealParams, Deal, DealsResponse, EnrichPersonParams, ListDealsParams, MatchResponse,
    OrganizationSearchParams, OrganizationSearchResponse, PeopleSearchParams,
    PeopleSearchResponse, SequenceAddParams, SequenceAddResult, MAX_BULK_ENRICH, MAX_PER_PAGE,
};

/// Production Apollo API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.apollo.io/v1";

/// Maximum concurrent requests to Apollo.
pub const MAX_INFLIGHT_REQUESTS: usize = 10;

/// Fallback `Retry-After` when Apollo sends a 429 without the header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Configuration for [`ApolloClient`].
#[derive(Debug, Clone)]
pub struct ApolloConfig {
    /// API base URL (override for staging or tests).
    pub base_url: String,
    /// Key sent in the `X-Api-Key` header.
    pub api_key: String,
    /// 429 retry policy.
    pub retry: RetryPolicy,
}

impl ApolloConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            retry: RetryPolicy::default(),
        }
    }
}

/// Client for the Apollo.io API.
pub struct ApolloClient {
    http: reqwest::Client,
    config: ApolloConfig,
    limiter: Arc<RateLimiter>,
    inflight: Semaphore,
    cache: Option<ResponseCache>,
}

impl ApolloClient {
    pub fn new(config: ApolloConfig, limiter: Arc<RateLimiter>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            limiter,
            inflight: Semaphore::new(MAX_INFLIGHT_REQUESTS),
            cache: None,
        }
    }

    /// Attach a read-through response cache for search operations.
    pub fn with_cache(mut self, cache: ResponseCache) -> Self {
        self.cache = Some(cache);
        self
    }

    // ---- operations ----

    /// Search for people (sales leads).
    pub async fn search_people(
        &self,
        params: &PeopleSearchParams,
    ) -> Result<PeopleSearchResponse, ApolloError> {
        validate_pagination(params.page, params.per_page)?;

        self.cached("people_search", &params_value(params)?, || async {
            let response = self
                .execute("people_search", RateCategory::Standard, || {
                    self.http
                        .post(format!("{}/mixed_people/search", self.config.base_url))
                        .header("X-Api-Key", &self.config.api_key)
                        .json(params)
                })
                .await?;
            parse_json(response).await
        })
        .await
    }

    /// Search for organizations (accounts).
    pub async fn search_organizations(
        &self,
        params: &OrganizationSearchParams,
    ) -> Result<OrganizationSearchResponse, ApolloError> {
        validate_pagination(params.page, params.per_page)?;
        if let (Some(min), Some(max)) = (params.employee_count_min, params.employee_count_max) {
            if min > max {
                return Err(CoreError::Validation(
                    "employee_count_min must not exceed employee_count_max".to_string(),
                )
                .into());
            }
        }

        self.cached("organization_search", &params_value(params)?, || async {
            let response = self
                .execute("organization_search", RateCategory::Standard, || {
                    self.http
                        .post(format!("{}/mixed_companies/search", self.config.base_url))
                        .header("X-Api-Key", &self.config.api_key)
                        .json(params)
                })
                .await?;
            parse_json(response).await
        })
        .await
    }

    /// Enrich a single person from match signals.
    pub async fn enrich_person(
        &self,
        params: &EnrichPersonParams,
    ) -> Result<MatchResponse, ApolloError> {
        if !params.has_match_signals() {
            return Err(CoreError::Validation(
                "Enrichment needs an email, or a full name plus organization domain".to_string(),
            )
            .into());
        }

        let response = self
            .execute("people_match", RateCategory::Standard, || {
                self.http
                    .post(format!("{}/people/match", self.config.base_url))
                    .header("X-Api-Key", &self.config.api_key)
                    .json(params)
            })
            .await?;
        parse_json(response).await
    }

    /// Enrich up to [`MAX_BULK_ENRICH`] people in one call.
    pub async fn bulk_enrich_people(
        &self,
        params: &BulkEnrichParams,
    ) -> Result<BulkMatchResponse, ApolloError> {
        if params.people.is_empty() {
            return Err(
                CoreError::Validation("Bulk enrichment needs at least one person".to_string())
                    .into(),
            );
        }
        if params.people.len() > MAX_BULK_ENRICH {
            return Err(CoreError::Validation(format!(
                "Bulk enrichment accepts at most {MAX_BULK_ENRICH} people per call"
            ))
            .into());
        }
        for (i, person) in params.people.iter().enumerate() {
            if !person.has_match_signals() {
                return Err(CoreError::Validation(format!(
                    "Person at index {i} has no usable match signals"
                ))
                .into());
            }
        }

        let response = self
            .execute("bulk_match", RateCategory::Bulk, || {
                self.http
                    .post(format!("{}/people/bulk_match", self.config.base_url))
                    .header("X-Api-Key", &self.config.api_key)
                    .json(params)
            })
            .await?;
        parse_json(response).await
    }

    /// Create a CRM contact.
    pub async fn create_contact(
        &self,
        params: &CreateContactParams,
    ) -> Result<Contact, ApolloError> {
        validate_required_text("first_name", &params.first_name)?;
        validate_required_text("last_name", &params.last_name)?;

        let response = self
            .execute("contact_create", RateCategory::Standard, || {
                self.http
                    .post(format!("{}/contacts", self.config.base_url))
                    .header("X-Api-Key", &self.config.api_key)
                    .json(params)
            })
            .await?;
        parse_json(response).await
    }

    /// Update an existing CRM contact.
    pub async fn update_contact(
        &self,
        contact_id: &str,
        params: &CreateContactParams,
    ) -> Result<Contact, ApolloError> {
        validate_required_text("contact_id", contact_id)?;
        validate_required_text("first_name", &params.first_name)?;
        validate_required_text("last_name", &params.last_name)?;

        let response = self
            .execute("contact_update", RateCategory::Standard, || {
                self.http
                    .put(format!("{}/contacts/{contact_id}", self.config.base_url))
                    .header("X-Api-Key", &self.config.api_key)
                    .json(params)
            })
            .await?;
        parse_json(response).await
    }

    /// Add contacts to an email sequence.
    pub async fn add_contacts_to_sequence(
        &self,
        sequence_id: &str,
        params: &SequenceAddParams,
    ) -> Result<SequenceAddResult, ApolloError> {
        validate_required_text("sequence_id", sequence_id)?;
        if params.contact_ids.is_empty() {
            return Err(
                CoreError::Validation("contact_ids must not be empty".to_string()).into(),
            );
        }

        let response = self
            .execute("sequence_add", RateCategory::Bulk, || {
                self.http
                    .post(format!(
                        "{}/emailer_campaigns/{sequence_id}/add_contact_ids",
                        self.config.base_url
                    ))
                    .header("X-Api-Key", &self.config.api_key)
                    .json(params)
            })
            .await?;
        parse_json(response).await
    }

    /// Create a deal (opportunity).
    pub async fn create_deal(&self, params: &CreateDealParams) -> Result<Deal, ApolloError> {
        validate_required_text("name", &params.name)?;
        if let Some(amount) = params.amount {
            if amount < 0.0 {
                return Err(
                    CoreError::Validation("Deal amount must not be negative".to_string()).into(),
                );
            }
        }

        let response = self
            .execute("deal_create", RateCategory::Standard, || {
                self.http
                    .post(format!("{}/opportunities", self.config.base_url))
                    .header("X-Api-Key", &self.config.api_key)
                    .json(params)
            })
            .await?;
        parse_json(response).await
    }

    /// List deals, paged.
    pub async fn list_deals(&self, params: &ListDealsParams) -> Result<DealsResponse, ApolloError> {
        validate_pagination(params.page, params.per_page)?;

        self.cached("deals_list", &params_value(params)?, || async {
            let response = self
                .execute("deals_list", RateCategory::Standard, || {
                    self.http
                        .get(format!("{}/opportunities/search", self.config.base_url))
                        .header("X-Api-Key", &self.config.api_key)
                        .query(params)
                })
                .await?;
            parse_json(response).await
        })
        .await
    }

    /// Check that the configured key is accepted upstream.
    pub async fn health_check(&self) -> Result<ApolloHealth, ApolloError> {
        let response = self
            .execute("health", RateCategory::Standard, || {
                self.http
                    .get(format!("{}/auth/health", self.config.base_url))
                    .header("X-Api-Key", &self.config.api_key)
            })
            .await?;
        parse_json(response).await
    }

    // ---- private helpers ----

    /// Run `fetch` through the response cache when one is attached.
    async fn cached<T, F, Fut>(
        &self,
        endpoint: &'static str,
        params: &serde_json::Value,
        fetch: F,
    ) -> Result<T, ApolloError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApolloError>>,
    {
        match &self.cache {
            Some(cache) => {
                let key = ResponseCache::cache_key("apollo", endpoint, params);
                cache.get_or_fetch(&key, fetch).await
            }
            None => fetch().await,
        }
    }

    /// Acquire an in-flight permit and a limiter slot, then send with
    /// bounded 429 retry.
    async fn execute(
        &self,
        endpoint: &'static str,
        category: RateCategory,
        build: impl Fn() -> reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApolloError> {
        // Permit covers the whole attempt loop: one logical call, one slot.
        let _permit = self
            .inflight
            .acquire()
            .await
            .expect("in-flight semaphore closed");

        let policy = &self.config.retry;
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            self.limiter
                .try_acquire(&format!("apollo:{endpoint}"), category)?;

            tracing::debug!(endpoint, attempt, "Sending Apollo request");
            let response = build().send().await?;
            let status = response.status();

            if status.as_u16() == 429 && attempt < policy.max_attempts {
                let retry_after = response
                    .headers()
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(parse_retry_after);
                let delay = policy.delay_for(attempt, retry_after);
                tracing::warn!(
                    endpoint,
                    attempt,
                    delay_secs = delay.as_secs(),
                    "Apollo returned 429, backing off",
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            return classify(endpoint, response).await;
        }
    }
}

/// Map a response to a typed error, or pass it through on success.
async fn classify(
    endpoint: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, ApolloError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status.as_u16() {
        429 => {
            let retry_after_secs = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(parse_retry_after)
                .map(|d| d.as_secs())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            tracing::warn!(endpoint, retry_after_secs, "Apollo rate limit exhausted");
            Err(ApolloError::RateLimited { retry_after_secs })
        }
        401 | 403 => {
            tracing::error!(endpoint, status = status.as_u16(), "Apollo auth failure");
            Err(ApolloError::Auth {
                status: status.as_u16(),
            })
        }
        _ => {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::error!(endpoint, status = status.as_u16(), "Apollo API error");
            Err(ApolloError::Api {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Parse a successful JSON response body into the expected type.
async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApolloError> {
    Ok(response.json::<T>().await?)
}

/// Serialize request parameters for cache key fingerprinting.
fn params_value<T: Serialize>(params: &T) -> Result<serde_json::Value, ApolloError> {
    serde_json::to_value(params).map_err(|e| ApolloError::Core(CoreError::Internal(e.to_string())))
}

/// Validate paged-search parameters.
fn validate_pagination(page: u32, per_page: u32) -> Result<(), ApolloError> {
    if page == 0 {
        return Err(CoreError::Validation("page must be at least 1".to_string()).into());
    }
    if per_page == 0 || per_page > MAX_PER_PAGE {
        return Err(CoreError::Validation(format!(
            "per_page must be between 1 and {MAX_PER_PAGE}"
        ))
        .into());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn test_client() -> ApolloClient {
        ApolloClient::new(
            ApolloConfig {
                base_url: "http://127.0.0.1:1".to_string(),
                api_key: "test-key".to_string(),
                retry: RetryPolicy::default(),
            },
            Arc::new(RateLimiter::new()),
        )
    }

    #[tokio::test]
    async fn search_rejects_zero_page() {
        let client = test_client();
        let params = PeopleSearchParams {
            page: 0,
            per_page: 25,
            ..PeopleSearchParams::default()
        };
        let err = client.search_people(&params).await.unwrap_err();
        assert_matches!(err, ApolloError::Core(CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn search_rejects_oversized_per_page() {
        let client = test_client();
        let params = PeopleSearchParams {
            page: 1,
            per_page: MAX_PER_PAGE + 1,
            ..PeopleSearchParams::default()
        };
        let err = client.search_people(&params).await.unwrap_err();
        assert_matches!(err, ApolloError::Core(CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn org_search_rejects_inverted_employee_range() {
        let client = test_client();
        let params = OrganizationSearchParams {
            employee_count_min: Some(500),
            employee_count_max: Some(50),
            page: 1,
            per_page: 25,
            ..OrganizationSearchParams::default()
        };
        let err = client.search_organizations(&params).await.unwrap_err();
        assert_matches!(err, ApolloError::Core(CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn enrich_rejects_missing_signals() {
        let client = test_client();
        let params = EnrichPersonParams {
            first_name: Some("Ava".into()),
            ..EnrichPersonParams::default()
        };
        let err = client.enrich_person(&params).await.unwrap_err();
        assert_matches!(err, ApolloError::Core(CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn bulk_enrich_rejects_empty_batch() {
        let client = test_client();
        let params = BulkEnrichParams { people: vec![] };
        let err = client.bulk_enrich_people(&params).await.unwrap_err();
        assert_matches!(err, ApolloError::Core(CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn bulk_enrich_rejects_oversized_batch() {
        let client = test_client();
        let person = EnrichPersonParams {
            email: Some("a@example.com".into()),
            ..EnrichPersonParams::default()
        };
        let params = BulkEnrichParams {
            people: vec![person; MAX_BULK_ENRICH + 1],
        };
        let err = client.bulk_enrich_people(&params).await.unwrap_err();
        assert_matches!(err, ApolloError::Core(CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn sequence_add_rejects_empty_contact_list() {
        let client = test_client();
        let params = SequenceAddParams {
            contact_ids: vec![],
        };
        let err = client
            .add_contacts_to_sequence("seq-1", &params)
            .await
            .unwrap_err();
        assert_matches!(err, ApolloError::Core(CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn deal_rejects_negative_amount() {
        let client = test_client();
        let params = CreateDealParams {
            name: "Gulfstream charter program".into(),
            amount: Some(-1.0),
            organization_id: None,
            stage: None,
        };
        let err = client.create_deal(&params).await.unwrap_err();
        assert_matches!(err, ApolloError::Core(CoreError::Validation(_)));
    }
}
