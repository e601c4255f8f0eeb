//! Request parameters and response DTOs mirroring the Apollo.io schema.

use serde::{Deserialize, Serialize};

/// Largest accepted `per_page` value for paged searches.
pub const MAX_PER_PAGE: u32 = 100;

/// Largest batch accepted by the bulk enrichment endpoint.
pub const MAX_BULK_ENRICH: usize = 10;

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total_entries: u64,
    pub total_pages: u32,
}

// ---------------------------------------------------------------------------
// People search
// ---------------------------------------------------------------------------

/// Parameters for a people (lead) search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeopleSearchParams {
    /// Free-text keyword query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q_keywords: Option<String>,
    /// Job title filters (e.g. `"Director of Aviation"`).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub person_titles: Vec<String>,
    /// Location filters (e.g. `"New York, US"`).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub person_locations: Vec<String>,
    /// Restrict to people at these company domains.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub organization_domains: Vec<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

pub(crate) fn default_page() -> u32 {
    1
}

pub(crate) fn default_per_page() -> u32 {
    25
}

impl Default for PeopleSearchParams {
    fn default() -> Self {
        Self {
            q_keywords: None,
            person_titles: Vec::new(),
            person_locations: Vec::new(),
            organization_domains: Vec::new(),
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeopleSearchResponse {
    pub people: Vec<Person>,
    pub pagination: Pagination,
}

// ---------------------------------------------------------------------------
// Organization search
// ---------------------------------------------------------------------------

/// Parameters for an organization (account) search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationSearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q_organization_keywords: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub locations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_count_min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_count_max: Option<u32>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Default for OrganizationSearchParams {
    fn default() -> Self {
        Self {
            q_organization_keywords: None,
            locations: Vec::new(),
            industry: None,
            employee_count_min: None,
            employee_count_max: None,
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationSearchResponse {
    pub organizations: Vec<Organization>,
    pub pagination: Pagination,
}

// ---------------------------------------------------------------------------
// Enrichment
// ---------------------------------------------------------------------------

/// Match signals for enriching a single person.
///
/// At least an email, or a full name plus company domain, must be present
/// for Apollo to attempt a match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrichPersonParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_domain: Option<String>,
}

impl EnrichPersonParams {
    /// Whether the params carry enough signal for a match attempt.
    pub fn has_match_signals(&self) -> bool {
        if self.email.is_some() {
            return true;
        }
        self.first_name.is_some() && self.last_name.is_some() && self.organization_domain.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    /// The matched person, or `None` when Apollo found nothing.
    pub person: Option<Person>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkEnrichParams {
    pub people: Vec<EnrichPersonParams>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkMatchResponse {
    /// One entry per input, `None` where no match was found.
    pub matches: Vec<Option<Person>>,
}

// ---------------------------------------------------------------------------
// Contacts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContactParams {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

// ---------------------------------------------------------------------------
// Sequences
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceAddParams {
    pub contact_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceAddResult {
    /// Number of contacts actually added (duplicates are skipped upstream).
    pub added: u32,
}

// ---------------------------------------------------------------------------
// Deals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDealParams {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deal {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    pub stage: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDealsParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Default for ListDealsParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealsResponse {
    pub deals: Vec<Deal>,
    pub pagination: Pagination,
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApolloHealth {
    pub healthy: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
