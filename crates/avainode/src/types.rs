//! Request parameters and response DTOs mirroring the Avainode schema.
//!
//! These are transient wire types: built from gateway input, sent to the
//! vendor, and the reshaped response handed straight back to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Aircraft search
// ---------------------------------------------------------------------------

/// Parameters for a charter aircraft search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharterSearchParams {
    /// Departure airport (ICAO or IATA code).
    pub departure_airport: String,
    /// Arrival airport (ICAO or IATA code).
    pub arrival_airport: String,
    /// Departure date, `YYYY-MM-DD`.
    pub departure_date: String,
    /// Return date for round trips, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    pub passengers: u32,
    /// Optional cabin category filter (e.g. `"light"`, `"midsize"`, `"heavy"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aircraft_category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aircraft {
    pub id: String,
    pub tail_number: String,
    pub model: String,
    pub category: String,
    /// Home base airport code.
    pub home_base: String,
    pub max_passengers: u32,
    pub range_nm: u32,
    pub cruise_speed_kts: u32,
    pub hourly_rate_usd: f64,
    pub operator_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftSearchResponse {
    pub aircraft: Vec<Aircraft>,
    pub total: u32,
}

// ---------------------------------------------------------------------------
// Pricing
// ---------------------------------------------------------------------------

/// Parameters for a charter pricing quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingParams {
    pub aircraft_id: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    pub passengers: u32,
}

/// Full pricing breakdown for a charter leg.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharterQuote {
    pub quote_id: String,
    pub aircraft_id: String,
    pub currency: String,
    pub flight_time_hours: f64,
    pub base_cost: f64,
    pub positioning_cost: f64,
    pub fuel_surcharge: f64,
    pub landing_fees: f64,
    pub taxes: f64,
    pub total: f64,
    pub valid_until: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Bookings
// ---------------------------------------------------------------------------

/// Parameters for creating a charter booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingParams {
    /// Quote this booking is based on, when one was generated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<String>,
    pub aircraft_id: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    pub passengers: u32,
    pub contact_name: String,
    pub contact_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub status: BookingStatus,
    pub aircraft_id: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    pub passengers: u32,
    pub contact_name: String,
    pub contact_email: String,
    pub total_usd: f64,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Fleet
// ---------------------------------------------------------------------------

/// One aircraft in the operator fleet view, with utilization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetEntry {
    pub aircraft_id: String,
    pub tail_number: String,
    pub model: String,
    /// Operational status (e.g. `"available"`, `"in_service"`, `"maintenance"`).
    pub status: String,
    /// Share of the last 30 days spent flying, 0-100.
    pub utilization_pct: f64,
    /// Next date the aircraft is free, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_available: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetResponse {
    pub aircraft: Vec<FleetEntry>,
}

// ---------------------------------------------------------------------------
// Empty legs
// ---------------------------------------------------------------------------

/// Optional filters for the empty-leg listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmptyLegParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_airport: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_airport: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
}

/// A repositioning flight offered at a discount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmptyLeg {
    pub id: String,
    pub aircraft_id: String,
    pub model: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_date: String,
    pub seats_available: u32,
    pub price_usd: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmptyLegsResponse {
    pub empty_legs: Vec<EmptyLeg>,
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operator {
    pub id: String,
    pub name: String,
    /// Air-carrier certificate number.
    pub certificate: String,
    pub fleet_size: u32,
    /// Safety rating label (e.g. `"ARGUS Platinum"`, `"Wyvern Wingman"`).
    pub safety_rating: String,
    pub contact_email: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
