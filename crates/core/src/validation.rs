//! Pure validation functions for charter request parameters.
//!
//! These run before any vendor request is built, so malformed input is
//! rejected locally instead of burning a rate-limited upstream call.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Largest passenger count a single charterable cabin supports.
pub const MAX_PASSENGERS: u32 = 19;

/// Maximum length accepted for free-text fields forwarded to vendors
/// (contact names, company names, notes).
pub const MAX_TEXT_FIELD_LEN: usize = 256;

/// ICAO (4 letters) or IATA (3 letters) airport code, uppercase.
static AIRPORT_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3,4}$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Airport codes
// ---------------------------------------------------------------------------

/// Validate an airport code.
///
/// Rules:
/// - Exactly 3 (IATA) or 4 (ICAO) characters.
/// - Uppercase ASCII letters only.
pub fn validate_airport_code(code: &str) -> Result<(), CoreError> {
    if !AIRPORT_CODE_RE.is_match(code) {
        return Err(CoreError::Validation(format!(
            "Invalid airport code \"{code}\": expected a 3-letter IATA or 4-letter ICAO code"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// Parse and validate a `YYYY-MM-DD` date string.
pub fn validate_date(date: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
        CoreError::Validation(format!(
            "Invalid date \"{date}\": expected YYYY-MM-DD"
        ))
    })
}

/// Validate a departure/return date pair.
///
/// The return date is optional (one-way trips). When present it must not
/// be before the departure date.
pub fn validate_date_range(departure: &str, return_date: Option<&str>) -> Result<(), CoreError> {
    let dep = validate_date(departure)?;
    if let Some(ret) = return_date {
        let ret = validate_date(ret)?;
        if ret < dep {
            return Err(CoreError::Validation(format!(
                "Return date {ret} is before departure date {dep}"
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Passengers
// ---------------------------------------------------------------------------

/// Validate a passenger count: at least 1, at most [`MAX_PASSENGERS`].
pub fn validate_passenger_count(count: u32) -> Result<(), CoreError> {
    if count == 0 {
        return Err(CoreError::Validation(
            "Passenger count must be at least 1".to_string(),
        ));
    }
    if count > MAX_PASSENGERS {
        return Err(CoreError::Validation(format!(
            "Passenger count must not exceed {MAX_PASSENGERS}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Free-text fields
// ---------------------------------------------------------------------------

/// Validate a required free-text field forwarded to a vendor API.
///
/// Rules:
/// - Must not be empty or whitespace-only.
/// - Must not exceed [`MAX_TEXT_FIELD_LEN`] characters.
pub fn validate_required_text(field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    if value.len() > MAX_TEXT_FIELD_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must not exceed {MAX_TEXT_FIELD_LEN} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
