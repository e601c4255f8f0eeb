use axum::http::{header::RETRY_AFTER, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use jetvision_apollo::ApolloError;
use jetvision_avainode::AvainodeError;
use jetvision_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and both vendor client errors,
/// and implements [`IntoResponse`] to produce consistent JSON error
/// responses. Upstream failures surface as 502s -- never as fabricated
/// data.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `jetvision_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An error from the Apollo client.
    #[error(transparent)]
    Apollo(#[from] ApolloError),

    /// An error from the Avainode client.
    #[error(transparent)]
    Avainode(#[from] AvainodeError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Status, machine-readable code, message, and optional `Retry-After`
/// seconds for one error.
struct Classified {
    status: StatusCode,
    code: &'static str,
    message: String,
    retry_after_secs: Option<u64>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let classified = match &self {
            AppError::Core(core) => classify_core(core),
            AppError::Apollo(e) => classify_vendor("Apollo", &vendor_parts_apollo(e)),
            AppError::Avainode(e) => classify_vendor("Avainode", &vendor_parts_avainode(e)),
            AppError::BadRequest(msg) => Classified {
                status: StatusCode::BAD_REQUEST,
                code: "BAD_REQUEST",
                message: msg.clone(),
                retry_after_secs: None,
            },
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                Classified {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    code: "INTERNAL_ERROR",
                    message: "An internal error occurred".to_string(),
                    retry_after_secs: None,
                }
            }
        };

        let body = json!({
            "success": false,
            "error": classified.message,
            "code": classified.code,
        });

        let mut response = (classified.status, axum::Json(body)).into_response();
        if let Some(secs) = classified.retry_after_secs {
            if let Ok(value) = secs.to_string().parse() {
                response.headers_mut().insert(RETRY_AFTER, value);
            }
        }
        response
    }
}

/// Map a [`CoreError`] onto an HTTP classification.
fn classify_core(core: &CoreError) -> Classified {
    match core {
        CoreError::NotFound { entity, id } => Classified {
            status: StatusCode::NOT_FOUND,
            code: "NOT_FOUND",
            message: format!("{entity} with id {id} not found"),
            retry_after_secs: None,
        },
        CoreError::Validation(msg) => Classified {
            status: StatusCode::BAD_REQUEST,
            code: "VALIDATION_ERROR",
            message: msg.clone(),
            retry_after_secs: None,
        },
        CoreError::Unauthorized(msg) => Classified {
            status: StatusCode::UNAUTHORIZED,
            code: "UNAUTHORIZED",
            message: msg.clone(),
            retry_after_secs: None,
        },
        CoreError::RateLimited { retry_after_secs } => Classified {
            status: StatusCode::TOO_MANY_REQUESTS,
            code: "RATE_LIMITED",
            message: format!("Rate limit exceeded, retry after {retry_after_secs}s"),
            retry_after_secs: Some(*retry_after_secs),
        },
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            Classified {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "INTERNAL_ERROR",
                message: "An internal error occurred".to_string(),
                retry_after_secs: None,
            }
        }
    }
}

/// The status-relevant pieces of a vendor client error, shared by both
/// vendor enums.
enum VendorParts<'a> {
    Core(&'a CoreError),
    RateLimited { retry_after_secs: u64 },
    Auth { status: u16 },
    Api { status: u16 },
    Transport(String),
}

fn vendor_parts_apollo(e: &ApolloError) -> VendorParts<'_> {
    match e {
        ApolloError::Core(core) => VendorParts::Core(core),
        ApolloError::RateLimited { retry_after_secs } => VendorParts::RateLimited {
            retry_after_secs: *retry_after_secs,
        },
        ApolloError::Auth { status } => VendorParts::Auth { status: *status },
        ApolloError::Api { status, .. } => VendorParts::Api { status: *status },
        ApolloError::Request(err) => VendorParts::Transport(err.to_string()),
    }
}

fn vendor_parts_avainode(e: &AvainodeError) -> VendorParts<'_> {
    match e {
        AvainodeError::Core(core) => VendorParts::Core(core),
        AvainodeError::RateLimited { retry_after_secs } => VendorParts::RateLimited {
            retry_after_secs: *retry_after_secs,
        },
        AvainodeError::Auth { status } => VendorParts::Auth { status: *status },
        AvainodeError::Api { status, .. } => VendorParts::Api { status: *status },
        AvainodeError::Request(err) => VendorParts::Transport(err.to_string()),
    }
}

/// Map a vendor error onto an HTTP classification.
///
/// - Local validation and limiter rejections keep their core mapping.
/// - Vendor 429-after-retries maps to 429 with `Retry-After`.
/// - Vendor credential rejections map to 502: the caller's gateway key
///   was fine, the upstream integration is broken.
/// - Vendor 404 maps to 404; other vendor statuses map to 502.
fn classify_vendor(vendor: &'static str, parts: &VendorParts<'_>) -> Classified {
    match parts {
        VendorParts::Core(core) => classify_core(core),
        VendorParts::RateLimited { retry_after_secs } => Classified {
            status: StatusCode::TOO_MANY_REQUESTS,
            code: "RATE_LIMITED",
            message: format!("{vendor} rate limit exceeded, retry after {retry_after_secs}s"),
            retry_after_secs: Some(*retry_after_secs),
        },
        VendorParts::Auth { status } => {
            tracing::error!(vendor, status, "Upstream rejected configured credentials");
            Classified {
                status: StatusCode::BAD_GATEWAY,
                code: "UPSTREAM_AUTH",
                message: format!("{vendor} rejected the gateway's credentials"),
                retry_after_secs: None,
            }
        }
        VendorParts::Api { status: 404 } => Classified {
            status: StatusCode::NOT_FOUND,
            code: "NOT_FOUND",
            message: format!("Resource not found at {vendor}"),
            retry_after_secs: None,
        },
        VendorParts::Api { status } => {
            tracing::error!(vendor, status, "Upstream API error");
            Classified {
                status: StatusCode::BAD_GATEWAY,
                code: "UPSTREAM_ERROR",
                message: format!("{vendor} returned an error"),
                retry_after_secs: None,
            }
        }
        VendorParts::Transport(err) => {
            tracing::error!(vendor, error = %err, "Upstream unreachable");
            Classified {
                status: StatusCode::BAD_GATEWAY,
                code: "UPSTREAM_UNREACHABLE",
                message: format!("{vendor} could not be reached"),
                retry_after_secs: None,
            }
        }
    }
}
