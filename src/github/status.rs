//! Credential and quota check, independent of release note generation.

use serde::Serialize;

use super::client::RepositoryApi;
use super::types::RateLimit;

pub const STATUS_CHECK_FAILURE: &str = "Failed to verify GitHub token";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub authenticated: bool,
    pub rate_limit: Option<RateLimit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusReport {
    /// HTTP status a status endpoint would answer with.
    pub fn http_status(&self) -> u16 {
        if self.error.is_some() {
            500
        } else {
            200
        }
    }
}

/// Reports whether a token is configured and, if so, the current core quota.
/// Without a token no request is made.
pub async fn check_status<A: RepositoryApi + ?Sized>(api: &A) -> StatusReport {
    if !api.is_authenticated() {
        return StatusReport {
            authenticated: false,
            rate_limit: None,
            error: None,
        };
    }

    match api.get_rate_limit().await {
        Ok(rate_limit) => StatusReport {
            authenticated: true,
            rate_limit: Some(rate_limit),
            error: None,
        },
        Err(err) => {
            tracing::error!(error = %err, "error checking GitHub token");
            StatusReport {
                authenticated: false,
                rate_limit: None,
                error: Some(STATUS_CHECK_FAILURE.to_string()),
            }
        }
    }
}
