//! # CSP Authentication
//!
//! Exchanges a CSP API (refresh) token for a short-lived access token.

use crate::observability::metrics;
use crate::provider::{AuthError, Credentials, Session};
use super::status::status_description;
use paths::{CspOperation, Operation, PathBuilder, PathFormat};
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, field, warn, Instrument};

#[derive(Debug, Deserialize)]
struct AuthorizeResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct CspErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// `POST {csp}/csp/gateway/am/api/auth/api-tokens/authorize`
pub(super) async fn authorize(
    http: &Client,
    credentials: &Credentials,
) -> Result<Session, AuthError> {
    let label = Operation::Csp(CspOperation::AuthorizeApiToken).as_str();
    let path = PathBuilder::new()
        .operation(CspOperation::AuthorizeApiToken)
        .build(PathFormat::Http)
        .map_err(|e| AuthError::Malformed {
            message: e.to_string(),
        })?;
    let url = format!("{}{path}", credentials.csp_url.trim_end_matches('/'));

    let span = tracing::debug_span!(
        "csp.auth.authorize",
        operation = label,
        http.status = field::Empty,
        duration_ms = field::Empty
    );
    let span_clone = span.clone();
    let start = Instant::now();

    async move {
        let response = http
            .post(&url)
            .form(&[("refresh_token", credentials.refresh_token.expose())])
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                metrics::record_api_request(label, "transport", start.elapsed().as_secs_f64());
                span_clone.record("duration_ms", start.elapsed().as_millis() as u64);
                warn!("CSP token exchange failed: {}", e);
                return Err(AuthError::Unavailable {
                    message: e.to_string(),
                });
            }
        };

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        span_clone.record("http.status", status);
        span_clone.record("duration_ms", start.elapsed().as_millis() as u64);
        metrics::record_api_request(
            label,
            metrics::outcome_for_status(status),
            start.elapsed().as_secs_f64(),
        );

        match status {
            200..=299 => parse_session(&body),
            _ => Err(failure(status, &body)),
        }
    }
    .instrument(span)
    .await
}

/// Classify a non-2xx CSP answer
///
/// Throttling (429) and request timeouts (408) are retried like 5xx answers;
/// any other 4xx rejects the API token.
fn failure(status: u16, body: &str) -> AuthError {
    match status {
        408 | 429 => {
            warn!("CSP is throttling token exchange (HTTP {})", status);
            AuthError::Unavailable {
                message: format!("CSP answered HTTP {status}: {}", status_description(status)),
            }
        }
        400..=499 => {
            let message = serde_json::from_str::<CspErrorBody>(body)
                .ok()
                .and_then(|b| b.message.or(b.error))
                .unwrap_or_else(|| status_description(status).to_string());
            warn!("CSP rejected the API token with HTTP {}: {}", status, message);
            AuthError::Rejected { status, message }
        }
        _ => AuthError::Unavailable {
            message: format!("CSP answered HTTP {status}"),
        },
    }
}

fn parse_session(body: &str) -> Result<Session, AuthError> {
    let parsed: AuthorizeResponse =
        serde_json::from_str(body).map_err(|e| AuthError::Malformed {
            message: e.to_string(),
        })?;
    let access_token = parsed
        .access_token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AuthError::Malformed {
            message: "missing access_token".to_string(),
        })?;
    let expires_in = parsed.expires_in.ok_or_else(|| AuthError::Malformed {
        message: "missing expires_in".to_string(),
    })?;
    debug!("Obtained CSP access token valid for {}s", expires_in);
    Ok(Session::new(access_token, Duration::from_secs(expires_in)))
}
