//! Per-task GET operation
//!
//! One dispatched task performs exactly one request and reports exactly one
//! outcome. Transport failures return immediately so a task can never report
//! twice or touch a response it never received.

use crate::error::DispatchError;
use crate::outcome::Outcome;
use reqwest::Client;
use tracing::{debug, warn};

/// Issue one HTTP GET and read the whole response body as text.
///
/// The HTTP status code is deliberately not inspected: any response whose
/// body can be read counts as a success carrying the raw body text, a 500
/// included. Callers that need status-aware semantics should layer them on
/// top of the returned body.
///
/// `Response::text()` consumes the response, so the body and its connection
/// are released on every exit path, including the read-error path.
pub async fn fetch_url(client: &Client, url: &str) -> Outcome<String> {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(err) => {
            warn!("GET {} failed in transport: {}", url, err);
            return Outcome::Failure(DispatchError::transport(url, &err));
        }
    };

    match response.text().await {
        Ok(body) => {
            debug!("GET {} completed ({} bytes)", url, body.len());
            Outcome::Success(body)
        }
        Err(err) => {
            warn!("GET {} failed while reading body: {}", url, err);
            Outcome::Failure(DispatchError::read(url, &err))
        }
    }
}
