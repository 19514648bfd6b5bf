//! HTTP transport - outbound JSON delivery via reqwest

use std::time::Duration;

use contracts::HttpMethod;
use serde_json::Value;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::error::DispatchError;

/// Deliver the payload as a JSON body using the configured verb.
///
/// The per-destination timeout bounds the whole call, connect included.
#[instrument(
    name = "http_deliver",
    skip(client, payload),
    fields(request_id = %request_id, destination = %destination, url = %url)
)]
pub(crate) async fn deliver(
    client: &reqwest::Client,
    request_id: Uuid,
    destination: &str,
    method: HttpMethod,
    url: &str,
    payload: &Value,
    timeout: Duration,
) -> Result<(), DispatchError> {
    let response = client
        .request(to_reqwest_method(method), url)
        .timeout(timeout)
        .json(payload)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                DispatchError::Timeout {
                    destination: destination.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                }
            } else {
                DispatchError::network(destination, e.to_string())
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(DispatchError::Status {
            destination: destination.to_string(),
            status: status.as_u16(),
        });
    }

    debug!(status = status.as_u16(), "Payload delivered");
    Ok(())
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}
