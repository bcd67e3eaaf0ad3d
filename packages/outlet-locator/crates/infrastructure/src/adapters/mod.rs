pub mod memory_index;
pub mod openai;
pub mod qdrant;

use domain::LocatorError;

/// Turns a non-2xx provider response into a `ProviderFailure` carrying the body.
pub(crate) async fn ensure_success(
    service: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, LocatorError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    Err(LocatorError::ProviderFailure(format!(
        "{} returned {}: {}",
        service, status, text
    )))
}

pub(crate) fn transport_error(service: &str, err: reqwest::Error) -> LocatorError {
    if err.is_timeout() {
        LocatorError::ProviderFailure(format!("{} request timed out: {}", service, err))
    } else {
        LocatorError::ProviderFailure(format!("{} request failed: {}", service, err))
    }
}
