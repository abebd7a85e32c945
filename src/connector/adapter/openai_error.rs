use reqwest::StatusCode;
use serde::Deserialize;

use crate::domain::DomainError;

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Map a non-success response into an [`DomainError::UpstreamError`].
///
/// `client` names the adapter in the message, e.g. `OpenAiChatClient`.
pub(crate) fn upstream_status_error(client: &str, status: StatusCode, body: &str) -> DomainError {
    let reason = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => "authentication failed",
        StatusCode::TOO_MANY_REQUESTS => "rate limited",
        s if s.is_server_error() => "service unavailable",
        _ => "request rejected",
    };

    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => DomainError::upstream(format!(
            "{client}: {reason} ({status}): {}",
            envelope.error.message
        )),
        Err(_) => DomainError::upstream(format!("{client}: {reason} ({status})")),
    }
}
