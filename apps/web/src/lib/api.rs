//! HTTP helpers for the identity service's JSON endpoints. Gateway calls have
//! no timeout and are never aborted: a pending call runs until the service
//! answers or the network fails. The helpers never log request bodies, which
//! carry passwords and tokens.

use crate::features::auth::{errors::GatewayError, rest::ErrorEnvelope};
use gloo_net::http::{Request, Response};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::to_string;

/// Posts JSON with extra headers and parses a JSON response, classifying service errors.
pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    url: &str,
    body: &B,
    headers: &[(&str, &str)],
) -> Result<T, GatewayError> {
    let payload = to_string(body)
        .map_err(|err| GatewayError::other(format!("Failed to encode request: {err}")))?;
    let mut builder = Request::post(url).header("Content-Type", "application/json");
    for (name, value) in headers {
        builder = builder.header(name, value);
    }
    let response = builder
        .body(payload)
        .map_err(|err| GatewayError::other(format!("Failed to build request: {err}")))?
        .send()
        .await
        .map_err(map_request_error)?;

    handle_json_response(response).await
}

/// Maps transport failures to the network error kind.
fn map_request_error(err: gloo_net::Error) -> GatewayError {
    GatewayError::network(format!("Unable to reach the identity service: {err}"))
}

async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
    if response.ok() {
        response
            .json::<T>()
            .await
            .map_err(|err| GatewayError::other(format!("Failed to decode response: {err}")))
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(ErrorEnvelope::classify(&body))
    }
}
