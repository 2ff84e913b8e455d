use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::SyncError;

/// Sends the request and turns transport failures and non-2xx answers into errors.
/// `what` names the call in error messages.
pub(crate) async fn send(request: RequestBuilder, what: &str) -> Result<Response, SyncError> {
    let response = request
        .send()
        .await
        .map_err(|err| SyncError::Request(format!("{what}: {err}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SyncError::Status(status.as_u16(), what.to_string()));
    }

    Ok(response)
}

/// Reads the body as JSON. A body that is not JSON is a `Decode` error,
/// JSON of the wrong shape is a `Schema` error.
pub(crate) async fn read_json<T>(response: Response, what: &str) -> Result<T, SyncError>
where
    T: DeserializeOwned,
{
    let body = response
        .text()
        .await
        .map_err(|err| SyncError::Request(format!("{what}: {err}")))?;

    let value: Value = serde_json::from_str(&body).map_err(|err| SyncError::Decode(format!("{what}: {err}")))?;

    serde_json::from_value(value).map_err(|err| SyncError::Schema(format!("{what}: {err}")))
}
