//! Response checks shared by every remote call.

use serde::de::DeserializeOwned;
use spaceport_domain::response::ResponseSpec;

use crate::error::{ApplicationError, ApplicationResult};

/// Turns a non-success status into `ApplicationError::Status`.
pub(crate) fn ensure_success(response: ResponseSpec) -> ApplicationResult<ResponseSpec> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApplicationError::Status {
            status: response.status,
            body: response.text(),
        })
    }
}

/// Decodes a JSON body, reporting the URL on failure.
pub(crate) fn decode<T: DeserializeOwned>(url: &str, response: &ResponseSpec) -> ApplicationResult<T> {
    response.json_body().map_err(|e| ApplicationError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}
