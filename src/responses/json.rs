use crate::errors::{ResultResp, ServerError};
use astra::{Body, ResponseBuilder};
use serde::Serialize;

/// Serialise `value` as a `200 OK` JSON body.
pub fn json_response<T: Serialize>(value: &T) -> ResultResp {
    json_with_status(200, value)
}

pub fn json_with_status<T: Serialize>(status: u16, value: &T) -> ResultResp {
    let body = serde_json::to_string(value).map_err(|_| ServerError::InternalError)?;

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}
