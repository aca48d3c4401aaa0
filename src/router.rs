use crate::config::Config;
use crate::domain::LookupResult;
use crate::errors::{ResultResp, ServerError};
use crate::responses::json_response;
use crate::scraper::RegistryClient;
use astra::Request;
use chrono::Local;
use serde::{Deserialize, Deserializer};
use serde_json::json;
use std::io::Read;
use thiserror::Error;
use tracing::{info, warn};

const HEALTH_STATUS: &str = "AWRS lookup API is running";
const NO_AWRS_NUMBER: &str = "No AWRS number provided";

/// Inbound webhook payload. Both fields may be missing or `null`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WebhookRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub awrs_number: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub supplier_name: String,
}

/// Why a webhook body couldn't be turned into a `WebhookRequest`.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Failed to read body: {0}")]
    Read(#[from] std::io::Error),
    #[error("Invalid request body: {0}")]
    Json(#[from] serde_json::Error),
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn handle(req: Request, config: &Config) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => health(),
        ("POST", "/") => webhook(req, config),
        (_, "/") => Err(ServerError::MethodNotAllowed),
        _ => Err(ServerError::NotFound),
    }
}

fn health() -> ResultResp {
    json_response(&json!({
        "status": HEALTH_STATUS,
        "timestamp": Local::now().to_rfc3339(),
    }))
}

/// Always answers 200; lookup failures are reported in the body.
fn webhook(mut req: Request, config: &Config) -> ResultResp {
    let payload = match read_payload(req.body_mut().reader()) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "Rejected webhook body");
            return json_response(&LookupResult::failure("", "", e.to_string()));
        }
    };

    let awrs_number = payload.awrs_number.trim();
    info!(awrs_number, "Received webhook");

    if awrs_number.is_empty() {
        return json_response(&LookupResult::failure(
            "",
            &payload.supplier_name,
            NO_AWRS_NUMBER,
        ));
    }

    let result = RegistryClient::lookup(config, awrs_number, &payload.supplier_name);
    json_response(&result)
}

fn read_payload<R: Read>(mut body: R) -> Result<WebhookRequest, PayloadError> {
    let mut raw = Vec::new();
    body.read_to_end(&mut raw)?;
    Ok(parse_payload(&raw)?)
}

fn parse_payload(raw: &[u8]) -> Result<WebhookRequest, serde_json::Error> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(WebhookRequest::default());
    }
    serde_json::from_slice(raw)
}
