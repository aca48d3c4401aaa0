// src/domain/lookup_result.rs

use chrono::Local;
use serde::Serialize;

use super::status::ERROR;

/// Display format of `search_timestamp`, e.g. `05 March 2025 02:41PM`.
pub const TIMESTAMP_FORMAT: &str = "%d %B %Y %I:%M%p";

/// Outcome of a single registry lookup. Built once per request and
/// serialised straight back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupResult {
    pub success: bool,
    pub status: String,
    pub business_name: String,
    pub address: String,
    pub deregistration_date: String,
    pub effective_date: String,
    pub urn: String,
    pub awrs_number: String,
    pub supplier_name: String,
    pub search_timestamp: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Fields pulled off a results page, after post-processing.
#[derive(Debug, Default, Clone)]
pub struct RegistryRecord {
    pub status: String,
    pub business_name: String,
    pub address: String,
    pub deregistration_date: String,
    pub effective_date: String,
    pub urn: String,
}

impl LookupResult {
    pub fn found(awrs_number: &str, supplier_name: &str, record: RegistryRecord) -> Self {
        Self {
            success: true,
            status: record.status,
            business_name: record.business_name,
            address: record.address,
            deregistration_date: record.deregistration_date,
            effective_date: record.effective_date,
            urn: record.urn,
            awrs_number: awrs_number.to_string(),
            supplier_name: supplier_name.to_string(),
            search_timestamp: search_timestamp(),
            error: None,
        }
    }

    /// A failed lookup: status `Error`, every content field blank.
    pub fn failure(awrs_number: &str, supplier_name: &str, error: impl Into<String>) -> Self {
        Self {
            success: false,
            status: ERROR.to_string(),
            business_name: String::new(),
            address: String::new(),
            deregistration_date: String::new(),
            effective_date: String::new(),
            urn: String::new(),
            awrs_number: awrs_number.to_string(),
            supplier_name: supplier_name.to_string(),
            search_timestamp: search_timestamp(),
            error: Some(error.into()),
        }
    }
}

fn search_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}
