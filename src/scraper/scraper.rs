// scraper.rs
use crate::config::Config;
use crate::domain::lookup_result::RegistryRecord;
use crate::domain::status::{APPROVED, UNKNOWN};
use crate::domain::{format_awrs, normalise_status, LookupResult};
use crate::scraper::extract::{find_after_label, find_first};
use crate::scraper::ScraperError;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, DNT, UPGRADE_INSECURE_REQUESTS};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const PAGE_TIMEOUT: Duration = Duration::from_secs(10);
const SUBMIT_TIMEOUT: Duration = Duration::from_secs(15);

const CHECK_URN_TEXT: &str = "check a urn";

// Tried in order; first input found supplies the query field name.
const QUERY_INPUT_SELECTORS: [&str; 3] = [
    r#"input[name="value"]"#,
    r#"input[name="query"]"#,
    r#"input[type="text"]"#,
];

const STATUS_LABELS: [&str; 3] = ["Status", "Application status", "Registration status"];
const ADDRESS_LABELS: [&str; 3] = ["Principal place of business", "Business address", "Address"];
const EFFECTIVE_DATE_LABELS: [&str; 2] = ["Effective date of registration", "Registration date"];
const URN_LABELS: [&str; 2] = ["URN", "AWRS URN"];

const NOT_FOUND: &str = "Not found";

/// One browser-like session against the registry. Cookies persist across
/// the requests of a single lookup and nothing is shared between lookups.
pub struct RegistryClient {
    client: Client,
    registry_url: Url,
    origin: Url,
    submit_delay: Duration,
}

/// The search form as it will be resubmitted.
struct SearchForm {
    action: Url,
    fields: Vec<(String, String)>,
    query_field: String,
}

impl RegistryClient {
    pub fn new(config: &Config) -> Result<Self, ScraperError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-GB,en;q=0.5"));
        headers.insert(DNT, HeaderValue::from_static("1"));
        headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .cookie_store(true)
            .build()?;

        let origin = Url::parse(&config.registry_url.origin().ascii_serialization())?;

        Ok(Self {
            client,
            registry_url: config.registry_url.clone(),
            origin,
            submit_delay: config.submit_delay,
        })
    }

    /// Looks up one AWRS number on a fresh session.
    ///
    /// Never fails: any fault along the way becomes a `success: false`
    /// result carrying the fault's message.
    pub fn lookup(config: &Config, awrs_number: &str, supplier_name: &str) -> LookupResult {
        info!(awrs_number, supplier_name, "Looking up AWRS");

        let outcome = RegistryClient::new(config)
            .and_then(|client| client.search(awrs_number, supplier_name));

        match outcome {
            Ok(result) => {
                info!(
                    status = %result.status,
                    business_name = %result.business_name,
                    "Lookup complete"
                );
                result
            }
            Err(e) => {
                warn!(awrs_number, error = %e, "Lookup failed");
                LookupResult::failure(awrs_number, supplier_name, e.to_string())
            }
        }
    }

    fn search(&self, awrs_number: &str, supplier_name: &str) -> Result<LookupResult, ScraperError> {
        debug!(url = %self.registry_url, "Getting landing page");
        let response = self.get(self.registry_url.clone())?;
        if !response.status().is_success() {
            return Err(ScraperError::LandingPage(response.status().as_u16()));
        }
        let mut document = Html::parse_document(&response.text()?);

        if let Some(check_urn_url) = self.find_check_urn_url(&document)? {
            debug!(url = %check_urn_url, "Found check URN page");
            let response = self.get(check_urn_url)?;
            if !response.status().is_success() {
                return Err(ScraperError::CheckUrnPage(response.status().as_u16()));
            }
            document = Html::parse_document(&response.text()?);
        }

        let mut form = self.find_search_form(&document)?;
        let formatted_urn = format_awrs(awrs_number);
        form.set_query(&formatted_urn);

        debug!(urn = %formatted_urn, action = %form.action, "Submitting search");
        std::thread::sleep(self.submit_delay);

        let response = self
            .client
            .post(form.action.clone())
            .form(&form.fields)
            .timeout(SUBMIT_TIMEOUT)
            .send()?;
        if !response.status().is_success() {
            return Err(ScraperError::SearchFailed(response.status().as_u16()));
        }

        let results = Html::parse_document(&response.text()?);
        let record = extract_record(&results, &formatted_urn);

        Ok(LookupResult::found(awrs_number, supplier_name, record))
    }

    fn get(&self, url: Url) -> Result<Response, ScraperError> {
        Ok(self.client.get(url).timeout(PAGE_TIMEOUT).send()?)
    }

    /// Relative "Check a URN" link or form target, resolved against the
    /// registry origin. Absolute targets are not followed.
    fn find_check_urn_url(&self, document: &Html) -> Result<Option<Url>, ScraperError> {
        let selector = selector("a, form")?;

        let target = document
            .select(&selector)
            .find(|el| text_of(el).to_lowercase().contains(CHECK_URN_TEXT))
            .and_then(|el| el.value().attr("href").or_else(|| el.value().attr("action")));

        match target {
            Some(href) if !href.is_empty() && Url::parse(href).is_err() => {
                Ok(Some(self.origin.join(href)?))
            }
            _ => Ok(None),
        }
    }

    fn find_search_form(&self, document: &Html) -> Result<SearchForm, ScraperError> {
        let form = document
            .select(&selector("form")?)
            .next()
            .ok_or(ScraperError::MissingSearchForm)?;

        let hidden = selector(r#"input[type="hidden"]"#)?;
        let fields = document
            .select(&hidden)
            .filter_map(|input| {
                let name = input.value().attr("name")?;
                let value = input.value().attr("value").unwrap_or("");
                Some((name.to_string(), value.to_string()))
            })
            .collect();

        let mut query_field = None;
        for css in QUERY_INPUT_SELECTORS {
            query_field = document
                .select(&selector(css)?)
                .find_map(|input| input.value().attr("name"));
            if query_field.is_some() {
                break;
            }
        }
        let query_field = query_field.ok_or(ScraperError::MissingTextInput)?;

        let action = form.value().attr("action").unwrap_or("");
        let action = match Url::parse(action) {
            Ok(absolute) => absolute,
            Err(_) => self.origin.join(action)?,
        };

        Ok(SearchForm {
            action,
            fields,
            query_field: query_field.to_string(),
        })
    }
}

impl SearchForm {
    fn set_query(&mut self, value: &str) {
        let name = self.query_field.clone();
        self.fields.retain(|(field, _)| *field != name);
        self.fields.push((name, value.to_string()));
    }
}

/// Pulls every field off a results page and applies the status rules.
fn extract_record(document: &Html, formatted_urn: &str) -> RegistryRecord {
    let business_name = find_after_label("Business name", document);
    let mut status = find_first(&STATUS_LABELS, document);
    let address = find_first(&ADDRESS_LABELS, document);
    let mut deregistration_date = find_after_label("Date of deregistration", document);
    let effective_date = find_first(&EFFECTIVE_DATE_LABELS, document);
    let urn = find_first(&URN_LABELS, document);

    debug!(
        business_name = %business_name,
        status = %status,
        address = %address,
        deregistration_date = %deregistration_date,
        effective_date = %effective_date,
        urn = %urn,
        "Extracted data"
    );

    if !status.is_empty() {
        status = normalise_status(&status);
    }

    if deregistration_date.trim().eq_ignore_ascii_case("not applicable") {
        deregistration_date.clear();
        if status.is_empty() || status == UNKNOWN {
            status = APPROVED.to_string();
        }
    }

    RegistryRecord {
        status: non_empty_or(status, UNKNOWN),
        business_name: non_empty_or(business_name, NOT_FOUND),
        address,
        deregistration_date,
        effective_date,
        urn: non_empty_or(urn, formatted_urn),
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

fn selector(css: &str) -> Result<Selector, ScraperError> {
    Selector::parse(css).map_err(|e| ScraperError::HtmlParse(e.to_string()))
}

fn text_of(element: &ElementRef<'_>) -> String {
    element.text().collect()
}
