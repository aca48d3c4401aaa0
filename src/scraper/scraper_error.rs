use thiserror::Error;

/// Everything that can stop a lookup before a result page is parsed.
/// The `Display` text is what the caller sees in `error`.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Failed to access HMRC website: {0}")]
    LandingPage(u16),

    #[error("Failed to load check URN page: {0}")]
    CheckUrnPage(u16),

    #[error("Could not find search form on HMRC website")]
    MissingSearchForm,

    #[error("Could not find text input field")]
    MissingTextInput,

    #[error("Search failed with status: {0}")]
    SearchFailed(u16),

    #[error("Error during AWRS lookup: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Error during AWRS lookup: {0}")]
    Url(#[from] url::ParseError),

    #[error("Error during AWRS lookup: {0}")]
    HtmlParse(String),
}
