mod extract;
mod scraper;
mod scraper_error;

pub use self::scraper::RegistryClient;
pub use self::scraper_error::ScraperError;
