use astra::Response;
// errors.rs
use thiserror::Error;

/// Errors originating from the server logic (routing, malformed requests).
/// Lookup failures never end up here: they travel inside the `LookupResult`.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("Internal Server Error")]
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl ServerError {
    pub fn status_code(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::MethodNotAllowed => 405,
            ServerError::InternalError => 500,
        }
    }
}
