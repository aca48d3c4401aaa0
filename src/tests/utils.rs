// src/tests/utils.rs
use crate::config::Config;
use astra::{Body, Request, Response};
use http::Method;
use std::io::Read;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const REGISTER_PATH: &str = "/check-the-awrs-register";
pub const SEARCH_PATH: &str = "/check-the-awrs-register/search";
pub const CHECK_URN_PATH: &str = "/check-the-awrs-register/check-urn";

/// Landing page carrying the search form directly.
pub const SEARCH_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Check the AWRS register</title></head>
<body>
  <h1>Check the AWRS register</h1>
  <form action="/check-the-awrs-register/search" method="POST">
    <input type="hidden" name="csrfToken" value="token-123">
    <label for="value">Enter a URN</label>
    <input type="text" id="value" name="value">
    <button type="submit">Search</button>
  </form>
</body>
</html>"#;

/// Config whose registry is the given mock server.
pub fn config_for(server: &MockServer) -> Config {
    Config::for_registry(&format!("{}{}", server.uri(), REGISTER_PATH))
}

/// Wrap a fragment of result markup in a page.
pub fn results_page(body: &str) -> String {
    format!("<!DOCTYPE html><html><head><title>Search results</title></head><body>{body}</body></html>")
}

pub async fn mount_landing(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(REGISTER_PATH))
        .respond_with(
            ResponseTemplate::new(status)
                .insert_header("set-cookie", "mdtp=session-1; Path=/")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

pub fn request(method: Method, uri: &str, body: &str) -> Request {
    let mut req = Request::new(Body::from(body.to_string()));
    *req.method_mut() = method;
    *req.uri_mut() = uri.parse().unwrap();
    req
}

pub fn body_json(mut resp: Response) -> serde_json::Value {
    let mut bytes = Vec::new();
    resp.body_mut().reader().read_to_end(&mut bytes).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
