// src/tests/router_tests/health_tests.rs
use crate::config::Config;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_json, request};
use chrono::DateTime;
use http::Method;

fn config() -> Config {
    Config::for_registry("http://127.0.0.1:1/check-the-awrs-register")
}

#[test]
fn get_root_reports_liveness() {
    let resp = handle(request(Method::GET, "/", ""), &config()).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()
            .get("Content-Type")
            .and_then(|v| v.to_str().ok()),
        Some("application/json")
    );

    let json = body_json(resp);
    assert_eq!(json["status"], "AWRS lookup API is running");
    let timestamp = json["timestamp"].as_str().unwrap();
    assert!(DateTime::parse_from_rfc3339(timestamp).is_ok(), "{timestamp}");
}

#[test]
fn unknown_path_is_not_found() {
    let err = handle(request(Method::GET, "/nope", ""), &config()).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
    assert_eq!(err.status_code(), 404);
}

#[test]
fn other_methods_on_root_are_rejected() {
    let err = handle(request(Method::DELETE, "/", ""), &config()).unwrap_err();
    assert!(matches!(err, ServerError::MethodNotAllowed));

    let resp = crate::responses::error_to_response(err);
    assert_eq!(resp.status(), 405);
    assert_eq!(body_json(resp)["error"], "Method Not Allowed");
}
