// src/tests/router_tests/webhook_tests.rs
use crate::router::handle;
use crate::tests::utils::{
    body_json, config_for, mount_landing, request, results_page, SEARCH_PAGE, SEARCH_PATH,
};
use http::Method;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test(flavor = "multi_thread")]
async fn empty_awrs_number_never_reaches_the_registry() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let config = config_for(&server);

    let json = tokio::task::spawn_blocking(move || {
        let req = request(
            Method::POST,
            "/",
            r#"{"awrs_number": "   ", "supplier_name": "Acme"}"#,
        );
        body_json(handle(req, &config).unwrap())
    })
    .await
    .unwrap();

    assert_eq!(json["success"], false);
    assert_eq!(json["status"], "Error");
    assert_eq!(json["error"], "No AWRS number provided");
    assert_eq!(json["business_name"], "");
    assert_eq!(json["supplier_name"], "Acme");
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_body_is_still_a_200_error_result() {
    let server = MockServer::start().await;
    let config = config_for(&server);

    let (status, json) = tokio::task::spawn_blocking(move || {
        let resp = handle(request(Method::POST, "/", "awrs_number=1"), &config).unwrap();
        (resp.status().as_u16(), body_json(resp))
    })
    .await
    .unwrap();

    assert_eq!(status, 200);
    assert_eq!(json["success"], false);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));
}

#[tokio::test(flavor = "multi_thread")]
async fn webhook_runs_a_lookup_and_normalises_status() {
    let server = MockServer::start().await;
    mount_landing(&server, 200, SEARCH_PAGE).await;

    let results = results_page(
        "<dl>
           <dt>Business name</dt><dd>Acme Wholesale Ltd</dd>
           <dt>Status</dt><dd>No longer approved</dd>
           <dt>Principal place of business</dt><dd>1 High Street, London</dd>
           <dt>Effective date of registration</dt><dd>1 April 2016</dd>
           <dt>Date of deregistration</dt><dd>12 June 2023</dd>
           <dt>URN</dt><dd>XAAW 0000 1234 567</dd>
         </dl>",
    );
    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(results))
        .expect(1)
        .mount(&server)
        .await;
    let config = config_for(&server);

    let (status, json) = tokio::task::spawn_blocking(move || {
        let req = request(
            Method::POST,
            "/",
            r#"{"awrs_number": "XAAW 0000 1234 567", "supplier_name": "Acme"}"#,
        );
        let resp = handle(req, &config).unwrap();
        (resp.status().as_u16(), body_json(resp))
    })
    .await
    .unwrap();

    assert_eq!(status, 200);
    assert_eq!(json["success"], true);
    assert_eq!(json["status"], "Not Approved");
    assert_eq!(json["business_name"], "Acme Wholesale Ltd");
    assert_eq!(json["address"], "1 High Street, London");
    assert_eq!(json["effective_date"], "1 April 2016");
    assert_eq!(json["deregistration_date"], "12 June 2023");
    assert_eq!(json["urn"], "XAAW 0000 1234 567");
    assert_eq!(json["awrs_number"], "XAAW 0000 1234 567");
    assert_eq!(json["supplier_name"], "Acme");
    assert!(json.get("error").is_none());
}
