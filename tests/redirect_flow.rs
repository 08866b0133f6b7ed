use std::sync::Arc;

use clap::Parser;
use serde_json::json;
use warp::http::StatusCode;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ginko::http::server::Server;
use ginko::provider::BankProvider;
use ginko::util::cli::Options;

const TRACKING_UUID: &str = "a293fe0a-51ff-4b03-9376-022f1a1b453e";

fn server_for(bank: &MockServer) -> Server<BankProvider> {
    let token_url = format!("{}/oauth2/token", bank.uri());
    let accounts_url = format!("{}/v2/accounts", bank.uri());
    let opts = Options::try_parse_from(&[
        "ginkod",
        "--token-url",
        token_url.as_str(),
        "--accounts-url",
        accounts_url.as_str(),
        "--redirect-uri",
        "https://127.0.0.1:3000/accounts/retrieve",
        "--client-id",
        "X",
        "--client-secret",
        "Y",
        "--tracking-uuid",
        TRACKING_UUID,
        "--timeout-secs",
        "5",
    ])
    .unwrap();
    let config = Arc::new(opts.into_config().unwrap());
    let provider = Arc::new(BankProvider::new(config.clone()).unwrap());
    Server::new(provider, config)
}

fn body(response: &warp::http::Response<warp::hyper::body::Bytes>) -> String {
    String::from_utf8(response.body().to_vec()).unwrap()
}

#[tokio::test]
async fn missing_code_makes_no_outbound_calls() {
    let bank = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&bank)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&bank)
        .await;

    let routes = server_for(&bank).routes();
    let response = warp::test::request()
        .path("/accounts/retrieve")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body(&response).contains("redirected here from the bank"));
}

#[tokio::test]
async fn code_is_exchanged_and_account_rendered() {
    let bank = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(header("authorization", "Basic WDpZ"))
        .and(body_string_contains("code=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "tok789" })))
        .expect(1)
        .mount(&bank)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/accounts"))
        .and(header("authorization", "Bearer tok789"))
        .and(header("uuid", TRACKING_UUID))
        .and(header("client_id", "X"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "balance": 100 })))
        .expect(1)
        .mount(&bank)
        .await;

    let routes = server_for(&bank).routes();
    let response = warp::test::request()
        .path("/accounts/retrieve?code=abc123")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/html; charset=utf-8");
    assert!(body(&response).contains("\"balance\": 100"));
}

#[tokio::test]
async fn account_body_is_rendered_verbatim() {
    let bank = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "tok789" })))
        .mount(&bank)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"summary":{"total":42.5,"currency":"USD"},"accounts":[{"id":"b2","name":"Checking"},{"id":"a1","name":"Savings"}],"asOf":null}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&bank)
        .await;

    let routes = server_for(&bank).routes();
    let response = warp::test::request()
        .path("/accounts/retrieve?code=abc123")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let expected = r#"<pre class="prettyprint">{
  "summary": {
    "total": 42.5,
    "currency": "USD"
  },
  "accounts": [
    {
      "id": "b2",
      "name": "Checking"
    },
    {
      "id": "a1",
      "name": "Savings"
    }
  ],
  "asOf": null
}</pre>"#;
    assert!(body(&response).contains(expected), "{}", body(&response));
}

#[tokio::test]
async fn rejected_code_never_reaches_accounts() {
    let bank = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "invalid_client" })))
        .expect(1)
        .mount(&bank)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&bank)
        .await;

    let routes = server_for(&bank).routes();
    let response = warp::test::request()
        .path("/accounts/retrieve?code=abc123")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body(&response);
    assert!(body.contains("Something Went Wrong"));
    assert!(body.contains("invalid_client"));
}

#[tokio::test]
async fn reused_code_is_not_masked() {
    let bank = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "tok789" })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&bank)
        .await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "invalid_grant" })))
        .expect(1)
        .mount(&bank)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "balance": 100 })))
        .expect(1)
        .mount(&bank)
        .await;

    let routes = server_for(&bank).routes();
    let first = warp::test::request()
        .path("/accounts/retrieve?code=abc123")
        .reply(&routes)
        .await;
    let second = warp::test::request()
        .path("/accounts/retrieve?code=abc123")
        .reply(&routes)
        .await;

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::BAD_GATEWAY);
    assert!(body(&second).contains("token exchange failed"));
}

#[tokio::test]
async fn account_failure_renders_error_page() {
    let bank = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "tok789" })))
        .mount(&bank)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down for maintenance"))
        .expect(1)
        .mount(&bank)
        .await;

    let routes = server_for(&bank).routes();
    let response = warp::test::request()
        .path("/accounts/retrieve?code=abc123")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body(&response);
    assert!(body.contains("account fetch failed"));
    assert!(body.contains("down for maintenance"));
}
