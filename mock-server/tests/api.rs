use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Address, AddressList, Deleted};
use tower::ServiceExt;

// base64("test_key:")
const AUTH: &str = "Basic dGVzdF9rZXk6";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn authed(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, AUTH)
        .body(String::new())
        .unwrap()
}

fn json_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::AUTHORIZATION, AUTH)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_auth_returns_401_envelope() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/v1/addresses")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["error"]["status_code"], 401);
}

#[tokio::test]
async fn empty_username_is_rejected() {
    // base64(":")
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/v1/addresses")
                .header(http::header::AUTHORIZATION, "Basic Og==")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- list ---

#[tokio::test]
async fn list_addresses_empty() {
    let resp = app()
        .oneshot(authed("GET", "/v1/addresses/?limit=10&offset=0"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: AddressList = body_json(resp).await;
    assert!(page.data.is_empty());
    assert_eq!(page.object, "list");
    assert!(page.next_url.is_none());
    assert!(page.previous_url.is_none());
}

// --- create ---

#[tokio::test]
async fn create_address_assigns_id_and_timestamps() {
    let resp = app()
        .oneshot(json_request(
            "/v1/addresses",
            r#"{"name":"Lobster Test","address_line1":"1005 W Burnside St"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let address: Address = body_json(resp).await;
    assert!(address.id.starts_with("adr_"));
    assert_eq!(address.fields.name.as_deref(), Some("Lobster Test"));
    assert_eq!(address.date_created, address.date_modified);
}

#[tokio::test]
async fn create_without_line1_returns_422_envelope() {
    let resp = app()
        .oneshot(json_request("/v1/addresses", r#"{"name":"No street"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["error"]["message"], "address_line1 is required");
    assert_eq!(body["error"]["status_code"], 422);
}

// --- get / delete ---

#[tokio::test]
async fn get_unknown_address_returns_404() {
    let resp = app()
        .oneshot(authed("GET", "/v1/addresses/adr_missing"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_address_returns_404() {
    let resp = app()
        .oneshot(authed("DELETE", "/v1/addresses/adr_missing"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full lifecycle ---

#[tokio::test]
async fn address_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create two
    let mut ids = Vec::new();
    for line1 in ["1 First St", "2 Second St"] {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request(
                "/v1/addresses",
                &format!(r#"{{"address_line1":"{line1}"}}"#),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let created: Address = body_json(resp).await;
        ids.push(created.id);
    }

    // list with a page size of one
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed("GET", "/v1/addresses/?limit=1&offset=0"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let page: AddressList = body_json(resp).await;
    assert_eq!(page.count, 1);
    assert_eq!(page.total_count, 2);
    assert_eq!(page.next_url.as_deref(), Some("/v1/addresses?limit=1&offset=1"));

    // get
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed("GET", &format!("/v1/addresses/{}", ids[0])))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Address = body_json(resp).await;
    assert_eq!(fetched.id, ids[0]);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed("DELETE", &format!("/v1/addresses/{}", ids[0])))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let deleted: Deleted = body_json(resp).await;
    assert!(deleted.deleted);
    assert_eq!(deleted.id, ids[0]);

    // get after delete — 404 with an error envelope
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed("GET", &format!("/v1/addresses/{}", ids[0])))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(!body_bytes(resp).await.is_empty());

    // list after delete — one left
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed("GET", "/v1/addresses"))
        .await
        .unwrap();
    let page: AddressList = body_json(resp).await;
    assert_eq!(page.total_count, 1);
    assert_eq!(page.data[0].id, ids[1]);
}
