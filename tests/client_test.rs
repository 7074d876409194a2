use anyhow::Result;
use httpmock::prelude::*;
use kiotviet_mcp::{ClientSettings, Credentials, KiotVietClient, KiotVietError, WireParams};
use serde_json::json;
use std::time::Duration;

fn client_for(server: &MockServer) -> KiotVietClient {
    KiotVietClient::with_settings(
        Credentials::new("abc123", "myshop"),
        ClientSettings::new(server.base_url(), Duration::from_secs(5)),
    )
}

#[tokio::test]
async fn get_sends_auth_headers_and_query() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/branches")
            .query_param("pageSize", "10")
            .header("retailer", "myshop")
            .header("authorization", "Bearer abc123")
            .header("content-type", "application/json");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({ "total": 1, "data": [{ "id": 7, "branchName": "HQ" }] }));
    });

    let client = client_for(&server);
    let mut params = WireParams::new();
    params.insert("pageSize", 10);
    let body = client.get("/branches", Some(&params)).await?;

    mock.assert();
    assert_eq!(body["data"][0]["branchName"], "HQ");
    Ok(())
}

#[tokio::test]
async fn unauthorized_is_not_retried() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/products");
        then.status(401).body(r#"{"responseStatus":{"message":"Unauthorized"}}"#);
    });

    let client = client_for(&server);
    let err = client.get("/products", None).await.unwrap_err();

    mock.assert_hits(1);
    assert_eq!(err.status(), Some(401));
    match err {
        KiotVietError::Http { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Unauthorized"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn non_json_body_is_a_serialization_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/categories");
        then.status(200).body("<html>maintenance</html>");
    });

    let err = client_for(&server).get("/categories", None).await.unwrap_err();
    assert!(matches!(err, KiotVietError::Serialization(_)));
}

#[tokio::test]
async fn post_and_put_send_json_bodies() -> Result<()> {
    let server = MockServer::start();
    let post = server.mock(|when, then| {
        when.method(POST)
            .path("/customers")
            .json_body(json!({ "name": "Lan" }));
        then.status(200).json_body(json!({ "id": 99, "name": "Lan" }));
    });
    let put = server.mock(|when, then| {
        when.method(PUT)
            .path("/customers/99")
            .json_body(json!({ "name": "Lan Anh" }));
        then.status(200).json_body(json!({ "id": 99, "name": "Lan Anh" }));
    });

    let client = client_for(&server);
    let created = client.post("/customers", &json!({ "name": "Lan" })).await?;
    let updated = client.put("/customers/99", &json!({ "name": "Lan Anh" })).await?;

    post.assert();
    put.assert();
    assert_eq!(created["id"], 99);
    assert_eq!(updated["name"], "Lan Anh");
    Ok(())
}

#[tokio::test]
async fn delete_with_empty_body_reports_success() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(DELETE).path("/customers/99");
        then.status(200);
    });

    let body = client_for(&server).delete("/customers/99", None).await?;

    mock.assert();
    assert_eq!(body, json!({ "message": "success" }));
    Ok(())
}

#[tokio::test]
async fn connection_is_reused_until_closed() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/branches");
        then.status(200).json_body(json!({ "data": [] }));
    });

    let client = client_for(&server);
    assert!(!client.is_connected());

    client.get("/branches", None).await?;
    client.get("/branches", None).await?;
    assert!(client.is_connected());

    client.close();
    assert!(!client.is_connected());

    client.get("/branches", None).await?;
    assert!(client.is_connected());

    mock.assert_hits(3);
    Ok(())
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let client = KiotVietClient::with_settings(
        Credentials::new("abc123", "myshop"),
        ClientSettings::new("http://127.0.0.1:1", Duration::from_secs(2)),
    );
    let err = client.get("/branches", None).await.unwrap_err();
    assert!(matches!(err, KiotVietError::Transport(_)));
    assert!(err.status().is_none());
}
