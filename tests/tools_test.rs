use anyhow::Result;
use httpmock::prelude::*;
use kiotviet_mcp::{ClientSettings, KiotVietError, ToolName, Toolbox};
use serde_json::json;
use std::time::Duration;

fn toolbox_for(server: &MockServer) -> Toolbox {
    Toolbox::new(ClientSettings::new(server.base_url(), Duration::from_secs(5)))
}

#[tokio::test]
async fn list_products_end_to_end() -> Result<()> {
    let server = MockServer::start();
    let payload = json!({
        "total": 1,
        "pageSize": 10,
        "data": [{ "id": 1001, "code": "SP001", "name": "áo thun", "basePrice": 150000 }]
    });
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/products")
            .query_param("pageSize", "10")
            .query_param("currentItem", "0")
            .query_param("includeInventory", "true")
            .query_param("name", "áo")
            .header("retailer", "myshop")
            .header("authorization", "Bearer abc123");
        then.status(200).json_body(payload.clone());
    });

    let result = toolbox_for(&server)
        .call(
            ToolName::ListProducts,
            &json!({
                "access_token": "abc123",
                "retailer": "myshop",
                "name": "áo",
                "page_size": 10
            }),
        )
        .await?;

    mock.assert();
    assert_eq!(result, payload);
    Ok(())
}

#[tokio::test]
async fn oversized_page_is_clamped_on_the_wire() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/invoices")
            .query_param("pageSize", "100")
            .query_param("branchIds", "3");
        then.status(200).json_body(json!({ "data": [] }));
    });

    toolbox_for(&server)
        .call(
            ToolName::ListInvoices,
            &json!({
                "access_token": "abc123",
                "retailer": "myshop",
                "page_size": 500,
                "branch_ids": [3]
            }),
        )
        .await?;

    mock.assert();
    Ok(())
}

#[tokio::test]
async fn categories_send_misspelled_hierarchy_flag() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/categories")
            .query_param("hierachicalData", "true");
        then.status(200).json_body(json!({ "data": [] }));
    });

    toolbox_for(&server)
        .call(
            ToolName::ListCategories,
            &json!({ "access_token": "abc123", "retailer": "myshop" }),
        )
        .await?;

    mock.assert();
    Ok(())
}

#[tokio::test]
async fn get_order_by_code() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/orders/code/DH000123");
        then.status(200).json_body(json!({ "id": 5, "code": "DH000123" }));
    });

    let result = toolbox_for(&server)
        .call(
            ToolName::GetOrder,
            &json!({ "access_token": "abc123", "retailer": "myshop", "order_code": "DH000123" }),
        )
        .await?;

    mock.assert();
    assert_eq!(result["id"], 5);
    Ok(())
}

#[tokio::test]
async fn create_order_posts_nested_customer() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/orders").json_body(json!({
            "branchId": 3,
            "purchaseDate": "2024-06-01",
            "orderDetails": [{ "productId": 1001, "quantity": 2, "price": 150000 }],
            "customer": { "id": 42 },
            "method": "Cash"
        }));
        then.status(200).json_body(json!({ "id": 777, "code": "DH000777" }));
    });

    let result = toolbox_for(&server)
        .call(
            ToolName::CreateOrder,
            &json!({
                "access_token": "abc123",
                "retailer": "myshop",
                "branch_id": 3,
                "purchase_date": "2024-06-01",
                "order_details": [{ "productId": 1001, "quantity": 2, "price": 150000 }],
                "customer_id": 42,
                "method": "Cash"
            }),
        )
        .await?;

    mock.assert();
    assert_eq!(result["code"], "DH000777");
    Ok(())
}

#[tokio::test]
async fn create_customer_keeps_false_gender() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/customers").json_body(json!({
            "name": "Lan",
            "contactNumber": "0900000000",
            "gender": false
        }));
        then.status(200).json_body(json!({ "id": 12 }));
    });

    toolbox_for(&server)
        .call(
            ToolName::CreateCustomer,
            &json!({
                "access_token": "abc123",
                "retailer": "myshop",
                "name": "Lan",
                "contact_number": "0900000000",
                "email": "",
                "gender": false
            }),
        )
        .await?;

    mock.assert();
    Ok(())
}

#[tokio::test]
async fn missing_identifier_makes_no_request() {
    let server = MockServer::start();
    let any = server.mock(|when, then| {
        when.method(GET);
        then.status(200).json_body(json!({}));
    });

    let err = toolbox_for(&server)
        .call(
            ToolName::GetCustomer,
            &json!({ "access_token": "abc123", "retailer": "myshop" }),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, KiotVietError::InvalidArgument { .. }));
    assert!(err.to_string().contains("customer_id or customer_code"));
    any.assert_hits(0);
}

#[tokio::test]
async fn remote_errors_surface_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/customers/404");
        then.status(404).body("not found");
    });

    let err = toolbox_for(&server)
        .call(
            ToolName::GetCustomer,
            &json!({ "access_token": "abc123", "retailer": "myshop", "customer_id": 404 }),
        )
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.user_friendly_message(), "The requested KiotViet record was not found");
}

#[tokio::test]
async fn dot_segment_code_makes_no_request() {
    let server = MockServer::start();
    let any = server.mock(|when, then| {
        when.method(GET);
        then.status(200).json_body(json!({}));
    });

    let err = toolbox_for(&server)
        .call(
            ToolName::GetProduct,
            &json!({ "access_token": "abc123", "retailer": "myshop", "product_code": ".." }),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, KiotVietError::InvalidArgument { .. }));
    any.assert_hits(0);
}
