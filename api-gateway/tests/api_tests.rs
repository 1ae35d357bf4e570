use std::sync::Arc;

use account_service::{AccountService, InMemoryAccountRepository, InMemoryCustomerClient};
use api_gateway::{router, AppState};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use common::model::customer::{Customer, CustomerType};
use serde_json::{json, Value};
use tower::ServiceExt;
use tracing::Level;

fn app() -> Router {
    let customers = InMemoryCustomerClient::with_customers([
        Customer::new("c1", CustomerType::Personal),
        Customer::new("b1", CustomerType::Business),
    ]);
    let service = AccountService::new(Arc::new(InMemoryAccountRepository::new()), Arc::new(customers));

    router(Arc::new(AppState { account_service: Arc::new(service) }), Level::DEBUG)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

fn savings_body(customer_id: &str) -> Value {
    json!({
        "customerId": customer_id,
        "type": "SAVINGS",
        "openingAmount": 100,
        "monthlyTransactionLimit": 5
    })
}

#[tokio::test]
async fn test_create_and_fetch_account() {
    let app = app();

    let (status, body) = send(&app, "POST", "/api/v1/accounts", Some(savings_body("c1"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let account = &body["data"];
    assert_eq!(account["type"], "SAVINGS");
    assert_eq!(account["customerId"], "c1");
    assert_eq!(account["balance"], "100");

    let id = account["id"].as_str().unwrap();
    let number = account["accountNumber"].as_str().unwrap();

    let (status, body) = send(&app, "GET", &format!("/api/v1/accounts/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);

    let (status, body) = send(&app, "GET", &format!("/api/v1/account-numbers/{}", number), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);

    let (status, body) = send(&app, "GET", "/api/v1/accounts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["count"], 1);
}

#[tokio::test]
async fn test_rule_violations_map_to_client_errors() {
    let app = app();

    let (status, body) = send(&app, "POST", "/api/v1/accounts", Some(json!({
        "customerId": "c1",
        "type": "CHECKING",
        "openingAmount": -5
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");
    assert!(body["error"]["message"].as_str().unwrap().contains("Monto de apertura"));

    let (status, body) = send(&app, "POST", "/api/v1/accounts", Some(savings_body("b1"))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "business_rule_violation");

    let (status, body) = send(&app, "POST", "/api/v1/accounts", Some(savings_body("unknown"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "customer_not_found");
}

#[tokio::test]
async fn test_update_and_delete() {
    let app = app();
    let (_, body) = send(&app, "POST", "/api/v1/accounts", Some(savings_body("c1"))).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "PUT", &format!("/api/v1/accounts/{}", id), Some(json!({ "balance": 50 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["balance"], "150");
    assert_eq!(body["data"]["monthlyTransactionLimit"], 5);

    let (status, body) = send(&app, "PUT", &format!("/api/v1/accounts/{}", id), Some(json!({ "maintenanceFee": 9 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");

    let (status, _) = send(&app, "DELETE", &format!("/api/v1/accounts/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/api/v1/accounts/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "PUT", &format!("/api/v1/accounts/{}", id), Some(json!({ "balance": 1 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "account_not_found");

    let (status, _) = send(&app, "DELETE", &format!("/api/v1/accounts/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_customer_scoped_queries() {
    let app = app();
    let (_, body) = send(&app, "POST", "/api/v1/accounts", Some(savings_body("c1"))).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "GET", "/api/v1/customers/c1/accounts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "GET", &format!("/api/v1/customers/c1/accounts/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &format!("/api/v1/customers/b1/accounts/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "GET", "/api/v1/customers/b1/accounts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_openapi_document() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/api/v1/accounts").is_some());
    assert!(body["paths"].get("/api/v1/customers/{customer_id}/accounts/{id}").is_some());
}
