// End-to-end: REST gateway -> account service -> HTTP customer service

use std::sync::Arc;

use axum::{
    body::Body,
    extract::Path,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use bootcamp_accounts::account_service::{AccountService, HttpCustomerClient, InMemoryAccountRepository};
use bootcamp_accounts::api_gateway::{router, AppState};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;
use tracing::Level;

async fn customer(Path(id): Path<String>) -> Response {
    match id.as_str() {
        "c1" => Json(json!({ "id": "c1", "type": "PERSONAL" })).into_response(),
        "acme" => Json(json!({ "id": "acme", "type": "BUSINESS" })).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Stand-in customer service on an ephemeral port
async fn spawn_customer_service() -> String {
    let app = Router::new().route("/api/v1/customer/:id", get(customer));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn gateway() -> Router {
    let customers = HttpCustomerClient::new(&spawn_customer_service().await);
    let service = AccountService::new(Arc::new(InMemoryAccountRepository::new()), Arc::new(customers));
    router(Arc::new(AppState { account_service: Arc::new(service) }), Level::INFO)
}

async fn call(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_open_savings_account_for_personal_customer() {
    let app = gateway().await;
    let before = Utc::now();

    let (status, body) = call(&app, "POST", "/api/v1/accounts", json!({
        "customerId": "c1",
        "type": "SAVINGS",
        "openingAmount": 100,
        "monthlyTransactionLimit": 5
    })).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);

    let account = &body["data"];
    assert_eq!(account["balance"], "100");
    let opened: DateTime<Utc> = account["openingDate"].as_str().unwrap().parse().unwrap();
    let last: DateTime<Utc> = account["lastTransactionDate"].as_str().unwrap().parse().unwrap();
    assert!(opened >= before && opened <= Utc::now());
    assert_eq!(opened, last);

    // Second savings account for the same customer is refused
    let (status, body) = call(&app, "POST", "/api/v1/accounts", json!({
        "customerId": "c1",
        "type": "SAVINGS",
        "openingAmount": 10,
        "monthlyTransactionLimit": 2
    })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["message"], "Business rule violated: Customer already has an account of this type");
}

#[tokio::test]
async fn test_business_customer_flow() {
    let app = gateway().await;

    let (status, _) = call(&app, "POST", "/api/v1/accounts", json!({
        "customerId": "acme",
        "type": "FIXED_TERM",
        "openingAmount": 5000,
        "monthlyTransactionLimit": 1,
        "allowedDayOfMonth": 10
    })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = call(&app, "POST", "/api/v1/accounts", json!({
        "customerId": "acme",
        "type": "CHECKING",
        "openingAmount": 5000,
        "maintenanceFee": 25,
        "authorizedSigners": ["ceo", "cfo"]
    })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["authorizedSigners"], json!(["ceo", "cfo"]));
}

#[tokio::test]
async fn test_unknown_customer_is_not_found() {
    let app = gateway().await;

    let (status, body) = call(&app, "POST", "/api/v1/accounts", json!({
        "customerId": "nobody",
        "type": "CHECKING",
        "openingAmount": 0
    })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "customer_not_found");

    let (_, body) = call(&app, "GET", "/api/v1/accounts", Value::Null).await;
    assert_eq!(body["data"], json!([]));
}
