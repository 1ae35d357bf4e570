//! REST gateway for the account service

pub mod api;
pub mod config;
pub mod error;

use std::sync::Arc;

use account_service::AccountService;
use axum::{
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    account::{create_account, delete_account, get_account, get_account_by_number, list_accounts, update_account},
    customer::{get_customer_account, list_customer_accounts},
};

/// App state shared across handlers
pub struct AppState {
    /// Account service
    pub account_service: Arc<AccountService>,
}

/// API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        api::account::list_accounts,
        api::account::create_account,
        api::account::get_account,
        api::account::get_account_by_number,
        api::account::update_account,
        api::account::delete_account,
        api::customer::list_customer_accounts,
        api::customer::get_customer_account,
    ),
    components(
        schemas(
            common::model::account::Account,
            common::model::account::AccountType,
            common::model::account::AccountRequest,
            common::model::account::AccountPatch,
            api::response::ResponseMetadata,
        )
    ),
    tags(
        (name = "account", description = "Account management endpoints"),
        (name = "customer", description = "Customer-scoped account queries")
    ),
    info(
        title = "Account Service API",
        version = "1.0.0",
        description = "Bank account management: savings, checking and fixed-term accounts"
    )
)]
pub struct ApiDoc;

/// Build the HTTP application
pub fn router(state: Arc<AppState>, log_level: Level) -> Router {
    let api_routes = Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/:id", get(get_account).put(update_account).delete(delete_account))
        .route("/account-numbers/:number", get(get_account_by_number))
        .route("/customers/:customer_id/accounts", get(list_customer_accounts))
        .route("/customers/:customer_id/accounts/:id", get(get_customer_account));

    let swagger_ui = SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/v1", api_routes)
        .merge(swagger_ui)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(log_level))
                .on_request(DefaultOnRequest::new().level(log_level))
                .on_response(DefaultOnResponse::new().level(log_level))
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
