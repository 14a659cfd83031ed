use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
use serde_json::{Value, json};
use uuid::Uuid;

use backoffice_admin::router::build_router;
use backoffice_admin::state::AppState;
use backoffice_admin_schema::{orders, products};

fn server(db: DatabaseConnection) -> TestServer {
    TestServer::new(build_router(AppState::new(db))).unwrap()
}

fn empty_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

fn widget_model() -> products::Model {
    let at = Utc.with_ymd_and_hms(2025, 5, 21, 14, 27, 34).unwrap();
    products::Model {
        id: Uuid::now_v7(),
        name: "Widget".to_owned(),
        description: None,
        price: Decimal::new(150, 0),
        image: None,
        stock: 5,
        created_at: at,
        updated_at: at,
    }
}

fn order_model(status: &str) -> orders::Model {
    let at = Utc.with_ymd_and_hms(2025, 5, 21, 14, 27, 34).unwrap();
    orders::Model {
        id: Uuid::now_v7(),
        user_id: Uuid::now_v7(),
        order_number: "ORD-1001".to_owned(),
        total_amount: Decimal::new(30000, 2),
        status: status.to_owned(),
        shipping_address: "1 Main St".to_owned(),
        billing_address: None,
        payment_method: None,
        payment_status: "pending".to_owned(),
        created_at: at,
        updated_at: at,
    }
}

// ── Health / plumbing ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_report_liveness_and_readiness() {
    let server = server(empty_db());
    assert_eq!(server.get("/healthz").await.status_code(), StatusCode::OK);
    assert_eq!(server.get("/readyz").await.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn should_return_json_not_found_for_unknown_routes() {
    let response = server(empty_db()).get("/customers").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "NOT_FOUND");
}

#[tokio::test]
async fn should_echo_request_id() {
    let response = server(empty_db())
        .get("/healthz")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("req-42"),
        )
        .await;
    assert_eq!(response.header("x-request-id"), "req-42");
}

#[tokio::test]
async fn should_assign_request_id_when_missing() {
    let response = server(empty_db()).get("/healthz").await;
    let id = response.header("x-request-id");
    assert!(id.to_str().unwrap().parse::<Uuid>().is_ok());
}

// ── Products ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_products_with_filter_echo() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![widget_model()]])
        .into_connection();
    let response = server(db)
        .get("/products")
        .add_query_param("min_price", "100")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let json = response.json::<Value>();
    assert_eq!(json["products"][0]["name"], "Widget");
    assert_eq!(json["products"][0]["price"], "150.00");
    assert_eq!(json["products"][0]["created_at"], "2025-05-21T14:27:34.000Z");
    assert_eq!(json["filters"]["min_price"], "100");
    assert_eq!(json["filters"]["name"], Value::Null);
}

#[tokio::test]
async fn should_reject_non_numeric_price_bound() {
    let response = server(empty_db())
        .get("/products")
        .add_query_param("max_price", "cheap")
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = response.json::<Value>();
    assert_eq!(json["kind"], "VALIDATION");
    assert_eq!(json["errors"]["max_price"][0], "The max_price field must be a number.");
}

#[tokio::test]
async fn should_create_product() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![widget_model()]])
        .into_connection();
    let response = server(db)
        .post("/products")
        .json(&json!({ "name": "Widget", "price": 150, "stock": "5" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let json = response.json::<Value>();
    assert_eq!(json["name"], "Widget");
    assert_eq!(json["price"], "150.00");
    assert_eq!(json["stock"], 5);
    assert_eq!(json["image"], Value::Null);
    assert!(json["id"].as_str().unwrap().parse::<Uuid>().is_ok());
}

#[tokio::test]
async fn should_return_field_errors_for_invalid_product() {
    let response = server(empty_db())
        .post("/products")
        .json(&json!({ "name": "", "price": "abc", "stock": 0, "image": "not an image" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = response.json::<Value>();
    assert_eq!(json["errors"]["name"][0], "The name field is required.");
    assert_eq!(json["errors"]["price"][0], "The price field must be a number.");
    assert_eq!(json["errors"]["stock"][0], "The stock field must be at least 1.");
    assert_eq!(json["errors"]["image"][0], "The image field must be an image.");
}

#[tokio::test]
async fn should_return_not_found_for_missing_product() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<products::Model>::new()])
        .into_connection();
    let response = server(db).get(&format!("/products/{}", Uuid::now_v7())).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "PRODUCT_NOT_FOUND");
}

#[tokio::test]
async fn should_return_not_found_for_malformed_product_id() {
    let response = server(empty_db()).get("/products/42").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_return_not_found_when_deleting_missing_product() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();
    let response = server(db)
        .delete(&format!("/products/{}", Uuid::now_v7()))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_delete_product() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let response = server(db)
        .delete(&format!("/products/{}", Uuid::now_v7()))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
}

// ── Orders ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_unknown_status_filter() {
    let response = server(empty_db())
        .get("/orders")
        .add_query_param("status", "lost")
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.json::<Value>()["errors"]["status"][0],
        "The selected status is invalid."
    );
}

#[tokio::test]
async fn should_list_orders_with_available_statuses() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<orders::Model>::new()])
        .into_connection();
    let response = server(db)
        .get("/orders")
        .add_query_param("status", "all")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let json = response.json::<Value>();
    assert_eq!(json["orders"], json!([]));
    assert_eq!(json["filters"]["status"], "all");
    assert_eq!(
        json["available_statuses"],
        json!(["all", "pending", "processing", "shipped", "delivered", "cancelled"])
    );
}

#[tokio::test]
async fn should_return_not_found_for_missing_order() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<orders::Model>::new()])
        .into_connection();
    let response = server(db).get(&format!("/orders/{}", Uuid::now_v7())).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "ORDER_NOT_FOUND");
}

#[tokio::test]
async fn should_reject_bogus_status_update() {
    let order = order_model("shipped");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![order.clone()]])
        .into_connection();
    let response = server(db)
        .patch(&format!("/orders/{}/status", order.id))
        .json(&json!({ "status": "bogus" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.json::<Value>()["errors"]["status"][0],
        "The selected status is invalid."
    );
}

#[tokio::test]
async fn should_update_order_status() {
    let order = order_model("pending");
    let shipped = orders::Model {
        status: "shipped".to_owned(),
        ..order.clone()
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![order.clone()]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results([vec![shipped]])
        .into_connection();
    let response = server(db)
        .patch(&format!("/orders/{}/status", order.id))
        .json(&json!({ "status": "shipped" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let json = response.json::<Value>();
    assert_eq!(json["status"], "shipped");
    assert_eq!(json["total_amount"], "300.00");
    assert!(json.get("user").is_none());
}

// ── Request bodies ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_json_error_for_malformed_body() {
    let response = server(empty_db())
        .post("/products")
        .content_type("application/json")
        .bytes("{\"name\": ".into())
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = response.json::<Value>();
    assert_eq!(json["kind"], "VALIDATION");
    assert!(json["errors"]["body"][0].is_string());
}

#[tokio::test]
async fn should_return_json_error_for_non_json_status_update() {
    let response = server(empty_db())
        .patch(&format!("/orders/{}/status", Uuid::now_v7()))
        .text("status=shipped")
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>()["kind"], "VALIDATION");
}
