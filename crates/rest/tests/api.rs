//! End-to-end tests for the lookup REST API over in-memory backends.

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{json, Value};

use lookup_rest::{create_app_with_config, ServerConfig};
use lookup_store::backends::{MemoryIndex, MemoryStore};
use lookup_store::core::TracingPublisher;
use lookup_store::lookup::LookupService;

const ADMIN_ROLES: &str = "Administrator";
const PLAIN_ROLES: &str = "Copilot";

fn test_server() -> TestServer {
    let service = LookupService::new(
        Arc::new(MemoryStore::new()),
        Arc::new(MemoryIndex::new()),
        Arc::new(TracingPublisher),
    );
    let app = create_app_with_config(Arc::new(service), ServerConfig::for_testing());
    TestServer::new(app).expect("failed to start test server")
}

async fn create_country(server: &TestServer, name: &str, code: &str) -> Value {
    let response = server
        .post("/lookups/countries")
        .add_header("x-roles", ADMIN_ROLES)
        .json(&json!({ "name": name, "countryCode": code }))
        .await;
    response.assert_status(http::StatusCode::CREATED);
    response.json::<Value>()
}

#[tokio::test]
async fn health_check_responds() {
    let server = test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["checksRun"], json!(1));
}

#[tokio::test]
async fn unknown_entity_type_is_404() {
    let server = test_server();
    let response = server.get("/lookups/widgets").await;
    response.assert_status_not_found();
    assert!(response.json::<Value>()["message"]
        .as_str()
        .unwrap()
        .contains("widgets"));
}

#[tokio::test]
async fn non_admin_soft_delete_request_is_forbidden() {
    let server = test_server();

    let response = server
        .get("/lookups/countries")
        .add_query_param("includeSoftDeleted", "true")
        .add_header("x-roles", PLAIN_ROLES)
        .await;
    response.assert_status_forbidden();
    assert_eq!(
        response.json::<Value>()["message"],
        json!("You are not allowed to perform that action")
    );
}

#[tokio::test]
async fn create_then_read_round_trip() {
    let server = test_server();
    let created = create_country(&server, "Chile", "CL").await;

    let id = created["id"].as_str().unwrap();
    assert!(created.get("isDeleted").is_none());

    let response = server.get(&format!("/lookups/countries/{id}")).await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["name"], json!("Chile"));
    assert_eq!(body["countryCode"], json!("CL"));
    assert!(body.get("isDeleted").is_none());
}

#[tokio::test]
async fn create_requires_admin_role() {
    let server = test_server();
    let response = server
        .post("/lookups/countries")
        .add_header("x-roles", PLAIN_ROLES)
        .json(&json!({ "name": "Chile", "countryCode": "CL" }))
        .await;
    response.assert_status_forbidden();
}

#[tokio::test]
async fn create_missing_required_field_is_400() {
    let server = test_server();
    let response = server
        .post("/lookups/countries")
        .add_header("x-roles", ADMIN_ROLES)
        .json(&json!({ "name": "Chile" }))
        .await;
    response.assert_status_bad_request();
    assert!(response.json::<Value>()["message"]
        .as_str()
        .unwrap()
        .contains("countryCode"));
}

#[tokio::test]
async fn list_carries_pagination_headers_and_links() {
    let server = test_server();
    for i in 0..25 {
        create_country(&server, &format!("Country {i:02}"), "XX").await;
    }

    let response = server
        .get("/lookups/countries")
        .add_query_param("page", "2")
        .add_query_param("perPage", "10")
        .await;
    response.assert_status_ok();

    let headers = response.headers();
    assert_eq!(headers["x-page"], "2");
    assert_eq!(headers["x-per-page"], "10");
    assert_eq!(headers["x-total"], "25");
    assert_eq!(headers["x-total-pages"], "3");
    assert_eq!(headers["x-prev-page"], "1");
    assert_eq!(headers["x-next-page"], "3");

    let link = headers["link"].to_str().unwrap();
    assert!(link.contains("rel=\"first\""));
    assert!(link.contains("rel=\"last\""));
    assert!(link.contains("rel=\"prev\""));
    assert!(link.contains("rel=\"next\""));
    assert!(link.contains("perPage=10"));

    let items = response.json::<Vec<Value>>();
    assert_eq!(items.len(), 10);
}

#[tokio::test]
async fn list_filters_by_field_value() {
    let server = test_server();
    create_country(&server, "Argentina", "AR").await;
    create_country(&server, "Brazil", "BR").await;

    let response = server
        .get("/lookups/countries")
        .add_query_param("countryCode", "BR")
        .await;
    response.assert_status_ok();

    let items = response.json::<Vec<Value>>();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], json!("Brazil"));
    assert_eq!(response.headers()["x-total"], "1");
}

#[tokio::test]
async fn put_and_patch_update_records() {
    let server = test_server();
    let response = server
        .post("/lookups/devices")
        .add_header("x-roles", ADMIN_ROLES)
        .json(&json!({ "type": "phone", "manufacturer": "Acme", "model": "A1" }))
        .await;
    response.assert_status(http::StatusCode::CREATED);
    let id = response.json::<Value>()["id"].as_str().unwrap().to_string();

    let response = server
        .patch(&format!("/lookups/devices/{id}"))
        .add_header("x-roles", ADMIN_ROLES)
        .json(&json!({ "operatingSystem": "android" }))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["operatingSystem"], json!("android"));
    assert_eq!(body["model"], json!("A1"));

    // A full replace drops fields absent from the payload.
    let response = server
        .put(&format!("/lookups/devices/{id}"))
        .add_header("x-roles", ADMIN_ROLES)
        .json(&json!({ "type": "phone", "manufacturer": "Acme", "model": "A2" }))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["model"], json!("A2"));
    assert!(body.get("operatingSystem").is_none());
}

#[tokio::test]
async fn soft_then_hard_delete_lifecycle() {
    let server = test_server();
    let created = create_country(&server, "Chile", "CL").await;
    let id = created["id"].as_str().unwrap().to_string();

    // Default delete is soft.
    let response = server
        .delete(&format!("/lookups/countries/{id}"))
        .add_header("x-roles", ADMIN_ROLES)
        .await;
    response.assert_status(http::StatusCode::NO_CONTENT);

    // Hidden from ordinary reads.
    let response = server.get(&format!("/lookups/countries/{id}")).await;
    response.assert_status_not_found();

    // Visible to an admin who asks.
    let response = server
        .get(&format!("/lookups/countries/{id}"))
        .add_query_param("includeSoftDeleted", "true")
        .add_header("x-roles", ADMIN_ROLES)
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["isDeleted"], json!(true));

    // Hard delete removes it for everyone.
    let response = server
        .delete(&format!("/lookups/countries/{id}"))
        .add_query_param("destroy", "true")
        .add_header("x-roles", ADMIN_ROLES)
        .await;
    response.assert_status(http::StatusCode::NO_CONTENT);

    let response = server
        .get(&format!("/lookups/countries/{id}"))
        .add_query_param("includeSoftDeleted", "true")
        .add_header("x-roles", ADMIN_ROLES)
        .await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn delete_requires_admin_role() {
    let server = test_server();
    let created = create_country(&server, "Chile", "CL").await;
    let id = created["id"].as_str().unwrap();

    let response = server
        .delete(&format!("/lookups/countries/{id}"))
        .add_header("x-roles", PLAIN_ROLES)
        .await;
    response.assert_status_forbidden();
}

#[tokio::test]
async fn non_object_body_is_400() {
    let server = test_server();
    let response = server
        .post("/lookups/countries")
        .add_header("x-roles", ADMIN_ROLES)
        .json(&json!(["not", "an", "object"]))
        .await;
    response.assert_status_bad_request();
}
