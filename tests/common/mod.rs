#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use calspend::entities::{department, program, vendor_total};
use calspend::{AppState, Config, Migrator, router};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, DbErr, Set};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use tower::ServiceExt;

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;

    // Run migrations
    Migrator::up(&db, None).await?;

    Ok(db)
}

pub fn setup_test_app(db: DatabaseConnection) -> Router {
    router(AppState::new(db, Config::default()))
}

/// App backed by a database with no tables, so every query fails.
pub async fn setup_broken_app() -> Router {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");
    setup_test_app(db)
}

pub async fn insert_vendor(
    db: &DatabaseConnection,
    name: &str,
    department: &str,
    amount: f64,
) -> vendor_total::Model {
    vendor_total::ActiveModel {
        vendor_name: Set(name.to_string()),
        department_name: Set(department.to_string()),
        program_name: Set(None),
        fund_name: Set(Some("General Fund".to_string())),
        fiscal_year: Set(2024),
        total_amount: Set(amount),
        transaction_count: Set(12),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert vendor total")
}

pub async fn insert_department(
    db: &DatabaseConnection,
    slug: &str,
    name: &str,
    org_code: &str,
    total_spend: f64,
) -> department::Model {
    department::ActiveModel {
        slug: Set(slug.to_string()),
        name: Set(name.to_string()),
        org_code: Set(org_code.to_string()),
        org_level: Set("1".to_string()),
        parent_code: Set(None),
        total_spend: Set(total_spend),
        headcount: Set(250),
        average_salary: Set(88_000.0),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert department")
}

pub async fn insert_program(
    db: &DatabaseConnection,
    code: &str,
    name: &str,
    department: &str,
    total_spend: f64,
) -> program::Model {
    program::ActiveModel {
        program_code: Set(code.to_string()),
        program_name: Set(name.to_string()),
        department_name: Set(department.to_string()),
        fund_name: Set(None),
        fiscal_year: Set(2024),
        total_spend: Set(total_spend),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert program")
}

/// Vendors used by the listing and search tests, in descending amount order.
pub async fn seed_vendors(db: &DatabaseConnection) {
    insert_vendor(db, "Acme Corp", "Department of Transportation", 500_000.0).await;
    insert_vendor(db, "Acme Services", "Department of Public Health", 300_000.0).await;
    insert_vendor(db, "Other Vendor", "Department of Transportation", 100_000.0).await;
}

pub async fn seed_catalog(db: &DatabaseConnection) {
    seed_vendors(db).await;
    insert_department(db, "transportation", "Department of Transportation", "2660", 9.5e9).await;
    insert_department(db, "public-health", "Department of Public Health", "4265", 4.1e9).await;
    insert_department(db, "water-resources", "Department of Water Resources", "3860", 2.2e9).await;
    insert_program(db, "2660010", "Highway Transportation", "Department of Transportation", 6.0e9).await;
    insert_program(db, "4265010", "Public Health Emergency", "Department of Public Health", 1.3e9).await;
    insert_program(db, "3860020", "State Water Project", "Department of Water Resources", 1.1e9).await;
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, serde_json::from_slice(&body).unwrap())
}

pub async fn post_json(app: &Router, uri: &str, payload: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(payload).unwrap()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

/// Percent-encode a filter expression for a query string.
pub fn encode(value: &str) -> String {
    url_escape::encode_component(value).to_string()
}

pub fn names(body: &Value, field: &str) -> Vec<String> {
    body["results"]
        .as_array()
        .expect("results should be an array")
        .iter()
        .map(|row| row[field].as_str().unwrap_or_default().to_string())
        .collect()
}
