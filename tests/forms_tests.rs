use axum::http::StatusCode;
use calspend::entities::{Subscriber, WhistleblowerTip};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

mod common;
use common::{post_json, setup_test_app, setup_test_db};

#[tokio::test]
async fn test_tip_is_stored_and_not_echoed() {
    let db = setup_test_db()
        .await
        .expect("Failed to setup test database");
    let app = setup_test_app(db.clone());

    let payload = json!({
        "message": "  Invoices for the same job were split under the bid threshold.  ",
        "department": "Department of Transportation",
    });
    let (status, body) = post_json(&app, "/api/tips", &payload).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].is_string());
    assert!(body["received_at"].is_string());
    assert!(body.get("message").is_none());

    let stored = WhistleblowerTip::find().all(&db).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(
        stored[0].message,
        "Invoices for the same job were split under the bid threshold."
    );
    assert_eq!(stored[0].contact, None);
    assert_eq!(stored[0].id.to_string(), body["id"].as_str().unwrap());
}

#[tokio::test]
async fn test_invalid_tip_is_rejected() {
    let db = setup_test_db()
        .await
        .expect("Failed to setup test database");
    let app = setup_test_app(db.clone());

    let (status, body) = post_json(&app, "/api/tips", &json!({ "message": "too short" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(
        body["details"],
        json!(["message: Must be at least 10 characters"])
    );

    let payload = json!({
        "message": "x".repeat(5001),
        "contact": "c".repeat(321),
    });
    let (status, body) = post_json(&app, "/api/tips", &payload).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"].as_array().unwrap().len(), 2);

    assert_eq!(WhistleblowerTip::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_subscribe_normalizes_email() {
    let db = setup_test_db()
        .await
        .expect("Failed to setup test database");
    let app = setup_test_app(db);

    let (status, body) =
        post_json(&app, "/api/subscribe", &json!({ "email": "  Reader@Example.ORG " })).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "reader@example.org");
    assert!(body["id"].is_string());
}

#[tokio::test]
async fn test_duplicate_subscriber_is_conflict() {
    let db = setup_test_db()
        .await
        .expect("Failed to setup test database");
    let app = setup_test_app(db.clone());

    let (status, _) =
        post_json(&app, "/api/subscribe", &json!({ "email": "reader@example.org" })).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) =
        post_json(&app, "/api/subscribe", &json!({ "email": "READER@example.org" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email is already subscribed");

    assert_eq!(Subscriber::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_malformed_email_is_rejected() {
    let db = setup_test_db()
        .await
        .expect("Failed to setup test database");
    let app = setup_test_app(db);

    for email in ["", "reader", "reader@localhost", "a b@example.org"] {
        let (status, body) = post_json(&app, "/api/subscribe", &json!({ "email": email })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{email:?}");
        assert_eq!(body["error"], "Validation failed");
    }
}
