use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use tourbook::notifications::{
    notification_router, Notification, NotificationId, NotificationService, NotificationStore,
};
use tourbook::store::{SourceError, SourceOutcome, StoreError};
use tower::ServiceExt;

#[derive(Default)]
struct MemoryStore {
    notifications: Mutex<Vec<Notification>>,
    failure: Option<StoreError>,
}

impl NotificationStore for MemoryStore {
    fn list(&self) -> SourceOutcome<Vec<Notification>> {
        let result = match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(self.notifications.lock().expect("store mutex").clone()),
        };
        SourceOutcome::from_store("notifications", result)
    }

    fn mark_read(&self, id: &NotificationId) -> Result<Option<Notification>, SourceError> {
        let mut guard = self.notifications.lock().expect("store mutex");
        Ok(guard.iter_mut().find(|n| n.id == *id).map(|n| {
            n.read = true;
            n.clone()
        }))
    }
}

fn seeded_store() -> MemoryStore {
    MemoryStore {
        notifications: Mutex::new(vec![Notification {
            id: NotificationId("n-1".to_string()),
            message: "Supplier submitted a new hotel offer".to_string(),
            read: false,
            created_at: Utc.with_ymd_and_hms(2025, 4, 2, 8, 0, 0).unwrap(),
        }]),
        failure: None,
    }
}

fn router(store: MemoryStore) -> Router {
    notification_router(Arc::new(NotificationService::new(Arc::new(store))))
}

async fn post_form(router: Router, body: &'static str) -> Response {
    router
        .oneshot(
            Request::post("/admin/notifications/read")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .expect("valid request"),
        )
        .await
        .expect("route executes")
}

async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[tokio::test]
async fn mark_read_updates_known_notification() {
    let response = post_form(router(seeded_store()), "notificationId=n-1").await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["id"], json!("n-1"));
    assert_eq!(payload["read"], json!(true));
}

#[tokio::test]
async fn mark_read_requires_an_id() {
    let response = post_form(router(seeded_store()), "notificationId=").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], json!("notification id is required"));

    let response = post_form(router(seeded_store()), "").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn mark_read_of_unknown_id_is_not_found() {
    let response = post_form(router(seeded_store()), "notificationId=n-404").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_downgrades_missing_table_to_empty() {
    let store = MemoryStore {
        failure: Some(StoreError::missing_table("Notification")),
        ..MemoryStore::default()
    };
    let response = router(store)
        .oneshot(
            Request::get("/admin/notifications")
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json_body(response).await, json!([]));
}

#[tokio::test]
async fn listing_surfaces_other_store_failures() {
    let store = MemoryStore {
        failure: Some(StoreError::with_code("57P01", "admin shutdown")),
        ..MemoryStore::default()
    };
    let response = router(store)
        .oneshot(
            Request::get("/admin/notifications")
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
