//! # Club Manager Backend
//!
//! Server side of the club manager: students, their monthly payments, and the
//! notices and events shown on the club's home page.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST handlers, DTO mappers, HTTP error mapping)
//!     ↓
//! Domain Layer (services, validation, payment reconciliation)
//!     ↓
//! Storage Layer (SQLite repositories)
//! ```
//!
//! The payment endpoint is the heart of it: a month/year status change is a
//! single atomic find-or-create on the `(student, month, year)` key, followed
//! by a re-read of the student to confirm the write.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

use crate::config::Config;
use crate::domain::{EventService, NoticeService, PaymentService, StudentService};
use crate::io::rest::{event_apis, notice_apis, payment_apis, student_apis};
use crate::storage::{
    DbConnection, EventRepository, NoticeRepository, PaymentRepository, StudentRepository,
};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub student_service: StudentService,
    pub payment_service: PaymentService,
    pub notice_service: NoticeService,
    pub event_service: EventService,
}

impl AppState {
    /// Wire every service onto one shared connection pool
    pub fn new(db: DbConnection) -> Self {
        let payments = PaymentRepository::new(db.clone());
        let student_service = StudentService::new(StudentRepository::new(db.clone()), payments.clone());
        let payment_service = PaymentService::new(student_service.clone(), payments);

        Self {
            student_service,
            payment_service,
            notice_service: NoticeService::new(NoticeRepository::new(db.clone())),
            event_service: EventService::new(EventRepository::new(db)),
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url).await?;

    info!("Setting up application state");
    Ok(AppState::new(db))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &Config) -> Result<Router> {
    let cors = CorsLayer::new()
        .allow_origin(config.allowed_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/students",
            get(student_apis::list_students).post(student_apis::create_student),
        )
        .route("/students/:id", get(student_apis::get_student))
        .route("/students/:id/payment", put(payment_apis::update_payment))
        .route(
            "/notices",
            get(notice_apis::list_notices).post(notice_apis::create_notice),
        )
        .route(
            "/notices/:id",
            put(notice_apis::update_notice).delete(notice_apis::delete_notice),
        )
        .route(
            "/events",
            get(event_apis::list_events).post(event_apis::create_event),
        )
        .route(
            "/events/:id",
            put(event_apis::update_event).delete(event_apis::delete_event),
        );

    let mut router = Router::new().nest("/api", api_routes);

    if let Some(dir) = &config.frontend_dir {
        info!("Serving frontend from {}", dir.display());
        router = router.fallback_service(ServeDir::new(dir));
    }

    Ok(router.layer(cors).with_state(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use shared::{PaymentStatus, Student};
    use tower::ServiceExt;

    async fn setup() -> (Router, DbConnection) {
        let db = DbConnection::init_test().await.expect("Failed to init test DB");
        let router = create_router(AppState::new(db.clone()), &Config::default())
            .expect("Failed to build router");
        (router, db)
    }

    async fn send(router: &Router, method: &str, uri: &str, body: Option<String>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.map(Body::from).unwrap_or_else(Body::empty))
            .unwrap();

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create_student(router: &Router, name: &str) -> Student {
        let body = json!({"name": name, "phone": "555-0101"}).to_string();
        let (status, value) = send(router, "POST", "/api/students", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        serde_json::from_value(value).unwrap()
    }

    async fn payment_rows(db: &DbConnection) -> i64 {
        PaymentRepository::new(db.clone()).count_all().await.unwrap()
    }

    #[tokio::test]
    async fn test_toggle_paid_then_unpaid_over_http() {
        let (router, db) = setup().await;
        let student = create_student(&router, "Ana").await;
        let uri = format!("/api/students/{}/payment", student.id);

        let body = json!({"month": 3, "year": 2024, "status": "paid"}).to_string();
        let (status, value) = send(&router, "PUT", &uri, Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        let paid: Student = serde_json::from_value(value).unwrap();
        let first = paid.payment_for(3, 2024).unwrap().clone();
        assert_eq!(first.status, PaymentStatus::Paid);
        assert!(first.paid_at.is_some());

        let body = json!({"month": 3, "year": 2024, "status": "unpaid"}).to_string();
        let (status, value) = send(&router, "PUT", &uri, Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        let unpaid: Student = serde_json::from_value(value).unwrap();
        let second = unpaid.payment_for(3, 2024).unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.status, PaymentStatus::Unpaid);
        assert_eq!(second.paid_at, None);

        assert_eq!(payment_rows(&db).await, 1);
    }

    #[tokio::test]
    async fn test_string_month_and_year_are_accepted() {
        let (router, _db) = setup().await;
        let student = create_student(&router, "Ana").await;
        let uri = format!("/api/students/{}/payment", student.id);

        let body = json!({"month": "11", "year": "2025", "status": "paid"}).to_string();
        let (status, value) = send(&router, "PUT", &uri, Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        let updated: Student = serde_json::from_value(value).unwrap();
        assert_eq!(updated.payment_status(11, 2025), PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn test_invalid_month_is_rejected_without_a_row() {
        let (router, db) = setup().await;
        let student = create_student(&router, "Ana").await;
        let uri = format!("/api/students/{}/payment", student.id);

        let body = json!({"month": 13, "year": 2024, "status": "paid"}).to_string();
        let (status, value) = send(&router, "PUT", &uri, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(value["error"].as_str().is_some());
        assert_eq!(payment_rows(&db).await, 0);
    }

    #[tokio::test]
    async fn test_invalid_status_values_are_rejected() {
        let (router, db) = setup().await;
        let student = create_student(&router, "Ana").await;
        let uri = format!("/api/students/{}/payment", student.id);

        for status_value in [json!("PAID"), json!(""), Value::Null] {
            let body = json!({"month": 3, "year": 2024, "status": status_value}).to_string();
            let (status, _) = send(&router, "PUT", &uri, Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "status {status_value} accepted");
        }
        assert_eq!(payment_rows(&db).await, 0);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (router, _db) = setup().await;
        let student = create_student(&router, "Ana").await;
        let uri = format!("/api/students/{}/payment", student.id);

        let (status, value) = send(&router, "PUT", &uri, Some("{\"month\": 3,".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(value["error"].as_str().unwrap().starts_with("Malformed request body"));
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_student_ids() {
        let (router, db) = setup().await;
        let body = json!({"month": 3, "year": 2024, "status": "paid"}).to_string();

        let (status, _) = send(&router, "PUT", "/api/students/999/payment", Some(body.clone())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&router, "PUT", "/api/students/abc/payment", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&router, "GET", "/api/students/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        assert_eq!(payment_rows(&db).await, 0);
    }

    #[tokio::test]
    async fn test_list_students_includes_payments() {
        let (router, _db) = setup().await;
        let ana = create_student(&router, "Ana").await;
        create_student(&router, "Bruno").await;

        let body = json!({"month": 5, "year": 2024, "status": "paid"}).to_string();
        let uri = format!("/api/students/{}/payment", ana.id);
        send(&router, "PUT", &uri, Some(body)).await;

        let (status, value) = send(&router, "GET", "/api/students", None).await;
        assert_eq!(status, StatusCode::OK);
        let students: Vec<Student> = serde_json::from_value(value).unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[0].name, "Ana");
        assert_eq!(students[0].payments.len(), 1);
        assert!(students[1].payments.is_empty());
    }

    #[tokio::test]
    async fn test_create_student_requires_name() {
        let (router, _db) = setup().await;

        let body = json!({"name": "   ", "phone": "555"}).to_string();
        let (status, _) = send(&router, "POST", "/api/students", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let body = json!({"phone": "555"}).to_string();
        let (status, _) = send(&router, "POST", "/api/students", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_notice_crud_over_http() {
        let (router, _db) = setup().await;

        let body = json!({"title": "Gym closed", "content": "Friday", "priority": "high"}).to_string();
        let (status, created) = send(&router, "POST", "/api/notices", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_i64().unwrap();

        let body = json!({"title": "Gym closed", "content": "Saturday", "priority": "low"}).to_string();
        let (status, updated) = send(&router, "PUT", &format!("/api/notices/{id}"), Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["content"], "Saturday");
        assert_eq!(updated["priority"], "low");

        let (status, _) = send(&router, "DELETE", &format!("/api/notices/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&router, "DELETE", &format!("/api/notices/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, listed) = send(&router, "GET", "/api/notices", None).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn test_event_crud_over_http() {
        let (router, _db) = setup().await;

        let body = json!({
            "title": "Regional cup",
            "description": "Away game",
            "date": "2024-06-01",
            "type": "competition",
            "location": "Arena"
        })
        .to_string();
        let (status, created) = send(&router, "POST", "/api/events", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["type"], "competition");
        let id = created["id"].as_i64().unwrap();

        let body = json!({
            "title": "Regional cup",
            "description": "Away game",
            "date": "not a date",
            "type": "competition"
        })
        .to_string();
        let (status, _) = send(&router, "PUT", &format!("/api/events/{id}"), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&router, "DELETE", &format!("/api/events/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&router, "PUT", "/api/events/77", Some(json!({
            "title": "x", "description": "y", "date": "2024-06-01", "type": "other"
        }).to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
