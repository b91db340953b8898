#![allow(clippy::unwrap_used, clippy::expect_used)]

//! The axum gate layer in front of a small router.

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::routing::get;
use axum::{Extension, Router};
use common::{DistrictSeed, PLATFORM, config, inmem_db, seed_district, token};
use platform_audit::{AuditEntry, AuditError, AuditSink};
use tenant_gate::TenantGateModule;
use tenant_gate_sdk::{GateOutcome, Role};
use tower::ServiceExt;
use uuid::Uuid;

#[derive(Default)]
struct RecordingSink {
    entries: Mutex<Vec<AuditEntry>>,
}

#[async_trait]
impl AuditSink for RecordingSink {
    async fn record(&self, entry: AuditEntry) -> Result<(), AuditError> {
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }
}

async fn whoami(Extension(outcome): Extension<GateOutcome>) -> String {
    outcome
        .principal
        .map_or_else(|| "anonymous".to_owned(), |p| p.role.to_string())
}

fn app(module: &TenantGateModule, sink: Arc<RecordingSink>) -> Router {
    let router = Router::new()
        .route("/", get(whoami))
        .route("/dashboard", get(whoami))
        .route("/api/platform/ping", get(whoami));
    module.layer(router, sink)
}

fn get_req(host: &str, path: &str) -> axum::http::request::Builder {
    Request::builder()
        .method("GET")
        .uri(path)
        .header(header::HOST, host)
}

#[tokio::test]
async fn anonymous_browser_request_is_redirected_with_next() {
    let module = TenantGateModule::new(config(5), inmem_db().await);
    let sink = Arc::new(RecordingSink::default());

    let resp = app(&module, sink)
        .oneshot(
            get_req(PLATFORM, "/dashboard?tab=orders")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/login?next=%2Fdashboard%3Ftab%3Dorders"
    );
}

#[tokio::test]
async fn session_cookie_reaches_handler_as_principal() {
    let module = TenantGateModule::new(config(5), inmem_db().await);
    let sink = Arc::new(RecordingSink::default());
    let tok = token(&module, Uuid::new_v4(), Role::PlatformOwner);

    let resp = app(&module, sink)
        .oneshot(
            get_req("localhost:3000", "/dashboard")
                .header(header::COOKIE, format!("session={tok}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
    assert_eq!(&body[..], b"platform_owner");
}

#[tokio::test]
async fn unknown_custom_domain_gets_generic_problem() {
    let module = TenantGateModule::new(config(5), inmem_db().await);
    let sink = Arc::new(RecordingSink::default());

    let resp = app(&module, sink)
        .oneshot(get_req("nobody.example", "/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/problem+json"
    );
    let body = axum::body::to_bytes(resp.into_body(), 4096).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], 404);
    assert_eq!(json["detail"], "Resource not found");
}

#[tokio::test]
async fn forbidden_api_call_is_audited() {
    let db = inmem_db().await;
    let admin = Uuid::new_v4();
    let district = seed_district(
        &db,
        DistrictSeed {
            domain: Some("x.example"),
            admin: Some(admin),
            ..DistrictSeed::default()
        },
    )
    .await;
    let module = TenantGateModule::new(config(5), db);
    let sink = Arc::new(RecordingSink::default());
    let tok = token(&module, admin, Role::DistrictAdmin);

    let resp = app(&module, sink.clone())
        .oneshot(
            get_req("x.example", "/api/platform/ping")
                .header(header::AUTHORIZATION, format!("Bearer {tok}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // The audit write is spawned; give it a moment.
    let mut entries = Vec::new();
    for _ in 0..50 {
        entries = sink.entries.lock().unwrap().clone();
        if !entries.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, "gate.forbidden");
    assert_eq!(entries[0].tenant_id, Some(district));
    assert_eq!(entries[0].actor_id, Some(admin));
    assert_eq!(entries[0].metadata_value()["role"], "district_admin");
}
