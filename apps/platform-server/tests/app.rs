#![allow(clippy::unwrap_used, clippy::expect_used)]

//! The assembled application: gate in front of the ledger routes.

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use platform_server::config::{AppConfig, DatabaseConfig};
use platform_server::{build_router, connect, migrate};
use secrecy::SecretString;
use tenant_gate::TenantGateModule;
use tenant_gate::domain::session::SessionClaims;
use tenant_gate_sdk::Role;
use tower::ServiceExt;
use uuid::Uuid;

const HOST: &str = "tablewise.app";

struct TestApp {
    router: Router,
    sessions: TenantGateModule,
}

async fn test_app() -> TestApp {
    let mut cfg = AppConfig {
        database: DatabaseConfig {
            url: "sqlite::memory:".to_owned(),
            max_connections: 1,
        },
        ..AppConfig::default()
    };
    cfg.tenant_gate.session.secret = SecretString::from("app-test-secret".to_owned());

    let db = connect(&cfg.database).await.unwrap();
    migrate(&db).await.unwrap();
    TestApp {
        router: build_router(&cfg, db.clone()),
        sessions: TenantGateModule::new(cfg.tenant_gate.clone(), db),
    }
}

impl TestApp {
    fn token(&self, role: Role) -> String {
        self.sessions
            .sessions()
            .issue(&SessionClaims::new(
                Uuid::new_v4(),
                role,
                Duration::from_secs(600),
            ))
            .unwrap()
    }

    async fn get(&self, path: &str, token: Option<&str>) -> StatusCode {
        let mut req = Request::builder()
            .uri(path)
            .header(header::HOST, HOST)
            .header(header::ACCEPT, "application/json");
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.router
            .clone()
            .oneshot(req.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }
}

#[tokio::test]
async fn health_is_public() {
    let app = test_app().await;
    assert_eq!(app.get("/health", None).await, StatusCode::OK);
}

#[tokio::test]
async fn operator_routes_need_a_session() {
    let app = test_app().await;
    let path = format!("/api/platform/tenants/{}/revenue-shares", Uuid::new_v4());
    assert_eq!(app.get(&path, None).await, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn operator_routes_are_platform_owner_only() {
    let app = test_app().await;
    let path = format!("/api/platform/tenants/{}/revenue-shares", Uuid::new_v4());

    let owner = app.token(Role::PlatformOwner);
    assert_eq!(app.get(&path, Some(&owner)).await, StatusCode::OK);

    let partner = app.token(Role::Partner);
    assert_eq!(app.get(&path, Some(&partner)).await, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_custom_domain_is_not_found() {
    let app = test_app().await;
    let resp = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::HOST, "unregistered.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
