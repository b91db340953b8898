#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Signal engine over stored rollups, and the operator REST routes.

mod common;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use common::{bind, event, harness};
use revenue_ledger::infra::storage::SeaOrmLedgerRepository;
use revenue_ledger_sdk::{LedgerOutcome, RevenueLedgerClient, RiskLevel, SignalEngineClient};
use serde_json::{Value, json};
use time::{Duration, OffsetDateTime};
use tower::ServiceExt;
use uuid::Uuid;

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_req(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn declining_tenant_scores_from_stored_rollups() {
    let h = harness().await;
    let tenant = Uuid::new_v4();
    let repo = SeaOrmLedgerRepository::new(h.db.clone());
    let now = OffsetDateTime::now_utc();
    repo.record_order_rollup(tenant, now - Duration::days(45), 100)
        .await
        .unwrap();
    repo.record_order_rollup(tenant, now - Duration::days(20), 10)
        .await
        .unwrap();

    let signals = h.module.signals().compute_signals(tenant).await;

    // orders -90% (+35) and 20 idle days (+30); no revenue on record.
    assert_eq!(signals.churn.risk_score, 65);
    assert_eq!(signals.churn.risk_level, RiskLevel::Medium);
    assert_eq!(
        signals.churn.reasons,
        vec![
            "orders dropped 90%".to_owned(),
            "no activity for 20 days".to_owned(),
        ]
    );
    assert_eq!(signals.upsell.score, 0);
}

#[tokio::test]
async fn rollup_rewrite_replaces_the_day_total() {
    let h = harness().await;
    let tenant = Uuid::new_v4();
    let repo = SeaOrmLedgerRepository::new(h.db.clone());
    let now = OffsetDateTime::now_utc();
    let prev_day = now - Duration::days(40);
    let cur_day = now - Duration::days(1);
    repo.record_order_rollup(tenant, prev_day, 10).await.unwrap();
    repo.record_order_rollup(tenant, cur_day, 5).await.unwrap();
    repo.record_order_rollup(tenant, cur_day, 20).await.unwrap();

    let signals = h.module.signals().compute_signals(tenant).await;
    assert_eq!(signals.churn.risk_score, 0);
    assert_eq!(signals.upsell.reasons, vec!["orders grew 100%".to_owned()]);
}

#[tokio::test]
async fn storage_outage_yields_a_signal_anyway() {
    let h = harness().await;
    let signals = h.module.signals();
    h.db.clone().close().await.unwrap();

    let result = signals.compute_signals(Uuid::new_v4()).await;
    assert_eq!(result.churn.risk_score, 0);
    assert!(result.churn.reasons.is_empty());
    assert_eq!(result.upsell.score, 0);
}

#[tokio::test]
async fn signals_routes_compute_then_list_history() {
    let h = harness().await;
    let tenant = Uuid::new_v4();
    let app = h.module.router();

    let resp = app
        .clone()
        .oneshot(json_req(
            "POST",
            &format!("/api/platform/tenants/{tenant}/signals"),
            &json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    // No activity at all counts as inactivity.
    assert_eq!(body["churn"]["risk_score"], 30);
    assert_eq!(body["churn"]["risk_level"], "low");

    let resp = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/platform/tenants/{tenant}/signals?limit=5"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let history = body_json(resp).await;
    assert_eq!(history.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn payout_route_maps_outcomes_to_statuses() {
    let h = harness().await;
    let tenant = Uuid::new_v4();
    bind(&h, tenant, 2_000).await;
    let LedgerOutcome::Created(record) = h
        .module
        .ledger()
        .record_revenue_share(event(tenant, "inv-rest", 10_000))
        .await
        .unwrap()
    else {
        panic!("expected Created");
    };
    let app = h.module.router();
    let uri = format!("/api/platform/revenue-shares/{}/payout", record.id);

    let resp = app
        .clone()
        .oneshot(json_req("POST", &uri, &json!({ "status": "failed" })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["outcome"], "applied");
    assert_eq!(body["record"]["payout_status"], "failed");

    let resp = app
        .clone()
        .oneshot(json_req("POST", &uri, &json!({ "status": "paid" })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/problem+json"
    );

    let resp = app
        .clone()
        .oneshot(json_req("POST", &uri, &json!({ "status": "pending" })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app
        .oneshot(json_req(
            "POST",
            &format!("/api/platform/revenue-shares/{}/payout", Uuid::new_v4()),
            &json!({ "status": "paid" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reseller_route_binds_and_listing_returns_records() {
    let h = harness().await;
    let tenant = Uuid::new_v4();
    let reseller = Uuid::new_v4();
    let app = h.module.router();

    let resp = app
        .clone()
        .oneshot(json_req(
            "PUT",
            &format!("/api/platform/tenants/{tenant}/reseller"),
            &json!({ "reseller_id": reseller, "commission_rate_bps": 1_250 }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["active"], true);

    h.module
        .ledger()
        .record_revenue_share(event(tenant, "inv-list", 8_000))
        .await
        .unwrap();

    let resp = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/platform/tenants/{tenant}/revenue-shares"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["commission_cents"], 1_000);
    assert_eq!(rows[0]["reseller_id"], reseller.to_string());
}
