#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Ledger behavior over SQLite.

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use common::{StalledSink, bind, event, harness, inmem_db};
use revenue_ledger::RevenueLedgerModule;
use revenue_ledger::config::RevenueLedgerConfig;
use revenue_ledger::domain::repo::{LedgerRepository, ResellerBinding};
use revenue_ledger::infra::storage::SeaOrmLedgerRepository;
use revenue_ledger::infra::storage::entity::revenue_share;
use revenue_ledger_sdk::{
    LedgerError, LedgerOutcome, PayoutStatus, PayoutTransitionOutcome, RevenueLedgerClient,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

async fn rows_for(db: &sea_orm::DatabaseConnection, tenant: Uuid) -> u64 {
    revenue_share::Entity::find()
        .filter(revenue_share::Column::TenantId.eq(tenant))
        .count(db)
        .await
        .unwrap()
}

#[tokio::test]
async fn duplicate_delivery_records_one_commission() {
    let h = harness().await;
    let tenant = Uuid::new_v4();
    let reseller = bind(&h, tenant, 2_000).await;
    let ledger = h.module.ledger();

    let first = ledger
        .record_revenue_share(event(tenant, "inv-001", 10_000))
        .await
        .unwrap();
    let LedgerOutcome::Created(record) = first else {
        panic!("expected Created, got {first:?}");
    };
    assert_eq!(record.commission_cents, 2_000);
    assert_eq!(record.reseller_id, reseller);
    assert_eq!(record.payout_status, PayoutStatus::Pending);

    let second = ledger
        .record_revenue_share(event(tenant, "inv-001", 10_000))
        .await
        .unwrap();
    assert_eq!(second, LedgerOutcome::DuplicateInvoice);

    assert_eq!(rows_for(&h.db, tenant).await, 1);
    assert_eq!(h.audit.actions(), vec!["revenue_share.created".to_owned()]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_duplicates_create_exactly_once() {
    let h = harness().await;
    let tenant = Uuid::new_v4();
    bind(&h, tenant, 1_500).await;
    let ledger = h.module.ledger();

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let ledger = ledger.clone();
            tokio::spawn(async move {
                ledger
                    .record_revenue_share(event(tenant, "inv-race", 4_999))
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut created = 0;
    let mut duplicates = 0;
    for task in tasks {
        match task.await.unwrap() {
            LedgerOutcome::Created(r) => {
                created += 1;
                // 4999 * 0.15 = 749.85
                assert_eq!(r.commission_cents, 750);
            }
            LedgerOutcome::DuplicateInvoice => duplicates += 1,
            other => panic!("unexpected outcome {other:?}"),
        }
    }
    assert_eq!(created, 1);
    assert_eq!(duplicates, 15);
    assert_eq!(rows_for(&h.db, tenant).await, 1);
}

#[tokio::test]
async fn same_invoice_id_is_independent_per_tenant() {
    let h = harness().await;
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    bind(&h, a, 1_000).await;
    bind(&h, b, 1_000).await;
    let ledger = h.module.ledger();

    for tenant in [a, b] {
        let out = ledger
            .record_revenue_share(event(tenant, "inv-shared", 500))
            .await
            .unwrap();
        assert_eq!(out.as_str(), "created");
    }
}

#[tokio::test]
async fn rejections_write_nothing() {
    let h = harness().await;
    let ledger = h.module.ledger();

    let unbound = Uuid::new_v4();
    assert_eq!(
        ledger
            .record_revenue_share(event(unbound, "inv-1", 10_000))
            .await
            .unwrap(),
        LedgerOutcome::NoReseller
    );

    let tenant = Uuid::new_v4();
    bind(&h, tenant, 1).await;
    assert_eq!(
        ledger
            .record_revenue_share(event(tenant, "inv-2", 0))
            .await
            .unwrap(),
        LedgerOutcome::InvalidAmount
    );
    assert_eq!(
        ledger
            .record_revenue_share(event(tenant, "inv-3", -100))
            .await
            .unwrap(),
        LedgerOutcome::InvalidAmount
    );
    // 49 cents at 0.01% rounds to zero.
    assert_eq!(
        ledger
            .record_revenue_share(event(tenant, "inv-4", 49))
            .await
            .unwrap(),
        LedgerOutcome::InvalidCommission
    );

    assert_eq!(rows_for(&h.db, unbound).await, 0);
    assert_eq!(rows_for(&h.db, tenant).await, 0);
    assert!(h.audit.actions().is_empty());
}

#[tokio::test]
async fn malformed_events_are_validation_errors() {
    let h = harness().await;
    let tenant = Uuid::new_v4();
    bind(&h, tenant, 1_000).await;
    let ledger = h.module.ledger();

    let err = ledger
        .record_revenue_share(event(tenant, "   ", 1_000))
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation { ref field, .. } if field == "invoice_id"));

    let mut inverted = event(tenant, "inv-x", 1_000);
    std::mem::swap(&mut inverted.period_start, &mut inverted.period_end);
    let err = ledger.record_revenue_share(inverted).await.unwrap_err();
    assert!(matches!(err, LedgerError::Validation { ref field, .. } if field == "period_end"));
}

#[tokio::test]
async fn rebinding_changes_the_rate_for_later_invoices() {
    let h = harness().await;
    let tenant = Uuid::new_v4();
    bind(&h, tenant, 1_000).await;
    let new_reseller = bind(&h, tenant, 2_500).await;
    let ledger = h.module.ledger();

    let LedgerOutcome::Created(r) = ledger
        .record_revenue_share(event(tenant, "inv-after", 10_000))
        .await
        .unwrap()
    else {
        panic!("expected Created");
    };
    assert_eq!(r.reseller_id, new_reseller);
    assert_eq!(r.commission_cents, 2_500);
    assert_eq!(r.commission_rate_bps, 2_500);
}

#[tokio::test]
async fn rate_outside_range_is_refused() {
    let h = harness().await;
    let svc = h.module.service();
    for bps in [0, -5, 10_001] {
        let err = svc
            .bind_reseller(Uuid::new_v4(), Uuid::new_v4(), bps)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("commission_rate_bps"));
    }
}

#[tokio::test]
async fn payout_settles_once() {
    let h = harness().await;
    let tenant = Uuid::new_v4();
    bind(&h, tenant, 2_000).await;
    let ledger = h.module.ledger();
    let LedgerOutcome::Created(record) = ledger
        .record_revenue_share(event(tenant, "inv-pay", 10_000))
        .await
        .unwrap()
    else {
        panic!("expected Created");
    };

    let applied = ledger
        .transition_payout(record.id, PayoutStatus::Paid)
        .await
        .unwrap();
    assert!(matches!(applied, PayoutTransitionOutcome::Applied(_)));
    assert_eq!(applied.record().payout_status, PayoutStatus::Paid);
    assert!(applied.record().settled_at.is_some());

    let replay = ledger
        .transition_payout(record.id, PayoutStatus::Paid)
        .await
        .unwrap();
    assert!(matches!(replay, PayoutTransitionOutcome::AlreadyApplied(_)));
    assert_eq!(replay.record().settled_at, applied.record().settled_at);

    let conflict = ledger
        .transition_payout(record.id, PayoutStatus::Failed)
        .await
        .unwrap_err();
    assert!(matches!(conflict, LedgerError::Conflict(_)));

    let back = ledger
        .transition_payout(record.id, PayoutStatus::Pending)
        .await
        .unwrap_err();
    assert!(matches!(back, LedgerError::Validation { .. }));

    assert_eq!(
        h.audit.actions(),
        vec![
            "revenue_share.created".to_owned(),
            "revenue_share.paid".to_owned(),
        ]
    );
}

#[tokio::test]
async fn unknown_record_is_not_found() {
    let h = harness().await;
    let ledger = h.module.ledger();
    assert_eq!(
        ledger
            .transition_payout(Uuid::new_v4(), PayoutStatus::Failed)
            .await
            .unwrap_err(),
        LedgerError::NotFound
    );
    assert_eq!(
        ledger.get_record(Uuid::new_v4()).await.unwrap_err(),
        LedgerError::NotFound
    );
}

#[tokio::test]
async fn listing_is_per_tenant() {
    let h = harness().await;
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    bind(&h, a, 1_000).await;
    bind(&h, b, 1_000).await;
    let ledger = h.module.ledger();
    for invoice in ["a-1", "a-2"] {
        ledger
            .record_revenue_share(event(a, invoice, 1_000))
            .await
            .unwrap();
    }
    ledger
        .record_revenue_share(event(b, "b-1", 1_000))
        .await
        .unwrap();

    let listed = ledger.list_for_tenant(a).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|r| r.tenant_id == a));
}

#[tokio::test]
async fn storage_outage_is_an_infra_error() {
    let h = harness().await;
    let tenant = Uuid::new_v4();
    bind(&h, tenant, 1_000).await;
    let ledger = h.module.ledger();

    h.db.clone().close().await.unwrap();

    let err = ledger
        .record_revenue_share(event(tenant, "inv-down", 1_000))
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Infra(_)));
    assert!(h.audit.actions().is_empty());
}

#[tokio::test]
async fn stored_rate_above_whole_is_rejected() {
    let h = harness().await;
    let tenant = Uuid::new_v4();
    // Written straight to storage, past the bind_reseller range check.
    SeaOrmLedgerRepository::new(h.db.clone())
        .upsert_reseller_binding(&ResellerBinding {
            tenant_id: tenant,
            reseller_id: Uuid::new_v4(),
            commission_rate_bps: 10_001,
            active: true,
        })
        .await
        .unwrap();

    let outcome = h
        .module
        .ledger()
        .record_revenue_share(event(tenant, "inv-over", 100))
        .await
        .unwrap();
    assert_eq!(outcome, LedgerOutcome::InvalidCommission);
    assert_eq!(rows_for(&h.db, tenant).await, 0);
}

#[tokio::test]
async fn stalled_audit_sink_does_not_hold_the_reply() {
    let db = inmem_db().await;
    let config = RevenueLedgerConfig {
        audit_timeout_ms: 50,
        ..RevenueLedgerConfig::default()
    };
    let module = RevenueLedgerModule::new(&config, db.clone(), Arc::new(StalledSink));
    let tenant = Uuid::new_v4();
    module
        .service()
        .bind_reseller(tenant, Uuid::new_v4(), 1_000)
        .await
        .unwrap();
    let ledger = module.ledger();

    let started = Instant::now();
    let LedgerOutcome::Created(record) = ledger
        .record_revenue_share(event(tenant, "inv-slow-audit", 10_000))
        .await
        .unwrap()
    else {
        panic!("expected Created");
    };
    let settled = ledger
        .transition_payout(record.id, PayoutStatus::Paid)
        .await
        .unwrap();

    assert!(matches!(settled, PayoutTransitionOutcome::Applied(_)));
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(rows_for(&db, tenant).await, 1);
}
