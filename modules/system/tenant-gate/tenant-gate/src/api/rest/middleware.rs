//! Axum middleware running the access gate in front of every route.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use http::{HeaderMap, header};
use platform_audit::{AuditEntry, AuditSink, record_best_effort};
use serde_json::json;
use tenant_gate_sdk::{AccessDecision, AccessGateClient, GateOutcome, InboundRequest};

use super::responses::{RedirectTargets, decision_response};

/// Shared state for [`access_gate_middleware`].
#[derive(Clone)]
pub struct GateState {
    pub gate: Arc<dyn AccessGateClient>,
    pub audit: Arc<dyn AuditSink>,
    pub cookie_name: Arc<str>,
    pub targets: Arc<RedirectTargets>,
}

/// Gate every request.
///
/// On `Allow` the [`GateOutcome`] is inserted into request extensions so
/// handlers receive the tenant and principal explicitly. Any other decision
/// is rendered without calling the inner service.
pub async fn access_gate_middleware(
    State(state): State<GateState>,
    mut req: Request,
    next: Next,
) -> Response {
    let inbound = InboundRequest {
        host: extract_host(&req),
        path: req.uri().path().to_owned(),
        method: req.method().to_string(),
        session_token: extract_session_token(req.headers(), &state.cookie_name),
    };

    let outcome = state.gate.decide(&inbound).await;
    if outcome.decision.is_allow() {
        req.extensions_mut().insert(outcome);
        return next.run(req).await;
    }

    if outcome.decision == AccessDecision::Forbidden {
        audit_forbidden(&state, &inbound, &outcome);
    }

    let original = req
        .uri()
        .path_and_query()
        .map_or_else(|| inbound.path.clone(), ToString::to_string);
    decision_response(outcome.decision, &original, &state.targets)
}

/// Fire-and-forget; the response never waits on the audit sink.
fn audit_forbidden(state: &GateState, inbound: &InboundRequest, outcome: &GateOutcome) {
    let entry = AuditEntry::new("gate.forbidden", "route")
        .tenant(outcome.tenant.as_ref().and_then(|t| t.tenant_id))
        .actor(outcome.principal.as_ref().map(|p| p.user_id))
        .metadata(json!({
            "method": inbound.method,
            "path": inbound.path,
            "role": outcome.principal.as_ref().map(|p| p.role.as_str()),
        }));
    let audit = Arc::clone(&state.audit);
    tokio::spawn(async move {
        record_best_effort(audit.as_ref(), entry).await;
    });
}

fn extract_host(req: &Request) -> String {
    req.headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .or_else(|| req.uri().authority().map(ToString::to_string))
        .unwrap_or_default()
}

/// Bearer header first, then the session cookie.
fn extract_session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_owned());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.trim().to_owned())
        .filter(|t| !t.is_empty())
}
