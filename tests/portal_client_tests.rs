//! Drives the HTTP client and the cached services against a local backend.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::get,
};
use portal_lookup::LookupError;
use portal_lookup::clients::{LookupSource, PortalClient};
use portal_lookup::clock::{Clock, ManualClock};
use portal_lookup::config::ApiConfig;
use portal_lookup::domain::{LookupDomain, LookupId};
use portal_lookup::services::LookupServices;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Default)]
struct Backend {
    time_slot_hits: AtomicUsize,
    plan_type_hits: AtomicUsize,
}

async fn time_slots(State(backend): State<Arc<Backend>>) -> Json<Value> {
    backend.time_slot_hits.fetch_add(1, Ordering::SeqCst);
    Json(json!([
        {"id": 1, "type": "TimeSlot", "code": "Slot1", "name": "09:00", "isActive": true},
        {"id": 2, "type": "TimeSlot", "code": "Slot2", "name": "13:30:00", "isActive": true},
        {"id": 3, "type": "TimeSlot", "code": "Slot3", "name": "23:30", "isActive": true},
        {"id": 4, "type": "TimeSlot", "code": "Slot4", "name": "07:00", "isActive": false}
    ]))
}

async fn plan_types(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    backend.plan_type_hits.fetch_add(1, Ordering::SeqCst);
    let authorized = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        == Some("Bearer test-token");
    if !authorized {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(json!({"data": [
        {"id": 20, "type": "PlanType", "code": "OneTime", "name": "One-time", "isActive": true},
        {"id": 21, "type": "PlanType", "code": "Monthly", "name": "Monthly", "isActive": false}
    ]})))
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable")
}

async fn garbage() -> &'static str {
    "<html>not json</html>"
}

async fn spawn_backend() -> (Arc<Backend>, String) {
    let backend = Arc::new(Backend::default());
    let app = Router::new()
        .route("/api/lookups/time-slots", get(time_slots))
        .route("/api/lookups/plan-types", get(plan_types))
        .route("/api/lookups/broken", get(broken))
        .route("/api/lookups/garbage", get(garbage))
        .with_state(Arc::clone(&backend));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("no local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server failed");
    });

    (backend, format!("http://{addr}/api/"))
}

fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        token: Some("test-token".to_string()),
        request_timeout_seconds: 5,
        ..ApiConfig::default()
    }
}

fn services(config: &ApiConfig, clock: &Arc<ManualClock>) -> LookupServices {
    let client = PortalClient::from_config(config).expect("client");
    LookupServices::new(
        Arc::new(client),
        Duration::from_secs(300),
        Arc::clone(clock) as Arc<dyn Clock>,
    )
}

#[tokio::test]
async fn time_slots_are_fetched_once_within_ttl() {
    let (backend, base_url) = spawn_backend().await;
    let clock = Arc::new(ManualClock::new(0));
    let services = services(&api_config(&base_url), &clock);

    let slots = services.time_slots.get_all().await.unwrap();
    assert_eq!(slots.len(), 3);
    assert_eq!(slots[0].display_time(), "9h - 10h30");
    assert_eq!(slots[1].start_time(), "13:30");
    assert_eq!(slots[1].display_time(), "13h30 - 15h");
    assert_eq!(slots[2].end_time(), "01:00");

    clock.advance(Duration::from_secs(120));
    let map = services.time_slots.get_as_map().await.unwrap();
    assert!(map.contains_key("Slot3"));
    assert!(!map.contains_key("Slot4"));
    assert_eq!(backend.time_slot_hits.load(Ordering::SeqCst), 1);

    services.time_slots.clear_cache().await;
    services.time_slots.get_all().await.unwrap();
    assert_eq!(backend.time_slot_hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn plan_type_id_resolves_with_bearer_token() {
    let (backend, base_url) = spawn_backend().await;
    let clock = Arc::new(ManualClock::new(0));
    let services = services(&api_config(&base_url), &clock);

    let id = services
        .plan_types
        .get_plan_type_id("unknown_plan")
        .await
        .unwrap();
    assert_eq!(id, LookupId::new(20));

    let err = services
        .plan_types
        .get_plan_type_id("monthly")
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::MissingMapping { ref code } if code == "Monthly"));
    assert_eq!(backend.plan_type_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_token_surfaces_status_error() {
    let (_, base_url) = spawn_backend().await;
    let config = ApiConfig {
        token: None,
        ..api_config(&base_url)
    };
    let client = PortalClient::from_config(&config).unwrap();

    let err = client
        .fetch_rows(LookupDomain::PlanTypes)
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::Status { status: 401, .. }));
}

#[tokio::test]
async fn server_error_is_propagated_with_body() {
    let (_, base_url) = spawn_backend().await;
    let config = ApiConfig {
        time_slots_path: "lookups/broken".to_string(),
        ..api_config(&base_url)
    };
    let clock = Arc::new(ManualClock::new(0));
    let services = services(&config, &clock);

    let err = services.time_slots.get_all().await.unwrap_err();
    match err {
        LookupError::Status { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "database unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn non_json_body_is_a_decode_error() {
    let (_, base_url) = spawn_backend().await;
    let config = ApiConfig {
        plan_types_path: "lookups/garbage".to_string(),
        ..api_config(&base_url)
    };
    let client = PortalClient::from_config(&config).unwrap();

    let err = client
        .fetch_rows(LookupDomain::PlanTypes)
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::Decode { .. }));
    assert!(err.is_transport());
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = PortalClient::from_config(&api_config(&format!("http://{addr}/api/"))).unwrap();
    let err = client
        .fetch_rows(LookupDomain::TimeSlots)
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::Transport { .. }));
}

#[tokio::test]
async fn concurrent_first_loads_both_hit_the_backend() {
    let (backend, base_url) = spawn_backend().await;
    let clock = Arc::new(ManualClock::new(0));
    let services = services(&api_config(&base_url), &clock);

    let (a, b) = tokio::join!(
        services.time_slots.get_all(),
        services.time_slots.get_all()
    );
    assert!(a.is_ok() && b.is_ok());
    assert_eq!(backend.time_slot_hits.load(Ordering::SeqCst), 2);
}
