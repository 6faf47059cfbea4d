mod common;

use click_service::domain::repositories::ClickStore;
use click_service::infrastructure::persistence::MemoryClickStore;
use common::{BrokenStore, StubRegistry, click_at, test_server, test_server_with_cors, utc};
use serde_json::Value;
use std::sync::Arc;

/// qr-1 on 2026-01-01: two clicks at 00h, five at 13h; one click on 2026-01-03.
async fn seeded_store() -> Arc<MemoryClickStore> {
    let store = Arc::new(MemoryClickStore::new());

    for minute in [5, 40] {
        store
            .record_click(&click_at("qr-1", utc(2026, 1, 1, 0, minute, 0), Some("DE")))
            .await
            .unwrap();
    }
    for minute in 0..5 {
        store
            .record_click(&click_at("qr-1", utc(2026, 1, 1, 13, minute, 0), Some("US")))
            .await
            .unwrap();
    }
    store
        .record_click(&click_at("qr-1", utc(2026, 1, 3, 9, 0, 0), None))
        .await
        .unwrap();

    store
}

#[tokio::test]
async fn test_daily_counters() {
    let server = test_server(seeded_store().await, Arc::new(StubRegistry::new()));

    let response = server
        .get("/api/clicks/daily")
        .add_query_param("qrId", "qr-1")
        .add_query_param("day", "2026-01-01")
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["qrCodeId"], "qr-1");
    assert_eq!(json["dayIso"], "2026-01-01");
    assert_eq!(json["total"], 7);
    assert_eq!(json["hour00"], 2);
    assert_eq!(json["hour13"], 5);
    assert_eq!(json["hour12"], 0);
    assert_eq!(json["regionCounts"]["DE"], 2);
    assert_eq!(json["regionCounts"]["US"], 5);
    assert_eq!(json["lastAtIso"], "2026-01-01T13:04:00Z");
    assert_eq!(json["lastCountry"], "US");

    let hours_sum: i64 = (0..24)
        .map(|h| json[format!("hour{h:02}")].as_i64().unwrap())
        .sum();
    assert_eq!(hours_sum, 7);
}

#[tokio::test]
async fn test_daily_accepts_date_alias() {
    let server = test_server(seeded_store().await, Arc::new(StubRegistry::new()));

    let response = server
        .get("/api/clicks/daily")
        .add_query_param("qrId", "qr-1")
        .add_query_param("date", "2026-01-03")
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["total"], 1);
    assert_eq!(json["hour09"], 1);
    assert!(json.get("regionCounts").is_none());
    assert!(json.get("lastCountry").is_none());
}

#[tokio::test]
async fn test_daily_without_clicks_is_not_found() {
    let server = test_server(seeded_store().await, Arc::new(StubRegistry::new()));

    let response = server
        .get("/api/clicks/daily")
        .add_query_param("qrId", "qr-1")
        .add_query_param("day", "2026-01-02")
        .await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(response.json::<Value>()["error"], "not_found");
}

#[tokio::test]
async fn test_daily_rejects_malformed_day() {
    let server = test_server(seeded_store().await, Arc::new(StubRegistry::new()));

    for day in ["2026-1-1", "01/01/2026", "2026-02-30", "yesterday"] {
        let response = server
            .get("/api/clicks/daily")
            .add_query_param("qrId", "qr-1")
            .add_query_param("day", day)
            .await;

        assert_eq!(response.status_code(), 400, "day={day}");
        assert_eq!(response.json::<Value>()["error"], "day_invalid");
    }
}

#[tokio::test]
async fn test_missing_qr_id() {
    let server = test_server(seeded_store().await, Arc::new(StubRegistry::new()));

    for path in [
        "/api/clicks/stats",
        "/api/clicks/daily",
        "/api/clicks/daily-batch",
    ] {
        let response = server.get(path).add_query_param("qrId", "  ").await;

        assert_eq!(response.status_code(), 400, "{path}");
        assert_eq!(response.json::<Value>()["error"], "qrId_required");
    }
}

#[tokio::test]
async fn test_stats() {
    let server = test_server(seeded_store().await, Arc::new(StubRegistry::new()));

    let response = server
        .get("/api/clicks/stats")
        .add_query_param("qrId", "qr-1")
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["qrCodeId"], "qr-1");
    assert_eq!(json["total"], 8);
    assert_eq!(json["lastAtIso"], "2026-01-03T09:00:00Z");
    assert!(json.get("lastCountry").is_none());
}

#[tokio::test]
async fn test_repeated_parameters_use_first_value() {
    let server = test_server(seeded_store().await, Arc::new(StubRegistry::new()));

    let stats = server
        .get("/api/clicks/stats")
        .add_query_param("qrId", "qr-1")
        .add_query_param("qrId", "qr-unknown")
        .await;

    stats.assert_status_ok();
    assert_eq!(stats.json::<Value>()["qrCodeId"], "qr-1");

    let daily = server
        .get("/api/clicks/daily")
        .add_query_param("qrId", "qr-1")
        .add_query_param("day", "2026-01-03")
        .add_query_param("day", "2026-01-01")
        .await;

    daily.assert_status_ok();
    assert_eq!(daily.json::<Value>()["dayIso"], "2026-01-03");

    let batch = server
        .get("/api/clicks/qr-1/daily-batch")
        .add_query_param("days", "2026-01-01")
        .add_query_param("days", "bad-date")
        .await;

    batch.assert_status_ok();
    assert_eq!(batch.json::<Value>().as_object().unwrap().len(), 1);
}

#[tokio::test]
async fn test_stats_unknown_identifier() {
    let server = test_server(seeded_store().await, Arc::new(StubRegistry::new()));

    let response = server
        .get("/api/clicks/stats")
        .add_query_param("qrId", "qr-unknown")
        .await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(response.json::<Value>()["error"], "not_found");
}

#[tokio::test]
async fn test_daily_batch_omits_days_without_clicks() {
    let server = test_server(seeded_store().await, Arc::new(StubRegistry::new()));

    let response = server
        .get("/api/clicks/daily-batch")
        .add_query_param("qrId", "qr-1")
        .add_query_param("days", "2026-01-01, 2026-01-02,2026-01-03")
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    let days = json.as_object().unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(json["2026-01-01"]["total"], 7);
    assert_eq!(json["2026-01-03"]["total"], 1);
    assert!(json.get("2026-01-02").is_none());
}

#[tokio::test]
async fn test_daily_batch_single_day_with_data() {
    let server = test_server(seeded_store().await, Arc::new(StubRegistry::new()));

    let response = server
        .get("/api/clicks/daily-batch")
        .add_query_param("qrId", "qr-1")
        .add_query_param("days", "2026-01-01,2026-01-02,2026-01-04")
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json.as_object().unwrap().len(), 1);
    assert_eq!(json["2026-01-01"]["hour00"], 2);
    assert_eq!(json["2026-01-01"]["hour13"], 5);
    assert_eq!(json["2026-01-01"]["total"], 7);
}

#[tokio::test]
async fn test_daily_batch_validation() {
    let server = test_server(seeded_store().await, Arc::new(StubRegistry::new()));

    let cases = [
        (None, "days_required"),
        (Some(""), "days_required"),
        (Some("2026-01-01,bad-date"), "invalid_day_format"),
        (Some(" , ,"), "no_valid_days"),
    ];

    for (days, code) in cases {
        let mut request = server
            .get("/api/clicks/daily-batch")
            .add_query_param("qrId", "qr-1");
        if let Some(days) = days {
            request = request.add_query_param("days", days);
        }

        let response = request.await;

        assert_eq!(response.status_code(), 400, "days={days:?}");
        assert_eq!(response.json::<Value>()["error"], code);
    }
}

#[tokio::test]
async fn test_path_form_routes() {
    let server = test_server(seeded_store().await, Arc::new(StubRegistry::new()));

    let stats = server.get("/api/clicks/qr-1").await;
    stats.assert_status_ok();
    assert_eq!(stats.json::<Value>()["total"], 8);

    let daily = server
        .get("/api/clicks/qr-1/daily")
        .add_query_param("day", "2026-01-01")
        .await;
    daily.assert_status_ok();
    assert_eq!(daily.json::<Value>()["hour13"], 5);

    let batch = server
        .get("/api/clicks/qr-1/daily-batch")
        .add_query_param("days", "2026-01-01,2026-01-03")
        .await;
    batch.assert_status_ok();
    assert_eq!(batch.json::<Value>().as_object().unwrap().len(), 2);
}

#[tokio::test]
async fn test_store_failures_use_operation_codes() {
    let server = test_server(Arc::new(BrokenStore), Arc::new(StubRegistry::new()));

    let stats = server
        .get("/api/clicks/stats")
        .add_query_param("qrId", "qr-1")
        .await;
    assert_eq!(stats.status_code(), 500);
    assert_eq!(stats.json::<Value>()["error"], "stats_failed");

    let daily = server
        .get("/api/clicks/daily")
        .add_query_param("qrId", "qr-1")
        .add_query_param("day", "2026-01-01")
        .await;
    assert_eq!(daily.status_code(), 500);
    assert_eq!(daily.json::<Value>()["error"], "daily_failed");

    let batch = server
        .get("/api/clicks/daily-batch")
        .add_query_param("qrId", "qr-1")
        .add_query_param("days", "2026-01-01")
        .await;
    assert_eq!(batch.status_code(), 500);
    assert_eq!(batch.json::<Value>()["error"], "batch_failed");
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let origins = vec!["http://localhost:5173".to_string()];
    let server = test_server_with_cors(
        seeded_store().await,
        Arc::new(StubRegistry::new()),
        &origins,
    );

    let allowed = server
        .get("/api/clicks/stats")
        .add_query_param("qrId", "qr-1")
        .add_header("origin", "http://localhost:5173")
        .await;
    allowed.assert_status_ok();
    assert_eq!(
        allowed.header("access-control-allow-origin"),
        "http://localhost:5173"
    );

    let other = server
        .get("/api/clicks/stats")
        .add_query_param("qrId", "qr-1")
        .add_header("origin", "https://evil.example.com")
        .await;
    assert!(other.maybe_header("access-control-allow-origin").is_none());
}
