#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use axum_test::TestServer;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use click_service::domain::click_event::ClickEvent;
use click_service::domain::entities::{ClickStats, DailyClickStats};
use click_service::domain::repositories::{
    ClickStore, Destination, DestinationRegistry, RegistryError, StoreError,
};
use click_service::infrastructure::persistence::MemoryClickStore;
use click_service::routes::router;
use click_service::state::AppState;
use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::Layer;

pub const PEER_ADDR: &str = "127.0.0.1:12345";

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = PEER_ADDR.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

/// How the stub registry answers a destination lookup.
#[derive(Clone)]
pub enum StubAnswer {
    Found(Destination),
    Fail,
}

/// In-process registry with canned answers and call counters.
#[derive(Default)]
pub struct StubRegistry {
    answers: HashMap<String, StubAnswer>,
    default_redirect: Option<String>,
    default_redirect_fails: bool,
    pub destination_calls: AtomicUsize,
    pub default_redirect_calls: AtomicUsize,
}

impl StubRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(mut self, id: &str, url: &str) -> Self {
        self.answers.insert(
            id.to_string(),
            StubAnswer::Found(Destination {
                url: url.to_string(),
                active: true,
            }),
        );
        self
    }

    pub fn inactive(mut self, id: &str, url: &str) -> Self {
        self.answers.insert(
            id.to_string(),
            StubAnswer::Found(Destination {
                url: url.to_string(),
                active: false,
            }),
        );
        self
    }

    pub fn failing(mut self, id: &str) -> Self {
        self.answers.insert(id.to_string(), StubAnswer::Fail);
        self
    }

    pub fn with_default_redirect(mut self, url: &str) -> Self {
        self.default_redirect = Some(url.to_string());
        self
    }

    pub fn with_failing_default_redirect(mut self) -> Self {
        self.default_redirect_fails = true;
        self
    }
}

#[async_trait]
impl DestinationRegistry for StubRegistry {
    async fn fetch_destination(&self, qr_code_id: &str) -> Result<Destination, RegistryError> {
        self.destination_calls.fetch_add(1, Ordering::SeqCst);
        match self.answers.get(qr_code_id) {
            Some(StubAnswer::Found(destination)) => Ok(destination.clone()),
            Some(StubAnswer::Fail) => Err(RegistryError::UnexpectedStatus(503)),
            None => Err(RegistryError::NotFound),
        }
    }

    async fn fetch_default_redirect(&self) -> Result<Option<String>, RegistryError> {
        self.default_redirect_calls.fetch_add(1, Ordering::SeqCst);
        if self.default_redirect_fails {
            return Err(RegistryError::Timeout);
        }
        Ok(self.default_redirect.clone())
    }
}

/// Memory store that also keeps every event it was handed.
#[derive(Default)]
pub struct CapturingStore {
    inner: MemoryClickStore,
    events: Mutex<Vec<ClickEvent>>,
}

impl CapturingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ClickEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClickStore for CapturingStore {
    async fn record_click(&self, event: &ClickEvent) -> Result<(), StoreError> {
        self.events.lock().unwrap().push(event.clone());
        self.inner.record_click(event).await
    }

    async fn get_stats(&self, qr_code_id: &str) -> Result<ClickStats, StoreError> {
        self.inner.get_stats(qr_code_id).await
    }

    async fn get_daily(
        &self,
        qr_code_id: &str,
        day: NaiveDate,
    ) -> Result<DailyClickStats, StoreError> {
        self.inner.get_daily(qr_code_id, day).await
    }

    async fn get_daily_batch(
        &self,
        qr_code_id: &str,
        days: &[NaiveDate],
    ) -> Result<BTreeMap<String, DailyClickStats>, StoreError> {
        self.inner.get_daily_batch(qr_code_id, days).await
    }

    fn backend(&self) -> &'static str {
        self.inner.backend()
    }
}

/// Store whose every call fails with a database error.
pub struct BrokenStore;

#[async_trait]
impl ClickStore for BrokenStore {
    async fn record_click(&self, _event: &ClickEvent) -> Result<(), StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn get_stats(&self, _qr_code_id: &str) -> Result<ClickStats, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn get_daily(
        &self,
        _qr_code_id: &str,
        _day: NaiveDate,
    ) -> Result<DailyClickStats, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn get_daily_batch(
        &self,
        _qr_code_id: &str,
        _days: &[NaiveDate],
    ) -> Result<BTreeMap<String, DailyClickStats>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    fn backend(&self) -> &'static str {
        "broken"
    }
}

/// Store whose writes never complete; reads report nothing recorded.
pub struct HangingStore;

#[async_trait]
impl ClickStore for HangingStore {
    async fn record_click(&self, _event: &ClickEvent) -> Result<(), StoreError> {
        std::future::pending().await
    }

    async fn get_stats(&self, _qr_code_id: &str) -> Result<ClickStats, StoreError> {
        Err(StoreError::NotFound)
    }

    async fn get_daily(
        &self,
        _qr_code_id: &str,
        _day: NaiveDate,
    ) -> Result<DailyClickStats, StoreError> {
        Err(StoreError::NotFound)
    }

    async fn get_daily_batch(
        &self,
        _qr_code_id: &str,
        _days: &[NaiveDate],
    ) -> Result<BTreeMap<String, DailyClickStats>, StoreError> {
        Ok(BTreeMap::new())
    }

    fn backend(&self) -> &'static str {
        "hanging"
    }
}

pub fn test_server(store: Arc<dyn ClickStore>, registry: Arc<dyn DestinationRegistry>) -> TestServer {
    test_server_with_cors(store, registry, &[])
}

pub fn test_server_with_cors(
    store: Arc<dyn ClickStore>,
    registry: Arc<dyn DestinationRegistry>,
    cors_origins: &[String],
) -> TestServer {
    let state = AppState::new(store, registry);
    let app = router(state, cors_origins).layer(MockConnectInfoLayer);
    TestServer::new(app).unwrap()
}

/// A click for `qr_code_id` at the given UTC instant.
pub fn click_at(qr_code_id: &str, at: DateTime<Utc>, country: Option<&str>) -> ClickEvent {
    ClickEvent {
        country: country.map(String::from),
        ..ClickEvent::new(qr_code_id, "https://example.com/landing", at)
    }
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

/// Polls until `qr_code_id` has `expected` clicks, giving up after ~2s.
pub async fn wait_for_total(store: &dyn ClickStore, qr_code_id: &str, expected: i64) -> bool {
    for _ in 0..200 {
        if let Ok(stats) = store.get_stats(qr_code_id).await
            && stats.total == expected
        {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
