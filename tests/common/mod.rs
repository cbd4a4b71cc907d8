//! Shared mock collaborators for pipeline, loop, and lifecycle tests.
//!
//! Mocks record every call with atomic counters / locked vectors so tests can
//! assert exact call counts and ordering without a broker, database, or
//! cache behind them.

#![allow(dead_code)] // each integration test crate uses a subset

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio_util::sync::CancellationToken;

use order_consumer::cache::OrderCache;
use order_consumer::consumer::EventStream;
use order_consumer::lifecycle::Component;
use order_consumer::store::OrderStore;
use order_consumer::{ConsumerError, Order, Result};

pub fn sample_order(id: i64) -> Order {
    Order {
        id,
        user_id: 7,
        product_name: "pen".to_string(),
        quantity: 3,
        price: 1.5,
        total_price: 4.5,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn encoded(order: &Order) -> Vec<u8> {
    serde_json::to_vec(order).expect("order serializes")
}

/// Poll `cond` until it holds or a 5 second deadline passes.
pub async fn wait_until(cond: impl Fn() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !cond() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("condition not met within deadline");
}

/// Order store that records every save call, optionally failing configured
/// ids and optionally sleeping to simulate a slow round trip.
#[derive(Default)]
pub struct MockStore {
    calls: Mutex<Vec<i64>>,
    fail_ids: HashSet<i64>,
    delay: Option<Duration>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            fail_ids: ids.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    /// Ids of every save call received, failures included.
    pub fn calls(&self) -> Vec<i64> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl OrderStore for MockStore {
    async fn save_order(&self, order: &Order) -> Result<()> {
        self.calls.lock().unwrap().push(order.id);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_ids.contains(&order.id) {
            return Err(ConsumerError::Store(format!(
                "simulated insert failure for order {}",
                order.id
            )));
        }
        Ok(())
    }
}

/// Order cache that records the key of every save call.
#[derive(Default)]
pub struct MockCache {
    keys: Mutex<Vec<String>>,
    fail_ids: HashSet<i64>,
}

impl MockCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            fail_ids: ids.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.keys.lock().unwrap().len()
    }
}

#[async_trait]
impl OrderCache for MockCache {
    async fn save_order(&self, order: &Order) -> Result<()> {
        self.keys.lock().unwrap().push(order.cache_key());
        if self.fail_ids.contains(&order.id) {
            return Err(ConsumerError::Cache(format!(
                "simulated cache failure for order {}",
                order.id
            )));
        }
        Ok(())
    }
}

/// Event stream that yields a scripted sequence of results, then blocks
/// forever - mirroring a quiet topic waiting for new data.
pub struct ScriptedStream {
    events: Mutex<VecDeque<Result<Vec<u8>>>>,
}

impl ScriptedStream {
    pub fn new(events: impl IntoIterator<Item = Result<Vec<u8>>>) -> Self {
        Self {
            events: Mutex::new(events.into_iter().collect()),
        }
    }

    pub fn empty() -> Self {
        Self::new([])
    }
}

#[async_trait]
impl EventStream for ScriptedStream {
    async fn next_event(&self) -> Result<Vec<u8>> {
        let next = self.events.lock().unwrap().pop_front();
        match next {
            Some(result) => result,
            None => std::future::pending().await,
        }
    }
}

/// Lifecycle component that appends `phase:name` markers to a shared log,
/// with switchable init/stop failures.
pub struct RecordingComponent {
    name: &'static str,
    log: Arc<Mutex<Vec<String>>>,
    fail_init: bool,
    fail_stop: bool,
}

impl RecordingComponent {
    pub fn new(name: &'static str, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            name,
            log,
            fail_init: false,
            fail_stop: false,
        }
    }

    pub fn failing_init(name: &'static str, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            fail_init: true,
            ..Self::new(name, log)
        }
    }

    pub fn failing_stop(name: &'static str, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            fail_stop: true,
            ..Self::new(name, log)
        }
    }

    fn record(&self, phase: &str) {
        self.log.lock().unwrap().push(format!("{phase}:{}", self.name));
    }
}

#[async_trait]
impl Component for RecordingComponent {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn init(&self) -> Result<()> {
        self.record("init");
        if self.fail_init {
            return Err(ConsumerError::Lifecycle(format!(
                "simulated init failure in {}",
                self.name
            )));
        }
        Ok(())
    }

    async fn run(&self, _shutdown: CancellationToken) {
        self.record("run");
    }

    async fn stop(&self) -> Result<()> {
        self.record("stop");
        if self.fail_stop {
            return Err(ConsumerError::Lifecycle(format!(
                "simulated stop failure in {}",
                self.name
            )));
        }
        Ok(())
    }
}
