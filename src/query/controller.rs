//! Debounced fetch lifecycle for the log table.
//!
//! Two states: Idle and Fetching. A fetch is issued whenever the canonical
//! query differs from the one behind the last issued fetch (including on
//! first submit with the default, unconstrained filter). Every outstanding
//! request carries the generation it was issued under; a completion whose
//! generation is no longer current is discarded silently, so the rows
//! visible at quiescence always belong to the last-issued query, not the
//! last-to-complete response.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::GatewayResult;
use crate::gateway::LogGateway;
use crate::models::{LogEntry, LogFilter, LogPage};
use crate::query::LogQuery;

/// Point-in-time view of the log table, replaced wholesale on every change.
#[derive(Debug, Clone, Default)]
pub struct LogViewSnapshot {
    pub rows: Vec<LogEntry>,
    pub total: u64,
    pub loading: bool,
}

/// 日志查询控制器
#[derive(Clone)]
pub struct LogQueryController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    gateway: Arc<dyn LogGateway>,
    state: Mutex<ControllerState>,
    snapshot_tx: watch::Sender<LogViewSnapshot>,
}

#[derive(Default)]
struct ControllerState {
    /// Query behind the last issued fetch; `None` until the first submit.
    current: Option<LogQuery>,
    /// Staleness tag: bumped on every issued fetch.
    generation: u64,
    loading: bool,
    rows: Vec<LogEntry>,
    total: u64,
}

impl LogQueryController {
    pub fn new(gateway: Arc<dyn LogGateway>) -> Self {
        let (snapshot_tx, _) = watch::channel(LogViewSnapshot::default());
        Self {
            inner: Arc::new(ControllerInner {
                gateway,
                state: Mutex::new(ControllerState::default()),
                snapshot_tx,
            }),
        }
    }

    /// Subscribe to whole-snapshot replacements.
    pub fn subscribe(&self) -> watch::Receiver<LogViewSnapshot> {
        self.inner.snapshot_tx.subscribe()
    }

    /// Current snapshot (rows from the last applied fetch).
    pub fn snapshot(&self) -> LogViewSnapshot {
        self.inner.snapshot_tx.borrow().clone()
    }

    /// Apply an edited filter.
    ///
    /// The canonical-query equality check is the debounce: snapshots that
    /// build the same query as the last issued fetch are ignored.
    pub fn submit(&self, filter: &LogFilter) {
        self.issue(LogQuery::from_filter(filter), false);
    }

    /// Re-issue the current query explicitly (manual refresh).
    pub fn refresh(&self) {
        let query = self
            .inner
            .state
            .lock()
            .current
            .clone()
            .unwrap_or_default();
        self.issue(query, true);
    }

    fn issue(&self, query: LogQuery, force: bool) {
        let generation = {
            let mut state = self.inner.state.lock();
            if !force && state.current.as_ref() == Some(&query) {
                return;
            }
            state.current = Some(query.clone());
            state.generation += 1;
            state.loading = true;
            state.generation
        };
        self.inner.publish();

        let controller = self.clone();
        tokio::spawn(async move {
            let result = controller.inner.gateway.fetch_logs(&query).await;
            controller.complete(generation, result);
        });
    }

    fn complete(&self, generation: u64, result: GatewayResult<LogPage>) {
        {
            let mut state = self.inner.state.lock();
            if generation != state.generation {
                debug!(
                    stale = generation,
                    current = state.generation,
                    "discarding stale log fetch response"
                );
                return;
            }

            state.loading = false;
            match result {
                Ok(page) => {
                    state.rows = page.content;
                    state.total = page.total_elements;
                }
                Err(err) => {
                    // Last-known-good rows stay in place; the user retries
                    // via a filter change or an explicit refresh.
                    warn!(error = %err, "log fetch failed, keeping previous rows");
                }
            }
        }
        self.inner.publish();
    }
}

impl ControllerInner {
    fn publish(&self) {
        let snapshot = {
            let state = self.state.lock();
            LogViewSnapshot {
                rows: state.rows.clone(),
                total: state.total,
                loading: state.loading,
            }
        };
        // send_replace: the stored value must advance even with no
        // subscribers, since snapshot() reads the channel.
        self.snapshot_tx.send_replace(snapshot);
    }
}
