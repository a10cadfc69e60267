// Session state and the search lifecycle around it.
//
// `SessionState` is a plain immutable value replaced wholesale by each
// operation; `SearchSession` is the async facade the HTTP layer drives. The
// artificial settle delays of the original product are part of the contract:
// a result only becomes visible after its delay elapses, and a pending delay
// is cancelled when it is superseded or the session is torn down.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, RwLock};
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::config::Vocabulary;
use crate::models::{ResultView, VehicleRecord};
use crate::search::{compiler, engine, paginate};

pub const PAGE_SIZE: usize = 10;

// Minimum visible-loading duration after the catalog fetch resolves.
pub const INITIAL_SETTLE: Duration = Duration::from_secs(5);
// Delay between applying a filter and publishing its result.
pub const SEARCH_SETTLE: Duration = Duration::from_secs(7);
// Shorter delay for the no-recognizable-criteria short circuit.
pub const NO_CRITERIA_SETTLE: Duration = Duration::from_secs(1);

// The whole per-session state. Operations build a new value and swap it in;
// nothing mutates a state in place.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub catalog: Vec<VehicleRecord>,
    pub filtered: Vec<VehicleRecord>,
    pub page: usize,
}

impl SessionState {
    pub fn new(catalog: Vec<VehicleRecord>) -> Self {
        let filtered = catalog.clone();
        SessionState {
            catalog,
            filtered,
            page: 1,
        }
    }

    // A freshly published search result always lands on page 1.
    pub fn with_results(&self, filtered: Vec<VehicleRecord>) -> Self {
        SessionState {
            catalog: self.catalog.clone(),
            filtered,
            page: 1,
        }
    }

    /// Accepts the navigation only when `1 <= page <= total_pages`;
    /// otherwise returns the state unchanged (a no-op, not a clamp).
    pub fn go_to_page(&self, page: usize) -> Self {
        if paginate::accepts_page(page, self.total_pages()) {
            SessionState {
                page,
                ..self.clone()
            }
        } else {
            self.clone()
        }
    }

    // Clearing the query restores the full catalog; the current page is kept
    // (it is always still in range, since the result set only grows back).
    pub fn cleared(&self) -> Self {
        SessionState {
            catalog: self.catalog.clone(),
            filtered: self.catalog.clone(),
            page: self.page,
        }
    }

    pub fn total_pages(&self) -> usize {
        paginate::total_pages(self.filtered.len(), PAGE_SIZE)
    }

    pub fn view(&self) -> ResultView {
        ResultView {
            rows: paginate::page_window(&self.filtered, self.page, PAGE_SIZE).to_vec(),
            page: self.page,
            total_pages: self.total_pages(),
            total_rows: self.filtered.len(),
        }
    }
}

/// Outcome of a completed (not superseded) search.
#[derive(Debug, Clone, Copy)]
pub struct SearchOutcome {
    pub matched: usize,
}

#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct StatusFlags {
    pub loading: bool,
    pub in_progress: bool,
    pub has_results: bool,
}

pub struct SearchSession {
    vocabulary: Vocabulary,
    state: RwLock<SessionState>,
    // Skeleton flag: true from construction until the initial settle elapses,
    // and again while a search is pending.
    loading: AtomicBool,
    // Spinner flag: true only while a submitted search is pending.
    in_progress: AtomicBool,
    // Root token, cancelled on teardown; every delay races a child of it.
    shutdown: CancellationToken,
    // Token owned by the search currently in flight. Submitting a new search
    // cancels it and installs a fresh child, so a superseded publication can
    // never land.
    pending_search: Mutex<CancellationToken>,
}

impl SearchSession {
    pub fn new(catalog: Vec<VehicleRecord>, vocabulary: Vocabulary) -> Arc<Self> {
        let shutdown = CancellationToken::new();
        let pending_search = Mutex::new(shutdown.child_token());
        Arc::new(SearchSession {
            vocabulary,
            state: RwLock::new(SessionState::new(catalog)),
            loading: AtomicBool::new(true),
            in_progress: AtomicBool::new(false),
            shutdown,
            pending_search,
        })
    }

    /// Holds the loading state for the fixed minimum duration after the
    /// catalog fetch, then marks the session ready. Spawned once at startup.
    pub async fn settle_initial_load(&self) {
        if settle(INITIAL_SETTLE, &self.shutdown).await {
            self.loading.store(false, Ordering::SeqCst);
            tracing::info!("Initial load settled, results ready for display");
        }
    }

    /// Compiles and runs a search, publishing the result once the settle
    /// delay elapses.
    ///
    /// Returns `None` without performing any search for a blank query, and
    /// `None` without publishing when the search was superseded or the
    /// session torn down mid-delay.
    pub async fn submit_query(&self, query: &str) -> Option<SearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        // Cancel-and-replace whatever search is still pending.
        let token = {
            let mut pending = self.pending_search.lock().await;
            pending.cancel();
            *pending = self.shutdown.child_token();
            pending.clone()
        };

        self.loading.store(true, Ordering::SeqCst);
        self.in_progress.store(true, Ordering::SeqCst);

        // The page resets as soon as a query is submitted, not when it
        // settles.
        {
            let mut state = self.state.write().await;
            *state = SessionState {
                page: 1,
                ..state.clone()
            };
        }

        let compiled = compiler::compile(query, &self.vocabulary);
        let (filtered, delay) = match &compiled {
            Some(spec) => {
                tracing::info!(query, ?spec, "Query compiled");
                let catalog = self.state.read().await.catalog.clone();
                (engine::apply(&catalog, spec), SEARCH_SETTLE)
            }
            // A non-empty query with no recognizable criterion is defined to
            // match nothing; it still settles, just faster.
            None => {
                tracing::info!(query, "No recognizable criteria in query");
                (Vec::new(), NO_CRITERIA_SETTLE)
            }
        };

        if !settle(delay, &token).await {
            tracing::debug!(query, "Search superseded or session closed before settling");
            return None;
        }

        let matched = filtered.len();
        {
            let mut state = self.state.write().await;
            *state = state.with_results(filtered);
        }
        self.loading.store(false, Ordering::SeqCst);
        self.in_progress.store(false, Ordering::SeqCst);
        tracing::info!(query, matched, "Search settled");
        Some(SearchOutcome { matched })
    }

    /// Page navigation; out-of-range requests leave the state untouched.
    pub async fn go_to_page(&self, page: usize) -> ResultView {
        let mut state = self.state.write().await;
        *state = state.go_to_page(page);
        state.view()
    }

    /// Clears the active query and restores the full catalog. Any pending
    /// search is cancelled so it cannot overwrite the restored view.
    pub async fn reset(&self) -> ResultView {
        self.pending_search.lock().await.cancel();
        let mut state = self.state.write().await;
        *state = state.cleared();
        self.in_progress.store(false, Ordering::SeqCst);
        self.loading.store(false, Ordering::SeqCst);
        tracing::info!("Search reset, full catalog restored");
        state.view()
    }

    pub async fn view(&self) -> ResultView {
        self.state.read().await.view()
    }

    pub async fn status(&self) -> StatusFlags {
        StatusFlags {
            loading: self.loading.load(Ordering::SeqCst),
            in_progress: self.in_progress.load(Ordering::SeqCst),
            has_results: !self.state.read().await.filtered.is_empty(),
        }
    }

    /// Tears the session down: every pending settle is cancelled and will
    /// never publish. Also invoked on drop.
    pub fn close(&self) {
        self.shutdown.cancel();
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.close();
    }
}

// Waits out `delay` unless `cancel` fires first. True means the delay
// elapsed and the caller may publish.
async fn settle(delay: Duration, cancel: &CancellationToken) -> bool {
    tokio::select! {
        _ = cancel.cancelled() => false,
        _ = tokio::time::sleep(delay) => true,
    }
}
