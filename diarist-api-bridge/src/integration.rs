//! Background request worker
//!
//! Owns a worker thread running a tokio runtime. The UI sends commands over a
//! channel, every command becomes its own task, and results come back as
//! events that the UI drains on its poll timer. Controller state never leaves
//! the UI thread.

use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TrySendError};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::chat_session::ChatSession;
use crate::client::{HttpJournalApi, JournalApi};
use crate::config::ClientConfig;
use crate::data::{ChatReply, ChatRequest, DerivedLog, RequestId};
use crate::error::{ApiError, ApiResult};
use crate::log_panel::{LogFetch, LogPanel};

/// Max wait for the worker thread on drop
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

/// Commands sent from UI to the worker
#[derive(Debug, Clone)]
pub enum ApiCommand {
    Chat(ChatRequest),
    FetchLog(LogFetch),
}

/// Events sent from the worker to UI
#[derive(Debug, Clone)]
pub enum ApiEvent {
    ChatCompleted {
        id: RequestId,
        result: ApiResult<ChatReply>,
    },
    LogFetched {
        fetch: LogFetch,
        result: ApiResult<DerivedLog>,
    },
}

/// Request counters, readable from the UI thread
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub in_flight: usize,
    pub completed: u64,
    pub failed: u64,
}

/// What `route_events` changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteSummary {
    pub chat_changed: bool,
    pub panel_changed: bool,
    /// Log fetches issued because a chat turn saved a new entry
    pub refetches: usize,
}

impl RouteSummary {
    pub fn is_empty(&self) -> bool {
        !self.chat_changed && !self.panel_changed && self.refetches == 0
    }
}

pub struct ApiIntegration {
    running: Arc<AtomicBool>,
    stats: Arc<RwLock<WorkerStats>>,
    command_tx: Sender<ApiCommand>,
    event_rx: Receiver<ApiEvent>,
    worker_handle: Option<thread::JoinHandle<()>>,
    stop_tx: Option<Sender<()>>,
}

impl ApiIntegration {
    /// Start a worker talking HTTP to the configured backend
    pub fn new(config: &ClientConfig) -> Self {
        info!("Using backend at {}", config.api_base);
        Self::with_api(Arc::new(HttpJournalApi::new(config)))
    }

    /// Start a worker around any backend implementation
    pub fn with_api(api: Arc<dyn JournalApi>) -> Self {
        let (command_tx, command_rx) = bounded(100);
        let (event_tx, event_rx) = unbounded();
        let (stop_tx, stop_rx) = bounded(1);

        let running = Arc::new(AtomicBool::new(true));
        let running_clone = Arc::clone(&running);
        let stats = Arc::new(RwLock::new(WorkerStats::default()));
        let stats_clone = Arc::clone(&stats);

        let handle = thread::Builder::new()
            .name("diarist-api-worker".to_string())
            .spawn(move || {
                Self::run_worker(api, running_clone, stats_clone, command_rx, event_tx, stop_rx);
            });

        let worker_handle = match handle {
            Ok(handle) => Some(handle),
            Err(e) => {
                error!("Failed to spawn API worker thread: {}", e);
                running.store(false, Ordering::Release);
                None
            }
        };

        Self {
            running,
            stats,
            command_tx,
            event_rx,
            worker_handle,
            stop_tx: Some(stop_tx),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn stats(&self) -> WorkerStats {
        *self.stats.read()
    }

    /// Queue a command without blocking the caller
    pub fn send_command(&self, cmd: ApiCommand) -> ApiResult<()> {
        if !self.is_running() {
            return Err(ApiError::WorkerStopped);
        }
        self.command_tx.try_send(cmd).map_err(|e| match e {
            TrySendError::Full(_) => ApiError::ChannelSendError,
            TrySendError::Disconnected(_) => ApiError::WorkerStopped,
        })
    }

    /// Dispatch a chat turn.
    ///
    /// A request the worker cannot take is completed right away with an
    /// error, so no loading indicator is left behind. Returns whether it was
    /// queued.
    pub fn send_chat(&self, request: ChatRequest, chat: &mut ChatSession) -> bool {
        let id = request.id;
        match self.send_command(ApiCommand::Chat(request)) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to dispatch chat request {}: {}", id, e);
                chat.complete(id, Err(e));
                false
            }
        }
    }

    /// Dispatch log fetches, returning how many were queued.
    ///
    /// Fetches the worker cannot take resolve their block to the error
    /// placeholder instead of leaving it loading.
    pub fn fetch_logs(&self, fetches: Vec<LogFetch>, panel: &mut LogPanel) -> usize {
        let mut queued = 0;
        for fetch in fetches {
            match self.send_command(ApiCommand::FetchLog(fetch)) {
                Ok(()) => queued += 1,
                Err(e) => {
                    warn!("Failed to dispatch {} log fetch: {}", fetch.category, e);
                    panel.apply_fetch(fetch, Err(e));
                }
            }
        }
        queued
    }

    pub fn poll_events(&self) -> Vec<ApiEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            events.push(event);
        }
        events
    }

    /// Apply worker events to the controllers.
    ///
    /// A chat turn that saved a log entry refreshes the panel, and the
    /// resulting fetches are dispatched here.
    pub fn route_events(
        &self,
        events: Vec<ApiEvent>,
        chat: &mut ChatSession,
        panel: &mut LogPanel,
    ) -> RouteSummary {
        let mut summary = RouteSummary::default();
        let mut saved = false;

        for event in events {
            match event {
                ApiEvent::ChatCompleted { id, result } => {
                    if let Some(outcome) = chat.complete(id, result) {
                        summary.chat_changed = true;
                        saved |= outcome.saved;
                    }
                }
                ApiEvent::LogFetched { fetch, result } => {
                    summary.panel_changed |= panel.apply_fetch(fetch, result);
                }
            }
        }

        if saved {
            let fetches = panel.refresh();
            if !fetches.is_empty() {
                info!("Log entry saved, refreshing {} panel blocks", fetches.len());
                summary.panel_changed = true;
                summary.refetches = self.fetch_logs(fetches, panel);
            }
        }

        summary
    }

    /// Stop the worker, waiting up to the shutdown timeout.
    ///
    /// Later commands fail with `WorkerStopped`.
    pub fn shutdown(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }

        if let Some(handle) = self.worker_handle.take() {
            let deadline = Instant::now() + SHUTDOWN_TIMEOUT;
            while !handle.is_finished() && Instant::now() < deadline {
                thread::sleep(Duration::from_millis(10));
            }
            if handle.is_finished() {
                let _ = handle.join();
            } else {
                warn!("API worker did not stop within {:?}, detaching", SHUTDOWN_TIMEOUT);
            }
        }
        self.running.store(false, Ordering::Release);
    }

    fn run_worker(
        api: Arc<dyn JournalApi>,
        running: Arc<AtomicBool>,
        stats: Arc<RwLock<WorkerStats>>,
        command_rx: Receiver<ApiCommand>,
        event_tx: Sender<ApiEvent>,
        stop_rx: Receiver<()>,
    ) {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("diarist-api-io")
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                error!("Failed to create tokio runtime: {}", e);
                running.store(false, Ordering::Release);
                return;
            }
        };

        info!("API worker started");

        loop {
            if stop_rx.try_recv().is_ok() {
                break;
            }

            match command_rx.recv_timeout(Duration::from_millis(20)) {
                Ok(cmd) => {
                    stats.write().in_flight += 1;
                    let api = Arc::clone(&api);
                    let stats = Arc::clone(&stats);
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        let event = Self::execute(api.as_ref(), cmd).await;
                        {
                            let mut stats = stats.write();
                            stats.in_flight = stats.in_flight.saturating_sub(1);
                            stats.completed += 1;
                            if Self::is_failure(&event) {
                                stats.failed += 1;
                            }
                        }
                        if event_tx.send(event).is_err() {
                            debug!("Event receiver gone, dropping result");
                        }
                    });
                }
                Err(crossbeam_channel::RecvTimeoutError::Timeout) => {}
                Err(crossbeam_channel::RecvTimeoutError::Disconnected) => break,
            }
        }

        running.store(false, Ordering::Release);
        runtime.shutdown_timeout(Duration::from_millis(500));
        info!("API worker stopped");
    }

    async fn execute(api: &dyn JournalApi, cmd: ApiCommand) -> ApiEvent {
        match cmd {
            ApiCommand::Chat(request) => {
                debug!(
                    "Chat request {}: {}",
                    request.id,
                    truncate(&request.text, 50)
                );
                let result = api.chat(&request.text).await;
                ApiEvent::ChatCompleted {
                    id: request.id,
                    result,
                }
            }
            ApiCommand::FetchLog(fetch) => {
                debug!(
                    "Fetching {} log (generation {})",
                    fetch.category, fetch.generation.0
                );
                let result = api.derived_log(fetch.category).await;
                ApiEvent::LogFetched { fetch, result }
            }
        }
    }

    fn is_failure(event: &ApiEvent) -> bool {
        match event {
            ApiEvent::ChatCompleted { result, .. } => result.is_err(),
            ApiEvent::LogFetched { result, .. } => result.is_err(),
        }
    }
}

impl Drop for ApiIntegration {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Shorten text for log lines, respecting char boundaries
fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
