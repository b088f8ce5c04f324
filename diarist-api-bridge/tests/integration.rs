//! Request worker and event routing with a scripted backend

use async_trait::async_trait;
use diarist_api_bridge::{
    ApiError, ApiIntegration, ApiResult, BlockContent, ChatReply, ChatSession, DerivedLog,
    JournalApi, LogCategory, LogPanel, RouteSummary, CHAT_ERROR_REPLY,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Backend with per-call delays and canned failures
#[derive(Default)]
struct ScriptedApi {
    chat_delays: HashMap<String, u64>,
    log_delays: Mutex<HashMap<LogCategory, Vec<u64>>>,
    failing_logs: Vec<LogCategory>,
    save_on: Option<String>,
    chats: Mutex<Vec<String>>,
    log_calls: Mutex<Vec<LogCategory>>,
}

#[async_trait]
impl JournalApi for ScriptedApi {
    async fn chat(&self, text: &str) -> ApiResult<ChatReply> {
        self.chats.lock().push(text.to_string());
        let delay = self.chat_delays.get(text).copied().unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(delay)).await;

        if text == "fail" {
            return Err(ApiError::Transport("connection reset".into()));
        }
        Ok(ChatReply {
            reply: format!("re: {}", text),
            state: Some("S1".into()),
            saved: self.save_on.as_deref() == Some(text),
        })
    }

    async fn derived_log(&self, category: LogCategory) -> ApiResult<DerivedLog> {
        let call = {
            let mut calls = self.log_calls.lock();
            calls.push(category);
            calls.iter().filter(|c| **c == category).count()
        };
        // Delays are consumed per call so successive passes can differ
        let delay = self
            .log_delays
            .lock()
            .get_mut(&category)
            .and_then(|d| if d.is_empty() { None } else { Some(d.remove(0)) })
            .unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(delay)).await;

        if self.failing_logs.contains(&category) {
            return Err(ApiError::Status {
                code: 503,
                body: "unavailable".into(),
            });
        }
        Ok(DerivedLog {
            content: Some(format!("{} #{}", category, call)),
        })
    }
}

/// Route events until `done` holds or the deadline passes
fn pump(
    api: &ApiIntegration,
    chat: &mut ChatSession,
    panel: &mut LogPanel,
    done: impl Fn(&ChatSession, &LogPanel) -> bool,
) -> RouteSummary {
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut total = RouteSummary::default();
    while !done(chat, panel) {
        assert!(Instant::now() < deadline, "timed out waiting for worker events");
        let summary = api.route_events(api.poll_events(), chat, panel);
        total.chat_changed |= summary.chat_changed;
        total.panel_changed |= summary.panel_changed;
        total.refetches += summary.refetches;
        std::thread::sleep(Duration::from_millis(10));
    }
    total
}

fn all_settled(panel: &LogPanel) -> bool {
    panel
        .blocks()
        .iter()
        .all(|b| !matches!(b.content, BlockContent::Loading))
}

#[test]
fn test_chat_round_trip() {
    let backend = Arc::new(ScriptedApi::default());
    let api = ApiIntegration::with_api(backend.clone());
    let mut chat = ChatSession::new();
    let mut panel = LogPanel::new();

    chat.toggle_history();
    let request = chat.submit("hello").unwrap();
    assert!(api.send_chat(request, &mut chat));

    let summary = pump(&api, &mut chat, &mut panel, |c, _| !c.is_loading());
    assert!(summary.chat_changed);
    assert_eq!(backend.chats.lock().as_slice(), &["-hello".to_string()]);

    let contents: Vec<_> = chat.transcript().iter().map(|m| m.content.clone()).collect();
    assert_eq!(contents, vec!["hello", "re: -hello"]);
}

#[test]
fn test_concurrent_chats_resolve_out_of_order() {
    let backend = Arc::new(ScriptedApi {
        chat_delays: HashMap::from([("slow".to_string(), 200)]),
        ..Default::default()
    });
    let api = ApiIntegration::with_api(backend);
    let mut chat = ChatSession::new();
    let mut panel = LogPanel::new();

    assert!(api.send_chat(chat.submit("slow").unwrap(), &mut chat));
    assert!(api.send_chat(chat.submit("fail").unwrap(), &mut chat));
    assert_eq!(chat.pending_count(), 2);

    pump(&api, &mut chat, &mut panel, |c, _| !c.is_loading());

    let contents: Vec<_> = chat.transcript().iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["slow", "fail", CHAT_ERROR_REPLY, "re: slow"]);
}

#[test]
fn test_stale_log_results_never_land() {
    // First tasks fetch is slow and resolves after the panel re-rendered
    let backend = Arc::new(ScriptedApi {
        log_delays: Mutex::new(HashMap::from([(LogCategory::Tasks, vec![300, 0])])),
        ..Default::default()
    });
    let api = ApiIntegration::with_api(backend);
    let mut chat = ChatSession::new();
    let mut panel = LogPanel::new();

    api.fetch_logs(panel.toggle_category(LogCategory::Tasks), &mut panel);
    std::thread::sleep(Duration::from_millis(50));
    api.fetch_logs(panel.toggle_category(LogCategory::Events), &mut panel);
    pump(&api, &mut chat, &mut panel, |_, p| all_settled(p));

    // Let the superseded slow fetch arrive, then route it
    std::thread::sleep(Duration::from_millis(400));
    api.route_events(api.poll_events(), &mut chat, &mut panel);

    let blocks = panel.blocks();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].content, BlockContent::Loaded("tasks #2".into()));
    assert_eq!(blocks[1].content, BlockContent::Loaded("events #1".into()));
}

#[test]
fn test_failed_fetch_isolated_to_block() {
    let backend = Arc::new(ScriptedApi {
        failing_logs: vec![LogCategory::Goals],
        ..Default::default()
    });
    let api = ApiIntegration::with_api(backend);
    let mut chat = ChatSession::new();
    let mut panel = LogPanel::new();

    api.fetch_logs(panel.toggle_category(LogCategory::Goals), &mut panel);
    api.fetch_logs(panel.toggle_category(LogCategory::Feedback), &mut panel);
    pump(&api, &mut chat, &mut panel, |_, p| all_settled(p));

    assert!(matches!(panel.blocks()[0].content, BlockContent::Failed(_)));
    assert!(matches!(panel.blocks()[1].content, BlockContent::Loaded(_)));
    assert!(panel.is_visible());
}

#[test]
fn test_undispatched_fetch_fails_its_block() {
    let backend = Arc::new(ScriptedApi::default());
    let mut api = ApiIntegration::with_api(backend.clone());
    let mut chat = ChatSession::new();
    let mut panel = LogPanel::new();

    let fetches = panel.toggle_category(LogCategory::Events);
    assert_eq!(api.fetch_logs(fetches, &mut panel), 1);
    pump(&api, &mut chat, &mut panel, |_, p| all_settled(p));

    api.shutdown();
    assert!(!api.is_running());

    // Re-render pass: both blocks reset to loading, neither can be queued
    let fetches = panel.toggle_category(LogCategory::Tasks);
    assert_eq!(fetches.len(), 2);
    assert_eq!(api.fetch_logs(fetches, &mut panel), 0);

    let blocks = panel.blocks();
    assert_eq!(blocks.len(), 2);
    assert_eq!(
        blocks[0].content,
        BlockContent::Failed(ApiError::WorkerStopped.to_string())
    );
    assert_eq!(
        blocks[1].content,
        BlockContent::Failed(ApiError::WorkerStopped.to_string())
    );
    assert!(panel.is_visible());
    assert_eq!(backend.log_calls.lock().as_slice(), &[LogCategory::Events]);
}

#[test]
fn test_chat_with_stopped_worker_resolves_immediately() {
    let backend = Arc::new(ScriptedApi::default());
    let mut api = ApiIntegration::with_api(backend.clone());
    let mut chat = ChatSession::new();
    api.shutdown();

    let request = chat.submit("hello").unwrap();
    assert!(chat.is_loading());
    assert!(!api.send_chat(request, &mut chat));

    assert!(!chat.is_loading());
    assert_eq!(chat.pending_count(), 0);
    let contents: Vec<_> = chat.transcript().iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["hello", CHAT_ERROR_REPLY]);
    assert!(backend.chats.lock().is_empty());
}

#[test]
fn test_saved_turn_refreshes_panel() {
    let backend = Arc::new(ScriptedApi {
        save_on: Some("yes, save it".into()),
        ..Default::default()
    });
    let api = ApiIntegration::with_api(backend.clone());
    let mut chat = ChatSession::new();
    let mut panel = LogPanel::new();

    api.fetch_logs(panel.toggle_category(LogCategory::Events), &mut panel);
    pump(&api, &mut chat, &mut panel, |_, p| all_settled(p));
    let before = panel.generation();

    api.send_chat(chat.submit("yes, save it").unwrap(), &mut chat);
    let summary = pump(&api, &mut chat, &mut panel, |c, p| {
        !c.is_loading() && p.generation() > before && all_settled(p)
    });

    assert_eq!(summary.refetches, 1);
    assert_eq!(
        panel.blocks()[0].content,
        BlockContent::Loaded("events #2".into())
    );
    assert_eq!(backend.log_calls.lock().len(), 2);
}

#[test]
fn test_close_discards_in_flight_fetches() {
    let backend = Arc::new(ScriptedApi {
        log_delays: Mutex::new(HashMap::from([(LogCategory::Goals, vec![100])])),
        ..Default::default()
    });
    let api = ApiIntegration::with_api(backend);
    let mut chat = ChatSession::new();
    let mut panel = LogPanel::new();

    api.fetch_logs(panel.toggle_category(LogCategory::Goals), &mut panel);
    panel.close();

    std::thread::sleep(Duration::from_millis(250));
    let summary = api.route_events(api.poll_events(), &mut chat, &mut panel);
    assert!(!summary.panel_changed);
    assert!(panel.blocks().is_empty());
    assert!(!panel.is_visible());
}

#[test]
fn test_worker_stats_and_shutdown() {
    let api = ApiIntegration::with_api(Arc::new(ScriptedApi {
        failing_logs: vec![LogCategory::Tasks],
        ..Default::default()
    }));
    let mut chat = ChatSession::new();
    let mut panel = LogPanel::new();
    assert!(api.is_running());

    api.fetch_logs(panel.toggle_category(LogCategory::Tasks), &mut panel);
    pump(&api, &mut chat, &mut panel, |_, p| all_settled(p));

    let stats = api.stats();
    assert_eq!(stats.in_flight, 0);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.failed, 1);

    // Dropping joins the worker within the shutdown timeout
    let started = Instant::now();
    drop(api);
    assert!(started.elapsed() < Duration::from_secs(3));
}
