//! # Diarist API Bridge
//!
//! Toolkit-independent core of Diarist Studio: the chat and log panel
//! controllers, the HTTP client for the journaling backend, and the
//! background worker that runs requests off the UI thread.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                        Diarist Studio UI (Main Thread)                      │
//! │                                                                             │
//! │  ChatSession                              LogPanel                          │
//! │  submit() -> ChatRequest                  toggle_category() -> [LogFetch]   │
//! │  complete(id, result)                     apply_fetch(fetch, result)        │
//! └─────────┬──────────────────────────────────────────────────────▲────────────┘
//!           │ ApiCommand (crossbeam)             ApiEvent (polled on UI timer)
//!           ▼                                                      │
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                 ApiIntegration worker (tokio runtime)                       │
//! │                                                                             │
//! │  one task per command -> JournalApi::chat / JournalApi::derived_log         │
//! └─────────────────────────────────────────────────────────────────────────────┘
//!           │                                                      ▲
//!           ▼                HTTP (reqwest, JSON)                  │
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │   POST {base}/chat                    GET {base}/derived/{category}         │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Components
//!
//! - [`ChatSession`] - Transcript, history flag, one loading indicator per request
//! - [`LogPanel`] - Active categories, `100 / N` block heights, render generations
//! - [`ApiIntegration`] - Worker thread, command/event channels, event routing
//! - [`JournalApi`] - Backend trait; [`HttpJournalApi`] is the reqwest implementation
//! - [`render`] - Markdown and plain-text views of controller state
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use diarist_api_bridge::{ApiIntegration, ChatSession, ClientConfig, LogCategory, LogPanel};
//!
//! let api = ApiIntegration::new(&ClientConfig::load());
//! let mut chat = ChatSession::new();
//! let mut panel = LogPanel::new();
//!
//! if let Some(request) = chat.submit("went running this morning") {
//!     api.send_chat(request, &mut chat);
//! }
//! let fetches = panel.toggle_category(LogCategory::Tasks);
//! api.fetch_logs(fetches, &mut panel);
//!
//! // On the UI timer
//! let summary = api.route_events(api.poll_events(), &mut chat, &mut panel);
//! if summary.chat_changed {
//!     redraw_chat(&chat);
//! }
//! ```

pub mod chat_session;
pub mod client;
pub mod config;
pub mod data;
pub mod error;
pub mod integration;
pub mod log_panel;
pub mod render;

// Re-exports
pub use chat_session::{
    ChatSession, PendingReply, ReplyOutcome, TranscriptItem, CHAT_ERROR_REPLY, HISTORY_MARKER,
};
pub use client::{HttpJournalApi, JournalApi};
pub use config::{ClientConfig, API_BASE_ENV, DEFAULT_API_BASE};
pub use data::{
    ChatMessage, ChatReply, ChatRequest, DerivedLog, DialogueMode, LogCategory, MessageRole,
    RequestId,
};
pub use error::{ApiError, ApiResult};
pub use integration::{ApiCommand, ApiEvent, ApiIntegration, RouteSummary, WorkerStats};
pub use log_panel::{BlockContent, LogBlock, LogFetch, LogPanel, RenderGeneration, LOADING_TEXT};
