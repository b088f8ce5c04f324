//! Chat session controller
//!
//! Owns the transcript, the "use history" flag and one loading indicator per
//! in-flight request. Submissions are fire-and-forget: `submit` hands back the
//! request for the caller to dispatch, and `complete` is fed the outcome later.

use crate::data::{ChatMessage, ChatReply, ChatRequest, DialogueMode, RequestId};
use crate::error::ApiResult;
use tracing::{debug, warn};

/// Prefix asking the backend to pull in relevant history
pub const HISTORY_MARKER: char = '-';

/// Assistant message shown when a chat request fails
pub const CHAT_ERROR_REPLY: &str = "(An error occurred, no reply could be retrieved)";

/// A loading indicator waiting for its reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingReply {
    pub id: RequestId,
    /// Transcript length when the request was issued; the indicator renders
    /// after the first `anchor` messages
    pub anchor: usize,
}

/// Entry in the rendered chat view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptItem<'a> {
    Message(&'a ChatMessage),
    Loading(RequestId),
}

/// What a resolved request means for the rest of the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplyOutcome {
    /// The backend persisted a log entry during this turn
    pub saved: bool,
    /// The request failed and the canned error message was shown
    pub failed: bool,
}

#[derive(Debug, Default)]
pub struct ChatSession {
    transcript: Vec<ChatMessage>,
    use_history: bool,
    pending: Vec<PendingReply>,
    next_request_id: u64,
    mode: Option<DialogueMode>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the user's message and produce the outbound request.
    ///
    /// Returns `None` (and changes nothing) when the trimmed text is empty.
    pub fn submit(&mut self, raw_text: &str) -> Option<ChatRequest> {
        let text = raw_text.trim();
        if text.is_empty() {
            return None;
        }

        self.transcript.push(ChatMessage::user(text));

        let payload = if self.use_history {
            format!("{}{}", HISTORY_MARKER, text)
        } else {
            text.to_string()
        };

        self.next_request_id += 1;
        let id = RequestId(self.next_request_id);
        self.pending.push(PendingReply {
            id,
            anchor: self.transcript.len(),
        });

        debug!("Chat request {} queued ({} pending)", id, self.pending.len());
        Some(ChatRequest { id, text: payload })
    }

    /// Resolve a request: drop its indicator and append the reply or the
    /// canned error. Unknown ids are ignored.
    pub fn complete(
        &mut self,
        id: RequestId,
        result: ApiResult<ChatReply>,
    ) -> Option<ReplyOutcome> {
        let Some(pos) = self.pending.iter().position(|p| p.id == id) else {
            warn!("Ignoring completion for unknown chat request {}", id);
            return None;
        };
        self.pending.remove(pos);

        match result {
            Ok(reply) => {
                if let Some(mode) = reply.mode() {
                    self.mode = Some(mode);
                }
                let saved = reply.saved;
                self.transcript.push(ChatMessage::assistant(reply.reply));
                Some(ReplyOutcome {
                    saved,
                    failed: false,
                })
            }
            Err(e) => {
                warn!("Chat request {} failed: {}", id, e);
                self.transcript.push(ChatMessage::assistant(CHAT_ERROR_REPLY));
                Some(ReplyOutcome {
                    saved: false,
                    failed: true,
                })
            }
        }
    }

    /// Flip the history flag, returning the new value
    pub fn toggle_history(&mut self) -> bool {
        self.use_history = !self.use_history;
        self.use_history
    }

    pub fn use_history(&self) -> bool {
        self.use_history
    }

    /// Label for the history toggle button
    pub fn history_label(&self) -> &'static str {
        if self.use_history {
            "● Use History"
        } else {
            "◯ Use History"
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn pending(&self) -> &[PendingReply] {
        &self.pending
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_loading(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Last dialogue stage reported by the backend
    pub fn mode(&self) -> Option<DialogueMode> {
        self.mode
    }

    /// Messages interleaved with loading indicators, in display order
    pub fn items(&self) -> Vec<TranscriptItem<'_>> {
        let mut items = Vec::with_capacity(self.transcript.len() + self.pending.len());
        let mut pending = self.pending.iter().peekable();

        for (idx, message) in self.transcript.iter().enumerate() {
            items.push(TranscriptItem::Message(message));
            while let Some(p) = pending.next_if(|p| p.anchor == idx + 1) {
                items.push(TranscriptItem::Loading(p.id));
            }
        }
        items.extend(pending.map(|p| TranscriptItem::Loading(p.id)));
        items
    }
}
