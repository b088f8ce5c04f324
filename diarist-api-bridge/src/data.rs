//! Data types exchanged between the widgets, the controllers and the backend

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Current Unix time in milliseconds
pub fn current_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Who authored a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    /// Sender name shown in the chat view
    pub fn display_name(&self) -> &'static str {
        match self {
            MessageRole::User => "You",
            MessageRole::Assistant => "Assistant",
        }
    }
}

/// A single transcript entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    pub timestamp_ms: u64,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp_ms: current_timestamp(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Identifies one chat submission and its loading indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outbound chat payload produced by a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub id: RequestId,
    /// Text sent to the backend (marker-prefixed when history is enabled)
    pub text: String,
}

/// Request body for `POST {base}/chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatBody {
    pub text: String,
}

/// Response body of `POST {base}/chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    /// Server dialogue stage ("S1" free chat, "S2" log draft pending)
    #[serde(default)]
    pub state: Option<String>,
    /// True when this turn persisted a new log entry
    #[serde(default)]
    pub saved: bool,
}

impl ChatReply {
    pub fn mode(&self) -> Option<DialogueMode> {
        self.state.as_deref().and_then(DialogueMode::from_state)
    }
}

/// Server-side dialogue stage reported with each reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueMode {
    /// Free conversation
    Chat,
    /// A log draft is waiting for the user to confirm or amend it
    Drafting,
}

impl DialogueMode {
    pub fn from_state(state: &str) -> Option<Self> {
        match state {
            "S1" => Some(DialogueMode::Chat),
            "S2" => Some(DialogueMode::Drafting),
            _ => None,
        }
    }
}

/// Fixed set of derived log categories served by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogCategory {
    Tasks,
    Feedback,
    Events,
    Goals,
}

impl LogCategory {
    /// All categories in toolbar order
    pub const ALL: [LogCategory; 4] = [
        LogCategory::Tasks,
        LogCategory::Feedback,
        LogCategory::Events,
        LogCategory::Goals,
    ];

    /// Path segment used by `GET {base}/derived/{category}`
    pub fn as_str(&self) -> &'static str {
        match self {
            LogCategory::Tasks => "tasks",
            LogCategory::Feedback => "feedback",
            LogCategory::Events => "events",
            LogCategory::Goals => "goals",
        }
    }

    /// Header label shown on the panel block
    pub fn label(&self) -> &'static str {
        match self {
            LogCategory::Tasks => "TASKS",
            LogCategory::Feedback => "FEEDBACK",
            LogCategory::Events => "EVENTS",
            LogCategory::Goals => "GOALS",
        }
    }

    /// Position in [`LogCategory::ALL`]
    pub fn index(&self) -> usize {
        match self {
            LogCategory::Tasks => 0,
            LogCategory::Feedback => 1,
            LogCategory::Events => 2,
            LogCategory::Goals => 3,
        }
    }
}

impl fmt::Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tasks" => Ok(LogCategory::Tasks),
            "feedback" => Ok(LogCategory::Feedback),
            "events" => Ok(LogCategory::Events),
            "goals" => Ok(LogCategory::Goals),
            other => Err(format!("unknown log category: {}", other)),
        }
    }
}

/// Response body of `GET {base}/derived/{category}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedLog {
    #[serde(default)]
    pub content: Option<String>,
}

impl DerivedLog {
    /// Content text, empty when the backend omitted it
    pub fn into_text(self) -> String {
        self.content.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip_names() {
        for category in LogCategory::ALL {
            assert_eq!(category.as_str().parse::<LogCategory>().unwrap(), category);
            assert_eq!(LogCategory::ALL[category.index()], category);
        }
        assert!("journal".parse::<LogCategory>().is_err());
    }

    #[test]
    fn test_chat_reply_optional_fields() {
        let reply: ChatReply = serde_json::from_str(r#"{"reply":"hi"}"#).unwrap();
        assert_eq!(reply.reply, "hi");
        assert_eq!(reply.mode(), None);
        assert!(!reply.saved);

        let reply: ChatReply =
            serde_json::from_str(r#"{"reply":"draft","state":"S2","saved":false}"#).unwrap();
        assert_eq!(reply.mode(), Some(DialogueMode::Drafting));
    }

    #[test]
    fn test_derived_log_missing_content_is_empty() {
        let log: DerivedLog = serde_json::from_str("{}").unwrap();
        assert_eq!(log.into_text(), "");

        let log: DerivedLog = serde_json::from_str(r#"{"content":null}"#).unwrap();
        assert_eq!(log.into_text(), "");
    }
}
