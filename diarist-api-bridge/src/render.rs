//! Text rendering for the chat view and log panel blocks

use crate::chat_session::{ChatSession, TranscriptItem};
use crate::data::DialogueMode;
use crate::log_panel::{BlockContent, LogBlock, LOADING_TEXT};

/// Shown in the chat view before the first message
pub const EMPTY_TRANSCRIPT: &str = "*Start a conversation to begin journaling...*";

/// Loading indicator line for a pending reply
pub const PENDING_REPLY: &str = "⌛ ...";

/// Markdown for the scrolling chat view
pub fn transcript_markdown(session: &ChatSession) -> String {
    let items = session.items();
    if items.is_empty() {
        return EMPTY_TRANSCRIPT.to_string();
    }

    items
        .iter()
        .map(|item| match item {
            TranscriptItem::Message(msg) => {
                format!("**{}**\n\n{}", msg.role.display_name(), msg.content)
            }
            TranscriptItem::Loading(_) => format!("**Assistant**\n\n{}", PENDING_REPLY),
        })
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

/// Transcript as plain text for the clipboard; pending replies are skipped
pub fn transcript_plain_text(session: &ChatSession) -> String {
    session
        .transcript()
        .iter()
        .map(|msg| format!("[{}] {}", msg.role.display_name(), msg.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Body text of a panel block
pub fn block_text(block: &LogBlock) -> String {
    match &block.content {
        BlockContent::Loading => LOADING_TEXT.to_string(),
        BlockContent::Loaded(text) => text.clone(),
        BlockContent::Failed(reason) => format!("(Failed to load {}: {})", block.category, reason),
    }
}

pub fn mode_badge(mode: Option<DialogueMode>) -> &'static str {
    match mode {
        Some(DialogueMode::Drafting) => "Draft awaiting confirmation",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ChatReply, LogCategory};
    use crate::error::ApiError;

    #[test]
    fn test_empty_transcript_placeholder() {
        let session = ChatSession::new();
        assert_eq!(transcript_markdown(&session), EMPTY_TRANSCRIPT);
        assert_eq!(transcript_plain_text(&session), "");
    }

    #[test]
    fn test_markdown_shows_pending_indicator() {
        let mut session = ChatSession::new();
        let request = session.submit("hello").unwrap();

        let md = transcript_markdown(&session);
        assert!(md.starts_with("**You**\n\nhello"));
        assert_eq!(md.matches(PENDING_REPLY).count(), 1);

        session.complete(
            request.id,
            Ok(ChatReply {
                reply: "hi".into(),
                state: None,
                saved: false,
            }),
        );
        let md = transcript_markdown(&session);
        assert!(!md.contains(PENDING_REPLY));
        assert!(md.ends_with("**Assistant**\n\nhi"));
        assert_eq!(transcript_plain_text(&session), "[You] hello\n\n[Assistant] hi");
    }

    #[test]
    fn test_block_text_variants() {
        let mut block = LogBlock {
            category: LogCategory::Feedback,
            height_percent: 100.0,
            content: BlockContent::Loading,
        };
        assert_eq!(block_text(&block), "Loading...");

        block.content = BlockContent::Loaded("sleep earlier".into());
        assert_eq!(block_text(&block), "sleep earlier");

        block.content = BlockContent::Failed(ApiError::Transport("refused".into()).to_string());
        let text = block_text(&block);
        assert!(text.starts_with("(Failed to load feedback:"));
        assert!(text.contains("refused"));
    }

    #[test]
    fn test_mode_badge() {
        assert_eq!(mode_badge(None), "");
        assert_eq!(mode_badge(Some(DialogueMode::Chat)), "");
        assert_eq!(
            mode_badge(Some(DialogueMode::Drafting)),
            "Draft awaiting confirmation"
        );
    }
}
