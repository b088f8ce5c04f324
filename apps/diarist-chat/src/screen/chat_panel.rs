//! Chat panel methods for ChatScreen

use diarist_api_bridge::render::{mode_badge, transcript_markdown, transcript_plain_text};
use makepad_widgets::*;

use super::ChatScreen;

impl ChatScreen {
    /// Submit the prompt input through the chat controller
    pub(super) fn submit_prompt(&mut self, cx: &mut Cx) {
        let input = self
            .view
            .text_input(ids!(chat_column.prompt_section.prompt_input));
        let text = input.text();

        let Some(request) = self.chat.submit(&text) else {
            return;
        };
        input.set_text(cx, "");

        match self.api {
            Some(ref api) => {
                api.send_chat(request, &mut self.chat);
            }
            None => {
                ::log::warn!("API worker not started, chat request dropped");
                self.chat.complete(
                    request.id,
                    Err(diarist_api_bridge::ApiError::WorkerStopped),
                );
            }
        }

        self.update_chat_display(cx);
    }

    pub(super) fn toggle_history(&mut self, cx: &mut Cx) {
        let enabled = self.chat.toggle_history();
        ::log::debug!("Use history: {}", enabled);

        let active_val = if enabled { 1.0 } else { 0.0 };
        let button = self.view.button(ids!(chat_column.toolbar.history_btn));
        button.set_text(cx, self.chat.history_label());
        button.apply_over(
            cx,
            live! {
                draw_bg: { active: (active_val) }
                draw_text: { active: (active_val) }
            },
        );
        self.view.redraw(cx);
    }

    /// Re-render the transcript and mode badge
    pub(super) fn update_chat_display(&mut self, cx: &mut Cx) {
        self.view
            .markdown(ids!(
                chat_column
                    .chat_section
                    .chat_scroll
                    .chat_content_wrapper
                    .chat_content
            ))
            .set_text(cx, &transcript_markdown(&self.chat));

        self.view
            .label(ids!(chat_column.header.mode_badge))
            .set_text(cx, mode_badge(self.chat.mode()));

        // Auto-scroll to bottom when the transcript grows
        let item_count = self.chat.transcript().len() + self.chat.pending_count();
        if item_count > self.last_item_count {
            self.view
                .view(ids!(chat_column.chat_section.chat_scroll))
                .set_scroll_pos(cx, DVec2 { x: 0.0, y: 1e10 });
        }
        self.last_item_count = item_count;

        self.view.redraw(cx);
    }

    pub(super) fn copy_chat_to_clipboard(&mut self, cx: &mut Cx) {
        let text = transcript_plain_text(&self.chat);
        if text.is_empty() {
            return;
        }
        cx.copy_to_clipboard(&text);
        ::log::info!("Copied {} messages to clipboard", self.chat.transcript().len());
    }
}
