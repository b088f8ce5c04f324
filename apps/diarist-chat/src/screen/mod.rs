//! Chat Screen - journal conversation plus derived-log side panel
//!
//! Split into sub-modules:
//! - `design.rs` - UI layout and styling (live_design! DSL)
//! - `chat_panel.rs` - Prompt submission, transcript display, clipboard
//! - `log_panel.rs` - Category toggles and block slots
//! - `api_handlers.rs` - Worker startup and event polling

mod api_handlers;
mod chat_panel;
pub mod design; // Public for Makepad live_design path resolution
mod log_panel;

use diarist_api_bridge::{ApiIntegration, ChatSession, LogCategory, LogPanel};
use diarist_widgets::StateChangeListener;
use makepad_widgets::*;

/// Register live design for this module
pub fn live_design(cx: &mut Cx) {
    design::live_design(cx);
}

#[derive(Live, LiveHook, Widget)]
pub struct ChatScreen {
    #[deref]
    view: View,
    #[rust]
    chat: ChatSession,
    #[rust]
    panel: LogPanel,
    #[rust]
    api: Option<ApiIntegration>,
    #[rust]
    api_timer: Timer,
    #[rust]
    initialized: bool,
    /// Transcript item count at the last redraw, for auto-scroll
    #[rust]
    last_item_count: usize,
    #[rust]
    dark_mode: f64,
}

impl Widget for ChatScreen {
    fn handle_event(&mut self, cx: &mut Cx, event: &Event, scope: &mut Scope) {
        self.view.handle_event(cx, event, scope);

        if !self.initialized {
            self.initialized = true;
            self.init_api(cx);
            self.update_chat_display(cx);
            self.update_log_panel(cx);
        }

        if self.api_timer.is_event(event).is_some() {
            self.poll_api_events(cx);
        }

        let actions = match event {
            Event::Actions(actions) => actions.as_slice(),
            _ => &[],
        };

        // Prompt: Send button, or Enter without Shift
        if self
            .view
            .button(ids!(chat_column.prompt_section.send_btn))
            .clicked(actions)
        {
            self.submit_prompt(cx);
        }
        if let Some((_, modifiers)) = self
            .view
            .text_input(ids!(chat_column.prompt_section.prompt_input))
            .returned(actions)
        {
            if !modifiers.shift {
                self.submit_prompt(cx);
            }
        }

        if self
            .view
            .button(ids!(chat_column.toolbar.history_btn))
            .clicked(actions)
        {
            self.toggle_history(cx);
        }

        if self
            .view
            .button(ids!(chat_column.header.copy_chat_btn))
            .clicked(actions)
        {
            self.copy_chat_to_clipboard(cx);
        }

        // Category toolbar
        let category_buttons = [
            (ids!(chat_column.toolbar.tasks_btn), LogCategory::Tasks),
            (ids!(chat_column.toolbar.feedback_btn), LogCategory::Feedback),
            (ids!(chat_column.toolbar.events_btn), LogCategory::Events),
            (ids!(chat_column.toolbar.goals_btn), LogCategory::Goals),
        ];
        for (path, category) in category_buttons {
            if self.view.button(path).clicked(actions) {
                self.toggle_category(cx, category);
            }
        }

        if self
            .view
            .button(ids!(chat_column.toolbar.logs_btn))
            .clicked(actions)
        {
            self.toggle_log_visibility(cx);
        }

        // Block headers act as per-block close buttons
        for slot in 0..log_panel::SLOT_COUNT {
            if self.slot_header(slot).clicked(actions) {
                self.close_block(cx, slot);
            }
        }
    }

    fn draw_walk(&mut self, cx: &mut Cx2d, scope: &mut Scope, walk: Walk) -> DrawStep {
        self.view.draw_walk(cx, scope, walk)
    }
}

impl ChatScreenRef {
    /// Update dark mode for this screen
    pub fn update_dark_mode(&self, cx: &mut Cx, dark_mode: f64) {
        if let Some(mut inner) = self.borrow_mut() {
            inner.dark_mode = dark_mode;

            inner.view.apply_over(
                cx,
                live! {
                    draw_bg: { dark_mode: (dark_mode) }
                },
            );

            inner.view.label(ids!(chat_column.header.title)).apply_over(
                cx,
                live! {
                    draw_text: { dark_mode: (dark_mode) }
                },
            );

            for path in [
                ids!(chat_column.chat_section),
                ids!(chat_column.prompt_section),
            ] {
                inner.view.view(path).apply_over(
                    cx,
                    live! {
                        draw_bg: { dark_mode: (dark_mode) }
                    },
                );
            }

            inner
                .view
                .markdown(ids!(
                    chat_column
                        .chat_section
                        .chat_scroll
                        .chat_content_wrapper
                        .chat_content
                ))
                .apply_over(
                    cx,
                    live! {
                        draw_normal: { dark_mode: (dark_mode) }
                        draw_bold: { dark_mode: (dark_mode) }
                        draw_italic: { dark_mode: (dark_mode) }
                    },
                );

            inner
                .view
                .text_input(ids!(chat_column.prompt_section.prompt_input))
                .apply_over(
                    cx,
                    live! {
                        draw_bg: { dark_mode: (dark_mode) }
                        draw_text: { dark_mode: (dark_mode) }
                    },
                );

            for path in [
                ids!(chat_column.header.copy_chat_btn),
                ids!(chat_column.toolbar.history_btn),
                ids!(chat_column.toolbar.tasks_btn),
                ids!(chat_column.toolbar.feedback_btn),
                ids!(chat_column.toolbar.events_btn),
                ids!(chat_column.toolbar.goals_btn),
                ids!(chat_column.toolbar.logs_btn),
            ] {
                inner.view.button(path).apply_over(
                    cx,
                    live! {
                        draw_bg: { dark_mode: (dark_mode) }
                        draw_text: { dark_mode: (dark_mode) }
                    },
                );
            }

            inner.apply_dark_mode_blocks(cx);
            inner.view.redraw(cx);
        }
    }
}

impl StateChangeListener for ChatScreenRef {
    fn on_dark_mode_change(&self, cx: &mut Cx, dark_mode: f64) {
        self.update_dark_mode(cx, dark_mode);
    }
}
