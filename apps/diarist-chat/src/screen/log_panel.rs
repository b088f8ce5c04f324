//! Log panel methods for ChatScreen
//!
//! Maps toolbar and header clicks onto the `LogPanel` controller and mirrors
//! its blocks into the fixed slot widgets, in active-set order.

use diarist_api_bridge::render::block_text;
use diarist_api_bridge::{ApiError, BlockContent, LogCategory, LogFetch};
use makepad_widgets::*;

use super::ChatScreen;

/// One slot per log category
pub(super) const SLOT_COUNT: usize = 4;

fn slot_id(slot: usize) -> LiveId {
    match slot {
        0 => live_id!(block_0),
        1 => live_id!(block_1),
        2 => live_id!(block_2),
        _ => live_id!(block_3),
    }
}

fn category_button_id(category: LogCategory) -> LiveId {
    match category {
        LogCategory::Tasks => live_id!(tasks_btn),
        LogCategory::Feedback => live_id!(feedback_btn),
        LogCategory::Events => live_id!(events_btn),
        LogCategory::Goals => live_id!(goals_btn),
    }
}

impl ChatScreen {
    pub(super) fn slot_header(&self, slot: usize) -> ButtonRef {
        self.view
            .button(&[live_id!(log_section), slot_id(slot), live_id!(header)])
    }

    fn slot_view(&self, slot: usize) -> ViewRef {
        self.view.view(&[live_id!(log_section), slot_id(slot)])
    }

    fn slot_body(&self, slot: usize) -> LabelRef {
        self.view.label(&[
            live_id!(log_section),
            slot_id(slot),
            live_id!(body_scroll),
            live_id!(body_wrapper),
            live_id!(body),
        ])
    }

    /// Toolbar category button
    pub(super) fn toggle_category(&mut self, cx: &mut Cx, category: LogCategory) {
        let fetches = self.panel.toggle_category(category);
        ::log::info!(
            "Toggled {} log, active: {:?}",
            category,
            self.panel.active()
        );
        self.dispatch_fetches(fetches);
        self.update_log_panel(cx);
    }

    /// Header click on a rendered block
    pub(super) fn close_block(&mut self, cx: &mut Cx, slot: usize) {
        let Some(category) = self.panel.blocks().get(slot).map(|b| b.category) else {
            return;
        };
        self.toggle_category(cx, category);
    }

    /// Master "Logs" button
    pub(super) fn toggle_log_visibility(&mut self, cx: &mut Cx) {
        let visible = self.panel.toggle_visibility();
        ::log::debug!("Log panel visible: {}", visible);
        self.update_log_panel(cx);
    }

    /// Queue fetches; any the worker cannot take resolve to the error placeholder
    pub(super) fn dispatch_fetches(&mut self, fetches: Vec<LogFetch>) {
        if fetches.is_empty() {
            return;
        }
        match self.api {
            Some(ref api) => {
                let requested = fetches.len();
                let queued = api.fetch_logs(fetches, &mut self.panel);
                if queued < requested {
                    ::log::warn!("Only {} of {} log fetches queued", queued, requested);
                }
            }
            None => {
                ::log::warn!("API worker not started, failing {} log fetches", fetches.len());
                for fetch in fetches {
                    self.panel.apply_fetch(fetch, Err(ApiError::WorkerStopped));
                }
            }
        }
    }

    /// Sync slot widgets and toolbar buttons with the controller
    pub(super) fn update_log_panel(&mut self, cx: &mut Cx) {
        let visible = self.panel.is_visible();
        self.view.view(ids!(log_section)).set_visible(cx, visible);

        let blocks = self.panel.blocks().to_vec();
        for slot in 0..SLOT_COUNT {
            match blocks.get(slot) {
                Some(block) => {
                    self.slot_view(slot).set_visible(cx, true);
                    self.slot_header(slot).set_text(cx, block.category.label());

                    let failed = if matches!(block.content, BlockContent::Failed(_)) {
                        1.0
                    } else {
                        0.0
                    };
                    let body = self.slot_body(slot);
                    body.set_text(cx, &block_text(block));
                    body.apply_over(
                        cx,
                        live! {
                            draw_text: { failed: (failed) }
                        },
                    );
                }
                None => self.slot_view(slot).set_visible(cx, false),
            }
        }

        self.view
            .widget(ids!(log_section.empty_hint))
            .set_visible(cx, visible && blocks.is_empty());

        for (category, active) in self.panel.button_states() {
            let active_val = if active { 1.0 } else { 0.0 };
            self.view
                .button(&[
                    live_id!(chat_column),
                    live_id!(toolbar),
                    category_button_id(category),
                ])
                .apply_over(
                    cx,
                    live! {
                        draw_bg: { active: (active_val) }
                        draw_text: { active: (active_val) }
                    },
                );
        }

        let logs_active = if visible { 1.0 } else { 0.0 };
        self.view.button(ids!(chat_column.toolbar.logs_btn)).apply_over(
            cx,
            live! {
                draw_bg: { active: (logs_active) }
                draw_text: { active: (logs_active) }
            },
        );

        self.view.redraw(cx);
    }

    pub(super) fn apply_dark_mode_blocks(&mut self, cx: &mut Cx) {
        let dm = self.dark_mode;
        for slot in 0..SLOT_COUNT {
            self.slot_view(slot).apply_over(
                cx,
                live! {
                    draw_bg: { dark_mode: (dm) }
                },
            );
            self.slot_header(slot).apply_over(
                cx,
                live! {
                    draw_bg: { dark_mode: (dm) }
                    draw_text: { dark_mode: (dm) }
                },
            );
            self.slot_body(slot).apply_over(
                cx,
                live! {
                    draw_text: { dark_mode: (dm) }
                },
            );
        }
        self.view.label(ids!(log_section.empty_hint)).apply_over(
            cx,
            live! {
                draw_text: { dark_mode: (dm) }
            },
        );
    }
}
