//! API worker handlers for ChatScreen
//!
//! The worker runs requests off the UI thread; results come back as events
//! drained on `api_timer` and routed into the two controllers here.

use diarist_api_bridge::{ApiIntegration, ClientConfig};
use makepad_widgets::*;

use super::ChatScreen;

impl ChatScreen {
    /// Start the request worker (lazy, once)
    pub(super) fn init_api(&mut self, cx: &mut Cx) {
        if self.api.is_some() {
            return;
        }

        let config = ClientConfig::load();
        ::log::info!("Initializing API worker for {}", config.api_base);
        self.api = Some(ApiIntegration::new(&config));

        self.api_timer = cx.start_interval(config.poll_interval().as_secs_f64());
    }

    /// Drain worker events and refresh whatever changed
    pub(super) fn poll_api_events(&mut self, cx: &mut Cx) {
        let Some(ref api) = self.api else {
            return;
        };

        let events = api.poll_events();
        if events.is_empty() {
            return;
        }

        let summary = api.route_events(events, &mut self.chat, &mut self.panel);
        if summary.refetches > 0 {
            ::log::debug!("Dispatched {} log refresh fetches", summary.refetches);
        }

        if summary.chat_changed {
            self.update_chat_display(cx);
        }
        if summary.panel_changed {
            self.update_log_panel(cx);
        }
    }
}
