//! Diarist Chat - journal conversation with a derived-log side panel

pub mod screen;

pub use screen::ChatScreen;
pub use screen::ChatScreenWidgetRefExt;

use diarist_widgets::{AppInfo, DiaristApp};
use makepad_widgets::Cx;

/// Diarist Chat app descriptor
pub struct DiaristChatApp;

impl DiaristApp for DiaristChatApp {
    fn info() -> AppInfo {
        AppInfo {
            name: "Journal Chat",
            id: "diarist-chat",
            description: "Talk to your journal and browse its derived logs",
        }
    }

    fn live_design(cx: &mut Cx) {
        screen::live_design(cx);
    }
}

/// Register all Diarist Chat widgets with Makepad
pub fn live_design(cx: &mut Cx) {
    DiaristChatApp::live_design(cx);
}
