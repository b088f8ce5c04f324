//! # DiaristApp Trait - Plugin App Interface
//!
//! Standard interface for apps hosted by the Diarist Studio shell.
//!
//! Makepad's `live_design!` macro resolves widget types at compile time, so the
//! shell still imports each app's screen directly. This trait adds:
//!
//! - **Metadata** - name, ID, description via [`AppInfo`]
//! - **Registration** - widget registration via [`DiaristApp::live_design`]
//! - **Runtime queries** - app lookup via [`AppRegistry`]
//!
//! ## Usage in Shell
//!
//! ```rust,ignore
//! use diarist_widgets::{AppRegistry, DiaristApp};
//! use diarist_chat::DiaristChatApp;
//!
//! // In LiveHook::after_new_from_doc
//! self.app_registry.register(DiaristChatApp::info());
//!
//! // In LiveRegister
//! <DiaristChatApp as DiaristApp>::live_design(cx);
//! ```

use makepad_widgets::Cx;

/// Metadata about a registered app
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppInfo {
    /// Display name shown in the window header
    pub name: &'static str,
    pub id: &'static str,
    pub description: &'static str,
}

/// Trait for apps that integrate with the Diarist Studio shell
pub trait DiaristApp {
    fn info() -> AppInfo
    where
        Self: Sized;

    /// Register this app's widgets with Makepad
    fn live_design(cx: &mut Cx);
}

/// Registry of installed apps
#[derive(Debug)]
pub struct AppRegistry {
    apps: Vec<AppInfo>,
}

impl AppRegistry {
    pub const fn new() -> Self {
        Self { apps: Vec::new() }
    }

    /// Register an app; a second registration with the same ID is ignored
    pub fn register(&mut self, info: AppInfo) {
        if self.find_by_id(info.id).is_some() {
            return;
        }
        self.apps.push(info);
    }

    pub fn apps(&self) -> &[AppInfo] {
        &self.apps
    }

    pub fn find_by_id(&self, id: &str) -> Option<&AppInfo> {
        self.apps.iter().find(|app| app.id == id)
    }

    /// First registered app, shown at startup
    pub fn primary(&self) -> Option<&AppInfo> {
        self.apps.first()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

impl Default for AppRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Widgets that follow global state changes
///
/// # Example
/// ```ignore
/// impl StateChangeListener for ChatScreenRef {
///     fn on_dark_mode_change(&self, cx: &mut Cx, dark_mode: f64) {
///         if let Some(mut inner) = self.borrow_mut() {
///             inner.view.apply_over(cx, live!{
///                 draw_bg: { dark_mode: (dark_mode) }
///             });
///         }
///     }
/// }
/// ```
pub trait StateChangeListener {
    /// `dark_mode` runs from 0.0 (light) to 1.0 (dark)
    fn on_dark_mode_change(&self, cx: &mut Cx, dark_mode: f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat_info() -> AppInfo {
        AppInfo {
            name: "Journal Chat",
            id: "diarist-chat",
            description: "Chat with your journal",
        }
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = AppRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.primary().is_none());

        registry.register(chat_info());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find_by_id("diarist-chat"), Some(&chat_info()));
        assert!(registry.find_by_id("missing").is_none());
        assert_eq!(registry.primary().map(|a| a.id), Some("diarist-chat"));
    }

    #[test]
    fn test_duplicate_registration_ignored() {
        let mut registry = AppRegistry::default();
        registry.register(chat_info());
        registry.register(chat_info());
        assert_eq!(registry.apps().len(), 1);
    }
}
