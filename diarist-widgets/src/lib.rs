//! # Diarist Widgets
//!
//! Shared UI infrastructure for Diarist Studio apps built on
//! [Makepad](https://github.com/makepad/makepad).
//!
//! ## Modules
//!
//! - [`theme`] - Color palette, fonts, and dark mode pairs
//! - [`app_trait`] - Plugin app interface (`DiaristApp`, `AppRegistry`)
//!
//! ## Theme System
//!
//! ```rust,ignore
//! live_design! {
//!     use diarist_widgets::theme::*;
//!
//!     MyWidget = <View> {
//!         draw_bg: {
//!             instance dark_mode: 0.0
//!             fn pixel(self) -> vec4 {
//!                 return mix((PANEL_BG), (PANEL_BG_DARK), self.dark_mode);
//!             }
//!         }
//!     }
//! }
//! ```

pub mod app_trait;
pub mod theme;

pub use app_trait::{AppInfo, AppRegistry, DiaristApp, StateChangeListener};

use makepad_widgets::Cx;

/// Register shared widgets with Makepad.
///
/// Call from `LiveRegister::live_register` before any app registers its
/// screens, since they import the theme.
pub fn live_design(cx: &mut Cx) {
    theme::live_design(cx);
}
