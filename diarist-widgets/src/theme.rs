//! Color palette and fonts
//!
//! Every surface color comes as a light/dark pair (`X` / `X_DARK`); widgets
//! blend them with an `instance dark_mode` shader input.

use makepad_widgets::*;

live_design! {
    use link::theme::*;

    // Fonts
    pub FONT_REGULAR = <THEME_FONT_REGULAR> {}
    pub FONT_BOLD = <THEME_FONT_BOLD> {}

    // Base scale
    pub WHITE = #ffffff
    pub TRANSPARENT = #00000000
    pub SLATE_50 = #f8fafc
    pub SLATE_100 = #f1f5f9
    pub SLATE_200 = #e2e8f0
    pub SLATE_400 = #94a3b8
    pub SLATE_500 = #64748b
    pub SLATE_600 = #475569
    pub SLATE_700 = #334155
    pub SLATE_800 = #1e293b
    pub SLATE_900 = #0f172a
    pub GRAY_700 = #374151
    pub INDIGO_500 = #6366f1
    pub INDIGO_600 = #4f46e5
    pub AMBER_500 = #f59e0b
    pub RED_500 = #ef4444

    // Semantic
    pub DARK_BG = (SLATE_100)
    pub DARK_BG_DARK = (SLATE_900)
    pub PANEL_BG = (WHITE)
    pub PANEL_BG_DARK = (SLATE_800)
    pub TEXT_PRIMARY = (SLATE_800)
    pub TEXT_PRIMARY_DARK = (SLATE_100)
    pub TEXT_SECONDARY = (SLATE_500)
    pub TEXT_SECONDARY_DARK = (SLATE_400)
    pub DIVIDER = (SLATE_200)
    pub DIVIDER_DARK = (SLATE_700)
    pub ACCENT = (INDIGO_500)
    pub ACCENT_DARK = (INDIGO_600)
    pub HOVER_BG = (SLATE_200)
    pub HOVER_BG_DARK = (SLATE_700)
    pub ERROR_TEXT = (RED_500)
}
