//! Diarist Studio App - main application shell
//!
//! Hosts the journal chat screen in a window with a header bar and a
//! light/dark theme toggle.

use diarist_chat::{ChatScreenWidgetRefExt, DiaristChatApp};
use diarist_widgets::{AppRegistry, DiaristApp, StateChangeListener};
use makepad_widgets::*;

use crate::preferences::Preferences;

/// Theme cross-fade duration in seconds
const DARK_MODE_ANIM_DURATION: f64 = 0.3;

live_design! {
    use link::theme::*;
    use link::shaders::*;
    use link::widgets::*;

    use diarist_widgets::theme::*;
    use diarist_chat::screen::design::ChatScreen;

    App = {{App}} {
        ui: <Window> {
            window: { title: "Diarist Studio", inner_size: vec2(1280, 860) }
            pass: { clear_color: (DARK_BG) }
            flow: Down

            body = <View> {
                width: Fill, height: Fill
                flow: Down

                header = <View> {
                    width: Fill, height: 56
                    flow: Right
                    padding: {left: 20, right: 20}
                    align: {y: 0.5}
                    show_bg: true
                    draw_bg: {
                        instance dark_mode: 0.0
                        fn pixel(self) -> vec4 {
                            let sdf = Sdf2d::viewport(self.pos * self.rect_size);
                            sdf.rect(0., 0., self.rect_size.x, self.rect_size.y);
                            sdf.fill(mix((PANEL_BG), (PANEL_BG_DARK), self.dark_mode));
                            // Bottom border
                            sdf.rect(0., self.rect_size.y - 1.0, self.rect_size.x, 1.0);
                            sdf.fill(mix((DIVIDER), (DIVIDER_DARK), self.dark_mode));
                            return sdf.result;
                        }
                    }

                    app_title = <Label> {
                        text: "Diarist Studio"
                        draw_text: {
                            instance dark_mode: 0.0
                            text_style: <FONT_BOLD>{ font_size: 16.0 }
                            fn get_color(self) -> vec4 {
                                return mix((TEXT_PRIMARY), (TEXT_PRIMARY_DARK), self.dark_mode);
                            }
                        }
                    }

                    <View> { width: Fill, height: 1 }

                    theme_toggle = <Button> {
                        width: Fit, height: 30
                        padding: {left: 12, right: 12}
                        text: "Dark"
                        draw_text: {
                            instance dark_mode: 0.0
                            text_style: <FONT_REGULAR>{ font_size: 10.0 }
                            fn get_color(self) -> vec4 {
                                return mix((GRAY_700), (SLATE_200), self.dark_mode);
                            }
                        }
                        draw_bg: {
                            instance dark_mode: 0.0
                            border_radius: 4.0
                            fn pixel(self) -> vec4 {
                                let sdf = Sdf2d::viewport(self.pos * self.rect_size);
                                sdf.box(0., 0., self.rect_size.x, self.rect_size.y, self.border_radius);
                                let normal = mix((SLATE_100), (SLATE_700), self.dark_mode);
                                let hover = mix((HOVER_BG), (HOVER_BG_DARK), self.dark_mode);
                                sdf.fill(mix(normal, hover, self.hover));
                                return sdf.result;
                            }
                        }
                    }
                }

                chat_screen = <ChatScreen> {}
            }
        }
    }
}

#[derive(Live, LiveHook)]
pub struct App {
    #[live]
    ui: WidgetRef,
    /// Registry of installed apps (populated on init)
    #[rust]
    app_registry: AppRegistry,
    #[rust]
    dark_mode: bool,
    /// Dark mode animation progress (0.0 = light, 1.0 = dark)
    #[rust]
    dark_mode_anim: f64,
    #[rust]
    dark_mode_animating: bool,
    #[rust]
    dark_mode_anim_start: f64,
    /// Initial theme applied on first draw
    #[rust]
    theme_initialized: bool,
}

impl LiveRegister for App {
    fn live_register(cx: &mut Cx) {
        makepad_widgets::live_design(cx);
        diarist_widgets::live_design(cx);
        <DiaristChatApp as DiaristApp>::live_design(cx);
    }
}

impl AppMain for App {
    fn handle_event(&mut self, cx: &mut Cx, event: &Event) {
        if let Event::Startup = event {
            self.on_startup(cx);
        }

        self.ui.handle_event(cx, event, &mut Scope::empty());

        if !self.theme_initialized {
            if let Event::Draw(_) = event {
                self.theme_initialized = true;
                self.apply_dark_mode_panels(cx);
                self.apply_dark_mode_screens(cx, self.dark_mode_anim);
                self.update_theme_toggle_label(cx);
            }
        }

        if self.dark_mode_animating {
            self.update_dark_mode_animation(cx);
        }

        let actions = match event {
            Event::Actions(actions) => actions.as_slice(),
            _ => &[],
        };

        if self
            .ui
            .button(ids!(body.header.theme_toggle))
            .clicked(actions)
        {
            self.toggle_dark_mode(cx);
        }
    }
}

impl App {
    fn on_startup(&mut self, cx: &mut Cx) {
        self.app_registry.register(DiaristChatApp::info());
        if let Some(app) = self.app_registry.primary() {
            ::log::info!("Loaded app '{}' ({})", app.name, app.id);
            let title = format!("Diarist Studio - {}", app.name);
            self.ui
                .label(ids!(body.header.app_title))
                .set_text(cx, &title);
        }

        let prefs = Preferences::load();
        self.dark_mode = prefs.dark_mode;
        self.dark_mode_anim = if prefs.dark_mode { 1.0 } else { 0.0 };
    }

    fn toggle_dark_mode(&mut self, cx: &mut Cx) {
        self.dark_mode = !self.dark_mode;
        self.dark_mode_animating = true;
        self.dark_mode_anim_start = Cx::time_now();

        // Screens snap to the target; only the chrome animates
        let target = if self.dark_mode { 1.0 } else { 0.0 };
        self.apply_dark_mode_screens(cx, target);
        self.update_theme_toggle_label(cx);

        let prefs = Preferences {
            dark_mode: self.dark_mode,
        };
        if let Err(e) = prefs.save() {
            ::log::warn!("Failed to save dark mode preference: {}", e);
        }

        self.ui.redraw(cx);
    }

    fn update_dark_mode_animation(&mut self, cx: &mut Cx) {
        let elapsed = Cx::time_now() - self.dark_mode_anim_start;

        // Ease-out cubic
        let t = (elapsed / DARK_MODE_ANIM_DURATION).min(1.0);
        let eased = 1.0 - (1.0 - t).powi(3);

        let target = if self.dark_mode { 1.0 } else { 0.0 };
        let start = 1.0 - target;
        self.dark_mode_anim = start + (target - start) * eased;
        self.apply_dark_mode_panels(cx);

        if t >= 1.0 {
            self.dark_mode_animating = false;
            self.dark_mode_anim = target;
        } else {
            cx.new_next_frame();
        }

        self.ui.redraw(cx);
    }

    fn apply_dark_mode_panels(&mut self, cx: &mut Cx) {
        let dm = self.dark_mode_anim;

        self.ui.view(ids!(body.header)).apply_over(
            cx,
            live! {
                draw_bg: { dark_mode: (dm) }
            },
        );
        self.ui.label(ids!(body.header.app_title)).apply_over(
            cx,
            live! {
                draw_text: { dark_mode: (dm) }
            },
        );
        self.ui.button(ids!(body.header.theme_toggle)).apply_over(
            cx,
            live! {
                draw_bg: { dark_mode: (dm) }
                draw_text: { dark_mode: (dm) }
            },
        );
    }

    fn apply_dark_mode_screens(&mut self, cx: &mut Cx, dm: f64) {
        self.ui
            .chat_screen(ids!(body.chat_screen))
            .on_dark_mode_change(cx, dm);
    }

    fn update_theme_toggle_label(&mut self, cx: &mut Cx) {
        let label = if self.dark_mode { "Light" } else { "Dark" };
        self.ui
            .button(ids!(body.header.theme_toggle))
            .set_text(cx, label);
    }
}

app_main!(App);
