//! Chat Screen UI Design
//!
//! Contains the live_design! DSL block defining the UI layout and styling.

use makepad_widgets::*;

use super::ChatScreen;

live_design! {
    use link::theme::*;
    use link::shaders::*;
    use link::widgets::*;

    use diarist_widgets::theme::*;

    PANEL_RADIUS = 6.0
    PANEL_PADDING = 12.0

    // Toolbar toggle; `active` mirrors controller state
    ToggleButton = <Button> {
        width: Fit, height: 30
        padding: {left: 12, right: 12}
        draw_text: {
            instance dark_mode: 0.0
            instance active: 0.0
            text_style: <FONT_BOLD>{ font_size: 10.0 }
            fn get_color(self) -> vec4 {
                let base = mix((TEXT_SECONDARY), (TEXT_SECONDARY_DARK), self.dark_mode);
                return mix(base, (WHITE), self.active);
            }
        }
        draw_bg: {
            instance dark_mode: 0.0
            instance active: 0.0
            border_radius: 4.0
            fn pixel(self) -> vec4 {
                let sdf = Sdf2d::viewport(self.pos * self.rect_size);
                sdf.box(0., 0., self.rect_size.x, self.rect_size.y, self.border_radius);
                let idle = mix((SLATE_100), (SLATE_700), self.dark_mode);
                let hover = mix((HOVER_BG), (HOVER_BG_DARK), self.dark_mode);
                let base = mix(idle, hover, self.hover);
                sdf.fill(mix(base, (ACCENT), self.active));
                return sdf.result;
            }
        }
    }

    // One side panel block; header click toggles its category off
    LogBlockSlot = <RoundedView> {
        width: Fill, height: Fill
        visible: false
        flow: Down
        show_bg: true
        draw_bg: {
            instance dark_mode: 0.0
            border_radius: (PANEL_RADIUS)
            fn get_color(self) -> vec4 {
                return mix((PANEL_BG), (PANEL_BG_DARK), self.dark_mode);
            }
        }

        header = <Button> {
            width: Fill, height: 32
            padding: {left: 12, right: 12}
            align: {x: 0.0, y: 0.5}
            text: ""
            draw_text: {
                instance dark_mode: 0.0
                text_style: <FONT_BOLD>{ font_size: 10.0 }
                fn get_color(self) -> vec4 {
                    return mix((TEXT_PRIMARY), (TEXT_PRIMARY_DARK), self.dark_mode);
                }
            }
            draw_bg: {
                instance dark_mode: 0.0
                fn pixel(self) -> vec4 {
                    let sdf = Sdf2d::viewport(self.pos * self.rect_size);
                    sdf.rect(0., 0., self.rect_size.x, self.rect_size.y);
                    let base = mix((SLATE_50), (SLATE_700), self.dark_mode);
                    let hover = mix((HOVER_BG), (HOVER_BG_DARK), self.dark_mode);
                    sdf.fill(mix(base, hover, self.hover));
                    return sdf.result;
                }
            }
        }

        body_scroll = <ScrollYView> {
            width: Fill, height: Fill
            flow: Down
            scroll_bars: <ScrollBars> {
                show_scroll_x: false
                show_scroll_y: true
            }

            body_wrapper = <View> {
                width: Fill, height: Fit
                padding: {left: 12, right: 12, top: 8, bottom: 8}

                body = <Label> {
                    width: Fill, height: Fit
                    text: ""
                    draw_text: {
                        instance dark_mode: 0.0
                        instance failed: 0.0
                        text_style: <FONT_REGULAR>{ font_size: 10.0 }
                        wrap: Word
                        fn get_color(self) -> vec4 {
                            let base = mix((TEXT_SECONDARY), (TEXT_SECONDARY_DARK), self.dark_mode);
                            return mix(base, (ERROR_TEXT), self.failed);
                        }
                    }
                }
            }
        }
    }

    pub ChatScreen = {{ChatScreen}} {
        width: Fill, height: Fill
        flow: Right
        spacing: 12
        padding: 16
        show_bg: true
        draw_bg: {
            instance dark_mode: 0.0
            fn pixel(self) -> vec4 {
                return mix((DARK_BG), (DARK_BG_DARK), self.dark_mode);
            }
        }

        // Left column - transcript, toolbar, prompt
        chat_column = <View> {
            width: Fill, height: Fill
            flow: Down
            spacing: 12

            header = <View> {
                width: Fill, height: Fit
                flow: Right
                spacing: 12
                align: {y: 0.5}

                title = <Label> {
                    text: "Journal"
                    draw_text: {
                        instance dark_mode: 0.0
                        text_style: <FONT_BOLD>{ font_size: 20.0 }
                        fn get_color(self) -> vec4 {
                            return mix((TEXT_PRIMARY), (TEXT_PRIMARY_DARK), self.dark_mode);
                        }
                    }
                }

                mode_badge = <Label> {
                    text: ""
                    draw_text: {
                        text_style: <FONT_BOLD>{ font_size: 10.0 }
                        color: (AMBER_500)
                    }
                }

                <View> { width: Fill, height: 1 }

                copy_chat_btn = <ToggleButton> { text: "Copy" }
            }

            chat_section = <RoundedView> {
                width: Fill, height: Fill
                show_bg: true
                draw_bg: {
                    instance dark_mode: 0.0
                    border_radius: (PANEL_RADIUS)
                    fn get_color(self) -> vec4 {
                        return mix((PANEL_BG), (PANEL_BG_DARK), self.dark_mode);
                    }
                }

                chat_scroll = <ScrollYView> {
                    width: Fill, height: Fill
                    flow: Down
                    scroll_bars: <ScrollBars> {
                        show_scroll_x: false
                        show_scroll_y: true
                    }

                    chat_content_wrapper = <View> {
                        width: Fill, height: Fit
                        padding: {left: 16, right: 16, top: 12, bottom: 12}
                        flow: Down

                        chat_content = <Markdown> {
                            width: Fill, height: Fit
                            font_size: 11.0
                            paragraph_spacing: 6

                            draw_normal: {
                                instance dark_mode: 0.0
                                text_style: <FONT_REGULAR>{ font_size: 11.0 }
                                fn get_color(self) -> vec4 {
                                    return mix((TEXT_PRIMARY), (TEXT_PRIMARY_DARK), self.dark_mode);
                                }
                            }
                            draw_bold: {
                                instance dark_mode: 0.0
                                text_style: <FONT_BOLD>{ font_size: 11.0 }
                                fn get_color(self) -> vec4 {
                                    return mix((TEXT_PRIMARY), (TEXT_PRIMARY_DARK), self.dark_mode);
                                }
                            }
                            draw_italic: {
                                instance dark_mode: 0.0
                                text_style: <FONT_REGULAR>{ font_size: 11.0 }
                                fn get_color(self) -> vec4 {
                                    return mix((TEXT_SECONDARY), (TEXT_SECONDARY_DARK), self.dark_mode);
                                }
                            }
                        }
                    }
                }
            }

            toolbar = <View> {
                width: Fill, height: Fit
                flow: Right
                spacing: 8
                align: {y: 0.5}

                history_btn = <ToggleButton> { text: "◯ Use History" }

                <View> { width: Fill, height: 1 }

                tasks_btn = <ToggleButton> { text: "TASKS" }
                feedback_btn = <ToggleButton> { text: "FEEDBACK" }
                events_btn = <ToggleButton> { text: "EVENTS" }
                goals_btn = <ToggleButton> { text: "GOALS" }
                logs_btn = <ToggleButton> { text: "Logs" }
            }

            prompt_section = <RoundedView> {
                width: Fill, height: Fit
                padding: (PANEL_PADDING)
                flow: Right
                spacing: 12
                align: {y: 0.5}
                show_bg: true
                draw_bg: {
                    instance dark_mode: 0.0
                    border_radius: (PANEL_RADIUS)
                    fn get_color(self) -> vec4 {
                        return mix((PANEL_BG), (PANEL_BG_DARK), self.dark_mode);
                    }
                }

                prompt_input = <TextInput> {
                    width: Fill, height: Fit
                    padding: {left: 12, right: 12, top: 10, bottom: 10}
                    empty_text: "Write about your day... (Enter to send)"
                    draw_bg: {
                        instance dark_mode: 0.0
                        border_radius: 4.0
                        fn pixel(self) -> vec4 {
                            let sdf = Sdf2d::viewport(self.pos * self.rect_size);
                            sdf.box(0., 0., self.rect_size.x, self.rect_size.y, self.border_radius);
                            sdf.fill(mix((SLATE_50), (SLATE_700), self.dark_mode));
                            return sdf.result;
                        }
                    }
                    draw_text: {
                        instance dark_mode: 0.0
                        text_style: <FONT_REGULAR>{ font_size: 11.0 }
                        fn get_color(self) -> vec4 {
                            return mix((TEXT_PRIMARY), (TEXT_PRIMARY_DARK), self.dark_mode);
                        }
                    }
                }

                send_btn = <Button> {
                    width: Fit, height: 35
                    padding: {left: 16, right: 16}
                    text: "Send"
                    draw_text: {
                        color: (WHITE)
                        text_style: <FONT_BOLD>{ font_size: 11.0 }
                    }
                    draw_bg: {
                        border_radius: 4.0
                        fn pixel(self) -> vec4 {
                            let sdf = Sdf2d::viewport(self.pos * self.rect_size);
                            sdf.box(0., 0., self.rect_size.x, self.rect_size.y, self.border_radius);
                            sdf.fill(mix((ACCENT), (ACCENT_DARK), self.hover));
                            return sdf.result;
                        }
                    }
                }
            }
        }

        // Right column - derived log blocks, hidden until opened
        log_section = <View> {
            width: 360, height: Fill
            visible: false
            flow: Down
            spacing: 8

            // Visible slots are Fill siblings, so each gets an equal share
            block_0 = <LogBlockSlot> {}
            block_1 = <LogBlockSlot> {}
            block_2 = <LogBlockSlot> {}
            block_3 = <LogBlockSlot> {}

            empty_hint = <Label> {
                width: Fill, height: Fit
                visible: false
                text: "Pick a log category to show it here"
                draw_text: {
                    instance dark_mode: 0.0
                    text_style: <FONT_REGULAR>{ font_size: 10.0 }
                    fn get_color(self) -> vec4 {
                        return mix((TEXT_SECONDARY), (TEXT_SECONDARY_DARK), self.dark_mode);
                    }
                }
            }
        }
    }
}
