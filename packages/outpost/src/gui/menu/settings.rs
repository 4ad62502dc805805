//! The settings menu: a two-tab configuration surface over the persisted
//! `Settings`.
//!
//! The menu edits a transient mirror of the settings. Widget callbacks
//! cannot borrow the menu they live in, so they push `SettingsAction`s onto
//! a shared queue which the menu drains after every dispatch. Nothing
//! escapes the mirror until apply commits it.

use crate::gui::{
    GuiWindowContext,
    Widget,
    WindowCommand,
    widget::{Button, Checkbox, Label, List, ListItem, Slider},
    widget::list::ROW_HEIGHT,
    widget::tab_panel::{HEADER_HEIGHT, TabPanel},
    event::{EventStatus, InputEvent, VirtualKeyCode},
    menu::Menu,
};
use graphics::frame_content::Canvas2;
use std::{
    cell::RefCell,
    collections::VecDeque,
    rc::Rc,
};
use vek::*;


const PANEL_WIDTH: f32 = 520.0;
const PANEL_TOP: f32 = 70.0;
const PANEL_BOTTOM_MARGIN: f32 = 130.0;
const PADDING: f32 = 16.0;
const SPEED_MIN: f32 = 0.1;
const SPEED_MAX: f32 = 3.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SettingsAction {
    SetVideoMode(usize),
    SetFullscreen(bool),
    SetReverseDrag(bool),
    SetBorderScrollSpeed(f32),
    SetKeyboardScrollSpeed(f32),
    SetZoomSpeed(f32),
    Apply,
    Cancel,
}

type ActionQueue = Rc<RefCell<VecDeque<SettingsAction>>>;

pub struct SettingsMenu {
    menu: Menu,
    actions: ActionQueue,
    video_mode_index: usize,
    fullscreen: bool,
    reverse_drag: bool,
    border_scroll_speed: f32,
    keyboard_scroll_speed: f32,
    zoom_speed: f32,
}

fn panel_rect(size: Extent2<f32>) -> Rect<f32, f32> {
    Rect::new(
        (size.w - PANEL_WIDTH) / 2.0,
        PANEL_TOP,
        PANEL_WIDTH,
        (size.h - PANEL_TOP - PANEL_BOTTOM_MARGIN).max(HEADER_HEIGHT),
    )
}

pub(crate) fn apply_button_rect(size: Extent2<f32>) -> Rect<f32, f32> {
    Rect::new(size.w / 2.0 - 170.0, size.h - 90.0, 160.0, 32.0)
}

pub(crate) fn cancel_button_rect(size: Extent2<f32>) -> Rect<f32, f32> {
    Rect::new(size.w / 2.0 + 10.0, size.h - 90.0, 160.0, 32.0)
}

impl SettingsMenu {
    pub fn new(ctx: &GuiWindowContext) -> Self {
        let current = ctx.settings.borrow().clone();
        let actions: ActionQueue = Rc::new(RefCell::new(VecDeque::new()));

        let panel = panel_rect(ctx.size);
        let mut tabs = TabPanel::new(panel);
        let graphics_tab = tabs.add_tab("graphics");
        let input_tab = tabs.add_tab("input");

        let left = panel.x + PADDING;
        let top = panel.y + HEADER_HEIGHT + PADDING;

        // graphics tab: video mode list, fullscreen checkbox
        tabs.push_to_tab(
            graphics_tab,
            Label::new(Vec2::new(left, top), "video mode", 16.0),
        );
        let list_rect = Rect::new(
            left,
            top + 24.0,
            260.0,
            ctx.display_modes.len() as f32 * ROW_HEIGHT,
        );
        let mut mode_list = List::new(
            list_rect,
            ctx.display_modes.iter()
                .enumerate()
                .map(|(key, mode)| ListItem {
                    key,
                    text: mode.to_string(),
                })
                .collect(),
        );
        mode_list.select_key(current.video_mode_index);
        {
            let actions = Rc::clone(&actions);
            mode_list.set_on_select(move |key| {
                actions.borrow_mut()
                    .push_back(SettingsAction::SetVideoMode(key));
            });
        }
        tabs.push_to_tab(graphics_tab, mode_list);

        let fullscreen_y = list_rect.y + list_rect.h + PADDING;
        let mut fullscreen_box = Checkbox::new(
            Rect::new(left, fullscreen_y, 24.0, 24.0),
            current.fullscreen,
        );
        {
            let actions = Rc::clone(&actions);
            fullscreen_box.set_on_toggle(move |state| {
                actions.borrow_mut()
                    .push_back(SettingsAction::SetFullscreen(state));
            });
        }
        tabs.push_to_tab(graphics_tab, fullscreen_box);
        tabs.push_to_tab(
            graphics_tab,
            Label::new(Vec2::new(left + 32.0, fullscreen_y + 4.0), "fullscreen", 16.0),
        );

        // input tab: reverse drag checkbox, three speed sliders
        let mut reverse_box = Checkbox::new(
            Rect::new(left, top, 24.0, 24.0),
            current.reverse_drag,
        );
        {
            let actions = Rc::clone(&actions);
            reverse_box.set_on_toggle(move |state| {
                actions.borrow_mut()
                    .push_back(SettingsAction::SetReverseDrag(state));
            });
        }
        tabs.push_to_tab(input_tab, reverse_box);
        tabs.push_to_tab(
            input_tab,
            Label::new(Vec2::new(left + 32.0, top + 4.0), "reverse drag", 16.0),
        );

        let sliders: [(&str, f32, fn(f32) -> SettingsAction); 3] = [
            (
                "border scroll speed",
                current.border_scroll_speed,
                SettingsAction::SetBorderScrollSpeed,
            ),
            (
                "keyboard scroll speed",
                current.keyboard_scroll_speed,
                SettingsAction::SetKeyboardScrollSpeed,
            ),
            (
                "zoom speed",
                current.zoom_speed,
                SettingsAction::SetZoomSpeed,
            ),
        ];
        for (row, (label, value, action)) in sliders.into_iter().enumerate() {
            let row_y = top + 48.0 + row as f32 * 56.0;
            tabs.push_to_tab(
                input_tab,
                Label::new(Vec2::new(left, row_y), label, 16.0),
            );
            let mut slider = Slider::new(
                Rect::new(left, row_y + 22.0, 260.0, 16.0),
                SPEED_MIN,
                SPEED_MAX,
                value,
            );
            {
                let actions = Rc::clone(&actions);
                slider.set_on_change(move |value| {
                    actions.borrow_mut().push_back(action(value));
                });
            }
            tabs.push_to_tab(input_tab, slider);
        }

        let mut menu = Menu::new("settings");
        menu.push(tabs);

        let mut apply = Button::new(apply_button_rect(ctx.size), "apply");
        {
            let actions = Rc::clone(&actions);
            apply.set_on_click(move || {
                actions.borrow_mut().push_back(SettingsAction::Apply);
            });
        }
        menu.push(apply);

        let mut cancel = Button::new(cancel_button_rect(ctx.size), "cancel");
        {
            let actions = Rc::clone(&actions);
            cancel.set_on_click(move || {
                actions.borrow_mut().push_back(SettingsAction::Cancel);
            });
        }
        menu.push(cancel);

        SettingsMenu {
            menu,
            actions,
            video_mode_index: current.video_mode_index,
            fullscreen: current.fullscreen,
            reverse_drag: current.reverse_drag,
            border_scroll_speed: current.border_scroll_speed,
            keyboard_scroll_speed: current.keyboard_scroll_speed,
            zoom_speed: current.zoom_speed,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.menu.is_closed()
    }

    /// Commit the in-menu values to the live settings and their file, ask
    /// the window for the selected display mode, and close.
    fn apply(&mut self, ctx: &GuiWindowContext) {
        {
            let mut settings = ctx.settings.borrow_mut();
            settings.video_mode_index = self.video_mode_index;
            settings.fullscreen = self.fullscreen;
            settings.reverse_drag = self.reverse_drag;
            settings.border_scroll_speed = self.border_scroll_speed;
            settings.keyboard_scroll_speed = self.keyboard_scroll_speed;
            settings.zoom_speed = self.zoom_speed;
        }
        ctx.save_settings();
        if let Some(&mode) = ctx.display_modes.get(self.video_mode_index) {
            ctx.push_command(WindowCommand::SetDisplayMode {
                mode,
                fullscreen: self.fullscreen,
            });
        }
        info!(
            "applied settings (mode {}, fullscreen {})",
            self.video_mode_index, self.fullscreen,
        );
        self.menu.close();
    }

    fn drain_actions(&mut self, ctx: &GuiWindowContext) {
        loop {
            let action = self.actions.borrow_mut().pop_front();
            match action {
                Some(SettingsAction::SetVideoMode(index)) => {
                    self.video_mode_index = index;
                }
                Some(SettingsAction::SetFullscreen(state)) => {
                    self.fullscreen = state;
                }
                Some(SettingsAction::SetReverseDrag(state)) => {
                    self.reverse_drag = state;
                }
                Some(SettingsAction::SetBorderScrollSpeed(value)) => {
                    self.border_scroll_speed = value;
                }
                Some(SettingsAction::SetKeyboardScrollSpeed(value)) => {
                    self.keyboard_scroll_speed = value;
                }
                Some(SettingsAction::SetZoomSpeed(value)) => {
                    self.zoom_speed = value;
                }
                Some(SettingsAction::Apply) => self.apply(ctx),
                Some(SettingsAction::Cancel) => self.menu.close(),
                None => break,
            }
        }
    }
}

impl Widget for SettingsMenu {
    fn handle_event(
        &mut self,
        ctx: &GuiWindowContext,
        event: &InputEvent,
    ) -> EventStatus {
        if let InputEvent::KeyDown { key: VirtualKeyCode::Escape } = *event {
            self.menu.close();
            return EventStatus::Handled;
        }
        let status = self.menu.handle_event(ctx, event);
        self.drain_actions(ctx);
        status
    }

    fn update(&mut self, ctx: &GuiWindowContext, dt: f32) {
        self.menu.update(ctx, dt);
    }

    fn draw(&self, ctx: &GuiWindowContext, canvas: Canvas2) {
        self.menu.draw(ctx, canvas);
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::event::MouseButton;
    use crate::gui::test_fixture::TestWindow;
    use crate::settings::Settings;

    fn left_click(pos: Vec2<f32>) -> InputEvent {
        InputEvent::MouseButtonDown {
            button: MouseButton::Left,
            pos,
        }
    }

    fn rect_center(rect: Rect<f32, f32>) -> Vec2<f32> {
        Vec2::new(rect.x + rect.w / 2.0, rect.y + rect.h / 2.0)
    }

    #[test]
    fn apply_commits_mode_and_fullscreen_and_requests_display_change() {
        let window = TestWindow::new();
        let _ = std::fs::remove_file(&window.settings_path);
        let mut menu = SettingsMenu::new(&window.ctx());

        // select the third of five enumerated modes, toggle fullscreen on
        menu.actions.borrow_mut()
            .push_back(SettingsAction::SetVideoMode(2));
        menu.actions.borrow_mut()
            .push_back(SettingsAction::SetFullscreen(true));
        let apply_at = rect_center(apply_button_rect(window.size));
        let status = menu.handle_event(&window.ctx(), &left_click(apply_at));

        assert!(status.is_handled());
        assert!(menu.is_closed());
        let settings = window.settings.borrow();
        assert_eq!(settings.video_mode_index, 2);
        assert_eq!(settings.fullscreen, true);

        let persisted = Settings::try_read(&window.settings_path).unwrap();
        assert_eq!(persisted.video_mode_index, 2);
        assert_eq!(persisted.fullscreen, true);

        let command = window.commands.borrow_mut().pop_front();
        assert_eq!(
            command,
            Some(WindowCommand::SetDisplayMode {
                mode: window.display_modes[2],
                fullscreen: true,
            }),
        );
        let _ = std::fs::remove_file(&window.settings_path);
    }

    #[test]
    fn cancel_discards_the_mirror() {
        let window = TestWindow::new();
        let mut menu = SettingsMenu::new(&window.ctx());

        menu.actions.borrow_mut()
            .push_back(SettingsAction::SetReverseDrag(true));
        let cancel_at = rect_center(cancel_button_rect(window.size));
        menu.handle_event(&window.ctx(), &left_click(cancel_at));

        assert!(menu.is_closed());
        assert_eq!(window.settings.borrow().reverse_drag, false);
        assert!(window.commands.borrow().is_empty());
    }

    #[test]
    fn escape_closes_without_committing() {
        let window = TestWindow::new();
        let mut menu = SettingsMenu::new(&window.ctx());
        menu.actions.borrow_mut()
            .push_back(SettingsAction::SetFullscreen(true));
        let status = menu.handle_event(
            &window.ctx(),
            &InputEvent::KeyDown { key: VirtualKeyCode::Escape },
        );
        assert!(status.is_handled());
        assert!(menu.is_closed());
        assert_eq!(window.settings.borrow().fullscreen, false);
    }

    #[test]
    fn menu_consumes_all_events_while_open() {
        let window = TestWindow::new();
        let mut menu = SettingsMenu::new(&window.ctx());
        let status = menu.handle_event(
            &window.ctx(),
            &left_click(Vec2::new(1.0, 1.0)),
        );
        assert!(status.is_handled());
        assert!(!menu.is_closed());
    }
}
