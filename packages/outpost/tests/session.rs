//! Drives a whole client session over a loopback connection: join,
//! reconciliation, selection, move orders, and the settings menu, all
//! through the public widget interface.

use outpost::{
    game::GameHandler,
    gui::{
        DisplayMode,
        GuiWindowContext,
        Widget,
        WindowCommand,
        event::{InputEvent, MouseButton, VirtualKeyCode},
    },
    net::{
        Connection,
        ServerEnd,
        message::{
            DownMessage,
            GameMap,
            LogicalObject,
            ObjectId,
            ObjectKind,
            TileKind,
            UpMessage,
            WorldSnapshot,
        },
    },
    player::{Player, PlayerId},
    settings::Settings,
};
use graphics::frame_content::FrameContent;
use std::{
    cell::RefCell,
    collections::{HashSet, VecDeque},
    path::PathBuf,
};
use vek::*;


/// Owns everything a `GuiWindowContext` borrows.
struct Harness {
    size: Extent2<f32>,
    pressed_keys: HashSet<VirtualKeyCode>,
    pressed_mouse_buttons: HashSet<MouseButton>,
    settings: RefCell<Settings>,
    settings_path: PathBuf,
    display_modes: Vec<DisplayMode>,
    commands: RefCell<VecDeque<WindowCommand>>,
}

impl Harness {
    fn new(settings_file: &str) -> Self {
        Harness {
            size: Extent2 { w: 800.0, h: 600.0 },
            pressed_keys: HashSet::new(),
            pressed_mouse_buttons: HashSet::new(),
            settings: RefCell::new(Settings::default()),
            settings_path: std::env::temp_dir().join(settings_file),
            display_modes: vec![
                DisplayMode { size: Extent2 { w: 800, h: 600 } },
                DisplayMode { size: Extent2 { w: 1280, h: 720 } },
                DisplayMode { size: Extent2 { w: 1920, h: 1080 } },
            ],
            commands: RefCell::new(VecDeque::new()),
        }
    }

    fn ctx(&self) -> GuiWindowContext {
        GuiWindowContext {
            size: self.size,
            scale: 1.0,
            cursor_pos: None,
            pressed_keys: &self.pressed_keys,
            pressed_mouse_buttons: &self.pressed_mouse_buttons,
            settings: &self.settings,
            settings_path: &self.settings_path,
            display_modes: &self.display_modes,
            commands: &self.commands,
        }
    }
}

fn unit(id: u32, pos: [f32; 2], owner: u32) -> LogicalObject {
    LogicalObject {
        id: ObjectId(id),
        kind: ObjectKind::Unit,
        pos,
        owner: Some(PlayerId(owner)),
    }
}

fn start_session(harness: &Harness) -> (GameHandler, ServerEnd) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    let (connection, server) = Connection::loopback();
    let mut handler = GameHandler::new(connection, "pelaaja", harness.size);

    assert_eq!(
        server.try_recv(),
        Some(UpMessage::Join { name: "pelaaja".to_owned() }),
    );
    assert!(server.send(DownMessage::Welcome {
        player: Player { id: PlayerId(0), name: "pelaaja".to_owned() },
        map: GameMap {
            size: [32, 32],
            tiles: vec![TileKind::Grass; 32 * 32],
        },
    }));
    handler.update_state(&harness.ctx(), 0.0);
    (handler, server)
}

fn click(
    handler: &mut GameHandler,
    ctx: &GuiWindowContext,
    button: MouseButton,
    pos: Vec2<f32>,
) {
    handler.handle_event(ctx, &InputEvent::MouseButtonDown { button, pos });
    handler.handle_event(ctx, &InputEvent::MouseButtonUp { button, pos });
}

#[test]
fn select_and_order_units() {
    let harness = Harness::new("outpost-session-select.json");
    let (mut handler, server) = start_session(&harness);

    assert!(server.send(DownMessage::Snapshot(WorldSnapshot {
        objects: vec![
            unit(1, [15.0, 15.0], 0),
            unit(2, [16.0, 15.0], 0),
            unit(3, [24.0, 24.0], 1),
        ],
    })));
    handler.update_state(&harness.ctx(), 0.016);
    assert_eq!(handler.object_count(), 3);

    // drag a selection rectangle around the two friendly units
    let a = handler.view().world_to_screen(Vec2::new(14.0, 14.0));
    let b = handler.view().world_to_screen(Vec2::new(17.0, 16.0));
    let ctx = harness.ctx();
    handler.handle_event(&ctx, &InputEvent::MouseButtonDown {
        button: MouseButton::Left,
        pos: a,
    });
    handler.handle_event(&ctx, &InputEvent::MouseMoved { pos: b });
    handler.handle_event(&ctx, &InputEvent::MouseButtonUp {
        button: MouseButton::Left,
        pos: b,
    });
    assert_eq!(handler.selected_ids(), vec![ObjectId(1), ObjectId(2)]);

    // right-click orders the selection to the clicked spot
    let target = handler.view().world_to_screen(Vec2::new(20.0, 18.0));
    click(&mut handler, &ctx, MouseButton::Right, target);
    match server.try_recv() {
        Some(UpMessage::MoveOrder { objects, target }) => {
            assert_eq!(objects, vec![ObjectId(1), ObjectId(2)]);
            assert!((target[0] - 20.0).abs() < 1e-3);
            assert!((target[1] - 18.0).abs() < 1e-3);
        }
        other => panic!("unexpected message: {:?}", other),
    }

    // a later snapshot without unit 2 prunes it from the selection
    assert!(server.send(DownMessage::Snapshot(WorldSnapshot {
        objects: vec![
            unit(1, [15.0, 15.0], 0),
            unit(3, [24.0, 24.0], 1),
        ],
    })));
    handler.update_state(&harness.ctx(), 0.016);
    assert_eq!(handler.selected_ids(), vec![ObjectId(1)]);
}

#[test]
fn settings_menu_over_the_game() {
    let harness = Harness::new("outpost-session-settings.json");
    let _ = std::fs::remove_file(&harness.settings_path);
    let (mut handler, server) = start_session(&harness);

    assert!(server.send(DownMessage::Snapshot(WorldSnapshot {
        objects: vec![unit(1, [16.0, 16.0], 0)],
    })));
    handler.update_state(&harness.ctx(), 0.016);

    let ctx = harness.ctx();
    handler.handle_event(&ctx, &InputEvent::KeyDown {
        key: VirtualKeyCode::Escape,
    });
    assert!(handler.settings_menu_open());

    // the menu captures clicks; the game selection stays empty
    let on_unit = handler.view().world_to_screen(Vec2::new(16.0, 16.0));
    click(&mut handler, &ctx, MouseButton::Left, on_unit);
    assert_eq!(handler.selected_ids(), vec![]);

    // closing returns input to the game
    handler.handle_event(&ctx, &InputEvent::KeyDown {
        key: VirtualKeyCode::Escape,
    });
    assert!(!handler.settings_menu_open());
    click(&mut handler, &ctx, MouseButton::Left, on_unit);
    assert_eq!(handler.selected_ids(), vec![ObjectId(1)]);
}

#[test]
fn frames_describe_the_scene() {
    let harness = Harness::new("outpost-session-frames.json");
    let (mut handler, server) = start_session(&harness);
    assert!(server.send(DownMessage::Snapshot(WorldSnapshot {
        objects: vec![unit(1, [16.0, 16.0], 0)],
    })));
    handler.update_state(&harness.ctx(), 0.016);

    let mut frame = FrameContent::new();
    handler.draw(&harness.ctx(), frame.canvas());
    // terrain plus the unit plus the status line, at minimum
    assert!(frame.items().len() > 10);

    let before = frame.items().len();
    handler.handle_event(&harness.ctx(), &InputEvent::KeyDown {
        key: VirtualKeyCode::Escape,
    });
    let mut frame = FrameContent::new();
    handler.draw(&harness.ctx(), frame.canvas());
    // the open menu draws on top of the game
    assert!(frame.items().len() > before);
}
