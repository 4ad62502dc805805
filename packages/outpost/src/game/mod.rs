//! The game GUI: mediates between the network connection, the logical
//! simulation snapshot it exposes, and the rendered scene.

use crate::{
    gui::{
        GuiWindowContext,
        Widget,
        WindowCommand,
        color,
        menu::SettingsMenu,
        event::{
            EventStatus,
            InputEvent,
            MouseButton,
            ScrolledAmount,
            VirtualKeyCode,
        },
    },
    net::{
        Connection,
        message::{
            DownMessage,
            GameMap,
            LogicalObject,
            ObjectId,
            TileKind,
            UpMessage,
            WorldSnapshot,
        },
    },
    player::Player,
};
use self::{
    image_cache::ImageCache,
    mouse_tracker::MouseTracker,
    object::GameObject,
    scrolling_view::ScrollingView,
};
use graphics::{
    Renderer,
    frame_content::{Canvas2, HAlign, TextBlock, VAlign},
};
use std::{
    collections::{BTreeSet, HashMap, HashSet},
    path::Path,
};
use vek::*;


pub mod image_cache;
pub mod mouse_tracker;
pub mod object;
pub mod scrolling_view;


/// Scroll speed in pixels per second before the settings scale factors.
const BASE_SCROLL_SPEED: f32 = 400.0;
/// Cursor distance from a window edge that triggers border scrolling.
const EDGE_SCROLL_MARGIN: f32 = 16.0;
/// Press and release within this many pixels counts as a click, not a drag.
const TAP_TOLERANCE: f32 = 10.0;
/// World-space radius of click selection.
const CLICK_PICK_RANGE: f32 = 1.2;
/// Zoom change per scroll line at zoom speed 1.
const ZOOM_STEP: f32 = 0.1;
/// Pixels per scroll line for trackpad deltas.
const SCROLL_LINE_PX: f32 = 40.0;

const SPRITES: [(&str, &str); 5] = [
    ("unit", "unit.png"),
    ("building", "building.png"),
    ("tile-grass", "tile-grass.png"),
    ("tile-forest", "tile-forest.png"),
    ("tile-water", "tile-water.png"),
];


pub struct GameHandler {
    connection: Connection,
    view: ScrollingView,
    mouse: MouseTracker,
    images: ImageCache,
    /// At most one GUI proxy per logical identity, ever.
    objects: HashMap<ObjectId, GameObject>,
    /// Ids only; validated against the object map on every reconciliation.
    selection: BTreeSet<ObjectId>,
    /// World positions where each held mouse button went down.
    mouse_down_pos: HashMap<MouseButton, Vec2<f32>>,
    selecting: bool,
    player: Option<Player>,
    map: Option<GameMap>,
    settings_menu: Option<SettingsMenu>,
    closed: bool,
}

impl GameHandler {
    pub fn new(
        mut connection: Connection,
        player_name: &str,
        viewport: Extent2<f32>,
    ) -> Self {
        connection.send(UpMessage::Join {
            name: player_name.to_owned(),
        });
        GameHandler {
            connection,
            view: ScrollingView::new(viewport),
            mouse: MouseTracker::new(),
            images: ImageCache::new(),
            objects: HashMap::new(),
            selection: BTreeSet::new(),
            mouse_down_pos: HashMap::new(),
            selecting: false,
            player: None,
            map: None,
            settings_menu: None,
            closed: false,
        }
    }

    /// Load map and object graphics. Missing sprites are logged and fall
    /// back to colored quads.
    pub fn load_map_data(&mut self, renderer: &mut dyn Renderer, dir: &Path) {
        for (key, file) in SPRITES {
            if let Err(e) = self.images.load(renderer, key, &dir.join(file)) {
                warn!("sprite {:?} unavailable: {:#}", key, e);
            }
        }
    }

    /// The GUI proxy for a logical object, created on first sighting.
    pub fn game_object(&mut self, logical: &LogicalObject) -> &mut GameObject {
        self.objects
            .entry(logical.id)
            .or_insert_with(|| GameObject::new(logical))
    }

    /// Tracked objects within `range` of `pos`, closest first (ties broken
    /// by id), limited to `how_many` results. Zero means unlimited.
    pub fn objects_within_range(
        &self,
        pos: Vec2<f32>,
        range: f32,
        how_many: usize,
    ) -> Vec<ObjectId> {
        let mut hits: Vec<(f32, ObjectId)> = self.objects.values()
            .map(|object| (object.pos().distance(pos), object.id()))
            .filter(|&(distance, _)| distance <= range)
            .collect();
        hits.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.1.cmp(&b.1))
        });
        if how_many > 0 {
            hits.truncate(how_many);
        }
        hits.into_iter().map(|(_, id)| id).collect()
    }

    /// The camera; exposed so the host can inspect or preset it.
    pub fn view(&self) -> &ScrollingView {
        &self.view
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn has_object(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn selected_ids(&self) -> Vec<ObjectId> {
        self.selection.iter().copied().collect()
    }

    pub fn settings_menu_open(&self) -> bool {
        self.settings_menu.is_some()
    }

    pub fn open_settings_menu(&mut self, ctx: &GuiWindowContext) {
        if self.settings_menu.is_none() {
            self.settings_menu = Some(SettingsMenu::new(ctx));
        }
    }

    /// Set the closed flag the host loop consumes. Does not tear down the
    /// connection; that stays with its owner.
    pub fn exit(&mut self, ctx: &GuiWindowContext) {
        info!("leaving game");
        self.closed = true;
        ctx.push_command(WindowCommand::Exit);
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Reconcile the GUI state with the simulation and advance per-frame
    /// motion. Never blocks on the connection.
    pub fn update_state(&mut self, ctx: &GuiWindowContext, dt: f32) {
        self.poll_connection();
        for object in self.objects.values_mut() {
            object.advance(dt);
        }
        if self.settings_menu.is_none() {
            self.scroll_from_keys(ctx, dt);
            self.scroll_from_border(ctx, dt);
        }
        self.mouse.refresh(&self.view);
    }

    fn poll_connection(&mut self) {
        loop {
            match self.connection.poll() {
                Ok(Some(DownMessage::Welcome { player, map })) => {
                    info!("joined as {:?} (player {})", player.name, player.id.0);
                    self.view.set_world_bounds(Rect::new(
                        0.0,
                        0.0,
                        map.size[0] as f32,
                        map.size[1] as f32,
                    ));
                    self.player = Some(player);
                    self.map = Some(map);
                }
                Ok(Some(DownMessage::Snapshot(snapshot))) => {
                    self.apply_snapshot(&snapshot);
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("connection error: {:#}", e);
                    break;
                }
            }
        }
    }

    fn apply_snapshot(&mut self, snapshot: &WorldSnapshot) {
        for logical in &snapshot.objects {
            self.game_object(logical).sync(logical);
        }
        let live: HashSet<ObjectId> =
            snapshot.objects.iter().map(|logical| logical.id).collect();
        self.objects.retain(|id, _| live.contains(id));
        // no dangling selection survives a reconciliation pass
        let Self { objects, selection, .. } = self;
        selection.retain(|id| objects.contains_key(id));
    }

    fn scroll_from_keys(&mut self, ctx: &GuiWindowContext, dt: f32) {
        let mut dir = Vec2::zero();
        if ctx.key_down(VirtualKeyCode::W) || ctx.key_down(VirtualKeyCode::Up) {
            dir.y -= 1.0;
        }
        if ctx.key_down(VirtualKeyCode::S) || ctx.key_down(VirtualKeyCode::Down) {
            dir.y += 1.0;
        }
        if ctx.key_down(VirtualKeyCode::A) || ctx.key_down(VirtualKeyCode::Left) {
            dir.x -= 1.0;
        }
        if ctx.key_down(VirtualKeyCode::D) || ctx.key_down(VirtualKeyCode::Right) {
            dir.x += 1.0;
        }
        if dir != Vec2::zero() {
            let speed = BASE_SCROLL_SPEED
                * ctx.settings.borrow().keyboard_scroll_speed;
            self.view.scroll_pixels(dir.normalized() * speed * dt);
        }
    }

    fn scroll_from_border(&mut self, ctx: &GuiWindowContext, dt: f32) {
        let cursor = match ctx.cursor_pos {
            Some(cursor) => cursor,
            None => return,
        };
        let mut dir = Vec2::zero();
        if cursor.x <= EDGE_SCROLL_MARGIN {
            dir.x -= 1.0;
        }
        if cursor.x >= ctx.size.w - EDGE_SCROLL_MARGIN {
            dir.x += 1.0;
        }
        if cursor.y <= EDGE_SCROLL_MARGIN {
            dir.y -= 1.0;
        }
        if cursor.y >= ctx.size.h - EDGE_SCROLL_MARGIN {
            dir.y += 1.0;
        }
        if dir != Vec2::zero() {
            let speed = BASE_SCROLL_SPEED
                * ctx.settings.borrow().border_scroll_speed;
            self.view.scroll_pixels(dir.normalized() * speed * dt);
        }
    }

    fn is_tap(&self, a: Vec2<f32>, b: Vec2<f32>) -> bool {
        a.distance(b) * self.view.zoom() <= TAP_TOLERANCE
    }

    fn select_at(&mut self, world: Vec2<f32>) {
        self.selection = self
            .objects_within_range(world, CLICK_PICK_RANGE, 1)
            .into_iter()
            .collect();
    }

    fn select_in_rect(&mut self, a: Vec2<f32>, b: Vec2<f32>) {
        let min = Vec2::new(a.x.min(b.x), a.y.min(b.y));
        let max = Vec2::new(a.x.max(b.x), a.y.max(b.y));
        self.selection = self.objects.values()
            .filter(|object| {
                let pos = object.pos();
                pos.x >= min.x && pos.x <= max.x
                    && pos.y >= min.y && pos.y <= max.y
            })
            .map(|object| object.id())
            .collect();
    }

    fn handle_mouse_down(
        &mut self,
        button: MouseButton,
        pos: Vec2<f32>,
    ) -> EventStatus {
        self.mouse.update(pos, &self.view);
        let world = self.view.screen_to_world(pos);
        self.mouse_down_pos.insert(button, world);
        if button == MouseButton::Left {
            self.selecting = true;
        }
        EventStatus::Handled
    }

    fn handle_mouse_up(
        &mut self,
        button: MouseButton,
        pos: Vec2<f32>,
    ) -> EventStatus {
        let world = self.view.screen_to_world(pos);
        let anchor = match self.mouse_down_pos.remove(&button) {
            Some(anchor) => anchor,
            None => return EventStatus::NotHandled,
        };
        match button {
            MouseButton::Left => {
                self.selecting = false;
                if self.is_tap(anchor, world) {
                    self.select_at(world);
                } else {
                    self.select_in_rect(anchor, world);
                }
                EventStatus::Handled
            }
            MouseButton::Right => {
                if self.is_tap(anchor, world) && !self.selection.is_empty() {
                    let objects: Vec<ObjectId> =
                        self.selection.iter().copied().collect();
                    trace!("move order for {} objects", objects.len());
                    self.connection.send(UpMessage::MoveOrder {
                        objects,
                        target: [world.x, world.y],
                    });
                }
                EventStatus::Handled
            }
            _ => EventStatus::NotHandled,
        }
    }

    fn handle_mouse_move(
        &mut self,
        ctx: &GuiWindowContext,
        pos: Vec2<f32>,
    ) -> EventStatus {
        let delta = self.mouse.update(pos, &self.view);
        if ctx.mouse_button_down(MouseButton::Right) {
            let direction = if ctx.settings.borrow().reverse_drag {
                1.0
            } else {
                -1.0
            };
            self.view.scroll_pixels(delta * direction);
            self.mouse.refresh(&self.view);
            EventStatus::Handled
        } else if self.selecting {
            EventStatus::Handled
        } else {
            EventStatus::NotHandled
        }
    }

    fn handle_scroll(
        &mut self,
        ctx: &GuiWindowContext,
        amount: ScrolledAmount,
    ) -> EventStatus {
        let steps = match amount {
            ScrolledAmount::Lines(v) => v.y,
            ScrolledAmount::Pixels(v) => v.y / SCROLL_LINE_PX,
        };
        let zoom_speed = ctx.settings.borrow().zoom_speed;
        self.view.zoom_by((1.0 + ZOOM_STEP * zoom_speed).powf(steps));
        self.mouse.refresh(&self.view);
        EventStatus::Handled
    }

    fn draw_terrain(&self, map: &GameMap, mut canvas: Canvas2) {
        let visible = self.view.visible_world_rect();
        let x0 = visible.x.floor().max(0.0) as u32;
        let y0 = visible.y.floor().max(0.0) as u32;
        let x1 = (visible.x + visible.w + 1.0).ceil()
            .clamp(0.0, map.size[0] as f32) as u32;
        let y1 = (visible.y + visible.h + 1.0).ceil()
            .clamp(0.0, map.size[1] as f32) as u32;
        let size = self.view.zoom();
        for y in y0..y1 {
            for x in x0..x1 {
                let tile = match map.tile(x, y) {
                    Some(tile) => tile,
                    None => continue,
                };
                let screen = self.view
                    .world_to_screen(Vec2::new(x as f32, y as f32));
                match self.images.get(tile.asset_key()) {
                    Some(image) => {
                        canvas.reborrow()
                            .translate(screen)
                            .draw_image(image, [size, size]);
                    }
                    None => {
                        canvas.reborrow()
                            .translate(screen)
                            .color(tile_color(tile))
                            .draw_solid([size, size]);
                    }
                }
            }
        }
    }

    /// Draw the map and the units, back to front: terrain, objects,
    /// selection overlay.
    pub fn draw_game(&self, ctx: &GuiWindowContext, mut canvas: Canvas2) {
        if let Some(map) = &self.map {
            self.draw_terrain(map, canvas.reborrow());
        }

        let mut ids: Vec<ObjectId> = self.objects.keys().copied().collect();
        ids.sort();
        for id in ids {
            self.objects[&id].draw(canvas.reborrow(), &self.view, &self.images);
        }

        for &id in &self.selection {
            if let Some(object) = self.objects.get(&id) {
                let size = object.radius() * 2.0 * self.view.zoom() + 4.0;
                let screen = self.view.world_to_screen(object.pos())
                    - Vec2::new(size / 2.0, size / 2.0);
                draw_rect_outline(
                    canvas.reborrow(),
                    Rect::new(screen.x, screen.y, size, size),
                    2.0,
                    color::SELECTION,
                );
            }
        }

        if self.selecting {
            if let (Some(&anchor), Some(cursor)) = (
                self.mouse_down_pos.get(&MouseButton::Left),
                self.mouse.window_pos(),
            ) {
                let a = self.view.world_to_screen(anchor);
                let min = Vec2::new(a.x.min(cursor.x), a.y.min(cursor.y));
                let max = Vec2::new(a.x.max(cursor.x), a.y.max(cursor.y));
                draw_rect_outline(
                    canvas.reborrow(),
                    Rect::new(min.x, min.y, max.x - min.x, max.y - min.y),
                    1.0,
                    color::SELECTION,
                );
            }
        }

        self.draw_status(canvas.reborrow());
    }

    fn draw_status(&self, canvas: Canvas2) {
        let name = self.player.as_ref()
            .map(|player| player.name.as_str())
            .unwrap_or("connecting...");
        let text = match self.mouse.world_pos() {
            Some(world) => format!(
                "{} | {} selected | {:.1},{:.1}",
                name,
                self.selection.len(),
                world.x,
                world.y,
            ),
            None => format!("{} | {} selected", name, self.selection.len()),
        };
        canvas
            .translate([8.0, 8.0])
            .draw_text(TextBlock {
                text,
                logical_size: 14.0,
                color: color::TEXT,
                h_align: HAlign::Left,
                v_align: VAlign::Top,
            });
    }
}

impl Widget for GameHandler {
    fn handle_event(
        &mut self,
        ctx: &GuiWindowContext,
        event: &InputEvent,
    ) -> EventStatus {
        // an open settings menu sees everything first
        if let Some(menu) = self.settings_menu.as_mut() {
            let status = menu.handle_event(ctx, event);
            if menu.is_closed() {
                self.settings_menu = None;
            }
            return status;
        }
        match *event {
            InputEvent::KeyDown { key: VirtualKeyCode::Escape } => {
                self.open_settings_menu(ctx);
                EventStatus::Handled
            }
            InputEvent::MouseButtonDown { button, pos } => {
                self.handle_mouse_down(button, pos)
            }
            InputEvent::MouseButtonUp { button, pos } => {
                self.handle_mouse_up(button, pos)
            }
            InputEvent::MouseMoved { pos } => self.handle_mouse_move(ctx, pos),
            InputEvent::Scrolled { amount } => self.handle_scroll(ctx, amount),
            InputEvent::Resized { size } => {
                self.view.set_viewport(size);
                self.mouse.refresh(&self.view);
                EventStatus::Handled
            }
            _ => EventStatus::NotHandled,
        }
    }

    fn update(&mut self, ctx: &GuiWindowContext, dt: f32) {
        self.update_state(ctx, dt);
    }

    fn draw(&self, ctx: &GuiWindowContext, mut canvas: Canvas2) {
        self.draw_game(ctx, canvas.reborrow());
        if let Some(menu) = &self.settings_menu {
            menu.draw(ctx, canvas.reborrow());
        }
    }
}

fn tile_color(tile: TileKind) -> Rgba<f32> {
    match tile {
        TileKind::Grass => Rgba { r: 0.30, g: 0.55, b: 0.25, a: 1.0 },
        TileKind::Forest => Rgba { r: 0.15, g: 0.35, b: 0.18, a: 1.0 },
        TileKind::Water => Rgba { r: 0.18, g: 0.30, b: 0.55, a: 1.0 },
    }
}

fn draw_rect_outline(
    mut canvas: Canvas2,
    rect: Rect<f32, f32>,
    thickness: f32,
    outline_color: Rgba<f32>,
) {
    let Rect { x, y, w, h } = rect;
    let sides = [
        (Vec2::new(x, y), Extent2::new(w, thickness)),
        (Vec2::new(x, y + h - thickness), Extent2::new(w, thickness)),
        (Vec2::new(x, y), Extent2::new(thickness, h)),
        (Vec2::new(x + w - thickness, y), Extent2::new(thickness, h)),
    ];
    for (pos, size) in sides {
        canvas.reborrow()
            .translate(pos)
            .color(outline_color)
            .draw_solid(size);
    }
}
