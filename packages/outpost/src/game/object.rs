//! The GUI-side proxy for one logical simulation object.

use crate::{
    net::message::{LogicalObject, ObjectId, ObjectKind},
    player::PlayerId,
};
use super::{image_cache::ImageCache, scrolling_view::ScrollingView};
use graphics::frame_content::Canvas2;
use vek::*;


/// How quickly the displayed position closes on the snapshot position,
/// per second.
const SMOOTH_RATE: f32 = 12.0;


/// Render state mirroring one `LogicalObject`. Created lazily on first
/// sighting; owned exclusively by the game handler's object map.
#[derive(Debug, Clone, PartialEq)]
pub struct GameObject {
    id: ObjectId,
    kind: ObjectKind,
    owner: Option<PlayerId>,
    pos: Vec2<f32>,
    target_pos: Vec2<f32>,
}

impl GameObject {
    pub fn new(logical: &LogicalObject) -> Self {
        let pos = Vec2::from(logical.pos);
        GameObject {
            id: logical.id,
            kind: logical.kind,
            owner: logical.owner,
            pos,
            target_pos: pos,
        }
    }

    /// Take over the state of the latest snapshot. The displayed position
    /// catches up smoothly in `advance`.
    pub fn sync(&mut self, logical: &LogicalObject) {
        debug_assert_eq!(self.id, logical.id);
        self.kind = logical.kind;
        self.owner = logical.owner;
        self.target_pos = Vec2::from(logical.pos);
    }

    pub fn advance(&mut self, dt: f32) {
        let t = (SMOOTH_RATE * dt).min(1.0);
        self.pos += (self.target_pos - self.pos) * t;
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    /// Displayed world position.
    pub fn pos(&self) -> Vec2<f32> {
        self.pos
    }

    pub fn radius(&self) -> f32 {
        self.kind.radius()
    }

    pub fn draw(
        &self,
        mut canvas: Canvas2,
        view: &ScrollingView,
        images: &ImageCache,
    ) {
        let size = self.radius() * 2.0 * view.zoom();
        let screen = view.world_to_screen(self.pos)
            - Vec2::new(size / 2.0, size / 2.0);
        match images.get(self.kind.asset_key()) {
            Some(image) => {
                canvas.reborrow()
                    .translate(screen)
                    .draw_image(image, [size, size]);
            }
            None => {
                canvas.reborrow()
                    .translate(screen)
                    .color(player_color(self.owner))
                    .draw_solid([size, size]);
            }
        }
    }
}

/// Fallback fill color for objects without a sprite, cycling per owner.
pub fn player_color(owner: Option<PlayerId>) -> Rgba<f32> {
    const PALETTE: [Rgba<f32>; 4] = [
        Rgba { r: 0.85, g: 0.30, b: 0.25, a: 1.0 },
        Rgba { r: 0.25, g: 0.45, b: 0.85, a: 1.0 },
        Rgba { r: 0.90, g: 0.80, b: 0.25, a: 1.0 },
        Rgba { r: 0.55, g: 0.30, b: 0.75, a: 1.0 },
    ];
    match owner {
        Some(PlayerId(id)) => PALETTE[id as usize % PALETTE.len()],
        None => Rgba { r: 0.6, g: 0.6, b: 0.6, a: 1.0 },
    }
}
