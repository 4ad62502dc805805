//! Messages exchanged with the game server, and the snapshot types the GUI
//! renders from. Bincode on the wire.

use crate::player::{Player, PlayerId};
use serde::{Serialize, Deserialize};


/// Stable identity of a logical simulation object. Assigned by the server;
/// never reused within a session.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize,
)]
pub struct ObjectId(pub u32);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Unit,
    Building,
}

impl ObjectKind {
    /// Key the image cache uses for this kind's sprite.
    pub fn asset_key(&self) -> &'static str {
        match self {
            ObjectKind::Unit => "unit",
            ObjectKind::Building => "building",
        }
    }

    /// Pick/render radius in world units.
    pub fn radius(&self) -> f32 {
        match self {
            ObjectKind::Unit => 0.5,
            ObjectKind::Building => 1.0,
        }
    }
}

/// One entity of the server's simulation view. The GUI renders these but
/// does not own them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    /// World position, in world units.
    pub pos: [f32; 2],
    pub owner: Option<PlayerId>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Grass,
    Forest,
    Water,
}

impl TileKind {
    /// Key the image cache uses for this tile's texture.
    pub fn asset_key(&self) -> &'static str {
        match self {
            TileKind::Grass => "tile-grass",
            TileKind::Forest => "tile-forest",
            TileKind::Water => "tile-water",
        }
    }
}

/// Terrain grid. One tile is one world unit on a side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMap {
    /// Width and height in tiles.
    pub size: [u32; 2],
    /// Row-major, `size[0] * size[1]` entries.
    pub tiles: Vec<TileKind>,
}

impl GameMap {
    pub fn tile(&self, x: u32, y: u32) -> Option<TileKind> {
        if x < self.size[0] && y < self.size[1] {
            self.tiles.get((y * self.size[0] + x) as usize).copied()
        } else {
            None
        }
    }
}

/// The complete set of logical objects currently visible to this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub objects: Vec<LogicalObject>,
}

/// Client-to-server messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UpMessage {
    Join {
        name: String,
    },
    MoveOrder {
        objects: Vec<ObjectId>,
        target: [f32; 2],
    },
}

/// Server-to-client messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DownMessage {
    Welcome {
        player: Player,
        map: GameMap,
    },
    Snapshot(WorldSnapshot),
}
