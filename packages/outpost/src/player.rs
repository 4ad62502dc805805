use serde::{Serialize, Deserialize};


/// Identifier for a player within one game session. Unique per session.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize,
)]
pub struct PlayerId(pub u32);

/// A participant in the session, as reported by the server. Plain value;
/// immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}
