//! What the outside world tells an agent about its surroundings.
//!
//! Movement, beds, the television, and the player's arms all live in
//! other systems. Those collaborators write a [`Situation`] onto each agent
//! before every tick; the behavior core only reads it.

use nursery_types::RoomId;
use serde::{Deserialize, Serialize};

/// A point on the floor plan, in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// East-west coordinate.
    pub x: f32,
    /// North-south coordinate.
    pub y: f32,
}

impl Position {
    /// Create a position.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Externally-owned facts about one agent for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Situation {
    /// Room the agent is in.
    pub room: RoomId,
    /// Location inside the room, when the movement system reports one.
    pub position: Option<Position>,
    /// Put to bed by a caregiver.
    pub asleep: bool,
    /// Being held by the player.
    pub held: bool,
    /// Being played with by the player.
    pub playing: bool,
    /// The television in the room is on.
    pub tv_on: bool,
    /// Another child shares the room.
    pub sibling_nearby: bool,
}

impl Situation {
    /// An unremarkable situation in `room`: nothing is going on.
    pub const fn in_room(room: RoomId) -> Self {
        Self {
            room,
            position: None,
            asleep: false,
            held: false,
            playing: false,
            tv_on: false,
            sibling_nearby: false,
        }
    }
}

impl Default for Situation {
    fn default() -> Self {
        Self::in_room(RoomId::new(0))
    }
}
