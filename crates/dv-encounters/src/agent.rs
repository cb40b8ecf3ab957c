//! Placed agents.

use std::fmt;

use dv_core::RoomId;
use serde::{Deserialize, Serialize};

/// Class of a placed agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentClass {
    /// The dungeon's master, guarding the final chamber.
    Boss,
    /// A roaming monster in a large open room.
    Monster,
    /// A strong guard over hidden treasure.
    Elite,
    /// A weak creature picking over treasure.
    Peon,
}

impl AgentClass {
    /// Lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Boss => "boss",
            Self::Monster => "monster",
            Self::Elite => "elite",
            Self::Peon => "peon",
        }
    }
}

impl fmt::Display for AgentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An agent assigned to a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// What kind of agent.
    pub class: AgentClass,
    /// Where it is placed.
    pub room: RoomId,
}

impl Agent {
    /// Create an agent.
    pub fn new(class: AgentClass, room: RoomId) -> Self {
        Self { class, room }
    }
}
