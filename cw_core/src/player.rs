use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};

use crate::{OwnerId, PlayerId};

/// What the core needs to know about a player from the settings store.
#[derive(Clone, CopyGetters, Debug, Deserialize, Eq, Getters, PartialEq, Serialize)]
pub struct PlayerConfig {
    #[getset(get_copy = "pub")]
    id: PlayerId,
    #[getset(get = "pub")]
    name: String,
    #[getset(get_copy = "pub")]
    color: OwnerId,
    #[getset(get_copy = "pub")]
    #[serde(default)]
    ai_controlled: bool,
}

impl PlayerConfig {
    pub fn new<S: Into<String>>(
        id: PlayerId,
        name: S,
        color: OwnerId,
        ai_controlled: bool,
    ) -> Self {
        PlayerConfig {
            id,
            name: name.into(),
            color,
            ai_controlled,
        }
    }

    pub fn with_color(mut self, color: OwnerId) -> Self {
        self.color = color;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Initializing,
    Running,
    Paused,
    EndGame,
}

impl GamePhase {
    /// Phases where the board is frozen behind the message overlay.
    pub fn is_halted(&self) -> bool {
        !matches!(self, GamePhase::Running)
    }
}
