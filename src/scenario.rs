use std::path::Path;

use cw_canvas::{InteractionMode, PointerSample};
use cw_core::{Coord, Direction, GamePhase, Grid, PlayerConfig, RasterSize, TrailSet};
use serde::{Deserialize, Serialize};

/// A recorded game: who played, how they steered, and what the board looked
/// like on every tick.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Scenario {
    pub players: Vec<PlayerConfig>,
    #[serde(default)]
    pub mode: Option<InteractionMode>,
    /// Overlay prompts say "Tap screen" instead of "Press space".
    #[serde(default)]
    pub touch_enabled: bool,
    pub ticks: Vec<Tick>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Tick {
    pub raster: RasterSize,
    #[serde(default)]
    pub phase: GamePhase,
    /// Rows of owner ids, top to bottom.
    pub grid: Grid,
    /// Cells the game reports as changed. When left out the harness diffs
    /// against the previous tick's grid.
    #[serde(default)]
    pub changed: Option<Vec<Coord>>,
    #[serde(default)]
    pub trails: TrailSet,
    /// Finger events that happened before this tick's pointer sample.
    #[serde(default)]
    pub touch: Vec<TouchEvent>,
    #[serde(default)]
    pub pointer: Option<PointerSample>,
    #[serde(default)]
    pub current: Direction,
    #[serde(default)]
    pub player_position: Coord,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchEvent {
    Start,
    End,
}

impl Scenario {
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let scenario = Self::from_json_str(json.as_str())?;
        log::debug!(
            "Loaded scenario {:?}: {} players, {} ticks",
            path.as_ref(),
            scenario.players.len(),
            scenario.ticks.len()
        );
        Ok(scenario)
    }
}
