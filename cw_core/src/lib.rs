// Level 0
mod common;
pub mod error;
// Level 1
mod grid;
pub mod layout;
mod player;
mod trail;
// Level 2
mod histogram;

pub use common::{BoardDimension, Coord, Direction, OwnerId, PlayerId, RasterSize, Rect};
pub use error::{CoreError, ErrorMsg, Result};
pub use grid::Grid;
pub use histogram::Histogram;
pub use player::{GamePhase, PlayerConfig};
pub use trail::TrailSet;
