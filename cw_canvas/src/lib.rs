//! Turns color wars board state into draw commands.
//!
//! Nothing in here touches a real canvas. Renderers keep just enough state
//! to send the minimum number of commands each tick, and every command type
//! serializes so an adapter (or the replay harness) can ship it elsewhere.

pub mod configuration;
pub mod error;
pub mod fields;
pub mod guides;
pub mod overlay;
pub mod score_board;
pub mod touch;
pub mod trails;

pub use configuration::{DrawConfiguration, FillStyle, GuideStyle, Palette};
pub use error::{CanvasError, Result};
pub use fields::{batch_fills, BatchedFill, GridDiffRenderer, RepaintPhase};
pub use guides::{touch_guides, GuideShape};
pub use overlay::{kill_label_players, overlay, Overlay};
pub use score_board::{score_bars, ScoreBar};
pub use touch::{
    InteractionMode, PhaseAction, PointerSample, TouchInput, TouchResolver, TouchState,
};
pub use trails::{RenderTemplate, TrailCommand, TrailDiff, TrailDiffRenderer};
