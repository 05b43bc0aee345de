use cw_core::{GamePhase, Histogram, PlayerConfig, PlayerId};
use getset::Getters;
use serde::Serialize;

use crate::configuration::DrawConfiguration;
use crate::error::Result;

const GAME_TITLE: &str = "Color wars";
const NO_WINNER: &str = "no one";
const BLANK: &str = " ";

/// Text shown over a halted board.
#[derive(Clone, Debug, Eq, Getters, PartialEq, Serialize)]
#[getset(get = "pub")]
pub struct Overlay {
    /// Only shown before the first round starts.
    banner: Option<String>,
    title: String,
    subtitle: String,
    color: String,
}

/// The overlay for `phase`, or `None` while the game is running.
///
/// Wording depends on whether the player steers by touch or by keyboard. The
/// text takes the color of whoever currently leads.
pub fn overlay(
    phase: GamePhase,
    touch_enabled: bool,
    histogram: &Histogram,
    players: &[PlayerConfig],
    config: &DrawConfiguration,
) -> Result<Option<Overlay>> {
    let prompt = if touch_enabled {
        "Tap screen"
    } else {
        "Press space"
    };
    let (banner, title, subtitle) = match phase {
        GamePhase::Running => return Ok(None),
        GamePhase::Initializing => (
            Some(GAME_TITLE.to_string()),
            format!("{}\nto start", prompt),
            BLANK.to_string(),
        ),
        GamePhase::EndGame => {
            let winner = histogram
                .winner(players)
                .map(|player| player.name().as_str())
                .unwrap_or(NO_WINNER);
            (
                None,
                format!("{} wins!", winner),
                format!("{} to restart", prompt),
            )
        }
        GamePhase::Paused => (None, BLANK.to_string(), format!("{} to continue", prompt)),
    };
    let color = match histogram.leading_claimed_owner() {
        Some(owner) => config.palette().color_of(owner)?.to_string(),
        None => "black".to_string(),
    };
    Ok(Some(Overlay {
        banner,
        title,
        subtitle,
        color,
    }))
}

/// Human players whose kill counts are shown while the board is halted.
pub fn kill_label_players(phase: GamePhase, players: &[PlayerConfig]) -> Vec<PlayerId> {
    if !phase.is_halted() {
        return Vec::new();
    }
    players
        .iter()
        .filter(|player| !player.ai_controlled())
        .map(PlayerConfig::id)
        .collect()
}
