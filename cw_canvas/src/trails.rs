//! Stamping player trails.
//!
//! Trails are drawn as retained nodes, one per trail cell, each a copy of a
//! per-player template. Because trails only ever grow at the end or reset to
//! nothing, a tick's update is either "remove every node of this player" or
//! "add nodes for the new suffix".

use std::collections::BTreeMap;

use cw_core::{
    layout, BoardDimension, Coord, ErrorMsg, OwnerId, PlayerConfig, PlayerId, RasterSize, Rect,
    TrailSet,
};
use getset::{CopyGetters, Getters};
use itertools::Itertools;
use serde::Serialize;

use crate::configuration::{DrawConfiguration, FillStyle};
use crate::error::Result;

/// Cached shape every trail node of one player is stamped from.
#[derive(Clone, CopyGetters, Debug, Getters, PartialEq, Serialize)]
pub struct RenderTemplate {
    #[getset(get_copy = "pub")]
    player: PlayerId,
    #[getset(get_copy = "pub")]
    color: OwnerId,
    #[getset(get = "pub")]
    fill: String,
    #[getset(get_copy = "pub")]
    width: u32,
    #[getset(get_copy = "pub")]
    height: u32,
    #[getset(get = "pub")]
    style: FillStyle,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TrailCommand {
    /// Destroy every node stamped for this player.
    RemoveNode { player: PlayerId },
    /// Stamp a copy of the player's template over `rect`.
    AddNode {
        player: PlayerId,
        cell: Coord,
        rect: Rect,
    },
}

/// What changed between two trail snapshots.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TrailDiff {
    pub to_remove: Vec<PlayerId>,
    pub to_append: BTreeMap<PlayerId, Vec<Coord>>,
}

impl TrailDiff {
    pub fn is_empty(&self) -> bool {
        self.to_remove.is_empty() && self.to_append.is_empty()
    }

    /// Diff that redraws `trails` from scratch over whatever `previous` left
    /// on the layer.
    fn restamp(previous: &TrailSet, trails: &TrailSet) -> Self {
        TrailDiff {
            to_remove: previous
                .iter()
                .filter(|(_, trail)| !trail.is_empty())
                .map(|(player, _)| player)
                .collect(),
            to_append: trails
                .iter()
                .filter(|(_, trail)| !trail.is_empty())
                .map(|(player, trail)| (player, trail.to_vec()))
                .collect(),
        }
    }
}

#[derive(Clone, Debug, Default, Getters)]
pub struct TrailDiffRenderer {
    #[getset(get = "pub")]
    templates: BTreeMap<PlayerId, RenderTemplate>,
    layout: Option<(BoardDimension, RasterSize)>,
    /// Trails as of the last successful [update](Self::update).
    #[getset(get = "pub")]
    applied: TrailSet,
}

impl TrailDiffRenderer {
    pub fn new() -> Self {
        TrailDiffRenderer::default()
    }

    /// Templates have to be rebuilt when the cell geometry moved, a player
    /// changed color or has no template yet, or a template is left over from
    /// a player who is gone.
    pub fn templates_stale(
        &self,
        players: &[PlayerConfig],
        dim: BoardDimension,
        raster: RasterSize,
    ) -> bool {
        self.layout != Some((dim, raster))
            || players.iter().any(|player| {
                self.templates
                    .get(&player.id())
                    .map(|template| template.color != player.color())
                    .unwrap_or(true)
            })
            || self
                .templates
                .keys()
                .any(|id| !players.iter().any(|player| player.id() == *id))
    }

    /// Rebuilds every template if any of them is stale. Returns whether a
    /// rebuild happened.
    pub fn reconcile_templates(
        &mut self,
        players: &[PlayerConfig],
        dim: BoardDimension,
        raster: RasterSize,
        config: &DrawConfiguration,
    ) -> Result<bool> {
        check_unique_players(players)?;
        if !self.templates_stale(players, dim, raster) {
            return Ok(false);
        }
        self.templates = build_templates(players, dim, raster, config)?;
        self.layout = Some((dim, raster));
        Ok(true)
    }

    /// Compares trail snapshots player by player. A player missing from
    /// either side has an empty trail there.
    pub fn diff(old: &TrailSet, new: &TrailSet) -> Result<TrailDiff> {
        let mut diff = TrailDiff::default();
        let players: std::collections::BTreeSet<PlayerId> =
            old.players().chain(new.players()).collect();
        for player in players {
            let before = old.trail(player);
            let after = new.trail(player);
            if after.len() < before.len() {
                if !after.is_empty() {
                    return Err(format!(
                        "trail of player {} shrank from {} to {} cells without being reset",
                        player.0,
                        before.len(),
                        after.len()
                    )
                    .violation_msg()
                    .into());
                }
                log::debug!("Trail of player {} reset", player.0);
                diff.to_remove.push(player);
            } else if after[..before.len()] != *before {
                return Err(format!(
                    "trail of player {} was edited instead of extended",
                    player.0
                )
                .violation_msg()
                .into());
            } else if after.len() > before.len() {
                diff.to_append.insert(player, after[before.len()..].to_vec());
            }
        }
        Ok(diff)
    }

    /// Orders a diff into commands: every removal, then every addition.
    pub fn materialize(&self, diff: &TrailDiff) -> Result<Vec<TrailCommand>> {
        materialize_with(&self.templates, self.layout, diff)
    }

    /// Runs a whole tick: reconciles templates, diffs against the trails
    /// applied last tick and orders the result.
    ///
    /// When the templates were rebuilt, nodes already on the layer carry the
    /// old geometry or color, so every drawn trail is removed and stamped
    /// again. Nothing is committed if the new trails break the grow-or-reset
    /// rule.
    pub fn update(
        &mut self,
        players: &[PlayerConfig],
        dim: BoardDimension,
        raster: RasterSize,
        trails: &TrailSet,
        config: &DrawConfiguration,
    ) -> Result<Vec<TrailCommand>> {
        check_unique_players(players)?;
        let diff = Self::diff(&self.applied, trails)?;
        let stale = self.templates_stale(players, dim, raster);
        let (templates, diff) = if stale {
            let templates = build_templates(players, dim, raster, config)?;
            (Some(templates), TrailDiff::restamp(&self.applied, trails))
        } else {
            (None, diff)
        };

        let commands = match templates.as_ref() {
            Some(templates) => materialize_with(templates, Some((dim, raster)), &diff)?,
            None => materialize_with(&self.templates, self.layout, &diff)?,
        };

        if let Some(templates) = templates {
            log::debug!(
                "Rebuilt {} trail templates, restamping {} nodes",
                templates.len(),
                trails.node_count()
            );
            self.templates = templates;
            self.layout = Some((dim, raster));
        }
        self.applied = trails.clone();
        Ok(commands)
    }
}

fn build_templates(
    players: &[PlayerConfig],
    dim: BoardDimension,
    raster: RasterSize,
    config: &DrawConfiguration,
) -> Result<BTreeMap<PlayerId, RenderTemplate>> {
    let cell = layout::rect(dim, raster, Coord::ORIGIN)?;
    players
        .iter()
        .map(|player| {
            let template = RenderTemplate {
                player: player.id(),
                color: player.color(),
                fill: config.palette().color_of(player.color())?.to_string(),
                width: cell.w(),
                height: cell.h(),
                style: config.trail().clone(),
            };
            Ok((player.id(), template))
        })
        .collect()
}

/// Templates are keyed by player id, so two players sharing one would
/// silently overwrite each other's template.
fn check_unique_players(players: &[PlayerConfig]) -> Result<()> {
    if let Some(id) = players.iter().map(PlayerConfig::id).duplicates().next() {
        return Err(format!("player {} is listed more than once", id.0)
            .violation_msg()
            .into());
    }
    Ok(())
}

fn materialize_with(
    templates: &BTreeMap<PlayerId, RenderTemplate>,
    layout: Option<(BoardDimension, RasterSize)>,
    diff: &TrailDiff,
) -> Result<Vec<TrailCommand>> {
    let mut commands: Vec<TrailCommand> = diff
        .to_remove
        .iter()
        .map(|&player| TrailCommand::RemoveNode { player })
        .collect();
    if diff.to_append.is_empty() {
        return Ok(commands);
    }
    let Some((dim, raster)) = layout else {
        return Err("trail nodes added before templates were built"
            .violation_msg()
            .into());
    };
    for (&player, cells) in diff.to_append.iter() {
        if !templates.contains_key(&player) {
            return Err(format!("no trail template for player {}", player.0)
                .violation_msg()
                .into());
        }
        for &cell in cells {
            commands.push(TrailCommand::AddNode {
                player,
                cell,
                rect: layout::rect(dim, raster, cell)?,
            });
        }
    }
    Ok(commands)
}
