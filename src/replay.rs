use std::io::Write;

use cw_canvas::{
    kill_label_players, overlay, score_bars, touch_guides, BatchedFill, CanvasError,
    DrawConfiguration, GridDiffRenderer, GuideShape, Overlay, PhaseAction, ScoreBar,
    TouchInput, TouchResolver, TrailCommand, TrailDiffRenderer,
};
use cw_core::{Coord, Direction, Grid, Histogram, PlayerId};
use serde::Serialize;

use crate::scenario::{Scenario, Tick, TouchEvent};

/// Everything one tick asks the canvas to do.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TickOutput {
    pub tick: usize,
    pub fills: Vec<BatchedFill>,
    pub trail_commands: Vec<TrailCommand>,
    pub phase_actions: Vec<PhaseAction>,
    pub directive: Option<Direction>,
    pub score_bars: Vec<ScoreBar>,
    pub overlay: Option<Overlay>,
    pub guides: Vec<GuideShape>,
    pub kill_labels: Vec<PlayerId>,
    /// Contract violations hit this tick. The affected section is left
    /// empty and its renderer keeps its previous state.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<String>,
}

/// Drives every renderer through a scenario the way a game loop would.
#[derive(Debug)]
pub struct Replay {
    config: DrawConfiguration,
    fields: GridDiffRenderer,
    trails: TrailDiffRenderer,
    touch: TouchResolver,
    previous_grid: Option<Grid>,
}

impl Replay {
    pub fn new(config: DrawConfiguration) -> Self {
        Replay {
            config,
            fields: GridDiffRenderer::new(),
            trails: TrailDiffRenderer::new(),
            touch: TouchResolver::new(),
            previous_grid: None,
        }
    }

    /// Replays every tick, writing one JSON line per tick to `out`.
    pub fn run<W: Write>(&mut self, scenario: &Scenario, out: &mut W) -> anyhow::Result<()> {
        for (index, tick) in scenario.ticks.iter().enumerate() {
            let output = self.step(scenario, index, tick)?;
            serde_json::to_writer(&mut *out, &output)?;
            writeln!(out)?;
        }
        out.flush()?;
        Ok(())
    }

    pub fn step(
        &mut self,
        scenario: &Scenario,
        index: usize,
        tick: &Tick,
    ) -> anyhow::Result<TickOutput> {
        let mut output = TickOutput {
            tick: index,
            ..TickOutput::default()
        };
        let dim = tick.grid.dim();

        for event in tick.touch.iter() {
            match event {
                TouchEvent::Start => {
                    if let Some(action) = self.touch.touch_start(tick.phase) {
                        output.phase_actions.push(action);
                    }
                }
                TouchEvent::End => self.touch.touch_end(),
            }
        }
        let input = TouchInput {
            mode: scenario.mode,
            pointer: tick.pointer,
            current: tick.current,
            player_position: tick.player_position,
            dim,
            raster: tick.raster,
        };
        if let Some(directive) = caught(index, &mut output, self.touch.directive(&input))? {
            output.directive = directive;
        }

        let changed: Vec<Coord> = match (&tick.changed, &self.previous_grid) {
            (Some(changed), _) => changed.clone(),
            (None, Some(previous)) => tick.grid.changed_since(previous),
            (None, None) => dim.all_coords(),
        };
        let fills = self
            .fields
            .render(&tick.grid, tick.raster, &changed, &self.config);
        // The baseline only moves once the grid has actually been painted.
        if let Some(fills) = caught(index, &mut output, fills)? {
            output.fills = fills;
            self.previous_grid = Some(tick.grid.clone());
        }

        let commands = self.trails.update(
            &scenario.players,
            dim,
            tick.raster,
            &tick.trails,
            &self.config,
        );
        if let Some(commands) = caught(index, &mut output, commands)? {
            output.trail_commands = commands;
        }

        let claimed = Histogram::claimed(&tick.grid);
        if let Some(bars) = caught(
            index,
            &mut output,
            score_bars(&claimed, tick.raster, &self.config),
        )? {
            output.score_bars = bars;
        }
        let shown = overlay(
            tick.phase,
            scenario.touch_enabled,
            &claimed,
            &scenario.players,
            &self.config,
        );
        if let Some(shown) = caught(index, &mut output, shown)? {
            output.overlay = shown;
        }

        output.guides = touch_guides(scenario.mode, tick.raster, &self.config);
        output.kill_labels = kill_label_players(tick.phase, &scenario.players);
        Ok(output)
    }
}

/// Contract violations are reported on the tick and the replay moves on.
/// Anything else aborts the replay.
fn caught<T>(
    index: usize,
    output: &mut TickOutput,
    result: cw_canvas::Result<T>,
) -> Result<Option<T>, CanvasError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_contract_violation() => {
            log::warn!("Tick {}: {}", index, err);
            output.violations.push(err.to_string());
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
