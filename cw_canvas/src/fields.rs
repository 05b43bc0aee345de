//! Painting the ownership grid.
//!
//! Each tick the renderer decides which cells have to be repainted, then
//! walks them in the order given and merges consecutive cells of the same
//! owner into one fill. A canvas adapter turns each [BatchedFill] into a
//! single path with one `fill()` call.

use cw_core::{layout, BoardDimension, Coord, ErrorMsg, Grid, OwnerId, RasterSize, Rect};
use getset::{CopyGetters, Getters};
use itertools::Itertools;
use serde::Serialize;

use crate::configuration::{DrawConfiguration, FillStyle};
use crate::error::Result;

/// One path of same-owner rectangles, filled with a single call.
#[derive(Clone, CopyGetters, Debug, Getters, PartialEq, Serialize)]
pub struct BatchedFill {
    #[getset(get_copy = "pub")]
    owner: OwnerId,
    #[getset(get = "pub")]
    color: String,
    #[getset(get = "pub")]
    style: FillStyle,
    #[getset(get = "pub")]
    rects: Vec<Rect>,
}

/// Whether the next tick can trust what is already on the raster.
///
/// | phase              | layout changed | repaints   | next phase         |
/// |--------------------|----------------|------------|--------------------|
/// | any                | yes            | everything | `NeedsFullRepaint` |
/// | `NeedsFullRepaint` | no             | everything | `Incremental`      |
/// | `Incremental`      | no             | changes    | `Incremental`      |
///
/// The full repaint is held for one more tick after a layout change, so a
/// resize is covered for a whole tick before partial diffs resume.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RepaintPhase {
    #[default]
    NeedsFullRepaint,
    Incremental,
}

impl RepaintPhase {
    /// Returns the phase after this tick and whether this tick repaints
    /// every cell.
    pub fn step(self, layout_changed: bool) -> (RepaintPhase, bool) {
        match (self, layout_changed) {
            (_, true) => (RepaintPhase::NeedsFullRepaint, true),
            (RepaintPhase::NeedsFullRepaint, false) => (RepaintPhase::Incremental, true),
            (RepaintPhase::Incremental, false) => (RepaintPhase::Incremental, false),
        }
    }
}

#[derive(Clone, Debug, Default, Getters)]
pub struct GridDiffRenderer {
    layout: Option<(BoardDimension, RasterSize)>,
    #[getset(get = "pub")]
    phase: RepaintPhase,
    /// Cells chosen by the last call to [prepare](Self::prepare).
    #[getset(get = "pub")]
    last_batch: Vec<Coord>,
}

impl GridDiffRenderer {
    pub fn new() -> Self {
        GridDiffRenderer::default()
    }

    pub fn raster(&self) -> Option<RasterSize> {
        self.layout.map(|(_, raster)| raster)
    }

    pub fn dimension(&self) -> Option<BoardDimension> {
        self.layout.map(|(dim, _)| dim)
    }

    fn plan(&self, dim: BoardDimension, raster: RasterSize) -> (RepaintPhase, bool) {
        let layout_changed = self.layout != Some((dim, raster));
        self.phase.step(layout_changed)
    }

    /// Picks the cells to repaint this tick: every cell while a full repaint
    /// is in effect, otherwise `changed` as given.
    pub fn prepare(
        &mut self,
        dim: BoardDimension,
        raster: RasterSize,
        changed: &[Coord],
    ) -> Vec<Coord> {
        let (phase, full) = self.plan(dim, raster);
        let coords = if full {
            log::debug!(
                "Full field repaint of {}x{} board on {}x{} raster ({:?})",
                dim.cols,
                dim.rows,
                raster.width,
                raster.height,
                self.phase
            );
            dim.all_coords()
        } else {
            changed.to_vec()
        };
        self.layout = Some((dim, raster));
        self.phase = phase;
        self.last_batch = coords.clone();
        coords
    }

    /// Turns `coords` into fills against the layout recorded by the last
    /// [prepare](Self::prepare).
    pub fn emit(
        &self,
        grid: &Grid,
        coords: &[Coord],
        config: &DrawConfiguration,
    ) -> Result<Vec<BatchedFill>> {
        let Some((dim, raster)) = self.layout else {
            return Err("fields emitted before any layout was prepared"
                .violation_msg()
                .into());
        };
        if grid.dim() != dim {
            return Err(format!(
                "grid is {}x{} but the prepared layout is {}x{}",
                grid.dim().cols,
                grid.dim().rows,
                dim.cols,
                dim.rows
            )
            .violation_msg()
            .into());
        }
        batch_fills(grid, raster, coords, config)
    }

    /// [prepare](Self::prepare) and [emit](Self::emit) in one step, laid out
    /// for the grid's own dimension. The renderer is left untouched when the
    /// grid or coordinates are invalid.
    pub fn render(
        &mut self,
        grid: &Grid,
        raster: RasterSize,
        changed: &[Coord],
        config: &DrawConfiguration,
    ) -> Result<Vec<BatchedFill>> {
        let dim = grid.dim();
        let (phase, full) = self.plan(dim, raster);
        let coords = if full {
            dim.all_coords()
        } else {
            changed.to_vec()
        };
        let fills = batch_fills(grid, raster, &coords, config)?;
        if full {
            log::debug!(
                "Full field repaint: {} cells in {} fills",
                coords.len(),
                fills.len()
            );
        }
        self.layout = Some((dim, raster));
        self.phase = phase;
        self.last_batch = coords;
        Ok(fills)
    }
}

/// Run-length encodes `coords` by owner, in traversal order.
///
/// This is not a global grouping: an owner that shows up in two separate
/// runs gets two fills. Row-major traversal keeps the run count low for
/// boards made of contiguous territories.
pub fn batch_fills(
    grid: &Grid,
    raster: RasterSize,
    coords: &[Coord],
    config: &DrawConfiguration,
) -> Result<Vec<BatchedFill>> {
    let dim = grid.dim();
    let cells = coords
        .iter()
        .map(|&coord| Ok((grid.owner(coord)?, layout::rect(dim, raster, coord)?)))
        .collect::<cw_core::Result<Vec<(OwnerId, Rect)>>>()?;

    let mut fills = Vec::new();
    for (owner, run) in &cells.into_iter().group_by(|(owner, _)| *owner) {
        let fill = BatchedFill {
            owner,
            color: config.palette().color_of(owner)?.to_string(),
            style: config.field_style(owner).clone(),
            rects: run.map(|(_, rect)| rect).collect(),
        };
        log::trace!("Fill {} with {} rects", fill.color, fill.rects.len());
        fills.push(fill);
    }
    Ok(fills)
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use test_log::test;

    use super::*;

    const RASTER: RasterSize = RasterSize::new(300, 300);

    fn grid(rows: &[&[u8]]) -> Grid {
        Grid::from_rows(
            rows.iter()
                .map(|row| row.iter().copied().map(OwnerId).collect())
                .collect(),
        )
        .unwrap()
    }

    fn stripes() -> Grid {
        grid(&[&[0, 0, 1], &[1, 1, 1], &[2, 0, 0]])
    }

    #[test]
    fn first_prepare_repaints_everything() {
        let mut renderer = GridDiffRenderer::new();
        let coords = renderer.prepare(BoardDimension::new(3, 3), RASTER, &[Coord::new(1, 1)]);
        assert_eq!(9, coords.len());
    }

    #[test]
    fn incremental_diffs_resume_on_second_tick_after_layout_change() {
        let dim = BoardDimension::new(3, 3);
        let changed = [Coord::new(0, 1)];
        let mut renderer = GridDiffRenderer::new();

        // Layout change: full.
        assert_eq!(9, renderer.prepare(dim, RASTER, &changed).len());
        assert_eq!(RepaintPhase::NeedsFullRepaint, *renderer.phase());
        // Held for one more tick.
        assert_eq!(9, renderer.prepare(dim, RASTER, &changed).len());
        assert_eq!(RepaintPhase::Incremental, *renderer.phase());
        // Back to diffs.
        assert_eq!(changed.to_vec(), renderer.prepare(dim, RASTER, &changed));
        assert_eq!(Vec::<Coord>::new(), renderer.prepare(dim, RASTER, &[]));

        // Resize restarts the cycle regardless of what changed.
        let bigger = RasterSize::new(600, 600);
        assert_eq!(9, renderer.prepare(dim, bigger, &[]).len());
        assert_eq!(9, renderer.prepare(dim, bigger, &changed).len());
        assert_eq!(changed.to_vec(), renderer.prepare(dim, bigger, &changed));

        let wider = BoardDimension::new(4, 3);
        assert_eq!(12, renderer.prepare(wider, bigger, &changed).len());
        assert_eq!(&wider.all_coords(), renderer.last_batch());
    }

    #[test]
    fn layout_change_during_pending_repaint_restarts_it() {
        let dim = BoardDimension::new(3, 3);
        let mut renderer = GridDiffRenderer::new();
        renderer.prepare(dim, RASTER, &[]);
        renderer.prepare(dim, RasterSize::new(301, 300), &[]);
        assert_eq!(RepaintPhase::NeedsFullRepaint, *renderer.phase());
        assert_eq!(9, renderer.prepare(dim, RasterSize::new(301, 300), &[]).len());
        assert_eq!(0, renderer.prepare(dim, RasterSize::new(301, 300), &[]).len());
    }

    #[test]
    fn fills_are_runs_in_traversal_order() {
        let config = DrawConfiguration::default();
        let board = stripes();
        let fills = batch_fills(&board, RASTER, &board.dim().all_coords(), &config).unwrap();
        let owners: Vec<OwnerId> = fills.iter().map(BatchedFill::owner).collect();
        assert_eq!(
            vec![OwnerId(0), OwnerId(1), OwnerId(2), OwnerId(0)],
            owners
        );
        assert_eq!(
            &vec![
                Rect::new(200, 0, 100, 100),
                Rect::new(0, 100, 100, 100),
                Rect::new(100, 100, 100, 100),
                Rect::new(200, 100, 100, 100),
            ],
            fills[1].rects()
        );
        assert_eq!("Red", fills[1].color());
    }

    #[test]
    fn fills_cover_exactly_the_requested_cells() {
        let config = DrawConfiguration::default();
        let board = stripes();
        let coords = vec![
            Coord::new(2, 2),
            Coord::new(0, 0),
            Coord::new(2, 0),
            Coord::new(1, 0),
            Coord::new(0, 2),
        ];
        let fills = batch_fills(&board, RASTER, &coords, &config).unwrap();
        assert!(fills.len() <= coords.len());

        let mut painted = HashSet::new();
        for fill in fills.iter() {
            for rect in fill.rects() {
                let cell = Coord::new(rect.x() / 100, rect.y() / 100);
                assert_eq!(fill.owner(), board.owner(cell).unwrap());
                assert!(painted.insert(cell), "{:?} painted twice", cell);
            }
        }
        assert_eq!(coords.into_iter().collect::<HashSet<_>>(), painted);
    }

    #[test]
    fn unclaimed_fills_are_flat() {
        let config = DrawConfiguration::default();
        let board = stripes();
        let fills = batch_fills(&board, RASTER, &board.dim().all_coords(), &config).unwrap();
        assert_eq!(1.0, fills[0].style().opacity());
        assert_eq!(0.0, fills[0].style().shadow_blur());
        assert_eq!(0.7, fills[1].style().opacity());
        assert_eq!(2.0, fills[1].style().shadow_blur());
        assert_eq!("Grey", fills[1].style().shadow_color());
    }

    #[test]
    fn empty_coords_emit_nothing() {
        let config = DrawConfiguration::default();
        let mut renderer = GridDiffRenderer::new();
        let board = stripes();
        renderer.prepare(board.dim(), RASTER, &[]);
        assert!(renderer.emit(&board, &[], &config).unwrap().is_empty());
    }

    #[test]
    fn emit_rejects_bad_input() {
        let config = DrawConfiguration::default();
        let board = stripes();
        let mut renderer = GridDiffRenderer::new();
        assert!(renderer
            .emit(&board, &[Coord::ORIGIN], &config)
            .unwrap_err()
            .is_contract_violation());

        renderer.prepare(board.dim(), RASTER, &[]);
        assert!(renderer
            .emit(&board, &[Coord::new(3, 0)], &config)
            .unwrap_err()
            .is_contract_violation());

        let small = Grid::unclaimed(BoardDimension::new(2, 2));
        assert!(renderer
            .emit(&small, &[Coord::ORIGIN], &config)
            .unwrap_err()
            .is_contract_violation());
    }

    #[test]
    fn failed_render_keeps_previous_state() {
        let config = DrawConfiguration::default();
        let board = stripes();
        let mut renderer = GridDiffRenderer::new();
        renderer.render(&board, RASTER, &[], &config).unwrap();
        renderer.render(&board, RASTER, &[], &config).unwrap();
        assert_eq!(RepaintPhase::Incremental, *renderer.phase());

        assert!(renderer
            .render(&board, RASTER, &[Coord::new(9, 9)], &config)
            .is_err());
        assert_eq!(RepaintPhase::Incremental, *renderer.phase());
        assert_eq!(Some(RASTER), renderer.raster());

        let fills = renderer
            .render(&board, RASTER, &[Coord::new(1, 1), Coord::new(2, 1)], &config)
            .unwrap();
        assert_eq!(1, fills.len());
        assert_eq!(2, fills[0].rects().len());
    }
}
