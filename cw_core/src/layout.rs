use crate::error::{ErrorMsg, Result};
use crate::{BoardDimension, Coord, RasterSize, Rect};

/// Pixel rectangle a board cell occupies on a raster.
///
/// Cells are `floor(raster / dim)` pixels wide and tall, so any remainder is
/// left as a strip on the right and bottom edges rather than stretching some
/// cells. Asking for a cell outside the board, or laying out a board with no
/// columns or rows, is a caller bug and is reported instead of clamped.
pub fn rect(dim: BoardDimension, raster: RasterSize, cell: Coord) -> Result<Rect> {
    let (w, h) = cell_size(dim, raster)?;
    if !dim.contains(cell) {
        return format!(
            "cell ({}, {}) is outside a {}x{} board",
            cell.col, cell.row, dim.cols, dim.rows
        )
        .violation();
    }
    Ok(Rect::new(cell.col * w, cell.row * h, w, h))
}

/// Width and height of a single cell in pixels.
pub fn cell_size(dim: BoardDimension, raster: RasterSize) -> Result<(u32, u32)> {
    if dim.is_degenerate() {
        return format!("cannot lay out a {}x{} board", dim.cols, dim.rows).violation();
    }
    Ok((raster.width / dim.cols, raster.height / dim.rows))
}
