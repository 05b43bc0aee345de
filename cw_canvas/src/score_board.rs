use cw_core::{Histogram, OwnerId, RasterSize, Rect};
use getset::{CopyGetters, Getters};
use serde::Serialize;

use crate::configuration::DrawConfiguration;
use crate::error::Result;

#[derive(Clone, CopyGetters, Debug, Eq, Getters, PartialEq, Serialize)]
pub struct ScoreBar {
    #[getset(get_copy = "pub")]
    owner: OwnerId,
    #[getset(get = "pub")]
    color: String,
    #[getset(get_copy = "pub")]
    rect: Rect,
}

/// One full-height bar per histogram entry, left to right, each as wide as
/// its share of the total.
pub fn score_bars(
    histogram: &Histogram,
    raster: RasterSize,
    config: &DrawConfiguration,
) -> Result<Vec<ScoreBar>> {
    let total = histogram.total() as u64;
    if total == 0 {
        return Ok(Vec::new());
    }
    let width = raster.width as u64;
    let mut claimed_so_far = 0u64;
    let mut bars = Vec::with_capacity(histogram.len());
    for &(owner, count) in histogram.entries() {
        let count = count as u64;
        let x = width * claimed_so_far / total;
        let w = width * count / total;
        claimed_so_far += count;
        bars.push(ScoreBar {
            owner,
            color: config.palette().color_of(owner)?.to_string(),
            rect: Rect::new(x as u32, 0, w as u32, raster.height),
        });
    }
    Ok(bars)
}
