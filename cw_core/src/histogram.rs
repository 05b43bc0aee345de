use itertools::Itertools;
use serde::Serialize;

use crate::{Grid, OwnerId, PlayerConfig};

/// Cell count per owner, largest first, ties by ascending owner.
///
/// Only owners that hold at least one cell appear.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Histogram(Vec<(OwnerId, usize)>);

impl Histogram {
    /// Counts every owner, the unclaimed sentinel included.
    pub fn of(grid: &Grid) -> Self {
        Self::count(grid, true)
    }

    /// Counts only cells that some player holds. Used to size score bars.
    pub fn claimed(grid: &Grid) -> Self {
        Self::count(grid, false)
    }

    fn count(grid: &Grid, include_unclaimed: bool) -> Self {
        let mut counts = [0usize; 256];
        for owner in grid.owners() {
            counts[owner.index()] += 1;
        }
        let entries = counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(owner, count)| (OwnerId(owner as u8), *count))
            .filter(|(owner, _)| include_unclaimed || !owner.is_unclaimed())
            .sorted_by(|(owner_a, count_a), (owner_b, count_b)| {
                count_b.cmp(count_a).then(owner_a.cmp(owner_b))
            })
            .collect();
        Histogram(entries)
    }

    pub fn entries(&self) -> &[(OwnerId, usize)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whoever holds the most cells, which may be the unclaimed sentinel.
    pub fn leading_owner(&self) -> Option<OwnerId> {
        self.0.first().map(|(owner, _)| *owner)
    }

    /// Leading owner among claimed cells only.
    pub fn leading_claimed_owner(&self) -> Option<OwnerId> {
        self.0
            .iter()
            .find(|(owner, _)| !owner.is_unclaimed())
            .map(|(owner, _)| *owner)
    }

    pub fn count_of(&self, owner: OwnerId) -> usize {
        self.0
            .iter()
            .find(|(o, _)| *o == owner)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.iter().map(|(_, count)| count).sum()
    }

    /// The player whose color holds the most claimed cells.
    pub fn winner<'a>(&self, players: &'a [PlayerConfig]) -> Option<&'a PlayerConfig> {
        let leader = self.leading_claimed_owner()?;
        players.iter().find(|player| player.color() == leader)
    }
}
