use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Coord, PlayerId};

/// Each player's uncommitted path, oldest cell first.
///
/// Between ticks a trail either grows at the end or is reset to empty (when
/// the path is committed or its owner dies). Anything else is a bug in
/// whatever produced the snapshot.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TrailSet(BTreeMap<PlayerId, Vec<Coord>>);

impl TrailSet {
    pub fn new() -> Self {
        TrailSet::default()
    }

    /// Trail of `player`; players with no entry have an empty trail.
    pub fn trail(&self, player: PlayerId) -> &[Coord] {
        self.0.get(&player).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn insert(&mut self, player: PlayerId, trail: Vec<Coord>) -> Option<Vec<Coord>> {
        self.0.insert(player, trail)
    }

    pub fn push(&mut self, player: PlayerId, coord: Coord) {
        self.0.entry(player).or_default().push(coord);
    }

    pub fn clear_trail(&mut self, player: PlayerId) {
        if let Some(trail) = self.0.get_mut(&player) {
            trail.clear();
        }
    }

    /// Players with an entry, in ascending order, including empty trails.
    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &[Coord])> + '_ {
        self.0.iter().map(|(player, trail)| (*player, trail.as_slice()))
    }

    /// Total number of trail cells across all players.
    pub fn node_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }
}

impl FromIterator<(PlayerId, Vec<Coord>)> for TrailSet {
    fn from_iter<I: IntoIterator<Item = (PlayerId, Vec<Coord>)>>(iter: I) -> Self {
        TrailSet(iter.into_iter().collect())
    }
}
