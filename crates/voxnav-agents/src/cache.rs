//! Per-agent storage of assigned paths.

use std::collections::HashMap;

use voxnav_core::Cell;

use crate::AgentId;

/// A path assigned to one agent, with a cursor over its waypoints.
///
/// The cursor always stays within `0..path.len()`; once it reaches the
/// final waypoint the entry is exhausted and [`PathCache::advance`]
/// returns `None` without moving further.
#[derive(Debug, Clone)]
pub struct PathEntry {
    path: Vec<Cell>,
    cursor: usize,
}

impl PathEntry {
    fn new(path: Vec<Cell>) -> Self {
        Self { path, cursor: 0 }
    }

    /// The waypoint under the cursor.
    pub fn waypoint(&self) -> Option<Cell> {
        self.path.get(self.cursor).copied()
    }

    /// Whether the cursor sits on the final waypoint.
    pub fn is_exhausted(&self) -> bool {
        self.cursor + 1 >= self.path.len()
    }

    /// The full waypoint sequence.
    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    /// The cursor index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

/// Maps each agent to its currently assigned path.
///
/// Last write wins: a fresh search result replaces a stale one even when
/// the old path was not exhausted. Entries never interact across agents.
/// Purely in-memory; there is nothing to persist or restore.
#[derive(Debug, Default)]
pub struct PathCache {
    entries: HashMap<AgentId, PathEntry>,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `path` to `agent`, resetting the cursor. An empty path
    /// clears the entry instead, keeping the cursor invariant intact.
    pub fn set(&mut self, agent: AgentId, path: Vec<Cell>) {
        if path.is_empty() {
            self.entries.remove(&agent);
            return;
        }
        self.entries.insert(agent, PathEntry::new(path));
    }

    /// Whether the agent has an assigned path.
    pub fn has(&self, agent: AgentId) -> bool {
        self.entries.contains_key(&agent)
    }

    /// The agent's entry.
    pub fn get(&self, agent: AgentId) -> Option<&PathEntry> {
        self.entries.get(&agent)
    }

    /// The agent's current waypoint.
    pub fn waypoint(&self, agent: AgentId) -> Option<Cell> {
        self.entries.get(&agent).and_then(PathEntry::waypoint)
    }

    /// Advance the cursor and return the new waypoint, or `None` once the
    /// path is exhausted. The exhausted entry stays in place for the
    /// caller to clear or replace.
    pub fn advance(&mut self, agent: AgentId) -> Option<Cell> {
        let entry = self.entries.get_mut(&agent)?;
        if entry.is_exhausted() {
            return None;
        }
        entry.cursor += 1;
        entry.waypoint()
    }

    /// Drop the agent's entry.
    pub fn clear(&mut self, agent: AgentId) {
        self.entries.remove(&agent);
    }

    /// Number of agents with an assigned path.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no agent has an assigned path.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lane(n: i32) -> Vec<Cell> {
        (0..n).map(|x| Cell::new(x, 0, 0)).collect()
    }

    #[test]
    fn set_then_walk_to_exhaustion() {
        let mut cache = PathCache::new();
        cache.set(7, lane(3));
        assert!(cache.has(7));
        assert_eq!(cache.waypoint(7), Some(Cell::new(0, 0, 0)));

        assert_eq!(cache.advance(7), Some(Cell::new(1, 0, 0)));
        assert_eq!(cache.advance(7), Some(Cell::new(2, 0, 0)));
        // Exhausted: cursor pinned to the final waypoint, entry retained.
        assert_eq!(cache.advance(7), None);
        assert_eq!(cache.waypoint(7), Some(Cell::new(2, 0, 0)));
        assert!(cache.get(7).is_some_and(PathEntry::is_exhausted));
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut cache = PathCache::new();
        cache.set(1, lane(2));
        for _ in 0..10 {
            cache.advance(1);
        }
        let entry = cache.get(1).unwrap();
        assert!(entry.cursor() < entry.path().len());
    }

    #[test]
    fn last_write_wins() {
        let mut cache = PathCache::new();
        cache.set(3, lane(5));
        cache.advance(3);
        cache.set(3, vec![Cell::new(9, 0, 9), Cell::new(9, 0, 8)]);
        // Fresh path, fresh cursor.
        assert_eq!(cache.waypoint(3), Some(Cell::new(9, 0, 9)));
        assert_eq!(cache.get(3).unwrap().cursor(), 0);
    }

    #[test]
    fn single_cell_path_is_born_exhausted() {
        let mut cache = PathCache::new();
        cache.set(2, lane(1));
        assert_eq!(cache.waypoint(2), Some(Cell::new(0, 0, 0)));
        assert_eq!(cache.advance(2), None);
    }

    #[test]
    fn empty_path_clears() {
        let mut cache = PathCache::new();
        cache.set(4, lane(3));
        cache.set(4, Vec::new());
        assert!(!cache.has(4));
    }

    #[test]
    fn agents_do_not_interact() {
        let mut cache = PathCache::new();
        cache.set(1, lane(4));
        cache.set(2, lane(2));
        cache.advance(1);
        assert_eq!(cache.get(2).unwrap().cursor(), 0);
        cache.clear(1);
        assert!(!cache.has(1));
        assert!(cache.has(2));
        assert_eq!(cache.len(), 1);
    }
}
