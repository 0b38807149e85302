//! The search engine: strategy selection, budgets, and reusable scratch.

use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use voxnav_core::{Cell, WorldSampler};

use crate::pather::{AstarPather, TerrainPather};

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// Search strategy selector.
///
/// A closed enum rather than a name string: dispatch is exhaustive at
/// compile time, and the string form survives only at the configuration
/// boundary via [`FromStr`]/[`fmt::Display`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Optimal under unit costs; guided by the Manhattan estimate.
    AStar,
    /// A* with a zero estimate; explores strictly by accumulated cost.
    Dijkstra,
    /// Fast hill-descent on the estimate; neither optimal nor complete.
    Greedy,
    /// Unweighted shortest path by step count.
    Bfs,
    /// First route found, not necessarily shortest.
    Dfs,
}

impl Algorithm {
    /// All strategies, for exhaustive iteration in tools and tests.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::AStar,
        Algorithm::Dijkstra,
        Algorithm::Greedy,
        Algorithm::Bfs,
        Algorithm::Dfs,
    ];
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::AStar => "a-star",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::Greedy => "greedy",
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
        };
        f.write_str(name)
    }
}

/// Error for an unrecognized algorithm name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError(String);

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown search algorithm: {:?}", self.0)
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a-star" | "astar" => Ok(Algorithm::AStar),
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "greedy" => Ok(Algorithm::Greedy),
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            other => Err(ParseAlgorithmError(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// SearchLimits
// ---------------------------------------------------------------------------

/// Budget for a single search run.
///
/// The expansion cap bounds work on pathological or unreachable goals so a
/// query always terminates; running out reports as "no path".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchLimits {
    /// Maximum number of node expansions per query.
    pub max_expansions: usize,
}

impl SearchLimits {
    pub const fn new(max_expansions: usize) -> Self {
        Self { max_expansions }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_expansions: 8192,
        }
    }
}

// ---------------------------------------------------------------------------
// Internal search bookkeeping
// ---------------------------------------------------------------------------

/// Per-cell bookkeeping for the priority-queue searches.
#[derive(Clone, Copy)]
pub(crate) struct Score {
    pub(crate) g: i32,
    pub(crate) open: bool,
}

/// Heap entry, ordered so the max-heap pops the lowest `f` first and
/// breaks ties by insertion order (lowest sequence number first).
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) struct OpenRef {
    pub(crate) cell: Cell,
    pub(crate) f: i32,
    pub(crate) seq: u32,
}

impl Ord for OpenRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f, oldest first.
        other.f.cmp(&self.f).then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// PathSearch
// ---------------------------------------------------------------------------

/// Central coordinator for pathfinding over an implicit voxel graph.
///
/// `PathSearch` owns the open heap, score and parent maps, visited set and
/// scratch buffers used by every strategy, so repeated queries reuse their
/// allocations. All tables are keyed by [`Cell`] identity — exact integer
/// coordinates — regardless of any floating residue in the caller's data.
///
/// One instance serves one query at a time; schedulers give each worker
/// its own.
pub struct PathSearch {
    pub(crate) limits: SearchLimits,
    // A* / Dijkstra state
    pub(crate) scores: HashMap<Cell, Score>,
    pub(crate) open: BinaryHeap<OpenRef>,
    pub(crate) seq: u32,
    // BFS / DFS / Greedy state
    pub(crate) visited: HashSet<Cell>,
    pub(crate) queue: VecDeque<Cell>,
    pub(crate) stack: Vec<Cell>,
    // shared
    pub(crate) parents: HashMap<Cell, Cell>,
    pub(crate) nbuf: Vec<Cell>,
    pub(crate) expansions: usize,
}

impl PathSearch {
    /// Create a search engine with default limits.
    pub fn new() -> Self {
        Self::with_limits(SearchLimits::default())
    }

    /// Create a search engine with the given limits.
    pub fn with_limits(limits: SearchLimits) -> Self {
        Self {
            limits,
            scores: HashMap::new(),
            open: BinaryHeap::new(),
            seq: 0,
            visited: HashSet::new(),
            queue: VecDeque::new(),
            stack: Vec::new(),
            parents: HashMap::new(),
            nbuf: Vec::with_capacity(4),
            expansions: 0,
        }
    }

    /// The configured budget.
    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Node expansions performed by the last query. When a query returned
    /// `None` with `expansions() == limits().max_expansions`, the budget
    /// ran out rather than the frontier.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Compute a route from `from` to `to` with the selected strategy.
    ///
    /// Returns the full cell sequence including both endpoints, or `None`
    /// when no route was found within the budget. `from == to` is a
    /// trivial single-cell path for every strategy.
    pub fn find_path<P: AstarPather>(
        &mut self,
        pather: &P,
        algorithm: Algorithm,
        from: Cell,
        to: Cell,
    ) -> Option<Vec<Cell>> {
        match algorithm {
            Algorithm::AStar => self.astar_path(pather, from, to),
            Algorithm::Dijkstra => self.dijkstra_path(pather, from, to),
            Algorithm::Greedy => self.greedy_path(pather, from, to),
            Algorithm::Bfs => self.bfs_path(pather, from, to),
            Algorithm::Dfs => self.dfs_path(pather, from, to),
        }
    }

    // -----------------------------------------------------------------------
    // Shared plumbing for the strategy impls
    // -----------------------------------------------------------------------

    /// Reset state used by the priority-queue searches.
    pub(crate) fn reset_priority(&mut self) {
        self.scores.clear();
        self.open.clear();
        self.parents.clear();
        self.seq = 0;
        self.expansions = 0;
    }

    /// Reset state used by the uninformed searches.
    pub(crate) fn reset_uninformed(&mut self) {
        self.visited.clear();
        self.queue.clear();
        self.stack.clear();
        self.parents.clear();
        self.expansions = 0;
    }

    /// Push a cell onto the open heap, stamped for insertion-order ties.
    pub(crate) fn push_open(&mut self, cell: Cell, f: i32) {
        self.seq = self.seq.wrapping_add(1);
        self.open.push(OpenRef {
            cell,
            f,
            seq: self.seq,
        });
    }

    /// Spend one unit of the expansion budget. False once exhausted.
    pub(crate) fn spend_expansion(&mut self) -> bool {
        if self.expansions >= self.limits.max_expansions {
            return false;
        }
        self.expansions += 1;
        true
    }

    /// Reconstruct the path ending at `to` by walking the parent map.
    pub(crate) fn build_path(&self, to: Cell) -> Vec<Cell> {
        let mut path = vec![to];
        let mut c = to;
        while let Some(&p) = self.parents.get(&c) {
            path.push(p);
            c = p;
        }
        path.reverse();
        path
    }
}

impl Default for PathSearch {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Blocking convenience entry point
// ---------------------------------------------------------------------------

/// One-shot blocking search against a world sampler.
///
/// Builds a [`TerrainPather`] and a fresh [`PathSearch`] per call; meant
/// for offline tooling and tests. Interactive hosts keep searches off the
/// tick loop by scheduling them through `voxnav-agents` instead.
pub fn find_path_sync<W: WorldSampler>(
    world: &W,
    from: Cell,
    to: Cell,
    algorithm: Algorithm,
    limits: SearchLimits,
) -> Option<Vec<Cell>> {
    let pather = TerrainPather::new(world);
    PathSearch::with_limits(limits).find_path(&pather, algorithm, from, to)
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn algorithm_and_limits_round_trip() {
        for algorithm in Algorithm::ALL {
            let json = serde_json::to_string(&algorithm).unwrap();
            let back: Algorithm = serde_json::from_str(&json).unwrap();
            assert_eq!(back, algorithm);
        }
        let limits = SearchLimits::new(512);
        let json = serde_json::to_string(&limits).unwrap();
        let back: SearchLimits = serde_json::from_str(&json).unwrap();
        assert_eq!(back, limits);
    }

    #[test]
    fn cell_round_trip() {
        let c = Cell::new(-3, 64, 12);
        let json = serde_json::to_string(&c).unwrap();
        let back: Cell = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
