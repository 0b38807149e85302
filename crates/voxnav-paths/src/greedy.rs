use voxnav_core::Cell;

use crate::PathSearch;
use crate::pather::AstarPather;

impl PathSearch {
    /// Greedy best-first descent toward `to`.
    ///
    /// At each step the single unvisited neighbor with the lowest estimate
    /// is taken; there is no open set and no backtracking, trading
    /// optimality and completeness for speed. A dead end yields `None`
    /// even when a route exists elsewhere. The visited set keeps the walk
    /// from ping-ponging between cells of equal estimate.
    pub fn greedy_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Cell,
        to: Cell,
    ) -> Option<Vec<Cell>> {
        if from == to {
            return Some(vec![from]);
        }
        self.reset_uninformed();

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut path = vec![from];
        let mut c = from;
        self.visited.insert(from);

        loop {
            if !self.spend_expansion() {
                break;
            }

            nbuf.clear();
            pather.neighbors(c, &mut nbuf);

            // Lowest estimate among unvisited neighbors; first wins ties.
            let mut best: Option<(Cell, i32)> = None;
            for &n in nbuf.iter() {
                if self.visited.contains(&n) {
                    continue;
                }
                let e = pather.estimate(n, to);
                if best.is_none_or(|(_, be)| e < be) {
                    best = Some((n, e));
                }
            }

            let Some((next, _)) = best else {
                break; // dead end
            };
            self.visited.insert(next);
            path.push(next);
            if next == to {
                self.nbuf = nbuf;
                return Some(path);
            }
            c = next;
        }

        self.nbuf = nbuf;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TerrainPather;
    use crate::fixtures::{platform, wall};

    #[test]
    fn runs_straight_at_the_goal_on_open_ground() {
        let w = platform(5);
        let pather = TerrainPather::new(&w);
        let mut search = PathSearch::new();
        let path = search
            .greedy_path(&pather, Cell::new(0, 0, 2), Cell::new(4, 0, 2))
            .unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], Cell::new(0, 0, 2));
        assert_eq!(path[4], Cell::new(4, 0, 2));
    }

    #[test]
    fn dead_end_returns_none_without_backtracking() {
        let mut w = platform(5);
        wall(&mut w, 2, 2, 5);
        let pather = TerrainPather::new(&w);
        let mut search = PathSearch::new();
        assert_eq!(
            search.greedy_path(&pather, Cell::new(0, 0, 0), Cell::new(4, 0, 0)),
            None
        );
    }

    #[test]
    fn visited_cells_are_never_revisited() {
        let w = platform(4);
        let pather = TerrainPather::new(&w);
        let mut search = PathSearch::new();
        if let Some(path) = search.greedy_path(&pather, Cell::new(0, 0, 0), Cell::new(3, 0, 3)) {
            let mut seen = std::collections::HashSet::new();
            for c in path {
                assert!(seen.insert(c), "{c} appears twice");
            }
        }
    }
}
