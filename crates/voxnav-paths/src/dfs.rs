use voxnav_core::Cell;

use crate::PathSearch;
use crate::pather::Pather;

impl PathSearch {
    /// Depth-first search from `from` to `to`.
    ///
    /// The most recently discovered cell is explored first, so the result
    /// is *a* route, not necessarily a shortest one. Shares the visited
    /// discipline of [`bfs_path`](PathSearch::bfs_path).
    pub fn dfs_path<P: Pather>(&mut self, pather: &P, from: Cell, to: Cell) -> Option<Vec<Cell>> {
        if from == to {
            return Some(vec![from]);
        }
        self.reset_uninformed();

        self.visited.insert(from);
        self.stack.push(from);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut found = false;

        'search: while let Some(c) = self.stack.pop() {
            if !self.spend_expansion() {
                break;
            }

            nbuf.clear();
            pather.neighbors(c, &mut nbuf);

            for &n in nbuf.iter() {
                if !self.visited.insert(n) {
                    continue;
                }
                self.parents.insert(n, c);
                if n == to {
                    found = true;
                    break 'search;
                }
                self.stack.push(n);
            }
        }

        self.nbuf = nbuf;
        if !found {
            return None;
        }
        Some(self.build_path(to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{platform, wall};
    use crate::{StepClass, TerrainPather};

    #[test]
    fn finds_some_route_with_legal_steps() {
        let w = platform(5);
        let pather = TerrainPather::new(&w);
        let mut search = PathSearch::new();
        let from = Cell::new(0, 0, 0);
        let to = Cell::new(4, 0, 4);
        let path = search.dfs_path(&pather, from, to).unwrap();

        assert_eq!(path[0], from);
        assert_eq!(*path.last().unwrap(), to);
        for pair in path.windows(2) {
            let lateral = (pair[1].x - pair[0].x).abs() + (pair[1].z - pair[0].z).abs();
            assert_eq!(lateral, 1, "non-lateral step {} -> {}", pair[0], pair[1]);
            assert_ne!(
                pather.oracle().step_class(pair[0], pair[1]),
                StepClass::Blocked
            );
        }
    }

    #[test]
    fn never_revisits_a_cell() {
        let w = platform(4);
        let pather = TerrainPather::new(&w);
        let mut search = PathSearch::new();
        let path = search
            .dfs_path(&pather, Cell::new(0, 0, 0), Cell::new(3, 0, 1))
            .unwrap();
        let mut seen = std::collections::HashSet::new();
        for c in path {
            assert!(seen.insert(c), "{c} appears twice");
        }
    }

    #[test]
    fn sealed_wall_yields_none() {
        let mut w = platform(5);
        wall(&mut w, 2, 2, 5);
        let pather = TerrainPather::new(&w);
        let mut search = PathSearch::new();
        assert_eq!(
            search.dfs_path(&pather, Cell::new(0, 0, 0), Cell::new(4, 0, 0)),
            None
        );
    }
}
