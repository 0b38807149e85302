use voxnav_core::Cell;

use crate::PathSearch;
use crate::pather::WeightedPather;
use crate::search::Score;

impl PathSearch {
    /// Compute the cheapest path from `from` to `to` using Dijkstra's
    /// algorithm: A* with a zero estimate, exploring strictly by
    /// accumulated cost.
    pub fn dijkstra_path<P: WeightedPather>(
        &mut self,
        pather: &P,
        from: Cell,
        to: Cell,
    ) -> Option<Vec<Cell>> {
        if from == to {
            return Some(vec![from]);
        }
        self.reset_priority();

        self.scores.insert(from, Score { g: 0, open: true });
        self.push_open(from, 0);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut found = false;

        while let Some(current) = self.open.pop() {
            let c = current.cell;

            let Some(node) = self.scores.get_mut(&c) else {
                continue;
            };
            if !node.open {
                continue;
            }
            if c == to {
                found = true;
                break;
            }
            node.open = false;
            let current_g = node.g;

            if !self.spend_expansion() {
                break;
            }

            nbuf.clear();
            pather.neighbors(c, &mut nbuf);

            for &n in nbuf.iter() {
                let tentative = current_g + pather.cost(c, n);
                if let Some(seen) = self.scores.get(&n) {
                    if tentative >= seen.g {
                        continue;
                    }
                }
                self.scores.insert(
                    n,
                    Score {
                        g: tentative,
                        open: true,
                    },
                );
                self.parents.insert(n, c);
                self.push_open(n, tentative);
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
    use crate::TerrainPather;
    use crate::fixtures::{platform, wall};
    use voxnav_core::BlockState;

    #[test]
    fn matches_astar_length_on_open_ground() {
        let w = platform(6);
        let pather = TerrainPather::new(&w);
        let mut search = PathSearch::new();
        let from = Cell::new(0, 0, 0);
        let to = Cell::new(5, 0, 3);
        let dijkstra = search.dijkstra_path(&pather, from, to).unwrap();
        let astar = search.astar_path(&pather, from, to).unwrap();
        assert_eq!(dijkstra.len(), astar.len());
        assert_eq!(dijkstra[0], from);
        assert_eq!(*dijkstra.last().unwrap(), to);
    }

    #[test]
    fn matches_astar_length_around_obstacles() {
        let mut w = platform(7);
        wall(&mut w, 3, 2, 7);
        // Opening at z=5.
        for y in 0..2 {
            w.set(Cell::new(3, y, 5), BlockState::AIR);
        }
        let pather = TerrainPather::new(&w);
        let mut search = PathSearch::new();
        let from = Cell::new(0, 0, 0);
        let to = Cell::new(6, 0, 0);
        let dijkstra = search.dijkstra_path(&pather, from, to).unwrap();
        let astar = search.astar_path(&pather, from, to).unwrap();
        assert_eq!(dijkstra.len(), astar.len());
    }

    #[test]
    fn sealed_wall_yields_none() {
        let mut w = platform(5);
        wall(&mut w, 2, 2, 5);
        let pather = TerrainPather::new(&w);
        let mut search = PathSearch::new();
        assert_eq!(
            search.dijkstra_path(&pather, Cell::new(0, 0, 0), Cell::new(4, 0, 0)),
            None
        );
    }
}
