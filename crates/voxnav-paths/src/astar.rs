use voxnav_core::Cell;

use crate::PathSearch;
use crate::pather::AstarPather;
use crate::search::Score;

impl PathSearch {
    /// Compute the shortest path from `from` to `to` using A*.
    ///
    /// The open heap is keyed by `f = g + estimate`; ties resolve by
    /// insertion order. Returns the full path (including both endpoints),
    /// or `None` when no route exists or the expansion budget runs out.
    pub fn astar_path<P: AstarPather>(
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
        let h0 = pather.estimate(from, to);
        self.push_open(from, h0);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut found = false;

        while let Some(current) = self.open.pop() {
            let c = current.cell;

            // Skip entries made stale by a later improvement.
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
                self.push_open(n, tentative + pather.estimate(n, to));
            }
        }

        self.nbuf = nbuf;
        if !found {
            return None;
        }
        Some(self.build_path(to))
    }
}
