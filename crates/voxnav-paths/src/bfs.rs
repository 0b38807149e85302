use voxnav_core::Cell;

use crate::PathSearch;
use crate::pather::Pather;

impl PathSearch {
    /// Breadth-first search from `from` to `to`.
    ///
    /// Steps are unweighted, so the result is a shortest path by step
    /// count. The visited set, keyed on cell identity, prevents cycles.
    pub fn bfs_path<P: Pather>(&mut self, pather: &P, from: Cell, to: Cell) -> Option<Vec<Cell>> {
        if from == to {
            return Some(vec![from]);
        }
        self.reset_uninformed();

        self.visited.insert(from);
        self.queue.push_back(from);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut found = false;

        'search: while let Some(c) = self.queue.pop_front() {
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
                self.queue.push_back(n);
            }
        }

        self.nbuf = nbuf;
        if !found {
            return None;
        }
        Some(self.build_path(to))
    }
}
