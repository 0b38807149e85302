//! Asynchronous search dispatch with per-agent in-flight bookkeeping.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task;

use voxnav_core::{Cell, WorldSampler};
use voxnav_paths::{Algorithm, PathSearch, SearchLimits, TerrainPather};

use crate::AgentId;
use crate::cache::PathCache;

/// A search job, captured by value. No references into live host state
/// cross the dispatch boundary; the background task sees only this copy
/// and the shared world sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRequest {
    pub agent: AgentId,
    pub from: Cell,
    pub to: Cell,
    pub algorithm: Algorithm,
}

struct Completion {
    agent: AgentId,
    result: Option<Vec<Cell>>,
}

/// Dispatches searches onto a bounded Tokio worker pool and hands results
/// back to the tick loop.
///
/// Per agent the scheduler moves Idle → Pending on [`request`], and back
/// to Idle when [`drain`] consumes the completion. At most one search per
/// agent is in flight: a second `request` for an agent that is already
/// Pending is ignored, which bounds work and makes per-agent completion
/// order trivial. Results reach the [`PathCache`] only inside `drain`, on
/// the caller's execution context, so the cache needs no locking.
///
/// [`request`]: SearchScheduler::request
/// [`drain`]: SearchScheduler::drain
pub struct SearchScheduler<W> {
    world: Arc<W>,
    limits: SearchLimits,
    permits: Arc<Semaphore>,
    pending: HashSet<AgentId>,
    tx: UnboundedSender<Completion>,
    rx: UnboundedReceiver<Completion>,
}

impl<W: WorldSampler + 'static> SearchScheduler<W> {
    /// Create a scheduler running at most `workers` searches concurrently.
    pub fn new(world: Arc<W>, workers: usize, limits: SearchLimits) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            world,
            limits,
            permits: Arc::new(Semaphore::new(workers.max(1))),
            pending: HashSet::new(),
            tx,
            rx,
        }
    }

    /// Whether a search for `agent` is in flight.
    pub fn is_pending(&self, agent: AgentId) -> bool {
        self.pending.contains(&agent)
    }

    /// Number of in-flight searches.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Dispatch a search. Returns `false` — and leaves the in-flight
    /// search untouched — when one is already pending for the same agent.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn request(&mut self, req: SearchRequest) -> bool {
        if !self.pending.insert(req.agent) {
            log::debug!("agent {}: search already pending, request dropped", req.agent);
            return false;
        }

        let world = Arc::clone(&self.world);
        let permits = Arc::clone(&self.permits);
        let limits = self.limits;
        let tx = self.tx.clone();

        tokio::spawn(async move {
            // The semaphore is never closed while the scheduler lives.
            let Ok(_permit) = permits.acquire_owned().await else {
                return;
            };
            let result = task::spawn_blocking(move || {
                let pather = TerrainPather::new(&*world);
                let mut search = PathSearch::with_limits(limits);
                let path = search.find_path(&pather, req.algorithm, req.from, req.to);
                if path.is_none() {
                    log::debug!(
                        "agent {}: no path {} -> {} with {} after {} expansions",
                        req.agent,
                        req.from,
                        req.to,
                        req.algorithm,
                        search.expansions()
                    );
                }
                path
            })
            .await
            .ok() // a crashed search task delivers as "no path"
            .flatten();

            // Send fails only when the scheduler itself is gone.
            let _ = tx.send(Completion {
                agent: req.agent,
                result,
            });
        });

        true
    }

    /// Apply finished searches to `cache`. Call once per tick, from the
    /// tick loop only.
    ///
    /// Completions for agents the `alive` predicate rejects are dropped
    /// without touching the cache; `None` results just release the
    /// agent's Pending state (re-requesting is the caller's decision).
    /// Returns the number of paths applied.
    pub fn drain(&mut self, cache: &mut PathCache, mut alive: impl FnMut(AgentId) -> bool) -> usize {
        let mut applied = 0;
        loop {
            match self.rx.try_recv() {
                Ok(done) => {
                    self.pending.remove(&done.agent);
                    let Some(path) = done.result else {
                        continue;
                    };
                    if !alive(done.agent) {
                        log::debug!("agent {}: result dropped, agent removed", done.agent);
                        continue;
                    }
                    cache.set(done.agent, path);
                    applied += 1;
                }
                // Disconnected cannot happen while we hold a sender.
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use voxnav_core::{BlockState, InMemoryWorld};

    const AGENT: AgentId = 42;

    fn platform(size: i32) -> Arc<InMemoryWorld> {
        let mut w = InMemoryWorld::new();
        w.fill_box(
            Cell::new(0, -1, 0),
            Cell::new(size - 1, -1, size - 1),
            BlockState::STONE,
        );
        Arc::new(w)
    }

    fn request(algorithm: Algorithm) -> SearchRequest {
        SearchRequest {
            agent: AGENT,
            from: Cell::new(0, 0, 0),
            to: Cell::new(4, 0, 0),
            algorithm,
        }
    }

    /// Drain until the agent leaves Pending, with a generous poll budget.
    async fn settle(
        scheduler: &mut SearchScheduler<InMemoryWorld>,
        cache: &mut PathCache,
        alive: bool,
    ) -> usize {
        let mut applied = 0;
        for _ in 0..500 {
            applied += scheduler.drain(cache, |_| alive);
            if !scheduler.is_pending(AGENT) {
                return applied;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!("search never completed");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn delivers_a_path_to_the_cache() {
        let mut scheduler = SearchScheduler::new(platform(5), 2, SearchLimits::default());
        let mut cache = PathCache::new();

        assert!(scheduler.request(request(Algorithm::AStar)));
        assert!(scheduler.is_pending(AGENT));

        let applied = settle(&mut scheduler, &mut cache, true).await;
        assert_eq!(applied, 1);
        let entry = cache.get(AGENT).unwrap();
        assert_eq!(entry.path().first(), Some(&Cell::new(0, 0, 0)));
        assert_eq!(entry.path().last(), Some(&Cell::new(4, 0, 0)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn second_request_while_pending_is_ignored() {
        let mut scheduler = SearchScheduler::new(platform(5), 1, SearchLimits::default());
        let mut cache = PathCache::new();

        assert!(scheduler.request(request(Algorithm::AStar)));
        assert!(!scheduler.request(request(Algorithm::Dfs)));

        let applied = settle(&mut scheduler, &mut cache, true).await;
        // Exactly one result ever lands.
        assert_eq!(applied, 1);
        assert!(!scheduler.is_pending(AGENT));
        assert!(cache.has(AGENT));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn result_for_removed_agent_is_dropped() {
        let mut scheduler = SearchScheduler::new(platform(5), 2, SearchLimits::default());
        let mut cache = PathCache::new();

        scheduler.request(request(Algorithm::Bfs));
        let applied = settle(&mut scheduler, &mut cache, false).await;
        assert_eq!(applied, 0);
        assert!(!cache.has(AGENT));
        // Pending state still cleared, so the slot is reusable.
        assert!(!scheduler.is_pending(AGENT));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn failed_search_releases_pending_without_touching_cache() {
        // Goal floats in mid-air: no route.
        let mut scheduler = SearchScheduler::new(platform(5), 2, SearchLimits::default());
        let mut cache = PathCache::new();

        scheduler.request(SearchRequest {
            agent: AGENT,
            from: Cell::new(0, 0, 0),
            to: Cell::new(2, 30, 2),
            algorithm: Algorithm::AStar,
        });
        let applied = settle(&mut scheduler, &mut cache, true).await;
        assert_eq!(applied, 0);
        assert!(!cache.has(AGENT));
        assert!(!scheduler.is_pending(AGENT));
    }
}
