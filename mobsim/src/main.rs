//! Mobsim — agents chasing a wandering target across generated voxel terrain.
//!
//! A minimal host around the voxnav crates: it owns the world, the agents
//! and the tick loop, and wires the scheduler → cache → follower data flow
//! the way a game server would.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::RngExt;

use voxnav_agents::{
    AgentId, AgentMotion, FollowConfig, PathCache, PathFollower, SearchRequest, SearchScheduler,
};
use voxnav_core::{BlockState, Cell, InMemoryWorld, Vec3};
use voxnav_paths::{Algorithm, SearchLimits, euclidean_sq};

const WORLD_SIZE: i32 = 32;
const MAX_HEIGHT: i32 = 4;
const N_AGENTS: u64 = 5;
const TICKS: u32 = 600;
const RETARGET_EVERY: u32 = 150;
/// An agent counts as arrived within this squared cell distance.
const ARRIVE_SQ: i64 = 2;

struct Agent {
    id: AgentId,
    pos: Vec3,
    algorithm: Algorithm,
    arrivals: u32,
    at_target: bool,
}

/// Sink for the follower's motion port: collects this tick's motion
/// vectors and remembers what each agent faces.
#[derive(Default)]
struct MotionLog {
    moves: Vec<(AgentId, Vec3)>,
    facing: HashMap<AgentId, Cell>,
}

impl AgentMotion for MotionLog {
    fn set_motion(&mut self, agent: AgentId, motion: Vec3) {
        self.moves.push((agent, motion));
    }

    fn look_at(&mut self, agent: AgentId, target: Cell) {
        self.facing.insert(agent, target);
    }
}

#[inline]
fn idx(x: i32, z: i32) -> usize {
    (z * WORLD_SIZE + x) as usize
}

/// Rolling heightmap terrain: each column's height drifts at most one cell
/// from its west/north neighbors, so most of the map is traversable.
fn generate_terrain(rng: &mut SmallRng) -> (InMemoryWorld, Vec<i32>) {
    let mut heights = vec![0i32; (WORLD_SIZE * WORLD_SIZE) as usize];
    for x in 0..WORLD_SIZE {
        for z in 0..WORLD_SIZE {
            let west = if x > 0 { heights[idx(x - 1, z)] } else { 2 };
            let north = if z > 0 { heights[idx(x, z - 1)] } else { west };
            let base = (west + north) / 2;
            heights[idx(x, z)] = (base + rng.random_range(-1..=1)).clamp(0, MAX_HEIGHT);
        }
    }

    let mut world = InMemoryWorld::new();
    for x in 0..WORLD_SIZE {
        for z in 0..WORLD_SIZE {
            let h = heights[idx(x, z)];
            world.fill_box(Cell::new(x, -2, z), Cell::new(x, h - 1, z), BlockState::STONE);
        }
    }
    (world, heights)
}

/// The walk-surface cell of a random column.
fn random_surface(heights: &[i32], rng: &mut SmallRng) -> Cell {
    let x = rng.random_range(0..WORLD_SIZE);
    let z = rng.random_range(0..WORLD_SIZE);
    Cell::new(x, heights[idx(x, z)], z)
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let mut rng = rand::make_rng::<SmallRng>();
    let (world, heights) = generate_terrain(&mut rng);
    let world = Arc::new(world);

    let mut scheduler = SearchScheduler::new(Arc::clone(&world), 2, SearchLimits::default());
    let mut cache = PathCache::new();
    let follower = PathFollower::new(FollowConfig::default());
    let mut port = MotionLog::default();

    let mut agents: Vec<Agent> = (0..N_AGENTS)
        .map(|i| Agent {
            id: i + 1,
            pos: random_surface(&heights, &mut rng).center(),
            algorithm: Algorithm::ALL[i as usize % Algorithm::ALL.len()],
            arrivals: 0,
            at_target: false,
        })
        .collect();

    let mut target = random_surface(&heights, &mut rng);
    log::info!(
        "{N_AGENTS} agents on {WORLD_SIZE}x{WORLD_SIZE} terrain, target at {target}"
    );

    for tick in 0..TICKS {
        if tick % RETARGET_EVERY == 0 && tick > 0 {
            target = random_surface(&heights, &mut rng);
            for agent in &mut agents {
                agent.at_target = false;
            }
            log::info!("tick {tick}: target moves to {target}");
        }

        // Apply finished searches before anyone reads the cache.
        scheduler.drain(&mut cache, |id| agents.iter().any(|a| a.id == id));

        for agent in &mut agents {
            let here = Cell::containing(agent.pos);

            if euclidean_sq(here, target) <= ARRIVE_SQ {
                if !agent.at_target {
                    agent.at_target = true;
                    agent.arrivals += 1;
                    cache.clear(agent.id);
                    log::info!("tick {tick}: agent {} reached {target}", agent.id);
                }
                continue;
            }

            // Re-path when the cached route is spent or aims at an old
            // target; the in-flight check keeps one search per agent.
            let stale = match cache.get(agent.id) {
                Some(entry) => entry.is_exhausted() || entry.path().last() != Some(&target),
                None => true,
            };
            if stale && !scheduler.is_pending(agent.id) {
                scheduler.request(SearchRequest {
                    agent: agent.id,
                    from: here,
                    to: target,
                    algorithm: agent.algorithm,
                });
            }

            follower.drive(&mut cache, agent.id, agent.pos, &mut port);
        }

        for (id, v) in port.moves.drain(..) {
            if let Some(agent) = agents.iter_mut().find(|a| a.id == id) {
                agent.pos = agent.pos + v;
            }
        }

        if tick % 50 == 0 {
            for agent in &agents {
                log::debug!(
                    "tick {tick}: agent {} ({}) at {}",
                    agent.id,
                    agent.algorithm,
                    Cell::containing(agent.pos)
                );
            }
        }

        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    for agent in &agents {
        log::info!(
            "agent {} ({}): {} arrivals",
            agent.id,
            agent.algorithm,
            agent.arrivals
        );
    }
}
