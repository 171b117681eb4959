//! Exploration under partial observability.
//!
//! The agent only sees cells within a bounded Manhattan radius of the player
//! and accumulates them into a known map that never shrinks. While no box or
//! goal has ever been observed it walks toward the nearest frontier (a known
//! non-wall cell bordering unknown territory), one step at a time, routing
//! only through cells it knows to be walkable. Once both a box and a goal
//! have been seen anywhere it attempts a full breadth-first solve from the
//! current true state and splices that path onto the trajectory. The
//! trajectory so far is returned even on failure.

use std::collections::VecDeque;

use fnv::{FnvHashMap, FnvHashSet};
use log::debug;

use crate::data::{Pos, DIRECTIONS};
use crate::level::Level;
use crate::solver::bfs_to_boxes;
use crate::state::State;
use crate::stats::{Solution, Stats, Timer};

#[derive(Debug, Clone, Copy)]
pub struct ExploreConfig {
    /// Manhattan radius of the player's vision.
    pub vision_radius: i32,
}

impl Default for ExploreConfig {
    fn default() -> Self {
        ExploreConfig { vision_radius: 2 }
    }
}

/// Coarse cell classification in the agent's known map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terrain {
    Wall,
    Goal,
    Box,
    Floor,
}

pub fn solve(level: &Level) -> Solution {
    solve_with(level, &ExploreConfig::default())
}

pub fn solve_with(level: &Level, config: &ExploreConfig) -> Solution {
    let start = level.initial_state();
    let timer = Timer::start();

    let mut player = start.player;
    let boxes: Vec<Pos> = start.boxes().to_vec();
    let mut known: FnvHashMap<Pos, Terrain> = FnvHashMap::default();

    let mut trajectory = vec![start];
    let mut generated: u64 = 1;
    let mut expanded: u64 = 0;

    loop {
        expanded += 1;
        observe(level, player, &boxes, config.vision_radius, &mut known);

        let seen_goal = known.values().any(|&t| t == Terrain::Goal);
        let seen_box = known.values().any(|&t| t == Terrain::Box);
        if seen_box && seen_goal {
            // both are visible somewhere, assume full information and solve
            let current = State::new(player, boxes.clone());
            let (local_path, g, e) = bfs_to_boxes(level, current, level.goals());
            generated += g;
            expanded += e;
            if let Some(local_path) = local_path {
                debug!("explore: local solve succeeded, splicing path");
                trajectory.extend(local_path.into_iter().skip(1));
                break;
            }
        }

        let frontiers = frontiers(&known);
        let target = match nearest_frontier(&frontiers, player) {
            None => break,
            Some(target) => target,
        };
        let route = match route_through_known(&known, player, target) {
            Some(route) if route.len() >= 2 => route,
            _ => break,
        };

        // advance exactly one step toward the frontier
        player = route[1];
        generated += 1;
        trajectory.push(State::new(player, boxes.clone()));
    }

    let depth = trajectory.len() - 1;
    let end_state = trajectory[trajectory.len() - 1].clone();
    Solution {
        path: trajectory,
        stats: Stats {
            generated,
            expanded,
            depth,
            steps_count: depth,
            runtime_ms: timer.elapsed_ms(),
        },
        end_state,
    }
}

/// Adds everything within the vision radius to the known map. Walls win over
/// goals, goals over boxes - so a box sitting on a goal reads as a goal.
fn observe(level: &Level, pos: Pos, boxes: &[Pos], radius: i32, known: &mut FnvHashMap<Pos, Terrain>) {
    for dr in -radius..=radius {
        for dc in -radius..=radius {
            if dr.abs() + dc.abs() > radius {
                continue;
            }
            let cell = Pos::new(pos.r + dr, pos.c + dc);
            if cell.r < 0
                || cell.c < 0
                || cell.r as usize >= level.rows()
                || cell.c as usize >= level.cols()
            {
                continue;
            }
            let terrain = if level.is_wall(cell) {
                Terrain::Wall
            } else if level.is_goal_cell(cell) {
                Terrain::Goal
            } else if boxes.contains(&cell) {
                Terrain::Box
            } else {
                Terrain::Floor
            };
            known.insert(cell, terrain);
        }
    }
}

/// Known non-wall cells bordering at least one unknown cell.
fn frontiers(known: &FnvHashMap<Pos, Terrain>) -> Vec<Pos> {
    let mut out = Vec::new();
    for (&cell, &terrain) in known {
        if terrain == Terrain::Wall {
            continue;
        }
        if DIRECTIONS
            .iter()
            .any(|&dir| !known.contains_key(&(cell + dir)))
        {
            out.push(cell);
        }
    }
    out
}

/// Nearest frontier by Manhattan distance; ties go to the first in the
/// known-map's (deterministic FNV) iteration order.
fn nearest_frontier(frontiers: &[Pos], player: Pos) -> Option<Pos> {
    frontiers.iter().cloned().min_by_key(|f| f.dist(player))
}

/// Shortest route from `from` to `to` through cells known to be walkable
/// (floor or goal, never a box or wall).
fn route_through_known(
    known: &FnvHashMap<Pos, Terrain>,
    from: Pos,
    to: Pos,
) -> Option<Vec<Pos>> {
    let mut queue = VecDeque::new();
    queue.push_back(from);
    let mut seen = FnvHashSet::default();
    seen.insert(from);
    let mut parents: FnvHashMap<Pos, Pos> = FnvHashMap::default();

    while let Some(cell) = queue.pop_front() {
        if cell == to {
            let mut route = vec![cell];
            let mut cursor = cell;
            while let Some(&prev) = parents.get(&cursor) {
                route.push(prev);
                cursor = prev;
            }
            route.reverse();
            return Some(route);
        }
        for &dir in &DIRECTIONS {
            let next = cell + dir;
            match known.get(&next) {
                Some(Terrain::Floor) | Some(Terrain::Goal) => {
                    if seen.insert(next) {
                        parents.insert(next, cell);
                        queue.push_back(next);
                    }
                }
                _ => {}
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use crate::level::Level;

    use super::*;

    #[test]
    fn corridor_is_fully_visible_and_solved() {
        let level = Level::parse("\
#####
#@$.#
#####");
        let solution = solve(&level);
        assert_eq!(solution.stats.steps_count, 1);
        assert!(level.is_goal(&solution.end_state));
    }

    #[test]
    fn solved_level_with_nothing_to_explore() {
        // everything within vision, box already on the goal
        let level = Level::parse("\
#####
#*@ #
#####");
        let solution = solve(&level);
        assert_eq!(solution.stats.steps_count, 0);
        assert_eq!(solution.path.len(), 1);
    }

    #[test]
    fn explores_before_it_can_exploit() {
        // box and goal start outside the initial vision radius
        let level = Level::parse("\
########
#@     #
# #### #
#    $.#
########");
        let solution = solve(&level);
        assert!(level.is_goal(&solution.end_state));
        assert!(solution.stats.steps_count > 1);
        // the whole trajectory, exploration included, is legal transitions
        for pair in solution.path.windows(2) {
            assert!(level
                .neighbors(&pair[0])
                .iter()
                .any(|(_, next)| *next == pair[1]));
        }
    }

    #[test]
    fn empty_level_reports_zero_steps() {
        let level = Level::parse("\
###
#@#
###");
        let solution = solve(&level);
        assert_eq!(solution.stats.steps_count, 0);
    }
}
