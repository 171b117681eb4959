//! Beam search: one bounded layer of states at a time. Every layer member is
//! expanded, new successors become candidates scored by the heuristic, and
//! only the `width` best survive into the next layer. A goal successor
//! short-circuits immediately without waiting for the ranking. Pruned
//! candidates are gone for good - this is a non-optimal, memory-bounded
//! approximation.

use fnv::FnvHashSet;
use log::debug;

use crate::level::Level;
use crate::solver::{reconstruct, Parents};
use crate::state::State;
use crate::stats::{Solution, Timer};

#[derive(Debug, Clone, Copy)]
pub struct BeamConfig {
    /// States kept per depth layer.
    pub width: usize,
}

impl Default for BeamConfig {
    fn default() -> Self {
        BeamConfig { width: 100 }
    }
}

pub fn solve(level: &Level) -> Solution {
    solve_with(level, &BeamConfig::default())
}

pub fn solve_with(level: &Level, config: &BeamConfig) -> Solution {
    let start = level.initial_state();
    let timer = Timer::start();

    if level.is_goal(&start) {
        return Solution::from_path(vec![start], 1, 0, timer.elapsed_ms());
    }

    let mut beam = vec![start.clone()];
    let mut seen = FnvHashSet::default();
    seen.insert(start.clone());
    let mut parents = Parents::default();

    let mut generated: u64 = 1;
    let mut expanded: u64 = 0;
    let mut counter: u64 = 0;

    while !beam.is_empty() {
        expanded += beam.len() as u64;

        let mut candidates: Vec<(i32, u64, State)> = Vec::new();
        let mut found_goal = None;

        'layer: for current in &beam {
            for (dir, next) in level.neighbors(current) {
                if !seen.insert(next.clone()) {
                    continue;
                }
                parents.insert(next.clone(), (current.clone(), dir));
                generated += 1;

                if level.is_goal(&next) {
                    found_goal = Some(next);
                    break 'layer;
                }

                counter += 1;
                candidates.push((level.heuristic(&next), counter, next));
            }
        }

        if let Some(goal) = found_goal {
            debug!("beam: goal after expanding {} states", expanded);
            let path = reconstruct(&parents, &goal);
            return Solution::from_path(path, generated, expanded, timer.elapsed_ms());
        }

        if candidates.is_empty() {
            break;
        }

        // keep the `width` lowest heuristics, counter keeps the order stable
        candidates.sort();
        candidates.truncate(config.width);
        beam = candidates.into_iter().map(|(_, _, state)| state).collect();
    }

    Solution::failed(start, generated, expanded, timer.elapsed_ms())
}

#[cfg(test)]
mod tests {
    use crate::level::Level;

    use super::*;

    #[test]
    fn corridor_in_one_push() {
        let level = Level::parse("\
#####
#@$.#
#####");
        let solution = solve(&level);
        assert_eq!(solution.stats.steps_count, 1);
        assert!(level.is_goal(&solution.end_state));
    }

    #[test]
    fn goal_at_start() {
        let level = Level::parse("\
#####
#*@ #
#####");
        let solution = solve(&level);
        assert_eq!(solution.stats.steps_count, 0);
        assert_eq!(solution.stats.expanded, 0);
    }

    #[test]
    fn narrow_beam_still_solves_a_corridor() {
        let level = Level::parse("\
#######
#@ $ .#
#######");
        let solution = solve_with(&level, &BeamConfig { width: 1 });
        assert!(level.is_goal(&solution.end_state));
        assert_eq!(solution.stats.steps_count, 3);
    }

    #[test]
    fn exhausted_candidates_fail() {
        let level = Level::parse("\
#####
#$@.#
#####");
        let solution = solve(&level);
        assert_eq!(solution.path.len(), 1);
        assert_eq!(solution.stats.steps_count, 0);
    }
}
