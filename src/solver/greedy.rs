//! Greedy best-first search: the frontier is ordered by the heuristic alone,
//! with an insertion counter as tie-break so equal scores pop in generation
//! order. First-generated wins for duplicates - no re-opening.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use fnv::FnvHashSet;
use log::debug;

use crate::level::Level;
use crate::solver::{reconstruct, Parents};
use crate::stats::{Solution, Timer};

pub fn solve(level: &Level) -> Solution {
    let start = level.initial_state();
    let timer = Timer::start();

    let mut counter: u64 = 0;
    let mut frontier = BinaryHeap::new();
    frontier.push(Reverse((level.heuristic(&start), counter, start.clone())));

    let mut seen = FnvHashSet::default();
    seen.insert(start.clone());
    let mut parents = Parents::default();

    let mut generated: u64 = 1;
    let mut expanded: u64 = 0;

    while let Some(Reverse((_, _, current))) = frontier.pop() {
        expanded += 1;

        if level.is_goal(&current) {
            debug!("greedy: goal at expansion {}", expanded);
            let path = reconstruct(&parents, &current);
            return Solution::from_path(path, generated, expanded, timer.elapsed_ms());
        }

        for (dir, next) in level.neighbors(&current) {
            if seen.insert(next.clone()) {
                parents.insert(next.clone(), (current.clone(), dir));
                counter += 1;
                frontier.push(Reverse((level.heuristic(&next), counter, next)));
                generated += 1;
            }
        }
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
    fn goal_at_start_is_zero_steps() {
        let level = Level::parse("\
#####
#*@ #
#####");
        let solution = solve(&level);
        assert_eq!(solution.stats.steps_count, 0);
        assert_eq!(solution.path.len(), 1);
    }

    #[test]
    fn failure_returns_start() {
        let level = Level::parse("\
#####
#$@.#
#####");
        let solution = solve(&level);
        assert_eq!(solution.path.len(), 1);
        assert_eq!(solution.stats.depth, 0);
    }
}
