//! Depth-first search: LIFO stack with the same seen-set discipline as BFS.
//! Neighbors are pushed in reversed direction order so the pop order still
//! explores Up first. No optimality guarantee; the seen-set alone bounds the
//! search because the state space of a fixed level is finite.

use fnv::FnvHashSet;
use log::debug;

use crate::level::Level;
use crate::solver::{reconstruct, Parents};
use crate::stats::{Solution, Timer};

pub fn solve(level: &Level) -> Solution {
    let start = level.initial_state();
    let timer = Timer::start();

    let mut stack = vec![start.clone()];
    let mut seen = FnvHashSet::default();
    seen.insert(start.clone());
    let mut parents = Parents::default();

    let mut generated: u64 = 1;
    let mut expanded: u64 = 0;

    while let Some(current) = stack.pop() {
        expanded += 1;

        if level.is_goal(&current) {
            debug!("dfs: goal at expansion {}", expanded);
            let path = reconstruct(&parents, &current);
            return Solution::from_path(path, generated, expanded, timer.elapsed_ms());
        }

        for (dir, next) in level.neighbors(&current).into_iter().rev() {
            if seen.insert(next.clone()) {
                parents.insert(next.clone(), (current.clone(), dir));
                stack.push(next);
                generated += 1;
            }
        }
    }

    Solution::failed(start, generated, expanded, timer.elapsed_ms())
}
