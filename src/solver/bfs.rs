//! Breadth-first search: FIFO frontier, goal test on pop, duplicate filter
//! on generation. Shortest solution in edge count.

use std::collections::VecDeque;

use fnv::FnvHashSet;
use log::debug;

use crate::level::Level;
use crate::solver::{reconstruct, Parents};
use crate::stats::{Solution, Timer};

pub fn solve(level: &Level) -> Solution {
    let start = level.initial_state();
    let timer = Timer::start();

    let mut queue = VecDeque::new();
    queue.push_back(start.clone());
    let mut seen = FnvHashSet::default();
    seen.insert(start.clone());
    let mut parents = Parents::default();

    let mut generated: u64 = 1;
    let mut expanded: u64 = 0;

    while let Some(current) = queue.pop_front() {
        expanded += 1;

        if level.is_goal(&current) {
            debug!("bfs: goal at expansion {}", expanded);
            let path = reconstruct(&parents, &current);
            return Solution::from_path(path, generated, expanded, timer.elapsed_ms());
        }

        for (dir, next) in level.neighbors(&current) {
            if seen.insert(next.clone()) {
                parents.insert(next.clone(), (current.clone(), dir));
                queue.push_back(next);
                generated += 1;
            }
        }
    }

    Solution::failed(start, generated, expanded, timer.elapsed_ms())
}
