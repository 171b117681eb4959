//! A* over the push-weighted cost model: f = g + h with g accumulated from
//! `Level::step_cost`. Stale heap entries are discarded on pop against a
//! best-known-f table (lazy deletion) instead of decreasing priorities in
//! place. Among equal f the deeper node wins (negated g as secondary key),
//! then the insertion counter.
//!
//! The box-to-goal Manhattan heuristic is admissible for unit costs but not
//! proven admissible for the push-weighted model, so optimality here is
//! aspirational - see the crate tests, which only check edge-count optimality
//! against BFS.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use fnv::FnvHashMap;
use log::debug;

use crate::level::Level;
use crate::solver::{reconstruct, Parents};
use crate::stats::{Solution, Timer};

pub fn solve(level: &Level) -> Solution {
    let start = level.initial_state();
    let timer = Timer::start();

    if level.is_goal(&start) {
        return Solution::from_path(vec![start], 1, 0, timer.elapsed_ms());
    }

    let h0 = level.heuristic(&start);
    let mut counter: u64 = 0;
    let mut frontier = BinaryHeap::new();
    frontier.push(Reverse((h0, 0, counter, start.clone())));

    let mut g_score = FnvHashMap::default();
    g_score.insert(start.clone(), 0);
    let mut best_f = FnvHashMap::default();
    best_f.insert(start.clone(), h0);
    let mut parents = Parents::default();

    let mut generated: u64 = 1;
    let mut expanded: u64 = 0;

    while let Some(Reverse((f, _, _, current))) = frontier.pop() {
        // stale duplicate left behind by lazy deletion
        if let Some(&best) = best_f.get(&current) {
            if best < f {
                continue;
            }
        }
        expanded += 1;

        if level.is_goal(&current) {
            debug!("a_star: goal with f {} at expansion {}", f, expanded);
            let path = reconstruct(&parents, &current);
            return Solution::from_path(path, generated, expanded, timer.elapsed_ms());
        }

        let g_current = g_score[&current];
        for (dir, next) in level.neighbors(&current) {
            let tentative_g = g_current + level.step_cost(&current, dir, &next);
            if g_score
                .get(&next)
                .map_or(true, |&known| tentative_g < known)
            {
                g_score.insert(next.clone(), tentative_g);
                parents.insert(next.clone(), (current.clone(), dir));
                let f_next = tentative_g + level.heuristic(&next);
                best_f.insert(next.clone(), f_next);
                counter += 1;
                frontier.push(Reverse((f_next, -tentative_g, counter, next)));
                generated += 1;
            }
        }
    }

    Solution::failed(start, generated, expanded, timer.elapsed_ms())
}
