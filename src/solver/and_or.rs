//! AND/OR search over the deterministic transition system.
//!
//! Each state is an OR node choosing an action; each action leads to an AND
//! node over the set of resulting states, which here is always a singleton
//! because Sokoban is deterministic. The layering is kept so the structure
//! generalizes to nondeterministic effects, but in practice this behaves as
//! depth-first search with full memoization and ancestor-path cycle
//! detection. A found plan is linearized afterwards by replaying recorded
//! actions through the transition function.

use std::rc::Rc;

use fnv::FnvHashMap;
use log::debug;

use crate::data::Dir;
use crate::level::Level;
use crate::state::State;
use crate::stats::{Solution, Timer};

/// A resolved subplan: either we are already at the goal, or take one action
/// and continue with the rest.
enum Plan {
    Done,
    Step(Dir, Rc<Plan>),
}

struct Search<'a> {
    level: &'a Level,
    /// `None` records failure, `Some` a resolved subplan.
    memo: FnvHashMap<State, Option<Rc<Plan>>>,
    generated: u64,
    expanded: u64,
}

impl Search<'_> {
    fn or_search(&mut self, state: &State, path: &mut Vec<State>) -> Option<Rc<Plan>> {
        if let Some(known) = self.memo.get(state) {
            return known.clone();
        }
        self.expanded += 1;

        if self.level.is_goal(state) {
            let done = Rc::new(Plan::Done);
            self.memo.insert(state.clone(), Some(done.clone()));
            return Some(done);
        }

        // revisiting an ancestor means this branch loops
        if path.contains(state) {
            self.memo.insert(state.clone(), None);
            return None;
        }

        path.push(state.clone());
        for (dir, next) in self.level.neighbors(state) {
            self.generated += 1;
            if let Some(rest) = self.and_search(&[next], path) {
                path.pop();
                let plan = Rc::new(Plan::Step(dir, rest));
                self.memo.insert(state.clone(), Some(plan.clone()));
                return Some(plan);
            }
        }
        path.pop();

        self.memo.insert(state.clone(), None);
        None
    }

    /// Every outcome of the action must succeed. Deterministic actions have
    /// exactly one outcome, so this delegates to a single OR search.
    fn and_search(&mut self, outcomes: &[State], path: &mut Vec<State>) -> Option<Rc<Plan>> {
        debug_assert_eq!(outcomes.len(), 1);
        self.or_search(&outcomes[0], path)
    }
}

pub fn solve(level: &Level) -> Solution {
    let start = level.initial_state();
    let timer = Timer::start();

    if level.is_goal(&start) {
        return Solution::from_path(vec![start], 1, 0, timer.elapsed_ms());
    }

    let mut search = Search {
        level,
        memo: FnvHashMap::default(),
        generated: 0,
        expanded: 0,
    };
    let plan = search.or_search(&start, &mut Vec::new());

    let plan = match plan {
        None => {
            return Solution::failed(
                start,
                search.generated.max(1),
                search.expanded,
                timer.elapsed_ms(),
            );
        }
        Some(plan) => plan,
    };

    // linearize: replay the recorded actions through the transition function
    let mut path = vec![start.clone()];
    let mut current = start;
    let mut cursor = plan;
    loop {
        let (action, rest) = match &*cursor {
            Plan::Done => break,
            Plan::Step(action, rest) => (*action, rest.clone()),
        };
        let next = level
            .neighbors(&current)
            .into_iter()
            .find(|&(dir, _)| dir == action)
            .map(|(_, next)| next);
        match next {
            Some(next) => {
                path.push(next.clone());
                current = next;
            }
            None => break,
        }
        cursor = rest;
    }

    debug!("and_or: linearized plan of {} steps", path.len() - 1);
    let generated = search.generated.max(path.len() as u64);
    Solution::from_path(path, generated, search.expanded, timer.elapsed_ms())
}
