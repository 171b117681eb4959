//! The forward-checking variant of the CSP formulation in the neighboring
//! backtracking module.
//!
//! Same variables and constraints, two refinements: MRV variable ordering
//! (always branch on the unassigned variable with the smallest live domain)
//! and forward checking (each tentative assignment removes the chosen cell
//! from every other unassigned variable's domain; an emptied domain dead-ends
//! the branch before any deeper recursion). Pruned domains are built as a
//! fresh snapshot per branch, so backtracking restores them by simply keeping
//! the caller's snapshot; the cells themselves are shared through `Rc` and
//! only re-allocated for the domains a pruning step actually shrinks.
//!
//! On an unreachable placement this variant does NOT retry toward the goal
//! set: it immediately fabricates the two-state path. The asymmetry with
//! plain backtracking is deliberate and kept observable.

use std::rc::Rc;

use log::debug;

use crate::data::Pos;
use crate::level::Level;
use crate::solver::bfs_to_boxes;
use crate::state::State;
use crate::stats::{Solution, Stats, Timer};

type Domains = Vec<Rc<Vec<Pos>>>;

struct Search<'a> {
    level: &'a Level,
    var_count: usize,
    generated: u64,
    expanded: u64,
}

impl Search<'_> {
    /// Distinct from everything assigned so far; boxes additionally stay off
    /// dead corners.
    fn is_consistent(&self, var: usize, value: Pos, assignment: &[Option<Pos>]) -> bool {
        if var > 0 && self.level.is_dead_corner(value) {
            return false;
        }
        !assignment.iter().any(|&assigned| assigned == Some(value))
    }

    /// Snapshot of `domains` with `value` removed from every other unassigned
    /// variable. `None` when some domain empties, which dead-ends the branch.
    fn prune(
        &self,
        var: usize,
        value: Pos,
        assignment: &[Option<Pos>],
        domains: &Domains,
    ) -> Option<Domains> {
        let mut next = domains.clone();
        for u in 0..self.var_count {
            if u == var || assignment[u].is_some() {
                continue;
            }
            if next[u].contains(&value) {
                let filtered: Vec<Pos> =
                    next[u].iter().copied().filter(|&p| p != value).collect();
                if filtered.is_empty() {
                    return None;
                }
                next[u] = Rc::new(filtered);
            } else if next[u].is_empty() {
                return None;
            }
        }
        Some(next)
    }

    fn backtrack(
        &mut self,
        assignment: &mut Vec<Option<Pos>>,
        domains: &Domains,
    ) -> Option<(Pos, Vec<Pos>)> {
        // MRV: branch on the tightest unassigned variable
        let var = (0..self.var_count)
            .filter(|&v| assignment[v].is_none())
            .min_by_key(|&v| domains[v].len());
        let var = match var {
            None => {
                let positions: Vec<Pos> = assignment.iter().flatten().copied().collect();
                let (&player, boxes) = positions.split_first()?;
                let mut boxes = boxes.to_vec();
                boxes.sort();
                if boxes.as_slice() == self.level.goals() {
                    self.expanded += 1;
                    return Some((player, boxes));
                }
                return None;
            }
            Some(var) => var,
        };

        let values = Rc::clone(&domains[var]);
        for &candidate in values.iter() {
            if !self.is_consistent(var, candidate, assignment) {
                continue;
            }
            self.generated += 1;
            assignment[var] = Some(candidate);
            if let Some(pruned) = self.prune(var, candidate, assignment, domains) {
                if let Some(solution) = self.backtrack(assignment, &pruned) {
                    assignment[var] = None;
                    return Some(solution);
                }
            }
            assignment[var] = None;
        }
        None
    }
}

pub fn solve(level: &Level) -> Solution {
    let start = level.initial_state();
    let timer = Timer::start();

    let var_count = 1 + start.boxes().len();
    let free = Rc::new(level.free_cells());
    let box_domain: Rc<Vec<Pos>> = Rc::new(
        free.iter()
            .copied()
            .filter(|&p| !level.is_dead_corner(p))
            .collect(),
    );
    let mut domains: Domains = vec![Rc::clone(&free)];
    domains.resize(var_count, box_domain);

    let mut search = Search {
        level,
        var_count,
        generated: 0,
        expanded: 0,
    };
    let mut assignment = vec![None; var_count];
    let (player, boxes) = match search.backtrack(&mut assignment, &domains) {
        None => {
            debug!("forward_checking: no satisfying placement exists");
            return Solution::failed(
                start,
                search.generated.max(1),
                search.expanded,
                timer.elapsed_ms(),
            );
        }
        Some(solution) => solution,
    };

    let (path, g, e) = bfs_to_boxes(level, start.clone(), &boxes);
    let generated = search.generated + g;
    let expanded = search.expanded + e;
    if let Some(path) = path {
        return Solution::from_path(path, generated, expanded, timer.elapsed_ms());
    }

    // unverified two-state path, no second sub-search like the plain variant
    debug!("forward_checking: placement unreachable, fabricating a path");
    let goal_state = State::new(player, boxes);
    Solution {
        path: vec![start, goal_state.clone()],
        stats: Stats {
            generated,
            expanded,
            depth: 1,
            steps_count: 1,
            runtime_ms: timer.elapsed_ms(),
        },
        end_state: goal_state,
    }
}
