//! The ten search strategies and the machinery they share: parent-map path
//! reconstruction and the breadth-first sub-search the CSP pair uses to turn
//! a placement into a move sequence.
//!
//! Every strategy is a free `solve(&Level) -> Solution` function; the
//! [`Strategy`] enum is the closed registry over them, carrying the display
//! metadata and the name-based lookup the CLI needs.

use std::collections::VecDeque;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use fnv::{FnvHashMap, FnvHashSet};

use crate::data::{Dir, Pos};
use crate::level::Level;
use crate::state::State;
use crate::stats::Solution;

pub mod a_star;
pub mod and_or;
pub mod annealing;
pub mod backtracking;
pub mod beam;
pub mod bfs;
pub mod dfs;
pub mod explore;
pub mod forward_checking;
pub mod greedy;

/// Parent edge per generated state, for walking a found goal back to the
/// start.
pub(crate) type Parents = FnvHashMap<State, (State, Dir)>;

pub(crate) fn reconstruct(parents: &Parents, goal: &State) -> Vec<State> {
    let mut path = vec![goal.clone()];
    let mut cursor = goal.clone();
    while let Some((prev, _)) = parents.get(&cursor) {
        path.push(prev.clone());
        cursor = prev.clone();
    }
    path.reverse();
    path
}

/// Breadth-first search over the real transition function for any state whose
/// box set equals `target_boxes` (player position irrelevant). Returns the
/// path from `start` if one exists, plus the generated/expanded counts of the
/// sub-search either way. `target_boxes` must be sorted.
pub(crate) fn bfs_to_boxes(
    level: &Level,
    start: State,
    target_boxes: &[Pos],
) -> (Option<Vec<State>>, u64, u64) {
    let mut queue = VecDeque::new();
    queue.push_back(start.clone());
    let mut seen = FnvHashSet::default();
    seen.insert(start);
    let mut parents: FnvHashMap<State, State> = FnvHashMap::default();

    let mut generated: u64 = 1;
    let mut expanded: u64 = 0;

    while let Some(current) = queue.pop_front() {
        expanded += 1;
        if current.boxes() == target_boxes {
            let mut path = vec![current.clone()];
            let mut cursor = current;
            while let Some(prev) = parents.get(&cursor) {
                path.push(prev.clone());
                cursor = prev.clone();
            }
            path.reverse();
            return (Some(path), generated, expanded);
        }
        for (_, next) in level.neighbors(&current) {
            if seen.insert(next.clone()) {
                parents.insert(next.clone(), current.clone());
                queue.push_back(next);
                generated += 1;
            }
        }
    }
    (None, generated, expanded)
}

/// Closed registry of the available strategies. Adding one means adding a
/// variant here and wiring it into `ALL`, `solve` and the name tables below.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    Bfs,
    Dfs,
    Greedy,
    AStar,
    Beam,
    Annealing,
    AndOr,
    Explore,
    Backtracking,
    ForwardChecking,
}

impl Strategy {
    pub const ALL: [Strategy; 10] = [
        Strategy::Bfs,
        Strategy::Dfs,
        Strategy::Greedy,
        Strategy::AStar,
        Strategy::Beam,
        Strategy::Annealing,
        Strategy::AndOr,
        Strategy::Explore,
        Strategy::Backtracking,
        Strategy::ForwardChecking,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Bfs => "bfs",
            Strategy::Dfs => "dfs",
            Strategy::Greedy => "greedy",
            Strategy::AStar => "astar",
            Strategy::Beam => "beam",
            Strategy::Annealing => "annealing",
            Strategy::AndOr => "andor",
            Strategy::Explore => "explore",
            Strategy::Backtracking => "backtracking",
            Strategy::ForwardChecking => "forward-checking",
        }
    }

    /// Display-only family label; no behavioral effect.
    pub fn group(self) -> &'static str {
        match self {
            Strategy::Bfs | Strategy::Dfs => "uninformed",
            Strategy::Greedy | Strategy::AStar => "informed",
            Strategy::Beam | Strategy::Annealing => "local",
            Strategy::AndOr => "nondeterministic",
            Strategy::Explore => "partial observability",
            Strategy::Backtracking | Strategy::ForwardChecking => "csp",
        }
    }

    /// Display-only one-line characterization; no behavioral effect.
    pub fn attributes(self) -> &'static str {
        match self {
            Strategy::Bfs => "complete, shortest in edges",
            Strategy::Dfs => "complete, not optimal",
            Strategy::Greedy => "heuristic only, not optimal",
            Strategy::AStar => "g + h, lazy deletion",
            Strategy::Beam => "memory-bounded, incomplete",
            Strategy::Annealing => "randomized, full memory",
            Strategy::AndOr => "memoized, cycle-safe",
            Strategy::Explore => "bounded vision, explores first",
            Strategy::Backtracking => "fixed order, full re-check",
            Strategy::ForwardChecking => "mrv, domain pruning",
        }
    }

    pub fn solve(self, level: &Level) -> Solution {
        match self {
            Strategy::Bfs => bfs::solve(level),
            Strategy::Dfs => dfs::solve(level),
            Strategy::Greedy => greedy::solve(level),
            Strategy::AStar => a_star::solve(level),
            Strategy::Beam => beam::solve(level),
            Strategy::Annealing => annealing::solve(level),
            Strategy::AndOr => and_or::solve(level),
            Strategy::Explore => explore::solve(level),
            Strategy::Backtracking => backtracking::solve(level),
            Strategy::ForwardChecking => forward_checking::solve(level),
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .iter()
            .copied()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| format!("unknown strategy: {}", s))
    }
}
