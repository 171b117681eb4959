use std::fmt::{self, Debug, Display, Formatter};
use std::time::Instant;

use separator::Separatable;

use crate::state::State;

/// Counters attached to every strategy's result.
///
/// `generated` counts states produced (the start state included),
/// `expanded` counts states processed - popped from a frontier, or for the
/// CSP strategies, fully assigned CSP nodes. `depth` and `steps_count` both
/// hold the path length in edges; they are separate named fields for
/// reporting. `runtime_ms` brackets the solve call in wall-clock time and is
/// advisory only.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub generated: u64,
    pub expanded: u64,
    pub depth: usize,
    pub steps_count: usize,
    pub runtime_ms: f64,
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generated: {}", self.generated.separated_string())?;
        writeln!(f, "Expanded: {}", self.expanded.separated_string())?;
        writeln!(f, "Depth: {}", self.depth.separated_string())?;
        writeln!(f, "Steps: {}", self.steps_count.separated_string())?;
        writeln!(f, "Runtime: {:.3} ms", self.runtime_ms)
    }
}

/// Wall-clock scope around one solve call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Timer(Instant);

impl Timer {
    pub(crate) fn start() -> Timer {
        Timer(Instant::now())
    }

    pub(crate) fn elapsed_ms(&self) -> f64 {
        self.0.elapsed().as_secs_f64() * 1000.0
    }
}

/// What every strategy returns: the state path from start to terminal
/// (inclusive), the counters, and the terminal state.
///
/// Failure to find a solution is not an error: it is a single-state path
/// holding only the start state with zero depth/steps. Callers distinguish
/// the two by path length.
#[derive(Debug, Clone)]
pub struct Solution {
    pub path: Vec<State>,
    pub stats: Stats,
    pub end_state: State,
}

impl Solution {
    /// Bundles a non-empty path; depth and steps are derived from its length.
    pub(crate) fn from_path(
        path: Vec<State>,
        generated: u64,
        expanded: u64,
        runtime_ms: f64,
    ) -> Solution {
        debug_assert!(!path.is_empty());
        let depth = path.len() - 1;
        let end_state = path[path.len() - 1].clone();
        Solution {
            path,
            stats: Stats {
                generated,
                expanded,
                depth,
                steps_count: depth,
                runtime_ms,
            },
            end_state,
        }
    }

    /// The no-solution outcome: just the start state, zero depth and steps.
    pub(crate) fn failed(start: State, generated: u64, expanded: u64, runtime_ms: f64) -> Solution {
        Solution {
            path: vec![start.clone()],
            stats: Stats {
                generated,
                expanded,
                depth: 0,
                steps_count: 0,
                runtime_ms,
            },
            end_state: start,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::data::Pos;

    use super::*;

    #[test]
    fn from_path_derives_depth_and_terminal() {
        let a = State::new(Pos::new(1, 1), vec![]);
        let b = State::new(Pos::new(1, 2), vec![]);
        let solution = Solution::from_path(vec![a, b.clone()], 2, 1, 0.5);
        assert_eq!(solution.stats.depth, 1);
        assert_eq!(solution.stats.steps_count, 1);
        assert_eq!(solution.end_state, b);
    }

    #[test]
    fn failed_is_a_singleton_path() {
        let start = State::new(Pos::new(0, 0), vec![]);
        let solution = Solution::failed(start.clone(), 7, 3, 0.1);
        assert_eq!(solution.path, vec![start.clone()]);
        assert_eq!(solution.stats.depth, 0);
        assert_eq!(solution.stats.steps_count, 0);
        assert_eq!(solution.end_state, start);
    }

    #[test]
    fn stats_display_labels() {
        let stats = Stats {
            generated: 1234,
            expanded: 56,
            depth: 3,
            steps_count: 3,
            runtime_ms: 1.5,
        };
        let text = stats.to_string();
        assert!(text.contains("Generated: 1,234"));
        assert!(text.contains("Steps: 3"));
    }
}
