//! Simulated annealing as a single random walk with full memory.
//!
//! Unlike classical SA this never forgets a visited state: the seen-set spans
//! the whole run, so the annealing schedule only biases the local exploration
//! order. The run alternates an anneal phase (Metropolis acceptance over a
//! random sample of unseen neighbors, multiplicative cooling every iteration)
//! with a rescue phase that jumps to any previously visited state that still
//! has an unseen neighbor and resets the temperature. The run fails only when
//! no such state remains anywhere.

use fnv::FnvHashSet;
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::data::Dir;
use crate::level::Level;
use crate::solver::{reconstruct, Parents};
use crate::state::State;
use crate::stats::{Solution, Timer};

#[derive(Debug, Clone, Copy)]
pub struct AnnealingConfig {
    /// Temperature at the start of every anneal phase.
    pub base_temp: f64,
    /// Multiplicative cooling factor applied every iteration.
    pub alpha: f64,
    /// The anneal phase ends once the temperature drops below this.
    pub min_temp: f64,
    /// Iteration budget per anneal phase.
    pub max_iters: u64,
    /// At most this many unseen neighbors are sampled per step.
    pub sample_size: usize,
    /// Rescue scans a random sample of this many seen states before falling
    /// back to a full scan.
    pub rescue_sample: usize,
    /// Fixed RNG seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        AnnealingConfig {
            base_temp: 120.0,
            alpha: 0.95,
            min_temp: 1.0,
            max_iters: 1_000_000,
            sample_size: 12,
            rescue_sample: 2000,
            seed: None,
        }
    }
}

pub fn solve(level: &Level) -> Solution {
    solve_with(level, &AnnealingConfig::default())
}

pub fn solve_with(level: &Level, config: &AnnealingConfig) -> Solution {
    let start = level.initial_state();
    let timer = Timer::start();

    if level.is_goal(&start) {
        return Solution::from_path(vec![start], 1, 0, timer.elapsed_ms());
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut seen = FnvHashSet::default();
    seen.insert(start.clone());
    let mut parents = Parents::default();

    let mut current = start.clone();
    let mut h_current = level.heuristic(&current);
    let mut temp = config.base_temp;

    let mut generated: u64 = 0;
    let mut expanded: u64 = 0;

    loop {
        // anneal phase
        for _ in 0..config.max_iters {
            if temp < config.min_temp {
                break;
            }
            expanded += 1;

            let mut unseen = unseen_neighbors(level, &current, &seen);
            if unseen.is_empty() {
                // dead end, go rescue
                break;
            }
            if unseen.len() > config.sample_size {
                unseen = unseen
                    .choose_multiple(&mut rng, config.sample_size)
                    .cloned()
                    .collect();
            }

            let pick = rng.gen_range(0..unseen.len());
            let (dir, next) = unseen.swap_remove(pick);
            seen.insert(next.clone());
            parents.insert(next.clone(), (current.clone(), dir));
            generated += 1;

            let h_next = level.heuristic(&next);
            if level.is_goal(&next) {
                debug!("annealing: goal after {} expansions", expanded);
                let path = reconstruct(&parents, &next);
                return Solution::from_path(path, generated, expanded, timer.elapsed_ms());
            }

            // Metropolis rule: always walk downhill, sometimes uphill
            let delta = f64::from(h_next - h_current);
            if delta < 0.0 || rng.gen::<f64>() < (-delta / temp.max(1e-12)).exp() {
                current = next;
                h_current = h_next;
            }

            temp *= config.alpha;
        }

        // rescue phase: reheat from any visited state with unseen neighbors
        match pick_pivot(level, &seen, config.rescue_sample, &mut rng) {
            None => {
                debug!("annealing: no pivot left, giving up");
                return Solution::failed(start, generated, expanded, timer.elapsed_ms());
            }
            Some(pivot) => {
                h_current = level.heuristic(&pivot);
                current = pivot;
                temp = config.base_temp;
            }
        }
    }
}

fn unseen_neighbors(
    level: &Level,
    state: &State,
    seen: &FnvHashSet<State>,
) -> Vec<(Dir, State)> {
    level
        .neighbors(state)
        .into_iter()
        .filter(|(_, next)| !seen.contains(next))
        .collect()
}

fn pick_pivot(
    level: &Level,
    seen: &FnvHashSet<State>,
    rescue_sample: usize,
    rng: &mut StdRng,
) -> Option<State> {
    let all: Vec<&State> = seen.iter().collect();
    if all.is_empty() {
        return None;
    }

    // random sample first to keep the scan cheap
    let sample: Vec<&&State> = if all.len() <= rescue_sample {
        all.iter().collect()
    } else {
        all.choose_multiple(rng, rescue_sample).collect()
    };
    for &&state in &sample {
        if !unseen_neighbors(level, state, seen).is_empty() {
            return Some(state.clone());
        }
    }

    // nothing in the sample, fall back to the full scan
    for &state in &all {
        if !unseen_neighbors(level, state, seen).is_empty() {
            return Some(state.clone());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use crate::level::Level;

    use super::*;

    fn seeded() -> AnnealingConfig {
        AnnealingConfig {
            seed: Some(42),
            ..AnnealingConfig::default()
        }
    }

    #[test]
    fn corridor_in_one_push() {
        let level = Level::parse("\
#####
#@$.#
#####");
        let solution = solve_with(&level, &seeded());
        assert_eq!(solution.stats.steps_count, 1);
        assert!(level.is_goal(&solution.end_state));
    }

    #[test]
    fn goal_at_start() {
        let level = Level::parse("\
#####
#*@ #
#####");
        let solution = solve_with(&level, &seeded());
        assert_eq!(solution.stats.steps_count, 0);
    }

    #[test]
    fn full_memory_walk_finds_the_goal_eventually() {
        // rescue keeps reseeding the walk until the finite state space is
        // exhausted, so a solvable level is always solved
        let level = Level::parse("\
#####
#.  #
# $ #
# @ #
#####");
        for seed in 0..5 {
            let config = AnnealingConfig {
                seed: Some(seed),
                ..AnnealingConfig::default()
            };
            let solution = solve_with(&level, &config);
            assert!(level.is_goal(&solution.end_state), "seed {}", seed);
        }
    }

    #[test]
    fn unsolvable_level_exhausts_pivots() {
        let level = Level::parse("\
#####
#$@.#
#####");
        let solution = solve_with(&level, &seeded());
        assert_eq!(solution.path.len(), 1);
        assert_eq!(solution.stats.steps_count, 0);
    }
}
