// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]
// Clippy
#![warn(clippy::all)]

pub mod data;
pub mod fs;
pub mod level;
pub mod map_formatter;
pub mod solver;
pub mod state;
pub mod stats;

mod parser;
mod vec2d;

pub use crate::data::{Dir, Pos};
pub use crate::level::Level;
pub use crate::solver::Strategy;
pub use crate::state::State;
pub use crate::stats::{Solution, Stats};
