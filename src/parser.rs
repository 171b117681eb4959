//! XSB-style symbol-grid parser.
//!
//! `#` wall, `.` goal, `$` box, `*` box on goal, `@` player, `+` player on
//! goal, anything else floor. Blank lines are skipped before the grid
//! dimensions are computed and short rows are right-padded with floor.
//!
//! Parsing is deliberately infallible: a level without a player marker keeps
//! the documented `(0, 0)` default (with a warning), unknown symbols become
//! floor. Solvers treat the result as best-effort data.

use log::warn;

use crate::data::Pos;
use crate::level::{Level, MapCell};
use crate::vec2d::Vec2d;

pub(crate) fn parse(text: &str) -> Level {
    let mut grid = Vec::new();
    let mut goals = Vec::new();
    let mut boxes = Vec::new();
    let mut player = None;

    for line in text.lines().filter(|line| !line.trim().is_empty()) {
        let r = grid.len() as i32;
        let mut row = Vec::with_capacity(line.len());
        for (c, ch) in line.chars().enumerate() {
            let pos = Pos::new(r, c as i32);
            let cell = match ch {
                '#' => MapCell::Wall,
                '.' => {
                    goals.push(pos);
                    MapCell::Goal
                }
                '$' => {
                    boxes.push(pos);
                    MapCell::Floor
                }
                '*' => {
                    boxes.push(pos);
                    goals.push(pos);
                    MapCell::Goal
                }
                '@' => {
                    player = Some(pos);
                    MapCell::Floor
                }
                '+' => {
                    player = Some(pos);
                    goals.push(pos);
                    MapCell::Goal
                }
                _ => MapCell::Floor,
            };
            row.push(cell);
        }
        grid.push(row);
    }

    let player = player.unwrap_or_else(|| {
        warn!("level has no player marker, defaulting to (0, 0)");
        Pos::new(0, 0)
    });

    Level::new(Vec2d::new(&grid), goals, player, boxes)
}
