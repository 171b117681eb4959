use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

use crate::data::{Dir, Pos, DIRECTIONS};
use crate::map_formatter::MapFormatter;
use crate::parser;
use crate::state::State;
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MapCell {
    Floor,
    Wall,
    Goal,
}

/// Static level geometry plus the starting configuration. Immutable after
/// parsing; safe to share read-only between any number of solve calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    pub(crate) grid: Vec2d<MapCell>,
    goals: Vec<Pos>,
    start_player: Pos,
    start_boxes: Vec<Pos>,
}

impl Level {
    pub const MOVE_COST: i32 = 1;
    pub const PUSH_COST: i32 = 2;

    pub(crate) fn new(
        grid: Vec2d<MapCell>,
        mut goals: Vec<Pos>,
        start_player: Pos,
        start_boxes: Vec<Pos>,
    ) -> Self {
        // canonical order so is_goal is a plain slice comparison
        goals.sort();
        Level {
            grid,
            goals,
            start_player,
            start_boxes,
        }
    }

    /// Parses an XSB-style symbol grid. Never fails - see the parser module
    /// for what malformed input degrades to.
    pub fn parse(text: &str) -> Level {
        parser::parse(text)
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Goal cells in canonical (sorted) order.
    pub fn goals(&self) -> &[Pos] {
        &self.goals
    }

    /// Out-of-bounds cells count as walls so no transition ever leaves the
    /// grid, even on levels without a closed border.
    pub fn is_wall(&self, pos: Pos) -> bool {
        !self.grid.contains(pos) || self.grid[pos] == MapCell::Wall
    }

    pub fn is_goal_cell(&self, pos: Pos) -> bool {
        self.grid.contains(pos) && self.grid[pos] == MapCell::Goal
    }

    /// A box pushed here could never leave again: two perpendicular adjacent
    /// walls form an L around the cell and the cell is not a goal.
    pub fn is_dead_corner(&self, pos: Pos) -> bool {
        let up = self.is_wall(pos + Dir::Up);
        let down = self.is_wall(pos + Dir::Down);
        let left = self.is_wall(pos + Dir::Left);
        let right = self.is_wall(pos + Dir::Right);
        let cornered = (up && left) || (up && right) || (down && left) || (down && right);
        cornered && !self.is_goal_cell(pos)
    }

    /// All non-wall cells in row-major order. Domain of every CSP variable.
    pub fn free_cells(&self) -> Vec<Pos> {
        let mut cells = Vec::new();
        for r in 0..self.grid.rows() {
            for c in 0..self.grid.cols() {
                let pos = Pos::new(r as i32, c as i32);
                if self.grid[pos] != MapCell::Wall {
                    cells.push(pos);
                }
            }
        }
        cells
    }

    pub fn initial_state(&self) -> State {
        State::new(self.start_player, self.start_boxes.clone())
    }

    /// Goal test: the box set equals the goal set. Player position is
    /// irrelevant. Both sides are kept sorted, so this is a slice compare.
    pub fn is_goal(&self, state: &State) -> bool {
        state.boxes() == self.goals()
    }

    /// A cell is enterable if it is not a wall and no box occupies it.
    pub fn is_free(&self, pos: Pos, boxes: &[Pos]) -> bool {
        !self.is_wall(pos) && !boxes.contains(&pos)
    }

    /// Legal successors of `state` in canonical direction order
    /// (Up, Down, Left, Right). For each direction either the player steps
    /// into a free cell, or pushes a box one cell further if the cell behind
    /// it is free; a wall or blocked push yields nothing.
    pub fn neighbors(&self, state: &State) -> Vec<(Dir, State)> {
        let mut successors = Vec::with_capacity(4);
        for &dir in &DIRECTIONS {
            let next = state.player + dir;
            if state.has_box(next) {
                let push_to = next + dir;
                if self.is_free(push_to, state.boxes()) {
                    let new_boxes = state
                        .boxes()
                        .iter()
                        .map(|&b| if b == next { push_to } else { b })
                        .collect();
                    successors.push((dir, State::new(next, new_boxes)));
                }
            } else if self.is_free(next, state.boxes()) {
                successors.push((dir, State::new(next, state.boxes().to_vec())));
            }
        }
        successors
    }

    /// Sum over boxes of the minimum Manhattan distance to any goal.
    /// Zero when the level has no goals (the min over nothing contributes
    /// nothing). Admissible for unit move cost, not for the push-weighted
    /// cost model.
    pub fn heuristic(&self, state: &State) -> i32 {
        let mut total = 0;
        for &b in state.boxes() {
            if let Some(min) = self.goals.iter().map(|&g| b.dist(g)).min() {
                total += min;
            }
        }
        total
    }

    /// Cost of one generated edge: a push moves a box (`PUSH_COST`), anything
    /// else is a plain move (`MOVE_COST`). Identical states cost nothing -
    /// such an edge should never be generated.
    pub fn step_cost(&self, from: &State, _action: Dir, to: &State) -> i32 {
        if from == to {
            return 0;
        }
        if from.boxes() != to.boxes() {
            Self::PUSH_COST
        } else {
            Self::MOVE_COST
        }
    }

    pub fn format_with_state<'a>(&'a self, state: &'a State) -> MapFormatter<'a> {
        MapFormatter::new(self, state)
    }
}

impl FromStr for Level {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parser::parse(s))
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_state(&self.initial_state()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORRIDOR: &str = "\
#####
#@$.#
#####";

    #[test]
    fn corridor_geometry() {
        let level = Level::parse(CORRIDOR);
        assert_eq!(level.rows(), 3);
        assert_eq!(level.cols(), 5);
        assert_eq!(level.goals(), &[Pos::new(1, 3)]);

        let start = level.initial_state();
        assert_eq!(start.player, Pos::new(1, 1));
        assert_eq!(start.boxes(), &[Pos::new(1, 2)]);
        assert!(!level.is_goal(&start));
    }

    #[test]
    fn out_of_bounds_is_wall() {
        let level = Level::parse("@");
        assert!(level.is_wall(Pos::new(-1, 0)));
        assert!(level.is_wall(Pos::new(0, 1)));
        assert!(!level.is_wall(Pos::new(0, 0)));
        // nowhere to go on a 1x1 level
        assert!(level.neighbors(&level.initial_state()).is_empty());
    }

    #[test]
    fn corridor_single_push() {
        let level = Level::parse(CORRIDOR);
        let start = level.initial_state();

        let successors = level.neighbors(&start);
        assert_eq!(successors.len(), 1);
        let (dir, next) = &successors[0];
        assert_eq!(*dir, Dir::Right);
        assert_eq!(next.player, Pos::new(1, 2));
        assert_eq!(next.boxes(), &[Pos::new(1, 3)]);
        assert!(level.is_goal(next));
    }

    #[test]
    fn blocked_push_yields_nothing() {
        // box against the wall, pushing right is illegal
        let level = Level::parse("\
####
#@$#
####");
        assert!(level.neighbors(&level.initial_state()).is_empty());
    }

    #[test]
    fn push_into_box_is_illegal() {
        let level = Level::parse("\
######
#@$$.#
######");
        assert!(level.neighbors(&level.initial_state()).is_empty());
    }

    #[test]
    fn neighbors_stay_in_bounds_and_off_walls() {
        let level = Level::parse("\
#######
#@$ . #
# $  .#
#######");
        let start = level.initial_state();
        let box_count = start.boxes().len();

        let mut frontier = vec![start.clone()];
        let mut seen = std::collections::HashSet::new();
        seen.insert(start);
        while let Some(s) = frontier.pop() {
            for (_, ns) in level.neighbors(&s) {
                assert!(!level.is_wall(ns.player));
                assert_eq!(ns.boxes().len(), box_count);
                for &b in ns.boxes() {
                    assert!(!level.is_wall(b));
                }
                if seen.insert(ns.clone()) {
                    frontier.push(ns);
                }
            }
        }
    }

    #[test]
    fn heuristic_sums_closest_goal_distances() {
        let level = Level::parse("\
#######
#@$ . #
# $  .#
#######");
        let start = level.initial_state();
        // boxes (1,2) and (2,2); goals (1,4) and (2,5)
        assert_eq!(level.heuristic(&start), 2 + 3);
    }

    #[test]
    fn heuristic_zero_without_goals() {
        let level = Level::parse("\
#####
#@$ #
#####");
        assert_eq!(level.heuristic(&level.initial_state()), 0);
    }

    #[test]
    fn step_costs() {
        let level = Level::parse(CORRIDOR);
        let start = level.initial_state();
        let (dir, pushed) = level.neighbors(&start)[0].clone();
        assert_eq!(level.step_cost(&start, dir, &pushed), Level::PUSH_COST);
        assert_eq!(level.step_cost(&start, dir, &start), 0);

        let move_level = Level::parse("\
####
#@ #
####");
        let ms = move_level.initial_state();
        let (mdir, moved) = move_level.neighbors(&ms)[0].clone();
        assert_eq!(move_level.step_cost(&ms, mdir, &moved), Level::MOVE_COST);
    }

    #[test]
    fn dead_corners() {
        let level = Level::parse(CORRIDOR);
        // (1,1) has walls up and left and is not a goal
        assert!(level.is_dead_corner(Pos::new(1, 1)));
        // (1,2) sits in a corridor, not an L
        assert!(!level.is_dead_corner(Pos::new(1, 2)));
        // goal cells are exempt even when cornered
        assert!(!level.is_dead_corner(Pos::new(1, 3)));
    }

    #[test]
    fn free_cells_row_major() {
        let level = Level::parse(CORRIDOR);
        assert_eq!(
            level.free_cells(),
            vec![Pos::new(1, 1), Pos::new(1, 2), Pos::new(1, 3)]
        );
    }

    #[test]
    fn goal_with_empty_boxes_and_goals() {
        let level = Level::parse("\
###
#@#
###");
        assert!(level.is_goal(&level.initial_state()));
    }
}
