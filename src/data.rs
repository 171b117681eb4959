use std::fmt::{self, Display, Formatter};
use std::ops::Add;

/// Grid coordinate as (row, column). Signed so that stepping off the grid is
/// representable and can be rejected by `Level::is_wall` instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub r: i32,
    pub c: i32,
}

impl Pos {
    pub fn new(r: i32, c: i32) -> Pos {
        Pos { r, c }
    }

    /// Manhattan distance.
    pub fn dist(self, other: Pos) -> i32 {
        (self.r - other.r).abs() + (self.c - other.c).abs()
    }
}

/// Action label on a transition. Purely descriptive - the state alone carries
/// the puzzle configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

/// Canonical direction order. DFS pushes neighbors in reverse of this so its
/// pop order still visits Up first.
pub const DIRECTIONS: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

impl Dir {
    pub fn offset(self) -> (i32, i32) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
            Dir::Right => (0, 1),
        }
    }

    /// The direction of a single-cell step between two player positions,
    /// if there is one. Useful for labeling a reconstructed path.
    pub fn between(from: Pos, to: Pos) -> Option<Dir> {
        DIRECTIONS.iter().cloned().find(|&dir| from + dir == to)
    }
}

impl Add<Dir> for Pos {
    type Output = Pos;

    fn add(self, dir: Dir) -> Pos {
        let (dr, dc) = dir.offset();
        Pos {
            r: self.r + dr,
            c: self.c + dc,
        }
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Dir::Up => write!(f, "U"),
            Dir::Down => write!(f, "D"),
            Dir::Left => write!(f, "L"),
            Dir::Right => write!(f, "R"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance() {
        assert_eq!(Pos::new(1, 1).dist(Pos::new(1, 1)), 0);
        assert_eq!(Pos::new(0, 0).dist(Pos::new(2, 3)), 5);
        assert_eq!(Pos::new(2, 3).dist(Pos::new(0, 0)), 5);
    }

    #[test]
    fn direction_steps() {
        let p = Pos::new(3, 3);
        assert_eq!(p + Dir::Up, Pos::new(2, 3));
        assert_eq!(p + Dir::Down, Pos::new(4, 3));
        assert_eq!(p + Dir::Left, Pos::new(3, 2));
        assert_eq!(p + Dir::Right, Pos::new(3, 4));
    }

    #[test]
    fn between_adjacent_cells() {
        let p = Pos::new(3, 3);
        for &dir in &DIRECTIONS {
            assert_eq!(Dir::between(p, p + dir), Some(dir));
        }
        assert_eq!(Dir::between(p, p), None);
        assert_eq!(Dir::between(p, Pos::new(5, 3)), None);
    }
}
