use std::fmt::{self, Debug, Display, Formatter};

use crate::data::Pos;
use crate::level::{Level, MapCell};
use crate::state::State;

/// Renders a level with a state overlaid using the same symbol table the
/// parser reads, so printed output round-trips.
pub struct MapFormatter<'a> {
    level: &'a Level,
    state: &'a State,
}

impl<'a> MapFormatter<'a> {
    pub(crate) fn new(level: &'a Level, state: &'a State) -> Self {
        Self { level, state }
    }
}

impl Display for MapFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for r in 0..self.level.rows() {
            for c in 0..self.level.cols() {
                let pos = Pos::new(r as i32, c as i32);
                let goal = self.level.grid[pos] == MapCell::Goal;
                let ch = if self.level.grid[pos] == MapCell::Wall {
                    '#'
                } else if self.state.player == pos {
                    if goal {
                        '+'
                    } else {
                        '@'
                    }
                } else if self.state.has_box(pos) {
                    if goal {
                        '*'
                    } else {
                        '$'
                    }
                } else if goal {
                    '.'
                } else {
                    ' '
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Debug for MapFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use crate::level::Level;
    use crate::state::State;

    #[test]
    fn round_trips_through_the_parser() {
        let text = "\
######
#@$.*#
######
";
        let level = Level::parse(text);
        let rendered = level.to_string();
        assert_eq!(rendered, text);
        assert_eq!(Level::parse(&rendered), level);
    }

    #[test]
    fn overlays_a_moved_state() {
        let level = Level::parse("\
#####
#@$.#
#####");
        let pushed = State::new(
            crate::data::Pos::new(1, 2),
            vec![crate::data::Pos::new(1, 3)],
        );
        assert_eq!(
            level.format_with_state(&pushed).to_string(),
            "#####\n# @*#\n#####\n"
        );
    }
}
