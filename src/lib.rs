//! Incremental maze solving for a micromouse-style grid robot: a wall
//! knowledge map, a flood-fill distance planner, and a heading/turn state
//! machine that turns "next target cell" into one discrete action per tick.

use enum_iterator::Sequence;

pub mod cmd;
pub mod flood;
pub mod maze;
pub mod mms;
pub mod navigator;
pub mod planner;
pub mod queue;
pub mod render;
pub mod scenario;
pub mod sim;

/// Side length of a standard competition maze.
pub const MAZE_SIDE: usize = 16;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Sequence)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub fn turn_left(self) -> Self {
        match self {
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
            Direction::East => Direction::North,
        }
    }

    pub fn turn_right(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    pub fn reverse(self) -> Self {
        self.turn_left().turn_left()
    }

    /// Coordinates of the neighbor one cell away, or `None` at the grid edge.
    /// Row 0 is the north edge, so North decreases the row.
    pub fn step(self, row: usize, col: usize, side: usize) -> Option<(usize, usize)> {
        match self {
            Direction::North => (row > 0).then(|| (row - 1, col)),
            Direction::East => (col + 1 < side).then(|| (row, col + 1)),
            Direction::South => (row + 1 < side).then(|| (row + 1, col)),
            Direction::West => (col > 0).then(|| (row, col - 1)),
        }
    }

    /// Direction from `from` to a 4-adjacent `to`; `None` otherwise.
    pub fn between(from: (usize, usize), to: (usize, usize)) -> Option<Self> {
        let (fr, fc) = from;
        let (tr, tc) = to;
        if fc == tc && tr + 1 == fr {
            Some(Direction::North)
        } else if fc == tc && fr + 1 == tr {
            Some(Direction::South)
        } else if fr == tr && fc + 1 == tc {
            Some(Direction::East)
        } else if fr == tr && tc + 1 == fc {
            Some(Direction::West)
        } else {
            None
        }
    }

    pub fn letter(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'N' => Some(Direction::North),
            'E' => Some(Direction::East),
            'S' => Some(Direction::South),
            'W' => Some(Direction::West),
            _ => None,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// The single discrete action the caller must execute before the next tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Forward,
    Idle,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RobotPose {
    pub row: usize,
    pub col: usize,
    pub heading: Direction,
}

impl RobotPose {
    pub fn new(row: usize, col: usize, heading: Direction) -> Self {
        Self { row, col, heading }
    }

    pub fn ahead(&self, side: usize) -> Option<(usize, usize)> {
        self.heading.step(self.row, self.col, side)
    }

    /// Move one cell along the current heading. Returns false (and stays
    /// put) if that would leave the grid.
    pub fn advance(&mut self, side: usize) -> bool {
        match self.ahead(side) {
            Some((row, col)) => {
                self.row = row;
                self.col = col;
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Display for RobotPose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{}) facing {}", self.row, self.col, self.heading)
    }
}

/// The robot's sensor/actuator side, queried fresh every control step.
/// The display hooks are observational only; the defaults discard them.
pub trait RobotInterface {
    fn wall_front(&mut self) -> anyhow::Result<bool>;
    fn wall_left(&mut self) -> anyhow::Result<bool>;
    fn wall_right(&mut self) -> anyhow::Result<bool>;

    fn set_wall(&mut self, _row: usize, _col: usize, _dir: Direction) -> anyhow::Result<()> {
        Ok(())
    }

    fn set_text(&mut self, _row: usize, _col: usize, _text: &str) -> anyhow::Result<()> {
        Ok(())
    }

    fn clear_text(&mut self, _row: usize, _col: usize) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enum_iterator::all;

    #[test]
    fn test_turns_invert() {
        for dir in all::<Direction>() {
            assert_eq!(dir, dir.turn_left().turn_right());
            assert_eq!(dir, dir.turn_right().turn_left());
        }
    }

    #[test]
    fn test_four_lefts_cycle() {
        for dir in all::<Direction>() {
            assert_eq!(dir, dir.turn_left().turn_left().turn_left().turn_left());
        }
    }

    #[test]
    fn test_reverse() {
        for dir in all::<Direction>() {
            assert_eq!(dir.reverse(), dir.turn_right().turn_right());
            assert_eq!(dir, dir.reverse().reverse());
        }
    }

    #[test]
    fn test_scan_order() {
        let order = all::<Direction>().collect::<Vec<_>>();
        assert_eq!(
            order,
            vec![
                Direction::North,
                Direction::East,
                Direction::South,
                Direction::West
            ]
        );
    }

    #[test]
    fn test_step_bounds() {
        assert_eq!(Direction::North.step(0, 3, 4), None);
        assert_eq!(Direction::West.step(3, 0, 4), None);
        assert_eq!(Direction::South.step(3, 3, 4), None);
        assert_eq!(Direction::East.step(3, 3, 4), None);
        assert_eq!(Direction::North.step(1, 3, 4), Some((0, 3)));
        assert_eq!(Direction::East.step(2, 2, 4), Some((2, 3)));
    }

    #[test]
    fn test_between() {
        assert_eq!(Direction::between((5, 5), (4, 5)), Some(Direction::North));
        assert_eq!(Direction::between((5, 5), (6, 5)), Some(Direction::South));
        assert_eq!(Direction::between((5, 5), (5, 6)), Some(Direction::East));
        assert_eq!(Direction::between((5, 5), (5, 4)), Some(Direction::West));
        assert_eq!(Direction::between((5, 5), (5, 5)), None);
        assert_eq!(Direction::between((5, 5), (4, 4)), None);
        assert_eq!(Direction::between((5, 5), (5, 7)), None);
    }

    #[test]
    fn test_advance() {
        let mut pose = RobotPose::new(2, 1, Direction::North);
        assert!(pose.advance(4));
        assert_eq!((pose.row, pose.col), (1, 1));
        assert!(pose.advance(4));
        assert_eq!((pose.row, pose.col), (0, 1));
        assert!(!pose.advance(4));
        assert_eq!((pose.row, pose.col), (0, 1));
    }

    #[test]
    fn test_letters() {
        for dir in all::<Direction>() {
            assert_eq!(Direction::from_letter(dir.letter()), Some(dir));
        }
        assert_eq!(Direction::from_letter('X'), None);
    }
}
