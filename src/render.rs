use crate::maze::Maze;
use crate::{Direction, RobotPose};
use itertools::Itertools;

/// ASCII picture of the maze: a `+---+` lattice from the wall bits, flood
/// distances inside cells, and the robot drawn as a heading glyph.
pub fn render_maze<const SIDE: usize>(maze: &Maze<SIDE>, robot: Option<&RobotPose>) -> String {
    let mut lines = vec![];
    for row in 0..SIDE {
        let mut lattice = String::from("+");
        for col in 0..SIDE {
            lattice.push_str(if maze.has_wall(row, col, Direction::North) {
                "---"
            } else {
                "   "
            });
            lattice.push('+');
        }
        lines.push(lattice);

        let mut interior = String::new();
        for col in 0..SIDE {
            interior.push(if maze.has_wall(row, col, Direction::West) {
                '|'
            } else {
                ' '
            });
            interior.push_str(&cell_text(maze, row, col, robot));
        }
        interior.push(if maze.has_wall(row, SIDE - 1, Direction::East) {
            '|'
        } else {
            ' '
        });
        lines.push(interior);
    }

    let mut bottom = String::from("+");
    for col in 0..SIDE {
        bottom.push_str(if maze.has_wall(SIDE - 1, col, Direction::South) {
            "---"
        } else {
            "   "
        });
        bottom.push('+');
    }
    lines.push(bottom);
    lines.iter().join("\n")
}

fn cell_text<const SIDE: usize>(
    maze: &Maze<SIDE>,
    row: usize,
    col: usize,
    robot: Option<&RobotPose>,
) -> String {
    if let Some(pose) = robot {
        if (pose.row, pose.col) == (row, col) {
            let glyph = match pose.heading {
                Direction::North => '^',
                Direction::East => '>',
                Direction::South => 'v',
                Direction::West => '<',
            };
            return format!(" {glyph} ");
        }
    }
    match maze.distance(row, col) {
        Some(d) => format!("{d:>3}"),
        None => "   ".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Direction::*;
    use crate::flood::FloodPlanner;

    #[test]
    fn test_render_small_maze() {
        let mut maze = Maze::<4>::new();
        maze.mark_wall(1, 1, East);
        let mut planner = FloodPlanner::new(maze.cell_count());
        planner.recompute(&mut maze);

        let rendered = render_maze(&maze, None);
        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "+---+---+---+---+");
        assert_eq!(lines[8], "+---+---+---+---+");
        // Row 1 carries the goal distances and the marked wall.
        assert_eq!(lines[3], "|  1   0|  0   1|");
    }

    #[test]
    fn test_render_robot_glyph() {
        let maze = Maze::<4>::new();
        let pose = RobotPose::new(3, 0, North);
        let rendered = render_maze(&maze, Some(&pose));
        assert!(rendered.contains(" ^ "));
        let east = RobotPose::new(3, 0, East);
        assert!(render_maze(&maze, Some(&east)).contains(" > "));
    }

    #[test]
    fn test_unknown_distances_blank() {
        let maze = Maze::<4>::new();
        let rendered = render_maze(&maze, None);
        assert!(!rendered.chars().any(|c| c.is_ascii_digit()));
    }
}
