use crate::maze::Maze;
use crate::{Action, Direction, RobotInterface, RobotPose};
use anyhow::Result;
use enum_iterator::all;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// A robot in a fully-known world maze. Stands in for the real sensor and
/// actuator hardware in tests and offline runs: sensing reads the world's
/// wall bits around the pose, and `apply` executes the planned action.
pub struct SimulatedRobot<const SIDE: usize> {
    world: Maze<SIDE>,
    pose: RobotPose,
}

impl<const SIDE: usize> SimulatedRobot<SIDE> {
    pub fn new(world: Maze<SIDE>, start: RobotPose) -> Self {
        Self { world, pose: start }
    }

    pub fn pose(&self) -> RobotPose {
        self.pose
    }

    pub fn world(&self) -> &Maze<SIDE> {
        &self.world
    }

    fn wall(&self, dir: Direction) -> bool {
        self.world.has_wall(self.pose.row, self.pose.col, dir)
    }

    /// Execute one planned action, as the physical robot would.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Left => {
                self.pose.heading = self.pose.heading.turn_left();
                true
            }
            Action::Right => {
                self.pose.heading = self.pose.heading.turn_right();
                true
            }
            Action::Forward => {
                if self.wall(self.pose.heading) {
                    log::warn!("refusing to drive {} into a wall", self.pose);
                    false
                } else if self.pose.advance(SIDE) {
                    true
                } else {
                    log::warn!("refusing to drive {} off the grid", self.pose);
                    false
                }
            }
            Action::Idle => true,
        }
    }
}

impl<const SIDE: usize> RobotInterface for SimulatedRobot<SIDE> {
    fn wall_front(&mut self) -> Result<bool> {
        Ok(self.wall(self.pose.heading))
    }

    fn wall_left(&mut self) -> Result<bool> {
        Ok(self.wall(self.pose.heading.turn_left()))
    }

    fn wall_right(&mut self) -> Result<bool> {
        Ok(self.wall(self.pose.heading.turn_right()))
    }
}

/// Random perfect maze by depth-first carving: every cell reachable, one
/// route between any two cells.
pub fn generate_maze<const SIDE: usize>(rng: &mut impl Rng) -> Maze<SIDE> {
    let mut carved: HashSet<(usize, usize, Direction)> = HashSet::new();
    let mut visited = [[false; SIDE]; SIDE];
    let mut stack = vec![(0usize, 0usize)];
    visited[0][0] = true;
    while let Some(&(row, col)) = stack.last() {
        let mut dirs = all::<Direction>().collect::<Vec<_>>();
        dirs.shuffle(rng);
        let mut advanced = false;
        for dir in dirs {
            if let Some((nr, nc)) = dir.step(row, col, SIDE) {
                if !visited[nr][nc] {
                    visited[nr][nc] = true;
                    carved.insert((row, col, dir));
                    carved.insert((nr, nc, dir.reverse()));
                    stack.push((nr, nc));
                    advanced = true;
                    break;
                }
            }
        }
        if !advanced {
            stack.pop();
        }
    }

    // Every interior edge not carved open becomes a wall.
    let mut maze = Maze::new();
    for row in 0..SIDE {
        for col in 0..SIDE {
            for dir in [Direction::East, Direction::South] {
                if dir.step(row, col, SIDE).is_some() && !carved.contains(&(row, col, dir)) {
                    maze.mark_wall(row, col, dir);
                }
            }
        }
    }
    maze
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Direction::*;
    use crate::flood::FloodPlanner;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_sensors_are_relative_to_heading() {
        let mut world = Maze::<4>::new();
        world.mark_wall(2, 2, North);
        let mut robot = SimulatedRobot::new(world, RobotPose::new(2, 2, East));
        assert!(robot.wall_left().unwrap());
        assert!(!robot.wall_front().unwrap());
        assert!(!robot.wall_right().unwrap());

        let mut robot = SimulatedRobot::new(robot.world.clone(), RobotPose::new(2, 2, North));
        assert!(robot.wall_front().unwrap());

        let mut robot = SimulatedRobot::new(robot.world.clone(), RobotPose::new(2, 2, West));
        assert!(robot.wall_right().unwrap());
    }

    #[test]
    fn test_apply_moves_and_turns() {
        let world = Maze::<4>::new();
        let mut robot = SimulatedRobot::new(world, RobotPose::new(3, 0, North));
        assert!(robot.apply(Action::Forward));
        assert_eq!(robot.pose(), RobotPose::new(2, 0, North));
        assert!(robot.apply(Action::Right));
        assert_eq!(robot.pose(), RobotPose::new(2, 0, East));
        assert!(robot.apply(Action::Idle));
        assert_eq!(robot.pose(), RobotPose::new(2, 0, East));
    }

    #[test]
    fn test_apply_refuses_wall_hit() {
        let mut world = Maze::<4>::new();
        world.mark_wall(3, 0, North);
        let mut robot = SimulatedRobot::new(world, RobotPose::new(3, 0, North));
        assert!(!robot.apply(Action::Forward));
        assert_eq!(robot.pose(), RobotPose::new(3, 0, North));
    }

    #[test]
    fn test_generated_maze_fully_reachable() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..5 {
            let mut maze: Maze<8> = generate_maze(&mut rng);
            let mut planner = FloodPlanner::new(maze.cell_count());
            let outcome = planner.recompute(&mut maze);
            assert!(!outcome.truncated);
            for row in 0..8 {
                for col in 0..8 {
                    assert!(maze.distance(row, col).is_some(), "at ({row},{col})");
                }
            }
        }
    }

    #[test]
    fn test_generated_maze_keeps_boundary() {
        let mut rng = StdRng::seed_from_u64(7);
        let maze: Maze<8> = generate_maze(&mut rng);
        for i in 0..8 {
            assert!(maze.has_wall(0, i, North));
            assert!(maze.has_wall(7, i, South));
            assert!(maze.has_wall(i, 0, West));
            assert!(maze.has_wall(i, 7, East));
        }
    }
}
