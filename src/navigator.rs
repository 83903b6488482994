use crate::flood::FloodPlanner;
use crate::maze::Maze;
use crate::planner::MovePlanner;
use crate::{Action, Direction, RobotInterface, RobotPose};
use enum_iterator::all;

/// Configures a [`Navigator`]. The default start is the bottom-left cell
/// facing North, the classic competition start square.
#[derive(Debug, Default)]
pub struct NavigatorBuilder {
    start: Option<RobotPose>,
    annotate: bool,
}

impl NavigatorBuilder {
    pub fn start(&mut self, row: usize, col: usize, heading: Direction) -> &mut Self {
        self.start = Some(RobotPose::new(row, col, heading));
        self
    }

    /// Mirror computed distances to the robot's text display after every
    /// flood fill. Observational only.
    pub fn annotate_distances(&mut self, on: bool) -> &mut Self {
        self.annotate = on;
        self
    }

    pub fn build<const SIDE: usize>(&self) -> Navigator<SIDE> {
        let mut start = self
            .start
            .unwrap_or(RobotPose::new(SIDE - 1, 0, Direction::North));
        if start.row >= SIDE || start.col >= SIDE {
            log::warn!("start {start} lies outside a {SIDE}x{SIDE} grid, clamping");
            start.row = start.row.min(SIDE - 1);
            start.col = start.col.min(SIDE - 1);
        }
        Navigator::with_start(start, self.annotate)
    }
}

/// One control step per call: ingest the wall sensors, update the map,
/// reflood if anything changed, pick the best neighbor, and hand the move
/// decision to the turn state machine. Owns every piece of solving state,
/// so independent runs are just independent `Navigator` values.
pub struct Navigator<const SIDE: usize> {
    maze: Maze<SIDE>,
    flood: FloodPlanner,
    mover: MovePlanner,
    pose: RobotPose,
    annotate: bool,
    annotation_stale: bool,
}

impl<const SIDE: usize> Navigator<SIDE> {
    fn with_start(pose: RobotPose, annotate: bool) -> Self {
        let mut maze = Maze::new();
        let mut flood = FloodPlanner::new(maze.cell_count());
        // The fill must complete before any movement decision.
        flood.recompute(&mut maze);
        Self {
            maze,
            flood,
            mover: MovePlanner::new(),
            pose,
            annotate,
            annotation_stale: annotate,
        }
    }

    pub fn pose(&self) -> RobotPose {
        self.pose
    }

    pub fn maze(&self) -> &Maze<SIDE> {
        &self.maze
    }

    pub fn at_goal(&self) -> bool {
        Maze::<SIDE>::is_goal(self.pose.row, self.pose.col)
    }

    /// The sole planning entry point. Returns the one discrete action the
    /// caller must execute before the next call; the pose bookkeeping for
    /// that action has already been applied.
    pub fn plan_next_action<R: RobotInterface>(&mut self, robot: &mut R) -> Action {
        // Take all three readings before touching the map, so a failed
        // sensor cannot leave fresh walls paired with stale distances.
        let readings = (|| -> anyhow::Result<[bool; 3]> {
            Ok([robot.wall_front()?, robot.wall_left()?, robot.wall_right()?])
        })();
        let [front, left, right] = match readings {
            Ok(seen) => seen,
            Err(e) => {
                log::warn!("wall sensors unavailable, idling: {e:#}");
                return Action::Idle;
            }
        };

        let heading = self.pose.heading;
        let sensed = [
            (heading, front),
            (heading.turn_left(), left),
            (heading.turn_right(), right),
        ];
        let mut changed = false;
        for (dir, wall) in sensed {
            if wall && self.maze.mark_wall(self.pose.row, self.pose.col, dir) {
                changed = true;
                if let Err(e) = robot.set_wall(self.pose.row, self.pose.col, dir) {
                    log::debug!("wall display rejected: {e:#}");
                }
            }
        }

        if changed {
            let outcome = self.flood.recompute(&mut self.maze);
            if outcome.truncated {
                log::warn!("continuing with partial distances");
            }
            self.annotation_stale = true;
        }
        if self.annotate && self.annotation_stale {
            self.annotate_distances(robot);
        }

        let target = self.pick_target();
        self.mover.next_action(&mut self.pose, target, SIDE)
    }

    /// First strictly-lower-distance passable neighbor in N,E,S,W order;
    /// the current cell when none qualifies. An unknown distance counts as
    /// unreachable on both sides of the comparison.
    fn pick_target(&self) -> (usize, usize) {
        let (row, col) = (self.pose.row, self.pose.col);
        let mut best = (row, col);
        let mut best_distance = self.maze.distance(row, col);
        for dir in all::<Direction>() {
            let Some((nr, nc)) = dir.step(row, col, SIDE) else {
                continue;
            };
            if !self.maze.is_passable((row, col), (nr, nc)) {
                continue;
            }
            let Some(candidate) = self.maze.distance(nr, nc) else {
                continue;
            };
            if best_distance.is_none_or(|bd| candidate < bd) {
                best = (nr, nc);
                best_distance = Some(candidate);
            }
        }
        best
    }

    fn annotate_distances<R: RobotInterface>(&mut self, robot: &mut R) {
        for row in 0..SIDE {
            for col in 0..SIDE {
                let shown = match self.maze.distance(row, col) {
                    Some(d) => robot.set_text(row, col, &d.to_string()),
                    None => robot.clear_text(row, col),
                };
                if let Err(e) = shown {
                    log::debug!("distance display rejected: {e:#}");
                    return;
                }
            }
        }
        self.annotation_stale = false;
    }
}
