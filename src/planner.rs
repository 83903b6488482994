use crate::{Action, Direction, RobotPose};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnDirection {
    Left,
    Right,
}

impl TurnDirection {
    pub fn apply(self, heading: Direction) -> Direction {
        match self {
            TurnDirection::Left => heading.turn_left(),
            TurnDirection::Right => heading.turn_right(),
        }
    }

    pub fn action(self) -> Action {
        match self {
            TurnDirection::Left => Action::Left,
            TurnDirection::Right => Action::Right,
        }
    }
}

/// Where a multi-tick reorientation stands. A 180 needs two turn ticks
/// before its forward tick; this state carries the sequence across calls.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TurnState {
    #[default]
    Idle,
    Turning {
        remaining: u8,
        direction: TurnDirection,
    },
    ForwardDue,
}

/// Converts "current pose, chosen target cell" into exactly one discrete
/// action per call, applying the pose change that action implies.
#[derive(Debug, Default)]
pub struct MovePlanner {
    state: TurnState,
}

impl MovePlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn next_action(
        &mut self,
        pose: &mut RobotPose,
        target: (usize, usize),
        side: usize,
    ) -> Action {
        match self.state {
            TurnState::ForwardDue => {
                self.state = TurnState::Idle;
                if pose.advance(side) {
                    Action::Forward
                } else {
                    log::warn!("deferred forward from {pose} would leave the grid");
                    Action::Idle
                }
            }
            TurnState::Turning {
                remaining,
                direction,
            } => {
                pose.heading = direction.apply(pose.heading);
                self.state = if remaining <= 1 {
                    TurnState::ForwardDue
                } else {
                    TurnState::Turning {
                        remaining: remaining - 1,
                        direction,
                    }
                };
                direction.action()
            }
            TurnState::Idle => self.plan_from_idle(pose, target, side),
        }
    }

    fn plan_from_idle(
        &mut self,
        pose: &mut RobotPose,
        target: (usize, usize),
        side: usize,
    ) -> Action {
        if target == (pose.row, pose.col) {
            // No neighbor beat the current cell; nothing worth doing.
            return Action::Idle;
        }
        let Some(desired) = Direction::between((pose.row, pose.col), target) else {
            log::warn!(
                "move target ({},{}) is not adjacent to {pose}",
                target.0,
                target.1
            );
            return Action::Idle;
        };
        if desired == pose.heading {
            if pose.advance(side) {
                Action::Forward
            } else {
                log::warn!("forward from {pose} would leave the grid");
                Action::Idle
            }
        } else if pose.heading.turn_left() == desired {
            pose.heading = desired;
            Action::Left
        } else if pose.heading.turn_right() == desired {
            pose.heading = desired;
            Action::Right
        } else {
            // Exact reverse: first of two lefts now, one more owed, then
            // the deferred forward.
            pose.heading = pose.heading.turn_left();
            self.state = TurnState::Turning {
                remaining: 1,
                direction: TurnDirection::Left,
            };
            Action::Left
        }
    }
}
