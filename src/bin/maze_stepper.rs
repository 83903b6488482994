use maze_navigator::cmd::ArgVals;
use maze_navigator::maze::Maze;
use maze_navigator::navigator::{Navigator, NavigatorBuilder};
use maze_navigator::render::render_maze;
use maze_navigator::scenario::Scenario;
use maze_navigator::sim::{SimulatedRobot, generate_maze};
use maze_navigator::{Action, Direction, MAZE_SIDE, RobotPose};
use pancurses::{Input, endwin, initscr, noecho};

const STEP_CAP: usize = MAZE_SIDE * MAZE_SIDE * 10;

fn main() {
    let args = ArgVals::default();
    if args.has_flag("-help") {
        println!("Usage: maze_stepper [scenario_file | -random]");
        println!("Space steps the solver, r runs it to the end, q quits.");
        return;
    }
    match setup(&args) {
        Ok((world, start)) => visualize(world, start),
        Err(e) => println!("Error: {e:#}"),
    }
}

fn setup(args: &ArgVals) -> anyhow::Result<(Maze<MAZE_SIDE>, RobotPose)> {
    if args.has_flag("-random") {
        let mut rng = rand::rng();
        let start = RobotPose::new(MAZE_SIDE - 1, 0, Direction::North);
        Ok((generate_maze(&mut rng), start))
    } else {
        let filename = args.get_symbol(0).unwrap_or("mazes/sample.txt");
        let scenario = Scenario::from_file(filename)?;
        Ok((scenario.build_maze()?, scenario.start))
    }
}

fn visualize(world: Maze<MAZE_SIDE>, start: RobotPose) {
    let mut builder = NavigatorBuilder::default();
    builder.start(start.row, start.col, start.heading);
    let mut nav: Navigator<MAZE_SIDE> = builder.build();
    let mut robot = SimulatedRobot::new(world, start);
    let mut steps = 0;
    let mut done = false;

    let window = initscr();
    window.keypad(true);
    noecho();

    loop {
        window.clear();
        let status = if nav.at_goal() {
            format!("goal reached in {steps} actions (q quits)")
        } else if done {
            format!("no route to the goal after {steps} actions (q quits)")
        } else {
            format!("{steps} actions, at {} (space steps, r runs, q quits)", nav.pose())
        };
        window.addstr(format!(
            "{status}\n\n{}\n",
            render_maze(nav.maze(), Some(&nav.pose()))
        ));
        window.refresh();

        match window.getch() {
            Some(Input::Character(c)) => match c {
                ' ' => {
                    if !done {
                        done = step(&mut nav, &mut robot, &mut steps);
                    }
                }
                'r' => {
                    while !done && steps < STEP_CAP {
                        done = step(&mut nav, &mut robot, &mut steps);
                    }
                }
                'q' => break,
                _ => {}
            },
            Some(Input::KeyDC) => break,
            _ => (),
        }
    }

    endwin();
}

fn step(
    nav: &mut Navigator<MAZE_SIDE>,
    robot: &mut SimulatedRobot<MAZE_SIDE>,
    steps: &mut usize,
) -> bool {
    let action = nav.plan_next_action(robot);
    robot.apply(action);
    *steps += 1;
    nav.at_goal() || action == Action::Idle
}
