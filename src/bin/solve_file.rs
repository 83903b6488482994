use maze_navigator::cmd::ArgVals;
use maze_navigator::navigator::{Navigator, NavigatorBuilder};
use maze_navigator::render::render_maze;
use maze_navigator::scenario::Scenario;
use maze_navigator::sim::SimulatedRobot;
use maze_navigator::{Action, MAZE_SIDE};

const STEP_CAP: usize = MAZE_SIDE * MAZE_SIDE * 10;

fn main() {
    env_logger::init();
    let args = ArgVals::default();
    if args.has_flag("-help") {
        println!("Usage: solve_file [scenario_file] [-cap=steps]");
        return;
    }
    let filename = args.get_symbol(0).unwrap_or("mazes/sample.txt").to_string();
    let cap = args.get_value("-cap").unwrap_or(STEP_CAP);
    if let Err(e) = run(&filename, cap) {
        eprintln!("Unrecoverable error: {e:#}");
        std::process::exit(1);
    }
}

fn run(filename: &str, cap: usize) -> anyhow::Result<()> {
    let scenario = Scenario::from_file(filename)?;
    let world = scenario.build_maze::<MAZE_SIDE>()?;
    let mut builder = NavigatorBuilder::default();
    builder.start(scenario.start.row, scenario.start.col, scenario.start.heading);
    let mut nav: Navigator<MAZE_SIDE> = builder.build();
    let mut robot = SimulatedRobot::new(world, scenario.start);

    let mut steps = 0;
    let mut forwards = 0;
    while !nav.at_goal() && steps < cap {
        let action = nav.plan_next_action(&mut robot);
        if action == Action::Idle {
            break;
        }
        robot.apply(action);
        steps += 1;
        if action == Action::Forward {
            forwards += 1;
        }
    }

    if nav.at_goal() {
        println!("Solved {filename} in {steps} actions ({forwards} forward moves).");
    } else {
        println!("No route to the goal in {filename} (stopped after {steps} actions).");
    }
    println!("{}", render_maze(nav.maze(), Some(&nav.pose())));
    Ok(())
}
