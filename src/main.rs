use crossbeam::atomic::AtomicCell;
use maze_navigator::cmd::ArgVals;
use maze_navigator::mms::MmsClient;
use maze_navigator::navigator::{Navigator, NavigatorBuilder};
use maze_navigator::{Action, MAZE_SIDE};
use std::sync::Arc;

fn main() {
    env_logger::init();
    let args = ArgVals::default();
    if args.has_flag("-help") {
        eprintln!("Usage: maze_navigator [-text]");
        eprintln!("Flood-fill solver for the mms simulator; talks the mms protocol on stdio.");
        eprintln!("  -text   mirror flood distances onto the simulator display");
    } else if let Err(e) = runner(args.has_flag("-text")) {
        eprintln!("Unrecoverable error: {e:#}");
        std::process::exit(1);
    }
}

fn runner(annotate: bool) -> anyhow::Result<()> {
    // stdout belongs to the simulator protocol, so every human-facing
    // line here goes to stderr.
    let mut robot = MmsClient::stdio(MAZE_SIDE);
    let width = robot.maze_width()?;
    let height = robot.maze_height()?;
    if width != MAZE_SIDE || height != MAZE_SIDE {
        eprintln!(
            "Simulator maze is {width}x{height}; this solver plans for {MAZE_SIDE}x{MAZE_SIDE}."
        );
    }

    let mut builder = NavigatorBuilder::default();
    builder.annotate_distances(annotate);
    let mut nav: Navigator<MAZE_SIDE> = builder.build();

    let running = Arc::new(AtomicCell::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || r.store(false))?;

    let mut steps = 0usize;
    while running.load() {
        let action = nav.plan_next_action(&mut robot);
        if action == Action::Idle {
            if nav.at_goal() {
                eprintln!("Goal reached after {steps} actions.");
            } else {
                eprintln!("No route to the goal from {}; stopping.", nav.pose());
            }
            return Ok(());
        }
        robot.execute(action)?;
        steps += 1;
        if nav.at_goal() {
            eprintln!("Goal reached after {steps} actions.");
            return Ok(());
        }
    }

    eprintln!("Interrupted after {steps} actions.");
    Ok(())
}
