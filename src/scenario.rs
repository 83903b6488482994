use crate::maze::Maze;
use crate::{Direction, RobotPose};
use anyhow::{Context, Result, anyhow, bail};
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "scenario.pest"]
struct ScenarioParser;

/// A fully-known world maze described by a text file: one `size N` line,
/// an optional `start x y H` line, and any number of `wall x y D...`
/// lines. Coordinates are mms screen style (x from the west wall, y from
/// the south wall); `#` starts a comment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scenario {
    pub size: usize,
    pub start: RobotPose,
    pub walls: Vec<(usize, usize, Direction)>,
}

impl Scenario {
    pub fn from_file(filename: &str) -> Result<Self> {
        let text = std::fs::read_to_string(filename)
            .with_context(|| format!("reading scenario {filename:?}"))?;
        Self::parse_text(&text).with_context(|| format!("in scenario {filename:?}"))
    }

    pub fn parse_text(text: &str) -> Result<Self> {
        let mut size = None;
        let mut raw_start = None;
        let mut raw_walls = vec![];

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let stripped = raw.split('#').next().unwrap_or("").trim();
            if stripped.is_empty() {
                continue;
            }
            let decl = ScenarioParser::parse(Rule::line, stripped)
                .with_context(|| format!("line {line_no}: {raw:?}"))?
                .next()
                .and_then(|line| line.into_inner().next())
                .ok_or_else(|| anyhow!("line {line_no}: nothing parsed from {raw:?}"))?;
            let rule = decl.as_rule();
            let fields = decl.into_inner().collect::<Vec<_>>();
            match rule {
                Rule::size_line => {
                    let n = parse_number(&fields[0])?;
                    if size.replace(n).is_some() {
                        bail!("line {line_no}: duplicate size declaration");
                    }
                }
                Rule::start_line => {
                    let x = parse_number(&fields[0])?;
                    let y = parse_number(&fields[1])?;
                    let heading = parse_heading(&fields[2])?;
                    if raw_start.replace((x, y, heading)).is_some() {
                        bail!("line {line_no}: duplicate start declaration");
                    }
                }
                Rule::wall_line => {
                    let x = parse_number(&fields[0])?;
                    let y = parse_number(&fields[1])?;
                    for field in &fields[2..] {
                        raw_walls.push((x, y, parse_heading(field)?, line_no));
                    }
                }
                other => bail!("line {line_no}: unexpected {other:?}"),
            }
        }

        let size = size.ok_or_else(|| anyhow!("no size declaration"))?;
        if size == 0 {
            bail!("size must be positive");
        }
        // mms counts y up from the south wall; rows count down from the
        // north wall.
        let to_cell = |x: usize, y: usize, line_no: usize| -> Result<(usize, usize)> {
            if x >= size || y >= size {
                bail!("line {line_no}: ({x},{y}) lies outside a {size}x{size} maze");
            }
            Ok((size - 1 - y, x))
        };

        let start = match raw_start {
            Some((x, y, heading)) => {
                if x >= size || y >= size {
                    bail!("start ({x},{y}) lies outside a {size}x{size} maze");
                }
                let (row, col) = (size - 1 - y, x);
                RobotPose::new(row, col, heading)
            }
            None => RobotPose::new(size - 1, 0, Direction::North),
        };
        let walls = raw_walls
            .into_iter()
            .map(|(x, y, dir, line_no)| to_cell(x, y, line_no).map(|(row, col)| (row, col, dir)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { size, start, walls })
    }

    pub fn build_maze<const SIDE: usize>(&self) -> Result<Maze<SIDE>> {
        if self.size != SIDE {
            bail!(
                "scenario is {0}x{0} but the solver plans for {SIDE}x{SIDE}",
                self.size
            );
        }
        let mut maze = Maze::new();
        for (row, col, dir) in self.walls.iter().copied() {
            maze.mark_wall(row, col, dir);
        }
        Ok(maze)
    }
}

fn parse_number(pair: &pest::iterators::Pair<Rule>) -> Result<usize> {
    pair.as_str()
        .parse()
        .with_context(|| format!("number {:?}", pair.as_str()))
}

fn parse_heading(pair: &pest::iterators::Pair<Rule>) -> Result<Direction> {
    pair.as_str()
        .chars()
        .next()
        .and_then(Direction::from_letter)
        .ok_or_else(|| anyhow!("bad heading {:?}", pair.as_str()))
}
