use crate::Direction;
use crate::maze::Maze;
use crate::queue::CircularQueue;
use enum_iterator::all;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FloodOutcome {
    pub iterations: usize,
    pub truncated: bool,
}

/// Multi-source BFS from the goal region: after `recompute`, every cell
/// holds its minimum open-edge hop count to the nearest goal cell, or
/// `None` if no known-open route exists. Walls only ever appear, so each
/// new wall invalidates distances wholesale and the fill restarts from a
/// clean slate.
pub struct FloodPlanner {
    queue: CircularQueue<(usize, usize)>,
}

impl FloodPlanner {
    /// `capacity` should be the maze's cell count; each cell is enqueued
    /// at most once per pass.
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: CircularQueue::with_capacity(capacity),
        }
    }

    pub fn recompute<const SIDE: usize>(&mut self, maze: &mut Maze<SIDE>) -> FloodOutcome {
        maze.reset_distances();
        self.queue.clear();
        // Seed order among the goal cells is irrelevant: BFS layering makes
        // the first write to a cell its shortest distance either way.
        for (row, col) in Maze::<SIDE>::goal_cells() {
            if maze.distance(row, col).is_none() {
                maze.set_distance(row, col, 0);
                self.queue.enqueue((row, col));
            }
        }

        // The unknown-distance check below is the sole visited marker, so
        // the loop is linear in the cell count. The cap turns any breach of
        // that invariant into a detectable failure instead of a spin.
        let cap = maze.cell_count() * 4;
        let mut iterations = 0;
        while let Some((row, col)) = self.queue.dequeue() {
            iterations += 1;
            if iterations > cap {
                log::warn!(
                    "flood fill passed {cap} iterations on a {SIDE}x{SIDE} grid; \
                     stopping with partial distances"
                );
                self.queue.clear();
                return FloodOutcome {
                    iterations,
                    truncated: true,
                };
            }
            let Some(dist) = maze.distance(row, col) else {
                continue;
            };
            for dir in all::<Direction>() {
                let Some((nr, nc)) = dir.step(row, col, SIDE) else {
                    continue;
                };
                if maze.distance(nr, nc).is_none() && maze.is_passable((row, col), (nr, nc)) {
                    maze.set_distance(nr, nc, dist + 1);
                    self.queue.enqueue((nr, nc));
                }
            }
        }

        FloodOutcome {
            iterations,
            truncated: false,
        }
    }
}
