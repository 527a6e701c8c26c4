//! Perfect-maze generation on an odd-sized tile grid.
//!
//! Tiles at odd coordinates are carving nodes; the tiles between two
//! neighbouring nodes are walls the carver may knock through. A randomized
//! depth-first walk from the start node visits every node once, so the open
//! tiles always form a spanning tree.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::error::{Error, Result};

pub const MIN_SIDE: usize = 5;
const MAX_ATTEMPTS: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Open,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The neighbouring position in `dir`, or `None` when it would leave the
    /// non-negative quadrant.
    pub fn step(self, dir: Dir) -> Option<Pos> {
        let (dx, dy) = dir.delta();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Some(Pos { x, y })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }

    /// Maps a cardinal unit vector back to a direction.
    pub fn from_delta(dx: isize, dy: isize) -> Option<Dir> {
        Dir::ALL.into_iter().find(|dir| dir.delta() == (dx, dy))
    }
}

#[derive(Clone, Debug)]
pub struct Maze {
    rows: usize,
    cols: usize,
    tiles: Vec<Tile>,
    start: Pos,
    end: Pos,
    carve_steps: usize,
}

impl Maze {
    /// Generates a maze of `rows` x `cols` tiles with the start in the
    /// bottom-left interior corner and the goal in the top-right one.
    pub fn generate(rng: &mut impl Rng, rows: usize, cols: usize) -> Result<Self> {
        if !valid_side(rows) || !valid_side(cols) {
            return Err(Error::invalid_dimensions(rows, cols));
        }

        for attempt in 1..=MAX_ATTEMPTS {
            let maze = Self::carve(rng, rows, cols);
            if maze.is_reachable(maze.start, maze.end) {
                debug!(rows, cols, carve_steps = maze.carve_steps, attempt, "maze generated");
                return Ok(maze);
            }
            warn!(rows, cols, attempt, "goal unreachable from start, regenerating");
        }
        Err(Error::Disconnected {
            attempts: MAX_ATTEMPTS,
        })
    }

    fn carve(rng: &mut impl Rng, rows: usize, cols: usize) -> Self {
        let start = Pos::new(1, rows - 2);
        let end = Pos::new(cols - 2, 1);
        let mut maze = Self {
            rows,
            cols,
            tiles: vec![Tile::Wall; rows * cols],
            start,
            end,
            carve_steps: 0,
        };

        maze.open(start);
        let mut stack = vec![start];
        while let Some(&current) = stack.last() {
            let candidates = maze.unvisited_nodes(current);
            if let Some(&(wall, next)) = candidates.choose(rng) {
                maze.open(wall);
                maze.open(next);
                maze.carve_steps += 1;
                stack.push(next);
            } else {
                stack.pop();
            }
        }

        // Repair step: both endpoints must be walkable whatever the carver did.
        maze.open(start);
        maze.open(end);
        maze
    }

    /// Interior nodes two tiles away from `from` that are still walls, paired
    /// with the wall tile between them.
    fn unvisited_nodes(&self, from: Pos) -> Vec<(Pos, Pos)> {
        let mut nodes = Vec::new();
        for dir in Dir::ALL {
            let (dx, dy) = dir.delta();
            let nx = from.x as isize + dx * 2;
            let ny = from.y as isize + dy * 2;
            if nx <= 0 || ny <= 0 || nx >= (self.cols - 1) as isize || ny >= (self.rows - 1) as isize
            {
                continue;
            }
            let next = Pos::new(nx as usize, ny as usize);
            if self.tiles[self.index(next)] != Tile::Wall {
                continue;
            }
            let wall = Pos::new((from.x + next.x) / 2, (from.y + next.y) / 2);
            nodes.push((wall, next));
        }
        nodes
    }

    fn open(&mut self, pos: Pos) {
        let idx = self.index(pos);
        self.tiles[idx] = Tile::Open;
    }

    fn index(&self, pos: Pos) -> usize {
        pos.y * self.cols + pos.x
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn end(&self) -> Pos {
        self.end
    }

    /// Number of node-to-node corridors the carver opened.
    pub fn carve_steps(&self) -> usize {
        self.carve_steps
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x < self.cols && pos.y < self.rows
    }

    pub fn tile(&self, pos: Pos) -> Option<Tile> {
        if self.in_bounds(pos) {
            Some(self.tiles[self.index(pos)])
        } else {
            None
        }
    }

    pub fn is_open(&self, pos: Pos) -> bool {
        self.tile(pos) == Some(Tile::Open)
    }

    /// Tiles row by row, top to bottom.
    pub fn tile_rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.cols)
    }

    pub fn open_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.rows)
            .flat_map(move |y| (0..self.cols).map(move |x| Pos::new(x, y)))
            .filter(move |pos| self.is_open(*pos))
    }

    fn open_neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        Dir::ALL
            .into_iter()
            .filter_map(move |dir| pos.step(dir))
            .filter(move |next| self.is_open(*next))
    }

    /// Flood fill over open tiles. The result is indexed `y * cols + x`.
    pub fn reachable_from(&self, from: Pos) -> Vec<bool> {
        let mut seen = vec![false; self.rows * self.cols];
        if !self.is_open(from) {
            return seen;
        }
        let mut q = VecDeque::new();
        seen[self.index(from)] = true;
        q.push_back(from);
        while let Some(pos) = q.pop_front() {
            for next in self.open_neighbors(pos) {
                let idx = self.index(next);
                if !seen[idx] {
                    seen[idx] = true;
                    q.push_back(next);
                }
            }
        }
        seen
    }

    pub fn is_reachable(&self, from: Pos, to: Pos) -> bool {
        self.in_bounds(to) && self.reachable_from(from)[self.index(to)]
    }

    /// Shortest walk over open tiles, both endpoints included.
    pub fn shortest_path(&self, from: Pos, to: Pos) -> Option<Vec<Pos>> {
        if !self.is_open(from) || !self.is_open(to) {
            return None;
        }
        let mut prev: Vec<Option<Pos>> = vec![None; self.rows * self.cols];
        let mut seen = vec![false; self.rows * self.cols];
        let mut q = VecDeque::new();
        seen[self.index(from)] = true;
        q.push_back(from);

        while let Some(pos) = q.pop_front() {
            if pos == to {
                let mut path = vec![to];
                let mut cur = to;
                while let Some(p) = prev[self.index(cur)] {
                    path.push(p);
                    cur = p;
                }
                path.reverse();
                return Some(path);
            }
            for next in self.open_neighbors(pos) {
                let idx = self.index(next);
                if !seen[idx] {
                    seen[idx] = true;
                    prev[idx] = Some(pos);
                    q.push_back(next);
                }
            }
        }
        None
    }
}

fn valid_side(n: usize) -> bool {
    n >= MIN_SIDE && n % 2 == 1
}
