//! Navigation state for one maze game.
//!
//! A [`Session`] owns the maze, the player's trail and the win flag. Moves
//! are applied one at a time in arrival order; bumping into a wall or the
//! board edge is an ordinary outcome, not an error.

use rand::Rng;
use tracing::{info, trace};

use crate::error::Result;
use crate::maze::{Dir, Maze, Pos};
use crate::trail::{Step, Trail};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Won,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Moved onto a tile that was not the previous one on the trail.
    Advanced,
    /// Stepped back onto the previous trail tile.
    Retreated,
    /// Wall or board edge; nothing changed.
    Blocked,
    /// Reached the goal.
    Won,
    /// The game is already won; moves wait for a reset.
    Ignored,
}

impl MoveOutcome {
    pub fn changed_position(self) -> bool {
        matches!(
            self,
            MoveOutcome::Advanced | MoveOutcome::Retreated | MoveOutcome::Won
        )
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    maze: Maze,
    trail: Trail,
    phase: Phase,
    moves: u32,
    games_played: u32,
}

impl Session {
    pub fn new(rng: &mut impl Rng, rows: usize, cols: usize) -> Result<Self> {
        let maze = Maze::generate(rng, rows, cols)?;
        Ok(Self::from_maze(maze))
    }

    /// Starts a game on an existing maze.
    pub fn from_maze(maze: Maze) -> Self {
        let trail = Trail::new(maze.start());
        Self {
            maze,
            trail,
            phase: Phase::Playing,
            moves: 0,
            games_played: 0,
        }
    }

    pub fn step(&mut self, dir: Dir) -> MoveOutcome {
        if self.phase == Phase::Won {
            return MoveOutcome::Ignored;
        }

        let from = self.position();
        let Some(to) = from.step(dir).filter(|pos| self.maze.is_open(*pos)) else {
            trace!(?dir, x = from.x, y = from.y, "move blocked");
            return MoveOutcome::Blocked;
        };

        let step = self.trail.follow(to);
        self.moves += 1;
        trace!(?dir, ?step, x = to.x, y = to.y, trail = self.trail.len(), "moved");

        if to == self.maze.end() {
            self.phase = Phase::Won;
            info!(moves = self.moves, trail = self.trail.len(), "maze solved");
            return MoveOutcome::Won;
        }
        match step {
            Step::Advanced => MoveOutcome::Advanced,
            Step::Retreated => MoveOutcome::Retreated,
        }
    }

    /// Replaces the maze with a fresh one of the same size and starts over.
    pub fn reset(&mut self, rng: &mut impl Rng) -> Result<()> {
        let maze = Maze::generate(rng, self.maze.rows(), self.maze.cols())?;
        self.trail = Trail::new(maze.start());
        self.maze = maze;
        self.phase = Phase::Playing;
        self.moves = 0;
        self.games_played += 1;
        info!(games_played = self.games_played, "new maze");
        Ok(())
    }

    /// The resume key: restarts a won game and does nothing mid-game.
    /// Returns whether a reset happened.
    pub fn press_resume(&mut self, rng: &mut impl Rng) -> Result<bool> {
        if self.phase != Phase::Won {
            return Ok(false);
        }
        self.reset(rng)?;
        Ok(true)
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn position(&self) -> Pos {
        self.trail.current()
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_won(&self) -> bool {
        self.phase == Phase::Won
    }

    /// Accepted moves in the current game.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session(seed: u64) -> (Session, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let session = Session::new(&mut rng, 13, 11).unwrap();
        (session, rng)
    }

    fn dir_between(a: Pos, b: Pos) -> Dir {
        let dx = b.x as isize - a.x as isize;
        let dy = b.y as isize - a.y as isize;
        Dir::from_delta(dx, dy).unwrap()
    }

    fn solve(session: &mut Session) -> MoveOutcome {
        let maze = session.maze();
        let path = maze.shortest_path(session.position(), maze.end()).unwrap();
        let mut last = MoveOutcome::Ignored;
        for pair in path.windows(2) {
            last = session.step(dir_between(pair[0], pair[1]));
        }
        last
    }

    #[test]
    fn new_session_starts_playing_at_start() {
        let (s, _) = session(1);
        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(s.position(), s.maze().start());
        assert_eq!(s.trail().as_slice(), &[s.maze().start()]);
        assert_eq!(s.moves(), 0);
    }

    #[test]
    fn leaving_through_bottom_wall_is_blocked() {
        let (mut s, _) = session(2);
        // Start sits on row rows-2; the row beneath is border wall.
        assert_eq!(s.step(Dir::Down), MoveOutcome::Blocked);
        assert_eq!(s.step(Dir::Left), MoveOutcome::Blocked);
        assert_eq!(s.trail().len(), 1);
        assert_eq!(s.moves(), 0);
    }

    #[test]
    fn solving_wins_and_freezes_state() {
        let (mut s, _) = session(3);
        assert_eq!(solve(&mut s), MoveOutcome::Won);
        assert!(s.is_won());
        assert_eq!(s.position(), s.maze().end());

        let trail = s.trail().clone();
        let moves = s.moves();
        for dir in Dir::ALL {
            assert_eq!(s.step(dir), MoveOutcome::Ignored);
        }
        assert_eq!(s.trail(), &trail);
        assert_eq!(s.moves(), moves);
    }

    #[test]
    fn resume_is_inert_while_playing() {
        let (mut s, mut rng) = session(4);
        assert!(!s.press_resume(&mut rng).unwrap());
        assert_eq!(s.games_played(), 0);
    }

    #[test]
    fn resume_after_win_starts_over() {
        let (mut s, mut rng) = session(5);
        solve(&mut s);
        assert!(s.press_resume(&mut rng).unwrap());
        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(s.trail().as_slice(), &[s.maze().start()]);
        assert_eq!(s.moves(), 0);
        assert_eq!(s.games_played(), 1);
    }

    #[test]
    fn reset_mid_game_keeps_dimensions() {
        let (mut s, mut rng) = session(6);
        s.step(Dir::Up);
        s.step(Dir::Right);
        s.reset(&mut rng).unwrap();
        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(s.moves(), 0);
        assert_eq!((s.maze().rows(), s.maze().cols()), (13, 11));
        assert_eq!(s.position(), s.maze().start());
    }

    #[test]
    fn outcome_reports_position_change() {
        assert!(MoveOutcome::Advanced.changed_position());
        assert!(MoveOutcome::Retreated.changed_position());
        assert!(MoveOutcome::Won.changed_position());
        assert!(!MoveOutcome::Blocked.changed_position());
        assert!(!MoveOutcome::Ignored.changed_position());
    }
}
