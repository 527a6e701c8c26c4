//! A maze mini-game: perfect-maze generation, a navigation engine that keeps
//! the player's trail, and the key interpreters that drive it.

pub mod config;
pub mod error;
pub mod input;
pub mod maze;
pub mod session;
pub mod tilt;
pub mod trail;

pub use error::{Error, Result};
pub use maze::{Dir, Maze, Pos, Tile};
pub use session::{MoveOutcome, Phase, Session};
pub use tilt::{Nudge, Tilt};
pub use trail::{Step, Trail};
