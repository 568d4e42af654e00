//! Vienna Express: A Murder Mystery
//!
//! A timer-bounded text adventure. An Interpol agent boards a luxury train
//! bound for a UN summit in Vienna, and has five minutes to identify and
//! arrest the murderer of the President of France before the train reaches
//! its destination.
//!
//! # Game Mechanics
//!
//! - **Investigation**: Examine the crime scene, question passengers,
//!   collect clues
//! - **Locked carriages**: Three carriages gated by passcodes, each hiding
//!   a unique clue
//! - **Time pressure**: A wall-clock countdown runs concurrently with the
//!   prompt loop; when it expires, the culprit walks free
//! - **One arrest**: Accusing the wrong passenger ends the game in failure
//!
//! # Architecture
//!
//! - `game` - Core state machine, interaction engine, narrative text
//! - `data` - Entities: characters, crime scene, player stats, session log
//! - `timer` - The concurrent countdown clock
//! - `console` - Line-based styled terminal I/O
//! - `audio` - Sound-cue collaborator interface

pub mod audio;
pub mod console;
pub mod data;
pub mod game;
pub mod timer;

pub use game::Game;

/// Game version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for the game
pub type Result<T> = anyhow::Result<T>;

/// Custom error types
///
/// Every kind is caught at the game-loop boundary, logged, and survived;
/// a single bad command never aborts the session.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// An index or selector outside its declared domain
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// An unrecognized top-level command token
    #[error("Invalid command: {0:?}")]
    InvalidCommand(String),

    /// Catch-all, e.g. malformed numeric input
    #[error("Unexpected failure: {0}")]
    Unexpected(String),
}
