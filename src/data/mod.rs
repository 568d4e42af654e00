//! Data structures for the game world
//!
//! Defines the passengers, the crime scene, the locked carriages, and the
//! per-session bookkeeping (stats and logs).

pub mod characters;
pub mod log;
pub mod player;
pub mod scene;

pub use characters::*;
pub use log::*;
pub use player::*;
pub use scene::*;
