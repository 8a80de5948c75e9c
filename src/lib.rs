//! Turn-based virtual pet simulator.
//!
//! A pet's four stats decay with elapsed time and age, illness strikes dirty
//! pets, and each species carries one special ability. The console game loop
//! lives in [`app`]; everything under it is plain, deterministic logic driven
//! by an injected clock and random source.

pub mod app;
pub mod clock;
pub mod config;
pub mod input;
pub mod logging;
pub mod model;
pub mod render;
pub mod sim;
pub mod species;

pub use app::{Outcome, Phase, Session};
pub use clock::{Clock, ManualClock, SystemClock};
pub use model::{AgeStage, Illness, Pet, Stat, Stats, Status};
pub use sim::{PlayerAction, TickReport};
pub use species::{Species, SpeciesKind};
