//! Deterministic cooking simulator for The Legend of Zelda: Tears of the
//! Kingdom. Feed it the display names of up to five ingredients and it
//! reproduces the game's own resolution: the dish, health restored, status
//! effect with duration and level, sell price, critical-hit rate, and the
//! possibility space opened up by Monster Extract or critical successes.
//! Randomness is reported, never sampled.

pub mod catalog;
pub mod config;
pub mod cook;
pub mod effect;
pub mod error;
pub mod locale;
pub mod material;
pub mod recipe;
pub mod report;

pub use crate::catalog::Catalog;
pub use crate::cook::CookSim;
pub use crate::error::Error;
pub use crate::locale::Language;
pub use crate::report::CookReport;

#[cfg(test)]
mod tests;
