//! # Skyfall Core
//!
//! Spawn-and-collision arena core simulation for Skyfall.
//!
//! This crate provides a host-independent, single-threaded, tick-driven 2D
//! arena: placed entities enter through a non-overlapping placement solver
//! and rise into position, a player-steered dropper releases one falling
//! entity at a time, and collisions resolve through a timed highlight
//! window that removes the struck target and advances a destroyed counter.
//!
//! ## Architecture
//!
//! - **Placement** ([`placement`]): bounded-retry random placement with a
//!   pairwise minimum-distance rule
//! - **Registry** ([`registry`]): id-ordered entity storage with overlap
//!   diagnostics
//! - **Scheduler** ([`scheduler`]): burst, periodic, and manual spawn
//!   triggers as plain timers
//! - **Animator** ([`animate`]): eased rise, constant-velocity fall
//! - **Collision** ([`geometry`]): AABB overlap behind the
//!   [`geometry::BoundsSource`] capability
//! - **Orchestration** ([`simulation`]): one `tick` advancing every phase
//!   and publishing [`events::Event`]s
//!
//! ## Usage
//!
//! ```
//! use skyfall_core::template::{AssetId, SpawnTemplate};
//! use skyfall_core::{ArenaConfig, Simulation, TickInput};
//!
//! let templates = vec![
//!     SpawnTemplate::new(AssetId::new("tower_red")),
//!     SpawnTemplate::new(AssetId::new("tower_blue")).with_width(240.0),
//! ];
//! let mut sim = Simulation::new(ArenaConfig::default(), templates, 42);
//!
//! let input = TickInput { steer_axis: 0.0, drop: true };
//! let events = sim.tick(&input, 1.0 / 60.0);
//! assert!(!events.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod animate;
pub mod config;
pub mod entity;
pub mod error;
pub mod events;
pub mod geometry;
pub mod placement;
pub mod registry;
pub mod scheduler;
pub mod simulation;
pub mod steer;
pub mod template;

pub use config::ArenaConfig;
pub use entity::{Entity, EntityId, EntityKind};
pub use error::SpawnError;
pub use events::Event;
pub use simulation::{Simulation, TickInput};
pub use template::{AssetId, SpawnTemplate, TemplateId};

#[cfg(test)]
mod tests;
