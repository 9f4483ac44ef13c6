//! Collision simulation engine.
//!
//! Mobile objects take random unit steps on a bounded 2D grid, static objects
//! sit still, and every step the grid marks mobile objects sharing a cell as
//! collided and snapshots a frame for playback.

pub mod frame;
pub mod grid;
pub mod movement;
pub mod object;
pub mod simulation;

pub use frame::{DrawStyle, DrawableRecord, Frame};
pub use grid::WorldGrid;
pub use movement::{FixedMovement, MovementSource, RandomMovement, ScriptedMovement};
pub use object::{Collider, MobileObject, StaticObject, WorldEntity, WorldObject};
pub use simulation::{run_scenario, RunSummary, SimulationOutput, SimulationRun};
