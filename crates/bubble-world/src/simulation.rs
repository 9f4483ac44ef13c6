//! Full simulation runs: step loop, playback output and run summary.

use crate::frame::{DrawableRecord, Frame};
use crate::grid::WorldGrid;
use crate::movement::{MovementSource, RandomMovement};
use bubble_core::{Result, RunConfig, ScenarioConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Upper bound on frames reserved up front; longer runs grow the buffer as they go
const MAX_PREALLOCATED_FRAMES: u64 = 4096;

fn frame_capacity(steps: u64) -> usize {
    steps.min(MAX_PREALLOCATED_FRAMES) as usize
}

/// Everything the renderer needs to play back a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub width: i32,
    pub height: i32,
    pub background_drawables: Vec<DrawableRecord>,
    pub frames: Vec<Frame>,
}

impl SimulationOutput {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Compact binary encoding for playback hand-off
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// Aggregate statistics of a finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub steps: u64,
    pub mobile_objects: usize,
    pub static_objects: usize,
    pub collided_objects: usize,
    pub objects_outside_viewport: usize,
    /// First frame in which any collision was recorded
    pub first_collision_frame: Option<u64>,
}

/// Output of [`WorldGrid::create_simulation`]
#[derive(Debug, Clone)]
pub struct SimulationRun {
    pub output: SimulationOutput,
    pub summary: RunSummary,
}

impl WorldGrid {
    /// Run `steps` iterations of update, collision scan and frame snapshot.
    ///
    /// Background drawables are taken after the loop, so mobile objects show
    /// their final positions with normal styling.
    #[instrument(skip(self, movement), fields(width = self.width, height = self.height))]
    pub fn create_simulation(
        &mut self,
        steps: u64,
        movement: &mut dyn MovementSource,
    ) -> SimulationRun {
        info!(
            "Starting simulation for {} steps with {} objects",
            steps,
            self.objects().len()
        );

        let mut frames = Vec::with_capacity(frame_capacity(steps));
        let mut first_collision_frame = None;

        for frame_number in 0..steps {
            self.update_state(movement);
            let newly_collided = self.check_for_collisions();
            if !newly_collided.is_empty() && first_collision_frame.is_none() {
                first_collision_frame = Some(frame_number);
            }

            let frame = self.get_frame(frame_number);
            debug!(
                frame_number,
                new_collisions = newly_collided.len(),
                collided_total = frame.collision_count(),
                "Frame captured"
            );
            frames.push(frame);
        }

        let summary = RunSummary {
            steps,
            mobile_objects: self.mobile_count(),
            static_objects: self.static_count(),
            collided_objects: self.collided_count(),
            objects_outside_viewport: self.outside_viewport_count(),
            first_collision_frame,
        };

        info!(
            event = "run_summary",
            steps = summary.steps,
            mobile_objects = summary.mobile_objects,
            static_objects = summary.static_objects,
            collided_objects = summary.collided_objects,
            objects_outside_viewport = summary.objects_outside_viewport,
            first_collision_frame = ?summary.first_collision_frame,
            "Simulation complete"
        );

        SimulationRun {
            output: SimulationOutput {
                width: self.width,
                height: self.height,
                background_drawables: self.background_drawings(),
                frames,
            },
            summary,
        }
    }
}

/// Build a grid from the scenario and run it with a seeded random source
pub fn run_scenario(scenario: &ScenarioConfig, run: &RunConfig) -> Result<SimulationRun> {
    let mut grid = WorldGrid::from_config(scenario)?;
    let mut movement = RandomMovement::new(run.seed);
    Ok(grid.create_simulation(run.steps, &mut movement))
}
