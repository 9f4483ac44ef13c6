//! Configuration types for the simulation.

use crate::{ObjectKind, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One object of the inbound scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSpec {
    /// Unique identifier
    pub id: String,
    /// Mobile or static
    pub kind: ObjectKind,
    /// Initial x coordinate
    pub x: i32,
    /// Initial y coordinate
    pub y: i32,
}

impl ObjectSpec {
    pub fn mobile(id: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            id: id.into(),
            kind: ObjectKind::Mobile,
            x,
            y,
        }
    }

    pub fn fixed(id: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            id: id.into(),
            kind: ObjectKind::Static,
            x,
            y,
        }
    }
}

/// Scenario setup: grid bounds plus the initial objects in update order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Width of the rendered viewport
    pub width: i32,
    /// Height of the rendered viewport
    pub height: i32,
    /// Objects in insertion order
    pub objects: Vec<ObjectSpec>,
}

impl ScenarioConfig {
    /// Parse a scenario from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a scenario from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn mobile_count(&self) -> usize {
        self.objects
            .iter()
            .filter(|spec| spec.kind == ObjectKind::Mobile)
            .count()
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        let mut objects: Vec<ObjectSpec> = (5..15)
            .step_by(2)
            .flat_map(|i| {
                (5..15)
                    .step_by(2)
                    .map(move |j| ObjectSpec::mobile(format!("bubble_{}_{}", i, j), i, j))
            })
            .collect();

        objects.push(ObjectSpec::fixed("rock_2_2", 2, 2));
        objects.push(ObjectSpec::fixed("rock_18_18", 18, 18));
        objects.push(ObjectSpec::fixed("rock_3_15", 3, 15));

        Self {
            width: 20,
            height: 20,
            objects,
        }
    }
}

/// Run parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of steps (and frames) to produce
    pub steps: u64,
    /// Seed for the movement source
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { steps: 50, seed: 0 }
    }
}
