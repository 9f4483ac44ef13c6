//! The world grid: owns every object and runs the per-step operations.

use crate::frame::{DrawableRecord, Frame};
use crate::movement::MovementSource;
use crate::object::{CollisionPeer, WorldEntity, WorldObject};
use bubble_core::{Error, ObjectId, Result, ScenarioConfig};
use std::collections::HashSet;
use tracing::info;

/// A bounded 2D grid holding mobile and static objects in update order.
///
/// The bounds only describe the rendered viewport; objects may wander outside.
#[derive(Debug, Clone)]
pub struct WorldGrid {
    pub width: i32,
    pub height: i32,
    objects: Vec<WorldEntity>,
}

impl WorldGrid {
    /// Build a grid, rejecting non-positive bounds and duplicate ids
    pub fn new(width: i32, height: i32, objects: Vec<WorldEntity>) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::Configuration(format!(
                "grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }

        if let Some(id) = first_duplicate_id(&objects) {
            return Err(Error::DuplicateObjectId(id.to_string()));
        }

        Ok(Self {
            width,
            height,
            objects,
        })
    }

    /// Create a grid from the inbound scenario configuration
    pub fn from_config(config: &ScenarioConfig) -> Result<Self> {
        let objects = config.objects.iter().map(WorldEntity::from_spec).collect();
        Self::new(config.width, config.height, objects)
    }

    pub fn objects(&self) -> &[WorldEntity] {
        &self.objects
    }

    pub fn get(&self, id: &ObjectId) -> Option<&WorldEntity> {
        self.objects.iter().find(|object| object.id() == id)
    }

    /// Move every active mobile object once, in insertion order
    pub fn update_state(&mut self, movement: &mut dyn MovementSource) {
        for object in &mut self.objects {
            if !object.participates_in_collision() || object.collided() {
                continue;
            }
            object.update_state(movement);
        }
    }

    /// Pairwise same-cell test across all mobile objects.
    ///
    /// Positions are captured before the scan, so the collided set does not
    /// depend on the order objects are visited in. Returns the ids that
    /// became collided during this call.
    pub fn check_for_collisions(&mut self) -> Vec<ObjectId> {
        let peers: Vec<CollisionPeer> = self
            .objects
            .iter()
            .filter(|object| object.participates_in_collision())
            .map(|object| CollisionPeer::from(object.state()))
            .collect();

        let mut newly_collided = Vec::new();
        for collider in self.objects.iter_mut().filter_map(WorldEntity::as_collider_mut) {
            if collider.set_collision(&peers) {
                info!(
                    event = "collision",
                    object_id = %collider.id(),
                    x = collider.position().x,
                    y = collider.position().y,
                    "Mobile object collided"
                );
                newly_collided.push(collider.id().clone());
            }
        }

        newly_collided
    }

    /// Per-frame drawables of the mobile objects; static objects are skipped
    pub fn fetch_object_drawings(&self) -> Vec<DrawableRecord> {
        self.objects
            .iter()
            .filter_map(|object| object.to_drawable())
            .collect()
    }

    /// Background drawables of every object, obstacles included
    pub fn background_drawings(&self) -> Vec<DrawableRecord> {
        self.objects
            .iter()
            .map(|object| object.background_drawable())
            .collect()
    }

    /// Snapshot the current drawables. Does not mutate the grid.
    pub fn get_frame(&self, frame_number: u64) -> Frame {
        Frame::new(frame_number, self.fetch_object_drawings())
    }

    pub fn mobile_count(&self) -> usize {
        self.objects
            .iter()
            .filter(|object| object.participates_in_collision())
            .count()
    }

    pub fn static_count(&self) -> usize {
        self.objects.len() - self.mobile_count()
    }

    pub fn collided_count(&self) -> usize {
        self.objects.iter().filter(|object| object.collided()).count()
    }

    /// Objects whose position lies outside the viewport
    pub fn outside_viewport_count(&self) -> usize {
        self.objects
            .iter()
            .filter(|object| !object.position().within(self.width, self.height))
            .count()
    }
}

fn first_duplicate_id(objects: &[WorldEntity]) -> Option<&ObjectId> {
    let mut seen: HashSet<&ObjectId> = HashSet::with_capacity(objects.len());
    objects
        .iter()
        .map(|object| object.id())
        .find(|id| !seen.insert(*id))
}
