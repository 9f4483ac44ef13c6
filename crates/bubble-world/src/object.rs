//! World objects: mobile bubbles and static rocks.

use crate::frame::{DrawStyle, DrawableRecord};
use crate::movement::MovementSource;
use bubble_core::{ObjectId, ObjectKind, ObjectSpec, Position};
use tracing::trace;

/// Identity, position and collision flag shared by every world object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectState {
    pub id: ObjectId,
    pub position: Position,
    pub collided: bool,
}

impl ObjectState {
    pub fn new(id: ObjectId, position: Position) -> Self {
        Self {
            id,
            position,
            collided: false,
        }
    }

    /// Shift the position by the given deltas. No bounds are applied.
    pub fn move_by(&mut self, dx: i64, dy: i64) {
        self.position = self.position.add(dx, dy);
    }
}

/// Identity and position of a collision candidate, captured before the scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionPeer {
    pub id: ObjectId,
    pub position: Position,
}

impl From<&ObjectState> for CollisionPeer {
    fn from(state: &ObjectState) -> Self {
        Self {
            id: state.id.clone(),
            position: state.position,
        }
    }
}

/// Capabilities the grid relies on for every object kind
pub trait WorldObject {
    fn state(&self) -> &ObjectState;

    fn id(&self) -> &ObjectId {
        &self.state().id
    }

    fn position(&self) -> Position {
        self.state().position
    }

    fn collided(&self) -> bool {
        self.state().collided
    }

    /// Per-step behaviour
    fn update_state(&mut self, movement: &mut dyn MovementSource);

    fn participates_in_collision(&self) -> bool;

    /// Record for the per-step frame, `None` if the object is not animated
    fn to_drawable(&self) -> Option<DrawableRecord>;

    /// Record for the static background figure
    fn background_drawable(&self) -> DrawableRecord;
}

/// Objects that can be tested for same-cell collisions
pub trait Collider: WorldObject {
    /// Mark the object collided if a peer with a different id shares its cell.
    /// Returns true only when the flag flips in this call.
    fn set_collision(&mut self, peers: &[CollisionPeer]) -> bool;
}

/// A bubble: random unit moves until it collides with another bubble
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MobileObject {
    state: ObjectState,
}

impl MobileObject {
    pub fn new(id: impl Into<ObjectId>, position: Position) -> Self {
        Self {
            state: ObjectState::new(id.into(), position),
        }
    }

    pub fn move_by(&mut self, dx: i64, dy: i64) {
        self.state.move_by(dx, dy);
    }
}

impl WorldObject for MobileObject {
    fn state(&self) -> &ObjectState {
        &self.state
    }

    fn update_state(&mut self, movement: &mut dyn MovementSource) {
        if self.state.collided {
            return;
        }

        let step = movement.next_move();
        let (dx, dy) = step.to_delta();
        self.move_by(dx, dy);

        trace!(
            object_id = %self.state.id,
            ?step,
            x = self.state.position.x,
            y = self.state.position.y,
            "Mobile object moved"
        );
    }

    fn participates_in_collision(&self) -> bool {
        true
    }

    fn to_drawable(&self) -> Option<DrawableRecord> {
        let style = if self.state.collided {
            DrawStyle::Collision
        } else {
            DrawStyle::Normal
        };
        Some(DrawableRecord::new(self.state.position, style))
    }

    fn background_drawable(&self) -> DrawableRecord {
        DrawableRecord::new(self.state.position, DrawStyle::Normal)
    }
}

impl Collider for MobileObject {
    fn set_collision(&mut self, peers: &[CollisionPeer]) -> bool {
        if self.state.collided {
            return false;
        }

        let hit = peers
            .iter()
            .any(|peer| peer.position == self.state.position && peer.id != self.state.id);

        if hit {
            self.state.collided = true;
        }
        hit
    }
}

/// A rock: fixed obstacle marker, never moves and never collides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticObject {
    state: ObjectState,
}

impl StaticObject {
    pub fn new(id: impl Into<ObjectId>, position: Position) -> Self {
        Self {
            state: ObjectState::new(id.into(), position),
        }
    }
}

impl WorldObject for StaticObject {
    fn state(&self) -> &ObjectState {
        &self.state
    }

    fn update_state(&mut self, _movement: &mut dyn MovementSource) {}

    fn participates_in_collision(&self) -> bool {
        false
    }

    fn to_drawable(&self) -> Option<DrawableRecord> {
        None
    }

    fn background_drawable(&self) -> DrawableRecord {
        DrawableRecord::new(self.state.position, DrawStyle::Obstacle)
    }
}

/// Closed set of object kinds owned by the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldEntity {
    Mobile(MobileObject),
    Static(StaticObject),
}

impl WorldEntity {
    pub fn from_spec(spec: &ObjectSpec) -> Self {
        let position = Position::new(i64::from(spec.x), i64::from(spec.y));
        let id = ObjectId::new(spec.id.clone());
        match spec.kind {
            ObjectKind::Mobile => WorldEntity::Mobile(MobileObject::new(id, position)),
            ObjectKind::Static => WorldEntity::Static(StaticObject::new(id, position)),
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            WorldEntity::Mobile(_) => ObjectKind::Mobile,
            WorldEntity::Static(_) => ObjectKind::Static,
        }
    }

    pub fn as_collider_mut(&mut self) -> Option<&mut dyn Collider> {
        match self {
            WorldEntity::Mobile(object) => Some(object),
            WorldEntity::Static(_) => None,
        }
    }

    fn inner(&self) -> &dyn WorldObject {
        match self {
            WorldEntity::Mobile(object) => object,
            WorldEntity::Static(object) => object,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn WorldObject {
        match self {
            WorldEntity::Mobile(object) => object,
            WorldEntity::Static(object) => object,
        }
    }
}

impl WorldObject for WorldEntity {
    fn state(&self) -> &ObjectState {
        self.inner().state()
    }

    fn update_state(&mut self, movement: &mut dyn MovementSource) {
        self.inner_mut().update_state(movement)
    }

    fn participates_in_collision(&self) -> bool {
        self.inner().participates_in_collision()
    }

    fn to_drawable(&self) -> Option<DrawableRecord> {
        self.inner().to_drawable()
    }

    fn background_drawable(&self) -> DrawableRecord {
        self.inner().background_drawable()
    }
}

impl From<MobileObject> for WorldEntity {
    fn from(object: MobileObject) -> Self {
        WorldEntity::Mobile(object)
    }
}

impl From<StaticObject> for WorldEntity {
    fn from(object: StaticObject) -> Self {
        WorldEntity::Static(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::{FixedMovement, ScriptedMovement};
    use bubble_core::Move;

    fn peers_of(objects: &[&MobileObject]) -> Vec<CollisionPeer> {
        objects.iter().map(|o| CollisionPeer::from(o.state())).collect()
    }

    #[test]
    fn test_move_by_is_unbounded() {
        let mut bubble = MobileObject::new("b", Position::new(0, 0));
        bubble.move_by(-3, 0);
        bubble.move_by(0, 0);
        bubble.move_by(1, -7);
        assert_eq!(bubble.position(), Position::new(-2, -7));
    }

    #[test]
    fn test_mobile_update_applies_unit_moves() {
        let mut bubble = MobileObject::new("b", Position::new(5, 5));
        let mut source =
            ScriptedMovement::new(vec![Move::Left, Move::Up, Move::Up, Move::Right, Move::Down, Move::Stay]);

        let expected = [(4, 5), (4, 6), (4, 7), (5, 7), (5, 6), (5, 6)];
        for (x, y) in expected {
            bubble.update_state(&mut source);
            assert_eq!(bubble.position(), Position::new(x, y));
        }
    }

    #[test]
    fn test_collided_mobile_does_not_move() {
        let mut a = MobileObject::new("a", Position::new(1, 1));
        let b = MobileObject::new("b", Position::new(1, 1));
        assert!(a.set_collision(&peers_of(&[&a, &b])));

        a.update_state(&mut FixedMovement(Move::Right));
        assert_eq!(a.position(), Position::new(1, 1));
    }

    #[test]
    fn test_set_collision_excludes_self() {
        let mut a = MobileObject::new("a", Position::new(2, 2));
        let peers = peers_of(&[&a, &a.clone()]);
        assert!(!a.set_collision(&peers));
        assert!(!a.collided());
    }

    #[test]
    fn test_set_collision_requires_same_cell() {
        let mut a = MobileObject::new("a", Position::new(2, 2));
        let b = MobileObject::new("b", Position::new(2, 3));
        assert!(!a.set_collision(&peers_of(&[&a, &b])));
        assert!(!a.collided());
    }

    #[test]
    fn test_collision_is_sticky() {
        let mut a = MobileObject::new("a", Position::new(2, 2));
        let mut b = MobileObject::new("b", Position::new(2, 2));
        let peers = peers_of(&[&a, &b]);
        assert!(a.set_collision(&peers));
        assert!(b.set_collision(&peers));

        b.move_by(5, 0);
        let peers = peers_of(&[&a, &b]);
        assert!(!a.set_collision(&peers));
        assert!(a.collided());
    }

    #[test]
    fn test_mobile_drawables() {
        let mut a = MobileObject::new("a", Position::new(4, 9));
        assert_eq!(
            a.to_drawable(),
            Some(DrawableRecord::new(Position::new(4, 9), DrawStyle::Normal))
        );

        let b = MobileObject::new("b", Position::new(4, 9));
        a.set_collision(&peers_of(&[&b]));
        assert_eq!(a.to_drawable().map(|d| d.style), Some(DrawStyle::Collision));
        assert_eq!(a.background_drawable().style, DrawStyle::Normal);
    }

    #[test]
    fn test_static_object_is_inert() {
        let mut rock = StaticObject::new("rock", Position::new(3, 15));
        rock.update_state(&mut FixedMovement(Move::Left));
        assert_eq!(rock.position(), Position::new(3, 15));
        assert!(!rock.participates_in_collision());
        assert_eq!(rock.to_drawable(), None);
        assert_eq!(rock.background_drawable().style, DrawStyle::Obstacle);
    }

    #[test]
    fn test_entity_from_spec_keeps_extreme_coordinates() {
        let mut edge = WorldEntity::from_spec(&ObjectSpec::mobile("edge", i32::MAX, i32::MIN));
        edge.update_state(&mut ScriptedMovement::new(vec![Move::Right, Move::Down]));
        edge.update_state(&mut FixedMovement(Move::Down));
        assert_eq!(
            edge.position(),
            Position::new(i64::from(i32::MAX) + 1, i64::from(i32::MIN) - 1)
        );
    }

    #[test]
    fn test_entity_from_spec() {
        let mobile = WorldEntity::from_spec(&ObjectSpec::mobile("b", 1, 2));
        assert_eq!(mobile.kind(), ObjectKind::Mobile);
        assert_eq!(mobile.position(), Position::new(1, 2));
        assert!(mobile.participates_in_collision());

        let rock = WorldEntity::from_spec(&ObjectSpec::fixed("r", 3, 4));
        assert_eq!(rock.kind(), ObjectKind::Static);
        assert_eq!(rock.id().as_str(), "r");
        assert!(!rock.participates_in_collision());
        assert!(rock.clone().as_collider_mut().is_none());
    }
}
