//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a world object
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// 2D position in the world.
///
/// Coordinates are wider than the inbound `i32` so unbounded unit moves from
/// any configured start cannot overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i64, dy: i64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Whether the position lies inside `[0, width] x [0, height]`
    pub fn within(&self, width: i32, height: i32) -> bool {
        (0..=i64::from(width)).contains(&self.x) && (0..=i64::from(height)).contains(&self.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Unit move a mobile object can take in a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Left,
    Right,
    Up,
    Down,
    Stay,
}

impl Move {
    /// y grows upwards, matching the rendered chart axes.
    pub fn to_delta(&self) -> (i64, i64) {
        match self {
            Move::Left => (-1, 0),
            Move::Right => (1, 0),
            Move::Up => (0, 1),
            Move::Down => (0, -1),
            Move::Stay => (0, 0),
        }
    }

    pub fn all() -> [Move; 5] {
        [Move::Left, Move::Right, Move::Up, Move::Down, Move::Stay]
    }
}

/// Kind tag of an object in the inbound scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Mobile,
    Static,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_add() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.add(-1, 0), Position::new(4, 5));
        assert_eq!(pos.add(0, 0), pos);
        assert_eq!(pos.add(-10, 20), Position::new(-5, 25));
    }

    #[test]
    fn test_position_add_past_i32_range() {
        let edge = Position::new(i64::from(i32::MAX), i64::from(i32::MIN));
        assert_eq!(
            edge.add(1, -1),
            Position::new(i64::from(i32::MAX) + 1, i64::from(i32::MIN) - 1)
        );
    }

    #[test]
    fn test_position_within() {
        assert!(Position::new(0, 0).within(20, 20));
        assert!(Position::new(20, 20).within(20, 20));
        assert!(!Position::new(-1, 3).within(20, 20));
        assert!(!Position::new(3, 21).within(20, 20));
    }

    #[test]
    fn test_move_delta() {
        assert_eq!(Move::Left.to_delta(), (-1, 0));
        assert_eq!(Move::Right.to_delta(), (1, 0));
        assert_eq!(Move::Up.to_delta(), (0, 1));
        assert_eq!(Move::Down.to_delta(), (0, -1));
        assert_eq!(Move::Stay.to_delta(), (0, 0));
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&ObjectKind::Static).unwrap();
        assert_eq!(json, "\"static\"");
        let kind: ObjectKind = serde_json::from_str("\"mobile\"").unwrap();
        assert_eq!(kind, ObjectKind::Mobile);
    }

    #[test]
    fn test_object_id_is_transparent() {
        let id = ObjectId::from("bubble_5_5");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"bubble_5_5\"");
        assert_eq!(id.to_string(), "bubble_5_5");
    }
}
