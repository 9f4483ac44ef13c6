//! Drawable records and per-step frames handed to the renderer.

use bubble_core::Position;
use serde::{Deserialize, Serialize};

/// Styling selector for a drawable record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawStyle {
    /// Active mobile object
    Normal,
    /// Mobile object that has collided
    Collision,
    /// Static obstacle
    Obstacle,
}

/// Position plus style, consumed by the renderer as-is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrawableRecord {
    pub x: i64,
    pub y: i64,
    pub style: DrawStyle,
}

impl DrawableRecord {
    pub fn new(position: Position, style: DrawStyle) -> Self {
        Self {
            x: position.x,
            y: position.y,
            style,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Immutable snapshot of the mobile objects after one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    frame_number: u64,
    drawables: Vec<DrawableRecord>,
}

impl Frame {
    pub fn new(frame_number: u64, drawables: Vec<DrawableRecord>) -> Self {
        Self {
            frame_number,
            drawables,
        }
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub fn drawables(&self) -> &[DrawableRecord] {
        &self.drawables
    }

    /// Caption shown by the renderer for this frame
    pub fn title(&self) -> String {
        format!("Simulation frame {}", self.frame_number)
    }

    pub fn collision_count(&self) -> usize {
        self.drawables
            .iter()
            .filter(|d| d.style == DrawStyle::Collision)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drawable_serialization() {
        let record = DrawableRecord::new(Position::new(3, -1), DrawStyle::Collision);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"x":3,"y":-1,"style":"collision"}"#);
    }

    #[test]
    fn test_frame_serialization() {
        let frame = Frame::new(
            2,
            vec![DrawableRecord::new(Position::new(1, 1), DrawStyle::Normal)],
        );
        let json = serde_json::to_string(&frame).unwrap();
        assert_eq!(
            json,
            r#"{"frame_number":2,"drawables":[{"x":1,"y":1,"style":"normal"}]}"#
        );
    }

    #[test]
    fn test_frame_title_and_counts() {
        let frame = Frame::new(
            7,
            vec![
                DrawableRecord::new(Position::new(1, 1), DrawStyle::Normal),
                DrawableRecord::new(Position::new(2, 2), DrawStyle::Collision),
                DrawableRecord::new(Position::new(2, 2), DrawStyle::Collision),
            ],
        );
        assert_eq!(frame.title(), "Simulation frame 7");
        assert_eq!(frame.collision_count(), 2);
        assert_eq!(frame.drawables()[0].position(), Position::new(1, 1));
    }
}
