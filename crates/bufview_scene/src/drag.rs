//! Mouse-drag tracking for panning.

use crate::event::Point;

/// Whether a pan drag is in progress, and where the cursor was last seen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PanDragState {
    #[default]
    Idle,
    /// Button held; `last_pos` is in canvas pixels
    Dragging { last_pos: Point },
}

impl PanDragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, PanDragState::Dragging { .. })
    }

    pub fn last_pos(&self) -> Option<Point> {
        match self {
            PanDragState::Dragging { last_pos } => Some(*last_pos),
            PanDragState::Idle => None,
        }
    }

    /// Begin a drag at `pos`, discarding any drag already running.
    pub fn start_drag(&mut self, pos: Point) {
        *self = PanDragState::Dragging { last_pos: pos };
    }

    /// Advance the drag to `pos` and return the `(dx, dy)` moved since the
    /// previous position, or `None` when idle.
    pub fn drag_to(&mut self, pos: Point) -> Option<(f32, f32)> {
        let PanDragState::Dragging { last_pos } = self else {
            return None;
        };
        let delta = (pos.x - last_pos.x, pos.y - last_pos.y);
        *last_pos = pos;
        Some(delta)
    }

    pub fn stop_drag(&mut self) {
        *self = PanDragState::Idle;
    }
}
