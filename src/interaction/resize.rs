//! Anchor-drag resize state machine, one per axis.
//!
//! `Idle → Armed → Dragging → Idle`. The controller only remembers which pool
//! slot was pressed; the logical index and offsets come in fresh through an
//! [`AnchorFrame`] at every callback, since a render in between may have
//! rebound the slot.

use crate::types::Axis;

/// Geometry of the pressed anchor, resolved at callback time.
///
/// All positions are in table coordinates along the controller's axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorFrame {
    /// Logical row or column the anchor belongs to
    pub index: u32,
    /// Leading edge of that row/column
    pub start_offset: f32,
    /// Current size of that row/column
    pub size: f32,
    /// Scroll position of the container
    pub scroll: f32,
    /// Container size along the axis
    pub viewport_extent: f32,
    /// Header strip size along the axis
    pub header_extent: f32,
}

impl AnchorFrame {
    /// Where the anchor sits before any move.
    pub fn resting_position(&self) -> f32 {
        self.start_offset + self.size
    }
}

/// Inset distances of the allowed drag span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeLimits {
    /// Keeps the anchor this far past the leading edge of its own cell
    pub low_inset: f32,
    /// Keeps the anchor this far inside the container's far edge
    pub high_inset: f32,
}

impl ResizeLimits {
    /// Smallest size a commit can produce.
    pub fn min_size(&self) -> f32 {
        self.low_inset.max(1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeState {
    Idle,
    /// Handle pressed, no drag started yet
    Armed { slot: usize },
    /// Native drag in progress; `position` is the last previewed position
    Dragging { slot: usize, position: Option<f32> },
}

/// A size written by a drop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeCommit {
    pub axis: Axis,
    pub slot: usize,
    pub index: u32,
    pub size: f32,
    pub previous: f32,
}

impl ResizeCommit {
    /// How far everything after `index` moves.
    pub fn delta(&self) -> f32 {
        self.size - self.previous
    }
}

#[derive(Debug, Clone)]
pub struct ResizeController {
    axis: Axis,
    limits: ResizeLimits,
    state: ResizeState,
}

impl ResizeController {
    pub fn new(axis: Axis, limits: ResizeLimits) -> Self {
        Self {
            axis,
            limits,
            state: ResizeState::Idle,
        }
    }

    /// Pressed slot, while armed or dragging.
    pub fn active_slot(&self) -> Option<usize> {
        match self.state {
            ResizeState::Idle => None,
            ResizeState::Armed { slot } | ResizeState::Dragging { slot, .. } => Some(slot),
        }
    }

    /// Handle pressed. A press during an unfinished gesture starts over.
    pub fn press(&mut self, slot: usize) {
        self.state = ResizeState::Armed { slot };
    }

    /// Native drag started. Returns the slot, or `None` when not armed.
    pub fn begin_drag(&mut self) -> Option<usize> {
        match self.state {
            ResizeState::Armed { slot } => {
                self.state = ResizeState::Dragging {
                    slot,
                    position: None,
                };
                Some(slot)
            }
            _ => None,
        }
    }

    /// Allowed anchor span `[low, high]` for `frame`.
    pub fn bounds(&self, frame: &AnchorFrame) -> (f32, f32) {
        let low = frame.start_offset.max(frame.scroll + frame.header_extent) + self.limits.low_inset;
        let high = frame.scroll + frame.viewport_extent - self.limits.high_inset;
        (low, high.max(low))
    }

    /// Pointer moved to container-relative `pointer`. Returns the clamped
    /// preview position; nothing is committed.
    pub fn drag_over(&mut self, frame: &AnchorFrame, pointer: f32) -> Option<f32> {
        let ResizeState::Dragging { slot, .. } = self.state else {
            return None;
        };
        let (low, high) = self.bounds(frame);
        let position = (pointer + frame.scroll).clamp(low, high);
        self.state = ResizeState::Dragging {
            slot,
            position: Some(position),
        };
        Some(position)
    }

    /// Drag finished. Commits `last position - start offset`, or the current
    /// size when the handle never moved.
    pub fn drop(&mut self, frame: &AnchorFrame) -> Option<ResizeCommit> {
        let (slot, position) = match self.state {
            ResizeState::Idle => return None,
            ResizeState::Armed { slot } => (slot, None),
            ResizeState::Dragging { slot, position } => (slot, position),
        };
        self.state = ResizeState::Idle;

        let size = match position {
            Some(position) => (position - frame.start_offset).max(self.limits.min_size()),
            None => frame.size,
        };
        Some(ResizeCommit {
            axis: self.axis,
            slot,
            index: frame.index,
            size,
            previous: frame.size,
        })
    }

    /// Pointer released without a drag. Returns whether a press was pending.
    pub fn release(&mut self) -> bool {
        match self.state {
            ResizeState::Armed { .. } => {
                self.state = ResizeState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Abandon any gesture without committing.
    pub fn reset(&mut self) {
        self.state = ResizeState::Idle;
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    fn column_controller() -> ResizeController {
        ResizeController::new(
            Axis::Column,
            ResizeLimits {
                low_inset: 10.0,
                high_inset: 30.0,
            },
        )
    }

    fn frame() -> AnchorFrame {
        // Column 2 at default widths: 63 + 2 * 92
        AnchorFrame {
            index: 2,
            start_offset: 247.0,
            size: 80.0,
            scroll: 0.0,
            viewport_extent: 1280.0,
            header_extent: 63.0,
        }
    }

    #[test]
    fn full_gesture_commits_new_size() {
        let mut ctl = column_controller();
        ctl.press(2);
        assert_eq!(ctl.begin_drag(), Some(2));
        assert_eq!(ctl.drag_over(&frame(), 387.0), Some(387.0));
        let commit = ctl.drop(&frame()).unwrap();
        assert_eq!(commit.size, 140.0);
        assert_eq!(commit.delta(), 60.0);
        assert_eq!(ctl.state, ResizeState::Idle);
    }

    #[test]
    fn preview_is_clamped_to_bounds() {
        let mut ctl = column_controller();
        ctl.press(2);
        ctl.begin_drag();
        assert_eq!(ctl.drag_over(&frame(), 0.0), Some(257.0));
        assert_eq!(ctl.drag_over(&frame(), 5_000.0), Some(1250.0));
        assert_eq!(ctl.drop(&frame()).unwrap().size, 1003.0);
    }

    #[test]
    fn bounds_track_scroll() {
        let ctl = column_controller();
        let scrolled = AnchorFrame {
            scroll: 400.0,
            ..frame()
        };
        assert_eq!(ctl.bounds(&scrolled), (473.0, 1650.0));
    }

    #[test]
    fn drop_without_move_keeps_size() {
        let mut ctl = column_controller();
        ctl.press(2);
        ctl.begin_drag();
        let commit = ctl.drop(&frame()).unwrap();
        assert_eq!(commit.size, 80.0);
        assert_eq!(commit.delta(), 0.0);
    }

    #[test]
    fn release_without_drag_returns_to_idle() {
        let mut ctl = column_controller();
        ctl.press(4);
        assert!(ctl.release());
        assert_eq!(ctl.state, ResizeState::Idle);
        assert_eq!(ctl.begin_drag(), None);
        assert_eq!(ctl.drag_over(&frame(), 300.0), None);
        assert!(ctl.drop(&frame()).is_none());
    }

    #[test]
    fn release_during_drag_is_ignored() {
        let mut ctl = column_controller();
        ctl.press(1);
        ctl.begin_drag();
        assert!(!ctl.release());
        assert!(matches!(ctl.state, ResizeState::Dragging { .. }));
    }
}
