//! Drag tracking for interactive rectangle selection

use super::geometry::{Point, Rect};

/// Pointer input delivered while the pointer is grabbed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// A button went down at this root position
    ButtonPress(Point),
    /// The pointer moved to this root position
    Motion(Point),
    /// Any button went up
    ButtonRelease,
    /// Anything else the display delivered
    Other,
}

/// Outline redraw needed after a pointer motion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineStep {
    /// Outline currently on screen that must be inverted away first
    pub erase: Option<Rect>,
    /// Outline to paint for the new rectangle
    pub draw: Rect,
}

/// Drag state owned by the selection loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragState {
    anchor: Point,
    current: Point,
    dragging: bool,
    selection: Rect,
    /// Outline currently painted on the root window, if any
    outline: Option<Rect>,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) a drag at `point`.
    ///
    /// Returns the outline left over from an earlier drag, which the caller
    /// has to erase.
    pub fn press(&mut self, point: Point) -> Option<Rect> {
        self.anchor = point;
        self.current = point;
        self.dragging = true;
        self.selection = Rect::at(point);
        self.outline.take()
    }

    /// Track pointer motion; `None` when no button is held
    pub fn motion(&mut self, point: Point) -> Option<OutlineStep> {
        if !self.dragging {
            return None;
        }
        self.current = point;
        self.selection = Rect::from_corners(self.anchor, self.current);
        let erase = self.outline.replace(self.selection);
        Some(OutlineStep {
            erase,
            draw: self.selection,
        })
    }

    /// End the drag, returning the outline still on screen (if any) and the
    /// final rectangle
    pub fn finish(self) -> (Option<Rect>, Rect) {
        (self.outline, self.selection)
    }
}
