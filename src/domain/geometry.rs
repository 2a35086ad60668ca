//! Geometric types for selected regions and root-window coordinates

/// A position in root-window coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Normalized rectangle: top-left corner plus non-negative extent
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle from its top-left corner and size
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Zero-sized rectangle sitting on a single point
    pub fn at(point: Point) -> Self {
        Self::new(point.x, point.y, 0, 0)
    }

    /// Normalize two arbitrary corners into a rectangle.
    ///
    /// The corners may be given in any order, so dragging up-left and
    /// down-right from the same anchor yields the same rectangle.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: a.x.abs_diff(b.x),
            height: a.y.abs_diff(b.y),
        }
    }
}

/// Window handle of the surface the geometry was read from
pub type SurfaceId = u32;

/// Geometry reported by the display for the root window
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RootGeometry {
    pub root: SurfaceId,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub border: u32,
    pub depth: u32,
}

/// A selected screen region, relative to the root window.
///
/// The right and bottom offsets are always derived from the root extent,
/// so a `Region` can only be built through [`Region::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    root: SurfaceId,
    x: i32,
    y: i32,
    right: i32,
    bottom: i32,
    width: u32,
    height: u32,
    border: u32,
    depth: u32,
}

impl Region {
    /// Build the region for `selection`, mirroring its offsets against the root window
    pub fn new(selection: Rect, root: &RootGeometry) -> Self {
        Self {
            root: root.root,
            x: selection.x,
            y: selection.y,
            right: far_edge_offset(root.width, selection.x, selection.width),
            bottom: far_edge_offset(root.height, selection.y, selection.height),
            width: selection.width,
            height: selection.height,
            // Inherited from the root window; meaningless for the selection itself
            border: root.border,
            depth: root.depth,
        }
    }

    pub fn root(&self) -> SurfaceId {
        self.root
    }

    /// Offset from the left edge of the root window
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Offset from the top edge of the root window
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Offset of the right edge from the right edge of the root window
    pub fn right(&self) -> i32 {
        self.right
    }

    /// Offset of the bottom edge from the bottom edge of the root window
    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn border(&self) -> u32 {
        self.border
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }
}

/// `extent - origin - size`, saturated to the `i32` range
fn far_edge_offset(extent: u32, origin: i32, size: u32) -> i32 {
    let offset = i64::from(extent) - i64::from(origin) - i64::from(size);
    offset.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
