//! Tilesync Core Geometry
//!
//! Platform-agnostic geometry for synchronized edge-tiling.
//!
//! This crate implements the pure arithmetic behind quick-tile groups:
//! - Classifying a window rectangle into a screen-edge affinity
//! - Locating the inner (group-facing) and outer (screen-facing) corners
//! - Recomputing tiled rectangles around a shared anchor point
//! - Snapping a resized tile flush against the work-area boundary
//!
//! Everything here is a pure function over in-memory rectangles; the stateful
//! gesture handling lives in the `tilesync-engine` crate.

use serde::{Deserialize, Serialize};

/// Unique identifier for a window, assigned by the host window manager.
pub type WindowId = u64;

/// A rectangle in screen coordinates (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Whether this rectangle may be applied as a final placement.
    ///
    /// Degenerate rectangles are rejected outright rather than clamped;
    /// clamping would falsify the tiling arithmetic that produced them.
    pub fn is_valid_placement(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Screen-edge affinity of a window rectangle.
///
/// This is a closed set: the six directional edges each map to exactly one
/// inner-corner and one outer-corner formula, while `Floating` and
/// `Maximized` carry no corner semantics at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenEdge {
    /// Not attached to any screen edge.
    Floating,
    /// Fills the entire work area.
    Maximized,
    /// Left half of the work area.
    Left,
    /// Right half of the work area.
    Right,
    /// Top-left quarter.
    TopLeft,
    /// Top-right quarter.
    TopRight,
    /// Bottom-left quarter.
    BottomLeft,
    /// Bottom-right quarter.
    BottomRight,
}

impl ScreenEdge {
    /// Whether this edge participates in tiling (has corner semantics).
    pub fn is_tiled(self) -> bool {
        !matches!(self, ScreenEdge::Floating | ScreenEdge::Maximized)
    }

    /// Whether this is a side tile spanning the full work-area height.
    pub fn is_side(self) -> bool {
        matches!(self, ScreenEdge::Left | ScreenEdge::Right)
    }
}

/// A corner anchor shared by a tile group.
///
/// Side-tiled windows span the full work-area height by contract, so their
/// anchors constrain only the x-axis; `y` is `None` for them. Corner tiles
/// constrain both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub x: i32,
    pub y: Option<i32>,
}

impl Anchor {
    /// An anchor constraining both axes.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y: Some(y) }
    }

    /// An anchor constraining only the x-axis (side tiles).
    pub fn horizontal(x: i32) -> Self {
        Self { x, y: None }
    }

    /// Whether two anchors coincide within `tolerance`.
    ///
    /// The x-components must always be near each other; the y-components are
    /// compared only when both anchors carry a vertical constraint.
    pub fn near(self, other: Anchor, tolerance: i32) -> bool {
        if !near(self.x, other.x, tolerance) {
            return false;
        }
        match (self.y, other.y) {
            (Some(a), Some(b)) => near(a, b, tolerance),
            _ => true,
        }
    }
}

/// Whether `a` is within `tolerance` pixels of `b`.
pub fn near(a: i32, b: i32, tolerance: i32) -> bool {
    (a - b).abs() <= tolerance
}

/// Classify a window rectangle into its screen-edge affinity.
///
/// The left side is checked first: a window whose left edge sits near the
/// work area's left edge is `Maximized`, `Left`, `TopLeft` or `BottomLeft`
/// depending on which of its other edges also line up. The right side
/// mirrors this. A window matching neither side is `Floating`.
pub fn classify(window: Rect, work_area: Rect, tolerance: i32) -> ScreenEdge {
    // Left side
    if near(window.x, work_area.x, tolerance) {
        if near(window.y, work_area.y, tolerance) {
            if near(window.height, work_area.height, tolerance) {
                if near(window.width, work_area.width, tolerance) {
                    return ScreenEdge::Maximized;
                }
                return ScreenEdge::Left;
            }
            return ScreenEdge::TopLeft;
        }
        if near(window.bottom(), work_area.bottom(), tolerance) {
            return ScreenEdge::BottomLeft;
        }
    }

    // Right side
    if near(window.right(), work_area.right(), tolerance) {
        if near(window.y, work_area.y, tolerance) {
            if near(window.height, work_area.height, tolerance) {
                return ScreenEdge::Right;
            }
            return ScreenEdge::TopRight;
        }
        if near(window.bottom(), work_area.bottom(), tolerance) {
            return ScreenEdge::BottomRight;
        }
    }

    ScreenEdge::Floating
}

/// Corner of a tiled window facing the screen interior.
///
/// This is the shared reference point for group synchronization. Returns
/// `None` for `Floating`/`Maximized`; side tiles yield a horizontal-only
/// anchor.
pub fn inner_corner(window: Rect, edge: ScreenEdge) -> Option<Anchor> {
    let (x2, y2) = (window.right(), window.bottom());
    match edge {
        ScreenEdge::Left => Some(Anchor::horizontal(x2)),
        ScreenEdge::Right => Some(Anchor::horizontal(window.x)),
        ScreenEdge::TopLeft => Some(Anchor::new(x2, y2)),
        ScreenEdge::TopRight => Some(Anchor::new(window.x, y2)),
        ScreenEdge::BottomLeft => Some(Anchor::new(x2, window.y)),
        ScreenEdge::BottomRight => Some(Anchor::new(window.x, window.y)),
        ScreenEdge::Floating | ScreenEdge::Maximized => None,
    }
}

/// Corner of a tiled window facing the screen boundary.
///
/// Used for final flush-snap alignment. Complementary to [`inner_corner`].
pub fn outer_corner(window: Rect, edge: ScreenEdge) -> Option<Anchor> {
    let (x2, y2) = (window.right(), window.bottom());
    match edge {
        ScreenEdge::Left => Some(Anchor::horizontal(window.x)),
        ScreenEdge::Right => Some(Anchor::horizontal(x2)),
        ScreenEdge::TopLeft => Some(Anchor::new(window.x, window.y)),
        ScreenEdge::TopRight => Some(Anchor::new(x2, window.y)),
        ScreenEdge::BottomLeft => Some(Anchor::new(window.x, y2)),
        ScreenEdge::BottomRight => Some(Anchor::new(x2, y2)),
        ScreenEdge::Floating | ScreenEdge::Maximized => None,
    }
}

/// Recompute a tiled window's rectangle around a shared anchor.
///
/// The window's outer-facing edges stay pinned to the work-area boundary
/// while its inner-facing edges meet `anchor`, producing gapless synchronized
/// tiling without a shared layout tree.
///
/// An anchor without a vertical constraint (side-tiled master) adjusts corner
/// tiles only along the shared x-axis; their vertical extent is kept from
/// `current`. Returns `None` for non-tiled edges.
///
/// The result is not validated here; callers reject non-positive dimensions.
pub fn tiled_rect(current: Rect, edge: ScreenEdge, anchor: Anchor, work_area: Rect) -> Option<Rect> {
    match edge {
        ScreenEdge::Left => Some(Rect::new(
            work_area.x,
            work_area.y,
            anchor.x,
            work_area.height,
        )),
        ScreenEdge::Right => Some(Rect::new(
            anchor.x,
            work_area.y,
            work_area.width - anchor.x,
            work_area.height,
        )),
        ScreenEdge::TopLeft => {
            let mut rect = Rect::new(work_area.x, current.y, anchor.x, current.height);
            if let Some(y) = anchor.y {
                rect.y = work_area.y;
                rect.height = y;
            }
            Some(rect)
        }
        ScreenEdge::TopRight => {
            let mut rect = Rect::new(anchor.x, current.y, work_area.width - anchor.x, current.height);
            if let Some(y) = anchor.y {
                rect.y = work_area.y;
                rect.height = y;
            }
            Some(rect)
        }
        ScreenEdge::BottomLeft => {
            let mut rect = Rect::new(work_area.x, current.y, anchor.x, current.height);
            if let Some(y) = anchor.y {
                rect.y = y;
                rect.height = work_area.height - y;
            }
            Some(rect)
        }
        ScreenEdge::BottomRight => {
            let mut rect = Rect::new(anchor.x, current.y, work_area.width - anchor.x, current.height);
            if let Some(y) = anchor.y {
                rect.y = y;
                rect.height = work_area.height - y;
            }
            Some(rect)
        }
        ScreenEdge::Floating | ScreenEdge::Maximized => None,
    }
}

/// Snap a tiled window flush against the work-area boundary.
///
/// The outer-facing edges are moved onto the boundary while the inner-facing
/// edges are preserved, closing any rounding gap left after an interactive
/// resize. Returns `None` for non-tiled edges.
pub fn snap_to_edge(current: Rect, edge: ScreenEdge, work_area: Rect) -> Option<Rect> {
    let mut rect = current;
    match edge {
        ScreenEdge::Left => {
            rect.width += current.x - work_area.x;
            rect.x = work_area.x;
            rect.y = work_area.y;
            rect.height = work_area.height;
        }
        ScreenEdge::Right => {
            rect.y = work_area.y;
            rect.width += work_area.width - current.right();
            rect.height = work_area.height;
        }
        ScreenEdge::TopLeft => {
            rect.width += current.x - work_area.x;
            rect.x = work_area.x;
            rect.height += current.y - work_area.y;
            rect.y = work_area.y;
        }
        ScreenEdge::TopRight => {
            rect.width += work_area.width - current.right();
            rect.height += current.y - work_area.y;
            rect.y = work_area.y;
        }
        ScreenEdge::BottomLeft => {
            rect.width += current.x - work_area.x;
            rect.x = work_area.x;
            rect.height += work_area.height - current.bottom();
        }
        ScreenEdge::BottomRight => {
            rect.width += work_area.width - current.right();
            rect.height += work_area.height - current.bottom();
        }
        ScreenEdge::Floating | ScreenEdge::Maximized => return None,
    }
    Some(rect)
}

/// Whether a window's size matches a quick-tile footprint.
///
/// A quick-tiled window is half the work-area width, combined with either
/// half or the full work-area height.
pub fn is_quick_tile_size(window: Rect, work_area: Rect, tolerance: i32) -> bool {
    let half_width = near(window.width, work_area.width / 2, tolerance);
    let half_height = near(window.height, work_area.height / 2, tolerance);
    let full_height = near(window.height, work_area.height, tolerance);
    half_width && (half_height || full_height)
}
