//! Per-gesture session state.

use tilesync_core_geometry::{Rect, ScreenEdge, WindowId};

/// A window participating in a tile group, with its classified edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupMember {
    pub id: WindowId,
    pub edge: ScreenEdge,
}

/// State of the active move/resize gesture.
///
/// Alive between a gesture-start notification and its matching finish. The
/// group membership is snapshotted at gesture start; windows appearing or
/// vanishing during the gesture do not change it.
#[derive(Debug, Clone)]
pub struct Session {
    /// Window driving the gesture.
    pub window: WindowId,
    /// Edge affinity classified at gesture start.
    pub edge: ScreenEdge,
    /// Tile group detected at gesture start, master included.
    pub group: Vec<GroupMember>,
    /// Geometry at gesture start, for resize-vs-move detection.
    pub start_geometry: Rect,
    /// Work area cached for the gesture's duration.
    pub work_area: Rect,
    /// Set once a step was classified as a free drag. Later steps no longer
    /// synchronize the group, which is how a tiled window is pulled loose.
    pub suppress_sync: bool,
}

impl Session {
    /// Whether `current` differs in size from the gesture-start geometry.
    pub fn was_resized(&self, current: Rect) -> bool {
        self.start_geometry.width != current.width || self.start_geometry.height != current.height
    }
}
