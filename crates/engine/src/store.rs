//! Saved pre-tile geometries.

use std::collections::HashMap;

use tilesync_core_geometry::{Rect, WindowId};

/// Pre-tile window geometries, keyed by window identity.
///
/// An entry is written when a gesture starts on an untiled window and
/// consumed when that window is later dragged out of a tile group. An entry
/// that never restores is overwritten by the next save for the same id; the
/// store does not survive the process.
#[derive(Debug, Default)]
pub struct GeometryStore {
    saved: HashMap<WindowId, Rect>,
}

impl GeometryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `rect` as the pre-tile geometry of `id`, replacing any
    /// earlier entry.
    pub fn save(&mut self, id: WindowId, rect: Rect) {
        self.saved.insert(id, rect);
    }

    /// Return and remove the saved geometry for `id`.
    pub fn take(&mut self, id: WindowId) -> Option<Rect> {
        self.saved.remove(&id)
    }

    /// Drop the saved geometry for `id`, if any.
    pub fn discard(&mut self, id: WindowId) {
        self.saved.remove(&id);
    }

    /// Whether a geometry is saved for `id`.
    pub fn contains(&self, id: WindowId) -> bool {
        self.saved.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.saved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }
}
