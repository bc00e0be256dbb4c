//! Host collaborator interface.
//!
//! The engine owns no windows. The host window-manager runtime implements
//! [`Host`] to expose its window list, per-window work areas, and the
//! geometry-change effect, and forwards its move/resize lifecycle signals as
//! [`Notification`] values.

use tilesync_core_geometry::{Rect, WindowId};

/// Identifier of a virtual desktop.
pub type DesktopId = u32;

/// Host-supplied view of one window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    /// Window identity, stable for the window's lifetime.
    pub id: WindowId,
    /// Current window rectangle.
    pub rect: Rect,
    /// Desktop the window belongs to.
    pub desktop: DesktopId,
    /// Whether the window is minimized.
    pub minimized: bool,
}

/// The host window-manager runtime, as seen by the engine.
///
/// All calls are synchronous; the engine invokes them only from within its
/// own notification handlers.
pub trait Host {
    /// All windows currently known to the host, with live geometry.
    fn windows(&self) -> Vec<WindowInfo>;

    /// Usable screen region for the output the window is on.
    fn work_area(&self, window: &WindowInfo) -> Rect;

    /// Request a geometry change on a window.
    fn set_geometry(&mut self, id: WindowId, rect: Rect);
}

/// A lifecycle notification delivered by the host.
///
/// Gesture notifications carry the window whose geometry changed, including
/// its geometry at the time the notification fired.
#[derive(Debug, Clone)]
pub enum Notification {
    /// An interactive move/resize gesture began.
    GestureStarted(WindowInfo),
    /// The gesture changed the window's geometry.
    GestureStep(WindowInfo),
    /// The gesture ended.
    GestureFinished(WindowInfo),
    /// A window appeared.
    WindowAdded(WindowId),
    /// A window disappeared.
    WindowRemoved(WindowId),
}
