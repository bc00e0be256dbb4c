//! Gesture scenarios driven through the public engine API.
//!
//! These tests script full move/resize gestures against a mock host and
//! verify the geometry effects the engine requests back:
//! - Synchronized resizing of side and quarter tile groups
//! - Flush snapping after the gesture finishes
//! - Accidental-move reverts and pre-tile geometry restoration
//! - Re-tiling of windows quick-tiled by the host itself

use tilesync_core_geometry::{Rect, WindowId};
use tilesync_engine::{Config, Engine, Host, Notification, WindowInfo};

/// Work area used by most scenarios.
const AREA: Rect = Rect { x: 0, y: 0, width: 1000, height: 800 };

/// Scripted host double: a flat window list, one work area, and a record of
/// every geometry change the engine requests.
struct MockHost {
    windows: Vec<WindowInfo>,
    work_area: Rect,
    applied: Vec<(WindowId, Rect)>,
}

impl MockHost {
    fn new(work_area: Rect) -> Self {
        Self { windows: Vec::new(), work_area, applied: Vec::new() }
    }

    fn add(&mut self, id: WindowId, rect: Rect) -> WindowInfo {
        let window = WindowInfo { id, rect, desktop: 1, minimized: false };
        self.windows.push(window.clone());
        window
    }

    fn window(&self, id: WindowId) -> WindowInfo {
        self.windows.iter().find(|w| w.id == id).unwrap().clone()
    }

    /// The host itself moves a window (user drag, native quick-tile), then
    /// returns the updated view to pass along with a notification.
    fn move_window(&mut self, id: WindowId, rect: Rect) -> WindowInfo {
        self.windows.iter_mut().find(|w| w.id == id).unwrap().rect = rect;
        self.window(id)
    }
}

impl Host for MockHost {
    fn windows(&self) -> Vec<WindowInfo> {
        self.windows.clone()
    }

    fn work_area(&self, _window: &WindowInfo) -> Rect {
        self.work_area
    }

    fn set_geometry(&mut self, id: WindowId, rect: Rect) {
        if let Some(w) = self.windows.iter_mut().find(|w| w.id == id) {
            w.rect = rect;
        }
        self.applied.push((id, rect));
    }
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn engine_for(host: &MockHost) -> Engine {
    init_logging();
    let mut engine = Engine::new(Config::default());
    engine.attach_existing(host);
    engine
}

// ============================================================================
// Group detection
// ============================================================================

/// Two half-screen windows share the inner corner (500, -) and group up;
/// grouping is symmetric between them.
#[test]
fn test_side_pair_groups_from_either_window() {
    let mut host = MockHost::new(AREA);
    let left = host.add(1, Rect::new(0, 0, 500, 800));
    let right = host.add(2, Rect::new(500, 0, 500, 800));
    let mut engine = engine_for(&host);

    engine.handle(&mut host, Notification::GestureStarted(left.clone()));
    assert_eq!(engine.active_window(), Some(1));
    engine.handle(&mut host, Notification::GestureFinished(left));

    engine.handle(&mut host, Notification::GestureStarted(right));
    assert_eq!(engine.active_window(), Some(2));
}

// ============================================================================
// Synchronized resize
// ============================================================================

/// Widening a Left master to 600 must set the Right peer to {600,0,400,800}.
#[test]
fn test_left_master_resize_moves_right_peer() {
    let mut host = MockHost::new(AREA);
    let left = host.add(1, Rect::new(0, 0, 500, 800));
    host.add(2, Rect::new(500, 0, 500, 800));
    let mut engine = engine_for(&host);

    engine.handle(&mut host, Notification::GestureStarted(left));

    let step = host.move_window(1, Rect::new(0, 0, 600, 800));
    engine.handle(&mut host, Notification::GestureStep(step));

    assert_eq!(host.window(2).rect, Rect::new(600, 0, 400, 800));
}

/// A side-tiled master constrains quarter peers only along the shared
/// x-axis; their rows stay where they are.
#[test]
fn test_side_master_keeps_quarter_peer_rows() {
    let mut host = MockHost::new(AREA);
    let left = host.add(1, Rect::new(0, 0, 500, 800));
    host.add(2, Rect::new(500, 0, 500, 400));
    host.add(3, Rect::new(500, 400, 500, 400));
    let mut engine = engine_for(&host);

    engine.handle(&mut host, Notification::GestureStarted(left));

    let step = host.move_window(1, Rect::new(0, 0, 550, 800));
    engine.handle(&mut host, Notification::GestureStep(step));

    assert_eq!(host.window(2).rect, Rect::new(550, 0, 450, 400));
    assert_eq!(host.window(3).rect, Rect::new(550, 400, 450, 400));
}

/// Finishing a resize runs one last sync pass and snaps the master flush
/// against the work-area boundary.
#[test]
fn test_resize_finish_snaps_master_flush() {
    let mut host = MockHost::new(AREA);
    let left = host.add(1, Rect::new(0, 0, 500, 800));
    host.add(2, Rect::new(500, 0, 500, 800));
    let mut engine = engine_for(&host);

    engine.handle(&mut host, Notification::GestureStarted(left));

    // The interactive resize left the master a few pixels off the boundary
    let finish = host.move_window(1, Rect::new(2, 1, 601, 797));
    engine.handle(&mut host, Notification::GestureFinished(finish));

    assert_eq!(host.window(2).rect, Rect::new(603, 0, 397, 800));
    assert_eq!(host.window(1).rect, Rect::new(0, 0, 603, 800));
    assert_eq!(engine.active_window(), None);
}

/// A TopLeft master's final rectangle must keep its bottom-right corner on
/// the group's shared point, leaving no gap to any quarter peer.
#[test]
fn test_quarter_master_finish_closes_gaps() {
    let mut host = MockHost::new(AREA);
    let top_left = host.add(1, Rect::new(0, 0, 500, 400));
    host.add(2, Rect::new(500, 0, 500, 400));
    host.add(3, Rect::new(0, 400, 500, 400));
    host.add(4, Rect::new(500, 400, 500, 400));
    let mut engine = engine_for(&host);

    engine.handle(&mut host, Notification::GestureStarted(top_left));

    let finish = host.move_window(1, Rect::new(0, 0, 600, 300));
    engine.handle(&mut host, Notification::GestureFinished(finish));

    let master = host.window(1).rect;
    assert_eq!((master.right(), master.bottom()), (600, 300));
    assert_eq!(host.window(2).rect, Rect::new(600, 0, 400, 300));
    assert_eq!(host.window(3).rect, Rect::new(0, 300, 600, 500));
    assert_eq!(host.window(4).rect, Rect::new(600, 300, 400, 500));
}

/// Shrinking the master so far that a peer would collapse must leave the
/// peer untouched rather than apply a degenerate rectangle.
#[test]
fn test_degenerate_peer_placement_is_rejected() {
    let mut host = MockHost::new(AREA);
    let left = host.add(1, Rect::new(0, 0, 500, 800));
    host.add(2, Rect::new(500, 0, 500, 800));
    let mut engine = engine_for(&host);

    engine.handle(&mut host, Notification::GestureStarted(left));

    let step = host.move_window(1, Rect::new(0, 0, 1000, 800));
    host.applied.clear();
    engine.handle(&mut host, Notification::GestureStep(step));

    assert!(host.applied.is_empty());
    assert_eq!(host.window(2).rect, Rect::new(500, 0, 500, 800));
}

// ============================================================================
// Move finalization
// ============================================================================

/// A drop within the accident tolerance reverts the window to exactly its
/// starting rectangle.
#[test]
fn test_accidental_move_reverts_to_start() {
    // Work area chosen so {100,100,300,200} is a Left tile
    let area = Rect::new(100, 100, 600, 200);
    let mut host = MockHost::new(area);
    let left = host.add(1, Rect::new(100, 100, 300, 200));
    host.add(2, Rect::new(400, 100, 300, 200));
    let mut engine = engine_for(&host);

    engine.handle(&mut host, Notification::GestureStarted(left));

    let step = host.move_window(1, Rect::new(103, 101, 300, 200));
    engine.handle(&mut host, Notification::GestureStep(step));

    let finish = host.move_window(1, Rect::new(105, 102, 300, 200));
    engine.handle(&mut host, Notification::GestureFinished(finish));

    assert_eq!(host.window(1).rect, Rect::new(100, 100, 300, 200));
    assert_eq!(engine.active_window(), None);
}

/// Dragging a tiled window far away restores its saved pre-tile geometry,
/// anchored at the drop position.
#[test]
fn test_drag_away_restores_pre_tile_geometry() {
    let mut host = MockHost::new(AREA);
    host.add(1, Rect::new(0, 0, 500, 800));
    let floating = host.add(2, Rect::new(600, 100, 300, 200));
    let mut engine = engine_for(&host);

    // Dragging the floating window saves its geometry first
    engine.handle(&mut host, Notification::GestureStarted(floating));
    assert!(engine.has_saved_geometry(2));

    // The host quick-tiles it into the right half during the drag
    let finish = host.move_window(2, Rect::new(500, 0, 500, 800));
    engine.handle(&mut host, Notification::GestureFinished(finish));
    assert_eq!(host.window(2).rect, Rect::new(500, 0, 500, 800));

    // Now drag it back out: pure-move steps release it from sync
    let start = host.window(2);
    engine.handle(&mut host, Notification::GestureStarted(start));
    assert_eq!(engine.active_window(), Some(2));

    let step = host.move_window(2, Rect::new(300, 250, 500, 800));
    engine.handle(&mut host, Notification::GestureStep(step));

    let finish = host.move_window(2, Rect::new(320, 260, 500, 800));
    engine.handle(&mut host, Notification::GestureFinished(finish));

    assert_eq!(host.window(2).rect, Rect::new(320, 260, 300, 200));
    assert!(!engine.has_saved_geometry(2));
    // The untouched peer keeps its tile
    assert_eq!(host.window(1).rect, Rect::new(0, 0, 500, 800));
}

/// A restored geometry is never placed at negative coordinates.
#[test]
fn test_restore_clamps_negative_drop_position() {
    let mut host = MockHost::new(AREA);
    host.add(1, Rect::new(0, 0, 500, 800));
    let floating = host.add(2, Rect::new(600, 100, 300, 200));
    let mut engine = engine_for(&host);

    engine.handle(&mut host, Notification::GestureStarted(floating));
    let finish = host.move_window(2, Rect::new(500, 0, 500, 800));
    engine.handle(&mut host, Notification::GestureFinished(finish));

    let start = host.window(2);
    engine.handle(&mut host, Notification::GestureStarted(start));
    let step = host.move_window(2, Rect::new(-150, 300, 500, 800));
    engine.handle(&mut host, Notification::GestureStep(step));
    let finish = host.move_window(2, Rect::new(-150, 300, 500, 800));
    engine.handle(&mut host, Notification::GestureFinished(finish));

    assert_eq!(host.window(2).rect, Rect::new(0, 300, 300, 200));
}

/// Without a saved geometry, a window dragged away but still carrying a
/// quick-tile footprint keeps its dropped position (no restore to apply).
#[test]
fn test_drag_away_without_saved_geometry() {
    let mut host = MockHost::new(AREA);
    host.add(1, Rect::new(0, 0, 500, 800));
    let right = host.add(2, Rect::new(500, 0, 500, 800));
    let mut engine = engine_for(&host);

    engine.handle(&mut host, Notification::GestureStarted(right));
    let step = host.move_window(2, Rect::new(250, 200, 500, 800));
    engine.handle(&mut host, Notification::GestureStep(step));
    let finish = host.move_window(2, Rect::new(250, 200, 500, 800));
    host.applied.clear();
    engine.handle(&mut host, Notification::GestureFinished(finish));

    // Dropped mid-screen the window classifies as floating: no re-tile, no
    // restore, no revert
    assert!(host.applied.is_empty());
    assert_eq!(host.window(2).rect, Rect::new(250, 200, 500, 800));
}

// ============================================================================
// External quick-tile reconciliation
// ============================================================================

/// A window quick-tiled by the host's own shortcut is re-tiled onto the
/// existing group's shared corner.
#[test]
fn test_external_quick_tile_joins_existing_group() {
    let mut host = MockHost::new(AREA);
    host.add(1, Rect::new(0, 0, 600, 800));
    host.add(2, Rect::new(600, 0, 400, 800));
    host.add(3, Rect::new(700, 200, 250, 250));
    let mut engine = engine_for(&host);

    // The host snaps window 3 into the plain right half; the existing group
    // meets at x=600, so the engine pulls the newcomer onto that seam
    let finish = host.move_window(3, Rect::new(500, 0, 500, 800));
    engine.handle(&mut host, Notification::GestureFinished(finish));

    assert_eq!(host.window(3).rect, Rect::new(600, 0, 400, 800));
}

/// With no group to join, an externally quick-tiled window aligns to the
/// work-area center.
#[test]
fn test_external_quick_tile_without_group_uses_center() {
    let mut host = MockHost::new(AREA);
    host.add(1, Rect::new(0, 0, 500, 800));
    let mut engine = engine_for(&host);

    let finish = host.move_window(1, Rect::new(3, 0, 497, 800));
    engine.handle(&mut host, Notification::GestureFinished(finish));

    assert_eq!(host.window(1).rect, Rect::new(0, 0, 500, 800));
}

/// A finish for a window that is neither active nor quick-tile sized does
/// nothing at all.
#[test]
fn test_unrelated_finish_is_inert() {
    let mut host = MockHost::new(AREA);
    let floating = host.add(1, Rect::new(100, 100, 300, 200));
    let mut engine = engine_for(&host);

    host.applied.clear();
    engine.handle(&mut host, Notification::GestureFinished(floating));

    assert!(host.applied.is_empty());
}
