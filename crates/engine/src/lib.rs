//! Tilesync Engine
//!
//! Synchronized edge-tiling of quick-tiled windows.
//!
//! When several windows are snapped to adjacent screen regions so their inner
//! borders touch, resizing one resizes its neighbors in lockstep, and a
//! window dragged away from its tiled position is either restored to its
//! pre-tile size or re-tiled cleanly on release.
//!
//! The engine owns no windows. A host window manager implements [`Host`] and
//! forwards its move/resize lifecycle signals through [`Engine::handle`]; the
//! engine answers with `set_geometry` effects. Tiling topology is inferred
//! from window rectangles alone - no tile tree is kept or persisted.

mod config;
mod host;
mod session;
mod store;

pub use config::{config_paths, Config, ConfigError, ToleranceConfig};
pub use host::{DesktopId, Host, Notification, WindowInfo};
pub use session::{GroupMember, Session};
pub use store::GeometryStore;

pub use tilesync_core_geometry as geometry;

use std::collections::HashMap;

use tilesync_core_geometry::{
    classify, inner_corner, is_quick_tile_size, near, snap_to_edge, tiled_rect, Anchor, Rect,
    WindowId,
};
use tracing::{debug, info};

/// Handle identifying a window's notification subscription.
pub type SubscriptionId = u64;

/// The synchronized edge-tiling engine.
///
/// One instance serves one host event loop; all handlers are synchronous
/// arithmetic over in-memory rectangles. At most one gesture session is
/// active at a time, and a new gesture start always replaces a stale one.
#[derive(Debug, Default)]
pub struct Engine {
    config: Config,
    session: Option<Session>,
    store: GeometryStore,
    subscriptions: HashMap<WindowId, SubscriptionId>,
    next_subscription: SubscriptionId,
}

impl Engine {
    /// Create an engine with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            session: None,
            store: GeometryStore::new(),
            subscriptions: HashMap::new(),
            next_subscription: 0,
        }
    }

    /// Subscribe every window the host currently knows about.
    ///
    /// Called once at startup; windows appearing later are picked up through
    /// [`Notification::WindowAdded`].
    pub fn attach_existing(&mut self, host: &dyn Host) {
        for window in host.windows() {
            self.subscribe(window.id);
        }
    }

    /// Apply one host notification to the engine state.
    ///
    /// This is the single entry point for the host; geometry changes are
    /// requested back through [`Host::set_geometry`].
    pub fn handle(&mut self, host: &mut dyn Host, notification: Notification) {
        match notification {
            Notification::GestureStarted(window) => self.on_gesture_started(&*host, &window),
            Notification::GestureStep(window) => self.on_gesture_step(host, &window),
            Notification::GestureFinished(window) => self.on_gesture_finished(host, &window),
            Notification::WindowAdded(id) => self.subscribe(id),
            Notification::WindowRemoved(id) => self.on_window_removed(id),
        }
    }

    /// Window currently driving a gesture, if any.
    pub fn active_window(&self) -> Option<WindowId> {
        self.session.as_ref().map(|s| s.window)
    }

    /// Whether a pre-tile geometry is saved for `id`.
    pub fn has_saved_geometry(&self, id: WindowId) -> bool {
        self.store.contains(id)
    }

    /// Whether the engine is watching `id`.
    pub fn is_subscribed(&self, id: WindowId) -> bool {
        self.subscriptions.contains_key(&id)
    }

    fn subscribe(&mut self, id: WindowId) {
        if self.subscriptions.contains_key(&id) {
            return;
        }
        self.next_subscription += 1;
        self.subscriptions.insert(id, self.next_subscription);
        debug!("Watching window {} (subscription {})", id, self.next_subscription);
    }

    fn on_window_removed(&mut self, id: WindowId) {
        if self.subscriptions.remove(&id).is_some() {
            debug!("Window {} removed", id);
        }
        // A saved geometry for a destroyed window can never be restored.
        self.store.discard(id);
        // An active group snapshot stays untouched; synchronization skips
        // members it can no longer find in the host's window list.
    }

    fn on_gesture_started(&mut self, host: &dyn Host, window: &WindowInfo) {
        if !self.is_subscribed(window.id) {
            debug!("Ignoring gesture start for unwatched window {}", window.id);
            return;
        }

        // A gesture that never finished (window destroyed mid-drag) leaves a
        // stale session behind; a new start always replaces it.
        self.session = None;

        let work_area = host.work_area(window);
        let edge = classify(window.rect, work_area, self.config.tolerances.screen_edge);
        if !edge.is_tiled() {
            debug!("Saving pre-tile geometry of window {}: {:?}", window.id, window.rect);
            self.store.save(window.id, window.rect);
            return;
        }

        let candidates = desktop_windows(host, window.desktop);
        let group = self.find_group(host, window, &candidates);
        if group.len() <= 1 {
            debug!("Window {} ({:?}) has no tile peers", window.id, edge);
            return;
        }

        info!(
            "Tile gesture started on window {} ({:?}) with {} peers",
            window.id,
            edge,
            group.len() - 1
        );
        self.session = Some(Session {
            window: window.id,
            edge,
            group,
            start_geometry: window.rect,
            work_area,
            suppress_sync: false,
        });
    }

    fn on_gesture_step(&mut self, host: &mut dyn Host, window: &WindowInfo) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.window != window.id || session.suppress_sync {
            return;
        }

        if !session.was_resized(window.rect) {
            // Pure move: stop synchronizing so the window can be pulled
            // loose from its group.
            debug!("Window {} moved without resizing, releasing it from sync", window.id);
            session.suppress_sync = true;
            return;
        }

        let session = session.clone();
        Self::sync_group(host, &session, window);
    }

    fn on_gesture_finished(&mut self, host: &mut dyn Host, window: &WindowInfo) {
        if !self.is_subscribed(window.id) {
            return;
        }

        let is_active = self.session.as_ref().is_some_and(|s| s.window == window.id);
        let own_resize = self.session.as_ref().is_some_and(|s| {
            s.window == window.id && !s.suppress_sync && s.was_resized(window.rect)
        });

        // Reconcile quick-tiling performed by the host's native shortcuts;
        // the engine's own resize path gets its flush snap below instead.
        if !own_resize {
            self.retile_quick_tiled(host, window);
        }

        if !is_active {
            return;
        }

        // The session ends with this gesture no matter which branch runs.
        let Some(session) = self.session.take() else {
            return;
        };

        if !session.suppress_sync && session.was_resized(window.rect) {
            // One final pass so every corner in the group touches, then
            // close the rounding gap toward the work-area boundary.
            Self::sync_group(host, &session, window);
            if let Some(rect) = snap_to_edge(window.rect, session.edge, session.work_area) {
                apply_geometry(host, window.id, rect);
            }
        } else {
            let tolerance = self.config.tolerances.move_accident;
            if near(window.rect.x, session.start_geometry.x, tolerance)
                && near(window.rect.y, session.start_geometry.y, tolerance)
            {
                info!("Reverting accidental move of window {}", window.id);
                apply_geometry(host, window.id, session.start_geometry);
            } else if let Some(saved) = self.store.take(window.id) {
                // The host exposes no pointer position, so the restored
                // frame is anchored at the drop position, clamped to
                // non-negative coordinates.
                let restored = Rect::new(
                    window.rect.x.max(0),
                    window.rect.y.max(0),
                    saved.width,
                    saved.height,
                );
                info!("Restoring pre-tile geometry of window {}: {:?}", window.id, restored);
                apply_geometry(host, window.id, restored);
            }
        }
    }

    /// Windows on `window`'s desktop whose inner corners coincide with its
    /// own, each paired with its classified edge.
    ///
    /// The result includes `window` itself when its corner is defined;
    /// synchronization excludes the master by identity. Each candidate is
    /// classified against its own work area.
    fn find_group(
        &self,
        host: &dyn Host,
        window: &WindowInfo,
        candidates: &[WindowInfo],
    ) -> Vec<GroupMember> {
        let tolerances = &self.config.tolerances;

        let work_area = host.work_area(window);
        let edge = classify(window.rect, work_area, tolerances.screen_edge);
        let Some(reference) = inner_corner(window.rect, edge) else {
            return Vec::new();
        };

        let mut group = Vec::new();
        for candidate in candidates {
            let area = host.work_area(candidate);
            let edge = classify(candidate.rect, area, tolerances.screen_edge);
            let Some(corner) = inner_corner(candidate.rect, edge) else {
                continue;
            };
            if corner.near(reference, tolerances.client_snap) {
                group.push(GroupMember { id: candidate.id, edge });
            }
        }
        group
    }

    /// Re-tile a window the host itself quick-tiled (native shortcut or edge
    /// drag), so it meets the group it landed next to without a gap.
    fn retile_quick_tiled(&self, host: &mut dyn Host, window: &WindowInfo) {
        let work_area = host.work_area(window);
        if !is_quick_tile_size(window.rect, work_area, self.config.tolerances.quick_tile) {
            return;
        }

        let edge = classify(window.rect, work_area, self.config.tolerances.screen_edge);
        let anchor = self.center_point(host, window, work_area);
        if let Some(rect) = tiled_rect(window.rect, edge, anchor, work_area) {
            debug!("Re-tiling quick-tiled window {} as {:?}", window.id, edge);
            apply_geometry(host, window.id, rect);
        }
    }

    /// Shared reference point for re-tiling: the inner corner of the largest
    /// tile group on the window's desktop, the window itself excluded as
    /// seed. Falls back to the work-area center when no group exists.
    fn center_point(&self, host: &dyn Host, window: &WindowInfo, work_area: Rect) -> Anchor {
        let half_height = work_area.height / 2;
        let candidates = desktop_windows(host, window.desktop);

        let mut best: Vec<GroupMember> = Vec::new();
        for candidate in candidates.iter().filter(|c| c.id != window.id) {
            let group = self.find_group(host, candidate, &candidates);
            if group.len() > best.len() {
                best = group;
            }
        }

        let anchor = best.first().and_then(|member| {
            candidates
                .iter()
                .find(|c| c.id == member.id)
                .and_then(|c| inner_corner(c.rect, member.edge))
        });

        match anchor {
            // Side-tiled anchors carry no vertical constraint; center
            // vertically instead.
            Some(a) => Anchor::new(a.x, a.y.unwrap_or(half_height)),
            None => Anchor::new(work_area.width / 2, half_height),
        }
    }

    /// Recompute and apply every peer's rectangle around the master's new
    /// inner corner. Peer geometry is read live from the host; members gone
    /// mid-gesture are skipped.
    fn sync_group(host: &mut dyn Host, session: &Session, master: &WindowInfo) {
        let Some(anchor) = inner_corner(master.rect, session.edge) else {
            return;
        };

        let live: HashMap<WindowId, Rect> = host
            .windows()
            .into_iter()
            .map(|w| (w.id, w.rect))
            .collect();

        for member in &session.group {
            if member.id == master.id {
                continue;
            }
            let Some(&current) = live.get(&member.id) else {
                debug!("Group member {} vanished mid-gesture, skipping", member.id);
                continue;
            };
            if let Some(rect) = tiled_rect(current, member.edge, anchor, session.work_area) {
                apply_geometry(host, member.id, rect);
            }
        }
    }
}

/// Non-minimized windows belonging to one desktop.
fn desktop_windows(host: &dyn Host, desktop: DesktopId) -> Vec<WindowInfo> {
    host.windows()
        .into_iter()
        .filter(|w| !w.minimized && w.desktop == desktop)
        .collect()
}

/// Apply a computed placement, dropping degenerate rectangles instead of
/// clamping them.
fn apply_geometry(host: &mut dyn Host, id: WindowId, rect: Rect) {
    if !rect.is_valid_placement() {
        debug!("Dropping degenerate placement {:?} for window {}", rect, id);
        return;
    }
    host.set_geometry(id, rect);
}
