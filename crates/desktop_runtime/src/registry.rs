//! Authoritative window store: records, focus, and the z-index pool.
//!
//! [`WindowRegistry`] is the only writer of [`WindowRecord`] values. Callers read through shared
//! references and mutate through the operations below, which keep these invariants:
//!
//! - at most one record is focused, and a minimized record is never focused;
//! - z-indexes come from a counter that only grows, so they are unique for the session;
//! - window ids are never reused, even after a close.
//!
//! Every operation on an unknown id is a silent no-op and reports `false`, because a gesture may
//! still be delivering events for a window that has just closed.

use desktop_app_contract::{AppProps, ApplicationId};

use crate::{
    apps,
    config::LayoutConfig,
    geometry::{compute_initial_geometry, maximized_geometry},
    model::{Geometry, Point, Size, Viewport, WindowId, WindowRecord, WindowState},
};

#[derive(Debug, Clone, PartialEq)]
pub struct WindowRegistry {
    windows: Vec<WindowRecord>,
    next_window_id: u64,
    next_z_index: u32,
    layout: LayoutConfig,
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl WindowRegistry {
    pub fn new(layout: LayoutConfig) -> Self {
        Self {
            windows: Vec::new(),
            next_window_id: 1,
            next_z_index: 1,
            layout,
        }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// All records in creation order, minimized ones included.
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    /// Records that should be rendered.
    pub fn visible_windows(&self) -> impl Iterator<Item = &WindowRecord> {
        self.windows.iter().filter(|w| !w.is_minimized())
    }

    pub fn get_window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    pub fn focused_window_id(&self) -> Option<WindowId> {
        self.windows.iter().find(|w| w.is_focused()).map(|w| w.id)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Opens a new focused window for `app_id` on top of the stack and returns its id.
    pub fn open_window(
        &mut self,
        app_id: ApplicationId,
        props: AppProps,
        viewport: Viewport,
    ) -> WindowId {
        let id = WindowId(self.next_window_id);
        self.next_window_id = self.next_window_id.saturating_add(1);

        let geometry = compute_initial_geometry(viewport, &app_id, self.windows.len(), &self.layout);
        let title = props
            .title()
            .map(str::to_string)
            .unwrap_or_else(|| apps::default_title(&app_id));

        self.unfocus_all();
        let z_index = self.take_z_index();
        self.windows.push(WindowRecord {
            id,
            app_id,
            title,
            geometry,
            z_index,
            state: WindowState::Normal { focused: true },
            props,
        });
        id
    }

    /// Removes a window, handing focus to the topmost visible survivor if it held focus.
    pub fn close_window(&mut self, window_id: WindowId) -> bool {
        let Some(index) = self.index_of(window_id) else {
            return false;
        };
        let removed = self.windows.remove(index);
        if removed.is_focused() {
            self.focus_topmost_visible();
        }
        true
    }

    /// Focuses and raises a window, restoring it if minimized.
    ///
    /// Focusing the already-focused window changes nothing, including its z-index.
    pub fn focus_window(&mut self, window_id: WindowId) -> bool {
        let Some(index) = self.index_of(window_id) else {
            return false;
        };
        if self.windows[index].is_focused() {
            return false;
        }

        self.unfocus_all();
        let z_index = self.take_z_index();
        let window = &mut self.windows[index];
        window.state = window.state.shown(true);
        window.z_index = z_index;
        true
    }

    /// Minimizes a window; if it held focus, the topmost visible remaining window takes over.
    pub fn minimize_window(&mut self, window_id: WindowId) -> bool {
        let Some(index) = self.index_of(window_id) else {
            return false;
        };
        let window = &mut self.windows[index];
        if window.is_minimized() {
            return false;
        }
        let was_focused = window.is_focused();
        window.state = window.state.minimized();
        if was_focused {
            self.focus_topmost_visible();
        }
        true
    }

    /// Toggles maximize.
    ///
    /// Entering snapshots the current geometry and fills the viewport above the taskbar; leaving
    /// puts the snapshot back exactly. Focus and z-order are untouched. On a minimized window the
    /// toggle applies to the state it will come back in.
    pub fn maximize_window(&mut self, window_id: WindowId, viewport: Viewport) -> bool {
        let full = maximized_geometry(viewport, &self.layout);
        let Some(window) = self.window_mut(window_id) else {
            return false;
        };

        window.state = match window.state {
            WindowState::Normal { focused } => {
                let pre_maximize = window.geometry;
                window.geometry = full;
                WindowState::Maximized {
                    focused,
                    pre_maximize,
                }
            }
            WindowState::Maximized {
                focused,
                pre_maximize,
            } => {
                window.geometry = pre_maximize;
                WindowState::Normal { focused }
            }
            WindowState::Minimized {
                pre_maximize: Some(pre_maximize),
            } => {
                window.geometry = pre_maximize;
                WindowState::Minimized { pre_maximize: None }
            }
            WindowState::Minimized { pre_maximize: None } => {
                let pre_maximize = window.geometry;
                window.geometry = full;
                WindowState::Minimized {
                    pre_maximize: Some(pre_maximize),
                }
            }
        };
        true
    }

    /// Un-minimizes and focuses a window. A maximized window comes back maximized.
    pub fn restore_window(&mut self, window_id: WindowId) -> bool {
        let Some(index) = self.index_of(window_id) else {
            return false;
        };
        let was_minimized = self.windows[index].is_minimized();
        let focused = self.focus_window(window_id);
        was_minimized || focused
    }

    /// Moves a non-maximized window's top-left corner.
    pub fn move_window(&mut self, window_id: WindowId, x: i32, y: i32) -> bool {
        let Some(window) = self.window_mut(window_id) else {
            return false;
        };
        if window.is_maximized() {
            return false;
        }
        let position = Point { x, y };
        if window.geometry.position == position {
            return false;
        }
        window.geometry.position = position;
        true
    }

    /// Resizes a non-maximized window, clamping to the configured minimum size.
    pub fn resize_window(&mut self, window_id: WindowId, width: i32, height: i32) -> bool {
        let min_window = self.layout.min_window;
        let Some(window) = self.window_mut(window_id) else {
            return false;
        };
        if window.is_maximized() {
            return false;
        }
        let size = Size { width, height }.clamped_min(min_window);
        if window.geometry.size == size {
            return false;
        }
        window.geometry.size = size;
        true
    }

    /// Geometry a window would return to when restored from maximize.
    pub fn restore_geometry(&self, window_id: WindowId) -> Option<Geometry> {
        self.get_window(window_id)
            .and_then(|w| w.state.pre_maximize_geometry())
    }

    fn index_of(&self, window_id: WindowId) -> Option<usize> {
        self.windows.iter().position(|w| w.id == window_id)
    }

    fn window_mut(&mut self, window_id: WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.id == window_id)
    }

    fn take_z_index(&mut self) -> u32 {
        let z_index = self.next_z_index;
        self.next_z_index = self.next_z_index.saturating_add(1);
        z_index
    }

    fn unfocus_all(&mut self) {
        for window in &mut self.windows {
            window.state = window.state.with_focus(false);
        }
    }

    fn focus_topmost_visible(&mut self) {
        self.unfocus_all();
        if let Some(topmost) = self
            .windows
            .iter_mut()
            .filter(|w| !w.is_minimized())
            .max_by_key(|w| w.z_index)
        {
            topmost.state = topmost.state.with_focus(true);
        }
    }
}
