use desktop_app_contract::{AppProps, ApplicationId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn clamped_min(self, min: Size) -> Self {
        Self {
            width: self.width.max(min.width),
            height: self.height.max(min.height),
        }
    }

    pub fn fits_min(self, min: Size) -> bool {
        self.width >= min.width && self.height >= min.height
    }
}

/// Top-left position plus size, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    pub position: Point,
    pub size: Size,
}

/// Full browser viewport dimensions, taskbar included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

/// Coarse window mode used by the view layer and the taskbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowMode {
    Normal,
    Minimized,
    Maximized,
}

/// Presentation state of a window.
///
/// Focus only exists on visible windows, so a minimized focused window cannot be expressed.
/// Minimizing a maximized window keeps its pre-maximize geometry so restoring brings it back
/// maximized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowState {
    Normal {
        focused: bool,
    },
    Maximized {
        focused: bool,
        pre_maximize: Geometry,
    },
    Minimized {
        pre_maximize: Option<Geometry>,
    },
}

impl WindowState {
    pub fn mode(self) -> WindowMode {
        match self {
            Self::Normal { .. } => WindowMode::Normal,
            Self::Maximized { .. } => WindowMode::Maximized,
            Self::Minimized { .. } => WindowMode::Minimized,
        }
    }

    pub fn is_focused(self) -> bool {
        match self {
            Self::Normal { focused } | Self::Maximized { focused, .. } => focused,
            Self::Minimized { .. } => false,
        }
    }

    pub fn is_minimized(self) -> bool {
        matches!(self, Self::Minimized { .. })
    }

    /// Whether the window is maximized, including a maximized window that is currently minimized.
    pub fn is_maximized(self) -> bool {
        self.pre_maximize_geometry().is_some()
    }

    pub fn pre_maximize_geometry(self) -> Option<Geometry> {
        match self {
            Self::Normal { .. } => None,
            Self::Maximized { pre_maximize, .. } => Some(pre_maximize),
            Self::Minimized { pre_maximize } => pre_maximize,
        }
    }

    /// Visible state with the given focus, keeping any maximize snapshot.
    pub(crate) fn shown(self, focused: bool) -> Self {
        match self.pre_maximize_geometry() {
            Some(pre_maximize) => Self::Maximized {
                focused,
                pre_maximize,
            },
            None => Self::Normal { focused },
        }
    }

    pub(crate) fn minimized(self) -> Self {
        Self::Minimized {
            pre_maximize: self.pre_maximize_geometry(),
        }
    }

    pub(crate) fn with_focus(self, focused: bool) -> Self {
        match self {
            Self::Minimized { .. } => self,
            visible => visible.shown(focused),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app_id: ApplicationId,
    pub title: String,
    /// Current geometry. While maximized this is the full-viewport geometry.
    pub geometry: Geometry,
    pub z_index: u32,
    pub state: WindowState,
    pub props: AppProps,
}

impl WindowRecord {
    pub fn is_focused(&self) -> bool {
        self.state.is_focused()
    }

    pub fn is_minimized(&self) -> bool {
        self.state.is_minimized()
    }

    pub fn is_maximized(&self) -> bool {
        self.state.is_maximized()
    }

    pub fn mode(&self) -> WindowMode {
        self.state.mode()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: Geometry = Geometry {
        position: Point { x: 40, y: 60 },
        size: Size {
            width: 500,
            height: 300,
        },
    };

    #[test]
    fn minimizing_a_maximized_state_keeps_the_snapshot() {
        let maximized = WindowState::Maximized {
            focused: true,
            pre_maximize: SNAPSHOT,
        };
        let minimized = maximized.minimized();

        assert!(!minimized.is_focused());
        assert!(minimized.is_maximized());
        assert_eq!(minimized.mode(), WindowMode::Minimized);
        assert_eq!(
            minimized.shown(true),
            WindowState::Maximized {
                focused: true,
                pre_maximize: SNAPSHOT,
            }
        );
    }

    #[test]
    fn focus_changes_never_apply_to_minimized_state() {
        let minimized = WindowState::Normal { focused: false }.minimized();
        assert_eq!(minimized.with_focus(true), minimized);
        assert!(!minimized.with_focus(true).is_focused());
    }
}
