//! Short-lived pointer gesture sessions for window drag and resize.
//!
//! A session captures the pointer and window geometry at gesture start. Every move event is
//! resolved against that baseline, never against the previous frame, so fast pointer motion
//! cannot accumulate drift.

use serde::{Deserialize, Serialize};

use crate::model::{Geometry, Point, PointerPosition, Size, WindowId, WindowRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 8] = [
        ResizeEdge::North,
        ResizeEdge::South,
        ResizeEdge::East,
        ResizeEdge::West,
        ResizeEdge::NorthEast,
        ResizeEdge::NorthWest,
        ResizeEdge::SouthEast,
        ResizeEdge::SouthWest,
    ];

    pub fn has_north(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    pub fn has_south(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }

    pub fn has_east(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    pub fn has_west(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    /// Whether resizing from this edge also moves the window's top-left corner.
    pub fn moves_origin(self) -> bool {
        self.has_north() || self.has_west()
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::North => "edge-n",
            Self::South => "edge-s",
            Self::East => "edge-e",
            Self::West => "edge-w",
            Self::NorthEast => "edge-ne",
            Self::NorthWest => "edge-nw",
            Self::SouthEast => "edge-se",
            Self::SouthWest => "edge-sw",
        }
    }
}

fn draggable(window: &WindowRecord) -> bool {
    !window.is_maximized() && !window.is_minimized()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub origin: Point,
}

impl DragSession {
    /// Starts a drag, or `None` when the window cannot be dragged in its current mode.
    pub fn begin(window: &WindowRecord, pointer: PointerPosition) -> Option<Self> {
        draggable(window).then(|| Self {
            window_id: window.id,
            pointer_start: pointer,
            origin: window.geometry.position,
        })
    }

    /// Window position for the given pointer, relative to the gesture baseline.
    pub fn position_at(&self, pointer: PointerPosition) -> Point {
        Point {
            x: self.origin.x + pointer.x - self.pointer_start.x,
            y: self.origin.y + pointer.y - self.pointer_start.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub edge: ResizeEdge,
    pub pointer_start: PointerPosition,
    pub start: Geometry,
}

impl ResizeSession {
    pub fn begin(window: &WindowRecord, edge: ResizeEdge, pointer: PointerPosition) -> Option<Self> {
        draggable(window).then(|| Self {
            window_id: window.id,
            edge,
            pointer_start: pointer,
            start: window.geometry,
        })
    }

    /// Geometry for the given pointer, or `None` when it would fall below `min`.
    ///
    /// Frames under the floor are rejected rather than clamped, so a west/north drag past the
    /// floor does not shove the window sideways.
    pub fn geometry_at(&self, pointer: PointerPosition, min: Size) -> Option<Geometry> {
        let dx = pointer.x - self.pointer_start.x;
        let dy = pointer.y - self.pointer_start.y;
        let mut next = self.start;

        if self.edge.has_east() {
            next.size.width += dx;
        }
        if self.edge.has_west() {
            next.size.width -= dx;
            next.position.x += dx;
        }
        if self.edge.has_south() {
            next.size.height += dy;
        }
        if self.edge.has_north() {
            next.size.height -= dy;
            next.position.y += dy;
        }

        next.size.fits_min(min).then_some(next)
    }
}

/// The single in-flight pointer gesture, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging(DragSession),
    Resizing(ResizeSession),
}

impl InteractionState {
    pub fn window_id(&self) -> Option<WindowId> {
        match self {
            Self::Idle => None,
            Self::Dragging(session) => Some(session.window_id),
            Self::Resizing(session) => Some(session.window_id),
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Recognizes two activations of the same target within a time threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleTapDetector<K> {
    threshold_ms: f64,
    last: Option<(K, f64)>,
}

impl<K: PartialEq> DoubleTapDetector<K> {
    pub fn new(threshold_ms: u32) -> Self {
        Self {
            threshold_ms: f64::from(threshold_ms),
            last: None,
        }
    }

    /// Records a tap on `target` at `now_ms`; returns `true` when it completes a double tap.
    pub fn tap(&mut self, target: K, now_ms: f64) -> bool {
        let is_double = matches!(
            &self.last,
            Some((last_target, last_ms))
                if *last_target == target && now_ms - last_ms <= self.threshold_ms
        );
        self.last = if is_double { None } else { Some((target, now_ms)) };
        is_double
    }
}

/// Double activations from both input paths on one element.
///
/// Touch double taps are recognised on `pointerup`. Browsers may also synthesize a `dblclick` for
/// the same two taps, so `dblclick` only counts while the last pointer was a mouse.
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleActivation<K> {
    taps: DoubleTapDetector<K>,
    last_pointer_touch: bool,
}

impl<K: PartialEq> DoubleActivation<K> {
    pub fn new(threshold_ms: u32) -> Self {
        Self {
            taps: DoubleTapDetector::new(threshold_ms),
            last_pointer_touch: false,
        }
    }

    /// Records a `pointerup`; returns `true` when it completes a touch double tap.
    pub fn pointer_up(&mut self, target: K, touch_like: bool, now_ms: f64) -> bool {
        self.last_pointer_touch = touch_like;
        touch_like && self.taps.tap(target, now_ms)
    }

    /// Whether a `dblclick` should be acted on.
    pub fn double_click(&self) -> bool {
        !self.last_pointer_touch
    }
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::{AppProps, ApplicationId};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::WindowState;

    const MIN: Size = Size {
        width: 300,
        height: 200,
    };

    fn record(state: WindowState) -> WindowRecord {
        WindowRecord {
            id: WindowId(7),
            app_id: ApplicationId::trusted("writer"),
            title: "Writer".to_string(),
            geometry: Geometry {
                position: Point { x: 50, y: 50 },
                size: Size {
                    width: 400,
                    height: 300,
                },
            },
            z_index: 1,
            state,
            props: AppProps::new(),
        }
    }

    fn at(x: i32, y: i32) -> PointerPosition {
        PointerPosition { x, y }
    }

    #[test]
    fn drag_is_relative_to_gesture_baseline() {
        let window = record(WindowState::Normal { focused: true });
        let session = DragSession::begin(&window, at(100, 100)).unwrap();

        assert_eq!(session.position_at(at(500, 20)), Point { x: 450, y: -30 });
        assert_eq!(session.position_at(at(130, 70)), Point { x: 80, y: 20 });
    }

    #[test]
    fn maximized_and_minimized_windows_cannot_start_gestures() {
        let maximized = record(WindowState::Maximized {
            focused: true,
            pre_maximize: record(WindowState::Normal { focused: true }).geometry,
        });
        let minimized = record(WindowState::Minimized { pre_maximize: None });

        assert_eq!(DragSession::begin(&maximized, at(0, 0)), None);
        assert_eq!(
            ResizeSession::begin(&maximized, ResizeEdge::East, at(0, 0)),
            None
        );
        assert_eq!(DragSession::begin(&minimized, at(0, 0)), None);
    }

    #[test]
    fn west_resize_keeps_right_edge_fixed() {
        let window = record(WindowState::Normal { focused: true });
        let session = ResizeSession::begin(&window, ResizeEdge::West, at(50, 200)).unwrap();
        let next = session.geometry_at(at(30, 260), MIN).unwrap();

        assert_eq!(next.position, Point { x: 30, y: 50 });
        assert_eq!(
            next.size,
            Size {
                width: 420,
                height: 300,
            }
        );
        assert_eq!(next.position.x + next.size.width, 450);
    }

    #[test]
    fn corner_resize_composes_both_axes() {
        let window = record(WindowState::Normal { focused: true });
        let north_west = ResizeSession::begin(&window, ResizeEdge::NorthWest, at(0, 0)).unwrap();
        let south_east = ResizeSession::begin(&window, ResizeEdge::SouthEast, at(0, 0)).unwrap();

        assert_eq!(
            north_west.geometry_at(at(-10, -20), MIN),
            Some(Geometry {
                position: Point { x: 40, y: 30 },
                size: Size {
                    width: 410,
                    height: 320,
                },
            })
        );
        assert_eq!(
            south_east.geometry_at(at(25, 35), MIN),
            Some(Geometry {
                position: Point { x: 50, y: 50 },
                size: Size {
                    width: 425,
                    height: 335,
                },
            })
        );
    }

    #[test]
    fn frames_below_floor_are_rejected_not_clamped() {
        let window = record(WindowState::Normal { focused: true });
        let session = ResizeSession::begin(&window, ResizeEdge::East, at(0, 0)).unwrap();

        assert_eq!(session.geometry_at(at(-101, 0), MIN), None);
        assert_eq!(
            session.geometry_at(at(-100, 0), MIN).map(|g| g.size.width),
            Some(300)
        );
    }

    #[test]
    fn edge_flags_are_independent() {
        for edge in ResizeEdge::ALL {
            assert!(!(edge.has_east() && edge.has_west()));
            assert!(!(edge.has_north() && edge.has_south()));
        }
        assert!(ResizeEdge::NorthEast.moves_origin());
        assert!(!ResizeEdge::SouthEast.moves_origin());
    }

    #[test]
    fn double_tap_requires_same_target_within_threshold() {
        let mut detector = DoubleTapDetector::new(300);

        assert!(!detector.tap("writer", 1_000.0));
        assert!(detector.tap("writer", 1_250.0));
        assert!(!detector.tap("writer", 1_300.0));
        assert!(!detector.tap("mail", 1_400.0));
        assert!(!detector.tap("writer", 1_450.0));
        assert!(!detector.tap("writer", 1_800.0));
    }

    #[test]
    fn touch_double_tap_fires_once_and_suppresses_the_synthesized_dblclick() {
        let mut activation = DoubleActivation::new(300);

        assert!(!activation.pointer_up((), true, 1_000.0));
        assert!(activation.pointer_up((), true, 1_150.0));
        assert!(!activation.double_click());
    }

    #[test]
    fn mouse_dblclick_counts_after_earlier_touch_input() {
        let mut activation = DoubleActivation::new(300);
        activation.pointer_up((), true, 0.0);

        assert!(!activation.pointer_up((), false, 5_000.0));
        assert!(!activation.pointer_up((), false, 5_100.0));
        assert!(activation.double_click());
    }

    #[test]
    fn mouse_pointerups_never_complete_a_tap() {
        let mut activation = DoubleActivation::new(300);

        assert!(!activation.pointer_up("writer", false, 0.0));
        assert!(!activation.pointer_up("writer", true, 100.0));
        assert!(activation.pointer_up("writer", true, 200.0));
    }
}
