//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.
//!
//! The view layer never touches [`WindowRegistry`] directly; it dispatches [`DesktopAction`]
//! values which this module turns into registry operations and gesture-session updates.

use desktop_app_contract::{AppProps, ApplicationId};
use leptos::logging;

use crate::{
    gesture::{DragSession, InteractionState, ResizeEdge, ResizeSession},
    model::{PointerPosition, Viewport, WindowId},
    registry::WindowRegistry,
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`].
pub enum DesktopAction {
    /// Open a new window for an app.
    OpenWindow {
        /// App to mount.
        app_id: ApplicationId,
        /// Props forwarded to the app.
        props: AppProps,
        /// Viewport at the moment of opening.
        viewport: Viewport,
    },
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Focus (and raise) a window by id.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Minimize a window.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Toggle a window between maximized and its previous geometry.
    ToggleMaximize {
        /// Window to toggle.
        window_id: WindowId,
        /// Viewport at the moment of toggling.
        viewport: Viewport,
    },
    /// Un-minimize and focus a window.
    RestoreWindow {
        /// Window to restore.
        window_id: WindowId,
    },
    /// Set a window's top-left position.
    MoveWindow {
        /// Window to move.
        window_id: WindowId,
        /// New left edge.
        x: i32,
        /// New top edge.
        y: i32,
    },
    /// Set a window's size.
    ResizeWindow {
        /// Window to resize.
        window_id: WindowId,
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },
    /// Taskbar entry activation: restore a minimized window, otherwise focus it.
    ActivateTaskbarWindow {
        /// Window associated with the taskbar button.
        window_id: WindowId,
    },
    /// Begin dragging a window by its title bar.
    BeginMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window drag.
    UpdateMove {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window drag.
    EndMove,
    /// Begin resizing a window.
    BeginResize {
        /// Window being resized.
        window_id: WindowId,
        /// Edge or corner being dragged.
        edge: ResizeEdge,
        /// Pointer position at resize start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window resize.
    UpdateResize {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window resize.
    EndResize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Move DOM focus into a window that just became the focused window.
    FocusWindowInput(WindowId),
}

/// Applies a [`DesktopAction`] and returns the side effects it produced.
///
/// Actions that target a missing window change nothing and produce no effects.
pub fn reduce_desktop(
    registry: &mut WindowRegistry,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenWindow {
            app_id,
            props,
            viewport,
        } => {
            let window_id = registry.open_window(app_id, props, viewport);
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        DesktopAction::CloseWindow { window_id } => {
            if interaction.window_id() == Some(window_id) {
                *interaction = InteractionState::Idle;
            }
            if !registry.close_window(window_id) {
                logging::debug_warn!("close ignored for missing window {}", window_id.0);
            }
        }
        DesktopAction::FocusWindow { window_id } => {
            if registry.focus_window(window_id) {
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        DesktopAction::MinimizeWindow { window_id } => {
            if interaction.window_id() == Some(window_id) {
                *interaction = InteractionState::Idle;
            }
            registry.minimize_window(window_id);
        }
        DesktopAction::ToggleMaximize {
            window_id,
            viewport,
        } => {
            registry.maximize_window(window_id, viewport);
        }
        DesktopAction::RestoreWindow { window_id } => {
            if registry.restore_window(window_id) {
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        DesktopAction::MoveWindow { window_id, x, y } => {
            registry.move_window(window_id, x, y);
        }
        DesktopAction::ResizeWindow {
            window_id,
            width,
            height,
        } => {
            registry.resize_window(window_id, width, height);
        }
        DesktopAction::ActivateTaskbarWindow { window_id } => {
            let Some(window) = registry.get_window(window_id) else {
                return effects;
            };
            let changed = if window.is_minimized() {
                registry.restore_window(window_id)
            } else {
                registry.focus_window(window_id)
            };
            if changed {
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        DesktopAction::BeginMove { window_id, pointer } => {
            *interaction = registry
                .get_window(window_id)
                .and_then(|window| DragSession::begin(window, pointer))
                .map(InteractionState::Dragging)
                .unwrap_or_default();
            if !interaction.is_active() {
                logging::debug_warn!("drag not started for window {}", window_id.0);
            }
        }
        DesktopAction::UpdateMove { pointer } => {
            if let InteractionState::Dragging(session) = interaction {
                let position = session.position_at(pointer);
                registry.move_window(session.window_id, position.x, position.y);
            }
        }
        DesktopAction::EndMove => {
            if matches!(interaction, InteractionState::Dragging(_)) {
                *interaction = InteractionState::Idle;
            }
        }
        DesktopAction::BeginResize {
            window_id,
            edge,
            pointer,
        } => {
            *interaction = registry
                .get_window(window_id)
                .and_then(|window| ResizeSession::begin(window, edge, pointer))
                .map(InteractionState::Resizing)
                .unwrap_or_default();
            if !interaction.is_active() {
                logging::debug_warn!("resize not started for window {}", window_id.0);
            }
        }
        DesktopAction::UpdateResize { pointer } => {
            if let InteractionState::Resizing(session) = interaction {
                let min_window = registry.layout().min_window;
                if let Some(next) = session.geometry_at(pointer, min_window) {
                    registry.resize_window(session.window_id, next.size.width, next.size.height);
                    if session.edge.moves_origin() {
                        registry.move_window(session.window_id, next.position.x, next.position.y);
                    }
                }
            }
        }
        DesktopAction::EndResize => {
            if matches!(interaction, InteractionState::Resizing(_)) {
                *interaction = InteractionState::Idle;
            }
        }
    }
    effects
}
