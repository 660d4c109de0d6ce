//! Browser desktop window manager: window registry, gesture sessions, the reducer that drives
//! them, and the Leptos shell that renders windows, icons, and the taskbar.

pub mod apps;
pub mod components;
pub mod config;
mod effect_executor;
pub mod geometry;
pub mod gesture;
pub mod host;
pub mod model;
pub mod reducer;
pub mod registry;
mod runtime_context;

pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use config::{ConfigError, LayoutConfig, ShellConfig};
pub use gesture::{InteractionState, ResizeEdge};
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, RuntimeEffect};
pub use registry::WindowRegistry;
