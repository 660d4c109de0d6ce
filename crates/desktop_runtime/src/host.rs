//! Browser-facing helpers for the desktop runtime: viewport queries, DOM focus, and clocks.
//!
//! Native builds (tests, tooling) get fixed fallbacks so the reducer pipeline stays usable off
//! the browser.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

use crate::model::{Viewport, WindowId};

const FALLBACK_VIEWPORT: Viewport = Viewport {
    width: 1024,
    height: 768,
};

/// DOM id of the `<section>` rendered for a window.
pub fn window_dom_id(window_id: WindowId) -> String {
    format!("desktop-window-{}", window_id.0)
}

#[derive(Debug, Clone, Copy, Default)]
/// Host service handle for runtime side effects and environment queries.
pub struct DesktopHostContext;

impl DesktopHostContext {
    /// Reads the full browser viewport size at call time.
    ///
    /// The window manager does not track later viewport changes; callers read this at the moment
    /// of opening or maximizing a window.
    pub fn viewport(&self) -> Viewport {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let width = window
                    .inner_width()
                    .ok()
                    .and_then(|value| value.as_f64())
                    .map(|value| value as i32);
                let height = window
                    .inner_height()
                    .ok()
                    .and_then(|value| value.as_f64())
                    .map(|value| value as i32);
                if let (Some(width), Some(height)) = (width, height) {
                    return Viewport {
                        width: width.max(1),
                        height: height.max(1),
                    };
                }
            }
        }

        FALLBACK_VIEWPORT
    }

    /// Milliseconds timestamp used for double-tap detection.
    pub fn now_ms(&self) -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            js_sys::Date::now()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs_f64() * 1000.0)
                .unwrap_or_default()
        }
    }

    /// Moves DOM focus into a window after the current render pass.
    pub fn focus_window_element(&self, window_id: WindowId) {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let Some(element) = window
                .document()
                .and_then(|document| document.get_element_by_id(&window_dom_id(window_id)))
            else {
                return;
            };
            let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() else {
                return;
            };
            let callback = Closure::once_into_js(move || {
                let _ = element.focus();
            });
            let _ = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0);
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = window_id;
    }
}
