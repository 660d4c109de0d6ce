use super::*;
use crate::{
    gesture::ResizeEdge,
    host::window_dom_id,
    model::{WindowId, WindowMode, WindowRecord},
};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

fn focus_if_unfocused(runtime: DesktopRuntimeContext, window_id: WindowId) {
    let unfocused = runtime.registry.with_untracked(|registry| {
        registry
            .get_window(window_id)
            .map(|w| !w.is_focused())
            .unwrap_or(false)
    });
    if unfocused {
        runtime.dispatch_action(DesktopAction::FocusWindow { window_id });
    }
}

fn toggle_maximize(runtime: DesktopRuntimeContext, window_id: WindowId) {
    runtime.dispatch_action(DesktopAction::ToggleMaximize {
        window_id,
        viewport: runtime.host.viewport(),
    });
}

/// Swallows a pointerdown so it neither focuses the window nor starts a drag.
fn swallow_pointer(ev: web_sys::PointerEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let threshold_ms = runtime.config.with_value(|config| config.double_tap_threshold_ms);
    let title_activation = store_value(DoubleActivation::<()>::new(threshold_ms));

    let window = Signal::derive(move || {
        runtime
            .registry
            .with(|registry| registry.get_window(window_id).cloned())
    });

    let focus = move |_: web_sys::PointerEvent| focus_if_unfocused(runtime, window_id);
    let begin_move = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        ev.prevent_default();
        ev.stop_propagation();
        focus_if_unfocused(runtime, window_id);
        if window.get_untracked().map(|w| w.is_maximized()).unwrap_or(true) {
            return;
        }
        try_set_pointer_capture(&ev);
        runtime.dispatch_action(DesktopAction::BeginMove {
            window_id,
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let titlebar_tap = move |ev: web_sys::PointerEvent| {
        let touch_like = is_touch_like(&ev);
        let now_ms = runtime.host.now_ms();
        let is_double = title_activation
            .try_update_value(|activation| activation.pointer_up((), touch_like, now_ms));
        if is_double == Some(true) {
            toggle_maximize(runtime, window_id);
        }
    };
    let titlebar_double_click = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        if title_activation.with_value(DoubleActivation::double_click) {
            toggle_maximize(runtime, window_id);
        }
    };

    let style = move || {
        window.with(|win| {
            win.as_ref()
                .map(|win| {
                    let geometry = win.geometry;
                    format!(
                        "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
                        geometry.position.x,
                        geometry.position.y,
                        geometry.size.width,
                        geometry.size.height,
                        win.z_index
                    )
                })
                .unwrap_or_default()
        })
    };
    let is_focused = move || window.with(|win| win.as_ref().is_some_and(WindowRecord::is_focused));
    let is_maximized = move || {
        window.with(|win| {
            win.as_ref()
                .is_some_and(|win| win.mode() == WindowMode::Maximized)
        })
    };
    let title = move || {
        window.with(|win| {
            win.as_ref()
                .map(|win| win.title.clone())
                .unwrap_or_default()
        })
    };
    let icon_class = window.with_untracked(|win| {
        let icon = win
            .as_ref()
            .map(|win| apps::app_icon(&win.app_id))
            .unwrap_or("app");
        format!("titlebar-app-icon icon-{icon}")
    });

    view! {
        <section
            id=window_dom_id(window_id)
            class="desktop-window"
            class:focused=is_focused
            class:maximized=is_maximized
            style=style
            tabindex="-1"
            role="dialog"
            aria-label=title
            on:pointerdown=focus
        >
            <header
                class="titlebar"
                on:pointerdown=begin_move
                on:pointerup=titlebar_tap
                on:dblclick=titlebar_double_click
            >
                <div class="titlebar-title">
                    <span class=icon_class aria-hidden="true"></span>
                    <span>{title}</span>
                </div>
                <div class="titlebar-controls">
                    <button
                        aria-label="Minimize window"
                        on:pointerdown=swallow_pointer
                        on:mousedown=move |ev| stop_mouse_event(&ev)
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(DesktopAction::MinimizeWindow { window_id });
                        }
                    >
                        "_"
                    </button>
                    <button
                        aria-label=move || if is_maximized() { "Restore window" } else { "Maximize window" }
                        on:pointerdown=swallow_pointer
                        on:mousedown=move |ev| stop_mouse_event(&ev)
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            toggle_maximize(runtime, window_id);
                        }
                    >
                        {move || if is_maximized() { "❐" } else { "□" }}
                    </button>
                    <button
                        aria-label="Close window"
                        on:pointerdown=swallow_pointer
                        on:mousedown=move |ev| stop_mouse_event(&ev)
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(DesktopAction::CloseWindow { window_id });
                        }
                    >
                        "×"
                    </button>
                </div>
            </header>
            <div class="window-body">
                <WindowBody window_id=window_id />
            </div>
            {move || {
                (!is_maximized()).then(|| {
                    ResizeEdge::ALL
                        .into_iter()
                        .map(|edge| view! { <WindowResizeHandle window_id=window_id edge=edge /> })
                        .collect_view()
                })
            }}
        </section>
    }
}

#[component]
fn WindowResizeHandle(window_id: WindowId, edge: ResizeEdge) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let class_name = format!("window-resize-handle {}", edge.css_class());

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        ev.prevent_default();
        ev.stop_propagation();
        focus_if_unfocused(runtime, window_id);
        try_set_pointer_capture(&ev);
        runtime.dispatch_action(DesktopAction::BeginResize {
            window_id,
            edge,
            pointer: pointer_from_pointer_event(&ev),
        });
    };

    view! {
        <div
            class=class_name
            aria-hidden="true"
            on:pointerdown=on_pointerdown
        />
    }
}

#[component]
fn WindowBody(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let contents = runtime
        .registry
        .with_untracked(|registry| registry.get_window(window_id).map(apps::mount_app))
        .unwrap_or_else(|| view! { <p>"Closed"</p> }.into_view());

    view! {
        <div class="window-body-content">
            {contents}
        </div>
    }
}
