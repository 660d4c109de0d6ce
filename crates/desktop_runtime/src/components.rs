//! Desktop shell UI composition and pointer routing.

mod taskbar;
mod window;

use desktop_app_contract::{AppProps, ApplicationId};
use leptos::*;

use self::{taskbar::Taskbar, window::DesktopWindow};

use crate::{
    apps::{self, AppDefinition},
    gesture::{DoubleActivation, InteractionState},
    model::PointerPosition,
    reducer::DesktopAction,
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

fn is_touch_like(ev: &web_sys::PointerEvent) -> bool {
    ev.pointer_type() != "mouse"
}

/// Whether a pointerdown should start a gesture: primary button for mice, primary contact
/// otherwise.
fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if is_touch_like(ev) {
        ev.is_primary()
    } else {
        ev.button() == 0
    }
}

fn end_active_pointer_interaction(runtime: DesktopRuntimeContext) {
    match runtime.interaction.get_untracked() {
        InteractionState::Dragging(_) => runtime.dispatch_action(DesktopAction::EndMove),
        InteractionState::Resizing(_) => runtime.dispatch_action(DesktopAction::EndResize),
        InteractionState::Idle => {}
    }
}

#[component]
/// Renders the desktop: icons, every visible window, and the taskbar.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let registry = runtime.registry;

    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        let pointer = pointer_from_pointer_event(&ev);
        match runtime.interaction.get_untracked() {
            InteractionState::Dragging(_) => {
                runtime.dispatch_action(DesktopAction::UpdateMove { pointer })
            }
            InteractionState::Resizing(_) => {
                runtime.dispatch_action(DesktopAction::UpdateResize { pointer })
            }
            InteractionState::Idle => {}
        }
    };
    let on_pointer_end = move |_| end_active_pointer_interaction(runtime);

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            class:gesture-active=move || runtime.interaction.with(InteractionState::is_active)
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_end
            on:pointercancel=on_pointer_end
        >
            <div class="desktop-icon-grid">
                <For each=apps::desktop_icon_apps key=|app| app.id.to_string() let:app>
                    <DesktopIcon app=app />
                </For>
            </div>

            <div class="desktop-window-layer">
                <For
                    each=move || {
                        registry.with(|windows| {
                            windows.visible_windows().map(|w| w.id).collect::<Vec<_>>()
                        })
                    }
                    key=|window_id| window_id.0
                    let:window_id
                >
                    <DesktopWindow window_id=window_id />
                </For>
            </div>

            <Taskbar />
        </div>
    }
}

#[component]
fn DesktopIcon(app: &'static AppDefinition) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let threshold_ms = runtime.config.with_value(|config| config.double_tap_threshold_ms);
    let activation = store_value(DoubleActivation::<ApplicationId>::new(threshold_ms));

    let open = move || runtime.open_window(app.id.clone(), AppProps::new());
    let on_pointer_up = move |ev: web_sys::PointerEvent| {
        let touch_like = is_touch_like(&ev);
        let now_ms = runtime.host.now_ms();
        let is_double = activation
            .try_update_value(|activation| activation.pointer_up(app.id.clone(), touch_like, now_ms));
        if is_double == Some(true) {
            ev.prevent_default();
            open();
        }
    };

    view! {
        <button
            type="button"
            class="desktop-icon"
            data-app-id=app.id.to_string()
            on:dblclick=move |ev| {
                stop_mouse_event(&ev);
                if activation.with_value(DoubleActivation::double_click) {
                    open();
                }
            }
            on:pointerup=on_pointer_up
        >
            <span class=format!("desktop-icon-glyph icon-{}", app.icon) aria-hidden="true"></span>
            <span class="desktop-icon-label">{app.title.clone()}</span>
        </button>
    }
}
