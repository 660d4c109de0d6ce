use super::*;
use crate::model::{WindowId, WindowRecord};

fn taskbar_window_button_class(focused: bool, minimized: bool) -> &'static str {
    match (focused, minimized) {
        (_, true) => "taskbar-window minimized",
        (true, false) => "taskbar-window focused",
        (false, false) => "taskbar-window",
    }
}

fn taskbar_window_aria_label(win: &WindowRecord) -> String {
    if win.is_minimized() {
        format!("{} (minimized)", win.title)
    } else {
        win.title.clone()
    }
}

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let registry = runtime.registry;
    let height = runtime
        .config
        .with_value(|config| config.layout.taskbar_height);

    view! {
        <footer
            class="taskbar"
            role="toolbar"
            aria-label="Taskbar"
            style=format!("height:{height}px;")
            on:pointerdown=|ev| ev.stop_propagation()
        >
            <div class="taskbar-launchers" role="group" aria-label="Applications">
                {apps::app_registry()
                    .iter()
                    .map(|app| {
                        view! {
                            <button
                                type="button"
                                class="taskbar-launcher"
                                data-app-id=app.id.to_string()
                                title=app.title.clone()
                                on:click=move |_| runtime.open_window(app.id.clone(), AppProps::new())
                            >
                                <span class=format!("taskbar-app-icon icon-{}", app.icon) aria-hidden="true"></span>
                                <span class="visually-hidden">{app.title.clone()}</span>
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="taskbar-running-region" role="group" aria-label="Running windows">
                <For
                    each=move || registry.with(|windows| windows.windows().iter().map(|w| w.id).collect::<Vec<_>>())
                    key=|window_id| window_id.0
                    let:window_id
                >
                    <TaskbarWindowButton window_id=window_id />
                </For>
            </div>
        </footer>
    }
}

#[component]
fn TaskbarWindowButton(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let window = Signal::derive(move || {
        runtime
            .registry
            .with(|registry| registry.get_window(window_id).cloned())
    });
    let icon_class = window.with_untracked(|win| {
        let icon = win
            .as_ref()
            .map(|win| apps::app_icon(&win.app_id))
            .unwrap_or("app");
        format!("taskbar-app-icon icon-{icon}")
    });

    view! {
        <button
            type="button"
            class=move || {
                window.with(|win| {
                    win.as_ref()
                        .map(|win| taskbar_window_button_class(win.is_focused(), win.is_minimized()))
                        .unwrap_or("taskbar-window")
                })
            }
            aria-pressed=move || window.with(|win| win.as_ref().is_some_and(WindowRecord::is_focused))
            aria-label=move || window.with(|win| win.as_ref().map(taskbar_window_aria_label).unwrap_or_default())
            on:click=move |_| runtime.dispatch_action(DesktopAction::ActivateTaskbarWindow { window_id })
        >
            <span class=icon_class aria-hidden="true"></span>
            <span class="taskbar-app-label">
                {move || window.with(|win| win.as_ref().map(|win| win.title.clone()).unwrap_or_default())}
            </span>
        </button>
    }
}
