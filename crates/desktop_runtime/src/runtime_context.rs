//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived registry signal, the in-flight gesture signal and the runtime
//! effect queue. UI composition stays in [`crate::components`].

use desktop_app_contract::{AppProps, ApplicationId};
use leptos::*;

use crate::{
    config::ShellConfig,
    effect_executor,
    gesture::InteractionState,
    host::DesktopHostContext,
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
    registry::WindowRegistry,
};

#[derive(Clone, Copy)]
/// Leptos context for reading window state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Host helpers for viewport queries and DOM side effects.
    pub host: DesktopHostContext,
    /// Shell configuration the provider was created with.
    pub config: StoredValue<ShellConfig>,
    /// Reactive window registry signal.
    pub registry: RwSignal<WindowRegistry>,
    /// Reactive drag/resize gesture signal.
    pub interaction: RwSignal<InteractionState>,
    /// Queue of runtime effects emitted by the reducer and processed by the executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    /// Opens a window for `app_id` using the current viewport.
    pub fn open_window(&self, app_id: ApplicationId, props: AppProps) {
        self.dispatch_action(DesktopAction::OpenWindow {
            app_id,
            props,
            viewport: self.host.viewport(),
        });
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components.
pub fn DesktopProvider(
    /// Shell configuration; defaults apply when omitted.
    #[prop(optional)]
    config: Option<ShellConfig>,
    children: Children,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let registry = create_rw_signal(WindowRegistry::new(config.layout.clone()));
    let interaction = create_rw_signal(InteractionState::default());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());

    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut windows = registry.get_untracked();
        let mut gesture = interaction.get_untracked();
        let previous_windows = windows.clone();
        let previous_gesture = gesture.clone();

        let new_effects = reduce_desktop(&mut windows, &mut gesture, action);

        if windows != previous_windows {
            registry.set(windows);
        }
        if gesture != previous_gesture {
            interaction.set(gesture);
        }
        if !new_effects.is_empty() {
            effects.update(|queue| queue.extend(new_effects));
        }
    });

    let runtime = DesktopRuntimeContext {
        host: DesktopHostContext,
        config: store_value(config),
        registry,
        interaction,
        effects,
        dispatch,
    };

    provide_context(runtime);
    effect_executor::install(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
