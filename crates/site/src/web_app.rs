use desktop_runtime::{DesktopProvider, DesktopShell, ShellConfig};
use leptos::*;
use leptos_meta::*;

/// Id of the optional inline `<script type="application/json">` block carrying shell overrides.
pub const SHELL_CONFIG_ELEMENT_ID: &str = "shell-config";

/// Turns the raw contents of the config block into a [`ShellConfig`].
///
/// Missing, blank, or invalid configuration falls back to the defaults.
pub fn resolve_shell_config(raw: Option<&str>) -> ShellConfig {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return ShellConfig::default();
    };
    match ShellConfig::from_json_str(raw) {
        Ok(config) => config,
        Err(err) => {
            logging::warn!("ignoring #{SHELL_CONFIG_ELEMENT_ID}: {err}; using defaults");
            ShellConfig::default()
        }
    }
}

/// Reads the shell configuration embedded in the host page.
pub fn load_shell_config() -> ShellConfig {
    let raw = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(SHELL_CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content());
    resolve_shell_config(raw.as_deref())
}

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Desktop" />
        <Meta name="description" content="A browser desktop with draggable, resizable windows." />

        <main class="site-root">
            <DesktopEntry />
        </main>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    let config = load_shell_config();

    view! {
        <DesktopProvider config=config>
            <DesktopShell />
        </DesktopProvider>
    }
}
