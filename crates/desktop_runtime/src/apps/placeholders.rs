//! Built-in app shells. Each body only reflects the props it was opened with; the real
//! application logic lives behind backend services that are not part of the window manager.

use desktop_app_contract::{AppMountContext, AppProps};
use leptos::*;

fn artifact_label(props: &AppProps) -> String {
    props
        .artifact_id()
        .map(|artifact_id| format!("Artifact: {artifact_id}"))
        .unwrap_or_else(|| "No artifact selected".to_string())
}

#[component]
fn AppFrame(
    context: AppMountContext,
    #[prop(into)] class: String,
    #[prop(into)] heading: String,
    children: Children,
) -> impl IntoView {
    let status = artifact_label(&context.props);
    view! {
        <div class=format!("app-shell {class}") data-window-id=context.window_id.to_string()>
            <div class="app-toolbar">
                <strong>{heading}</strong>
            </div>
            <div class="app-body">{children()}</div>
            <div class="app-statusbar">
                <span>{status}</span>
            </div>
        </div>
    }
}

pub(super) fn mount_files_app(context: AppMountContext) -> View {
    let path = context
        .props
        .get_str("path")
        .unwrap_or("/")
        .to_string();
    view! {
        <AppFrame context=context class="app-files" heading="File Browser">
            <p>{format!("Location: {path}")}</p>
        </AppFrame>
    }
    .into_view()
}

pub(super) fn mount_writer_app(context: AppMountContext) -> View {
    let draft = create_rw_signal(String::new());
    view! {
        <AppFrame context=context class="app-writer" heading="Writer">
            <textarea
                class="app-writer-editor"
                prop:value=move || draft.get()
                on:input=move |ev| draft.set(event_target_value(&ev))
            />
            <p class="app-writer-count">{move || format!("{} characters", draft.get().chars().count())}</p>
        </AppFrame>
    }
    .into_view()
}

pub(super) fn mount_mail_app(context: AppMountContext) -> View {
    view! {
        <AppFrame context=context class="app-mail" heading="Mail">
            <p>"Inbox"</p>
        </AppFrame>
    }
    .into_view()
}

pub(super) fn mount_terminal_app(context: AppMountContext) -> View {
    let cwd = context.props.get_str("cwd").unwrap_or("~").to_string();
    view! {
        <AppFrame context=context class="app-terminal" heading="Terminal">
            <pre class="app-terminal-screen">{format!("{cwd} $ ")}</pre>
        </AppFrame>
    }
    .into_view()
}

pub(super) fn mount_git_app(context: AppMountContext) -> View {
    let branch = context.props.get_str("branch").unwrap_or("main").to_string();
    view! {
        <AppFrame context=context class="app-git" heading="Git Panel">
            <p>{format!("Branch: {branch}")}</p>
        </AppFrame>
    }
    .into_view()
}

pub(super) fn mount_auth_app(context: AppMountContext) -> View {
    view! {
        <AppFrame context=context class="app-auth" heading="Sign In">
            <form class="app-auth-form" on:submit=|ev| ev.prevent_default()>
                <input type="text" name="username" placeholder="Username" />
                <input type="password" name="password" placeholder="Password" />
                <button type="submit">"Sign in"</button>
            </form>
        </AppFrame>
    }
    .into_view()
}

/// Fallback for windows whose app id has no registered application.
pub(super) fn mount_unknown_app(context: AppMountContext) -> View {
    let app_id = context.app_id.to_string();
    view! {
        <div class="app-shell app-placeholder" role="note">
            <p>{app_id}</p>
        </div>
    }
    .into_view()
}
