//! Application registry: catalog metadata plus the mount function for each built-in app.

mod placeholders;

use std::sync::OnceLock;

use desktop_app_contract::{AppModule, AppMountContext, AppMountFn, ApplicationId};
use leptos::{logging, View};
use serde::Deserialize;
use thiserror::Error;

use crate::model::{Size, WindowRecord};

include!(concat!(env!("OUT_DIR"), "/app_catalog_generated.rs"));

#[derive(Debug, Error)]
/// Errors decoding the generated application catalog.
pub enum CatalogError {
    #[error("app catalog decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Static registry entry for one application.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppDefinition {
    pub id: ApplicationId,
    pub title: String,
    pub icon: String,
    pub default_size: Size,
    pub file_types: Vec<String>,
    pub show_on_desktop: bool,
}

impl AppDefinition {
    pub fn handles_file_type(&self, extension: &str) -> bool {
        let extension = extension.trim_start_matches('.');
        self.file_types
            .iter()
            .any(|file_type| file_type.eq_ignore_ascii_case(extension))
    }
}

/// Decodes a catalog JSON payload.
///
/// # Errors
///
/// Returns [`CatalogError::Decode`] when the payload does not match [`AppDefinition`].
pub fn parse_catalog(raw: &str) -> Result<Vec<AppDefinition>, CatalogError> {
    Ok(serde_json::from_str(raw)?)
}

/// All registered applications in catalog order.
pub fn app_registry() -> &'static [AppDefinition] {
    static CATALOG: OnceLock<Vec<AppDefinition>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        parse_catalog(APP_CATALOG_JSON).unwrap_or_else(|err| {
            logging::warn!("{err}; starting with an empty app registry");
            Vec::new()
        })
    })
}

pub fn app_definition(app_id: &ApplicationId) -> Option<&'static AppDefinition> {
    app_registry().iter().find(|entry| &entry.id == app_id)
}

pub fn desktop_icon_apps() -> Vec<&'static AppDefinition> {
    app_registry()
        .iter()
        .filter(|entry| entry.show_on_desktop)
        .collect()
}

/// Registered applications that declare `extension` among their file types.
pub fn apps_for_file_type(extension: &str) -> Vec<&'static AppDefinition> {
    app_registry()
        .iter()
        .filter(|entry| entry.handles_file_type(extension))
        .collect()
}

/// Registry title for `app_id`, or the id itself when unregistered.
pub fn default_title(app_id: &ApplicationId) -> String {
    app_definition(app_id)
        .map(|entry| entry.title.clone())
        .unwrap_or_else(|| app_id.to_string())
}

/// Icon token for `app_id`, used by desktop icons and taskbar buttons.
pub fn app_icon(app_id: &ApplicationId) -> &'static str {
    app_definition(app_id)
        .map(|entry| entry.icon.as_str())
        .unwrap_or("app")
}

fn app_module(app_id: &ApplicationId) -> Option<AppModule> {
    let mount_fn: AppMountFn = match app_id.as_str() {
        "files" => placeholders::mount_files_app,
        "writer" => placeholders::mount_writer_app,
        "mail" => placeholders::mount_mail_app,
        "terminal" => placeholders::mount_terminal_app,
        "git" => placeholders::mount_git_app,
        "auth" => placeholders::mount_auth_app,
        _ => return None,
    };
    Some(AppModule::new(mount_fn))
}

/// Mounts the application for a window, falling back to the placeholder app for unknown ids.
pub fn mount_app(window: &WindowRecord) -> View {
    let context = AppMountContext {
        app_id: window.app_id.clone(),
        window_id: window.id.0,
        props: window.props.clone(),
    };
    match app_module(&window.app_id) {
        Some(module) if app_definition(&window.app_id).is_some() => module.mount(context),
        _ => {
            logging::warn!("no application registered for `{}`", window.app_id);
            placeholders::mount_unknown_app(context)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builtin_catalog_decodes_and_every_entry_has_a_module() {
        let registry = app_registry();
        assert!(!registry.is_empty());
        for entry in registry {
            assert!(app_module(&entry.id).is_some(), "missing module for {}", entry.id);
            assert!(entry.default_size.width > 0 && entry.default_size.height > 0);
        }
    }

    #[test]
    fn writer_defaults_to_800_by_600() {
        let writer = app_definition(&ApplicationId::trusted("writer")).expect("writer registered");
        assert_eq!(
            writer.default_size,
            Size {
                width: 800,
                height: 600,
            }
        );
    }

    #[test]
    fn unknown_app_title_echoes_id() {
        assert_eq!(
            default_title(&ApplicationId::trusted("calendar")),
            "calendar".to_string()
        );
        assert_eq!(app_icon(&ApplicationId::trusted("calendar")), "app");
    }

    #[test]
    fn file_type_lookup_ignores_case_and_leading_dot() {
        let handlers: Vec<_> = apps_for_file_type(".MD")
            .into_iter()
            .map(|entry| entry.id.as_str())
            .collect();
        assert_eq!(handlers, vec!["writer"]);
        assert!(apps_for_file_type("exe").is_empty());
    }

    #[test]
    fn malformed_catalog_is_an_error() {
        assert!(matches!(
            parse_catalog(r#"[{ "id": "x" }]"#),
            Err(CatalogError::Decode(_))
        ));
    }
}
