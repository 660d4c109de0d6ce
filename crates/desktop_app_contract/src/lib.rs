//! Shared contract types between the desktop window manager runtime and managed apps.
//!
//! Apps never see window chrome or geometry. They receive an [`AppMountContext`] carrying the
//! runtime window id and the opaque [`AppProps`] bag supplied when the window was opened, and
//! render self-contained content from it.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use leptos::View;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Stable identifier for a runtime-managed window.
pub type WindowRuntimeId = u64;

const MAX_APPLICATION_ID_LEN: usize = 64;
const TITLE_PROP: &str = "title";
const ARTIFACT_ID_PROP: &str = "artifactId";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reasons an application id string is rejected.
pub enum ApplicationIdError {
    /// The id was empty.
    #[error("application id is empty")]
    Empty,
    /// The id exceeded the maximum length.
    #[error("application id `{0}` exceeds 64 characters")]
    TooLong(String),
    /// The id contained characters outside `[a-z0-9-.]` or malformed segments.
    #[error("invalid application id `{0}`; expected lowercase dotted segments")]
    Malformed(String),
}

/// Identifier of an application in the runtime app registry.
///
/// Several windows may share one application id. Ids that do not resolve in the registry are still
/// valid values; the window manager renders a placeholder for them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Returns an app identifier when `raw` is one or more lowercase `segment`s joined by dots.
    pub fn new(raw: impl Into<String>) -> Result<Self, ApplicationIdError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ApplicationIdError::Empty);
        }
        if raw.len() > MAX_APPLICATION_ID_LEN {
            return Err(ApplicationIdError::TooLong(raw));
        }
        if !is_valid_application_id(&raw) {
            return Err(ApplicationIdError::Malformed(raw));
        }
        Ok(Self(raw))
    }

    /// Creates an id without validation for compile-time trusted constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_valid_application_id(raw: &str) -> bool {
    raw.split('.').all(|part| {
        let bytes = part.as_bytes();
        !bytes.is_empty()
            && bytes[0].is_ascii_lowercase()
            && !part.ends_with('-')
            && bytes
                .iter()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
    })
}

/// Opaque props bag forwarded from the window opener to the mounted app.
///
/// The window manager only reads the `title` key (to override the registry title); everything
/// else, including `artifactId`, is passed through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppProps(Map<String, Value>);

impl AppProps {
    /// Returns an empty props bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a props bag from a JSON value. Non-object values yield an empty bag.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// Sets the window title override.
    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.with(TITLE_PROP, Value::String(title.into()))
    }

    /// Sets the artifact the app should load.
    pub fn with_artifact_id(self, artifact_id: impl Into<String>) -> Self {
        self.with(ARTIFACT_ID_PROP, Value::String(artifact_id.into()))
    }

    /// Sets an arbitrary key.
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// Title override requested by the opener, if any.
    pub fn title(&self) -> Option<&str> {
        self.get_str(TITLE_PROP)
    }

    /// Artifact id requested by the opener, if any.
    pub fn artifact_id(&self) -> Option<&str> {
        self.get_str(ARTIFACT_ID_PROP)
    }

    /// Returns the raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the string stored under `key`, ignoring blank strings.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    /// Whether the bag has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over all entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

#[derive(Debug, Clone)]
/// App mount context injected by the desktop runtime per window instance.
pub struct AppMountContext {
    /// App id the window was opened with.
    pub app_id: ApplicationId,
    /// Stable runtime window id.
    pub window_id: WindowRuntimeId,
    /// Props supplied at window-open time.
    pub props: AppProps,
}

/// Static app mount function used by the runtime registry.
pub type AppMountFn = fn(AppMountContext) -> View;

#[derive(Debug, Clone, Copy)]
/// Mounted app module descriptor used by the runtime app registry.
pub struct AppModule {
    mount_fn: AppMountFn,
}

impl AppModule {
    /// Creates a module from a mount function.
    pub const fn new(mount_fn: AppMountFn) -> Self {
        Self { mount_fn }
    }

    /// Mounts the app view with a runtime-provided context.
    pub fn mount(self, context: AppMountContext) -> View {
        (self.mount_fn)(context)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn application_id_accepts_plain_and_dotted_segments() {
        assert!(ApplicationId::new("writer").is_ok());
        assert!(ApplicationId::new("system.git-panel").is_ok());
        assert_eq!(ApplicationId::new(""), Err(ApplicationIdError::Empty));
        assert!(matches!(
            ApplicationId::new("Writer"),
            Err(ApplicationIdError::Malformed(_))
        ));
        assert!(ApplicationId::new("mail..inbox").is_err());
        assert!(ApplicationId::new("mail-").is_err());
        assert!(matches!(
            ApplicationId::new("a".repeat(65)),
            Err(ApplicationIdError::TooLong(_))
        ));
    }

    #[test]
    fn props_expose_title_and_artifact_and_keep_extra_keys() {
        let props = AppProps::from_value(json!({
            "title": "Draft",
            "artifactId": "art-42",
            "mode": "preview",
        }));

        assert_eq!(props.title(), Some("Draft"));
        assert_eq!(props.artifact_id(), Some("art-42"));
        assert_eq!(props.get("mode"), Some(&json!("preview")));
    }

    #[test]
    fn blank_title_is_treated_as_absent() {
        let props = AppProps::new().with_title("   ");
        assert_eq!(props.title(), None);
        assert!(AppProps::from_value(json!(["not", "an", "object"])).is_empty());
    }
}
