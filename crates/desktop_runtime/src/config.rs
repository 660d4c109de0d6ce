//! Shell configuration: layout constants for the window manager plus input thresholds.
//!
//! Every field has a default, so a partial JSON document only overrides what it names.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Size;

/// Largest accepted `layout.cascade_step`, in pixels.
pub const MAX_CASCADE_STEP: i32 = 200;
/// Largest accepted `layout.cascade_cycle`.
pub const MAX_CASCADE_CYCLE: usize = 32;

#[derive(Debug, Error)]
/// Errors produced while loading a [`ShellConfig`].
pub enum ConfigError {
    /// The document was not valid JSON for the config shape.
    #[error("shell config parse failed: {0}")]
    Parse(#[from] serde_json::Error),
    /// The document parsed but a value is out of range.
    #[error("shell config invalid: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Width/height multipliers applied to the usable viewport.
pub struct ViewportScale {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Geometry constants consumed by the registry and the initial-geometry computation.
pub struct LayoutConfig {
    /// Height reserved for the taskbar at the bottom of the viewport.
    pub taskbar_height: i32,
    /// Smallest size a window may be resized to.
    pub min_window: Size,
    /// Desktop-layout size for app ids with no registry entry.
    pub fallback_size: Size,
    /// Viewport widths below this use the phone layout.
    pub phone_breakpoint: i32,
    /// Viewport widths below this (and at or above the phone breakpoint) use the tablet layout.
    pub tablet_breakpoint: i32,
    pub phone_scale: ViewportScale,
    pub tablet_scale: ViewportScale,
    /// Base distance of a new window from the top of the viewport.
    pub top_offset: i32,
    /// Minimum distance of a new window from the viewport edge.
    pub edge_margin: i32,
    pub cascade_step: i32,
    /// Number of windows after which the cascade wraps back to zero offset.
    pub cascade_cycle: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            taskbar_height: 48,
            min_window: Size {
                width: 300,
                height: 200,
            },
            fallback_size: Size {
                width: 600,
                height: 400,
            },
            phone_breakpoint: 500,
            tablet_breakpoint: 900,
            phone_scale: ViewportScale {
                width: 0.95,
                height: 0.92,
            },
            tablet_scale: ViewportScale {
                width: 0.70,
                height: 0.65,
            },
            top_offset: 50,
            edge_margin: 10,
            cascade_step: 20,
            cascade_cycle: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Top-level configuration handed to [`crate::DesktopProvider`].
pub struct ShellConfig {
    pub layout: LayoutConfig,
    /// Two taps on the same target within this many milliseconds count as a double tap.
    pub double_tap_threshold_ms: u32,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            double_tap_threshold_ms: 300,
        }
    }
}

impl ShellConfig {
    /// Parses and validates a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and [`ConfigError::Invalid`] when a value
    /// fails [`ShellConfig::validate`].
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        if layout.min_window.width <= 0 || layout.min_window.height <= 0 {
            return Err(ConfigError::Invalid(
                "layout.min_window must be positive".to_string(),
            ));
        }
        if layout.fallback_size.width <= 0 || layout.fallback_size.height <= 0 {
            return Err(ConfigError::Invalid(
                "layout.fallback_size must be positive".to_string(),
            ));
        }
        if layout.taskbar_height < 0 {
            return Err(ConfigError::Invalid(
                "layout.taskbar_height must not be negative".to_string(),
            ));
        }
        if layout.phone_breakpoint <= 0 || layout.phone_breakpoint >= layout.tablet_breakpoint {
            return Err(ConfigError::Invalid(format!(
                "layout breakpoints out of order: phone {} / tablet {}",
                layout.phone_breakpoint, layout.tablet_breakpoint
            )));
        }
        for (name, scale) in [
            ("phone_scale", layout.phone_scale),
            ("tablet_scale", layout.tablet_scale),
        ] {
            let in_range = |factor: f64| factor > 0.0 && factor <= 1.0;
            if !in_range(scale.width) || !in_range(scale.height) {
                return Err(ConfigError::Invalid(format!(
                    "layout.{name} factors must be in (0, 1]"
                )));
            }
        }
        if layout.cascade_cycle == 0 {
            return Err(ConfigError::Invalid(
                "layout.cascade_cycle must be at least 1".to_string(),
            ));
        }
        if layout.cascade_cycle > MAX_CASCADE_CYCLE {
            return Err(ConfigError::Invalid(format!(
                "layout.cascade_cycle must be at most {MAX_CASCADE_CYCLE}"
            )));
        }
        if layout.cascade_step > MAX_CASCADE_STEP {
            return Err(ConfigError::Invalid(format!(
                "layout.cascade_step must be at most {MAX_CASCADE_STEP}"
            )));
        }
        if layout.edge_margin < 0 || layout.cascade_step < 0 {
            return Err(ConfigError::Invalid(
                "layout.edge_margin and layout.cascade_step must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn partial_document_overrides_only_named_fields() {
        let config =
            ShellConfig::from_json_str(r#"{ "layout": { "taskbar_height": 40 } }"#).unwrap();

        assert_eq!(config.layout.taskbar_height, 40);
        assert_eq!(config.layout.min_window, LayoutConfig::default().min_window);
        assert_eq!(config.double_tap_threshold_ms, 300);
    }

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(ShellConfig::from_json_str("{}").unwrap(), ShellConfig::default());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            ShellConfig::from_json_str("{ layout: "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn breakpoints_out_of_order_are_rejected() {
        let err = ShellConfig::from_json_str(
            r#"{ "layout": { "phone_breakpoint": 900, "tablet_breakpoint": 500 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_cascade_cycle_is_rejected() {
        let err =
            ShellConfig::from_json_str(r#"{ "layout": { "cascade_cycle": 0 } }"#).unwrap_err();
        assert!(err.to_string().contains("cascade_cycle"));
    }

    #[test]
    fn oversized_cascade_settings_are_rejected() {
        let err = ShellConfig::from_json_str(r#"{ "layout": { "cascade_step": 1000000000 } }"#)
            .unwrap_err();
        assert!(err.to_string().contains("cascade_step"));

        let err = ShellConfig::from_json_str(r#"{ "layout": { "cascade_cycle": 1000000 } }"#)
            .unwrap_err();
        assert!(err.to_string().contains("cascade_cycle"));

        let at_limit = format!(
            r#"{{ "layout": {{ "cascade_step": {MAX_CASCADE_STEP}, "cascade_cycle": {MAX_CASCADE_CYCLE} }} }}"#
        );
        assert!(ShellConfig::from_json_str(&at_limit).is_ok());
    }
}
