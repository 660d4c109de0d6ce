use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const CATALOG_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DefaultSize {
    width: i32,
    height: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AppEntry {
    id: String,
    title: String,
    icon: String,
    default_size: DefaultSize,
    #[serde(default)]
    file_types: Vec<String>,
    #[serde(default = "default_show_on_desktop")]
    show_on_desktop: bool,
}

fn default_show_on_desktop() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct AppCatalog {
    schema_version: u32,
    apps: Vec<AppEntry>,
}

fn valid_app_id(raw: &str) -> bool {
    !raw.is_empty()
        && raw.split('.').all(|part| {
            let bytes = part.as_bytes();
            !bytes.is_empty()
                && bytes[0].is_ascii_lowercase()
                && !part.ends_with('-')
                && bytes
                    .iter()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
        })
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("apps.catalog.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let catalog: AppCatalog = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if catalog.schema_version != CATALOG_SCHEMA_VERSION {
        panic!(
            "app catalog schema mismatch in {}: expected {CATALOG_SCHEMA_VERSION} found {}",
            path.display(),
            catalog.schema_version
        );
    }

    let mut seen = HashSet::new();
    for app in &catalog.apps {
        if !valid_app_id(&app.id) {
            panic!("invalid app id `{}` in {}", app.id, path.display());
        }
        if !seen.insert(app.id.clone()) {
            panic!("duplicate app id `{}` in {}", app.id, path.display());
        }
        if app.title.trim().is_empty() {
            panic!("app `{}` has an empty title", app.id);
        }
        if app.default_size.width <= 0 || app.default_size.height <= 0 {
            panic!("app `{}` has a non-positive default size", app.id);
        }
    }

    let json = serde_json::to_string_pretty(&catalog.apps).expect("serialize app catalog");
    let generated = format!(
        "/// Build-time generated application catalog JSON.\n\
pub const APP_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("app_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
