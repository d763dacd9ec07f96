//! Site configuration module.
//!
//! Handles loading, validating, and layering `config.toml`. Stock defaults
//! are the base layer; the user's `content/config.toml` is merged on top, so
//! the file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "My Blog"
//! description = "Notes on Swift and iOS development"
//! author = ""
//! nav = [
//!     { label = "Blog", href = "/" },
//!     { label = "About", href = "/about.html" },
//! ]
//!
//! [content]
//! posts_dir = "posts"                 # Relative to the content root
//! extension = "md"                    # No leading dot
//! about_page = "about.md"
//! experience_data = "experience.json"
//! assets_dir = "assets"               # Copied verbatim to the output root
//! default_layout = "post"             # For posts without a `layout` key
//!
//! [build]
//! max_threads = 4                     # Omit for auto (= CPU cores)
//!
//! [colors.light]
//! background = "#ffffff"
//! ...
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file inside the content root.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid TOML in {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Identity and navigation shown on every page.
    pub site: SiteSection,
    /// Where content lives under the content root.
    pub content: ContentConfig,
    /// Build parallelism.
    pub build: BuildConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.title must not be empty".into(),
            ));
        }
        let ext = &self.content.extension;
        if ext.is_empty() || ext.starts_with('.') {
            return Err(ConfigError::Validation(
                "content.extension must be non-empty and have no leading dot".into(),
            ));
        }
        if self.content.posts_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "content.posts_dir must not be empty".into(),
            ));
        }
        if self.build.max_threads == Some(0) {
            return Err(ConfigError::Validation(
                "build.max_threads must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    pub title: String,
    /// Used as the index page description.
    pub description: String,
    /// Shown in the footer when set.
    pub author: String,
    /// Header navigation, in display order.
    pub nav: Vec<NavLink>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            description: String::new(),
            author: String::new(),
            nav: vec![
                NavLink::new("Blog", "/"),
                NavLink::new("About", "/about.html"),
            ],
        }
    }
}

/// A header navigation link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

impl NavLink {
    pub fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

/// Content layout under the content root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    pub posts_dir: String,
    /// Post file extension, without the dot.
    pub extension: String,
    /// Markdown source of the about page. Skipped when missing.
    pub about_page: String,
    /// JSON array of experience records. Empty list when missing.
    pub experience_data: String,
    pub assets_dir: String,
    /// Layout for posts whose front-matter has no `layout` key.
    pub default_layout: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            posts_dir: "posts".to_string(),
            extension: "md".to_string(),
            about_page: "about.md".to_string(),
            experience_data: "experience.json".to_string(),
            assets_dir: "assets".to_string(),
            default_layout: "post".to_string(),
        }
    }
}

/// Build parallelism settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Maximum threads for reading content files.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_threads: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &BuildConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_threads.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Dates, descriptions, footer.
    pub text_muted: String,
    pub border: String,
    pub link: String,
    pub link_hover: String,
    /// Background of code blocks.
    pub code_background: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#1d1d1f".to_string(),
            text_muted: "#6e6e73".to_string(),
            border: "#e5e5ea".to_string(),
            link: "#0066cc".to_string(),
            link_hover: "#004499".to_string(),
            code_background: "#f5f5f7".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#111113".to_string(),
            text: "#f5f5f7".to_string(),
            text_muted: "#a1a1a6".to_string(),
            border: "#2c2c2e".to_string(),
            link: "#4da3ff".to_string(),
            link_hover: "#80bdff".to_string(),
            code_background: "#1c1c1e".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, so a user
///   `nav` array replaces the stock one rather than appending to it.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read `config.toml` from the content root as a raw TOML value.
///
/// `Ok(None)` when the root has no config file.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    toml::from_str(&text)
        .map(Some)
        .map_err(|source| ConfigError::Toml { path, source })
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
///
/// `origin` names the overlay's file in deserialization errors.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
    origin: &Path,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged
        .try_into()
        .map_err(|source| ConfigError::Toml {
            path: origin.to_path_buf(),
            source,
        })?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the content root, over stock defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay, &root.join(CONFIG_FILE))
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Blogfolio Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# == Site identity ==
[site]
title = "My Blog"

# Shown under the title on the index page and in its <meta> description.
description = ""

# Shown in the footer when non-empty.
author = ""

# Header navigation links, in order. Replaces the whole list when set.
nav = [
    { label = "Blog", href = "/" },
    { label = "About", href = "/about.html" },
]

# == Content locations (relative to the content directory) ==
[content]
# Directory holding one file per post.
posts_dir = "posts"

# Post file extension, without the dot.
extension = "md"

# About page source. The about page is skipped if the file is missing.
about_page = "about.md"

# JSON array of { dates, role, company, description, logo } records,
# rendered on the about page in file order.
experience_data = "experience.json"

# Copied verbatim into the output root (images, favicon, fonts).
assets_dir = "assets"

# Layout for posts whose front matter has no `layout` key: base, post, about.
default_layout = "post"

# == Build ==
[build]
# Maximum threads for reading content files.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_threads = 4

# == Colors - Light mode (prefers-color-scheme: light) ==
[colors.light]
background = "#ffffff"
text = "#1d1d1f"
text_muted = "#6e6e73"    # Dates, descriptions, footer
border = "#e5e5ea"
link = "#0066cc"
link_hover = "#004499"
code_background = "#f5f5f7"

# == Colors - Dark mode (prefers-color-scheme: dark) ==
[colors.dark]
background = "#111113"
text = "#f5f5f7"
text_muted = "#a1a1a6"
border = "#2c2c2e"
link = "#4da3ff"
link_hover = "#80bdff"
code_background = "#1c1c1e"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
{light}
}}

@media (prefers-color-scheme: dark) {{
    :root {{
{dark}
    }}
}}"#,
        light = scheme_vars(&colors.light, "    "),
        dark = scheme_vars(&colors.dark, "        "),
    )
}

fn scheme_vars(scheme: &ColorScheme, indent: &str) -> String {
    [
        ("--color-bg", &scheme.background),
        ("--color-text", &scheme.text),
        ("--color-text-muted", &scheme.text_muted),
        ("--color-border", &scheme.border),
        ("--color-link", &scheme.link),
        ("--color-link-hover", &scheme.link_hover),
        ("--color-code-bg", &scheme.code_background),
    ]
    .iter()
    .map(|(name, value)| format!("{indent}{name}: {value};"))
    .collect::<Vec<_>>()
    .join("\n")
}
