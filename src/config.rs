//! Build configuration module.
//!
//! Handles loading, validating, and merging `folio.toml`. The file is optional:
//! stock defaults describe the conventional site layout, and a `folio.toml` in
//! the site root overrides only the keys it names.
//!
//! ## Site Layout
//!
//! ```text
//! site/
//! ├── folio.toml                       # Build config (optional)
//! ├── index.html                       # Landing page (project grid patched in place)
//! ├── blog-content/
//! │   ├── posts/                       # One markdown file per post
//! │   │   └── hello-world.md
//! │   └── templates/
//! │       ├── blog-list.html           # {{POSTS}} {{POST_COUNT}} {{YEAR}}
//! │       └── blog-post.html           # {{TITLE}} {{DATE}} {{CATEGORY}} {{CONTENT}} {{YEAR}}
//! └── portfolio-content/
//!     └── projects/                    # One JSON descriptor per project
//!         └── compiler.json
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [content]
//! posts_dir = "blog-content/posts"
//! projects_dir = "portfolio-content/projects"
//! templates_dir = "blog-content/templates"
//!
//! [output]
//! blog_page = "blog.html"
//! posts_dir = "posts"
//! api_dir = "api"
//! landing_page = "index.html"
//!
//! [render]
//! excerpt_length = 150
//! default_post_icon = "📝"
//! default_project_icon = "📁"
//! escape_html = true
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the optional config file in the site root.
pub const CONFIG_FILE: &str = "folio.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Build configuration loaded from `folio.toml`.
///
/// All paths are relative to the site root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Where source content lives.
    pub content: ContentConfig,
    /// Where generated files go.
    pub output: OutputConfig,
    /// Rendering knobs.
    pub render: RenderConfig,
}

impl BuildConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let paths = [
            ("content.posts_dir", &self.content.posts_dir),
            ("content.projects_dir", &self.content.projects_dir),
            ("content.templates_dir", &self.content.templates_dir),
            ("output.blog_page", &self.output.blog_page),
            ("output.posts_dir", &self.output.posts_dir),
            ("output.api_dir", &self.output.api_dir),
            ("output.landing_page", &self.output.landing_page),
        ];
        for (key, value) in paths {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if self.render.excerpt_length == 0 {
            return Err(ConfigError::Validation(
                "render.excerpt_length must be greater than 0".into(),
            ));
        }
        if self.render.default_post_icon.is_empty() || self.render.default_project_icon.is_empty()
        {
            return Err(ConfigError::Validation(
                "render default icons must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Source content locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    /// Directory of markdown posts.
    pub posts_dir: String,
    /// Directory of JSON project descriptors.
    pub projects_dir: String,
    /// Directory holding `blog-list.html` and `blog-post.html`.
    pub templates_dir: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            posts_dir: "blog-content/posts".to_string(),
            projects_dir: "portfolio-content/projects".to_string(),
            templates_dir: "blog-content/templates".to_string(),
        }
    }
}

/// Generated file locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Blog listing page.
    pub blog_page: String,
    /// Directory receiving one `<slug>.html` per post.
    pub posts_dir: String,
    /// Directory receiving `blog.json` and `projects.json`.
    pub api_dir: String,
    /// Hand-authored landing page whose project grid is rewritten in place.
    pub landing_page: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            blog_page: "blog.html".to_string(),
            posts_dir: "posts".to_string(),
            api_dir: "api".to_string(),
            landing_page: "index.html".to_string(),
        }
    }
}

/// Rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Maximum excerpt length in characters, before the `...` suffix.
    pub excerpt_length: usize,
    /// Icon shown for posts without an `icon` front matter key.
    pub default_post_icon: String,
    /// Icon given to projects that declare neither `icon` nor `image`.
    pub default_project_icon: String,
    /// HTML-escape text interpolated into generated markup.
    /// Rendered post bodies are never escaped.
    pub escape_html: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            excerpt_length: 150,
            default_post_icon: "📝".to_string(),
            default_project_icon: "📁".to_string(),
            escape_html: true,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(BuildConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
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

/// Load `folio.toml` from the site root as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<BuildConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BuildConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `folio.toml` in the site root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<BuildConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `folio.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# folio configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Paths are relative to the site root.
# Unknown keys will cause an error.

[content]
# Markdown posts, one file per post. The file stem becomes the post slug.
posts_dir = "blog-content/posts"
# JSON project descriptors, one file per project.
projects_dir = "portfolio-content/projects"
# Must contain blog-list.html and blog-post.html.
templates_dir = "blog-content/templates"

[output]
# Blog listing page rendered from blog-list.html.
blog_page = "blog.html"
# One <slug>.html per post, rendered from blog-post.html.
posts_dir = "posts"
# JSON snapshots: blog.json and projects.json.
api_dir = "api"
# Existing landing page. Its project grid is rewritten in place, either
# between <!-- folio:projects:start --> and <!-- folio:projects:end -->
# or inside <div class="projects-grid">.
landing_page = "index.html"

[render]
# Excerpt length in characters (an ellipsis is appended when cut).
excerpt_length = 150
# Icon for posts without an `icon` front matter key.
default_post_icon = "📝"
# Icon for projects with neither `icon` nor `image`.
default_project_icon = "📁"
# Escape titles, categories, excerpts and descriptions before inserting them
# into HTML. Rendered post bodies are always inserted as-is.
escape_html = true
"##
}
