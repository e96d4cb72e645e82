//! # Folio
//!
//! A build tool for a personal site that pairs a blog with a project
//! portfolio. Markdown posts and JSON project descriptors are the data
//! source; hand-written HTML templates and a hand-written landing page are
//! the presentation.
//!
//! # Architecture: One-Pass Pipeline
//!
//! A build reads both collections, then writes every output in one pass:
//!
//! ```text
//! blog-content/posts/*.md            ─┐
//!                                      ├─→ blog.html, posts/<slug>.html
//! blog-content/templates/*.html      ─┘
//! portfolio-content/projects/*.json  ───→ index.html (project grid patched)
//! both collections                   ───→ api/blog.json, api/projects.json
//! ```
//!
//! Nothing is cached between runs. Every build regenerates every output from
//! the sources, so the outputs never drift from the content.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pipeline`] | Orchestrates a build; emits [`pipeline::BuildEvent`]s for progress |
//! | [`content`] | Lists and loads source files, skipping the ones that fail to parse |
//! | [`post`] | Front matter, markdown rendering, excerpts and dates for posts |
//! | [`project`] | Project descriptor parsing, validation and priority tiers |
//! | [`sort`] | Newest-first post order, tier order for projects |
//! | [`render`] | Template placeholder substitution and the card fragments (Maud) |
//! | [`landing`] | In-place replacement of the landing page's project grid |
//! | [`api`] | `blog.json` and `projects.json` snapshots |
//! | [`config`] | `folio.toml` loading, merging and validation |
//! | [`types`] | Shared types: content kinds and the per-build context |
//! | [`output`] | CLI output formatting for build progress and `check` |
//!
//! # Design Decisions
//!
//! ## Partial Failure Over Aborting
//!
//! One malformed post should not take the whole site down. A source file
//! that cannot be parsed is reported and left out; a missing template or
//! landing page skips only the output that depends on it. Only failures to
//! write outputs abort the build.
//!
//! ## Escaped By Default
//!
//! Titles, categories, excerpts and project fields are HTML-escaped when they
//! are placed into markup. The rendered post body is the single exception.
//! Sites that rely on raw HTML in those fields can turn escaping off with
//! `render.escape_html = false`.
//!
//! ## Markers For The Landing Grid
//!
//! The project grid is found through an explicit comment marker pair when the
//! landing page has one, falling back to the grid's surrounding markup. See
//! [`landing`].

pub mod api;
pub mod config;
pub mod content;
pub mod landing;
pub mod output;
pub mod pipeline;
pub mod post;
pub mod project;
pub mod render;
pub mod sort;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
