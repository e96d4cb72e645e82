//! In-place update of the landing page's project grid.
//!
//! The landing page is hand-authored; only the grid contents belong to the
//! build. Two anchors are recognised, tried in this order:
//!
//! 1. An explicit marker pair. Everything between the markers is replaced:
//!
//!    ```html
//!    <div class="projects-grid">
//!        <!-- folio:projects:start -->
//!        ...generated cards...
//!        <!-- folio:projects:end -->
//!    </div>
//!    ```
//!
//! 2. The grid container itself, recognised by its surrounding structure:
//!    `<div class="projects-grid">`, the grid contents, then two closing
//!    `</div>` and a closing `</section>`. This depends on the markup around
//!    the grid staying put; the markers do not.
//!
//! When neither anchor is present the page is left untouched.

use regex::Regex;
use std::sync::LazyLock;

pub const GRID_START_MARKER: &str = "<!-- folio:projects:start -->";
pub const GRID_END_MARKER: &str = "<!-- folio:projects:end -->";

static PROJECTS_GRID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)(<div class="projects-grid">)(.*?)(</div>\s*</div>\s*</section>)"#)
        .expect("projects grid pattern is valid")
});

/// Which anchor located the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAnchor {
    Markers,
    Container,
}

/// Replace the project grid contents of `page` with `grid`.
///
/// Returns the patched page, or `None` when no anchor was found.
pub fn patch_project_grid(page: &str, grid: &str) -> Option<(String, GridAnchor)> {
    if let Some(patched) = patch_between_markers(page, grid) {
        return Some((patched, GridAnchor::Markers));
    }
    patch_container(page, grid).map(|patched| (patched, GridAnchor::Container))
}

fn patch_between_markers(page: &str, grid: &str) -> Option<String> {
    let start = page.find(GRID_START_MARKER)? + GRID_START_MARKER.len();
    let end = start + page[start..].find(GRID_END_MARKER)?;

    let mut out = String::with_capacity(page.len() + grid.len());
    out.push_str(&page[..start]);
    out.push('\n');
    out.push_str(grid);
    out.push('\n');
    out.push_str(&page[end..]);
    Some(out)
}

fn patch_container(page: &str, grid: &str) -> Option<String> {
    let caps = PROJECTS_GRID.captures(page)?;
    let open = caps.get(1)?;
    let close = caps.get(3)?;

    let mut out = String::with_capacity(page.len() + grid.len());
    out.push_str(&page[..open.end()]);
    out.push('\n');
    out.push_str(grid);
    out.push_str("\n                ");
    out.push_str(&page[close.start()..]);
    Some(out)
}
