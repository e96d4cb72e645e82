//! CLI output formatting for the build and check commands.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every post and
//! project leads with its positional index and title; the file it came from
//! is shown as secondary context via an indented `Source:` line. Generated
//! files are shown relative to the site root.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! ==> Reading posts
//! 001 First Steps in Rust
//!     Source: first-steps.md
//!     Skipped no-front-matter.md: invalid frontmatter format (...)
//! Loaded 2 posts
//! ==> Reading projects
//! 001 Tiny Compiler
//!     Source: compiler.json
//! Loaded 5 projects
//! ==> Rendering blog listing
//!     → blog.html
//! ==> Rendering post pages
//!     2 post pages → posts/
//! ==> Updating landing page
//!     5 projects → index.html (grid container)
//! ==> Writing API snapshots
//!     → api/blog.json
//!     → api/projects.json
//! ==> Build complete: 2 posts, 5 projects, 2 post pages
//! ```
//!
//! ## Check
//!
//! ```text
//! Posts
//! 001 Summer Update
//!     Source: summer-update.md
//!     June 1, 2024 • News
//!
//! Projects
//! 001 Tiny Compiler [platinum]
//!     Source: compiler.json
//!     Rust, LLVM
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper. Format functions are pure: no I/O,
//! no side effects. Events of warning or error severity are printed to
//! stderr, everything else to stdout.

use crate::landing::GridAnchor;
use crate::pipeline::{BuildEvent, BuildSummary, Content, Severity, Stage};
use crate::types::ContentKind;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// `1 post`, `2 posts`.
fn count_of(count: usize, kind: ContentKind) -> String {
    if count == 1 {
        format!("{} {}", count, kind)
    } else {
        format!("{} {}", count, kind.plural())
    }
}

/// Show `path` relative to `root` when it lies inside it.
fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn stage_label(stage: Stage) -> &'static str {
    match stage {
        Stage::ReadPosts => "Reading posts",
        Stage::ReadProjects => "Reading projects",
        Stage::BlogList => "Rendering blog listing",
        Stage::PostPages => "Rendering post pages",
        Stage::Landing => "Updating landing page",
        Stage::Api => "Writing API snapshots",
    }
}

fn anchor_label(anchor: GridAnchor) -> &'static str {
    match anchor {
        GridAnchor::Markers => "markers",
        GridAnchor::Container => "grid container",
    }
}

// ============================================================================
// Build events
// ============================================================================

/// Format a single build progress event as display lines.
pub fn format_build_event(event: &BuildEvent, root: &Path) -> Vec<String> {
    match event {
        BuildEvent::StageStarted(stage) => vec![format!("==> {}", stage_label(*stage))],
        BuildEvent::DirectoryMissing { kind, path } => vec![format!(
            "    No {} directory at {}",
            kind.plural(),
            relative(path, root)
        )],
        BuildEvent::NoSources { kind, path } => vec![format!(
            "    No {} found in {}",
            kind.plural(),
            relative(path, root)
        )],
        BuildEvent::Parsed {
            index, title, file, ..
        } => vec![
            format!("{} {}", format_index(*index), title),
            format!("    Source: {}", file),
        ],
        BuildEvent::Warning { file, message } => {
            vec![format!("    Warning: {}: {}", file, message)]
        }
        BuildEvent::Skipped { file, reason, .. } => {
            vec![format!("    Skipped {}: {}", file, reason)]
        }
        BuildEvent::Loaded { kind, count } => {
            vec![format!("Loaded {}", count_of(*count, *kind))]
        }
        BuildEvent::TemplateMissing { path } => vec![format!(
            "    Template not found: {}, skipping",
            relative(path, root)
        )],
        BuildEvent::PageWritten { path } | BuildEvent::SnapshotWritten { path } => {
            vec![format!("    \u{2192} {}", relative(path, root))]
        }
        BuildEvent::PostPagesWritten { count, dir } => vec![format!(
            "    {} post {} \u{2192} {}/",
            count,
            if *count == 1 { "page" } else { "pages" },
            relative(dir, root)
        )],
        BuildEvent::LandingMissing { path } => vec![format!(
            "    Landing page not found: {}, skipping",
            relative(path, root)
        )],
        BuildEvent::GridNotFound { path } => vec![format!(
            "    Warning: no project grid in {}, left unchanged",
            relative(path, root)
        )],
        BuildEvent::LandingPatched {
            path,
            anchor,
            projects,
        } => vec![format!(
            "    {} \u{2192} {} ({})",
            count_of(*projects, ContentKind::Project),
            relative(path, root),
            anchor_label(*anchor)
        )],
    }
}

/// Print a build event; warnings and errors go to stderr.
pub fn print_build_event(event: &BuildEvent, root: &Path) {
    let to_stderr = event.severity() != Severity::Info;
    for line in format_build_event(event, root) {
        if to_stderr {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

// ============================================================================
// Build summary
// ============================================================================

/// Format the closing lines of a build.
pub fn format_build_summary(summary: &BuildSummary) -> Vec<String> {
    let mut lines = vec![format!(
        "==> Build complete: {}, {}, {} post {}",
        count_of(summary.posts, ContentKind::Post),
        count_of(summary.projects, ContentKind::Project),
        summary.post_pages,
        if summary.post_pages == 1 { "page" } else { "pages" }
    )];
    if summary.blog_page.is_none() {
        lines.push("    Blog listing not written".to_string());
    }
    if summary.landing_page.is_none() {
        lines.push("    Landing page not updated".to_string());
    }
    lines
}

pub fn print_build_summary(summary: &BuildSummary) {
    for line in format_build_summary(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format the content inventory shown by `check`, in build order.
pub fn format_check_output(content: &Content) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Posts".to_string());
    if content.posts.is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, post) in content.posts.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), post.title));
        lines.push(format!("    Source: {}", post.source_file));
        lines.push(format!(
            "    {} \u{2022} {}",
            post.display_date(),
            post.category
        ));
    }

    lines.push(String::new());
    lines.push("Projects".to_string());
    if content.projects.is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, project) in content.projects.iter().enumerate() {
        lines.push(format!(
            "{} {} [{}]",
            format_index(i + 1),
            project.title,
            project.priority
        ));
        lines.push(format!("    Source: {}", project.source_file));
        if !project.technologies.is_empty() {
            lines.push(format!("    {}", project.technologies.join(", ")));
        }
    }

    lines
}

pub fn print_check_output(content: &Content) {
    for line in format_check_output(content) {
        println!("{}", line);
    }
}
