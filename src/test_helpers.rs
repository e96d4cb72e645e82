//! Shared test utilities for the folio test suite.
//!
//! Provides the fixture site, a pinned build context, and constructors for
//! posts and projects that skip the file parsers.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let content = load_content(tmp.path(), &BuildConfig::default(), &mut |_| {}).unwrap();
//!
//! let post = find_post(&content.posts, "first-steps");
//! assert_eq!(post.title, "First Steps in Rust");
//! ```

use chrono::{TimeZone, Utc};
use std::path::Path;
use tempfile::TempDir;

use crate::post::{Post, excerpt, parse_post_date, render_markdown};
use crate::project::{Priority, Project};
use crate::types::BuildContext;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Build context pinned to 2024-06-01 12:30:00 UTC.
pub fn fixed_context() -> BuildContext {
    BuildContext::at(Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap())
}

// =========================================================================
// Constructors
// =========================================================================

/// A post titled `Title of {slug}` with body `Body of {slug}`.
///
/// `date` is kept verbatim and parsed the way the loader would.
pub fn sample_post(slug: &str, date: &str) -> Post {
    let body = format!("Body of {slug}");
    Post {
        slug: slug.to_string(),
        source_file: format!("{slug}.md"),
        title: format!("Title of {slug}"),
        date: date.to_string(),
        category: "General".to_string(),
        icon: None,
        published: parse_post_date(date),
        front_matter: Default::default(),
        content: render_markdown(&body),
        excerpt: excerpt(&body, 150),
        raw_content: body,
    }
}

/// A project with an icon, two technologies and no links.
pub fn sample_project(slug: &str, priority: Priority) -> Project {
    Project {
        slug: slug.to_string(),
        source_file: format!("{slug}.json"),
        title: format!("Title of {slug}"),
        description: format!("Description of {slug}"),
        technologies: vec!["Rust".to_string(), "SQLite".to_string()],
        priority,
        icon: Some("🛠️".to_string()),
        image: None,
        github: None,
        link: None,
    }
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find a post by slug. Panics if not found.
pub fn find_post<'a>(posts: &'a [Post], slug: &str) -> &'a Post {
    posts.iter().find(|p| p.slug == slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
        panic!("post '{slug}' not found. Available: {slugs:?}")
    })
}

/// Find a project by slug. Panics if not found.
pub fn find_project<'a>(projects: &'a [Project], slug: &str) -> &'a Project {
    projects.iter().find(|p| p.slug == slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = projects.iter().map(|p| p.slug.as_str()).collect();
        panic!("project '{slug}' not found. Available: {slugs:?}")
    })
}
