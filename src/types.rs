//! Shared types used across pipeline stages.

use chrono::{DateTime, Datelike, Local, Utc};
use std::fmt;

/// The two independent content collections a build reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Post,
    Project,
}

impl ContentKind {
    pub fn plural(self) -> &'static str {
        match self {
            ContentKind::Post => "posts",
            ContentKind::Project => "projects",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Post => f.write_str("post"),
            ContentKind::Project => f.write_str("project"),
        }
    }
}

/// Values fixed once per build and shared by every renderer and emitter.
///
/// Captured up front so that every page of one build shows the same year and
/// both snapshots carry the same timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildContext {
    /// Calendar year substituted for `{{YEAR}}`, in local time.
    pub year: i32,
    /// Written to the `lastUpdated` field of the JSON snapshots.
    pub generated_at: DateTime<Utc>,
}

impl BuildContext {
    pub fn now() -> Self {
        let now = Local::now();
        Self {
            year: now.year(),
            generated_at: now.with_timezone(&Utc),
        }
    }

    /// A context pinned to a given instant. Tests use this for stable output.
    pub fn at(generated_at: DateTime<Utc>) -> Self {
        Self {
            year: generated_at.year(),
            generated_at,
        }
    }
}
