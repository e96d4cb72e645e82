//! Collection ordering.
//!
//! Both sorts are stable: entries that compare equal keep the file-name order
//! the loader produced them in. Post dates usually have daily granularity, so
//! ties are common.

use crate::post::Post;
use crate::project::Project;
use std::cmp::Reverse;

/// Newest first, by full timestamp. Posts whose date could not be parsed go
/// last.
pub fn sort_posts(posts: &mut [Post]) {
    // `None < Some(_)`, so reversing the comparison also sinks undated posts.
    posts.sort_by(|a, b| b.published.cmp(&a.published));
}

/// Platinum, gold, silver, bronze.
pub fn sort_projects(projects: &mut [Project]) {
    projects.sort_by_key(|p| Reverse(p.priority.rank()));
}
