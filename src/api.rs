//! JSON API snapshots.
//!
//! Client-side scripts read two static documents instead of parsing pages:
//!
//! ```json
//! { "posts": [...], "lastUpdated": "2024-06-01T12:00:00.000Z", "totalPosts": 2 }
//! { "projects": [...], "lastUpdated": "2024-06-01T12:00:00.000Z", "totalProjects": 5 }
//! ```
//!
//! Both are plain projections of the sorted collections.

use crate::config::RenderConfig;
use crate::post::Post;
use crate::project::{Priority, Project};
use crate::types::BuildContext;
use chrono::SecondsFormat;
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const POSTS_FILE: &str = "blog.json";
pub const PROJECTS_FILE: &str = "projects.json";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsSnapshot {
    pub posts: Vec<PostSummary>,
    pub last_updated: String,
    pub total_posts: usize,
}

#[derive(Debug, Serialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub category: String,
    pub excerpt: String,
    pub icon: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsSnapshot {
    pub projects: Vec<ProjectSummary>,
    pub last_updated: String,
    pub total_projects: usize,
}

#[derive(Debug, Serialize)]
pub struct ProjectSummary {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub technologies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-06-01T12:00:00.000Z`.
fn timestamp(ctx: &BuildContext) -> String {
    ctx.generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn posts_snapshot(posts: &[Post], render: &RenderConfig, ctx: &BuildContext) -> PostsSnapshot {
    PostsSnapshot {
        posts: posts
            .iter()
            .map(|post| PostSummary {
                slug: post.slug.clone(),
                title: post.title.clone(),
                date: post.date.clone(),
                category: post.category.clone(),
                excerpt: post.excerpt.clone(),
                icon: post
                    .icon
                    .clone()
                    .unwrap_or_else(|| render.default_post_icon.clone()),
            })
            .collect(),
        last_updated: timestamp(ctx),
        total_posts: posts.len(),
    }
}

pub fn projects_snapshot(projects: &[Project], ctx: &BuildContext) -> ProjectsSnapshot {
    ProjectsSnapshot {
        projects: projects
            .iter()
            .map(|project| ProjectSummary {
                slug: project.slug.clone(),
                title: project.title.clone(),
                description: project.description.clone(),
                priority: project.priority,
                technologies: project.technologies.clone(),
                icon: project.icon.clone(),
                image: project.image.clone(),
                github: project.github.clone(),
                link: project.link.clone(),
            })
            .collect(),
        last_updated: timestamp(ctx),
        total_projects: projects.len(),
    }
}

/// Write a snapshot as pretty-printed JSON.
pub fn write_snapshot<T: Serialize>(path: &Path, snapshot: &T) -> Result<(), ApiError> {
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)?;
    Ok(())
}
