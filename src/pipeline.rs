//! Build orchestration.
//!
//! Runs the stages in order, once:
//!
//! ```text
//! 1. Read posts       blog-content/posts/*.md              → sorted Vec<Post>
//! 2. Read projects    portfolio-content/projects/*.json    → sorted Vec<Project>
//! 3. Blog listing     templates/blog-list.html             → blog.html
//! 4. Post pages       templates/blog-post.html             → posts/<slug>.html
//! 5. Landing page     index.html                           → index.html (patched)
//! 6. API snapshots                                         → api/blog.json, api/projects.json
//! ```
//!
//! Progress is reported through [`BuildEvent`]s handed to a caller-supplied
//! callback; the pipeline itself never prints.
//!
//! ## Failure Handling
//!
//! - A source file that cannot be read or parsed is skipped (`Skipped` event).
//! - A missing content directory yields an empty collection.
//! - A missing template or landing page skips that one stage; later stages
//!   still run.
//! - Any other error (an output that cannot be written, an unreadable
//!   directory) aborts the build and is returned to the caller.

use crate::api::{self, ApiError};
use crate::config::BuildConfig;
use crate::content::load_collection;
use crate::landing::{self, GridAnchor};
use crate::post::Post;
use crate::project::Project;
use crate::render::Renderer;
use crate::sort::{sort_posts, sort_projects};
use crate::types::{BuildContext, ContentKind};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const BLOG_LIST_TEMPLATE: &str = "blog-list.html";
pub const BLOG_POST_TEMPLATE: &str = "blog-post.html";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to write API snapshot: {0}")]
    Api(#[from] ApiError),
}

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ReadPosts,
    ReadProjects,
    BlogList,
    PostPages,
    Landing,
    Api,
}

/// How serious an event is; decides where it is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Progress reported while building.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildEvent {
    StageStarted(Stage),
    /// A content directory does not exist.
    DirectoryMissing { kind: ContentKind, path: PathBuf },
    /// A content directory exists but holds no sources.
    NoSources { kind: ContentKind, path: PathBuf },
    /// A source file parsed; `index` is its 1-based position in file order.
    Parsed {
        kind: ContentKind,
        index: usize,
        title: String,
        file: String,
    },
    /// A value was corrected with a default; the item is kept.
    Warning { file: String, message: String },
    /// A source file was excluded from the build.
    Skipped {
        kind: ContentKind,
        file: String,
        reason: String,
    },
    Loaded { kind: ContentKind, count: usize },
    TemplateMissing { path: PathBuf },
    PageWritten { path: PathBuf },
    PostPagesWritten { count: usize, dir: PathBuf },
    LandingMissing { path: PathBuf },
    /// The landing page has no recognisable project grid.
    GridNotFound { path: PathBuf },
    LandingPatched {
        path: PathBuf,
        anchor: GridAnchor,
        projects: usize,
    },
    SnapshotWritten { path: PathBuf },
}

impl BuildEvent {
    pub fn severity(&self) -> Severity {
        match self {
            BuildEvent::Skipped { .. }
            | BuildEvent::TemplateMissing { .. }
            | BuildEvent::LandingMissing { .. } => Severity::Error,
            BuildEvent::Warning { .. } | BuildEvent::GridNotFound { .. } => Severity::Warning,
            _ => Severity::Info,
        }
    }
}

/// Both collections, sorted.
#[derive(Debug, Default)]
pub struct Content {
    pub posts: Vec<Post>,
    pub projects: Vec<Project>,
}

/// What a build produced.
#[derive(Debug, Default, PartialEq)]
pub struct BuildSummary {
    pub posts: usize,
    pub projects: usize,
    /// `None` when the listing template was missing.
    pub blog_page: Option<PathBuf>,
    pub post_pages: usize,
    /// `None` when the landing page was missing or had no grid.
    pub landing_page: Option<PathBuf>,
    pub snapshots: Vec<PathBuf>,
}

/// Read, parse and sort both collections.
pub fn load_content(
    root: &Path,
    config: &BuildConfig,
    on_event: &mut dyn FnMut(BuildEvent),
) -> Result<Content, BuildError> {
    on_event(BuildEvent::StageStarted(Stage::ReadPosts));
    let mut posts: Vec<Post> = load_collection(
        &root.join(&config.content.posts_dir),
        &config.render,
        on_event,
    )?;
    sort_posts(&mut posts);
    on_event(BuildEvent::Loaded {
        kind: ContentKind::Post,
        count: posts.len(),
    });

    on_event(BuildEvent::StageStarted(Stage::ReadProjects));
    let mut projects: Vec<Project> = load_collection(
        &root.join(&config.content.projects_dir),
        &config.render,
        on_event,
    )?;
    sort_projects(&mut projects);
    on_event(BuildEvent::Loaded {
        kind: ContentKind::Project,
        count: projects.len(),
    });

    Ok(Content { posts, projects })
}

/// Run the full build rooted at `root`.
pub fn build(
    root: &Path,
    config: &BuildConfig,
    ctx: &BuildContext,
    on_event: &mut dyn FnMut(BuildEvent),
) -> Result<BuildSummary, BuildError> {
    fs::create_dir_all(root.join(&config.output.posts_dir))?;
    fs::create_dir_all(root.join(&config.output.api_dir))?;

    let content = load_content(root, config, on_event)?;
    let renderer = Renderer {
        config: &config.render,
        ctx,
        posts_href: &config.output.posts_dir,
    };

    let blog_page = write_blog_list(root, config, &renderer, &content.posts, on_event)?;
    let post_pages = write_post_pages(root, config, &renderer, &content.posts, on_event)?;
    let landing_page = patch_landing(root, config, &renderer, &content.projects, on_event)?;
    let snapshots = write_snapshots(root, config, ctx, &content, on_event)?;

    Ok(BuildSummary {
        posts: content.posts.len(),
        projects: content.projects.len(),
        blog_page,
        post_pages,
        landing_page,
        snapshots,
    })
}

/// Read a template, reporting it as missing when it does not exist.
fn read_template(
    path: &Path,
    on_event: &mut dyn FnMut(BuildEvent),
) -> Result<Option<String>, BuildError> {
    if !path.is_file() {
        on_event(BuildEvent::TemplateMissing {
            path: path.to_path_buf(),
        });
        return Ok(None);
    }
    Ok(Some(fs::read_to_string(path)?))
}

fn write_blog_list(
    root: &Path,
    config: &BuildConfig,
    renderer: &Renderer,
    posts: &[Post],
    on_event: &mut dyn FnMut(BuildEvent),
) -> Result<Option<PathBuf>, BuildError> {
    on_event(BuildEvent::StageStarted(Stage::BlogList));
    let template_path = root
        .join(&config.content.templates_dir)
        .join(BLOG_LIST_TEMPLATE);
    let Some(template) = read_template(&template_path, on_event)? else {
        return Ok(None);
    };

    let out_path = root.join(&config.output.blog_page);
    fs::write(&out_path, renderer.blog_list(&template, posts))?;
    on_event(BuildEvent::PageWritten {
        path: out_path.clone(),
    });
    Ok(Some(out_path))
}

fn write_post_pages(
    root: &Path,
    config: &BuildConfig,
    renderer: &Renderer,
    posts: &[Post],
    on_event: &mut dyn FnMut(BuildEvent),
) -> Result<usize, BuildError> {
    if posts.is_empty() {
        return Ok(0);
    }

    on_event(BuildEvent::StageStarted(Stage::PostPages));
    let template_path = root
        .join(&config.content.templates_dir)
        .join(BLOG_POST_TEMPLATE);
    let Some(template) = read_template(&template_path, on_event)? else {
        return Ok(0);
    };

    let out_dir = root.join(&config.output.posts_dir);
    for post in posts {
        let html = renderer.post_page(&template, post);
        fs::write(out_dir.join(format!("{}.html", post.slug)), html)?;
    }
    on_event(BuildEvent::PostPagesWritten {
        count: posts.len(),
        dir: out_dir,
    });
    Ok(posts.len())
}

fn patch_landing(
    root: &Path,
    config: &BuildConfig,
    renderer: &Renderer,
    projects: &[Project],
    on_event: &mut dyn FnMut(BuildEvent),
) -> Result<Option<PathBuf>, BuildError> {
    on_event(BuildEvent::StageStarted(Stage::Landing));
    let path = root.join(&config.output.landing_page);
    if !path.is_file() {
        on_event(BuildEvent::LandingMissing { path });
        return Ok(None);
    }

    let page = fs::read_to_string(&path)?;
    let grid = renderer.project_grid(projects);
    let Some((patched, anchor)) = landing::patch_project_grid(&page, &grid) else {
        on_event(BuildEvent::GridNotFound { path });
        return Ok(None);
    };

    fs::write(&path, patched)?;
    on_event(BuildEvent::LandingPatched {
        path: path.clone(),
        anchor,
        projects: projects.len(),
    });
    Ok(Some(path))
}

fn write_snapshots(
    root: &Path,
    config: &BuildConfig,
    ctx: &BuildContext,
    content: &Content,
    on_event: &mut dyn FnMut(BuildEvent),
) -> Result<Vec<PathBuf>, BuildError> {
    on_event(BuildEvent::StageStarted(Stage::Api));
    let api_dir = root.join(&config.output.api_dir);

    let posts_path = api_dir.join(api::POSTS_FILE);
    api::write_snapshot(
        &posts_path,
        &api::posts_snapshot(&content.posts, &config.render, ctx),
    )?;
    on_event(BuildEvent::SnapshotWritten {
        path: posts_path.clone(),
    });

    let projects_path = api_dir.join(api::PROJECTS_FILE);
    api::write_snapshot(
        &projects_path,
        &api::projects_snapshot(&content.projects, ctx),
    )?;
    on_event(BuildEvent::SnapshotWritten {
        path: projects_path.clone(),
    });

    Ok(vec![posts_path, projects_path])
}
