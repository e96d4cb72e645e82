//! Project descriptor parsing.
//!
//! A project is a JSON file:
//!
//! ```json
//! {
//!   "title": "Tiny Compiler",
//!   "description": "A toy compiler for a Lisp dialect.",
//!   "technologies": ["Rust", "LLVM"],
//!   "priority": "gold",
//!   "icon": "⚙️",
//!   "github": "https://github.com/example/tiny-compiler",
//!   "link": "https://tiny-compiler.example.com"
//! }
//! ```
//!
//! `title`, `description` and `technologies` are required. Everything else
//! has a default: an absent or unknown priority becomes `bronze`, and a
//! project with neither `icon` nor `image` gets the placeholder icon. The slug
//! always comes from the file name.

use crate::config::RenderConfig;
use crate::content::{self, Parsed, SourceItem};
use crate::types::ContentKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing required fields ({})", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// Problems corrected with a default while parsing a project.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectWarning {
    /// The declared priority is not one of the four tiers.
    InvalidPriority(String),
    /// Neither `icon` nor `image` was set.
    MissingMedia,
}

impl fmt::Display for ProjectWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectWarning::InvalidPriority(value) => {
                write!(f, "invalid priority '{value}', defaulting to 'bronze'")
            }
            ProjectWarning::MissingMedia => f.write_str("no icon or image provided, using default"),
        }
    }
}

/// Ordering tier of a project card. Higher tiers are listed first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Platinum,
    Gold,
    Silver,
    #[default]
    Bronze,
}

impl Priority {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "platinum" => Some(Priority::Platinum),
            "gold" => Some(Priority::Gold),
            "silver" => Some(Priority::Silver),
            "bronze" => Some(Priority::Bronze),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Platinum => "platinum",
            Priority::Gold => "gold",
            Priority::Silver => "silver",
            Priority::Bronze => "bronze",
        }
    }

    /// Sort rank: platinum 4, gold 3, silver 2, bronze 1.
    pub fn rank(self) -> u8 {
        match self {
            Priority::Platinum => 4,
            Priority::Gold => 3,
            Priority::Silver => 2,
            Priority::Bronze => 1,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated project. Always has a priority tier and an icon or image.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub slug: String,
    /// Source file name as found on disk.
    pub source_file: String,
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub priority: Priority,
    pub icon: Option<String>,
    pub image: Option<String>,
    pub github: Option<String>,
    pub link: Option<String>,
}

impl Project {
    /// The demo link, when it is set and differs from the GitHub URL.
    pub fn demo_link(&self) -> Option<&str> {
        self.link
            .as_deref()
            .filter(|link| self.github.as_deref() != Some(*link))
    }
}

/// The descriptor as written on disk. Unknown keys (including `slug`) are
/// accepted and ignored.
#[derive(Debug, Deserialize)]
struct ProjectDescriptor {
    title: Option<String>,
    description: Option<String>,
    technologies: Option<Vec<String>>,
    /// Any JSON value; a non-string priority is corrected, not rejected.
    priority: Option<Value>,
    icon: Option<String>,
    image: Option<String>,
    github: Option<String>,
    link: Option<String>,
}

/// A parsed project plus the defaults that had to be applied.
#[derive(Debug)]
pub struct ParsedProject {
    pub project: Project,
    pub warnings: Vec<ProjectWarning>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Parse and validate a project descriptor.
pub fn parse_project(
    text: &str,
    file_name: &str,
    default_icon: &str,
) -> Result<ParsedProject, ProjectError> {
    let descriptor: ProjectDescriptor = serde_json::from_str(text)?;

    let title = non_empty(descriptor.title);
    let description = non_empty(descriptor.description);
    let technologies = descriptor.technologies;

    let mut missing = Vec::new();
    if title.is_none() {
        missing.push("title");
    }
    if description.is_none() {
        missing.push("description");
    }
    if technologies.is_none() {
        missing.push("technologies");
    }
    let (Some(title), Some(description), Some(technologies)) = (title, description, technologies)
    else {
        return Err(ProjectError::MissingFields(missing));
    };

    let mut warnings = Vec::new();

    let priority = match descriptor.priority {
        None | Some(Value::Null) => Priority::default(),
        Some(Value::String(value)) if value.is_empty() => Priority::default(),
        Some(Value::String(value)) => Priority::parse(&value).unwrap_or_else(|| {
            warnings.push(ProjectWarning::InvalidPriority(value));
            Priority::default()
        }),
        Some(other) => {
            warnings.push(ProjectWarning::InvalidPriority(other.to_string()));
            Priority::default()
        }
    };

    let image = non_empty(descriptor.image);
    let mut icon = non_empty(descriptor.icon);
    if icon.is_none() && image.is_none() {
        warnings.push(ProjectWarning::MissingMedia);
        icon = Some(default_icon.to_string());
    }

    Ok(ParsedProject {
        project: Project {
            slug: content::slug_for(file_name),
            source_file: file_name.to_string(),
            title,
            description,
            technologies,
            priority,
            icon,
            image,
            github: non_empty(descriptor.github),
            link: non_empty(descriptor.link),
        },
        warnings,
    })
}

impl SourceItem for Project {
    const KIND: ContentKind = ContentKind::Project;
    const EXTENSION: &'static str = "json";

    type Error = ProjectError;

    fn parse_source(
        text: &str,
        file_name: &str,
        render: &RenderConfig,
    ) -> Result<Parsed<Self>, ProjectError> {
        let parsed = parse_project(text, file_name, &render.default_project_icon)?;
        Ok(Parsed {
            item: parsed.project,
            warnings: parsed.warnings.iter().map(ToString::to_string).collect(),
        })
    }

    fn title(&self) -> &str {
        &self.title
    }
}
