//! Page rendering.
//!
//! Pages come from hand-written HTML templates with literal `{{TOKEN}}`
//! placeholders; there is no template language beyond substitution. The
//! repeated fragments inserted into them (post cards, project cards) are
//! built with [maud](https://maud.lambda.xyz/).
//!
//! ## Placeholders
//!
//! | Template | Token | Replaced |
//! |----------|-------|----------|
//! | `blog-list.html` | `{{POSTS}}` | first occurrence, with every post card |
//! | `blog-list.html` | `{{POST_COUNT}}`, `{{YEAR}}` | first occurrence |
//! | `blog-post.html` | `{{TITLE}}` | every occurrence |
//! | `blog-post.html` | `{{DATE}}`, `{{CATEGORY}}`, `{{CONTENT}}`, `{{YEAR}}` | first occurrence |
//!
//! ## Escaping
//!
//! With `escape_html` on (the default), every text value interpolated into
//! markup is HTML-escaped. The rendered post body is the one exception: it is
//! already HTML and goes in verbatim. With `escape_html` off, values are
//! inserted raw.

use crate::config::RenderConfig;
use crate::post::Post;
use crate::project::Project;
use crate::types::BuildContext;
use maud::{Markup, PreEscaped, Render, html};

pub const POSTS: &str = "{{POSTS}}";
pub const POST_COUNT: &str = "{{POST_COUNT}}";
pub const YEAR: &str = "{{YEAR}}";
pub const TITLE: &str = "{{TITLE}}";
pub const DATE: &str = "{{DATE}}";
pub const CATEGORY: &str = "{{CATEGORY}}";
pub const CONTENT: &str = "{{CONTENT}}";

/// A template undergoing placeholder substitution.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Replace the first occurrence of `token`.
    pub fn replace_first(mut self, token: &str, value: &str) -> Self {
        if let Some(start) = self.source.find(token) {
            self.source.replace_range(start..start + token.len(), value);
        }
        self
    }

    /// Replace every occurrence of `token`.
    pub fn replace_all(mut self, token: &str, value: &str) -> Self {
        if self.source.contains(token) {
            self.source = self.source.replace(token, value);
        }
        self
    }

    pub fn into_string(self) -> String {
        self.source
    }
}

/// A text value that is escaped or not depending on config.
struct Text<'a> {
    value: &'a str,
    escape: bool,
}

impl Render for Text<'_> {
    fn render_to(&self, buffer: &mut String) {
        if self.escape {
            self.value.render_to(buffer);
        } else {
            buffer.push_str(self.value);
        }
    }
}

/// Rendering options resolved once per build.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    pub config: &'a RenderConfig,
    pub ctx: &'a BuildContext,
    /// Href prefix of post pages, relative to the listing page.
    pub posts_href: &'a str,
}

impl<'a> Renderer<'a> {
    fn text<'v>(&self, value: &'v str) -> Text<'v> {
        Text {
            value,
            escape: self.config.escape_html,
        }
    }

    fn text_string(&self, value: &str) -> String {
        html! { (Text { value, escape: self.config.escape_html }) }.into_string()
    }

    fn post_href(&self, post: &Post) -> String {
        format!("{}/{}.html", self.posts_href.trim_end_matches('/'), post.slug)
    }

    // ========================================================================
    // Blog listing
    // ========================================================================

    /// One card on the blog listing page.
    pub fn post_card(&self, post: &Post) -> Markup {
        let icon = post
            .icon
            .as_deref()
            .unwrap_or(&self.config.default_post_icon);
        let date = post.display_date();
        let href = self.post_href(post);

        html! {
            article.blog-post-card.published {
                div.blog-post-image {
                    span { (self.text(icon)) }
                }
                div.blog-post-content {
                    div.blog-post-meta {
                        (Text { value: &date, escape: self.config.escape_html })
                        " • "
                        (self.text(&post.category))
                    }
                    h3.blog-post-title {
                        a href=(href) { (self.text(&post.title)) }
                    }
                    p.blog-post-excerpt { (self.text(&post.excerpt)) }
                    a.read-more href=(href) { "Read More →" }
                }
            }
        }
    }

    /// All post cards, or the empty-state fragment when there are none.
    pub fn post_cards(&self, posts: &[Post]) -> String {
        if posts.is_empty() {
            return html! {
                div.no-posts {
                    p { "No blog posts yet. Check back soon!" }
                }
            }
            .into_string();
        }
        posts
            .iter()
            .map(|post| self.post_card(post).into_string())
            .collect()
    }

    /// Fill the listing template.
    pub fn blog_list(&self, template: &str, posts: &[Post]) -> String {
        Template::new(template)
            .replace_first(POSTS, &self.post_cards(posts))
            .replace_first(POST_COUNT, &posts.len().to_string())
            .replace_first(YEAR, &self.ctx.year.to_string())
            .into_string()
    }

    // ========================================================================
    // Post pages
    // ========================================================================

    /// Fill the post template for one post.
    pub fn post_page(&self, template: &str, post: &Post) -> String {
        Template::new(template)
            .replace_all(TITLE, &self.text_string(&post.title))
            .replace_first(DATE, &self.text_string(&post.display_date()))
            .replace_first(CATEGORY, &self.text_string(&post.category))
            .replace_first(CONTENT, &post.content)
            .replace_first(YEAR, &self.ctx.year.to_string())
            .into_string()
    }

    // ========================================================================
    // Project grid
    // ========================================================================

    /// One card of the landing-page project grid.
    ///
    /// An image wins over an icon when both are set. The demo link is only
    /// shown when it differs from the GitHub URL.
    pub fn project_card(&self, project: &Project) -> Markup {
        let media_class = if project.image.is_some() {
            "has-image"
        } else {
            "has-icon"
        };
        let demo = project.demo_link();
        let has_links = project.github.is_some() || demo.is_some();
        let comment = format!(
            "<!-- {} - Priority: {} -->",
            self.text_string(&project.title).replace("--", "- -"),
            project.priority
        );

        html! {
            (PreEscaped(comment))
            div.project-card data-priority=(project.priority.as_str()) {
                div class={ "project-card-img " (media_class) } {
                    @if let Some(image) = &project.image {
                        img.project-card-img-element src=(self.text(image)) alt=(self.text(&project.title));
                    } @else {
                        span { (self.text(project.icon.as_deref().unwrap_or(&self.config.default_project_icon))) }
                    }
                }
                div.project-card-content {
                    h3 { (self.text(&project.title)) }
                    div.tech-stack {
                        @for tech in &project.technologies {
                            span.tech-tag { (self.text(tech)) }
                        }
                    }
                    p { (self.text(&project.description)) }
                    @if has_links {
                        div.project-links {
                            @if let Some(github) = &project.github {
                                a.project-icon-link.github href=(self.text(github)) target="_blank" rel="noopener" title="View on GitHub" {
                                    img.project-link-icon src="assets/images/github-icon.webp" alt="GitHub";
                                }
                            }
                            @if let Some(link) = demo {
                                a.project-icon-link.demo href=(self.text(link)) target="_blank" rel="noopener" title="View Live Demo" {
                                    img.project-link-icon src="assets/images/demo-icon.png" alt="Demo";
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    /// All project cards, or the placeholder fragment when there are none.
    pub fn project_grid(&self, projects: &[Project]) -> String {
        if projects.is_empty() {
            return html! {
                div.no-projects {
                    p { "Projects loading..." }
                }
            }
            .into_string();
        }
        projects
            .iter()
            .map(|project| self.project_card(project).into_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
