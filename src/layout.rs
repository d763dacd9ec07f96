//! Page shells: the shared document structure every page is wrapped in.
//!
//! A shell takes a [`PageContext`] (title, description, optional date) and an
//! already-rendered body fragment, and returns a complete HTML document. The
//! title and description go into `<head>`; the body goes into the shell's
//! content region untouched. Header navigation, footer, and CSS come from the
//! site config and are the same on every page.
//!
//! ## Shells
//!
//! | Shell   | Used for              | Content region                          |
//! |---------|-----------------------|-----------------------------------------|
//! | `base`  | index, plain pages    | optional `h1` + description, then body  |
//! | `post`  | blog posts            | article header (title, date, lede) + body |
//! | `about` | the about page        | `h1` + intro, then body                 |
//!
//! ## Identifiers
//!
//! Posts name their shell in front-matter, often as a path left over from
//! another generator (`layout: ../../layouts/BlogPost.astro`). [`Shell::resolve`]
//! keeps the last path segment, drops the extension, lowercases, and ignores
//! `-`/`_`, so `BlogPost.astro`, `blog-post` and `post` all pick the post
//! shell. Anything else is a [`LayoutError::NotFound`] at render time.

use crate::config::{self, NavLink, SiteConfig};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use thiserror::Error;

const CSS_STATIC: &str = include_str!("../static/style.css");

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("layout {0:?} not found (known layouts: base, post, about)")]
    NotFound(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Base,
    Post,
    About,
}

impl Shell {
    pub fn resolve(identifier: &str) -> Result<Shell, LayoutError> {
        let file = identifier
            .trim()
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default();
        let stem = match file.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => file,
        };
        let key: String = stem
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "base" | "layout" | "page" => Ok(Shell::Base),
            "post" | "blogpost" => Ok(Shell::Post),
            "about" => Ok(Shell::About),
            _ => Err(LayoutError::NotFound(identifier.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Shell::Base => "base",
            Shell::Post => "post",
            Shell::About => "about",
        }
    }
}

/// Per-page values substituted into a shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageContext<'a> {
    pub title: &'a str,
    pub description: &'a str,
    /// Display date (posts only).
    pub date: Option<&'a str>,
    /// Site-relative URL of the page, used to mark the current nav link.
    pub path: &'a str,
}

/// Wraps rendered bodies in shells. Holds everything shared across pages.
pub struct Compositor<'a> {
    config: &'a SiteConfig,
    css: String,
}

impl<'a> Compositor<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        let css = format!(
            "{}\n\n{}",
            config::generate_color_css(&config.colors),
            CSS_STATIC
        );
        Self { config, css }
    }

    /// Resolve `layout` and render the page. Fails only on an unknown layout.
    pub fn compose(
        &self,
        layout: &str,
        page: &PageContext,
        body: Markup,
    ) -> Result<Markup, LayoutError> {
        let shell = Shell::resolve(layout)?;
        Ok(self.compose_shell(shell, page, body))
    }

    pub fn compose_shell(&self, shell: Shell, page: &PageContext, body: Markup) -> Markup {
        let content = match shell {
            Shell::Base => base_content(page, body),
            Shell::Post => post_content(page, body),
            Shell::About => about_content(page, body),
        };
        let document_title = if page.title.is_empty() || page.title == self.config.site.title {
            self.config.site.title.clone()
        } else {
            format!("{} | {}", page.title, self.config.site.title)
        };

        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (document_title) }
                    @if !page.description.is_empty() {
                        meta name="description" content=(page.description);
                    }
                    meta property="og:title" content=(page.title);
                    style { (PreEscaped(&self.css)) }
                }
                body class={ "layout-" (shell.name()) } {
                    (site_header(&self.config.site.title, &self.config.site.nav, page.path))
                    (content)
                    (site_footer(&self.config.site.author))
                }
            }
        }
    }
}

fn site_header(site_title: &str, nav: &[NavLink], current_path: &str) -> Markup {
    html! {
        header.site-header {
            a.site-title href="/" { (site_title) }
            nav.site-nav {
                ul {
                    @for link in nav {
                        li class=[(link.href == current_path).then_some("current")] {
                            a href=(link.href) { (link.label) }
                        }
                    }
                }
            }
        }
    }
}

fn site_footer(author: &str) -> Markup {
    html! {
        footer.site-footer {
            @if !author.is_empty() {
                p { "© " (author) }
            }
        }
    }
}

fn base_content(page: &PageContext, body: Markup) -> Markup {
    html! {
        main.page {
            @if !page.title.is_empty() {
                h1.page-title { (page.title) }
            }
            @if !page.description.is_empty() {
                p.page-description { (page.description) }
            }
            (body)
        }
    }
}

fn post_content(page: &PageContext, body: Markup) -> Markup {
    html! {
        main {
            article.post {
                header.post-header {
                    h1 { (page.title) }
                    @if let Some(date) = page.date {
                        p.post-date { (date) }
                    }
                    @if !page.description.is_empty() {
                        p.post-description { (page.description) }
                    }
                }
                div.post-content {
                    (body)
                }
            }
        }
    }
}

fn about_content(page: &PageContext, body: Markup) -> Markup {
    html! {
        main.about-page {
            h1 { (page.title) }
            @if !page.description.is_empty() {
                p.page-description { (page.description) }
            }
            section.about-content {
                (body)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown;

    fn hello_page() -> PageContext<'static> {
        PageContext {
            title: "Hello",
            description: "World",
            date: Some("Jan 1, 2020"),
            path: "/posts/hello/",
        }
    }

    fn head_of(doc: &str) -> &str {
        let end = doc.find("</head>").unwrap();
        &doc[..end]
    }

    fn body_of(doc: &str) -> &str {
        let start = doc.find("<body").unwrap();
        &doc[start..]
    }

    #[test]
    fn resolve_plain_names() {
        assert_eq!(Shell::resolve("base"), Ok(Shell::Base));
        assert_eq!(Shell::resolve("post"), Ok(Shell::Post));
        assert_eq!(Shell::resolve("about"), Ok(Shell::About));
        assert_eq!(Shell::resolve("  Post  "), Ok(Shell::Post));
    }

    #[test]
    fn resolve_path_identifiers() {
        assert_eq!(
            Shell::resolve("../../layouts/BlogPost.astro"),
            Ok(Shell::Post)
        );
        assert_eq!(Shell::resolve("../layouts/Layout.astro"), Ok(Shell::Base));
        assert_eq!(Shell::resolve("layouts\\about.html"), Ok(Shell::About));
        assert_eq!(Shell::resolve("blog-post"), Ok(Shell::Post));
        assert_eq!(Shell::resolve("blog_post"), Ok(Shell::Post));
    }

    #[test]
    fn resolve_unknown_is_not_found() {
        assert_eq!(
            Shell::resolve("../layouts/Gallery.astro"),
            Err(LayoutError::NotFound("../layouts/Gallery.astro".to_string()))
        );
        assert!(Shell::resolve("").is_err());
    }

    #[test]
    fn post_shell_substitutes_head_and_body() {
        let config = SiteConfig::default();
        let compositor = Compositor::new(&config);
        let body = PreEscaped(markdown::to_html("# Hi"));

        let doc = compositor
            .compose("post", &hello_page(), body)
            .unwrap()
            .into_string();

        assert!(doc.starts_with("<!DOCTYPE html>"));
        let head = head_of(&doc);
        assert!(head.contains("Hello"));
        assert!(head.contains("World"));
        assert!(head.contains(r#"<meta name="description" content="World">"#));

        let body = body_of(&doc);
        assert!(body.contains("<h1>Hi</h1>"));
        assert!(body.contains("Jan 1, 2020"));
        assert!(body.contains("post-content"));
    }

    #[test]
    fn unknown_layout_fails_at_render_time() {
        let config = SiteConfig::default();
        let compositor = Compositor::new(&config);
        let result = compositor.compose("Gallery", &hello_page(), html! {});
        assert!(matches!(result, Err(LayoutError::NotFound(ref id)) if id == "Gallery"));
    }

    #[test]
    fn document_title_includes_site_title() {
        let mut config = SiteConfig::default();
        config.site.title = "Swift Notes".to_string();
        let compositor = Compositor::new(&config);

        let doc = compositor
            .compose_shell(Shell::Post, &hello_page(), html! {})
            .into_string();
        assert!(doc.contains("<title>Hello | Swift Notes</title>"));

        let index = PageContext {
            title: "Swift Notes",
            ..Default::default()
        };
        let doc = compositor
            .compose_shell(Shell::Base, &index, html! {})
            .into_string();
        assert!(doc.contains("<title>Swift Notes</title>"));
    }

    #[test]
    fn shared_chrome_on_every_shell() {
        let mut config = SiteConfig::default();
        config.site.author = "Jane Appleseed".to_string();
        let compositor = Compositor::new(&config);

        for shell in [Shell::Base, Shell::Post, Shell::About] {
            let doc = compositor
                .compose_shell(shell, &hello_page(), html! { p { "x" } })
                .into_string();
            assert!(doc.contains("site-header"));
            assert!(doc.contains(r#"href="/about.html""#));
            assert!(doc.contains("© Jane Appleseed"));
            assert!(doc.contains("--color-bg:"));
            assert!(doc.contains(&format!("layout-{}", shell.name())));
        }
    }

    #[test]
    fn current_nav_link_marked() {
        let config = SiteConfig::default();
        let compositor = Compositor::new(&config);
        let page = PageContext {
            title: "About",
            path: "/about.html",
            ..Default::default()
        };
        let doc = compositor
            .compose_shell(Shell::About, &page, html! {})
            .into_string();
        assert!(doc.contains(r#"<li class="current"><a href="/about.html">"#));
        assert!(doc.contains(r#"<li><a href="/">"#));
    }

    #[test]
    fn metadata_is_escaped_body_is_not() {
        let config = SiteConfig::default();
        let compositor = Compositor::new(&config);
        let page = PageContext {
            title: "<b>Title</b>",
            description: "\"quoted\"",
            ..Default::default()
        };
        let doc = compositor
            .compose_shell(Shell::Base, &page, PreEscaped("<em>raw</em>".to_string()))
            .into_string();
        assert!(doc.contains("&lt;b&gt;Title&lt;/b&gt;"));
        assert!(doc.contains("&quot;quoted&quot;"));
        assert!(doc.contains("<em>raw</em>"));
    }

    #[test]
    fn empty_description_omits_meta() {
        let config = SiteConfig::default();
        let compositor = Compositor::new(&config);
        let page = PageContext {
            title: "T",
            ..Default::default()
        };
        let doc = compositor
            .compose_shell(Shell::Base, &page, html! {})
            .into_string();
        assert!(!doc.contains(r#"name="description""#));
    }
}
