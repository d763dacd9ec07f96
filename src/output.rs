//! CLI output formatting for `check`, `build` and `list`.
//!
//! Output leads with what a thing *is* (its position and title) and shows
//! where it came from on indented context lines, so a run reads like a
//! content inventory that can still be traced back to files.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Posts
//! 001 Structured Concurrency in Practice
//!     Source: posts/swift-concurrency.md
//!     Date: Jun 5, 2023
//!     Layout: ../../layouts/BlogPost.astro
//! 002 Result Builders Without SwiftUI
//!     Source: posts/result-builders.md
//!     Description: Building a tiny HTML DSL with @resultBuilder
//!
//! About
//!     Source: about.md
//!     Experience: 2 records
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! 001 Structured Concurrency in Practice → posts/swift-concurrency/index.html
//! 002 Result Builders Without SwiftUI → posts/result-builders/index.html
//! About Me → about.html
//!
//! Generated 2 posts, 1 index, 1 about page; copied 2 assets
//! ```
//!
//! ## List
//!
//! ```text
//! 2023-06-05  swift-concurrency  Structured Concurrency in Practice
//! ----------  draft-notes        draft notes
//! ```
//!
//! Each view has a `format_*` function returning `Vec<String>` and a
//! `print_*` wrapper that writes to stdout. Format functions do no I/O.

use crate::generate::{BuildReport, PageKind, Site};
use crate::types::ContentItem;
use std::path::Path;

/// Longest description shown on a context line, in characters.
const DESCRIPTION_WIDTH: usize = 60;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}

/// Show `path` relative to `root` when it lives under it.
fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn plural(n: usize, one: &str, many: &str) -> String {
    format!("{} {}", n, if n == 1 { one } else { many })
}

// ============================================================================
// check
// ============================================================================

/// Format what a build would read: posts in build order, the about page,
/// and experience data.
pub fn format_load_output(site: &Site, source_root: &Path) -> Vec<String> {
    let mut lines = vec!["Posts".to_string()];
    let ctx = indent(1);

    if site.posts.is_empty() {
        lines.push(format!("{ctx}(none)"));
    }
    for (i, post) in site.posts.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), post.title()));
        lines.push(format!(
            "{ctx}Source: {}",
            relative(&post.source_path, source_root)
        ));
        if let Some(date) = post.date_label() {
            lines.push(format!("{ctx}Date: {date}"));
        }
        if !post.description().is_empty() {
            lines.push(format!(
                "{ctx}Description: {}",
                truncate_desc(post.description(), DESCRIPTION_WIDTH)
            ));
        }
        if let Some(layout) = &post.front_matter.layout {
            lines.push(format!("{ctx}Layout: {layout}"));
        }
    }

    lines.push(String::new());
    lines.push("About".to_string());
    match &site.about {
        Some(about) => lines.push(format!(
            "{ctx}Source: {}",
            relative(&about.source_path, source_root)
        )),
        None => lines.push(format!("{ctx}Source: (none)")),
    }
    lines.push(format!(
        "{ctx}Experience: {}",
        plural(site.experience.len(), "record", "records")
    ));

    lines
}

pub fn print_load_output(site: &Site, source_root: &Path) {
    for line in format_load_output(site, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// build
// ============================================================================

/// Format the pages a build wrote, in write order, plus a summary line.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();
    let mut post_count = 0;
    let mut index_count = 0;
    let mut about_count = 0;

    for page in &report.pages {
        let path = page.path.display();
        match page.kind {
            PageKind::Index => {
                index_count += 1;
                lines.push(format!("Home → {path}"));
            }
            PageKind::Post => {
                post_count += 1;
                lines.push(format!(
                    "{} {} → {path}",
                    format_index(post_count),
                    page.title
                ));
            }
            PageKind::About => {
                about_count += 1;
                lines.push(format!("{} → {path}", page.title));
            }
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {}; copied {}",
        plural(post_count, "post", "posts"),
        plural(index_count, "index", "indexes"),
        plural(about_count, "about page", "about pages"),
        plural(report.assets_copied, "asset", "assets"),
    ));
    lines
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// list
// ============================================================================

/// One line per post: ISO date (or dashes), slug, title. Columns aligned.
pub fn format_post_list(posts: &[ContentItem]) -> Vec<String> {
    let slug_width = posts.iter().map(|p| p.slug.len()).max().unwrap_or(0);
    posts
        .iter()
        .map(|post| {
            let date = post
                .front_matter
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".repeat(10));
            format!(
                "{date}  {:<width$}  {}",
                post.slug,
                post.title(),
                width = slug_width
            )
        })
        .collect()
}

pub fn print_post_list(posts: &[ContentItem]) {
    for line in format_post_list(posts) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::parse_item;
    use crate::config::SiteConfig;
    use crate::experience::ExperienceRecord;
    use crate::generate::GeneratedPage;
    use std::path::PathBuf;

    fn post(root: &Path, file: &str, front_matter: &str) -> ContentItem {
        let text = format!("---\n{front_matter}\n---\nbody\n");
        parse_item(&root.join("posts").join(file), &text).unwrap()
    }

    fn site(posts: Vec<ContentItem>) -> Site {
        Site {
            config: SiteConfig::default(),
            posts,
            about: None,
            experience: vec![],
        }
    }

    #[test]
    fn format_index_pads_to_three_digits() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(999), "999");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn truncate_desc_short_and_long() {
        assert_eq!(truncate_desc("short", 10), "short");
        assert_eq!(truncate_desc("exactly10!", 10), "exactly10!");
        assert_eq!(truncate_desc("a longer description", 8), "a longer...");
        assert_eq!(truncate_desc("", 5), "");
    }

    #[test]
    fn truncate_desc_respects_char_boundaries() {
        assert_eq!(truncate_desc("ééééé", 2), "éé...");
    }

    #[test]
    fn load_output_lists_posts_with_context() {
        let root = PathBuf::from("/content");
        let posts = vec![
            post(
                &root,
                "swift-concurrency.md",
                "title: Concurrency\ndateFormatted: Jun 5, 2023\nlayout: post",
            ),
            post(&root, "notes.md", "description: Loose notes"),
        ];
        let lines = format_load_output(&site(posts), &root);

        assert_eq!(lines[0], "Posts");
        assert_eq!(lines[1], "001 Concurrency");
        assert_eq!(lines[2], "    Source: posts/swift-concurrency.md");
        assert_eq!(lines[3], "    Date: Jun 5, 2023");
        assert_eq!(lines[4], "    Layout: post");
        assert_eq!(lines[5], "002 notes");
        assert_eq!(lines[6], "    Source: posts/notes.md");
        assert_eq!(lines[7], "    Description: Loose notes");
    }

    #[test]
    fn load_output_about_section() {
        let root = PathBuf::from("/content");
        let mut s = site(vec![]);
        s.about = Some(parse_item(&root.join("about.md"), "---\ntitle: Me\n---\nhi").unwrap());
        s.experience = vec![ExperienceRecord {
            dates: "2020".into(),
            role: "Dev".into(),
            company: "Solo".into(),
            description: "d".into(),
            logo: "/l.png".into(),
        }];

        let lines = format_load_output(&s, &root);
        assert!(lines.contains(&"    (none)".to_string()));
        let about = lines.iter().position(|l| l == "About").unwrap();
        assert_eq!(lines[about + 1], "    Source: about.md");
        assert_eq!(lines[about + 2], "    Experience: 1 record");
    }

    #[test]
    fn build_output_lines_and_summary() {
        let report = BuildReport {
            pages: vec![
                GeneratedPage {
                    kind: PageKind::Index,
                    title: "Swift Notes".into(),
                    path: PathBuf::from("index.html"),
                },
                GeneratedPage {
                    kind: PageKind::Post,
                    title: "Protocol Witnesses".into(),
                    path: PathBuf::from("posts/protocol-witnesses/index.html"),
                },
                GeneratedPage {
                    kind: PageKind::About,
                    title: "About Me".into(),
                    path: PathBuf::from("about.html"),
                },
            ],
            assets_copied: 2,
        };

        let lines = format_build_output(&report);
        assert_eq!(lines[0], "Home → index.html");
        assert_eq!(
            lines[1],
            "001 Protocol Witnesses → posts/protocol-witnesses/index.html"
        );
        assert_eq!(lines[2], "About Me → about.html");
        assert_eq!(
            lines.last().unwrap(),
            "Generated 1 post, 1 index, 1 about page; copied 2 assets"
        );
    }

    #[test]
    fn post_list_aligns_columns_and_marks_undated() {
        let root = PathBuf::from("/content");
        let posts = vec![
            post(&root, "a-long-slug.md", "title: First\ndateFormatted: 2023-06-05"),
            post(&root, "short.md", "title: Second"),
        ];
        let lines = format_post_list(&posts);
        assert_eq!(lines[0], "2023-06-05  a-long-slug  First");
        assert_eq!(lines[1], "----------  short        Second");
    }

    #[test]
    fn post_list_empty() {
        assert!(format_post_list(&[]).is_empty());
    }
}
