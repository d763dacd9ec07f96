//! Shared types passed between loading and generation.

use crate::front_matter::{FrontMatter, Metadata};
use std::path::PathBuf;

/// One content file after parsing: a post, or the about page.
///
/// Built once at load time and never mutated; generation consumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    /// URL slug derived from the filename stem.
    pub slug: String,
    /// Fallback title derived from the filename stem.
    pub link_title: String,
    pub source_path: PathBuf,
    /// Front-matter exactly as written.
    pub metadata: Metadata,
    /// Validated view of `metadata`.
    pub front_matter: FrontMatter,
    /// Raw markdown after the closing delimiter.
    pub body: String,
}

impl ContentItem {
    pub fn title(&self) -> &str {
        self.front_matter.title_or(&self.link_title)
    }

    pub fn description(&self) -> &str {
        self.front_matter.description()
    }

    /// Date as written in front-matter, if any.
    pub fn date_label(&self) -> Option<&str> {
        self.front_matter.date_formatted.as_deref()
    }

    /// Site-relative URL of the generated page.
    pub fn url(&self) -> String {
        format!("/posts/{}/", self.slug)
    }
}
