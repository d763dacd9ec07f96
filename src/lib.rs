//! # Blogfolio
//!
//! A small static site generator for a personal blog and portfolio. Posts are
//! Markdown files with a front-matter block; an about page pairs a Markdown
//! intro with a JSON list of past roles.
//!
//! # Pipeline
//!
//! ```text
//! 1. Load     content/  →  Site          (front matter + bodies, experience)
//! 2. Render   Site      →  Vec<Page>     (all HTML, in memory)
//! 3. Write    pages     →  dist/         (only after every page rendered)
//! ```
//!
//! Loading validates everything a build needs: a malformed front-matter
//! block, an unparseable date, or a duplicate slug stops the build before a
//! single page is rendered. Rendering fails on an unknown layout. Writing
//! happens last, so a failed build never leaves a half-updated `dist/`.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`front_matter`] | `---` delimited `key: value` blocks, typed [`front_matter::FrontMatter`] view |
//! | [`naming`] | Slug and fallback title from a filename stem |
//! | [`collection`] | Reads a directory of posts into [`types::ContentItem`]s, sorting helpers |
//! | [`experience`] | Loads the experience JSON for the about page |
//! | [`markdown`] | Markdown body → HTML fragment |
//! | [`list`] | One fragment per record, post and experience templates |
//! | [`layout`] | Page shells (`base`, `post`, `about`) and shared chrome, using Maud |
//! | [`generate`] | Ties it together: load, render, write |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`output`] | CLI output formatting |
//!
//! # Ordering
//!
//! Nothing depends on directory listing order. Posts are read in filename
//! order and then sorted newest first by `dateFormatted`; posts without a
//! date come last and equal dates fall back to the slug. Experience records
//! keep their file order.

pub mod collection;
pub mod config;
pub mod experience;
pub mod front_matter;
pub mod generate;
pub mod layout;
pub mod list;
pub mod markdown;
pub mod naming;
pub mod output;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
