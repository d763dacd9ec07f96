//! Slug and display-title derivation from content filenames.
//!
//! Every post is addressed by a slug taken from its filename stem, never from
//! its front-matter title: renaming a post's title must not move its URL.
//!
//! - `Protocol-Witnesses.md` → slug `protocol-witnesses`, title "Protocol Witnesses"
//! - `swift_concurrency.md` → slug `swift-concurrency`, title "swift concurrency"
//! - `Ünïcode Posts.md` → slug `unicode-posts`, title "Ünïcode Posts"
//!
//! The display title is only a fallback for posts whose front-matter has no
//! `title` key.

/// Result of parsing a content filename stem.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryName {
    /// URL- and filesystem-safe identifier. Empty if the stem has no
    /// alphanumeric characters at all.
    pub slug: String,
    /// Stem with `-` and `_` turned into spaces.
    pub display_title: String,
}

/// Derive slug and fallback title from a filename stem (no extension).
pub fn parse_entry_name(stem: &str) -> EntryName {
    EntryName {
        slug: slug::slugify(stem),
        display_title: stem.replace(['-', '_'], " ").trim().to_string(),
    }
}
