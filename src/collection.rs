//! Content collection loading.
//!
//! Reads every content file of one kind from a single directory and turns
//! each into a [`ContentItem`]:
//!
//! ```text
//! content/posts/
//! ├── protocol-witnesses.md     → slug "protocol-witnesses"
//! ├── swift-concurrency.md      → slug "swift-concurrency"
//! ├── notes.txt                 # wrong extension, ignored
//! └── .draft.md                 # hidden, ignored
//! ```
//!
//! ## Ordering
//!
//! `read_dir` order differs between platforms and filesystems, so it is never
//! used: the loader always returns items sorted by filename. Files are read
//! in parallel with rayon; the indexed collect keeps that filename order, and
//! errors are reported for the first failing file in the same order, so a
//! broken build fails the same way on every machine.
//!
//! Callers that want another order re-sort with [`sort_by`];
//! [`sort_by_date_desc`] is the blog index order (newest first, undated last,
//! equal dates by slug).
//!
//! ## Validation
//!
//! Each file must carry a well-formed front-matter block and a parseable
//! `dateFormatted` when present. Two files deriving the same slug would
//! overwrite each other's output, so that is an error too.

use crate::front_matter::{self, FrontMatter, FrontMatterError};
use crate::naming::parse_entry_name;
use crate::types::ContentItem;
use log::{debug, info};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed content in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },
    #[error("slug {slug:?} derived from both {} and {}", first.display(), second.display())]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
    #[error("cannot derive a slug from filename {}", path.display())]
    InvalidSlug { path: PathBuf },
}

/// Load every `*.{extension}` file in `dir`, sorted by filename.
///
/// The extension match is case-insensitive and takes no leading dot.
pub fn load_collection(dir: &Path, extension: &str) -> Result<Vec<ContentItem>, ContentError> {
    let unreadable = |source| ContentError::Unreadable {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(unreadable)? {
        let path = entry.map_err(unreadable)?.path();
        if is_content_file(&path, extension) {
            paths.push(path);
        }
    }
    paths.sort();

    let results: Vec<Result<ContentItem, ContentError>> =
        paths.par_iter().map(|p| load_item(p)).collect();
    let items = results.into_iter().collect::<Result<Vec<_>, _>>()?;

    check_unique_slugs(&items)?;
    info!("loaded {} items from {}", items.len(), dir.display());
    Ok(items)
}

/// Read and parse a single content file.
pub fn load_item(path: &Path) -> Result<ContentItem, ContentError> {
    let text = fs::read_to_string(path).map_err(|source| ContentError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("read {} ({} bytes)", path.display(), text.len());
    parse_item(path, &text)
}

/// Build a [`ContentItem`] from already-read text. `path` supplies the slug.
pub fn parse_item(path: &Path, text: &str) -> Result<ContentItem, ContentError> {
    let malformed = |source| ContentError::Malformed {
        path: path.to_path_buf(),
        source,
    };

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = parse_entry_name(&stem);
    if name.slug.is_empty() {
        return Err(ContentError::InvalidSlug {
            path: path.to_path_buf(),
        });
    }

    let parsed = front_matter::split(text).map_err(malformed)?;
    let front_matter = FrontMatter::from_metadata(&parsed.metadata).map_err(malformed)?;

    Ok(ContentItem {
        slug: name.slug,
        link_title: name.display_title,
        source_path: path.to_path_buf(),
        metadata: parsed.metadata,
        front_matter,
        body: parsed.body,
    })
}

fn is_content_file(path: &Path, extension: &str) -> bool {
    let hidden = path
        .file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(true);
    !hidden
        && path.is_file()
        && path
            .extension()
            .map(|e| e.to_string_lossy().eq_ignore_ascii_case(extension))
            .unwrap_or(false)
}

fn check_unique_slugs(items: &[ContentItem]) -> Result<(), ContentError> {
    let mut seen: HashMap<&str, &Path> = HashMap::new();
    for item in items {
        if let Some(first) = seen.insert(&item.slug, &item.source_path) {
            return Err(ContentError::DuplicateSlug {
                slug: item.slug.clone(),
                first: first.to_path_buf(),
                second: item.source_path.clone(),
            });
        }
    }
    Ok(())
}

/// Re-sort with a caller comparator. Stable.
pub fn sort_by<F>(items: &mut [ContentItem], compare: F)
where
    F: FnMut(&ContentItem, &ContentItem) -> Ordering,
{
    items.sort_by(compare);
}

/// Newest first; undated items after all dated ones; ties broken by slug.
pub fn compare_date_desc(a: &ContentItem, b: &ContentItem) -> Ordering {
    let by_date = match (a.front_matter.date, b.front_matter.date) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_date.then_with(|| a.slug.cmp(&b.slug))
}

pub fn sort_by_date_desc(items: &mut [ContentItem]) {
    sort_by(items, compare_date_desc);
}
