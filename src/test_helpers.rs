//! Shared test utilities for the blogfolio test suite.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let config = load_config(tmp.path()).unwrap();
//! let site = load_site(tmp.path(), config).unwrap();
//!
//! assert_post_order(&site, &["swift-concurrency", "protocol-witnesses"]);
//! let pages = render_site(&site).unwrap();
//! let index = find_page(&pages, "index.html");
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::generate::{RenderedPage, Site};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    for entry in WalkDir::new(&fixtures).min_depth(1) {
        let entry = entry.unwrap();
        let target = tmp.path().join(entry.path().strip_prefix(&fixtures).unwrap());
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).unwrap();
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
    tmp
}

/// Add a post file to the fixture copy's posts directory.
pub fn write_post(root: &Path, filename: &str, content: &str) {
    fs::write(root.join("posts").join(filename), content).unwrap();
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find a rendered page by output path. Panics if not found.
pub fn find_page<'a>(pages: &'a [RenderedPage], path: &str) -> &'a RenderedPage {
    pages
        .iter()
        .find(|p| p.path == Path::new(path))
        .unwrap_or_else(|| {
            let paths: Vec<String> = pages.iter().map(|p| p.path.display().to_string()).collect();
            panic!("page '{path}' not found. Available: {paths:?}")
        })
}

/// Assert the loaded posts' slugs, in order.
pub fn assert_post_order(site: &Site, expected: &[&str]) {
    let actual: Vec<&str> = site.posts.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(actual, expected, "post order mismatch");
}
