//! HTML site generation.
//!
//! Turns a content directory into a static site in three steps:
//!
//! 1. [`load_site`]: read config-driven inputs (posts, about page, experience
//!    data) into a [`Site`]. Posts come back newest first.
//! 2. [`render_site`]: render every page in memory.
//! 3. [`write_site`]: write the rendered pages and copy static assets.
//!
//! Rendering finishes before anything touches the output directory, so a
//! build that fails on its last post leaves no half-written site behind.
//! Writing goes to a sibling staging directory that replaces the output
//! directory only once every page and asset is in place, so pages from
//! earlier builds (a deleted or renamed post) never survive a rebuild.
//! An asset whose path would shadow a generated page is an error.
//!
//! ## Generated Pages
//!
//! ```text
//! dist/
//! ├── index.html                     # Post listing (base layout)
//! ├── about.html                     # About page + experience list
//! ├── posts/
//! │   ├── protocol-witnesses/
//! │   │   └── index.html             # One directory per post slug
//! │   └── ...
//! └── ...                            # content/assets/ copied verbatim
//! ```
//!
//! ## Input Structure
//!
//! ```text
//! content/
//! ├── config.toml                    # Optional, see [`crate::config`]
//! ├── about.md                       # Front matter + markdown intro
//! ├── experience.json                # Roles shown on the about page
//! ├── assets/                        # Logos, images, favicon
//! └── posts/
//!     ├── protocol-witnesses.md
//!     └── ...
//! ```

use crate::collection::{self, ContentError};
use crate::config::SiteConfig;
use crate::experience::{self, ExperienceError, ExperienceRecord};
use crate::layout::{Compositor, LayoutError, PageContext, Shell};
use crate::list;
use crate::markdown;
use crate::types::ContentItem;
use log::{debug, info};
use maud::{Markup, PreEscaped, html};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("cannot read assets: {0}")]
    Assets(#[from] walkdir::Error),
    #[error("asset {} would overwrite a generated page", path.display())]
    AssetCollision { path: PathBuf },
    #[error("refusing to replace {}: it is not a separate output directory", path.display())]
    UnsafeOutput { path: PathBuf },
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Experience(#[from] ExperienceError),
    #[error("{}: {source}", path.display())]
    Layout {
        path: PathBuf,
        #[source]
        source: LayoutError,
    },
}

/// Everything a build reads, loaded once.
#[derive(Debug)]
pub struct Site {
    pub config: SiteConfig,
    /// Newest first.
    pub posts: Vec<ContentItem>,
    pub about: Option<ContentItem>,
    /// File order.
    pub experience: Vec<ExperienceRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Index,
    Post,
    About,
}

/// A fully rendered page, not yet written.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub kind: PageKind,
    pub title: String,
    /// Relative to the output root.
    pub path: PathBuf,
    /// Source file the page came from, if any.
    pub source: Option<PathBuf>,
    pub html: String,
}

/// What a build produced, for CLI output.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub pages: Vec<GeneratedPage>,
    pub assets_copied: usize,
}

#[derive(Debug, Clone)]
pub struct GeneratedPage {
    pub kind: PageKind,
    pub title: String,
    pub path: PathBuf,
}

/// Load posts, the about page and experience data from a content root.
pub fn load_site(source: &Path, config: SiteConfig) -> Result<Site, GenerateError> {
    let posts_dir = source.join(&config.content.posts_dir);
    let mut posts = collection::load_collection(&posts_dir, &config.content.extension)?;
    collection::sort_by_date_desc(&mut posts);

    let about_path = source.join(&config.content.about_page);
    let about = if about_path.is_file() {
        Some(collection::load_item(&about_path)?)
    } else {
        None
    };

    let experience = experience::load_experience(&source.join(&config.content.experience_data))?;
    info!(
        "loaded {} posts, {} experience records, about page: {}",
        posts.len(),
        experience.len(),
        about.is_some()
    );

    Ok(Site {
        config,
        posts,
        about,
        experience,
    })
}

/// Render every page of the site. Stops at the first failure.
pub fn render_site(site: &Site) -> Result<Vec<RenderedPage>, GenerateError> {
    let compositor = Compositor::new(&site.config);
    let mut pages = Vec::with_capacity(site.posts.len() + 2);

    pages.push(render_index(site, &compositor));

    for post in &site.posts {
        pages.push(render_post(post, &site.config, &compositor)?);
    }

    if let Some(about) = render_about(site, &compositor)? {
        pages.push(about);
    }

    info!("rendered {} pages", pages.len());
    Ok(pages)
}

/// Write rendered pages and the assets directory, replacing `output`.
///
/// Everything is written to a staging directory next to `output` first; the
/// old output is removed and the staging directory renamed into place only
/// after that succeeds.
pub fn write_site(
    pages: &[RenderedPage],
    assets: &Path,
    output: &Path,
) -> Result<BuildReport, GenerateError> {
    let asset_files = list_assets(assets)?;
    check_asset_collisions(pages, &asset_files)?;

    let staging = staging_dir(output)?;
    if staging.exists() {
        remove_dir(&staging)?;
    }
    if let Err(err) = populate(&staging, pages, assets, &asset_files) {
        let _ = fs::remove_dir_all(&staging);
        return Err(err);
    }

    if output.exists() {
        remove_dir(output)?;
    }
    fs::rename(&staging, output).map_err(|source| GenerateError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    debug!("moved {} into place", staging.display());

    Ok(BuildReport {
        pages: pages
            .iter()
            .map(|page| GeneratedPage {
                kind: page.kind,
                title: page.title.clone(),
                path: page.path.clone(),
            })
            .collect(),
        assets_copied: asset_files.len(),
    })
}

/// Full build: render everything, then write.
pub fn generate(site: &Site, source: &Path, output: &Path) -> Result<BuildReport, GenerateError> {
    check_output_is_separate(source, output)?;
    let pages = render_site(site)?;
    let assets = source.join(&site.config.content.assets_dir);
    let report = write_site(&pages, &assets, output)?;
    info!("site generated at {}", output.display());
    Ok(report)
}

/// The output directory is deleted on every build, so it must not contain
/// the content it is built from.
fn check_output_is_separate(source: &Path, output: &Path) -> Result<(), GenerateError> {
    if let (Ok(out), Ok(src)) = (output.canonicalize(), source.canonicalize()) {
        if src.starts_with(&out) {
            return Err(GenerateError::UnsafeOutput {
                path: output.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// `dist` → `.dist.staging`, in the same parent so the final rename stays on
/// one filesystem.
fn staging_dir(output: &Path) -> Result<PathBuf, GenerateError> {
    let name = output
        .file_name()
        .ok_or_else(|| GenerateError::UnsafeOutput {
            path: output.to_path_buf(),
        })?;
    let staging = format!(".{}.staging", name.to_string_lossy());
    Ok(match output.parent() {
        Some(parent) => parent.join(staging),
        None => PathBuf::from(staging),
    })
}

fn remove_dir(path: &Path) -> Result<(), GenerateError> {
    fs::remove_dir_all(path).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn create_dir(path: &Path) -> Result<(), GenerateError> {
    fs::create_dir_all(path).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn populate(
    root: &Path,
    pages: &[RenderedPage],
    assets: &Path,
    asset_files: &[PathBuf],
) -> Result<(), GenerateError> {
    create_dir(root)?;
    for page in pages {
        let dest = root.join(&page.path);
        if let Some(parent) = dest.parent() {
            create_dir(parent)?;
        }
        fs::write(&dest, &page.html).map_err(|source| GenerateError::Write {
            path: dest.clone(),
            source,
        })?;
    }
    copy_assets(assets, asset_files, root)
}

fn render_index(site: &Site, compositor: &Compositor) -> RenderedPage {
    let body = html! {
        @if site.posts.is_empty() {
            p.empty { "No posts yet." }
        } @else {
            ul.post-list {
                (list::render_list(&site.posts, list::post_summary))
            }
        }
    };
    let page = PageContext {
        title: &site.config.site.title,
        description: &site.config.site.description,
        date: None,
        path: "/",
    };

    RenderedPage {
        kind: PageKind::Index,
        title: site.config.site.title.clone(),
        path: PathBuf::from("index.html"),
        source: None,
        html: compositor.compose_shell(Shell::Base, &page, body).into_string(),
    }
}

fn render_post(
    post: &ContentItem,
    config: &SiteConfig,
    compositor: &Compositor,
) -> Result<RenderedPage, GenerateError> {
    let layout = post
        .front_matter
        .layout
        .as_deref()
        .unwrap_or(config.content.default_layout.as_str());
    let url = post.url();
    let page = PageContext {
        title: post.title(),
        description: post.description(),
        date: post.date_label(),
        path: &url,
    };
    let body = PreEscaped(markdown::to_html(&post.body));
    let doc = compositor
        .compose(layout, &page, body)
        .map_err(|source| GenerateError::Layout {
            path: post.source_path.clone(),
            source,
        })?;

    Ok(RenderedPage {
        kind: PageKind::Post,
        title: post.title().to_string(),
        path: post_output_path(&post.slug),
        source: Some(post.source_path.clone()),
        html: doc.into_string(),
    })
}

/// Output path of a post, relative to the output root.
pub fn post_output_path(slug: &str) -> PathBuf {
    Path::new("posts").join(slug).join("index.html")
}

/// The about page is built when `about.md` exists or there is experience
/// data to show.
fn render_about(
    site: &Site,
    compositor: &Compositor,
) -> Result<Option<RenderedPage>, GenerateError> {
    if site.about.is_none() && site.experience.is_empty() {
        return Ok(None);
    }

    let (title, description, intro) = match &site.about {
        Some(about) => (
            about.front_matter.title_or("About"),
            about.description(),
            markdown::to_html(&about.body),
        ),
        None => ("About", "", String::new()),
    };
    let layout = site
        .about
        .as_ref()
        .and_then(|a| a.front_matter.layout.as_deref())
        .unwrap_or("about");

    let body = html! {
        (PreEscaped(intro))
        (experience_section(&site.experience))
    };
    let page = PageContext {
        title,
        description,
        date: None,
        path: "/about.html",
    };
    let source = site.about.as_ref().map(|a| a.source_path.clone());
    let doc = compositor
        .compose(layout, &page, body)
        .map_err(|err| GenerateError::Layout {
            path: source
                .clone()
                .unwrap_or_else(|| PathBuf::from(&site.config.content.about_page)),
            source: err,
        })?;

    Ok(Some(RenderedPage {
        kind: PageKind::About,
        title: title.to_string(),
        path: PathBuf::from("about.html"),
        source,
        html: doc.into_string(),
    }))
}

fn experience_section(records: &[ExperienceRecord]) -> Markup {
    html! {
        @if !records.is_empty() {
            section.experience-section {
                h2 { "Experience" }
                ul.experience-list {
                    (list::render_list(records, list::experience_entry))
                }
            }
        }
    }
}

/// Files under the assets directory, relative to it, in name order.
/// A missing directory has no assets.
fn list_assets(src: &Path) -> Result<Vec<PathBuf>, GenerateError> {
    if !src.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        if let Ok(rel) = entry.path().strip_prefix(src) {
            files.push(rel.to_path_buf());
        }
    }
    Ok(files)
}

/// An asset collides with a page when it sits at the page's path, or when
/// one path is a directory prefix of the other (`posts` as a file,
/// `index.html/x` under a page).
fn check_asset_collisions(pages: &[RenderedPage], assets: &[PathBuf]) -> Result<(), GenerateError> {
    for asset in assets {
        let collides = pages
            .iter()
            .any(|page| page.path.starts_with(asset) || asset.starts_with(&page.path));
        if collides {
            return Err(GenerateError::AssetCollision {
                path: asset.clone(),
            });
        }
    }
    Ok(())
}

fn copy_assets(src: &Path, files: &[PathBuf], dst: &Path) -> Result<(), GenerateError> {
    for rel in files {
        let target = dst.join(rel);
        if let Some(parent) = target.parent() {
            create_dir(parent)?;
        }
        fs::copy(src.join(rel), &target).map_err(|source| GenerateError::Write {
            path: target.clone(),
            source,
        })?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
