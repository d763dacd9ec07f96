//! Front-matter parsing for content files.
//!
//! Every post and the about page start with a metadata block fenced by a
//! `---` line on the very first line and another `---` line after the
//! metadata:
//!
//! ```text
//! ---
//! layout: ../../layouts/BlogPost.astro
//! title: "Protocol Witnesses in Swift"
//! description: "Replacing protocols with plain structs"
//! dateFormatted: Jan 1, 2020
//! ---
//!
//! # Protocol Witnesses
//! ...
//! ```
//!
//! The block is a flat list of `key: value` string pairs. There is no nesting,
//! no lists, and no type coercion: YAML is deliberately not involved, so a
//! value like `Jan 1, 2020` or `Swift: the good parts` needs no quoting.
//!
//! ## Two layers
//!
//! - [`split`] is the raw layer: it finds the fences, returns the key/value
//!   [`Metadata`] mapping and the untouched body. Unknown keys pass through.
//! - [`FrontMatter::from_metadata`] is the typed layer: named optional fields
//!   with documented defaults, validated once at load time so later stages
//!   never guess at stringly-typed keys.
//!
//! ## Value syntax
//!
//! - Bare: everything after the first `:`, trimmed.
//! - Double-quoted: `"..."`, with `\"`, `\\` and `\n` escapes.
//! - Single-quoted: `'...'`, taken verbatim except `''` for a literal quote.
//!
//! [`render_front_matter`] writes a mapping back in double-quoted form, so
//! `split(render_front_matter(m)?)` yields `m` again. Keys that `split` could
//! never have produced (empty, padded, containing `:` or a line break, or
//! starting with `#`) are refused with [`FrontMatterError::UnrenderableKey`].

use chrono::NaiveDate;
use std::collections::BTreeMap;
use thiserror::Error;

/// Fence line that opens and closes the metadata block.
pub const DELIMITER: &str = "---";

/// Accepted spellings of `dateFormatted`, tried in order.
const DATE_FORMATS: &[&str] = &["%b %d, %Y", "%B %d, %Y", "%Y-%m-%d", "%d %b %Y"];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrontMatterError {
    #[error("missing opening `---` delimiter on the first line")]
    MissingOpening,
    #[error("front matter is never closed by a `---` line")]
    Unterminated,
    #[error("line {line}: expected `key: value`")]
    InvalidLine { line: usize },
    #[error("dateFormatted {value:?} is not a recognized date")]
    InvalidDate { value: String },
    #[error("key {key:?} cannot be written as `key: value`")]
    UnrenderableKey { key: String },
}

/// Raw front-matter: key → value, as written.
pub type Metadata = BTreeMap<String, String>;

/// Output of [`split`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedContent {
    pub metadata: Metadata,
    /// Everything after the closing delimiter line, byte for byte.
    pub body: String,
}

/// Split a content file into its metadata block and body.
pub fn split(text: &str) -> Result<ParsedContent, FrontMatterError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.split_inclusive('\n');

    let first = match lines.next() {
        Some(first) if is_delimiter(first) => first,
        _ => return Err(FrontMatterError::MissingOpening),
    };

    // Locate the closing fence before interpreting anything, so an unclosed
    // block is reported as such rather than as a bad line from the body.
    let mut offset = first.len();
    let mut block = Vec::new();
    let mut body_start = None;
    for line in lines {
        offset += line.len();
        if is_delimiter(line) {
            body_start = Some(offset);
            break;
        }
        block.push(line);
    }
    let body_start = body_start.ok_or(FrontMatterError::Unterminated)?;

    let mut metadata = Metadata::new();
    for (idx, line) in block.iter().enumerate() {
        // Line 1 is the opening fence.
        let line_no = idx + 2;
        if let Some((key, value)) = parse_line(line, line_no)? {
            metadata.insert(key, value);
        }
    }

    Ok(ParsedContent {
        metadata,
        body: text[body_start..].to_string(),
    })
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

fn parse_line(line: &str, line_no: usize) -> Result<Option<(String, String)>, FrontMatterError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let (key, value) = trimmed
        .split_once(':')
        .ok_or(FrontMatterError::InvalidLine { line: line_no })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(FrontMatterError::InvalidLine { line: line_no });
    }
    Ok(Some((key.to_string(), unquote(value.trim()))))
}

fn unquote(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        unescape(&raw[1..raw.len() - 1])
    } else if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        raw[1..raw.len() - 1].replace("''", "'")
    } else {
        raw.to_string()
    }
}

fn unescape(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// Serialize a mapping as a fenced front-matter block (trailing newline included).
pub fn render_front_matter(metadata: &Metadata) -> Result<String, FrontMatterError> {
    let mut out = format!("{DELIMITER}\n");
    for (key, value) in metadata {
        if !is_renderable_key(key) {
            return Err(FrontMatterError::UnrenderableKey { key: key.clone() });
        }
        out.push_str(&format!("{key}: \"{}\"\n", escape(value)));
    }
    out.push_str(DELIMITER);
    out.push('\n');
    Ok(out)
}

/// A key `parse_line` would read back unchanged.
fn is_renderable_key(key: &str) -> bool {
    !key.is_empty()
        && key.trim() == key
        && !key.starts_with('#')
        && !key.contains([':', '\n', '\r'])
}

/// Parse a `dateFormatted` value such as `Jan 1, 2020` or `2020-01-01`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Typed view over the recognized front-matter keys.
///
/// | Key             | Field            | Default when absent or empty          |
/// |-----------------|------------------|---------------------------------------|
/// | `title`         | `title`          | display title derived from filename   |
/// | `description`   | `description`    | empty string                          |
/// | `dateFormatted` | `date`           | undated; sorts after every dated post |
/// | `layout`        | `layout`         | `content.default_layout` from config  |
///
/// Any other key lands in `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    /// The date as written, kept for display.
    pub date_formatted: Option<String>,
    pub date: Option<NaiveDate>,
    pub layout: Option<String>,
    pub extra: Metadata,
}

impl FrontMatter {
    /// Validate a raw mapping into typed fields.
    ///
    /// Fails only when `dateFormatted` is present but unparseable.
    pub fn from_metadata(metadata: &Metadata) -> Result<Self, FrontMatterError> {
        let mut fm = FrontMatter::default();
        for (key, value) in metadata {
            let present = (!value.trim().is_empty()).then(|| value.clone());
            match key.as_str() {
                "title" => fm.title = present,
                "description" => fm.description = present,
                "layout" => fm.layout = present,
                "dateFormatted" => {
                    if let Some(text) = present {
                        let date = parse_date(&text)
                            .ok_or_else(|| FrontMatterError::InvalidDate { value: text.clone() })?;
                        fm.date = Some(date);
                        fm.date_formatted = Some(text);
                    }
                }
                _ => {
                    fm.extra.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(fm)
    }

    pub fn title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(fallback)
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}
