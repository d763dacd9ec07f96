//! Markdown to HTML.
//!
//! A thin wrapper over `pulldown-cmark` with the CommonMark extensions blog
//! posts tend to use (tables, footnotes, strikethrough, task lists). The
//! returned string is an HTML fragment meant to be inserted unescaped.

use pulldown_cmark::{Options, Parser, html};

pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
