//! Repeated fragments: one piece of markup per record.
//!
//! [`render_list`] is a map-and-join over a slice. Order is the input order;
//! nothing is filtered, deduplicated, or paginated. [`try_render_list`] is the
//! fallible form: the first template error is returned unchanged and no
//! partial markup escapes.
//!
//! The two record templates used by the site live here too:
//! [`post_summary`] for the blog index and [`experience_entry`] for the about
//! page.

use crate::experience::ExperienceRecord;
use crate::types::ContentItem;
use maud::{Markup, PreEscaped, html};

pub fn render_list<T, F>(items: &[T], mut template: F) -> Markup
where
    F: FnMut(&T) -> Markup,
{
    let mut out = String::new();
    for item in items {
        out.push_str(&template(item).into_string());
    }
    PreEscaped(out)
}

pub fn try_render_list<T, E, F>(items: &[T], mut template: F) -> Result<Markup, E>
where
    F: FnMut(&T) -> Result<Markup, E>,
{
    let mut out = String::new();
    for item in items {
        out.push_str(&template(item)?.into_string());
    }
    Ok(PreEscaped(out))
}

/// Index entry for a post: linked title, date, description.
pub fn post_summary(item: &ContentItem) -> Markup {
    let datetime = item.front_matter.date.map(|d| d.to_string());
    html! {
        li.post-summary {
            a.post-link href=(item.url()) { (item.title()) }
            @if let Some(date) = item.date_label() {
                " "
                time.post-date datetime=[datetime] { (date) }
            }
            @if !item.description().is_empty() {
                p.post-description { (item.description()) }
            }
        }
    }
}

/// About-page entry for one role.
pub fn experience_entry(record: &ExperienceRecord) -> Markup {
    html! {
        li.experience {
            img.experience-logo src=(record.logo) alt={ (record.company) " logo" } loading="lazy";
            div.experience-body {
                h3.experience-role { (record.role) }
                p.experience-company { (record.company) }
                p.experience-dates { (record.dates) }
                p.experience-description { (record.description) }
            }
        }
    }
}
