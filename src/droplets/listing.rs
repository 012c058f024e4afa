//! Droplet table rendering.
//!
//! Droplets are shown most recent first. Droplets without a creation time sort
//! after every timestamped one and keep their relative order.

use crate::model::Droplet;
use chrono::{DateTime, Local, Utc};
use std::cmp::Ordering;
use unicode_width::UnicodeWidthStr;

pub const NAME_HEADER: &str = "Droplet";
pub const CREATED_HEADER: &str = "Created At";

const GUTTER: usize = 2;

pub fn sort_droplets(droplets: &mut [Droplet]) {
    droplets.sort_by(|a, b| match (&a.created_at, &b.created_at) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// e.g. "June 15, 2015"
pub fn format_created(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%B %-d, %Y").to_string()
}

/// Header plus one line per droplet, in the order given.
pub fn render_table(droplets: &[Droplet]) -> Vec<String> {
    let name_width = droplets
        .iter()
        .map(|d| d.name.width())
        .chain(std::iter::once(NAME_HEADER.width()))
        .max()
        .unwrap_or(0)
        + GUTTER;

    let mut lines = Vec::with_capacity(droplets.len() + 1);
    lines.push(row(NAME_HEADER, Some(CREATED_HEADER), name_width));
    for droplet in droplets {
        let created = droplet.created_at.as_ref().map(format_created);
        lines.push(row(&droplet.name, created.as_deref(), name_width));
    }
    lines
}

fn row(name: &str, created: Option<&str>, name_width: usize) -> String {
    match created {
        Some(created) => {
            let padding = name_width.saturating_sub(name.width());
            format!("{}{}{}", name, " ".repeat(padding), created)
        }
        None => name.to_string(),
    }
}
