use crate::errors::{AppError, AppResult};
use crate::models::Note;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

static DATE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^date:.*$").expect("valid regex"));

/// Renders the canonical archive block: front matter, body, then one blank
/// line so consecutive blocks in a day file stay separated.
pub fn render_note(note: &Note) -> AppResult<String> {
    let metadata = render_front_matter(note)?;
    Ok(format!("---\n{}---\n{}\n\n", metadata, note.content))
}

pub fn render_front_matter(note: &Note) -> AppResult<String> {
    let encoded = serde_yaml::to_string(&note.front_matter())
        .map_err(|error| AppError::Internal(format!("failed to encode front matter: {}", error)))?;
    let encoded = encoded.strip_prefix("---\n").unwrap_or(&encoded);

    let unquoted = unquote_date(encoded, &note.date);
    Ok(normalize_tag_list(&unquoted))
}

// The encoder may quote date-shaped strings; archive files keep them bare.
fn unquote_date(yaml: &str, date: &str) -> String {
    DATE_LINE
        .replace(yaml, NoExpand(&format!("date: {}", date)))
        .into_owned()
}

/// Rewrites the tag list as a two-space indented dash list, and an empty
/// list (`tags: []`) as a bare `tags:` header.
fn normalize_tag_list(yaml: &str) -> String {
    let mut out = String::with_capacity(yaml.len() + 16);
    let mut in_tags = false;
    let mut flush_left: Option<bool> = None;

    for line in yaml.lines() {
        if in_tags && (line.starts_with('-') || line.starts_with(' ')) {
            let shift = *flush_left.get_or_insert_with(|| line.starts_with('-'));
            if shift {
                out.push_str("  ");
            }
            out.push_str(line);
            out.push('\n');
            continue;
        }
        in_tags = false;

        match line {
            "tags: []" | "tags:" => {
                out.push_str("tags:\n");
                in_tags = line == "tags:";
            }
            _ => {
                out.push_str(line);
                out.push('\n');
            }
        }
    }

    out
}
