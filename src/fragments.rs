//! HTML fragments spliced into the page after a create or update succeeds.

use crate::models::JournalEntry;

/// How the entry body is interpolated.
///
/// Entry text arrives from the server as rendered Markdown, so the page inserts
/// it as live markup. `Escaped` exists for callers that cannot trust the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    RawHtml,
    Escaped,
}

const CREATED_FRAGMENT: &str = concat!(
    "<article id=\"entry-{{ID}}\">",
    "<a href=\"/detail/{{ID}}\"><h1 class=\"headingLink\">{{TITLE}}</h1></a>",
    "<p><small>{{CREATED}}</small></p>",
    "<div>{{TEXT}}<br>",
    "<hr class=\"titleDivider\"></div>",
    "</article>",
);

const UPDATED_FRAGMENT: &str = concat!(
    "<div class=\"detailForm\">",
    "<article id=\"entry-{{ID}}\">",
    "<h1 class=\"headingLink\">{{TITLE}}</h1>",
    "<p><small>{{CREATED}}</small></p>",
    "<div>{{TEXT}}<br><br>",
    "<hr class=\"titleDivider\">",
    "</div></article></div>",
);

/// Fragment shown under the create form for a freshly added entry.
pub fn render_created(entry: &JournalEntry, mode: TextMode) -> String {
    render(CREATED_FRAGMENT, entry, mode)
}

/// Detail panel that replaces the edit form after an update.
pub fn render_updated(entry: &JournalEntry, mode: TextMode) -> String {
    render(UPDATED_FRAGMENT, entry, mode)
}

fn render(template: &str, entry: &JournalEntry, mode: TextMode) -> String {
    let id = entry.id.map(|id| id.to_string()).unwrap_or_default();
    let text = match mode {
        TextMode::RawHtml => entry.text.clone(),
        TextMode::Escaped => escape_html(&entry.text),
    };
    fill(
        template,
        &[
            ("ID", escape_html(&id)),
            ("TITLE", escape_html(&entry.title)),
            ("CREATED", escape_html(&entry.created)),
            ("TEXT", text),
        ],
    )
}

/// Substitutes `{{KEY}}` markers in one pass; inserted values are never
/// rescanned. Unknown markers are kept as written.
pub(crate) fn fill(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = &after[..end];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
