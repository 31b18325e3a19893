use once_cell::sync::Lazy;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use std::borrow::Cow;

const CODE_OPEN: &str = "<div class=\"codehilite\">";
const CODE_CLOSE: &str = "</div>";

static TIGHT_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^( {0,3})(#{1,6})([^#\s])").expect("valid heading regex"));
static FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ {0,3}(`{3,}|~{3,})").expect("valid fence regex"));

/// Renders entry Markdown to HTML. Fenced and indented code blocks are wrapped
/// in a `codehilite` container for the page stylesheet.
pub fn render_markdown(input: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let input = loosen_headings(input);
    let parser = Parser::new_ext(&input, options).flat_map(|event| match event {
        Event::Start(Tag::CodeBlock(kind)) => vec![
            Event::Html(CowStr::Borrowed(CODE_OPEN)),
            Event::Start(Tag::CodeBlock(kind)),
        ],
        Event::End(TagEnd::CodeBlock) => vec![
            Event::End(TagEnd::CodeBlock),
            Event::Html(CowStr::Borrowed(CODE_CLOSE)),
        ],
        other => vec![other],
    });

    let mut output = String::with_capacity(input.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

/// Accepts `##Title` as a heading by inserting the space CommonMark requires.
/// Lines inside fenced code are left alone.
fn loosen_headings(input: &str) -> Cow<'_, str> {
    if !input.contains('#') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 8);
    let mut fence: Option<String> = None;
    for line in input.split_inclusive('\n') {
        let marker = FENCE.captures(line).map(|caps| caps[1].to_string());
        let inside = fence.is_some();
        match marker {
            None if !inside => {
                out.push_str(&TIGHT_HEADING.replace(line, "$1$2 $3"));
                continue;
            }
            Some(open) if !inside => fence = Some(open),
            // A closing fence uses the same character, is at least as long
            // and carries no info string.
            Some(close)
                if fence.as_deref().is_some_and(|open| close.starts_with(open))
                    && line.trim() == close =>
            {
                fence = None
            }
            _ => {}
        }
        out.push_str(line);
    }
    Cow::Owned(out)
}
