use regex::Regex;
use std::sync::OnceLock;

// Check descriptions arrive with console markup embedded.
static HEADER_OPEN: OnceLock<Regex> = OnceLock::new();
static HEADER_CLOSE: OnceLock<Regex> = OnceLock::new();
static LINE_BREAK: OnceLock<Regex> = OnceLock::new();

/// Strip the markup advisory-check descriptions carry, keeping plain text.
/// Header wrappers are removed, `<br>` variants become newlines.
pub fn strip_description_markup(raw: &str) -> String {
    let header_open = HEADER_OPEN
        .get_or_init(|| Regex::new(r"\s?<h4 class='headerBodyStyle'>\s?").expect("valid pattern"));
    let header_close =
        HEADER_CLOSE.get_or_init(|| Regex::new(r"\s?</h4>\s?").expect("valid pattern"));
    let line_break =
        LINE_BREAK.get_or_init(|| Regex::new(r"\s?<br\s?/?>\s?").expect("valid pattern"));

    let text = header_open.replace_all(raw, "");
    let text = header_close.replace_all(&text, "");
    line_break.replace_all(&text, "\n").into_owned()
}
