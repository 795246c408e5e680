use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// Strips markup from rich-text editor input.
///
/// Tags become spaces, the handful of entities the editor emits are
/// decoded, and whitespace is collapsed. The result is what "the user
/// actually typed", used to decide whether an input is worth sending to
/// the model at all.
///
/// # Examples
///
/// ```
/// use playground_rs::text_util::strip_markup;
///
/// assert_eq!(strip_markup("<p>He said<br>&quot;hi&quot;</p>"), "He said \"hi\"");
/// assert_eq!(strip_markup("<p><br></p>"), "");
/// ```
pub fn strip_markup(input: &str) -> String {
    let without_tags = TAG_RE.replace_all(input, " ");
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}
