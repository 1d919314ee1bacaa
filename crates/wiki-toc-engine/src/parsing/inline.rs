use std::sync::LazyLock;

use regex::Regex;

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid bold regex"));
static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.+?)\*").expect("valid italic regex"));
static CODE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`(.+?)`").expect("valid code span regex"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.+?)\]\(.+?\)").expect("valid link regex"));

/// Removes bold, italic, inline code and link syntax from heading text.
///
/// The passes run in that order; bold has to go before italic or `**x**`
/// would leave stray asterisks behind.
pub fn strip_inline_markup(text: &str) -> String {
    [&BOLD, &ITALIC, &CODE_SPAN, &LINK]
        .into_iter()
        .fold(text.to_string(), |acc, re| {
            re.replace_all(&acc, "${1}").into_owned()
        })
}
