//! The individual substitution rules of the rendering pipeline.
//!
//! Each rule rewrites the whole text produced by the previous one. Patterns are
//! compiled once on first use.

use crate::markup::options::EmphasisMatching;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Elements that end a paragraph.
const BLOCK_TAGS: &str = "h[1-6]|ul|blockquote|pre";

static HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(#{1,3}) (.*)$").expect("valid header regex"));

static BOLD_GREEDY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*)\*\*").expect("valid bold regex"));
static BOLD_BALANCED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid bold regex"));
static ITALIC_GREEDY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*(.*)\*").expect("valid italic regex"));
static ITALIC_BALANCED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*([^*\n]+)\*").expect("valid italic regex"));

static FENCED_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```\n?(.*?)\n?```").expect("valid fence regex"));
static FENCE_SLOT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("\u{E000}([0-9]+)\u{E001}").expect("valid fence slot regex"));
static INLINE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`]*)`").expect("valid code regex"));
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").expect("valid link regex"));
static BLOCKQUOTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^> (.*)$").expect("valid blockquote regex"));

static UNCHECKED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^- \[ \] (.*)$").expect("valid checkbox regex"));
static CHECKED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mi)^- \[x\] (.*)$").expect("valid checkbox regex"));
static LIST_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^- (.*)$").expect("valid list regex"));
static LIST_RUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^<li>.*</li>$(?:\n<li>.*</li>$)*").expect("valid list run regex")
});

static PARAGRAPH_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<br>\s*<br>").expect("valid paragraph regex"));

static BREAK_AFTER_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(</(?:{BLOCK_TAGS})>)<br>")).expect("valid cleanup regex")
});
static BREAK_BEFORE_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"<br>(<(?:{BLOCK_TAGS})>)")).expect("valid cleanup regex")
});
static OPEN_AROUND_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"<p>(<(?:{BLOCK_TAGS}|p)>)")).expect("valid cleanup regex")
});
static CLOSE_AROUND_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(</(?:{BLOCK_TAGS}|p)>)</p>")).expect("valid cleanup regex")
});
static LEADING_BREAKS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<p>(?:<br>)+").expect("valid cleanup regex"));
static TRAILING_BREAKS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:<br>)+</p>").expect("valid cleanup regex"));

pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// `# Title` to `<h1>Title</h1>`, up to three levels.
pub fn headers(text: &str) -> String {
    HEADER_RE
        .replace_all(text, |caps: &Captures| {
            let level = caps[1].len();
            format!("<h{level}>{}</h{level}>", &caps[2])
        })
        .into_owned()
}

pub fn emphasis(text: &str, matching: EmphasisMatching) -> String {
    let (bold, italic) = match matching {
        EmphasisMatching::Greedy => (&*BOLD_GREEDY_RE, &*ITALIC_GREEDY_RE),
        EmphasisMatching::Balanced => (&*BOLD_BALANCED_RE, &*ITALIC_BALANCED_RE),
    };
    let text = bold.replace_all(text, "<strong>${1}</strong>");
    italic.replace_all(&text, "<em>${1}</em>").into_owned()
}

/// Replaces every fenced block with an empty `<pre>` element holding a slot
/// marker, and returns the block bodies by slot.
///
/// Runs before every other rule so nothing inside a fence is rewritten. Line
/// breaks in a body become `<br>` like everywhere else.
pub fn extract_fences(text: &str) -> (String, Vec<String>) {
    let mut bodies = Vec::new();
    let text = FENCED_CODE_RE
        .replace_all(text, |caps: &Captures| {
            let slot = bodies.len();
            bodies.push(caps[1].replace('\n', "<br>"));
            format!("\n<pre><code>\u{E000}{slot}\u{E001}</code></pre>\n")
        })
        .into_owned();
    (text, bodies)
}

/// Puts fenced block bodies back into their slots.
pub fn restore_fences(text: &str, bodies: &[String]) -> String {
    if bodies.is_empty() {
        return text.to_string();
    }
    FENCE_SLOT_RE
        .replace_all(text, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|slot| bodies.get(slot))
                .map_or_else(|| caps[0].to_string(), Clone::clone)
        })
        .into_owned()
}

pub fn inline_code(text: &str) -> String {
    INLINE_CODE_RE
        .replace_all(text, "<code>${1}</code>")
        .into_owned()
}

pub fn links(text: &str) -> String {
    LINK_RE
        .replace_all(text, r#"<a href="${2}" target="_blank">${1}</a>"#)
        .into_owned()
}

pub fn blockquotes(text: &str) -> String {
    BLOCKQUOTE_RE
        .replace_all(text, "<blockquote>${1}</blockquote>")
        .into_owned()
}

/// Checkbox and plain list items, each contiguous run wrapped in one `<ul>`.
pub fn lists(text: &str) -> String {
    let text = UNCHECKED_RE.replace_all(text, "<li>☐ ${1}</li>");
    let text = CHECKED_RE.replace_all(&text, "<li>☑ ${1}</li>");
    let text = LIST_ITEM_RE.replace_all(&text, "<li>${1}</li>");
    LIST_RUN_RE
        .replace_all(&text, |caps: &Captures| {
            format!("<ul>{}</ul>", caps[0].replace('\n', ""))
        })
        .into_owned()
}

pub fn line_breaks(text: &str) -> String {
    text.replace('\n', "<br>")
}

pub fn paragraphs(text: &str) -> String {
    format!("<p>{}</p>", PARAGRAPH_BREAK_RE.replace_all(text, "</p><p>"))
}

/// Balances paragraph tags around block elements and drops empty paragraphs.
pub fn cleanup(text: &str) -> String {
    let text = BREAK_AFTER_BLOCK_RE.replace_all(text, "${1}</p><p>");
    let text = BREAK_BEFORE_BLOCK_RE.replace_all(&text, "</p><p>${1}");
    let text = replace_until_stable(&OPEN_AROUND_BLOCK_RE, text.into_owned(), "${1}");
    let text = replace_until_stable(&CLOSE_AROUND_BLOCK_RE, text, "${1}");
    let text = LEADING_BREAKS_RE.replace_all(&text, "<p>");
    let text = TRAILING_BREAKS_RE.replace_all(&text, "</p>");
    text.replace("<p></p>", "")
}

/// Each pass removes one tag of a nested run, so this stops after at most as
/// many passes as there are tags.
fn replace_until_stable(re: &Regex, mut text: String, replacement: &str) -> String {
    loop {
        let next = re.replace_all(&text, replacement).into_owned();
        if next == text {
            return text;
        }
        text = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_keep_level() {
        assert_eq!(headers("# A\n## B\n### C"), "<h1>A</h1>\n<h2>B</h2>\n<h3>C</h3>");
        assert_eq!(headers("#### D"), "#### D");
        assert_eq!(headers("#nospace"), "#nospace");
    }

    #[test]
    fn greedy_emphasis_spans_first_to_last() {
        assert_eq!(
            emphasis("**a** and **b**", EmphasisMatching::Greedy),
            "<strong>a<em>* and *</em>b</strong>"
        );
        assert_eq!(
            emphasis("**a** and **b**", EmphasisMatching::Balanced),
            "<strong>a</strong> and <strong>b</strong>"
        );
    }

    #[test]
    fn fences_are_lifted_out_and_restored() {
        let (text, bodies) = extract_fences("a\n```\nfn main() {}\n# x\n```\nb");
        assert_eq!(bodies, vec!["fn main() {}<br># x".to_string()]);
        assert!(!text.contains("main"));
        assert_eq!(
            restore_fences(&text, &bodies),
            "a\n\n<pre><code>fn main() {}<br># x</code></pre>\n\nb"
        );
        assert_eq!(inline_code("use `x` here"), "use <code>x</code> here");
    }

    #[test]
    fn list_runs_are_wrapped_separately() {
        assert_eq!(
            lists("- a\n- b\ntext\n- c"),
            "<ul><li>a</li><li>b</li></ul>\ntext\n<ul><li>c</li></ul>"
        );
        assert_eq!(lists("- [X] shout"), "<ul><li>☑ shout</li></ul>");
    }

    #[test]
    fn cleanup_unwraps_nested_paragraphs() {
        assert_eq!(cleanup("<p><p><h1>T</h1></p></p>"), "<h1>T</h1>");
        assert_eq!(cleanup("<p><br>a<br></p><p></p>"), "<p>a</p>");
    }
}
