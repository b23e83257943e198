//! Markup rendering.
//!
//! Turns note text written in a small markdown-like dialect into an HTML fragment
//! by running an ordered list of pattern substitutions over the whole text:
//!
//! ```text
//! line endings → fenced blocks out → headers → bold → italic → inline code
//!   → links → blockquotes → checkbox/list items → line breaks → paragraphs
//!   → cleanup → fenced blocks back in
//! ```
//!
//! Fenced blocks may span lines. Their bodies are set aside before any other
//! rule runs, so `#`, `- ` or `>` lines inside a fence stay literal.
//!
//! Rendering is pure and never fails. It is deliberately not a markdown parser:
//! constructs do not nest reliably and emphasis is matched per line (see
//! [`EmphasisMatching`]).
//!
//! # Security
//!
//! Raw text is passed through without HTML escaping. A note containing
//! `<script>` produces `<script>` in the output, so callers must not feed the
//! result to a browser for untrusted content.
//!
//! # Examples
//!
//! ```
//! use notecase::markup::render;
//!
//! assert_eq!(render("# Title"), "<h1>Title</h1>");
//! assert_eq!(
//!     render("**bold** and *italic*"),
//!     "<p><strong>bold</strong> and <em>italic</em></p>"
//! );
//! assert_eq!(
//!     render("- [ ] todo\n- [x] done"),
//!     "<ul><li>☐ todo</li><li>☑ done</li></ul>"
//! );
//! ```

mod options;
mod rules;

pub use options::{EmphasisMatching, RenderOptions};

/// Renders `text` with the default options.
#[must_use]
pub fn render(text: &str) -> String {
    render_with(text, &RenderOptions::default())
}

/// Renders `text` with explicit options.
#[must_use]
pub fn render_with(text: &str, options: &RenderOptions) -> String {
    let _span = tracing::trace_span!("render", len = text.len(), emphasis = ?options.emphasis)
        .entered();

    let text = rules::normalize_line_endings(text);
    let (text, fences) = rules::extract_fences(&text);
    let text = rules::headers(&text);
    let text = rules::emphasis(&text, options.emphasis);
    let text = rules::inline_code(&text);
    let text = rules::links(&text);
    let text = rules::blockquotes(&text);
    let text = rules::lists(&text);
    let text = rules::line_breaks(&text);
    let text = rules::paragraphs(&text);
    let text = rules::cleanup(&text);
    rules::restore_fences(&text, &fences)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_renders_empty() {
        assert_eq!(render(""), "");
        assert_eq!(render("\n\n"), "");
    }

    #[test]
    fn heading_followed_by_text() {
        assert_eq!(render("# Title\n\nbody"), "<h1>Title</h1><p>body</p>");
        assert_eq!(render("# Title\nbody"), "<h1>Title</h1><p>body</p>");
    }

    #[test]
    fn list_between_paragraphs() {
        assert_eq!(
            render("text\n- a\n- b\nmore"),
            "<p>text</p><ul><li>a</li><li>b</li></ul><p>more</p>"
        );
    }

    #[test]
    fn single_newline_is_a_line_break() {
        assert_eq!(render("a\nb"), "<p>a<br>b</p>");
        assert_eq!(render("a\r\n\r\n\r\nb"), "<p>a</p><p>b</p>");
    }

    #[test]
    fn inline_constructs() {
        assert_eq!(render("`code`"), "<p><code>code</code></p>");
        assert_eq!(
            render("[docs](https://example.com)"),
            r#"<p><a href="https://example.com" target="_blank">docs</a></p>"#
        );
        assert_eq!(render("> quoted"), "<blockquote>quoted</blockquote>");
    }

    #[test]
    fn fenced_block_between_paragraphs() {
        assert_eq!(
            render("before\n```\nfn a() {}\nb\n```\nafter"),
            "<p>before</p><pre><code>fn a() {}<br>b</code></pre><p>after</p>"
        );
    }

    #[test]
    fn fence_bodies_are_not_rewritten() {
        assert_eq!(
            render("```\n# not a heading\nx = 1\n```"),
            "<pre><code># not a heading<br>x = 1</code></pre>"
        );
        assert_eq!(
            render("```\n$ ls\n- a\n- b\n```"),
            "<pre><code>$ ls<br>- a<br>- b</code></pre>"
        );
        assert_eq!(
            render("```\n> not quoted\n**raw**\n```"),
            "<pre><code>> not quoted<br>**raw**</code></pre>"
        );
    }

    #[test]
    fn fence_inside_a_line_becomes_its_own_block() {
        assert_eq!(
            render("text ```x``` more"),
            "<p>text </p><pre><code>x</code></pre><p> more</p>"
        );
    }

    #[test]
    fn balanced_emphasis_wraps_each_span() {
        assert_eq!(
            render_with("*a* and *b*", &RenderOptions::balanced()),
            "<p><em>a</em> and <em>b</em></p>"
        );
    }

    #[test]
    fn markup_is_not_escaped() {
        assert_eq!(render("<b>x</b>"), "<p><b>x</b></p>");
    }
}
