//! Text rewrites applied to converter output before it reaches the editor.
//!
//! Two concerns live here: demoting `<h1>` headings (the CMS renders the page
//! title as the only `<h1>`) and folding the many ways documents express a
//! page break into the single [`PAGE_MARKER`] comment the editor paginates on.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

pub const PAGE_MARKER: &str = "<!-- page -->";

static H1_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<h1([\s/][^>]*)?>").expect("valid h1 open regex"));
static H1_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</h1\s*>").expect("valid h1 close regex"));

static PAGE_BREAK_DIV: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<div[^>]*style="[^"]*page-break-[^"]*"[^>]*>.*?</div>"#)
        .expect("valid page-break div regex")
});
static DOUBLE_HR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<hr\s*/?>\s*<hr\s*/?>").expect("valid double hr regex"));
static BR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:<br\s*/?>\s*){4,}").expect("valid br run regex"));
static DIVIDER_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<p>\s*[-*_]{3,}\s*</p>").expect("valid divider paragraph regex")
});
static SPACED_STAR_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<p>\s*\*\s*\*\s*\*\s*</p>").expect("valid spaced star paragraph regex")
});
static PAGE_BREAK_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<p>\s*\[?\s*page\s*break\s*\]?\s*</p>")
        .expect("valid page-break paragraph regex")
});
static MARKER_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?:{}\s*){{2,}}", regex::escape(PAGE_MARKER)))
        .expect("valid marker run regex")
});

static DIVIDER_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*_]{3,}|\*\s*\*\s*\*)$").expect("valid divider regex"));
static PAGE_BREAK_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\[?\s*page\s*break\s*\]?$").expect("valid page-break text regex")
});

type Rule = (&'static str, fn(&str) -> Cow<'_, str>);

/// Applied in order. Structural containers go first so the paragraph and
/// character rules never see markup an earlier rule already consumed.
const PAGE_BREAK_RULES: &[Rule] = &[
    ("page_break_style_div", replace_page_break_divs),
    ("double_hr", replace_double_rules),
    ("br_run", replace_line_break_runs),
    ("divider_paragraph", replace_divider_paragraphs),
    ("page_break_paragraph", replace_page_break_paragraphs),
    ("form_feed", replace_form_feeds),
    ("collapse_markers", collapse_marker_runs),
];

fn replace_page_break_divs(text: &str) -> Cow<'_, str> {
    PAGE_BREAK_DIV.replace_all(text, PAGE_MARKER)
}

fn replace_double_rules(text: &str) -> Cow<'_, str> {
    DOUBLE_HR.replace_all(text, PAGE_MARKER)
}

fn replace_line_break_runs(text: &str) -> Cow<'_, str> {
    BR_RUN.replace_all(text, PAGE_MARKER)
}

fn replace_divider_paragraphs(text: &str) -> Cow<'_, str> {
    match DIVIDER_PARAGRAPH.replace_all(text, PAGE_MARKER) {
        Cow::Borrowed(_) => SPACED_STAR_PARAGRAPH.replace_all(text, PAGE_MARKER),
        Cow::Owned(replaced) => {
            Cow::Owned(SPACED_STAR_PARAGRAPH.replace_all(&replaced, PAGE_MARKER).into_owned())
        }
    }
}

fn replace_page_break_paragraphs(text: &str) -> Cow<'_, str> {
    PAGE_BREAK_PARAGRAPH.replace_all(text, PAGE_MARKER)
}

fn replace_form_feeds(text: &str) -> Cow<'_, str> {
    if text.contains('\u{000C}') {
        Cow::Owned(text.replace('\u{000C}', PAGE_MARKER))
    } else {
        Cow::Borrowed(text)
    }
}

fn collapse_marker_runs(text: &str) -> Cow<'_, str> {
    MARKER_RUN.replace_all(text, PAGE_MARKER)
}

/// Rewrites `<h1 ...>`/`</h1>` to `<h2 ...>`/`</h2>`, keeping attributes.
pub fn demote_top_heading(text: &str) -> String {
    let opened = H1_OPEN.replace_all(text, "<h2${1}>");
    H1_CLOSE.replace_all(&opened, "</h2>").into_owned()
}

pub fn normalize_page_breaks(text: &str) -> String {
    let mut current = text.to_string();
    for (name, rule) in PAGE_BREAK_RULES {
        let rewritten = match rule(&current) {
            Cow::Borrowed(_) => continue,
            Cow::Owned(rewritten) => rewritten,
        };
        trace!(rule = *name, "page-break rule matched");
        current = rewritten;
    }
    current
}

/// A bare paragraph made only of `***`, `---`, `___` (3+) or `* * *`.
pub fn is_divider_text(text: &str) -> bool {
    DIVIDER_TEXT.is_match(text)
}

/// A bare paragraph reading "page break", optionally bracketed.
pub fn is_page_break_text(text: &str) -> bool {
    PAGE_BREAK_TEXT.is_match(text)
}
