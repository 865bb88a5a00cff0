//! Elements and attributes the CMS editor is configured to keep.
//!
//! The table documents the editor configuration for `--list-elements`.
//! Converter output is not filtered against it; [`sanitize_html`] only demotes
//! top-level headings.

use crate::model::ElementListing;
use crate::normalize::demote_top_heading;

pub const HEADING_NOTE: &str =
    "H1 tags are automatically converted to H2 (H1 is reserved for page titles)";

const STYLED: &[&str] = &["class", "style"];
const CELL: &[&str] = &["class", "style", "colspan", "rowspan"];

pub const ALLOWED_ELEMENTS: &[(&str, &[&str])] = &[
    ("p", STYLED),
    ("h2", STYLED),
    ("h3", STYLED),
    ("h4", STYLED),
    ("h5", STYLED),
    ("h6", STYLED),
    ("blockquote", &["cite", "class", "style"]),
    ("pre", STYLED),
    ("code", STYLED),
    ("strong", STYLED),
    ("b", STYLED),
    ("em", STYLED),
    ("i", STYLED),
    ("u", STYLED),
    ("mark", STYLED),
    ("small", STYLED),
    ("cite", STYLED),
    ("del", STYLED),
    ("ins", STYLED),
    ("sub", STYLED),
    ("sup", STYLED),
    ("a", &["href", "target", "rel", "title", "class", "style"]),
    ("ul", STYLED),
    ("ol", STYLED),
    ("li", STYLED),
    ("dl", STYLED),
    ("dt", STYLED),
    ("dd", STYLED),
    (
        "img",
        &["src", "alt", "title", "width", "height", "loading", "class", "style"],
    ),
    ("figure", STYLED),
    ("figcaption", STYLED),
    (
        "video",
        &[
            "src", "controls", "width", "height", "poster", "preload", "autoplay", "muted", "loop",
            "class", "style",
        ],
    ),
    (
        "audio",
        &["src", "controls", "preload", "autoplay", "loop", "class", "style"],
    ),
    ("source", &["src", "type"]),
    (
        "iframe",
        &["src", "width", "height", "frameborder", "allowfullscreen", "class", "style"],
    ),
    (
        "table",
        &["class", "style", "border", "cellpadding", "cellspacing"],
    ),
    ("thead", STYLED),
    ("tbody", STYLED),
    ("tfoot", STYLED),
    ("tr", STYLED),
    ("td", CELL),
    ("th", CELL),
    ("caption", STYLED),
    ("article", STYLED),
    ("section", STYLED),
    ("header", STYLED),
    ("footer", STYLED),
    ("aside", STYLED),
    ("nav", STYLED),
    ("div", &["class", "style", "id"]),
    ("span", STYLED),
    ("br", &[]),
    ("hr", STYLED),
];

pub const ELEMENT_CATEGORIES: &[(&str, &[&str])] = &[
    ("Headings", &["h2", "h3", "h4", "h5", "h6"]),
    ("Text", &["p", "blockquote", "pre", "code"]),
    (
        "Formatting",
        &[
            "strong", "b", "em", "i", "u", "mark", "small", "cite", "del", "ins", "sub", "sup",
        ],
    ),
    ("Lists", &["ul", "ol", "li", "dl", "dt", "dd"]),
    (
        "Media",
        &["img", "figure", "figcaption", "video", "audio", "source", "iframe"],
    ),
    (
        "Tables",
        &["table", "thead", "tbody", "tfoot", "tr", "td", "th", "caption"],
    ),
    ("Links", &["a"]),
    (
        "Structure",
        &["div", "span", "article", "section", "header", "footer", "aside", "nav"],
    ),
    ("Other", &["br", "hr"]),
];

pub fn sanitize_html(html: &str) -> String {
    demote_top_heading(html)
}

/// `"Headings: h2, h3, ...; Text: p, ..."`.
pub fn allowed_elements_summary() -> String {
    ELEMENT_CATEGORIES
        .iter()
        .map(|(category, elements)| format!("{}: {}", category, elements.join(", ")))
        .collect::<Vec<String>>()
        .join("; ")
}

pub fn element_listing() -> ElementListing {
    ElementListing {
        allowed_elements: ALLOWED_ELEMENTS.iter().map(|(tag, _)| *tag).collect(),
        info: allowed_elements_summary(),
        note: HEADING_NOTE,
    }
}
