//! Content normalization and name canonicalization.
//!
//! Entry pages are flattened into a compact inline-markup string that the
//! reporting layer later renders. Delimiters:
//!
//! | Markup | Meaning |
//! |---|---|
//! | `++text++` | heading |
//! | `==text==` | bold |
//! | `--text--` | italic |
//! | `__` | paragraph / line break |

mod canonical;
mod cleanup;

use tracing::{debug, instrument};

use wikisync_shared::DocNode;

pub use canonical::canonicalize_name;

/// Heading delimiter.
pub const TITLE: &str = "++";
/// Bold delimiter.
pub const BOLD: &str = "==";
/// Italic delimiter.
pub const ITALIC: &str = "--";
/// Paragraph separator.
pub const PARAGRAPH: &str = "__";

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// Flatten an entry's content region into inline markup.
///
/// 1. Drops raw text directly under the region and children with no visible text
/// 2. Substitutes headings, bold, italic, line breaks and paragraphs
/// 3. Runs the cleanup pipeline (trim, stray `#`, one trailing separator)
///
/// Identical input trees always produce identical output.
#[instrument(skip_all)]
pub fn normalize(content: &DocNode) -> String {
    let mut flat = String::new();

    for child in content.children() {
        match child {
            DocNode::Text(_) => {}
            element if element.text_content().trim().is_empty() => {}
            element => render(element, &mut flat),
        }
    }

    let result = cleanup::run_pipeline(&flat);
    debug!(raw_len = flat.len(), final_len = result.len(), "content normalized");
    result
}

/// Append the markup for `node` to `out`.
fn render(node: &DocNode, out: &mut String) {
    let (tag, children) = match node {
        DocNode::Text(text) => {
            out.push_str(text);
            return;
        }
        DocNode::Element { tag, children } => (tag, children),
    };

    match tag.as_str() {
        "br" => out.push_str(PARAGRAPH),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            out.push_str(TITLE);
            out.push_str(&node.text_content());
            out.push_str(TITLE);
            out.push_str(PARAGRAPH);
        }
        // Bold collapses to plain text; nested emphasis is dropped.
        "strong" | "b" => {
            out.push_str(BOLD);
            out.push_str(&node.text_content());
            out.push_str(BOLD);
        }
        "em" | "i" => {
            out.push_str(ITALIC);
            render_children(children, out);
            out.push_str(ITALIC);
        }
        "p" => {
            out.push_str(PARAGRAPH);
            render_children(children, out);
            out.push_str(PARAGRAPH);
        }
        _ => render_children(children, out),
    }
}

fn render_children(children: &[DocNode], out: &mut String) {
    for child in children {
        render(child, out);
    }
}
