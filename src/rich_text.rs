//! Contentful rich-text documents and their HTML rendering.
//!
//! A document is a tree of nodes identified by `nodeType`. Block nodes map
//! onto the matching HTML element, `text` leaves carry their value and a
//! list of marks, and `hyperlink` nodes read their target from `data.uri`.
//! Embedded entries and assets, and any node type not listed below, render
//! their children only.

use maud::{html, Markup};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A node of a rich-text document
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: String,
}

impl Node {
    pub fn is_document(&self) -> bool {
        self.node_type == "document"
    }
}

/// Render a rich-text node (usually the document root) to HTML
pub fn render(node: &Node) -> Markup {
    let children = html! {
        @for child in &node.content {
            (render(child))
        }
    };

    match node.node_type.as_str() {
        "text" => render_marked(node.value.as_deref().unwrap_or_default(), &node.marks),
        "paragraph" => html! { p { (children) } },
        "heading-1" => html! { h1 { (children) } },
        "heading-2" => html! { h2 { (children) } },
        "heading-3" => html! { h3 { (children) } },
        "heading-4" => html! { h4 { (children) } },
        "heading-5" => html! { h5 { (children) } },
        "heading-6" => html! { h6 { (children) } },
        "unordered-list" => html! { ul { (children) } },
        "ordered-list" => html! { ol { (children) } },
        "list-item" => html! { li { (children) } },
        "blockquote" => html! { blockquote { (children) } },
        "hr" => html! { hr; },
        "table" => html! { table { tbody { (children) } } },
        "table-row" => html! { tr { (children) } },
        "table-cell" => html! { td { (children) } },
        "table-header-cell" => html! { th { (children) } },
        "hyperlink" => {
            let uri = node
                .data
                .get("uri")
                .and_then(Value::as_str)
                .filter(|uri| is_safe_link(uri))
                .unwrap_or("#");
            html! { a href=(uri) { (children) } }
        }
        _ => children,
    }
}

/// Only web and mail links are emitted; anything else (`javascript:`,
/// `data:`, relative paths) becomes `#`
fn is_safe_link(uri: &str) -> bool {
    let lower = uri.trim_start().to_ascii_lowercase();
    ["http://", "https://", "mailto:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}

/// Wrap text in the elements for its marks, first mark outermost
fn render_marked(value: &str, marks: &[Mark]) -> Markup {
    match marks.split_first() {
        None => html! { (value) },
        Some((mark, rest)) => {
            let inner = render_marked(value, rest);
            match mark.kind.as_str() {
                "bold" => html! { strong { (inner) } },
                "italic" => html! { em { (inner) } },
                "underline" => html! { u { (inner) } },
                "code" => html! { code { (inner) } },
                "superscript" => html! { sup { (inner) } },
                "subscript" => html! { sub { (inner) } },
                _ => inner,
            }
        }
    }
}
