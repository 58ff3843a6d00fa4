//! A small owned HTML tree
//!
//! Rendered Markdown (raw HTML passthrough included) is parsed into this
//! tree so presentation classes can be applied per element, then written
//! back out as an HTML string.

use scraper::{ElementRef, Html};

/// Elements that never have children or an end tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose text is written without escaping
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

/// A node in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

/// An element with its attributes in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Value of an attribute, if present
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The whitespace-separated entries of the `class` attribute
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Append classes after the existing ones
    pub fn with_classes(mut self, extra: &[&str]) -> Self {
        if extra.is_empty() {
            return self;
        }

        let value = {
            let mut classes: Vec<&str> = self.classes().collect();
            classes.extend_from_slice(extra);
            classes.join(" ")
        };

        match self.attrs.iter_mut().find(|(key, _)| key == "class") {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push(("class".to_string(), value)),
        }
        self
    }
}

/// Parse an HTML fragment into a list of top-level nodes
pub fn parse_fragment(html: &str) -> Vec<Node> {
    let fragment = Html::parse_fragment(html);
    convert_element(fragment.root_element()).children
}

fn convert_element(element: ElementRef<'_>) -> Element {
    let value = element.value();
    let children = element
        .children()
        .filter_map(|child| match child.value() {
            scraper::Node::Text(text) => {
                let text: &str = text;
                Some(Node::Text(text.to_owned()))
            }
            scraper::Node::Comment(comment) => {
                let comment: &str = comment;
                Some(Node::Comment(comment.to_owned()))
            }
            scraper::Node::Element(_) => {
                ElementRef::wrap(child).map(|el| Node::Element(convert_element(el)))
            }
            _ => None,
        })
        .collect();

    Element {
        tag: value.name().to_string(),
        attrs: value
            .attrs()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
        children,
    }
}

/// Serialize nodes back into HTML
pub fn serialize(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node, false);
    }
    out
}

fn write_node(out: &mut String, node: &Node, raw_text: bool) {
    match node {
        Node::Text(text) if raw_text => out.push_str(text),
        Node::Text(text) => push_escaped(out, text, false),
        Node::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
        Node::Element(element) => write_element(out, element),
    }
}

fn write_element(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(&element.tag);
    for (name, value) in &element.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        push_escaped(out, value, true);
        out.push('"');
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&element.tag.as_str()) {
        return;
    }

    let raw_text = RAW_TEXT_ELEMENTS.contains(&element.tag.as_str());
    for child in &element.children {
        write_node(out, child, raw_text);
    }

    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

fn push_escaped(out: &mut String, s: &str, attribute: bool) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if attribute => out.push_str("&quot;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_serialize() {
        let html = r#"<p class="lead">Hello <strong>World</strong></p><hr><!-- note -->"#;
        let nodes = parse_fragment(html);
        assert_eq!(nodes.len(), 3);
        assert_eq!(serialize(&nodes), html);
    }

    #[test]
    fn test_escaping() {
        let mut el = Element::new("a");
        el.attrs.push(("title".to_string(), "say \"hi\" & <bye>".to_string()));
        el.children.push(Node::Text("1 < 2 & 3 > 2".to_string()));
        assert_eq!(
            serialize(&[Node::Element(el)]),
            r#"<a title="say &quot;hi&quot; &amp; <bye>">1 &lt; 2 &amp; 3 &gt; 2</a>"#
        );
    }

    #[test]
    fn test_with_classes_appends() {
        let mut code = Element::new("code");
        code.attrs.push(("class".to_string(), "hljs language-rust".to_string()));
        let code = code.with_classes(&["markdown-code", "font-mono"]);
        assert_eq!(
            code.attr("class"),
            Some("hljs language-rust markdown-code font-mono")
        );
        assert!(code.has_class("hljs"));

        let p = Element::new("p").with_classes(&["markdown-p"]);
        assert_eq!(p.attr("class"), Some("markdown-p"));
    }

    #[test]
    fn test_unclosed_markup_is_tolerated() {
        let nodes = parse_fragment("<div><em>open");
        assert_eq!(serialize(&nodes), "<div><em>open</em></div>");
    }
}
