//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use super::dom::{self, Element, Node};
use crate::config::HighlightConfig;

/// Class carried by every `<code>` element the highlighter produced
pub const HIGHLIGHT_MARKER: &str = "hljs";

/// Prefix for the token classes inside highlighted code
const TOKEN_CLASS_PREFIX: &str = "hljs-";

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    highlight: bool,
    auto_detect: bool,
}

/// A fenced or indented code block being collected
struct PendingBlock {
    lang: Option<String>,
    code: String,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options(&HighlightConfig::default())
    }

    /// Create with custom settings
    pub fn with_options(config: &HighlightConfig) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            highlight: config.enable,
            auto_detect: config.auto_detect,
        }
    }

    /// Render markdown to HTML with presentation classes applied.
    ///
    /// Raw HTML in the source is passed through untouched, so the result
    /// must be sanitized before it reaches a browser.
    pub fn render(&self, markdown: &str) -> String {
        let html = self.to_html(markdown);
        let nodes = apply_presentation_classes(dom::parse_fragment(&html));
        dom::serialize(&nodes)
    }

    /// Convert markdown to HTML, replacing code blocks with highlighted ones
    fn to_html(&self, markdown: &str) -> String {
        let options =
            Options::ENABLE_TABLES | Options::ENABLE_FOOTNOTES | Options::ENABLE_STRIKETHROUGH;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut pending: Option<PendingBlock> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    pending = Some(PendingBlock {
                        lang: fence_language(&kind),
                        code: String::new(),
                    });
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(block) = pending.take() {
                        let highlighted = self.highlight_code(&block.code, block.lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) if pending.is_some() => {
                    if let Some(block) = pending.as_mut() {
                        block.code.push_str(&text);
                    }
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let Some(syntax) = self.find_syntax(code, lang) else {
            return plain_code_block(code, lang);
        };

        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntax_set,
            ClassStyle::SpacedPrefixed {
                prefix: TOKEN_CLASS_PREFIX,
            },
        );
        for line in LinesWithEndings::from(code) {
            if let Err(e) = generator.parse_html_for_line_which_includes_newline(line) {
                tracing::debug!("Highlighting failed for {:?}: {}", syntax.name, e);
                return plain_code_block(code, lang);
            }
        }

        let lang = lang
            .map(str::to_string)
            .or_else(|| syntax.file_extensions.first().cloned())
            .unwrap_or_else(|| "text".to_string());

        format!(
            r#"<pre><code class="{} language-{}">{}</code></pre>"#,
            HIGHLIGHT_MARKER,
            html_escape(&lang),
            generator.finalize()
        )
    }

    /// Pick a grammar from the fence language, or guess one from the first line
    fn find_syntax(&self, code: &str, lang: Option<&str>) -> Option<&SyntaxReference> {
        if !self.highlight {
            return None;
        }

        match lang {
            Some(lang) => self
                .syntax_set
                .find_syntax_by_token(lang)
                .or_else(|| self.syntax_set.find_syntax_by_extension(lang)),
            None if self.auto_detect => code
                .lines()
                .next()
                .and_then(|line| self.syntax_set.find_syntax_by_first_line(line)),
            None => None,
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Language named by a fence-info string
fn fence_language(kind: &CodeBlockKind) -> Option<String> {
    match kind {
        CodeBlockKind::Fenced(info) => info.split_whitespace().next().map(str::to_string),
        CodeBlockKind::Indented => None,
    }
}

/// A code block the highlighter did not touch
fn plain_code_block(code: &str, lang: Option<&str>) -> String {
    match lang {
        Some(lang) => format!(
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            html_escape(lang),
            html_escape(code)
        ),
        None => format!("<pre><code>{}</code></pre>", html_escape(code)),
    }
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ============================================================================
// Presentation classes
// ============================================================================

/// Append the presentation classes to every element of the tree
pub fn apply_presentation_classes(nodes: Vec<Node>) -> Vec<Node> {
    nodes.into_iter().map(decorate).collect()
}

fn decorate(node: Node) -> Node {
    match node {
        Node::Element(element) => {
            let classes = presentation_classes(&element);
            let Element {
                tag,
                attrs,
                children,
            } = element.with_classes(classes);
            Node::Element(Element {
                tag,
                attrs,
                children: apply_presentation_classes(children),
            })
        }
        other => other,
    }
}

/// Classes appended to an element, keyed by its tag
fn presentation_classes(element: &Element) -> &'static [&'static str] {
    match element.tag.as_str() {
        "pre" => &["markdown-pre", "rounded-md", "bg-muted", "p-4", "overflow-x-auto"],
        "code" if element.has_class(HIGHLIGHT_MARKER) => {
            &["markdown-code", "font-mono", "text-sm"]
        }
        "code" => &[
            "markdown-code",
            "font-mono",
            "text-sm",
            "bg-muted",
            "px-1.5",
            "py-0.5",
            "rounded",
        ],
        "h1" => &["markdown-h1", "text-3xl", "font-bold", "mt-6", "mb-4"],
        "h2" => &["markdown-h2", "text-2xl", "font-bold", "mt-6", "mb-4"],
        "h3" => &["markdown-h3", "text-xl", "font-bold", "mt-6", "mb-4"],
        "p" => &["markdown-p", "my-4", "leading-relaxed"],
        "ul" => &["markdown-ul", "my-4", "ml-6", "list-disc"],
        "ol" => &["markdown-ol", "my-4", "ml-6", "list-decimal"],
        "li" => &["markdown-li", "my-2"],
        "blockquote" => &[
            "markdown-blockquote",
            "my-4",
            "border-l-4",
            "border-primary",
            "pl-4",
            "italic",
            "text-muted-foreground",
        ],
        "a" => &["markdown-link", "text-primary", "hover:underline"],
        "strong" => &["markdown-strong", "font-bold"],
        "em" => &["markdown-em", "italic"],
        "hr" => &["markdown-hr", "my-6", "h-px", "border-0", "bg-border"],
        _ => &[],
    }
}
