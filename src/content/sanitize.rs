//! HTML sanitization
//!
//! Every rendered post goes through [`sanitize`] before it is handed out as
//! injectable HTML. Post sources may come from any team member, and raw HTML
//! in Markdown is passed through by the renderer.

use std::panic::{self, AssertUnwindSafe};

/// Tags removed together with everything inside them
const STRIPPED_WITH_CONTENT: &[&str] = &[
    "script", "style", "object", "embed", "iframe", "frame", "frameset", "applet", "noscript",
    "template",
];

/// Attributes kept on any element
const GENERIC_ATTRIBUTES: &[&str] = &["class", "id", "title"];

/// Extra attributes kept on links
const LINK_ATTRIBUTES: &[&str] = &["target", "rel"];

/// Clean untrusted HTML.
///
/// Only ammonia's default whitelist of formatting tags survives, so document
/// structure, form controls, embeds, event handlers and `javascript:` or
/// `vbscript:` URLs are all dropped. Classes, ids, titles, link targets and
/// image dimensions are preserved. If the sanitizer cannot run the result is
/// empty rather than unsanitized.
pub fn sanitize(html: &str) -> String {
    match panic::catch_unwind(AssertUnwindSafe(|| clean(html))) {
        Ok(safe) => safe,
        Err(_) => {
            tracing::error!("Sanitizer failed, dropping {} bytes of content", html.len());
            String::new()
        }
    }
}

fn clean(html: &str) -> String {
    let mut builder = ammonia::Builder::default();
    builder
        .add_generic_attributes(GENERIC_ATTRIBUTES)
        .add_tag_attributes("a", LINK_ATTRIBUTES)
        .link_rel(None)
        .add_clean_content_tags(STRIPPED_WITH_CONTENT);
    builder.clean(html).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_handler_removed() {
        let safe = sanitize("<img src=x onerror=alert(1)>");
        assert!(!safe.contains("onerror"));
        assert!(!safe.contains("alert"));
        assert!(safe.contains(r#"src="x""#));
    }

    #[test]
    fn test_script_removed() {
        let inputs = [
            "<script>alert(1)</script>",
            "<SCRIPT>alert(1)</SCRIPT>",
            "<ScRiPt src=//evil.example/x.js></ScRiPt>",
            "<script type=\"text/javascript\">alert(1)</script>",
            "<div><p><script>alert(1)</script></p></div>",
            "<scr<script>ipt>alert(1)</script>",
            "<svg><script>alert(1)</script></svg>",
            "<math><mtext><script>alert(1)</script></mtext></math>",
            "<script\n>alert(1)</script\n>",
        ];
        for input in inputs {
            let safe = sanitize(input);
            assert!(
                !safe.to_lowercase().contains("<script"),
                "script survived in {:?}: {:?}",
                input,
                safe
            );
        }
    }

    #[test]
    fn test_dangerous_urls_removed() {
        let safe = sanitize(r#"<a href="javascript:alert(1)">x</a><a href="VBScript:msgbox(1)">y</a>"#);
        assert!(!safe.to_lowercase().contains("javascript:"));
        assert!(!safe.to_lowercase().contains("vbscript:"));
        assert!(safe.contains(">x</a>"));
    }

    #[test]
    fn test_forbidden_tags_removed() {
        let input = r#"<html><head><meta charset="utf-8"><base href="/"><link rel="stylesheet" href="x.css"><style>p{}</style></head><body>
<form action="/"><input name="q"><button>go</button></form>
<iframe src="https://evil.example"></iframe><object data="x"></object><embed src="x"><applet code="x"></applet>
<frameset><frame src="x"></frameset><p>kept</p></body></html>"#;
        let safe = sanitize(input).to_lowercase();
        for tag in [
            "<html", "<head", "<body", "<meta", "<base", "<link", "<style", "<form", "<input",
            "<button", "<iframe", "<object", "<embed", "<applet", "<frame",
        ] {
            assert!(!safe.contains(tag), "{} survived: {}", tag, safe);
        }
        assert!(safe.contains("<p>kept</p>"));
    }

    #[test]
    fn test_presentation_attributes_kept() {
        let input = r#"<a href="https://ctftime.org" class="markdown-link text-primary" id="ref" title="CTFtime" target="_blank" rel="noopener">ctf</a><img src="/logo.png" alt="logo" width="10" height="20">"#;
        let safe = sanitize(input);
        for fragment in [
            r#"href="https://ctftime.org""#,
            r#"class="markdown-link text-primary""#,
            r#"id="ref""#,
            r#"title="CTFtime""#,
            r#"target="_blank""#,
            r#"rel="noopener""#,
            r#"alt="logo""#,
            r#"width="10""#,
            r#"height="20""#,
        ] {
            assert!(safe.contains(fragment), "missing {} in {}", fragment, safe);
        }
    }

    #[test]
    fn test_highlighted_code_kept() {
        let input = r#"<pre class="markdown-pre"><code class="hljs language-python markdown-code"><span class="hljs-source hljs-python">print</span></code></pre>"#;
        assert_eq!(sanitize(input), input);
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "<p class=\"markdown-p\">Hello <em>world</em> &amp; friends</p>",
            "<ul><li>one</li><li><a href=\"/posts/2\">two</a></li></ul>",
            "<blockquote><p>1 &lt; 2</p></blockquote><hr>",
            "<img src=x onerror=alert(1)><script>alert(1)</script>text",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once);
        }
    }
}
