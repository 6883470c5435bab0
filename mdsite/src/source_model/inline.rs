//! Inline span splitter
//!
//! Converts a run of inline markdown into [`TextSpan`]s. Splitting happens in
//! ordered passes (bold, italic, code, link, image). Every pass rewrites only
//! the spans that are still [`SpanKind::Normal`], so text claimed by an
//! earlier pass is never scanned again.

use super::error::InlineError;
use super::text_span::{SpanKind, TextSpan};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// `[label](url)`, optionally preceded by `!`.
///
/// The optional bang lets the link pass see image syntax as one match and
/// skip it, standing in for a negative lookbehind.
static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!?\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

/// `![alt](url)`
static IMAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

/// Delimiter passes in the order they must run
const DELIMITER_PASSES: [(&str, SpanKind); 3] = [
    ("**", SpanKind::Bold),
    ("*", SpanKind::Italic),
    ("`", SpanKind::Code),
];

/// Split a run of inline markdown into typed spans
///
/// # Parameters
/// * `text` - Inline markdown (may contain newlines)
///
/// # Returns
/// * `Ok(Vec<TextSpan>)` - Spans in document order
/// * `Err(InlineError)` - A bold, italic or code delimiter was left open
pub fn text_to_spans(text: &str) -> Result<Vec<TextSpan>, InlineError> {
    let mut spans = vec![TextSpan::normal(text)];

    for (delimiter, kind) in DELIMITER_PASSES {
        spans = split_spans_delimiter(spans, delimiter, kind)?;
    }
    spans = split_spans_link(spans);
    spans = split_spans_image(spans);

    log::trace!("Split {} bytes of inline text into {} spans", text.len(), spans.len());
    Ok(spans)
}

/// Extract spans enclosed by `delimiter` pairs from every normal span
///
/// Non-normal spans, and normal spans that do not contain the delimiter,
/// are passed through unchanged. Empty pieces created by the split are
/// dropped.
///
/// # Parameters
/// * `spans` - Spans to rewrite
/// * `delimiter` - Opening and closing marker, e.g. `**`
/// * `kind` - Kind assigned to the enclosed text
///
/// # Returns
/// * `Ok(Vec<TextSpan>)` - Rewritten spans in order
/// * `Err(InlineError::UnclosedDelimiter)` - A delimiter has no partner
pub fn split_spans_delimiter(
    spans: Vec<TextSpan>,
    delimiter: &str,
    kind: SpanKind,
) -> Result<Vec<TextSpan>, InlineError> {
    let mut result = Vec::with_capacity(spans.len());

    for span in spans {
        if !span.is_normal() || !span.content.contains(delimiter) {
            result.push(span);
            continue;
        }
        split_text_delimiter(&span.content, delimiter, kind, &mut result)?;
    }

    Ok(result)
}

fn split_text_delimiter(
    text: &str,
    delimiter: &str,
    kind: SpanKind,
    out: &mut Vec<TextSpan>,
) -> Result<(), InlineError> {
    let mut rest = text;

    while let Some((before, after_open)) = rest.split_once(delimiter) {
        let Some((inner, after_close)) = after_open.split_once(delimiter) else {
            return Err(InlineError::UnclosedDelimiter {
                delimiter: delimiter.to_string(),
                text: text.to_string(),
            });
        };

        push_piece(out, before, SpanKind::Normal);
        push_piece(out, inner, kind);
        rest = after_close;
    }

    push_piece(out, rest, SpanKind::Normal);
    Ok(())
}

fn push_piece(out: &mut Vec<TextSpan>, text: &str, kind: SpanKind) {
    if !text.is_empty() {
        out.push(TextSpan::new(text, kind));
    }
}

/// Find every `[label](url)` that is not part of image syntax
///
/// # Returns
/// * `Vec<(String, String)>` - `(label, url)` pairs in document order
pub fn extract_markdown_links(text: &str) -> Vec<(String, String)> {
    LINK_PATTERN
        .captures_iter(text)
        .filter(|caps| !is_image_match(caps))
        .map(|caps| label_and_target(&caps))
        .collect()
}

/// Find every `![alt](url)`
///
/// # Returns
/// * `Vec<(String, String)>` - `(alt, url)` pairs in document order
pub fn extract_markdown_images(text: &str) -> Vec<(String, String)> {
    IMAGE_PATTERN
        .captures_iter(text)
        .map(|caps| label_and_target(&caps))
        .collect()
}

/// Replace link syntax inside normal spans with [`SpanKind::Link`] spans
pub fn split_spans_link(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_spans_pattern(spans, &LINK_PATTERN, |caps| {
        if is_image_match(caps) {
            return None;
        }
        let (label, target) = label_and_target(caps);
        Some(TextSpan::link(label, target))
    })
}

/// Replace image syntax inside normal spans with [`SpanKind::Image`] spans
pub fn split_spans_image(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_spans_pattern(spans, &IMAGE_PATTERN, |caps| {
        let (alt, target) = label_and_target(caps);
        Some(TextSpan::image(alt, target))
    })
}

/// Shared driver for the link and image passes
///
/// `to_span` may decline a match by returning `None`; the matched text then
/// stays part of the surrounding normal text.
fn split_spans_pattern<F>(spans: Vec<TextSpan>, pattern: &Regex, to_span: F) -> Vec<TextSpan>
where
    F: Fn(&Captures<'_>) -> Option<TextSpan>,
{
    let mut result = Vec::with_capacity(spans.len());

    for span in spans {
        if !span.is_normal() {
            result.push(span);
            continue;
        }

        let text = span.content.as_str();
        let mut pieces = Vec::new();
        let mut last = 0;

        for caps in pattern.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let Some(captured) = to_span(&caps) else {
                continue;
            };
            push_piece(&mut pieces, &text[last..whole.start()], SpanKind::Normal);
            pieces.push(captured);
            last = whole.end();
        }

        if pieces.is_empty() {
            result.push(span);
            continue;
        }

        push_piece(&mut pieces, &text[last..], SpanKind::Normal);
        result.extend(pieces);
    }

    result
}

fn is_image_match(caps: &Captures<'_>) -> bool {
    caps.get(0).is_some_and(|m| m.as_str().starts_with('!'))
}

fn label_and_target(caps: &Captures<'_>) -> (String, String) {
    let group = |index| caps.get(index).map_or("", |m| m.as_str()).to_string();
    (group(1), group(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold(text: &str) -> TextSpan {
        TextSpan::new(text, SpanKind::Bold)
    }

    fn italic(text: &str) -> TextSpan {
        TextSpan::new(text, SpanKind::Italic)
    }

    fn code(text: &str) -> TextSpan {
        TextSpan::new(text, SpanKind::Code)
    }

    fn normal(text: &str) -> TextSpan {
        TextSpan::normal(text)
    }

    #[test]
    fn test_split_bold() {
        let spans = vec![normal("Bold of **text** to assume success")];
        let split = split_spans_delimiter(spans, "**", SpanKind::Bold).unwrap();
        assert_eq!(
            split,
            vec![normal("Bold of "), bold("text"), normal(" to assume success")]
        );
    }

    #[test]
    fn test_split_bold_at_edges() {
        let start = split_spans_delimiter(
            vec![normal("**Bold** of text to assume success")],
            "**",
            SpanKind::Bold,
        )
        .unwrap();
        assert_eq!(start, vec![bold("Bold"), normal(" of text to assume success")]);

        let end = split_spans_delimiter(
            vec![normal("Bold of text to assume **success**")],
            "**",
            SpanKind::Bold,
        )
        .unwrap();
        assert_eq!(end, vec![normal("Bold of text to assume "), bold("success")]);
    }

    #[test]
    fn test_split_bold_leaves_other_spans() {
        let spans = vec![
            normal("**Bold** of `text` to *assume success*"),
            normal("Bold in Markdown is just <strong>"),
            bold("Bold text is <strong>"),
        ];
        let split = split_spans_delimiter(spans, "**", SpanKind::Bold).unwrap();
        assert_eq!(
            split,
            vec![
                bold("Bold"),
                normal(" of `text` to *assume success*"),
                normal("Bold in Markdown is just <strong>"),
                bold("Bold text is <strong>"),
            ]
        );
    }

    #[test]
    fn test_split_unclosed_delimiter() {
        let spans = vec![normal("Bold of **text to assume success")];
        let err = split_spans_delimiter(spans, "**", SpanKind::Bold).unwrap_err();
        assert!(matches!(
            err,
            InlineError::UnclosedDelimiter { ref delimiter, .. } if delimiter == "**"
        ));
        assert!(err.to_string().contains("'**'"));
    }

    #[test]
    fn test_split_italic_skips_non_normal() {
        let spans = vec![
            normal("Have *a Pisa* in `Italic`? You meant `Bold`?"),
            normal("should not convert this part"),
            bold("should still be bold"),
            code("Italic"),
        ];
        let split = split_spans_delimiter(spans, "*", SpanKind::Italic).unwrap();
        assert_eq!(
            split,
            vec![
                normal("Have "),
                italic("a Pisa"),
                normal(" in `Italic`? You meant `Bold`?"),
                normal("should not convert this part"),
                bold("should still be bold"),
                code("Italic"),
            ]
        );
    }

    #[test]
    fn test_split_empty_capture_is_dropped() {
        let split = split_spans_delimiter(vec![normal("a````b")], "`", SpanKind::Code).unwrap();
        assert_eq!(split, vec![normal("a"), normal("b")]);
    }

    #[test]
    fn test_split_keeps_empty_span_without_delimiter() {
        let split = split_spans_delimiter(vec![normal("")], "**", SpanKind::Bold).unwrap();
        assert_eq!(split, vec![normal("")]);
    }

    #[test]
    fn test_delimiter_balance_preserves_text() {
        let text = "a **b** c **d** **e**f";
        let split = split_spans_delimiter(vec![normal(text)], "**", SpanKind::Bold).unwrap();
        let joined: String = split.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(joined, text.replace("**", ""));
    }

    #[test]
    fn test_extract_links() {
        assert_eq!(
            extract_markdown_links("Visit [GitHub](https://github.com)."),
            vec![("GitHub".to_string(), "https://github.com".to_string())]
        );
        assert_eq!(
            extract_markdown_links(
                "Platforms including [GitHub](https://github.com) and [GitLab](https://gitlab.com)"
            ),
            vec![
                ("GitHub".to_string(), "https://github.com".to_string()),
                ("GitLab".to_string(), "https://gitlab.com".to_string()),
            ]
        );
    }

    #[test]
    fn test_extract_links_ignores_stray_brackets() {
        let text = "This is a [line] with a lot of (fix: many) <brackets>. The \
                    point is to [test](https://linux.die.net/man/1/test) whether the system \
                    can <<extract>> properly.";
        assert_eq!(
            extract_markdown_links(text),
            vec![("test".to_string(), "https://linux.die.net/man/1/test".to_string())]
        );
    }

    #[test]
    fn test_extract_links_and_images_are_disjoint() {
        let text = "[A link](https://example.com) vs. ![An image](https://image.example.com)";
        assert_eq!(
            extract_markdown_links(text),
            vec![("A link".to_string(), "https://example.com".to_string())]
        );
        assert_eq!(
            extract_markdown_images(text),
            vec![("An image".to_string(), "https://image.example.com".to_string())]
        );
    }

    #[test]
    fn test_extract_empty_link() {
        assert_eq!(
            extract_markdown_links("This is a valid markdown. []() is an empty link"),
            vec![(String::new(), String::new())]
        );
    }

    #[test]
    fn test_split_image_positions() {
        assert_eq!(
            split_spans_image(vec![normal("An image ![example img](https://image.example.com)")]),
            vec![
                normal("An image "),
                TextSpan::image("example img", "https://image.example.com"),
            ]
        );
        assert_eq!(
            split_spans_image(vec![normal("![example img](https://image.example.com) as an example")]),
            vec![
                TextSpan::image("example img", "https://image.example.com"),
                normal(" as an example"),
            ]
        );
        assert_eq!(
            split_spans_image(vec![normal("![example img](https://image.example.com)")]),
            vec![TextSpan::image("example img", "https://image.example.com")]
        );
    }

    #[test]
    fn test_split_image_without_images_is_identity() {
        let spans = vec![
            normal("A line of normal text"),
            normal("A line of **bold** text"),
            TextSpan::link("Link", "https://example.com"),
            code("bash"),
        ];
        assert_eq!(split_spans_image(spans.clone()), spans);
        assert_eq!(split_spans_link(spans.clone()), spans);
    }

    #[test]
    fn test_split_image_among_links() {
        let text = "![image one](https://i1.example.com) and [GitHub](https://github.com). \
                    ![image two](https://i2.example.com), ![image three](https://i3.example.com).";
        assert_eq!(
            split_spans_image(vec![normal(text)]),
            vec![
                TextSpan::image("image one", "https://i1.example.com"),
                normal(" and [GitHub](https://github.com). "),
                TextSpan::image("image two", "https://i2.example.com"),
                normal(", "),
                TextSpan::image("image three", "https://i3.example.com"),
                normal("."),
            ]
        );
    }

    #[test]
    fn test_split_link_multiple() {
        let text = "[link 1](https://1.link.url) and [link 2](https://2.link.url). [link 3](https://3.link.url)";
        assert_eq!(
            split_spans_link(vec![normal(text)]),
            vec![
                TextSpan::link("link 1", "https://1.link.url"),
                normal(" and "),
                TextSpan::link("link 2", "https://2.link.url"),
                normal(". "),
                TextSpan::link("link 3", "https://3.link.url"),
            ]
        );
    }

    #[test]
    fn test_split_link_empty_parts() {
        let spans = vec![normal("[]()"), normal("[without link]()"), normal("[](without name)")];
        assert_eq!(
            split_spans_link(spans),
            vec![
                TextSpan::link("", ""),
                TextSpan::link("without link", ""),
                TextSpan::link("", "without name"),
            ]
        );
    }

    #[test]
    fn test_split_link_leaves_images() {
        let text = "[Hello](mailto:hello@boot.dev), you stumbled upon ![pokemon](http://po.ke.mon) \
                    in our [repo](github.com/zer0warm/jibberish)";
        assert_eq!(
            split_spans_link(vec![normal(text)]),
            vec![
                TextSpan::link("Hello", "mailto:hello@boot.dev"),
                normal(", you stumbled upon ![pokemon](http://po.ke.mon) in our "),
                TextSpan::link("repo", "github.com/zer0warm/jibberish"),
            ]
        );
    }

    #[test]
    fn test_text_to_spans_bold_scenario() {
        assert_eq!(
            text_to_spans("Bold of **text** to assume success").unwrap(),
            vec![normal("Bold of "), bold("text"), normal(" to assume success")]
        );
    }

    #[test]
    fn test_text_to_spans_delimiters() {
        assert_eq!(
            text_to_spans("Run `bash` and *tell* me **what you see**").unwrap(),
            vec![
                normal("Run "),
                code("bash"),
                normal(" and "),
                italic("tell"),
                normal(" me "),
                bold("what you see"),
            ]
        );
    }

    #[test]
    fn test_text_to_spans_links_and_images() {
        let text = "Come see this ![picture](https://image.example.com) \
                    and remember to follow [me](https://me.bsky.app)";
        assert_eq!(
            text_to_spans(text).unwrap(),
            vec![
                normal("Come see this "),
                TextSpan::image("picture", "https://image.example.com"),
                normal(" and remember to follow "),
                TextSpan::link("me", "https://me.bsky.app"),
            ]
        );
    }

    #[test]
    fn test_text_to_spans_mixed() {
        let text = "A [link](https://example.com) shows an image: ![alt text](https://image.example.com). \
                    Run [this code](https://notepad.app/sh) with `bash` or `zsh`: `echo \"Hello World\" > ~/.hello`";
        assert_eq!(
            text_to_spans(text).unwrap(),
            vec![
                normal("A "),
                TextSpan::link("link", "https://example.com"),
                normal(" shows an image: "),
                TextSpan::image("alt text", "https://image.example.com"),
                normal(". Run "),
                TextSpan::link("this code", "https://notepad.app/sh"),
                normal(" with "),
                code("bash"),
                normal(" or "),
                code("zsh"),
                normal(": "),
                code("echo \"Hello World\" > ~/.hello"),
            ]
        );
    }

    #[test]
    fn test_text_to_spans_bold_before_link() {
        let text = "**Option 1**: [The webi installer](https://webinstall.dev/golang/) is the simplest way.";
        assert_eq!(
            text_to_spans(text).unwrap(),
            vec![
                bold("Option 1"),
                normal(": "),
                TextSpan::link("The webi installer", "https://webinstall.dev/golang/"),
                normal(" is the simplest way."),
            ]
        );
    }

    #[test]
    fn test_text_to_spans_empty_link() {
        assert_eq!(text_to_spans("[]()").unwrap(), vec![TextSpan::link("", "")]);
    }

    #[test]
    fn test_text_to_spans_empty_text() {
        assert_eq!(text_to_spans("").unwrap(), vec![normal("")]);
    }

    #[test]
    fn test_text_to_spans_unclosed_code() {
        let err = text_to_spans("run `ls").unwrap_err();
        assert_eq!(
            err,
            InlineError::UnclosedDelimiter {
                delimiter: "`".to_string(),
                text: "run `ls".to_string(),
            }
        );
    }
}
