//! HTML score import.
//!
//! Score sites publish sheets as HTML pages. The text content of the page
//! body is the score; markup, scripts and styles are dropped. Fragments with
//! no `<body>` contribute all of their text.

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{PianoError, Result};

/// Elements whose content is raw text, never part of the page text
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// Named entities common in HTML but unknown to XML
fn html_entity(name: &str) -> Option<&'static str> {
    match name {
        "nbsp" => Some(" "),
        "ndash" => Some("-"),
        "mdash" => Some("-"),
        "hellip" => Some("..."),
        "copy" => Some("(c)"),
        _ => None,
    }
}

fn raw_text_element(name: &[u8]) -> Option<&'static str> {
    RAW_TEXT_ELEMENTS
        .iter()
        .copied()
        .find(|raw| raw.as_bytes().eq_ignore_ascii_case(name))
}

fn is_body(name: &[u8]) -> bool {
    name.eq_ignore_ascii_case(b"body")
}

/// Byte offset just past the `</name ...>` closing a raw text element whose
/// content starts at `from`. `lower` is the ASCII-lowercased document.
fn raw_text_end(lower: &str, from: usize, name: &str) -> Option<usize> {
    let close = format!("</{}", name);
    let mut at = from;
    loop {
        let found = at + lower[at..].find(&close)?;
        let after = found + close.len();
        // `</scripts>` does not close `<script>`
        match lower.as_bytes().get(after) {
            Some(b'>') | Some(b'/') => {}
            Some(c) if c.is_ascii_whitespace() => {}
            None => return Some(after),
            Some(_) => {
                at = after;
                continue;
            }
        }
        return Some(lower[after..].find('>').map_or(lower.len(), |gt| after + gt + 1));
    }
}

fn html_reader(html: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(html);
    reader.check_end_names(false);
    reader
}

/// Text collected so far, split by whether it was inside `<body>`
#[derive(Default)]
struct TextContent {
    all: String,
    body: String,
    body_depth: usize,
    seen_body: bool,
}

impl TextContent {
    fn push(&mut self, s: &str) {
        self.all.push_str(s);
        if self.body_depth > 0 {
            self.body.push_str(s);
        }
    }

    fn finish(self) -> String {
        if self.seen_body {
            self.body
        } else {
            self.all
        }
    }
}

/// Text content of an HTML or XHTML document.
///
/// `script` and `style` bodies are skipped unparsed up to their closing tag,
/// so markup-like text inside them (`i<n`) cannot swallow the rest of the
/// page. An element left open runs to the end of the document.
pub fn extract_text(html: &str) -> Result<String> {
    let lower = html.to_ascii_lowercase();
    let mut base = 0usize;
    let mut reader = html_reader(html);
    let mut content = TextContent::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.local_name();
                if let Some(raw) = raw_text_element(name.as_ref()) {
                    let from = base + reader.buffer_position();
                    match raw_text_end(&lower, from, raw) {
                        Some(end) => {
                            base = end;
                            reader = html_reader(&html[base..]);
                        }
                        None => {
                            log::debug!("<{}> at byte {} is never closed", raw, from);
                            break;
                        }
                    }
                } else if is_body(name.as_ref()) {
                    content.body_depth += 1;
                    content.seen_body = true;
                }
            }
            Ok(Event::End(e)) => {
                if is_body(e.local_name().as_ref()) {
                    content.body_depth = content.body_depth.saturating_sub(1);
                }
            }
            Ok(Event::Text(e)) => match e.unescape_with(html_entity) {
                Ok(unescaped) => content.push(&unescaped),
                Err(err) => {
                    log::warn!("keeping raw text after unescape failure: {}", err);
                    content.push(&String::from_utf8_lossy(&e));
                }
            },
            Ok(Event::CData(e)) => {
                content.push(&String::from_utf8_lossy(&e));
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(PianoError::ScoreImport(format!(
                    "error at byte {}: {}",
                    base + reader.buffer_position(),
                    e
                )))
            }
        }
    }

    Ok(content.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extracts_body_text() {
        let html = r#"<!DOCTYPE html>
<html><head><title>Song</title></head>
<body><div class="score"><p>t y u</p><p>[tu] o</p></div></body></html>"#;
        let text = extract_text(html).unwrap();
        assert!(text.contains("t y u"));
        assert!(text.contains("[tu] o"));
        assert!(!text.contains("Song"));
    }

    #[test]
    fn test_skips_script_and_style() {
        let html = "<html><head><style>p { color: red }</style></head>\
                    <body><script>var x = 1;</script><p>tyu</p></body></html>";
        assert_eq!(extract_text(html).unwrap(), "tyu");
    }

    #[test]
    fn test_script_with_markup_characters() {
        let html = "<html><head><script>for (var i = 0; i<n; i++) {}</script></head>\
                    <body><p>tyu</p></body></html>";
        assert_eq!(extract_text(html).unwrap(), "tyu");
    }

    #[test]
    fn test_raw_text_close_tag_ignores_case_and_lookalikes() {
        let html = "<body><STYLE>a<b{}</styles></Style ><p>op</p>\
                    <script type=\"x\">if (a <b && c> d) {}</SCRIPT>[tu]</body>";
        assert_eq!(extract_text(html).unwrap(), "op[tu]");
    }

    #[test]
    fn test_unclosed_script_hides_the_rest() {
        assert_eq!(extract_text("ab<script>var x = 1 < 2; cd").unwrap(), "ab");
    }

    #[test]
    fn test_unescapes_entities() {
        let html = "<p>t&amp;y&nbsp;u &lt;3</p>";
        assert_eq!(extract_text(html).unwrap(), "t&y u <3");
    }

    #[test]
    fn test_tolerates_unclosed_elements() {
        let html = "<body><p>ab<br>cd</p></body>";
        assert_eq!(extract_text(html).unwrap(), "abcd");
    }

    #[test]
    fn test_malformed_markup() {
        let err = extract_text("<p>tyu<!-- never closed").unwrap_err();
        assert!(matches!(err, PianoError::ScoreImport(_)));
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(extract_text("[ab] c").unwrap(), "[ab] c");
    }
}
