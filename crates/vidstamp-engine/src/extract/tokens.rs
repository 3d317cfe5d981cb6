//! Minimal HTML tokenizer.
//!
//! Recognises start tags (with attributes), end tags, comments and text. It does
//! not validate nesting; the caller decides what a stray end tag means. Input
//! that only looks like a tag (`a < b`) is kept as text.

use super::cursor::Cursor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    StartTag {
        name: String,
        attrs: Vec<(String, &'a str)>,
        self_closing: bool,
    },
    EndTag {
        name: String,
    },
    /// Raw text, entities not yet decoded.
    Text(&'a str),
}

impl Token<'_> {
    /// Looks up an attribute value on a start tag.
    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            Token::StartTag { attrs, .. } => attrs
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| *value),
            _ => None,
        }
    }

    /// True if this start tag's `class` attribute lists `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
    }
}

/// Elements that never have content or an end tag.
pub fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta"
            | "source" | "track" | "wbr"
    )
}

pub fn tokenize(s: &str) -> Vec<Token<'_>> {
    let mut cur = Cursor::new(s);
    let mut out = vec![];
    let mut text_start = cur.pos();

    fn flush_text<'a>(out: &mut Vec<Token<'a>>, s: &'a str, start: usize, end: usize) {
        if end > start {
            out.push(Token::Text(&s[start..end]));
        }
    }

    while !cur.eof() {
        if cur.peek() != Some(b'<') {
            cur.bump();
            continue;
        }

        let tag_start = cur.pos();
        if cur.starts_with(b"<!--") {
            flush_text(&mut out, s, text_start, tag_start);
            cur.skip_past(b"-->");
            text_start = cur.pos();
            continue;
        }
        if let Some(token) = try_parse_tag(&mut cur) {
            flush_text(&mut out, s, text_start, tag_start);
            out.push(token);
            text_start = cur.pos();
            continue;
        }
        cur.bump();
    }

    flush_text(&mut out, s, text_start, cur.pos());
    out
}

/// Attempts to parse a start or end tag at `<`.
///
/// On failure the cursor is restored and `None` returned.
fn try_parse_tag<'a>(cur: &mut Cursor<'a>) -> Option<Token<'a>> {
    let saved = cur.clone();
    let result = parse_tag(cur);
    if result.is_none() {
        *cur = saved;
    }
    result
}

fn parse_tag<'a>(cur: &mut Cursor<'a>) -> Option<Token<'a>> {
    cur.bump(); // <

    let closing = cur.peek() == Some(b'/');
    if closing {
        cur.bump();
    }

    if !cur.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    let name = cur
        .eat_while(|b| b.is_ascii_alphanumeric() || b == b'-')
        .to_ascii_lowercase();

    if closing {
        cur.eat_while(|b| b != b'>');
        cur.bump()?; // >
        return Some(Token::EndTag { name });
    }

    let mut attrs = vec![];
    loop {
        cur.eat_while(|b| b.is_ascii_whitespace());
        match cur.peek()? {
            b'>' => {
                cur.bump();
                return Some(Token::StartTag {
                    name,
                    attrs,
                    self_closing: false,
                });
            }
            b'/' if cur.peek_at(1) == Some(b'>') => {
                cur.bump_n(2);
                return Some(Token::StartTag {
                    name,
                    attrs,
                    self_closing: true,
                });
            }
            b'/' => {
                cur.bump();
            }
            _ => {
                let key = cur
                    .eat_while(|b| !b.is_ascii_whitespace() && !matches!(b, b'=' | b'>' | b'/'))
                    .to_ascii_lowercase();
                if key.is_empty() {
                    // A lone `=` or similar; skip it rather than loop forever.
                    cur.bump();
                    continue;
                }
                cur.eat_while(|b| b.is_ascii_whitespace());
                let value = if cur.peek() == Some(b'=') {
                    cur.bump();
                    cur.eat_while(|b| b.is_ascii_whitespace());
                    parse_attr_value(cur)?
                } else {
                    ""
                };
                attrs.push((key, value));
            }
        }
    }
}

fn parse_attr_value<'a>(cur: &mut Cursor<'a>) -> Option<&'a str> {
    match cur.peek()? {
        quote @ (b'"' | b'\'') => {
            cur.bump();
            let value = cur.eat_while(|b| b != quote);
            cur.bump()?; // closing quote
            Some(value)
        }
        _ => Some(cur.eat_while(|b| !b.is_ascii_whitespace() && b != b'>')),
    }
}
