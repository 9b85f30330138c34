// src/sanitizer/tokenizer.rs

//! Minimal tag scanner.
//!
//! Splits input into text, tags and comment-like markup, following the way a
//! browser's tokenizer finds tag boundaries: a `>` inside a quoted attribute
//! value does not close the tag, and `/` separates attributes.
//! All offsets are byte offsets into the original input. Every delimiter the
//! scanner stops on is ASCII, so offsets always fall on char boundaries.

use std::ops::Range;

/// HTML whitespace: space, tab, LF, FF, CR.
pub fn is_html_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0C)
}

/// A single attribute inside a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'a> {
    /// Start of the whitespace run preceding the name (equals `span.start`
    /// when the attribute follows a `/` or a closing quote directly).
    pub lead: usize,
    /// Name through the end of the value (closing quote included).
    pub span: Range<usize>,
    pub name: &'a str,
    /// Value without its quotes. `None` for a bare attribute.
    pub value: Option<&'a str>,
    pub quote: Option<u8>,
}

/// An opening or closing tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag<'a> {
    /// From `<` through `>`, or to the end of input when unterminated.
    pub span: Range<usize>,
    pub name: &'a str,
    pub closing: bool,
    pub self_closing: bool,
    /// False when the input ended inside the tag.
    pub terminated: bool,
    pub attributes: Vec<Attribute<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Text(Range<usize>),
    Tag(Tag<'a>),
    /// Comments, doctypes, processing instructions and bogus comments.
    Comment(Range<usize>),
}

impl Token<'_> {
    pub fn span(&self) -> Range<usize> {
        match self {
            Token::Text(span) | Token::Comment(span) => span.clone(),
            Token::Tag(tag) => tag.span.clone(),
        }
    }
}

/// Iterator over the tokens of an input string.
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

pub fn tokenize(input: &str) -> Tokenizer<'_> {
    Tokenizer { input, pos: 0 }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        if start >= bytes.len() {
            return None;
        }

        if bytes[start] == b'<' {
            if let Some(tag) = parse_tag(self.input, start, false) {
                self.pos = tag.span.end;
                return Some(Token::Tag(tag));
            }
            if let Some(end) = markup_declaration_end(bytes, start) {
                self.pos = end;
                return Some(Token::Comment(start..end));
            }
        }

        // A `<` that starts nothing is plain text.
        let end = bytes[start + 1..]
            .iter()
            .position(|&b| b == b'<')
            .map_or(bytes.len(), |rel| start + 1 + rel);
        self.pos = end;
        Some(Token::Text(start..end))
    }
}

/// End offset of a comment-like construct starting at `start`, or `None` if
/// the `<` there is text.
fn markup_declaration_end(bytes: &[u8], start: usize) -> Option<usize> {
    let rest = &bytes[start..];

    if rest.starts_with(b"<!--") {
        let body = start + 4;
        // `<!-->` and `<!--->` close immediately.
        if bytes[body..].starts_with(b">") {
            return Some(body + 1);
        }
        if bytes[body..].starts_with(b"->") {
            return Some(body + 2);
        }
        return Some(
            find_subslice(&bytes[body..], b"-->").map_or(bytes.len(), |rel| body + rel + 3),
        );
    }

    match rest.get(1) {
        Some(b'!') | Some(b'?') => Some(bogus_comment_end(bytes, start + 2)),
        Some(b'/') => match rest.get(2) {
            None => None,
            Some(b'>') => Some(start + 3),
            Some(_) => Some(bogus_comment_end(bytes, start + 2)),
        },
        _ => None,
    }
}

fn bogus_comment_end(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| b == b'>')
        .map_or(bytes.len(), |rel| from + rel + 1)
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn skip_spaces(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && is_html_space(bytes[i]) {
        i += 1;
    }
    i
}

/// Reads only the tag name at `start` without parsing attributes.
///
/// Returns `(closing, name, name_end)`.
pub fn peek_tag_name(input: &str, start: usize, lenient: bool) -> Option<(bool, &str, usize)> {
    scan_tag_name(input, start, lenient, usize::MAX)
}

/// [`peek_tag_name`] for callers that only care about names up to `max_len`
/// bytes. Longer names give `None` without being scanned to the end, so
/// this is cheap enough to call on every `<` of the input.
pub fn peek_short_tag_name(
    input: &str,
    start: usize,
    lenient: bool,
    max_len: usize,
) -> Option<(bool, &str, usize)> {
    scan_tag_name(input, start, lenient, max_len)
}

fn scan_tag_name(
    input: &str,
    start: usize,
    lenient: bool,
    max_len: usize,
) -> Option<(bool, &str, usize)> {
    let bytes = input.as_bytes();
    if bytes.get(start) != Some(&b'<') {
        return None;
    }

    let mut i = start + 1;
    if lenient {
        i = skip_spaces(bytes, i);
    }
    let closing = bytes.get(i) == Some(&b'/');
    if closing {
        i += 1;
        if lenient {
            i = skip_spaces(bytes, i);
        }
    }
    if !bytes.get(i).is_some_and(u8::is_ascii_alphabetic) {
        return None;
    }

    let name_start = i;
    while i < bytes.len() && !is_html_space(bytes[i]) && bytes[i] != b'/' && bytes[i] != b'>' {
        if i - name_start == max_len {
            return None;
        }
        i += 1;
    }
    Some((closing, &input[name_start..i], i))
}

/// Parses the tag whose `<` is at `start`.
///
/// `lenient` also accepts whitespace between `<`, `/` and the name, which
/// browsers treat as text but which dangerous-element removal still matches.
pub fn parse_tag(input: &str, start: usize, lenient: bool) -> Option<Tag<'_>> {
    let (closing, name, mut i) = peek_tag_name(input, start, lenient)?;
    let bytes = input.as_bytes();
    let len = bytes.len();

    let mut attributes = Vec::new();
    let mut self_closing = false;

    loop {
        let lead = i;
        i = skip_spaces(bytes, i);
        if i >= len {
            return Some(Tag {
                span: start..len,
                name,
                closing,
                self_closing,
                terminated: false,
                attributes,
            });
        }

        match bytes[i] {
            b'>' => {
                i += 1;
                break;
            }
            b'/' if bytes.get(i + 1) == Some(&b'>') => {
                self_closing = true;
                i += 2;
                break;
            }
            b'/' => {
                i += 1;
                continue;
            }
            _ => {}
        }

        // The first name character may be `=`.
        let name_start = i;
        i += 1;
        while i < len && !is_html_space(bytes[i]) && !matches!(bytes[i], b'/' | b'>' | b'=') {
            i += 1;
        }
        let attr_name = &input[name_start..i];

        let mut value = None;
        let mut quote = None;
        let j = skip_spaces(bytes, i);
        if bytes.get(j) == Some(&b'=') {
            let j = skip_spaces(bytes, j + 1);
            match bytes.get(j) {
                Some(&q) if q == b'"' || q == b'\'' => {
                    let value_start = j + 1;
                    let value_end = bytes[value_start..]
                        .iter()
                        .position(|&b| b == q)
                        .map(|rel| value_start + rel);
                    quote = Some(q);
                    match value_end {
                        Some(end) => {
                            value = Some(&input[value_start..end]);
                            i = end + 1;
                        }
                        None => {
                            value = Some(&input[value_start..]);
                            i = len;
                        }
                    }
                }
                _ => {
                    let mut end = j;
                    while end < len && !is_html_space(bytes[end]) && bytes[end] != b'>' {
                        end += 1;
                    }
                    value = Some(&input[j..end]);
                    i = end;
                }
            }
        }

        attributes.push(Attribute {
            lead,
            span: name_start..i,
            name: attr_name,
            value,
            quote,
        });
    }

    Some(Tag {
        span: start..i,
        name,
        closing,
        self_closing,
        terminated: true,
        attributes,
    })
}
