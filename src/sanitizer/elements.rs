// src/sanitizer/elements.rs

//! Removal of dangerous elements.
//!
//! Both passes scan the raw string for `<`, so they also catch markup hidden
//! in other tags' attribute values. Neither pass backtracks: a successful
//! closing-tag search resumes scanning after the match, and a name is only
//! searched for in vain once, so the work stays linear in the input length.

use super::policy::Policy;
use super::tokenizer::{Tag, parse_tag, peek_short_tag_name};

/// Opening tag of a dangerous element at `start`, if any.
fn dangerous_opening<'a>(input: &'a str, start: usize, policy: &Policy) -> Option<Tag<'a>> {
    let (closing, name, _) =
        peek_short_tag_name(input, start, true, policy.longest_dangerous_element())?;
    if closing || !policy.is_dangerous_element(name) {
        return None;
    }
    parse_tag(input, start, true)
}

/// End offset of the nearest closing tag named `name` at or after `from`.
fn nearest_closing(input: &str, from: usize, name: &str) -> Option<usize> {
    let mut pos = from;
    while let Some(rel) = input[pos..].find('<') {
        let start = pos + rel;
        if let Some((true, found, _)) = peek_short_tag_name(input, start, true, name.len()) {
            if found.eq_ignore_ascii_case(name) {
                return parse_tag(input, start, true).map(|tag| tag.span.end);
            }
        }
        pos = start + 1;
    }
    None
}

/// Removes every dangerous element that has a closing tag, content included.
///
/// The closing tag is the nearest one with the same name, so in
/// `<script><script>x</script></script>` the trailing `</script>` is left
/// for the whitelist pass.
pub fn remove_dangerous_elements(input: &str, policy: &Policy) -> String {
    let mut out = String::with_capacity(input.len());
    let mut copied = 0;
    let mut pos = 0;
    // Names already searched for in vain; nothing later can close them.
    let mut unclosed: Vec<&str> = Vec::new();

    while let Some(rel) = input[pos..].find('<') {
        let start = pos + rel;
        let Some(open) = dangerous_opening(input, start, policy) else {
            pos = start + 1;
            continue;
        };

        let known_unclosed = unclosed.iter().any(|n| n.eq_ignore_ascii_case(open.name));
        let end = if open.terminated && !known_unclosed {
            nearest_closing(input, open.span.end, open.name)
        } else {
            None
        };

        // Unterminated or unpaired openings are left to the standalone pass.
        match end {
            Some(end) => {
                tracing::trace!(element = open.name, start, end, "Removing dangerous element");
                out.push_str(&input[copied..start]);
                copied = end;
                pos = end;
            }
            None => {
                if open.terminated && !known_unclosed {
                    unclosed.push(open.name);
                }
                pos = open.span.end;
            }
        }
    }

    out.push_str(&input[copied..]);
    out
}

/// Removes remaining opening or self-closing dangerous tags, keeping whatever
/// follows them.
pub fn remove_standalone_dangerous_tags(input: &str, policy: &Policy) -> String {
    let mut out = String::with_capacity(input.len());
    let mut copied = 0;
    let mut pos = 0;

    while let Some(rel) = input[pos..].find('<') {
        let start = pos + rel;
        match dangerous_opening(input, start, policy) {
            Some(open) => {
                tracing::trace!(element = open.name, "Removing standalone dangerous tag");
                out.push_str(&input[copied..start]);
                copied = open.span.end;
                pos = open.span.end;
            }
            None => pos = start + 1,
        }
    }

    out.push_str(&input[copied..]);
    out
}
