// src/sanitizer/schemes.rs

use std::borrow::Cow;

use super::policy::Policy;
use super::rewrite_tags;

/// Replaces `href`/`src` attributes whose URL starts with a dangerous scheme
/// by `name="#"`, keeping the attribute name as written.
pub fn neutralize_dangerous_urls(input: &str, policy: &Policy) -> String {
    rewrite_tags(input, |tag, out| {
        let mut copied = tag.span.start;
        for attr in &tag.attributes {
            let Some(value) = attr.value else { continue };
            if !policy.is_url_attribute(attr.name) || !is_dangerous_url(value, policy) {
                continue;
            }
            tracing::trace!(tag = tag.name, attribute = attr.name, "Neutralizing URL");
            out.push_str(&input[copied..attr.span.start]);
            out.push_str(attr.name);
            out.push_str("=\"#\"");
            copied = attr.span.end;
        }
        out.push_str(&input[copied..tag.span.end]);
    })
}

/// Checks a raw attribute value against the policy's schemes.
pub fn is_dangerous_url(value: &str, policy: &Policy) -> bool {
    policy.has_dangerous_scheme(&url_prefix(value, policy.longest_scheme()))
}

/// First `limit` chars of the value as a browser would read the scheme:
/// character references decoded, leading controls and spaces dropped, tabs
/// and newlines removed, ASCII lowercased.
pub fn url_prefix(value: &str, limit: usize) -> String {
    let numeric = decode_numeric_references(value);
    let decoded = html_escape::decode_html_entities(&numeric);
    decoded
        .chars()
        .skip_while(|c| *c <= ' ')
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .take(limit)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Decodes `&#NN` and `&#xHH` references, with or without the trailing `;`,
/// as browsers do in attribute values.
fn decode_numeric_references(value: &str) -> Cow<'_, str> {
    if !value.contains("&#") {
        return Cow::Borrowed(value);
    }

    let bytes = value.as_bytes();
    let mut out = String::with_capacity(value.len());
    let mut copied = 0;
    let mut i = 0;

    while let Some(rel) = value[i..].find("&#") {
        let start = i + rel;
        let mut j = start + 2;
        let hex = matches!(bytes.get(j), Some(b'x' | b'X'));
        if hex {
            j += 1;
        }
        let digits_start = j;
        while j < bytes.len()
            && (if hex { bytes[j].is_ascii_hexdigit() } else { bytes[j].is_ascii_digit() })
        {
            j += 1;
        }

        if j == digits_start {
            i = start + 2;
            continue;
        }

        let radix = if hex { 16 } else { 10 };
        let decoded = u32::from_str_radix(&value[digits_start..j], radix)
            .ok()
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        if bytes.get(j) == Some(&b';') {
            j += 1;
        }

        out.push_str(&value[copied..start]);
        out.push(decoded);
        copied = j;
        i = j;
    }

    out.push_str(&value[copied..]);
    Cow::Owned(out)
}
