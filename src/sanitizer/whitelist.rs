// src/sanitizer/whitelist.rs

use super::policy::Policy;
use super::tokenizer::{Token, tokenize};

/// Keeps text and allowed tags, drops everything else.
///
/// Allowed tags are copied with whatever attributes survived the earlier
/// passes. Comments and declarations are dropped, as is a tag cut off by the
/// end of input.
///
/// Every `<` that does not open a kept tag is written as `&lt;`, in text and
/// inside kept tags alike. With no stray `<` left, no deletion can join two
/// fragments into a new tag, so one run of the pipeline is final.
pub fn enforce_whitelist(input: &str, policy: &Policy) -> String {
    let mut out = String::with_capacity(input.len());

    for token in tokenize(input) {
        match token {
            Token::Text(span) => push_escaped(&mut out, &input[span]),
            Token::Tag(tag) if tag.terminated && policy.is_allowed_tag(tag.name) => {
                out.push('<');
                push_escaped(&mut out, &input[tag.span.start + 1..tag.span.end]);
            }
            Token::Tag(tag) => {
                tracing::trace!(tag = tag.name, closing = tag.closing, "Dropping tag");
            }
            Token::Comment(_) => {}
        }
    }

    out
}

fn push_escaped(out: &mut String, text: &str) {
    let mut rest = text;
    while let Some(i) = rest.find('<') {
        out.push_str(&rest[..i]);
        out.push_str("&lt;");
        rest = &rest[i + 1..];
    }
    out.push_str(rest);
}
