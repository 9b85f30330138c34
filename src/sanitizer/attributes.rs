// src/sanitizer/attributes.rs

use super::policy::Policy;
use super::rewrite_tags;
use super::tokenizer::{Attribute, is_html_space};

/// Removes event handlers and the other dangerous attributes from every tag.
///
/// The attribute goes together with the whitespace before it; the rest of the
/// tag, including a trailing `/>`, is copied unchanged. When what follows the
/// removed attribute would otherwise run into the previous attribute, a
/// single space is put back so every surviving attribute keeps its name and
/// value.
pub fn strip_dangerous_attributes(input: &str, policy: &Policy) -> String {
    rewrite_tags(input, |tag, out| {
        let mut copied = tag.span.start;
        let mut separate = false;

        for attr in &tag.attributes {
            if !must_strip(attr, policy) {
                continue;
            }
            tracing::trace!(tag = tag.name, attribute = attr.name, "Stripping attribute");
            push_segment(out, &input[copied..attr.lead], &mut separate);
            copied = attr.span.end;
            separate = true;
        }
        push_segment(out, &input[copied..tag.span.end], &mut separate);
    })
}

/// Dangerous names, plus names starting with `=`. The latter only come from
/// malformed markup like `a="x"="y"`; once their neighbour is gone they would
/// turn into the value of the previous attribute.
fn must_strip(attr: &Attribute<'_>, policy: &Policy) -> bool {
    attr.name.starts_with('=') || policy.is_dangerous_attribute(attr.name)
}

fn push_segment(out: &mut String, segment: &str, separate: &mut bool) {
    let Some(&first) = segment.as_bytes().first() else {
        return;
    };
    if *separate && !is_html_space(first) && first != b'>' {
        out.push(' ');
    }
    *separate = false;
    out.push_str(segment);
}
