// src/sanitizer/mod.rs

//! Whitelist HTML sanitizer for user-supplied note content.
//!
//! The pipeline runs five passes in a fixed order:
//! 1. dangerous elements with their content ([`elements::remove_dangerous_elements`])
//! 2. leftover dangerous opening tags ([`elements::remove_standalone_dangerous_tags`])
//! 3. dangerous attributes ([`attributes::strip_dangerous_attributes`])
//! 4. dangerous URL schemes ([`schemes::neutralize_dangerous_urls`])
//! 5. the tag whitelist ([`whitelist::enforce_whitelist`])
//!
//! Later passes assume the cleanup done by earlier ones: an allowed tag is
//! only checked against the whitelist once its handlers are gone.

pub mod attributes;
pub mod elements;
pub mod policy;
pub mod schemes;
pub mod tokenizer;
pub mod whitelist;

use std::sync::LazyLock;

pub use policy::{AttributeRule, Policy, PolicyError};

use tokenizer::{Tag, Token, tokenize};

static DEFAULT_SANITIZER: LazyLock<Sanitizer> = LazyLock::new(Sanitizer::default);

/// Sanitizes `raw` with the default policy.
pub fn sanitize(raw: &str) -> String {
    DEFAULT_SANITIZER.sanitize(raw)
}

/// Stateless sanitizer bound to one immutable [`Policy`].
///
/// Safe to share between threads; every call only reads the policy.
#[derive(Debug, Clone, Default)]
pub struct Sanitizer {
    policy: Policy,
}

impl Sanitizer {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Returns `raw` with all executable markup removed.
    ///
    /// Never fails: malformed markup is stripped rather than reported.
    /// The output is a fixpoint, so sanitizing it again changes nothing.
    /// Runs in time linear in the input length.
    pub fn sanitize(&self, raw: &str) -> String {
        let policy = &self.policy;
        let out = elements::remove_dangerous_elements(raw, policy);
        let out = elements::remove_standalone_dangerous_tags(&out, policy);
        let out = attributes::strip_dangerous_attributes(&out, policy);
        let out = schemes::neutralize_dangerous_urls(&out, policy);
        let out = whitelist::enforce_whitelist(&out, policy);

        tracing::debug!(
            input_len = raw.len(),
            output_len = out.len(),
            "Content sanitized"
        );
        out
    }
}

/// Copies `input`, handing every tag to `rewrite` and everything else through
/// unchanged. `rewrite` is responsible for writing the tag's replacement.
pub(crate) fn rewrite_tags<F>(input: &str, mut rewrite: F) -> String
where
    F: FnMut(&Tag<'_>, &mut String),
{
    let mut out = String::with_capacity(input.len());
    for token in tokenize(input) {
        match token {
            Token::Tag(tag) => rewrite(&tag, &mut out),
            other => out.push_str(&input[other.span()]),
        }
    }
    out
}
