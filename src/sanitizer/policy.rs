// src/sanitizer/policy.rs

use std::collections::BTreeSet;
use std::fmt;

/// Element names whose whole subtree is dropped.
pub const DANGEROUS_ELEMENTS: &[&str] = &["script", "style", "iframe", "object", "embed", "link"];

/// Attribute names stripped from every tag, besides the `on*` handlers.
pub const DANGEROUS_ATTRIBUTES: &[&str] = &["style", "srcdoc", "formaction"];

/// Event handler prefix. A name matches when it is strictly longer than this.
pub const EVENT_HANDLER_PREFIX: &str = "on";

/// URL scheme prefixes neutralized on `href`/`src`.
pub const DANGEROUS_SCHEMES: &[&str] = &["javascript:", "data:"];

/// Tags allowed to remain in the output.
pub const ALLOWED_TAGS: &[&str] = &[
    "b", "i", "u", "em", "strong", "a", "ul", "ol", "li", "br", "p", "img",
];

/// Attributes carrying URLs that are checked for dangerous schemes.
pub const URL_ATTRIBUTES: &[&str] = &["href", "src"];

/// One entry of the dangerous attribute set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum AttributeRule {
    /// Any name starting with the prefix and at least one more character.
    Prefixed(String),
    Exact(String),
}

impl AttributeRule {
    /// `name` must already be lowercase.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            AttributeRule::Prefixed(prefix) => name.len() > prefix.len() && name.starts_with(prefix.as_str()),
            AttributeRule::Exact(exact) => name == exact,
        }
    }
}

impl fmt::Display for AttributeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeRule::Prefixed(prefix) => write!(f, "{}*", prefix),
            AttributeRule::Exact(exact) => write!(f, "{}", exact),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    EmptyAllowedTags,
    EmptyName(&'static str),
    /// A name is both allowed and dangerous.
    Conflict(String),
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyError::EmptyAllowedTags => write!(f, "allowed tag set must not be empty"),
            PolicyError::EmptyName(set) => write!(f, "empty name in {} set", set),
            PolicyError::Conflict(name) => {
                write!(f, "'{}' is both an allowed tag and a dangerous element", name)
            }
        }
    }
}

impl std::error::Error for PolicyError {}

/// Immutable sanitization policy.
///
/// All names are stored lowercase; lookups take names in any case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    dangerous_elements: BTreeSet<String>,
    dangerous_attributes: BTreeSet<AttributeRule>,
    dangerous_schemes: BTreeSet<String>,
    allowed_tags: BTreeSet<String>,
}

impl Policy {
    pub fn new<E, A, S, T>(
        dangerous_elements: E,
        dangerous_attributes: A,
        dangerous_schemes: S,
        allowed_tags: T,
    ) -> Result<Self, PolicyError>
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        A: IntoIterator<Item = AttributeRule>,
        S: IntoIterator,
        S::Item: AsRef<str>,
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        let dangerous_elements = lowercase_set(dangerous_elements, "dangerous element")?;
        let dangerous_schemes = lowercase_set(dangerous_schemes, "dangerous scheme")?;
        let allowed_tags = lowercase_set(allowed_tags, "allowed tag")?;

        let mut attributes = BTreeSet::new();
        for rule in dangerous_attributes {
            let rule = match rule {
                AttributeRule::Prefixed(p) => AttributeRule::Prefixed(p.to_ascii_lowercase()),
                AttributeRule::Exact(e) => AttributeRule::Exact(e.to_ascii_lowercase()),
            };
            if let AttributeRule::Prefixed(s) | AttributeRule::Exact(s) = &rule {
                if s.is_empty() {
                    return Err(PolicyError::EmptyName("dangerous attribute"));
                }
            }
            attributes.insert(rule);
        }

        if allowed_tags.is_empty() {
            return Err(PolicyError::EmptyAllowedTags);
        }
        if let Some(name) = allowed_tags.intersection(&dangerous_elements).next() {
            return Err(PolicyError::Conflict(name.clone()));
        }

        Ok(Self {
            dangerous_elements,
            dangerous_attributes: attributes,
            dangerous_schemes,
            allowed_tags,
        })
    }

    pub fn dangerous_elements(&self) -> impl Iterator<Item = &str> {
        self.dangerous_elements.iter().map(String::as_str)
    }

    pub fn dangerous_attributes(&self) -> impl Iterator<Item = &AttributeRule> {
        self.dangerous_attributes.iter()
    }

    pub fn dangerous_schemes(&self) -> impl Iterator<Item = &str> {
        self.dangerous_schemes.iter().map(String::as_str)
    }

    pub fn allowed_tags(&self) -> impl Iterator<Item = &str> {
        self.allowed_tags.iter().map(String::as_str)
    }

    pub fn is_dangerous_element(&self, name: &str) -> bool {
        self.dangerous_elements.contains(&name.to_ascii_lowercase())
    }

    pub fn is_dangerous_attribute(&self, name: &str) -> bool {
        let name = name.to_ascii_lowercase();
        self.dangerous_attributes.iter().any(|rule| rule.matches(&name))
    }

    pub fn is_allowed_tag(&self, name: &str) -> bool {
        self.allowed_tags.contains(&name.to_ascii_lowercase())
    }

    pub fn is_url_attribute(&self, name: &str) -> bool {
        URL_ATTRIBUTES.iter().any(|attr| name.eq_ignore_ascii_case(attr))
    }

    /// `normalized` must be lowercase with leading whitespace removed.
    pub fn has_dangerous_scheme(&self, normalized: &str) -> bool {
        self.dangerous_schemes
            .iter()
            .any(|scheme| normalized.starts_with(scheme.as_str()))
    }

    /// Length of the longest dangerous element name, in bytes.
    pub fn longest_dangerous_element(&self) -> usize {
        self.dangerous_elements.iter().map(String::len).max().unwrap_or(0)
    }

    /// Length of the longest dangerous scheme, in chars.
    pub fn longest_scheme(&self) -> usize {
        self.dangerous_schemes
            .iter()
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0)
    }
}

impl Default for Policy {
    fn default() -> Self {
        let mut attributes = vec![AttributeRule::Prefixed(EVENT_HANDLER_PREFIX.to_string())];
        attributes.extend(
            DANGEROUS_ATTRIBUTES
                .iter()
                .map(|name| AttributeRule::Exact(name.to_string())),
        );

        Self {
            dangerous_elements: DANGEROUS_ELEMENTS.iter().map(|s| s.to_string()).collect(),
            dangerous_attributes: attributes.into_iter().collect(),
            dangerous_schemes: DANGEROUS_SCHEMES.iter().map(|s| s.to_string()).collect(),
            allowed_tags: ALLOWED_TAGS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn lowercase_set<I>(names: I, set: &'static str) -> Result<BTreeSet<String>, PolicyError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| {
            let name = name.as_ref().trim().to_ascii_lowercase();
            if name.is_empty() {
                Err(PolicyError::EmptyName(set))
            } else {
                Ok(name)
            }
        })
        .collect()
}
