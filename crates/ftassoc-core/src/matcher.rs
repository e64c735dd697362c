//! File name matchers
//!
//! A [`Matcher`] is either an extension matcher, which the association table
//! indexes by its extension string, or a generic [`NameRule`] that is tried
//! against the full file name.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use glob::Pattern;

use crate::error::{AssocError, Result};

/// Characters that turn a pattern into a wildcard rule.
const WILDCARD_CHARS: &[char] = &['*', '?', '['];

/// Extension of the final path segment, lower-cased. Empty if there is none.
pub fn extension_of(file_name: &str) -> String {
    let segment = file_name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(file_name);
    match segment.rfind('.') {
        Some(idx) => segment[idx + 1..].to_lowercase(),
        None => String::new(),
    }
}

// ============================================================================
// Generic rules
// ============================================================================

/// A caller-supplied predicate over a full file name.
///
/// Implementors must provide value equality through [`NameRule::rule_eq`];
/// [`rule_eq_by`] covers the common case of a type that is `PartialEq`.
pub trait NameRule: fmt::Debug + Send + Sync {
    fn accept(&self, file_name: &str) -> bool;

    /// Human readable form, e.g. `Makefile` or `*.tar.gz`.
    fn presentable(&self) -> String;

    fn as_any(&self) -> &dyn Any;

    fn rule_eq(&self, other: &dyn NameRule) -> bool;
}

/// Value equality for a `PartialEq` rule against any other rule.
pub fn rule_eq_by<T: NameRule + PartialEq + 'static>(this: &T, other: &dyn NameRule) -> bool {
    other
        .as_any()
        .downcast_ref::<T>()
        .is_some_and(|other| other == this)
}

/// Accepts one exact file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactNameRule {
    name: String,
    ignore_case: bool,
}

impl ExactNameRule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ignore_case: false,
        }
    }

    pub fn ignore_case(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ignore_case: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl NameRule for ExactNameRule {
    fn accept(&self, file_name: &str) -> bool {
        if self.ignore_case {
            self.name.eq_ignore_ascii_case(file_name)
        } else {
            self.name == file_name
        }
    }

    fn presentable(&self) -> String {
        self.name.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn rule_eq(&self, other: &dyn NameRule) -> bool {
        rule_eq_by(self, other)
    }
}

/// Shell-style wildcard over the file name (`*`, `?`, `[...]`).
#[derive(Debug, Clone)]
pub struct WildcardRule {
    pattern: Pattern,
}

impl WildcardRule {
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Pattern::new(pattern).map_err(|e| AssocError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.msg.to_string(),
        })?;
        Ok(Self { pattern })
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

impl PartialEq for WildcardRule {
    fn eq(&self, other: &Self) -> bool {
        self.pattern.as_str() == other.pattern.as_str()
    }
}

impl NameRule for WildcardRule {
    fn accept(&self, file_name: &str) -> bool {
        self.pattern.matches(file_name)
    }

    fn presentable(&self) -> String {
        self.pattern.as_str().to_string()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn rule_eq(&self, other: &dyn NameRule) -> bool {
        rule_eq_by(self, other)
    }
}

// ============================================================================
// Matcher
// ============================================================================

/// Matches file names whose extension equals a case-normalized string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtensionMatcher {
    extension: String,
}

impl ExtensionMatcher {
    /// `"TXT"`, `"txt"` and `".txt"` all give the extension `txt`.
    pub fn new(extension: &str) -> Self {
        let extension = extension.strip_prefix('.').unwrap_or(extension);
        Self {
            extension: extension.to_lowercase(),
        }
    }

    /// Wrap a key that is already normalized, as stored in the table.
    pub(crate) fn from_normalized(extension: &str) -> Self {
        Self {
            extension: extension.to_string(),
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn accept(&self, file_name: &str) -> bool {
        extension_of(file_name) == self.extension
    }
}

#[derive(Debug, Clone)]
pub enum Matcher {
    Extension(ExtensionMatcher),
    Generic(Arc<dyn NameRule>),
}

impl Matcher {
    pub fn extension(extension: &str) -> Self {
        Self::Extension(ExtensionMatcher::new(extension))
    }

    pub fn exact(name: impl Into<String>) -> Self {
        Self::Generic(Arc::new(ExactNameRule::new(name)))
    }

    pub fn wildcard(pattern: &str) -> Result<Self> {
        Ok(Self::Generic(Arc::new(WildcardRule::new(pattern)?)))
    }

    pub fn rule<R: NameRule + 'static>(rule: R) -> Self {
        Self::Generic(Arc::new(rule))
    }

    /// Parse a pattern as written in a rules file.
    ///
    /// - `*.ext` with no other wildcard: extension matcher
    /// - no wildcard at all: exact file name
    /// - anything else: wildcard rule
    pub fn parse(pattern: &str) -> Result<Self> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(AssocError::InvalidPattern {
                pattern: pattern.to_string(),
                message: "pattern is empty".to_string(),
            });
        }

        if let Some(ext) = pattern.strip_prefix("*.") {
            if !ext.is_empty() && !ext.contains(WILDCARD_CHARS) && !ext.contains('.') {
                return Ok(Self::extension(ext));
            }
        }

        if pattern.contains(WILDCARD_CHARS) {
            Self::wildcard(pattern)
        } else {
            Ok(Self::exact(pattern))
        }
    }

    pub fn accept(&self, file_name: &str) -> bool {
        match self {
            Self::Extension(m) => m.accept(file_name),
            Self::Generic(rule) => rule.accept(file_name),
        }
    }

    pub fn presentable(&self) -> String {
        match self {
            Self::Extension(m) => format!("*.{}", m.extension()),
            Self::Generic(rule) => rule.presentable(),
        }
    }

    pub fn is_extension(&self) -> bool {
        matches!(self, Self::Extension(_))
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Extension(a), Self::Extension(b)) => a == b,
            (Self::Generic(a), Self::Generic(b)) => a.rule_eq(b.as_ref()),
            _ => false,
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.presentable())
    }
}
