//! Association table
//!
//! Maps matchers to file types through two indices:
//!
//! - an extension index (`extension -> FileType`), single valued, last write wins
//! - a generic list of `(rule, FileType)` pairs kept in insertion order,
//!   duplicates allowed
//!
//! Lookups by file name try the generic list first, in order, and fall back to
//! the extension index. File types are compared by identity.
//!
//! The table has no internal locking. Share it across threads through
//! [`crate::SharedAssocTable`], which mutates a private [`AssocTable::copy`]
//! and publishes it in one swap.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::file_type::FileType;
use crate::matcher::{extension_of, ExtensionMatcher, Matcher};

#[derive(Debug, Clone, Default)]
pub struct AssocTable {
    extensions: HashMap<String, FileType>,
    rules: Vec<(Matcher, FileType)>,
}

impl AssocTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty() && self.rules.is_empty()
    }

    /// Number of associations across both indices.
    pub fn len(&self) -> usize {
        self.extensions.len() + self.rules.len()
    }

    /// Bind `matcher` to `file_type`.
    ///
    /// An extension already bound to another type is silently rebound.
    /// Generic rules are appended even if the same pair is already present.
    pub fn add(&mut self, matcher: Matcher, file_type: FileType) {
        match matcher {
            Matcher::Extension(m) => {
                trace!(extension = m.extension(), file_type = %file_type, "bind extension");
                self.extensions
                    .insert(m.extension().to_string(), file_type);
            }
            generic => {
                trace!(rule = %generic, file_type = %file_type, "append rule");
                self.rules.push((generic, file_type));
            }
        }
    }

    pub fn is_associated_with(&self, file_type: &FileType, matcher: &Matcher) -> bool {
        match matcher {
            Matcher::Extension(m) => self.extensions.get(m.extension()) == Some(file_type),
            generic => self
                .rules
                .iter()
                .any(|(m, t)| m == generic && t == file_type),
        }
    }

    /// Remove an association. Returns whether anything changed.
    ///
    /// For an extension matcher the entry is removed only while it is still
    /// bound to `file_type`. For a generic rule the first equal rule is
    /// removed whatever type it is bound to; use [`AssocTable::remove_exact`]
    /// to require the type to match as well.
    pub fn remove(&mut self, matcher: &Matcher, file_type: &FileType) -> bool {
        match matcher {
            Matcher::Extension(m) => self.remove_extension(m, file_type),
            generic => match self.rules.iter().position(|(m, _)| m == generic) {
                Some(idx) => {
                    let (_, removed) = self.rules.remove(idx);
                    if &removed != file_type {
                        debug!(
                            rule = %generic,
                            bound = %removed,
                            requested = %file_type,
                            "removed rule bound to a different file type"
                        );
                    }
                    true
                }
                None => false,
            },
        }
    }

    /// Remove an association only if `matcher` is bound to `file_type`.
    pub fn remove_exact(&mut self, matcher: &Matcher, file_type: &FileType) -> bool {
        match matcher {
            Matcher::Extension(m) => self.remove_extension(m, file_type),
            generic => match self
                .rules
                .iter()
                .position(|(m, t)| m == generic && t == file_type)
            {
                Some(idx) => {
                    self.rules.remove(idx);
                    true
                }
                None => false,
            },
        }
    }

    fn remove_extension(&mut self, matcher: &ExtensionMatcher, file_type: &FileType) -> bool {
        if self.extensions.get(matcher.extension()) == Some(file_type) {
            self.extensions.remove(matcher.extension());
            true
        } else {
            false
        }
    }

    /// Drop every association bound to `file_type`.
    pub fn remove_all(&mut self, file_type: &FileType) -> bool {
        let before = self.len();
        self.extensions.retain(|_, t| *t != *file_type);
        self.rules.retain(|(_, t)| t != file_type);
        let removed = before - self.len();
        debug!(file_type = %file_type, removed, "removed all associations");
        removed > 0
    }

    /// File type for a file name. Generic rules win over extensions.
    pub fn find_by_name(&self, file_name: &str) -> Option<&FileType> {
        self.rules
            .iter()
            .find(|(m, _)| m.accept(file_name))
            .map(|(_, t)| t)
            .or_else(|| self.extensions.get(&extension_of(file_name)))
    }

    /// File type bound to this exact matcher, if any.
    pub fn find_by_matcher(&self, matcher: &Matcher) -> Option<&FileType> {
        match matcher {
            Matcher::Extension(m) => self.extensions.get(m.extension()),
            generic => self
                .rules
                .iter()
                .find(|(m, _)| m == generic)
                .map(|(_, t)| t),
        }
    }

    /// Extensions bound to `file_type`, in no particular order.
    #[deprecated(note = "use `associations_for`, which also covers generic rules")]
    pub fn associated_extensions(&self, file_type: &FileType) -> Vec<String> {
        self.extensions
            .iter()
            .filter(|(_, t)| *t == file_type)
            .map(|(ext, _)| ext.clone())
            .collect()
    }

    /// Matchers bound to `file_type`: generic rules in list order, then one
    /// extension matcher per bound extension.
    pub fn associations_for(&self, file_type: &FileType) -> Vec<Matcher> {
        let rules = self
            .rules
            .iter()
            .filter(|(_, t)| t == file_type)
            .map(|(m, _)| m.clone());
        let extensions = self
            .extensions
            .iter()
            .filter(|(_, t)| *t == file_type)
            .map(|(ext, _)| Matcher::Extension(ExtensionMatcher::from_normalized(ext)));
        rules.chain(extensions).collect()
    }

    pub fn has_associations(&self, file_type: &FileType) -> bool {
        self.extensions.values().any(|t| t == file_type)
            || self.rules.iter().any(|(_, t)| t == file_type)
    }

    /// Independent indices sharing the same matchers and file types.
    pub fn copy(&self) -> Self {
        self.clone()
    }
}
