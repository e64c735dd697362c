//! File type handles.
//!
//! A `FileType` is an opaque token owned by whoever creates it. Two handles
//! are the same file type only if one was cloned from the other; the display
//! name takes no part in equality.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use uuid::Uuid;

#[derive(Clone)]
pub struct FileType {
    id: Uuid,
    name: Arc<str>,
}

impl FileType {
    /// Create a new, distinct file type.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for FileType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FileType {}

impl Hash for FileType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileType({} #{})", self.name, &self.id.simple().to_string()[..8])
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_is_not_same_type() {
        let a = FileType::new("Text");
        let b = FileType::new("Text");
        assert_ne!(a, b);
        assert_eq!(a.name(), b.name());
    }

    #[test]
    fn test_clone_keeps_identity() {
        let a = FileType::new("Rust");
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_display_uses_name() {
        let t = FileType::new("YAML");
        assert_eq!(t.to_string(), "YAML");
        assert!(format!("{:?}", t).starts_with("FileType(YAML #"));
    }
}
