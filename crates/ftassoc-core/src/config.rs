use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{AssocError, Result};
use crate::file_type::FileType;
use crate::matcher::Matcher;
use crate::table::AssocTable;

const RULES_FILE: &str = "associations.toml";

/// Default rules template with rich comments
const DEFAULT_RULES_TEMPLATE: &str = r#"# ftassoc rules file
# Location: ~/.ftassoc/associations.toml
#
# Each [[file_type]] declares one file type and the patterns bound to it.
#   "*.ext"      extension (case-insensitive, last declaration wins)
#   "Makefile"   exact file name
#   "*.tar.gz"   wildcard, tried in file order before any extension

[[file_type]]
name = "Rust"
patterns = ["*.rs"]

[[file_type]]
name = "TOML"
patterns = ["*.toml", "Cargo.lock"]

[[file_type]]
name = "Markdown"
patterns = ["*.md", "*.markdown"]

[[file_type]]
name = "Makefile"
patterns = ["Makefile", "GNUmakefile", "*.mk"]
"#;

/// Contents of the rules file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulesConfig {
    #[serde(default, rename = "file_type")]
    pub file_types: Vec<FileTypeEntry>,
}

/// One `[[file_type]]` table
#[derive(Debug, Clone, Deserialize)]
pub struct FileTypeEntry {
    pub name: String,
    #[serde(default)]
    pub patterns: Vec<String>,
}

/// A table built from a rules file, with the file types it created.
#[derive(Debug, Clone)]
pub struct LoadedRules {
    pub table: AssocTable,
    pub file_types: Vec<FileType>,
}

impl LoadedRules {
    pub fn file_type(&self, name: &str) -> Result<&FileType> {
        self.file_types
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| AssocError::FileTypeNotFound {
                name: name.to_string(),
            })
    }
}

impl RulesConfig {
    /// Load rules from base directory
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(RULES_FILE);
        if !path.exists() {
            debug!(path = %path.display(), "no rules file, using empty rules");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: RulesConfig =
            toml::from_str(&content).map_err(|e| AssocError::ConfigParse {
                path: path.clone(),
                message: e.to_string(),
            })?;

        debug!(
            path = %path.display(),
            file_types = config.file_types.len(),
            "loaded rules file"
        );
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Get rules file path
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(RULES_FILE)
    }

    /// Initialize rules file with default template (rich comments)
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        let path = base_dir.join(RULES_FILE);
        fs::create_dir_all(base_dir)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_RULES_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Create one file type per entry and add its patterns in file order.
    pub fn build(&self) -> Result<LoadedRules> {
        let mut table = AssocTable::new();
        let mut file_types: Vec<FileType> = Vec::with_capacity(self.file_types.len());

        for entry in &self.file_types {
            if file_types.iter().any(|t| t.name() == entry.name) {
                return Err(AssocError::DuplicateFileType {
                    name: entry.name.clone(),
                });
            }

            let file_type = FileType::new(entry.name.as_str());
            for pattern in &entry.patterns {
                table.add(Matcher::parse(pattern)?, file_type.clone());
            }
            file_types.push(file_type);
        }

        Ok(LoadedRules { table, file_types })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_is_empty() {
        let dir = TempDir::new().unwrap();
        let config = RulesConfig::load(dir.path()).unwrap();
        assert!(config.file_types.is_empty());
        assert!(config.build().unwrap().table.is_empty());
    }

    #[test]
    fn test_init_writes_loadable_template() {
        let dir = TempDir::new().unwrap();
        let path = RulesConfig::init(dir.path()).unwrap();
        assert_eq!(path, RulesConfig::path(dir.path()));

        let rules = RulesConfig::load(dir.path()).unwrap().build().unwrap();
        let rust = rules.file_type("Rust").unwrap();
        let make = rules.file_type("Makefile").unwrap();
        assert_eq!(rules.table.find_by_name("lib.rs"), Some(rust));
        assert_eq!(rules.table.find_by_name("Makefile"), Some(make));
        assert_eq!(rules.table.find_by_name("rules.mk"), Some(make));
        assert!(rules.table.find_by_name("photo.png").is_none());
    }

    #[test]
    fn test_init_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = RulesConfig::path(dir.path());
        fs::write(&path, "[[file_type]]\nname = \"Only\"\npatterns = [\"*.only\"]\n").unwrap();

        RulesConfig::init(dir.path()).unwrap();
        let config = RulesConfig::load(dir.path()).unwrap();
        assert_eq!(config.file_types.len(), 1);
        assert_eq!(config.file_types[0].name, "Only");
    }

    #[test]
    fn test_load_reports_parse_error() {
        let dir = TempDir::new().unwrap();
        fs::write(RulesConfig::path(dir.path()), "[[file_type]\nname = ").unwrap();

        let err = RulesConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, AssocError::ConfigParse { .. }));
    }

    #[test]
    fn test_later_extension_wins() {
        let config = RulesConfig::parse(
            r#"
            [[file_type]]
            name = "Plain"
            patterns = ["*.txt"]

            [[file_type]]
            name = "Notes"
            patterns = ["*.TXT", "TODO"]
            "#,
        )
        .unwrap();

        let rules = config.build().unwrap();
        let plain = rules.file_type("Plain").unwrap();
        let notes = rules.file_type("Notes").unwrap();
        assert_eq!(rules.table.find_by_name("a.txt"), Some(notes));
        assert!(!rules.table.has_associations(plain));
    }

    #[test]
    fn test_duplicate_file_type() {
        let config = RulesConfig::parse(
            "[[file_type]]\nname = \"A\"\n[[file_type]]\nname = \"A\"\n",
        )
        .unwrap();
        assert!(matches!(
            config.build().unwrap_err(),
            AssocError::DuplicateFileType { .. }
        ));
    }

    #[test]
    fn test_invalid_pattern() {
        let config =
            RulesConfig::parse("[[file_type]]\nname = \"A\"\npatterns = [\"[oops\"]\n").unwrap();
        assert!(matches!(
            config.build().unwrap_err(),
            AssocError::InvalidPattern { .. }
        ));
    }

    #[test]
    fn test_unknown_file_type() {
        let rules = RulesConfig::default().build().unwrap();
        assert!(matches!(
            rules.file_type("Nope").unwrap_err(),
            AssocError::FileTypeNotFound { .. }
        ));
    }
}
