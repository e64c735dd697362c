pub mod config;
pub mod error;
pub mod file_type;
pub mod matcher;
pub mod shared;
pub mod table;

pub use config::{FileTypeEntry, LoadedRules, RulesConfig};
pub use error::{AssocError, Result};
pub use file_type::FileType;
pub use matcher::{
    extension_of, rule_eq_by, ExactNameRule, ExtensionMatcher, Matcher, NameRule, WildcardRule,
};
pub use shared::SharedAssocTable;
pub use table::AssocTable;
