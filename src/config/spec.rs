use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Resolved klepto configuration shared by every command that needs it.
///
/// Keys are accepted in snake_case as well as the PascalCase used by
/// existing `.klepto.toml` files (`Tables`, `IgnoreData`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spec {
    /// Tables to copy, in declaration order
    #[serde(default, alias = "Tables")]
    pub tables: Vec<Table>,

    /// Named filter conditions that tables can reference from `filter.match`
    #[serde(default, alias = "Matchers")]
    pub matchers: IndexMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    #[serde(alias = "Name")]
    pub name: String,

    /// Copy the structure only, skip the rows
    #[serde(default, alias = "IgnoreData")]
    pub ignore_data: bool,

    #[serde(default, alias = "Filter")]
    pub filter: Filter,

    /// Column name to faker type (e.g. `email = "EmailAddress"`)
    #[serde(default, alias = "Anonymise")]
    pub anonymise: IndexMap<String, String>,

    #[serde(default, alias = "Relationships")]
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// SQL condition, or the name of an entry in `matchers`
    #[serde(default, rename = "match", alias = "Match")]
    pub match_: String,

    /// Maximum number of rows, 0 means unlimited
    #[serde(default, alias = "Limit")]
    pub limit: u64,

    /// Column name to sort direction
    #[serde(default, alias = "Sorts")]
    pub sorts: IndexMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default, alias = "ReferencedTable")]
    pub referenced_table: String,

    #[serde(default, alias = "ReferencedKey")]
    pub referenced_key: String,

    #[serde(default, alias = "ForeignKey")]
    pub foreign_key: String,
}

impl Filter {
    /// The SQL condition for this filter, expanding a matcher reference
    pub fn condition<'a>(&'a self, matchers: &'a IndexMap<String, String>) -> Option<&'a str> {
        if self.match_.is_empty() {
            return None;
        }
        Some(
            matchers
                .get(&self.match_)
                .map(String::as_str)
                .unwrap_or(&self.match_),
        )
    }
}
