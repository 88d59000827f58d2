//! Method name resolution.
//!
//! Maps case-insensitive method names onto the operations a transport declares. Names the
//! transport does not declare directly may still resolve through [`ALIASES`].

use crate::error::DispatchError;
use std::collections::HashMap;

/// Alternate method spellings and the operation they stand for.
pub const ALIASES: &[(&str, &str)] = &[("delete", "del")];

/// Lookup table from lower-cased method name to transport operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodTable {
    operations: HashMap<String, &'static str>,
}

impl MethodTable {
    /// Build the table for a transport declaring `operations`.
    ///
    /// An alias is only added when its target is among `operations` and no operation
    /// already carries the alias name itself.
    pub fn new(operations: &[&'static str]) -> Self {
        let mut table: HashMap<String, &'static str> = operations
            .iter()
            .map(|operation| (operation.to_lowercase(), *operation))
            .collect();

        for (alias, target) in ALIASES {
            if table.contains_key(*alias) {
                continue;
            }
            if let Some(operation) = table.get(*target).copied() {
                table.insert((*alias).to_string(), operation);
            }
        }

        Self { operations: table }
    }

    /// Resolve `method` to an operation name.
    pub fn resolve(&self, method: &str) -> Result<&'static str, DispatchError> {
        self.operations
            .get(&method.to_lowercase())
            .copied()
            .ok_or_else(|| DispatchError::UnsupportedMethod {
                method: method.to_string(),
            })
    }

    /// All accepted method names, sorted
    pub fn methods(&self) -> Vec<&str> {
        let mut methods: Vec<&str> = self.operations.keys().map(String::as_str).collect();
        methods.sort_unstable();
        methods
    }
}
