use super::types::MappingEntry;
use crate::utils::fold_case;
use std::collections::HashSet;

/// Distinct student names, compared case-insensitively
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentRoster {
    /// Display names (first-seen casing), sorted by folded name
    names: Vec<String>,
}

impl StudentRoster {
    pub fn from_entries(entries: &[MappingEntry]) -> Self {
        let mut seen = HashSet::new();
        let mut names: Vec<String> = entries
            .iter()
            .filter(|e| seen.insert(fold_case(&e.student)))
            .map(|e| e.student.clone())
            .collect();

        names.sort_by_cached_key(|n| fold_case(n));
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}
