//! Reconciliation of a movie's cast against a requested set of person ids

use std::collections::BTreeSet;

/// Association rows to delete and insert so that a movie's cast becomes the requested set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CastDiff {
    /// Currently cast but not requested
    pub to_remove: BTreeSet<i32>,
    /// Requested but not currently cast
    pub to_add: BTreeSet<i32>,
}

impl CastDiff {
    /// `to_remove = current - requested`, `to_add = requested - current`
    pub fn between(current: &BTreeSet<i32>, requested: &BTreeSet<i32>) -> Self {
        Self {
            to_remove: current.difference(requested).copied().collect(),
            to_add: requested.difference(current).copied().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_remove.is_empty() && self.to_add.is_empty()
    }

    pub fn removed(&self) -> Vec<i32> {
        self.to_remove.iter().copied().collect()
    }

    pub fn added(&self) -> Vec<i32> {
        self.to_add.iter().copied().collect()
    }

    /// Removals first, then additions
    pub fn apply(&self, cast: &mut BTreeSet<i32>) {
        for id in &self.to_remove {
            cast.remove(id);
        }
        cast.extend(self.to_add.iter().copied());
    }
}
