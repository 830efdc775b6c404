//! Dependency graph between named cells.
//!
//! Stores ordered pairs (dependee, dependent): "dependent's value depends on
//! dependee". Both directions are indexed so forward (dependents) and
//! reverse (dependees) queries are cheap. A name is only present as a key
//! while its set is non-empty.
//!
//! Sets are ordered, so iteration (and everything derived from it, such as
//! recalculation order) is deterministic.

use std::collections::{BTreeSet, HashMap};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DependencyGraph {
    /// dependee -> cells that depend on it
    dependents: HashMap<String, BTreeSet<String>>,
    /// dependent -> cells it depends on
    dependees: HashMap<String, BTreeSet<String>>,
    /// Number of (dependee, dependent) pairs
    size: usize,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of (dependee, dependent) pairs.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn has_dependents(&self, name: &str) -> bool {
        self.dependents.contains_key(name)
    }

    pub fn has_dependees(&self, name: &str) -> bool {
        self.dependees.contains_key(name)
    }

    /// Cells whose values depend directly on `name`.
    pub fn dependents(&self, name: &str) -> impl Iterator<Item = &str> + '_ {
        self.dependents
            .get(name)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Cells that `name` depends on directly.
    pub fn dependees(&self, name: &str) -> impl Iterator<Item = &str> + '_ {
        self.dependees
            .get(name)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Record that `dependent` depends on `dependee`. No-op if the pair exists.
    pub fn add_dependency(&mut self, dependee: &str, dependent: &str) {
        let inserted = self
            .dependents
            .entry(dependee.to_string())
            .or_default()
            .insert(dependent.to_string());
        if !inserted {
            return;
        }
        self.dependees
            .entry(dependent.to_string())
            .or_default()
            .insert(dependee.to_string());
        self.size += 1;
    }

    /// Remove the pair (dependee, dependent). No-op if absent.
    pub fn remove_dependency(&mut self, dependee: &str, dependent: &str) {
        if !remove_from(&mut self.dependents, dependee, dependent) {
            return;
        }
        remove_from(&mut self.dependees, dependent, dependee);
        self.size -= 1;
    }

    /// Replace every (name, x) pair with (name, y) for each y in `new_dependents`.
    pub fn replace_dependents<I, S>(&mut self, name: &str, new_dependents: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let old: Vec<String> = self.dependents(name).map(str::to_string).collect();
        for dependent in &old {
            self.remove_dependency(name, dependent);
        }
        for dependent in new_dependents {
            self.add_dependency(name, dependent.as_ref());
        }
    }

    /// Replace every (x, name) pair with (y, name) for each y in `new_dependees`.
    pub fn replace_dependees<I, S>(&mut self, name: &str, new_dependees: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let old: Vec<String> = self.dependees(name).map(str::to_string).collect();
        for dependee in &old {
            self.remove_dependency(dependee, name);
        }
        for dependee in new_dependees {
            self.add_dependency(dependee.as_ref(), name);
        }
    }
}

/// Remove `value` from `map[key]`, pruning the key if its set empties.
/// Returns whether anything was removed.
fn remove_from(map: &mut HashMap<String, BTreeSet<String>>, key: &str, value: &str) -> bool {
    let Some(set) = map.get_mut(key) else {
        return false;
    };
    let removed = set.remove(value);
    if set.is_empty() {
        map.remove(key);
    }
    removed
}
