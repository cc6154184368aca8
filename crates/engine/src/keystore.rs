use std::{
    collections::{BTreeSet, HashMap},
    sync::RwLock,
};

/// Named identifier sets shared between the stages of a run.
///
/// `set` always stores a deduplicated copy and overwrites any prior value;
/// `get` of a name nothing has written yet is an empty set, not an error —
/// a stage whose upstream produced nothing simply sees nothing to filter
/// on. Iteration order of a set is unspecified.
#[derive(Debug, Default)]
pub struct KeyStore {
    sets: RwLock<HashMap<String, BTreeSet<String>>>,
}

impl KeyStore {
    pub fn new() -> Self {
        KeyStore::default()
    }

    pub fn set<I, S>(&self, name: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let deduped: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        let mut sets = self.sets.write().unwrap_or_else(|e| e.into_inner());
        sets.insert(name.to_string(), deduped);
    }

    pub fn get(&self, name: &str) -> Vec<String> {
        let sets = self.sets.read().unwrap_or_else(|e| e.into_inner());
        sets.get(name)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self, name: &str) -> usize {
        let sets = self.sets.read().unwrap_or_else(|e| e.into_inner());
        sets.get(name).map(BTreeSet::len).unwrap_or(0)
    }

    pub fn is_empty(&self, name: &str) -> bool {
        self.len(name) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_deduplicates_regardless_of_order() {
        let store = KeyStore::new();
        store.set("emails", ["b@x.com", "a@x.com", "a@x.com", "b@x.com"]);

        let mut got = store.get("emails");
        got.sort();
        assert_eq!(got, vec!["a@x.com".to_string(), "b@x.com".to_string()]);
        assert_eq!(store.len("emails"), 2);
    }

    #[test]
    fn absent_name_is_an_empty_set() {
        let store = KeyStore::new();
        assert!(store.get("tokens").is_empty());
        assert!(store.is_empty("tokens"));
    }

    #[test]
    fn set_overwrites_prior_value() {
        let store = KeyStore::new();
        store.set("ids", ["one", "two"]);
        store.set("ids", ["three"]);
        assert_eq!(store.get("ids"), vec!["three".to_string()]);
    }

    #[test]
    fn empty_write_is_distinct_from_absent_but_still_empty() {
        let store = KeyStore::new();
        store.set("emails", Vec::<String>::new());
        assert!(store.is_empty("emails"));
    }
}
