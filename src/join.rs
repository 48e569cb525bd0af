use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

/// Indexes `rows` by key, keeping the first row seen for each key.
///
/// This is the dedup step in front of every many-to-one left-join.
pub fn first_by_key<T, K, F>(rows: impl IntoIterator<Item = T>, key: F) -> HashMap<K, T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut out = HashMap::new();
    for row in rows {
        if let Entry::Vacant(slot) = out.entry(key(&row)) {
            slot.insert(row);
        }
    }
    out
}
