use crate::tag::Tag;
use std::collections::HashMap;

/// A single association for a [`TagMap`]: a tag paired with a value.
#[derive(Clone, Debug)]
pub struct Entry<V> {
    tag: Tag,
    value: V,
}

impl<V> Entry<V> {
    /// Builds an entry keyed by the tag of `K`.
    pub fn new<K: ?Sized + 'static>(value: V) -> Self {
        Entry {
            tag: Tag::of::<K>(),
            value,
        }
    }

    /// Builds an entry keyed by an explicit tag.
    ///
    /// Useful for wildcard entries at [`Tag::any`], or for re-keying entries
    /// discovered through [`TagMap::entries`].
    pub fn with_tag(tag: Tag, value: V) -> Self {
        Entry { tag, value }
    }

    /// The tag this entry is keyed by.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// The entry's value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consumes the entry, yielding its value.
    pub fn into_value(self) -> V {
        self.value
    }
}

/// A mutable mapping from [`Tag`] to values of type `V`.
///
/// `TagMap` is the registry/dispatch-table half of the crate: keys are type
/// tags, so a lookup can be driven either by naming a type parameter or by a
/// tag recovered at runtime (from a [`Wrapped`](crate::Wrapped), or from
/// enumeration).
///
/// There is at most one entry per tag; storing a duplicate tag overwrites,
/// deleting an absent tag is a no-op.
///
/// `TagMap` carries no internal synchronization. Concurrent mutation from
/// multiple threads requires external mutual exclusion, exactly as with any
/// other `&mut`-mutated structure; the borrow checker enforces this for
/// in-process use.
///
/// # Examples
///
/// ```
/// use tagmap::{Entry, TagMap};
///
/// let map = TagMap::with_entries([
///     Entry::new::<i32>("red"),
///     Entry::new::<f64>("blue"),
/// ]);
///
/// assert_eq!(map.load::<i32>(), Some(&"red"));
/// assert_eq!(map.load::<String>(), None);
/// ```
#[derive(Clone, Debug)]
pub struct TagMap<V> {
    entries: HashMap<Tag, V>,
}

impl<V> TagMap<V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        TagMap {
            entries: HashMap::new(),
        }
    }

    /// Creates a map and stores the given entries, left to right.
    pub fn with_entries(entries: impl IntoIterator<Item = Entry<V>>) -> Self {
        let mut map = Self::new();
        map.store(entries);
        map
    }

    /// Upserts entries, left to right. The last write for a tag wins.
    pub fn store(&mut self, entries: impl IntoIterator<Item = Entry<V>>) {
        for entry in entries {
            self.entries.insert(entry.tag, entry.value);
        }
    }

    /// Removes the entries keyed by the given tags. Absent tags are ignored.
    pub fn delete(&mut self, tags: impl IntoIterator<Item = Tag>) {
        for tag in tags {
            self.entries.remove(&tag);
        }
    }

    /// Looks up the value keyed by the tag of `K`.
    pub fn load<K: ?Sized + 'static>(&self) -> Option<&V> {
        self.entries.get(&Tag::of::<K>())
    }

    /// Looks up the value keyed by a previously obtained tag.
    pub fn load_by_tag(&self, tag: Tag) -> Option<&V> {
        self.entries.get(&tag)
    }

    /// Looks up the value keyed by the static type of `sample`.
    pub fn load_by_value<K: 'static>(&self, sample: &K) -> Option<&V> {
        self.load_by_tag(Tag::of_val(sample))
    }

    /// Mutable form of [`TagMap::load`].
    pub fn load_mut<K: ?Sized + 'static>(&mut self) -> Option<&mut V> {
        self.entries.get_mut(&Tag::of::<K>())
    }

    /// Mutable form of [`TagMap::load_by_tag`].
    pub fn load_by_tag_mut(&mut self, tag: Tag) -> Option<&mut V> {
        self.entries.get_mut(&tag)
    }

    /// Returns true if an entry is keyed by the tag of `K`.
    pub fn contains<K: ?Sized + 'static>(&self) -> bool {
        self.entries.contains_key(&Tag::of::<K>())
    }

    /// Returns true if an entry is keyed by `tag`.
    pub fn contains_tag(&self, tag: Tag) -> bool {
        self.entries.contains_key(&tag)
    }

    /// The number of live entries; always the count of distinct stored tags.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Collects the tags currently keyed, as an independent snapshot.
    ///
    /// Order is unspecified; mutating the map afterwards does not affect a
    /// snapshot already taken.
    pub fn keys(&self) -> Vec<Tag> {
        self.entries.keys().copied().collect()
    }

    /// Collects the current associations, as an independent snapshot.
    pub fn entries(&self) -> Vec<Entry<V>>
    where
        V: Clone,
    {
        self.entries
            .iter()
            .map(|(tag, value)| Entry::with_tag(*tag, value.clone()))
            .collect()
    }

    /// Iterates over the live associations without snapshotting.
    pub fn iter(&self) -> impl Iterator<Item = (Tag, &V)> {
        self.entries.iter().map(|(tag, value)| (*tag, value))
    }
}

impl<V> Default for TagMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<Entry<V>> for TagMap<V> {
    fn from_iter<I: IntoIterator<Item = Entry<V>>>(iter: I) -> Self {
        Self::with_entries(iter)
    }
}

impl<V> Extend<Entry<V>> for TagMap<V> {
    fn extend<I: IntoIterator<Item = Entry<V>>>(&mut self, iter: I) {
        self.store(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_load() {
        let mut map = TagMap::new();
        map.store([Entry::new::<i32>("int"), Entry::new::<String>("string")]);

        assert_eq!(map.load::<i32>(), Some(&"int"));
        assert_eq!(map.load::<String>(), Some(&"string"));
        assert_eq!(map.load::<f64>(), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_duplicate_tag_overwrites() {
        let mut map = TagMap::with_entries([Entry::new::<i32>("first")]);
        map.store([Entry::new::<i32>("second")]);

        assert_eq!(map.len(), 1);
        assert_eq!(map.load::<i32>(), Some(&"second"));
    }

    #[test]
    fn test_last_write_wins_within_one_call() {
        let map = TagMap::with_entries([Entry::new::<i32>(1), Entry::new::<i32>(2)]);
        assert_eq!(map.load::<i32>(), Some(&2));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_delete() {
        let mut map = TagMap::with_entries([Entry::new::<i32>(1), Entry::new::<u8>(2)]);

        map.delete([Tag::of::<i32>()]);
        assert_eq!(map.load::<i32>(), None);
        assert_eq!(map.len(), 1);

        // Deleting an absent tag is a no-op.
        map.delete([Tag::of::<i32>(), Tag::of::<String>()]);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_load_by_tag_and_value() {
        let map = TagMap::with_entries([Entry::new::<char>("rune")]);

        assert_eq!(map.load_by_tag(Tag::of::<char>()), Some(&"rune"));
        assert_eq!(map.load_by_value(&'?'), Some(&"rune"));
        assert_eq!(map.load_by_value(&0u8), None);
    }

    #[test]
    fn test_load_mut() {
        let mut map = TagMap::with_entries([Entry::new::<i32>(vec![1, 2])]);
        map.load_mut::<i32>().unwrap().push(3);
        assert_eq!(map.load::<i32>(), Some(&vec![1, 2, 3]));
    }

    #[test]
    fn test_load_by_tag_mut() {
        let mut map = TagMap::with_entries([Entry::new::<i32>(1), Entry::new::<u8>(10)]);

        // Update every entry in place through tags recovered by enumeration.
        for tag in map.keys() {
            if let Some(count) = map.load_by_tag_mut(tag) {
                *count += 1;
            }
        }
        assert_eq!(map.load::<i32>(), Some(&2));
        assert_eq!(map.load::<u8>(), Some(&11));
        assert!(map.load_by_tag_mut(Tag::of::<f64>()).is_none());
    }

    #[test]
    fn test_iter_visits_every_association() {
        let map = TagMap::with_entries([Entry::new::<i32>("int"), Entry::new::<u8>("byte")]);

        let seen: Vec<(Tag, &str)> = map.iter().map(|(tag, value)| (tag, *value)).collect();
        assert_eq!(seen.len(), map.len());
        assert!(seen.contains(&(Tag::of::<i32>(), "int")));
        assert!(seen.contains(&(Tag::of::<u8>(), "byte")));
    }

    #[test]
    fn test_wildcard_entry_via_top_tag() {
        let map = TagMap::with_entries([
            Entry::new::<i32>("specific"),
            Entry::with_tag(Tag::any(), "fallback"),
        ]);

        let lookup = |tag: Tag| {
            map.load_by_tag(tag)
                .or_else(|| map.load_by_tag(Tag::any()))
                .copied()
        };
        assert_eq!(lookup(Tag::of::<i32>()), Some("specific"));
        assert_eq!(lookup(Tag::of::<String>()), Some("fallback"));
    }

    #[test]
    fn test_snapshots_are_independent() {
        let mut map = TagMap::with_entries([Entry::new::<i32>(1), Entry::new::<u8>(2)]);

        let keys = map.keys();
        let entries = map.entries();
        assert_eq!(keys.len(), 2);
        assert_eq!(entries.len(), 2);

        map.delete(keys.clone());
        assert!(map.is_empty());
        // Old snapshots are unaffected by the mutation.
        assert_eq!(keys.len(), 2);
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_rekey_from_enumeration() {
        let mut map = TagMap::with_entries([Entry::new::<i32>(10)]);

        // Entries discovered by enumeration can be stored back verbatim.
        let snapshot = map.entries();
        map.delete(map.keys());
        assert!(map.is_empty());
        map.store(snapshot);
        assert_eq!(map.load::<i32>(), Some(&10));
    }

    #[test]
    fn test_from_iterator_and_extend() {
        let mut map: TagMap<&str> = [Entry::new::<i32>("int")].into_iter().collect();
        map.extend([Entry::new::<u8>("byte")]);
        assert_eq!(map.len(), 2);
        assert!(map.contains::<u8>());
        assert!(!map.contains_tag(Tag::of::<f64>()));
    }
}
