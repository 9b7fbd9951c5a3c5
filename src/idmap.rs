use std::hash::Hash;

use ahash::HashMap;

use crate::error::Error;

/// Conversion between a dense index and a typed id.
pub(crate) trait IdIndex: Copy {
    /// The largest raw index this id type hands out.
    const MAX_RAW: u32 = u32::MAX;

    fn from_raw(raw: u32) -> Self;
    fn raw(self) -> u32;
}

/// Interning table: every distinct value gets a small copyable id, and the
/// value can be recovered from the id in constant time.
#[derive(Debug, Clone)]
pub(crate) struct IdMap<K: IdIndex, V: Eq + Hash + Clone> {
    by_id: Vec<V>,
    by_value: HashMap<V, K>,
}

impl<K: IdIndex, V: Eq + Hash + Clone> IdMap<K, V> {
    pub(crate) fn new() -> Self {
        IdMap {
            by_id: Vec::new(),
            by_value: HashMap::default(),
        }
    }

    /// A map holding distinct `values` at ids `0, 1, ...`.
    pub(crate) fn with_values(values: impl IntoIterator<Item = V>) -> Self {
        let mut map = Self::new();
        for (raw, value) in (0..=K::MAX_RAW).zip(values) {
            map.by_value.insert(value.clone(), K::from_raw(raw));
            map.by_id.push(value);
        }
        map
    }

    /// Look up the id of a value without interning it.
    pub(crate) fn lookup(&self, value: &V) -> Option<K> {
        self.by_value.get(value).copied()
    }

    /// Intern a value, returning the existing id if it is already known.
    ///
    /// Fails with [`Error::TooManyIds`] once every id is taken; ids are
    /// never reused.
    pub(crate) fn intern(&mut self, value: V) -> Result<K, Error> {
        if let Some(id) = self.by_value.get(&value) {
            return Ok(*id);
        }
        let raw = u32::try_from(self.by_id.len())
            .ok()
            .filter(|raw| *raw <= K::MAX_RAW)
            .ok_or(Error::TooManyIds)?;
        let id = K::from_raw(raw);
        self.by_value.insert(value.clone(), id);
        self.by_id.push(value);
        Ok(id)
    }

    #[inline]
    pub(crate) fn get(&self, id: K) -> &V {
        &self.by_id[id.raw() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    struct Id(u32);

    impl IdIndex for Id {
        fn from_raw(raw: u32) -> Id {
            Id(raw)
        }

        fn raw(self) -> u32 {
            self.0
        }
    }

    // only ids 0 to 2 exist
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    struct SmallId(u32);

    impl IdIndex for SmallId {
        const MAX_RAW: u32 = 2;

        fn from_raw(raw: u32) -> SmallId {
            SmallId(raw)
        }

        fn raw(self) -> u32 {
            self.0
        }
    }

    #[test]
    fn test_intern_is_stable() {
        let mut map = IdMap::<Id, String>::new();
        let id1 = map.intern("foo".to_string()).unwrap();
        let id2 = map.intern("bar".to_string()).unwrap();
        let id3 = map.intern("foo".to_string()).unwrap();
        assert_eq!(id1, id3);
        assert_ne!(id1, id2);
        assert_eq!(map.get(id1), "foo");
        assert_eq!(map.get(id2), "bar");
    }

    #[test]
    fn test_lookup_does_not_intern() {
        let mut map = IdMap::<Id, String>::new();
        assert_eq!(map.lookup(&"foo".to_string()), None);
        let id = map.intern("foo".to_string()).unwrap();
        assert_eq!(map.lookup(&"foo".to_string()), Some(id));
    }

    #[test]
    fn test_with_values() {
        let map = IdMap::<Id, String>::with_values(["a".to_string(), "b".to_string()]);
        assert_eq!(map.lookup(&"a".to_string()), Some(Id(0)));
        assert_eq!(map.lookup(&"b".to_string()), Some(Id(1)));
        assert_eq!(map.get(Id(1)), "b");
    }

    #[test]
    fn test_exhausted_ids_fail_instead_of_wrapping() {
        let mut map = IdMap::<SmallId, String>::new();
        for value in ["a", "b", "c"] {
            map.intern(value.to_string()).unwrap();
        }
        assert!(matches!(
            map.intern("d".to_string()),
            Err(Error::TooManyIds)
        ));
        // known values still resolve, and the failed value got no id
        assert_eq!(map.intern("a".to_string()).unwrap(), SmallId(0));
        assert_eq!(map.lookup(&"d".to_string()), None);
        assert_eq!(map.get(SmallId(2)), "c");
    }
}
