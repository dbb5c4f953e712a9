use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

const INITIAL_CAPACITY: usize = 8;
const MAX_LOAD: f64 = 0.75;

#[derive(Debug, Clone)]
struct Entry<T> {
    key: Box<str>,
    value: T,
    deleted: bool,
}

/// ## Open addressing hash table
///
/// Collisions are resolved with double hashing. Removed entries
/// leave a tombstone behind so probe sequences stay intact; the
/// table is compacted when tombstones outnumber live entries.

#[derive(Debug, Clone)]
pub struct HashTable<T> {
    slots: Vec<Option<Entry<T>>>,
    used: usize,
    live: usize,
}

impl<T> Default for HashTable<T> {
    fn default() -> Self {
        HashTable::new()
    }
}

impl<T> HashTable<T> {
    pub fn new() -> HashTable<T> {
        HashTable::with_capacity(INITIAL_CAPACITY)
    }

    fn with_capacity(capacity: usize) -> HashTable<T> {
        debug_assert!(capacity.is_power_of_two());
        HashTable {
            slots: (0..capacity).map(|_| None).collect(),
            used: 0,
            live: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Returns false, leaving the table untouched, if `key` is already live.
    pub fn add(&mut self, key: &str, value: T) -> bool {
        if self.find(key) {
            return false;
        }
        let capacity = self.capacity();
        if self.live + 1 > (MAX_LOAD * capacity as f64) as usize {
            self.rebuild(capacity << 1);
        } else if self.used > 2 * self.live {
            self.rebuild(capacity);
        }
        self.insert(key.into(), value);
        true
    }

    pub fn remove(&mut self, key: &str) -> bool {
        match self.position(key) {
            Some(index) => {
                if let Some(entry) = &mut self.slots[index] {
                    entry.deleted = true;
                }
                self.live -= 1;
                true
            }
            None => false,
        }
    }

    pub fn find(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Result<&T> {
        match self.position(key) {
            Some(index) => match &self.slots[index] {
                Some(entry) => Ok(&entry.value),
                None => Err(error!(InternalError; "empty slot")),
            },
            None => Err(not_found(key)),
        }
    }

    pub fn get_mut(&mut self, key: &str) -> Result<&mut T> {
        match self.position(key) {
            Some(index) => match &mut self.slots[index] {
                Some(entry) => Ok(&mut entry.value),
                None => Err(error!(InternalError; "empty slot")),
            },
            None => Err(not_found(key)),
        }
    }

    fn probe(&self, key: &str) -> (usize, usize) {
        let capacity = self.capacity();
        (
            hash(key, capacity, capacity - 1),
            hash(key, capacity, capacity + 1),
        )
    }

    fn position(&self, key: &str) -> Option<usize> {
        let capacity = self.capacity();
        let (mut h1, h2) = self.probe(key);
        for _ in 0..capacity {
            match &self.slots[h1] {
                None => return None,
                Some(entry) => {
                    if !entry.deleted && &*entry.key == key {
                        return Some(h1);
                    }
                }
            }
            h1 = (h1 + h2) % capacity;
        }
        None
    }

    fn insert(&mut self, key: Box<str>, value: T) {
        let capacity = self.capacity();
        let (mut h1, h2) = self.probe(&key);
        let mut first_deleted = None;
        for _ in 0..capacity {
            match &self.slots[h1] {
                None => break,
                Some(entry) => {
                    if entry.deleted && first_deleted.is_none() {
                        first_deleted = Some(h1);
                    }
                }
            }
            h1 = (h1 + h2) % capacity;
        }
        let entry = Some(Entry {
            key,
            value,
            deleted: false,
        });
        match first_deleted {
            Some(index) => self.slots[index] = entry,
            None => {
                debug_assert!(self.slots[h1].is_none());
                self.slots[h1] = entry;
                self.used += 1;
            }
        }
        self.live += 1;
    }

    fn rebuild(&mut self, capacity: usize) {
        let old = std::mem::replace(self, HashTable::with_capacity(capacity));
        for entry in old.slots.into_iter().flatten() {
            if !entry.deleted {
                self.insert(entry.key, entry.value);
            }
        }
    }
}

fn not_found(key: &str) -> Error {
    error!(UndefinedVariable; format!("{} not found in table", key))
}

/// Polynomial rolling hash folded into `[0, size)`. Always odd before
/// the final fold so that the probe step is coprime with the capacity.
fn hash(key: &str, size: usize, k: usize) -> usize {
    let mut hash = 0;
    for byte in key.bytes() {
        hash = (hash * k + byte as usize) % size;
    }
    (hash * 2 + 1) % size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_find_remove() {
        let mut t = HashTable::new();
        assert!(t.add("$a", 1));
        assert!(!t.add("$a", 2));
        assert_eq!(*t.get("$a").unwrap(), 1);
        assert!(t.remove("$a"));
        assert!(!t.remove("$a"));
        assert!(!t.find("$a"));
        assert!(t.add("$a", 3));
        assert_eq!(*t.get("$a").unwrap(), 3);
    }

    #[test]
    fn test_get_missing() {
        let t: HashTable<i32> = HashTable::new();
        let e = t.get("$nothing").unwrap_err();
        assert!(e.to_string().contains("$nothing"));
    }

    #[test]
    fn test_growth_keeps_load_factor() {
        let mut t = HashTable::new();
        for i in 0..100 {
            assert!(t.add(&format!("$v{}", i), i));
            assert!(t.capacity().is_power_of_two());
            assert!(t.len() as f64 <= 0.75 * t.capacity() as f64);
        }
        for i in 0..100 {
            assert_eq!(*t.get(&format!("$v{}", i)).unwrap(), i);
        }
    }

    #[test]
    fn test_compaction_drops_tombstones() {
        let mut t = HashTable::new();
        for i in 0..5 {
            t.add(&format!("k{}", i), i);
        }
        for i in 0..4 {
            t.remove(&format!("k{}", i));
        }
        assert_eq!(t.used, 5);
        t.add("fresh", 9);
        assert_eq!(t.capacity(), 8);
        assert_eq!(t.used, 2);
        assert!(t.find("k4"));
        assert!(t.find("fresh"));
    }

    #[test]
    fn test_hash_is_odd_probe_step() {
        for size in [8usize, 16, 1024].iter() {
            for key in ["", "a", "$long_variable_name"].iter() {
                let step = hash(key, *size, size + 1);
                assert_eq!(step % 2, 1);
                assert!(step < *size);
            }
        }
    }
}
