//! Open-addressed string map with scope chaining.
//!
//! Invariants:
//! - Capacity is a power of two; probing is linear from `hash & mask`.
//! - `nused` counts live plus tombstoned slots, `nelem` live only, so a
//!   probe chain always ends at an empty slot.
//! - Parent maps are read-only through the chain; inserts and removals
//!   touch the innermost scope only.

const INIT_CAPACITY: usize = 16;

#[derive(Debug, Clone)]
enum Slot<V> {
    Empty,
    Tombstone,
    Live { key: String, value: V },
}

/// A string-keyed hash table that can shadow an outer scope.
///
/// Lookups that miss fall through to the parent map, which is how macro
/// tables and symbol tables see enclosing scopes.
#[derive(Debug, Clone)]
pub struct StrMap<V> {
    slots: Vec<Slot<V>>,
    nelem: usize,
    nused: usize,
    parent: Option<Box<StrMap<V>>>,
}

fn fnv1a(key: &str) -> u32 {
    let mut h: u32 = 2_166_136_261;
    for &b in key.as_bytes() {
        h ^= u32::from(b);
        h = h.wrapping_mul(16_777_619);
    }
    h
}

fn empty_slots<V>(cap: usize) -> Vec<Slot<V>> {
    (0..cap).map(|_| Slot::Empty).collect()
}

impl<V> StrMap<V> {
    pub fn new() -> Self {
        Self {
            slots: empty_slots(INIT_CAPACITY),
            nelem: 0,
            nused: 0,
            parent: None,
        }
    }

    /// A fresh scope chained on top of `parent`.
    pub fn nested(parent: StrMap<V>) -> Self {
        Self {
            parent: Some(Box::new(parent)),
            ..Self::new()
        }
    }

    /// Drop the innermost scope, yielding its parent.
    pub fn into_parent(self) -> Option<StrMap<V>> {
        self.parent.map(|p| *p)
    }

    pub fn parent(&self) -> Option<&StrMap<V>> {
        self.parent.as_deref()
    }

    /// Live entries in the innermost scope.
    pub fn len(&self) -> usize {
        self.nelem
    }

    pub fn is_empty(&self) -> bool {
        self.nelem == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Look `key` up through the scope chain.
    pub fn get(&self, key: &str) -> Option<&V> {
        match self.get_local(key) {
            Some(v) => Some(v),
            None => self.parent.as_deref().and_then(|p| p.get(key)),
        }
    }

    /// Look `key` up in the innermost scope only.
    pub fn get_local(&self, key: &str) -> Option<&V> {
        let mask = self.slots.len() - 1;
        let mut i = fnv1a(key) as usize & mask;
        loop {
            match &self.slots[i] {
                Slot::Empty => return None,
                Slot::Live { key: k, value } if k == key => return Some(value),
                _ => {}
            }
            i = (i + 1) & mask;
        }
    }

    /// Insert or update `key` in the innermost scope.
    pub fn put(&mut self, key: impl Into<String>, value: V) {
        self.maybe_rehash();
        let key = key.into();
        let mask = self.slots.len() - 1;
        let mut i = fnv1a(&key) as usize & mask;
        let mut grave: Option<usize> = None;
        let empty = loop {
            match &mut self.slots[i] {
                Slot::Empty => break i,
                Slot::Tombstone => {
                    if grave.is_none() {
                        grave = Some(i);
                    }
                }
                Slot::Live { key: k, value: v } => {
                    if *k == key {
                        *v = value;
                        return;
                    }
                }
            }
            i = (i + 1) & mask;
        };
        match grave {
            // A tombstoned slot is recycled without growing `nused`.
            Some(g) => self.slots[g] = Slot::Live { key, value },
            None => {
                self.slots[empty] = Slot::Live { key, value };
                self.nused += 1;
            }
        }
        self.nelem += 1;
    }

    /// Remove `key` from the innermost scope. No-op on a missing key; a
    /// binding in a parent scope is left alone.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let mask = self.slots.len() - 1;
        let mut i = fnv1a(key) as usize & mask;
        loop {
            match &self.slots[i] {
                Slot::Empty => return None,
                Slot::Live { key: k, .. } if k == key => {
                    let old = std::mem::replace(&mut self.slots[i], Slot::Tombstone);
                    self.nelem -= 1;
                    let Slot::Live { value, .. } = old else {
                        unreachable!("matched live slot");
                    };
                    return Some(value);
                }
                _ => {}
            }
            i = (i + 1) & mask;
        }
    }

    /// Live `(key, value)` pairs of the innermost scope, in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.slots.iter().filter_map(|s| match s {
            Slot::Live { key, value } => Some((key.as_str(), value)),
            _ => None,
        })
    }

    fn maybe_rehash(&mut self) {
        let cap = self.slots.len();
        if self.nused * 10 < cap * 7 {
            return;
        }
        // Mostly tombstones: rebuild at the same size to clear them.
        let newcap = if self.nelem * 100 < cap * 35 { cap } else { cap * 2 };
        let old = std::mem::replace(&mut self.slots, empty_slots(newcap));
        self.nelem = 0;
        self.nused = 0;
        for slot in old {
            if let Slot::Live { key, value } = slot {
                self.insert_fresh(key, value);
            }
        }
    }

    // Insert into a table known to hold no tombstone and no equal key.
    fn insert_fresh(&mut self, key: String, value: V) {
        let mask = self.slots.len() - 1;
        let mut i = fnv1a(&key) as usize & mask;
        while !matches!(self.slots[i], Slot::Empty) {
            i = (i + 1) & mask;
        }
        self.slots[i] = Slot::Live { key, value };
        self.nelem += 1;
        self.nused += 1;
    }
}

impl<V> Default for StrMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{StrMap, fnv1a};

    #[test]
    fn fnv1a_reference_values() {
        assert_eq!(fnv1a(""), 2_166_136_261);
        assert_eq!(fnv1a("a"), 0xe40c292c);
        assert_eq!(fnv1a("foobar"), 0xbf9cf968);
    }

    #[test]
    fn tombstone_churn_rehashes_in_place() {
        let mut m = StrMap::new();
        for i in 0..500 {
            m.put(format!("k{i}"), i);
            assert_eq!(m.remove(&format!("k{i}")), Some(i));
        }
        // Live count never exceeds one, so the table clears tombstones at
        // the same size instead of growing.
        assert_eq!(m.capacity(), 16);
        assert_eq!(m.len(), 0);
    }

    #[test]
    fn growth_doubles_the_table() {
        let mut m = StrMap::new();
        for i in 0..12 {
            m.put(format!("k{i}"), i);
        }
        // The load factor is checked on entry to put, so the table is
        // still at its initial size right after the trigger fills it.
        assert_eq!(m.capacity(), 16);
        m.put("one-more", 99);
        assert_eq!(m.capacity(), 32);
    }
}
