//! Per-object property storage
//!
//! Properties live in two domains: string keys and symbol keys. Each domain
//! keeps its insertion order next to the map; a key rewritten in place keeps
//! its position, a deleted key is spliced out and re-adding it appends.
//!
//! The store is guarded by its own reader/writer lock. Callers never hold the
//! lock across getter/setter invocations or across another object's lock:
//! every method clones what it needs out of the guard before returning.

use super::property::{PropertyDescriptor, PropertyKey};
use super::symbol::Symbol;
use parking_lot::RwLock;
use rustc_hash::FxHashMap as HashMap;

struct Domain<K> {
    map: HashMap<K, PropertyDescriptor>,
    order: Vec<K>,
}

impl<K> Default for Domain<K> {
    fn default() -> Self {
        Self {
            map: HashMap::default(),
            order: Vec::new(),
        }
    }
}

impl<K: std::hash::Hash + Eq + Clone> Domain<K> {
    fn splice(&mut self, key: &K) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
    }

    /// Run `f` on the slot for `key`, then reconcile map and order with the
    /// slot's final state.
    fn with_slot<R>(&mut self, key: &K, f: impl FnOnce(&mut Option<PropertyDescriptor>) -> R) -> R {
        let mut slot = self.map.remove(key);
        let existed = slot.is_some();
        let result = f(&mut slot);
        match slot {
            Some(desc) => {
                if !existed {
                    self.order.push(key.clone());
                }
                self.map.insert(key.clone(), desc);
            }
            None if existed => self.splice(key),
            None => {}
        }
        result
    }
}

#[derive(Default)]
struct StoreInner {
    strings: Domain<String>,
    symbols: Domain<Symbol>,
}

/// Ordered, lock-guarded property map
#[derive(Default)]
pub struct PropertyStore {
    inner: RwLock<StoreInner>,
}

impl PropertyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether an own property exists
    pub fn exists(&self, key: &PropertyKey) -> bool {
        let inner = self.inner.read();
        match key {
            PropertyKey::String(s) => inner.strings.map.contains_key(s),
            PropertyKey::Symbol(sym) => inner.symbols.map.contains_key(sym),
        }
    }

    /// Snapshot of an own property's descriptor
    pub fn read(&self, key: &PropertyKey) -> Option<PropertyDescriptor> {
        let inner = self.inner.read();
        match key {
            PropertyKey::String(s) => inner.strings.map.get(s).cloned(),
            PropertyKey::Symbol(sym) => inner.symbols.map.get(sym).cloned(),
        }
    }

    /// Insert or overwrite a property without validation
    pub fn write(&self, key: PropertyKey, desc: PropertyDescriptor) {
        self.with_slot(&key, |slot| *slot = Some(desc));
    }

    /// Remove a property; returns whether it existed
    pub fn delete(&self, key: &PropertyKey) -> bool {
        self.with_slot(key, |slot| slot.take().is_some())
    }

    /// Atomic read-modify-write of one slot under the exclusive lock.
    ///
    /// The slot holds the current descriptor (or `None`); whatever it holds
    /// when `f` returns is stored. `f` must not touch other objects.
    pub fn with_slot<R>(
        &self,
        key: &PropertyKey,
        f: impl FnOnce(&mut Option<PropertyDescriptor>) -> R,
    ) -> R {
        let mut inner = self.inner.write();
        match key {
            PropertyKey::String(s) => inner.strings.with_slot(s, f),
            PropertyKey::Symbol(sym) => inner.symbols.with_slot(sym, f),
        }
    }

    /// Run `f` while holding the exclusive lock
    pub fn exclusive<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.inner.write();
        f()
    }

    /// Remove every property regardless of attributes, returning what was held.
    ///
    /// The descriptors are handed back so they drop after the lock is released.
    pub(crate) fn clear(&self) -> Vec<PropertyDescriptor> {
        let mut inner = self.inner.write();
        let StoreInner { strings, symbols } = std::mem::take(&mut *inner);
        drop(inner);
        strings
            .map
            .into_values()
            .chain(symbols.map.into_values())
            .collect()
    }

    /// Snapshot of every own property: strings first, then symbols
    pub fn entries(&self) -> Vec<(PropertyKey, PropertyDescriptor)> {
        let inner = self.inner.read();
        let strings = inner.strings.order.iter().filter_map(|k| {
            let desc = inner.strings.map.get(k)?;
            Some((PropertyKey::String(k.clone()), desc.clone()))
        });
        let symbols = inner.symbols.order.iter().filter_map(|k| {
            let desc = inner.symbols.map.get(k)?;
            Some((PropertyKey::Symbol(k.clone()), desc.clone()))
        });
        strings.chain(symbols).collect()
    }

    /// Own string keys in insertion order
    pub fn string_keys(&self) -> Vec<String> {
        self.inner.read().strings.order.clone()
    }

    /// Own symbol keys in insertion order
    pub fn symbol_keys(&self) -> Vec<Symbol> {
        self.inner.read().symbols.order.clone()
    }

    /// All own keys: strings first, then symbols
    pub fn keys(&self) -> Vec<PropertyKey> {
        let inner = self.inner.read();
        inner
            .strings
            .order
            .iter()
            .cloned()
            .map(PropertyKey::String)
            .chain(inner.symbols.order.iter().cloned().map(PropertyKey::Symbol))
            .collect()
    }

    /// Check that every property satisfies `pred`
    pub fn all(&self, mut pred: impl FnMut(&PropertyDescriptor) -> bool) -> bool {
        let inner = self.inner.read();
        inner.strings.map.values().all(&mut pred) && inner.symbols.map.values().all(&mut pred)
    }

    /// Number of own properties (both domains)
    pub fn len(&self) -> usize {
        let inner = self.inner.read();
        inner.strings.map.len() + inner.symbols.map.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for PropertyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyStore")
            .field("keys", &self.keys())
            .finish()
    }
}
