//! Symbol values
//!
//! Symbols are opaque identity tokens usable as property keys. Two symbols are
//! equal only when they are the same token; the description is informational.
//! `Symbol.for` symbols live in a process-wide registry keyed by description,
//! and the well-known symbols are process-wide singletons.

use parking_lot::RwLock;
use rustc_hash::FxHashMap as HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

/// Next symbol identity (ids are never reused)
static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(1);

struct SymbolData {
    id: u64,
    description: Option<String>,
    /// Created through `Symbol.for`
    registered: bool,
}

/// A JavaScript symbol
#[derive(Clone)]
pub struct Symbol(Arc<SymbolData>);

impl Symbol {
    /// Create a new unique symbol (`Symbol(description)`)
    pub fn new(description: Option<String>) -> Self {
        Self::allocate(description, false)
    }

    fn allocate(description: Option<String>, registered: bool) -> Self {
        let id = NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed);
        Symbol(Arc::new(SymbolData {
            id,
            description,
            registered,
        }))
    }

    /// `Symbol.for(key)`: the registered symbol for `key`, created on first use
    pub fn for_key(key: &str) -> Self {
        SymbolRegistry::global().for_key(key)
    }

    /// `Symbol.keyFor(sym)`: the registry key if `sym` came from `Symbol.for`
    pub fn key_for(&self) -> Option<&str> {
        if self.0.registered {
            self.0.description.as_deref()
        } else {
            None
        }
    }

    /// The symbol's description, if any
    pub fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }

    /// Process-unique identity
    pub fn id(&self) -> u64 {
        self.0.id
    }

    /// `Symbol.prototype.toString` rendering
    pub fn descriptive_string(&self) -> String {
        format!("Symbol({})", self.0.description.as_deref().unwrap_or(""))
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.descriptive_string())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.descriptive_string())
    }
}

/// Process-wide `Symbol.for` registry
pub struct SymbolRegistry {
    by_key: RwLock<HashMap<String, Symbol>>,
}

impl SymbolRegistry {
    /// The process-wide registry shared by every realm
    pub fn global() -> &'static SymbolRegistry {
        static REGISTRY: OnceLock<SymbolRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| SymbolRegistry {
            by_key: RwLock::new(HashMap::default()),
        })
    }

    /// Look up or create the registered symbol for `key`
    pub fn for_key(&self, key: &str) -> Symbol {
        if let Some(symbol) = self.by_key.read().get(key) {
            return symbol.clone();
        }
        let mut by_key = self.by_key.write();
        // Another thread may have registered it between the two locks
        by_key
            .entry(key.to_string())
            .or_insert_with(|| {
                tracing::trace!(key, "registering global symbol");
                Symbol::allocate(Some(key.to_string()), true)
            })
            .clone()
    }

    /// Number of registered symbols
    pub fn len(&self) -> usize {
        self.by_key.read().len()
    }

    /// Check if no symbol has been registered yet
    pub fn is_empty(&self) -> bool {
        self.by_key.read().is_empty()
    }
}

/// Well-known symbols with specification-defined meaning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnownSymbol {
    AsyncIterator,
    HasInstance,
    IsConcatSpreadable,
    Iterator,
    Match,
    MatchAll,
    Replace,
    Search,
    Species,
    Split,
    ToPrimitive,
    ToStringTag,
    Unscopables,
}

impl WellKnownSymbol {
    /// Every well-known symbol, in installation order
    pub const ALL: [WellKnownSymbol; 13] = [
        WellKnownSymbol::AsyncIterator,
        WellKnownSymbol::HasInstance,
        WellKnownSymbol::IsConcatSpreadable,
        WellKnownSymbol::Iterator,
        WellKnownSymbol::Match,
        WellKnownSymbol::MatchAll,
        WellKnownSymbol::Replace,
        WellKnownSymbol::Search,
        WellKnownSymbol::Species,
        WellKnownSymbol::Split,
        WellKnownSymbol::ToPrimitive,
        WellKnownSymbol::ToStringTag,
        WellKnownSymbol::Unscopables,
    ];

    /// Property name on the `Symbol` constructor (e.g. `iterator`)
    pub fn name(self) -> &'static str {
        match self {
            WellKnownSymbol::AsyncIterator => "asyncIterator",
            WellKnownSymbol::HasInstance => "hasInstance",
            WellKnownSymbol::IsConcatSpreadable => "isConcatSpreadable",
            WellKnownSymbol::Iterator => "iterator",
            WellKnownSymbol::Match => "match",
            WellKnownSymbol::MatchAll => "matchAll",
            WellKnownSymbol::Replace => "replace",
            WellKnownSymbol::Search => "search",
            WellKnownSymbol::Species => "species",
            WellKnownSymbol::Split => "split",
            WellKnownSymbol::ToPrimitive => "toPrimitive",
            WellKnownSymbol::ToStringTag => "toStringTag",
            WellKnownSymbol::Unscopables => "unscopables",
        }
    }

    /// The process-wide singleton symbol
    pub fn symbol(self) -> Symbol {
        static WELL_KNOWN: OnceLock<Vec<Symbol>> = OnceLock::new();
        let table = WELL_KNOWN.get_or_init(|| {
            WellKnownSymbol::ALL
                .iter()
                .map(|wk| Symbol::new(Some(format!("Symbol.{}", wk.name()))))
                .collect()
        });
        // ALL is declared in discriminant order
        table[self as usize].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_compare_by_identity() {
        let a = Symbol::new(Some("u".to_string()));
        let b = Symbol::new(Some("u".to_string()));
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_registry_round_trip() {
        let sym = Symbol::for_key("registry-round-trip");
        assert_eq!(sym, Symbol::for_key("registry-round-trip"));
        assert_eq!(sym.key_for(), Some("registry-round-trip"));

        let local = Symbol::new(Some("registry-round-trip".to_string()));
        assert_eq!(local.key_for(), None);
        assert_ne!(local, sym);
    }

    #[test]
    fn test_descriptive_string() {
        assert_eq!(Symbol::new(Some("foo".into())).descriptive_string(), "Symbol(foo)");
        assert_eq!(Symbol::new(None).descriptive_string(), "Symbol()");
        assert_eq!(Symbol::new(None).description(), None);
    }

    #[test]
    fn test_well_known_singletons() {
        let a = WellKnownSymbol::ToStringTag.symbol();
        let b = WellKnownSymbol::ToStringTag.symbol();
        assert_eq!(a, b);
        assert_eq!(a.descriptive_string(), "Symbol(Symbol.toStringTag)");
        assert_ne!(a, WellKnownSymbol::Iterator.symbol());
        assert_eq!(
            WellKnownSymbol::Iterator.symbol().description(),
            Some("Symbol.iterator")
        );
        // Well-known symbols are not in the global registry
        assert_eq!(a.key_for(), None);
    }
}
