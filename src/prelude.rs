//! Prelude module for convenient imports
//!
//! ```no_run
//! use quicksilver_objects::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let realm = Realm::new();
//!     let obj = realm.new_object();
//!     obj.define_own_property(&"id".into(), PartialDescriptor::new().with_value(7), true)?;
//!     println!("{:?}", obj.get_own_property(&"id".into()));
//!     Ok(())
//! }
//! ```

// Core object model
pub use crate::runtime::{
    Object, ObjectKind, ObjectRef, PartialDescriptor, PreferredType, PropertyAttributes,
    PropertyDescriptor, PropertyKey, Realm, Value,
};

// Symbols
pub use crate::runtime::{Symbol, SymbolRegistry, WellKnownSymbol};

// Memory accounting
pub use crate::runtime::MemUsageContext;

// Throttling
pub use crate::runtime::{CancellationSignal, ExecutionThrottle, TokenBucket, Unthrottled};

// Configuration
pub use crate::config::{RealmConfig, ThrottleConfig};

// Error handling
pub use crate::error::{Error, ErrorKind, Result};

// Version constant
pub use crate::VERSION;
