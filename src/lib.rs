//! Quicksilver Objects: the ECMAScript object model as a thread-safe library
//!
//! This crate implements the object layer of a JavaScript engine without the
//! parser or interpreter on top: property descriptors and the §8.12 internal
//! methods, prototype chains, symbols with a global registry, and the
//! `Object` reflection built-ins (`defineProperty`, `freeze`, `keys`, ...).
//!
//! Objects are shared as [`ObjectRef`] (`Arc<Object>`) and may be used from
//! several threads; every object guards its own property table. Long-running
//! host-visible loops consult an [`ExecutionThrottle`] and stop early on
//! cancellation or deadline.
//!
//! # Quick Start
//!
//! ```no_run
//! use quicksilver_objects::{PropertyKey, Realm, Value};
//!
//! fn main() -> quicksilver_objects::Result<()> {
//!     let realm = Realm::new();
//!     let obj = realm.new_object();
//!     obj.put(&realm, &PropertyKey::from("answer"), Value::from(42), true)?;
//!     quicksilver_objects::runtime::builtins::object::freeze(
//!         &realm,
//!         &Value::Undefined,
//!         &[Value::Object(obj.clone())],
//!     )?;
//!     obj.put(&realm, &"answer".into(), Value::from(0), false)?;
//!     assert_eq!(obj.get(&realm, &"answer".into())?, Value::from(42));
//!     Ok(())
//! }
//! ```
//!
//! # Module Overview
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`runtime`] | values, keys, descriptors, objects, classes, realm, built-ins |
//! | [`runtime::throttle`] | cancellation signals and token-bucket throttling |
//! | [`runtime::json`] | the serialization hook and `serde_json` bridge |
//! | [`runtime::mem_usage`] | memory accounting over object graphs |
//! | [`config`] | realm configuration loaded from JSON |
#![allow(clippy::type_complexity)]
#![allow(clippy::new_without_default)]
#![allow(clippy::should_implement_trait)]

pub mod config;
pub mod prelude;
pub mod runtime;

mod error;

pub use error::{messages, Error, ErrorKind, Result};
pub use runtime::{
    ObjectKind, ObjectRef, PartialDescriptor, PropertyAttributes, PropertyDescriptor,
    PropertyKey, Realm, Symbol, Value, WellKnownSymbol,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
