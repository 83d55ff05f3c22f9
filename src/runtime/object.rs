//! JavaScript objects
//!
//! An [`Object`] carries its kind tag, the [`ObjectClass`] strategy that
//! implements its internal methods, an optional wrapped primitive, a mutable
//! prototype link, the extensible flag and its [`PropertyStore`]. Objects are
//! shared as [`ObjectRef`] (`Arc<Object>`) across threads.
//!
//! The internal methods are exposed as inherent methods on `ObjectRef` that
//! dispatch to the object's class.

use super::class::{self, ObjectClass};
use super::mem_usage::{self, MemUsageContext};
use super::property::{PartialDescriptor, PropertyDescriptor, PropertyKey};
use super::store::PropertyStore;
use super::value::{PreferredType, Value};
use super::Realm;
use crate::error::{messages, Error, Result};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared reference to an object
pub type ObjectRef = Arc<Object>;

/// Serializes prototype changes so the cycle check and the write are one step
static PROTOTYPE_MUTATION: Mutex<()> = Mutex::new(());

/// Object kind tag (the `[[Class]]` of ECMA-262 5th edition)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Object,
    Array,
    Function,
    String,
    Number,
    Boolean,
    Symbol,
    Date,
    Error,
    Arguments,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectKind::Object => "Object",
            ObjectKind::Array => "Array",
            ObjectKind::Function => "Function",
            ObjectKind::String => "String",
            ObjectKind::Number => "Number",
            ObjectKind::Boolean => "Boolean",
            ObjectKind::Symbol => "Symbol",
            ObjectKind::Date => "Date",
            ObjectKind::Error => "Error",
            ObjectKind::Arguments => "Arguments",
        };
        write!(f, "{}", name)
    }
}

/// Something that can be invoked with a receiver and arguments
pub trait Callable: Send + Sync {
    fn call(&self, realm: &Realm, this: &Value, args: &[Value]) -> Result<Value>;
}

impl<F> Callable for F
where
    F: Fn(&Realm, &Value, &[Value]) -> Result<Value> + Send + Sync,
{
    fn call(&self, realm: &Realm, this: &Value, args: &[Value]) -> Result<Value> {
        self(realm, this, args)
    }
}

/// A JavaScript object
pub struct Object {
    kind: ObjectKind,
    class: &'static dyn ObjectClass,
    primitive: Option<Value>,
    prototype: RwLock<Option<ObjectRef>>,
    extensible: AtomicBool,
    properties: PropertyStore,
    /// Recursion guard for cycle-aware walks (JSON)
    cyclical: AtomicUsize,
    callable: Option<Arc<dyn Callable>>,
}

/// Builder for [`Object`]
pub struct ObjectBuilder {
    kind: ObjectKind,
    class: &'static dyn ObjectClass,
    prototype: Option<ObjectRef>,
    primitive: Option<Value>,
    callable: Option<Arc<dyn Callable>>,
}

impl ObjectBuilder {
    /// Override the internal-method strategy
    pub fn class(mut self, class: &'static dyn ObjectClass) -> Self {
        self.class = class;
        self
    }

    /// Set the prototype
    pub fn prototype(mut self, prototype: Option<ObjectRef>) -> Self {
        self.prototype = prototype;
        self
    }

    /// Wrap a primitive value
    pub fn primitive(mut self, value: Value) -> Self {
        self.primitive = Some(value);
        self
    }

    /// Make the object callable
    pub fn callable(mut self, callable: Arc<dyn Callable>) -> Self {
        self.callable = Some(callable);
        self
    }

    /// Create the object
    pub fn build(self) -> ObjectRef {
        Arc::new(Object {
            kind: self.kind,
            class: self.class,
            primitive: self.primitive,
            prototype: RwLock::new(self.prototype),
            extensible: AtomicBool::new(true),
            properties: PropertyStore::new(),
            cyclical: AtomicUsize::new(0),
            callable: self.callable,
        })
    }
}

/// Decrements the cyclical counter on drop
pub struct CycleGuard<'a> {
    object: &'a Object,
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        self.object.cyclical.fetch_sub(1, Ordering::AcqRel);
    }
}

impl Object {
    /// Start building an object; the class defaults from the kind
    pub fn builder(kind: ObjectKind) -> ObjectBuilder {
        ObjectBuilder {
            kind,
            class: class::class_for(kind),
            prototype: None,
            primitive: None,
            callable: None,
        }
    }

    /// Kind tag
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Internal-method strategy
    pub fn class(&self) -> &'static dyn ObjectClass {
        self.class
    }

    /// Wrapped primitive, for wrapper objects
    pub fn primitive_value(&self) -> Option<&Value> {
        self.primitive.as_ref()
    }

    /// Check whether `[[Call]]` is implemented
    pub fn is_callable(&self) -> bool {
        self.callable.is_some()
    }

    /// Stable identity for display and cycle detection
    pub fn identity(&self) -> usize {
        self as *const Object as usize
    }

    /// Raw property store
    pub fn properties(&self) -> &PropertyStore {
        &self.properties
    }

    /// Current prototype
    pub fn prototype(&self) -> Option<ObjectRef> {
        self.prototype.read().clone()
    }

    /// Check if new properties may be added
    pub fn is_extensible(&self) -> bool {
        self.extensible.load(Ordering::Acquire)
    }

    /// One-way transition to non-extensible
    pub fn prevent_extensions(&self) {
        // Flip under the store lock so no definition races past the check
        self.properties.exclusive(|| {
            if self.extensible.swap(false, Ordering::AcqRel) {
                tracing::debug!(object = %self.kind, "object made non-extensible");
            }
        });
    }

    /// Enter a cycle-aware walk; `None` if this object is already being walked
    pub fn enter_cycle_guard(&self) -> Option<CycleGuard<'_>> {
        if self.cyclical.fetch_add(1, Ordering::AcqRel) > 0 {
            self.cyclical.fetch_sub(1, Ordering::AcqRel);
            return None;
        }
        Some(CycleGuard { object: self })
    }

    /// Current recursion depth of cycle-aware walks
    pub fn cyclical_count(&self) -> usize {
        self.cyclical.load(Ordering::Acquire)
    }

    /// Drop the prototype link, handing back the old one
    pub(crate) fn detach_prototype(&self) -> Option<ObjectRef> {
        let _mutation = PROTOTYPE_MUTATION.lock();
        self.prototype.write().take()
    }

    /// Approximate bytes held by this object and everything reachable
    /// through its data properties.
    ///
    /// Objects already recorded in `ctx` count as zero, so shared children
    /// and cycles are charged once. Accessor properties and the prototype
    /// chain are not followed. Fails with RangeError when the context's
    /// limit is exceeded.
    pub fn mem_usage(&self, ctx: &mut MemUsageContext) -> Result<u64> {
        let mut pending = Vec::new();
        let mut total = self.own_mem_usage(ctx, &mut pending)?;
        while let Some(child) = pending.pop() {
            total += child.own_mem_usage(ctx, &mut pending)?;
        }
        Ok(total)
    }

    fn own_mem_usage(&self, ctx: &mut MemUsageContext, pending: &mut Vec<ObjectRef>) -> Result<u64> {
        if !ctx.visit(self.identity()) {
            return Ok(0);
        }
        let mut total = mem_usage::EMPTY_SIZE;
        if let Some(primitive) = &self.primitive {
            total += mem_usage::primitive_size(primitive);
        }
        for (key, desc) in self.properties.entries() {
            // Accessors are not charged
            let PropertyDescriptor::Data { value, .. } = desc else {
                continue;
            };
            total += mem_usage::key_size(&key);
            match value {
                Value::Object(child) => pending.push(child),
                primitive => total += mem_usage::primitive_size(&primitive),
            }
        }
        ctx.charge(total)?;
        Ok(total)
    }
}

/// Internal methods (ECMA-262 §8.12), dispatched to the object's class
impl Object {
    /// `[[GetOwnProperty]]`
    pub fn get_own_property(self: &Arc<Self>, key: &PropertyKey) -> Option<PropertyDescriptor> {
        self.class.get_own_property(self, key)
    }

    /// `[[GetProperty]]`: own lookup, then the prototype chain
    pub fn get_property(self: &Arc<Self>, key: &PropertyKey) -> Option<PropertyDescriptor> {
        self.class.get_property(self, key)
    }

    /// `[[Get]]`
    pub fn get(self: &Arc<Self>, realm: &Realm, key: &PropertyKey) -> Result<Value> {
        self.class.get(realm, self, key)
    }

    pub fn can_put(self: &Arc<Self>, key: &PropertyKey) -> bool {
        self.class.can_put(self, key)
    }

    pub fn put(
        self: &Arc<Self>,
        realm: &Realm,
        key: &PropertyKey,
        value: Value,
        throw: bool,
    ) -> Result<()> {
        self.class.put(realm, self, key, value, throw)
    }

    pub fn has_property(self: &Arc<Self>, key: &PropertyKey) -> bool {
        self.class.has_property(self, key)
    }

    pub fn has_own_property(self: &Arc<Self>, key: &PropertyKey) -> bool {
        self.class.has_own_property(self, key)
    }

    pub fn define_own_property(
        self: &Arc<Self>,
        key: &PropertyKey,
        desc: PartialDescriptor,
        throw: bool,
    ) -> Result<bool> {
        self.class.define_own_property(self, key, desc, throw)
    }

    pub fn delete(self: &Arc<Self>, key: &PropertyKey, throw: bool) -> Result<bool> {
        self.class.delete(self, key, throw)
    }

    /// Visit own string keys in insertion order; the visitor returns `false` to stop
    pub fn enumerate(
        self: &Arc<Self>,
        include_non_enumerable: bool,
        visit: &mut dyn FnMut(&str) -> Result<bool>,
    ) -> Result<()> {
        self.class.enumerate(self, include_non_enumerable, visit)
    }

    pub fn default_value(self: &Arc<Self>, realm: &Realm, hint: PreferredType) -> Result<Value> {
        self.class.default_value(realm, self, hint)
    }

    /// Replace the prototype link, refusing links that would close a cycle
    pub fn set_prototype(self: &Arc<Self>, prototype: Option<ObjectRef>) -> Result<()> {
        let _mutation = PROTOTYPE_MUTATION.lock();
        let mut cursor = prototype.clone();
        while let Some(candidate) = cursor {
            if Arc::ptr_eq(&candidate, self) {
                tracing::debug!(object = %self.kind, "rejected cyclic prototype");
                return Err(Error::type_error(messages::CYCLIC_PROTOTYPE));
            }
            cursor = candidate.prototype();
        }
        *self.prototype.write() = prototype;
        tracing::trace!(object = %self.kind, "prototype changed");
        Ok(())
    }

    pub fn call(self: &Arc<Self>, realm: &Realm, this: &Value, args: &[Value]) -> Result<Value> {
        match &self.callable {
            Some(callable) => callable.call(realm, this, args),
            None => Err(Error::type_error(messages::not_a_function(
                &self.kind.to_string(),
            ))),
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("kind", &self.kind)
            .field("class", &self.class.name())
            .field("extensible", &self.is_extensible())
            .field("properties", &self.properties)
            .finish()
    }
}
