//! Runtime object model
//!
//! This module provides the object representation, the internal-method
//! contract and the [`Realm`], which owns the intrinsic prototypes, creates
//! objects of each kind and performs the conversions property access needs.

pub mod builtins;
pub mod class;
pub mod json;
pub mod mem_usage;
pub mod object;
pub mod property;
pub mod store;
pub mod symbol;
pub mod throttle;
mod value;

pub use class::{ArrayClass, ObjectClass, OrdinaryClass, StringClass};
pub use mem_usage::MemUsageContext;
pub use object::{Callable, Object, ObjectKind, ObjectRef};
pub use property::{PartialDescriptor, PropertyAttributes, PropertyDescriptor, PropertyKey};
pub use store::PropertyStore;
pub use symbol::{Symbol, SymbolRegistry, WellKnownSymbol};
pub use throttle::{CancellationSignal, ExecutionThrottle, ThrottleError, TokenBucket, Unthrottled};
pub use value::{number_to_string, PreferredType, Value};

use crate::config::RealmConfig;
use crate::error::{messages, Error, Result};
use rustc_hash::FxHashSet as HashSet;
use std::sync::Arc;

/// Intrinsic prototypes, the default prototypes handed out by the factory
#[derive(Debug, Clone)]
pub struct Intrinsics {
    pub object_prototype: ObjectRef,
    pub function_prototype: ObjectRef,
    pub array_prototype: ObjectRef,
    pub string_prototype: ObjectRef,
    pub number_prototype: ObjectRef,
    pub boolean_prototype: ObjectRef,
    pub symbol_prototype: ObjectRef,
    pub date_prototype: ObjectRef,
    pub error_prototype: ObjectRef,
}

impl Intrinsics {
    fn new() -> Self {
        let object_prototype = Object::builder(ObjectKind::Object).build();
        let inherit = |kind: ObjectKind| {
            Object::builder(kind)
                .prototype(Some(object_prototype.clone()))
        };

        let function_prototype = inherit(ObjectKind::Function)
            .callable(Arc::new(
                |_: &Realm, _: &Value, _: &[Value]| -> Result<Value> { Ok(Value::Undefined) },
            ))
            .build();
        let array_prototype = inherit(ObjectKind::Array).build();
        write_length(&array_prototype, 0, true);
        let string_prototype = inherit(ObjectKind::String)
            .primitive(Value::String(String::new()))
            .build();
        write_length(&string_prototype, 0, false);

        Self {
            number_prototype: inherit(ObjectKind::Number)
                .primitive(Value::Number(0.0))
                .build(),
            boolean_prototype: inherit(ObjectKind::Boolean)
                .primitive(Value::Boolean(false))
                .build(),
            symbol_prototype: inherit(ObjectKind::Object).build(),
            date_prototype: inherit(ObjectKind::Object).build(),
            error_prototype: inherit(ObjectKind::Object).build(),
            function_prototype,
            array_prototype,
            string_prototype,
            object_prototype,
        }
    }

    /// Every intrinsic prototype
    pub fn all(&self) -> [&ObjectRef; 9] {
        [
            &self.object_prototype,
            &self.function_prototype,
            &self.array_prototype,
            &self.string_prototype,
            &self.number_prototype,
            &self.boolean_prototype,
            &self.symbol_prototype,
            &self.date_prototype,
            &self.error_prototype,
        ]
    }

    /// Default prototype for objects of `kind`
    pub fn prototype_for(&self, kind: ObjectKind) -> &ObjectRef {
        match kind {
            ObjectKind::Function => &self.function_prototype,
            ObjectKind::Array => &self.array_prototype,
            ObjectKind::String => &self.string_prototype,
            ObjectKind::Number => &self.number_prototype,
            ObjectKind::Boolean => &self.boolean_prototype,
            ObjectKind::Symbol => &self.symbol_prototype,
            ObjectKind::Date => &self.date_prototype,
            ObjectKind::Error => &self.error_prototype,
            ObjectKind::Object | ObjectKind::Arguments => &self.object_prototype,
        }
    }
}

fn write_length(obj: &ObjectRef, length: usize, writable: bool) {
    obj.properties().write(
        PropertyKey::from("length"),
        PropertyDescriptor::data_with_attrs(
            Value::Number(length as f64),
            PropertyAttributes {
                writable,
                enumerable: false,
                configurable: false,
            },
        ),
    );
}

/// An object world: intrinsics, global object and execution throttle
pub struct Realm {
    config: RealmConfig,
    intrinsics: Intrinsics,
    global: ObjectRef,
    throttle: Arc<dyn ExecutionThrottle>,
    signal: Option<CancellationSignal>,
}

impl Realm {
    /// Create a realm with the default configuration
    pub fn new() -> Self {
        Self::build(RealmConfig::default())
    }

    /// Create a realm from a validated configuration
    pub fn with_config(config: RealmConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: RealmConfig) -> Self {
        let intrinsics = Intrinsics::new();
        let global = Object::builder(ObjectKind::Object)
            .prototype(Some(intrinsics.object_prototype.clone()))
            .build();
        let realm = Realm {
            throttle: config.build_throttle(),
            config,
            intrinsics,
            global,
            signal: None,
        };
        builtins::install(&realm);
        tracing::debug!(throttled = realm.config.throttle.is_some(), "realm created");
        realm
    }

    /// Configuration this realm was built with
    pub fn config(&self) -> &RealmConfig {
        &self.config
    }

    /// Intrinsic prototypes
    pub fn intrinsics(&self) -> &Intrinsics {
        &self.intrinsics
    }

    /// The global object
    pub fn global(&self) -> &ObjectRef {
        &self.global
    }

    /// Replace the execution throttle
    pub fn set_throttle(&mut self, throttle: Arc<dyn ExecutionThrottle>) {
        self.throttle = throttle;
    }

    /// Attach the cancellation context passed to every throttle wait
    pub fn set_cancellation_signal(&mut self, signal: Option<CancellationSignal>) {
        self.signal = signal;
    }

    /// The attached cancellation context
    pub fn cancellation_signal(&self) -> Option<&CancellationSignal> {
        self.signal.as_ref()
    }

    /// Wait for permission to run one more loop step
    pub fn wait_one_tick(&self) -> Result<()> {
        self.throttle.wait(self.signal.as_ref()).map_err(Error::from)
    }

    /// Create an object of `kind` with its matching class and default prototype
    pub fn new_object_of_kind(&self, kind: ObjectKind) -> ObjectRef {
        let obj = Object::builder(kind)
            .prototype(Some(self.intrinsics.prototype_for(kind).clone()))
            .build();
        if kind == ObjectKind::Array {
            write_length(&obj, 0, true);
        }
        obj
    }

    /// Create an ordinary object inheriting from `Object.prototype`
    pub fn new_object(&self) -> ObjectRef {
        self.new_object_of_kind(ObjectKind::Object)
    }

    /// Create an ordinary object with an explicit prototype
    pub fn new_object_with_prototype(&self, prototype: Option<ObjectRef>) -> ObjectRef {
        Object::builder(ObjectKind::Object).prototype(prototype).build()
    }

    /// Create an array holding `values`
    pub fn new_array(&self, values: Vec<Value>) -> ObjectRef {
        let arr = self.new_object_of_kind(ObjectKind::Array);
        let len = values.len();
        for (index, value) in values.into_iter().enumerate() {
            arr.properties()
                .write(PropertyKey::String(index.to_string()), PropertyDescriptor::data(value));
        }
        write_length(&arr, len, true);
        arr
    }

    /// Create a native function object
    pub fn new_function<F>(&self, name: &str, length: u32, func: F) -> ObjectRef
    where
        F: Fn(&Realm, &Value, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        let function = Object::builder(ObjectKind::Function)
            .prototype(Some(self.intrinsics.function_prototype.clone()))
            .callable(Arc::new(func))
            .build();
        let attrs = PropertyAttributes {
            writable: false,
            enumerable: false,
            configurable: true,
        };
        function.properties().write(
            PropertyKey::from("length"),
            PropertyDescriptor::data_with_attrs(Value::Number(f64::from(length)), attrs),
        );
        function.properties().write(
            PropertyKey::from("name"),
            PropertyDescriptor::data_with_attrs(Value::from(name), attrs),
        );
        function
    }

    /// ToObject: box primitives into wrapper objects
    pub fn to_object(&self, value: &Value) -> Result<ObjectRef> {
        let kind = match value {
            Value::Undefined | Value::Null => {
                return Err(Error::type_error(format!(
                    "Cannot convert {} to object",
                    value.to_js_string()
                )))
            }
            Value::Object(obj) => return Ok(obj.clone()),
            Value::Boolean(_) => ObjectKind::Boolean,
            Value::Number(_) => ObjectKind::Number,
            Value::String(_) => ObjectKind::String,
            Value::Symbol(_) => ObjectKind::Symbol,
        };
        let wrapper = Object::builder(kind)
            .prototype(Some(self.intrinsics.prototype_for(kind).clone()))
            .primitive(value.clone())
            .build();
        if let Value::String(s) = value {
            write_length(&wrapper, s.encode_utf16().count(), false);
        }
        Ok(wrapper)
    }

    /// ToPrimitive
    pub fn to_primitive(&self, value: &Value, hint: PreferredType) -> Result<Value> {
        match value {
            Value::Object(obj) => obj.default_value(self, hint),
            primitive => Ok(primitive.clone()),
        }
    }

    /// ToString; symbols refuse implicit conversion
    pub fn to_string(&self, value: &Value) -> Result<String> {
        match self.to_primitive(value, PreferredType::String)? {
            Value::Symbol(_) => Err(Error::type_error(
                "Cannot convert a Symbol value to a string",
            )),
            primitive => Ok(primitive.to_js_string()),
        }
    }

    /// ToPropertyKey
    pub fn to_property_key(&self, value: &Value) -> Result<PropertyKey> {
        match self.to_primitive(value, PreferredType::String)? {
            Value::Symbol(sym) => Ok(PropertyKey::Symbol(sym)),
            primitive => Ok(PropertyKey::String(primitive.to_js_string())),
        }
    }

    /// Invoke `function` with a receiver and arguments
    pub fn call(&self, function: &Value, this: &Value, args: &[Value]) -> Result<Value> {
        match function {
            Value::Object(obj) if obj.is_callable() => obj.call(self, this, args),
            other => Err(Error::type_error(messages::not_a_function(
                &other.to_js_string(),
            ))),
        }
    }

    /// Read a global binding; ReferenceError when it does not exist
    pub fn global_value(&self, name: &str) -> Result<Value> {
        let key = PropertyKey::from(name);
        if !self.global.has_property(&key) {
            return Err(Error::reference_error(format!("{} is not defined", name)));
        }
        self.global.get(self, &key)
    }

    /// Host-facing `for..in` loop: enumerable string keys of `obj` and its
    /// prototype chain, each name once, own keys shadowing inherited ones.
    ///
    /// The throttle is consulted before each visit; the visitor returns
    /// `false` to stop.
    pub fn for_in(
        &self,
        obj: &ObjectRef,
        mut visit: impl FnMut(&str) -> Result<bool>,
    ) -> Result<()> {
        let mut seen: HashSet<String> = HashSet::default();
        let mut current = Some(obj.clone());
        while let Some(target) = current {
            let mut names = Vec::new();
            target.enumerate(true, &mut |name| {
                names.push(name.to_string());
                Ok(true)
            })?;
            for name in names {
                if !seen.insert(name.clone()) {
                    continue;
                }
                // Skip non-enumerables (they still shadow) and keys deleted mid-loop
                let key = PropertyKey::String(name.clone());
                if !target.get_own_property(&key).is_some_and(|d| d.is_enumerable()) {
                    continue;
                }
                self.wait_one_tick()?;
                if !visit(&name)? {
                    return Ok(());
                }
            }
            current = target.prototype();
        }
        Ok(())
    }
}

/// Intrinsics, constructors and built-in methods reference each other through
/// properties and prototype links. Tearing the realm down clears the
/// intrinsic and global stores and unlinks the intrinsic prototypes so those
/// cycles are released; objects still held by the host keep their own
/// properties but see empty built-ins.
impl Drop for Realm {
    fn drop(&mut self) {
        let mut released = self.global.properties().clear();
        for proto in self.intrinsics.all() {
            released.extend(proto.properties().clear());
            drop(proto.detach_prototype());
        }
        tracing::trace!(released = released.len(), "realm torn down");
    }
}

impl Default for Realm {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Realm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Realm")
            .field("config", &self.config)
            .field("signal", &self.signal)
            .finish()
    }
}
