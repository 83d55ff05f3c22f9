//! Built-in functions and objects
//!
//! This module installs the `Object` and `Symbol` constructors, their static
//! methods and their prototype methods into a realm.

pub mod object;
pub mod symbol;

use super::{ObjectRef, PropertyAttributes, PropertyDescriptor, PropertyKey, Realm, Value};
use crate::error::Result;

/// Signature of a native built-in
pub type NativeFn = fn(&Realm, &Value, &[Value]) -> Result<Value>;

/// Register all built-in globals
pub(crate) fn install(realm: &Realm) {
    object::register_object(realm);
    symbol::register_symbol(realm);
}

/// Argument at `index`, or undefined
pub fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or(Value::Undefined)
}

/// Install a data property without validation
pub(crate) fn define_value(
    target: &ObjectRef,
    key: impl Into<PropertyKey>,
    value: Value,
    attributes: PropertyAttributes,
) {
    target
        .properties()
        .write(key.into(), PropertyDescriptor::data_with_attrs(value, attributes));
}

/// Install a native method (writable, configurable, not enumerable)
pub(crate) fn define_method(
    realm: &Realm,
    target: &ObjectRef,
    name: &str,
    length: u32,
    func: NativeFn,
) -> ObjectRef {
    let function = realm.new_function(name, length, func);
    define_value(
        target,
        name,
        Value::Object(function.clone()),
        PropertyAttributes::builtin(),
    );
    function
}

/// Install a native getter (configurable, not enumerable)
pub(crate) fn define_getter(
    realm: &Realm,
    target: &ObjectRef,
    key: impl Into<PropertyKey>,
    name: &str,
    func: NativeFn,
) {
    let getter = realm.new_function(&format!("get {}", name), 0, func);
    target.properties().write(
        key.into(),
        PropertyDescriptor::accessor(
            Some(getter),
            None,
            PropertyAttributes {
                writable: false,
                enumerable: false,
                configurable: true,
            },
        ),
    );
}

/// Install a constructor on the global object and link it with its prototype
pub(crate) fn define_constructor(
    realm: &Realm,
    name: &str,
    length: u32,
    func: NativeFn,
    prototype: &ObjectRef,
) -> ObjectRef {
    let constructor = realm.new_function(name, length, func);
    define_value(
        &constructor,
        "prototype",
        Value::Object(prototype.clone()),
        PropertyAttributes::frozen(),
    );
    define_value(
        prototype,
        "constructor",
        Value::Object(constructor.clone()),
        PropertyAttributes::builtin(),
    );
    define_value(
        realm.global(),
        name,
        Value::Object(constructor.clone()),
        PropertyAttributes::builtin(),
    );
    constructor
}
