//! `Object` constructor, reflection functions and `Object.prototype` methods
//!
//! Every function here is built on the internal-method contract, so it works
//! the same for ordinary, array and wrapper objects.

use super::{arg, define_constructor, define_method};
use crate::error::{messages, Error, Result};
use crate::runtime::object::{ObjectKind, ObjectRef};
use crate::runtime::{
    PartialDescriptor, PropertyAttributes, PropertyDescriptor, PropertyKey, Realm, Value,
    WellKnownSymbol,
};
use std::sync::Arc;
use tracing::debug;

/// Register the `Object` constructor and `Object.prototype`
pub(crate) fn register_object(realm: &Realm) {
    let proto = realm.intrinsics().object_prototype.clone();
    let ctor = define_constructor(realm, "Object", 1, construct, &proto);

    // Object.*
    define_method(realm, &ctor, "getPrototypeOf", 1, get_prototype_of);
    define_method(realm, &ctor, "setPrototypeOf", 2, set_prototype_of);
    define_method(realm, &ctor, "getOwnPropertyDescriptor", 2, get_own_property_descriptor);
    define_method(realm, &ctor, "getOwnPropertyNames", 1, get_own_property_names);
    define_method(realm, &ctor, "create", 2, create);
    define_method(realm, &ctor, "defineProperty", 3, define_property);
    define_method(realm, &ctor, "defineProperties", 2, define_properties);
    define_method(realm, &ctor, "seal", 1, seal);
    define_method(realm, &ctor, "freeze", 1, freeze);
    define_method(realm, &ctor, "preventExtensions", 1, prevent_extensions);
    define_method(realm, &ctor, "isSealed", 1, is_sealed);
    define_method(realm, &ctor, "isFrozen", 1, is_frozen);
    define_method(realm, &ctor, "isExtensible", 1, is_extensible);
    define_method(realm, &ctor, "keys", 1, keys);
    define_method(realm, &ctor, "values", 1, values);
    define_method(realm, &ctor, "entries", 1, entries);
    define_method(realm, &ctor, "fromEntries", 1, from_entries);

    // Object.prototype.*
    define_method(realm, &proto, "valueOf", 0, value_of);
    define_method(realm, &proto, "hasOwnProperty", 1, has_own_property);
    define_method(realm, &proto, "isPrototypeOf", 1, is_prototype_of);
    define_method(realm, &proto, "propertyIsEnumerable", 1, property_is_enumerable);
    define_method(realm, &proto, "toString", 0, to_string);
    define_method(realm, &proto, "toLocaleString", 0, to_locale_string);
    define_method(realm, &proto, "__defineGetter__", 2, define_getter);
    define_method(realm, &proto, "__defineSetter__", 2, define_setter);
}

fn require_object(value: &Value, what: &str) -> Result<ObjectRef> {
    match value {
        Value::Object(obj) => Ok(obj.clone()),
        _ => Err(Error::type_error(messages::called_on_non_object(what))),
    }
}

fn prototype_argument(value: &Value) -> Result<Option<ObjectRef>> {
    match value {
        Value::Object(obj) => Ok(Some(obj.clone())),
        Value::Null => Ok(None),
        _ => Err(Error::type_error(messages::INVALID_PROTOTYPE)),
    }
}

/// `Object(value)` / `new Object(value)`
pub fn construct(realm: &Realm, _this: &Value, args: &[Value]) -> Result<Value> {
    match arg(args, 0) {
        Value::Undefined | Value::Null => Ok(Value::Object(realm.new_object())),
        value => Ok(Value::Object(realm.to_object(&value)?)),
    }
}

// ========== Descriptor conversion ==========

/// FromPropertyDescriptor: externalize a descriptor as a plain object
pub fn from_property_descriptor(realm: &Realm, desc: &PropertyDescriptor) -> Result<ObjectRef> {
    let obj = realm.new_object();
    let field = |name: &str, value: Value| {
        obj.define_own_property(&name.into(), PropertyDescriptor::data(value).into(), true)
    };
    match desc {
        PropertyDescriptor::Data { value, attributes } => {
            field("value", value.clone())?;
            field("writable", Value::Boolean(attributes.writable))?;
        }
        PropertyDescriptor::Accessor { get, set, .. } => {
            field("get", Value::from(get.clone()))?;
            field("set", Value::from(set.clone()))?;
        }
    }
    field("enumerable", Value::Boolean(desc.is_enumerable()))?;
    field("configurable", Value::Boolean(desc.is_configurable()))?;
    Ok(obj)
}

fn accessor_field(realm: &Realm, obj: &ObjectRef, name: &str) -> Result<Option<Option<ObjectRef>>> {
    let key = PropertyKey::from(name);
    if !obj.has_property(&key) {
        return Ok(None);
    }
    match obj.get(realm, &key)? {
        Value::Undefined => Ok(Some(None)),
        Value::Object(f) if f.is_callable() => Ok(Some(Some(f))),
        other => Err(Error::type_error(format!(
            "{} must be a function: {}",
            if name == "get" { "Getter" } else { "Setter" },
            other.to_js_string()
        ))),
    }
}

/// ToPropertyDescriptor: read a descriptor out of a plain object
pub fn to_property_descriptor(realm: &Realm, value: &Value) -> Result<PartialDescriptor> {
    let Value::Object(obj) = value else {
        return Err(Error::type_error(messages::not_an_object(&format!(
            "Property description {}",
            value.to_js_string()
        ))));
    };

    let flag = |name: &str| -> Result<Option<bool>> {
        let key = PropertyKey::from(name);
        if obj.has_property(&key) {
            Ok(Some(obj.get(realm, &key)?.to_boolean()))
        } else {
            Ok(None)
        }
    };

    let mut desc = PartialDescriptor {
        enumerable: flag("enumerable")?,
        configurable: flag("configurable")?,
        writable: flag("writable")?,
        ..Default::default()
    };
    let value_key = PropertyKey::from("value");
    if obj.has_property(&value_key) {
        desc.value = Some(obj.get(realm, &value_key)?);
    }
    desc.get = accessor_field(realm, obj, "get")?;
    desc.set = accessor_field(realm, obj, "set")?;

    if desc.is_conflicting() {
        return Err(Error::type_error(
            "Invalid property descriptor. Cannot both specify accessors and a value or writable attribute",
        ));
    }
    Ok(desc)
}

// ========== Prototype links ==========

/// `Object.getPrototypeOf(obj)`
pub fn get_prototype_of(_realm: &Realm, _this: &Value, args: &[Value]) -> Result<Value> {
    let obj = require_object(&arg(args, 0), "Object.getPrototypeOf")?;
    Ok(obj.prototype().map(Value::Object).unwrap_or(Value::Null))
}

/// `Object.setPrototypeOf(obj, proto)`
pub fn set_prototype_of(_realm: &Realm, _this: &Value, args: &[Value]) -> Result<Value> {
    let obj = require_object(&arg(args, 0), "Object.setPrototypeOf")?;
    let proto = prototype_argument(&arg(args, 1))?;
    obj.set_prototype(proto)?;
    Ok(Value::Object(obj))
}

// ========== Property definition and inspection ==========

/// `Object.getOwnPropertyDescriptor(obj, key)`
pub fn get_own_property_descriptor(realm: &Realm, _this: &Value, args: &[Value]) -> Result<Value> {
    let obj = require_object(&arg(args, 0), "Object.getOwnPropertyDescriptor")?;
    let key = realm.to_property_key(&arg(args, 1))?;
    if let Some(desc) = obj.get_own_property(&key) {
        return Ok(Value::Object(from_property_descriptor(realm, &desc)?));
    }

    // An absent Symbol.toStringTag reports an inert accessor instead of undefined
    if key == PropertyKey::from(WellKnownSymbol::ToStringTag) {
        let getter = realm.new_function("get", 0, |_: &Realm, _: &Value, _: &[Value]| {
            Ok(Value::Undefined)
        });
        let desc = PropertyDescriptor::accessor(
            Some(getter),
            None,
            PropertyAttributes {
                writable: false,
                enumerable: true,
                configurable: true,
            },
        );
        return Ok(Value::Object(from_property_descriptor(realm, &desc)?));
    }
    Ok(Value::Undefined)
}

/// `Object.getOwnPropertyNames(obj)`
pub fn get_own_property_names(realm: &Realm, _this: &Value, args: &[Value]) -> Result<Value> {
    let obj = require_object(&arg(args, 0), "Object.getOwnPropertyNames")?;
    let mut names = Vec::new();
    obj.enumerate(true, &mut |name| {
        realm.wait_one_tick()?;
        names.push(Value::from(name));
        Ok(true)
    })?;
    Ok(Value::Object(realm.new_array(names)))
}

/// `Object.defineProperty(obj, key, descriptor)`
pub fn define_property(realm: &Realm, _this: &Value, args: &[Value]) -> Result<Value> {
    let obj = require_object(&arg(args, 0), "Object.defineProperty")?;
    let key = realm.to_property_key(&arg(args, 1))?;
    let desc = to_property_descriptor(realm, &arg(args, 2))?;
    obj.define_own_property(&key, desc, true)?;
    Ok(Value::Object(obj))
}

/// Apply every enumerable string-keyed descriptor of `props` to `obj`.
///
/// All descriptors are read and validated before any is applied.
fn apply_properties(realm: &Realm, obj: &ObjectRef, props: &Value) -> Result<()> {
    let props = realm.to_object(props)?;
    let mut names = Vec::new();
    props.enumerate(false, &mut |name| {
        names.push(PropertyKey::from(name));
        Ok(true)
    })?;

    let mut descriptors = Vec::with_capacity(names.len());
    for key in names {
        realm.wait_one_tick()?;
        let desc = to_property_descriptor(realm, &props.get(realm, &key)?)?;
        descriptors.push((key, desc));
    }
    for (key, desc) in descriptors {
        obj.define_own_property(&key, desc, true)?;
    }
    Ok(())
}

/// `Object.defineProperties(obj, props)`
pub fn define_properties(realm: &Realm, _this: &Value, args: &[Value]) -> Result<Value> {
    let obj = require_object(&arg(args, 0), "Object.defineProperties")?;
    apply_properties(realm, &obj, &arg(args, 1))?;
    Ok(Value::Object(obj))
}

/// `Object.create(proto, props)`
pub fn create(realm: &Realm, _this: &Value, args: &[Value]) -> Result<Value> {
    let proto = prototype_argument(&arg(args, 0))?;
    let obj = realm.new_object_with_prototype(proto);
    let props = arg(args, 1);
    if !props.is_undefined() {
        apply_properties(realm, &obj, &props)?;
    }
    Ok(Value::Object(obj))
}

// ========== Extensibility ==========

/// Integrity level applied by `seal` / `freeze`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityLevel {
    Sealed,
    Frozen,
}

/// Make the object non-extensible, then restrict every own property through
/// the object's `[[DefineOwnProperty]]`.
///
/// No key can be added once extensions are off, and a property made
/// non-configurable can no longer change kind, so every key seen here ends up
/// restricted even with concurrent writers.
pub fn set_integrity_level(obj: &ObjectRef, level: IntegrityLevel) -> Result<()> {
    obj.prevent_extensions();
    for key in obj.properties().keys() {
        // `false` only when a concurrent delete removed the key
        let sealed = PartialDescriptor::new().with_configurable(false);
        if !obj.define_own_property(&key, sealed, false)? {
            continue;
        }
        if level == IntegrityLevel::Frozen
            && obj.get_own_property(&key).is_some_and(|desc| desc.is_data())
        {
            obj.define_own_property(&key, PartialDescriptor::new().with_writable(false), false)?;
        }
    }
    debug!(object = %obj.kind(), ?level, "integrity level set");
    Ok(())
}

/// Check `seal`/`freeze` state
pub fn test_integrity_level(obj: &ObjectRef, level: IntegrityLevel) -> bool {
    !obj.is_extensible()
        && obj.properties().all(|desc| {
            !desc.is_configurable() && (level == IntegrityLevel::Sealed || !desc.is_writable())
        })
}

/// `Object.isExtensible(obj)`
pub fn is_extensible(_realm: &Realm, _this: &Value, args: &[Value]) -> Result<Value> {
    let obj = require_object(&arg(args, 0), "Object.isExtensible")?;
    Ok(Value::Boolean(obj.is_extensible()))
}

/// `Object.preventExtensions(obj)`
pub fn prevent_extensions(_realm: &Realm, _this: &Value, args: &[Value]) -> Result<Value> {
    let obj = require_object(&arg(args, 0), "Object.preventExtensions")?;
    obj.prevent_extensions();
    Ok(Value::Object(obj))
}

/// `Object.isSealed(obj)`
pub fn is_sealed(_realm: &Realm, _this: &Value, args: &[Value]) -> Result<Value> {
    let obj = require_object(&arg(args, 0), "Object.isSealed")?;
    Ok(Value::Boolean(test_integrity_level(&obj, IntegrityLevel::Sealed)))
}

/// `Object.seal(obj)`
pub fn seal(_realm: &Realm, _this: &Value, args: &[Value]) -> Result<Value> {
    let obj = require_object(&arg(args, 0), "Object.seal")?;
    set_integrity_level(&obj, IntegrityLevel::Sealed)?;
    Ok(Value::Object(obj))
}

/// `Object.isFrozen(obj)`
pub fn is_frozen(_realm: &Realm, _this: &Value, args: &[Value]) -> Result<Value> {
    let obj = require_object(&arg(args, 0), "Object.isFrozen")?;
    Ok(Value::Boolean(test_integrity_level(&obj, IntegrityLevel::Frozen)))
}

/// `Object.freeze(obj)`
pub fn freeze(_realm: &Realm, _this: &Value, args: &[Value]) -> Result<Value> {
    let obj = require_object(&arg(args, 0), "Object.freeze")?;
    set_integrity_level(&obj, IntegrityLevel::Frozen)?;
    Ok(Value::Object(obj))
}

// ========== Enumeration ==========

/// Enumerable own string keys, consulting the throttle per key
fn enumerable_own_keys(realm: &Realm, obj: &ObjectRef) -> Result<Vec<String>> {
    let mut names = Vec::new();
    obj.enumerate(false, &mut |name| {
        realm.wait_one_tick()?;
        names.push(name.to_string());
        Ok(true)
    })?;
    Ok(names)
}

/// `Object.keys(obj)`
pub fn keys(realm: &Realm, _this: &Value, args: &[Value]) -> Result<Value> {
    let obj = require_object(&arg(args, 0), "Object.keys")?;
    let names = enumerable_own_keys(realm, &obj)?;
    Ok(Value::Object(
        realm.new_array(names.into_iter().map(Value::String).collect()),
    ))
}

/// `Object.values(obj)`
pub fn values(realm: &Realm, _this: &Value, args: &[Value]) -> Result<Value> {
    let obj = require_object(&arg(args, 0), "Object.values")?;
    let mut values = Vec::new();
    for name in enumerable_own_keys(realm, &obj)? {
        values.push(obj.get(realm, &PropertyKey::String(name))?);
    }
    Ok(Value::Object(realm.new_array(values)))
}

/// `Object.entries(obj)`
pub fn entries(realm: &Realm, _this: &Value, args: &[Value]) -> Result<Value> {
    let obj = require_object(&arg(args, 0), "Object.entries")?;
    let mut entries = Vec::new();
    for name in enumerable_own_keys(realm, &obj)? {
        let value = obj.get(realm, &PropertyKey::String(name.clone()))?;
        entries.push(Value::Object(
            realm.new_array(vec![Value::String(name), value]),
        ));
    }
    Ok(Value::Object(realm.new_array(entries)))
}

/// Length of an array-like, capped by the realm's `max_fetch_entries`
pub fn array_like_length(realm: &Realm, obj: &ObjectRef) -> Result<usize> {
    let length = match obj.get(realm, &PropertyKey::from("length"))? {
        Value::Number(n) if n.is_finite() && n > 0.0 => n.floor(),
        _ => 0.0,
    };
    let max = realm.config().max_fetch_entries;
    if length > max as f64 {
        return Err(Error::range_error(format!(
            "array-like length {} exceeds the limit of {}",
            length, max
        )));
    }
    Ok(length as usize)
}

/// An object carrying a `length`, own or inherited
fn array_like(value: Value, what: impl FnOnce(&Value) -> String) -> Result<ObjectRef> {
    match value {
        Value::Object(obj) if obj.has_property(&PropertyKey::from("length")) => Ok(obj),
        other => Err(Error::type_error(what(&other))),
    }
}

/// `Object.fromEntries(entries)`: an array-like of `[key, value]` array-likes
pub fn from_entries(realm: &Realm, _this: &Value, args: &[Value]) -> Result<Value> {
    let source = array_like(arg(args, 0), |other| {
        messages::requires(
            "Object.fromEntries",
            &format!("an array-like of entries, got {}", other.to_js_string()),
        )
    })?;
    let length = array_like_length(realm, &source)?;
    let result = realm.new_object();
    for index in 0..length {
        realm.wait_one_tick()?;
        let entry = source.get(realm, &PropertyKey::String(index.to_string()))?;
        let pair = array_like(entry, |other| {
            format!("Iterator value {} is not an entry object", other.to_js_string())
        })?;
        let key = realm.to_property_key(&pair.get(realm, &PropertyKey::from("0"))?)?;
        let value = pair.get(realm, &PropertyKey::from("1"))?;
        result.put(realm, &key, value, true)?;
    }
    Ok(Value::Object(result))
}

// ========== Object.prototype ==========

/// `Object.prototype.valueOf()`
pub fn value_of(realm: &Realm, this: &Value, _args: &[Value]) -> Result<Value> {
    Ok(Value::Object(realm.to_object(this)?))
}

/// `Object.prototype.hasOwnProperty(key)`
pub fn has_own_property(realm: &Realm, this: &Value, args: &[Value]) -> Result<Value> {
    let key = realm.to_property_key(&arg(args, 0))?;
    let obj = realm.to_object(this)?;
    Ok(Value::Boolean(obj.has_own_property(&key)))
}

/// `Object.prototype.isPrototypeOf(value)`
pub fn is_prototype_of(realm: &Realm, this: &Value, args: &[Value]) -> Result<Value> {
    let Value::Object(value) = arg(args, 0) else {
        return Ok(Value::Boolean(false));
    };
    let obj = realm.to_object(this)?;
    let mut cursor = value.prototype();
    while let Some(proto) = cursor {
        if Arc::ptr_eq(&proto, &obj) {
            return Ok(Value::Boolean(true));
        }
        cursor = proto.prototype();
    }
    Ok(Value::Boolean(false))
}

/// `Object.prototype.propertyIsEnumerable(key)`
pub fn property_is_enumerable(realm: &Realm, this: &Value, args: &[Value]) -> Result<Value> {
    let key = realm.to_property_key(&arg(args, 0))?;
    let obj = realm.to_object(this)?;
    Ok(Value::Boolean(
        obj.get_own_property(&key).is_some_and(|d| d.is_enumerable()),
    ))
}

/// `Object.prototype.toString()`: `[object Tag]`
pub fn to_string(realm: &Realm, this: &Value, _args: &[Value]) -> Result<Value> {
    let obj = match this {
        Value::Undefined => return Ok(Value::from("[object Undefined]")),
        Value::Null => return Ok(Value::from("[object Null]")),
        other => realm.to_object(other)?,
    };
    let tag = match obj.get(realm, &WellKnownSymbol::ToStringTag.into())? {
        Value::String(tag) if !tag.is_empty() => tag,
        _ => class_tag(&obj),
    };
    Ok(Value::String(format!("[object {}]", tag)))
}

fn class_tag(obj: &ObjectRef) -> String {
    match obj.kind() {
        // Callable objects report Function regardless of how they were built
        _ if obj.is_callable() => ObjectKind::Function.to_string(),
        kind => kind.to_string(),
    }
}

/// `Object.prototype.toLocaleString()`
pub fn to_locale_string(realm: &Realm, this: &Value, _args: &[Value]) -> Result<Value> {
    let obj = realm.to_object(this)?;
    let method = obj.get(realm, &PropertyKey::from("toString"))?;
    if !method.is_callable() {
        return Err(Error::type_error(messages::not_a_function("toString")));
    }
    realm.call(&method, this, &[])
}

fn define_accessor_half(
    realm: &Realm,
    this: &Value,
    args: &[Value],
    what: &str,
    getter: bool,
) -> Result<Value> {
    let obj = require_object(this, what)?;
    let key = realm.to_property_key(&arg(args, 0))?;
    let function = match arg(args, 1) {
        Value::Object(f) if f.is_callable() => f,
        other => {
            return Err(Error::type_error(messages::not_a_function(
                &other.to_js_string(),
            )))
        }
    };
    let desc = PartialDescriptor::new()
        .with_enumerable(true)
        .with_configurable(true);
    let desc = if getter {
        desc.with_get(Some(function))
    } else {
        desc.with_set(Some(function))
    };
    obj.define_own_property(&key, desc, true)?;
    Ok(this.clone())
}

/// `Object.prototype.__defineGetter__(key, getter)`
pub fn define_getter(realm: &Realm, this: &Value, args: &[Value]) -> Result<Value> {
    define_accessor_half(realm, this, args, "Object.prototype.__defineGetter__", true)
}

/// `Object.prototype.__defineSetter__(key, setter)`
pub fn define_setter(realm: &Realm, this: &Value, args: &[Value]) -> Result<Value> {
    define_accessor_half(realm, this, args, "Object.prototype.__defineSetter__", false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string_keys(realm: &Realm, array: &Value) -> Vec<String> {
        let arr = array.as_object().unwrap();
        let len = array_like_length(realm, arr).unwrap();
        (0..len)
            .map(|i| {
                arr.get(realm, &PropertyKey::String(i.to_string()))
                    .unwrap()
                    .to_js_string()
            })
            .collect()
    }

    #[test]
    fn test_descriptor_conversion_round_trip() {
        let realm = Realm::new();
        let desc = PropertyDescriptor::data_with_attrs(
            Value::from(3),
            PropertyAttributes {
                writable: false,
                enumerable: true,
                configurable: false,
            },
        );
        let external = from_property_descriptor(&realm, &desc).unwrap();
        let back = to_property_descriptor(&realm, &Value::Object(external)).unwrap();
        assert_eq!(back.complete(), desc);
    }

    #[test]
    fn test_to_property_descriptor_rejects_mixed_fields() {
        let realm = Realm::new();
        let bag = realm.new_object();
        bag.put(&realm, &"value".into(), Value::from(1), true).unwrap();
        bag.put(&realm, &"get".into(), Value::Undefined, true).unwrap();
        let err = to_property_descriptor(&realm, &Value::Object(bag)).unwrap_err();
        assert!(err.is_type_error());

        let err = to_property_descriptor(&realm, &Value::from(1)).unwrap_err();
        assert!(err.is_type_error());
    }

    #[test]
    fn test_getter_must_be_callable() {
        let realm = Realm::new();
        let bag = realm.new_object();
        bag.put(&realm, &"get".into(), Value::from(1), true).unwrap();
        assert!(to_property_descriptor(&realm, &Value::Object(bag))
            .unwrap_err()
            .is_type_error());
    }

    #[test]
    fn test_keys_skip_symbols_and_non_enumerables() {
        let realm = Realm::new();
        let obj = realm.new_object();
        obj.put(&realm, &"a".into(), Value::from(1), true).unwrap();
        obj.put(
            &realm,
            &PropertyKey::Symbol(crate::runtime::Symbol::new(None)),
            Value::from(2),
            true,
        )
        .unwrap();
        obj.define_own_property(&"hidden".into(), PartialDescriptor::new().with_value(3), true)
            .unwrap();

        let target = [Value::Object(obj)];
        let keys = keys(&realm, &Value::Undefined, &target).unwrap();
        assert_eq!(string_keys(&realm, &keys), vec!["a"]);
        let names = get_own_property_names(&realm, &Value::Undefined, &target).unwrap();
        assert_eq!(string_keys(&realm, &names), vec!["a", "hidden"]);
    }

    #[test]
    fn test_from_entries_limit() {
        let realm = Realm::with_config(
            crate::config::RealmConfig::default().with_max_fetch_entries(1),
        )
        .unwrap();
        let pair = |k: &str| Value::Object(realm.new_array(vec![Value::from(k), Value::from(1)]));
        let source = realm.new_array(vec![pair("a"), pair("b")]);
        let err = from_entries(&realm, &Value::Undefined, &[Value::Object(source)]).unwrap_err();
        assert_eq!(err.kind(), Some(crate::error::ErrorKind::RangeError));
    }

    #[test]
    fn test_to_string_tags() {
        let realm = Realm::new();
        let call = |this: Value| to_string(&realm, &this, &[]).unwrap().to_js_string();
        assert_eq!(call(Value::Undefined), "[object Undefined]");
        assert_eq!(call(Value::Null), "[object Null]");
        assert_eq!(call(Value::Object(realm.new_object())), "[object Object]");
        assert_eq!(call(Value::Object(realm.new_array(vec![]))), "[object Array]");
        assert_eq!(call(Value::from(1)), "[object Number]");

        let tagged = realm.new_object();
        tagged
            .put(&realm, &WellKnownSymbol::ToStringTag.into(), Value::from("Custom"), true)
            .unwrap();
        assert_eq!(call(Value::Object(tagged)), "[object Custom]");
    }
}
