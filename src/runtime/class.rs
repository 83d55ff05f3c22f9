//! Internal-method strategies
//!
//! [`ObjectClass`] carries the ECMA-262 §8.12 algorithms as default methods.
//! Each object stores a `&'static dyn ObjectClass` chosen at construction;
//! kinds with exotic behavior override individual methods:
//!
//! - [`OrdinaryClass`]: the defaults, used by plain objects, functions,
//!   wrappers other than String, dates, errors and arguments objects
//! - [`ArrayClass`]: keeps `length` in sync with the index properties
//! - [`StringClass`]: exposes the wrapped string's characters as read-only
//!   index properties
//!
//! The default algorithms are also available as `ordinary_*` free functions so
//! an override can fall back to them.

use super::object::{ObjectKind, ObjectRef};
use super::property::{
    validate_and_apply, DefineRejection, PartialDescriptor, PropertyAttributes,
    PropertyDescriptor, PropertyKey,
};
use super::value::{PreferredType, Value};
use super::Realm;
use crate::error::{messages, Error, Result};
use tracing::debug;

/// Internal-method strategy of an object
pub trait ObjectClass: Send + Sync {
    /// Strategy name, for diagnostics
    fn name(&self) -> &'static str;

    fn get_own_property(&self, obj: &ObjectRef, key: &PropertyKey) -> Option<PropertyDescriptor> {
        ordinary_get_own_property(obj, key)
    }

    fn get_property(&self, obj: &ObjectRef, key: &PropertyKey) -> Option<PropertyDescriptor> {
        ordinary_get_property(obj, key)
    }

    fn get(&self, realm: &Realm, obj: &ObjectRef, key: &PropertyKey) -> Result<Value> {
        ordinary_get(realm, obj, key)
    }

    fn can_put(&self, obj: &ObjectRef, key: &PropertyKey) -> bool {
        ordinary_can_put(obj, key)
    }

    fn put(
        &self,
        realm: &Realm,
        obj: &ObjectRef,
        key: &PropertyKey,
        value: Value,
        throw: bool,
    ) -> Result<()> {
        ordinary_put(realm, obj, key, value, throw)
    }

    fn has_property(&self, obj: &ObjectRef, key: &PropertyKey) -> bool {
        obj.get_property(key).is_some()
    }

    fn has_own_property(&self, obj: &ObjectRef, key: &PropertyKey) -> bool {
        obj.get_own_property(key).is_some()
    }

    fn define_own_property(
        &self,
        obj: &ObjectRef,
        key: &PropertyKey,
        desc: PartialDescriptor,
        throw: bool,
    ) -> Result<bool> {
        ordinary_define_own_property(obj, key, desc, throw)
    }

    fn delete(&self, obj: &ObjectRef, key: &PropertyKey, throw: bool) -> Result<bool> {
        ordinary_delete(obj, key, throw)
    }

    fn enumerate(
        &self,
        obj: &ObjectRef,
        include_non_enumerable: bool,
        visit: &mut dyn FnMut(&str) -> Result<bool>,
    ) -> Result<()> {
        ordinary_enumerate(obj, include_non_enumerable, visit)
    }

    fn default_value(&self, realm: &Realm, obj: &ObjectRef, hint: PreferredType) -> Result<Value> {
        ordinary_default_value(realm, obj, hint)
    }
}

/// Plain objects
#[derive(Debug, Default)]
pub struct OrdinaryClass;

impl ObjectClass for OrdinaryClass {
    fn name(&self) -> &'static str {
        "ordinary"
    }
}

pub static ORDINARY_CLASS: OrdinaryClass = OrdinaryClass;
pub static ARRAY_CLASS: ArrayClass = ArrayClass;
pub static STRING_CLASS: StringClass = StringClass;

/// Default strategy for a kind
pub fn class_for(kind: ObjectKind) -> &'static dyn ObjectClass {
    match kind {
        ObjectKind::Array => &ARRAY_CLASS,
        ObjectKind::String => &STRING_CLASS,
        _ => &ORDINARY_CLASS,
    }
}

/// Fail with TypeError when `throw`, else report `false`
pub(crate) fn reject(throw: bool, message: impl FnOnce() -> String) -> Result<bool> {
    if throw {
        Err(Error::type_error(message()))
    } else {
        Ok(false)
    }
}

fn rejection_message(key: &PropertyKey, rejection: DefineRejection) -> String {
    match rejection {
        DefineRejection::NotExtensible => messages::not_extensible(&key.to_string()),
        DefineRejection::NotConfigurable => messages::cannot_redefine(&key.to_string()),
        DefineRejection::Conflicting => format!(
            "Invalid property descriptor for {}. Cannot both specify accessors and a value or writable attribute",
            key
        ),
    }
}

pub fn ordinary_get_own_property(obj: &ObjectRef, key: &PropertyKey) -> Option<PropertyDescriptor> {
    obj.properties().read(key)
}

pub fn ordinary_get_property(obj: &ObjectRef, key: &PropertyKey) -> Option<PropertyDescriptor> {
    // One object lock at a time; the walk is not atomic across the chain
    let mut current = obj.clone();
    loop {
        if let Some(desc) = current.get_own_property(key) {
            return Some(desc);
        }
        current = current.prototype()?;
    }
}

pub fn ordinary_get(realm: &Realm, obj: &ObjectRef, key: &PropertyKey) -> Result<Value> {
    match obj.get_property(key) {
        None => Ok(Value::Undefined),
        Some(PropertyDescriptor::Data { value, .. }) => Ok(value),
        Some(PropertyDescriptor::Accessor { get: Some(getter), .. }) => {
            getter.call(realm, &Value::Object(obj.clone()), &[])
        }
        Some(PropertyDescriptor::Accessor { get: None, .. }) => Ok(Value::Undefined),
    }
}

pub fn ordinary_can_put(obj: &ObjectRef, key: &PropertyKey) -> bool {
    if let Some(own) = obj.get_own_property(key) {
        return match own {
            PropertyDescriptor::Accessor { set, .. } => set.is_some(),
            PropertyDescriptor::Data { attributes, .. } => attributes.writable,
        };
    }
    let Some(proto) = obj.prototype() else {
        return obj.is_extensible();
    };
    match proto.get_property(key) {
        None => obj.is_extensible(),
        Some(PropertyDescriptor::Accessor { set, .. }) => set.is_some(),
        Some(PropertyDescriptor::Data { attributes, .. }) => {
            obj.is_extensible() && attributes.writable
        }
    }
}

pub fn ordinary_put(
    realm: &Realm,
    obj: &ObjectRef,
    key: &PropertyKey,
    value: Value,
    throw: bool,
) -> Result<()> {
    if !obj.can_put(key) {
        reject(throw, || messages::read_only(&key.to_string()))?;
        return Ok(());
    }

    if obj.get_own_property(key).is_some_and(|own| own.is_data()) {
        obj.define_own_property(key, PartialDescriptor::new().with_value(value), throw)?;
        return Ok(());
    }

    if let Some(PropertyDescriptor::Accessor { set: Some(setter), .. }) = obj.get_property(key) {
        setter.call(realm, &Value::Object(obj.clone()), &[value])?;
        return Ok(());
    }

    obj.define_own_property(key, PropertyDescriptor::data(value).into(), throw)?;
    Ok(())
}

pub fn ordinary_define_own_property(
    obj: &ObjectRef,
    key: &PropertyKey,
    desc: PartialDescriptor,
    throw: bool,
) -> Result<bool> {
    let outcome = obj.properties().with_slot(key, |slot| {
        match validate_and_apply(slot.as_ref(), &desc, obj.is_extensible()) {
            Ok(Some(next)) => {
                *slot = Some(next);
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(rejection) => Err(rejection),
        }
    });
    match outcome {
        Ok(()) => Ok(true),
        Err(DefineRejection::Conflicting) => {
            Err(Error::type_error(rejection_message(key, DefineRejection::Conflicting)))
        }
        Err(rejection) => {
            debug!(%key, ?rejection, "defineOwnProperty rejected");
            reject(throw, || rejection_message(key, rejection))
        }
    }
}

pub fn ordinary_delete(obj: &ObjectRef, key: &PropertyKey, throw: bool) -> Result<bool> {
    let deleted = obj.properties().with_slot(key, |slot| match slot {
        Some(desc) if !desc.is_configurable() => false,
        _ => {
            *slot = None;
            true
        }
    });
    if deleted {
        Ok(true)
    } else {
        debug!(%key, "delete of non-configurable property rejected");
        reject(throw, || messages::cannot_delete(&key.to_string()))
    }
}

pub fn ordinary_enumerate(
    obj: &ObjectRef,
    include_non_enumerable: bool,
    visit: &mut dyn FnMut(&str) -> Result<bool>,
) -> Result<()> {
    // Snapshot the order so the visitor may mutate the object
    for name in obj.properties().string_keys() {
        let Some(desc) = obj.properties().read(&PropertyKey::String(name.clone())) else {
            continue;
        };
        if (include_non_enumerable || desc.is_enumerable()) && !visit(&name)? {
            break;
        }
    }
    Ok(())
}

pub fn ordinary_default_value(realm: &Realm, obj: &ObjectRef, hint: PreferredType) -> Result<Value> {
    let hint = match hint {
        PreferredType::Default if obj.kind() == ObjectKind::Date => PreferredType::String,
        hint => hint,
    };
    let methods: &[&str] = match hint {
        PreferredType::String => &["toString", "valueOf"],
        PreferredType::Symbol => &["toValueString", "toString", "valueOf"],
        PreferredType::Number | PreferredType::Default => &["valueOf", "toString"],
    };

    let this = Value::Object(obj.clone());
    for name in methods {
        if let Value::Object(method) = obj.get(realm, &PropertyKey::from(*name))? {
            if method.is_callable() {
                let result = method.call(realm, &this, &[])?;
                if result.is_primitive() {
                    return Ok(result);
                }
            }
        }
    }
    Err(Error::type_error(messages::CANNOT_CONVERT_PRIMITIVE))
}

/// Array objects: `length` tracks the highest index
#[derive(Debug, Default)]
pub struct ArrayClass;

/// Current `length` of an array object
pub fn array_length(obj: &ObjectRef) -> u32 {
    match obj.properties().read(&PropertyKey::from("length")) {
        Some(PropertyDescriptor::Data {
            value: Value::Number(n),
            ..
        }) => n as u32,
        _ => 0,
    }
}

fn to_array_length(value: &Value) -> Result<u32> {
    match value {
        Value::Number(n) if *n >= 0.0 && n.fract() == 0.0 && *n <= u32::MAX as f64 => Ok(*n as u32),
        _ => Err(Error::range_error("Invalid array length")),
    }
}

fn length_writable(obj: &ObjectRef) -> bool {
    obj.properties()
        .read(&PropertyKey::from("length"))
        .is_some_and(|desc| desc.is_writable())
}

impl ArrayClass {
    fn define_length(obj: &ObjectRef, desc: PartialDescriptor, throw: bool) -> Result<bool> {
        let length_key = PropertyKey::from("length");
        let Some(value) = &desc.value else {
            return ordinary_define_own_property(obj, &length_key, desc, throw);
        };
        let new_len = to_array_length(value)?;
        let old_len = array_length(obj);
        let desc = desc.with_value(new_len as f64);
        if new_len >= old_len {
            return ordinary_define_own_property(obj, &length_key, desc, throw);
        }
        if !length_writable(obj) {
            return reject(throw, || messages::read_only("length"));
        }

        // Remove trailing elements, highest first, stopping at the first
        // one that refuses deletion
        let mut indices: Vec<u32> = obj
            .properties()
            .string_keys()
            .into_iter()
            .filter_map(|k| PropertyKey::String(k).array_index())
            .filter(|&i| i >= new_len)
            .collect();
        indices.sort_unstable_by(|a, b| b.cmp(a));
        for index in indices {
            if !ordinary_delete(obj, &PropertyKey::String(index.to_string()), false)? {
                let kept = desc.clone().with_value((index + 1) as f64);
                ordinary_define_own_property(obj, &length_key, kept, false)?;
                return reject(throw, || messages::cannot_delete(&index.to_string()));
            }
        }
        ordinary_define_own_property(obj, &length_key, desc, throw)
    }
}

impl ObjectClass for ArrayClass {
    fn name(&self) -> &'static str {
        "array"
    }

    fn define_own_property(
        &self,
        obj: &ObjectRef,
        key: &PropertyKey,
        desc: PartialDescriptor,
        throw: bool,
    ) -> Result<bool> {
        if key.as_str() == Some("length") {
            return Self::define_length(obj, desc, throw);
        }
        let Some(index) = key.array_index() else {
            return ordinary_define_own_property(obj, key, desc, throw);
        };
        let old_len = array_length(obj);
        if index >= old_len && !length_writable(obj) {
            return reject(throw, || messages::not_extensible(&key.to_string()));
        }
        if !ordinary_define_own_property(obj, key, desc, throw)? {
            return Ok(false);
        }
        if index >= old_len {
            obj.properties().with_slot(&PropertyKey::from("length"), |slot| {
                if let Some(PropertyDescriptor::Data { value, .. }) = slot {
                    *value = Value::Number(index as f64 + 1.0);
                }
            });
        }
        Ok(true)
    }
}

/// String wrapper objects: UTF-16 code units are read-only enumerable indices
#[derive(Debug, Default)]
pub struct StringClass;

/// Code unit at `index`; a lone surrogate half reads as U+FFFD
fn wrapped_char(obj: &ObjectRef, key: &PropertyKey) -> Option<PropertyDescriptor> {
    let index = key.array_index()? as usize;
    let Some(Value::String(s)) = obj.primitive_value() else {
        return None;
    };
    let unit = s.encode_utf16().nth(index)?;
    Some(PropertyDescriptor::data_with_attrs(
        Value::String(String::from_utf16_lossy(&[unit])),
        PropertyAttributes {
            writable: false,
            enumerable: true,
            configurable: false,
        },
    ))
}

impl ObjectClass for StringClass {
    fn name(&self) -> &'static str {
        "string"
    }

    fn get_own_property(&self, obj: &ObjectRef, key: &PropertyKey) -> Option<PropertyDescriptor> {
        ordinary_get_own_property(obj, key).or_else(|| wrapped_char(obj, key))
    }

    fn define_own_property(
        &self,
        obj: &ObjectRef,
        key: &PropertyKey,
        desc: PartialDescriptor,
        throw: bool,
    ) -> Result<bool> {
        let Some(current) = wrapped_char(obj, key) else {
            return ordinary_define_own_property(obj, key, desc, throw);
        };
        match validate_and_apply(Some(&current), &desc, obj.is_extensible()) {
            Ok(None) => Ok(true),
            Ok(Some(_)) | Err(_) => reject(throw, || messages::cannot_redefine(&key.to_string())),
        }
    }

    fn delete(&self, obj: &ObjectRef, key: &PropertyKey, throw: bool) -> Result<bool> {
        if wrapped_char(obj, key).is_some() {
            return reject(throw, || messages::cannot_delete(&key.to_string()));
        }
        ordinary_delete(obj, key, throw)
    }

    fn enumerate(
        &self,
        obj: &ObjectRef,
        include_non_enumerable: bool,
        visit: &mut dyn FnMut(&str) -> Result<bool>,
    ) -> Result<()> {
        if let Some(Value::String(s)) = obj.primitive_value() {
            for index in 0..s.encode_utf16().count() {
                if !visit(&index.to_string())? {
                    return Ok(());
                }
            }
        }
        ordinary_enumerate(obj, include_non_enumerable, visit)
    }
}
