//! Shared test helpers for integration tests
#![allow(dead_code)]

use quicksilver_objects::{PropertyKey, Realm, Result, Value};

/// Call a static method of a global constructor, e.g. `Object.keys`
pub fn call_static(realm: &Realm, ctor: &str, method: &str, args: &[Value]) -> Result<Value> {
    let ctor = realm.global_value(ctor)?;
    let function = match &ctor {
        Value::Object(obj) => obj.get(realm, &PropertyKey::from(method))?,
        _ => Value::Undefined,
    };
    realm.call(&function, &ctor, args)
}

/// Shorthand for `Object.<method>(...args)`
pub fn object_call(realm: &Realm, method: &str, args: &[Value]) -> Result<Value> {
    call_static(realm, "Object", method, args)
}

/// Call a method found on `this` (own or inherited)
pub fn invoke(realm: &Realm, this: &Value, method: &str, args: &[Value]) -> Result<Value> {
    let obj = realm.to_object(this)?;
    let function = obj.get(realm, &PropertyKey::from(method))?;
    realm.call(&function, this, args)
}

/// Read an array-like into a vector
pub fn to_vec(realm: &Realm, array: &Value) -> Vec<Value> {
    let obj = array.as_object().expect("array expected");
    let len = match obj.get(realm, &"length".into()).unwrap() {
        Value::Number(n) => n as usize,
        other => panic!("bad length {:?}", other),
    };
    (0..len)
        .map(|i| obj.get(realm, &PropertyKey::String(i.to_string())).unwrap())
        .collect()
}

/// Read an array of strings
pub fn to_strings(realm: &Realm, array: &Value) -> Vec<String> {
    to_vec(realm, array)
        .iter()
        .map(|v| v.to_js_string())
        .collect()
}

/// Build a plain object from key/value pairs using `put`
pub fn object_from(realm: &Realm, pairs: &[(&str, Value)]) -> Value {
    let obj = realm.new_object();
    for (key, value) in pairs {
        obj.put(realm, &PropertyKey::from(*key), value.clone(), true)
            .unwrap();
    }
    Value::Object(obj)
}

/// A descriptor bag such as `{value: 1, writable: false}`
pub fn descriptor(realm: &Realm, fields: &[(&str, Value)]) -> Value {
    object_from(realm, fields)
}

/// Read a named property, boxing primitives first
pub fn prop(realm: &Realm, value: &Value, key: &str) -> Value {
    realm
        .to_object(value)
        .unwrap()
        .get(realm, &PropertyKey::from(key))
        .unwrap()
}
