//! JSON bridge
//!
//! [`serializable_keys`] is the serialization hook: the enumerable string keys
//! of an object, never symbol keys. [`to_json`] / [`stringify`] walk an object
//! graph into `serde_json` values using it, and [`materialize`] goes the other
//! way.

use super::class::array_length;
use super::object::{ObjectKind, ObjectRef};
use super::{PropertyKey, Realm, Value};
use crate::error::{messages, Error, Result};
use serde_json::{Map, Number, Value as JsonValue};

/// Own enumerable string keys, in enumeration order
pub fn serializable_keys(obj: &ObjectRef) -> Result<Vec<String>> {
    let mut keys = Vec::new();
    obj.enumerate(false, &mut |name| {
        keys.push(name.to_string());
        Ok(true)
    })?;
    Ok(keys)
}

fn number(n: f64) -> JsonValue {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        // -0 serializes as 0
        JsonValue::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n).map_or(JsonValue::Null, JsonValue::Number)
    }
}

/// Convert a value to JSON; `None` for values JSON omits (undefined,
/// functions, symbols)
pub fn to_json(realm: &Realm, value: &Value) -> Result<Option<JsonValue>> {
    let obj = match value {
        Value::Undefined | Value::Symbol(_) => return Ok(None),
        Value::Null => return Ok(Some(JsonValue::Null)),
        Value::Boolean(b) => return Ok(Some(JsonValue::Bool(*b))),
        Value::Number(n) => return Ok(Some(number(*n))),
        Value::String(s) => return Ok(Some(JsonValue::String(s.clone()))),
        Value::Object(obj) => obj,
    };
    if obj.is_callable() {
        return Ok(None);
    }
    // Wrappers serialize as their primitive
    if let Some(primitive) = obj.primitive_value() {
        if obj.kind() != ObjectKind::Symbol {
            return to_json(realm, &primitive.clone());
        }
    }

    let Some(_guard) = obj.enter_cycle_guard() else {
        return Err(Error::type_error(messages::CIRCULAR_JSON));
    };

    if obj.kind() == ObjectKind::Array {
        let len = array_length(obj);
        let max = realm.config().max_fetch_entries;
        if len as usize > max {
            return Err(Error::range_error(format!(
                "array length {} exceeds the limit of {}",
                len, max
            )));
        }
        let mut items = Vec::new();
        for index in 0..len {
            let item = obj.get(realm, &PropertyKey::String(index.to_string()))?;
            items.push(to_json(realm, &item)?.unwrap_or(JsonValue::Null));
        }
        return Ok(Some(JsonValue::Array(items)));
    }

    let mut map = Map::new();
    for name in serializable_keys(obj)? {
        let item = obj.get(realm, &PropertyKey::String(name.clone()))?;
        if let Some(json) = to_json(realm, &item)? {
            map.insert(name, json);
        }
    }
    Ok(Some(JsonValue::Object(map)))
}

/// `JSON.stringify` without replacer or indentation; `None` when the value
/// itself is not serializable
pub fn stringify(realm: &Realm, value: &Value) -> Result<Option<String>> {
    Ok(to_json(realm, value)?.map(|json| json.to_string()))
}

/// Build objects, arrays and primitives from a JSON document
pub fn materialize(realm: &Realm, json: &JsonValue) -> Result<Value> {
    Ok(match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Boolean(*b),
        JsonValue::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Array(items) => {
            let values = items
                .iter()
                .map(|item| materialize(realm, item))
                .collect::<Result<Vec<_>>>()?;
            Value::Object(realm.new_array(values))
        }
        JsonValue::Object(map) => {
            let obj = realm.new_object();
            for (key, item) in map {
                let value = materialize(realm, item)?;
                obj.put(realm, &PropertyKey::from(key.as_str()), value, true)?;
            }
            Value::Object(obj)
        }
    })
}
