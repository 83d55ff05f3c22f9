//! JavaScript value types
//!
//! This module defines the runtime representation of JavaScript values as seen
//! by the object model.

use super::object::ObjectRef;
use super::symbol::Symbol;
use std::fmt;
use std::sync::Arc;

/// A JavaScript value
#[derive(Clone)]
pub enum Value {
    /// undefined
    Undefined,
    /// null
    Null,
    /// Boolean value
    Boolean(bool),
    /// Number (IEEE 754 double)
    Number(f64),
    /// String
    String(String),
    /// Symbol
    Symbol(Symbol),
    /// Object (includes arrays, functions, wrappers)
    Object(ObjectRef),
}

/// Conversion hint for `[[DefaultValue]]` / ToPrimitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferredType {
    /// No hint; Number unless the object is a Date
    Default,
    /// Prefer `valueOf`
    Number,
    /// Prefer `toString`
    String,
    /// Prefer `toValueString`
    Symbol,
}

impl Value {
    /// Check if value is undefined
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if value is nullish (null or undefined)
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Check if value is an object
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Check if value is a primitive (anything but an object)
    pub fn is_primitive(&self) -> bool {
        !self.is_object()
    }

    /// Check if value is a callable object
    pub fn is_callable(&self) -> bool {
        match self {
            Value::Object(obj) => obj.is_callable(),
            _ => false,
        }
    }

    /// Borrow the object, if this is one
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Borrow the symbol, if this is one
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Value::Symbol(sym) => Some(sym),
            _ => None,
        }
    }

    /// Convert to boolean (truthiness)
    pub fn to_boolean(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Symbol(_) | Value::Object(_) => true,
        }
    }

    /// String form of a primitive. Objects need ToPrimitive first, which goes
    /// through [`Realm::to_string`](super::Realm::to_string); here they render
    /// as their kind tag.
    pub fn to_js_string(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Boolean(true) => "true".to_string(),
            Value::Boolean(false) => "false".to_string(),
            Value::Number(n) => number_to_string(*n),
            Value::String(s) => s.clone(),
            Value::Symbol(sym) => sym.descriptive_string(),
            Value::Object(obj) => format!("[object {}]", obj.kind()),
        }
    }

    /// Get the typeof string
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "object", // Historical quirk
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Object(obj) => {
                if obj.is_callable() {
                    "function"
                } else {
                    "object"
                }
            }
        }
    }

    /// Strict equality (===)
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// SameValue (ECMA-262 §9.12): like === except NaN equals NaN and +0 differs from -0
    pub fn same_value(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => {
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b && a.is_sign_negative() == b.is_sign_negative()
                }
            }
            _ => self.strict_equals(other),
        }
    }
}

/// Number to string (ECMA-262 §9.8.1, integral and plain decimal forms)
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n == 0.0 {
        "0".to_string()
    } else if n < 0.0 {
        format!("-{}", number_to_string(-n))
    } else {
        // Shortest round-trip digits and exponent, laid out per ECMA-262 §9.8.1
        let sci = format!("{:e}", n);
        let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
        let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
        let k = digits.len() as i32;
        let point = exponent.parse::<i32>().unwrap_or(0) + 1;
        if k <= point && point <= 21 {
            format!("{}{}", digits, "0".repeat((point - k) as usize))
        } else if 0 < point && point <= 21 {
            let (int, frac) = digits.split_at(point as usize);
            format!("{}.{}", int, frac)
        } else if -6 < point && point <= 0 {
            format!("0.{}{}", "0".repeat((-point) as usize), digits)
        } else {
            let sign = if point - 1 < 0 { '-' } else { '+' };
            let (first, rest) = digits.split_at(1);
            if rest.is_empty() {
                format!("{}e{}{}", first, sign, (point - 1).abs())
            } else {
                format!("{}.{}e{}{}", first, rest, sign, (point - 1).abs())
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.same_value(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", number_to_string(*n)),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Symbol(sym) => write!(f, "{}", sym),
            Value::Object(obj) => write!(f, "[{} #{:x}]", obj.kind(), obj.identity()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_js_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Symbol> for Value {
    fn from(sym: Symbol) -> Self {
        Value::Symbol(sym)
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Value::Object(obj)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Undefined)
    }
}
