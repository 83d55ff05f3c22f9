//! Property keys and descriptors
//!
//! A property is either a data property (value + writable) or an accessor
//! property (getter + setter). Both carry the enumerable and configurable
//! flags. [`PartialDescriptor`] is the "descriptor with absent fields" used as
//! the input of `[[DefineOwnProperty]]`, and [`validate_and_apply`] is the
//! merge algorithm of ECMA-262 §8.12.9.

use super::object::ObjectRef;
use super::symbol::{Symbol, WellKnownSymbol};
use super::value::Value;
use std::fmt;
use std::sync::Arc;

/// Property key (string or symbol)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// String property key
    String(String),
    /// Symbol property key
    Symbol(Symbol),
}

impl PropertyKey {
    /// The string form, for string keys
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyKey::String(s) => Some(s),
            PropertyKey::Symbol(_) => None,
        }
    }

    /// Check if this is a symbol key
    pub fn is_symbol(&self) -> bool {
        matches!(self, PropertyKey::Symbol(_))
    }

    /// Array index value of a canonical numeric string key (0 ..= 2^32 - 2)
    pub fn array_index(&self) -> Option<u32> {
        let s = self.as_str()?;
        let n: u32 = s.parse().ok()?;
        if n != u32::MAX && n.to_string() == s {
            Some(n)
        } else {
            None
        }
    }

    /// Convert to a JavaScript value (string or symbol)
    pub fn to_value(&self) -> Value {
        match self {
            PropertyKey::String(s) => Value::String(s.clone()),
            PropertyKey::Symbol(sym) => Value::Symbol(sym.clone()),
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::String(s) => write!(f, "{}", s),
            PropertyKey::Symbol(sym) => write!(f, "{}", sym),
        }
    }
}

impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        PropertyKey::String(s.to_string())
    }
}

impl From<String> for PropertyKey {
    fn from(s: String) -> Self {
        PropertyKey::String(s)
    }
}

impl From<Symbol> for PropertyKey {
    fn from(sym: Symbol) -> Self {
        PropertyKey::Symbol(sym)
    }
}

impl From<WellKnownSymbol> for PropertyKey {
    fn from(wk: WellKnownSymbol) -> Self {
        PropertyKey::Symbol(wk.symbol())
    }
}

/// Property attributes
///
/// `writable` is only meaningful for data properties and is always false on
/// accessors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PropertyAttributes {
    /// Property is writable
    pub writable: bool,
    /// Property is enumerable
    pub enumerable: bool,
    /// Property is configurable
    pub configurable: bool,
}

impl PropertyAttributes {
    /// Attributes of a property created by assignment
    pub const fn data() -> Self {
        Self {
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    /// Attributes of a built-in method: writable, configurable, not enumerable
    pub const fn builtin() -> Self {
        Self {
            writable: true,
            enumerable: false,
            configurable: true,
        }
    }

    /// Non-writable, non-enumerable, non-configurable
    pub const fn frozen() -> Self {
        Self {
            writable: false,
            enumerable: false,
            configurable: false,
        }
    }
}

/// Property descriptor
#[derive(Clone)]
pub enum PropertyDescriptor {
    /// Data property
    Data {
        value: Value,
        attributes: PropertyAttributes,
    },
    /// Accessor property
    Accessor {
        get: Option<ObjectRef>,
        set: Option<ObjectRef>,
        attributes: PropertyAttributes,
    },
}

impl PropertyDescriptor {
    /// Data property with assignment attributes (all true)
    pub fn data(value: Value) -> Self {
        Self::Data {
            value,
            attributes: PropertyAttributes::data(),
        }
    }

    /// Data property with specific attributes
    pub fn data_with_attrs(value: Value, attributes: PropertyAttributes) -> Self {
        Self::Data { value, attributes }
    }

    /// Accessor property; the writable attribute is ignored
    pub fn accessor(
        get: Option<ObjectRef>,
        set: Option<ObjectRef>,
        mut attributes: PropertyAttributes,
    ) -> Self {
        attributes.writable = false;
        Self::Accessor {
            get,
            set,
            attributes,
        }
    }

    /// Attributes of this property
    pub fn attributes(&self) -> PropertyAttributes {
        match self {
            Self::Data { attributes, .. } | Self::Accessor { attributes, .. } => *attributes,
        }
    }

    fn attributes_mut(&mut self) -> &mut PropertyAttributes {
        match self {
            Self::Data { attributes, .. } | Self::Accessor { attributes, .. } => attributes,
        }
    }

    /// Check if this is a data property
    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data { .. })
    }

    /// Check if this is an accessor property
    pub fn is_accessor(&self) -> bool {
        matches!(self, Self::Accessor { .. })
    }

    /// Check if writable (always false for accessors)
    pub fn is_writable(&self) -> bool {
        match self {
            Self::Data { attributes, .. } => attributes.writable,
            Self::Accessor { .. } => false,
        }
    }

    /// Check if enumerable
    pub fn is_enumerable(&self) -> bool {
        self.attributes().enumerable
    }

    /// Check if configurable
    pub fn is_configurable(&self) -> bool {
        self.attributes().configurable
    }

    /// The value, for data properties
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Data { value, .. } => Some(value),
            Self::Accessor { .. } => None,
        }
    }

    /// The getter, for accessor properties
    pub fn getter(&self) -> Option<&ObjectRef> {
        match self {
            Self::Accessor { get, .. } => get.as_ref(),
            Self::Data { .. } => None,
        }
    }

    /// The setter, for accessor properties
    pub fn setter(&self) -> Option<&ObjectRef> {
        match self {
            Self::Accessor { set, .. } => set.as_ref(),
            Self::Data { .. } => None,
        }
    }
}

fn same_function(a: &Option<ObjectRef>, b: &Option<ObjectRef>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        _ => false,
    }
}

impl PartialEq for PropertyDescriptor {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Data {
                    value: a,
                    attributes: attrs_a,
                },
                Self::Data {
                    value: b,
                    attributes: attrs_b,
                },
            ) => a.same_value(b) && attrs_a == attrs_b,
            (
                Self::Accessor {
                    get: get_a,
                    set: set_a,
                    attributes: attrs_a,
                },
                Self::Accessor {
                    get: get_b,
                    set: set_b,
                    attributes: attrs_b,
                },
            ) => same_function(get_a, get_b) && same_function(set_a, set_b) && attrs_a == attrs_b,
            _ => false,
        }
    }
}

impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data { value, attributes } => f
                .debug_struct("Data")
                .field("value", value)
                .field("writable", &attributes.writable)
                .field("enumerable", &attributes.enumerable)
                .field("configurable", &attributes.configurable)
                .finish(),
            Self::Accessor {
                get,
                set,
                attributes,
            } => f
                .debug_struct("Accessor")
                .field("get", &get.is_some())
                .field("set", &set.is_some())
                .field("enumerable", &attributes.enumerable)
                .field("configurable", &attributes.configurable)
                .finish(),
        }
    }
}

/// A property descriptor whose fields may be absent
///
/// `get`/`set` use a nested option: `Some(None)` is an explicit `undefined`.
#[derive(Clone, Default)]
pub struct PartialDescriptor {
    pub value: Option<Value>,
    pub writable: Option<bool>,
    pub get: Option<Option<ObjectRef>>,
    pub set: Option<Option<ObjectRef>>,
    pub enumerable: Option<bool>,
    pub configurable: Option<bool>,
}

impl PartialDescriptor {
    /// An empty (generic) descriptor
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `value`
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set `writable`
    pub fn with_writable(mut self, writable: bool) -> Self {
        self.writable = Some(writable);
        self
    }

    /// Set `get`
    pub fn with_get(mut self, get: Option<ObjectRef>) -> Self {
        self.get = Some(get);
        self
    }

    /// Set `set`
    pub fn with_set(mut self, set: Option<ObjectRef>) -> Self {
        self.set = Some(set);
        self
    }

    /// Set `enumerable`
    pub fn with_enumerable(mut self, enumerable: bool) -> Self {
        self.enumerable = Some(enumerable);
        self
    }

    /// Set `configurable`
    pub fn with_configurable(mut self, configurable: bool) -> Self {
        self.configurable = Some(configurable);
        self
    }

    /// IsDataDescriptor: `value` or `writable` present
    pub fn is_data(&self) -> bool {
        self.value.is_some() || self.writable.is_some()
    }

    /// IsAccessorDescriptor: `get` or `set` present
    pub fn is_accessor(&self) -> bool {
        self.get.is_some() || self.set.is_some()
    }

    /// IsGenericDescriptor: neither data nor accessor
    pub fn is_generic(&self) -> bool {
        !self.is_data() && !self.is_accessor()
    }

    /// Every field absent
    pub fn is_empty(&self) -> bool {
        self.is_generic() && self.enumerable.is_none() && self.configurable.is_none()
    }

    /// Mixes data and accessor fields, which no descriptor may do
    pub fn is_conflicting(&self) -> bool {
        self.is_data() && self.is_accessor()
    }

    /// Fill absent fields with their defaults (false / undefined)
    pub fn complete(&self) -> PropertyDescriptor {
        let attributes = PropertyAttributes {
            writable: self.writable.unwrap_or(false),
            enumerable: self.enumerable.unwrap_or(false),
            configurable: self.configurable.unwrap_or(false),
        };
        if self.is_accessor() {
            PropertyDescriptor::accessor(
                self.get.clone().flatten(),
                self.set.clone().flatten(),
                attributes,
            )
        } else {
            PropertyDescriptor::Data {
                value: self.value.clone().unwrap_or(Value::Undefined),
                attributes,
            }
        }
    }

    /// Every present field already holds the same value in `current`
    fn is_subset_of(&self, current: &PropertyDescriptor) -> bool {
        let attrs = current.attributes();
        if self.enumerable.is_some_and(|e| e != attrs.enumerable)
            || self.configurable.is_some_and(|c| c != attrs.configurable)
        {
            return false;
        }
        match current {
            PropertyDescriptor::Data { value, attributes } => {
                !self.is_accessor()
                    && self.value.as_ref().map_or(true, |v| v.same_value(value))
                    && self.writable.map_or(true, |w| w == attributes.writable)
            }
            PropertyDescriptor::Accessor { get, set, .. } => {
                !self.is_data()
                    && self.get.as_ref().map_or(true, |g| same_function(g, get))
                    && self.set.as_ref().map_or(true, |s| same_function(s, set))
            }
        }
    }
}

impl From<PropertyDescriptor> for PartialDescriptor {
    fn from(desc: PropertyDescriptor) -> Self {
        match desc {
            PropertyDescriptor::Data { value, attributes } => PartialDescriptor {
                value: Some(value),
                writable: Some(attributes.writable),
                enumerable: Some(attributes.enumerable),
                configurable: Some(attributes.configurable),
                ..Default::default()
            },
            PropertyDescriptor::Accessor {
                get,
                set,
                attributes,
            } => PartialDescriptor {
                get: Some(get),
                set: Some(set),
                enumerable: Some(attributes.enumerable),
                configurable: Some(attributes.configurable),
                ..Default::default()
            },
        }
    }
}

impl fmt::Debug for PartialDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartialDescriptor")
            .field("value", &self.value)
            .field("writable", &self.writable)
            .field("get", &self.get.as_ref().map(|g| g.is_some()))
            .field("set", &self.set.as_ref().map(|s| s.is_some()))
            .field("enumerable", &self.enumerable)
            .field("configurable", &self.configurable)
            .finish()
    }
}

/// Why `[[DefineOwnProperty]]` refused a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefineRejection {
    /// New property on a non-extensible object
    NotExtensible,
    /// Illegal change to a non-configurable property
    NotConfigurable,
    /// Descriptor mixes data and accessor fields
    Conflicting,
}

/// ECMA-262 §8.12.9 merge: the descriptor to store after applying `desc` over
/// `current`, or the reason the change is refused.
///
/// `Ok(None)` means nothing needs to be written.
pub fn validate_and_apply(
    current: Option<&PropertyDescriptor>,
    desc: &PartialDescriptor,
    extensible: bool,
) -> Result<Option<PropertyDescriptor>, DefineRejection> {
    if desc.is_conflicting() {
        return Err(DefineRejection::Conflicting);
    }

    let current = match current {
        None if !extensible => return Err(DefineRejection::NotExtensible),
        None => return Ok(Some(desc.complete())),
        Some(current) => current,
    };

    if desc.is_empty() || desc.is_subset_of(current) {
        return Ok(None);
    }

    let attrs = current.attributes();
    if !attrs.configurable {
        if desc.configurable == Some(true) {
            return Err(DefineRejection::NotConfigurable);
        }
        if desc.enumerable.is_some_and(|e| e != attrs.enumerable) {
            return Err(DefineRejection::NotConfigurable);
        }
    }

    let mut next = if desc.is_generic() {
        current.clone()
    } else if current.is_data() != desc.is_data() {
        if !attrs.configurable {
            return Err(DefineRejection::NotConfigurable);
        }
        // Kind switch keeps configurable/enumerable, resets the rest
        let kept = PropertyAttributes {
            writable: false,
            enumerable: attrs.enumerable,
            configurable: attrs.configurable,
        };
        if current.is_data() {
            PropertyDescriptor::accessor(None, None, kept)
        } else {
            PropertyDescriptor::data_with_attrs(Value::Undefined, kept)
        }
    } else {
        match current {
            PropertyDescriptor::Data { value, attributes } => {
                if !attrs.configurable && !attributes.writable {
                    if desc.writable == Some(true) {
                        return Err(DefineRejection::NotConfigurable);
                    }
                    if desc.value.as_ref().is_some_and(|v| !v.same_value(value)) {
                        return Err(DefineRejection::NotConfigurable);
                    }
                }
            }
            PropertyDescriptor::Accessor { get, set, .. } => {
                if !attrs.configurable {
                    if desc.set.as_ref().is_some_and(|s| !same_function(s, set)) {
                        return Err(DefineRejection::NotConfigurable);
                    }
                    if desc.get.as_ref().is_some_and(|g| !same_function(g, get)) {
                        return Err(DefineRejection::NotConfigurable);
                    }
                }
            }
        }
        current.clone()
    };

    match &mut next {
        PropertyDescriptor::Data { value, attributes } => {
            if let Some(v) = &desc.value {
                *value = v.clone();
            }
            if let Some(w) = desc.writable {
                attributes.writable = w;
            }
        }
        PropertyDescriptor::Accessor { get, set, .. } => {
            if let Some(g) = &desc.get {
                *get = g.clone();
            }
            if let Some(s) = &desc.set {
                *set = s.clone();
            }
        }
    }
    let attributes = next.attributes_mut();
    if let Some(e) = desc.enumerable {
        attributes.enumerable = e;
    }
    if let Some(c) = desc.configurable {
        attributes.configurable = c;
    }
    Ok(Some(next))
}
