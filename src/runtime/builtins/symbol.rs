//! `Symbol` constructor, registry functions and `Symbol.prototype`

use super::{arg, define_constructor, define_getter, define_method, define_value};
use crate::error::{messages, Error, Result};
use crate::runtime::object::ObjectKind;
use crate::runtime::{PropertyAttributes, Realm, Symbol, Value, WellKnownSymbol};

/// Register the `Symbol` global and `Symbol.prototype`
pub(crate) fn register_symbol(realm: &Realm) {
    let proto = realm.intrinsics().symbol_prototype.clone();
    let ctor = define_constructor(realm, "Symbol", 0, construct, &proto);

    // Symbol.for / Symbol.keyFor
    define_method(realm, &ctor, "for", 1, symbol_for);
    define_method(realm, &ctor, "keyFor", 1, key_for);

    // Well-known symbols are permanent, read-only constants
    for wk in WellKnownSymbol::ALL {
        define_value(
            &ctor,
            wk.name(),
            Value::Symbol(wk.symbol()),
            PropertyAttributes::frozen(),
        );
    }

    // Symbol.prototype.*
    define_method(realm, &proto, "toString", 0, to_string);
    define_method(realm, &proto, "valueOf", 0, value_of);
    define_getter(realm, &proto, "description", "description", description);
    define_value(
        &proto,
        WellKnownSymbol::ToStringTag,
        Value::from("Symbol"),
        PropertyAttributes {
            writable: false,
            enumerable: false,
            configurable: true,
        },
    );
}

/// thisSymbolValue: a symbol or a Symbol wrapper object
fn this_symbol(this: &Value, method: &str) -> Result<Symbol> {
    match this {
        Value::Symbol(sym) => Ok(sym.clone()),
        Value::Object(obj) if obj.kind() == ObjectKind::Symbol => match obj.primitive_value() {
            Some(Value::Symbol(sym)) => Ok(sym.clone()),
            _ => Err(Error::type_error(messages::requires(method, "a symbol"))),
        },
        _ => Err(Error::type_error(messages::requires(method, "a symbol"))),
    }
}

/// `Symbol(description)`: a new unique symbol
pub fn construct(realm: &Realm, _this: &Value, args: &[Value]) -> Result<Value> {
    let description = match arg(args, 0) {
        Value::Undefined => None,
        value => Some(realm.to_string(&value)?),
    };
    Ok(Value::Symbol(Symbol::new(description)))
}

/// `Symbol.for(key)`
pub fn symbol_for(realm: &Realm, _this: &Value, args: &[Value]) -> Result<Value> {
    let key = realm.to_string(&arg(args, 0))?;
    Ok(Value::Symbol(Symbol::for_key(&key)))
}

/// `Symbol.keyFor(sym)`
pub fn key_for(_realm: &Realm, _this: &Value, args: &[Value]) -> Result<Value> {
    match arg(args, 0) {
        Value::Symbol(sym) => Ok(sym.key_for().map(Value::from).unwrap_or(Value::Undefined)),
        other => Err(Error::type_error(messages::not_a_symbol(
            &other.to_js_string(),
        ))),
    }
}

/// `Symbol.prototype.toString()`
pub fn to_string(_realm: &Realm, this: &Value, _args: &[Value]) -> Result<Value> {
    let sym = this_symbol(this, "Symbol.prototype.toString")?;
    Ok(Value::String(sym.descriptive_string()))
}

/// `Symbol.prototype.valueOf()`
pub fn value_of(_realm: &Realm, this: &Value, _args: &[Value]) -> Result<Value> {
    Ok(Value::Symbol(this_symbol(this, "Symbol.prototype.valueOf")?))
}

/// `get Symbol.prototype.description`
pub fn description(_realm: &Realm, this: &Value, _args: &[Value]) -> Result<Value> {
    let sym = this_symbol(this, "Symbol.prototype.description")?;
    Ok(sym.description().map(Value::from).unwrap_or(Value::Undefined))
}
